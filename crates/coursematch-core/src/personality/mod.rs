//! Four-axis personality model.
//!
//! Questions belong to one of four dimensions (E/I, S/N, T/F, J/P). Each
//! answer contributes its magnitude to one letter of its dimension; the
//! letter with the larger total on every axis forms the 4-letter type.

mod questions;
mod scorer;

pub use questions::default_questions;
pub use scorer::{score, PersonalityResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the eight axis letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl Letter {
    pub const ALL: [Letter; 8] = [
        Letter::E,
        Letter::I,
        Letter::S,
        Letter::N,
        Letter::T,
        Letter::F,
        Letter::J,
        Letter::P,
    ];

    pub fn as_char(self) -> char {
        match self {
            Letter::E => 'E',
            Letter::I => 'I',
            Letter::S => 'S',
            Letter::N => 'N',
            Letter::T => 'T',
            Letter::F => 'F',
            Letter::J => 'J',
            Letter::P => 'P',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        Letter::ALL.into_iter().find(|l| l.as_char() == c)
    }

    /// The dimension this letter belongs to.
    pub fn dimension(self) -> Dimension {
        match self {
            Letter::E | Letter::I => Dimension::EI,
            Letter::S | Letter::N => Dimension::SN,
            Letter::T | Letter::F => Dimension::TF,
            Letter::J | Letter::P => Dimension::JP,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A personality axis, written as its letter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "E/I")]
    EI,
    #[serde(rename = "S/N")]
    SN,
    #[serde(rename = "T/F")]
    TF,
    #[serde(rename = "J/P")]
    JP,
}

impl Dimension {
    /// Axes in output order.
    pub const ALL: [Dimension; 4] = [Dimension::EI, Dimension::SN, Dimension::TF, Dimension::JP];

    /// The pole favoured by positive alignment (and by ties).
    pub fn first(self) -> Letter {
        match self {
            Dimension::EI => Letter::E,
            Dimension::SN => Letter::S,
            Dimension::TF => Letter::T,
            Dimension::JP => Letter::J,
        }
    }

    pub fn second(self) -> Letter {
        match self {
            Dimension::EI => Letter::I,
            Dimension::SN => Letter::N,
            Dimension::TF => Letter::F,
            Dimension::JP => Letter::P,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first(), self.second())
    }
}

/// Whether agreeing with a question aligns with the dimension's first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn sign(self) -> i32 {
        match self {
            Polarity::Positive => 1,
            Polarity::Negative => -1,
        }
    }
}

/// A fixed personality question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub dimension: Dimension,
    pub polarity: Polarity,
}

/// The four offered responses. No neutral option exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AnswerChoice {
    StronglyAgree,
    Agree,
    Disagree,
    StronglyDisagree,
}

impl AnswerChoice {
    pub const ALL: [AnswerChoice; 4] = [
        AnswerChoice::StronglyAgree,
        AnswerChoice::Agree,
        AnswerChoice::Disagree,
        AnswerChoice::StronglyDisagree,
    ];

    /// Signed raw value in {-2, -1, 1, 2}.
    pub fn raw(self) -> i32 {
        match self {
            AnswerChoice::StronglyAgree => 2,
            AnswerChoice::Agree => 1,
            AnswerChoice::Disagree => -1,
            AnswerChoice::StronglyDisagree => -2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnswerChoice::StronglyAgree => "Strongly Agree",
            AnswerChoice::Agree => "Agree",
            AnswerChoice::Disagree => "Disagree",
            AnswerChoice::StronglyDisagree => "Strongly Disagree",
        }
    }
}

impl From<AnswerChoice> for i32 {
    fn from(choice: AnswerChoice) -> Self {
        choice.raw()
    }
}

impl TryFrom<i32> for AnswerChoice {
    type Error = ValidationError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            2 => Ok(AnswerChoice::StronglyAgree),
            1 => Ok(AnswerChoice::Agree),
            -1 => Ok(AnswerChoice::Disagree),
            -2 => Ok(AnswerChoice::StronglyDisagree),
            other => Err(ValidationError::InvalidValue {
                field: "choice".into(),
                message: format!("{other} is not one of -2, -1, 1, 2"),
            }),
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AnswerChoice {
    type Err = ValidationError;

    /// Accepts the raw value (`2`, `-1`, ...) or a kebab/space separated label
    /// (`strongly-agree`, `Disagree`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<i32>() {
            return AnswerChoice::try_from(raw);
        }
        let normalized = trimmed.to_ascii_lowercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "stronglyagree" | "sa" => Ok(AnswerChoice::StronglyAgree),
            "agree" | "a" => Ok(AnswerChoice::Agree),
            "disagree" | "d" => Ok(AnswerChoice::Disagree),
            "stronglydisagree" | "sd" => Ok(AnswerChoice::StronglyDisagree),
            _ => Err(ValidationError::InvalidValue {
                field: "choice".into(),
                message: format!("unknown answer '{trimmed}'"),
            }),
        }
    }
}

/// A response to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub choice: AnswerChoice,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, choice: AnswerChoice) -> Self {
        Self {
            question_id: question_id.into(),
            choice,
        }
    }
}

/// Accumulated magnitude per letter. Serializes as `{"E": 4, "I": 2, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScores {
    #[serde(rename = "E", default)]
    pub e: u32,
    #[serde(rename = "I", default)]
    pub i: u32,
    #[serde(rename = "S", default)]
    pub s: u32,
    #[serde(rename = "N", default)]
    pub n: u32,
    #[serde(rename = "T", default)]
    pub t: u32,
    #[serde(rename = "F", default)]
    pub f: u32,
    #[serde(rename = "J", default)]
    pub j: u32,
    #[serde(rename = "P", default)]
    pub p: u32,
}

impl AxisScores {
    pub fn get(&self, letter: Letter) -> u32 {
        match letter {
            Letter::E => self.e,
            Letter::I => self.i,
            Letter::S => self.s,
            Letter::N => self.n,
            Letter::T => self.t,
            Letter::F => self.f,
            Letter::J => self.j,
            Letter::P => self.p,
        }
    }

    fn slot(&mut self, letter: Letter) -> &mut u32 {
        match letter {
            Letter::E => &mut self.e,
            Letter::I => &mut self.i,
            Letter::S => &mut self.s,
            Letter::N => &mut self.n,
            Letter::T => &mut self.t,
            Letter::F => &mut self.f,
            Letter::J => &mut self.j,
            Letter::P => &mut self.p,
        }
    }

    pub fn add(&mut self, letter: Letter, magnitude: u32) {
        *self.slot(letter) += magnitude;
    }

    /// Combined magnitude of both letters of a dimension.
    pub fn dimension_total(&self, dimension: Dimension) -> u32 {
        self.get(dimension.first()) + self.get(dimension.second())
    }

    /// Winning letter of an axis; the first letter wins ties.
    pub fn winner(&self, dimension: Dimension) -> Letter {
        if self.get(dimension.first()) >= self.get(dimension.second()) {
            dimension.first()
        } else {
            dimension.second()
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Letter, u32)> + '_ {
        Letter::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

/// A 4-letter type such as `ENTJ`, one letter per axis in E/I, S/N, T/F, J/P order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonalityType([Letter; 4]);

impl PersonalityType {
    pub fn from_scores(scores: &AxisScores) -> Self {
        Self(Dimension::ALL.map(|d| scores.winner(d)))
    }

    pub fn letters(&self) -> [Letter; 4] {
        self.0
    }

    pub fn letter(&self, dimension: Dimension) -> Letter {
        let idx = Dimension::ALL
            .iter()
            .position(|d| *d == dimension)
            .unwrap_or_default();
        self.0[idx]
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for PersonalityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "personality_type".into(),
            message: format!("'{s}' is not a 4-letter personality type"),
        };
        let chars: Vec<char> = s.trim().to_ascii_uppercase().chars().collect();
        if chars.len() != 4 {
            return Err(invalid());
        }
        let mut letters = [Letter::E; 4];
        for (idx, (c, dimension)) in chars.iter().zip(Dimension::ALL).enumerate() {
            let letter = Letter::from_char(*c).ok_or_else(invalid)?;
            if letter.dimension() != dimension {
                return Err(invalid());
            }
            letters[idx] = letter;
        }
        Ok(Self(letters))
    }
}

impl Serialize for PersonalityType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PersonalityType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
