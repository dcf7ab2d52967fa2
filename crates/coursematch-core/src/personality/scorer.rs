//! Trait scorer.
//!
//! Pure function from a complete answer sheet to a personality type. For
//! each question the answer magnitude goes to the dimension's first letter
//! when `choice * polarity` is positive and to the second letter otherwise,
//! so a reverse-worded question turns disagreement into first-letter weight.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Answer, AxisScores, PersonalityType, Question};

/// Output of [`score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityResult {
    pub personality_type: PersonalityType,
    pub scores: AxisScores,
}

/// Score an answer sheet against the question bank.
///
/// Callers must supply an answer for every question; the wizard only calls
/// this once the sheet is complete. Answers for unknown question ids are
/// ignored and, when a question is answered twice, the later answer wins.
pub fn score(answers: &[Answer], questions: &[Question]) -> PersonalityResult {
    let latest: HashMap<&str, &Answer> = answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect();

    let mut scores = AxisScores::default();
    for question in questions {
        let Some(answer) = latest.get(question.id.as_str()) else {
            continue;
        };
        let raw = answer.choice.raw();
        let alignment = raw * question.polarity.sign();
        let letter = if alignment > 0 {
            question.dimension.first()
        } else {
            question.dimension.second()
        };
        scores.add(letter, raw.unsigned_abs());
    }

    PersonalityResult {
        personality_type: PersonalityType::from_scores(&scores),
        scores,
    }
}
