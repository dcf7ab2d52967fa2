//! Wire types for the classification service.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::personality::AxisScores;
use crate::profile::{Grade, Profile};

/// Body of `POST classify/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub subjects: Vec<String>,
    pub grades: IndexMap<String, Grade>,
    pub favorite_subjects: Vec<String>,
    pub hobbies: Vec<String>,
    pub interests: Vec<String>,
    pub personality_type: String,
    pub personality_scores: AxisScores,
}

impl ClassifyRequest {
    /// Snapshot a profile into the request payload. A profile without a
    /// personality result sends an empty type and zero scores.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            subjects: profile.subjects().map(str::to_string).collect(),
            grades: profile
                .grades()
                .map(|(s, g)| (s.to_string(), g))
                .collect(),
            favorite_subjects: profile.favorite_subjects().map(str::to_string).collect(),
            hobbies: profile.hobbies().map(str::to_string).collect(),
            interests: profile.interests().map(str::to_string).collect(),
            personality_type: profile
                .personality_type()
                .map(|t| t.to_string())
                .unwrap_or_default(),
            personality_scores: profile.axis_scores().unwrap_or_default(),
        }
    }
}

/// One recommended course. `career_paths` is always a clean list, whatever
/// shape the service sent. Missing and `null` text fields read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fit_reason: String,
    #[serde(default, deserialize_with = "deserialize_career_paths")]
    pub career_paths: Vec<String>,
}

/// Successful classification body. The service returns the stored profile
/// alongside `recommendations`; the other fields are ignored. A missing or
/// `null` list is an empty result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<Recommendation>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn normalize_career_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CareerPathsWire {
    Text(String),
    List(Vec<String>),
}

fn deserialize_career_paths<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let paths = match Option::<CareerPathsWire>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(CareerPathsWire::Text(text)) => normalize_career_paths(&text),
        Some(CareerPathsWire::List(items)) => items
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    };
    Ok(paths)
}
