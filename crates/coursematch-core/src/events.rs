use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::WizardStep;

/// Returned by wizard transitions and classification completion. Callers
/// decide whether to act on them; the CLI branches on classification
/// outcomes only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StepChanged {
        from: WizardStep,
        to: WizardStep,
        at: DateTime<Utc>,
    },
    /// Moved back one question inside the personality step.
    QuestionRevisited {
        index: usize,
        at: DateTime<Utc>,
    },
    ClassificationSucceeded {
        token: u64,
        recommendation_count: usize,
        at: DateTime<Utc>,
    },
    ClassificationFailed {
        token: u64,
        message: String,
        at: DateTime<Utc>,
    },
    /// A response arrived for a request the wizard no longer awaits.
    ClassificationDiscarded {
        token: u64,
        at: DateTime<Utc>,
    },
    WizardRestarted {
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_internally_tagged() {
        let event = Event::StepChanged {
            from: WizardStep::AcademicInfo,
            to: WizardStep::PersonalityTest,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "StepChanged");
        assert_eq!(json["from"], "academic_info");
        assert_eq!(json["to"], "personality_test");
    }

    #[test]
    fn classification_failure_carries_message() {
        let event = Event::ClassificationFailed {
            token: 3,
            message: "model unavailable".into(),
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ClassificationFailed");
        assert_eq!(json["token"], 3);
        assert_eq!(json["message"], "model unavailable");
        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
