//! Classification gateway: the network boundary to the remote service that
//! turns a profile into course recommendations.
//!
//! The wizard only depends on [`Classifier`]; [`HttpGateway`] is the
//! production implementation.

mod http;
mod payload;

pub use http::{message_from_error_body, HttpGateway};
pub use payload::{normalize_career_paths, ClassifyRequest, ClassifyResponse, Recommendation};

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::error::GatewayError;

/// Anything that can classify a profile payload.
pub trait Classifier {
    /// Submit the payload; resolves to the recommendation list (possibly
    /// empty) or a failure carrying the user-facing message.
    fn classify(
        &self,
        request: &ClassifyRequest,
    ) -> impl Future<Output = Result<Vec<Recommendation>, GatewayError>> + Send;
}

/// Result of the advisory liveness probe. Never gates a wizard transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthStatus {
    /// Service answered; `model_configured` mirrors its `openai_configured` flag.
    Connected { model_configured: bool },
    /// Service reachable but returned a non-success status.
    NotResponding { code: u16 },
    /// Service could not be reached at all.
    Unreachable { url: String },
}

impl HealthStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, HealthStatus::Connected { .. })
    }

    /// One-line status for display.
    pub fn message(&self) -> String {
        match self {
            HealthStatus::Connected { model_configured } => format!(
                "Backend connected - model: {}",
                if *model_configured {
                    "Configured"
                } else {
                    "Not configured"
                }
            ),
            HealthStatus::NotResponding { code } => {
                format!("Backend not responding (HTTP {code})")
            }
            HealthStatus::Unreachable { url } => {
                format!("Cannot connect to backend - make sure the classification service is running at {url}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_messages() {
        assert_eq!(
            HealthStatus::Connected { model_configured: true }.message(),
            "Backend connected - model: Configured"
        );
        assert_eq!(
            HealthStatus::Connected { model_configured: false }.message(),
            "Backend connected - model: Not configured"
        );
        assert!(HealthStatus::NotResponding { code: 503 }.message().contains("503"));
        assert!(!HealthStatus::Unreachable { url: "x".into() }.is_connected());
    }

    #[test]
    fn health_status_serializes_tagged() {
        let json = serde_json::to_value(HealthStatus::NotResponding { code: 502 }).unwrap();
        assert_eq!(json["status"], "not_responding");
        assert_eq!(json["code"], 502);
    }
}
