//! HTTP client for the classification service.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::payload::{ClassifyRequest, ClassifyResponse, Recommendation};
use super::{Classifier, HealthStatus};
use crate::error::GatewayError;
use crate::storage::GatewayConfig;

/// Longest slice of an unparseable error body quoted back to the user.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the classification service's `classify/` and `health/` endpoints.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: Client,
    classify_url: Url,
    health_url: Url,
}

impl HttpGateway {
    /// Build a gateway from a base URL and the two endpoint paths, which are
    /// resolved relative to the base.
    pub fn new(base_url: &str, classify_path: &str, health_path: &str) -> Result<Self, GatewayError> {
        let invalid = |message: String| GatewayError::InvalidUrl {
            url: base_url.to_string(),
            message,
        };

        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| invalid(e.to_string()))?;
        let classify_url = base.join(classify_path).map_err(|e| invalid(e.to_string()))?;
        let health_url = base.join(health_path).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            http_client: Client::new(),
            classify_url,
            health_url,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(&config.base_url, &config.classify_path, &config.health_path)
    }

    pub fn classify_url(&self) -> &Url {
        &self.classify_url
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }

    /// Best-effort liveness probe.
    pub async fn health(&self) -> HealthStatus {
        match self.http_client.get(self.health_url.clone()).send().await {
            Ok(resp) if resp.status().is_success() => {
                let body: Value = resp.json().await.unwrap_or(Value::Null);
                let model_configured = body
                    .get("openai_configured")
                    .or_else(|| body.get("model_configured"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                HealthStatus::Connected { model_configured }
            }
            Ok(resp) => HealthStatus::NotResponding {
                code: resp.status().as_u16(),
            },
            Err(e) => {
                debug!(url = %self.health_url, error = %e, "health probe failed");
                HealthStatus::Unreachable {
                    url: self.health_url.to_string(),
                }
            }
        }
    }

    fn transport(&self, source: reqwest::Error) -> GatewayError {
        GatewayError::Transport {
            url: self.classify_url.to_string(),
            source,
        }
    }
}

impl Classifier for HttpGateway {
    async fn classify(&self, request: &ClassifyRequest) -> Result<Vec<Recommendation>, GatewayError> {
        debug!(
            url = %self.classify_url,
            subjects = request.subjects.len(),
            personality_type = %request.personality_type,
            "submitting classification request"
        );

        let response = self
            .http_client
            .post(self.classify_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport(e))?;

        let result = decode_classify_response(status, &body);
        match &result {
            Ok(recs) => info!(count = recs.len(), "classification succeeded"),
            Err(e) => warn!(status = status.as_u16(), error = %e, "classification failed"),
        }
        result
    }
}

fn decode_classify_response(status: StatusCode, body: &str) -> Result<Vec<Recommendation>, GatewayError> {
    if !status.is_success() {
        return Err(failure_from_body(status, body));
    }
    if body.trim().is_empty() {
        return Err(GatewayError::EmptyResponse { status: None });
    }
    let parsed: ClassifyResponse = serde_json::from_str(body).map_err(GatewayError::InvalidFormat)?;
    Ok(parsed.recommendations)
}

fn failure_from_body(status: StatusCode, body: &str) -> GatewayError {
    let code = status.as_u16();
    if body.trim().is_empty() {
        return GatewayError::EmptyResponse { status: Some(code) };
    }
    let message = match serde_json::from_str::<Value>(body) {
        Ok(value) => message_from_error_body(&value).unwrap_or_else(|| format!("Server error: {status}")),
        Err(_) => {
            let excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
            format!("Server error ({code}): {excerpt}")
        }
    };
    GatewayError::Status { status: code, message }
}

/// Pick the most specific message out of a JSON error body: the `error`
/// string, then `detail`, then a flattened validation mapping. A list body
/// is flattened with its indices as keys. `None` when the body holds
/// nothing usable.
pub fn message_from_error_body(body: &Value) -> Option<String> {
    let parts: Vec<String> = match body {
        Value::Object(fields) => {
            for key in ["error", "detail"] {
                let text = fields
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|t| !t.trim().is_empty());
                if let Some(text) = text {
                    return Some(text.to_string());
                }
            }
            fields
                .iter()
                .map(|(field, value)| format!("{field}: {}", flatten(value)))
                .collect()
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, value)| format!("{i}: {}", flatten(value)))
            .collect(),
        _ => return None,
    };

    if parts.is_empty() {
        return None;
    }
    Some(format!("Validation errors: {}", parts.join("; ")))
}

fn flatten(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(flatten).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
