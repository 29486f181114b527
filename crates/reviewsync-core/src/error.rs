use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReviewSyncError>;

#[derive(Debug, Error)]
pub enum ReviewSyncError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(
        "no paper found with sufficiently similar title; best match: '{title}' (similarity: {score:.2})"
    )]
    LowConfidenceMatch { title: String, score: f64 },

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("record skipped: {0}")]
    RecordParseSkipped(String),

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ReviewSyncError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::LowConfidenceMatch { .. } => "LOW_CONFIDENCE_MATCH",
            Self::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            Self::MalformedIdentifier(_) => "MALFORMED_IDENTIFIER",
            Self::RecordParseSkipped(_) => "RECORD_PARSE_SKIPPED",
            Self::ConfigInvalid(_) => "CONFIG_INVALID",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Http(_) => "HTTP_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        let details = match self {
            Self::LowConfidenceMatch { title, score } => Some(serde_json::json!({
                "best_title": title,
                "best_score": score,
            })),
            _ => None,
        };
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_confidence_message_names_candidate_and_score() {
        let err = ReviewSyncError::LowConfidenceMatch {
            title: "Attention Is All You Need".to_string(),
            score: 0.0,
        };
        let message = err.to_string();
        assert!(message.contains("'Attention Is All You Need'"));
        assert!(message.contains("similarity: 0.00"));
    }

    #[test]
    fn payload_carries_stable_code_and_details() {
        let payload = ReviewSyncError::LowConfidenceMatch {
            title: "x".to_string(),
            score: 0.25,
        }
        .to_payload("resolve_by_title");
        assert_eq!(payload.code, "LOW_CONFIDENCE_MATCH");
        assert_eq!(payload.operation, "resolve_by_title");
        let details = payload.details.expect("details");
        assert_eq!(details["best_title"], "x");
        assert_eq!(details["best_score"], 0.25);
    }

    #[test]
    fn payload_omits_details_for_plain_errors() {
        let payload = ReviewSyncError::NotFound("no papers found".to_string()).to_payload("search");
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["code"], "NOT_FOUND");
        assert!(value.get("details").is_none());
    }
}
