use axum::extract::rejection::BytesRejection;

use super::converter::ConversionError;
use super::mailer::DeliveryError;

/// Anything that stops a submission short of acknowledgment.
///
/// Detail is for server logs only; callers get a generic message.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission body could not be read: {0}")]
    Unreadable(#[source] BytesRejection),
    #[error("submission body could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document conversion failed: {0}")]
    ConversionFailed(#[from] ConversionError),
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(#[from] DeliveryError),
    #[error("submission handling aborted: {0}")]
    Unknown(String),
}

impl SubmissionError {
    pub const fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Unreadable(_) | SubmissionError::Parse(_) => "parse_error",
            SubmissionError::ConversionFailed(_) => "conversion_failed",
            SubmissionError::DeliveryFailed(_) => "delivery_failed",
            SubmissionError::Unknown(_) => "unknown",
        }
    }
}
