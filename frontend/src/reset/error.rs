use thiserror::Error;

use super::session::ResetStep;
use crate::api::ApiError;

/// Failures surfaced by the reset flow. Every variant ends up as the
/// session's visible error text; none of them advance the step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetError {
    /// Rejected locally before any external call was made.
    #[error("{0}")]
    Validation(String),
    /// The identity service, code store or mailer reported a failure.
    #[error("{0}")]
    Service(String),
    /// The action does not apply to the current step.
    #[error("Cannot {action} during the {current} step")]
    State {
        action: &'static str,
        current: ResetStep,
    },
}

impl ResetError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text shown to the user after a failed step. Service failures without
    /// a message fall back to the step's generic text.
    pub fn user_message(&self, step: ResetStep) -> String {
        match self {
            Self::Service(msg) if msg.trim().is_empty() => step.failure_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for ResetError {
    fn from(err: ApiError) -> Self {
        Self::Service(err.error)
    }
}
