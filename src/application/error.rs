use thiserror::Error;

use crate::{
    application::backend::BackendError,
    domain::{PostId, error::DomainError},
};

/// Every way a store command can fail. The last one lands in the view model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] DomainError),
    #[error("network error: {0}")]
    Network(String),
    #[error("API Error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("post {0} not found")]
    NotFound(PostId),
    #[error("a submission is already in flight")]
    SubmitInFlight,
    #[error("post {0} is already being deleted")]
    DeleteInFlight(PostId),
    #[error("no form is open")]
    NoOpenForm,
}

impl StoreError {
    /// Whether re-issuing the same command could succeed without changing input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Network(_) => "network",
            Self::Api { .. } => "api",
            Self::Decode(_) => "decode",
            Self::NotFound(_) => "not_found",
            Self::SubmitInFlight => "submit_in_flight",
            Self::DeleteInFlight(_) => "delete_in_flight",
            Self::NoOpenForm => "no_open_form",
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Network(message) => Self::Network(message),
            BackendError::Api { status, body } => Self::Api { status, body },
            BackendError::Decode(message) => Self::Decode(message),
        }
    }
}
