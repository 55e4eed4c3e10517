use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {limit} characters (got {length})")]
    TooLong {
        field: &'static str,
        limit: usize,
        length: usize,
    },
}

impl DomainError {
    pub fn empty(field: &'static str) -> Self {
        Self::Empty { field }
    }

    pub fn too_long(field: &'static str, limit: usize, length: usize) -> Self {
        Self::TooLong {
            field,
            limit,
            length,
        }
    }

    /// Name of the input field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } => field,
        }
    }
}
