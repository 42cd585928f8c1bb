//! Domain-level error type used across the service layer.
//!
//! This error type is HTTP-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError` using
//! the provided `From<DomainError> for AppError` implementation.
//!
//! Every failure is terminal for the single call and leaves the session
//! exactly as it was; callers correct their input and retry.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Bad or missing arguments: blank name, unknown session code, unknown
    /// accused player, forbidden role claim.
    #[error("{detail}")]
    InvalidInput { code: ErrorCode, detail: String },
    /// The session cannot accept this action right now: illegal action for
    /// the current phase, role exclusivity, too few players.
    #[error("{detail}")]
    InvalidState { code: ErrorCode, detail: String },
}

impl DomainError {
    pub fn invalid_input(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            detail: detail.into(),
        }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { code, .. } | Self::InvalidState { code, .. } => *code,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput { detail, .. } | Self::InvalidState { detail, .. } => detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_detail() {
        let err = DomainError::invalid_input(ErrorCode::GameNotFound, "No game found with code X.");
        assert_eq!(err.to_string(), "No game found with code X.");
        assert_eq!(err.code(), ErrorCode::GameNotFound);
    }
}
