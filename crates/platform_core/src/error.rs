use shared::error::{DomainError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("평가를 선택해주세요.")]
    RatingRequired,
    #[error("validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::RatingRequired | CoreError::Validation(_) => ErrorCode::Validation,
        }
    }
}

impl From<CoreError> for DomainError {
    fn from(value: CoreError) -> Self {
        DomainError::new(value.code(), value.to_string())
    }
}
