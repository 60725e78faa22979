// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

use crate::domain::ConstraintViolation;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}: {}", .0.kind(), .0)]
    Constraint(#[from] ConstraintViolation),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// The constraint violation behind this error, if any
    pub fn violation(&self) -> Option<&ConstraintViolation> {
        match self {
            AppError::Constraint(violation) => Some(violation),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_error_message_names_kind() {
        let err = AppError::from(ConstraintViolation::Uniqueness("taken".to_string()));
        assert_eq!(err.to_string(), "UniquenessConstraintViolation: taken");
        assert!(err.violation().is_some());
        assert!(AppError::NotFound("movie 3".to_string()).violation().is_none());
    }

    #[test]
    fn test_storage_errors_convert() {
        let err: AppError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, AppError::Database(_)));

        let err: AppError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error: "));
    }
}
