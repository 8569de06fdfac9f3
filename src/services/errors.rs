use crate::helpers::JsonResponse;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Failure categories of the catalog and stack services. Messages only carry
/// identifiers the caller supplied, so they are safe to surface.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error")]
    Database(#[source] sqlx::Error),
    #[error("Snapshot encoding error")]
    Snapshot(#[from] serde_json::Error),
}

impl ServiceError {
    /// True when the error is a unique violation on the named constraint.
    pub fn is_unique_violation_on(&self, constraint: &str) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => {
                err.is_unique_violation() && err.constraint() == Some(constraint)
            }
            _ => false,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<serde_valid::validation::Errors> for ServiceError {
    fn from(errors: serde_valid::validation::Errors) -> Self {
        Self::ValidationFailed(errors.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::Database(err) => {
                tracing::error!("Database failure: {:?}", err);
                "Internal Server Error".to_string()
            }
            Self::Snapshot(err) => {
                tracing::error!("Snapshot failure: {:?}", err);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .json(JsonResponse::failure(self.status_code(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::ValidationFailed("name".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("stack".into()), StatusCode::NOT_FOUND),
            (ServiceError::AlreadyExists("React".into()), StatusCode::CONFLICT),
            (ServiceError::Forbidden("owner".into()), StatusCode::FORBIDDEN),
            (ServiceError::Conflict("version".into()), StatusCode::CONFLICT),
            (ServiceError::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_response().status(), status);
        }
    }

    #[test]
    fn test_database_message_is_hidden() {
        let err = ServiceError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "Database error");
        assert!(!err.is_unique_violation_on("stack_history_stack_version_key"));
    }
}
