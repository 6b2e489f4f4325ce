use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Outcome of a failed operation. Handlers return it directly; the
/// transport mapping lives in `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Food does not exist: {0}")]
    UnresolvedFood(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("User does not exist")]
    UnknownUser,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: you are not authorized to access this resource")]
    Forbidden,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e)
    }
}

impl AppError {
    /// Hides the existence of a resource from a caller that may not see it.
    pub fn conceal(self, what: &'static str) -> Self {
        match self {
            AppError::Forbidden => AppError::NotFound(what),
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::UnresolvedFood(_)
            | AppError::InvalidReference(_)
            | AppError::UnknownUser => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Internal(e) => {
                error!(error = ?e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conceal_turns_forbidden_into_not_found() {
        let err = AppError::Forbidden.conceal("Meal");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Meal not found");
    }

    #[test]
    fn conceal_keeps_other_errors() {
        let err = AppError::UnknownUser.conceal("Meal");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_do_not_leak_cause() {
        let resp = AppError::Internal(anyhow::anyhow!("db password is hunter2")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(AppError::UnresolvedFood("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidReference("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
