use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fdd_core::error::DashError;
use serde_json::json;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dash(#[from] DashError),
    #[error(transparent)]
    Data(#[from] anyhow::Error),
    #[error("IO error: {message}: {cause}")]
    IO { message: String, cause: io::Error },
    #[error("Worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl Error {
    /// Errors caused by a bad request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Dash(DashError::InvalidArgument(_) | DashError::InvalidDate(_))
        )
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// Bodies that fail to deserialize (an unknown `method` inside the posted
// state, say) are bad arguments like any other unrecognized control value.
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Dash(DashError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::warn!("rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_arguments_are_bad_requests() {
        let err = Error::from(DashError::invalid("method", "median", &["mean", "sum"]));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid argument: unrecognized method 'median' (expected one of: mean, sum)"
        );
        assert_eq!(
            Error::from(DashError::InvalidDate("2008-13-01".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn data_errors_are_server_errors() {
        let err = Error::from(anyhow::anyhow!("database connection lock poisoned"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("lock poisoned"));
    }
}
