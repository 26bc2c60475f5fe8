use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub erro: String,
    pub detalhe: String,
}

/// API error type with HTTP status code and `{erro, detalhe}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, erro: impl Into<String>, detalhe: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                erro: erro.into(),
                detalhe: detalhe.into(),
            },
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(erro: impl Into<String>, detalhe: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, erro, detalhe)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(erro: impl Into<String>, detalhe: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, erro, detalhe)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(erro: impl Into<String>, detalhe: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, erro, detalhe)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
