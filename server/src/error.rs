use axum::{http::StatusCode, response::{IntoResponse, Response}};
use ip_logger_data_management::DataManagerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed body: {0}")]
    MalformedBody(bincode::Error),

    #[error("Failed to encode response: {0}")]
    Encode(bincode::Error),

    #[error(transparent)]
    Data(#[from] DataManagerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MalformedBody(_) | ApiError::Data(DataManagerError::InvalidRecord(_)) => StatusCode::BAD_REQUEST,
            ApiError::Encode(_) | ApiError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        } else {
            tracing::debug!("Rejected request: {self}");
        }

        (status, self.to_string()).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
