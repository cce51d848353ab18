use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::{IntoResponse, Response}};
use ip_logger_lib::log_record::NewLogRecord;

use crate::{error::{ApiError, ApiResult}, server_state::ServerState};

/// `POST /ip_logs`, body is a bincode `NewLogRecord`. The timestamp is ours, not the client's.
pub async fn insert_log(State(state): State<Arc<ServerState>>, body: Bytes) -> ApiResult<StatusCode> {
    let record: NewLogRecord = bincode::deserialize(&body).map_err(ApiError::MalformedBody)?;
    let log = state.data_manager.record_log(record).await?;

    tracing::debug!("Stored log {} for {}", log.id, log.ip);
    Ok(StatusCode::CREATED)
}

/// `GET /ip_logs`, every log as bincode, newest first.
pub async fn get_logs(State(state): State<Arc<ServerState>>) -> ApiResult<Response> {
    let logs = state.data_manager.get_logs().await?;
    Ok(Bytes::from_owner(bincode::serialize(&logs).map_err(ApiError::Encode)?).into_response())
}
