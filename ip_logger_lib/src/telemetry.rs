use crate::{
    error::{ReadError, WriteError},
    log_record::{LogRecord, NewLogRecord},
};

/// The persistence service holding `ip_logs`: append and read-all, nothing else.
#[allow(async_fn_in_trait)]
pub trait LogStore {
    async fn insert_log(&self, record: NewLogRecord) -> Result<(), WriteError>;

    async fn fetch_all_logs(&self) -> Result<Vec<LogRecord>, ReadError>;
}

/// A single insert, no retries.
pub async fn write_log<S: LogStore>(store: &S, record: NewLogRecord) -> Result<(), WriteError> {
    store.insert_log(record).await
}

/// Telemetry write. A failure is reported on the operator channel and then dropped,
/// the return value only says whether the record made it.
pub async fn record_best_effort<S: LogStore>(store: &S, record: NewLogRecord) -> bool {
    let ip = record.ip.clone();
    match write_log(store, record).await {
        Ok(()) => {
            tracing::debug!("Logged visit from {ip}");
            true
        }
        Err(err) => {
            tracing::warn!("Failed to log IP {ip}: {err}");
            false
        }
    }
}

/// All stored logs, most recent first.
pub async fn fetch_all_logs<S: LogStore>(store: &S) -> Result<Vec<LogRecord>, ReadError> {
    let mut logs = store.fetch_all_logs().await?;
    sort_by_recency(&mut logs);
    Ok(logs)
}

pub fn sort_by_recency(logs: &mut [LogRecord]) {
    logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
