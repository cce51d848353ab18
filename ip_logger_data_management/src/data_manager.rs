use ip_logger_lib::{
    error::{ReadError, StoreError, WriteError},
    log_record::{LogRecord, NewLogRecord},
    telemetry::LogStore,
};

use crate::{config::DatabaseConfig, database::db::IpLogDatabase, DataManagerError};

#[derive(Clone)]
pub struct DataManager {
    pub(crate) database: IpLogDatabase,
}

/// The public interface for all IP log data management.
impl DataManager {
    pub async fn start(config: &DatabaseConfig) -> Result<Self, DataManagerError> {
        let path = config.resolved_path();

        // Create data dir if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::info!("Opening IP log database at {}", path.display());
        let database = IpLogDatabase::connect(&path).await?;

        Ok(DataManager {
            database,
        })
    }

    pub async fn in_memory() -> Result<Self, DataManagerError> {
        Ok(DataManager {
            database: IpLogDatabase::in_memory().await?,
        })
    }

    /// Appends a record. Presence of the IP is the only check made.
    pub async fn record_log(&self, record: NewLogRecord) -> Result<LogRecord, DataManagerError> {
        if record.ip.trim().is_empty() {
            return Err(DataManagerError::InvalidRecord("ip is required".to_string()));
        }

        self.database.insert_log(record).await
    }

    pub async fn get_logs(&self) -> Result<Vec<LogRecord>, DataManagerError> {
        self.database.get_logs().await
    }

    pub async fn count_logs(&self) -> Result<i64, DataManagerError> {
        self.database.count_logs().await
    }
}

impl LogStore for DataManager {
    async fn insert_log(&self, record: NewLogRecord) -> Result<(), WriteError> {
        self.record_log(record).await
            .map(|_| ())
            .map_err(|err| StoreError::ServiceError(err.to_string()))
    }

    async fn fetch_all_logs(&self) -> Result<Vec<LogRecord>, ReadError> {
        self.get_logs().await
            .map_err(|err| StoreError::ServiceError(err.to_string()))
    }
}
