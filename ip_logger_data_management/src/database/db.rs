use std::path::Path;

use chrono::{DateTime, Utc};
use const_format::concatcp;
use ip_logger_lib::log_record::{LogRecord, NewLogRecord};
use sqlx::{query_as, sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Executor, Pool, Sqlite, SqlitePool};

use crate::DataManagerError;

use super::constants::*;

const COLUMNS: &str = concatcp!(ID, ", ", IP, ", ", CITY, ", ", COUNTRY, ", ", EMAIL, ", ", USER_AGENT, ", ", CREATED_AT);

/// Append-only store for `ip_logs`. There is deliberately no update or delete.
#[derive(Clone)]
pub struct IpLogDatabase {
    pool: Pool<Sqlite>,
}

impl IpLogDatabase {
    pub async fn connect(path: &Path) -> Result<Self, DataManagerError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        let db = Self {
            pool
        };

        db.init().await?;

        Ok(db)
    }

    /// Single connection, otherwise every pooled connection sees its own empty database.
    pub async fn in_memory() -> Result<Self, DataManagerError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:").await?;

        let db = Self {
            pool
        };

        db.init().await?;

        Ok(db)
    }

    pub async fn init(&self) -> Result<(), DataManagerError> {
        self.pool.execute(concatcp!("
            CREATE TABLE IF NOT EXISTS ", IP_LOGS_TABLE_NAME, "(",
                ID,         " INTEGER PRIMARY KEY AUTOINCREMENT,",
                IP,         " TEXT NOT NULL,",
                CITY,       " TEXT,",
                COUNTRY,    " TEXT,",
                EMAIL,      " TEXT,",
                USER_AGENT, " TEXT NOT NULL,",
                CREATED_AT, " TIMESTAMP NOT NULL);

            CREATE INDEX IF NOT EXISTS idx_ip_logs_created_at ON ", IP_LOGS_TABLE_NAME, "(", CREATED_AT, ")")).await?;

        Ok(())
    }

    pub async fn insert_log(&self, record: NewLogRecord) -> Result<LogRecord, DataManagerError> {
        self.insert_log_at(record, Utc::now()).await
    }

    pub(crate) async fn insert_log_at(&self, record: NewLogRecord, created_at: DateTime<Utc>) -> Result<LogRecord, DataManagerError> {
        let id = query_as::<_, (i64,)>(concatcp!("
            INSERT INTO ", IP_LOGS_TABLE_NAME, "(",
            IP, ", ", CITY, ", ", COUNTRY, ", ", EMAIL, ", ", USER_AGENT, ", ", CREATED_AT, ")
            VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING ", ID))
                .bind(&record.ip)
                .bind(&record.city)
                .bind(&record.country)
                .bind(&record.email)
                .bind(&record.user_agent)
                .bind(created_at)
                .fetch_one(&self.pool).await
                .map(|row| row.0)?;

        Ok(LogRecord::from_new(id, record, created_at))
    }

    /// Every row, newest first. Rows written in the same instant keep insertion order reversed.
    pub async fn get_logs(&self) -> Result<Vec<LogRecord>, DataManagerError> {
        let logs = query_as::<_, LogRecord>(concatcp!(
            "SELECT ", COLUMNS, " FROM ", IP_LOGS_TABLE_NAME, " ORDER BY ", CREATED_AT, " DESC, ", ID, " DESC"))
            .fetch_all(&self.pool).await?;

        Ok(logs)
    }

    pub async fn count_logs(&self) -> Result<i64, DataManagerError> {
        let count = query_as::<_, (i64,)>(concatcp!("SELECT COUNT(*) FROM ", IP_LOGS_TABLE_NAME))
            .fetch_one(&self.pool).await?
            .0;

        Ok(count)
    }
}
