use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo_lookup::Location;

pub const IP_LOGS_TABLE_NAME: &str = "ip_logs";

/// One observed visit or login attempt, as stored by the persistence service.
/// Records are never updated or deleted once written.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub ip: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub user_agent: String,
    /// Assigned by the persistence layer at insert time.
    pub created_at: DateTime<Utc>,
}

impl LogRecord {
    pub fn from_new(id: i64, record: NewLogRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            ip: record.ip,
            city: record.city,
            country: record.country,
            email: record.email,
            user_agent: record.user_agent,
            created_at,
        }
    }
}

/// Insert payload. The id and timestamp are not client supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLogRecord {
    pub ip: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub user_agent: String,
}

impl NewLogRecord {
    pub fn new(location: Location, email: Option<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: location.ip,
            city: location.city,
            country: location.country,
            email,
            user_agent: user_agent.into(),
        }
    }
}
