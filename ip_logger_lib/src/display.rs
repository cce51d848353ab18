use chrono::{DateTime, Utc};

use crate::log_record::LogRecord;

/// One row of the admin table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub key: i64,
    pub ip: String,
    pub location: String,
    pub email: String,
    pub date: String,
}

impl From<&LogRecord> for LogRow {
    fn from(log: &LogRecord) -> Self {
        Self {
            key: log.id,
            ip: log.ip.clone(),
            location: location_label(log.city.as_deref(), log.country.as_deref()),
            email: email_label(log.email.as_deref()),
            date: date_label(log.created_at),
        }
    }
}

/// "City, Country", leaving out whatever is missing.
pub fn location_label(city: Option<&str>, country: Option<&str>) -> String {
    [city, country]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn email_label(email: Option<&str>) -> String {
    match email {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => "-".to_string(),
    }
}

pub fn date_label(created_at: DateTime<Utc>) -> String {
    created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn row_formatting() {
        assert_eq!(location_label(Some("Aarhus"), Some("Denmark")), "Aarhus, Denmark");
        assert_eq!(location_label(None, Some("Denmark")), "Denmark");
        assert_eq!(location_label(Some(""), None), "");
        assert_eq!(email_label(None), "-");
        assert_eq!(email_label(Some("")), "-");

        let log = LogRecord {
            id: 9,
            ip: "203.0.113.9".to_string(),
            city: Some("Yerevan".to_string()),
            country: None,
            email: Some("visitor@example.com".to_string()),
            user_agent: "test".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 17, 5, 9).unwrap(),
        };
        assert_eq!(LogRow::from(&log), LogRow {
            key: 9,
            ip: "203.0.113.9".to_string(),
            location: "Yerevan".to_string(),
            email: "visitor@example.com".to_string(),
            date: "2025-04-02 17:05:09 UTC".to_string(),
        });
    }
}
