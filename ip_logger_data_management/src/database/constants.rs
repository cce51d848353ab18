pub use ip_logger_lib::log_record::IP_LOGS_TABLE_NAME;

pub const ID: &str = "id";
pub const IP: &str = "ip";
pub const CITY: &str = "city";
pub const COUNTRY: &str = "country";
pub const EMAIL: &str = "email";
pub const USER_AGENT: &str = "user_agent";
pub const CREATED_AT: &str = "created_at";
