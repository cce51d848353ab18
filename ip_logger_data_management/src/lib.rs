use thiserror::Error;

pub mod config;
pub mod database;
mod data_manager;
pub mod lookup;

pub use data_manager::*;

pub const USER_AGENT: &str = concat!("ip_logger/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
