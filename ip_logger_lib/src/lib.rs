pub mod controller;
pub mod credentials;
pub mod display;
pub mod error;
pub mod geo_lookup;
pub mod log_record;
pub mod session;
pub mod telemetry;
