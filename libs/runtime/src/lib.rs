//! Application plumbing shared by the server binary: layered configuration,
//! logging initialization and shutdown-signal handling.

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig};
pub use shutdown::wait_for_shutdown;
