//! Process-wide plumbing shared by the server binary: layered configuration
//! and logging initialisation.

pub mod config;
pub mod logging;

pub use config::{AppConfig, CliArgs, LoggingConfig, Section, ServerConfig, StoreConfig};
