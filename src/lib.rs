// Library interface for the bmirs modules
// This allows integration tests to access the core functionality

pub mod bmi;
pub mod calories;
pub mod config;
pub mod error;
pub mod history;
pub mod ideal_weight;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod share;
pub mod units;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{BmirsError, Result};
pub use history::{FormSession, HistoryStore, MAX_RECORDS};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
