//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Backend used when neither the config file nor the CLI names one
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Collection path on the backend
pub const CITIES_PATH: &str = "cities";

/// Shown for any failed load, lookup or create
pub const LOAD_ERROR_MESSAGE: &str = "There was an error loading data...";

/// Shown for a failed delete
pub const DELETE_ERROR_MESSAGE: &str = "There was an error deleting city...";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "cities.log";

/// Application name
pub const APP_NAME: &str = "Cities";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
