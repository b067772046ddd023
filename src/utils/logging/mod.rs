//! Logging utilities for output and operation tracking
//!
//! Dataset and request logging plus the console table used by the CLI.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use console::format_patient_table;
pub use log::{
    log_dataset_loaded, log_dataset_loading, log_dataset_reload, log_fetch_failure,
    log_rejected_query, log_warning,
};
