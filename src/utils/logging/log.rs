//! Logging utilities
//!
//! Standardized messages for dataset lifecycle and request failures, so the
//! loader, the snapshot store and the HTTP layer report them the same way.

use std::path::Path;
use std::time::Duration;

use crate::error::{DirectoryError, ValidationError};

/// Log the start of a dataset load
pub fn log_dataset_loading(path: &Path) {
    log::info!("Loading patient dataset from {}", path.display());
}

/// Log a completed dataset load
///
/// # Arguments
/// * `path` - Dataset file that was read
/// * `records` - Number of patient records loaded
/// * `elapsed` - Time spent reading, parsing and validating
pub fn log_dataset_loaded(path: &Path, records: usize, elapsed: Duration) {
    log::info!(
        "Loaded {} patient records from {} in {:?}",
        records,
        path.display(),
        elapsed
    );
}

/// Log a stale snapshot being replaced
///
/// # Arguments
/// * `path` - Dataset file about to be re-read
/// * `reason` - Refresh policy that marked the snapshot stale
pub fn log_dataset_reload(path: &Path, reason: &str) {
    log::debug!("Reloading patient dataset {} ({reason})", path.display());
}

/// Log a dataset warning, optionally naming the file
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log query parameters that were rejected with a 400
pub fn log_rejected_query(error: &ValidationError) {
    log::warn!("Rejected query parameters: {error}");
}

/// Log a backend failure that was reported to the client as a 500
pub fn log_fetch_failure(error: &DirectoryError) {
    log::error!("Error fetching patients data: {error}");
}
