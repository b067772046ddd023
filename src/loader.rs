//! Patient dataset loading
//!
//! The dataset is a single JSON array of patient records. Loading is
//! all-or-nothing: a missing file, invalid JSON or a record that breaks an
//! identity invariant fails the whole load.

use std::path::Path;
use std::time::Instant;

use rustc_hash::FxHashSet;

use crate::error::util::safe_read_to_string;
use crate::error::{DirectoryError, Result};
use crate::models::PatientRecord;
use crate::utils::{log_dataset_loaded, log_dataset_loading, log_warning};

/// Read, parse and validate the dataset at `path`
pub fn load_patients(path: &Path) -> Result<Vec<PatientRecord>> {
    let start = Instant::now();
    log_dataset_loading(path);

    let content = safe_read_to_string(path, "patient dataset")?;
    let patients = parse_patients(&content).map_err(|source| DirectoryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_records(&patients).map_err(|reason| DirectoryError::invalid_dataset(path, reason))?;

    if patients.is_empty() {
        log_warning("Patient dataset is empty", Some(path));
    }
    log_dataset_loaded(path, patients.len(), start.elapsed());
    Ok(patients)
}

/// Parse a JSON array of patient records
pub fn parse_patients(content: &str) -> serde_json::Result<Vec<PatientRecord>> {
    serde_json::from_str(content)
}

/// Check identifiers are positive and unique
fn validate_records(records: &[PatientRecord]) -> std::result::Result<(), String> {
    let mut seen = FxHashSet::default();
    seen.reserve(records.len());

    for (index, record) in records.iter().enumerate() {
        if record.patient_id == 0 {
            return Err(format!("record at index {index} has patient_id 0"));
        }
        if !seen.insert(record.patient_id) {
            return Err(format!(
                "duplicate patient_id {} at index {index}",
                record.patient_id
            ));
        }
    }
    Ok(())
}
