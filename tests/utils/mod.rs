use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use patient_directory::{ContactInfo, PatientRecord};
use tempfile::TempDir;

/// Twelve patients, seven of them with "fever", covering mixed-case names
#[must_use]
pub fn sample_patients() -> Vec<PatientRecord> {
    let rows: [(u64, &str, u32, &str); 12] = [
        (1, "Ann Lee", 34, "fever"),
        (2, "Bob Stone", 52, "headache"),
        (3, "ann marsh", 19, "Fever"),
        (4, "Carla Diaz", 77, "fever"),
        (5, "ANNIE Park", 8, "rash"),
        (6, "Dmitri Volkov", 45, "fever"),
        (7, "Eve Adams", 63, "sore throat"),
        (8, "Frank Ochoa", 84, "fever"),
        (9, "Grace Hall", 29, "headache"),
        (10, "Hiro Tanaka", 70, "fever"),
        (11, "Ines Costa", 41, "rash"),
        (12, "Jon Berg", 56, "fever"),
    ];

    rows.into_iter()
        .map(|(id, name, age, issue)| {
            let record = PatientRecord::new(id, name, age, issue).with_contact(ContactInfo {
                address: Some(format!("{id} Main Street")),
                number: Some(format!("555-01{id:02}")),
                email: Some(format!("patient{id}@example.com")),
            });
            if id % 2 == 1 {
                record.with_photo(format!("https://example.com/photos/{id}.jpg"))
            } else {
                record
            }
        })
        .collect()
}

/// A temporary directory holding one dataset file
pub struct DatasetFixture {
    _dir: TempDir,
    path: PathBuf,
}

impl DatasetFixture {
    /// Write `patients` as a JSON array into a fresh temporary directory
    pub fn new(patients: &[PatientRecord]) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("data.json");
        write_dataset(&path, patients);
        Self { _dir: dir, path }
    }

    /// A fixture whose dataset file contains `raw` verbatim
    pub fn with_content(raw: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("data.json");
        fs::write(&path, raw).expect("failed to write dataset");
        Self { _dir: dir, path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the dataset file contents
    pub fn rewrite(&self, patients: &[PatientRecord]) {
        write_dataset(&self.path, patients);
    }

    /// Replace the dataset file with arbitrary text
    pub fn rewrite_raw(&self, raw: &str) {
        fs::write(&self.path, raw).expect("failed to write dataset");
    }

    /// Move the file's modification time forward so coarse timestamps still change
    pub fn bump_modified(&self, by: Duration) {
        let file = fs::File::options()
            .write(true)
            .open(&self.path)
            .expect("failed to open dataset");
        file.set_modified(SystemTime::now() + by)
            .expect("failed to set modification time");
    }
}

pub fn write_dataset(path: &Path, patients: &[PatientRecord]) {
    let json = serde_json::to_string_pretty(patients).expect("failed to serialize patients");
    fs::write(path, json).expect("failed to write dataset");
}
