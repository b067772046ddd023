//! Domain models for the patient directory
//!
//! This module contains the record types served by the directory. Records are
//! read-only once loaded; every query works on shared references into the
//! current snapshot.

pub mod patient;

// Re-export commonly used types
pub use patient::{ContactInfo, Contacts, PatientRecord};
