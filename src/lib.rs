//! A patient directory: a static dataset of patients exposed through a
//! filtering, sorting and pagination API.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod query;
pub mod server;
pub mod snapshot;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::DirectoryConfig;
pub use error::{DirectoryError, Result, ValidationError};
pub use models::{ContactInfo, PatientRecord};

// Loading and snapshots
pub use loader::load_patients;
pub use snapshot::{DatasetStore, RefreshPolicy, Snapshot};

// Query processing
pub use query::{
    PaginationMeta, ParameterLimits, QueryOutcome, QueryParameters, RawQueryParams, SortField,
    SortOrder, process,
};
