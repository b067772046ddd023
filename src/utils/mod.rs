//! Utility functions shared by the loader, the server and the CLI

pub mod logging;

pub use logging::{
    log_dataset_loaded, log_dataset_loading, log_dataset_reload, log_fetch_failure,
    log_rejected_query, log_warning,
};
