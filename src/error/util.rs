//! Utility functions for error handling
//!
//! File access helpers that attach the path and a readable cause to IO errors.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DirectoryError, Result};

/// Safely read a file to string with rich error information
///
/// Missing files, directories in place of files and permission problems each
/// produce an IO error naming the path and the purpose of the read.
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.exists() {
        return Err(DirectoryError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("file not found ({purpose})")),
        ));
    }

    if !path.is_file() {
        return Err(DirectoryError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file ({purpose})"),
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("permission denied - check file permissions ({purpose})")
            }
            io::ErrorKind::InvalidData => {
                format!("file contains invalid UTF-8 data ({purpose})")
            }
            _ => format!("failed to read file content ({purpose}): {e}"),
        };
        DirectoryError::io(path, io::Error::new(e.kind(), message))
    })
}

/// Read the modification time of a file, if the platform reports one
#[must_use]
pub fn modified_time(path: &Path) -> Option<std::time::SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
