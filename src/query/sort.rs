//! Sorting of filtered patient records
//!
//! Each sortable field has its own comparator over the typed value. Equal
//! values fall back to the identifier in ascending order, whatever the
//! requested direction, so every ordering is total and repeatable.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::PatientRecord;
use crate::query::PARALLEL_THRESHOLD;

/// Field a result page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Numeric identifier
    #[default]
    PatientId,
    /// Display name, lexicographic
    PatientName,
    /// Age in years, numeric
    Age,
    /// Medical issue label, lexicographic
    MedicalIssue,
}

impl SortField {
    /// Accepted wire names, in declaration order
    pub const NAMES: &'static [&'static str] =
        &["patient_id", "patient_name", "age", "medical_issue"];

    /// Wire name of the field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatientId => "patient_id",
            Self::PatientName => "patient_name",
            Self::Age => "age",
            Self::MedicalIssue => "medical_issue",
        }
    }

    /// Compare two records by this field alone, ascending
    #[must_use]
    pub fn compare(self, a: &PatientRecord, b: &PatientRecord) -> Ordering {
        match self {
            Self::PatientId => a.patient_id.cmp(&b.patient_id),
            Self::PatientName => a.patient_name.cmp(&b.patient_name),
            Self::Age => a.age.cmp(&b.age),
            Self::MedicalIssue => a.medical_issue.cmp(&b.medical_issue),
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient_id" => Ok(Self::PatientId),
            "patient_name" => Ok(Self::PatientName),
            "age" => Ok(Self::Age),
            "medical_issue" => Ok(Self::MedicalIssue),
            other => Err(ValidationError::UnknownVariant {
                name: "sortBy",
                value: other.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Accepted wire names
    pub const NAMES: &'static [&'static str] = &["asc", "desc"];

    /// Wire name of the direction
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ValidationError::UnknownVariant {
                name: "sortOrder",
                value: s.to_string(),
                expected: Self::NAMES,
            })
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field plus a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Full comparator: the field in the requested direction, then identifier ascending
    #[must_use]
    pub fn compare(&self, a: &PatientRecord, b: &PatientRecord) -> Ordering {
        let primary = match self.order {
            SortOrder::Asc => self.field.compare(a, b),
            SortOrder::Desc => self.field.compare(a, b).reverse(),
        };
        primary.then_with(|| a.patient_id.cmp(&b.patient_id))
    }

    /// Sort borrowed records in place
    pub fn sort(&self, records: &mut [&PatientRecord]) {
        if records.len() >= PARALLEL_THRESHOLD {
            records.par_sort_by(|a, b| self.compare(a, b));
        } else {
            records.sort_by(|a, b| self.compare(a, b));
        }
    }
}
