//! Record filtering framework
//!
//! Filters are predicates over a single `PatientRecord`. Individual filters
//! are combined conjunctively with `AndFilter`; a query only installs the
//! filters whose parameters are active, so an empty search or issue string
//! never costs a comparison.

use std::fmt::Debug;

use rayon::prelude::*;

use crate::models::PatientRecord;
use crate::query::PARALLEL_THRESHOLD;
use crate::query::params::QueryParameters;

/// A predicate that can be applied to patient records
pub trait RecordFilter: Debug + Send + Sync {
    /// Whether the record passes the filter
    fn matches(&self, record: &PatientRecord) -> bool;
}

/// Case-insensitive substring match on the display name
#[derive(Debug, Clone)]
pub struct NameSearchFilter {
    needle: String,
}

impl NameSearchFilter {
    #[must_use]
    pub fn new(search: &str) -> Self {
        Self {
            needle: search.to_lowercase(),
        }
    }
}

impl RecordFilter for NameSearchFilter {
    fn matches(&self, record: &PatientRecord) -> bool {
        record.patient_name.to_lowercase().contains(&self.needle)
    }
}

/// Case-insensitive exact match on the medical issue label
#[derive(Debug, Clone)]
pub struct MedicalIssueFilter {
    issue: String,
}

impl MedicalIssueFilter {
    #[must_use]
    pub fn new(issue: &str) -> Self {
        Self {
            issue: issue.to_lowercase(),
        }
    }
}

impl RecordFilter for MedicalIssueFilter {
    fn matches(&self, record: &PatientRecord) -> bool {
        record.medical_issue.to_lowercase() == self.issue
    }
}

/// Inclusive age range
#[derive(Debug, Clone, Copy)]
pub struct AgeRangeFilter {
    min_age: u32,
    max_age: u32,
}

impl AgeRangeFilter {
    #[must_use]
    pub const fn new(min_age: u32, max_age: u32) -> Self {
        Self { min_age, max_age }
    }
}

impl RecordFilter for AgeRangeFilter {
    fn matches(&self, record: &PatientRecord) -> bool {
        (self.min_age..=self.max_age).contains(&record.age)
    }
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug, Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn RecordFilter>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Box<dyn RecordFilter>>) -> Self {
        Self { filters }
    }

    /// Build the conjunction of every active predicate in the query
    ///
    /// Empty `search` and `medicalIssue` strings install nothing; the age
    /// range is always installed.
    #[must_use]
    pub fn from_params(params: &QueryParameters) -> Self {
        let mut filter = Self::default();
        if !params.search.is_empty() {
            filter.push(NameSearchFilter::new(&params.search));
        }
        if !params.medical_issue.is_empty() {
            filter.push(MedicalIssueFilter::new(&params.medical_issue));
        }
        filter.push(AgeRangeFilter::new(params.min_age, params.max_age));
        filter
    }

    /// Add a filter to the conjunction
    pub fn push(&mut self, filter: impl RecordFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Number of installed filters
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filter is installed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl RecordFilter for AndFilter {
    fn matches(&self, record: &PatientRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }
}

/// Apply a filter to a slice of records, preserving input order
pub fn apply_filter<'a, F>(records: &'a [PatientRecord], filter: &F) -> Vec<&'a PatientRecord>
where
    F: RecordFilter + ?Sized,
{
    if records.len() >= PARALLEL_THRESHOLD {
        records.par_iter().filter(|r| filter.matches(r)).collect()
    } else {
        records.iter().filter(|r| filter.matches(r)).collect()
    }
}
