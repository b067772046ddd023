//! Query processor
//!
//! `process` is a pure function of a record slice and validated parameters.
//! It borrows from the slice, so a page can be produced from a shared
//! snapshot without copying the collection.

use crate::models::PatientRecord;
use crate::query::filter::{AndFilter, apply_filter};
use crate::query::paginate::{PaginationMeta, paginate};
use crate::query::params::QueryParameters;

/// One page of results plus pagination metadata
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    /// Records on the requested page, in sorted order
    pub patients: Vec<&'a PatientRecord>,
    pub pagination: PaginationMeta,
}

impl QueryOutcome<'_> {
    /// Number of records that matched the filters, across all pages
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pagination.total
    }

    /// Clone the page out of the borrowed snapshot
    #[must_use]
    pub fn to_owned_patients(&self) -> Vec<PatientRecord> {
        self.patients.iter().map(|&p| p.clone()).collect()
    }
}

/// Filter, sort and paginate `records` according to `params`
#[must_use]
pub fn process<'a>(records: &'a [PatientRecord], params: &QueryParameters) -> QueryOutcome<'a> {
    let filter = AndFilter::from_params(params);
    let mut matched = apply_filter(records, &filter);
    params.sort_spec().sort(&mut matched);

    let pagination = PaginationMeta::new(matched.len(), params.page, params.limit);
    let patients = paginate(&matched, params.page, params.limit).to_vec();

    log::debug!(
        "Query matched {} of {} records; returning {} on page {}/{}",
        pagination.total,
        records.len(),
        patients.len(),
        pagination.page,
        pagination.total_pages
    );

    QueryOutcome {
        patients,
        pagination,
    }
}
