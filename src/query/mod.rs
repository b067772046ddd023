//! Query processing over an in-memory patient collection
//!
//! A query runs in three steps over a borrowed slice of records:
//! filter (conjunctive predicates), sort (typed field comparator with an
//! identifier tie-break) and paginate (half-open slice clipped to the
//! filtered length). Nothing here touches the filesystem; callers hand in a
//! snapshot and receive borrowed records back.

pub mod facets;
pub mod filter;
pub mod paginate;
pub mod params;
pub mod processor;
pub mod sort;

/// Collections at least this large are filtered and sorted on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 10_000;

// Re-export the most common types for easier use
pub use facets::{IssueCount, medical_issue_counts};
pub use filter::{
    AgeRangeFilter, AndFilter, MedicalIssueFilter, NameSearchFilter, RecordFilter, apply_filter,
};
pub use paginate::{PaginationMeta, paginate};
pub use params::{ParameterLimits, QueryParameters, RawQueryParams};
pub use processor::{QueryOutcome, process};
pub use sort::{SortField, SortOrder, SortSpec};
