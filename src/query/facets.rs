//! Medical issue vocabulary
//!
//! The set of issue labels present in a dataset, with how many records carry
//! each one. Labels are grouped the same way the issue filter compares them
//! (case-insensitively) and reported with the spelling seen first.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::PatientRecord;

/// One medical issue label and the number of records carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCount {
    pub medical_issue: String,
    pub count: usize,
}

/// Count records per medical issue, ordered by label
#[must_use]
pub fn medical_issue_counts(records: &[PatientRecord]) -> Vec<IssueCount> {
    let mut counts: FxHashMap<String, IssueCount> = FxHashMap::default();
    for record in records {
        counts
            .entry(record.medical_issue.to_lowercase())
            .or_insert_with(|| IssueCount {
                medical_issue: record.medical_issue.clone(),
                count: 0,
            })
            .count += 1;
    }

    counts
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, count)| count)
        .collect()
}
