//! Query parameters
//!
//! `RawQueryParams` is what arrives on the wire: every value optional and
//! untyped. `RawQueryParams::validate` turns it into `QueryParameters`,
//! applying defaults for absent or empty values and rejecting values that do
//! not parse instead of letting them leak into the pagination arithmetic.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::query::sort::{SortField, SortOrder, SortSpec};

/// Default 1-based page number
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;
/// Default upper bound on the page size
pub const DEFAULT_MAX_LIMIT: u32 = 100;
/// Default inclusive lower age bound
pub const DEFAULT_MIN_AGE: u32 = 0;
/// Default inclusive upper age bound
pub const DEFAULT_MAX_AGE: u32 = 200;

/// Query parameters as received, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub medical_issue: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Page-size bounds applied during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLimits {
    /// Page size used when `limit` is absent
    pub default_limit: u32,
    /// Largest accepted `limit`
    pub max_limit: u32,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Validated query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    /// 1-based page number
    pub page: u32,
    /// Page size, at least 1
    pub limit: u32,
    /// Substring matched against the name, case-insensitively; empty matches all
    pub search: String,
    /// Exact medical issue label, case-insensitively; empty matches all
    pub medical_issue: String,
    /// Inclusive lower age bound
    pub min_age: u32,
    /// Inclusive upper age bound
    pub max_age: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: String::new(),
            medical_issue: String::new(),
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl QueryParameters {
    #[must_use]
    pub const fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_medical_issue(mut self, medical_issue: impl Into<String>) -> Self {
        self.medical_issue = medical_issue.into();
        self
    }

    #[must_use]
    pub const fn with_age_range(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// The requested ordering
    #[must_use]
    pub const fn sort_spec(&self) -> SortSpec {
        SortSpec::new(self.sort_by, self.sort_order)
    }
}

impl RawQueryParams {
    /// Validate the raw values, applying defaults for absent ones
    pub fn validate(&self, limits: &ParameterLimits) -> Result<QueryParameters, ValidationError> {
        let page = parse_bounded("page", present(&self.page), DEFAULT_PAGE, 1, u32::MAX)?;
        let limit = parse_bounded(
            "limit",
            present(&self.limit),
            limits.default_limit,
            1,
            limits.max_limit,
        )?;
        let min_age = parse_bounded("minAge", present(&self.min_age), DEFAULT_MIN_AGE, 0, u32::MAX)?;
        let max_age = parse_bounded("maxAge", present(&self.max_age), DEFAULT_MAX_AGE, 0, u32::MAX)?;
        if min_age > max_age {
            return Err(ValidationError::InvertedAgeRange { min_age, max_age });
        }

        let sort_by = present(&self.sort_by)
            .map(str::parse::<SortField>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = present(&self.sort_order)
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        Ok(QueryParameters {
            page,
            limit,
            search: self.search.clone().unwrap_or_default(),
            medical_issue: self.medical_issue.clone().unwrap_or_default(),
            min_age,
            max_age,
            sort_by,
            sort_order,
        })
    }
}

/// A value that was sent and is not empty
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_bounded(
    name: &'static str,
    raw: Option<&str>,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32, ValidationError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::NotAnInteger {
            name,
            value: raw.to_string(),
        })?;

    if value < u64::from(min) || value > u64::from(max) {
        return Err(ValidationError::OutOfRange {
            name,
            value,
            min: u64::from(min),
            max: u64::from(max),
        });
    }

    // Bounded by `max` above
    Ok(value as u32)
}
