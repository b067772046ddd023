//! JSON bodies returned by the HTTP surface

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;
use crate::models::PatientRecord;
use crate::query::{IssueCount, PaginationMeta, QueryParameters, SortField, SortOrder};
use crate::utils::{log_fetch_failure, log_rejected_query};

/// Message returned for any backend failure; the cause is only logged
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch patients data";

/// Body of `GET /api/patients`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientsResponse {
    pub patients: Vec<PatientRecord>,
    pub pagination: PaginationMeta,
    pub filters: AppliedFilters,
}

/// Echo of the filters a page was produced with, defaults filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    pub search: String,
    pub medical_issue: String,
    pub min_age: u32,
    pub max_age: u32,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl From<&QueryParameters> for AppliedFilters {
    fn from(params: &QueryParameters) -> Self {
        Self {
            search: params.search.clone(),
            medical_issue: params.medical_issue.clone(),
            min_age: params.min_age,
            max_age: params.max_age,
            sort_by: params.sort_by,
            sort_order: params.sort_order,
        }
    }
}

/// Body of `GET /api/patients/medical-issues`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalIssuesResponse {
    pub medical_issues: Vec<IssueCount>,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Records in the current snapshot, if one is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub refresh_policy: String,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by handlers
///
/// Validation failures become a 400 carrying the validation message. Every
/// other failure becomes a 500 with a fixed message.
#[derive(Debug)]
pub struct ApiError(pub DirectoryError);

impl<E> From<E> for ApiError
where
    E: Into<DirectoryError>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0 {
            DirectoryError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            DirectoryError::Validation(e) => {
                log_rejected_query(e);
                e.to_string()
            }
            other => {
                log_fetch_failure(other);
                FETCH_FAILURE_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
