//! Request handlers

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use crate::error::ValidationError;
use crate::query::{RawQueryParams, medical_issue_counts, process};
use crate::server::AppState;
use crate::server::response::{
    ApiError, AppliedFilters, HealthResponse, MedicalIssuesResponse, PatientsResponse,
};

/// `GET /api/patients`
///
/// A query string that does not decode is reported like any other invalid
/// parameter: a 400 with a JSON `error` body.
pub async fn list_patients(
    State(state): State<AppState>,
    query: Result<Query<RawQueryParams>, QueryRejection>,
) -> Result<Json<PatientsResponse>, ApiError> {
    let Query(raw) = query.map_err(|rejection| ValidationError::MalformedQuery {
        reason: rejection.body_text(),
    })?;
    let params = raw.validate(&state.limits)?;
    let snapshot = state.store.current().await?;
    let outcome = process(snapshot.records(), &params);

    Ok(Json(PatientsResponse {
        patients: outcome.to_owned_patients(),
        pagination: outcome.pagination,
        filters: AppliedFilters::from(&params),
    }))
}

/// `GET /api/patients/medical-issues`
pub async fn medical_issues(
    State(state): State<AppState>,
) -> Result<Json<MedicalIssuesResponse>, ApiError> {
    let snapshot = state.store.current().await?;
    Ok(Json(MedicalIssuesResponse {
        medical_issues: medical_issue_counts(snapshot.records()),
    }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.peek().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        records: snapshot.as_ref().map(|s| s.len()),
        loaded_at: snapshot.as_ref().map(|s| s.loaded_at()),
        refresh_policy: state.store.policy().to_string(),
    })
}
