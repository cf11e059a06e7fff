use crate::error::ApiError;
use crate::params::patient_id;
use crate::AppState;
use api_shared::{HealthRes, HealthService};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListPatientsRes {
    pub patients: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks; never requires an API key.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Patients with a record", body = ListPatientsRes),
        (status = 500, description = "Internal server error", body = api_shared::ErrorBody)
    )
)]
/// List every patient with a stored record
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<ListPatientsRes>, ApiError> {
    let patients = state
        .service
        .list_patients()?
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    Ok(Json(ListPatientsRes { patients }))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/export",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Full patient record", body = medrec_core::models::PatientRecord),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorBody)
    )
)]
/// Export the full patient record as JSON
#[axum::debug_handler]
pub async fn export_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let json = state.service.export_json(&patient_id(&id)?)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], json))
}
