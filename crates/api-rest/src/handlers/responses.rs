use crate::error::ApiError;
use crate::params::patient_id;
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::Json;
use medrec_core::models::DoctorResponse;

#[utoipa::path(
    get,
    path = "/patients/{id}/responses",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Doctor responses, newest first", body = Vec<DoctorResponse>),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorBody)
    )
)]
/// Every doctor response attached to a visit or lab result, newest first
#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<DoctorResponse>>, ApiError> {
    Ok(Json(state.service.doctor_responses(&patient_id(&id)?)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/responses/{response_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("response_id" = String, Path, description = "Doctor response id")
    ),
    responses(
        (status = 200, description = "The doctor response", body = DoctorResponse),
        (status = 404, description = "Unknown patient or response", body = api_shared::ErrorBody)
    )
)]
/// One doctor response by id
#[axum::debug_handler]
pub async fn get_response(
    State(state): State<AppState>,
    Path((id, response_id)): Path<(String, String)>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let patient_id = patient_id(&id)?;
    state
        .service
        .doctor_response(&patient_id, &response_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("doctor response not found: {response_id}")))
}
