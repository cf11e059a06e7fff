use crate::error::ApiError;
use crate::params::patient_id;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use medrec_core::models::{RecordEntry, Visit, VisitDetail};
use medrec_core::VisitSummary;

#[utoipa::path(
    get,
    path = "/patients/{id}/visits",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Visits, newest first", body = Vec<Visit>),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorBody)
    )
)]
/// List a patient's visits, newest first
#[axum::debug_handler]
pub async fn list_visits(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Visit>>, ApiError> {
    Ok(Json(state.service.visits(&patient_id(&id)?)?))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/visits",
    params(("id" = String, Path, description = "Patient id")),
    request_body = Visit,
    responses(
        (status = 201, description = "Visit recorded", body = Visit),
        (status = 400, description = "Invalid or conflicting visit", body = api_shared::ErrorBody)
    )
)]
/// Record a new visit
///
/// A missing or blank `id` is replaced with a freshly generated UUID.
#[axum::debug_handler]
pub async fn create_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Visit>, JsonRejection>,
) -> Result<(StatusCode, Json<Visit>), ApiError> {
    let patient_id = patient_id(&id)?;
    let Json(mut visit) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if visit.id.trim().is_empty() {
        visit.id = uuid::Uuid::new_v4().to_string();
    }

    state
        .service
        .append(&patient_id, RecordEntry::Visit(visit.clone()))?;
    Ok((StatusCode::CREATED, Json(visit)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/visits/{visit_id}",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("visit_id" = String, Path, description = "Visit id")
    ),
    responses(
        (status = 200, description = "Visit with its linked lab results", body = VisitDetail),
        (status = 404, description = "Unknown patient or visit", body = api_shared::ErrorBody)
    )
)]
/// A visit joined with the lab results that reference it
#[axum::debug_handler]
pub async fn get_visit(
    State(state): State<AppState>,
    Path((id, visit_id)): Path<(String, String)>,
) -> Result<Json<VisitDetail>, ApiError> {
    let patient_id = patient_id(&id)?;
    state
        .service
        .visit(&patient_id, &visit_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("visit not found: {visit_id}")))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/visits/{visit_id}/summary",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("visit_id" = String, Path, description = "Visit id")
    ),
    responses((status = 200, description = "Status counts and trend tally for the visit", body = VisitSummary))
)]
/// Status counts and trend tally of a visit's lab results
///
/// An unknown visit id yields a zero-valued summary.
#[axum::debug_handler]
pub async fn visit_summary(
    State(state): State<AppState>,
    Path((id, visit_id)): Path<(String, String)>,
) -> Result<Json<VisitSummary>, ApiError> {
    let patient_id = patient_id(&id)?;
    Ok(Json(state.service.visit_summary(&patient_id, &visit_id)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/doctors/{doctor_id}/visits",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("doctor_id" = String, Path, description = "Clinician id")
    ),
    responses((status = 200, description = "The clinician's visits, newest first", body = Vec<Visit>))
)]
/// Visits attended by one clinician, newest first
#[axum::debug_handler]
pub async fn doctor_visits(
    State(state): State<AppState>,
    Path((id, doctor_id)): Path<(String, String)>,
) -> Result<Json<Vec<Visit>>, ApiError> {
    let patient_id = patient_id(&id)?;
    Ok(Json(state.service.visits_by_doctor(&patient_id, &doctor_id)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/follow-ups",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Visits with a future follow-up, soonest first", body = Vec<Visit>))
)]
/// Visits requiring a follow-up after today, soonest first
#[axum::debug_handler]
pub async fn follow_ups(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Visit>>, ApiError> {
    Ok(Json(state.service.upcoming_follow_ups(&patient_id(&id)?)?))
}
