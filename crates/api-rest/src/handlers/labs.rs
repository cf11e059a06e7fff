use crate::error::ApiError;
use crate::params::{patient_id, GroupedQuery, PreviousQuery, SubcategoryQuery};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use medrec_core::models::{Category, LabGroup, RecordEntry, TestResult};
use medrec_core::TrendAnalysis;

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "All lab results in record order", body = Vec<TestResult>),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorBody)
    )
)]
/// List every lab result for a patient
#[axum::debug_handler]
pub async fn list_lab_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TestResult>>, ApiError> {
    Ok(Json(state.service.lab_results(&patient_id(&id)?)?))
}

#[utoipa::path(
    post,
    path = "/patients/{id}/lab-results",
    params(("id" = String, Path, description = "Patient id")),
    request_body = TestResult,
    responses(
        (status = 201, description = "Lab result recorded", body = TestResult),
        (status = 400, description = "Invalid or conflicting result", body = api_shared::ErrorBody)
    )
)]
/// Record a new lab result
///
/// A missing or blank `id` is replaced with a freshly generated UUID.
#[axum::debug_handler]
pub async fn create_lab_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TestResult>, JsonRejection>,
) -> Result<(StatusCode, Json<TestResult>), ApiError> {
    let patient_id = patient_id(&id)?;
    let Json(mut result) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if result.id.trim().is_empty() {
        result.id = uuid::Uuid::new_v4().to_string();
    }

    state
        .service
        .append(&patient_id, RecordEntry::LabResult(result.clone()))?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/grouped",
    params(("id" = String, Path, description = "Patient id"), GroupedQuery),
    responses(
        (status = 200, description = "Grouped lab results", body = Vec<LabGroup>),
        (status = 400, description = "Invalid sort key, sort order, date or filter value", body = api_shared::ErrorBody),
        (status = 404, description = "Unknown patient", body = api_shared::ErrorBody)
    )
)]
/// Filter, group, sort and roll up a patient's lab results
#[axum::debug_handler]
pub async fn grouped_lab_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GroupedQuery>,
) -> Result<Json<Vec<LabGroup>>, ApiError> {
    let patient_id = patient_id(&id)?;
    let options = query.into_options()?;
    Ok(Json(state.service.grouped_lab_results(&patient_id, &options)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/categories",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Distinct categories", body = Vec<Category>))
)]
/// Distinct lab result categories, in first-seen order
#[axum::debug_handler]
pub async fn lab_categories(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.service.categories(&patient_id(&id)?)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/subcategories",
    params(("id" = String, Path, description = "Patient id"), SubcategoryQuery),
    responses((status = 200, description = "Distinct subcategories", body = Vec<String>))
)]
/// Distinct subcategories, optionally within one category
#[axum::debug_handler]
pub async fn lab_subcategories(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SubcategoryQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let patient_id = patient_id(&id)?;
    Ok(Json(
        state.service.subcategories(&patient_id, query.category()?)?,
    ))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/doctors",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Distinct ordering clinicians", body = Vec<String>))
)]
/// Distinct ordering clinicians
#[axum::debug_handler]
pub async fn lab_doctors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.service.doctors(&patient_id(&id)?)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/facilities",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Distinct facilities", body = Vec<String>))
)]
/// Distinct testing facilities
#[axum::debug_handler]
pub async fn lab_facilities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.service.facilities(&patient_id(&id)?)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/lab-results/baseline",
    params(("id" = String, Path, description = "Patient id")),
    responses((status = 200, description = "Baseline results, oldest first", body = Vec<TestResult>))
)]
/// Baseline-flagged results, oldest first
#[axum::debug_handler]
pub async fn baseline_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<TestResult>>, ApiError> {
    Ok(Json(state.service.baseline_results(&patient_id(&id)?)?))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/tests/{test_name}/previous",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("test_name" = String, Path, description = "Exact test name"),
        PreviousQuery
    ),
    responses(
        (status = 200, description = "Earlier results, newest first", body = Vec<TestResult>),
        (status = 400, description = "Missing or malformed reference date", body = api_shared::ErrorBody)
    )
)]
/// Results of one test dated strictly before a reference date
#[axum::debug_handler]
pub async fn previous_results(
    State(state): State<AppState>,
    Path((id, test_name)): Path<(String, String)>,
    Query(query): Query<PreviousQuery>,
) -> Result<Json<Vec<TestResult>>, ApiError> {
    let patient_id = patient_id(&id)?;
    let before = query.before()?;
    Ok(Json(
        state
            .service
            .previous_results(&patient_id, &test_name, before)?,
    ))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/tests/{test_name}/trend",
    params(
        ("id" = String, Path, description = "Patient id"),
        ("test_name" = String, Path, description = "Exact test name")
    ),
    responses((status = 200, description = "Trend of the latest reading", body = TrendAnalysis))
)]
/// Trend of one test's latest reading against the one before it
#[axum::debug_handler]
pub async fn trend_analysis(
    State(state): State<AppState>,
    Path((id, test_name)): Path<(String, String)>,
) -> Result<Json<TrendAnalysis>, ApiError> {
    let patient_id = patient_id(&id)?;
    Ok(Json(state.service.trend_analysis(&patient_id, &test_name)?))
}
