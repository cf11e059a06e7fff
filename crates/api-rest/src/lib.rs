//! # API REST
//!
//! REST API implementation for medrec.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, API key checks)
//!
//! Uses `api-shared` for the health service, key validation and the error envelope. All lab
//! result semantics live in `medrec-core`.

#![warn(rust_2018_idioms)]

pub mod auth;
pub mod error;
pub mod handlers;
pub mod params;


use axum::routing::get;
use axum::Router;
use handlers::{labs, patients, responses, visits};
use medrec_core::LabResultsService;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state for the REST API server
///
/// Shared by every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: LabResultsService,
    /// Expected `x-api-key` value; `None` disables the check.
    pub api_key: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        patients::health,
        patients::list_patients,
        patients::export_record,
        labs::list_lab_results,
        labs::create_lab_result,
        labs::grouped_lab_results,
        labs::lab_categories,
        labs::lab_subcategories,
        labs::lab_doctors,
        labs::lab_facilities,
        labs::baseline_results,
        labs::previous_results,
        labs::trend_analysis,
        visits::list_visits,
        visits::create_visit,
        visits::get_visit,
        visits::visit_summary,
        visits::doctor_visits,
        visits::follow_ups,
        responses::list_responses,
        responses::get_response,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorBody,
        api_shared::ErrorDetail,
        patients::ListPatientsRes,
        medrec_core::models::PatientRecord,
        medrec_core::models::TestResult,
        medrec_core::models::LabValue,
        medrec_core::models::Visit,
        medrec_core::models::VisitDetail,
        medrec_core::models::DoctorResponse,
        medrec_core::models::LabGroup,
        medrec_core::models::DateRange,
        medrec_core::models::Category,
        medrec_core::models::ResultStatus,
        medrec_core::models::LabValueStatus,
        medrec_core::models::Priority,
        medrec_core::models::TrendDirection,
        medrec_core::models::Trend,
        medrec_core::models::Significance,
        medrec_core::models::ResponseType,
        medrec_core::models::ResponsePriority,
        medrec_core::models::ResponseStatus,
        medrec_core::models::VisitType,
        medrec_core::models::VisitStatus,
        medrec_core::TrendAnalysis,
        medrec_core::TrendDetails,
        medrec_core::VisitSummary,
        medrec_core::StatusCounts,
        medrec_core::TrendTally,
    ))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// `/health` and the Swagger UI are always open; every patient route sits behind
/// [`auth::require_api_key`].
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/patients", get(patients::list_patients))
        .route("/patients/:id/export", get(patients::export_record))
        .route(
            "/patients/:id/lab-results",
            get(labs::list_lab_results).post(labs::create_lab_result),
        )
        .route(
            "/patients/:id/lab-results/grouped",
            get(labs::grouped_lab_results),
        )
        .route(
            "/patients/:id/lab-results/categories",
            get(labs::lab_categories),
        )
        .route(
            "/patients/:id/lab-results/subcategories",
            get(labs::lab_subcategories),
        )
        .route("/patients/:id/lab-results/doctors", get(labs::lab_doctors))
        .route(
            "/patients/:id/lab-results/facilities",
            get(labs::lab_facilities),
        )
        .route(
            "/patients/:id/lab-results/baseline",
            get(labs::baseline_results),
        )
        .route(
            "/patients/:id/tests/:test_name/previous",
            get(labs::previous_results),
        )
        .route(
            "/patients/:id/tests/:test_name/trend",
            get(labs::trend_analysis),
        )
        .route(
            "/patients/:id/visits",
            get(visits::list_visits).post(visits::create_visit),
        )
        .route("/patients/:id/visits/:visit_id", get(visits::get_visit))
        .route(
            "/patients/:id/visits/:visit_id/summary",
            get(visits::visit_summary),
        )
        .route(
            "/patients/:id/doctors/:doctor_id/visits",
            get(visits::doctor_visits),
        )
        .route("/patients/:id/follow-ups", get(visits::follow_ups))
        .route("/patients/:id/responses", get(responses::list_responses))
        .route(
            "/patients/:id/responses/:response_id",
            get(responses::get_response),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(patients::health))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
