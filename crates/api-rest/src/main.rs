//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `medrec-run` binary loads `.env` first and then
//! serves the same router.

use api_rest::{router, AppState};
use medrec_core::{
    date_bucket_policy_from_env_value, CoreConfig, FileRecordStore, LabResultsService,
    SystemClock,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the medrec REST API server
///
/// Starts the REST API server on the configured address (default: 0.0.0.0:3000).
///
/// # Environment Variables
/// - `MEDREC_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_DIR`: Root of the per-patient record files (default: "patient_data")
/// - `MEDREC_DATE_BUCKETS`: Date bucket policy, e.g. `7:Last Week,30:Last Month,Older`
/// - `API_KEY`: When set, required in the `x-api-key` header of every patient route
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the patient data directory does not exist,
/// - the date bucket policy is malformed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDREC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting medrec REST API on {}", addr);

    let patient_data_dir = std::env::var("PATIENT_DATA_DIR")
        .unwrap_or_else(|_| medrec_core::constants::DEFAULT_PATIENT_DATA_DIR.into());
    let patient_data_path = Path::new(&patient_data_dir);
    if !patient_data_path.exists() {
        anyhow::bail!(
            "Patient data directory does not exist: {}",
            patient_data_path.display()
        );
    }

    let date_buckets = date_bucket_policy_from_env_value(std::env::var("MEDREC_DATE_BUCKETS").ok())?;
    let cfg = Arc::new(CoreConfig::new(
        patient_data_path.to_path_buf(),
        date_buckets,
    ));

    let api_key = std::env::var("API_KEY").ok().filter(|k| !k.trim().is_empty());
    if api_key.is_none() {
        tracing::warn!("API_KEY is not set; patient routes are unauthenticated");
    }

    let store = Arc::new(FileRecordStore::from_config(&cfg));
    let service = LabResultsService::new(store, cfg, Arc::new(SystemClock));
    let app = router(AppState { service, api_key });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
