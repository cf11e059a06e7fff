use api_rest::{router, AppState};
use medrec_core::{
    date_bucket_policy_from_env_value, CoreConfig, FileRecordStore, LabResultsService,
    SystemClock,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the medrec application
///
/// Loads `.env`, resolves configuration once and serves the REST API with Swagger UI.
///
/// # Environment Variables
/// - `MEDREC_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PATIENT_DATA_DIR`: Directory for patient data storage (default: "patient_data")
/// - `MEDREC_DATE_BUCKETS`: Date bucket policy for date grouping
/// - `API_KEY`: API key required on patient routes when set
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medrec=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("medrec_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDREC_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let patient_data_dir = std::env::var("PATIENT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(medrec_core::constants::DEFAULT_PATIENT_DATA_DIR));
    let date_buckets = date_bucket_policy_from_env_value(std::env::var("MEDREC_DATE_BUCKETS").ok())?;
    let api_key = std::env::var("API_KEY").ok().filter(|k| !k.trim().is_empty());

    let cfg = Arc::new(CoreConfig::new(patient_data_dir, date_buckets));
    tracing::info!(
        "++ Starting medrec REST on {} (data: {})",
        rest_addr,
        cfg.patient_data_dir().display()
    );
    if api_key.is_none() {
        tracing::warn!("API_KEY is not set; patient routes are unauthenticated");
    }

    let store = Arc::new(FileRecordStore::from_config(&cfg));
    let service = LabResultsService::new(store, cfg, Arc::new(SystemClock));
    let app = router(AppState { service, api_key });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
