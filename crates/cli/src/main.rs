use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use medrec_core::models::{
    Category, DateRange, GroupBy, GroupingOptions, LabFilters, Priority, RecordEntry,
    ResultStatus, SortBy, SortOrder,
};
use medrec_core::{
    date_bucket_policy_from_env_value, Clock, CoreConfig, FileRecordStore, FixedClock,
    LabResultsService, PatientId, SystemClock,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medrec")]
#[command(about = "medrec lab results CLI")]
struct Cli {
    /// Patient data directory (defaults to PATIENT_DATA_DIR, then "patient_data")
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Pin "today" for date grouping and follow-ups (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients with a record
    List,
    /// Group a patient's lab results
    Grouped {
        patient: String,
        #[command(flatten)]
        options: GroupedArgs,
    },
    /// Distinct result categories
    Categories { patient: String },
    /// Distinct subcategories, optionally within one category
    Subcategories {
        patient: String,
        #[arg(long)]
        category: Option<Category>,
    },
    /// Distinct ordering clinicians
    Doctors { patient: String },
    /// Distinct testing facilities
    Facilities { patient: String },
    /// Results of a test dated strictly before a reference date
    Previous {
        patient: String,
        test_name: String,
        #[arg(long, value_parser = parse_date)]
        before: NaiveDate,
    },
    /// Baseline results, oldest first
    Baseline { patient: String },
    /// Trend of a test's latest reading
    Trend { patient: String, test_name: String },
    /// Status counts and trend tally for one visit
    VisitSummary { patient: String, visit_id: String },
    /// Visits, newest first
    Visits { patient: String },
    /// One visit with its linked lab results
    Visit { patient: String, visit_id: String },
    /// All doctor responses, newest first
    Responses { patient: String },
    /// One doctor response by id
    Response { patient: String, response_id: String },
    /// Visits attended by one clinician
    DoctorVisits { patient: String, doctor_id: String },
    /// Visits with a follow-up due after today
    FollowUps { patient: String },
    /// Export the full record as JSON
    Export { patient: String },
    /// Append every entry of a YAML file to a patient's record
    Import { patient: String, file: PathBuf },
}

#[derive(Args)]
struct GroupedArgs {
    /// category, subcategory, date, doctor, facility, status, priority or visit
    #[arg(long, default_value = "category")]
    group_by: String,
    #[arg(long, default_value = "date")]
    sort_by: SortBy,
    #[arg(long, default_value = "desc")]
    sort_order: SortOrder,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,
    #[arg(long, value_delimiter = ',')]
    category: Vec<Category>,
    #[arg(long, value_delimiter = ',')]
    status: Vec<ResultStatus>,
    #[arg(long, value_delimiter = ',')]
    priority: Vec<Priority>,
    #[arg(long, value_delimiter = ',')]
    doctor: Vec<String>,
}

impl GroupedArgs {
    fn into_options(self) -> GroupingOptions {
        let date_range = match (self.start, self.end) {
            (None, None) => None,
            (start, end) => Some(DateRange::new(
                start.unwrap_or(NaiveDate::MIN),
                end.unwrap_or(NaiveDate::MAX),
            )),
        };

        GroupingOptions {
            group_by: GroupBy::from_param(&self.group_by),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            date_range,
            filters: LabFilters {
                category: non_empty(self.category),
                status: non_empty(self.status),
                priority: non_empty(self.priority),
                doctor: non_empty(self.doctor),
            },
        }
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    (!values.is_empty()).then_some(values)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{value}' is not a YYYY-MM-DD date"))
}

fn patient_id(raw: &str) -> anyhow::Result<PatientId> {
    PatientId::new(raw).with_context(|| format!("invalid patient id '{raw}'"))
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn build_service(data_dir: Option<PathBuf>, today: Option<NaiveDate>) -> anyhow::Result<LabResultsService> {
    let data_dir = data_dir
        .or_else(|| std::env::var("PATIENT_DATA_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(medrec_core::constants::DEFAULT_PATIENT_DATA_DIR));
    let date_buckets = date_bucket_policy_from_env_value(std::env::var("MEDREC_DATE_BUCKETS").ok())?;
    let cfg = Arc::new(CoreConfig::new(data_dir, date_buckets));

    let clock: Arc<dyn Clock> = match today {
        Some(today) => Arc::new(FixedClock(today)),
        None => Arc::new(SystemClock),
    };
    let store = Arc::new(FileRecordStore::from_config(&cfg));
    Ok(LabResultsService::new(store, cfg, clock))
}

fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let service = build_service(cli.data_dir, cli.today)?;

    match cli.command {
        Commands::List => {
            let patients: Vec<String> = service
                .list_patients()?
                .into_iter()
                .map(|id| id.to_string())
                .collect();
            write_json(out, &patients)
        }
        Commands::Grouped { patient, options } => write_json(
            out,
            &service.grouped_lab_results(&patient_id(&patient)?, &options.into_options())?,
        ),
        Commands::Categories { patient } => {
            write_json(out, &service.categories(&patient_id(&patient)?)?)
        }
        Commands::Subcategories { patient, category } => write_json(
            out,
            &service.subcategories(&patient_id(&patient)?, category)?,
        ),
        Commands::Doctors { patient } => write_json(out, &service.doctors(&patient_id(&patient)?)?),
        Commands::Facilities { patient } => {
            write_json(out, &service.facilities(&patient_id(&patient)?)?)
        }
        Commands::Previous {
            patient,
            test_name,
            before,
        } => write_json(
            out,
            &service.previous_results(&patient_id(&patient)?, &test_name, before)?,
        ),
        Commands::Baseline { patient } => {
            write_json(out, &service.baseline_results(&patient_id(&patient)?)?)
        }
        Commands::Trend { patient, test_name } => write_json(
            out,
            &service.trend_analysis(&patient_id(&patient)?, &test_name)?,
        ),
        Commands::VisitSummary { patient, visit_id } => write_json(
            out,
            &service.visit_summary(&patient_id(&patient)?, &visit_id)?,
        ),
        Commands::Visits { patient } => write_json(out, &service.visits(&patient_id(&patient)?)?),
        Commands::Visit { patient, visit_id } => {
            let detail = service
                .visit(&patient_id(&patient)?, &visit_id)?
                .with_context(|| format!("visit not found: {visit_id}"))?;
            write_json(out, &detail)
        }
        Commands::Responses { patient } => {
            write_json(out, &service.doctor_responses(&patient_id(&patient)?)?)
        }
        Commands::Response {
            patient,
            response_id,
        } => {
            let response = service
                .doctor_response(&patient_id(&patient)?, &response_id)?
                .with_context(|| format!("doctor response not found: {response_id}"))?;
            write_json(out, &response)
        }
        Commands::DoctorVisits { patient, doctor_id } => write_json(
            out,
            &service.visits_by_doctor(&patient_id(&patient)?, &doctor_id)?,
        ),
        Commands::FollowUps { patient } => {
            write_json(out, &service.upcoming_follow_ups(&patient_id(&patient)?)?)
        }
        Commands::Export { patient } => {
            writeln!(out, "{}", service.export_json(&patient_id(&patient)?)?)?;
            Ok(())
        }
        Commands::Import { patient, file } => {
            let patient = patient_id(&patient)?;
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let entries: Vec<RecordEntry> = serde_yaml::from_str(&contents)
                .with_context(|| format!("failed to parse {}", file.display()))?;

            let total = entries.len();
            for (index, entry) in entries.into_iter().enumerate() {
                let id = entry.id().to_string();
                service
                    .append(&patient, entry)
                    .with_context(|| format!("entry {} (id '{id}') was rejected", index + 1))?;
            }
            writeln!(out, "Imported {total} entries into {patient}")?;
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medrec_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}
