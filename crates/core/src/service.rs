//! Patient-scoped query and append operations.
//!
//! [`LabResultsService`] binds a [`RecordStore`], the startup [`CoreConfig`] and a [`Clock`].
//! Every query takes one snapshot of the patient's record and runs a pure function from
//! [`crate::labs`] over it; the patient id only selects the snapshot.
//!
//! This module contains **only** data operations. Transport concerns such as HTTP routing or
//! API keys belong in `api-rest` and `api-shared`.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::labs::{self, lookups, responses, trend, visit_summary};
use crate::labs::{TrendAnalysis, VisitSummary};
use crate::models::{
    Category, DoctorResponse, GroupingOptions, LabGroup, PatientRecord, RecordEntry, TestResult,
    Visit, VisitDetail,
};
use crate::repositories::{PatientId, RecordStore};
use crate::{RecordsError, RecordsResult};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct LabResultsService {
    store: Arc<dyn RecordStore>,
    cfg: Arc<CoreConfig>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for LabResultsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabResultsService")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl LabResultsService {
    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// * `store` - Record store holding every patient's results and visits
    /// * `cfg` - Core configuration resolved at startup
    /// * `clock` - Source of "today" for date grouping and follow-up queries
    pub fn new(store: Arc<dyn RecordStore>, cfg: Arc<CoreConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { store, cfg, clock }
    }

    fn snapshot(&self, patient_id: &PatientId) -> RecordsResult<PatientRecord> {
        self.store.snapshot(patient_id)
    }

    // ========================================================================
    // LAB RESULTS
    // ========================================================================

    pub fn lab_results(&self, patient_id: &PatientId) -> RecordsResult<Vec<TestResult>> {
        Ok(self.snapshot(patient_id)?.lab_results)
    }

    /// Grouped, filtered and sorted lab results.
    ///
    /// # Errors
    ///
    /// Only store errors; an empty selection yields an empty list.
    pub fn grouped_lab_results(
        &self,
        patient_id: &PatientId,
        options: &GroupingOptions,
    ) -> RecordsResult<Vec<LabGroup>> {
        let record = self.snapshot(patient_id)?;
        let today = self.clock.today();

        let groups =
            labs::grouped_lab_results(&record.lab_results, options, self.cfg.date_buckets(), today);

        tracing::debug!(
            patient_id = %patient_id,
            group_by = %options.group_by,
            sort_by = %options.sort_by,
            sort_order = %options.sort_order,
            results = record.lab_results.len(),
            groups = groups.len(),
            "grouped lab results"
        );
        Ok(groups)
    }

    pub fn categories(&self, patient_id: &PatientId) -> RecordsResult<Vec<Category>> {
        Ok(lookups::categories(&self.snapshot(patient_id)?.lab_results))
    }

    pub fn subcategories(
        &self,
        patient_id: &PatientId,
        category: Option<Category>,
    ) -> RecordsResult<Vec<String>> {
        Ok(lookups::subcategories(
            &self.snapshot(patient_id)?.lab_results,
            category,
        ))
    }

    pub fn doctors(&self, patient_id: &PatientId) -> RecordsResult<Vec<String>> {
        Ok(lookups::doctors(&self.snapshot(patient_id)?.lab_results))
    }

    pub fn facilities(&self, patient_id: &PatientId) -> RecordsResult<Vec<String>> {
        Ok(lookups::facilities(&self.snapshot(patient_id)?.lab_results))
    }

    /// Results for `test_name` dated strictly before `before`, newest first.
    pub fn previous_results(
        &self,
        patient_id: &PatientId,
        test_name: &str,
        before: NaiveDate,
    ) -> RecordsResult<Vec<TestResult>> {
        Ok(lookups::previous_results(
            &self.snapshot(patient_id)?.lab_results,
            test_name,
            before,
        ))
    }

    pub fn baseline_results(&self, patient_id: &PatientId) -> RecordsResult<Vec<TestResult>> {
        Ok(lookups::baseline_results(
            &self.snapshot(patient_id)?.lab_results,
        ))
    }

    pub fn trend_analysis(
        &self,
        patient_id: &PatientId,
        test_name: &str,
    ) -> RecordsResult<TrendAnalysis> {
        let analysis = trend::analyze_trend(&self.snapshot(patient_id)?.lab_results, test_name);
        tracing::debug!(
            patient_id = %patient_id,
            test_name,
            trend = %analysis.trend,
            history = analysis.previous_results.len() + usize::from(analysis.current_result.is_some()),
            "analyzed trend"
        );
        Ok(analysis)
    }

    // ========================================================================
    // VISITS
    // ========================================================================

    pub fn visits(&self, patient_id: &PatientId) -> RecordsResult<Vec<Visit>> {
        Ok(lookups::visits_newest_first(
            &self.snapshot(patient_id)?.visits,
        ))
    }

    /// The visit and its linked results, or `None` for an unknown visit id.
    pub fn visit(
        &self,
        patient_id: &PatientId,
        visit_id: &str,
    ) -> RecordsResult<Option<VisitDetail>> {
        let record = self.snapshot(patient_id)?;
        Ok(lookups::visit_detail(
            &record.lab_results,
            &record.visits,
            visit_id,
        ))
    }

    pub fn visit_summary(
        &self,
        patient_id: &PatientId,
        visit_id: &str,
    ) -> RecordsResult<VisitSummary> {
        let record = self.snapshot(patient_id)?;
        Ok(visit_summary::summarize_visit(
            &record.lab_results,
            &record.visits,
            visit_id,
        ))
    }

    pub fn visits_by_doctor(
        &self,
        patient_id: &PatientId,
        doctor_id: &str,
    ) -> RecordsResult<Vec<Visit>> {
        Ok(lookups::visits_by_doctor(
            &self.snapshot(patient_id)?.visits,
            doctor_id,
        ))
    }

    pub fn upcoming_follow_ups(&self, patient_id: &PatientId) -> RecordsResult<Vec<Visit>> {
        Ok(lookups::upcoming_follow_ups(
            &self.snapshot(patient_id)?.visits,
            self.clock.today(),
        ))
    }

    // ========================================================================
    // DOCTOR RESPONSES
    // ========================================================================

    pub fn doctor_responses(&self, patient_id: &PatientId) -> RecordsResult<Vec<DoctorResponse>> {
        Ok(responses::collect_responses(&self.snapshot(patient_id)?))
    }

    pub fn doctor_response(
        &self,
        patient_id: &PatientId,
        response_id: &str,
    ) -> RecordsResult<Option<DoctorResponse>> {
        Ok(responses::find_response(
            &self.snapshot(patient_id)?,
            response_id,
        ))
    }

    // ========================================================================
    // RECORD
    // ========================================================================

    pub fn list_patients(&self) -> RecordsResult<Vec<PatientId>> {
        self.store.list_patients()
    }

    /// The full patient record as pretty-printed JSON.
    pub fn export_json(&self, patient_id: &PatientId) -> RecordsResult<String> {
        let record = self.snapshot(patient_id)?;
        serde_json::to_string_pretty(&record).map_err(RecordsError::JsonSerialization)
    }

    /// Appends a test result or visit to the patient's record.
    ///
    /// # Errors
    ///
    /// Returns a validation error from [`crate::validation::validate_append`] or a store error.
    pub fn append(&self, patient_id: &PatientId, entry: RecordEntry) -> RecordsResult<()> {
        let kind = entry.kind();
        let id = entry.id().to_string();
        self.store.append(patient_id, entry)?;
        tracing::info!(patient_id = %patient_id, kind, id = %id, "recorded entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::DateBucketPolicy;
    use crate::models::{GroupBy, ResultStatus, Trend};
    use crate::repositories::InMemoryRecordStore;
    use crate::test_support::{date, lab, response, visit};
    use std::path::PathBuf;

    fn patient() -> PatientId {
        PatientId::new("patient-001").expect("valid patient id")
    }

    fn service_with(store: InMemoryRecordStore, today: &str) -> LabResultsService {
        LabResultsService::new(
            Arc::new(store),
            Arc::new(CoreConfig::new(
                PathBuf::from("unused"),
                DateBucketPolicy::default(),
            )),
            Arc::new(FixedClock(date(today))),
        )
    }

    fn seeded() -> LabResultsService {
        let service = service_with(InMemoryRecordStore::new(), "2025-10-05");
        let id = patient();

        let mut first = lab("lab-1", "Lipid Panel", "2025-03-15", ResultStatus::Abnormal);
        first.is_baseline = true;
        let mut second = lab("lab-2", "Lipid Panel", "2025-09-30", ResultStatus::Normal);
        second.previous_result_id = Some("lab-1".into());
        second.visit_id = Some("visit-1".into());
        second.doctor_response = Some(response("resp-lab", "2025-10-01"));
        let mut v = visit("visit-1", "2025-09-30", "doc-1");
        v.follow_up_required = true;
        v.follow_up_date = Some(date("2025-12-01"));

        for entry in [
            RecordEntry::LabResult(first),
            RecordEntry::LabResult(second),
            RecordEntry::Visit(v),
        ] {
            service.append(&id, entry).expect("seed append");
        }
        service
    }

    #[test]
    fn test_queries_run_against_one_patient_snapshot() {
        let service = seeded();
        let id = patient();

        let groups = service
            .grouped_lab_results(
                &id,
                &GroupingOptions {
                    group_by: GroupBy::Date,
                    ..GroupingOptions::default()
                },
            )
            .expect("grouped");
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Last Week", "Last Year"]);

        let trend = service.trend_analysis(&id, "Lipid Panel").expect("trend");
        assert_eq!(trend.trend, Trend::Improving);

        let summary = service.visit_summary(&id, "visit-1").expect("summary");
        assert_eq!(summary.summary.total_tests, 1);
        assert_eq!(summary.visit_date, Some(date("2025-09-30")));

        let baseline = service.baseline_results(&id).expect("baseline");
        assert_eq!(baseline.len(), 1);

        let follow_ups = service.upcoming_follow_ups(&id).expect("follow ups");
        assert_eq!(follow_ups.len(), 1);

        let responses = service.doctor_responses(&id).expect("responses");
        assert_eq!(responses.len(), 1);
        assert!(service
            .doctor_response(&id, "resp-lab")
            .expect("lookup")
            .is_some());

        let detail = service.visit(&id, "visit-1").expect("visit").expect("known visit");
        assert_eq!(detail.lab_results.len(), 1);
        assert!(service.visit(&id, "visit-9").expect("visit").is_none());
    }

    #[test]
    fn test_follow_ups_depend_on_clock() {
        let store = InMemoryRecordStore::new();
        let mut v = visit("visit-1", "2025-09-30", "doc-1");
        v.follow_up_required = true;
        v.follow_up_date = Some(date("2025-12-01"));
        store
            .append(&patient(), RecordEntry::Visit(v))
            .expect("append");

        let later = service_with(store, "2026-01-01");
        assert!(later
            .upcoming_follow_ups(&patient())
            .expect("follow ups")
            .is_empty());
    }

    #[test]
    fn test_unknown_patient_is_an_error() {
        let service = service_with(InMemoryRecordStore::new(), "2025-10-05");
        let err = service
            .grouped_lab_results(&patient(), &GroupingOptions::default())
            .expect_err("unknown patient");
        assert!(matches!(err, RecordsError::PatientNotFound(_)));
    }

    #[test]
    fn test_export_json_contains_full_record() {
        let service = seeded();
        let json = service.export_json(&patient()).expect("export");
        let parsed: PatientRecord = serde_json::from_str(&json).expect("export parses");
        assert_eq!(parsed.lab_results.len(), 2);
        assert_eq!(parsed.visits.len(), 1);
    }

    #[test]
    fn test_append_rejects_backwards_previous_link() {
        let service = seeded();
        let mut stale = lab("lab-3", "Lipid Panel", "2025-01-01", ResultStatus::Normal);
        stale.previous_result_id = Some("lab-2".into());

        let err = service
            .append(&patient(), RecordEntry::LabResult(stale))
            .expect_err("earlier result cannot follow later one");
        assert!(matches!(err, RecordsError::InvalidPreviousResult { .. }));
    }
}
