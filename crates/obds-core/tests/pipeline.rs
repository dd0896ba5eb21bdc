//! Integration tests for batch processing.

use obds_core::{
    FailurePolicy, MappingContext, MappingError, PatientMapper, PipelineError, ReportMapper,
    process_batch,
};
use obds_model::{MapperSettings, ReportBuilder, ResourceKind, VersionedReport, reason};
use obds_output::OutputResource;
use obds_transform::IdentifierHasher;
use serde_json::json;

fn report(id: &str, version: u32, patient: &str, reason: &str) -> VersionedReport {
    ReportBuilder::new(id, version)
        .patient_id(patient)
        .tumor_id("1")
        .reason(reason)
        .sender("TEST", "ONKOSTAR")
        .build()
}

/// One condition per report, dated from the tumor diagnosis date.
struct ConditionMapper;

impl ReportMapper for ConditionMapper {
    fn name(&self) -> &str {
        "condition"
    }

    fn map_report(
        &self,
        report: &VersionedReport,
        context: &MappingContext<'_>,
    ) -> Result<Vec<OutputResource>, MappingError> {
        let raw_id = format!("{}{}", report.patient_id()?, report.tumor_id()?);
        let id = context.pseudonym(ResourceKind::Condition, &raw_id)?;
        let mut condition = OutputResource::of_kind(ResourceKind::Condition, id.into_string())
            .with_meta_source(context.meta_source(report));
        let diagnosed = report
            .document
            .patient
            .as_ref()
            .and_then(|p| p.report.as_ref())
            .and_then(|r| r.details.get("diagnosis_date"))
            .and_then(|v| v.as_str());
        if let Some(date) = context.date("diagnosis_date", diagnosed)? {
            condition = condition.with_field("recordedDate", json!(date.to_fhir_string()));
        }
        Ok(vec![condition])
    }
}

fn with_diagnosis_date(mut report: VersionedReport, date: &str) -> VersionedReport {
    if let Some(section) = report.document.patient.as_mut().and_then(|p| p.report.as_mut()) {
        section
            .details
            .insert("diagnosis_date".to_string(), json!(date));
    }
    report
}

#[test]
fn patient_batch_produces_one_entry_per_patient() {
    let settings = MapperSettings::default().with_app_version("1.0.0");
    let reports = vec![
        report("R1", 1, "000123456789", reason::DIAGNOSIS),
        report("R2", 1, "000123456789", reason::TREATMENT_END),
        report("R2", 2, "000123456789", reason::TREATMENT_END),
    ];
    let outcome =
        process_batch(&reports, &PatientMapper, &settings, FailurePolicy::Continue).unwrap();
    assert!(!outcome.has_failures());
    assert_eq!(outcome.mapped_reports, 2);

    let bundle = outcome.bundle.expect("bundle");
    assert_eq!(bundle.len(), 1);
    let hasher = IdentifierHasher::new(settings.salts.clone());
    let expected_id = hasher.hash(ResourceKind::Patient, "000123456789").unwrap();
    let entry = &bundle.entries()[0];
    assert_eq!(entry.full_url, format!("Patient/{expected_id}"));
    assert_eq!(entry.request.url, entry.full_url);
    assert_eq!(
        entry.resource.content["meta"]["source"],
        json!("TEST.ONKOSTAR:obds-to-fhir:1.0.0")
    );
    assert_eq!(
        entry.resource.content["identifier"][0]["value"],
        json!("123456789")
    );
}

#[test]
fn filtered_out_batch_has_no_bundle() {
    let settings = MapperSettings::default().with_report_filter([reason::DEATH]);
    let reports = vec![report("R1", 1, "000123456", reason::DIAGNOSIS)];
    let outcome =
        process_batch(&reports, &PatientMapper, &settings, FailurePolicy::Continue).unwrap();
    assert_eq!(outcome.bundle, None);
    assert_eq!(outcome.mapped_reports, 0);
}

#[test]
fn bad_date_fails_only_its_report() {
    let settings = MapperSettings::default();
    let reports = vec![
        with_diagnosis_date(report("R1", 1, "1", reason::DIAGNOSIS), "31.02.2021"),
        with_diagnosis_date(report("R2", 1, "2", reason::DIAGNOSIS), "00.00.2020"),
    ];
    let outcome =
        process_batch(&reports, &ConditionMapper, &settings, FailurePolicy::Continue).unwrap();

    assert_eq!(outcome.failures.len(), 1);
    let failure = &outcome.failures[0];
    assert_eq!(failure.report_id(), Some("R1"));
    assert!(failure.to_string().contains("diagnosis_date"));

    let bundle = outcome.bundle.expect("bundle");
    assert_eq!(bundle.len(), 1);
    assert_eq!(
        bundle.entries()[0].resource.content["recordedDate"],
        json!("2020-07-01")
    );
}

#[test]
fn fail_fast_stops_on_first_failure() {
    let settings = MapperSettings::default();
    let reports = vec![
        report("R1", 1, "1", reason::DIAGNOSIS),
        ReportBuilder::new("R2", 1).reason(reason::DIAGNOSIS).build(),
    ];
    let err = process_batch(&reports, &ConditionMapper, &settings, FailurePolicy::FailFast)
        .unwrap_err();
    match err {
        PipelineError::Mapping { report_id, source } => {
            assert_eq!(report_id, "R2");
            assert!(matches!(source, MappingError::Model(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn consolidation_rejections_are_reported() {
    let settings = MapperSettings::default();
    let reports = vec![
        ReportBuilder::new("R1", 1).patient_id("1").build(),
        report("R2", 1, "2", reason::DIAGNOSIS),
    ];
    let outcome =
        process_batch(&reports, &PatientMapper, &settings, FailurePolicy::Continue).unwrap();
    assert_eq!(outcome.failures.len(), 1);
    assert!(matches!(
        outcome.failures[0],
        PipelineError::Consolidation(_)
    ));
    assert_eq!(outcome.failures[0].report_id(), Some("R1"));
    assert_eq!(outcome.bundle.map(|b| b.len()), Some(1));
}

#[test]
fn reprocessing_yields_identical_bundle() {
    let settings = MapperSettings::default();
    let reports = vec![
        report("R1", 1, "000111222", reason::DIAGNOSIS),
        report("R2", 3, "000333444", reason::STATUS_CHANGE),
    ];
    let first = process_batch(&reports, &PatientMapper, &settings, FailurePolicy::Continue)
        .unwrap()
        .bundle;
    let second = process_batch(&reports, &PatientMapper, &settings, FailurePolicy::Continue)
        .unwrap()
        .bundle;
    assert_eq!(first, second);
}
