//! Tests for obds-model types.

use obds_model::{ModelError, ReportBuilder, ReportField, ResourceKind, VersionedReport, reason};

#[test]
fn report_list_serializes() {
    let reports = vec![
        ReportBuilder::new("R-1", 1)
            .patient_id("000111222")
            .tumor_id("1")
            .reason(reason::DIAGNOSIS)
            .sender("SENDER", "SOFTWARE")
            .build(),
        ReportBuilder::new("R-2", 4)
            .export_id(12)
            .patient_id("000111222")
            .tumor_id("1")
            .reason(reason::TREATMENT_END)
            .build(),
    ];
    let json = serde_json::to_string(&reports).expect("serialize reports");
    let round: Vec<VersionedReport> = serde_json::from_str(&json).expect("deserialize reports");
    assert_eq!(round, reports);
    assert_eq!(round[1].export_id, Some(12));
    assert_eq!(round[0].sender_id(), Some("SENDER"));
}

#[test]
fn missing_reason_is_structural_error() {
    let report = ReportBuilder::new("R-9", 1).patient_id("1").tumor_id("1").build();
    match report.report_reason() {
        Err(ModelError::MissingField { field, report_id }) => {
            assert_eq!(field, ReportField::ReportReason);
            assert_eq!(report_id.as_deref(), Some("R-9"));
        }
        other => panic!("expected missing field, got {other:?}"),
    }
}

#[test]
fn resource_kind_serializes_as_type_name() {
    let json = serde_json::to_string(&ResourceKind::MedicationStatement).unwrap();
    assert_eq!(json, "\"MedicationStatement\"");
}
