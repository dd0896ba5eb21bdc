//! Patient resources from registry master data.

use obds_model::{ResourceKind, VersionedReport};
use obds_output::OutputResource;
use obds_transform::convert_id;
use serde_json::json;

use crate::error::MappingError;
use crate::mapper::{MappingContext, ReportMapper};

const IDENTIFIER_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";

/// Maps the patient of every report to a pseudonymized `Patient`.
///
/// All reports of one patient address the same resource, so a batch yields
/// one entry per patient.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatientMapper;

impl ReportMapper for PatientMapper {
    fn name(&self) -> &str {
        "patient"
    }

    fn map_report(
        &self,
        report: &VersionedReport,
        context: &MappingContext<'_>,
    ) -> Result<Vec<OutputResource>, MappingError> {
        let patient_id = report.patient_id()?;
        let id = context.pseudonym(ResourceKind::Patient, patient_id)?;

        let mut patient = OutputResource::of_kind(ResourceKind::Patient, id.into_string())
            .with_field(
                "identifier",
                json!([{
                    "type": {
                        "coding": [{ "system": IDENTIFIER_TYPE_SYSTEM, "code": "MR" }]
                    },
                    "system": context.settings.patient_identifier_system,
                    "value": convert_id(patient_id),
                }]),
            )
            .with_meta_source(context.meta_source(report));

        if let Some(birth_date) = context.date("birth_date", report.patient_detail("birth_date"))? {
            patient = patient.with_field("birthDate", json!(birth_date.to_fhir_string()));
        }
        Ok(vec![patient])
    }
}

#[cfg(test)]
mod tests {
    use obds_model::{MapperSettings, ReportBuilder};
    use obds_transform::IdentifierHasher;

    use super::*;

    #[test]
    fn birth_date_with_unknown_day_is_repaired() {
        let settings = MapperSettings::default();
        let hasher = IdentifierHasher::new(settings.salts.clone());
        let context = MappingContext::new(&settings, &hasher);
        let report = ReportBuilder::new("R1", 1)
            .patient_id("000123456789")
            .tumor_id("1")
            .reason("diagnosis")
            .patient_detail("birth_date", "00.03.1960")
            .build();
        let resources = PatientMapper.map_report(&report, &context).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].content["birthDate"], json!("1960-03-15"));
        assert_eq!(
            resources[0].content["identifier"][0]["value"],
            json!("123456789")
        );
    }

    #[test]
    fn bad_birth_date_names_field() {
        let settings = MapperSettings::default();
        let hasher = IdentifierHasher::new(settings.salts.clone());
        let context = MappingContext::new(&settings, &hasher);
        let report = ReportBuilder::new("R1", 1)
            .patient_id("1")
            .reason("diagnosis")
            .patient_detail("birth_date", "1960-03-01")
            .build();
        let err = PatientMapper.map_report(&report, &context).unwrap_err();
        assert!(matches!(err, MappingError::Date { ref field, .. } if field == "birth_date"));
    }
}
