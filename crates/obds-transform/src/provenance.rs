//! Provenance stamped into `meta.source` of mapped resources.

const APP_NAME: &str = "obds-to-fhir";

/// `"{sender}.{software}:obds-to-fhir:{version}"`, or
/// `"obds-to-fhir:{version}"` unless both sender and software are known.
pub fn profile_meta_source(
    sender_id: Option<&str>,
    software_id: Option<&str>,
    app_version: &str,
) -> String {
    match (sender_id, software_id) {
        (Some(sender), Some(software)) => format!("{sender}.{software}:{APP_NAME}:{app_version}"),
        _ => format!("{APP_NAME}:{app_version}"),
    }
}
