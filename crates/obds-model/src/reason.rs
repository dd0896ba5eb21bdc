//! Report reasons (the event that triggered a submission).
//!
//! Reasons stay plain strings throughout the model; registries extend the
//! list and consolidation ranks unknown reasons last instead of rejecting
//! them.

pub const DIAGNOSIS: &str = "diagnosis";
pub const TREATMENT_START: &str = "treatment-start";
pub const TREATMENT_END: &str = "treatment-end";
pub const STATUS_CHANGE: &str = "status-change";
pub const DEATH: &str = "death";
pub const HISTOLOGY: &str = "histology";

/// Default processing priority, earliest first.
pub const DEFAULT_PRIORITY: [&str; 6] = [
    DIAGNOSIS,
    TREATMENT_START,
    TREATMENT_END,
    STATUS_CHANGE,
    DEATH,
    HISTOLOGY,
];
