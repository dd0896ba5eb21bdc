//! Field-level transforms used while mapping oBDS reports.
//!
//! - **datetime**: repair and parse partial `DD.MM.YYYY` registry dates
//! - **hash**: salted SHA-256 pseudonyms per resource kind
//! - **ids**: nine-digit patient number extraction
//! - **provenance**: `meta.source` strings for mapped resources
//! - **redact**: switch gating raw identifiers in logs

pub mod datetime;
pub mod error;
pub mod hash;
pub mod ids;
pub mod provenance;
pub mod redact;

pub use datetime::{DatePrecision, DayPrecisionDateTime, normalize_adt_date};
pub use error::DateError;
pub use hash::{IdentifierHasher, Pseudonym};
pub use ids::convert_id;
pub use provenance::profile_meta_source;
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
