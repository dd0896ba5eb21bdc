//! CLI library components for `obds-to-fhir`.

pub mod config;
pub mod logging;
pub mod pipeline;
