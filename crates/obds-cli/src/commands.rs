use std::path::Path;

use anyhow::{Context, Result};
use obds_model::MapperSettings;
use tracing::{info, info_span, warn};

use obds_cli::config::read_reports;
use obds_cli::pipeline::{
    bundle_reports, consolidation_rows, override_settings, pseudonymize, render_date, write_bundle,
};

use crate::cli::{BundleArgs, ConsolidateArgs, NormalizeDateArgs, PseudonymizeArgs};
use crate::summary::{print_batch_summary, print_consolidated};

/// Returns whether any record was rejected.
pub fn run_consolidate(args: &ConsolidateArgs, settings: MapperSettings) -> Result<bool> {
    let span = info_span!("consolidate", path = %args.reports.display());
    let _guard = span.enter();
    let reports = read_reports(&args.reports).context("load reports")?;
    let settings = override_settings(settings, &args.priority, &args.filter);
    let (rows, rejected) = consolidation_rows(&reports, &settings);
    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("serialize reports")?;
        println!("{json}");
        for error in &rejected {
            eprintln!("rejected: {error}");
        }
    } else {
        print_consolidated(&rows, &rejected);
    }
    Ok(!rejected.is_empty())
}

pub fn run_pseudonymize(args: &PseudonymizeArgs, settings: &MapperSettings) -> Result<()> {
    let pseudonym = pseudonymize(&args.kind, &args.id, settings)?;
    println!("{pseudonym}");
    Ok(())
}

pub fn run_normalize_date(args: &NormalizeDateArgs) -> Result<()> {
    let rendered = render_date(&args.date).context("normalize date")?;
    println!("{rendered}");
    Ok(())
}

/// Returns whether any report failed.
pub fn run_bundle(args: &BundleArgs, settings: &MapperSettings) -> Result<bool> {
    let span = info_span!("bundle", path = %args.reports.display());
    let _guard = span.enter();
    let reports = read_reports(&args.reports).context("load reports")?;
    let outcome = bundle_reports(&reports, settings, args.fail_fast)?;
    match &outcome.bundle {
        Some(bundle) => write_bundle(bundle, args.output.as_deref())?,
        None => warn!("no resources mapped, nothing written"),
    }
    print_batch_summary(
        outcome.bundle.as_ref(),
        outcome.mapped_reports,
        &outcome.failures,
    );
    info!(failures = outcome.failures.len(), "bundle finished");
    Ok(outcome.has_failures())
}

pub fn load_settings(path: Option<&Path>) -> Result<MapperSettings> {
    obds_cli::config::load_settings(path).context("load settings")
}
