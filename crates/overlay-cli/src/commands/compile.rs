//! Compile command

use colored::Colorize;
use std::path::{Path, PathBuf};

use overlay_core::{
    CompileReport, OverlayConfig, Reconciler, Reconciliation, SchemaTree, load_baseline,
};
use overlay_document::{OverlaySet, YamlParser};

use crate::error::Result;

/// Run the compile command
pub fn run_compile(
    schema: &Path,
    baseline: Option<&Path>,
    config: Option<&Path>,
    overlays: &[PathBuf],
    json: bool,
) -> Result<()> {
    let result = compile(schema, baseline, config, overlays)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.script)?);
    } else {
        print!("{}", result.script);
    }
    print_report(&result.report);
    Ok(())
}

/// Load every input and reconcile.
pub fn compile(
    schema: &Path,
    baseline: Option<&Path>,
    config: Option<&Path>,
    overlays: &[PathBuf],
) -> Result<Reconciliation> {
    let schema = SchemaTree::load(schema)?;
    let config = match config {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };
    let baseline = match baseline {
        Some(path) => load_baseline(path)?,
        None => Vec::new(),
    };
    let overlays = OverlaySet::load_all(overlays, &config.root_key, &YamlParser::new())?;
    tracing::debug!(documents = overlays.len(), baseline = baseline.len(), "Inputs loaded");

    Ok(Reconciler::new(&schema, config).reconcile(&overlays, baseline)?)
}

fn print_report(report: &CompileReport) {
    for advisory in &report.advisories {
        eprintln!("{} {}", "skipped:".yellow().bold(), advisory);
    }
    for failure in &report.failures {
        eprintln!(
            "{} overlay document {}: {}",
            "failed:".red().bold(),
            failure.index,
            failure.error
        );
    }
}
