//! `mcpgen sync` command implementation.

use anyhow::{Context, Result};
use mcpgen_codegen::{ArtifactStatus, SyncMode, SyncReport, run_sync};
use mcpgen_core::McpgenConfig;
use std::path::Path;

/// Run a sync for the configuration at `config_path`.
pub fn run(config_path: &Path, check: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let mode = if check { SyncMode::Check } else { SyncMode::Write };

    println!("🔄 Synchronizing artifacts for {}...", config.project);
    let report = sync_with(&config, mode)?;
    print_report(&report);

    if mode == SyncMode::Check && !report.is_up_to_date() {
        anyhow::bail!(
            "{} artifact(s) are out of date. Run `mcpgen sync` to regenerate them.",
            report.stale().count()
        );
    }

    Ok(())
}

/// Run the orchestrator with an already loaded configuration.
pub fn sync_with(config: &McpgenConfig, mode: SyncMode) -> Result<SyncReport> {
    run_sync(config, mode).with_context(|| {
        format!(
            "Sync failed for registry {}",
            config.registry_path().display()
        )
    })
}

fn print_report(report: &SyncReport) {
    println!("   {} model(s) loaded", report.models);
    if !report.warnings.is_empty() {
        println!("\n⚠️  Warnings ({}):", report.warnings.len());
        for finding in &report.warnings {
            println!("  ⚠ {}: {}", finding.location(), finding.message);
        }
        println!();
    }

    for artifact in &report.artifacts {
        let (icon, status) = match artifact.status {
            ArtifactStatus::Written => ("✓", "written"),
            ArtifactStatus::Unchanged => ("=", "unchanged"),
            ArtifactStatus::Stale => ("✗", "stale"),
        };
        println!(
            "  {} {} ({}): {}",
            icon,
            artifact.kind.label(),
            status,
            artifact.path.display()
        );
    }

    println!();
    if report.is_up_to_date() {
        println!("✅ Artifacts are in sync with the registry");
    }
}
