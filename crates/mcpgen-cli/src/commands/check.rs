//! `mcpgen check` command implementation.
//!
//! Validates the model registry in two passes:
//! - JSON Schema validation against the embedded registry schema
//! - Semantic validation (naming, enum and foreign key rules)

use anyhow::{Context, Result};
use mcpgen_core::{ModelRegistry, Severity, validate_registry};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry schema, compiled into the binary so checks work anywhere.
const MODEL_REGISTRY_SCHEMA: &str = include_str!("../../../../schemas/ModelRegistry.schema.json");

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Which pass produced the finding.
    pub category: &'static str,
    pub message: String,
    /// `Model.field`, or a JSON pointer for schema findings.
    pub location: Option<String>,
}

impl CheckFinding {
    fn error(category: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
            location: None,
        }
    }

    fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Print human-readable summary.
    pub fn print_summary(&self) {
        let errors: Vec<_> = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        let warnings: Vec<_> = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .collect();

        if !errors.is_empty() {
            println!("\n❌ Errors ({}):", errors.len());
            println!("{}", "─".repeat(60));
            for finding in &errors {
                print_finding(finding);
            }
        }

        if !warnings.is_empty() {
            println!("\n⚠️  Warnings ({}):", warnings.len());
            println!("{}", "─".repeat(60));
            for finding in &warnings {
                print_finding(finding);
            }
        }

        println!();
        println!("{}", "═".repeat(60));
        if errors.is_empty() && warnings.is_empty() {
            println!("✅ All checks passed!");
        } else {
            println!(
                "Summary: {} error(s), {} warning(s)",
                self.error_count(),
                self.warning_count()
            );
            if !errors.is_empty() {
                println!("\n❌ Registry has errors that must be fixed.");
            }
        }
    }
}

fn print_finding(finding: &CheckFinding) {
    let icon = match finding.severity {
        Severity::Error => "✗",
        Severity::Warning => "⚠",
    };
    let location = finding
        .location
        .as_ref()
        .map(|l| format!(" [{}]", l))
        .unwrap_or_default();

    println!(
        "  {} [{}]{}: {}",
        icon, finding.category, location, finding.message
    );
}

/// Run all registry checks without printing.
pub fn run_quiet(registry_path: &Path) -> Result<CheckResults> {
    let content = fs::read_to_string(registry_path)
        .with_context(|| format!("Failed to read model registry {}", registry_path.display()))?;

    let mut results = CheckResults::default();

    let value: JsonValue = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            results
                .findings
                .push(CheckFinding::error("json", format!("Failed to parse JSON: {}", e)));
            return Ok(results);
        }
    };

    results.findings.extend(validate_json_schema(&value)?);

    // Structural problems already reported above make typed parsing pointless.
    let registry: ModelRegistry = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            if !results.has_errors() {
                results.findings.push(CheckFinding::error(
                    "json",
                    format!("Failed to read registry: {}", e),
                ));
            }
            return Ok(results);
        }
    };

    let report = validate_registry(&registry);
    results
        .findings
        .extend(report.findings.into_iter().map(|finding| CheckFinding {
            severity: finding.severity,
            category: "registry",
            location: Some(finding.location()),
            message: finding.message,
        }));

    Ok(results)
}

fn validate_json_schema(instance: &JsonValue) -> Result<Vec<CheckFinding>> {
    let schema: JsonValue = serde_json::from_str(MODEL_REGISTRY_SCHEMA)
        .context("Embedded registry schema is not valid JSON")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile registry schema: {}", e))?;

    let findings = validator
        .iter_errors(instance)
        .map(|error| {
            let path = error.instance_path().to_string();
            let location = if path.is_empty() {
                "(root)".to_string()
            } else {
                path
            };
            CheckFinding::error("json-schema", error.to_string()).with_location(location)
        })
        .collect();

    Ok(findings)
}

/// Run all registry checks and print the results.
pub fn run(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let registry_path: PathBuf = config.registry_path();

    println!("🔍 Checking model registry {}...", registry_path.display());
    println!();
    println!("  📋 Validating JSON schema...");
    println!("  📝 Checking models and fields...");

    let results = run_quiet(&registry_path)?;
    results.print_summary();

    if results.has_errors() {
        anyhow::bail!(
            "Registry check failed with {} error(s)",
            results.error_count()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(registry: &str) -> CheckResults {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp.json");
        fs::write(&path, registry).unwrap();
        run_quiet(&path).unwrap()
    }

    #[test]
    fn test_valid_registry_passes() {
        let results = check(
            r#"{"models":[{"name":"Service","fields":{"id":"string","tenantId":"string","price":"number"}}]}"#,
        );
        assert!(results.findings.is_empty(), "{:?}", results.findings);
    }

    #[test]
    fn test_schema_violation_is_reported_with_location() {
        let results = check(r#"{"models":[{"name":"service","fields":{"id":"string","tenantId":"string"}}]}"#);
        assert!(results.has_errors());
        assert!(
            results
                .findings
                .iter()
                .any(|f| f.category == "json-schema" && f.location.as_deref() == Some("/models/0/name"))
        );
        assert!(
            results
                .findings
                .iter()
                .any(|f| f.category == "registry" && f.location.as_deref() == Some("service"))
        );
    }

    #[test]
    fn test_semantic_findings_are_included() {
        let results = check(
            r#"{"models":[{"name":"Visit","fields":{"id":"string","tenantId":"string","clientId":"foreign:Client"}}]}"#,
        );
        assert_eq!(results.error_count(), 1);
        assert_eq!(results.findings[0].location.as_deref(), Some("Visit.clientId"));
    }

    #[test]
    fn test_missing_required_fields_are_warnings() {
        let results = check(r#"{"models":[{"name":"Tag","fields":{"label":"string"}}]}"#);
        assert!(!results.has_errors());
        assert_eq!(results.warning_count(), 2);
    }

    #[test]
    fn test_malformed_json_is_one_error() {
        let results = check("{ not json");
        assert_eq!(results.error_count(), 1);
        assert_eq!(results.findings[0].category, "json");
    }
}
