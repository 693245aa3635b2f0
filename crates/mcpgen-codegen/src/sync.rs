//! Sync orchestrator.
//!
//! A run loads and validates the registry, generates all four artifacts in
//! memory, then commits them. Committing stages every changed artifact in a
//! temporary file next to its destination and only renames the staged files
//! into place once all of them were written, so a failure while staging
//! leaves every destination untouched.
//!
//! In check mode nothing is written; the report lists which artifacts are
//! stale instead.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use mcpgen_core::{Finding, McpgenConfig, ModelRegistry, validate_registry};
use tempfile::NamedTempFile;

use crate::descriptor::ProjectDescriptor;
use crate::docs::render_docs;
use crate::error::{SyncError, SyncStage};
use crate::schema::SchemaGenerator;
use crate::types::TypesGenerator;

/// Whether a run writes artifacts or only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Write,
    Check,
}

/// The four generated artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Descriptor,
    Schema,
    Types,
    Docs,
}

impl ArtifactKind {
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Descriptor => "project descriptor",
            ArtifactKind::Schema => "database schema",
            ArtifactKind::Types => "type definitions",
            ArtifactKind::Docs => "documentation",
        }
    }
}

/// A generated artifact held in memory.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    /// Whether the file on disk already holds exactly this content.
    fn is_current(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|existing| existing == self.contents)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    Written,
    Unchanged,
    /// Check mode only: the file is missing or differs.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub models: usize,
    pub warnings: Vec<Finding>,
    pub artifacts: Vec<ArtifactOutcome>,
}

impl SyncReport {
    fn with_status(&self, status: ArtifactStatus) -> impl Iterator<Item = &ArtifactOutcome> {
        self.artifacts.iter().filter(move |a| a.status == status)
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.with_status(ArtifactStatus::Written)
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.with_status(ArtifactStatus::Unchanged)
    }

    pub fn stale(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.with_status(ArtifactStatus::Stale)
    }

    /// True when no artifact is stale.
    pub fn is_up_to_date(&self) -> bool {
        self.stale().next().is_none()
    }
}

/// Drives a sync run against one configuration.
pub struct SyncOrchestrator<'a> {
    config: &'a McpgenConfig,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(config: &'a McpgenConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline.
    pub fn run(&self, mode: SyncMode) -> Result<SyncReport, SyncError> {
        let (registry, warnings) = self.load_registry()?;
        let artifacts = self.generate(&registry)?;

        let outcomes = match mode {
            SyncMode::Write => self.commit(&artifacts)?,
            SyncMode::Check => check(&artifacts),
        };

        tracing::info!(models = registry.models.len(), "Sync complete");
        Ok(SyncReport {
            mode,
            models: registry.models.len(),
            warnings,
            artifacts: outcomes,
        })
    }

    /// Read, parse and validate the registry. Error findings abort the run;
    /// warning findings are logged and returned.
    pub fn load_registry(&self) -> Result<(ModelRegistry, Vec<Finding>), SyncError> {
        let path = self.config.registry_path();
        tracing::info!(stage = %SyncStage::LoadRegistry, path = %path.display(), "Loading model registry");

        let registry = ModelRegistry::from_file(&path)?;
        let report = validate_registry(&registry);
        for finding in report.warnings() {
            tracing::warn!("{}", finding);
        }
        if report.has_errors() {
            for finding in report.errors() {
                tracing::error!("{}", finding);
            }
            return Err(SyncError::Validation {
                errors: report.errors().cloned().collect(),
            });
        }

        let warnings = report.warnings().cloned().collect();
        Ok((registry, warnings))
    }

    /// Generate every artifact in memory.
    pub fn generate(&self, registry: &ModelRegistry) -> Result<Vec<Artifact>, SyncError> {
        let outputs = &self.config.outputs;
        let models = registry.models.as_slice();

        tracing::info!(stage = %SyncStage::EmitSchema, "Generating database schema");
        let schema = SchemaGenerator::new(&self.config.datasource).generate(models);

        tracing::info!(stage = %SyncStage::EmitTypes, "Generating type definitions");
        let types = TypesGenerator::new().generate(models);

        tracing::info!(stage = %SyncStage::BuildDescriptor, "Building project descriptor");
        let descriptor = ProjectDescriptor::build(registry, self.config);
        let descriptor_json = descriptor.to_json().map_err(SyncError::Descriptor)?;

        tracing::info!(stage = %SyncStage::RenderDocs, "Rendering documentation");
        let docs = render_docs(&descriptor);

        Ok(vec![
            Artifact {
                kind: ArtifactKind::Descriptor,
                path: self.config.resolve(&outputs.descriptor),
                contents: descriptor_json,
            },
            Artifact {
                kind: ArtifactKind::Schema,
                path: self.config.resolve(&outputs.schema),
                contents: schema,
            },
            Artifact {
                kind: ArtifactKind::Types,
                path: self.config.resolve(&outputs.types),
                contents: types,
            },
            Artifact {
                kind: ArtifactKind::Docs,
                path: self.config.resolve(&outputs.docs),
                contents: docs,
            },
        ])
    }

    /// Stage every changed artifact, then move all staged files into place.
    pub fn commit(&self, artifacts: &[Artifact]) -> Result<Vec<ArtifactOutcome>, SyncError> {
        tracing::info!(stage = %SyncStage::Commit, "Committing artifacts");

        let mut staged = Vec::new();
        let mut outcomes = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            if artifact.is_current() {
                tracing::debug!(path = %artifact.path.display(), "Artifact unchanged");
                outcomes.push(outcome(artifact, ArtifactStatus::Unchanged));
                continue;
            }
            staged.push((stage(artifact)?, artifact));
            outcomes.push(outcome(artifact, ArtifactStatus::Written));
        }

        for (file, artifact) in staged {
            file.persist(&artifact.path)
                .map_err(|e| SyncError::Persist {
                    path: artifact.path.clone(),
                    source: e.error,
                })?;
            tracing::info!(path = %artifact.path.display(), "Wrote {}", artifact.kind.label());
        }

        Ok(outcomes)
    }
}

fn outcome(artifact: &Artifact, status: ArtifactStatus) -> ArtifactOutcome {
    ArtifactOutcome {
        kind: artifact.kind,
        path: artifact.path.clone(),
        status,
    }
}

/// Write an artifact to a temporary file in its destination directory.
fn stage(artifact: &Artifact) -> Result<NamedTempFile, SyncError> {
    let stage_err = |source| SyncError::Stage {
        path: artifact.path.clone(),
        source,
    };

    let dir = match artifact.path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(stage_err)?;

    let mut file = NamedTempFile::new_in(&dir).map_err(stage_err)?;
    file.write_all(artifact.contents.as_bytes())
        .map_err(stage_err)?;
    file.flush().map_err(stage_err)?;
    Ok(file)
}

fn check(artifacts: &[Artifact]) -> Vec<ArtifactOutcome> {
    artifacts
        .iter()
        .map(|artifact| {
            let status = if artifact.is_current() {
                ArtifactStatus::Unchanged
            } else {
                tracing::info!(path = %artifact.path.display(), "Artifact is stale");
                ArtifactStatus::Stale
            };
            outcome(artifact, status)
        })
        .collect()
}

/// Convenience wrapper around [`SyncOrchestrator::run`].
pub fn run_sync(config: &McpgenConfig, mode: SyncMode) -> Result<SyncReport, SyncError> {
    SyncOrchestrator::new(config).run(mode)
}

/// Destination paths of every artifact for `config`.
pub fn artifact_paths(config: &McpgenConfig) -> Vec<PathBuf> {
    let outputs = &config.outputs;
    [&outputs.descriptor, &outputs.schema, &outputs.types, &outputs.docs]
        .into_iter()
        .map(|p| config.resolve(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"{
  "models": [
    {
      "name": "Service",
      "fields": { "id": "string", "tenantId": "string", "name": "string" }
    }
  ]
}
"#;

    fn setup() -> (tempfile::TempDir, McpgenConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mcp.json"), REGISTRY).unwrap();
        let config = McpgenConfig::default().with_base_dir(dir.path());
        (dir, config)
    }

    #[test]
    fn test_second_run_reports_unchanged() {
        let (_dir, config) = setup();
        let first = run_sync(&config, SyncMode::Write).unwrap();
        assert_eq!(first.written().count(), 4);

        let second = run_sync(&config, SyncMode::Write).unwrap();
        assert_eq!(second.written().count(), 0);
        assert_eq!(second.unchanged().count(), 4);
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let (_dir, config) = setup();
        let report = run_sync(&config, SyncMode::Check).unwrap();
        assert_eq!(report.stale().count(), 4);
        assert!(!report.is_up_to_date());
        for path in artifact_paths(&config) {
            assert!(!path.exists(), "{}", path.display());
        }

        run_sync(&config, SyncMode::Write).unwrap();
        assert!(run_sync(&config, SyncMode::Check).unwrap().is_up_to_date());
    }

    #[test]
    fn test_staging_failure_leaves_destinations_untouched() {
        let (dir, config) = setup();
        let descriptor = config.resolve(&config.outputs.descriptor);
        fs::write(&descriptor, "old").unwrap();
        // A regular file where the schema directory should be makes staging fail.
        fs::write(dir.path().join("backend"), "not a directory").unwrap();

        let err = run_sync(&config, SyncMode::Write).unwrap_err();
        assert!(matches!(err, SyncError::Stage { .. }), "{:?}", err);
        assert_eq!(err.stage(), SyncStage::Commit);
        assert_eq!(fs::read_to_string(&descriptor).unwrap(), "old");
        assert!(!config.resolve(&config.outputs.docs).exists());
    }

    #[test]
    fn test_warnings_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("mcp.json"),
            r#"{"models":[{"name":"Tag","fields":{"label":"string"}}]}"#,
        )
        .unwrap();
        let config = McpgenConfig::default().with_base_dir(dir.path());
        let report = run_sync(&config, SyncMode::Write).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.models, 1);
    }
}
