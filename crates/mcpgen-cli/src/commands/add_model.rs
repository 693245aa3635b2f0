//! `mcpgen add-model` command implementation.
//!
//! Prompts for a model name and its fields, appends the model to the
//! registry and optionally runs a sync afterwards. All validation rules come
//! from [`mcpgen_core::editor`]; this module only drives the conversation.

use anyhow::{Context, Result};
use mcpgen_codegen::SyncMode;
use mcpgen_core::editor::{self, EditorError, ModelDraft, TypeChoice};
use mcpgen_core::{McpgenConfig, ModelRegistry};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Line-oriented question/answer channel.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask a question and return the trimmed answer. End of input reads as
    /// an empty answer.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// What happened after the model was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddModelOutcome {
    pub model: String,
    /// `None` when no sync was requested, otherwise whether it succeeded.
    pub synced: Option<bool>,
}

/// Run the interactive editor on stdin/stdout.
pub fn run(config_path: &Path, sync: bool) -> Result<()> {
    let config = super::load_config(config_path)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    let outcome = run_with(&config, sync, &mut prompter)?;
    tracing::debug!(model = %outcome.model, synced = ?outcome.synced, "add-model finished");
    Ok(())
}

/// Run the editor against any input/output pair.
pub fn run_with<R: BufRead, W: Write>(
    config: &McpgenConfig,
    sync: bool,
    prompter: &mut Prompter<R, W>,
) -> Result<AddModelOutcome> {
    let registry_path = config.registry_path();
    let mut registry = ModelRegistry::from_file(&registry_path)
        .with_context(|| format!("Failed to load model registry {}", registry_path.display()))?;

    prompter.say("\n=== ADD A NEW MODEL TO THE REGISTRY ===\n")?;
    let model = edit_model(&mut registry, prompter)?;

    registry
        .save(&registry_path)
        .with_context(|| format!("Failed to save model registry {}", registry_path.display()))?;
    tracing::info!(model = %model, path = %registry_path.display(), "Model added to registry");
    prompter.say(format!("\nModel '{}' added to the registry.", model))?;

    let wants_sync = sync || prompter.ask("Sync artifacts now? (y/n): ")?.eq_ignore_ascii_case("y");
    if !wants_sync {
        return Ok(AddModelOutcome {
            model,
            synced: None,
        });
    }

    prompter.say("\nSynchronizing artifacts...")?;
    let synced = match super::sync::sync_with(config, SyncMode::Write) {
        Ok(report) => {
            prompter.say(format!(
                "Sync complete: {} written, {} unchanged.",
                report.written().count(),
                report.unchanged().count()
            ))?;
            true
        }
        Err(e) => {
            // The model stays saved; the operator can rerun `mcpgen sync`.
            tracing::error!("Sync after add-model failed: {:#}", e);
            prompter.say(format!("Sync failed: {:#}", e))?;
            false
        }
    };

    Ok(AddModelOutcome {
        model,
        synced: Some(synced),
    })
}

/// Collect one model from the operator and append it to `registry`.
fn edit_model<R: BufRead, W: Write>(
    registry: &mut ModelRegistry,
    prompter: &mut Prompter<R, W>,
) -> Result<String> {
    let name = prompter.ask("Model name (PascalCase): ")?;
    let mut draft = ModelDraft::new(&name, registry)?;

    prompter.say("\nAdd the model's fields (id and tenantId are already included).")?;
    prompter.say("Leave the field name blank to finish.\n")?;

    loop {
        let field = prompter.ask("Field name: ")?;
        if field.is_empty() {
            break;
        }
        if let Err(e) = draft.check_field_name(&field) {
            prompter.say(format!("Error: {}", e))?;
            continue;
        }

        prompter.say("Available types:")?;
        for (i, choice) in TypeChoice::ALL.iter().enumerate() {
            prompter.say(format!("{}. {}", i + 1, choice.label()))?;
        }
        let choice = match TypeChoice::parse(&prompter.ask("Field type (1-6): ")?) {
            Ok(choice) => choice,
            Err(e) => {
                prompter.say(format!("Error: {}", e))?;
                continue;
            }
        };

        let ty = match choice.scalar() {
            Some(ty) => Ok(ty),
            None if choice == TypeChoice::Enum => {
                editor::parse_enum_values(&prompter.ask("Enum values (separated by |): ")?)
            }
            None => select_reference(registry, prompter)?,
        };

        match ty.and_then(|ty| {
            let expr = ty.to_string();
            draft.add_field(&field, ty).map(|()| expr)
        }) {
            Ok(expr) => prompter.say(format!("Field '{}' ({}) added.\n", field, expr))?,
            Err(e) => prompter.say(format!("Error: {}", e))?,
        }
    }

    let name = draft.name().to_string();
    draft.commit(registry)?;
    Ok(name)
}

fn select_reference<R: BufRead, W: Write>(
    registry: &ModelRegistry,
    prompter: &mut Prompter<R, W>,
) -> Result<Result<mcpgen_core::FieldType, EditorError>> {
    if registry.models.is_empty() {
        return Ok(Err(EditorError::NoModelsToReference));
    }
    prompter.say("\nAvailable models:")?;
    for (i, name) in registry.model_names().iter().enumerate() {
        prompter.say(format!("{}. {}", i + 1, name))?;
    }
    let answer = prompter.ask("Referenced model (number): ")?;
    Ok(editor::select_foreign_model(&answer, registry))
}
