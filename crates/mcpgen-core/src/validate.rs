//! Registry validation.
//!
//! Generators trust their input, so every structural problem in the registry
//! has to be caught here, before anything is emitted. Error findings abort a
//! sync run; warnings are reported and the run continues.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use crate::field_type::{FieldType, ScalarKind};
use crate::naming;
use crate::registry::{ModelDefinition, ModelRegistry};

static MODEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("valid model name regex"));

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid field name regex"));

static ENUM_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid enum value regex"));

/// Fields every model is expected to declare.
pub const REQUIRED_FIELDS: [&str; 2] = ["id", "tenantId"];

/// Whether `name` is a PascalCase model name.
pub fn is_valid_model_name(name: &str) -> bool {
    MODEL_NAME.is_match(name)
}

/// Whether `name` is usable as a field identifier in every target language.
pub fn is_valid_field_name(name: &str) -> bool {
    FIELD_NAME.is_match(name)
}

/// Whether `value` can be emitted as an enum member in the schema and the
/// type definitions.
pub fn is_valid_enum_value(value: &str) -> bool {
    ENUM_VALUE.is_match(value)
}

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// Model the finding refers to.
    pub model: String,
    /// Field the finding refers to, if any.
    pub field: Option<String>,
    pub message: String,
}

impl Finding {
    fn error(model: &str, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            model: model.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    fn warning(model: &str, field: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            model: model.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }

    /// `Model` or `Model.field`.
    pub fn location(&self) -> String {
        match &self.field {
            Some(field) => format!("{}.{}", self.model, field),
            None => self.model.clone(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location(), self.message)
    }
}

/// Outcome of validating a registry.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

/// Validate a registry.
pub fn validate_registry(registry: &ModelRegistry) -> ValidationReport {
    let mut report = ValidationReport::default();
    let known: HashSet<&str> = registry.models.iter().map(|m| m.name.as_str()).collect();
    let mut seen_models: HashSet<&str> = HashSet::new();
    // enum type name -> (declaring model, values)
    let mut enums: HashMap<String, (&str, &[String])> = HashMap::new();

    for model in &registry.models {
        if !is_valid_model_name(&model.name) {
            report.findings.push(Finding::error(
                &model.name,
                None,
                "model name must be PascalCase (e.g. Product, OrderItem)",
            ));
        }
        if !seen_models.insert(model.name.as_str()) {
            report
                .findings
                .push(Finding::error(&model.name, None, "duplicate model name"));
        }

        check_required_fields(model, &mut report);

        for (field, ty) in &model.fields {
            if !is_valid_field_name(field) {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    "field name is not a valid identifier",
                ));
            }
            check_field_type(model, field, ty, &known, &mut enums, &mut report);
        }
    }

    report
}

fn check_required_fields(model: &ModelDefinition, report: &mut ValidationReport) {
    for required in REQUIRED_FIELDS {
        match model.field(required) {
            None => report.findings.push(Finding::warning(
                &model.name,
                Some(required),
                "required field is missing",
            )),
            Some(ty) if *ty != FieldType::string() => {
                let message = format!("expected type 'string', found '{}'", ty);
                // `id` is emitted with a uuid default
                let finding = if required == "id" {
                    Finding::error(&model.name, Some(required), message)
                } else {
                    Finding::warning(&model.name, Some(required), message)
                };
                report.findings.push(finding);
            }
            Some(_) => {}
        }
    }
}

fn check_field_type<'a>(
    model: &'a ModelDefinition,
    field: &str,
    ty: &'a FieldType,
    known: &HashSet<&str>,
    enums: &mut HashMap<String, (&'a str, &'a [String])>,
    report: &mut ValidationReport,
) {
    match ty {
        FieldType::Scalar(ScalarKind::Other(raw)) => {
            let message = if raw.is_empty() {
                "empty type expression, emitted as-is".to_string()
            } else {
                format!("unknown type '{}', emitted as-is", raw)
            };
            report
                .findings
                .push(Finding::warning(&model.name, Some(field), message));
        }
        FieldType::Scalar(_) => {}
        FieldType::Enum(values) => {
            if values.is_empty() {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    "enum must declare at least one value",
                ));
                return;
            }
            if values.iter().any(|v| v.trim().is_empty()) {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    "enum contains an empty value",
                ));
            }
            // lowercased literal -> first spelling
            let mut seen: HashMap<String, &str> = HashMap::new();
            for value in values.iter().filter(|v| !v.trim().is_empty()) {
                if !is_valid_enum_value(value) {
                    report.findings.push(Finding::error(
                        &model.name,
                        Some(field),
                        format!("enum value '{}' is not a valid identifier", value),
                    ));
                }
                match seen.get(&value.to_lowercase()) {
                    Some(first) if *first == value.as_str() => {
                        report.findings.push(Finding::error(
                            &model.name,
                            Some(field),
                            format!("enum value '{}' is declared twice", value),
                        ));
                    }
                    Some(first) => {
                        report.findings.push(Finding::error(
                            &model.name,
                            Some(field),
                            format!("enum values '{}' and '{}' differ only in case", first, value),
                        ));
                    }
                    None => {
                        seen.insert(value.to_lowercase(), value.as_str());
                    }
                }
            }

            let enum_name = naming::enum_type_name(field);
            if known.contains(enum_name.as_str()) {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    format!("enum {} has the same name as model {}", enum_name, enum_name),
                ));
            }
            match enums.get(&enum_name) {
                Some((owner, existing)) if *existing != values.as_slice() => {
                    report.findings.push(Finding::error(
                        &model.name,
                        Some(field),
                        format!(
                            "enum {} is already declared by {} with values {}",
                            enum_name,
                            owner,
                            existing.join("|")
                        ),
                    ));
                }
                Some(_) => {}
                None => {
                    enums.insert(enum_name, (model.name.as_str(), values.as_slice()));
                }
            }
        }
        FieldType::Foreign(target) => {
            if target.is_empty() {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    "foreign reference has no target model",
                ));
            } else if !known.contains(target.as_str()) {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    format!("foreign reference to unknown model '{}'", target),
                ));
            }
            if !ty.is_relation(field) {
                report.findings.push(Finding::error(
                    &model.name,
                    Some(field),
                    "foreign key field name must end with 'Id' (e.g. clientId)",
                ));
            }
        }
    }
}
