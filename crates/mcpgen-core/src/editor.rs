//! Validation contract for adding models to the registry.
//!
//! The interactive prompt lives in the CLI; every rule it enforces is
//! implemented here so it can be exercised without a terminal. A
//! [`ModelDraft`] is only appended to the registry once it is complete, so
//! a rejected step never leaves a partially written model behind.
//!
//! Each accepted field and the final commit are checked with
//! [`validate_registry`] against the registry plus the draft, so the editor
//! cannot save a model that a later sync would refuse.

use crate::field_type::FieldType;
use crate::registry::{ModelDefinition, ModelRegistry};
use crate::validate::{self, Finding, REQUIRED_FIELDS, validate_registry};

/// Errors reported to the operator while building a model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("model name '{0}' must be PascalCase (e.g. Product, OrderItem)")]
    InvalidModelName(String),

    #[error("model '{0}' already exists in the registry")]
    DuplicateModel(String),

    #[error("field '{0}' already exists on this model")]
    DuplicateField(String),

    #[error("field name '{0}' is not a valid identifier")]
    InvalidFieldName(String),

    #[error("enum values are required (separate them with |)")]
    EmptyEnum,

    #[error("enum value list contains an empty value")]
    EmptyEnumValue,

    #[error("invalid type choice '{0}' (expected 1-6)")]
    InvalidTypeChoice(String),

    #[error("invalid model choice '{0}'")]
    InvalidModelChoice(String),

    #[error("the registry has no models to reference")]
    NoModelsToReference,

    #[error("foreign key field '{0}' must end with 'Id' (e.g. clientId)")]
    ForeignFieldName(String),

    /// The registry validator refused the change.
    #[error("{0}")]
    Rejected(String),
}

/// Entries of the field type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeChoice {
    String,
    Number,
    Text,
    DateTime,
    Enum,
    Foreign,
}

impl TypeChoice {
    pub const ALL: [TypeChoice; 6] = [
        TypeChoice::String,
        TypeChoice::Number,
        TypeChoice::Text,
        TypeChoice::DateTime,
        TypeChoice::Enum,
        TypeChoice::Foreign,
    ];

    /// Parse a 1-based menu selection.
    pub fn parse(input: &str) -> Result<Self, EditorError> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| EditorError::InvalidTypeChoice(input.trim().to_string()))
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            TypeChoice::String => "string - short text",
            TypeChoice::Number => "number - numeric value",
            TypeChoice::Text => "text - long text (optional)",
            TypeChoice::DateTime => "datetime - date and time",
            TypeChoice::Enum => "enum:value1|value2|... - enumeration",
            TypeChoice::Foreign => "foreign:Model - foreign key",
        }
    }

    /// Scalar field type for the choice; `None` when the choice needs a
    /// follow-up answer (enum values or a referenced model).
    pub fn scalar(self) -> Option<FieldType> {
        let keyword = match self {
            TypeChoice::String => "string",
            TypeChoice::Number => "number",
            TypeChoice::Text => "text",
            TypeChoice::DateTime => "datetime",
            TypeChoice::Enum | TypeChoice::Foreign => return None,
        };
        Some(FieldType::parse(keyword))
    }
}

/// Check a proposed model name against the registry.
pub fn check_model_name(name: &str, registry: &ModelRegistry) -> Result<(), EditorError> {
    if !validate::is_valid_model_name(name) {
        return Err(EditorError::InvalidModelName(name.to_string()));
    }
    if registry.has_model(name) {
        return Err(EditorError::DuplicateModel(name.to_string()));
    }
    Ok(())
}

/// Build an enum type from the operator's pipe-delimited answer.
pub fn parse_enum_values(input: &str) -> Result<FieldType, EditorError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(EditorError::EmptyEnum);
    }
    let values: Vec<String> = input.split('|').map(|v| v.trim().to_string()).collect();
    if values.iter().any(String::is_empty) {
        return Err(EditorError::EmptyEnumValue);
    }
    Ok(FieldType::Enum(values))
}

/// Build a foreign reference from a 1-based index into the registry's models.
pub fn select_foreign_model(input: &str, registry: &ModelRegistry) -> Result<FieldType, EditorError> {
    if registry.models.is_empty() {
        return Err(EditorError::NoModelsToReference);
    }
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| registry.models.get(i))
        .map(|model| FieldType::Foreign(model.name.clone()))
        .ok_or_else(|| EditorError::InvalidModelChoice(input.trim().to_string()))
}

/// Error findings that appending `model` would add to `registry`.
fn introduced_errors(registry: &ModelRegistry, model: &ModelDefinition) -> Vec<Finding> {
    let before = validate_registry(registry);
    let mut candidate = registry.clone();
    candidate.models.push(model.clone());
    let after = validate_registry(&candidate);
    after
        .errors()
        .filter(|finding| !before.errors().any(|existing| existing == *finding))
        .cloned()
        .collect()
}

/// A model being assembled by the editor.
#[derive(Debug, Clone)]
pub struct ModelDraft {
    model: ModelDefinition,
    /// Registry the draft will be appended to, as it was when the draft started.
    registry: ModelRegistry,
}

impl ModelDraft {
    /// Start a draft. The name is validated against the registry, and the
    /// implicit `id` and `tenantId` fields are added.
    pub fn new(name: &str, registry: &ModelRegistry) -> Result<Self, EditorError> {
        check_model_name(name, registry)?;
        let mut model = ModelDefinition::new(name);
        for field in REQUIRED_FIELDS {
            model.fields.insert(field.to_string(), FieldType::string());
        }
        // e.g. a model named after an enum some other model already declares
        if let Some(finding) = introduced_errors(registry, &model).into_iter().next() {
            return Err(EditorError::Rejected(format!(
                "{}: {}",
                finding.location(),
                finding.message
            )));
        }
        Ok(Self {
            model,
            registry: registry.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }

    /// Check a field name before asking for its type.
    pub fn check_field_name(&self, name: &str) -> Result<(), EditorError> {
        if !validate::is_valid_field_name(name) {
            return Err(EditorError::InvalidFieldName(name.to_string()));
        }
        if self.model.has_field(name) {
            return Err(EditorError::DuplicateField(name.to_string()));
        }
        Ok(())
    }

    /// Add a field. Rejected fields leave the draft unchanged.
    pub fn add_field(&mut self, name: &str, ty: FieldType) -> Result<(), EditorError> {
        self.check_field_name(name)?;
        match &ty {
            FieldType::Enum(values) if values.is_empty() => return Err(EditorError::EmptyEnum),
            FieldType::Foreign(_) if !ty.is_relation(name) => {
                return Err(EditorError::ForeignFieldName(name.to_string()));
            }
            _ => {}
        }

        let mut candidate = self.model.clone();
        candidate.fields.insert(name.to_string(), ty);
        if let Some(finding) = introduced_errors(&self.registry, &candidate).into_iter().next() {
            return Err(EditorError::Rejected(finding.message));
        }
        self.model = candidate;
        Ok(())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.model.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Append the finished model to the registry. The name and the whole
    /// model are checked again in case the registry changed since the draft
    /// was started.
    pub fn commit(self, registry: &mut ModelRegistry) -> Result<(), EditorError> {
        if registry.has_model(&self.model.name) {
            return Err(EditorError::DuplicateModel(self.model.name));
        }
        if let Some(finding) = introduced_errors(registry, &self.model).into_iter().next() {
            return Err(EditorError::Rejected(format!(
                "{}: {}",
                finding.location(),
                finding.message
            )));
        }
        tracing::debug!(model = %self.model.name, fields = self.model.fields.len(), "Appending model to registry");
        registry.models.push(self.model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModelRegistry {
        ModelRegistry {
            models: vec![
                ModelDefinition::new("Client").with_field("id", "string"),
                ModelDefinition::new("Service").with_field("id", "string"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_lowercase_model_name_is_rejected() {
        let err = ModelDraft::new("product", &registry()).unwrap_err();
        assert_eq!(err, EditorError::InvalidModelName("product".to_string()));
    }

    #[test]
    fn test_existing_model_name_is_rejected() {
        let err = ModelDraft::new("Client", &registry()).unwrap_err();
        assert_eq!(err, EditorError::DuplicateModel("Client".to_string()));
    }

    #[test]
    fn test_draft_starts_with_required_fields() {
        let draft = ModelDraft::new("Product", &registry()).unwrap();
        let names: Vec<_> = draft.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "tenantId"]);
    }

    #[test]
    fn test_duplicate_field_is_rejected_without_change() {
        let mut draft = ModelDraft::new("Product", &registry()).unwrap();
        draft.add_field("name", FieldType::string()).unwrap();
        let err = draft
            .add_field("name", FieldType::parse("number"))
            .unwrap_err();
        assert_eq!(err, EditorError::DuplicateField("name".to_string()));
        assert_eq!(draft.fields().count(), 3);
        assert_eq!(
            draft.fields().find(|(n, _)| *n == "name").map(|(_, t)| t.clone()),
            Some(FieldType::string())
        );

        let err = draft.add_field("tenantId", FieldType::string()).unwrap_err();
        assert_eq!(err, EditorError::DuplicateField("tenantId".to_string()));
    }

    #[test]
    fn test_type_menu() {
        assert_eq!(TypeChoice::parse("1"), Ok(TypeChoice::String));
        assert_eq!(TypeChoice::parse(" 6 "), Ok(TypeChoice::Foreign));
        assert!(TypeChoice::parse("0").is_err());
        assert!(TypeChoice::parse("7").is_err());
        assert!(TypeChoice::parse("text").is_err());
        assert_eq!(TypeChoice::Enum.scalar(), None);
        assert_eq!(TypeChoice::Number.scalar(), Some(FieldType::parse("number")));
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(parse_enum_values(""), Err(EditorError::EmptyEnum));
        assert_eq!(parse_enum_values("a||b"), Err(EditorError::EmptyEnumValue));
        assert_eq!(
            parse_enum_values("active | inactive").unwrap().to_string(),
            "enum:active|inactive"
        );
    }

    #[test]
    fn test_foreign_model_selection() {
        let registry = registry();
        assert_eq!(
            select_foreign_model("2", &registry),
            Ok(FieldType::Foreign("Service".to_string()))
        );
        assert!(select_foreign_model("0", &registry).is_err());
        assert!(select_foreign_model("3", &registry).is_err());
        assert!(select_foreign_model("x", &registry).is_err());
        assert_eq!(
            select_foreign_model("1", &ModelRegistry::default()),
            Err(EditorError::NoModelsToReference)
        );
    }

    #[test]
    fn test_foreign_field_requires_id_suffix() {
        let mut draft = ModelDraft::new("Invoice", &registry()).unwrap();
        let ty = FieldType::Foreign("Client".to_string());
        assert_eq!(
            draft.add_field("client", ty.clone()),
            Err(EditorError::ForeignFieldName("client".to_string()))
        );
        assert!(draft.add_field("clientId", ty).is_ok());
    }

    fn registry_with_status() -> ModelRegistry {
        let mut registry = registry();
        registry.models.push(
            ModelDefinition::new("Appointment")
                .with_field("id", "string")
                .with_field("tenantId", "string")
                .with_field("status", "enum:scheduled|done"),
        );
        registry
    }

    #[test]
    fn test_conflicting_enum_is_rejected() {
        let mut draft = ModelDraft::new("Invoice", &registry_with_status()).unwrap();
        let err = draft
            .add_field("status", parse_enum_values("paid|unpaid").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::Rejected(
                "enum Status is already declared by Appointment with values scheduled|done"
                    .to_string()
            )
        );
        assert!(draft.fields().all(|(name, _)| name != "status"));

        // the same values reuse the existing declaration
        draft
            .add_field("status", parse_enum_values("scheduled|done").unwrap())
            .unwrap();
    }

    #[test]
    fn test_bad_enum_literals_are_rejected() {
        let mut draft = ModelDraft::new("Invoice", &registry()).unwrap();
        for answer in ["a|a", "Open|open", "no-show|done"] {
            let err = draft
                .add_field("kind", parse_enum_values(answer).unwrap())
                .unwrap_err();
            assert!(matches!(err, EditorError::Rejected(_)), "{}: {:?}", answer, err);
        }
        assert_eq!(draft.fields().count(), 2);
    }

    #[test]
    fn test_enum_named_after_model_is_rejected() {
        let mut draft = ModelDraft::new("User", &registry()).unwrap();
        let err = draft
            .add_field("client", parse_enum_values("new|regular").unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::Rejected("enum Client has the same name as model Client".to_string())
        );
    }

    #[test]
    fn test_model_named_after_existing_enum_is_rejected() {
        let err = ModelDraft::new("Status", &registry_with_status()).unwrap_err();
        assert!(matches!(err, EditorError::Rejected(message) if message.starts_with("Appointment.status:")));
    }

    #[test]
    fn test_bare_id_foreign_field_is_rejected() {
        let mut draft = ModelDraft::new("Invoice", &registry()).unwrap();
        assert_eq!(
            draft.add_field("Id", FieldType::Foreign("Client".to_string())),
            Err(EditorError::ForeignFieldName("Id".to_string()))
        );
    }

    #[test]
    fn test_commit_rechecks_against_current_registry() {
        let mut draft = ModelDraft::new("Invoice", &registry()).unwrap();
        draft
            .add_field("status", parse_enum_values("paid|unpaid").unwrap())
            .unwrap();

        // another model claimed the enum name after the draft started
        let mut registry = registry_with_status();
        let err = draft.commit(&mut registry).unwrap_err();
        assert!(matches!(err, EditorError::Rejected(message) if message.starts_with("Invoice.status:")));
        assert!(!registry.has_model("Invoice"));
    }

    #[test]
    fn test_commit_appends_model() {
        let mut registry = registry();
        let mut draft = ModelDraft::new("Product", &registry).unwrap();
        draft.add_field("price", FieldType::parse("number")).unwrap();
        draft.commit(&mut registry).unwrap();

        let product = registry.get_model("Product").unwrap();
        assert_eq!(product.fields.len(), 3);
        assert_eq!(registry.models.len(), 3);
    }
}
