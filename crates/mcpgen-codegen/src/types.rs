//! TypeScript type-definition generation.
//!
//! For every model three interfaces are emitted: the entity itself,
//! `Create<Model>Input` (no `id`, `tenantId` and `text` fields optional) and
//! `Update<Model>Input` (`id` required, everything else optional). Enums are
//! emitted once each as string enums.
//!
//! Output is a pure function of the registry: no timestamps, field order is
//! the registry's insertion order.

use mcpgen_core::naming;
use mcpgen_core::{FieldType, ModelDefinition, ScalarKind};

use crate::enums::collect_enums;

const HEADER: &str = "\
// Generated automatically from the model registry.
// DO NOT EDIT THIS FILE DIRECTLY.

export type TenantId = string;

";

/// Generator for the client type-definition file.
#[derive(Debug, Default)]
pub struct TypesGenerator;

impl TypesGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete type-definition file for `models`.
    pub fn generate(&self, models: &[ModelDefinition]) -> String {
        let mut out = String::from(HEADER);

        for decl in collect_enums(models) {
            out.push_str(&format!("export enum {} {{\n", decl.name));
            for value in decl.values {
                out.push_str(&format!("  {} = \"{}\",\n", value.to_uppercase(), value));
            }
            out.push_str("}\n\n");
        }

        for model in models {
            tracing::debug!(model = %model.name, "Generating type definitions");
            out.push_str(&entity_interface(model));
            out.push_str(&create_input_interface(model));
            out.push_str(&update_input_interface(model));
        }

        out
    }
}

/// TypeScript type for a field.
pub fn ts_type(field: &str, ty: &FieldType) -> String {
    match ty {
        FieldType::Scalar(ScalarKind::Number) => "number".to_string(),
        FieldType::Scalar(ScalarKind::DateTime) => "Date".to_string(),
        FieldType::Scalar(ScalarKind::Text) => "string | null".to_string(),
        FieldType::Scalar(_) => "string".to_string(),
        FieldType::Enum(_) => naming::enum_type_name(field),
        // References are carried by id, never embedded.
        FieldType::Foreign(_) => "string".to_string(),
    }
}

fn entity_interface(model: &ModelDefinition) -> String {
    let mut out = format!("export interface {} {{\n", model.name);
    for (field, ty) in &model.fields {
        out.push_str(&format!("  {}: {};\n", field, ts_type(field, ty)));
    }
    out.push_str("  createdAt: Date;\n");
    out.push_str("  updatedAt: Date;\n");
    out.push_str("}\n\n");
    out
}

fn create_input_interface(model: &ModelDefinition) -> String {
    let mut out = format!(
        "export interface {} {{\n",
        naming::create_input_name(&model.name)
    );
    for (field, ty) in model.fields.iter().filter(|(name, _)| *name != "id") {
        let optional = if field == "tenantId" || ty.is_text() { "?" } else { "" };
        out.push_str(&format!("  {}{}: {};\n", field, optional, ts_type(field, ty)));
    }
    out.push_str("}\n\n");
    out
}

fn update_input_interface(model: &ModelDefinition) -> String {
    let mut out = format!(
        "export interface {} {{\n",
        naming::update_input_name(&model.name)
    );
    out.push_str("  id: string;\n");
    for (field, ty) in model.fields.iter().filter(|(name, _)| *name != "id") {
        out.push_str(&format!("  {}?: {};\n", field, ts_type(field, ty)));
    }
    out.push_str("}\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> ModelDefinition {
        ModelDefinition::new("Client")
            .with_field("id", "string")
            .with_field("name", "string")
            .with_field("notes", "text")
            .with_field("tenantId", "string")
    }

    #[test]
    fn test_client_interfaces() {
        let out = TypesGenerator::new().generate(&[client()]);
        let expected = "\
export interface Client {
  id: string;
  name: string;
  notes: string | null;
  tenantId: string;
  createdAt: Date;
  updatedAt: Date;
}

export interface CreateClientInput {
  name: string;
  notes?: string | null;
  tenantId?: string;
}

export interface UpdateClientInput {
  id: string;
  name?: string;
  notes?: string | null;
  tenantId?: string;
}

";
        assert_eq!(out, format!("{}{}", HEADER, expected));
    }

    #[test]
    fn test_enum_members_are_uppercased() {
        let model = ModelDefinition::new("Appointment")
            .with_field("status", "enum:scheduled|completed|canceled");
        let out = TypesGenerator::new().generate(&[model]);
        assert!(out.contains(
            "export enum Status {\n  SCHEDULED = \"scheduled\",\n  COMPLETED = \"completed\",\n  CANCELED = \"canceled\",\n}\n"
        ));
        assert!(out.contains("  status: Status;\n"));
        assert!(out.contains("  status?: Status;\n"));
    }

    #[test]
    fn test_field_type_mapping() {
        assert_eq!(ts_type("price", &FieldType::parse("number")), "number");
        assert_eq!(ts_type("date", &FieldType::parse("datetime")), "Date");
        assert_eq!(ts_type("clientId", &FieldType::parse("foreign:Client")), "string");
        assert_eq!(ts_type("role", &FieldType::parse("enum:a|b")), "Role");
        assert_eq!(ts_type("flag", &FieldType::parse("boolean")), "string");
    }

    #[test]
    fn test_update_input_has_required_id_even_if_undeclared() {
        let model = ModelDefinition::new("Tag").with_field("label", "string");
        let out = TypesGenerator::new().generate(&[model]);
        assert!(out.contains("export interface UpdateTagInput {\n  id: string;\n  label?: string;\n}\n"));
    }
}
