//! Relational schema generation (Prisma dialect).
//!
//! ## Field Mapping
//!
//! | Registry type | Column |
//! |---------------|--------|
//! | `string` | `String` (a string `id` gets `@id @default(uuid())`) |
//! | `number` | `Float` |
//! | `text` | `String?` |
//! | `datetime` | `DateTime` |
//! | `enum:a\|b` | `<Field>` enum with `@default(a)` |
//! | `foreign:M` on `xId` | relation accessor `x M @relation(...)` plus key column `xId String` |
//!
//! Every model also gets `createdAt`/`updatedAt` audit columns, an index on
//! `tenantId` and one index per foreign key column.

use mcpgen_core::config::DatasourceConfig;
use mcpgen_core::naming;
use mcpgen_core::{FieldType, ModelDefinition, ScalarKind};

use crate::enums::collect_enums;

/// Reverse one-to-many accessors added to fixed models: (model, accessor, target).
///
/// This is a fixed domain rule. Adding another model that references
/// `Client` or `Service` does not create accessors anywhere else.
const REVERSE_RELATIONS: &[(&str, &str, &str)] = &[
    ("Client", "appointments", "Appointment"),
    ("Service", "appointments", "Appointment"),
];

/// A single line inside a model block.
struct Column {
    name: String,
    ty: String,
    attrs: String,
}

impl Column {
    fn new(name: impl Into<String>, ty: impl Into<String>, attrs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            attrs: attrs.into(),
        }
    }
}

/// Generator for the schema file.
pub struct SchemaGenerator<'a> {
    datasource: &'a DatasourceConfig,
}

impl<'a> SchemaGenerator<'a> {
    pub fn new(datasource: &'a DatasourceConfig) -> Self {
        Self { datasource }
    }

    /// Render the complete schema for `models`.
    pub fn generate(&self, models: &[ModelDefinition]) -> String {
        let mut out = self.header();

        for decl in collect_enums(models) {
            out.push_str(&format!("enum {} {{\n", decl.name));
            for value in decl.values {
                out.push_str(&format!("  {}\n", value));
            }
            out.push_str("}\n\n");
        }

        for model in models {
            tracing::debug!(model = %model.name, fields = model.fields.len(), "Generating schema model");
            out.push_str(&self.generate_model(model));
            out.push('\n');
        }

        out
    }

    fn header(&self) -> String {
        format!(
            "generator client {{\n  provider = \"prisma-client-js\"\n}}\n\n\
             datasource db {{\n  provider = \"{}\"\n  url      = env(\"{}\")\n}}\n\n",
            self.datasource.provider, self.datasource.url_env
        )
    }

    fn generate_model(&self, model: &ModelDefinition) -> String {
        let mut columns = Vec::new();
        for (field, ty) in &model.fields {
            columns.extend(field_columns(&model.name, field, ty));
        }
        columns.push(Column::new("createdAt", "DateTime", "@default(now())"));
        columns.push(Column::new("updatedAt", "DateTime", "@updatedAt"));

        let reverse: Vec<Column> = REVERSE_RELATIONS
            .iter()
            .filter(|(owner, _, _)| *owner == model.name)
            .map(|(_, accessor, target)| Column::new(*accessor, format!("{}[]", target), ""))
            .collect();

        let name_width = columns.iter().chain(&reverse).map(|c| c.name.len()).max().unwrap_or(0);
        let type_width = columns.iter().chain(&reverse).map(|c| c.ty.len()).max().unwrap_or(0);

        let mut out = format!("model {} {{\n", model.name);
        for column in &columns {
            out.push_str(&render_column(column, name_width, type_width));
        }
        if !reverse.is_empty() {
            out.push('\n');
            for column in &reverse {
                out.push_str(&render_column(column, name_width, type_width));
            }
        }

        out.push_str("\n  @@index([tenantId])\n");
        for (field, _) in model.relations() {
            out.push_str(&format!("  @@index([{}])\n", field));
        }
        out.push_str("}\n");
        out
    }
}

/// Columns produced by one registry field. Foreign keys produce two.
fn field_columns(model: &str, field: &str, ty: &FieldType) -> Vec<Column> {
    match ty {
        FieldType::Foreign(target) => {
            let accessor = naming::relation_accessor(field);
            vec![
                Column::new(
                    accessor,
                    target.as_str(),
                    format!("@relation(fields: [{}], references: [id])", field),
                ),
                Column::new(field, "String", ""),
            ]
        }
        FieldType::Enum(_) => {
            let attrs = ty
                .enum_default()
                .map(|default| format!("@default({})", default))
                .unwrap_or_default();
            vec![Column::new(field, naming::enum_type_name(field), attrs)]
        }
        FieldType::Scalar(kind) => {
            let column_type = match kind {
                ScalarKind::String => "String",
                ScalarKind::Number => "Float",
                ScalarKind::Text => "String?",
                ScalarKind::DateTime => "DateTime",
                ScalarKind::Other(raw) => raw.as_str(),
            };
            vec![Column::new(field, column_type, scalar_attrs(model, field, kind))]
        }
    }
}

fn scalar_attrs(model: &str, field: &str, kind: &ScalarKind) -> &'static str {
    match (model, field) {
        (_, "id") if *kind == ScalarKind::String => "@id @default(uuid())",
        (_, "id") => "@id",
        ("User", "email") => "@unique",
        _ => "",
    }
}

fn render_column(column: &Column, name_width: usize, type_width: usize) -> String {
    let line = format!(
        "  {:name_width$} {:type_width$} {}",
        column.name, column.ty, column.attrs
    );
    format!("{}\n", line.trim_end())
}
