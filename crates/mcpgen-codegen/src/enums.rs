//! Enum declarations shared by the schema and type-definition emitters.
//!
//! Enums are keyed by the capitalized *field name*, not by their value set:
//! `status` and `state` with identical literals still produce two
//! declarations. The first field to claim a name wins; conflicting
//! redeclarations are rejected by registry validation.

use indexmap::IndexMap;
use mcpgen_core::naming;
use mcpgen_core::{FieldType, ModelDefinition};

/// One enum declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl<'a> {
    /// Type name (`Status`).
    pub name: String,
    /// Literals in declaration order. The first is the default.
    pub values: &'a [String],
}

/// Collect every enum used by `models`, once each, in first-use order.
pub fn collect_enums(models: &[ModelDefinition]) -> Vec<EnumDecl<'_>> {
    let mut decls: IndexMap<String, &[String]> = IndexMap::new();
    for model in models {
        for (field, ty) in &model.fields {
            if let FieldType::Enum(values) = ty {
                decls
                    .entry(naming::enum_type_name(field))
                    .or_insert(values.as_slice());
            }
        }
    }
    decls
        .into_iter()
        .map(|(name, values)| EnumDecl { name, values })
        .collect()
}
