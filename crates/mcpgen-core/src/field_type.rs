//! Field-type grammar.
//!
//! Every field in the model registry carries a compact type expression:
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `string` | Short string |
//! | `number` | Numeric value |
//! | `text` | Optional long-form string |
//! | `datetime` | Timestamp |
//! | `enum:a\|b\|c` | Enumeration, first literal is the default |
//! | `foreign:Model` | Reference to another model's `id` |
//!
//! Expressions are parsed once into [`FieldType`]; generators match on the
//! variant and never look at the raw string again.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const ENUM_PREFIX: &str = "enum:";
const FOREIGN_PREFIX: &str = "foreign:";
const ENUM_SEPARATOR: char = '|';

/// Semantic type of a registry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// One of the scalar keywords, or an unrecognized pass-through keyword.
    Scalar(ScalarKind),
    /// Ordered set of literals. The first literal is the default value.
    Enum(Vec<String>),
    /// Reference to another model, by name.
    Foreign(String),
}

/// Scalar keywords understood by the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
    Text,
    DateTime,
    /// Unknown keyword carried through verbatim.
    Other(String),
}

impl ScalarKind {
    pub fn keyword(&self) -> &str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Number => "number",
            ScalarKind::Text => "text",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Other(raw) => raw,
        }
    }

    fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "string" => ScalarKind::String,
            "number" => ScalarKind::Number,
            "text" => ScalarKind::Text,
            "datetime" => ScalarKind::DateTime,
            other => ScalarKind::Other(other.to_string()),
        }
    }
}

impl FieldType {
    /// Parse a field-type expression. Parsing never fails; malformed
    /// expressions (such as `enum:` with no literals) are reported by
    /// [`crate::validate`].
    pub fn parse(expr: &str) -> Self {
        if let Some(values) = expr.strip_prefix(ENUM_PREFIX) {
            let values = if values.is_empty() {
                Vec::new()
            } else {
                values.split(ENUM_SEPARATOR).map(str::to_string).collect()
            };
            FieldType::Enum(values)
        } else if let Some(model) = expr.strip_prefix(FOREIGN_PREFIX) {
            FieldType::Foreign(model.to_string())
        } else {
            FieldType::Scalar(ScalarKind::from_keyword(expr))
        }
    }

    pub fn string() -> Self {
        FieldType::Scalar(ScalarKind::String)
    }

    /// Default literal of an enumeration.
    pub fn enum_default(&self) -> Option<&str> {
        match self {
            FieldType::Enum(values) => values.first().map(String::as_str),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldType::Scalar(ScalarKind::Text))
    }

    /// Target model of a foreign reference.
    pub fn foreign_model(&self) -> Option<&str> {
        match self {
            FieldType::Foreign(model) => Some(model),
            _ => None,
        }
    }

    /// Whether `field_name` with this type denotes a relation column
    /// (a foreign reference on a field ending in `Id`, with something
    /// before the suffix to name the relation after).
    pub fn is_relation(&self, field_name: &str) -> bool {
        matches!(self, FieldType::Foreign(_))
            && field_name
                .strip_suffix("Id")
                .is_some_and(|prefix| !prefix.is_empty())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(kind) => f.write_str(kind.keyword()),
            FieldType::Enum(values) => {
                write!(f, "{}{}", ENUM_PREFIX, values.join(&ENUM_SEPARATOR.to_string()))
            }
            FieldType::Foreign(model) => write!(f, "{}{}", FOREIGN_PREFIX, model),
        }
    }
}

impl From<&str> for FieldType {
    fn from(expr: &str) -> Self {
        FieldType::parse(expr)
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = String::deserialize(deserializer)?;
        Ok(FieldType::parse(&expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_keywords() {
        assert_eq!(FieldType::parse("string"), FieldType::Scalar(ScalarKind::String));
        assert_eq!(FieldType::parse("number"), FieldType::Scalar(ScalarKind::Number));
        assert_eq!(FieldType::parse("text"), FieldType::Scalar(ScalarKind::Text));
        assert_eq!(
            FieldType::parse("datetime"),
            FieldType::Scalar(ScalarKind::DateTime)
        );
    }

    #[test]
    fn test_unknown_keyword_passes_through() {
        let ty = FieldType::parse("boolean");
        assert_eq!(ty, FieldType::Scalar(ScalarKind::Other("boolean".to_string())));
        assert_eq!(ty.to_string(), "boolean");
    }

    #[test]
    fn test_parse_enum_keeps_order_and_default() {
        let ty = FieldType::parse("enum:scheduled|completed|canceled");
        assert_eq!(
            ty,
            FieldType::Enum(vec![
                "scheduled".to_string(),
                "completed".to_string(),
                "canceled".to_string()
            ])
        );
        assert_eq!(ty.enum_default(), Some("scheduled"));
    }

    #[test]
    fn test_parse_empty_enum() {
        let ty = FieldType::parse("enum:");
        assert_eq!(ty, FieldType::Enum(vec![]));
        assert_eq!(ty.enum_default(), None);
    }

    #[test]
    fn test_parse_foreign() {
        let ty = FieldType::parse("foreign:Client");
        assert_eq!(ty.foreign_model(), Some("Client"));
        assert!(ty.is_relation("clientId"));
        assert!(!ty.is_relation("client"));
        assert!(!ty.is_relation("Id"));
        assert!(!FieldType::string().is_relation("clientId"));
    }

    #[test]
    fn test_display_round_trips_expression() {
        for expr in ["string", "text", "enum:a|b", "foreign:Service", "json"] {
            assert_eq!(FieldType::parse(expr).to_string(), expr);
        }
    }

    #[test]
    fn test_serde_uses_expression_string() {
        let ty: FieldType = serde_json::from_str(r#""enum:superadmin|client""#).unwrap();
        assert_eq!(ty.enum_default(), Some("superadmin"));
        assert_eq!(serde_json::to_string(&ty).unwrap(), r#""enum:superadmin|client""#);
    }
}
