//! Core types for mcpgen: the model registry, the field-type grammar, the
//! naming rules shared by all generators, registry validation and
//! configuration.

pub mod config;
pub mod editor;
pub mod field_type;
pub mod naming;
pub mod registry;
pub mod validate;

pub use config::{ConfigError, McpgenConfig};
pub use field_type::{FieldType, ScalarKind};
pub use registry::{ModelDefinition, ModelRegistry, RegistryError};
pub use validate::{Finding, Severity, ValidationReport, validate_registry};
