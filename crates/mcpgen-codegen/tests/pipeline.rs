//! End-to-end tests for the sync pipeline.
//!
//! Each test writes a registry into a temporary project directory, runs the
//! orchestrator and inspects the generated files.

use std::fs;
use std::path::Path;

use mcpgen_codegen::{
    ArtifactKind, ProjectDescriptor, SchemaGenerator, SyncError, SyncMode, TypesGenerator,
    artifact_paths, render_docs, run_sync,
};
use mcpgen_core::config::DatasourceConfig;
use mcpgen_core::{McpgenConfig, ModelDefinition, ModelRegistry};
use pretty_assertions::assert_eq;

const SAMPLE_REGISTRY: &str = r#"{
  "models": [
    {
      "name": "User",
      "fields": {
        "id": "string",
        "tenantId": "string",
        "name": "string",
        "email": "string",
        "role": "enum:admin|staff"
      }
    },
    {
      "name": "Client",
      "fields": {
        "id": "string",
        "tenantId": "string",
        "name": "string",
        "phone": "string",
        "notes": "text"
      }
    },
    {
      "name": "Service",
      "fields": {
        "id": "string",
        "tenantId": "string",
        "name": "string",
        "price": "number",
        "duration": "number",
        "description": "text"
      }
    },
    {
      "name": "Appointment",
      "fields": {
        "id": "string",
        "tenantId": "string",
        "clientId": "foreign:Client",
        "serviceId": "foreign:Service",
        "date": "datetime",
        "status": "enum:scheduled|completed|canceled"
      }
    }
  ]
}
"#;

fn project(registry: &str) -> (tempfile::TempDir, McpgenConfig) {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("mcp.json"), registry).expect("write registry");
    let config = McpgenConfig::default().with_base_dir(dir.path());
    (dir, config)
}

fn read(config: &McpgenConfig, path: &Path) -> String {
    fs::read_to_string(config.resolve(path)).expect("artifact should exist")
}

fn snapshot(config: &McpgenConfig) -> Vec<String> {
    artifact_paths(config)
        .iter()
        .map(|p| fs::read_to_string(p).expect("artifact should exist"))
        .collect()
}

#[test]
fn test_sync_is_idempotent() {
    let (_dir, config) = project(SAMPLE_REGISTRY);

    run_sync(&config, SyncMode::Write).unwrap();
    let first = snapshot(&config);

    let report = run_sync(&config, SyncMode::Write).unwrap();
    assert_eq!(report.written().count(), 0);
    assert_eq!(snapshot(&config), first);
}

#[test]
fn test_every_model_is_complete_in_every_artifact() {
    let (_dir, config) = project(SAMPLE_REGISTRY);
    let report = run_sync(&config, SyncMode::Write).unwrap();
    assert_eq!(report.models, 4);

    let schema = read(&config, &config.outputs.schema);
    let types = read(&config, &config.outputs.types);
    let docs = read(&config, &config.outputs.docs);
    let descriptor: serde_json::Value =
        serde_json::from_str(&read(&config, &config.outputs.descriptor)).unwrap();

    for (i, model) in ["User", "Client", "Service", "Appointment"].iter().enumerate() {
        assert_eq!(schema.matches(&format!("model {} {{", model)).count(), 1);
        for shape in [
            format!("export interface {} {{", model),
            format!("export interface Create{}Input {{", model),
            format!("export interface Update{}Input {{", model),
        ] {
            assert_eq!(types.matches(&shape).count(), 1, "{}", shape);
        }
        assert_eq!(docs.matches(&format!("### {}\n", model)).count(), 1);
        assert_eq!(
            descriptor["backend"]["routes"][i]["endpoints"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }
}

#[test]
fn test_field_order_is_preserved() {
    let (_dir, config) = project(SAMPLE_REGISTRY);
    run_sync(&config, SyncMode::Write).unwrap();

    let schema = read(&config, &config.outputs.schema);
    let block_start = schema.find("model Appointment {").unwrap();
    let block = &schema[block_start..];
    let positions: Vec<usize> = ["  id ", "  tenantId ", "  client ", "  clientId ", "  service ", "  date ", "  status "]
        .iter()
        .map(|needle| block.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);

    let descriptor: serde_json::Value =
        serde_json::from_str(&read(&config, &config.outputs.descriptor)).unwrap();
    let keys: Vec<&String> = descriptor["models"][3]["fields"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(keys, ["id", "tenantId", "clientId", "serviceId", "date", "status"]);
}

#[test]
fn test_enum_round_trip() {
    let (_dir, config) = project(SAMPLE_REGISTRY);
    run_sync(&config, SyncMode::Write).unwrap();

    let schema = read(&config, &config.outputs.schema);
    let types = read(&config, &config.outputs.types);

    assert!(schema.contains("enum Status {\n  scheduled\n  completed\n  canceled\n}\n"));
    assert!(schema.contains("@default(scheduled)"));
    assert!(types.contains(
        "export enum Status {\n  SCHEDULED = \"scheduled\",\n  COMPLETED = \"completed\",\n  CANCELED = \"canceled\",\n}\n"
    ));
    assert!(schema.contains("enum Role {\n  admin\n  staff\n}\n"));
}

#[test]
fn test_foreign_key_expansion() {
    let (_dir, config) = project(SAMPLE_REGISTRY);
    run_sync(&config, SyncMode::Write).unwrap();

    let schema = read(&config, &config.outputs.schema);
    assert!(schema.contains("@relation(fields: [clientId], references: [id])"));
    assert!(schema.contains("@relation(fields: [serviceId], references: [id])"));
    assert!(schema.contains("  @@index([tenantId])\n  @@index([clientId])\n  @@index([serviceId])\n"));

    let types = read(&config, &config.outputs.types);
    assert!(types.contains("  clientId: string;\n"));
}

#[test]
fn test_naive_pluralization_everywhere() {
    let registry = r#"{"models":[{"name":"Class","fields":{"id":"string","tenantId":"string"}}]}"#;
    let (_dir, config) = project(registry);
    run_sync(&config, SyncMode::Write).unwrap();

    let descriptor = read(&config, &config.outputs.descriptor);
    assert!(descriptor.contains("\"basePath\": \"/classs\""));
    assert!(descriptor.contains("\"/dashboard/classs/:id/edit\""));

    let docs = read(&config, &config.outputs.docs);
    assert!(docs.contains("#### /classs\n"));
    assert!(docs.contains("| getClasss | List all classs |"));
}

#[test]
fn test_emitters_agree_on_names() {
    let registry = ModelRegistry {
        models: vec![
            ModelDefinition::new("Class")
                .with_field("id", "string")
                .with_field("tenantId", "string")
                .with_field("level", "enum:basic|advanced"),
        ],
        ..Default::default()
    };
    let config = McpgenConfig::default();

    let schema = SchemaGenerator::new(&DatasourceConfig::default()).generate(&registry.models);
    let types = TypesGenerator::new().generate(&registry.models);
    let descriptor = ProjectDescriptor::build(&registry, &config);
    let docs = render_docs(&descriptor);

    assert!(schema.contains("enum Level {"));
    assert!(types.contains("export enum Level {"));
    assert!(schema.contains("  level     Level    @default(basic)"));
    assert!(types.contains("  level: Level;\n"));

    let controller = &descriptor.backend.controllers[0];
    assert_eq!(controller.name, "ClassController");
    let controllers_section = &docs[docs.find("### Controllers").unwrap()..docs.find("### Middleware").unwrap()];
    for method in &controller.methods {
        assert_eq!(
            controllers_section.matches(&format!("| {} |", method)).count(),
            1,
            "{}",
            method
        );
        assert!(
            descriptor.backend.routes[0]
                .endpoints
                .iter()
                .any(|e| &e.controller == method)
        );
    }
}

#[test]
fn test_service_end_to_end() {
    let registry = r#"{
  "models": [
    {
      "name": "Service",
      "fields": {
        "id": "string",
        "tenantId": "string",
        "name": "string",
        "price": "number",
        "duration": "number",
        "description": "text"
      }
    }
  ]
}"#;
    let (_dir, config) = project(registry);
    let report = run_sync(&config, SyncMode::Write).unwrap();
    assert_eq!(report.written().count(), 4);
    assert!(report.warnings.is_empty());

    let schema = read(&config, &config.outputs.schema);
    let block_start = schema.find("model Service {").unwrap();
    let block = &schema[block_start..];
    let block = &block[..block.find("}\n").unwrap()];
    for column in ["id", "tenantId", "name", "price", "duration", "description", "createdAt", "updatedAt"] {
        assert!(block.contains(&format!("\n  {} ", column)), "missing column {}", column);
    }
    assert!(block.contains("@@index([tenantId])"));

    let types = read(&config, &config.outputs.types);
    assert!(types.contains(
        "export interface CreateServiceInput {\n  tenantId?: string;\n  name: string;\n  price: number;\n  duration: number;\n  description?: string | null;\n}\n"
    ));
    assert!(types.contains(
        "export interface UpdateServiceInput {\n  id: string;\n  tenantId?: string;\n  name?: string;\n  price?: number;\n  duration?: number;\n  description?: string | null;\n}\n"
    ));

    let docs = read(&config, &config.outputs.docs);
    let table_start = docs.find("### Service\n\n").unwrap();
    let rows = docs[table_start..]
        .lines()
        .skip(4)
        .take_while(|line| line.starts_with("| "))
        .count();
    assert_eq!(rows, 6);
}

#[test]
fn test_missing_registry_fails_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let config = McpgenConfig::default().with_base_dir(dir.path());

    let err = run_sync(&config, SyncMode::Write).unwrap_err();
    assert!(matches!(err, SyncError::Registry(_)), "{:?}", err);
    for path in artifact_paths(&config) {
        assert!(!path.exists(), "{}", path.display());
    }
}

#[test]
fn test_validation_errors_leave_artifacts_untouched() {
    let (dir, config) = project(SAMPLE_REGISTRY);
    run_sync(&config, SyncMode::Write).unwrap();
    let before = snapshot(&config);

    fs::write(
        dir.path().join("mcp.json"),
        r#"{"models":[{"name":"Visit","fields":{"id":"string","tenantId":"string","kind":"enum:"}}]}"#,
    )
    .unwrap();

    match run_sync(&config, SyncMode::Write) {
        Err(SyncError::Validation { errors }) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].location(), "Visit.kind");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(snapshot(&config), before);
}

#[test]
fn test_check_mode_reports_stale_artifacts() {
    let (_dir, config) = project(SAMPLE_REGISTRY);
    run_sync(&config, SyncMode::Write).unwrap();

    let docs = config.resolve(&config.outputs.docs);
    fs::write(&docs, "edited by hand\n").unwrap();

    let report = run_sync(&config, SyncMode::Check).unwrap();
    let stale: Vec<ArtifactKind> = report.stale().map(|a| a.kind).collect();
    assert_eq!(stale, vec![ArtifactKind::Docs]);
    assert_eq!(fs::read_to_string(&docs).unwrap(), "edited by hand\n");
}

#[test]
fn test_outputs_follow_configuration() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("models.json"), SAMPLE_REGISTRY).unwrap();
    fs::write(
        dir.path().join("mcpgen.yaml"),
        "project: Salon\nregistry: models.json\noutputs:\n  docs: docs/README.md\n",
    )
    .unwrap();

    let config = McpgenConfig::from_file(dir.path().join("mcpgen.yaml")).unwrap();
    run_sync(&config, SyncMode::Write).unwrap();

    let docs = fs::read_to_string(dir.path().join("docs/README.md")).unwrap();
    assert!(docs.starts_with("# Salon - Project Documentation\n"));
    assert!(dir.path().join("mcp-full.json").exists());
}
