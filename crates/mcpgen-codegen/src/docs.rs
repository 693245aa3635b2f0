//! Markdown documentation rendered from the project descriptor.
//!
//! Descriptions are heuristic and derived from names only. Every route,
//! controller method, component and page in the descriptor appears exactly
//! once in the output.

use indexmap::IndexMap;
use mcpgen_core::FieldType;
use mcpgen_core::naming::{ComponentKind, CrudAction, PageKind};

use crate::descriptor::ProjectDescriptor;

const FOOTER: &str = "Documentation generated automatically from the MCP (Model-Code-Project) registry.";

/// Render the project documentation.
pub fn render_docs(descriptor: &ProjectDescriptor<'_>) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {} - Project Documentation\n\n", descriptor.name));
    out.push_str(&format!("Version: {}\n\n", descriptor.version));
    out.push_str(TABLE_OF_CONTENTS);

    render_models(&mut out, descriptor);
    render_backend(&mut out, descriptor);
    render_frontend(&mut out, descriptor);
    render_deployment(&mut out, descriptor);

    out
}

const TABLE_OF_CONTENTS: &str = "\
## Table of Contents

1. [Data Models](#data-models)
2. [Backend](#backend)
   - [Routes](#routes)
   - [Controllers](#controllers)
   - [Middleware](#middleware)
3. [Frontend](#frontend)
   - [Components](#components)
   - [Pages](#pages)
   - [Layouts](#layouts)
4. [Deployment](#deployment)

";

fn table_header(out: &mut String, columns: &[&str]) {
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    let rules: Vec<String> = columns.iter().map(|c| "-".repeat(c.len())).collect();
    out.push_str(&format!("| {} |\n", rules.join(" | ")));
}

/// Cells are escaped so an enum expression such as `enum:a|b` stays in one
/// column.
fn table_row(out: &mut String, cells: &[&str]) {
    let cells: Vec<String> = cells.iter().map(|cell| cell.replace('|', "\\|")).collect();
    out.push_str(&format!("| {} |\n", cells.join(" | ")));
}

fn render_models(out: &mut String, descriptor: &ProjectDescriptor<'_>) {
    out.push_str("## Data Models\n\nThe system uses the following data models:\n\n");

    for model in descriptor.models {
        out.push_str(&format!("### {}\n\n", model.name));
        table_header(out, &["Field", "Type", "Description"]);
        for (field, ty) in &model.fields {
            let expr = ty.to_string();
            table_row(out, &[field.as_str(), &expr, &field_description(field, ty)]);
        }
        out.push('\n');
    }
}

fn field_description(field: &str, ty: &FieldType) -> String {
    match (field, ty) {
        ("id", _) => "Unique identifier".to_string(),
        ("tenantId", _) => "Tenant ID (multi-tenancy)".to_string(),
        (_, FieldType::Enum(values)) => format!("Enum: {}", values.join(", ")),
        (_, FieldType::Foreign(target)) => format!("Foreign key to {}", target),
        (_, FieldType::Scalar(kind)) => format!("Field of type {}", kind.keyword()),
    }
}

fn render_backend(out: &mut String, descriptor: &ProjectDescriptor<'_>) {
    out.push_str("## Backend\n\nThe backend exposes a RESTful API over the data models.\n\n");

    out.push_str("### Routes\n\n");
    for group in &descriptor.backend.routes {
        out.push_str(&format!("#### {}\n\n", group.base_path));
        table_header(out, &["Method", "Path", "Description", "Controller", "Middleware"]);
        for endpoint in &group.endpoints {
            let middleware = endpoint.middleware.join(", ");
            table_row(
                out,
                &[
                    endpoint.method.as_str(),
                    &endpoint.path,
                    &endpoint.description,
                    &endpoint.controller,
                    &middleware,
                ],
            );
        }
        out.push('\n');
    }

    out.push_str("### Controllers\n\n");
    for controller in &descriptor.backend.controllers {
        let model = controller
            .name
            .strip_suffix("Controller")
            .unwrap_or(&controller.name);
        out.push_str(&format!("#### {}\n\n", controller.name));
        table_header(out, &["Method", "Description"]);
        for method in &controller.methods {
            let description = CrudAction::from_method_name(method, model)
                .map(|action| method_description(action, model))
                .unwrap_or_default();
            table_row(out, &[method.as_str(), &description]);
        }
        out.push('\n');
    }

    out.push_str("### Middleware\n\n");
    for middleware in &descriptor.backend.middleware {
        out.push_str(&format!("#### {}\n\n{}\n\n", middleware.name, middleware.description));
    }
}

fn method_description(action: CrudAction, model: &str) -> String {
    let entity = model.to_lowercase();
    match action {
        CrudAction::List => format!("List all {}s", entity),
        CrudAction::Get => format!("Get {} by ID", entity),
        CrudAction::Create => format!("Create a new {}", entity),
        CrudAction::Update => format!("Update an existing {}", entity),
        CrudAction::Delete => format!("Delete {}", entity),
    }
}

fn render_frontend(out: &mut String, descriptor: &ProjectDescriptor<'_>) {
    out.push_str("## Frontend\n\nThe frontend is built with Next.js and Tailwind CSS, mobile-first.\n\n");

    out.push_str("### Components\n\n");
    let mut by_model: IndexMap<&str, Vec<(&str, Option<ComponentKind>)>> = IndexMap::new();
    for component in &descriptor.frontend.components {
        match ComponentKind::split(component) {
            Some((model, kind)) => by_model
                .entry(model)
                .or_default()
                .push((component.as_str(), Some(kind))),
            None => by_model
                .entry(component.as_str())
                .or_default()
                .push((component.as_str(), None)),
        }
    }
    for (model, components) in &by_model {
        out.push_str(&format!("#### {} Components\n\n", model));
        table_header(out, &["Component", "Description"]);
        for &(component, kind) in components {
            let description = kind
                .map(|kind| component_description(kind, model))
                .unwrap_or_default();
            table_row(out, &[component, &description]);
        }
        out.push('\n');
    }

    out.push_str("### Pages\n\n");
    let mut sections: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for section in ["Authentication", "Dashboard", "Modules", "Other"] {
        sections.insert(section, Vec::new());
    }
    for page in &descriptor.frontend.pages {
        sections
            .entry(page_section(page))
            .or_default()
            .push(page.as_str());
    }
    for (section, pages) in sections.iter().filter(|(_, pages)| !pages.is_empty()) {
        out.push_str(&format!("#### {}\n\n", section));
        table_header(out, &["Route", "Description"]);
        for &page in pages {
            table_row(out, &[page, &page_description(page)]);
        }
        out.push('\n');
    }

    out.push_str("### Layouts\n\n");
    for layout in &descriptor.frontend.layouts {
        match layout_description(layout) {
            Some(description) => out.push_str(&format!("- **{}**: {}\n", layout, description)),
            None => out.push_str(&format!("- **{}**\n", layout)),
        }
    }
    out.push('\n');
}

fn component_description(kind: ComponentKind, model: &str) -> String {
    let entity = model.to_lowercase();
    match kind {
        ComponentKind::List => format!("List of {}s with filters and pagination", entity),
        ComponentKind::Form => format!("Form to create or edit a {}", entity),
        ComponentKind::Detail => format!("Detailed view of a {}", entity),
        ComponentKind::Card => format!("Summary card of a {} for listings", entity),
    }
}

fn page_section(page: &str) -> &'static str {
    if page.starts_with("/login") || page.starts_with("/register") {
        "Authentication"
    } else if page == "/dashboard" {
        "Dashboard"
    } else if page.starts_with("/dashboard/") {
        "Modules"
    } else {
        "Other"
    }
}

fn page_description(page: &str) -> String {
    match page {
        "/login" => return "Login page".to_string(),
        "/register" => return "Registration of a new professional or tenant".to_string(),
        "/dashboard" => return "Main dashboard with KPIs and indicators".to_string(),
        _ => {}
    }
    match PageKind::classify(page) {
        Some((collection, PageKind::Index)) => format!("List all {}", collection),
        Some((collection, PageKind::New)) => format!("Create a new {}", collection),
        Some((collection, PageKind::Detail)) => format!("View {} details", collection),
        Some((collection, PageKind::Edit)) => format!("Edit {}", collection),
        None => String::new(),
    }
}

fn layout_description(layout: &str) -> Option<&'static str> {
    match layout {
        "AuthLayout" => Some("Layout for authentication pages (login and registration)"),
        "DashboardLayout" => Some("Main layout for signed-in pages with sidebar and header"),
        "ClientLayout" => Some("Layout for public booking pages"),
        _ => None,
    }
}

fn render_deployment(out: &mut String, descriptor: &ProjectDescriptor<'_>) {
    let deployment = &descriptor.deployment;
    out.push_str("## Deployment\n\nThe system is configured for deployment on the following platforms:\n\n");
    out.push_str(&format!(
        "- **Frontend**: {} ({})\n",
        deployment.frontend.platform, deployment.frontend.url
    ));
    out.push_str(&format!(
        "- **Backend**: {} ({})\n",
        deployment.backend.platform, deployment.backend.url
    ));
    out.push_str(&format!(
        "- **Database**: {} ({})\n\n",
        deployment.database.platform, deployment.database.kind
    ));
    out.push_str("---\n\n");
    out.push_str(FOOTER);
    out.push('\n');
}
