//! Project descriptor (`mcp-full.json`).
//!
//! The descriptor aggregates the registry's models with everything derived
//! from them: REST routes, controllers, UI components and pages, plus the
//! static deployment metadata from configuration. It is rebuilt on every
//! run and borrows the models instead of copying them.
//!
//! ## Per-Model Derivations
//!
//! | Item | Example for `Service` |
//! |------|------------------------|
//! | Route base | `/services` |
//! | Endpoints | `GET /services`, `GET /services/:id`, `POST /services`, `PUT /services/:id`, `DELETE /services/:id` |
//! | Controller | `ServiceController` with `getServices`, `getService`, `createService`, `updateService`, `deleteService` |
//! | Components | `ServiceList`, `ServiceForm`, `ServiceDetail`, `ServiceCard` |
//! | Pages | `/dashboard/services`, `/dashboard/services/new`, `/dashboard/services/:id`, `/dashboard/services/:id/edit` |

use mcpgen_core::McpgenConfig;
use mcpgen_core::config::{DatabaseTarget, HostingTarget};
use mcpgen_core::naming::{self, ComponentKind, CrudAction, PageKind};
use mcpgen_core::{ModelDefinition, ModelRegistry};
use serde::Serialize;

/// Middleware chain applied to every generated endpoint, in order.
pub const ENDPOINT_MIDDLEWARE: [&str; 2] = ["auth", "tenant"];

/// The full project descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDescriptor<'a> {
    pub name: String,
    pub version: String,
    pub models: &'a [ModelDefinition],
    pub backend: Backend,
    pub frontend: Frontend,
    pub deployment: Deployment,
}

#[derive(Debug, Clone, Serialize)]
pub struct Backend {
    pub routes: Vec<RouteGroup>,
    pub controllers: Vec<Controller>,
    pub middleware: Vec<Middleware>,
}

/// All endpoints sharing one base path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    pub base_path: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub path: String,
    pub method: String,
    pub description: String,
    pub controller: String,
    pub middleware: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Controller {
    pub name: String,
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Middleware {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Frontend {
    pub components: Vec<String>,
    pub pages: Vec<String>,
    pub layouts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    pub frontend: HostingTarget,
    pub backend: HostingTarget,
    pub database: DatabaseTarget,
}

impl<'a> ProjectDescriptor<'a> {
    /// Build the descriptor from the registry and configuration.
    pub fn build(registry: &'a ModelRegistry, config: &McpgenConfig) -> Self {
        let models = registry.models.as_slice();

        let routes = models.iter().map(|m| route_group(&m.name)).collect();
        let controllers = models.iter().map(|m| controller(&m.name)).collect();

        let components = models
            .iter()
            .flat_map(|m| ComponentKind::ALL.map(|kind| kind.component_name(&m.name)))
            .collect();
        let pages = config
            .frontend
            .static_pages
            .iter()
            .cloned()
            .chain(
                models
                    .iter()
                    .flat_map(|m| PageKind::ALL.map(|kind| kind.page_path(&m.name))),
            )
            .collect();

        tracing::debug!(models = models.len(), "Built project descriptor");

        Self {
            name: config.project.clone(),
            version: config.version.clone(),
            models,
            backend: Backend {
                routes,
                controllers,
                middleware: middleware(),
            },
            frontend: Frontend {
                components,
                pages,
                layouts: config.frontend.layouts.clone(),
            },
            deployment: Deployment {
                frontend: config.deployment.frontend.clone(),
                backend: config.deployment.backend.clone(),
                database: config.deployment.database.clone(),
            },
        }
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Total number of generated endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.backend.routes.iter().map(|r| r.endpoints.len()).sum()
    }
}

fn route_group(model: &str) -> RouteGroup {
    let endpoints = CrudAction::ALL
        .iter()
        .map(|action| Endpoint {
            path: action.path(model),
            method: action.http_method().to_string(),
            description: endpoint_description(*action, model),
            controller: action.method_name(model),
            middleware: ENDPOINT_MIDDLEWARE.iter().map(|m| m.to_string()).collect(),
        })
        .collect();

    RouteGroup {
        base_path: naming::route_base_path(model),
        endpoints,
    }
}

fn endpoint_description(action: CrudAction, model: &str) -> String {
    let entity = naming::lowercase_first(model);
    match action {
        CrudAction::List => format!("List all {}", naming::collection_name(model)),
        CrudAction::Get => format!("Get {} by ID", entity),
        CrudAction::Create => format!("Create {}", entity),
        CrudAction::Update => format!("Update {}", entity),
        CrudAction::Delete => format!("Delete {}", entity),
    }
}

fn controller(model: &str) -> Controller {
    Controller {
        name: naming::controller_name(model),
        methods: CrudAction::ALL.iter().map(|a| a.method_name(model)).collect(),
    }
}

fn middleware() -> Vec<Middleware> {
    vec![
        Middleware {
            name: "auth".to_string(),
            description: "Authenticates the user via JWT".to_string(),
        },
        Middleware {
            name: "tenant".to_string(),
            description: "Checks and validates the tenantId for multi-tenant operations"
                .to_string(),
        },
    ]
}
