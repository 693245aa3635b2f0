//! Frontend inventory and deployment metadata.
//!
//! These values are static configuration copied into the project
//! descriptor; nothing here is derived from the model registry.

use serde::{Deserialize, Serialize};

/// Static frontend inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Pages that exist regardless of the registry, listed before the
    /// per-model pages.
    #[serde(default = "default_static_pages")]
    pub static_pages: Vec<String>,

    /// Layout components.
    #[serde(default = "default_layouts")]
    pub layouts: Vec<String>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            static_pages: default_static_pages(),
            layouts: default_layouts(),
        }
    }
}

fn default_static_pages() -> Vec<String> {
    vec![
        "/login".to_string(),
        "/register".to_string(),
        "/dashboard".to_string(),
    ]
}

fn default_layouts() -> Vec<String> {
    vec![
        "AuthLayout".to_string(),
        "DashboardLayout".to_string(),
        "ClientLayout".to_string(),
    ]
}

/// Where each tier of the application is deployed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default = "default_frontend_target")]
    pub frontend: HostingTarget,

    #[serde(default = "default_backend_target")]
    pub backend: HostingTarget,

    #[serde(default)]
    pub database: DatabaseTarget,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            frontend: default_frontend_target(),
            backend: default_backend_target(),
            database: DatabaseTarget::default(),
        }
    }
}

/// A hosting platform and public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingTarget {
    pub platform: String,
    pub url: String,
}

fn default_frontend_target() -> HostingTarget {
    HostingTarget {
        platform: "Vercel".to_string(),
        url: "https://proagendify.vercel.app".to_string(),
    }
}

fn default_backend_target() -> HostingTarget {
    HostingTarget {
        platform: "Render".to_string(),
        url: "https://proagendify-api.onrender.com".to_string(),
    }
}

/// Database hosting platform and engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTarget {
    #[serde(default = "default_database_platform")]
    pub platform: String,

    #[serde(rename = "type", default = "default_database_kind")]
    pub kind: String,
}

impl Default for DatabaseTarget {
    fn default() -> Self {
        Self {
            platform: default_database_platform(),
            kind: default_database_kind(),
        }
    }
}

fn default_database_platform() -> String {
    "Neon".to_string()
}

fn default_database_kind() -> String {
    "PostgreSQL".to_string()
}
