//! Naming rules shared by every generator.
//!
//! Route paths, controller methods, component names and type names are all
//! derived here and used by the schema, the type definitions, the project
//! descriptor and the documentation alike.
//!
//! Pluralization is naive: a trailing `s` is appended, so `Class` becomes
//! `classs`.

/// Lowercase the first character (`OrderItem` -> `orderItem`).
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character (`status` -> `Status`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append `s`. No irregular forms.
pub fn pluralize(s: &str) -> String {
    format!("{}s", s)
}

/// Collection segment for a model (`Service` -> `services`).
pub fn collection_name(model: &str) -> String {
    pluralize(&lowercase_first(model))
}

/// REST base path for a model (`Service` -> `/services`).
pub fn route_base_path(model: &str) -> String {
    format!("/{}", collection_name(model))
}

/// Dashboard page root for a model (`Service` -> `/dashboard/services`).
pub fn dashboard_path(model: &str) -> String {
    format!("/dashboard/{}", collection_name(model))
}

/// Enum type name for an enum-typed field (`status` -> `Status`).
pub fn enum_type_name(field: &str) -> String {
    capitalize(field)
}

/// Relation accessor name for a foreign key field (`clientId` -> `client`).
pub fn relation_accessor(field: &str) -> &str {
    field.strip_suffix("Id").unwrap_or(field)
}

pub fn create_input_name(model: &str) -> String {
    format!("Create{}Input", model)
}

pub fn update_input_name(model: &str) -> String {
    format!("Update{}Input", model)
}

pub fn controller_name(model: &str) -> String {
    format!("{}Controller", model)
}

/// The five CRUD operations generated for every model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 5] = [
        CrudAction::List,
        CrudAction::Get,
        CrudAction::Create,
        CrudAction::Update,
        CrudAction::Delete,
    ];

    /// HTTP method of the endpoint.
    pub fn http_method(self) -> &'static str {
        match self {
            CrudAction::List | CrudAction::Get => "GET",
            CrudAction::Create => "POST",
            CrudAction::Update => "PUT",
            CrudAction::Delete => "DELETE",
        }
    }

    /// Whether the endpoint addresses a single record (`/:id`).
    pub fn targets_record(self) -> bool {
        !matches!(self, CrudAction::List | CrudAction::Create)
    }

    /// Controller method name (`getServices`, `getService`, `createService`, ...).
    pub fn method_name(self, model: &str) -> String {
        match self {
            CrudAction::List => format!("get{}", pluralize(model)),
            CrudAction::Get => format!("get{}", model),
            CrudAction::Create => format!("create{}", model),
            CrudAction::Update => format!("update{}", model),
            CrudAction::Delete => format!("delete{}", model),
        }
    }

    /// Endpoint path (`/services` or `/services/:id`).
    pub fn path(self, model: &str) -> String {
        let base = route_base_path(model);
        if self.targets_record() {
            format!("{}/:id", base)
        } else {
            base
        }
    }

    /// Recover the action from a controller method name for `model`.
    pub fn from_method_name(method: &str, model: &str) -> Option<Self> {
        CrudAction::ALL
            .into_iter()
            .find(|action| action.method_name(model) == method)
    }
}

/// The four UI components generated for every model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    List,
    Form,
    Detail,
    Card,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::List,
        ComponentKind::Form,
        ComponentKind::Detail,
        ComponentKind::Card,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            ComponentKind::List => "List",
            ComponentKind::Form => "Form",
            ComponentKind::Detail => "Detail",
            ComponentKind::Card => "Card",
        }
    }

    pub fn component_name(self, model: &str) -> String {
        format!("{}{}", model, self.suffix())
    }

    /// Split a component name into its model and kind (`ServiceCard` ->
    /// `("Service", Card)`). Only the trailing suffix is considered.
    pub fn split(component: &str) -> Option<(&str, Self)> {
        ComponentKind::ALL.into_iter().find_map(|kind| {
            component
                .strip_suffix(kind.suffix())
                .filter(|model| !model.is_empty())
                .map(|model| (model, kind))
        })
    }
}

/// The four dashboard pages generated for every model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    New,
    Detail,
    Edit,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [PageKind::Index, PageKind::New, PageKind::Detail, PageKind::Edit];

    pub fn page_path(self, model: &str) -> String {
        let root = dashboard_path(model);
        match self {
            PageKind::Index => root,
            PageKind::New => format!("{}/new", root),
            PageKind::Detail => format!("{}/:id", root),
            PageKind::Edit => format!("{}/:id/edit", root),
        }
    }

    /// Classify a `/dashboard/<collection>/...` page path.
    pub fn classify(page: &str) -> Option<(&str, Self)> {
        let rest = page.strip_prefix("/dashboard/")?;
        let (collection, tail) = match rest.split_once('/') {
            Some((collection, tail)) => (collection, Some(tail)),
            None => (rest, None),
        };
        if collection.is_empty() {
            return None;
        }
        let kind = match tail {
            None => PageKind::Index,
            Some("new") => PageKind::New,
            Some(":id") => PageKind::Detail,
            Some(":id/edit") => PageKind::Edit,
            Some(_) => return None,
        };
        Some((collection, kind))
    }
}
