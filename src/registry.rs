//! Closed component type registry: each registry tag maps to its
//! property-schema descriptor and render dispatcher. `button_group` and
//! `menu` live outside the registry — they need editor-level callbacks
//! rather than a flat schema, and are special-cased by the renderer.

use crate::components::Component;
use crate::document::CtaConfig;
use crate::renderer::{self, RenderNode};
use crate::schema::{self, PropertyGroup};

/// Render dispatcher signature: `(component, document) -> node`.
pub type RenderFn = fn(&Component, &CtaConfig) -> Option<RenderNode>;

pub struct RegistryEntry {
    pub tag: &'static str,
    pub schema: fn() -> Vec<PropertyGroup>,
    pub render: RenderFn,
}

/// The registry tags, in editor display order.
pub const REGISTRY_TAGS: &[&str] = &[
    "header",
    "description",
    "feature_list",
    "form",
    "badge",
    "divider",
    "container",
    "richtext",
    "custom_html",
];

static HEADER: RegistryEntry = RegistryEntry {
    tag: "header",
    schema: schema::header_schema,
    render: renderer::render_header,
};
static DESCRIPTION: RegistryEntry = RegistryEntry {
    tag: "description",
    schema: schema::description_schema,
    render: renderer::render_description,
};
static FEATURE_LIST: RegistryEntry = RegistryEntry {
    tag: "feature_list",
    schema: schema::feature_list_schema,
    render: renderer::render_feature_list,
};
static FORM: RegistryEntry = RegistryEntry {
    tag: "form",
    schema: schema::form_schema,
    render: renderer::render_form,
};
static BADGE: RegistryEntry = RegistryEntry {
    tag: "badge",
    schema: schema::badge_schema,
    render: renderer::render_badge,
};
static DIVIDER: RegistryEntry = RegistryEntry {
    tag: "divider",
    schema: schema::divider_schema,
    render: renderer::render_divider,
};
static CONTAINER: RegistryEntry = RegistryEntry {
    tag: "container",
    schema: schema::container_schema,
    render: renderer::render_container,
};
static RICHTEXT: RegistryEntry = RegistryEntry {
    tag: "richtext",
    schema: schema::richtext_schema,
    render: renderer::render_richtext,
};
static CUSTOM_HTML: RegistryEntry = RegistryEntry {
    tag: "custom_html",
    schema: schema::custom_html_schema,
    render: renderer::render_custom_html,
};

/// Pure, constant-time lookup over the closed tag set.
pub fn resolve(tag: &str) -> Option<&'static RegistryEntry> {
    match tag {
        "header" => Some(&HEADER),
        "description" => Some(&DESCRIPTION),
        "feature_list" => Some(&FEATURE_LIST),
        "form" => Some(&FORM),
        "badge" => Some(&BADGE),
        "divider" => Some(&DIVIDER),
        "container" => Some(&CONTAINER),
        "richtext" => Some(&RICHTEXT),
        "custom_html" => Some(&CUSTOM_HTML),
        _ => None,
    }
}

/// Public type-validity check: registry tags plus `button_group`.
///
/// `menu` is deliberately not listed here — it is accepted by the document
/// model and the editor but has never been part of this check.
pub fn is_valid_type(tag: &str) -> bool {
    tag == "button_group" || resolve(tag).is_some()
}
