//! Property-schema descriptors driving the generic property editor.
//!
//! Pure metadata: each registry type maps to named groups of field
//! definitions. Field keys are dotted paths relative to the component root
//! (`props.title`, `style.textColor`), ready to feed straight into
//! `update_component_property`.

use serde::{Deserialize, Serialize};

/// Editor grouping for property fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupCategory {
    Content,
    Appearance,
    Layout,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Color,
    Number,
    Select,
    Toggle,
    Array,
    Object,
}

/// One editable field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub key: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    /// (value, label) pairs; required for `Select` fields.
    pub options: Option<&'static [(&'static str, &'static str)]>,
    /// Nested schema; required for `Array` and `Object` fields.
    pub item_schema: Option<fn() -> Vec<FieldDef>>,
}

impl FieldDef {
    fn new(key: &'static str, kind: FieldKind, label: &'static str) -> Self {
        FieldDef {
            key,
            kind,
            label,
            description: None,
            required: false,
            min: None,
            max: None,
            step: None,
            options: None,
            item_schema: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn range(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    fn options(mut self, options: &'static [(&'static str, &'static str)]) -> Self {
        self.options = Some(options);
        self
    }

    fn items(mut self, schema: fn() -> Vec<FieldDef>) -> Self {
        self.item_schema = Some(schema);
        self
    }

    /// Whether the editor has enough metadata to render this field. A select
    /// without options or an array/object without an item schema is a
    /// developer-time misconfiguration: logged, field renders nothing.
    pub fn is_renderable(&self) -> bool {
        match self.kind {
            FieldKind::Select => {
                if self.options.is_none() {
                    log::warn!("select field '{}' has no options", self.key);
                    return false;
                }
                true
            }
            FieldKind::Array | FieldKind::Object => {
                if self.item_schema.is_none() {
                    log::warn!("field '{}' has no item schema", self.key);
                    return false;
                }
                true
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyGroup {
    pub category: GroupCategory,
    pub fields: Vec<FieldDef>,
}

impl PropertyGroup {
    fn new(category: GroupCategory, fields: Vec<FieldDef>) -> Self {
        PropertyGroup { category, fields }
    }
}

fn text(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, FieldKind::Text, label)
}

fn textarea(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, FieldKind::Textarea, label)
}

fn color(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, FieldKind::Color, label)
}

fn number(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, FieldKind::Number, label)
}

fn select(
    key: &'static str,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
) -> FieldDef {
    FieldDef::new(key, FieldKind::Select, label).options(options)
}

fn array(key: &'static str, label: &'static str, items: fn() -> Vec<FieldDef>) -> FieldDef {
    FieldDef::new(key, FieldKind::Array, label).items(items)
}

/// Style fields shared by every component type.
fn appearance_group() -> PropertyGroup {
    PropertyGroup::new(
        GroupCategory::Appearance,
        vec![
            color("style.textColor", "Text color"),
            color("style.backgroundColor", "Background color"),
            number("style.fontSize", "Font size").range(8.0, 72.0, 1.0),
            select(
                "style.fontWeight",
                "Font weight",
                &[("normal", "Normal"), ("bold", "Bold"), ("600", "Semibold")],
            ),
            select(
                "style.textAlign",
                "Text align",
                &[("left", "Left"), ("center", "Center"), ("right", "Right")],
            ),
        ],
    )
}

fn layout_group() -> PropertyGroup {
    PropertyGroup::new(
        GroupCategory::Layout,
        vec![
            number("style.padding", "Padding").range(0.0, 96.0, 1.0),
            number("style.marginTop", "Margin top").range(0.0, 96.0, 1.0),
            number("style.marginBottom", "Margin bottom").range(0.0, 96.0, 1.0),
            number("style.borderRadius", "Corner radius").range(0.0, 48.0, 1.0),
        ],
    )
}

pub fn header_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![
                text("props.title", "Title").required(),
                text("props.subtitle", "Subtitle"),
                text("props.icon", "Icon").describe("Emoji or icon name shown before the title"),
            ],
        ),
        appearance_group(),
        layout_group(),
    ]
}

pub fn description_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![textarea("props.text", "Text").required()],
        ),
        appearance_group(),
        layout_group(),
    ]
}

fn feature_item_schema() -> Vec<FieldDef> {
    vec![
        text("text", "Text").required(),
        text("icon", "Icon"),
    ]
}

pub fn feature_list_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![array("props.items", "Items", feature_item_schema)],
        ),
        appearance_group(),
        layout_group(),
    ]
}

fn form_field_schema() -> Vec<FieldDef> {
    vec![
        text("name", "Field name").required(),
        text("label", "Label"),
        select(
            "type",
            "Type",
            &[("text", "Text"), ("email", "Email"), ("phone", "Phone")],
        ),
        text("placeholder", "Placeholder"),
        FieldDef::new("required", FieldKind::Toggle, "Required"),
    ]
}

pub fn form_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![
                array("props.fields", "Fields", form_field_schema),
                text("props.submitLabel", "Submit label"),
            ],
        ),
        appearance_group(),
        layout_group(),
    ]
}

pub fn badge_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![
                text("props.text", "Text").required(),
                select(
                    "props.variant",
                    "Variant",
                    &[
                        ("default", "Default"),
                        ("primary", "Primary"),
                        ("success", "Success"),
                        ("warning", "Warning"),
                        ("danger", "Danger"),
                    ],
                ),
            ],
        ),
        appearance_group(),
        layout_group(),
    ]
}

pub fn divider_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Appearance,
            vec![
                number("props.thickness", "Thickness").range(1.0, 12.0, 1.0),
                color("props.color", "Color"),
            ],
        ),
        layout_group(),
    ]
}

pub fn container_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Layout,
            vec![
                select(
                    "props.direction",
                    "Direction",
                    &[("column", "Column"), ("row", "Row")],
                ),
                number("props.gap", "Gap").range(0.0, 64.0, 1.0),
                number("style.padding", "Padding").range(0.0, 96.0, 1.0),
                color("style.backgroundColor", "Background color"),
                number("style.borderRadius", "Corner radius").range(0.0, 48.0, 1.0),
            ],
        ),
    ]
}

pub fn richtext_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Content,
            vec![textarea("props.content", "Content")
                .describe("Inline markup; only basic formatting tags are kept")],
        ),
        appearance_group(),
        layout_group(),
    ]
}

pub fn custom_html_schema() -> Vec<PropertyGroup> {
    vec![
        PropertyGroup::new(
            GroupCategory::Advanced,
            vec![textarea("props.html", "Markup")
                .describe("Filtered through the allow-list sanitizer before rendering")],
        ),
        layout_group(),
    ]
}
