use crate::style::StyleOverride;
use serde::{Deserialize, Serialize};

/// One typed, styleable, orderable unit within a configuration document.
///
/// `id` is unique within the whole document (container children included) and
/// is minted fresh at creation and duplication — never copied from a source.
/// `order` is re-stamped to the dense sequence `1..=N` on every structural
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(flatten)]
    pub kind: ComponentKind,
    pub order: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "StyleOverride::is_empty")]
    pub style: StyleOverride,
}

fn default_visible() -> bool {
    true
}

impl Component {
    /// Build a component with a freshly minted id and default props.
    pub fn new(kind: ComponentKind) -> Self {
        Component {
            id: mint_id(),
            kind,
            order: 0,
            visible: true,
            style: StyleOverride::default(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }
}

/// Mint a document-unique component id.
pub fn mint_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The closed set of component types.
///
/// Adding a type means extending this enum plus its schema and render
/// entries — there is no runtime plugin registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "props", rename_all = "snake_case")]
pub enum ComponentKind {
    Header(HeaderProps),
    Description(DescriptionProps),
    FeatureList(FeatureListProps),
    Form(FormProps),
    Badge(BadgeProps),
    Divider(DividerProps),
    Container(ContainerProps),
    Richtext(RichtextProps),
    CustomHtml(CustomHtmlProps),
    ButtonGroup(ButtonGroupProps),
    Menu(MenuProps),
}

impl ComponentKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Header(_) => "header",
            ComponentKind::Description(_) => "description",
            ComponentKind::FeatureList(_) => "feature_list",
            ComponentKind::Form(_) => "form",
            ComponentKind::Badge(_) => "badge",
            ComponentKind::Divider(_) => "divider",
            ComponentKind::Container(_) => "container",
            ComponentKind::Richtext(_) => "richtext",
            ComponentKind::CustomHtml(_) => "custom_html",
            ComponentKind::ButtonGroup(_) => "button_group",
            ComponentKind::Menu(_) => "menu",
        }
    }

    /// Default (empty-props) kind for a type tag, used when the editor adds
    /// a new component. Returns `None` for tags outside the closed set.
    pub fn default_for_tag(tag: &str) -> Option<ComponentKind> {
        match tag {
            "header" => Some(ComponentKind::Header(Default::default())),
            "description" => Some(ComponentKind::Description(Default::default())),
            "feature_list" => Some(ComponentKind::FeatureList(Default::default())),
            "form" => Some(ComponentKind::Form(Default::default())),
            "badge" => Some(ComponentKind::Badge(Default::default())),
            "divider" => Some(ComponentKind::Divider(Default::default())),
            "container" => Some(ComponentKind::Container(Default::default())),
            "richtext" => Some(ComponentKind::Richtext(Default::default())),
            "custom_html" => Some(ComponentKind::CustomHtml(Default::default())),
            "button_group" => Some(ComponentKind::ButtonGroup(Default::default())),
            "menu" => Some(ComponentKind::Menu(Default::default())),
            _ => None,
        }
    }

    /// Owned child components, for kinds that nest (container only).
    pub fn children(&self) -> Option<&Vec<Component>> {
        match self {
            ComponentKind::Container(props) => Some(&props.children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Component>> {
        match self {
            ComponentKind::Container(props) => Some(&mut props.children),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptionProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureListProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: FormFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    Email,
    Phone,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub variant: BadgeVariant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RichtextProps {
    /// Inline markup, sanitized to the inline allow-list subset at render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomHtmlProps {
    /// Raw markup, passed through the allow-list filter at render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonGroupProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ButtonGroupLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonGroupLayout {
    Horizontal,
    Vertical,
}

/// A single action button. Also used for the legacy top-level
/// primary/secondary pair on the document root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub action: ButtonAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "StyleOverride::is_empty")]
    pub style: StyleOverride,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAction {
    #[default]
    Message,
    Link,
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuProps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub action: ButtonAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
