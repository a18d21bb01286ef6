use crate::components::{
    ButtonConfig, Component, ComponentKind, DescriptionProps, HeaderProps,
};
use crate::style::PatternFill;
use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u32 = 1;

/// The full, versioned, serializable description of a CTA screen.
///
/// Created once (default or loaded from storage), mutated only through the
/// editor's atomic operations, and handed to the renderer and to the caller's
/// persistence layer on save. Invariant: `components[i].order` is the dense
/// ascending sequence `1..=N` matching array position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CtaConfig {
    pub version: u32,
    pub enabled: bool,
    pub layout: Layout,
    pub theme: Theme,
    pub components: Vec<Component>,
    /// Legacy top-level action pair, superseded by a `button_group`
    /// component. When both are present the button group wins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_button: Option<ButtonConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_button: Option<ButtonConfig>,
    pub settings: Settings,
}

impl Default for CtaConfig {
    fn default() -> Self {
        CtaConfig {
            version: CONFIG_VERSION,
            enabled: true,
            layout: Layout::default(),
            theme: Theme::default(),
            components: Vec::new(),
            primary_button: None,
            secondary_button: None,
            settings: Settings::default(),
        }
    }
}

impl CtaConfig {
    /// A valid, renderable starter document: header, description and a
    /// button group, with dense orders already stamped.
    pub fn starter() -> Self {
        let mut config = CtaConfig::default();
        config.components = vec![
            Component::new(ComponentKind::Header(HeaderProps {
                title: Some("Welcome".to_string()),
                subtitle: Some("We're here to help".to_string()),
                ..Default::default()
            })),
            Component::new(ComponentKind::Description(DescriptionProps {
                text: Some("Start a conversation with our team.".to_string()),
            })),
            Component::new(ComponentKind::ButtonGroup(Default::default())),
        ];
        restamp_orders(&mut config.components);
        config
    }

    /// Position of a top-level component by id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id == id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// True when any component in the document (container children included)
    /// is a button group. Governs suppression of the legacy pair.
    pub fn has_button_group(&self) -> bool {
        fn walk(components: &[Component]) -> bool {
            components.iter().any(|c| {
                matches!(c.kind, ComponentKind::ButtonGroup(_))
                    || c.kind.children().is_some_and(|ch| walk(ch))
            })
        }
        walk(&self.components)
    }
}

/// Re-stamp `order` to the dense ascending sequence `1..=N` matching array
/// position. Called after every structural mutation.
pub fn restamp_orders(components: &mut [Component]) {
    for (i, component) in components.iter_mut().enumerate() {
        component.order = (i + 1) as u32;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    pub style: LayoutStyle,
    pub position: LayoutPosition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_pattern: Option<PatternFill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Overlay>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Popup,
    Card,
    Banner,
    Sidebar,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    Center,
}

/// Translucent layer painted between the background fill and the component
/// stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overlay {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary_color: "#4f46e5".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dismissible: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { dismissible: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starter_config_has_dense_orders() {
        let config = CtaConfig::starter();
        let orders: Vec<u32> = config.components.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn button_group_detection_recurses_into_containers() {
        use crate::components::ContainerProps;

        let mut config = CtaConfig::default();
        assert!(!config.has_button_group());

        let inner = Component::new(ComponentKind::ButtonGroup(Default::default()));
        config.components = vec![Component::new(ComponentKind::Container(ContainerProps {
            children: vec![inner],
            ..Default::default()
        }))];
        assert!(config.has_button_group());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = CtaConfig::starter();
        let json = serde_json::to_string(&config).unwrap();
        let back: CtaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn restamp_produces_one_based_sequence() {
        let mut components = vec![
            Component::new(ComponentKind::Divider(Default::default())),
            Component::new(ComponentKind::Divider(Default::default())),
        ];
        components[0].order = 7;
        components[1].order = 3;
        restamp_orders(&mut components);
        assert_eq!(components[0].order, 1);
        assert_eq!(components[1].order, 2);
    }
}
