//! Deterministic rendering of a validated document into an ordered visual
//! tree. The host UI layer owns the actual markup; nodes carry a tag, a
//! semantic class hook, resolved style declarations, attributes, text, and
//! children, painted bottom to top in list order.

use crate::components::{
    BadgeVariant, ButtonAction, ButtonConfig, ButtonGroupLayout, ButtonGroupProps, Component,
    ComponentKind, MenuProps,
};
use crate::document::{CtaConfig, Layout, LayoutStyle};
use crate::registry;
use crate::sanitize;
use crate::style::{apply_style, pattern_fill, ConcreteStyle};

/// One node of the rendered visual tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub tag: &'static str,
    pub class: &'static str,
    pub style: ConcreteStyle,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn new(tag: &'static str, class: &'static str) -> Self {
        RenderNode {
            tag,
            class,
            style: ConcreteStyle::new(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn style(mut self, style: ConcreteStyle) -> Self {
        self.style = style;
        self
    }

    fn attr(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((key, value.into()));
        self
    }

    fn child(mut self, node: RenderNode) -> Self {
        self.children.push(node);
        self
    }
}

/// Render a document to its ordered node list, painted bottom to top:
/// background fill, overlay, component stack, dismiss control. A disabled
/// document renders nothing.
pub fn render(config: &CtaConfig) -> Vec<RenderNode> {
    if !config.enabled {
        return Vec::new();
    }

    let mut nodes = Vec::new();
    if let Some(backdrop) = background_node(&config.layout) {
        nodes.push(backdrop);
    }
    if let Some(overlay) = overlay_node(&config.layout) {
        nodes.push(overlay);
    }
    nodes.push(stack_node(config));
    if dismiss_visible(config) {
        nodes.push(
            RenderNode::new("button", "cta-dismiss")
                .attr("data-action", "dismiss")
                .text("×"),
        );
    }
    nodes
}

fn dismiss_visible(config: &CtaConfig) -> bool {
    config.settings.dismissible
        && !matches!(config.layout.style, LayoutStyle::Banner | LayoutStyle::Sidebar)
}

/// Bottom-most layer: background image wins over pattern.
fn background_node(layout: &Layout) -> Option<RenderNode> {
    if let Some(ref image) = layout.background_image {
        let mut style = ConcreteStyle::new();
        style.set("background-image", format!("url({})", image));
        style.set("background-size", "cover");
        return Some(RenderNode::new("div", "cta-backdrop").style(style));
    }
    layout
        .background_pattern
        .as_ref()
        .map(|pattern| RenderNode::new("div", "cta-backdrop").style(pattern_fill(pattern)))
}

fn overlay_node(layout: &Layout) -> Option<RenderNode> {
    let overlay = layout.overlay.as_ref().filter(|o| o.enabled)?;
    let mut style = ConcreteStyle::new();
    style.set(
        "background-color",
        overlay.color.clone().unwrap_or_else(|| "#000000".to_string()),
    );
    style.set("opacity", overlay.opacity.unwrap_or(0.5).to_string());
    Some(RenderNode::new("div", "cta-overlay").style(style))
}

/// The foreground component stack, sorted by `order`, with the legacy
/// primary/secondary pair appended only when no button group is present.
fn stack_node(config: &CtaConfig) -> RenderNode {
    let mut style = ConcreteStyle::new();
    style.set("display", "flex");
    style.set("flex-direction", "column");
    style.set("background-color", config.theme.background_color.clone());
    if let Some(width) = config.layout.width {
        style.set("width", format!("{}px", width as i64));
    }
    if let Some(gap) = config.layout.component_gap {
        style.set("gap", format!("{}px", gap as i64));
    }

    let mut node = RenderNode::new("div", "cta-stack").style(style);
    for child in render_components(&config.components, config) {
        node.children.push(child);
    }

    if !config.has_button_group() {
        if let Some(legacy) = legacy_actions_node(config) {
            node.children.push(legacy);
        }
    }
    node
}

/// Render a component list in order. Shared by the top-level stack and by
/// container children.
fn render_components(components: &[Component], config: &CtaConfig) -> Vec<RenderNode> {
    let mut ordered: Vec<&Component> = components.iter().filter(|c| c.visible).collect();
    ordered.sort_by_key(|c| c.order);

    let mut nodes = Vec::new();
    for component in ordered {
        if let Some(node) = render_component(component, config) {
            nodes.push(node);
        }
    }
    nodes
}

/// Dispatch one component. Button groups and menus are special-cased ahead
/// of the registry; an unresolved type warns and renders nothing without
/// aborting its siblings.
pub fn render_component(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    match &component.kind {
        ComponentKind::ButtonGroup(props) => Some(render_button_group(component, props, config)),
        ComponentKind::Menu(props) => render_menu(component, props, config),
        _ => match registry::resolve(component.tag()) {
            Some(entry) => (entry.render)(component, config),
            None => {
                log::warn!("unknown component type '{}', rendering nothing", component.tag());
                None
            }
        },
    }
}

/// Theme defaults layered under the component's own overrides. Override wins.
fn compose(defaults: ConcreteStyle, component: &Component) -> ConcreteStyle {
    let mut style = defaults;
    style.apply(&apply_style(&component.style));
    style
}

pub(crate) fn render_header(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Header(props) = &component.kind else {
        return None;
    };
    let mut defaults = ConcreteStyle::new();
    defaults.set("color", config.theme.text_color.clone());

    let mut node = RenderNode::new("div", "cta-header").style(compose(defaults, component));
    if let Some(ref icon) = props.icon {
        node.children.push(RenderNode::new("span", "cta-header-icon").text(icon.clone()));
    }
    if let Some(ref title) = props.title {
        node.children.push(RenderNode::new("h2", "cta-header-title").text(title.clone()));
    }
    if let Some(ref subtitle) = props.subtitle {
        node.children
            .push(RenderNode::new("p", "cta-header-subtitle").text(subtitle.clone()));
    }
    Some(node)
}

pub(crate) fn render_description(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Description(props) = &component.kind else {
        return None;
    };
    let text = props.text.clone()?;
    let mut defaults = ConcreteStyle::new();
    defaults.set("color", config.theme.text_color.clone());
    Some(
        RenderNode::new("p", "cta-description")
            .style(compose(defaults, component))
            .text(text),
    )
}

pub(crate) fn render_feature_list(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::FeatureList(props) = &component.kind else {
        return None;
    };
    let mut defaults = ConcreteStyle::new();
    defaults.set("color", config.theme.text_color.clone());

    let mut node = RenderNode::new("ul", "cta-features").style(compose(defaults, component));
    for item in &props.items {
        let mut li = RenderNode::new("li", "cta-feature");
        if let Some(ref icon) = item.icon {
            li.children.push(RenderNode::new("span", "cta-feature-icon").text(icon.clone()));
        }
        li.children.push(RenderNode::new("span", "cta-feature-text").text(item.text.clone()));
        node.children.push(li);
    }
    Some(node)
}

pub(crate) fn render_form(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Form(props) = &component.kind else {
        return None;
    };
    let mut node = RenderNode::new("form", "cta-form").style(compose(ConcreteStyle::new(), component));
    for field in &props.fields {
        let mut wrapper = RenderNode::new("label", "cta-form-field");
        if let Some(ref label) = field.label {
            wrapper.children.push(RenderNode::new("span", "cta-form-label").text(label.clone()));
        }
        let mut input = RenderNode::new("input", "cta-form-input")
            .attr("name", field.name.clone())
            .attr(
                "type",
                match field.field_type {
                    crate::components::FormFieldType::Text => "text",
                    crate::components::FormFieldType::Email => "email",
                    crate::components::FormFieldType::Phone => "tel",
                },
            );
        if let Some(ref placeholder) = field.placeholder {
            input.attrs.push(("placeholder", placeholder.clone()));
        }
        if field.required {
            input.attrs.push(("required", "required".to_string()));
        }
        wrapper.children.push(input);
        node.children.push(wrapper);
    }
    let mut submit_style = ConcreteStyle::new();
    submit_style.set("background-color", config.theme.primary_color.clone());
    submit_style.set("color", "#ffffff");
    node.children.push(
        RenderNode::new("button", "cta-form-submit")
            .attr("type", "submit")
            .style(submit_style)
            .text(props.submit_label.clone().unwrap_or_else(|| "Submit".to_string())),
    );
    Some(node)
}

fn badge_color(variant: BadgeVariant, config: &CtaConfig) -> String {
    match variant {
        BadgeVariant::Default => "#6b7280".to_string(),
        BadgeVariant::Primary => config.theme.primary_color.clone(),
        BadgeVariant::Success => "#16a34a".to_string(),
        BadgeVariant::Warning => "#d97706".to_string(),
        BadgeVariant::Danger => "#dc2626".to_string(),
    }
}

pub(crate) fn render_badge(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Badge(props) = &component.kind else {
        return None;
    };
    let text = props.text.clone()?;
    let mut defaults = ConcreteStyle::new();
    defaults.set("background-color", badge_color(props.variant, config));
    defaults.set("color", "#ffffff");
    defaults.set("border-radius", "9999px");
    Some(
        RenderNode::new("span", "cta-badge")
            .style(compose(defaults, component))
            .text(text),
    )
}

pub(crate) fn render_divider(component: &Component, _config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Divider(props) = &component.kind else {
        return None;
    };
    let mut defaults = ConcreteStyle::new();
    defaults.set("height", format!("{}px", props.thickness.unwrap_or(1.0) as i64));
    defaults.set(
        "background-color",
        props.color.clone().unwrap_or_else(|| "#e5e7eb".to_string()),
    );
    Some(RenderNode::new("hr", "cta-divider").style(compose(defaults, component)))
}

pub(crate) fn render_container(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Container(props) = &component.kind else {
        return None;
    };
    let mut defaults = ConcreteStyle::new();
    defaults.set("display", "flex");
    defaults.set(
        "flex-direction",
        props.direction.clone().unwrap_or_else(|| "column".to_string()),
    );
    if let Some(gap) = props.gap {
        defaults.set("gap", format!("{}px", gap as i64));
    }
    let mut node = RenderNode::new("div", "cta-container").style(compose(defaults, component));
    node.children = render_components(&props.children, config);
    Some(node)
}

pub(crate) fn render_richtext(component: &Component, config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::Richtext(props) = &component.kind else {
        return None;
    };
    let content = props.content.as_deref()?;
    let sanitized = sanitize::sanitize_inline(content);
    if sanitized.is_empty() {
        return None;
    }
    let mut defaults = ConcreteStyle::new();
    defaults.set("color", config.theme.text_color.clone());
    Some(
        RenderNode::new("div", "cta-richtext")
            .style(compose(defaults, component))
            .attr("data-markup", "inline")
            .text(sanitized),
    )
}

pub(crate) fn render_custom_html(component: &Component, _config: &CtaConfig) -> Option<RenderNode> {
    let ComponentKind::CustomHtml(props) = &component.kind else {
        return None;
    };
    let html = props.html.as_deref()?;
    let sanitized = sanitize::sanitize_html(html);
    if sanitized.is_empty() {
        return None;
    }
    Some(
        RenderNode::new("div", "cta-custom")
            .style(compose(ConcreteStyle::new(), component))
            .attr("data-markup", "filtered")
            .text(sanitized),
    )
}

/// Primary styling for the first button, secondary for the rest.
fn render_button_group(
    component: &Component,
    props: &ButtonGroupProps,
    config: &CtaConfig,
) -> RenderNode {
    let mut defaults = ConcreteStyle::new();
    defaults.set("display", "flex");
    defaults.set(
        "flex-direction",
        match props.layout {
            Some(ButtonGroupLayout::Vertical) => "column",
            _ => "row",
        },
    );
    defaults.set("gap", "8px");

    let mut node = RenderNode::new("div", "cta-button-group").style(compose(defaults, component));
    for (i, button) in props.buttons.iter().enumerate() {
        node.children.push(render_button(button, i == 0, config));
    }
    node
}

fn render_button(button: &ButtonConfig, primary: bool, config: &CtaConfig) -> RenderNode {
    let mut defaults = ConcreteStyle::new();
    if primary {
        defaults.set("background-color", config.theme.primary_color.clone());
        defaults.set("color", "#ffffff");
    } else {
        defaults.set("background-color", "transparent");
        defaults.set("color", config.theme.primary_color.clone());
        defaults.set("border-color", config.theme.primary_color.clone());
        defaults.set("border-width", "1px");
    }
    defaults.apply(&apply_style(&button.style));

    let label = button.label.clone().unwrap_or_default();
    let class = if primary { "cta-button-primary" } else { "cta-button-secondary" };
    match button.action {
        ButtonAction::Link => RenderNode::new("a", class)
            .style(defaults)
            .attr("href", button.url.clone().unwrap_or_else(|| "#".to_string()))
            .text(label),
        ButtonAction::Message => {
            let mut node = RenderNode::new("button", class)
                .style(defaults)
                .attr("data-action", "message")
                .text(label);
            if let Some(ref message) = button.message {
                node.attrs.push(("data-message", message.clone()));
            }
            node
        }
        ButtonAction::Close => RenderNode::new("button", class)
            .style(defaults)
            .attr("data-action", "close")
            .text(label),
    }
}

fn render_menu(component: &Component, props: &MenuProps, config: &CtaConfig) -> Option<RenderNode> {
    if props.items.is_empty() {
        return None;
    }
    let mut node = RenderNode::new("ul", "cta-menu").style(compose(ConcreteStyle::new(), component));
    for item in &props.items {
        let label = item.label.clone().unwrap_or_default();
        let entry = match item.action {
            ButtonAction::Link => RenderNode::new("a", "cta-menu-link")
                .attr("href", item.url.clone().unwrap_or_else(|| "#".to_string()))
                .text(label),
            ButtonAction::Message => RenderNode::new("button", "cta-menu-item")
                .attr("data-action", "message")
                .text(label),
            ButtonAction::Close => RenderNode::new("button", "cta-menu-item")
                .attr("data-action", "close")
                .text(label),
        };
        let mut style = ConcreteStyle::new();
        style.set("color", config.theme.text_color.clone());
        node.children.push(RenderNode::new("li", "cta-menu-entry").style(style).child(entry));
    }
    Some(node)
}

/// Back-compat: top-level primary/secondary pair, rendered only when no
/// button group component exists anywhere in the document.
fn legacy_actions_node(config: &CtaConfig) -> Option<RenderNode> {
    if config.primary_button.is_none() && config.secondary_button.is_none() {
        return None;
    }
    let mut style = ConcreteStyle::new();
    style.set("display", "flex");
    style.set("flex-direction", "row");
    style.set("gap", "8px");

    let mut node = RenderNode::new("div", "cta-actions").style(style);
    if let Some(ref primary) = config.primary_button {
        node.children.push(render_button(primary, true, config));
    }
    if let Some(ref secondary) = config.secondary_button {
        node.children.push(render_button(secondary, false, config));
    }
    Some(node)
}
