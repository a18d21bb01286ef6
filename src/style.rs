use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-component style override record.
///
/// Every field is optional: an absent field means "inherit the theme or
/// platform default", never "zero". The record is a flat bag — nesting and
/// cascade are the renderer's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverride {
    // Color properties (passed through verbatim)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,

    // Spacing properties (rendered in pixel units)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,

    // Dimension properties (pixel units)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    // Border properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,

    // Typography: numeric fields in pixels, keyword fields verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,

    // Flex properties (verbatim)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    // Synthesized fill: built from both colors, never stored concrete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
}

impl StyleOverride {
    pub fn is_empty(&self) -> bool {
        *self == StyleOverride::default()
    }
}

/// Gradient fill description. The concrete fill string is synthesized by
/// [`apply_style`] and is omitted unless both colors are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gradient {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_color: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Background pattern fill, chosen from a fixed catalog and parameterized
/// by a single color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFill {
    pub kind: PatternKind,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Dots,
    Grid,
    Waves,
    Stripes,
}

/// A resolved, ordered list of concrete visual declarations.
///
/// Modeled as (css-property, value) pairs so the hosting layer can emit them
/// as inline style text or feed them to its own style system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcreteStyle {
    declarations: Vec<(&'static str, String)>,
}

impl ConcreteStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, replacing any earlier value for the same property.
    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.declarations.iter_mut().find(|(p, _)| *p == property) {
            slot.1 = value;
        } else {
            self.declarations.push((property, value));
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, String)> + '_ {
        self.declarations.iter()
    }

    /// Layer `other` on top of this style. Later values win per property.
    pub fn apply(&mut self, other: &ConcreteStyle) {
        for (prop, value) in &other.declarations {
            self.set(prop, value.clone());
        }
    }
}

impl fmt::Display for ConcreteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (prop, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", prop, value)?;
        }
        Ok(())
    }
}

fn px(value: f64) -> String {
    // Whole numbers render without a trailing ".0"
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{}px", value)
    }
}

/// Map a style override record to concrete visual declarations.
///
/// Pure function: empty input yields an empty output, absent fields emit
/// nothing, and nothing here can fail.
pub fn apply_style(style: &StyleOverride) -> ConcreteStyle {
    let mut out = ConcreteStyle::new();

    if let Some(ref v) = style.background_color {
        out.set("background-color", v.clone());
    }
    if let Some(ref v) = style.text_color {
        out.set("color", v.clone());
    }
    if let Some(ref v) = style.border_color {
        out.set("border-color", v.clone());
    }

    if let Some(v) = style.padding {
        out.set("padding", px(v));
    }
    if let Some(v) = style.padding_top {
        out.set("padding-top", px(v));
    }
    if let Some(v) = style.padding_bottom {
        out.set("padding-bottom", px(v));
    }
    if let Some(v) = style.padding_left {
        out.set("padding-left", px(v));
    }
    if let Some(v) = style.padding_right {
        out.set("padding-right", px(v));
    }
    if let Some(v) = style.margin {
        out.set("margin", px(v));
    }
    if let Some(v) = style.margin_top {
        out.set("margin-top", px(v));
    }
    if let Some(v) = style.margin_bottom {
        out.set("margin-bottom", px(v));
    }
    if let Some(v) = style.gap {
        out.set("gap", px(v));
    }

    if let Some(v) = style.width {
        out.set("width", px(v));
    }
    if let Some(v) = style.height {
        out.set("height", px(v));
    }

    if let Some(v) = style.border_width {
        out.set("border-width", px(v));
    }
    if let Some(v) = style.border_radius {
        out.set("border-radius", px(v));
    }

    if let Some(v) = style.font_size {
        out.set("font-size", px(v));
    }
    if let Some(ref v) = style.font_weight {
        out.set("font-weight", v.clone());
    }
    if let Some(ref v) = style.text_align {
        out.set("text-align", v.clone());
    }
    if let Some(v) = style.line_height {
        out.set("line-height", px(v));
    }
    if let Some(v) = style.letter_spacing {
        out.set("letter-spacing", px(v));
    }

    if let Some(ref v) = style.flex_direction {
        out.set("flex-direction", v.clone());
    }
    if let Some(ref v) = style.align_items {
        out.set("align-items", v.clone());
    }
    if let Some(ref v) = style.justify_content {
        out.set("justify-content", v.clone());
    }

    if let Some(v) = style.opacity {
        out.set("opacity", v.to_string());
    }

    if let Some(ref gradient) = style.gradient {
        if let Some(fill) = gradient_fill(gradient) {
            out.set("background-image", fill);
        }
    }

    out
}

/// Synthesize a gradient fill string. Returns `None` unless both colors are
/// present; a missing angle defaults to 90 degrees.
pub fn gradient_fill(gradient: &Gradient) -> Option<String> {
    let start = gradient.start_color.as_deref()?;
    let end = gradient.end_color.as_deref()?;
    match gradient.kind {
        GradientKind::Linear => {
            let angle = gradient.angle.unwrap_or(90.0);
            let angle = if angle.fract() == 0.0 {
                format!("{}", angle as i64)
            } else {
                format!("{}", angle)
            };
            Some(format!("linear-gradient({}deg, {}, {})", angle, start, end))
        }
        GradientKind::Radial => Some(format!("radial-gradient(circle, {}, {})", start, end)),
    }
}

/// Synthesize a background pattern fill from the fixed catalog.
pub fn pattern_fill(pattern: &PatternFill) -> ConcreteStyle {
    let c = pattern.color.as_str();
    let mut out = ConcreteStyle::new();
    match pattern.kind {
        PatternKind::Dots => {
            out.set(
                "background-image",
                format!("radial-gradient(circle, {} 1px, transparent 1px)", c),
            );
            out.set("background-size", "16px 16px");
        }
        PatternKind::Grid => {
            out.set(
                "background-image",
                format!(
                    "linear-gradient({c} 1px, transparent 1px), linear-gradient(90deg, {c} 1px, transparent 1px)",
                    c = c
                ),
            );
            out.set("background-size", "24px 24px");
        }
        PatternKind::Waves => {
            out.set(
                "background-image",
                format!(
                    "repeating-radial-gradient(circle at 0 0, {c} 0, {c} 1px, transparent 1px, transparent 16px)",
                    c = c
                ),
            );
            out.set("background-size", "32px 16px");
        }
        PatternKind::Stripes => {
            out.set(
                "background-image",
                format!(
                    "repeating-linear-gradient(45deg, {c} 0, {c} 2px, transparent 2px, transparent 12px)",
                    c = c
                ),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_style_maps_to_empty() {
        let out = apply_style(&StyleOverride::default());
        assert!(out.is_empty());
    }

    #[test]
    fn pixel_units_and_verbatim_colors() {
        let style = StyleOverride {
            background_color: Some("#fff".to_string()),
            padding: Some(10.0),
            ..Default::default()
        };
        let out = apply_style(&style);
        assert_eq!(out.get("background-color"), Some("#fff"));
        assert_eq!(out.get("padding"), Some("10px"));
    }

    #[test]
    fn fractional_pixels_keep_fraction() {
        let style = StyleOverride {
            letter_spacing: Some(0.5),
            ..Default::default()
        };
        let out = apply_style(&style);
        assert_eq!(out.get("letter-spacing"), Some("0.5px"));
    }

    #[test]
    fn gradient_requires_both_colors() {
        let gradient = Gradient {
            start_color: Some("#000".to_string()),
            ..Default::default()
        };
        assert_eq!(gradient_fill(&gradient), None);

        let gradient = Gradient {
            start_color: Some("#000".to_string()),
            end_color: Some("#fff".to_string()),
            ..Default::default()
        };
        assert_eq!(
            gradient_fill(&gradient),
            Some("linear-gradient(90deg, #000, #fff)".to_string())
        );
    }

    #[test]
    fn radial_gradient_ignores_angle() {
        let gradient = Gradient {
            kind: GradientKind::Radial,
            angle: Some(45.0),
            start_color: Some("#000".to_string()),
            end_color: Some("#fff".to_string()),
        };
        assert_eq!(
            gradient_fill(&gradient),
            Some("radial-gradient(circle, #000, #fff)".to_string())
        );
    }

    #[test]
    fn pattern_catalog_is_parameterized_by_color() {
        let fill = pattern_fill(&PatternFill {
            kind: PatternKind::Dots,
            color: "#e5e7eb".to_string(),
        });
        assert!(fill.get("background-image").unwrap().contains("#e5e7eb"));
        assert_eq!(fill.get("background-size"), Some("16px 16px"));
    }

    #[test]
    fn set_replaces_existing_declaration() {
        let mut style = ConcreteStyle::new();
        style.set("color", "#000");
        style.set("color", "#fff");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("color"), Some("#fff"));
    }

    #[test]
    fn display_renders_css_text() {
        let mut style = ConcreteStyle::new();
        style.set("color", "#fff");
        style.set("padding", "8px");
        assert_eq!(style.to_string(), "color: #fff; padding: 8px;");
    }
}
