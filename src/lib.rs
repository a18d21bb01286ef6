//! # CTA Composer
//!
//! Configuration and visual composition engine for embeddable
//! call-to-action widget screens.
//!
//! An operator assembles typed, styleable components (headers, descriptions,
//! feature lists, forms, badges, dividers, containers, rich text, filtered
//! custom markup, button groups, menus) into a validated configuration
//! document, edits it through a generic property-driven editor, and renders
//! it deterministically as an ordered visual tree.
//!
//! ## Features
//! - Type-safe JSON configuration documents with a closed component set
//! - Validation on every mutation; invalid edits never clobber the live
//!   document
//! - Deep-merge of partial patches and a hand-editable text round-trip
//! - Atomic editor operations with a dense, re-stamped component ordering
//! - Theme defaults composed under per-component style overrides
//! - Minimal allow-list sanitizer for custom markup
//!
//! ## Example
//! ```ignore
//! use cta_composer::{render, Editor};
//!
//! let mut editor = Editor::with_starter();
//! let id = editor.add_component("badge", None)?;
//! editor.update_component_property(&id, "props.text", "New".into())?;
//!
//! let nodes = render(editor.config());
//! ```
//!
//! The engine performs no I/O: the caller supplies the stored document and
//! persists the snapshot returned by [`Editor::config`].

pub mod components;
pub mod document;
pub mod editor;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod sanitize;
pub mod schema;
pub mod style;
pub mod validator;

// --- Core types ---
pub use components::{ButtonAction, ButtonConfig, Component, ComponentKind};
pub use document::{CtaConfig, Layout, LayoutPosition, LayoutStyle, Overlay, Settings, Theme};
pub use editor::{Editor, MoveDirection, PropertyPath};
pub use error::{CtaError, CtaResult};
pub use renderer::RenderNode;
pub use schema::{FieldDef, FieldKind, GroupCategory, PropertyGroup};
pub use style::{ConcreteStyle, Gradient, PatternFill, StyleOverride};

/// Validate a candidate document in its JSON form.
pub fn validate(candidate: &serde_json::Value) -> CtaResult<CtaConfig> {
    validator::validate(candidate)
}

/// Load a stored document, normalizing legacy component orders.
pub fn load(value: &serde_json::Value) -> CtaResult<CtaConfig> {
    validator::load(value)
}

/// Render a validated document to its ordered visual node list.
pub fn render(config: &CtaConfig) -> Vec<RenderNode> {
    renderer::render(config)
}

/// Map a style override record to concrete visual declarations.
pub fn apply_style(style: &StyleOverride) -> ConcreteStyle {
    style::apply_style(style)
}
