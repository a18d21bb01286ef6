//! The editor state machine: holds the authoritative in-memory document plus
//! UI-only state (selection, expanded groups, validation errors) and exposes
//! atomic mutation operations.
//!
//! Every operation is read-modify-validate-write in one step: a candidate is
//! built by cloning, validated whole, and only then committed. On validation
//! failure the previously valid document stays live for rendering while the
//! user's draft and a structured error are preserved — edits are never
//! silently discarded. Copy-on-write everywhere means a caller may keep an
//! earlier snapshot (live preview, raw-JSON view) while a new one is built.

use crate::components::{mint_id, Component, ComponentKind};
use crate::document::{restamp_orders, CtaConfig};
use crate::error::{CtaError, CtaResult};
use crate::schema::GroupCategory;
use crate::validator;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Error-map key for failures that concern the whole document rather than a
/// single field path.
const DOCUMENT_ERROR_KEY: &str = "document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One segment of a dotted property path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// An ordered list of key segments, parsed from a dotted string
/// (`"style.textColor"`, `"props.buttons.0.label"`). Numeric segments
/// address array positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    pub fn parse(path: &str) -> CtaResult<Self> {
        if path.is_empty() {
            return Err(CtaError::InvalidPath {
                path: path.to_string(),
                reason: "path is empty".to_string(),
            });
        }
        let mut segments = Vec::new();
        for part in path.split('.') {
            if part.is_empty() {
                return Err(CtaError::InvalidPath {
                    path: path.to_string(),
                    reason: "empty segment".to_string(),
                });
            }
            match part.parse::<usize>() {
                Ok(index) => segments.push(PathSegment::Index(index)),
                Err(_) => segments.push(PathSegment::Key(part.to_string())),
            }
        }
        Ok(PropertyPath {
            raw: path.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

/// Shape a not-yet-traversable slot for the segment that follows: arrays
/// ahead of index segments, records ahead of key segments.
fn prepare_slot(slot: &mut Value, next: &PathSegment) {
    match next {
        PathSegment::Index(_) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
        }
        PathSegment::Key(_) => {
            if !slot.is_object() {
                *slot = Value::Object(serde_json::Map::new());
            }
        }
    }
}

/// Set `value` at `path` inside a JSON value, creating intermediate records
/// along the way. Records are created for missing keys; array indices must
/// be in bounds or append at the tail.
pub fn set_at_path(target: &mut Value, path: &PropertyPath, value: Value) -> CtaResult<()> {
    let segments = path.segments();
    let mut current = target;

    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        match segment {
            PathSegment::Key(key) => {
                if !current.is_object() {
                    *current = Value::Object(serde_json::Map::new());
                }
                let Value::Object(map) = current else {
                    return Err(CtaError::InvalidPath {
                        path: path.raw.clone(),
                        reason: format!("segment {} is not a record", i),
                    });
                };
                if last {
                    map.insert(key.clone(), value);
                    return Ok(());
                }
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                prepare_slot(slot, &segments[i + 1]);
                current = slot;
            }
            PathSegment::Index(index) => {
                let Value::Array(arr) = current else {
                    return Err(CtaError::InvalidPath {
                        path: path.raw.clone(),
                        reason: format!("segment {} indexes into a non-array", i),
                    });
                };
                if *index > arr.len() {
                    return Err(CtaError::InvalidPath {
                        path: path.raw.clone(),
                        reason: format!("index {} out of bounds (len {})", index, arr.len()),
                    });
                }
                if *index == arr.len() {
                    arr.push(Value::Null);
                }
                if last {
                    arr[*index] = value;
                    return Ok(());
                }
                let slot = &mut arr[*index];
                prepare_slot(slot, &segments[i + 1]);
                current = slot;
            }
        }
    }
    Ok(())
}

/// The editor. Selection state is either no-selection or
/// component-selected(id); everything else is per-operation.
#[derive(Debug, Clone)]
pub struct Editor {
    config: CtaConfig,
    selected: Option<String>,
    expanded_groups: HashSet<GroupCategory>,
    errors: HashMap<String, String>,
    draft: Option<String>,
}

impl Editor {
    /// Start from an already-validated document.
    pub fn new(config: CtaConfig) -> CtaResult<Self> {
        validator::validate_config(&config)?;
        Ok(Editor {
            config,
            selected: None,
            expanded_groups: HashSet::new(),
            errors: HashMap::new(),
            draft: None,
        })
    }

    /// Start from the built-in starter document.
    pub fn with_starter() -> Self {
        Editor {
            config: CtaConfig::starter(),
            selected: None,
            expanded_groups: HashSet::new(),
            errors: HashMap::new(),
            draft: None,
        }
    }

    /// The current validated document snapshot — what the renderer consumes
    /// and what the caller persists.
    pub fn config(&self) -> &CtaConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Validation errors keyed by field path (or `"document"`).
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The user's last invalid hand-edited text, preserved for correction.
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Transition between no-selection and component-selected(id). Selecting
    /// an id not present in the document is ignored.
    pub fn select_component(&mut self, id: Option<&str>) {
        match id {
            None => self.selected = None,
            Some(id) => {
                if self.config.position_of(id).is_some() {
                    self.selected = Some(id.to_string());
                }
            }
        }
    }

    pub fn expand_group(&mut self, category: GroupCategory) {
        self.expanded_groups.insert(category);
    }

    pub fn collapse_group(&mut self, category: GroupCategory) {
        self.expanded_groups.remove(&category);
    }

    pub fn is_group_expanded(&self, category: GroupCategory) -> bool {
        self.expanded_groups.contains(&category)
    }

    /// Add a component of `tag` with a fresh id, default props and
    /// `visible = true`, inserted after `after` if given, else appended.
    /// The new component becomes selected. Returns its id.
    pub fn add_component(&mut self, tag: &str, after: Option<&str>) -> CtaResult<String> {
        let kind = ComponentKind::default_for_tag(tag).ok_or_else(|| {
            CtaError::UnknownComponentType {
                tag: tag.to_string(),
            }
        })?;
        let component = Component::new(kind);
        let id = component.id.clone();

        let mut candidate = self.config.clone();
        let position = match after {
            Some(after_id) => {
                candidate
                    .position_of(after_id)
                    .ok_or_else(|| CtaError::ComponentNotFound {
                        id: after_id.to_string(),
                    })?
                    + 1
            }
            None => candidate.components.len(),
        };
        candidate.components.insert(position, component);
        restamp_orders(&mut candidate.components);

        self.try_commit(candidate, DOCUMENT_ERROR_KEY)?;
        self.selected = Some(id.clone());
        Ok(id)
    }

    /// Remove a component and re-stamp orders. If the removed component was
    /// selected, selection falls back to the new first component, or to
    /// no-selection when the document is empty.
    pub fn remove_component(&mut self, id: &str) -> CtaResult<()> {
        let mut candidate = self.config.clone();
        let position = candidate
            .position_of(id)
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;
        candidate.components.remove(position);
        restamp_orders(&mut candidate.components);

        let was_selected = self.selected.as_deref() == Some(id);
        self.try_commit(candidate, DOCUMENT_ERROR_KEY)?;
        if was_selected {
            self.selected = self.config.components.first().map(|c| c.id.clone());
        }
        Ok(())
    }

    /// Deep-clone a component's props and style under a fresh id (container
    /// children also get fresh ids), insert immediately after the source,
    /// re-stamp, and select the duplicate. Returns the new id.
    pub fn duplicate_component(&mut self, id: &str) -> CtaResult<String> {
        let mut candidate = self.config.clone();
        let position = candidate
            .position_of(id)
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;

        let mut duplicate = candidate.components[position].clone();
        refresh_ids(&mut duplicate);
        let new_id = duplicate.id.clone();

        candidate.components.insert(position + 1, duplicate);
        restamp_orders(&mut candidate.components);

        self.try_commit(candidate, DOCUMENT_ERROR_KEY)?;
        self.selected = Some(new_id.clone());
        Ok(new_id)
    }

    /// Swap a component with its immediate neighbor. A no-op at either
    /// boundary: the document is left unchanged.
    pub fn move_component(&mut self, id: &str, direction: MoveDirection) -> CtaResult<()> {
        let mut candidate = self.config.clone();
        let position = candidate
            .position_of(id)
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;

        let target = match direction {
            MoveDirection::Up => {
                if position == 0 {
                    return Ok(());
                }
                position - 1
            }
            MoveDirection::Down => {
                if position + 1 >= candidate.components.len() {
                    return Ok(());
                }
                position + 1
            }
        };
        candidate.components.swap(position, target);
        restamp_orders(&mut candidate.components);
        self.try_commit(candidate, DOCUMENT_ERROR_KEY)
    }

    /// Flip `visible` only. Order and selection are untouched.
    pub fn toggle_component_visibility(&mut self, id: &str) -> CtaResult<()> {
        let mut candidate = self.config.clone();
        let position = candidate
            .position_of(id)
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;
        candidate.components[position].visible = !candidate.components[position].visible;
        self.try_commit(candidate, DOCUMENT_ERROR_KEY)
    }

    /// Set one property by dotted path (`"props.title"`,
    /// `"style.textColor"`), creating intermediate records copy-on-write,
    /// then re-validate the whole document. A failed validation records the
    /// error under the path and leaves the live document unchanged.
    pub fn update_component_property(
        &mut self,
        id: &str,
        path: &str,
        value: Value,
    ) -> CtaResult<()> {
        let position = self
            .config
            .position_of(id)
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;
        let parsed = PropertyPath::parse(path)?;

        let mut doc = serde_json::to_value(&self.config)
            .map_err(|e| CtaError::Serialization(e.to_string()))?;
        let component = doc
            .get_mut("components")
            .and_then(|c| c.get_mut(position))
            .ok_or_else(|| CtaError::ComponentNotFound { id: id.to_string() })?;
        set_at_path(component, &parsed, value)?;

        match validator::validate(&doc) {
            Ok(config) => {
                self.config = config;
                self.errors.clear();
                self.draft = None;
                Ok(())
            }
            Err(err) => {
                self.errors.insert(path.to_string(), err.to_string());
                Err(err)
            }
        }
    }

    /// Wholesale replace, for document-level edits such as background or
    /// component gap.
    pub fn update_config(&mut self, config: CtaConfig) -> CtaResult<()> {
        self.try_commit(config, DOCUMENT_ERROR_KEY)?;
        if let Some(selected) = self.selected.clone() {
            if self.config.position_of(&selected).is_none() {
                self.selected = None;
            }
        }
        Ok(())
    }

    /// Touching the overlay opacity control implies `overlay.enabled = true`,
    /// even without an explicit toggle.
    pub fn touch_overlay_opacity(&mut self, opacity: f64) -> CtaResult<()> {
        let mut candidate = self.config.clone();
        let overlay = candidate.layout.overlay.get_or_insert_with(Default::default);
        overlay.opacity = Some(opacity);
        overlay.enabled = true;
        self.try_commit(candidate, "layout.overlay.opacity")
    }

    /// Serialize the current document for the raw-text editing surface.
    pub fn to_text(&self) -> CtaResult<String> {
        serde_json::to_string_pretty(&self.config)
            .map_err(|e| CtaError::Serialization(e.to_string()))
    }

    /// Apply hand-edited text by deep-merging it into the last known-good
    /// document — never a blind replace. Malformed or invalid text leaves
    /// the live document untouched and preserves the draft for correction.
    pub fn apply_text(&mut self, text: &str) -> CtaResult<()> {
        let patch: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                let err = CtaError::MalformedJson(e.to_string());
                self.errors
                    .insert(DOCUMENT_ERROR_KEY.to_string(), err.to_string());
                self.draft = Some(text.to_string());
                return Err(err);
            }
        };

        let base = serde_json::to_value(&self.config)
            .map_err(|e| CtaError::Serialization(e.to_string()))?;
        let merged = validator::deep_merge(&base, &patch);

        match validator::validate(&merged) {
            Ok(config) => {
                self.config = config;
                self.errors.clear();
                self.draft = None;
                Ok(())
            }
            Err(err) => {
                self.errors
                    .insert(DOCUMENT_ERROR_KEY.to_string(), err.to_string());
                self.draft = Some(text.to_string());
                Err(err)
            }
        }
    }

    /// Validate and commit a candidate document. On failure the error is
    /// recorded under `error_key` and the live document stays as it was.
    fn try_commit(&mut self, candidate: CtaConfig, error_key: &str) -> CtaResult<()> {
        match validator::validate_config(&candidate) {
            Ok(()) => {
                self.config = candidate;
                self.errors.clear();
                self.draft = None;
                Ok(())
            }
            Err(err) => {
                self.errors.insert(error_key.to_string(), err.to_string());
                Err(err)
            }
        }
    }
}

/// Mint fresh ids for a component and all of its nested children. Ids are
/// never reused or copied from a source.
fn refresh_ids(component: &mut Component) {
    component.id = mint_id();
    if let Some(children) = component.kind.children_mut() {
        for child in children {
            refresh_ids(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ContainerProps;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn orders(editor: &Editor) -> Vec<u32> {
        editor.config().components.iter().map(|c| c.order).collect()
    }

    #[test]
    fn add_appends_selects_and_restamps() {
        let mut editor = Editor::with_starter();
        let id = editor.add_component("badge", None).unwrap();
        assert_eq!(editor.selected(), Some(id.as_str()));
        assert_eq!(orders(&editor), vec![1, 2, 3, 4]);
        assert_eq!(editor.config().components.last().unwrap().id, id);
    }

    #[test]
    fn add_after_inserts_in_place() {
        let mut editor = Editor::with_starter();
        let first = editor.config().components[0].id.clone();
        let id = editor.add_component("divider", Some(&first)).unwrap();
        assert_eq!(editor.config().components[1].id, id);
        assert_eq!(orders(&editor), vec![1, 2, 3, 4]);
    }

    #[test]
    fn add_unknown_tag_fails() {
        let mut editor = Editor::with_starter();
        let err = editor.add_component("marquee", None).unwrap_err();
        assert!(matches!(err, CtaError::UnknownComponentType { .. }));
    }

    #[test]
    fn remove_falls_back_selection_to_first() {
        let mut editor = Editor::with_starter();
        let first = editor.config().components[0].id.clone();
        let second = editor.config().components[1].id.clone();
        editor.select_component(Some(&first));
        editor.remove_component(&first).unwrap();
        assert_eq!(editor.selected(), Some(second.as_str()));
        assert_eq!(orders(&editor), vec![1, 2]);
    }

    #[test]
    fn remove_last_component_clears_selection() {
        let mut editor = Editor::with_starter();
        let ids: Vec<String> = editor.config().components.iter().map(|c| c.id.clone()).collect();
        editor.select_component(Some(&ids[2]));
        for id in &ids {
            editor.remove_component(id).unwrap();
        }
        assert_eq!(editor.selected(), None);
        assert!(editor.config().components.is_empty());
    }

    #[test]
    fn duplicate_mints_fresh_id_and_deep_clones() {
        let mut editor = Editor::with_starter();
        let source = editor.config().components[0].id.clone();
        editor
            .update_component_property(&source, "props.title", json!("Original"))
            .unwrap();

        let duplicate = editor.duplicate_component(&source).unwrap();
        assert_ne!(duplicate, source);
        assert_eq!(editor.selected(), Some(duplicate.as_str()));
        assert_eq!(orders(&editor), vec![1, 2, 3, 4]);

        let src = editor.config().component(&source).unwrap();
        let dup = editor.config().component(&duplicate).unwrap();
        assert_eq!(editor.config().position_of(&duplicate).unwrap(), 1);
        assert_eq!(src.kind, dup.kind);
        assert_eq!(src.style, dup.style);

        let all_ids: Vec<&str> = editor.config().components.iter().map(|c| c.id.as_str()).collect();
        let unique: std::collections::HashSet<&str> = all_ids.iter().copied().collect();
        assert_eq!(unique.len(), all_ids.len());
    }

    #[test]
    fn duplicate_refreshes_nested_container_ids() {
        let mut editor = Editor::with_starter();
        let inner = Component::new(ComponentKind::Divider(Default::default()));
        let inner_id = inner.id.clone();
        let mut config = editor.config().clone();
        config.components.push(Component::new(ComponentKind::Container(ContainerProps {
            children: vec![inner],
            ..Default::default()
        })));
        restamp_orders(&mut config.components);
        let container_id = config.components.last().unwrap().id.clone();
        editor.update_config(config).unwrap();

        let duplicate = editor.duplicate_component(&container_id).unwrap();
        let dup = editor.config().component(&duplicate).unwrap();
        let dup_child = &dup.kind.children().unwrap()[0];
        assert_ne!(dup_child.id, inner_id);
    }

    #[test]
    fn move_at_boundaries_is_a_no_op() {
        let mut editor = Editor::with_starter();
        let before = editor.config().clone();
        let first = before.components[0].id.clone();
        let last = before.components.last().unwrap().id.clone();

        editor.move_component(&first, MoveDirection::Up).unwrap();
        assert_eq!(editor.config(), &before);
        editor.move_component(&last, MoveDirection::Down).unwrap();
        assert_eq!(editor.config(), &before);
    }

    #[test]
    fn move_swaps_neighbors_and_restamps() {
        let mut editor = Editor::with_starter();
        let second = editor.config().components[1].id.clone();
        editor.move_component(&second, MoveDirection::Up).unwrap();
        assert_eq!(editor.config().components[0].id, second);
        assert_eq!(orders(&editor), vec![1, 2, 3]);
    }

    #[test]
    fn orders_stay_dense_across_interleaved_mutations() {
        let mut editor = Editor::with_starter();
        let a = editor.add_component("badge", None).unwrap();
        let b = editor.duplicate_component(&a).unwrap();
        editor.move_component(&b, MoveDirection::Up).unwrap();
        editor.remove_component(&a).unwrap();
        editor.add_component("divider", Some(&b)).unwrap();
        editor.move_component(&b, MoveDirection::Down).unwrap();
        editor.remove_component(&b).unwrap();

        let expected: Vec<u32> = (1..=editor.config().components.len() as u32).collect();
        assert_eq!(orders(&editor), expected);
    }

    #[test]
    fn toggle_visibility_leaves_order_and_selection() {
        let mut editor = Editor::with_starter();
        let first = editor.config().components[0].id.clone();
        let second = editor.config().components[1].id.clone();
        editor.select_component(Some(&second));

        editor.toggle_component_visibility(&first).unwrap();
        assert!(!editor.config().components[0].visible);
        assert_eq!(editor.selected(), Some(second.as_str()));
        assert_eq!(orders(&editor), vec![1, 2, 3]);

        editor.toggle_component_visibility(&first).unwrap();
        assert!(editor.config().components[0].visible);
    }

    #[test]
    fn update_property_creates_intermediate_records() {
        let mut editor = Editor::with_starter();
        let id = editor.config().components[0].id.clone();
        editor
            .update_component_property(&id, "style.textColor", json!("#123456"))
            .unwrap();
        let component = editor.config().component(&id).unwrap();
        assert_eq!(component.style.text_color.as_deref(), Some("#123456"));
    }

    #[test]
    fn update_property_with_array_index() {
        let mut editor = Editor::with_starter();
        let id = editor.add_component("feature_list", None).unwrap();
        editor
            .update_component_property(&id, "props.items.0.text", json!("Fast setup"))
            .unwrap();
        let component = editor.config().component(&id).unwrap();
        let ComponentKind::FeatureList(props) = &component.kind else {
            panic!("expected feature list");
        };
        assert_eq!(props.items[0].text, "Fast setup");
    }

    #[test]
    fn invalid_property_value_keeps_live_document() {
        let mut editor = Editor::with_starter();
        let id = editor.config().components[0].id.clone();
        let before = editor.config().clone();

        let err = editor
            .update_component_property(&id, "order", json!("not-a-number"))
            .unwrap_err();
        assert!(matches!(err, CtaError::Deserialization(_)));
        assert_eq!(editor.config(), &before);
        assert!(editor.errors().contains_key("order"));
    }

    #[test]
    fn touch_overlay_opacity_auto_enables() {
        let mut editor = Editor::with_starter();
        assert!(editor.config().layout.overlay.is_none());
        editor.touch_overlay_opacity(0.35).unwrap();
        let overlay = editor.config().layout.overlay.as_ref().unwrap();
        assert!(overlay.enabled);
        assert_eq!(overlay.opacity, Some(0.35));
    }

    #[test]
    fn apply_text_deep_merges_into_last_good() {
        let mut editor = Editor::with_starter();
        editor.apply_text(r##"{"theme": {"primaryColor": "#000000"}}"##).unwrap();
        assert_eq!(editor.config().theme.primary_color, "#000000");
        // Untouched theme fields survive the merge
        assert_eq!(editor.config().theme.background_color, "#ffffff");
    }

    #[test]
    fn malformed_text_preserves_document_and_draft() {
        let mut editor = Editor::with_starter();
        let before = editor.config().clone();

        let err = editor.apply_text("{not json").unwrap_err();
        assert!(matches!(err, CtaError::MalformedJson(_)));
        assert_eq!(editor.config(), &before);
        assert_eq!(editor.draft(), Some("{not json"));
        assert!(editor.errors().contains_key("document"));

        // A corrected apply clears the draft and the errors
        editor.apply_text(r#"{"enabled": false}"#).unwrap();
        assert!(!editor.config().enabled);
        assert_eq!(editor.draft(), None);
        assert!(editor.errors().is_empty());
    }

    #[test]
    fn group_expansion_is_ui_only() {
        let mut editor = Editor::with_starter();
        assert!(!editor.is_group_expanded(GroupCategory::Appearance));
        editor.expand_group(GroupCategory::Appearance);
        assert!(editor.is_group_expanded(GroupCategory::Appearance));
        editor.collapse_group(GroupCategory::Appearance);
        assert!(!editor.is_group_expanded(GroupCategory::Appearance));
    }

    #[test]
    fn path_parsing_rejects_empty_segments() {
        assert!(PropertyPath::parse("").is_err());
        assert!(PropertyPath::parse("props..title").is_err());
        let path = PropertyPath::parse("props.items.2.text").unwrap();
        assert_eq!(path.segments().len(), 4);
        assert_eq!(path.segments()[2], PathSegment::Index(2));
    }
}
