use cta_composer::{
    apply_style, load, render, validate, CtaConfig, CtaError, Editor, MoveDirection, RenderNode,
    StyleOverride,
};
use serde_json::json;

fn find<'a>(nodes: &'a [RenderNode], class: &str) -> Option<&'a RenderNode> {
    for node in nodes {
        if node.class == class {
            return Some(node);
        }
        if let Some(found) = find(&node.children, class) {
            return Some(found);
        }
    }
    None
}

fn sample_config_json() -> serde_json::Value {
    json!({
        "version": 1,
        "enabled": true,
        "layout": {
            "style": "popup",
            "position": "bottom-right",
            "width": 360,
            "componentGap": 12
        },
        "theme": {
            "primaryColor": "#2563eb",
            "backgroundColor": "#ffffff",
            "textColor": "#111827"
        },
        "components": [
            {
                "id": "hdr",
                "type": "header",
                "props": { "title": "Need help?", "subtitle": "We reply fast" },
                "order": 1,
                "visible": true
            },
            {
                "id": "feat",
                "type": "feature_list",
                "props": {
                    "items": [
                        { "icon": "✓", "text": "Instant answers" },
                        { "icon": "✓", "text": "Real humans" }
                    ]
                },
                "order": 2,
                "visible": true
            },
            {
                "id": "btns",
                "type": "button_group",
                "props": {
                    "buttons": [
                        { "label": "Chat now", "action": "message" },
                        { "label": "Visit docs", "action": "link", "url": "https://example.com/docs" }
                    ]
                },
                "order": 3,
                "visible": true
            }
        ],
        "settings": { "dismissible": true }
    })
}

#[test]
fn sample_config_validates_and_renders() {
    let config = validate(&sample_config_json()).unwrap();
    let nodes = render(&config);

    let header = find(&nodes, "cta-header").unwrap();
    assert_eq!(header.children[0].text.as_deref(), Some("Need help?"));

    let features = find(&nodes, "cta-features").unwrap();
    assert_eq!(features.children.len(), 2);

    let group = find(&nodes, "cta-button-group").unwrap();
    assert_eq!(group.children[0].class, "cta-button-primary");
    assert_eq!(group.children[1].class, "cta-button-secondary");
    assert_eq!(group.children[1].tag, "a");
}

#[test]
fn duplicate_component_ids_are_rejected() {
    let mut doc = sample_config_json();
    doc["components"][1]["id"] = json!("hdr");
    let err = validate(&doc).unwrap_err();
    assert!(matches!(err, CtaError::DuplicateId { .. }));
}

#[test]
fn sparse_orders_are_rejected_but_loadable() {
    let mut doc = sample_config_json();
    doc["components"][2]["order"] = json!(9);
    assert!(matches!(
        validate(&doc).unwrap_err(),
        CtaError::OrderInvariant { .. }
    ));

    let loaded = load(&doc).unwrap();
    let orders: Vec<u32> = loaded.components.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn orders_stay_dense_across_arbitrary_interleavings() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();

    let a = editor.add_component("description", None).unwrap();
    editor.move_component(&a, MoveDirection::Up).unwrap();
    let b = editor.duplicate_component(&a).unwrap();
    editor.remove_component("feat").unwrap();
    editor.move_component(&b, MoveDirection::Down).unwrap();
    editor.add_component("divider", Some(&b)).unwrap();
    editor.remove_component(&a).unwrap();

    let orders: Vec<u32> = editor.config().components.iter().map(|c| c.order).collect();
    let expected: Vec<u32> = (1..=editor.config().components.len() as u32).collect();
    assert_eq!(orders, expected);
}

#[test]
fn duplicate_is_deep_equal_but_freshly_identified() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();

    let dup = editor.duplicate_component("feat").unwrap();
    assert_ne!(dup, "feat");

    let ids: Vec<&str> = editor.config().components.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.iter().filter(|id| **id == dup).count(), 1);

    let source = editor.config().component("feat").unwrap();
    let duplicate = editor.config().component(&dup).unwrap();
    assert_eq!(source.kind, duplicate.kind);
    assert_eq!(source.style, duplicate.style);
}

#[test]
fn boundary_moves_leave_document_unchanged() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();
    let before = editor.config().clone();

    editor.move_component("hdr", MoveDirection::Up).unwrap();
    assert_eq!(editor.config(), &before);

    editor.move_component("btns", MoveDirection::Down).unwrap();
    assert_eq!(editor.config(), &before);
}

#[test]
fn style_mapper_contract() {
    assert!(apply_style(&StyleOverride::default()).is_empty());

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
fn button_group_presence_suppresses_legacy_pair() {
    let mut doc = sample_config_json();
    doc["primaryButton"] = json!({ "label": "Old chat", "action": "message" });
    doc["secondaryButton"] = json!({ "label": "Dismiss", "action": "close" });

    let config = validate(&doc).unwrap();
    let nodes = render(&config);

    assert!(find(&nodes, "cta-actions").is_none());
    let mut group_count = 0;
    fn count(nodes: &[RenderNode], class: &str, acc: &mut usize) {
        for node in nodes {
            if node.class == class {
                *acc += 1;
            }
            count(&node.children, class, acc);
        }
    }
    count(&nodes, "cta-button-group", &mut group_count);
    assert_eq!(group_count, 1);
}

#[test]
fn legacy_pair_renders_when_no_button_group_exists() {
    let mut doc = sample_config_json();
    doc["components"] = json!([
        {
            "id": "hdr",
            "type": "header",
            "props": { "title": "Hi" },
            "order": 1,
            "visible": true
        }
    ]);
    doc["primaryButton"] = json!({ "label": "Chat", "action": "message" });

    let config = validate(&doc).unwrap();
    let nodes = render(&config);
    let actions = find(&nodes, "cta-actions").unwrap();
    assert_eq!(actions.children.len(), 1);
    assert_eq!(actions.children[0].text.as_deref(), Some("Chat"));
}

#[test]
fn invalid_hand_edited_text_never_clobbers_the_document() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();
    let before = editor.config().clone();

    assert!(editor.apply_text("{\"components\": [{\"type\":").is_err());
    assert_eq!(editor.config(), &before);

    // Structurally broken but well-formed JSON is also rejected
    assert!(editor.apply_text("{\"components\": 42}").is_err());
    assert_eq!(editor.config(), &before);
    assert!(editor.draft().is_some());
}

#[test]
fn text_round_trip_preserves_unpatched_fields() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();

    let text = editor.to_text().unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed["theme"]["primaryColor"], "#2563eb");

    editor
        .apply_text("{\"theme\": {\"primaryColor\": \"#000000\"}}")
        .unwrap();
    assert_eq!(editor.config().theme.primary_color, "#000000");
    assert_eq!(editor.config().theme.text_color, "#111827");
    assert_eq!(editor.config().components.len(), 3);
}

#[test]
fn default_and_starter_documents_are_valid() {
    let default_value = serde_json::to_value(CtaConfig::default()).unwrap();
    assert!(validate(&default_value).is_ok());

    let starter_value = serde_json::to_value(CtaConfig::starter()).unwrap();
    let starter = validate(&starter_value).unwrap();
    assert!(!render(&starter).is_empty());
}

#[test]
fn property_edits_commit_through_validation() {
    let config = validate(&sample_config_json()).unwrap();
    let mut editor = Editor::new(config).unwrap();

    editor
        .update_component_property("hdr", "props.title", json!("Updated title"))
        .unwrap();
    editor
        .update_component_property("hdr", "style.textColor", json!("#cc0000"))
        .unwrap();

    let nodes = render(editor.config());
    let header = find(&nodes, "cta-header").unwrap();
    assert_eq!(header.style.get("color"), Some("#cc0000"));
    assert_eq!(header.children[0].text.as_deref(), Some("Updated title"));
}
