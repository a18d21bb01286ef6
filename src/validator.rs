//! Document validation and deep-merge of partial patches.
//!
//! Validation runs after every structural mutation. On success the caller
//! replaces its authoritative document; on failure the previously valid
//! document stays live and the draft is preserved upstream — nothing here
//! mutates state.

use crate::components::Component;
use crate::document::{restamp_orders, CtaConfig};
use crate::error::{CtaError, CtaResult};
use serde_json::Value;
use std::collections::HashSet;

/// Validate a candidate document in its JSON form.
pub fn validate(candidate: &Value) -> CtaResult<CtaConfig> {
    let config: CtaConfig = serde_json::from_value(candidate.clone())
        .map_err(|e| CtaError::Deserialization(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Structural checks over an already-typed document: id uniqueness across
/// the whole tree and the dense ascending order invariant.
pub fn validate_config(config: &CtaConfig) -> CtaResult<()> {
    validate_id_uniqueness(&config.components)?;
    validate_order_density(&config.components)?;
    Ok(())
}

/// Load a document from storage: unlike [`validate`], orders are normalized
/// (sorted, then re-stamped dense) rather than rejected, since stored
/// configs may predate the invariant.
pub fn load(value: &Value) -> CtaResult<CtaConfig> {
    let mut config: CtaConfig = serde_json::from_value(value.clone())
        .map_err(|e| CtaError::Deserialization(e.to_string()))?;
    config.components.sort_by_key(|c| c.order);
    restamp_orders(&mut config.components);
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_id_uniqueness(components: &[Component]) -> CtaResult<()> {
    let mut seen = HashSet::new();
    collect_ids(components, &mut seen)
}

fn collect_ids(components: &[Component], seen: &mut HashSet<String>) -> CtaResult<()> {
    for component in components {
        if !seen.insert(component.id.clone()) {
            return Err(CtaError::DuplicateId {
                id: component.id.clone(),
            });
        }
        if let Some(children) = component.kind.children() {
            collect_ids(children, seen)?;
        }
    }
    Ok(())
}

/// `components[i].order` must equal `i + 1` for every position.
pub fn validate_order_density(components: &[Component]) -> CtaResult<()> {
    for (i, component) in components.iter().enumerate() {
        let expected = (i + 1) as u32;
        if component.order != expected {
            return Err(CtaError::OrderInvariant {
                position: i,
                expected,
                found: component.order,
            });
        }
    }
    Ok(())
}

/// Deep-merge `patch` into `base`.
///
/// For every key present in the patch: if both sides are objects, merge
/// recursively; otherwise the patch value replaces the destination. Arrays
/// always replace wholesale, never merge by index.
pub fn deep_merge(base: &Value, patch: &Value) -> Value {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            let mut merged = base_map.clone();
            for (key, patch_value) in patch_map {
                let entry = match merged.get(key) {
                    Some(base_value) => deep_merge(base_value, patch_value),
                    None => patch_value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        (_, patch) => patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentKind, ContainerProps};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deep_merge_merges_nested_records() {
        let base = json!({"a": {"x": 1, "y": 2}});
        let patch = json!({"a": {"y": 3}});
        assert_eq!(deep_merge(&base, &patch), json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn deep_merge_replaces_arrays_wholesale() {
        let base = json!({"a": {"z": [9]}});
        let patch = json!({"a": {"z": [1, 2]}});
        assert_eq!(deep_merge(&base, &patch), json!({"a": {"z": [1, 2]}}));
    }

    #[test]
    fn deep_merge_scalar_replaces_object() {
        let base = json!({"a": {"x": 1}});
        let patch = json!({"a": 5});
        assert_eq!(deep_merge(&base, &patch), json!({"a": 5}));
    }

    #[test]
    fn duplicate_ids_are_rejected_across_nesting() {
        let mut outer = Component::new(ComponentKind::Container(ContainerProps::default()));
        let mut inner = Component::new(ComponentKind::Divider(Default::default()));
        inner.id = outer.id.clone();
        if let ComponentKind::Container(props) = &mut outer.kind {
            props.children.push(inner);
        }
        let err = validate_id_uniqueness(&[outer]).unwrap_err();
        assert!(matches!(err, CtaError::DuplicateId { .. }));
    }

    #[test]
    fn sparse_orders_fail_validation() {
        let mut config = CtaConfig::starter();
        config.components[1].order = 5;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, CtaError::OrderInvariant { position: 1, .. }));
    }

    #[test]
    fn load_normalizes_sparse_orders() {
        let mut config = CtaConfig::starter();
        config.components[0].order = 40;
        config.components[1].order = 10;
        config.components[2].order = 20;
        let value = serde_json::to_value(&config).unwrap();

        let loaded = load(&value).unwrap();
        let orders: Vec<u32> = loaded.components.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        // Sort by stored order, then restamp: the old 40 lands last
        assert_eq!(loaded.components[2].id, config.components[0].id);
    }

    #[test]
    fn unknown_document_shape_is_a_deserialization_error() {
        let err = validate(&json!({"components": "nope"})).unwrap_err();
        assert!(matches!(err, CtaError::Deserialization(_)));
    }
}
