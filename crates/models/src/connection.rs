//! Normalization of upstream collection shapes.

use serde_json::Value;

/// Flatten an upstream collection into an ordered list, dropping `null` entries.
///
/// Accepted shapes: a bare array, `{data: [...]}`, `{nodes: [...]}` and
/// `{edges: [{node}]}`. `data` wins over `nodes` when both are non-empty;
/// anything else yields an empty list.
pub fn normalize_connection(connection: &Value) -> Vec<Value> {
    fn prune(items: Option<&Value>) -> Vec<Value> {
        match items {
            Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).cloned().collect(),
            _ => Vec::new(),
        }
    }

    match connection {
        Value::Array(_) => prune(Some(connection)),
        Value::Object(obj) => {
            let data = prune(obj.get("data"));
            if !data.is_empty() {
                return data;
            }
            let nodes = prune(obj.get("nodes"));
            if !nodes.is_empty() {
                return nodes;
            }
            match obj.get("edges") {
                Some(Value::Array(edges)) => edges
                    .iter()
                    .filter_map(|edge| edge.get("node"))
                    .filter(|node| !node.is_null())
                    .cloned()
                    .collect(),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}
