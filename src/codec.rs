//! Snapshot codec
//!
//! Copies go through a `serde_json::Value` round trip. Anything that cannot
//! survive it is rejected instead of being stored half-converted: non-finite
//! floats serialize as `null` and then fail to deserialize, and maps with
//! non-string keys fail to serialize at all.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CodecError;
use crate::graph::{Edge, GraphSnapshot, Node};

/// Deep copy `value` through its serialized form
pub fn deep_copy<T>(value: &T) -> Result<T, CodecError>
where
    T: Serialize + DeserializeOwned,
{
    round_trip(value)
}

/// Copy the editor's live graph into an independent snapshot
pub fn copy_graph(nodes: &[Node], edges: &[Edge]) -> Result<GraphSnapshot, CodecError> {
    Ok(GraphSnapshot {
        nodes: round_trip(nodes)?,
        edges: round_trip(edges)?,
    })
}

fn round_trip<T, U>(value: &T) -> Result<U, CodecError>
where
    T: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let encoded = serde_json::to_value(value).map_err(CodecError::Serialize)?;
    serde_json::from_value(encoded).map_err(CodecError::Deserialize)
}

/// Convert a typed editor payload into the JSON value stored on a node or edge
pub fn to_payload<T: Serialize>(payload: &T) -> Result<Value, CodecError> {
    serde_json::to_value(payload).map_err(CodecError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_copy_graph_is_deep_equal() {
        let nodes = vec![
            Node::new("a", Position::new(10.0, 20.0))
                .with_kind("note")
                .with_data(json!({ "label": "A", "style": { "color": "#fff" } })),
        ];
        let edges = vec![Edge::new("e1", "a", "a").with_data(json!([1, 2, 3]))];

        let snapshot = copy_graph(&nodes, &edges).unwrap();
        assert_eq!(snapshot.nodes, nodes);
        assert_eq!(snapshot.edges, edges);
    }

    #[test]
    fn test_copy_is_independent_of_source() {
        let mut nodes = vec![Node::new("a", Position::default()).with_data(json!({ "tags": ["x"] }))];
        let snapshot = copy_graph(&nodes, &[]).unwrap();

        nodes[0].data["tags"][0] = json!("mutated");
        nodes[0].position.x = 99.0;

        assert_eq!(snapshot.nodes[0].data["tags"][0], "x");
        assert_eq!(snapshot.nodes[0].position.x, 0.0);
    }

    #[test]
    fn test_non_finite_position_is_rejected() {
        let nodes = vec![Node::new("a", Position::new(f64::NAN, 0.0))];
        let result = copy_graph(&nodes, &[]);
        assert!(matches!(result, Err(CodecError::Deserialize(_))));
    }

    #[test]
    fn test_non_string_map_keys_are_rejected() {
        let mut payload: HashMap<(u32, u32), String> = HashMap::new();
        payload.insert((1, 2), "cell".to_string());

        assert!(matches!(to_payload(&payload), Err(CodecError::Serialize(_))));
        assert!(matches!(deep_copy(&payload), Err(CodecError::Serialize(_))));
    }

    #[test]
    fn test_error_message_leaves_cause_to_source() {
        use std::error::Error;

        let err = copy_graph(&[Node::new("a", Position::new(f64::NAN, 0.0))], &[]).unwrap_err();
        let cause = err.source().unwrap().to_string();

        assert_eq!(err.to_string(), "snapshot did not survive the round trip");
        assert!(!err.to_string().contains(&cause));
    }

    #[test]
    fn test_to_payload_struct() {
        #[derive(Serialize)]
        struct Style {
            color: String,
            width: u32,
        }

        let value = to_payload(&Style { color: "red".to_string(), width: 2 }).unwrap();
        assert_eq!(value, json!({ "color": "red", "width": 2 }));
    }
}
