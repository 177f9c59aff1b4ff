use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canvas position of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A diagram node. `data` is whatever the editor attaches (labels, styling, custom fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
            kind: None,
            data: Value::Null,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: None,
            data: Value::Null,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// True if either endpoint is `node_id`
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The `{nodes, edges}` pair handed back to the editor on undo/redo
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }
}

/// One stored point in history. Never mutated once it is in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    timestamp: DateTime<Utc>,
}

impl GraphState {
    pub(crate) fn new(snapshot: GraphSnapshot, timestamp: DateTime<Utc>) -> Self {
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            timestamp,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Owned copy for the editor. Every field is owned data, so the clone
    /// shares nothing with the stored entry.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_deserializes_without_optional_fields() {
        let node: Node = serde_json::from_value(json!({
            "id": "a",
            "position": { "x": 1.0, "y": 2.0 }
        }))
        .unwrap();

        assert_eq!(node.id, "a");
        assert_eq!(node.position, Position::new(1.0, 2.0));
        assert_eq!(node.kind, None);
        assert_eq!(node.data, Value::Null);
    }

    #[test]
    fn test_edge_touches() {
        let edge = Edge::new("e1", "a", "b");
        assert!(edge.touches("a"));
        assert!(edge.touches("b"));
        assert!(!edge.touches("c"));
    }

    #[test]
    fn test_to_snapshot_is_independent() {
        let state = GraphState::new(
            GraphSnapshot::new(
                vec![Node::new("a", Position::new(0.0, 0.0)).with_data(json!({ "label": "A" }))],
                vec![],
            ),
            Utc::now(),
        );

        let mut snapshot = state.to_snapshot();
        snapshot.nodes[0].data["label"] = json!("changed");
        snapshot.nodes.push(Node::new("b", Position::default()));

        assert_eq!(state.nodes().len(), 1);
        assert_eq!(state.nodes()[0].data["label"], "A");
    }
}
