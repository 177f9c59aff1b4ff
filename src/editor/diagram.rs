use serde_json::Value;

use crate::error::EditorError;
use crate::graph::{Edge, GraphSnapshot, Node, Position};

/// The editor's live, mutable graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a diagram, rejecting duplicate ids and edges to missing nodes
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, EditorError> {
        let mut diagram = Self::new();
        for node in nodes {
            diagram.add_node(node)?;
        }
        for edge in edges {
            diagram.add_edge(edge)?;
        }
        Ok(diagram)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, EditorError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| EditorError::UnknownNode(id.to_string()))
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), EditorError> {
        if self.node(&node.id).is_some() {
            return Err(EditorError::DuplicateNode(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn move_node(&mut self, id: &str, position: Position) -> Result<(), EditorError> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    pub fn update_node_data(&mut self, id: &str, data: Value) -> Result<(), EditorError> {
        self.node_mut(id)?.data = data;
        Ok(())
    }

    /// Remove a node together with every edge attached to it
    pub fn remove_node(&mut self, id: &str) -> Result<(Node, Vec<Edge>), EditorError> {
        let idx = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| EditorError::UnknownNode(id.to_string()))?;
        let node = self.nodes.remove(idx);

        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges).into_iter().partition(|e| e.touches(id));
        self.edges = kept;

        Ok((node, removed))
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), EditorError> {
        if self.edge(&edge.id).is_some() {
            return Err(EditorError::DuplicateEdge(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if self.node(endpoint).is_none() {
                return Err(EditorError::DanglingEdge {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, EditorError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| EditorError::UnknownEdge(id.to_string()))?;
        Ok(self.edges.remove(idx))
    }

    /// Apply an undo/redo result wholesale
    pub fn replace(&mut self, snapshot: GraphSnapshot) {
        self.nodes = snapshot.nodes;
        self.edges = snapshot.edges;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}
