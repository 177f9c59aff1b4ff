use serde_json::Value;

use super::diagram::Diagram;
use crate::error::EditorError;
use crate::graph::{Edge, Node, Position};

/// A user-visible diagram mutation. Each applied action becomes one history entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    AddNode(Node),
    MoveNode { id: String, position: Position },
    /// Replace a node's editor payload
    UpdateNodeData { id: String, data: Value },
    /// Also removes the node's edges
    RemoveNode { id: String },
    AddEdge(Edge),
    RemoveEdge { id: String },
    /// Several actions recorded as a single entry (e.g. paste, multi-drag)
    Batch(Vec<EditAction>),
}

impl EditAction {
    /// Apply to `diagram`. On error the diagram is left as it was, batches included.
    pub fn apply(&self, diagram: &mut Diagram) -> Result<(), EditorError> {
        match self {
            EditAction::AddNode(node) => diagram.add_node(node.clone()),
            EditAction::MoveNode { id, position } => diagram.move_node(id, *position),
            EditAction::UpdateNodeData { id, data } => diagram.update_node_data(id, data.clone()),
            EditAction::RemoveNode { id } => diagram.remove_node(id).map(|_| ()),
            EditAction::AddEdge(edge) => diagram.add_edge(edge.clone()),
            EditAction::RemoveEdge { id } => diagram.remove_edge(id).map(|_| ()),
            EditAction::Batch(actions) => {
                let mut scratch = diagram.clone();
                for action in actions {
                    action.apply(&mut scratch)?;
                }
                *diagram = scratch;
                Ok(())
            }
        }
    }

    /// Short name for log lines and status messages
    pub fn label(&self) -> &'static str {
        match self {
            EditAction::AddNode(_) => "add node",
            EditAction::MoveNode { .. } => "move node",
            EditAction::UpdateNodeData { .. } => "update node",
            EditAction::RemoveNode { .. } => "remove node",
            EditAction::AddEdge(_) => "add edge",
            EditAction::RemoveEdge { .. } => "remove edge",
            EditAction::Batch(_) => "batch",
        }
    }
}
