//! Diagram editor glue around `History`
//!
//! The editor owns its history instance; two editors never share one. Every
//! committed mutation runs the change hook, which captures the graph. Undo and
//! redo run the same hook while capture is suppressed, then complete the
//! change.

pub mod action;
pub mod diagram;

use tracing::{debug, info};

use crate::config::{HistoryCommand, HistoryConfig, Shortcut, ShortcutTable};
use crate::error::{CodecError, ConfigError, EditorError};
use crate::graph::{Edge, Node};
use crate::history::{History, HistoryInfo};

pub use action::EditAction;
pub use diagram::Diagram;

pub struct DiagramEditor {
    diagram: Diagram,
    history: History,
    shortcuts: ShortcutTable,
    pub message: Option<String>,
}

impl DiagramEditor {
    /// Start with an empty diagram. `history` is reseeded with that empty
    /// graph so the first edit can be undone.
    pub fn new(mut history: History, shortcuts: ShortcutTable) -> Self {
        history.initialize_empty();
        Self {
            diagram: Diagram::new(),
            history,
            shortcuts,
            message: None,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(History::with_config(config), config.shortcut_table()?))
    }

    /// Load a diagram and start a fresh history with it as the only entry
    pub fn load(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), EditorError> {
        let diagram = Diagram::from_parts(nodes, edges)?;
        self.history.initialize(diagram.nodes(), diagram.edges())?;
        info!(nodes = diagram.nodes().len(), edges = diagram.edges().len(), "diagram loaded");
        self.diagram = diagram;
        Ok(())
    }

    /// Apply a mutation and record it. Nothing changes if either step fails.
    pub fn apply(&mut self, action: EditAction) -> Result<(), EditorError> {
        let mut next = self.diagram.clone();
        action.apply(&mut next)?;
        on_graph_changed(&mut self.history, &next)?;
        self.diagram = next;
        debug!(action = action.label(), "applied edit");
        Ok(())
    }

    /// Returns false if there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let diagram = &mut self.diagram;
        let result = self.history.apply_undo(|history, change| {
            diagram.replace(change.into_snapshot());
            on_graph_changed(history, diagram)
        });
        self.finish("Undo", result)
    }

    /// Returns false if there was nothing to redo
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let diagram = &mut self.diagram;
        let result = self.history.apply_redo(|history, change| {
            diagram.replace(change.into_snapshot());
            on_graph_changed(history, diagram)
        });
        self.finish("Redo", result)
    }

    fn finish(
        &mut self,
        what: &str,
        result: Option<Result<(), CodecError>>,
    ) -> Result<bool, EditorError> {
        match result {
            None => {
                self.message = Some(format!("Nothing to {}", what.to_lowercase()));
                Ok(false)
            }
            Some(result) => {
                result?;
                self.message = Some(what.to_string());
                Ok(true)
            }
        }
    }

    /// Toolbar entry point
    pub fn run(&mut self, command: HistoryCommand) -> Result<bool, EditorError> {
        match command {
            HistoryCommand::Undo => self.undo(),
            HistoryCommand::Redo => self.redo(),
        }
    }

    /// Keyboard entry point. Returns false for unbound keys or when nothing happened.
    pub fn handle_shortcut(&mut self, shortcut: &Shortcut) -> Result<bool, EditorError> {
        match self.shortcuts.get(shortcut) {
            Some(command) => self.run(command),
            None => Ok(false),
        }
    }

    /// End the session: drop the diagram and its history. The editor is left
    /// on an empty diagram, ready for `load` or new edits.
    pub fn close(&mut self) {
        self.history.initialize_empty();
        self.diagram.clear();
        self.message = None;
        info!("diagram closed");
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_info(&self) -> HistoryInfo {
        self.history.info()
    }
}

impl Default for DiagramEditor {
    fn default() -> Self {
        Self::new(History::new(), ShortcutTable::default())
    }
}

// The render layer's change hook. Fires for user edits and for applied
// undo/redo results alike; the history ignores the latter.
fn on_graph_changed(history: &mut History, diagram: &Diagram) -> Result<(), CodecError> {
    history.save_state(diagram.nodes(), diagram.edges())
}
