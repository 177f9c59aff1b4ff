//! Bounded undo/redo history for node-and-edge diagram editors
//!
//! `History` keeps full copies of the graph after every committed edit,
//! walks them with undo/redo, and drops the redo branch on the next edit.
//! While an undo/redo result is being applied, captures are suppressed so
//! the editor's own change hook does not record the restore as a new edit.
//!
//! # Example
//! ```
//! use diagram_history::{History, Node, Position};
//!
//! let mut history = History::new();
//! let a = Node::new("a", Position::new(0.0, 0.0));
//! let b = Node::new("b", Position::new(50.0, 0.0));
//!
//! history.initialize(&[a.clone()], &[]).unwrap();
//! history.save_state(&[a.clone(), b], &[]).unwrap();
//!
//! let change = history.undo().unwrap();
//! assert_eq!(change.nodes, vec![a]);
//! // ...editor applies change.nodes / change.edges...
//! history.complete_change(change.token);
//! assert!(history.can_redo());
//! ```

pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod history;

pub use config::{HistoryCommand, HistoryConfig, Shortcut, ShortcutTable, MAX_HISTORY_SIZE};
pub use editor::{Diagram, DiagramEditor, EditAction};
pub use error::{CodecError, ConfigError, EditorError};
pub use graph::{Edge, GraphSnapshot, GraphState, Node, Position};
pub use history::{ChangeToken, History, HistoryChange, HistoryInfo};
