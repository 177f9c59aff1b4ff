use crate::graph::{Edge, GraphSnapshot, Node};

/// Identifies one undo/redo result that is waiting to be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeToken(u64);

/// A restored snapshot handed to the editor by `undo`/`redo`.
///
/// Capture stays suppressed until the editor completes the change, either
/// with `History::complete_history_change` or `History::complete_change(token)`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChange {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub token: ChangeToken,
}

impl HistoryChange {
    pub(crate) fn new(snapshot: GraphSnapshot, token: ChangeToken) -> Self {
        Self {
            nodes: snapshot.nodes,
            edges: snapshot.edges,
            token,
        }
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.edges.clone())
    }

    pub fn into_snapshot(self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes, self.edges)
    }
}

/// Reentrancy gate between `undo`/`redo` and the editor's own change hook
#[derive(Debug, Default)]
pub(crate) struct CaptureGuard {
    // capture is suppressed exactly while a change is pending
    pending: Option<ChangeToken>,
    // never reset, so tokens from before a clear() cannot match later changes
    issued: u64,
}

impl CaptureGuard {
    pub fn is_suppressed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<ChangeToken> {
        self.pending
    }

    /// Suppress capture and issue the token for this change. Any earlier
    /// pending token becomes stale.
    pub fn engage(&mut self) -> ChangeToken {
        self.issued += 1;
        let token = ChangeToken(self.issued);
        self.pending = Some(token);
        token
    }

    pub fn release(&mut self) {
        self.pending = None;
    }

    /// Release only if `token` is the latest pending change
    pub fn release_token(&mut self, token: ChangeToken) -> bool {
        if self.pending == Some(token) {
            self.release();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engage_and_release() {
        let mut guard = CaptureGuard::default();
        assert!(!guard.is_suppressed());

        let token = guard.engage();
        assert!(guard.is_suppressed());
        assert_eq!(guard.pending(), Some(token));

        guard.release();
        assert!(!guard.is_suppressed());
        assert_eq!(guard.pending(), None);
    }

    #[test]
    fn test_stale_token_does_not_release() {
        let mut guard = CaptureGuard::default();
        let first = guard.engage();
        let second = guard.engage();
        assert_ne!(first, second);

        assert!(!guard.release_token(first));
        assert!(guard.is_suppressed());

        assert!(guard.release_token(second));
        assert!(!guard.is_suppressed());

        // duplicate completion
        assert!(!guard.release_token(second));
    }

    #[test]
    fn test_suppressed_iff_pending() {
        let mut guard = CaptureGuard::default();
        let first = guard.engage();
        let second = guard.engage();

        for token in [first, second] {
            guard.release_token(token);
            assert_eq!(guard.is_suppressed(), guard.pending().is_some());
        }
        assert!(!guard.is_suppressed());
    }

    #[test]
    fn test_tokens_unique_across_release() {
        let mut guard = CaptureGuard::default();
        let first = guard.engage();
        guard.release();
        let second = guard.engage();
        assert_ne!(first, second);
        assert!(!guard.release_token(first));
    }
}
