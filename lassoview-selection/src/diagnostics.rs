//! Sink for failures isolated during a resolution pass

use lassoview_core::NodeId;
use std::cell::RefCell;

/// One isolated failure: a node (and optionally one of its faces) that could not
/// be evaluated, or with no node at all, a gesture that could not be resolved.
/// Resolution carried on without it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub node: Option<NodeId>,
    pub face: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    /// A whole gesture was dropped before any node was looked at
    pub fn gesture(message: impl Into<String>) -> Self {
        Self {
            node: None,
            face: None,
            message: message.into(),
        }
    }

    pub fn node(node: NodeId, message: impl Into<String>) -> Self {
        Self {
            node: Some(node),
            face: None,
            message: message.into(),
        }
    }

    pub fn face(node: NodeId, face: usize, message: impl Into<String>) -> Self {
        Self {
            node: Some(node),
            face: Some(face),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.node, self.face) {
            (Some(node), Some(face)) => write!(f, "node {} face {}: {}", node, face, self.message),
            (Some(node), None) => write!(f, "node {}: {}", node, self.message),
            (None, _) => write!(f, "gesture: {}", self.message),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            node = ?diagnostic.node.map(|n| n.0),
            face = ?diagnostic.face,
            "selection skipped: {}",
            diagnostic.message
        );
    }
}

/// Keeps diagnostics in memory for later inspection
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for std::rc::Rc<T> {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_what_was_skipped() {
        assert_eq!(
            Diagnostic::face(NodeId(3), 7, "bad index").to_string(),
            "node #3 face 7: bad index"
        );
        assert_eq!(
            Diagnostic::node(NodeId(3), "no positions").to_string(),
            "node #3: no positions"
        );
        assert_eq!(
            Diagnostic::gesture("zero-sized surface").to_string(),
            "gesture: zero-sized surface"
        );
    }

    #[test]
    fn test_collecting_sink_through_rc() {
        let sink = std::rc::Rc::new(CollectingDiagnostics::new());
        let shared: Box<dyn DiagnosticSink> = Box::new(sink.clone());
        shared.report(Diagnostic::gesture("cancelled"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.entries()[0].node, None);
        sink.clear();
        assert!(sink.is_empty());
    }
}
