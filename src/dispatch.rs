//! Check registration and tree traversal.
//!
//! The dispatcher performs one depth-first pre-order walk per file and
//! forwards each node to every check subscribed to its kind, in
//! registration order. Check state is scoped to one file: the file-start
//! hook resets it, the file-end hook gets a last chance to report.

use std::io;

use rayon::prelude::*;

use crate::diagnostic::{CheckId, Diagnostic, DiagnosticSink};
use crate::tree::{Node, NodeKind, SyntaxTree};

/// A stateful analysis module reacting to a subset of node kinds.
///
/// Implementations must never panic on malformed trees; a node missing an
/// expected child is skipped, not escalated.
pub trait Check: Send {
    /// Stable identifier, used by sinks to correlate events.
    fn id(&self) -> CheckId;

    /// Node kinds this check wants to see.
    fn subscribed_kinds(&self) -> &[NodeKind];

    /// Called before the walk of each file. Resets per-file state.
    fn file_started(&mut self) {}

    /// Called for every node whose kind is subscribed.
    fn visit(&mut self, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>);

    /// Called after the walk of each file.
    fn file_finished(&mut self, _diagnostics: &mut Vec<Diagnostic>) {}
}

/// Drives registered checks over syntax trees.
#[derive(Default)]
pub struct Dispatcher {
    checks: Vec<Box<dyn Check>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher { checks: Vec::new() }
    }

    /// Register a check. Checks run in registration order at every node.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Create a dispatcher from a full check set.
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Dispatcher { checks }
    }

    /// Number of registered checks.
    pub fn check_count(&self) -> usize {
        self.checks.len()
    }

    /// Analyze one file, returning its diagnostics in traversal order.
    pub fn run(&mut self, tree: &SyntaxTree) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for check in &mut self.checks {
            check.file_started();
        }

        for node in tree.preorder() {
            let kind = node.kind();
            for check in &mut self.checks {
                // Subscription sets are small static slices; a scan beats
                // hashing here.
                if check.subscribed_kinds().contains(&kind) {
                    check.visit(node, &mut diagnostics);
                }
            }
        }

        for check in &mut self.checks {
            check.file_finished(&mut diagnostics);
        }

        diagnostics
    }
}

/// Analyze a batch of files in parallel.
///
/// Each worker gets its own check set from `checks` so no per-file state is
/// shared; a loaded dictionary inside the factory's closure is the only
/// thing workers may share, read-only. Results come back in input order.
pub fn run_batch<F>(trees: &[SyntaxTree], checks: F) -> Vec<Vec<Diagnostic>>
where
    F: Fn() -> Vec<Box<dyn Check>> + Sync,
{
    trees
        .par_iter()
        .map(|tree| Dispatcher::with_checks(checks()).run(tree))
        .collect()
}

/// Feed per-file diagnostic streams to a sink, bracketed by the file hooks,
/// with a terminal flush.
pub fn emit<S: DiagnosticSink + ?Sized>(
    reports: &[Vec<Diagnostic>],
    sink: &mut S,
) -> io::Result<()> {
    for file in reports {
        sink.file_started()?;
        for diagnostic in file {
            sink.report(diagnostic)?;
        }
        sink.file_finished()?;
    }
    sink.flush()
}
