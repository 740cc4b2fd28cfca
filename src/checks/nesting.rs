//! Control-flow nesting depth check.
//!
//! Walks upward from each control-flow node computing an effective depth.
//! Syntactically chained constructs are grouped before a step counts as a
//! new level: `else if` chains stay flat, and the catch clauses of one try
//! share that try's level.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::diagnostic::{CheckId, Diagnostic};
use crate::dispatch::Check;
use crate::tree::{Node, NodeKind};

const DEFAULT_MAX_DEPTH: u32 = 4;

const SUBSCRIBED: &[NodeKind] = &[
    NodeKind::If,
    NodeKind::Else,
    NodeKind::Try,
    NodeKind::Catch,
    NodeKind::While,
    NodeKind::For,
    NodeKind::Switch,
];

static CONTROL_FLOW: Lazy<HashSet<NodeKind>> =
    Lazy::new(|| SUBSCRIBED.iter().copied().collect());

fn is_control_flow(kind: NodeKind) -> bool {
    CONTROL_FLOW.contains(&kind)
}

/// Skip past chains of if-else-ifs.
///
/// The parser hangs an `else` under its `if` and a chained `if` under the
/// `else`, so an alternating if/else parent chain is one logical level.
fn skip_if_else(node: Node<'_>) -> Node<'_> {
    let Some(parent) = node.parent() else {
        return node;
    };

    let chained = (node.kind() == NodeKind::If && parent.kind() == NodeKind::Else)
        || (node.kind() == NodeKind::Else && parent.kind() == NodeKind::If);
    if chained {
        skip_if_else(parent)
    } else {
        node
    }
}

/// Skip a catch past its siblings and the owning try.
fn skip_try_catch(node: Node<'_>) -> Node<'_> {
    let Some(parent) = node.parent() else {
        return node;
    };

    if node.kind() == NodeKind::Catch
        && matches!(parent.kind(), NodeKind::Catch | NodeKind::Try)
    {
        skip_try_catch(parent)
    } else {
        node
    }
}

/// Skip past control-flow tokens of the same group.
fn skip_group(node: Node<'_>) -> Node<'_> {
    let skipped = skip_try_catch(node);
    if skipped != node {
        return skipped;
    }

    let skipped = skip_if_else(node);
    if skipped != node {
        return skipped;
    }

    node
}

/// Next ancestor that is an unrelated control-flow construct.
fn control_flow_parent(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    loop {
        current = skip_group(current).parent()?;
        if is_control_flow(current.kind()) {
            return Some(current);
        }
    }
}

/// Reports control-flow constructs nested deeper than a configured limit.
pub struct NestingDepthCheck {
    max_depth: u32,
}

impl NestingDepthCheck {
    pub fn new() -> Self {
        NestingDepthCheck {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Configure the allowed nesting depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for NestingDepthCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for NestingDepthCheck {
    fn id(&self) -> CheckId {
        CheckId::NestingDepth
    }

    fn subscribed_kinds(&self) -> &[NodeKind] {
        SUBSCRIBED
    }

    fn visit(&mut self, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
        // An else whose child is an if is the `} else if (...) {` idiom;
        // the inner if gets its own visit, so reporting here would double
        // up on the same logical level.
        if node.kind() == NodeKind::Else {
            if let Some(first) = node.first_child() {
                if first.kind() == NodeKind::If {
                    return;
                }
            }
        }

        let mut depth = 1u32;
        let mut ancestor = control_flow_parent(node);
        while let Some(token) = ancestor {
            depth += 1;
            ancestor = control_flow_parent(token);
        }

        if depth > self.max_depth {
            diagnostics.push(Diagnostic::new(
                self.id(),
                node.line(),
                node.column(),
                format!(
                    "Control flow is nested {} levels deep (limit is {}).",
                    depth, self.max_depth
                ),
            ));
        }
    }
}
