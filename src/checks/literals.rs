//! Repeated-literal check.
//!
//! Counts literal occurrences by exact text within one file and reports a
//! literal once, at the occurrence where its count first exceeds the
//! configured maximum. String literals carry their own policy: either a
//! separate (or shared) threshold, or an unconditional report on sight.

use std::collections::HashMap;

use phf::phf_set;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{CheckId, Diagnostic};
use crate::dispatch::Check;
use crate::tree::{Node, NodeKind};

const DEFAULT_MAX: u32 = 5;

const SUBSCRIBED: &[NodeKind] = &[
    NodeKind::IntLiteral,
    NodeKind::LongLiteral,
    NodeKind::FloatLiteral,
    NodeKind::DoubleLiteral,
    NodeKind::CharLiteral,
    NodeKind::StringLiteral,
];

/// Literal texts that are never reported, however often they repeat.
static EXEMPT: phf::Set<&'static str> = phf_set! {
    "0", "1", "0L", "1L", "0.0", "1.0",
};

/// How string literals are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StringPolicy {
    /// Report every qualifying string literal on first sight.
    AlwaysReport,
    /// Count strings like other literals, against their own maximum.
    #[default]
    Counted,
}

/// Literals are accepted in attribute definitions.
fn is_in_attribute_definition(node: Node<'_>) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.kind() == NodeKind::VariableDecl
            && n.parent().is_some_and(|p| p.kind() == NodeKind::ObjectBlock)
        {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Reports literals that repeat past a configured maximum.
pub struct LiteralsCheck {
    max: u32,
    string_max: Option<u32>,
    string_policy: StringPolicy,
    counts: HashMap<String, u32>,
}

impl LiteralsCheck {
    pub fn new() -> Self {
        LiteralsCheck {
            max: DEFAULT_MAX,
            string_max: None,
            string_policy: StringPolicy::default(),
            counts: HashMap::new(),
        }
    }

    /// Maximum occurrences tolerated for a literal text.
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    /// Separate maximum for string literals; strings fall back to the
    /// general maximum when unset.
    pub fn with_string_max(mut self, string_max: u32) -> Self {
        self.string_max = Some(string_max);
        self
    }

    pub fn with_string_policy(mut self, policy: StringPolicy) -> Self {
        self.string_policy = policy;
        self
    }
}

impl Default for LiteralsCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for LiteralsCheck {
    fn id(&self) -> CheckId {
        CheckId::Literals
    }

    fn subscribed_kinds(&self) -> &[NodeKind] {
        SUBSCRIBED
    }

    fn file_started(&mut self) {
        self.counts.clear();
    }

    fn visit(&mut self, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
        let text = node.text();

        // rule out the most simple constants
        if text.is_empty() || EXEMPT.contains(text) {
            return;
        }

        // everything in an attribute definition is also fine
        if is_in_attribute_definition(node) {
            return;
        }

        let is_string = node.kind() == NodeKind::StringLiteral;
        if is_string && self.string_policy == StringPolicy::AlwaysReport {
            diagnostics.push(Diagnostic::new(
                self.id(),
                node.line(),
                node.column(),
                format!("The string literal {text} should be put in a constant."),
            ));
            return;
        }

        let maximum = if is_string {
            self.string_max.unwrap_or(self.max)
        } else {
            self.max
        };

        let count = self.counts.get(text).copied().unwrap_or(0) + 1;
        if count == maximum + 1 {
            // report the count once; later repeats stay silent
            diagnostics.push(Diagnostic::new(
                self.id(),
                node.line(),
                node.column(),
                format!(
                    "The literal {text} is used more than {maximum} times and should be put in a constant."
                ),
            ));
        }
        self.counts.insert(text.to_string(), count);
    }
}
