//! Identifier spelling check.
//!
//! Declaration identifiers are decomposed by camel case and by underscores;
//! if either decomposition consists entirely of dictionary words the
//! identifier passes. The dictionary is loaded once at initialization and
//! shared read-only afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::diagnostic::{CheckId, Diagnostic};
use crate::dispatch::Check;
use crate::tree::{Node, NodeKind};

const SUBSCRIBED: &[NodeKind] = &[
    NodeKind::MethodDecl,
    NodeKind::VariableDecl,
    NodeKind::ClassDecl,
    NodeKind::InterfaceDecl,
    NodeKind::EnumDecl,
    NodeKind::EnumConstant,
    NodeKind::ParameterDecl,
    NodeKind::PackageDecl,
    NodeKind::AnnotationDecl,
    NodeKind::AnnotationFieldDecl,
];

/// Failure to load the primary word list. Fatal: no analysis may run
/// without a dictionary.
#[derive(Debug, Error)]
#[error("cannot read dictionary {path}")]
pub struct DictionaryError {
    path: String,
    #[source]
    source: std::io::Error,
}

/// A set of known words, lower-cased and trimmed.
#[derive(Debug, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load the primary word list: one word per line, case-insensitive,
    /// blank lines ignored. An unreadable file is a fatal error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError {
            path: path.display().to_string(),
            source,
        })?;

        let mut dictionary = Dictionary::default();
        dictionary.absorb(&content);
        Ok(dictionary)
    }

    /// Build a dictionary from an in-memory word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Dictionary::default();
        for word in words {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }

    /// Merge a secondary word list. A missing or unreadable file is
    /// tolerated: the dictionary is left as it was.
    pub fn merge_optional<P: AsRef<Path>>(&mut self, path: P) {
        if let Ok(content) = fs::read_to_string(path.as_ref()) {
            self.absorb(&content);
        }
    }

    /// Merge a comma-separated allow-list of extra words.
    pub fn add_allowed_words(&mut self, csv: &str) {
        for word in csv.split(',') {
            self.insert(word);
        }
    }

    /// True iff the candidate is a known word.
    pub fn contains(&self, candidate: &str) -> bool {
        let normalized = candidate.trim().to_lowercase();
        self.words.contains(&normalized)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn absorb(&mut self, content: &str) {
        for line in content.lines() {
            self.insert(line);
        }
    }

    fn insert(&mut self, word: &str) {
        let normalized = word.trim().to_lowercase();
        if !normalized.is_empty() {
            self.words.insert(normalized);
        }
    }
}

/// Split an identifier at camel-case word boundaries.
///
/// A boundary sits before an uppercase letter that follows a non-uppercase
/// character, or before an uppercase letter that starts an upper-then-lower
/// pair. "HTTPServerImpl" splits into HTTP / Server / Impl. Single forward
/// scan, no backtracking.
fn split_camel_case(identifier: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = identifier.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, c) = chars[i];
        if !c.is_uppercase() {
            continue;
        }
        let prev = chars[i - 1].1;
        let next_is_lower = chars
            .get(i + 1)
            .is_some_and(|&(_, next)| next.is_lowercase());
        if !prev.is_uppercase() || next_is_lower {
            parts.push(&identifier[start..offset]);
            start = offset;
        }
    }

    parts.push(&identifier[start..]);
    parts
}

fn is_attribute_definition(node: Node<'_>) -> bool {
    node.kind() == NodeKind::VariableDecl
        && node
            .parent()
            .and_then(|p| p.parent())
            .is_some_and(|gp| gp.kind() == NodeKind::ClassDecl)
}

/// Reports declaration identifiers that spell-check against neither their
/// camel-case nor their underscore decomposition.
pub struct SpellingCheck {
    dictionary: Arc<Dictionary>,
}

impl SpellingCheck {
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        SpellingCheck { dictionary }
    }

    fn is_known_with_camel_case(&self, candidate: &str) -> bool {
        split_camel_case(candidate)
            .iter()
            .all(|word| self.dictionary.contains(word))
    }

    fn is_known_with_underscores(&self, candidate: &str) -> bool {
        candidate.split('_').all(|word| self.dictionary.contains(word))
    }
}

impl Check for SpellingCheck {
    fn id(&self) -> CheckId {
        CheckId::Spelling
    }

    fn subscribed_kinds(&self) -> &[NodeKind] {
        SUBSCRIBED
    }

    fn visit(&mut self, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
        // the grammar guarantees an identifier child for these kinds, but a
        // malformed tree must not take the traversal down
        let Some(ident) = node.find_first(NodeKind::Identifier) else {
            return;
        };

        // remove trailing numbers
        let id = ident.text().trim_end_matches(|c: char| c.is_ascii_digit());

        if self.is_known_with_camel_case(id) {
            return;
        }

        if self.is_known_with_underscores(id) {
            return;
        }

        // short local variables pass without a dictionary match
        if node.kind() == NodeKind::VariableDecl
            && !is_attribute_definition(node)
            && id.chars().count() <= 3
        {
            return;
        }

        let label = if is_attribute_definition(node) {
            "Attribute"
        } else {
            node.kind().declaration_label().unwrap_or("Declaration")
        };

        diagnostics.push(Diagnostic::new(
            self.id(),
            node.line(),
            node.column(),
            format!("{label} declaration '{id}' looks like bad spelling."),
        ));
    }
}
