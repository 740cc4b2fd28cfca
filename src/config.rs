//! Per-check configuration and check-set assembly.
//!
//! The structs here are plain serde schemas; how they are deserialized
//! (and from which format) is the caller's concern. Defaults match the
//! checks' built-in defaults.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::checks::lists::{
    ClassListCheck, EnumListCheck, ImportListCheck, MethodListCheck, PackageListCheck,
};
use crate::checks::literals::{LiteralsCheck, StringPolicy};
use crate::checks::nesting::NestingDepthCheck;
use crate::checks::spelling::{Dictionary, SpellingCheck};
use crate::dispatch::Check;

fn default_max_depth() -> u32 {
    4
}

fn default_max() -> u32 {
    5
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("/usr/share/dict/words")
}

fn default_true() -> bool {
    true
}

/// Configuration for the nesting depth check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestingConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for NestingConfig {
    fn default() -> Self {
        NestingConfig {
            max_depth: default_max_depth(),
        }
    }
}

/// Configuration for the repeated-literal check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralsConfig {
    #[serde(default = "default_max")]
    pub max: u32,
    /// Separate maximum for string literals; falls back to `max`.
    #[serde(default)]
    pub string_max: Option<u32>,
    #[serde(default)]
    pub string_policy: StringPolicy,
}

impl Default for LiteralsConfig {
    fn default() -> Self {
        LiteralsConfig {
            max: default_max(),
            string_max: None,
            string_policy: StringPolicy::default(),
        }
    }
}

/// Configuration for the spelling check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellingConfig {
    /// Primary word list; unreadable is fatal.
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    /// Secondary word list; missing is tolerated.
    #[serde(default)]
    pub extra_dictionary: Option<PathBuf>,
    /// Comma-separated extra words.
    #[serde(default)]
    pub allowed_words: Option<String>,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        SpellingConfig {
            dictionary: default_dictionary(),
            extra_dictionary: None,
            allowed_words: None,
        }
    }
}

impl SpellingConfig {
    /// Load the dictionary once; share the result across workers.
    pub fn load_dictionary(&self) -> anyhow::Result<Arc<Dictionary>> {
        let mut dictionary = Dictionary::load(&self.dictionary)?;
        if let Some(extra) = &self.extra_dictionary {
            dictionary.merge_optional(extra);
        }
        if let Some(words) = &self.allowed_words {
            dictionary.add_allowed_words(words);
        }
        Ok(Arc::new(dictionary))
    }
}

/// Configuration for a full engine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub nesting: NestingConfig,
    #[serde(default)]
    pub literals: LiteralsConfig,
    #[serde(default)]
    pub spelling: SpellingConfig,
    /// Whether the listing checks (package/import/class/enum/method) run.
    #[serde(default = "default_true")]
    pub lists: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            nesting: NestingConfig::default(),
            literals: LiteralsConfig::default(),
            spelling: SpellingConfig::default(),
            lists: default_true(),
        }
    }
}

impl EngineConfig {
    /// Load the dictionary and assemble the configured check set.
    ///
    /// Dictionary failure aborts before any analysis runs.
    pub fn build_checks(&self) -> anyhow::Result<Vec<Box<dyn Check>>> {
        let dictionary = self.spelling.load_dictionary()?;
        Ok(self.build_checks_with(dictionary))
    }

    /// Assemble the check set around an already-loaded dictionary. This is
    /// the per-worker path: one load, many check sets.
    pub fn build_checks_with(&self, dictionary: Arc<Dictionary>) -> Vec<Box<dyn Check>> {
        let mut literals = LiteralsCheck::new()
            .with_max(self.literals.max)
            .with_string_policy(self.literals.string_policy);
        if let Some(string_max) = self.literals.string_max {
            literals = literals.with_string_max(string_max);
        }

        let mut checks: Vec<Box<dyn Check>> = vec![
            Box::new(NestingDepthCheck::new().with_max_depth(self.nesting.max_depth)),
            Box::new(literals),
            Box::new(SpellingCheck::new(dictionary)),
        ];

        if self.lists {
            checks.push(Box::new(PackageListCheck::new()));
            checks.push(Box::new(ImportListCheck::new()));
            checks.push(Box::new(ClassListCheck::new()));
            checks.push(Box::new(EnumListCheck::new()));
            checks.push(Box::new(MethodListCheck::new()));
        }

        checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.nesting.max_depth, 4);
        assert_eq!(config.literals.max, 5);
        assert_eq!(config.literals.string_max, None);
        assert_eq!(config.literals.string_policy, StringPolicy::Counted);
        assert_eq!(
            config.spelling.dictionary,
            PathBuf::from("/usr/share/dict/words")
        );
        assert!(config.lists);
    }

    #[test]
    fn test_partial_overrides() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "nesting": {"max_depth": 2},
                "literals": {"string_policy": "always_report"},
                "lists": false
            }"#,
        )
        .unwrap();
        assert_eq!(config.nesting.max_depth, 2);
        assert_eq!(config.literals.max, 5);
        assert_eq!(config.literals.string_policy, StringPolicy::AlwaysReport);
        assert!(!config.lists);
    }

    #[test]
    fn test_build_checks_with_shared_dictionary() {
        let dictionary = Arc::new(Dictionary::from_words(["server"]));
        let config = EngineConfig::default();
        assert_eq!(config.build_checks_with(dictionary.clone()).len(), 8);

        let no_lists = EngineConfig {
            lists: false,
            ..EngineConfig::default()
        };
        assert_eq!(no_lists.build_checks_with(dictionary).len(), 3);
    }

    #[test]
    fn test_missing_dictionary_is_fatal() {
        let config = EngineConfig {
            spelling: SpellingConfig {
                dictionary: PathBuf::from("/definitely/not/here/words.txt"),
                ..SpellingConfig::default()
            },
            ..EngineConfig::default()
        };
        assert!(config.build_checks().is_err());
    }
}
