//! The analyzer modules.
//!
//! Each check subscribes to a set of node kinds and keeps its state scoped
//! to one file's traversal. See `dispatch` for the driving protocol.

pub mod lists;
pub mod literals;
pub mod nesting;
pub mod spelling;

pub use lists::{
    ClassListCheck, EnumListCheck, ImportListCheck, MethodListCheck, PackageListCheck,
};
pub use literals::{LiteralsCheck, StringPolicy};
pub use nesting::NestingDepthCheck;
pub use spelling::{Dictionary, DictionaryError, SpellingCheck};
