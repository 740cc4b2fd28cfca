//! srclint - static analysis over externally parsed syntax trees.
//!
//! srclint runs a set of independent checks over the syntax tree of one
//! source file. Each check subscribes to specific node kinds, keeps state
//! across the single traversal of that file and emits diagnostics; a
//! downstream sink correlates the interleaved stream into qualified output.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌─────────────┐    ┌────────────┐
//! │ SyntaxTree │───▶│ Dispatcher │───▶│ Diagnostics │───▶│ Correlator │
//! └────────────┘    │ (checks)   │    │ (ordered)   │    │ / writers  │
//!                   └────────────┘    └─────────────┘    └────────────┘
//! ```
//!
//! - `tree`: arena-backed syntax tree and navigation handles
//! - `dispatch`: check trait, per-file traversal, parallel batch driver
//! - `checks`: the analyzers (nesting depth, literals, spelling, listings)
//! - `diagnostic`: diagnostic events and the sink contract
//! - `report`: correlator and report writers
//! - `config`: serde config schemas and check-set assembly
//!
//! The parser that produces trees is external; trees are handed in through
//! [`TreeBuilder`] and only read here.
//!
//! # Adding a New Check
//!
//! Implement the [`Check`] trait and register it with a [`Dispatcher`] (or
//! wire it into `config::EngineConfig::build_checks_with`).

pub mod checks;
pub mod config;
pub mod diagnostic;
pub mod dispatch;
pub mod report;
pub mod tree;

pub use checks::{
    ClassListCheck, Dictionary, DictionaryError, EnumListCheck, ImportListCheck, LiteralsCheck,
    MethodListCheck, NestingDepthCheck, PackageListCheck, SpellingCheck, StringPolicy,
};
pub use config::EngineConfig;
pub use diagnostic::{CheckId, Diagnostic, DiagnosticSink};
pub use dispatch::{emit, run_batch, Check, Dispatcher};
pub use report::{Correlator, LocationSink};
pub use tree::{Node, NodeId, NodeKind, SyntaxTree, TreeBuilder};
