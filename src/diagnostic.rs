//! Diagnostic events and the sink contract.

use serde::{Deserialize, Serialize};
use std::io;

/// Identifiers of the built-in checks.
///
/// Sinks dispatch on this enumeration; string comparison never decides
/// where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckId {
    #[serde(rename = "nesting_depth")]
    NestingDepth,
    #[serde(rename = "literals")]
    Literals,
    #[serde(rename = "spelling")]
    Spelling,
    #[serde(rename = "package_list")]
    PackageList,
    #[serde(rename = "import_list")]
    ImportList,
    #[serde(rename = "class_list")]
    ClassList,
    #[serde(rename = "enum_list")]
    EnumList,
    #[serde(rename = "method_list")]
    MethodList,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::NestingDepth => "nesting_depth",
            CheckId::Literals => "literals",
            CheckId::Spelling => "spelling",
            CheckId::PackageList => "package_list",
            CheckId::ImportList => "import_list",
            CheckId::ClassList => "class_list",
            CheckId::EnumList => "enum_list",
            CheckId::MethodList => "method_list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nesting_depth" => Some(CheckId::NestingDepth),
            "literals" => Some(CheckId::Literals),
            "spelling" => Some(CheckId::Spelling),
            "package_list" => Some(CheckId::PackageList),
            "import_list" => Some(CheckId::ImportList),
            "class_list" => Some(CheckId::ClassList),
            "enum_list" => Some(CheckId::EnumList),
            "method_list" => Some(CheckId::MethodList),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single finding emitted by a check.
///
/// Immutable once created; ordered by emission time, which follows the
/// traversal order of the file, not necessarily line order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub check_id: CheckId,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(check_id: CheckId, line: u32, column: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            check_id,
            line,
            column,
            message: message.into(),
        }
    }
}

/// Consumer of an ordered diagnostic stream.
///
/// The driver delivers diagnostics per file, bracketed by the file hooks,
/// and signals `flush` once at the end of a run. Sinks typically write, so
/// every method can fail with an I/O error.
pub trait DiagnosticSink {
    fn file_started(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()>;

    fn file_finished(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_id_round_trip() {
        let ids = [
            CheckId::NestingDepth,
            CheckId::Literals,
            CheckId::Spelling,
            CheckId::PackageList,
            CheckId::ImportList,
            CheckId::ClassList,
            CheckId::EnumList,
            CheckId::MethodList,
        ];
        for id in ids {
            assert_eq!(CheckId::parse(id.as_str()), Some(id));
        }
        assert_eq!(CheckId::parse("bogus"), None);
    }

    #[test]
    fn test_diagnostic_serializes_with_renamed_id() {
        let d = Diagnostic::new(CheckId::NestingDepth, 12, 4, "too deep");
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"nesting_depth\""));
        assert!(json.contains("\"line\":12"));
    }
}
