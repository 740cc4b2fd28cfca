//! Output sinks and report writers.
//!
//! The correlator reconstructs qualified names from the ordered diagnostic
//! stream of the listing checks; the other writers render diagnostics
//! as-is, for humans (pretty) or machines (JSON).

use std::io::{self, Write};

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{CheckId, Diagnostic, DiagnosticSink};

/// Correlates listing-check events into qualified output.
///
/// Tracks the current package per file; package declarations always
/// precede the declarations they qualify because they are syntactically
/// earlier in the file and diagnostics arrive in traversal order.
pub struct Correlator<W: Write> {
    writer: W,
    package: String,
}

impl<W: Write> Correlator<W> {
    pub fn new(writer: W) -> Self {
        Correlator {
            writer,
            package: String::new(),
        }
    }

    /// Hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for Correlator<W> {
    fn file_started(&mut self) -> io::Result<()> {
        self.package.clear();
        Ok(())
    }

    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        match diagnostic.check_id {
            CheckId::PackageList => {
                self.package = format!("{}.", diagnostic.message);
                writeln!(self.writer, "package: {}", diagnostic.message)
            }
            CheckId::ImportList => writeln!(self.writer, "import: {}", diagnostic.message),
            CheckId::ClassList => {
                writeln!(self.writer, "class: {}{}", self.package, diagnostic.message)
            }
            CheckId::EnumList => {
                writeln!(self.writer, "enum: {}{}", self.package, diagnostic.message)
            }
            CheckId::MethodList => {
                writeln!(self.writer, "method: {}{}", self.package, diagnostic.message)
            }
            _ => writeln!(self.writer, "unsupported: {}", diagnostic.message),
        }
    }

    fn file_finished(&mut self) -> io::Result<()> {
        self.package.clear();
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Plain location sink: one `check:line:column:message` line per event.
pub struct LocationSink<W: Write> {
    writer: W,
}

impl<W: Write> LocationSink<W> {
    pub fn new(writer: W) -> Self {
        LocationSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for LocationSink<W> {
    fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        writeln!(
            self.writer,
            "{}:{}:{}:{}",
            diagnostic.check_id, diagnostic.line, diagnostic.column, diagnostic.message
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Write diagnostics as a JSON report.
pub fn write_json<W: Write>(writer: W, diagnostics: &[Diagnostic]) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        count: diagnostics.len(),
        diagnostics: diagnostics.to_vec(),
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Write diagnostics as colored terminal output.
pub fn write_pretty<W: Write>(mut writer: W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(
            writer,
            "{:>5}:{:<4} {} {}",
            diagnostic.line.to_string().dimmed(),
            diagnostic.column.to_string().dimmed(),
            diagnostic.check_id.as_str().cyan(),
            diagnostic.message
        )?;
    }
    if diagnostics.is_empty() {
        writeln!(writer, "{}", "no findings".green())
    } else {
        writeln!(writer, "{} finding(s)", diagnostics.len())
    }
}
