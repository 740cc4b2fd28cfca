//! Integration tests for the full analysis pipeline.
//!
//! These build the syntax tree an external parser would hand over for a
//! small source file, run the complete check set and validate both the raw
//! diagnostic stream and the correlated output.

use std::io::Write as _;
use std::sync::Arc;

use srclint::config::{EngineConfig, LiteralsConfig, NestingConfig, SpellingConfig};
use srclint::dispatch::{emit, run_batch, Dispatcher};
use srclint::report::Correlator;
use srclint::tree::{NodeId, NodeKind, SyntaxTree};
use srclint::{CheckId, Dictionary, Diagnostic};

/// Tree for:
///
/// ```java
/// package edu.kit;
/// import java.util.List;
///
/// class Outer {
///     int magic = 99;
///
///     void zorkmid() {
///         if (a) { if (b) { if (c) {
///             x = 99; y = 99; z = 99;
///         } } }
///     }
///
///     class Inner {
///         void run() { }
///     }
/// }
/// ```
fn sample_file() -> SyntaxTree {
    let mut b = SyntaxTree::builder(NodeKind::CompilationUnit, "", 1, 0);

    let package = b.add(b.root(), NodeKind::PackageDecl, "package", 1, 0);
    let dot = b.add(package, NodeKind::Dot, ".", 1, 8);
    b.add(dot, NodeKind::Identifier, "edu", 1, 8);
    b.add(dot, NodeKind::Identifier, "kit", 1, 12);

    let import = b.add(b.root(), NodeKind::Import, "import", 2, 0);
    let outer_dot = b.add(import, NodeKind::Dot, ".", 2, 7);
    let inner_dot = b.add(outer_dot, NodeKind::Dot, ".", 2, 7);
    b.add(inner_dot, NodeKind::Identifier, "java", 2, 7);
    b.add(inner_dot, NodeKind::Identifier, "util", 2, 12);
    b.add(outer_dot, NodeKind::Identifier, "List", 2, 17);

    let outer = b.add(b.root(), NodeKind::ClassDecl, "class", 4, 0);
    b.add(outer, NodeKind::Identifier, "Outer", 4, 6);
    let outer_body = b.add(outer, NodeKind::ObjectBlock, "{", 4, 12);

    // attribute with a literal initializer
    let field = b.add(outer_body, NodeKind::VariableDecl, "field", 5, 4);
    b.add(field, NodeKind::Identifier, "magic", 5, 8);
    b.add(field, NodeKind::IntLiteral, "99", 5, 16);

    let method = b.add(outer_body, NodeKind::MethodDecl, "method", 7, 4);
    b.add(method, NodeKind::Identifier, "zorkmid", 7, 9);
    let body = b.add(method, NodeKind::Block, "{", 7, 19);

    let mut block = body;
    for i in 0..3u32 {
        let if_node = b.add(block, NodeKind::If, "if", 8, 8 + 10 * i);
        block = b.add(if_node, NodeKind::Block, "{", 8, 15 + 10 * i);
    }
    for (line, column) in [(9, 16), (9, 24), (9, 32)] {
        b.add(block, NodeKind::IntLiteral, "99", line, column);
    }

    let inner = b.add(outer_body, NodeKind::ClassDecl, "class", 13, 4);
    b.add(inner, NodeKind::Identifier, "Inner", 13, 10);
    let inner_body: NodeId = b.add(inner, NodeKind::ObjectBlock, "{", 13, 16);
    let run = b.add(inner_body, NodeKind::MethodDecl, "method", 14, 8);
    b.add(run, NodeKind::Identifier, "run", 14, 13);
    b.add(run, NodeKind::Block, "{", 14, 19);

    b.build()
}

fn strict_config() -> EngineConfig {
    EngineConfig {
        nesting: NestingConfig { max_depth: 2 },
        literals: LiteralsConfig {
            max: 2,
            ..LiteralsConfig::default()
        },
        spelling: SpellingConfig::default(),
        lists: true,
    }
}

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words([
        "outer", "inner", "magic", "run", "edu", "kit",
    ]))
}

fn analyze(tree: &SyntaxTree) -> Vec<Diagnostic> {
    let checks = strict_config().build_checks_with(dictionary());
    Dispatcher::with_checks(checks).run(tree)
}

#[test]
fn test_full_check_set_on_one_file() {
    let diagnostics = analyze(&sample_file());

    let by_id = |id: CheckId| -> Vec<&Diagnostic> {
        diagnostics.iter().filter(|d| d.check_id == id).collect()
    };

    // three nested ifs against a limit of two: one violation, on the inner if
    let nesting = by_id(CheckId::NestingDepth);
    assert_eq!(nesting.len(), 1);
    assert_eq!(
        nesting[0].message,
        "Control flow is nested 3 levels deep (limit is 2)."
    );

    // 99 as a field initializer is exempt; the three code occurrences cross
    // the limit once, at the third
    let literals = by_id(CheckId::Literals);
    assert_eq!(literals.len(), 1);
    assert_eq!(literals[0].line, 9);
    assert_eq!(literals[0].column, 32);

    // zorkmid is in nobody's dictionary
    let spelling = by_id(CheckId::Spelling);
    assert_eq!(spelling.len(), 1);
    assert_eq!(
        spelling[0].message,
        "Method declaration 'zorkmid' looks like bad spelling."
    );

    let names = |id: CheckId| -> Vec<&str> {
        by_id(id).iter().map(|d| d.message.as_str()).collect()
    };
    assert_eq!(names(CheckId::PackageList), vec!["edu.kit"]);
    assert_eq!(names(CheckId::ImportList), vec!["java.util.List"]);
    assert_eq!(names(CheckId::ClassList), vec!["Outer", "Outer$Inner"]);
    assert_eq!(
        names(CheckId::MethodList),
        vec!["Outer.zorkmid", "Outer$Inner.run"]
    );
    assert!(names(CheckId::EnumList).is_empty());
}

#[test]
fn test_diagnostics_follow_traversal_order() {
    let diagnostics = analyze(&sample_file());
    let ids: Vec<CheckId> = diagnostics.iter().map(|d| d.check_id).collect();
    assert_eq!(
        ids,
        vec![
            CheckId::PackageList,
            CheckId::ImportList,
            CheckId::ClassList,
            CheckId::Spelling,
            CheckId::MethodList,
            CheckId::NestingDepth,
            CheckId::Literals,
            CheckId::ClassList,
            CheckId::MethodList,
        ]
    );
}

#[test]
fn test_correlated_output() {
    let diagnostics = analyze(&sample_file());

    let mut sink = Correlator::new(Vec::new());
    emit(&[diagnostics], &mut sink).unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();

    assert_eq!(
        output,
        "package: edu.kit\n\
         import: java.util.List\n\
         class: edu.kit.Outer\n\
         unsupported: Method declaration 'zorkmid' looks like bad spelling.\n\
         method: edu.kit.Outer.zorkmid\n\
         unsupported: Control flow is nested 3 levels deep (limit is 2).\n\
         unsupported: The literal 99 is used more than 2 times and should be put in a constant.\n\
         class: edu.kit.Outer$Inner\n\
         method: edu.kit.Outer$Inner.run\n"
    );
}

#[test]
fn test_batch_runs_share_only_the_dictionary() {
    // identical files must produce identical reports; a literal counter or
    // package string shared across workers would break that
    let trees: Vec<SyntaxTree> = (0..4).map(|_| sample_file()).collect();

    let config = strict_config();
    let dictionary = dictionary();
    let reports = run_batch(&trees, || config.build_checks_with(dictionary.clone()));

    assert_eq!(reports.len(), 4);
    let first = &reports[0];
    for report in &reports[1..] {
        assert_eq!(report.len(), first.len());
        for (a, b) in report.iter().zip(first.iter()) {
            assert_eq!(a.check_id, b.check_id);
            assert_eq!(a.message, b.message);
        }
    }
}

#[test]
fn test_dictionary_file_to_diagnostics() {
    let mut words = tempfile::NamedTempFile::new().unwrap();
    writeln!(words, "outer\ninner\nmagic\nrun").unwrap();

    let config = EngineConfig {
        spelling: SpellingConfig {
            dictionary: words.path().to_path_buf(),
            extra_dictionary: None,
            allowed_words: Some("edu,kit".to_string()),
        },
        ..strict_config()
    };

    let checks = config.build_checks().unwrap();
    let diagnostics = Dispatcher::with_checks(checks).run(&sample_file());
    let spelling: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.check_id == CheckId::Spelling)
        .collect();
    assert_eq!(spelling.len(), 1);
    assert!(spelling[0].message.contains("zorkmid"));
}
