//! Listing checks and scope-name qualification.
//!
//! The listing checks emit declared names as diagnostics; the correlator
//! assembles them into qualified output. Scope prefixes are recomputed per
//! query from the ancestor chain, never cached.

use crate::diagnostic::{CheckId, Diagnostic};
use crate::dispatch::Check;
use crate::tree::{Node, NodeKind};

/// Declared name of a class/enum/method node: its first identifier child.
pub fn declared_name<'a>(node: Node<'a>) -> Option<&'a str> {
    node.find_first(NodeKind::Identifier).map(|n| n.text())
}

fn enclosing_type(node: Node<'_>) -> Option<Node<'_>> {
    node.ancestors()
        .find(|a| matches!(a.kind(), NodeKind::ClassDecl | NodeKind::EnumDecl))
}

/// Enclosing-name prefix of a declaration.
///
/// Walks the ancestor chain over enclosing class/enum declarations; each
/// enclosing name is followed by `$` when the queried node is itself a
/// class declaration and by `.` otherwise. Top-level declarations get an
/// empty prefix. Pure function of the ancestor chain.
pub fn scope_of(node: Node<'_>) -> String {
    let separator = if node.kind() == NodeKind::ClassDecl {
        '$'
    } else {
        '.'
    };

    match enclosing_type(node) {
        Some(owner) => match declared_name(owner) {
            Some(name) => format!("{}{}{}", scope_of(owner), name, separator),
            // an unnamed enclosing type cannot contribute a segment
            None => scope_of(owner),
        },
        None => String::new(),
    }
}

/// Dotted name of a package declaration, or `None` when the declaration is
/// malformed.
pub fn package_name_of(node: Node<'_>) -> Option<String> {
    match node.kind() {
        NodeKind::PackageDecl => {
            let name = node
                .children()
                .find(|c| matches!(c.kind(), NodeKind::Dot | NodeKind::Identifier))?;
            package_name_of(name)
        }
        NodeKind::Dot => {
            let lhs = node.first_child()?;
            let rhs = lhs.next_sibling()?;
            Some(format!("{}.{}", package_name_of(lhs)?, package_name_of(rhs)?))
        }
        NodeKind::Identifier => Some(node.text().to_string()),
        _ => None,
    }
}

/// Dotted path of an import declaration.
pub fn import_path_of(node: Node<'_>) -> Option<String> {
    match node.kind() {
        NodeKind::Import => import_path_of(node.first_child()?),
        NodeKind::Dot => {
            let first = node.first_child()?;
            let last = node.children().last()?;
            Some(format!(
                "{}.{}",
                import_path_of(first)?,
                import_path_of(last)?
            ))
        }
        // identifiers and the wildcard star report their own text
        _ => Some(node.text().to_string()),
    }
}

macro_rules! listing_check {
    ($(#[$doc:meta])* $name:ident, $id:expr, $kind:expr, $message:expr) => {
        $(#[$doc])*
        #[derive(Default)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                $name
            }
        }

        impl Check for $name {
            fn id(&self) -> CheckId {
                $id
            }

            fn subscribed_kinds(&self) -> &[NodeKind] {
                const KINDS: &[NodeKind] = &[$kind];
                KINDS
            }

            fn visit(&mut self, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
                let message: Option<String> = ($message)(node);
                if let Some(message) = message {
                    diagnostics.push(Diagnostic::new(
                        self.id(),
                        node.line(),
                        node.column(),
                        message,
                    ));
                }
            }
        }
    };
}

listing_check!(
    /// Lists all package declarations.
    PackageListCheck,
    CheckId::PackageList,
    NodeKind::PackageDecl,
    package_name_of
);

listing_check!(
    /// Lists all imports.
    ImportListCheck,
    CheckId::ImportList,
    NodeKind::Import,
    import_path_of
);

listing_check!(
    /// Lists all classes with their enclosing scope.
    ClassListCheck,
    CheckId::ClassList,
    NodeKind::ClassDecl,
    |node: Node<'_>| declared_name(node).map(|name| format!("{}{}", scope_of(node), name))
);

listing_check!(
    /// Lists all enums with their enclosing scope.
    EnumListCheck,
    CheckId::EnumList,
    NodeKind::EnumDecl,
    |node: Node<'_>| declared_name(node).map(|name| format!("{}{}", scope_of(node), name))
);

listing_check!(
    /// Lists all methods with their enclosing scope.
    MethodListCheck,
    CheckId::MethodList,
    NodeKind::MethodDecl,
    |node: Node<'_>| declared_name(node).map(|name| format!("{}{}", scope_of(node), name))
);
