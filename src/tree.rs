//! Arena-backed syntax tree.
//!
//! The tree is produced by an external parser and only consumed here. Nodes
//! are owned by the arena; parent and sibling links are plain indices used
//! for read-only navigation, so the structure is acyclic by construction.

use std::fmt;

/// Kind of a syntax tree node.
///
/// Closed enumeration: checks subscribe to kinds by set membership, so new
/// kinds must be added here rather than invented by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    PackageDecl,
    Import,
    ClassDecl,
    InterfaceDecl,
    EnumDecl,
    EnumConstant,
    MethodDecl,
    VariableDecl,
    ParameterDecl,
    AnnotationDecl,
    AnnotationFieldDecl,
    If,
    Else,
    Try,
    Catch,
    While,
    For,
    Switch,
    Block,
    Identifier,
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    CharLiteral,
    StringLiteral,
    Type,
    Modifiers,
    ObjectBlock,
    Dot,
}

impl NodeKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "compilation_unit",
            NodeKind::PackageDecl => "package_decl",
            NodeKind::Import => "import",
            NodeKind::ClassDecl => "class_decl",
            NodeKind::InterfaceDecl => "interface_decl",
            NodeKind::EnumDecl => "enum_decl",
            NodeKind::EnumConstant => "enum_constant",
            NodeKind::MethodDecl => "method_decl",
            NodeKind::VariableDecl => "variable_decl",
            NodeKind::ParameterDecl => "parameter_decl",
            NodeKind::AnnotationDecl => "annotation_decl",
            NodeKind::AnnotationFieldDecl => "annotation_field_decl",
            NodeKind::If => "if",
            NodeKind::Else => "else",
            NodeKind::Try => "try",
            NodeKind::Catch => "catch",
            NodeKind::While => "while",
            NodeKind::For => "for",
            NodeKind::Switch => "switch",
            NodeKind::Block => "block",
            NodeKind::Identifier => "identifier",
            NodeKind::IntLiteral => "int_literal",
            NodeKind::LongLiteral => "long_literal",
            NodeKind::FloatLiteral => "float_literal",
            NodeKind::DoubleLiteral => "double_literal",
            NodeKind::CharLiteral => "char_literal",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::Type => "type",
            NodeKind::Modifiers => "modifiers",
            NodeKind::ObjectBlock => "object_block",
            NodeKind::Dot => "dot",
        }
    }

    /// Human-readable label for declaration kinds, used in messages.
    ///
    /// The label drops the `_decl` suffix, shows underscores as spaces and
    /// capitalizes the first word only ("Enum constant", "Annotation field").
    /// Returns `None` for kinds that are not declarations.
    pub fn declaration_label(&self) -> Option<&'static str> {
        match self {
            NodeKind::PackageDecl => Some("Package"),
            NodeKind::ClassDecl => Some("Class"),
            NodeKind::InterfaceDecl => Some("Interface"),
            NodeKind::EnumDecl => Some("Enum"),
            NodeKind::EnumConstant => Some("Enum constant"),
            NodeKind::MethodDecl => Some("Method"),
            NodeKind::VariableDecl => Some("Variable"),
            NodeKind::ParameterDecl => Some("Parameter"),
            NodeKind::AnnotationDecl => Some("Annotation"),
            NodeKind::AnnotationFieldDecl => Some("Annotation field"),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    text: String,
    line: u32,
    column: u32,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// An immutable tree of nodes for one source file.
///
/// Built once through [`TreeBuilder`]; the analysis core never mutates it.
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Start building a tree whose root has the given kind and position.
    pub fn builder(
        kind: NodeKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
    ) -> TreeBuilder {
        TreeBuilder::new(kind, text, line, column)
    }

    /// The root node.
    pub fn root(&self) -> Node<'_> {
        self.node(NodeId(0))
    }

    /// Handle for an arbitrary node id.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        debug_assert!(id.index() < self.nodes.len());
        Node { tree: self, id }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. Always false for built trees.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order traversal over all nodes.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            next: if self.nodes.is_empty() {
                None
            } else {
                Some(NodeId(0))
            },
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Builder for [`SyntaxTree`].
///
/// Children are appended in order under an existing parent; sibling links
/// are maintained as nodes are added.
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    /// Create a builder with the root node in place.
    pub fn new(kind: NodeKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        TreeBuilder {
            nodes: vec![NodeData {
                kind,
                text: text.into(),
                line,
                column,
                parent: None,
                first_child: None,
                last_child: None,
                next_sibling: None,
            }],
        }
    }

    /// The root's id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent`, returning its id.
    pub fn add(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            text: text.into(),
            line,
            column,
            parent: Some(parent),
            first_child: None,
            last_child: None,
            next_sibling: None,
        });

        let parent_data = &mut self.nodes[parent.index()];
        match parent_data.last_child {
            None => {
                parent_data.first_child = Some(id);
                parent_data.last_child = Some(id);
            }
            Some(prev) => {
                parent_data.last_child = Some(id);
                self.nodes[prev.index()].next_sibling = Some(id);
            }
        }

        id
    }

    /// Finish building.
    pub fn build(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

/// Copyable handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning tree.
    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    /// Source text of the node (for identifiers and literals, the token
    /// text; for structured nodes, whatever the parser recorded).
    pub fn text(&self) -> &'a str {
        &self.tree.data(self.id).text
    }

    /// 1-indexed source line.
    pub fn line(&self) -> u32 {
        self.tree.data(self.id).line
    }

    /// 0-indexed source column.
    pub fn column(&self) -> u32 {
        self.tree.data(self.id).column
    }

    /// Parent node, if any.
    pub fn parent(&self) -> Option<Node<'a>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    /// First child, if any.
    pub fn first_child(&self) -> Option<Node<'a>> {
        self.tree
            .data(self.id)
            .first_child
            .map(|id| self.tree.node(id))
    }

    /// Next sibling, if any.
    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.tree
            .data(self.id)
            .next_sibling
            .map(|id| self.tree.node(id))
    }

    /// Iterator over direct children in order.
    pub fn children(&self) -> Children<'a> {
        Children {
            next: self.first_child(),
        }
    }

    /// Iterator over ancestors, starting at the parent.
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// First direct child of the given kind, scanning siblings in order.
    pub fn find_first(&self, kind: NodeKind) -> Option<Node<'a>> {
        self.children().find(|c| c.kind() == kind)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.tree, other.tree)
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}:{}]",
            self.kind(),
            self.line(),
            self.column()
        )
    }
}

/// Iterator over a node's direct children.
pub struct Children<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let current = self.next?;
        self.next = current.next_sibling();
        Some(current)
    }
}

/// Iterator over a node's ancestor chain.
pub struct Ancestors<'a> {
    next: Option<Node<'a>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Pre-order traversal iterator.
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let current = self.tree.node(self.next?);

        // Descend first, otherwise climb until a sibling exists.
        let mut successor = current.first_child();
        if successor.is_none() {
            let mut at = current;
            loop {
                if let Some(sibling) = at.next_sibling() {
                    successor = Some(sibling);
                    break;
                }
                match at.parent() {
                    Some(parent) => at = parent,
                    None => break,
                }
            }
        }

        self.next = successor.map(|n| n.id());
        Some(current)
    }
}
