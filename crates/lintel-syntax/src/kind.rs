//! Closed set of ESTree node categories.

use std::fmt;
use std::str::FromStr;

macro_rules! node_kinds {
    ($($kind:ident),* $(,)?) => {
        /// The grammar category of a node, named after its ESTree `type` tag.
        #[derive(
            Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Serialize,
            serde::Deserialize,
        )]
        pub enum NodeKind {
            $($kind,)*
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$kind,)*];

            /// Returns the ESTree `type` tag for this kind.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(NodeKind::$kind => stringify!($kind),)*
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = UnknownNodeKind;

            fn from_str(tag: &str) -> Result<Self, Self::Err> {
                match tag {
                    $(stringify!($kind) => Ok(NodeKind::$kind),)*
                    _ => Err(UnknownNodeKind(tag.into())),
                }
            }
        }
    };
}

node_kinds! {
    Program,

    // Statements
    ExpressionStatement,
    BlockStatement,
    StaticBlock,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    SwitchCase,
    ThrowStatement,
    TryStatement,
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,

    // Declarations
    FunctionDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    ClassDeclaration,
    ClassBody,
    MethodDefinition,
    PropertyDefinition,
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportDefaultDeclaration,
    ExportAllDeclaration,

    // Expressions
    Identifier,
    PrivateIdentifier,
    Literal,
    TemplateLiteral,
    TemplateElement,
    TaggedTemplateExpression,
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    AssignmentExpression,
    LogicalExpression,
    MemberExpression,
    ChainExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    SequenceExpression,
    YieldExpression,
    AwaitExpression,
    ImportExpression,
    MetaProperty,
    SpreadElement,

    // Patterns
    RestElement,
    ObjectPattern,
    ArrayPattern,
    AssignmentPattern,
}

impl NodeKind {
    /// Declarations, expressions and arrows that introduce a function.
    pub const FUNCTIONS: KindSet = KindSet::new([
        NodeKind::FunctionDeclaration,
        NodeKind::FunctionExpression,
        NodeKind::ArrowFunctionExpression,
    ]);

    /// Wrappers that put a declaration behind an `export` keyword.
    pub const EXPORTS: KindSet = KindSet::new([
        NodeKind::ExportDefaultDeclaration,
        NodeKind::ExportNamedDeclaration,
        NodeKind::ExportAllDeclaration,
        NodeKind::ExportSpecifier,
    ]);

    /// Plain and constructor calls.
    pub const CALLS: KindSet = KindSet::new([NodeKind::CallExpression, NodeKind::NewExpression]);

    /// Containers whose interior comments trail the container once it has no
    /// members.
    pub const CONTAINERS: KindSet = KindSet::new([
        NodeKind::BlockStatement,
        NodeKind::ClassBody,
        NodeKind::ObjectExpression,
        NodeKind::ArrayExpression,
        NodeKind::SwitchStatement,
    ]);

    /// Returns `true` for function declarations, expressions and arrows.
    #[inline]
    pub const fn is_function(self) -> bool {
        Self::FUNCTIONS.contains(self)
    }

    /// Returns `true` for export wrappers.
    #[inline]
    pub const fn is_export(self) -> bool {
        Self::EXPORTS.contains(self)
    }

    /// Returns `true` for call and `new` expressions.
    #[inline]
    pub const fn is_call(self) -> bool {
        Self::CALLS.contains(self)
    }

    /// Returns `true` for kinds that hold a list of members.
    #[inline]
    pub const fn is_container(self) -> bool {
        Self::CONTAINERS.contains(self)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `type` tag outside the closed node kind set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeKind(pub Box<str>);

impl fmt::Display for UnknownNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node type `{}`", self.0)
    }
}

impl std::error::Error for UnknownNodeKind {}

const SIZE: usize = 2;

/// Compact bitset of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet {
    bits: [u64; SIZE],
}

impl KindSet {
    pub const EMPTY: Self = Self { bits: [0; SIZE] };
    const BITS_PER_SLOT: u16 = u64::BITS as u16;

    const fn from_kind(kind: NodeKind) -> Self {
        let kind = kind as u16;

        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;

        debug_assert!(
            slot_index < Self::EMPTY.bits.len(),
            "Index out of bounds. Increase the size of the bitset array."
        );

        let mut bits = Self::EMPTY.bits;
        bits[slot_index] = 1 << (kind % Self::BITS_PER_SLOT);

        Self { bits }
    }

    /// Returns the union of both sets.
    pub const fn union(mut self, other: &Self) -> Self {
        let mut i = 0;

        while i < self.bits.len() {
            self.bits[i] |= other.bits[i];
            i += 1;
        }

        self
    }

    /// Builds a set from a fixed list of kinds.
    pub const fn new<const N: usize>(kinds: [NodeKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.union(&Self::from_kind(kinds[i]));
            i += 1;
        }

        set
    }

    /// Returns `true` if `kind` is in the set.
    pub const fn contains(&self, kind: NodeKind) -> bool {
        let kind = kind as u16;
        let slot_index = (kind / Self::BITS_PER_SLOT) as usize;
        let mask = 1 << (kind % Self::BITS_PER_SLOT);

        self.bits[slot_index] & mask != 0
    }
}
