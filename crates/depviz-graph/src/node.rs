//! Dependency tree nodes produced by the graph builder.
//!
//! A [`DependencyNode`] is immutable once the builder hands it out. Children
//! are stored behind an `Arc` so that every edge resolving to the same file
//! within one run points at the same subtree instead of a copy.
//!
//! The presented tree collapses shared subtrees: a children slice is written
//! out at its first pre-order occurrence only, and later occurrences appear
//! as the node alone. [`DependencyNode::walk`], [`DependencyNode::collapsed`]
//! and renderers using [`SeenSubtrees`] all follow that rule, so output stays
//! proportional to the number of distinct files even on diamond-shaped
//! imports.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Semantic category of an imported symbol.
///
/// Exactly one category is assigned per node, at edge-resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entry,
    External,
    Component,
    Hook,
    Function,
    Enum,
    Type,
    Interface,
    Const,
    Style,
    Media,
    Ignored,
    Circular,
    Unknown,
}

impl Category {
    /// Every category, in presentation order.
    pub const ALL: [Category; 14] = [
        Category::Entry,
        Category::External,
        Category::Component,
        Category::Hook,
        Category::Function,
        Category::Enum,
        Category::Type,
        Category::Interface,
        Category::Const,
        Category::Style,
        Category::Media,
        Category::Ignored,
        Category::Circular,
        Category::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Entry => "entry",
            Category::External => "external",
            Category::Component => "component",
            Category::Hook => "hook",
            Category::Function => "function",
            Category::Enum => "enum",
            Category::Type => "type",
            Category::Interface => "interface",
            Category::Const => "const",
            Category::Style => "style",
            Category::Media => "media",
            Category::Ignored => "ignored",
            Category::Circular => "circular",
            Category::Unknown => "unknown",
        }
    }

    /// Categories whose target file is traversed for its own dependencies.
    pub fn is_expandable(self) -> bool {
        matches!(
            self,
            Category::Component | Category::Hook | Category::Function | Category::Const
        )
    }

    /// Categories that never carry children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            Category::External
                | Category::Style
                | Category::Media
                | Category::Ignored
                | Category::Circular
                | Category::Unknown
        )
    }

    /// Sort key used by renderers (entry first, unknown last).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// One node of a per-entry dependency tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Local binding name used by the importer (`*` for a re-export-all edge).
    pub name: String,

    #[serde(rename = "type")]
    pub category: Category,

    /// Path relative to the run's base directory, the package name for
    /// externals, or the original specifier when nothing was resolved.
    #[serde(rename = "filePath")]
    pub source_path: String,

    /// Dependencies in discovery order.
    #[serde(rename = "deps")]
    pub children: Arc<[DependencyNode]>,
}

impl DependencyNode {
    /// Create a node without children.
    pub fn leaf(
        name: impl Into<String>,
        category: Category,
        source_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            source_path: source_path.into(),
            children: Arc::from(Vec::new()),
        }
    }

    /// Create a node whose children are shared with other nodes.
    pub fn with_children(
        name: impl Into<String>,
        category: Category,
        source_path: impl Into<String>,
        children: Arc<[DependencyNode]>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            source_path: source_path.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True when both nodes point at the same cached subtree.
    pub fn shares_children_with(&self, other: &DependencyNode) -> bool {
        !self.children.is_empty() && Arc::ptr_eq(&self.children, &other.children)
    }

    /// Pre-order iterator over the presented tree.
    ///
    /// A shared subtree is descended into on its first occurrence; later
    /// occurrences are yielded without their children.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![self],
            seen: SeenSubtrees::new(),
        }
    }

    /// Number of nodes in the presented tree, this node included.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Depth of the deepest descendant (0 for a leaf).
    pub fn max_depth(&self) -> usize {
        fn depth(
            children: &Arc<[DependencyNode]>,
            memo: &mut FxHashMap<*const DependencyNode, usize>,
        ) -> usize {
            if children.is_empty() {
                return 0;
            }
            if let Some(&known) = memo.get(&children.as_ptr()) {
                return known;
            }
            let deepest = children
                .iter()
                .map(|child| depth(&child.children, memo) + 1)
                .max()
                .unwrap_or(0);
            memo.insert(children.as_ptr(), deepest);
            deepest
        }

        depth(&self.children, &mut FxHashMap::default())
    }

    /// First descendant (pre-order) with the given name.
    pub fn find(&self, name: &str) -> Option<&DependencyNode> {
        self.walk().skip(1).find(|node| node.name == name)
    }

    /// Serializable view of the presented tree.
    ///
    /// Same shape as the node's own serialization, except that repeated
    /// occurrences of a shared subtree carry empty `deps` and
    /// `"shared": true`.
    pub fn collapsed(&self) -> CollapsedTree<'_> {
        CollapsedTree { root: self }
    }
}

/// Shared subtrees already written out by a presenter.
#[derive(Debug, Default)]
pub struct SeenSubtrees {
    expanded: FxHashSet<*const DependencyNode>,
}

impl SeenSubtrees {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `node`'s children should be presented here.
    ///
    /// False only when the same children slice was expanded before.
    pub fn should_expand(&mut self, node: &DependencyNode) -> bool {
        node.children.is_empty() || self.expanded.insert(node.children.as_ptr())
    }
}

/// Iterator returned by [`DependencyNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a DependencyNode>,
    seen: SeenSubtrees,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DependencyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if self.seen.should_expand(node) {
            self.stack.extend(node.children.iter().rev());
        }
        Some(node)
    }
}

/// Returned by [`DependencyNode::collapsed`].
pub struct CollapsedTree<'a> {
    root: &'a DependencyNode,
}

impl Serialize for CollapsedTree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let seen = RefCell::new(SeenSubtrees::new());
        CollapsedNode {
            node: self.root,
            seen: &seen,
        }
        .serialize(serializer)
    }
}

struct CollapsedNode<'a> {
    node: &'a DependencyNode,
    seen: &'a RefCell<SeenSubtrees>,
}

impl Serialize for CollapsedNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let expand = self.seen.borrow_mut().should_expand(self.node);
        let node = self.node;

        let mut state = serializer.serialize_struct("DependencyNode", if expand { 4 } else { 5 })?;
        state.serialize_field("name", &node.name)?;
        state.serialize_field("type", &node.category)?;
        state.serialize_field("filePath", &node.source_path)?;
        if expand {
            state.serialize_field(
                "deps",
                &CollapsedChildren {
                    nodes: &node.children,
                    seen: self.seen,
                },
            )?;
        } else {
            state.serialize_field("deps", &Vec::<DependencyNode>::new())?;
            state.serialize_field("shared", &true)?;
        }
        state.end()
    }
}

struct CollapsedChildren<'a> {
    nodes: &'a [DependencyNode],
    seen: &'a RefCell<SeenSubtrees>,
}

impl Serialize for CollapsedChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.nodes.iter().map(|node| CollapsedNode {
            node,
            seen: self.seen,
        }))
    }
}
