//! Generic read-only tree interface.
//!
//! The extractor is written against [`TreeNode`] rather than a concrete
//! tree type: any host tree exposing kind, range, and local navigation can
//! feed it. [`SyntaxTree`] is the owned implementation produced by the C#
//! parser adapter and by [`TreeBuilder`] in tests.

mod tree;

pub use tree::{SyntaxNodeRef, SyntaxTree, TreeBuilder};

use crate::models::TextRange;

/// Kind assigned to synthesized whitespace leaf nodes.
pub const WHITESPACE: &str = "whitespace";

/// Kind assigned to non-whitespace gap bytes left behind by error recovery.
pub const SKIPPED: &str = "skipped";

/// Borrowed handle into a syntax tree supplied by an external parser.
///
/// `'t` is the lifetime of the borrowed tree; handles are cheap copies
/// scoped to one extraction call, and the tree is never mutated through
/// them. Every navigation method returning `Option` models a structurally
/// absent neighbor, which callers must treat as "does not qualify", never
/// as an error.
pub trait TreeNode<'t>: Copy + PartialEq {
    /// Token/node kind tag.
    fn kind(self) -> &'t str;

    /// Byte range of this node in the source buffer.
    fn range(self) -> TextRange;

    fn parent(self) -> Option<Self>;

    fn prev_sibling(self) -> Option<Self>;

    fn next_sibling(self) -> Option<Self>;

    fn first_child(self) -> Option<Self>;

    /// Leaf tokens have no children; interior nodes represent constructs.
    fn is_leaf(self) -> bool {
        self.first_child().is_none()
    }
}

/// Iterative pre-order traversal over the subtree rooted at `root`.
pub fn preorder<'t, N: TreeNode<'t>>(root: N) -> Preorder<'t, N> {
    Preorder {
        root,
        next: Some(root),
        _tree: std::marker::PhantomData,
    }
}

pub struct Preorder<'t, N> {
    root: N,
    next: Option<N>,
    _tree: std::marker::PhantomData<&'t ()>,
}

impl<'t, N: TreeNode<'t>> Iterator for Preorder<'t, N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

impl<'t, N: TreeNode<'t>> Preorder<'t, N> {
    fn successor(&self, node: N) -> Option<N> {
        if let Some(child) = node.first_child() {
            return Some(child);
        }
        // Climb until a sibling exists, stopping at the traversal root so
        // the walk never escapes into the root's own siblings.
        let mut cur = node;
        while cur != self.root {
            if let Some(sibling) = cur.next_sibling() {
                return Some(sibling);
            }
            cur = cur.parent()?;
        }
        None
    }
}
