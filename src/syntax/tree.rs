use crate::models::TextRange;
use crate::syntax::TreeNode;

/// Index of a node within a [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct NodeData {
    kind: &'static str,
    range: TextRange,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
}

/// Owned, immutable syntax tree with explicit whitespace leaves.
///
/// Nodes live in an arena; navigation hands out borrowed
/// [`SyntaxNodeRef`] handles that cannot outlive the tree. Node 0 is
/// always the root.
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNodeRef<'_> {
        SyntaxNodeRef {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    fn handle(&self, id: Option<NodeId>) -> Option<SyntaxNodeRef<'_>> {
        id.map(|id| SyntaxNodeRef { tree: self, id })
    }
}

/// Borrowed handle to one node of a [`SyntaxTree`].
#[derive(Debug, Clone, Copy)]
pub struct SyntaxNodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNodeRef<'t> {
    pub fn id(self) -> NodeId {
        self.id
    }

    fn data(self) -> &'t NodeData {
        self.tree.node(self.id)
    }
}

impl PartialEq for SyntaxNodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNodeRef<'_> {}

impl<'t> TreeNode<'t> for SyntaxNodeRef<'t> {
    fn kind(self) -> &'t str {
        self.data().kind
    }

    fn range(self) -> TextRange {
        self.data().range
    }

    fn parent(self) -> Option<Self> {
        self.tree.handle(self.data().parent)
    }

    fn prev_sibling(self) -> Option<Self> {
        self.tree.handle(self.data().prev_sibling)
    }

    fn next_sibling(self) -> Option<Self> {
        self.tree.handle(self.data().next_sibling)
    }

    fn first_child(self) -> Option<Self> {
        self.tree.handle(self.data().first_child)
    }
}

/// Builds a [`SyntaxTree`] top-down.
///
/// `open` starts an interior node, `token` adds a leaf under the current
/// node, `close` finishes the innermost open node. The first node created
/// becomes the root; `finish` requires every opened node to be closed.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, kind: &'static str, range: TextRange) {
        let id = self.push(kind, range);
        self.stack.push(id);
    }

    pub fn token(&mut self, kind: &'static str, range: TextRange) {
        self.push(kind, range);
    }

    pub fn close(&mut self) {
        self.stack.pop().expect("close without matching open");
    }

    pub fn finish(self) -> SyntaxTree {
        assert!(self.stack.is_empty(), "unclosed node in TreeBuilder");
        assert!(!self.nodes.is_empty(), "TreeBuilder produced no nodes");
        SyntaxTree { nodes: self.nodes }
    }

    fn push(&mut self, kind: &'static str, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();
        debug_assert!(
            parent.is_some() || self.nodes.is_empty(),
            "second root added to TreeBuilder"
        );

        let prev_sibling = parent.and_then(|p| self.nodes[p.index()].last_child);
        self.nodes.push(NodeData {
            kind,
            range,
            parent,
            prev_sibling,
            next_sibling: None,
            first_child: None,
            last_child: None,
        });

        if let Some(prev) = prev_sibling {
            self.nodes[prev.index()].next_sibling = Some(id);
        }
        if let Some(p) = parent {
            let parent_data = &mut self.nodes[p.index()];
            if parent_data.first_child.is_none() {
                parent_data.first_child = Some(id);
            }
            parent_data.last_child = Some(id);
        }

        id
    }
}
