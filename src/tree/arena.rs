use super::cache::Cached;
use crate::error::TreeError;
use crate::layout::Rect;

/// Index into the arena `Vec<TreeNode>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the weighted tree, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Leaves: caller-assigned weight. Internal nodes: sum of the children, rewritten on every layout.
    pub weight: f64,
    /// Caller-assigned display order, only consulted by `sort_children_by_order`
    pub order: i32,
    /// Distance from the root (root = 0), refreshed by layout
    pub depth: u32,
    /// Bounding rectangle; `None` until the node has been laid out
    pub bounds: Option<Rect>,
    /// Opaque caller data (label, color, symbol...). Never inspected here.
    pub payload: Option<T>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) tree_items: Cached<Vec<NodeId>>,
    pub(crate) leaf_models: Cached<Vec<NodeId>>,
}

impl<T> TreeNode<T> {
    pub fn new(weight: f64, payload: Option<T>) -> Self {
        TreeNode {
            weight,
            order: 0,
            depth: 0,
            bounds: None,
            payload,
            parent: None,
            children: Vec::new(),
            tree_items: Cached::Unset,
            leaf_models: Cached::Unset,
        }
    }

    /// A node carrying an authoritative weight and a payload.
    pub fn leaf(weight: f64, payload: T) -> Self {
        Self::new(weight, Some(payload))
    }

    /// A payload-less node whose weight will be derived from its children.
    pub fn group() -> Self {
        Self::new(0.0, None)
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The weighted tree stored as a flat arena of nodes.
///
/// Nodes are never removed, so a `NodeId` stays valid for the lifetime of the
/// model. Detached nodes (created with [`TreeModel::insert`] and not yet
/// attached) are allowed and form their own single-node trees.
#[derive(Debug, Clone)]
pub struct TreeModel<T> {
    /// All nodes in contiguous memory
    pub(crate) nodes: Vec<TreeNode<T>>,
    /// Root node index
    pub root: NodeId,
}

impl<T> TreeModel<T> {
    /// Create a tree holding only `root`.
    pub fn new(root: TreeNode<T>) -> Self {
        TreeModel {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Store a detached node in the arena. Returns the new node's ID.
    pub fn insert(&mut self, node: TreeNode<T>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Fails with [`TreeError::CyclicAncestry`] if `parent` is `child` or one of
    /// its descendants; the tree is untouched in that case. A child that is
    /// already attached elsewhere is moved.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            tracing::warn!(?parent, ?child, "Rejected attachment: circular ancestry");
            return Err(TreeError::CyclicAncestry { parent, child });
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Insert a weighted leaf under `parent`. Returns the new node's ID.
    pub fn push_leaf(&mut self, parent: NodeId, weight: f64, payload: T) -> NodeId {
        let id = self.insert(TreeNode::leaf(weight, payload));
        self.attach(parent, id);
        id
    }

    /// Insert an empty group under `parent`. Returns the new node's ID.
    pub fn push_group(&mut self, parent: NodeId) -> NodeId {
        let id = self.insert(TreeNode::group());
        self.attach(parent, id);
        id
    }

    // Callers guarantee `child` is not an ancestor of `parent`.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.index()].parent {
            self.nodes[old.index()].children.retain(|&id| id != child);
            self.invalidate_upwards(old);
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        self.invalidate_upwards(parent);
    }

    /// Reset the flattened views of `node` and every ancestor.
    pub(crate) fn invalidate_upwards(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = &mut self.nodes[id.index()];
            n.tree_items.clear();
            n.leaf_models.clear();
            current = n.parent;
        }
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &TreeNode<T> {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID. Structure is not reachable through this.
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode<T> {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing hangs off the root. Detached nodes don't count.
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root.index()].children.is_empty()
    }

    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        &self.nodes[parent.index()].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn has_children(&self, node: NodeId) -> bool {
        self.nodes[node.index()].has_children()
    }

    /// Iterate from `node`'s parent up to its root.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            current: self.nodes[node.index()].parent,
        }
    }

    /// 0 for a parentless node, otherwise `1 + depth(parent)`.
    pub fn depth(&self, node: NodeId) -> u32 {
        self.ancestors(node).count() as u32
    }

    pub fn set_order(&mut self, node: NodeId, order: i32) {
        self.nodes[node.index()].order = order;
    }

    /// Change a leaf's weight. Cached flattened views stay valid.
    pub fn set_weight(&mut self, node: NodeId, weight: f64) {
        self.nodes[node.index()].weight = weight;
    }
}

/// Iterator over the ancestors of a node.
pub struct Ancestors<'a, T> {
    tree: &'a TreeModel<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].parent;
        Some(id)
    }
}
