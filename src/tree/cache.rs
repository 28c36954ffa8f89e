use super::arena::{NodeId, TreeModel, TreeNode};

/// Lazily computed view. Reset to `Unset` by every structural mutation.
#[derive(Debug, Clone)]
pub enum Cached<V> {
    Unset,
    Valid(V),
}

impl<V> Cached<V> {
    pub fn get(&self) -> Option<&V> {
        match self {
            Cached::Valid(v) => Some(v),
            Cached::Unset => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Cached::Valid(_))
    }

    pub fn clear(&mut self) {
        *self = Cached::Unset;
    }
}

impl<V> Default for Cached<V> {
    fn default() -> Self {
        Cached::Unset
    }
}

impl<T> TreeModel<T> {
    /// Every true leaf under `root`, depth-first with the last child visited first.
    /// A childless root yields itself. Only the cache fill needs `&mut`; resolve
    /// the ids with [`TreeModel::get`] or [`TreeModel::nodes`].
    pub fn flattened_tree_items(&mut self, root: NodeId) -> Vec<NodeId> {
        self.tree_item_ids(root).to_vec()
    }

    /// Nodes whose first child is a leaf ("leaf groups"), in the same order as
    /// [`TreeModel::flattened_tree_items`]. Descent stops at such a node, so a
    /// group mixing leaves and subgroups is reported once, as itself.
    pub fn flattened_leaf_models(&mut self, root: NodeId) -> Vec<NodeId> {
        self.leaf_model_ids(root).to_vec()
    }

    /// The [`TreeModel::flattened_leaf_models`] that carry a payload.
    pub fn flattened_leaf_items(&mut self, root: NodeId) -> Vec<NodeId> {
        self.leaf_model_ids(root);
        self.nodes[root.index()]
            .leaf_models
            .get()
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| self.nodes[id.index()].payload.is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve ids from the flattened views without holding a mutable borrow.
    pub fn nodes<'a>(&'a self, ids: &'a [NodeId]) -> impl Iterator<Item = &'a TreeNode<T>> + 'a {
        ids.iter().map(move |id| &self.nodes[id.index()])
    }

    /// Drop the cached views of every node in `root`'s subtree.
    pub fn clear_caches(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.tree_items.clear();
            node.leaf_models.clear();
            stack.extend_from_slice(&node.children);
        }
    }

    pub(crate) fn tree_item_ids(&mut self, root: NodeId) -> &[NodeId] {
        if !self.nodes[root.index()].tree_items.is_valid() {
            let items = self.collect_tree_items(root);
            tracing::trace!(?root, count = items.len(), "Cached tree items");
            self.nodes[root.index()].tree_items = Cached::Valid(items);
        }
        self.nodes[root.index()]
            .tree_items
            .get()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn leaf_model_ids(&mut self, root: NodeId) -> &[NodeId] {
        if !self.nodes[root.index()].leaf_models.is_valid() {
            let models = self.collect_leaf_models(root);
            tracing::trace!(?root, count = models.len(), "Cached leaf models");
            self.nodes[root.index()].leaf_models = Cached::Valid(models);
        }
        self.nodes[root.index()]
            .leaf_models
            .get()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Explicit stack: pushing children in index order pops the last child first.
    fn collect_tree_items(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            if node.children.is_empty() {
                out.push(id);
            } else {
                stack.extend_from_slice(&node.children);
            }
        }
        out
    }

    fn collect_leaf_models(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            let Some(&first) = node.children.first() else {
                continue;
            };
            if self.nodes[first.index()].children.is_empty() {
                out.push(id);
            } else {
                stack.extend_from_slice(&node.children);
            }
        }
        out
    }
}
