use super::arena::{NodeId, TreeModel};

impl<T> TreeModel<T> {
    /// Recompute aggregated weights for every internal node under `node` (bottom-up).
    /// After this, each internal node's `weight` equals the sum of its children's.
    /// Leaves keep their caller-assigned weight. Returns `node`'s weight.
    pub fn sum(&mut self, node: NodeId) -> f64 {
        // Reverse pre-order visits every child before its parent.
        for id in self.preorder(node).into_iter().rev() {
            if self.nodes[id.index()].children.is_empty() {
                continue;
            }
            let total: f64 = self.nodes[id.index()]
                .children
                .iter()
                .map(|child| self.nodes[child.index()].weight)
                .sum();
            self.nodes[id.index()].weight = total;
        }
        self.nodes[node.index()].weight
    }

    /// Sort the children of every node under `node` by `order` (ascending, stable).
    /// This is a structural change: cached views under and above `node` are dropped.
    pub fn sort_children_by_order(&mut self, node: NodeId) {
        for id in self.preorder(node) {
            if self.nodes[id.index()].children.len() < 2 {
                continue;
            }
            let mut children = std::mem::take(&mut self.nodes[id.index()].children);
            children.sort_by_key(|child| self.nodes[child.index()].order);
            self.nodes[id.index()].children = children;
        }
        self.clear_caches(node);
        self.invalidate_upwards(node);
    }

    /// Direct children of `node`, with each child's `depth` refreshed.
    pub fn items(&mut self, node: NodeId) -> Vec<NodeId> {
        let depth = self.depth(node) + 1;
        let children = self.nodes[node.index()].children.clone();
        for &child in &children {
            self.nodes[child.index()].depth = depth;
        }
        children
    }

    pub(crate) fn preorder(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend_from_slice(&self.nodes[id.index()].children);
        }
        out
    }
}
