pub mod aggregate;
pub mod arena;
pub mod cache;

use std::collections::HashMap;
use std::hash::Hash;

use self::arena::{NodeId, TreeModel, TreeNode};

/// Build a one-level tree: the root with one leaf per entry.
///
/// Entries without a positive weight are skipped. The root keeps `root`
/// as its payload with weight 1, so an empty input still yields a single
/// tile covering the whole viewport.
pub fn build_flat<T, I>(root: T, entries: I) -> TreeModel<T>
where
    I: IntoIterator<Item = (f64, T)>,
{
    let mut tree = TreeModel::new(TreeNode::leaf(1.0, root));
    let root_id = tree.root;
    let mut skipped = 0usize;

    for (weight, payload) in entries {
        if !(weight > 0.0) {
            skipped += 1;
            continue;
        }
        tree.push_leaf(root_id, weight, payload);
    }

    tracing::debug!(
        "Flat tree built: {} leaves, {} skipped",
        tree.children(root_id).len(),
        skipped
    );
    tree
}

/// Build a two-level tree: root → one group per distinct key → leaves.
///
/// Groups appear in first-seen key order and leaves in input order.
/// `group_payload` is asked once per new key for the group's payload.
pub fn build_grouped<K, T, I, F>(root: T, entries: I, mut group_payload: F) -> TreeModel<T>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, f64, T)>,
    F: FnMut(&K) -> Option<T>,
{
    let mut tree = TreeModel::new(TreeNode::leaf(1.0, root));
    let root_id = tree.root;
    let mut groups: HashMap<K, NodeId> = HashMap::new();

    for (key, weight, payload) in entries {
        if !(weight > 0.0) {
            continue;
        }
        let group = match groups.get(&key) {
            Some(&id) => id,
            None => {
                let id = tree.push_group(root_id);
                tree.get_mut(id).payload = group_payload(&key);
                groups.insert(key, id);
                id
            }
        };
        tree.push_leaf(group, weight, payload);
    }

    tracing::debug!(
        "Grouped tree built: {} total nodes, {} groups",
        tree.len(),
        groups.len()
    );
    tree
}
