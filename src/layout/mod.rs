pub mod squarify;

pub use squarify::{squarify, worst_aspect_ratio};

use crate::error::TreeError;
use crate::tree::arena::{NodeId, TreeModel};

/// An axis-aligned rectangle: `x, y` is the top-left corner.
/// Units are whatever the caller passes to layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// `max(w/h, h/w)`; infinite for a zero-area rectangle.
    pub fn aspect_ratio(&self) -> f64 {
        if self.w <= 0.0 || self.h <= 0.0 {
            return f64::INFINITY;
        }
        (self.w / self.h).max(self.h / self.w)
    }

    /// Area shared with `other` (0 when they only touch).
    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Whether `other` lies inside `self`, allowing `eps` of rounding at the edges.
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Maximum nesting below the layout root before the tree is rejected as malformed
    pub max_depth: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl<T> TreeModel<T> {
    /// Lay out `root`'s subtree into `bounds` with the default config.
    pub fn layout(&mut self, root: NodeId, bounds: Rect) -> Result<(), TreeError> {
        self.layout_with(root, bounds, &LayoutConfig::default())
    }

    /// Recompute weights under `root`, then assign every node in the subtree its
    /// bounds: children tile their parent's rectangle with areas proportional to
    /// their weights. Also refreshes `depth`.
    pub fn layout_with(
        &mut self,
        root: NodeId,
        bounds: Rect,
        config: &LayoutConfig,
    ) -> Result<(), TreeError> {
        let depth = self.depth(root);
        if !self.has_children(root) {
            let node = self.get_mut(root);
            node.bounds = Some(bounds);
            node.depth = depth;
            return Ok(());
        }

        let total = self.sum(root);
        tracing::debug!(
            ?root,
            children = self.children(root).len(),
            total,
            "Laying out {:.0}x{:.0} area",
            bounds.w,
            bounds.h
        );
        self.layout_children(root, bounds, depth, 0, config)
    }

    /// Lay out `root` again into the bounds it was last given. No-op if it never was.
    pub fn relayout(&mut self, root: NodeId) -> Result<(), TreeError> {
        match self.get(root).bounds {
            Some(bounds) => self.layout(root, bounds),
            None => Ok(()),
        }
    }

    /// Tile the true leaves under `root` directly into `bounds`, skipping
    /// intermediate groups. Only the leaves' bounds are written.
    pub fn layout_tiles(&mut self, root: NodeId, bounds: Rect) {
        let ids = self.tree_item_ids(root).to_vec();
        let weights: Vec<f64> = ids.iter().map(|&id| self.get(id).weight).collect();
        let rects = squarify(&weights, bounds);
        for (id, rect) in ids.into_iter().zip(rects) {
            self.get_mut(id).bounds = Some(rect);
        }
    }

    // Weights are already summed for the whole subtree.
    fn layout_children(
        &mut self,
        parent: NodeId,
        bounds: Rect,
        depth: u32,
        level: u32,
        config: &LayoutConfig,
    ) -> Result<(), TreeError> {
        {
            let node = self.get_mut(parent);
            node.bounds = Some(bounds);
            node.depth = depth;
        }
        if !self.has_children(parent) {
            return Ok(());
        }
        if level >= config.max_depth {
            tracing::warn!(
                ?parent,
                "Layout stopped: nesting exceeds {} levels",
                config.max_depth
            );
            return Err(TreeError::MalformedTree {
                max_depth: config.max_depth,
            });
        }

        let children = self.children(parent).to_vec();
        let weights: Vec<f64> = children.iter().map(|&id| self.get(id).weight).collect();
        let rects = squarify(&weights, bounds);

        for (&child, &rect) in children.iter().zip(&rects) {
            self.get_mut(child).bounds = Some(rect);
        }
        for i in (0..children.len()).rev() {
            self.layout_children(children[i], rects[i], depth + 1, level + 1, config)?;
        }
        Ok(())
    }
}
