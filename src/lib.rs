// Public library interface for treemap-rs
// The debug-layout binary drives the same modules.

pub mod error;
pub mod layout;
pub mod tree;

pub use error::TreeError;
pub use layout::{squarify, LayoutConfig, Rect};
pub use tree::arena::{NodeId, TreeModel, TreeNode};
