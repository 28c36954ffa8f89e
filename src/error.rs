use thiserror::Error;

use crate::tree::arena::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `parent` is already `child` or one of its descendants.
    #[error("Circular ancestry: {child:?} is {parent:?} or one of its ancestors")]
    CyclicAncestry { parent: NodeId, child: NodeId },
    #[error("Tree deeper than the layout limit of {max_depth} levels")]
    MalformedTree { max_depth: u32 },
}
