//! Tree-ensemble classifier representation.

#[allow(clippy::module_inception)]
mod forest;
mod tree;

pub use forest::Forest;
pub use tree::{DecisionTree, NodeId, TreeBuilder};
