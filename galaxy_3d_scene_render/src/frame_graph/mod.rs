//! Frame graph module
//!
//! Frame nodes are long-lived containers whose edges and draw batches are
//! rebuilt every frame by scene passes ("render this shadow map before me").

mod frame_node;
mod frame_graph;

pub use frame_node::FrameNode;
pub use frame_graph::{FrameGraph, FrameNodeKey};
