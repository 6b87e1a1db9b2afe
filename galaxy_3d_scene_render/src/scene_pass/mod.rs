//! Scene pass module
//!
//! Scene passes are named units of rendering work with declared dependencies.
//! Passes are created by name through the PassRegistry and resolved into a
//! persistent, priority-ordered DAG (PassGraph) owned by each SceneRenderer.

mod scene_pass;
mod pass_registry;
mod pass_graph;

pub use scene_pass::{ScenePass, ScenePassCreator, ScenePassCreateInfo, PassComponent};
pub use pass_registry::PassRegistry;
pub use pass_graph::{PassGraph, PassNodeKey, PassFactory};

#[cfg(test)]
pub(crate) mod mock_scene_pass;
