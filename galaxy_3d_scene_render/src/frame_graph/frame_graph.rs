/// Frame graph - arena of frame nodes with a permanent root.
///
/// Scene passes create frame nodes once (one per shadow-casting light, per
/// offscreen target, ...) and, every frame, fill them with draw batches and
/// link them to the root or to each other. The renderer then renders the
/// root: dependencies first, each node at most once per render stamp, and
/// every rendered node is cleared for the next frame.
///
/// Nodes shared between passes can be published under a name.

use std::mem;
use glam::Mat4;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::binding::BindingContext;
use crate::error::{Error, Result};
use crate::graphics_device::DrawPassHandle;
use crate::scene_renderer::{FrameId, RenderStamp};
use crate::engine_warn;
use super::frame_node::FrameNode;

new_key_type! {
    /// Stable key of a frame node inside a FrameGraph
    pub struct FrameNodeKey;
}

/// Arena of frame nodes
pub struct FrameGraph {
    nodes: SlotMap<FrameNodeKey, FrameNode>,
    named: FxHashMap<String, FrameNodeKey>,
    root: FrameNodeKey,
}

impl FrameGraph {
    /// Create a frame graph holding only its root node
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create a frame graph with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(capacity.max(1));
        let root = nodes.insert(FrameNode::new());
        Self {
            nodes,
            named: FxHashMap::default(),
            root,
        }
    }

    /// Root node, rendered by the scene renderer after all scene passes
    pub fn root(&self) -> FrameNodeKey {
        self.root
    }

    // ===== NODES =====

    /// Create a new empty node
    pub fn create_node(&mut self) -> FrameNodeKey {
        self.nodes.insert(FrameNode::new())
    }

    /// Destroy a node
    ///
    /// The root can't be destroyed. Names referring to the node are removed;
    /// edges from other nodes are skipped when rendered.
    /// Returns `false` if nothing was destroyed.
    pub fn remove_node(&mut self, key: FrameNodeKey) -> bool {
        if key == self.root {
            engine_warn!("galaxy3d::FrameGraph", "The root frame node can't be removed");
            return false;
        }
        if self.nodes.remove(key).is_none() {
            return false;
        }
        self.named.retain(|_, named_key| *named_key != key);
        true
    }

    pub fn contains(&self, key: FrameNodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: FrameNodeKey) -> Option<&FrameNode> {
        self.nodes.get(key)
    }

    pub fn node_mut(&mut self, key: FrameNodeKey) -> Option<&mut FrameNode> {
        self.nodes.get_mut(key)
    }

    /// Get a node or fail with `InvalidResource`
    pub fn get(&self, key: FrameNodeKey) -> Result<&FrameNode> {
        self.nodes
            .get(key)
            .ok_or_else(|| Error::InvalidResource(format!("Frame node {:?} not found", key)))
    }

    /// Get a mutable node or fail with `InvalidResource`
    pub fn get_mut(&mut self, key: FrameNodeKey) -> Result<&mut FrameNode> {
        self.nodes
            .get_mut(key)
            .ok_or_else(|| Error::InvalidResource(format!("Frame node {:?} not found", key)))
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // ===== FRAME CONTENT =====

    /// Drop the batches and dependencies of every node
    ///
    /// Rendering consumes only the nodes it reaches. Content left behind by an
    /// aborted frame, or by nodes never linked under the root, is dropped here.
    pub fn reset(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear();
        }
    }

    /// Append a draw batch to `key`
    pub fn add_pass(&mut self, key: FrameNodeKey, pass: DrawPassHandle, priority: i32) -> Result<()> {
        self.get_mut(key)?.add_pass(pass, priority);
        Ok(())
    }

    /// Make `key` depend on `dependency` for this frame
    ///
    /// # Errors
    ///
    /// `InvalidResource` if either node doesn't exist or if both are the same node.
    pub fn add_dependency(&mut self, key: FrameNodeKey, dependency: FrameNodeKey) -> Result<()> {
        if key == dependency {
            return Err(Error::InvalidResource(format!(
                "Frame node {:?} can't depend on itself", key)));
        }
        if !self.nodes.contains_key(dependency) {
            return Err(Error::InvalidResource(format!(
                "Frame node {:?} not found", dependency)));
        }
        self.get_mut(key)?.add_dependency(dependency);
        Ok(())
    }

    /// Frame id of the last render of `key`
    pub fn rendered_frame_id(&self, key: FrameNodeKey) -> Option<FrameId> {
        self.nodes.get(key).map(|node| node.rendered_frame_id())
    }

    // ===== NAMED NODES =====

    /// Publish `key` under `name`, replacing any previous node of that name
    ///
    /// Returns the node previously published under `name`.
    pub fn insert_named(&mut self, name: &str, key: FrameNodeKey) -> Option<FrameNodeKey> {
        self.named.insert(name.to_string(), key)
    }

    /// Unpublish `name` (the node itself is kept)
    pub fn remove_named(&mut self, name: &str) -> Option<FrameNodeKey> {
        self.named.remove(name)
    }

    /// Find the node published under `name`
    pub fn find_named(&self, name: &str) -> Option<FrameNodeKey> {
        self.named.get(name).copied()
    }

    /// Get the node published under `name`
    ///
    /// # Errors
    ///
    /// `InvalidResource` if no node is published under `name`.
    pub fn get_named(&self, name: &str) -> Result<FrameNodeKey> {
        self.find_named(name).ok_or_else(|| {
            Error::InvalidResource(format!("Frame node '{}' has not been found", name))
        })
    }

    /// Number of published names
    pub fn named_count(&self) -> usize {
        self.named.len()
    }

    // ===== RENDER =====

    /// Render `key`: dependencies, then batches in priority order
    ///
    /// The node's scope is bound in a child of `bindings` while its batches
    /// render. Every rendered node is stamped and cleared, even on error.
    /// A node already rendered with `stamp` (or a later one) is skipped.
    pub fn render(
        &mut self,
        key: FrameNodeKey,
        stamp: RenderStamp,
        bindings: &BindingContext<'_>,
        view_projection: &Mat4,
    ) -> Result<()> {
        let (dependencies, mut batches, need_sort, scope) = match self.nodes.get_mut(key) {
            Some(node) if node.is_rendered(stamp) => return Ok(()),
            Some(node) => {
                node.rendered = Some(stamp);
                let need_sort = mem::take(&mut node.need_sort);
                (
                    mem::take(&mut node.dependencies),
                    mem::take(&mut node.batches),
                    need_sort,
                    node.scope().clone(),
                )
            }
            None => {
                engine_warn!("galaxy3d::FrameGraph", "Frame node {:?} not found, skipped", key);
                return Ok(());
            }
        };

        for dependency in dependencies {
            self.render(dependency, stamp, bindings, view_projection)?;
        }

        if need_sort {
            batches.sort_by_key(|batch| batch.priority);
        }

        let mut node_bindings = BindingContext::with_parent(bindings);
        node_bindings.bind(&scope)?;
        for batch in &batches {
            batch.pass.borrow_mut().render(view_projection, &node_bindings)?;
        }
        Ok(())
    }
}

impl Default for FrameGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frame_graph_tests.rs"]
mod tests;
