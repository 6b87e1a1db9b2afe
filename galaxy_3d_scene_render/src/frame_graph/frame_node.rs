/// Frame node - draw batches and dependencies for one frame.
///
/// Batches and dependencies are transient: they are cleared right after the
/// node renders, so passes re-populate them on every frame they execute.

use crate::binding::BindingScope;
use crate::graphics_device::DrawPassHandle;
use crate::scene_renderer::{FrameId, RenderStamp};
use super::frame_graph::FrameNodeKey;

pub(super) struct DrawBatch {
    pub(super) pass: DrawPassHandle,
    pub(super) priority: i32,
}

/// Transient node of the frame graph
#[derive(Default)]
pub struct FrameNode {
    pub(super) batches: Vec<DrawBatch>,
    pub(super) dependencies: Vec<FrameNodeKey>,
    pub(super) rendered: Option<RenderStamp>,
    pub(super) need_sort: bool,
    scope: BindingScope,
}

impl FrameNode {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Append a draw batch
    ///
    /// Batches render in priority order; equal priorities keep insertion order.
    pub fn add_pass(&mut self, pass: DrawPassHandle, priority: i32) {
        if let Some(last) = self.batches.last() {
            if last.priority > priority {
                self.need_sort = true;
            }
        }
        self.batches.push(DrawBatch { pass, priority });
    }

    /// Append a dependency rendered before this node's batches
    ///
    /// Duplicate edges are allowed: a node renders once per frame anyway.
    pub fn add_dependency(&mut self, dependency: FrameNodeKey) {
        self.dependencies.push(dependency);
    }

    pub fn passes_count(&self) -> usize {
        self.batches.len()
    }

    pub fn dependencies_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn dependencies(&self) -> &[FrameNodeKey] {
        &self.dependencies
    }

    /// Frame id of the last render of this node (0 if never rendered)
    pub fn rendered_frame_id(&self) -> FrameId {
        self.rendered.map_or(0, |stamp| stamp.frame_id)
    }

    /// Stamp of the last render of this node
    pub fn rendered_stamp(&self) -> Option<RenderStamp> {
        self.rendered
    }

    /// Whether this node already rendered with `stamp` (or a later one)
    pub fn is_rendered(&self, stamp: RenderStamp) -> bool {
        self.rendered.map_or(false, |rendered| rendered >= stamp)
    }

    /// Properties and textures bound while this node's batches render
    pub fn scope(&self) -> &BindingScope {
        &self.scope
    }

    /// Drop this frame's batches and dependencies
    pub fn clear(&mut self) {
        self.batches.clear();
        self.dependencies.clear();
        self.need_sort = false;
    }
}
