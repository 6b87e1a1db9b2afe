/// Scene pass context - what a scene pass sees while it renders.
///
/// The context exposes the current frame id and render stamp, the frame
/// graph with its root node, the device, the renderer's shared resources,
/// the binding context of the current viewport, and the view/projection
/// matrices of the current camera.
///
/// The view matrices are also published as properties of the context's own
/// scope, which is the outermost scope of the binding context:
/// `viewMatrix`, `projectionMatrix`, `viewProjectionMatrix` (Mat4) and
/// `worldViewPosition` (Vec4).

use std::cell::{Ref, RefMut};
use glam::{Mat4, Vec4};
use crate::binding::{BindingContext, BindingScope, PropertyMap};
use crate::camera::{self, Camera};
use crate::error::Result;
use crate::frame_graph::{FrameGraph, FrameNodeKey};
use crate::graphics_device::{DeviceHandle, MaterialList, TextureList};
use super::render_stamp::{FrameId, RenderStamp};
use super::scene_resources::SceneResources;

pub const VIEW_MATRIX_PROPERTY: &str = "viewMatrix";
pub const PROJECTION_MATRIX_PROPERTY: &str = "projectionMatrix";
pub const VIEW_PROJECTION_MATRIX_PROPERTY: &str = "viewProjectionMatrix";
pub const WORLD_VIEW_POSITION_PROPERTY: &str = "worldViewPosition";

/// Context handed to every scene pass render call
pub struct ScenePassContext {
    stamp: RenderStamp,
    bindings: BindingContext<'static>,
    view_scope: BindingScope,
    camera: Option<Camera>,
    view_tm: Mat4,
    projection_tm: Mat4,
    view_projection_tm: Mat4,
    frame_graph: FrameGraph,
    resources: SceneResources,
    device: DeviceHandle,
}

impl ScenePassContext {
    /// Create a context with identity view matrices
    pub fn new(device: DeviceHandle, resources: SceneResources) -> Result<Self> {
        Self::with_capacity(device, resources, 1)
    }

    /// Create a context whose frame graph has room for `frame_nodes` nodes
    pub fn with_capacity(
        device: DeviceHandle,
        resources: SceneResources,
        frame_nodes: usize,
    ) -> Result<Self> {
        let view_scope = BindingScope::new();
        let mut bindings = BindingContext::new();
        bindings.bind(&view_scope)?;

        let mut context = Self {
            stamp: RenderStamp::default(),
            bindings,
            view_scope,
            camera: None,
            view_tm: Mat4::IDENTITY,
            projection_tm: Mat4::IDENTITY,
            view_projection_tm: Mat4::IDENTITY,
            frame_graph: FrameGraph::with_capacity(frame_nodes),
            resources,
            device,
        };
        context.set_view(Mat4::IDENTITY, Mat4::IDENTITY);
        Ok(context)
    }

    // ===== FRAME =====

    /// Frame id of the frame being rendered (0 before the first frame)
    pub fn current_frame_id(&self) -> FrameId {
        self.stamp.frame_id
    }

    /// Stamp of the frame and viewport being rendered
    pub fn render_stamp(&self) -> RenderStamp {
        self.stamp
    }

    // ===== FRAME GRAPH =====

    /// Root frame node, rendered after all scene passes
    pub fn root_frame_node(&self) -> FrameNodeKey {
        self.frame_graph.root()
    }

    pub fn frame_graph(&self) -> &FrameGraph {
        &self.frame_graph
    }

    pub fn frame_graph_mut(&mut self) -> &mut FrameGraph {
        &mut self.frame_graph
    }

    // ===== RESOURCES =====

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Renderer-wide properties
    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        self.resources.properties()
    }

    pub fn properties_mut(&self) -> RefMut<'_, PropertyMap> {
        self.resources.properties_mut()
    }

    /// Renderer-wide textures
    pub fn textures(&self) -> Ref<'_, TextureList> {
        self.resources.textures()
    }

    pub fn textures_mut(&self) -> RefMut<'_, TextureList> {
        self.resources.textures_mut()
    }

    pub fn materials(&self) -> Ref<'_, MaterialList> {
        self.resources.materials()
    }

    /// Binding context of the current viewport
    ///
    /// Scopes, innermost first: viewport scope, shared scope, view scope.
    /// Passes needing their own scope chain a child context under it.
    pub fn bindings(&self) -> &BindingContext<'static> {
        &self.bindings
    }

    // ===== VIEW =====

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Set the current camera (identity matrices without camera)
    pub fn set_camera(&mut self, camera: Option<&Camera>) {
        self.camera = camera.copied();
        match camera {
            Some(camera) => self.set_view(*camera.view_matrix(), *camera.projection_matrix()),
            None => self.set_view(Mat4::IDENTITY, Mat4::IDENTITY),
        }
    }

    /// Set the view matrices and publish them in the view scope
    pub fn set_view(&mut self, view: Mat4, projection: Mat4) {
        self.view_tm = view;
        self.projection_tm = projection;
        self.view_projection_tm = projection * view;

        let mut properties = self.view_scope.properties_mut();
        properties.set(VIEW_MATRIX_PROPERTY, self.view_tm);
        properties.set(PROJECTION_MATRIX_PROPERTY, self.projection_tm);
        properties.set(VIEW_PROJECTION_MATRIX_PROPERTY, self.view_projection_tm);
        properties.set::<Vec4>(WORLD_VIEW_POSITION_PROPERTY, camera::world_position(&view));
    }

    pub fn view_tm(&self) -> &Mat4 {
        &self.view_tm
    }

    pub fn projection_tm(&self) -> &Mat4 {
        &self.projection_tm
    }

    pub fn view_projection_tm(&self) -> &Mat4 {
        &self.view_projection_tm
    }

    // ===== RENDERER =====

    pub(crate) fn set_stamp(&mut self, stamp: RenderStamp) {
        self.stamp = stamp;
    }

    pub(crate) fn bind(&mut self, scope: &BindingScope) -> Result<()> {
        self.bindings.bind(scope)
    }

    pub(crate) fn unbind(&mut self, scope: &BindingScope) -> Result<()> {
        self.bindings.unbind(scope)
    }

    /// Render the root frame node with the current stamp and view
    pub(crate) fn render_frame_graph(&mut self) -> Result<()> {
        let root = self.frame_graph.root();
        self.frame_graph.render(root, self.stamp, &self.bindings, &self.view_projection_tm)
    }
}

#[cfg(test)]
#[path = "scene_pass_context_tests.rs"]
mod tests;
