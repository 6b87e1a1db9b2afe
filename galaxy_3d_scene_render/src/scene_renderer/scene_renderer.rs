/// Scene renderer - orchestrates one frame over a list of viewports.
///
/// A frame:
/// 1. increments the frame id (once, whatever the number of viewports)
/// 2. for each viewport, binds the shared scope then the viewport scope,
///    sets the camera and the device viewport, executes the pass graph and
///    renders the root frame node
/// 3. unbinds the viewport scopes in reverse order, even on error
///
/// The first error aborts the rest of the frame and is returned. The frame
/// id has already advanced, so the next frame starts cleanly.

use std::cell::{Ref, RefMut};
use std::slice;
use std::sync::{Arc, Mutex};
use crate::binding::{BindingScope, PropertyMap};
use crate::engine::Engine;
use crate::error::Result;
use crate::frame_graph::FrameGraph;
use crate::graphics_device::{DeviceHandle, MaterialList, TextureList};
use crate::scene_pass::{PassGraph, PassNodeKey, PassRegistry, ScenePass, ScenePassCreateInfo};
use crate::{engine_debug, engine_err, engine_info};
use super::render_stamp::{FrameId, RenderStamp};
use super::scene_pass_context::ScenePassContext;
use super::scene_resources::SceneResources;
use super::scene_viewport::SceneViewport;

/// Scene renderer configuration
#[derive(Debug, Clone)]
pub struct SceneRendererConfig {
    /// Renderer name, used in log messages
    pub name: String,
    /// Pass nodes pre-allocated in the pass graph
    pub reserved_passes: usize,
    /// Frame nodes pre-allocated in the frame graph
    pub reserved_frame_nodes: usize,
    /// Log every pass execution at TRACE level
    pub trace_passes: bool,
}

impl Default for SceneRendererConfig {
    fn default() -> Self {
        Self {
            name: "Galaxy3D Scene Renderer".to_string(),
            reserved_passes: 16,
            reserved_frame_nodes: 8,
            trace_passes: false,
        }
    }
}

/// Scene renderer
pub struct SceneRenderer {
    config: SceneRendererConfig,
    registry: Arc<Mutex<PassRegistry>>,
    device: DeviceHandle,
    resources: SceneResources,
    passes: PassGraph,
    context: ScenePassContext,
    frame_id: FrameId,
}

impl SceneRenderer {
    /// Create a scene renderer using the Engine's pass registry
    ///
    /// # Errors
    ///
    /// `InitializationFailed` if the Engine has no pass registry.
    pub fn new(device: DeviceHandle) -> Result<Self> {
        Self::with_config(device, SceneRendererConfig::default())
    }

    /// Create a scene renderer using the Engine's pass registry
    pub fn with_config(device: DeviceHandle, config: SceneRendererConfig) -> Result<Self> {
        Self::with_registry(device, Engine::pass_registry()?, config)
    }

    /// Create a scene renderer using a standalone pass registry
    pub fn with_registry(
        device: DeviceHandle,
        registry: Arc<Mutex<PassRegistry>>,
        config: SceneRendererConfig,
    ) -> Result<Self> {
        let resources = SceneResources::new();
        let context = ScenePassContext::with_capacity(
            device.clone(),
            resources.clone(),
            config.reserved_frame_nodes,
        )?;
        let mut passes = PassGraph::with_capacity(config.reserved_passes);
        passes.set_trace(config.trace_passes);

        engine_debug!("galaxy3d::SceneRenderer", "'{}' created", config.name);

        Ok(Self {
            config,
            registry,
            device,
            resources,
            passes,
            context,
            frame_id: 0,
        })
    }

    // ===== PASSES =====

    /// Add the scene pass `name` and its dependencies
    ///
    /// Adding a pass already added is a no-op returning the existing node.
    ///
    /// # Errors
    ///
    /// `UnknownPass`, `CyclicDependency`, or any factory error. The pass
    /// graph is left unchanged on error.
    pub fn add_pass(&mut self, name: &str, priority: i32) -> Result<PassNodeKey> {
        let registry = &self.registry;
        let info = ScenePassCreateInfo {
            resources: &self.resources,
            device: &self.device,
        };

        let mut create = |pass_name: &str| -> Result<Box<dyn ScenePass>> {
            let creator = registry
                .lock()
                .map_err(|_| engine_err!("galaxy3d::SceneRenderer", "PassRegistry lock poisoned"))?
                .creator(pass_name)?;
            creator(&info)
        };

        let key = self.passes.add_root(name, priority, &mut create)?;
        engine_info!("galaxy3d::SceneRenderer",
            "'{}': scene pass '{}' ready ({} pass node(s))",
            self.config.name, name, self.passes.len());
        Ok(key)
    }

    /// Remove the scene pass `name`
    ///
    /// Dependencies still needed by other passes are kept.
    /// Returns `false` if `name` was not added.
    pub fn remove_pass(&mut self, name: &str) -> bool {
        self.passes.remove_root(name)
    }

    /// Number of pass nodes (added passes and their dependencies)
    pub fn passes_count(&self) -> usize {
        self.passes.len()
    }

    pub fn pass_graph(&self) -> &PassGraph {
        &self.passes
    }

    // ===== RENDER =====

    /// Render one frame over `viewports`
    ///
    /// The frame id is incremented even when `viewports` is empty.
    pub fn render(&mut self, viewports: &[SceneViewport]) -> Result<()> {
        self.frame_id += 1;
        let frame_id = self.frame_id;

        for (index, viewport) in viewports.iter().enumerate() {
            self.render_viewport_at(RenderStamp::new(frame_id, index), viewport)?;
        }
        Ok(())
    }

    /// Render one frame over a single viewport
    pub fn render_viewport(&mut self, viewport: &SceneViewport) -> Result<()> {
        self.render(slice::from_ref(viewport))
    }

    fn render_viewport_at(&mut self, stamp: RenderStamp, viewport: &SceneViewport) -> Result<()> {
        let shared = self.resources.shared_scope().clone();
        self.context.bind(&shared)?;
        if let Err(error) = self.context.bind(viewport.scope()) {
            self.context.unbind(&shared)?;
            return Err(error);
        }

        let result = self.execute_viewport(stamp, viewport);
        self.context.frame_graph_mut().reset();

        let unbound = self.context
            .unbind(viewport.scope())
            .and_then(|_| self.context.unbind(&shared));
        result.and(unbound)
    }

    fn execute_viewport(&mut self, stamp: RenderStamp, viewport: &SceneViewport) -> Result<()> {
        self.context.set_stamp(stamp);
        self.context.set_camera(viewport.camera());

        {
            let mut device = self.device.borrow_mut();
            if viewport.viewport().is_zero_sized() {
                device.reset_viewport()?;
            } else {
                device.set_viewport(viewport.viewport())?;
            }
        }

        self.passes.execute(stamp, &mut self.context)?;
        self.context.render_frame_graph()
    }

    /// Frame id of the last frame (0 before the first render)
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &SceneRendererConfig {
        &self.config
    }

    pub fn device(&self) -> &DeviceHandle {
        &self.device
    }

    pub fn context(&self) -> &ScenePassContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ScenePassContext {
        &mut self.context
    }

    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }

    /// Renderer-wide scope (outermost scope of every viewport)
    pub fn shared_scope(&self) -> &BindingScope {
        self.resources.shared_scope()
    }

    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        self.resources.properties()
    }

    pub fn properties_mut(&self) -> RefMut<'_, PropertyMap> {
        self.resources.properties_mut()
    }

    pub fn textures(&self) -> Ref<'_, TextureList> {
        self.resources.textures()
    }

    pub fn textures_mut(&self) -> RefMut<'_, TextureList> {
        self.resources.textures_mut()
    }

    pub fn materials(&self) -> Ref<'_, MaterialList> {
        self.resources.materials()
    }

    pub fn materials_mut(&self) -> RefMut<'_, MaterialList> {
        self.resources.materials_mut()
    }

    pub fn frame_graph(&self) -> &FrameGraph {
        self.context.frame_graph()
    }

    pub fn frame_graph_mut(&mut self) -> &mut FrameGraph {
        self.context.frame_graph_mut()
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.passes.clear();
        engine_debug!("galaxy3d::SceneRenderer", "'{}' destroyed", self.config.name);
    }
}

#[cfg(test)]
#[path = "scene_renderer_tests.rs"]
mod tests;
