/// ScenePass trait - the polymorphic unit of work scheduled by the pass graph.

use crate::error::Result;
use crate::graphics_device::DeviceHandle;
use crate::scene_renderer::{ScenePassContext, SceneResources};
use super::pass_registry::PassRegistry;

/// Scene rendering pass
///
/// Implemented by pluggable pass packages (G-buffer, shadow maps, lighting, ...).
pub trait ScenePass {
    /// Names of the passes that must render before this one
    ///
    /// Called only once, right after the pass has been created.
    fn dependencies(&self) -> Vec<String> {
        Vec::new()
    }

    /// Render the pass
    ///
    /// Called at most once per frame and viewport, after all dependencies.
    /// Passes using frame nodes must re-populate them on every call.
    fn render(&mut self, context: &mut ScenePassContext) -> Result<()>;
}

/// What a pass factory receives: the renderer's shared resources and the device
pub struct ScenePassCreateInfo<'a> {
    pub resources: &'a SceneResources,
    pub device: &'a DeviceHandle,
}

/// Scene pass factory function
pub type ScenePassCreator =
    dyn Fn(&ScenePassCreateInfo<'_>) -> Result<Box<dyn ScenePass>> + Send + Sync;

/// A package of scene passes, registered and unregistered as a unit
///
/// Load/unload happen outside the render loop (application startup, plugin
/// load/unload).
///
/// # Example
///
/// ```ignore
/// struct ShadowPassComponent;
///
/// impl PassComponent for ShadowPassComponent {
///     fn load(&self, registry: &mut PassRegistry) {
///         registry.register("Shadow Maps Rendering", |info| ShadowPass::create(info));
///     }
///
///     fn unload(&self, registry: &mut PassRegistry) {
///         registry.unregister("Shadow Maps Rendering");
///     }
/// }
/// ```
pub trait PassComponent {
    fn load(&self, registry: &mut PassRegistry);

    fn unload(&self, registry: &mut PassRegistry);
}
