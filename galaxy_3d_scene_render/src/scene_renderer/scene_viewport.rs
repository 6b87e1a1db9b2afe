/// Scene viewport - one destination of a frame.
///
/// Holds the destination rectangle, the camera, and a binding scope of
/// viewport-specific properties and textures (bound inside the renderer's
/// shared scope while the viewport renders). A zero-sized rectangle means
/// "the whole window".

use std::cell::Ref;
use std::sync::Arc;
use crate::binding::{BindingScope, PropertyData, PropertyMap};
use crate::camera::Camera;
use crate::graphics_device::{Texture, TextureList, Viewport};

#[derive(Debug, Clone, Default)]
pub struct SceneViewport {
    viewport: Viewport,
    camera: Option<Camera>,
    scope: BindingScope,
}

impl SceneViewport {
    /// Full-window viewport without camera
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(viewport: Viewport, camera: Camera) -> Self {
        Self {
            viewport,
            camera: Some(camera),
            scope: BindingScope::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Set the camera. Without camera, view and projection are identity.
    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    // ===== SCOPE =====

    pub fn scope(&self) -> &BindingScope {
        &self.scope
    }

    pub fn set_property<T: PropertyData>(&self, name: &str, value: T) {
        self.scope.set_property(name, value);
    }

    pub fn set_properties(&self, properties: PropertyMap) {
        self.scope.set_properties(properties);
    }

    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        self.scope.properties()
    }

    pub fn set_texture(&self, name: &str, texture: Arc<dyn Texture>) {
        self.scope.set_texture(name, texture);
    }

    pub fn set_textures(&self, textures: TextureList) {
        self.scope.set_textures(textures);
    }

    pub fn textures(&self) -> Ref<'_, TextureList> {
        self.scope.textures()
    }
}
