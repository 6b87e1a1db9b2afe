/// Scene resources - what every pass of a renderer shares.
///
/// The shared scope holds renderer-wide properties and textures (bound as
/// the outermost viewport scope every frame). Materials are looked up by
/// name by geometry passes.
///
/// SceneResources is a shared handle: clones refer to the same resources.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use crate::binding::{BindingScope, PropertyMap};
use crate::graphics_device::{MaterialList, TextureList};

/// Shared renderer resources
#[derive(Clone, Default)]
pub struct SceneResources {
    shared: BindingScope,
    materials: Rc<RefCell<MaterialList>>,
}

impl SceneResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer-wide scope of properties and textures
    pub fn shared_scope(&self) -> &BindingScope {
        &self.shared
    }

    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        self.shared.properties()
    }

    pub fn properties_mut(&self) -> RefMut<'_, PropertyMap> {
        self.shared.properties_mut()
    }

    pub fn textures(&self) -> Ref<'_, TextureList> {
        self.shared.textures()
    }

    pub fn textures_mut(&self) -> RefMut<'_, TextureList> {
        self.shared.textures_mut()
    }

    pub fn materials(&self) -> Ref<'_, MaterialList> {
        self.materials.borrow()
    }

    pub fn materials_mut(&self) -> RefMut<'_, MaterialList> {
        self.materials.borrow_mut()
    }
}
