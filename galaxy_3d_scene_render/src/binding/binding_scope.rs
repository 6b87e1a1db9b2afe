/// Binding scope - one level of the binding chain.
///
/// A scope holds local properties and local textures. It is a shared handle:
/// clones refer to the same scope, so the owner (renderer, viewport, frame node)
/// keeps editing values while the scope is bound into a BindingContext.
///
/// A scope is bound to at most one context at a time.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use crate::graphics_device::{Texture, TextureList};
use super::property_map::{PropertyData, PropertyMap, PropertyValue};

#[derive(Default)]
struct ScopeData {
    properties: RefCell<PropertyMap>,
    textures: RefCell<TextureList>,
    bound: Cell<bool>,
}

/// Shared handle to a scope of properties and textures
#[derive(Clone, Default)]
pub struct BindingScope {
    data: Rc<ScopeData>,
}

impl BindingScope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope from existing properties and textures
    pub fn with(properties: PropertyMap, textures: TextureList) -> Self {
        Self {
            data: Rc::new(ScopeData {
                properties: RefCell::new(properties),
                textures: RefCell::new(textures),
                bound: Cell::new(false),
            }),
        }
    }

    // ===== PROPERTIES =====

    /// Set a typed property in this scope
    pub fn set_property<T: PropertyData>(&self, name: &str, value: T) {
        self.data.properties.borrow_mut().set(name, value);
    }

    /// Set a raw property value in this scope
    pub fn set_property_value(&self, name: &str, value: PropertyValue) {
        self.data.properties.borrow_mut().set_value(name, value);
    }

    /// Local property lookup (does not walk any chain)
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.data.properties.borrow().find(name).copied()
    }

    pub fn remove_property(&self, name: &str) -> Option<PropertyValue> {
        self.data.properties.borrow_mut().remove(name)
    }

    /// Replace all local properties
    pub fn set_properties(&self, properties: PropertyMap) {
        *self.data.properties.borrow_mut() = properties;
    }

    pub fn properties(&self) -> Ref<'_, PropertyMap> {
        self.data.properties.borrow()
    }

    pub fn properties_mut(&self) -> RefMut<'_, PropertyMap> {
        self.data.properties.borrow_mut()
    }

    // ===== TEXTURES =====

    /// Set a texture in this scope
    pub fn set_texture(&self, name: &str, texture: Arc<dyn Texture>) {
        self.data.textures.borrow_mut().insert(name.to_string(), texture);
    }

    /// Local texture lookup (does not walk any chain)
    pub fn texture(&self, name: &str) -> Option<Arc<dyn Texture>> {
        self.data.textures.borrow().get(name).cloned()
    }

    pub fn remove_texture(&self, name: &str) -> Option<Arc<dyn Texture>> {
        self.data.textures.borrow_mut().remove(name)
    }

    /// Replace all local textures
    pub fn set_textures(&self, textures: TextureList) {
        *self.data.textures.borrow_mut() = textures;
    }

    pub fn textures(&self) -> Ref<'_, TextureList> {
        self.data.textures.borrow()
    }

    pub fn textures_mut(&self) -> RefMut<'_, TextureList> {
        self.data.textures.borrow_mut()
    }

    // ===== BINDING STATE =====

    /// Whether this scope is currently bound to a BindingContext
    pub fn is_bound(&self) -> bool {
        self.data.bound.get()
    }

    /// Whether both handles refer to the same scope
    pub fn same_scope(&self, other: &BindingScope) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub(crate) fn set_bound(&self, bound: bool) {
        self.data.bound.set(bound);
    }
}

impl fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let textures: Vec<String> = self.data.textures.borrow().keys().cloned().collect();
        f.debug_struct("BindingScope")
            .field("properties", &*self.data.properties.borrow())
            .field("textures", &textures)
            .field("bound", &self.data.bound.get())
            .finish()
    }
}
