/// Scene pass registry - process-wide catalog of pass factories by name.
///
/// Pass packages register factories at startup (usually through a
/// PassComponent). Scene renderers create pass instances by name when a
/// pass is added, and again for every dependency they resolve.
///
/// The Engine owns one registry; standalone registries are handy in tests.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_warn};
use super::scene_pass::{PassComponent, ScenePass, ScenePassCreateInfo, ScenePassCreator};

/// Registry of scene pass factories
///
/// Cloning is cheap: clones share the registered factories.
#[derive(Clone)]
pub struct PassRegistry {
    creators: FxHashMap<String, Arc<ScenePassCreator>>,
}

impl PassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            creators: FxHashMap::default(),
        }
    }

    /// Register a pass factory under `name`
    ///
    /// A factory already registered under the same name is replaced.
    /// Returns `true` if a previous factory was replaced.
    pub fn register<F>(&mut self, name: &str, creator: F) -> bool
    where
        F: Fn(&ScenePassCreateInfo<'_>) -> Result<Box<dyn ScenePass>> + Send + Sync + 'static,
    {
        let replaced = self.creators
            .insert(name.to_string(), Arc::new(creator))
            .is_some();

        if replaced {
            engine_warn!("galaxy3d::PassRegistry",
                "Scene pass '{}' was already registered, previous factory replaced", name);
        } else {
            engine_debug!("galaxy3d::PassRegistry", "Scene pass '{}' registered", name);
        }
        replaced
    }

    /// Unregister the factory of `name`
    ///
    /// Returns `false` if no factory was registered under that name.
    /// Pass instances already created are not affected.
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.creators.remove(name).is_some();
        if removed {
            engine_debug!("galaxy3d::PassRegistry", "Scene pass '{}' unregistered", name);
        }
        removed
    }

    /// Whether a factory is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }

    /// Get the factory registered under `name`
    ///
    /// The factory is shared: callers can invoke it after releasing any lock
    /// held on the registry.
    ///
    /// # Errors
    ///
    /// `UnknownPass` if nothing is registered under `name`.
    pub fn creator(&self, name: &str) -> Result<Arc<ScenePassCreator>> {
        self.creators
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownPass(name.to_string()))
    }

    /// Create a new pass instance of `name`
    pub fn create(&self, name: &str, info: &ScenePassCreateInfo<'_>) -> Result<Box<dyn ScenePass>> {
        let creator = self.creator(name)?;
        creator(info)
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// Get all registered pass names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.creators.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    // ===== COMPONENTS =====

    /// Register every pass of a component
    pub fn load_component(&mut self, component: &dyn PassComponent) {
        component.load(self);
    }

    /// Unregister every pass of a component
    pub fn unload_component(&mut self, component: &dyn PassComponent) {
        component.unload(self);
    }

    /// Remove all factories
    pub fn clear(&mut self) {
        self.creators.clear();
    }
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "pass_registry_tests.rs"]
mod tests;
