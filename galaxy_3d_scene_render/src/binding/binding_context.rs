/// Binding context - a chain of scopes resolved innermost-first.
///
/// A context holds a stack of bound scopes and an optional parent context.
/// Lookup walks the stack from the most recently bound scope down to the
/// first one, then continues in the parent. The first scope defining a
/// name wins (shadowing).
///
/// Scopes are bound and unbound with stack discipline: only the innermost
/// scope may be unbound. Dropping a context releases every scope it still
/// holds.

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::graphics_device::Texture;
use super::binding_scope::BindingScope;
use super::property_map::{PropertyData, PropertyValue};

/// Chain of binding scopes
pub struct BindingContext<'p> {
    parent: Option<&'p BindingContext<'p>>,
    scopes: Vec<BindingScope>,
}

impl<'p> BindingContext<'p> {
    /// Create a root context (no parent)
    pub fn new() -> Self {
        Self {
            parent: None,
            scopes: Vec::new(),
        }
    }

    /// Create a context chained under `parent`
    ///
    /// Names not found in this context are resolved in `parent`.
    pub fn with_parent(parent: &'p BindingContext<'p>) -> Self {
        Self {
            parent: Some(parent),
            scopes: Vec::new(),
        }
    }

    /// Parent context, if any
    pub fn parent(&self) -> Option<&'p BindingContext<'p>> {
        self.parent
    }

    /// Number of scopes bound directly to this context
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Whether `scope` is bound directly to this context
    pub fn is_bound(&self, scope: &BindingScope) -> bool {
        self.scopes.iter().any(|s| s.same_scope(scope))
    }

    /// Bind `scope` as the new innermost scope
    ///
    /// # Errors
    ///
    /// `ScopeAlreadyBound` if the scope is bound to any context.
    pub fn bind(&mut self, scope: &BindingScope) -> Result<()> {
        if scope.is_bound() {
            return Err(Error::ScopeAlreadyBound);
        }

        scope.set_bound(true);
        self.scopes.push(scope.clone());
        Ok(())
    }

    /// Unbind `scope`, which must be the innermost scope of this context
    ///
    /// # Errors
    ///
    /// - `ScopeNotBound` if the scope is not bound to this context
    /// - `ScopeUnbindOrder` if another scope was bound after it
    pub fn unbind(&mut self, scope: &BindingScope) -> Result<()> {
        match self.scopes.last() {
            Some(last) if last.same_scope(scope) => {
                scope.set_bound(false);
                self.scopes.pop();
                Ok(())
            }
            _ if self.is_bound(scope) => Err(Error::ScopeUnbindOrder),
            _ => Err(Error::ScopeNotBound),
        }
    }

    /// Unbind every scope of this context, innermost first
    pub fn unbind_all(&mut self) {
        while let Some(scope) = self.scopes.pop() {
            scope.set_bound(false);
        }
    }

    // ===== RESOLUTION =====

    /// Find a property in the chain
    pub fn find_property(&self, name: &str) -> Option<PropertyValue> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.property(name))
            .or_else(|| self.parent.and_then(|parent| parent.find_property(name)))
    }

    /// Resolve a property in the chain
    ///
    /// # Errors
    ///
    /// `PropertyNotFound` if no scope of the chain defines `name`.
    pub fn resolve_property(&self, name: &str) -> Result<PropertyValue> {
        self.find_property(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Resolve a typed property in the chain
    ///
    /// Shadowing is by name: if the innermost definition has another type,
    /// the lookup fails with `PropertyTypeMismatch` instead of falling back.
    pub fn resolve<T: PropertyData>(&self, name: &str) -> Result<T> {
        self.resolve_property(name)?.get(name)
    }

    /// Find a texture in the chain
    pub fn find_texture(&self, name: &str) -> Option<Arc<dyn Texture>> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.texture(name))
            .or_else(|| self.parent.and_then(|parent| parent.find_texture(name)))
    }

    /// Resolve a texture in the chain
    ///
    /// # Errors
    ///
    /// `TextureNotFound` if no scope of the chain defines `name`.
    pub fn resolve_texture(&self, name: &str) -> Result<Arc<dyn Texture>> {
        self.find_texture(name)
            .ok_or_else(|| Error::TextureNotFound(name.to_string()))
    }
}

impl Default for BindingContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BindingContext<'_> {
    fn drop(&mut self) {
        self.unbind_all();
    }
}

#[cfg(test)]
#[path = "binding_context_tests.rs"]
mod tests;
