//! Binding module
//!
//! Hierarchical key/value + key/texture resolution used by scene passes and
//! draw passes. Scopes are chained; lookups walk from the innermost bound
//! scope outward and the first scope defining a name wins.

mod property_map;
mod binding_scope;
mod binding_context;

pub use property_map::{PropertyMap, PropertyValue, PropertyType, PropertyData};
pub use binding_scope::BindingScope;
pub use binding_context::BindingContext;
