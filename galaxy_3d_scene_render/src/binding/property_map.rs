/// Property map - typed values keyed by name.
///
/// Holds the uniform-like configuration values (int, float, 4-vector,
/// 4x4 matrix) that scopes expose to passes.

use glam::{Mat4, Vec4};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};

// ===== PROPERTY TYPES =====

/// Type tag of a property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Int,
    Float,
    Vec4,
    Mat4,
}

impl PropertyType {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Int => "Int",
            PropertyType::Float => "Float",
            PropertyType::Vec4 => "Vec4",
            PropertyType::Mat4 => "Mat4",
        }
    }
}

/// A property value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Float(f32),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl PropertyValue {
    /// Type tag of this value
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Vec4(_) => PropertyType::Vec4,
            PropertyValue::Mat4(_) => PropertyType::Mat4,
        }
    }

    /// Raw bytes of the value, laid out for uniform upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PropertyValue::Int(v) => bytemuck::bytes_of(v),
            PropertyValue::Float(v) => bytemuck::bytes_of(v),
            PropertyValue::Vec4(v) => bytemuck::bytes_of(v),
            PropertyValue::Mat4(v) => bytemuck::bytes_of(v),
        }
    }

    /// Extract a typed value
    ///
    /// `name` is only used to build the error.
    pub fn get<T: PropertyData>(&self, name: &str) -> Result<T> {
        T::from_value(self).ok_or_else(|| Error::PropertyTypeMismatch {
            name: name.to_string(),
            expected: T::TYPE.name(),
            actual: self.property_type().name(),
        })
    }
}

/// Rust types that can be stored in a PropertyMap
pub trait PropertyData: Sized {
    const TYPE: PropertyType;

    fn into_value(self) -> PropertyValue;

    fn from_value(value: &PropertyValue) -> Option<Self>;
}

impl PropertyData for i32 {
    const TYPE: PropertyType = PropertyType::Int;

    fn into_value(self) -> PropertyValue {
        PropertyValue::Int(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyData for f32 {
    const TYPE: PropertyType = PropertyType::Float;

    fn into_value(self) -> PropertyValue {
        PropertyValue::Float(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyData for Vec4 {
    const TYPE: PropertyType = PropertyType::Vec4;

    fn into_value(self) -> PropertyValue {
        PropertyValue::Vec4(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Vec4(v) => Some(*v),
            _ => None,
        }
    }
}

impl PropertyData for Mat4 {
    const TYPE: PropertyType = PropertyType::Mat4;

    fn into_value(self) -> PropertyValue {
        PropertyValue::Mat4(self)
    }

    fn from_value(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Mat4(v) => Some(*v),
            _ => None,
        }
    }
}

// ===== PROPERTY MAP =====

/// Named property values
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    properties: FxHashMap<String, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Set a typed property, replacing any previous value (whatever its type)
    pub fn set<T: PropertyData>(&mut self, name: &str, value: T) {
        self.set_value(name, value.into_value());
    }

    /// Set a raw property value
    pub fn set_value(&mut self, name: &str, value: PropertyValue) {
        match self.properties.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.properties.insert(name.to_string(), value);
            }
        }
    }

    /// Find a property by name
    pub fn find(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Get a typed property, or fail with PropertyNotFound / PropertyTypeMismatch
    pub fn get<T: PropertyData>(&self, name: &str) -> Result<T> {
        self.find(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))?
            .get(name)
    }

    /// Remove a property, returning its value
    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        self.properties.remove(name)
    }

    /// Iterate over (name, value) pairs (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.properties.clear();
    }
}

#[cfg(test)]
#[path = "property_map_tests.rs"]
mod tests;
