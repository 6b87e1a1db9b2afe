//! Error types for the Galaxy3D scene renderer
//!
//! This module defines the error types used throughout the pass scheduling core:
//! pass configuration (registry, dependency resolution), binding resolution
//! (scoped properties and textures) and errors surfaced by the graphics device.

use std::fmt;

/// Result type for Galaxy3D scene rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad error category, used by callers to decide how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Raised while adding passes (unknown pass, dependency loop). Never mid-frame.
    Configuration,
    /// Raised when a pass reads a value no bound scope provides. Recoverable.
    BindingResolution,
    /// Surfaced from the graphics device layer. Aborts the current frame.
    Device,
}

/// Galaxy3D scene renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// No scene pass is registered under this name
    UnknownPass(String),

    /// Pass dependency loop detected while resolving `root`
    CyclicDependency {
        root: String,
        chain: String,
    },

    /// A registered pass factory refused to create its pass
    PassCreationFailed {
        name: String,
        reason: String,
    },

    /// No bound scope defines this property
    PropertyNotFound(String),

    /// No bound scope defines this texture
    TextureNotFound(String),

    /// The property exists but holds a value of another type
    PropertyTypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The scope is already bound to a binding context
    ScopeAlreadyBound,

    /// The scope is not bound to this binding context
    ScopeNotBound,

    /// The scope is bound but is not the innermost one
    ScopeUnbindOrder,

    /// Backend-specific error (graphics device, lock poisoning)
    BackendError(String),

    /// Invalid resource (frame node, texture, pass node)
    InvalidResource(String),

    /// Initialization failed (engine, registry, renderer)
    InitializationFailed(String),
}

impl Error {
    /// Category of this error in the configuration / binding / device taxonomy
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnknownPass(_)
            | Error::CyclicDependency { .. }
            | Error::PassCreationFailed { .. } => ErrorCategory::Configuration,
            Error::PropertyNotFound(_)
            | Error::TextureNotFound(_)
            | Error::PropertyTypeMismatch { .. }
            | Error::ScopeAlreadyBound
            | Error::ScopeNotBound
            | Error::ScopeUnbindOrder => ErrorCategory::BindingResolution,
            Error::BackendError(_)
            | Error::InvalidResource(_)
            | Error::InitializationFailed(_) => ErrorCategory::Device,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownPass(name) => write!(f, "Scene pass '{}' is not registered", name),
            Error::CyclicDependency { root, chain } => write!(
                f,
                "Can't create pass '{}' due to pass dependency loop: {}",
                root, chain
            ),
            Error::PassCreationFailed { name, reason } => {
                write!(f, "Scene pass '{}' creation failed: {}", name, reason)
            }
            Error::PropertyNotFound(name) => write!(f, "Property '{}' has not been found", name),
            Error::TextureNotFound(name) => write!(f, "Texture '{}' has not been found", name),
            Error::PropertyTypeMismatch { name, expected, actual } => write!(
                f,
                "Property '{}' has type {} (expected {})",
                name, actual, expected
            ),
            Error::ScopeAlreadyBound => write!(f, "Binding scope is already bound"),
            Error::ScopeNotBound => write!(f, "Binding scope is not bound to this context"),
            Error::ScopeUnbindOrder => {
                write!(f, "Binding scope must be unbound in reverse binding order")
            }
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
