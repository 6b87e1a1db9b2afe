//! Graphics device module - interfaces the scene renderer consumes
//!
//! The device itself (buffers, shaders, programs, draw submission) lives outside
//! this crate. Only the capabilities the pass scheduler calls into are declared here.

pub mod graphics_device;
pub mod texture;
pub mod draw_pass;

pub use graphics_device::*;
pub use texture::*;
pub use draw_pass::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
