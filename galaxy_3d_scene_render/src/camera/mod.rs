//! Camera module - low-level camera.
//!
//! The engine does NOT store or manage cameras: they are owned and driven by
//! the caller, and handed to the scene renderer through scene viewports.

mod camera;

pub use camera::Camera;
pub(crate) use camera::world_position;
