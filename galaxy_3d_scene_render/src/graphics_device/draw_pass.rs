/// Low-level draw pass: a batch of draw calls recorded into a frame node

use std::cell::RefCell;
use std::rc::Rc;
use glam::Mat4;
use crate::binding::BindingContext;
use crate::error::Result;

/// Low-level draw pass
///
/// Owns its framebuffer, program and primitives. Scene passes fill it during
/// their render call and register it on a frame node, which renders it with
/// the frame's view-projection matrix and the node's binding context.
pub trait DrawPass {
    /// Submit the recorded primitives
    ///
    /// Uniforms are resolved through `bindings` (innermost scope wins).
    fn render(&mut self, view_projection: &Mat4, bindings: &BindingContext<'_>) -> Result<()>;
}

/// Shared handle to a draw pass (render thread only)
pub type DrawPassHandle = Rc<RefCell<dyn DrawPass>>;
