/// GraphicsDevice trait - the device capabilities used by the scene renderer

use std::cell::RefCell;
use std::rc::Rc;
use crate::error::Result;

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering `width` x `height` pixels from the origin, depth range [0, 1]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Viewport covering a whole window
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    /// Zero-sized viewport: the renderer resets the device to the full window extent
    pub fn is_zero_sized(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Graphics device trait
///
/// Implemented by the backend owning the window framebuffer.
/// All calls happen on the render thread.
pub trait GraphicsDevice {
    /// Size of the window framebuffer (width, height)
    fn window_size(&self) -> (u32, u32);

    /// Set the destination viewport of the window framebuffer
    fn set_viewport(&mut self, viewport: &Viewport) -> Result<()>;

    /// Reset the destination viewport to the full window extent
    fn reset_viewport(&mut self) -> Result<()> {
        let (width, height) = self.window_size();
        self.set_viewport(&Viewport::full(width, height))
    }
}

/// Shared handle to the graphics device (render thread only)
pub type DeviceHandle = Rc<RefCell<dyn GraphicsDevice>>;
