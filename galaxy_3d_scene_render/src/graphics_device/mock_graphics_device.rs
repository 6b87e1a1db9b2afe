/// Mock graphics device for unit tests (no GPU required)
///
/// Every mock records what it was asked to do into a shared command log,
/// so tests can assert execution order across passes, frame nodes and the
/// device.

use std::sync::{Arc, Mutex};
use glam::Mat4;
use crate::binding::BindingContext;
use crate::error::{Error, Result};
use crate::graphics_device::{
    GraphicsDevice, Viewport, DrawPass, Texture, TextureInfo, TextureFormat, TextureUsage,
    Material,
};

/// Shared, ordered command log
pub type CommandLog = Arc<Mutex<Vec<String>>>;

pub fn new_command_log() -> CommandLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Snapshot of the log entries
pub fn entries(log: &CommandLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn clear(log: &CommandLog) {
    log.lock().unwrap().clear();
}

// ============================================================================
// Mock Texture
// ============================================================================

#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
    pub name: String,
}

impl MockTexture {
    pub fn new(width: u32, height: u32, name: &str) -> Self {
        Self {
            info: TextureInfo {
                width,
                height,
                format: TextureFormat::R8G8B8A8_UNORM,
                usage: TextureUsage::SampledAndRenderTarget,
                array_layers: 1,
                mip_levels: 1,
            },
            name: name.to_string(),
        }
    }
}

impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Material
// ============================================================================

#[derive(Debug)]
pub struct MockMaterial {
    pub name: String,
}

impl Material for MockMaterial {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock Draw Pass
// ============================================================================

/// Draw pass logging `draw:<name>` and, for each watched property, `<name>:<property>=<value>`
pub struct MockDrawPass {
    pub name: String,
    pub log: CommandLog,
    pub watched_properties: Vec<String>,
    pub fail: bool,
}

impl MockDrawPass {
    pub fn new(name: &str, log: &CommandLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            watched_properties: Vec::new(),
            fail: false,
        }
    }

    pub fn watching(mut self, property: &str) -> Self {
        self.watched_properties.push(property.to_string());
        self
    }
}

impl DrawPass for MockDrawPass {
    fn render(&mut self, _view_projection: &Mat4, bindings: &BindingContext<'_>) -> Result<()> {
        if self.fail {
            return Err(Error::BackendError(format!("draw pass '{}' failed", self.name)));
        }

        let mut log = self.log.lock().unwrap();
        log.push(format!("draw:{}", self.name));
        for property in &self.watched_properties {
            let value = bindings.resolve::<f32>(property)?;
            log.push(format!("{}:{}={}", self.name, property, value));
        }
        Ok(())
    }
}

// ============================================================================
// Mock Graphics Device
// ============================================================================

pub struct MockGraphicsDevice {
    pub width: u32,
    pub height: u32,
    pub log: CommandLog,
    pub current_viewport: Option<Viewport>,
    pub fail_set_viewport: bool,
}

impl MockGraphicsDevice {
    pub fn new(log: &CommandLog) -> Self {
        Self {
            width: 800,
            height: 600,
            log: log.clone(),
            current_viewport: None,
            fail_set_viewport: false,
        }
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_viewport(&mut self, viewport: &Viewport) -> Result<()> {
        if self.fail_set_viewport {
            return Err(Error::BackendError("set_viewport failed".to_string()));
        }
        self.log.lock().unwrap().push(format!(
            "viewport:{}x{}",
            viewport.width as u32, viewport.height as u32
        ));
        self.current_viewport = Some(*viewport);
        Ok(())
    }
}
