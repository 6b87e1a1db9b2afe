//! Console backend: a graphics device and draw passes that only log

use std::cell::RefCell;
use std::rc::Rc;
use glam::Mat4;
use galaxy_3d_scene_render::galaxy3d::Result;
use galaxy_3d_scene_render::galaxy3d::binding::BindingContext;
use galaxy_3d_scene_render::galaxy3d::render::{
    DrawPass, DrawPassHandle, GraphicsDevice, Material, Texture, TextureFormat, TextureInfo,
    TextureUsage, Viewport,
};
use galaxy_3d_scene_render::{engine_debug, engine_info};

/// Device with a fixed window size, logging viewport changes
pub struct ConsoleDevice {
    width: u32,
    height: u32,
}

impl ConsoleDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl GraphicsDevice for ConsoleDevice {
    fn window_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_viewport(&mut self, viewport: &Viewport) -> Result<()> {
        engine_debug!("demo::ConsoleDevice", "Viewport {}x{} at ({}, {})",
            viewport.width, viewport.height, viewport.x, viewport.y);
        Ok(())
    }
}

pub struct ConsoleTexture {
    info: TextureInfo,
}

impl ConsoleTexture {
    pub fn new(width: u32, height: u32, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            info: TextureInfo {
                width,
                height,
                format,
                usage,
                array_layers: 1,
                mip_levels: 1,
            },
        }
    }
}

impl Texture for ConsoleTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

pub struct ConsoleMaterial {
    name: String,
}

impl ConsoleMaterial {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Material for ConsoleMaterial {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Draw pass logging the uniforms and textures it resolves
pub struct ConsoleDrawPass {
    label: String,
    uniforms: Vec<&'static str>,
    textures: Vec<&'static str>,
}

impl ConsoleDrawPass {
    pub fn handle(label: &str, uniforms: &[&'static str], textures: &[&'static str]) -> DrawPassHandle {
        Rc::new(RefCell::new(Self {
            label: label.to_string(),
            uniforms: uniforms.to_vec(),
            textures: textures.to_vec(),
        }))
    }
}

impl DrawPass for ConsoleDrawPass {
    fn render(&mut self, _view_projection: &Mat4, bindings: &BindingContext<'_>) -> Result<()> {
        let mut resolved = Vec::with_capacity(self.uniforms.len() + self.textures.len());
        for name in &self.uniforms {
            resolved.push(format!("{}={:?}", name, bindings.resolve_property(name)?));
        }
        for name in &self.textures {
            let info = *bindings.resolve_texture(name)?.info();
            resolved.push(format!("{}={}x{}", name, info.width, info.height));
        }
        engine_info!("demo::Draw", "{} [{}]", self.label, resolved.join(", "));
        Ok(())
    }
}
