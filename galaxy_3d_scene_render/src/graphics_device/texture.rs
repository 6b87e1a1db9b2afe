/// Texture and material traits, and the named lists holding them

use std::sync::Arc;
use rustc_hash::FxHashMap;

/// Texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8G8B8A8_SRGB,
    R8G8B8A8_UNORM,
    R16G16B16A16_SFLOAT,
    D24_UNORM_S8_UINT,
    D32_FLOAT,
}

/// Texture usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUsage {
    /// Texture can be sampled in shaders
    Sampled,
    /// Texture can be used as render target
    RenderTarget,
    /// Texture can be used for both
    SampledAndRenderTarget,
    /// Texture can be used as depth/stencil attachment
    DepthStencil,
}

/// Texture information (read-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
    pub array_layers: u32,
    pub mip_levels: u32,
}

/// Texture resource created by the graphics device
pub trait Texture: Send + Sync {
    fn info(&self) -> &TextureInfo;
}

/// Material resource shared between passes
pub trait Material: Send + Sync {
    fn name(&self) -> &str;
}

/// Named list of textures (G-buffer targets, shadow maps, ...)
pub type TextureList = FxHashMap<String, Arc<dyn Texture>>;

/// Named list of materials
pub type MaterialList = FxHashMap<String, Arc<dyn Material>>;
