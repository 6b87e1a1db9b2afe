//! Headless demo of the Galaxy3D scene renderer
//!
//! Registers a small deferred pipeline (G-Buffer, shadow maps, lighting,
//! post) and renders a few split-screen frames on a console device that
//! logs every viewport change and draw submission.

mod console_device;
mod deferred_passes;

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_3;
use std::rc::Rc;
use std::sync::Arc;
use glam::{Mat4, Vec3};
use galaxy_3d_scene_render::galaxy3d::{Engine, Result, SceneRenderer, SceneRendererConfig, SceneViewport};
use galaxy_3d_scene_render::galaxy3d::render::{TextureFormat, TextureUsage, Viewport};
use galaxy_3d_scene_render::galaxy3d::scene::{Camera, ScenePass, ScenePassCreateInfo};
use galaxy_3d_scene_render::{engine_info, engine_warn};
use console_device::{ConsoleDevice, ConsoleMaterial, ConsoleTexture};
use deferred_passes::DeferredShadingComponent;

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

fn main() -> Result<()> {
    Engine::initialize()?;
    Engine::create_pass_registry()?;

    let component = DeferredShadingComponent;
    Engine::load_pass_component(&component)?;

    // Two passes depending on each other: rejected when added
    Engine::register_scene_pass("Bloom", |_: &ScenePassCreateInfo<'_>| {
        Ok(Box::new(deferred_passes::FullScreenPass::new("bloom", &["Tone Mapping"])) as Box<dyn ScenePass>)
    })?;
    Engine::register_scene_pass("Tone Mapping", |_: &ScenePassCreateInfo<'_>| {
        Ok(Box::new(deferred_passes::FullScreenPass::new("tone mapping", &["Bloom"])) as Box<dyn ScenePass>)
    })?;

    let device = Rc::new(RefCell::new(ConsoleDevice::new(WINDOW_WIDTH, WINDOW_HEIGHT)));
    let config = SceneRendererConfig {
        name: "Demo Renderer".to_string(),
        trace_passes: true,
        ..SceneRendererConfig::default()
    };
    let mut renderer = SceneRenderer::with_config(device, config)?;

    // Values shared by every viewport
    renderer.properties_mut().set("lightsCount", 2i32);
    renderer.properties_mut().set("shininess", 16.0f32);
    renderer.properties_mut().set("exposure", 1.0f32);
    renderer.shared_scope().set_texture(
        "environmentMap",
        Arc::new(ConsoleTexture::new(512, 512, TextureFormat::R16G16B16A16_SFLOAT, TextureUsage::Sampled)),
    );
    renderer.materials_mut().insert("ground".to_string(), Arc::new(ConsoleMaterial::new("ground")));

    renderer.add_pass("Post", 0)?;
    engine_info!("demo", "{} pass node(s) resolved", renderer.passes_count());

    if let Err(error) = renderer.add_pass("Bloom", 10) {
        engine_warn!("demo", "Bloom disabled: {}", error);
    }

    let viewports = split_screen();
    for frame in 0..3 {
        if frame == 2 {
            renderer.properties_mut().set("lightsCount", 1i32);
        }
        renderer.render(&viewports)?;
        engine_info!("demo", "Frame {} rendered ({} frame node(s))",
            renderer.frame_id(), renderer.frame_graph().len());
    }

    // Dropping the post pass frees the whole pipeline
    renderer.remove_pass("Post");
    engine_info!("demo", "{} pass node(s) left", renderer.passes_count());
    renderer.render_viewport(&SceneViewport::new())?;

    drop(renderer);
    Engine::unload_pass_component(&component)?;
    Engine::destroy_pass_registry()?;
    Engine::shutdown();
    Ok(())
}

/// Left and right halves of the window, looking at the scene from two sides
fn split_screen() -> Vec<SceneViewport> {
    let half = WINDOW_WIDTH as f32 / 2.0;
    let aspect = half / WINDOW_HEIGHT as f32;
    let projection = Mat4::perspective_rh(FRAC_PI_3, aspect, 0.1, 500.0);

    let left = SceneViewport::with_camera(
        Viewport::new(0.0, 0.0, half, WINDOW_HEIGHT as f32),
        Camera::look_at(Vec3::new(-10.0, 4.0, 10.0), Vec3::ZERO, Vec3::Y, projection),
    );
    let right = SceneViewport::with_camera(
        Viewport::new(half, 0.0, half, WINDOW_HEIGHT as f32),
        Camera::look_at(Vec3::new(10.0, 4.0, 10.0), Vec3::ZERO, Vec3::Y, projection),
    );

    // The right player sees a glossier, brighter world
    right.set_property("shininess", 64.0f32);
    right.set_property("exposure", 1.5f32);

    vec![left, right]
}
