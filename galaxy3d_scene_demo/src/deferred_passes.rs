//! Deferred shading pipeline used by the demo
//!
//! Post -> Lighting -> { G-Buffer, Shadow Maps }. Every pass records its
//! draw work into the frame graph; the renderer draws it once all passes
//! have run.

use galaxy_3d_scene_render::galaxy3d::Result;
use galaxy_3d_scene_render::galaxy3d::render::FrameNodeKey;
use galaxy_3d_scene_render::galaxy3d::scene::{
    PassComponent, PassRegistry, ScenePass, ScenePassContext, ScenePassCreateInfo,
    WORLD_VIEW_POSITION_PROPERTY,
};
use crate::console_device::ConsoleDrawPass;

const GBUFFER_NODE: &str = "G-Buffer";

/// Fills the G-Buffer in its own frame node, rendered before the root
pub struct GBufferPass;

impl ScenePass for GBufferPass {
    fn render(&mut self, context: &mut ScenePassContext) -> Result<()> {
        let graph = context.frame_graph_mut();
        let node = match graph.find_named(GBUFFER_NODE) {
            Some(node) => node,
            None => {
                let node = graph.create_node();
                graph.insert_named(GBUFFER_NODE, node);
                node
            }
        };

        graph.add_pass(node, ConsoleDrawPass::handle("g-buffer", &[WORLD_VIEW_POSITION_PROPERTY], &[]), 0)?;
        let root = graph.root();
        graph.add_dependency(root, node)
    }
}

/// One shadow map frame node per light
pub struct ShadowMapsPass {
    nodes: Vec<FrameNodeKey>,
}

impl ScenePass for ShadowMapsPass {
    fn render(&mut self, context: &mut ScenePassContext) -> Result<()> {
        let lights = context.properties().get::<i32>("lightsCount")?.max(0) as usize;
        let graph = context.frame_graph_mut();

        while self.nodes.len() < lights {
            let node = graph.create_node();
            graph.get(node)?.scope().set_property("lightIndex", self.nodes.len() as i32);
            self.nodes.push(node);
        }

        let root = graph.root();
        for node in self.nodes.iter().take(lights) {
            graph.add_pass(*node, ConsoleDrawPass::handle("shadow map", &["lightIndex"], &[]), 0)?;
            graph.add_dependency(root, *node)?;
        }
        Ok(())
    }
}

/// Full-screen pass drawing into the root frame node
pub struct FullScreenPass {
    label: &'static str,
    dependencies: Vec<String>,
    uniforms: &'static [&'static str],
    textures: &'static [&'static str],
    priority: i32,
}

impl FullScreenPass {
    pub fn new(label: &'static str, dependencies: &[&str]) -> Self {
        Self {
            label,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            uniforms: &[],
            textures: &[],
            priority: 0,
        }
    }

    fn lighting() -> Self {
        Self {
            uniforms: &["shininess", "lightsCount"],
            textures: &["environmentMap"],
            priority: 10,
            ..Self::new("lighting", &["G-Buffer", "Shadow Maps"])
        }
    }

    fn post() -> Self {
        Self {
            uniforms: &["exposure"],
            priority: 20,
            ..Self::new("post", &["Lighting"])
        }
    }
}

impl ScenePass for FullScreenPass {
    fn dependencies(&self) -> Vec<String> {
        self.dependencies.clone()
    }

    fn render(&mut self, context: &mut ScenePassContext) -> Result<()> {
        let root = context.root_frame_node();
        let draw = ConsoleDrawPass::handle(self.label, self.uniforms, self.textures);
        context.frame_graph_mut().add_pass(root, draw, self.priority)
    }
}

/// Registers the deferred shading passes
pub struct DeferredShadingComponent;

impl PassComponent for DeferredShadingComponent {
    fn load(&self, registry: &mut PassRegistry) {
        registry.register("G-Buffer", |_: &ScenePassCreateInfo<'_>| {
            Ok(Box::new(GBufferPass) as Box<dyn ScenePass>)
        });
        registry.register("Shadow Maps", |_: &ScenePassCreateInfo<'_>| {
            Ok(Box::new(ShadowMapsPass { nodes: Vec::new() }) as Box<dyn ScenePass>)
        });
        registry.register("Lighting", |_: &ScenePassCreateInfo<'_>| {
            Ok(Box::new(FullScreenPass::lighting()) as Box<dyn ScenePass>)
        });
        registry.register("Post", |_: &ScenePassCreateInfo<'_>| {
            Ok(Box::new(FullScreenPass::post()) as Box<dyn ScenePass>)
        });
    }

    fn unload(&self, registry: &mut PassRegistry) {
        for name in ["G-Buffer", "Shadow Maps", "Lighting", "Post"] {
            registry.unregister(name);
        }
    }
}
