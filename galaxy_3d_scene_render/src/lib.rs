/*!
# Galaxy 3D Scene Render

Pass-scheduling core of the Galaxy 3D scene renderer.

This crate decides which rendering passes run, in what order, and with which
named parameters. It is platform-agnostic: the graphics device, textures and
low-level draw passes are traits implemented by a backend.

## Architecture

- **PassRegistry**: process-wide catalog of scene pass factories, keyed by name
- **PassGraph**: per-renderer DAG of scene pass instances, resolved from declared
  dependencies, executed dependencies first and at most once per frame
- **FrameGraph**: per-frame DAG of draw batches ("render this shadow map before me"),
  rebuilt by scene passes every frame
- **BindingContext**: chain of scopes resolving named properties and textures,
  innermost scope first
- **SceneRenderer**: drives one frame over a list of viewports
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod binding;
pub mod graphics_device;
pub mod camera;
pub mod scene_pass;
pub mod frame_graph;
pub mod scene_renderer;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, ErrorCategory, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Scene renderer
    pub use crate::scene_renderer::{SceneRenderer, SceneRendererConfig, SceneViewport};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module: device interfaces and frame graph
    pub mod render {
        pub use crate::graphics_device::*;
        pub use crate::frame_graph::*;
    }

    // Binding sub-module: properties, textures and scopes
    pub mod binding {
        pub use crate::binding::*;
    }

    // Scene sub-module: scene passes, renderer and camera
    pub mod scene {
        pub use crate::scene_pass::*;
        pub use crate::scene_renderer::*;
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
