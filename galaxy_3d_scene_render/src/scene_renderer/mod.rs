//! Scene renderer module
//!
//! The SceneRenderer owns a pass graph, a frame graph and the frame id
//! counter, and drives one frame over a list of scene viewports.

mod render_stamp;
mod scene_resources;
mod scene_viewport;
mod scene_pass_context;
mod scene_renderer;

pub use render_stamp::{FrameId, RenderStamp};
pub use scene_resources::SceneResources;
pub use scene_viewport::SceneViewport;
pub use scene_pass_context::{
    ScenePassContext,
    VIEW_MATRIX_PROPERTY, PROJECTION_MATRIX_PROPERTY,
    VIEW_PROJECTION_MATRIX_PROPERTY, WORLD_VIEW_POSITION_PROPERTY,
};
pub use scene_renderer::{SceneRenderer, SceneRendererConfig};
