/// Frame identifier and render stamp

/// Frame identifier, incremented once per SceneRenderer::render call (first frame is 1)
pub type FrameId = u64;

/// Memoization key of pass nodes and frame nodes
///
/// Within one frame, every viewport gets its own stamp so that passes run
/// once per viewport. Stamps order by frame first, then viewport index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderStamp {
    pub frame_id: FrameId,
    pub viewport: usize,
}

impl RenderStamp {
    pub fn new(frame_id: FrameId, viewport: usize) -> Self {
        Self { frame_id, viewport }
    }
}
