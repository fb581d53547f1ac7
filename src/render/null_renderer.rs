use crate::error::ChartResult;
use crate::render::{PrimitiveCounts, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_counts: PrimitiveCounts,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_counts = frame.counts();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
