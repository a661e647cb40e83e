//! Seam between the engine and whatever draws the overlay.

use crate::snapshot::FrameSnapshot;

/// Turns a frame snapshot into backend-specific output.
///
/// Adapters only read the snapshot; swapping one never changes engine results.
pub trait RenderAdapter {
    type Output;

    fn render(&mut self, snapshot: &FrameSnapshot) -> Self::Output;
}
