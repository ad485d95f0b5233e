//! Overlay surface port for dialogue and hint text.
//!
//! Pause behaviors show a block of lines while the player lingers nearby and
//! dismiss it when they leave.  The handle returned by `show` is owned by the
//! behavior that opened the overlay; dismissing an already-dismissed handle
//! is a no-op.

use npc_core::OverlayId;

/// Outbound port for showing and hiding text overlays.
pub trait OverlaySurface {
    /// Display `lines` and return a handle for later dismissal.
    fn show(&mut self, lines: &[String]) -> OverlayId;

    /// Hide the overlay behind `id`.
    fn dismiss(&mut self, id: OverlayId);
}

/// Surface that displays nothing but still hands out unique handles.
#[derive(Debug, Default)]
pub struct NoopOverlay {
    next_id: u32,
}

impl OverlaySurface for NoopOverlay {
    fn show(&mut self, _lines: &[String]) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        id
    }

    fn dismiss(&mut self, _id: OverlayId) {}
}

/// Surface that records every show/dismiss for assertions.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub shown: Vec<(OverlayId, Vec<String>)>,
    pub dismissed: Vec<OverlayId>,
    next_id: u32,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays shown but not yet dismissed.
    pub fn open_count(&self) -> usize {
        self.shown
            .iter()
            .filter(|(id, _)| !self.dismissed.contains(id))
            .count()
    }
}

impl OverlaySurface for RecordingOverlay {
    fn show(&mut self, lines: &[String]) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.shown.push((id, lines.to_vec()));
        id
    }

    fn dismiss(&mut self, id: OverlayId) {
        self.dismissed.push(id);
    }
}
