/// Per-display-frame coalescing for high-frequency input.
///
/// The first event of a frame is admitted and its effect scheduled; events
/// arriving while an update is pending are dropped, not queued. The host
/// releases the gate when the scheduled update runs, so work is bounded to one
/// state mutation per refresh without adding more than one frame of lag.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Admits the caller if no update is pending; the caller now owns the frame.
    pub fn try_admit(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn release(&mut self) {
        self.pending = false;
    }
}
