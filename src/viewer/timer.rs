/// Conditions that freeze the elapsed-time counter for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickGates {
    pub image_absent: bool,
    pub overlay_open: bool,
    pub loading: bool,
}

/// Elapsed viewing time for the current image, advanced once per second by the
/// host. A pure accumulator: it never touches transform or tone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTimer {
    elapsed_seconds: u64,
    paused: bool,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            elapsed_seconds: 0,
            paused: false,
        }
    }

    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub const fn paused(&self) -> bool {
        self.paused
    }

    /// Advances the counter when nothing gates it; returns whether it advanced.
    pub fn tick(&mut self, gates: TickGates) -> bool {
        if self.paused || gates.image_absent || gates.overlay_open || gates.loading {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.paused = false;
    }
}

/// Renders seconds as `MM:SS` for the chrome readout.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
