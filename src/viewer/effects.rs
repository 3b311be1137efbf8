/// Display-effect and chrome-visibility flags for the viewer surface.
///
/// Grayscale and posterize are mutually exclusive; enabling one drops the
/// other. The posterize toggle is three-way: off enables mode and panel,
/// a hidden panel is revealed, a shown panel disables everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectsState {
    ui_visible: bool,
    grayscale: bool,
    posterize: bool,
    posterize_panel: bool,
}

/// What a posterize toggle did, so the viewer can seed or tear down the
/// stop editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterizeToggle {
    Enabled,
    PanelRevealed,
    Disabled,
}

impl Default for EffectsState {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectsState {
    pub const fn new() -> Self {
        Self {
            ui_visible: true,
            grayscale: false,
            posterize: false,
            posterize_panel: false,
        }
    }

    pub const fn ui_visible(&self) -> bool {
        self.ui_visible
    }

    pub const fn grayscale(&self) -> bool {
        self.grayscale
    }

    pub const fn posterize(&self) -> bool {
        self.posterize
    }

    pub const fn posterize_panel(&self) -> bool {
        self.posterize_panel
    }

    pub fn toggle_ui(&mut self) {
        self.ui_visible = !self.ui_visible;
    }

    pub fn toggle_grayscale(&mut self) {
        self.grayscale = !self.grayscale;
        if self.grayscale {
            self.posterize = false;
            self.posterize_panel = false;
        }
    }

    /// Hides the stop-editor panel while leaving the effect active.
    pub fn hide_posterize_panel(&mut self) {
        self.posterize_panel = false;
    }

    pub fn toggle_posterize(&mut self) -> PosterizeToggle {
        if !self.posterize {
            self.posterize = true;
            self.posterize_panel = true;
            self.ui_visible = true;
            self.grayscale = false;
            return PosterizeToggle::Enabled;
        }
        if !self.posterize_panel {
            self.posterize_panel = true;
            self.ui_visible = true;
            return PosterizeToggle::PanelRevealed;
        }
        self.posterize = false;
        self.posterize_panel = false;
        PosterizeToggle::Disabled
    }
}
