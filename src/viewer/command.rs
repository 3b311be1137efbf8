/// High-level viewer commands, typically bound to keyboard shortcuts by the
/// host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    NextRandom,
    SiblingForward,
    SiblingBackward,
    HistoryBackward,
    HistoryForward,
    FlipHorizontal,
    RotateRight,
    ResetTransform,
    ToggleGrayscale,
    TogglePosterize,
    ToggleFavorite,
    TogglePause,
    DismissOverlays,
}

/// Work the core needs the surrounding application to perform. The core never
/// fetches images or persists favorites itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerRequest {
    /// Fetch a random image and deliver it through `Viewer::load_image`.
    LoadRandom,
    /// Toggle the favorite flag for the given image path.
    RecordFavorite { path: String },
}
