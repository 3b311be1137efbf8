use crate::geometry::ScreenPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// How a wheel event reports its deltas. Trackpads report pixel deltas;
/// discrete mouse wheels usually report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDeltaMode {
    Pixel,
    Line,
    Page,
}

/// A wheel or trackpad scroll event at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub position: ScreenPoint,
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: WheelDeltaMode,
    /// Ctrl/Cmd held: the host maps modifier-held scrolling to zoom.
    pub zoom_modifier: bool,
}
