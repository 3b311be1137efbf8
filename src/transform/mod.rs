//! Viewer transform state and the anchored zoom that keeps a screen point fixed.

use crate::geometry::{ScreenPoint, ScreenVector};

pub const SCALE_MIN: f64 = 0.1;
pub const SCALE_MAX: f64 = 10.0;
const DEFAULT_SCALE: f64 = 0.9;

/// Pan/zoom/rotate/flip state applied to the displayed image.
///
/// Mutated exclusively by the gesture router and explicit viewer commands.
/// Reset is whole-value: scale, offset, rotation, and flip always return to
/// their defaults together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    scale: f64,
    offset: ScreenVector,
    rotation_degrees: f64,
    flip_horizontal: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    pub const fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: ScreenVector::ZERO,
            rotation_degrees: 0.0,
            flip_horizontal: false,
        }
    }

    pub const fn scale(&self) -> f64 {
        self.scale
    }

    pub const fn offset(&self) -> ScreenVector {
        self.offset
    }

    pub const fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    pub const fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Multiplies the scale by `factor`, clamping to `[SCALE_MIN, SCALE_MAX]`.
    ///
    /// Returns the ratio actually applied (`clamped / old`), which differs from
    /// `factor` at the clamp boundary. Anchor computations must use the returned
    /// ratio or the anchored point drifts at the zoom limits.
    pub fn set_scale(&mut self, factor: f64) -> f64 {
        let old = self.scale;
        self.scale = (old * factor).clamp(SCALE_MIN, SCALE_MAX);
        self.scale / old
    }

    /// Scales around `anchor` so the image point under it stays visually fixed.
    ///
    /// With `m = anchor - viewport_center` (the transform origin is the viewport
    /// center), the new offset is `m - (m - offset) * ratio`. At `factor = 1.0`
    /// the ratio is exactly 1 and neither scale nor offset change.
    pub fn zoom_toward_point(&mut self, anchor: ScreenPoint, viewport_center: ScreenPoint, factor: f64) {
        let ratio = self.set_scale(factor);
        let m = anchor.offset_from(viewport_center);
        self.offset = m.sub(m.sub(self.offset).scaled(ratio));
    }

    pub fn pan_by(&mut self, delta: ScreenVector) {
        self.offset = self.offset.add(delta);
    }

    /// Replaces the offset wholesale. Drag and pinch gestures recompute the
    /// offset from their start snapshot instead of accumulating deltas.
    pub fn set_offset(&mut self, offset: ScreenVector) {
        self.offset = offset;
    }

    pub fn rotate_by(&mut self, degrees: f64) {
        self.rotation_degrees += degrees;
    }

    pub fn flip(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: ScreenPoint = ScreenPoint::new(400.0, 300.0);

    /// Screen position of an image-space point under the current transform.
    fn project(state: &TransformState, image_point: ScreenVector) -> ScreenPoint {
        ScreenPoint::new(
            CENTER.x + state.offset().x + image_point.x * state.scale(),
            CENTER.y + state.offset().y + image_point.y * state.scale(),
        )
    }

    /// Image-space point currently rendered under a screen position.
    fn unproject(state: &TransformState, screen: ScreenPoint) -> ScreenVector {
        ScreenVector::new(
            (screen.x - CENTER.x - state.offset().x) / state.scale(),
            (screen.y - CENTER.y - state.offset().y) / state.scale(),
        )
    }

    #[test]
    fn defaults_match_the_fresh_image_state() {
        let state = TransformState::new();
        assert_eq!(state.scale(), 0.9);
        assert_eq!(state.offset(), ScreenVector::ZERO);
        assert_eq!(state.rotation_degrees(), 0.0);
        assert!(!state.flip_horizontal());
    }

    #[test]
    fn set_scale_reports_the_applied_ratio_at_the_clamp_boundary() {
        let mut state = TransformState::new();
        let ratio = state.set_scale(100.0);
        assert_eq!(state.scale(), SCALE_MAX);
        assert!((ratio - SCALE_MAX / 0.9).abs() < 1e-12);

        let ratio = state.set_scale(0.0001);
        assert_eq!(state.scale(), SCALE_MIN);
        assert!((ratio - SCALE_MIN / SCALE_MAX).abs() < 1e-12);
    }

    #[test]
    fn repeated_max_scale_requests_never_exceed_the_ceiling() {
        let mut state = TransformState::new();
        for _ in 0..10 {
            state.set_scale(10.0);
        }
        assert_eq!(state.scale(), SCALE_MAX);

        for _ in 0..10 {
            state.set_scale(0.01);
        }
        assert_eq!(state.scale(), SCALE_MIN);
    }

    #[test]
    fn zoom_with_unit_factor_changes_nothing() {
        let mut state = TransformState::new();
        state.pan_by(ScreenVector::new(37.0, -12.5));
        state.set_scale(2.0);
        let before = state;

        for _ in 0..100 {
            state.zoom_toward_point(ScreenPoint::new(123.0, 456.0), CENTER, 1.0);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn zoom_keeps_the_anchored_image_point_under_the_cursor() {
        let mut state = TransformState::new();
        state.pan_by(ScreenVector::new(-50.0, 20.0));

        let anchor = ScreenPoint::new(250.0, 410.0);
        let fixed = unproject(&state, anchor);

        for factor in [1.5, 0.4, 2.0, 1.1] {
            state.zoom_toward_point(anchor, CENTER, factor);
            let after = project(&state, fixed);
            assert!((after.x - anchor.x).abs() < 1e-9);
            assert!((after.y - anchor.y).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_anchor_holds_even_when_the_scale_clamps() {
        let mut state = TransformState::new();
        let anchor = ScreenPoint::new(600.0, 100.0);
        let fixed = unproject(&state, anchor);

        // Requested factor would blow past SCALE_MAX; the applied ratio must
        // still anchor exactly.
        state.zoom_toward_point(anchor, CENTER, 50.0);
        assert_eq!(state.scale(), SCALE_MAX);
        let after = project(&state, fixed);
        assert!((after.x - anchor.x).abs() < 1e-9);
        assert!((after.y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_every_field_together() {
        let mut state = TransformState::new();
        state.pan_by(ScreenVector::new(5.0, 5.0));
        state.set_scale(3.0);
        state.rotate_by(90.0);
        state.flip();

        state.reset();
        assert_eq!(state, TransformState::new());
    }

    #[test]
    fn rotation_accumulates_without_wrapping() {
        let mut state = TransformState::new();
        for _ in 0..5 {
            state.rotate_by(90.0);
        }
        assert_eq!(state.rotation_degrees(), 450.0);
    }
}
