use crate::geometry::{ScreenPoint, ScreenVector};
use crate::transform::TransformState;

use super::event::{PointerButton, WheelDeltaMode, WheelEvent};

/// Wheel deltas smaller than this (in pixel delta mode) are treated as
/// trackpad panning rather than discrete zoom steps.
const TRACKPAD_DELTA_CUTOFF: f64 = 40.0;
/// Scale factor applied per modifier-held wheel delta unit.
const MODIFIER_ZOOM_RATE: f64 = 0.01;

/// The active gesture, as a sum type so that invalid flag combinations
/// (a pinch without a recorded start distance, a drag without an anchor)
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging {
        /// Pointer position minus the offset at press time; each move computes
        /// `offset = pointer - anchor` directly instead of accumulating deltas.
        anchor: ScreenVector,
        /// Latched the first time a single move exceeds the tap threshold.
        /// Never reset mid-gesture: a drag that returns to its origin is
        /// still a drag.
        moved: bool,
    },
    Pinching {
        start_distance: f64,
        start_center: ScreenPoint,
        start_scale: f64,
        start_offset: ScreenVector,
    },
}

/// What the host should do with a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing to render or react to (including absorbed malformed sequences).
    Ignored,
    /// The transform changed; the rendering layer should re-read it.
    TransformChanged,
    /// A press/release pair that never moved past the threshold; the host
    /// toggles UI chrome visibility.
    Tap,
}

/// Single-threaded state machine classifying pointer, touch, and wheel input
/// into pans, anchored zooms, and taps.
#[derive(Debug)]
pub struct GestureRouter {
    phase: GesturePhase,
    tap_threshold_px: f64,
    wheel_zoom_step: f64,
}

impl GestureRouter {
    pub const fn new(tap_threshold_px: f64, wheel_zoom_step: f64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            tap_threshold_px,
            wheel_zoom_step,
        }
    }

    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn on_pointer_press(
        &mut self,
        button: PointerButton,
        at: ScreenPoint,
        transform: &TransformState,
    ) -> GestureOutcome {
        if button != PointerButton::Primary || !matches!(self.phase, GesturePhase::Idle) {
            return GestureOutcome::Ignored;
        }
        self.begin_drag(at, transform);
        GestureOutcome::Ignored
    }

    pub fn on_pointer_move(
        &mut self,
        at: ScreenPoint,
        transform: &mut TransformState,
    ) -> GestureOutcome {
        self.drag_to(at, transform)
    }

    pub fn on_pointer_release(&mut self) -> GestureOutcome {
        self.finish_drag()
    }

    pub fn on_touch_start(
        &mut self,
        touches: &[ScreenPoint],
        transform: &TransformState,
    ) -> GestureOutcome {
        match touches {
            [only] => {
                self.begin_drag(*only, transform);
            }
            [first, second, ..] => {
                self.phase = GesturePhase::Pinching {
                    start_distance: first.distance_to(*second),
                    start_center: first.midpoint(*second),
                    start_scale: transform.scale(),
                    start_offset: transform.offset(),
                };
                tracing::debug!(scale = transform.scale(), "pinch started");
            }
            [] => {}
        }
        GestureOutcome::Ignored
    }

    pub fn on_touch_move(
        &mut self,
        touches: &[ScreenPoint],
        viewport_center: ScreenPoint,
        transform: &mut TransformState,
    ) -> GestureOutcome {
        match (self.phase, touches) {
            (GesturePhase::Dragging { .. }, [only]) => self.drag_to(*only, transform),
            (
                GesturePhase::Pinching {
                    start_distance,
                    start_center,
                    start_scale,
                    start_offset,
                },
                [first, second, ..],
            ) if start_distance > 0.0 => {
                // Re-derive scale and offset from the gesture's start snapshot:
                // both evolve simultaneously across the pinch, and recomputing
                // from live values would compound rounding error every frame.
                let distance = first.distance_to(*second);
                let target_scale = start_scale * (distance / start_distance);
                let factor = target_scale / transform.scale();
                transform.set_scale(factor);
                let ratio = transform.scale() / start_scale;

                let center_now = first.midpoint(*second).offset_from(viewport_center);
                let center_start = start_center.offset_from(viewport_center);
                transform.set_offset(center_now.sub(center_start.sub(start_offset).scaled(ratio)));
                GestureOutcome::TransformChanged
            }
            // Moves without a matching start are absorbed, never fatal.
            _ => GestureOutcome::Ignored,
        }
    }

    pub fn on_touch_end(&mut self, remaining: &[ScreenPoint]) -> GestureOutcome {
        match self.phase {
            GesturePhase::Pinching { .. } if remaining.len() < 2 => {
                self.phase = GesturePhase::Idle;
                GestureOutcome::Ignored
            }
            GesturePhase::Dragging { .. } if remaining.is_empty() => self.finish_drag(),
            _ => GestureOutcome::Ignored,
        }
    }

    /// Routes wheel/trackpad input synchronously; no state is kept across
    /// wheel events.
    pub fn on_wheel(
        &mut self,
        event: &WheelEvent,
        viewport_center: ScreenPoint,
        transform: &mut TransformState,
    ) -> GestureOutcome {
        if event.zoom_modifier {
            let factor = 1.0 - event.delta_y * MODIFIER_ZOOM_RATE;
            transform.zoom_toward_point(event.position, viewport_center, factor);
            return GestureOutcome::TransformChanged;
        }

        let trackpad_like =
            event.delta_y.abs() < TRACKPAD_DELTA_CUTOFF && event.delta_mode == WheelDeltaMode::Pixel;
        if event.delta_x.abs() > 0.0 || trackpad_like {
            transform.pan_by(ScreenVector::new(-event.delta_x, -event.delta_y));
        } else {
            let factor = if event.delta_y > 0.0 {
                1.0 - self.wheel_zoom_step
            } else {
                1.0 + self.wheel_zoom_step
            };
            transform.zoom_toward_point(event.position, viewport_center, factor);
        }
        GestureOutcome::TransformChanged
    }

    fn begin_drag(&mut self, at: ScreenPoint, transform: &TransformState) {
        self.phase = GesturePhase::Dragging {
            anchor: ScreenVector::new(at.x - transform.offset().x, at.y - transform.offset().y),
            moved: false,
        };
    }

    fn drag_to(&mut self, at: ScreenPoint, transform: &mut TransformState) -> GestureOutcome {
        let GesturePhase::Dragging { anchor, moved } = &mut self.phase else {
            return GestureOutcome::Ignored;
        };
        let next = ScreenVector::new(at.x - anchor.x, at.y - anchor.y);
        let step = next.sub(transform.offset());
        if step.x.abs() > self.tap_threshold_px || step.y.abs() > self.tap_threshold_px {
            *moved = true;
        }
        transform.set_offset(next);
        GestureOutcome::TransformChanged
    }

    fn finish_drag(&mut self) -> GestureOutcome {
        match self.phase {
            GesturePhase::Dragging { moved, .. } => {
                self.phase = GesturePhase::Idle;
                if moved {
                    GestureOutcome::Ignored
                } else {
                    GestureOutcome::Tap
                }
            }
            _ => GestureOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: ScreenPoint = ScreenPoint::new(400.0, 300.0);

    fn router() -> GestureRouter {
        GestureRouter::new(2.0, 0.1)
    }

    fn wheel(position: ScreenPoint, delta_x: f64, delta_y: f64) -> WheelEvent {
        WheelEvent {
            position,
            delta_x,
            delta_y,
            delta_mode: WheelDeltaMode::Pixel,
            zoom_modifier: false,
        }
    }

    #[test]
    fn press_drag_release_pans_by_the_pointer_travel() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_pointer_press(PointerButton::Primary, ScreenPoint::new(100.0, 100.0), &transform);
        router.on_pointer_move(ScreenPoint::new(130.0, 80.0), &mut transform);
        let outcome = router.on_pointer_release();

        assert_eq!(transform.offset(), ScreenVector::new(30.0, -20.0));
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(router.phase(), GesturePhase::Idle);
    }

    #[test]
    fn sub_threshold_jitter_classifies_as_a_tap() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_pointer_press(PointerButton::Primary, ScreenPoint::new(100.0, 100.0), &transform);
        router.on_pointer_move(ScreenPoint::new(101.0, 100.0), &mut transform);
        router.on_pointer_move(ScreenPoint::new(100.0, 100.0), &mut transform);

        assert_eq!(router.on_pointer_release(), GestureOutcome::Tap);
    }

    #[test]
    fn a_drag_that_returns_to_its_origin_is_still_a_drag() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_pointer_press(PointerButton::Primary, ScreenPoint::new(100.0, 100.0), &transform);
        // One sample past the threshold latches the drag even though the net
        // displacement at release is zero.
        router.on_pointer_move(ScreenPoint::new(110.0, 100.0), &mut transform);
        router.on_pointer_move(ScreenPoint::new(100.0, 100.0), &mut transform);

        assert_eq!(router.on_pointer_release(), GestureOutcome::Ignored);
    }

    #[test]
    fn non_primary_buttons_do_not_start_a_drag() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_pointer_press(PointerButton::Secondary, ScreenPoint::new(5.0, 5.0), &transform);
        assert_eq!(router.phase(), GesturePhase::Idle);
        assert_eq!(
            router.on_pointer_move(ScreenPoint::new(50.0, 50.0), &mut transform),
            GestureOutcome::Ignored
        );
        assert_eq!(transform.offset(), ScreenVector::ZERO);
    }

    #[test]
    fn moves_without_a_press_are_absorbed() {
        let mut router = router();
        let mut transform = TransformState::new();

        assert_eq!(
            router.on_pointer_move(ScreenPoint::new(10.0, 10.0), &mut transform),
            GestureOutcome::Ignored
        );
        assert_eq!(router.on_pointer_release(), GestureOutcome::Ignored);
        assert_eq!(transform, TransformState::new());
    }

    #[test]
    fn a_second_touch_promotes_a_drag_to_a_pinch() {
        let mut router = router();
        let transform = TransformState::new();

        router.on_touch_start(&[ScreenPoint::new(100.0, 100.0)], &transform);
        assert!(matches!(router.phase(), GesturePhase::Dragging { .. }));

        router.on_touch_start(
            &[ScreenPoint::new(100.0, 100.0), ScreenPoint::new(200.0, 100.0)],
            &transform,
        );
        assert_eq!(
            router.phase(),
            GesturePhase::Pinching {
                start_distance: 100.0,
                start_center: ScreenPoint::new(150.0, 100.0),
                start_scale: 0.9,
                start_offset: ScreenVector::ZERO,
            }
        );
    }

    #[test]
    fn pinch_spread_scales_from_the_start_snapshot() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_touch_start(
            &[ScreenPoint::new(350.0, 300.0), ScreenPoint::new(450.0, 300.0)],
            &transform,
        );
        // Spread the fingers to double the distance, keeping the same center.
        let spread = [ScreenPoint::new(300.0, 300.0), ScreenPoint::new(500.0, 300.0)];
        router.on_touch_move(&spread, CENTER, &mut transform);
        assert!((transform.scale() - 1.8).abs() < 1e-12);

        // The pinch center sits on the viewport center with zero start offset,
        // so the anchored offset stays put.
        assert!(transform.offset().x.abs() < 1e-12);
        assert!(transform.offset().y.abs() < 1e-12);
    }

    #[test]
    fn repeated_pinch_updates_do_not_compound() {
        let mut router = router();
        let mut transform = TransformState::new();
        transform.pan_by(ScreenVector::new(25.0, -40.0));

        router.on_touch_start(
            &[ScreenPoint::new(100.0, 200.0), ScreenPoint::new(200.0, 200.0)],
            &transform,
        );
        let update = [ScreenPoint::new(80.0, 200.0), ScreenPoint::new(230.0, 200.0)];
        router.on_touch_move(&update, CENTER, &mut transform);
        let first = transform;

        // Same finger positions again: derived from the start snapshot, the
        // result must be bit-for-bit identical.
        router.on_touch_move(&update, CENTER, &mut transform);
        assert_eq!(transform, first);
    }

    #[test]
    fn pinch_scale_clamps_and_anchors_with_the_applied_ratio() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_touch_start(
            &[ScreenPoint::new(399.0, 300.0), ScreenPoint::new(401.0, 300.0)],
            &transform,
        );
        // Distance grows 1000x; scale must stop at the ceiling.
        let spread = [ScreenPoint::new(-600.0, 300.0), ScreenPoint::new(1400.0, 300.0)];
        router.on_touch_move(&spread, CENTER, &mut transform);
        assert_eq!(transform.scale(), crate::transform::SCALE_MAX);
    }

    #[test]
    fn lifting_to_one_finger_ends_the_pinch_without_a_tap() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_touch_start(
            &[ScreenPoint::new(100.0, 100.0), ScreenPoint::new(200.0, 100.0)],
            &transform,
        );
        let outcome = router.on_touch_end(&[ScreenPoint::new(100.0, 100.0)]);
        assert_eq!(outcome, GestureOutcome::Ignored);
        assert_eq!(router.phase(), GesturePhase::Idle);

        // A two-finger move arriving after the pinch ended is malformed.
        assert_eq!(
            router.on_touch_move(
                &[ScreenPoint::new(100.0, 100.0), ScreenPoint::new(300.0, 100.0)],
                CENTER,
                &mut transform,
            ),
            GestureOutcome::Ignored
        );
    }

    #[test]
    fn single_touch_release_without_movement_taps() {
        let mut router = router();
        let transform = TransformState::new();

        router.on_touch_start(&[ScreenPoint::new(42.0, 42.0)], &transform);
        assert_eq!(router.on_touch_end(&[]), GestureOutcome::Tap);
    }

    #[test]
    fn modifier_wheel_zooms_toward_the_pointer() {
        let mut router = router();
        let mut transform = TransformState::new();

        let event = WheelEvent {
            zoom_modifier: true,
            ..wheel(ScreenPoint::new(500.0, 300.0), 0.0, -10.0)
        };
        router.on_wheel(&event, CENTER, &mut transform);
        // factor = 1 - (-10 * 0.01) = 1.1
        assert!((transform.scale() - 0.99).abs() < 1e-12);
        assert!(transform.offset().x < 0.0, "zooming in pushes content away from the anchor side");
    }

    #[test]
    fn small_pixel_deltas_pan_like_a_trackpad() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_wheel(&wheel(CENTER, 0.0, 12.0), CENTER, &mut transform);
        assert_eq!(transform.offset(), ScreenVector::new(0.0, -12.0));
        assert_eq!(transform.scale(), 0.9);
    }

    #[test]
    fn any_horizontal_component_pans_even_when_large() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_wheel(&wheel(CENTER, 55.0, 90.0), CENTER, &mut transform);
        assert_eq!(transform.offset(), ScreenVector::new(-55.0, -90.0));
        assert_eq!(transform.scale(), 0.9);
    }

    #[test]
    fn large_vertical_deltas_step_the_zoom_by_ten_percent() {
        let mut router = router();
        let mut transform = TransformState::new();

        router.on_wheel(&wheel(CENTER, 0.0, 120.0), CENTER, &mut transform);
        assert!((transform.scale() - 0.81).abs() < 1e-12);

        router.on_wheel(&wheel(CENTER, 0.0, -120.0), CENTER, &mut transform);
        assert!((transform.scale() - 0.891).abs() < 1e-12);
    }

    #[test]
    fn line_mode_deltas_are_never_trackpad_pans() {
        let mut router = router();
        let mut transform = TransformState::new();

        let event = WheelEvent {
            delta_mode: WheelDeltaMode::Line,
            ..wheel(CENTER, 0.0, 3.0)
        };
        router.on_wheel(&event, CENTER, &mut transform);
        assert_eq!(transform.offset(), ScreenVector::ZERO);
        assert!((transform.scale() - 0.81).abs() < 1e-12);
    }
}
