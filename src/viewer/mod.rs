//! The viewer facade: wires the transform, gesture router, tone-curve editor,
//! and navigation history behind the collaborator contract the host renders
//! against.

mod command;
mod effects;
mod timer;

pub use command::{ViewerCommand, ViewerRequest};
pub use effects::{EffectsState, PosterizeToggle};
pub use timer::{format_elapsed, SessionTimer, TickGates};

use std::time::Instant;

use crate::config::ViewerConfig;
use crate::geometry::{ScreenPoint, Viewport};
use crate::gesture::{GestureOutcome, GestureRouter, PointerButton, WheelEvent};
use crate::history::{ImageDescriptor, NavigationHistory};
use crate::tone::{GradientStop, StopActivation, StopEditor};
use crate::transform::TransformState;

/// One interactive viewer session.
///
/// Single-threaded and run-to-completion: every event handler finishes before
/// the next event is routed, so no mutator ever observes partial state.
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
    viewport: Viewport,
    transform: TransformState,
    router: GestureRouter,
    effects: EffectsState,
    stops: Option<StopEditor>,
    history: NavigationHistory,
    timer: SessionTimer,
    current: Option<ImageDescriptor>,
    loading: bool,
    overlay_open: bool,
}

impl Viewer {
    pub fn new(config: ViewerConfig, viewport: Viewport) -> Self {
        Self {
            router: GestureRouter::new(config.tap_threshold_px, config.wheel_zoom_step),
            config,
            viewport,
            transform: TransformState::new(),
            effects: EffectsState::new(),
            stops: None,
            history: NavigationHistory::new(),
            timer: SessionTimer::new(),
            current: None,
            loading: false,
            overlay_open: false,
        }
    }

    /// The host reports viewport geometry changes here; the anchored zoom
    /// math needs the live center.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // --- Read models for the rendering layer -------------------------------

    pub fn current_transform(&self) -> &TransformState {
        &self.transform
    }

    /// Per-channel lookup table for the posterize filter; `None` while the
    /// effect is off. The rendering layer re-reads this every frame during an
    /// active stop drag.
    pub fn current_quantization_table(&self) -> Option<&[f64]> {
        if !self.effects.posterize() {
            return None;
        }
        self.stops.as_ref().map(|stops| stops.curve().table.as_slice())
    }

    pub fn slider_gradient(&self) -> Option<&[GradientStop]> {
        if !self.effects.posterize() {
            return None;
        }
        self.stops
            .as_ref()
            .map(|stops| stops.curve().gradient.as_slice())
    }

    pub fn effects(&self) -> &EffectsState {
        &self.effects
    }

    pub fn current_image(&self) -> Option<&ImageDescriptor> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    // --- Image lifecycle ---------------------------------------------------

    /// Accepts a descriptor from the external loader: resets the transform
    /// and session timer, records the history entry, and waits for the
    /// rendering layer to confirm the pixels arrived.
    pub fn load_image(&mut self, descriptor: ImageDescriptor) {
        self.loading = true;
        self.transform.reset();
        self.timer.reset();
        self.history.push(&descriptor);
        tracing::debug!(path = %descriptor.path, "image loaded into viewer");
        self.current = Some(descriptor);
    }

    pub fn image_loaded(&mut self) {
        self.loading = false;
    }

    /// Load failures are non-fatal; the previous image stays on screen.
    pub fn image_failed(&mut self) {
        self.loading = false;
    }

    /// Moves through history and restores the entry at the new cursor.
    /// Restores never push; the timer keeps running for the revisited image.
    pub fn step_history(&mut self, direction: isize) -> bool {
        let Some(descriptor) = self.history.step(direction) else {
            return false;
        };
        let descriptor = descriptor.clone();
        self.loading = true;
        self.transform.reset();
        self.current = Some(descriptor);
        true
    }

    /// Clamped step through the current image's sibling list.
    pub fn nav_sibling(&mut self, offset: isize) -> bool {
        let Some(next) = self
            .current
            .as_ref()
            .and_then(|image| image.sibling_jump(offset))
        else {
            return false;
        };
        self.jump_to(next);
        true
    }

    /// Clamped jump to a sibling index.
    pub fn jump_to_index(&mut self, index: usize) -> bool {
        let Some(next) = self
            .current
            .as_ref()
            .and_then(|image| image.jump_to_index(index))
        else {
            return false;
        };
        self.jump_to(next);
        true
    }

    /// Commits a typed 1-based index entry; non-numeric input is ignored.
    pub fn commit_index_input(&mut self, text: &str) -> bool {
        match crate::history::parse_index_input(text) {
            Some(index) => self.jump_to_index(index),
            None => false,
        }
    }

    fn jump_to(&mut self, descriptor: ImageDescriptor) {
        self.loading = true;
        self.transform.reset();
        self.history.push(&descriptor);
        self.current = Some(descriptor);
    }

    // --- Input routing -----------------------------------------------------

    pub fn on_pointer_press(&mut self, button: PointerButton, at: ScreenPoint) {
        self.router.on_pointer_press(button, at, &self.transform);
    }

    pub fn on_pointer_move(&mut self, at: ScreenPoint) -> GestureOutcome {
        self.router.on_pointer_move(at, &mut self.transform)
    }

    pub fn on_pointer_release(&mut self) -> GestureOutcome {
        let outcome = self.router.on_pointer_release();
        if outcome == GestureOutcome::Tap {
            self.effects.toggle_ui();
        }
        outcome
    }

    pub fn on_touch_start(&mut self, touches: &[ScreenPoint]) {
        self.router.on_touch_start(touches, &self.transform);
    }

    pub fn on_touch_move(&mut self, touches: &[ScreenPoint]) -> GestureOutcome {
        self.router
            .on_touch_move(touches, self.viewport.center(), &mut self.transform)
    }

    pub fn on_touch_end(&mut self, remaining: &[ScreenPoint]) -> GestureOutcome {
        let outcome = self.router.on_touch_end(remaining);
        if outcome == GestureOutcome::Tap {
            self.effects.toggle_ui();
        }
        outcome
    }

    pub fn on_wheel(&mut self, event: &WheelEvent) -> GestureOutcome {
        self.router
            .on_wheel(event, self.viewport.center(), &mut self.transform)
    }

    // --- Posterize stop surface -------------------------------------------

    /// Adds a stop for an activation on the slider track (the host performs
    /// the handle-vs-track hit test). Ignored while the panel is hidden.
    pub fn add_stop(&mut self, position: f64) -> Option<usize> {
        if !self.effects.posterize_panel() {
            return None;
        }
        self.stops.as_mut().map(|stops| stops.add_stop(position))
    }

    pub fn activate_stop(&mut self, index: usize) -> Option<StopActivation> {
        if !self.effects.posterize_panel() {
            return None;
        }
        self.stops
            .as_mut()
            .map(|stops| stops.activate_stop(index, Instant::now()))
    }

    pub fn remove_stop(&mut self, index: usize) -> bool {
        if !self.effects.posterize_panel() {
            return false;
        }
        self.stops
            .as_mut()
            .is_some_and(|stops| stops.remove_stop(index))
    }

    pub fn drag_stop(&mut self, position: f64) -> bool {
        if !self.effects.posterize_panel() {
            return false;
        }
        self.stops
            .as_mut()
            .is_some_and(|stops| stops.drag_stop(position))
    }

    pub fn end_stop_drag(&mut self) {
        if let Some(stops) = self.stops.as_mut() {
            stops.end_drag();
        }
    }

    /// Dismisses the stop panel while leaving the effect active. Any armed
    /// stop drag ends with the panel.
    pub fn hide_posterize_panel(&mut self) {
        self.effects.hide_posterize_panel();
        self.end_stop_drag();
    }

    /// Called once per display refresh; applies any pending stop drag so the
    /// rendering layer picks up a fresh table on its next read.
    pub fn flush_frame(&mut self) {
        if let Some(stops) = self.stops.as_mut() {
            stops.flush_frame();
        }
    }

    pub fn stop_editor(&self) -> Option<&StopEditor> {
        self.stops.as_ref()
    }

    // --- Session clock and overlays ---------------------------------------

    /// The host's one-second interval lands here.
    pub fn tick_second(&mut self) -> bool {
        let gates = TickGates {
            image_absent: self.current.is_none(),
            overlay_open: self.overlay_open,
            loading: self.loading,
        };
        self.timer.tick(gates)
    }

    /// Settings/favorites overlays gate the session clock while open.
    pub fn set_overlay_open(&mut self, open: bool) {
        self.overlay_open = open;
    }

    // --- Commands ----------------------------------------------------------

    /// Applies a high-level command; returns work the host must perform.
    pub fn apply_command(&mut self, command: ViewerCommand) -> Option<ViewerRequest> {
        match command {
            ViewerCommand::NextRandom => return Some(ViewerRequest::LoadRandom),
            ViewerCommand::ToggleFavorite => {
                return self.current.as_ref().map(|image| ViewerRequest::RecordFavorite {
                    path: image.path.clone(),
                });
            }
            ViewerCommand::SiblingForward => {
                self.nav_sibling(1);
            }
            ViewerCommand::SiblingBackward => {
                self.nav_sibling(-1);
            }
            ViewerCommand::HistoryBackward => {
                self.step_history(-1);
            }
            ViewerCommand::HistoryForward => {
                self.step_history(1);
            }
            ViewerCommand::FlipHorizontal => self.transform.flip(),
            ViewerCommand::RotateRight => self.transform.rotate_by(90.0),
            ViewerCommand::ResetTransform => self.transform.reset(),
            ViewerCommand::ToggleGrayscale => self.effects.toggle_grayscale(),
            ViewerCommand::TogglePosterize => {
                match self.effects.toggle_posterize() {
                    PosterizeToggle::Enabled => {
                        // Stops persist across disable/re-enable; seed only once.
                        if self.stops.is_none() {
                            self.stops =
                                Some(StopEditor::new(self.config.stop_delete_window()));
                        }
                    }
                    PosterizeToggle::Disabled => self.end_stop_drag(),
                    PosterizeToggle::PanelRevealed => {}
                }
            }
            ViewerCommand::TogglePause => self.timer.toggle_pause(),
            ViewerCommand::DismissOverlays => self.overlay_open = false,
        }
        None
    }
}
