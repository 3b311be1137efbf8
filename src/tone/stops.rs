//! Editable set of posterize threshold stops feeding the tone-curve generator.

use std::time::{Duration, Instant};

use crate::pacing::FrameGate;

use super::curve::ToneCurve;

/// Stored order is creation order (handles keep their identity while dragged);
/// semantic order is by position and recomputed on every derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStop {
    pub position: f64,
}

/// Outcome of activating a stop handle (press or tap).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopActivation {
    /// The stop is armed as the drag target.
    Armed,
    /// A second activation inside the delete window removed the stop.
    Removed,
    /// A double activation tried to remove the last remaining stop.
    Refused,
}

/// Manages the threshold stops and keeps a derived [`ToneCurve`] in lockstep.
///
/// Drag updates are coalesced to one mutation per display frame through a
/// [`FrameGate`]: events arriving while an update is pending are dropped.
#[derive(Debug)]
pub struct StopEditor {
    stops: Vec<ThresholdStop>,
    curve: ToneCurve,
    active_drag: Option<usize>,
    pending_drag: Option<(usize, f64)>,
    gate: FrameGate,
    last_activation: Option<(usize, Instant)>,
    delete_window: Duration,
}

pub const DEFAULT_SEED_POSITION: f64 = 0.5;

impl StopEditor {
    /// Seeds the editor with the single default stop, giving a two-level
    /// black/white threshold until the user edits.
    pub fn new(delete_window: Duration) -> Self {
        let stops = vec![ThresholdStop {
            position: DEFAULT_SEED_POSITION,
        }];
        let curve = ToneCurve::derive(&sorted_positions(&stops));
        Self {
            stops,
            curve,
            active_drag: None,
            pending_drag: None,
            gate: FrameGate::new(),
            last_activation: None,
            delete_window,
        }
    }

    pub fn stops(&self) -> &[ThresholdStop] {
        &self.stops
    }

    pub fn curve(&self) -> &ToneCurve {
        &self.curve
    }

    pub fn active_drag(&self) -> Option<usize> {
        self.active_drag
    }

    /// Appends a stop at `position` (clamped) and arms it as the drag target.
    ///
    /// The caller is responsible for only invoking this for activations on the
    /// slider-track surface, not on an existing handle.
    pub fn add_stop(&mut self, position: f64) -> usize {
        self.stops.push(ThresholdStop {
            position: position.clamp(0.0, 1.0),
        });
        let index = self.stops.len() - 1;
        self.active_drag = Some(index);
        self.rederive();
        tracing::debug!(index, position, "threshold stop added");
        index
    }

    /// Removes a stop; refuses when it would leave the set empty.
    pub fn remove_stop(&mut self, index: usize) -> bool {
        if self.stops.len() <= 1 || index >= self.stops.len() {
            tracing::warn!(index, count = self.stops.len(), "stop removal refused");
            return false;
        }
        self.stops.remove(index);
        if self.active_drag == Some(index) {
            self.active_drag = None;
        }
        self.rederive();
        true
    }

    /// Records a handle activation at `now`.
    ///
    /// A second activation of the same stop within the delete window removes
    /// it; otherwise the stop is armed for dragging. The window length is an
    /// empirical feel constant, configurable rather than contractual.
    pub fn activate_stop(&mut self, index: usize, now: Instant) -> StopActivation {
        if index >= self.stops.len() {
            return StopActivation::Refused;
        }
        let doubled = matches!(
            self.last_activation,
            Some((last_index, at)) if last_index == index && now.duration_since(at) < self.delete_window
        );
        if doubled {
            self.last_activation = None;
            if self.remove_stop(index) {
                return StopActivation::Removed;
            }
            return StopActivation::Refused;
        }
        self.last_activation = Some((index, now));
        self.active_drag = Some(index);
        StopActivation::Armed
    }

    /// Schedules a drag of the armed stop toward `position`.
    ///
    /// Returns false when dropped: no stop is armed, or an update is already
    /// pending for the current frame.
    pub fn drag_stop(&mut self, position: f64) -> bool {
        let Some(index) = self.active_drag else {
            return false;
        };
        if !self.gate.try_admit() {
            return false;
        }
        self.pending_drag = Some((index, position.clamp(0.0, 1.0)));
        true
    }

    /// Applies the pending drag and re-derives the curve; call once per frame.
    pub fn flush_frame(&mut self) {
        if let Some((index, position)) = self.pending_drag.take() {
            if let Some(stop) = self.stops.get_mut(index) {
                stop.position = position;
                self.rederive();
            }
        }
        self.gate.release();
    }

    /// Ends any in-flight drag (pointer release or panel dismissal).
    pub fn end_drag(&mut self) {
        self.active_drag = None;
        self.pending_drag = None;
        self.gate.release();
    }

    fn rederive(&mut self) {
        self.curve = ToneCurve::derive(&sorted_positions(&self.stops));
    }
}

fn sorted_positions(stops: &[ThresholdStop]) -> Vec<f64> {
    let mut positions: Vec<f64> = stops.iter().map(|stop| stop.position).collect();
    positions.sort_by(f64::total_cmp);
    positions
}
