//! Posterization tone-curve generation and the threshold-stop editor.

pub mod curve;
pub mod stops;

pub use curve::{gradient_stops, quantization_table, GradientStop, ToneCurve, TABLE_SIZE};
pub use stops::{StopActivation, StopEditor, ThresholdStop};
