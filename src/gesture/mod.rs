//! Pointer, touch, and wheel input classification for the viewer surface.

pub mod event;
pub mod router;

pub use event::{PointerButton, WheelDeltaMode, WheelEvent};
pub use router::{GestureOutcome, GesturePhase, GestureRouter};
