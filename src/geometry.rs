/// Shared screen-space primitives used across transform, gesture, and viewer modules.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between two screen points, used as the pinch center.
    pub fn midpoint(self, other: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_to(self, other: ScreenPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn offset_from(self, origin: ScreenPoint) -> ScreenVector {
        ScreenVector::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A translation in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenVector {
    pub x: f64,
    pub y: f64,
}

impl ScreenVector {
    pub const ZERO: ScreenVector = ScreenVector::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: ScreenVector) -> ScreenVector {
        ScreenVector::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: ScreenVector) -> ScreenVector {
        ScreenVector::new(self.x - other.x, self.y - other.y)
    }

    pub fn scaled(self, factor: f64) -> ScreenVector {
        ScreenVector::new(self.x * factor, self.y * factor)
    }
}

/// The viewer surface in screen coordinates. The transform origin is its center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_and_distance_agree_on_axis_aligned_pairs() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(10.0, 0.0);
        assert_eq!(a.midpoint(b), ScreenPoint::new(5.0, 0.0));
        assert!((a.distance_to(b) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn viewport_center_accounts_for_origin_offset() {
        let viewport = Viewport::new(100.0, 50.0, 800.0, 600.0);
        assert_eq!(viewport.center(), ScreenPoint::new(500.0, 350.0));
    }
}
