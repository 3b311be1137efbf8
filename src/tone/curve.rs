//! Pure derivation of the posterize quantization table and its slider gradient.
//!
//! `N` sorted threshold stops partition `[0, 1)` into `N + 1` regions. Region
//! `k` maps to output level `k / N`, so the output levels are the `N + 1`
//! equally spaced values from 0 to 1 inclusive. The table and the gradient are
//! derived from the same region mapping so the slider preview and the applied
//! filter can never disagree.

/// Number of discretized input levels in a quantization table.
pub const TABLE_SIZE: usize = 256;

/// One color stop of the slider preview gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Horizontal position along the track, in `[0, 1]`.
    pub position: f64,
    /// Posterized gray level rendered from this position on, in `[0, 1]`.
    pub gray_level: f64,
}

/// A derived tone curve: the 256-entry lookup plus its preview gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    pub table: Vec<f64>,
    pub gradient: Vec<GradientStop>,
}

impl ToneCurve {
    /// Derives both read models from threshold positions sorted ascending.
    pub fn derive(sorted_positions: &[f64]) -> Self {
        Self {
            table: quantization_table(sorted_positions),
            gradient: gradient_stops(sorted_positions),
        }
    }
}

/// Maps each input level `i / 255` to its region's output level.
///
/// Single forward merge over the sorted stops: input levels ascend, so the
/// region cursor only ever advances. O(256 + N), never O(256 * N).
pub fn quantization_table(sorted_positions: &[f64]) -> Vec<f64> {
    debug_assert!(!sorted_positions.is_empty());
    debug_assert!(sorted_positions.windows(2).all(|w| w[0] <= w[1]));

    let regions = sorted_positions.len() as f64;
    let mut table = Vec::with_capacity(TABLE_SIZE);
    let mut region = 0usize;

    for i in 0..TABLE_SIZE {
        let pos = i as f64 / (TABLE_SIZE - 1) as f64;
        while region < sorted_positions.len() && pos >= sorted_positions[region] {
            region += 1;
        }
        table.push(region as f64 / regions);
    }
    table
}

/// Emits the preview gradient: a pair of color stops at each region boundary
/// (old level, then new level, both at the boundary position), bracketed by
/// the first level at 0 and the last level at 1.
pub fn gradient_stops(sorted_positions: &[f64]) -> Vec<GradientStop> {
    debug_assert!(!sorted_positions.is_empty());

    let regions = sorted_positions.len() as f64;
    let mut stops = Vec::with_capacity(2 + sorted_positions.len() * 2);
    let mut level = 0.0;
    stops.push(GradientStop {
        position: 0.0,
        gray_level: level,
    });
    for (index, &position) in sorted_positions.iter().enumerate() {
        stops.push(GradientStop {
            position,
            gray_level: level,
        });
        level = (index + 1) as f64 / regions;
        stops.push(GradientStop {
            position,
            gray_level: level,
        });
    }
    stops.push(GradientStop {
        position: 1.0,
        gray_level: level,
    });
    stops
}
