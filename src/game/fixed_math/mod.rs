//! Deterministic fixed-point mathematics.
//!
//! Pixel positions, momentum and timesteps all use fixed-point arithmetic so the
//! steering model behaves identically across platforms and so tolerance checks
//! such as "within 0.9 px" compare exactly instead of drifting with float error.

use fixed::types::I48F16;

pub use vec2::FixedVec2;

mod vec2;

/// Fixed-point number type used throughout the simulation.
///
/// I48F16: 48 integer bits, 16 fractional bits (precision ~0.000015).
pub type FixedNum = I48F16;

/// Integer cell index containing `value` when cells are `cell_size` wide.
///
/// Floors toward negative infinity so positions left of / above the origin
/// land in negative (out-of-bounds) cells instead of cell 0.
#[inline]
pub fn cell_index(value: FixedNum, cell_size: FixedNum) -> i32 {
    (value / cell_size).floor().to_num::<i32>()
}

/// Move `value` toward zero by `step` without crossing zero.
#[inline]
pub fn decay_toward_zero(value: FixedNum, step: FixedNum) -> FixedNum {
    if value > FixedNum::ZERO {
        (value - step).max(FixedNum::ZERO)
    } else if value < FixedNum::ZERO {
        (value + step).min(FixedNum::ZERO)
    } else {
        FixedNum::ZERO
    }
}
