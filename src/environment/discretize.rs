//! Clamped digitization of continuous values and mixed-radix state encoding.

use crate::error::{Result, TabulaError};
use crate::State;
use serde::{Deserialize, Serialize};

/// Uniform bins over `[lower, upper)` with one catch-all bin on each side.
///
/// With `count` bins, the interior `count - 2` bins have width
/// `(upper - lower) / (count - 2)`. Values below `lower` land in bin 0 and
/// values at or above `upper` land in bin `count - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bins {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bins {
    pub fn new(lower: f64, upper: f64, count: usize) -> Result<Self> {
        if count < 3 {
            return Err(TabulaError::invalid_parameter(
                "bins".to_string(),
                format!("need at least 3 bins, got {}", count),
            ));
        }
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(TabulaError::invalid_parameter(
                "bounds".to_string(),
                format!("lower bound {} must be below upper bound {}", lower, upper),
            ));
        }
        Ok(Bins { lower, upper, count })
    }

    pub fn width(&self) -> f64 {
        (self.upper - self.lower) / (self.count - 2) as f64
    }

    pub fn digitize(&self, value: f64) -> usize {
        if value < self.lower {
            0
        } else if value >= self.upper {
            self.count - 1
        } else {
            let idx = ((value - self.lower) / self.width()).floor() as usize + 1;
            idx.min(self.count - 1)
        }
    }
}

/// Combine per-dimension digits into one index, first digit outermost.
///
/// `encode_mixed_radix(&[d0, d1, d2], &[r0, r1, r2]) == (d0 * r1 + d1) * r2 + d2`
pub fn encode_mixed_radix(digits: &[usize], radices: &[usize]) -> State {
    debug_assert_eq!(digits.len(), radices.len());
    digits
        .iter()
        .zip(radices)
        .fold(0, |acc, (&digit, &radix)| {
            debug_assert!(digit < radix);
            acc * radix + digit
        })
}
