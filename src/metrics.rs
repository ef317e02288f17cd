use serde::{Deserialize, Serialize};

/// Summary of a run of episode returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Statistics {
    /// Statistics over the last `window` returns; the whole history when it
    /// is shorter than the window.
    pub fn recent(returns: &[f64], window: usize) -> Self {
        let start = returns.len().saturating_sub(window);
        let tail = &returns[start..];
        if tail.is_empty() {
            return Self::default();
        }

        let (sum, min, max) = tail.iter().fold(
            (0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(sum, min, max), &r| (sum + r, min.min(r), max.max(r)),
        );
        let count = tail.len();
        let mean = sum / count as f64;
        let sq_dev: f64 = tail.iter().map(|&r| (r - mean) * (r - mean)).sum();

        Statistics {
            mean,
            std: (sq_dev / count as f64).sqrt(),
            min,
            max,
            count,
        }
    }

    /// Statistics over every return.
    pub fn of_returns(returns: &[f64]) -> Self {
        Self::recent(returns, returns.len())
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
        }
    }
}
