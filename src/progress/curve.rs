//! Temperature-curve completion heuristic.
//!
//! A hot compost pile spikes early, then cools as the easily digested
//! material runs out.  How far the latest temperature has fallen from the
//! peak is taken as a rough completion signal, and the trend of a
//! smoothed curve tells whether it is still falling.

use heapless::Vec as FixedVec;
use serde::{Deserialize, Serialize};

use crate::sensors::SensorReading;

/// Below this many samples the curve is not analysed at all.
pub const MIN_READINGS: usize = 10;

/// Moving-average window, and number of smoothed points the slope is
/// fitted over.
pub const WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveAnalysis {
    pub peak_temperature: f64,
    pub current_temperature: f64,
    /// `(peak − current) / peak`, as a percentage in `[0, 100]`.
    pub completion_pct: f64,
    /// Least-squares slope of the smoothed tail, °C per sample.
    pub slope: f64,
}

impl CurveAnalysis {
    /// True once the smoothed curve has stopped rising.
    pub fn is_cooling(&self) -> bool {
        self.slope <= 0.0
    }
}

/// Analyse readings given in timestamp order.
///
/// Returns `None` when there are fewer than [`MIN_READINGS`] samples.
pub fn analyze(readings: &[SensorReading]) -> Option<CurveAnalysis> {
    if readings.len() < MIN_READINGS {
        return None;
    }

    let temps: Vec<f64> = readings.iter().map(|r| r.temperature).collect();
    let peak_temperature = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let current_temperature = *temps.last()?;

    let completion_pct = if peak_temperature > 0.0 {
        ((peak_temperature - current_temperature) / peak_temperature * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    // Centred moving average, only where the full window fits; keep the
    // newest WINDOW points.
    let window = WINDOW.min(temps.len());
    let mut tail: FixedVec<f64, WINDOW> = temps
        .windows(window)
        .rev()
        .take(WINDOW)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect();
    tail.reverse();

    Some(CurveAnalysis {
        peak_temperature,
        current_temperature,
        completion_pct,
        slope: least_squares_slope(&tail),
    })
}

/// Slope of the best-fit line through `(i, ys[i])`.  Zero for fewer than
/// two points.
pub fn least_squares_slope(ys: &[f64]) -> f64 {
    let n = ys.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let x_mean = (n_f - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n_f;

    let (mut num, mut den) = (0.0, 0.0);
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    num / den
}
