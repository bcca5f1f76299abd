//! Rolling-window arithmetic shared by the indicators

use std::collections::VecDeque;

/// Trailing fixed-size window with an incrementally maintained sum.
///
/// The running sum is Neumaier-compensated. It snaps to exactly zero whenever
/// every value currently in the window is zero, so a flat stretch never
/// carries floating-point residue from values that already left the window.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    size: usize,
    values: VecDeque<f64>,
    sum: f64,
    compensation: f64,
    nonzero: usize,
}

impl RollingWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            values: VecDeque::with_capacity(size + 1),
            sum: 0.0,
            compensation: 0.0,
            nonzero: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.size {
            if let Some(old) = self.values.pop_front() {
                self.accumulate(-old);
                if old != 0.0 {
                    self.nonzero -= 1;
                }
            }
        }
        if self.size == 0 {
            return;
        }
        self.values.push_back(value);
        self.accumulate(value);
        if value != 0.0 {
            self.nonzero += 1;
        }
        if !self.sum.is_finite() || !self.compensation.is_finite() {
            self.resync();
        }
    }

    /// Rebuild the running sum from the window contents.
    ///
    /// Overflow leaves inf/NaN in the accumulator even after the offending
    /// value has left the window.
    fn resync(&mut self) {
        self.sum = 0.0;
        self.compensation = 0.0;
        let values: Vec<f64> = self.values.iter().copied().collect();
        for value in values {
            self.accumulate(value);
        }
    }

    fn accumulate(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - total) + value;
        } else {
            self.compensation += (value - total) + self.sum;
        }
        self.sum = total;
    }

    pub fn is_full(&self) -> bool {
        self.size > 0 && self.values.len() == self.size
    }

    pub fn sum(&self) -> f64 {
        if self.nonzero == 0 {
            0.0
        } else {
            self.sum + self.compensation
        }
    }

    /// Arithmetic mean of the window, once it holds `size` values.
    ///
    /// `None` when the mean is not representable as a finite number.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        let n = self.size as f64;
        let sum = self.sum();
        let mean = if sum.is_finite() {
            sum / n
        } else {
            // sum overflowed; scale first
            self.values.iter().map(|v| v / n).sum()
        };
        Some(mean).filter(|m| m.is_finite())
    }

    /// Sample standard deviation (N-1 denominator) of the full window.
    ///
    /// A window of identical values yields exactly zero.
    pub fn sample_std_dev(&self) -> Option<f64> {
        if !self.is_full() || self.size < 2 {
            return None;
        }
        let first = self.values[0];
        if self.values.iter().all(|&v| v == first) {
            return Some(0.0);
        }
        let mean = self.mean()?;
        let squared: f64 = self.values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((squared / (self.size - 1) as f64).sqrt()).filter(|s| s.is_finite())
    }
}

/// Trailing mean over `window` values, aligned to the input
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut rolling = RollingWindow::new(window);
    values
        .iter()
        .map(|&v| {
            rolling.push(v);
            rolling.mean()
        })
        .collect()
}

/// Trailing sample standard deviation over `window` values, aligned to the input
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut rolling = RollingWindow::new(window);
    values
        .iter()
        .map(|&v| {
            rolling.push(v);
            rolling.sample_std_dev()
        })
        .collect()
}

/// First difference; `None` at index 0
pub fn diff(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(values.windows(2).map(|pair| Some(pair[1] - pair[0])));
    out
}
