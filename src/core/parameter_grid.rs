use serde::{Deserialize, Serialize};

use crate::core::error::{GridError, GridResult};

const LATTICE_TOLERANCE: f64 = 1e-9;

/// One `(ca, cb)` pair; the complex constant `c = ca + i*cb` of a single frame.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub ca: f64,
    pub cb: f64,
}

/**
 * Half-open range `[min, max)` sampled every `step`. When `min` lies on the step
 * lattice the samples are integer multiples of the step, `k * step`, so the same
 * value is produced no matter where the range starts. Otherwise they are offsets
 * from the start, `min + k * step`.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ParameterRange {
    fn default() -> Self {
        ParameterRange {
            min: -1.0,
            max: 1.0,
            step: 0.1,
        }
    }
}

impl ParameterRange {
    pub fn validate(&self, name: &str) -> GridResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(GridError::invalid_params(format!(
                "{name}: bounds and step must be finite"
            )));
        }
        if self.step <= 0.0 {
            return Err(GridError::invalid_params(format!(
                "{name}: step must be positive, got {}",
                self.step
            )));
        }
        if self.min >= self.max {
            return Err(GridError::invalid_params(format!(
                "{name}: min ({}) must be less than max ({})",
                self.min, self.max
            )));
        }
        if self.count() == 0 {
            return Err(GridError::invalid_params(format!(
                "{name}: step ({}) is wider than the range",
                self.step
            )));
        }
        Ok(())
    }

    // Index of `min` on the step lattice, when it lies on it.
    fn lattice_start(&self) -> Option<i64> {
        let index = self.min / self.step;
        ((index - index.round()).abs() < LATTICE_TOLERANCE).then(|| index.round() as i64)
    }

    /// Number of samples: `(max - min) / step`, rounded to the nearest integer.
    pub fn count(&self) -> usize {
        ((self.max - self.min) / self.step).round().max(0.0) as usize
    }

    pub fn values(&self) -> Vec<f64> {
        let count = self.count() as i64;
        match self.lattice_start() {
            Some(first) => (first..first + count)
                .map(|k| k as f64 * self.step)
                .collect(),
            None => (0..count).map(|k| self.min + k as f64 * self.step).collect(),
        }
    }
}

/**
 * The set of frames to render: the Cartesian product of the `ca` and `cb` samples,
 * visited row-major (outer loop over `ca`, inner loop over `cb`).
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterGrid {
    ca_values: Vec<f64>,
    cb_values: Vec<f64>,
}

impl ParameterGrid {
    pub fn new(ca_range: &ParameterRange, cb_range: &ParameterRange) -> ParameterGrid {
        ParameterGrid::from_values(ca_range.values(), cb_range.values())
    }

    pub fn from_values(ca_values: Vec<f64>, cb_values: Vec<f64>) -> ParameterGrid {
        ParameterGrid {
            ca_values,
            cb_values,
        }
    }

    pub fn ca_values(&self) -> &[f64] {
        &self.ca_values
    }

    pub fn cb_values(&self) -> &[f64] {
        &self.cb_values
    }

    pub fn rows(&self) -> usize {
        self.ca_values.len()
    }

    pub fn cols(&self) -> usize {
        self.cb_values.len()
    }

    pub fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.ca_values.iter().flat_map(move |&ca| {
            self.cb_values
                .iter()
                .map(move |&cb| GridPoint { ca, cb })
        })
    }
}
