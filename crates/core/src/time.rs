use thiserror::Error;

/// Relative slack used when counting how many whole steps fit in a span.
const SPAN_SLACK: f64 = 1e-9;

/// A uniform grid of time points `start + k * step` for `k` in `0..len`.
///
/// A grid always holds at least one point. It is built once per run and only
/// read afterwards: solvers take their step size from it and report one
/// snapshot per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start: f64,
    step: f64,
    len: usize,
}

/// Errors that can occur when constructing a [`TimeGrid`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum TimeGridError {
    #[error("start and end must be finite")]
    NonFiniteBounds,

    #[error("step must be finite and positive, got {0}")]
    InvalidStep(f64),

    #[error("end ({end}) is before start ({start})")]
    Reversed { start: f64, end: f64 },

    #[error("a grid needs at least one point")]
    Empty,
}

impl TimeGrid {
    /// Creates a grid of `len` points spaced by `step`, beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not finite, `step` is not finite and
    /// positive, or `len` is zero.
    pub fn new(start: f64, step: f64, len: usize) -> Result<Self, TimeGridError> {
        if !start.is_finite() {
            return Err(TimeGridError::NonFiniteBounds);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(TimeGridError::InvalidStep(step));
        }
        if len == 0 {
            return Err(TimeGridError::Empty);
        }
        Ok(Self { start, step, len })
    }

    /// Creates the grid covering `[start, end]` with spacing `step`.
    ///
    /// The number of points is `floor((end - start) / step) + 1`, so a grid
    /// from 0 to 100 with a unit step has 101 points and a zero-length span
    /// has exactly one.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are not finite, `end < start`, or the
    /// step is not finite and positive.
    pub fn span(start: f64, end: f64, step: f64) -> Result<Self, TimeGridError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimeGridError::NonFiniteBounds);
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(TimeGridError::InvalidStep(step));
        }
        if end < start {
            return Err(TimeGridError::Reversed { start, end });
        }

        let intervals = ((end - start) / step * (1.0 + SPAN_SLACK)).floor();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let len = intervals as usize + 1;

        Self::new(start, step, len)
    }

    /// Returns the first time point.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Returns the last time point.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.at(self.len - 1)
    }

    /// Returns the spacing between consecutive points.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the number of points, which is always at least one.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of steps between the first and last point.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.len - 1
    }

    /// Returns the time of point `index`.
    ///
    /// Indices past the end extrapolate along the grid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn at(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }

    /// Iterates over the time points in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(move |k| self.at(k))
    }

    /// Collects the time points into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn unit_step_over_hundred_days() {
        let grid = TimeGrid::span(0.0, 100.0, 1.0).unwrap();
        assert_eq!(grid.len(), 101);
        assert_eq!(grid.steps(), 100);
        assert_relative_eq!(grid.end(), 100.0);
        assert_relative_eq!(grid.at(50), 50.0);
    }

    #[test]
    fn fine_step_keeps_endpoint() {
        let grid = TimeGrid::span(0.0, 50.0, 0.01).unwrap();
        assert_eq!(grid.len(), 5001);
        assert_relative_eq!(grid.end(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_horizon_has_single_point() {
        let grid = TimeGrid::span(3.0, 3.0, 1.0).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.steps(), 0);
        assert_eq!(grid.to_vec(), vec![3.0]);
    }

    #[test]
    fn partial_step_is_dropped() {
        let grid = TimeGrid::span(0.0, 10.5, 1.0).unwrap();
        assert_eq!(grid.len(), 11);
        assert_relative_eq!(grid.end(), 10.0);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            TimeGrid::span(0.0, 10.0, 0.0),
            Err(TimeGridError::InvalidStep(0.0))
        );
        assert_eq!(
            TimeGrid::span(5.0, 1.0, 1.0),
            Err(TimeGridError::Reversed {
                start: 5.0,
                end: 1.0
            })
        );
        assert_eq!(
            TimeGrid::span(0.0, f64::INFINITY, 1.0),
            Err(TimeGridError::NonFiniteBounds)
        );
        assert_eq!(TimeGrid::new(0.0, 1.0, 0), Err(TimeGridError::Empty));
    }
}
