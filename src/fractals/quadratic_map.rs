use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConvergenceParams {
    pub escape_radius_squared: f64,
    pub max_iter_count: u32,
    pub refinement_count: u32,
}

impl ConvergenceParams {
    pub fn with_max_iter_count(max_iter_count: u32) -> ConvergenceParams {
        ConvergenceParams {
            escape_radius_squared: 16.0,
            max_iter_count,
            refinement_count: 2,
        }
    }
}

/**
 * Data structure for storing the internal state of the quadratic map sequence calculation.
 * Highly optimized version of the equation to reduce floating point operation count.
 */
pub struct QuadraticMapSequence {
    pub x0: f64,
    pub y0: f64,
    pub x: f64,
    pub y: f64,
    pub x_sqr: f64,
    pub y_sqr: f64,
    pub iter_count: u32,
}

impl QuadraticMapSequence {
    /// Implements the equation:  Z := Z*Z + C, where both Z and C are imaginary numbers
    /// point:  initial value for "Z" in the above equation
    /// constant_term:  initial value for "C" in the above equation
    fn new(point: &[f64; 2], constant_term: &[f64; 2]) -> QuadraticMapSequence {
        QuadraticMapSequence {
            x0: constant_term[0],
            y0: constant_term[1],
            x: point[0],
            y: point[1],
            x_sqr: point[0] * point[0],
            y_sqr: point[1] * point[1],
            iter_count: 0,
        }
    }

    fn radius_squared(&self) -> f64 {
        self.x_sqr + self.y_sqr
    }

    // Z = Z*Z + C
    fn step(&mut self) {
        self.y = (self.x + self.x) * self.y + self.y0;
        self.x = self.x_sqr - self.y_sqr + self.x0;
        self.x_sqr = self.x * self.x;
        self.y_sqr = self.y * self.y;
        self.iter_count += 1;
    }

    // @return: true if the point escapes, false otherwise.
    fn step_until_condition(&mut self, max_iter_count: u32, max_radius_squared: f64) -> bool {
        while self.iter_count < max_iter_count {
            if self.radius_squared() > max_radius_squared {
                return true;
            }
            self.step();
        }
        false
    }

    /// Test whether a point escapes under the Julia iteration for `constant_term`.
    /// @param test_point: initial value of Z
    /// @param constant_term: the constant C = ca + i*cb of the Julia set
    /// @param convergence_params: escape radius, iteration limit, and smoothing steps
    /// @return: smooth iteration count if the point escapes, otherwise None().
    pub fn smooth_escape_count(
        test_point: &[f64; 2],
        constant_term: &[f64; 2],
        convergence_params: &ConvergenceParams,
    ) -> Option<f64> {
        let mut sequence = QuadraticMapSequence::new(test_point, constant_term);
        if !sequence.step_until_condition(
            convergence_params.max_iter_count,
            convergence_params.escape_radius_squared,
        ) {
            return None;
        }
        if convergence_params.refinement_count == 0 {
            return Some(sequence.iter_count as f64);
        }
        for _ in 0..convergence_params.refinement_count {
            sequence.step();
        }
        // log2(log(|z|)), with |z| > 2 once escaped, so both logs are positive.
        let log_radius = 0.5 * sequence.radius_squared().ln();
        let smooth = sequence.iter_count as f64 - log_radius.ln() / std::f64::consts::LN_2;
        Some(smooth.max(0.0))
    }

    /// Escape count normalized onto [0,1] by the iteration limit.
    pub fn normalized_escape(
        test_point: &[f64; 2],
        constant_term: &[f64; 2],
        convergence_params: &ConvergenceParams,
    ) -> Option<f32> {
        Self::smooth_escape_count(test_point, constant_term, convergence_params).map(|count| {
            (count / convergence_params.max_iter_count as f64).clamp(0.0, 1.0) as f32
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_lt;

    #[test]
    fn test_origin_is_bounded_for_zero_constant() {
        let params = ConvergenceParams::with_max_iter_count(100);
        assert_eq!(
            QuadraticMapSequence::smooth_escape_count(&[0.0, 0.0], &[0.0, 0.0], &params),
            None
        );
        assert_eq!(
            QuadraticMapSequence::normalized_escape(&[0.5, 0.5], &[0.0, 0.0], &params),
            None
        );
    }

    #[test]
    fn test_far_point_escapes_immediately() {
        let params = ConvergenceParams {
            escape_radius_squared: 4.0,
            max_iter_count: 50,
            refinement_count: 0,
        };
        assert_eq!(
            QuadraticMapSequence::smooth_escape_count(&[3.0, 0.0], &[0.0, 0.0], &params),
            Some(0.0)
        );
    }

    #[test]
    fn test_step_matches_complex_square() {
        // (1 + 2i)^2 + (0.5 - 0.25i) = -2.5 + 3.75i
        let mut sequence = QuadraticMapSequence::new(&[1.0, 2.0], &[0.5, -0.25]);
        sequence.step();
        assert_eq!(sequence.x, -2.5);
        assert_eq!(sequence.y, 3.75);
        assert_eq!(sequence.iter_count, 1);
    }

    #[test]
    fn test_smooth_count_is_monotone_in_distance() {
        let params = ConvergenceParams::with_max_iter_count(200);
        let near = QuadraticMapSequence::normalized_escape(&[0.9, 0.0], &[0.3, 0.0], &params);
        let far = QuadraticMapSequence::normalized_escape(&[1.8, 0.0], &[0.3, 0.0], &params);
        let (near, far) = (near.unwrap(), far.unwrap());
        assert_lt!(far, near);
        assert!((0.0..=1.0).contains(&near));
    }
}
