// Natural cubic spline interpolation, y = f(x).
//
// Coefficients come from the standard tridiagonal system for natural
// boundary conditions (second derivative zero at both ends), solved
// with nalgebra.

extern crate nalgebra as na;

use crate::common::{PlannerError, PlannerResult};

/// Interpolating cubic spline, exact at its control points
#[derive(Debug, Clone)]
pub struct CubicSpline {
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
    x: Vec<f64>,
}

impl CubicSpline {
    /// Fit a spline through the control points.
    ///
    /// Requires at least two points with strictly increasing x.
    pub fn fit(x: &[f64], y: &[f64]) -> PlannerResult<Self> {
        let nx = x.len();
        if nx < 2 || y.len() != nx {
            return Err(PlannerError::InvalidParameter(format!(
                "spline needs at least 2 matched control points, got {} x / {} y",
                nx,
                y.len()
            )));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PlannerError::InvalidParameter(
                "spline control x values must be strictly increasing".to_string(),
            ));
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let a = y.to_vec();

        let a_mat = Self::coefficient_matrix(&h);
        let b_vec = Self::rhs_vector(&h, &a);
        let c_na = a_mat
            .try_inverse()
            .ok_or_else(|| PlannerError::NumericalError("singular spline system".to_string()))?
            * b_vec;

        let c: Vec<f64> = c_na.iter().copied().collect();
        let mut b = Vec::with_capacity(nx - 1);
        let mut d = Vec::with_capacity(nx - 1);
        for i in 0..nx - 1 {
            d.push((c[i + 1] - c[i]) / (3.0 * h[i]));
            b.push((a[i + 1] - a[i]) / h[i] - h[i] * (c[i + 1] + 2.0 * c[i]) / 3.0);
        }

        Ok(Self { a, b, c, d, x: x.to_vec() })
    }

    /// Evaluate f(t).
    ///
    /// t outside the control span extends the end segments' cubics.
    pub fn evaluate(&self, t: f64) -> f64 {
        let i = self.segment_index(t);
        let dx = t - self.x[i];
        self.a[i] + self.b[i] * dx + self.c[i] * dx.powi(2) + self.d[i] * dx.powi(3)
    }

    /// First derivative f'(t)
    pub fn derivative(&self, t: f64) -> f64 {
        let i = self.segment_index(t);
        let dx = t - self.x[i];
        self.b[i] + 2.0 * self.c[i] * dx + 3.0 * self.d[i] * dx.powi(2)
    }

    fn segment_index(&self, t: f64) -> usize {
        // partition_point gives the first knot greater than t; clamp to
        // the last real segment
        self.x
            .partition_point(|&knot| knot <= t)
            .saturating_sub(1)
            .min(self.x.len() - 2)
    }

    fn coefficient_matrix(h: &[f64]) -> na::DMatrix<f64> {
        let nx = h.len() + 1;
        let mut mat = na::DMatrix::zeros(nx, nx);
        mat[(0, 0)] = 1.0;
        mat[(nx - 1, nx - 1)] = 1.0;
        for i in 1..nx - 1 {
            mat[(i, i - 1)] = h[i - 1];
            mat[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            mat[(i, i + 1)] = h[i];
        }
        mat
    }

    fn rhs_vector(h: &[f64], a: &[f64]) -> na::DVector<f64> {
        let nx = h.len() + 1;
        let mut rhs = na::DVector::zeros(nx);
        for i in 1..nx - 1 {
            rhs[i] = 3.0 * (a[i + 1] - a[i]) / h[i] - 3.0 * (a[i] - a[i - 1]) / h[i - 1];
        }
        rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_control_points() {
        let x = [0.0, 7.5, 15.0, 30.0, 60.0];
        let y = [0.0, 1.0, -0.5, 2.0, 0.0];
        let spline = CubicSpline::fit(&x, &y).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((spline.evaluate(*xi) - yi).abs() < 1e-9);
        }
    }

    #[test]
    fn test_straight_line_stays_straight() {
        let x = [0.0, 10.0, 20.0, 30.0];
        let y = [1.0, 21.0, 41.0, 61.0];
        let spline = CubicSpline::fit(&x, &y).unwrap();
        assert!((spline.evaluate(5.0) - 11.0).abs() < 1e-9);
        assert!((spline.evaluate(25.0) - 51.0).abs() < 1e-9);
        assert!((spline.derivative(15.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuous_at_knots() {
        let x = [0.0, 1.0, 3.0, 4.0, 6.0];
        let y = [0.0, 2.0, 1.0, 3.0, -1.0];
        let spline = CubicSpline::fit(&x, &y).unwrap();
        for &knot in &x[1..x.len() - 1] {
            let before = spline.evaluate(knot - 1e-7);
            let after = spline.evaluate(knot + 1e-7);
            assert!((before - after).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rejects_single_point() {
        assert!(matches!(
            CubicSpline::fit(&[1.0], &[2.0]),
            Err(PlannerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_non_increasing_x() {
        assert!(matches!(
            CubicSpline::fit(&[0.0, 2.0, 2.0], &[0.0, 1.0, 2.0]),
            Err(PlannerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_two_point_fit_is_linear() {
        let spline = CubicSpline::fit(&[0.0, 10.0], &[0.0, 5.0]).unwrap();
        assert!((spline.evaluate(4.0) - 2.0).abs() < 1e-9);
    }
}
