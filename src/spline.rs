use std::{error::Error, fmt::Display};

use nalgebra::{DMatrix, DVector};

use crate::{point::ControlPoint, polynomial::Polynomial};

/// Number of coefficients of every interval polynomial (degree 2).
const COEFFICIENTS_PER_INTERVAL: usize = 3;

/// Minimal number of points needed to define a quadratic interpolant.
pub const MIN_SPLINE_POINTS: usize = 3;

/// Interpolating spline of degree 2 through a sequence of control points.
///
/// Points are used in the order they are given and are never sorted, so the x coordinates
/// must be strictly increasing along the sequence. The curve is made of `n - 2` parabolic
/// pieces joined with continuous first derivative. Breakpoints are the first and the last
/// x coordinate and the midpoints `(x[k] + x[k + 1]) / 2` for `k` in `1..n-2`, which gives
/// the same curve as the usual quadratic B-spline interpolant.
pub struct QuadraticSpline {
    points: Vec<ControlPoint>,
    breakpoints: Vec<f64>,
    polynomials: Vec<Polynomial>,
    min_x: f64,
    max_x: f64,
}

impl QuadraticSpline {
    /// Builds the spline through `points` in sequence order.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, QuadraticSpline};
    /// use assert_approx_eq::assert_approx_eq;
    ///
    /// let points = vec![
    ///     ControlPoint::new(0.0, 0.0),
    ///     ControlPoint::new(1.0, 1.0),
    ///     ControlPoint::new(2.0, 4.0),
    /// ];
    /// let spline = QuadraticSpline::new(&points).unwrap();
    ///
    /// assert_approx_eq!(2.25, spline.interpolate(1.5).unwrap(), 1e-9);
    /// ```
    /// # Errors
    /// Error is returned when there are fewer than 3 points or when x coordinates are not
    /// strictly increasing along the sequence.
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, QuadraticSpline, SplineError};
    ///
    /// // second point was dragged past the third one
    /// let points = vec![
    ///     ControlPoint::new(100.0, 300.0),
    ///     ControlPoint::new(350.0, 100.0),
    ///     ControlPoint::new(300.0, 400.0),
    /// ];
    /// let spline = QuadraticSpline::new(&points);
    /// assert_eq!(Some(SplineError::NonIncreasingX { index: 2 }), spline.err());
    /// ```
    pub fn new(points: &[ControlPoint]) -> Result<Self, SplineError> {

        if points.len() < MIN_SPLINE_POINTS {
            return Err(SplineError::TooFewPoints {
                required: MIN_SPLINE_POINTS,
                actual: points.len(),
            });
        }

        let number_of_intervals = points.len() - 2;
        let mut spline = QuadraticSpline {
            points: points.to_vec(),
            breakpoints: Vec::with_capacity(number_of_intervals + 1),
            polynomials: Vec::with_capacity(number_of_intervals),
            min_x: points[0].x,
            max_x: points[points.len() - 1].x,
        };

        spline.check_points_order()?;
        spline.calculate_breakpoints();
        spline.calculate_polynomials()?;
        return Ok(spline);
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn interpolate(&self, x: f64) -> Result<f64, SplineError> {
        if self.is_in_range(x) {
            let index = self.find_interval_index_bisect(x);
            Ok(self.polynomials[index].evaluate(x))
        } else {
            return Err(SplineError::OutOfRange { x });
        }
    }

    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Result<Vec<f64>, SplineError> {

        if let Some(x) = x_vector.iter().find(|x| !self.is_in_range(**x)) {
            return Err(SplineError::OutOfRange { x: *x });
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, *x);
            results.push(self.polynomials[index].evaluate(*x));
        }
        Ok(results)
    }

    /// Evaluates the spline anywhere, extending the boundary parabolas outside the range.
    pub fn extrapolate(&self, x: f64) -> f64 {

        match self.evaluate_on_boundaries(x) {
            Some(result) => return result,
            None => {
                let index = self.find_interval_index_bisect(x);
                return self.polynomials[index].evaluate(x)
            },
        }
    }

    /// First derivative of the spline, with the same boundary extension as [QuadraticSpline::extrapolate].
    pub fn derivative(&self, x: f64) -> f64 {
        let index = self.find_interval_index_clamped(x);
        self.polynomials[index].evaluate_derivative(x)
    }

    /// Samples the curve at `count` evenly spaced x values from `min_x` to `max_x` inclusive.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, QuadraticSpline};
    ///
    /// let points = vec![
    ///     ControlPoint::new(100.0, 300.0),
    ///     ControlPoint::new(200.0, 100.0),
    ///     ControlPoint::new(300.0, 400.0),
    /// ];
    /// let curve = QuadraticSpline::new(&points).unwrap().sample(500);
    ///
    /// assert_eq!(500, curve.len());
    /// assert_eq!(100.0, curve[0].x);
    /// assert_eq!(300.0, curve[499].x);
    /// ```
    pub fn sample(&self, count: usize) -> Vec<ControlPoint> {
        let x_vector = linspace(self.min_x, self.max_x, count);

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            index = self.find_interval_index_with_hint(index, x);
            results.push(ControlPoint::new(x, self.polynomials[index].evaluate(x)));
        }
        results
    }

    fn check_points_order(&self) -> Result<(), SplineError> {
        let offending = self.points
            .windows(2)
            .position(|w| !(w[1].x - w[0].x > 1e-12));

        match offending {
            Some(i) => Err(SplineError::NonIncreasingX { index: i + 1 }),
            None => Ok(()),
        }
    }

    fn calculate_breakpoints(&mut self) {
        let last = self.points.len() - 1;

        self.breakpoints.push(self.points[0].x);
        for k in 1..last - 1 {
            self.breakpoints.push(0.5 * (self.points[k].x + self.points[k + 1].x));
        }
        self.breakpoints.push(self.points[last].x);
    }

    fn calculate_polynomials(&mut self) -> Result<(), SplineError> {
        let number_of_intervals = self.breakpoints.len() - 1;

        let matrix_size = number_of_intervals * COEFFICIENTS_PER_INTERVAL;
        let mut matrix = DMatrix::<f64>::zeros(matrix_size, matrix_size);
        let mut rhs = DVector::<f64>::zeros(matrix_size);

        let mut equation_counter = 0;

        for point in self.points.iter() {
            let interval = self.find_interval_index_bisect(point.x);
            self.function_value_equation_coefficients(
                interval,
                point.x,
                point.y,
                &mut equation_counter,
                &mut matrix,
                &mut rhs,
            );
        }

        for k in 1..number_of_intervals {
            self.continuity_equation_coefficients(
                k,
                &mut equation_counter,
                &mut matrix,
                &mut rhs,
            );
        }

        let solution = match matrix.lu().solve(&rhs) {
            Some(solution) => solution,
            None => return Err(SplineError::SingularSystem),
        };

        for i in 0..number_of_intervals {
            self.create_polynomial_for_interval(i, &solution);
        }
        Ok(())
    }

    fn function_value_equation_coefficients(
        &self,
        interval: usize,
        x: f64,
        y: f64,
        equation_counter: &mut usize,
        matrix: &mut DMatrix<f64>,
        rhs: &mut DVector<f64>,
    ) {
        let index_start = interval * COEFFICIENTS_PER_INTERVAL;
        let t = x - self.breakpoints[interval];

        matrix[(*equation_counter, index_start)] = 1.0;
        matrix[(*equation_counter, index_start + 1)] = t;
        matrix[(*equation_counter, index_start + 2)] = t * t;
        rhs[*equation_counter] = y;
        *equation_counter += 1;
    }

    /// Value and first derivative continuity between interval `k - 1` and `k` at breakpoint `k`.
    fn continuity_equation_coefficients(
        &self,
        k: usize,
        equation_counter: &mut usize,
        matrix: &mut DMatrix<f64>,
        rhs: &mut DVector<f64>,
    ) {
        let index_start_0 = (k - 1) * COEFFICIENTS_PER_INTERVAL;
        let index_start_1 = k * COEFFICIENTS_PER_INTERVAL;
        let h = self.breakpoints[k] - self.breakpoints[k - 1];

        matrix[(*equation_counter, index_start_0)] = 1.0;
        matrix[(*equation_counter, index_start_0 + 1)] = h;
        matrix[(*equation_counter, index_start_0 + 2)] = h * h;
        matrix[(*equation_counter, index_start_1)] = -1.0;
        rhs[*equation_counter] = 0.0;
        *equation_counter += 1;

        matrix[(*equation_counter, index_start_0 + 1)] = 1.0;
        matrix[(*equation_counter, index_start_0 + 2)] = 2.0 * h;
        matrix[(*equation_counter, index_start_1 + 1)] = -1.0;
        rhs[*equation_counter] = 0.0;
        *equation_counter += 1;
    }

    fn create_polynomial_for_interval(
        &mut self,
        interval: usize,
        solution: &DVector<f64>,
    ) {
        let index_start = interval * COEFFICIENTS_PER_INTERVAL;
        let coefficients = (index_start..index_start + COEFFICIENTS_PER_INTERVAL)
            .map(|c| solution[c])
            .collect();

        let interval_polynomial = Polynomial::new(coefficients, self.breakpoints[interval]);
        self.polynomials.push(interval_polynomial);
    }

    fn is_in_range(&self, x: f64) -> bool {
        self.min_x <= x && x <= self.max_x
    }

    fn find_interval_index_bisect(&self, x: f64) -> usize {
        let size = self.breakpoints.len();
        let mut min = 0;
        let mut max = size - 1;

        while max - min > 1 {
            let mid = (min + max) / 2;
            if x < self.breakpoints[mid] {
                max = mid;
            } else {
                min = mid;
            }
        }
        return min;
    }

    fn find_interval_index_clamped(&self, x: f64) -> usize {
        if x <= self.min_x {
            0
        } else if x >= self.max_x {
            self.polynomials.len() - 1
        } else {
            self.find_interval_index_bisect(x)
        }
    }

    fn find_interval_index_with_hint(&self, index_hint: usize, x: f64) -> usize {

        if !self.is_in_interval_range(index_hint, x) {

            if index_hint + 1 < self.polynomials.len() && self.is_in_interval_range(index_hint + 1, x) {
                return index_hint + 1;
            } else {
                return self.find_interval_index_clamped(x);
            }
        }
        return index_hint;
    }

    fn is_in_interval_range(&self, interval_index: usize, x: f64) -> bool {
        self.breakpoints[interval_index] <= x && x <= self.breakpoints[interval_index + 1]
    }

    fn evaluate_on_boundaries(&self, x: f64) -> Option<f64> {
        let size = self.breakpoints.len();
        if x < self.breakpoints[1] {
            Some(self.polynomials[0].evaluate(x))
        } else if x > self.breakpoints[size - 2] {
            Some(self.polynomials[size - 2].evaluate(x))
        } else {
            None
        }
    }
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// Reason why the spline could not be built or evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    TooFewPoints { required: usize, actual: usize },
    /// Point at `index` does not lie to the right of its predecessor.
    NonIncreasingX { index: usize },
    SingularSystem,
    OutOfRange { x: f64 },
}

impl Display for SplineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplineError::TooFewPoints { required, actual } => write!(
                f,
                "Error in Spline: spline must have at least {} points, got {}",
                required, actual
            ),
            SplineError::NonIncreasingX { index } => write!(
                f,
                "Error in Spline: x coordinates must be strictly increasing, point {} breaks the order",
                index
            ),
            SplineError::SingularSystem => {
                write!(f, "Error in Spline: error while solving set of equations")
            }
            SplineError::OutOfRange { x } => write!(f, "Error in Spline: x = {} is out of range", x),
        }
    }
}

impl Error for SplineError {}
