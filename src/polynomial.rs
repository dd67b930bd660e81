/// Polynomial in the local variable `x - origin`.
pub struct Polynomial {
    coefficients: Vec<f64>,
    origin: f64,
}

impl Polynomial {

    pub fn new(coefficients: Vec<f64>, origin: f64) -> Self {
        Polynomial { coefficients, origin }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let t = x - self.origin;
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * t + c)
    }

    pub fn evaluate_derivative(&self, x: f64) -> f64 {
        let t = x - self.origin;
        let mut result = 0.0;
        for i in (1..self.coefficients.len()).rev() {
            result = result * t + i as f64 * self.coefficients[i];
        }
        result
    }
}
