use serde::{Deserialize, Serialize};

/// ControlPoint represents a point in data space through which the spline passes.
/// - `x` - horizontal coordinate,
/// - `y` - vertical coordinate.
///
/// The visible data space is `[0, 800] x [0, 600]` by default, but coordinates are never
/// clamped: a point may be dragged anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ControlPoint { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }

    /// Returns a copy of the point moved by `dx` and `dy`.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::ControlPoint;
    ///
    /// let point = ControlPoint::new(500.0, 350.0).offset(50.0, 0.0);
    /// assert_eq!(ControlPoint::new(550.0, 350.0), point);
    /// ```
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        ControlPoint { x: self.x + dx, y: self.y + dy }
    }

    /// Checks if `other` lies strictly within `tolerance` of this point on both axes.
    /// This is a box test, not a distance test.
    pub fn is_within(&self, other: &ControlPoint, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from(value: (f64, f64)) -> Self {
        ControlPoint { x: value.0, y: value.1 }
    }
}

impl From<ControlPoint> for (f64, f64) {
    fn from(value: ControlPoint) -> Self {
        (value.x, value.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let point = ControlPoint::new(1.0, 2.5);

        assert_eq!(1.0, point.get_x());
        assert_eq!(2.5, point.get_y());
    }

    #[test]
    fn test_from_tuple() {
        let point: ControlPoint = (300.0, 400.0).into();
        assert_eq!(ControlPoint::new(300.0, 400.0), point);

        let tuple: (f64, f64) = point.into();
        assert_eq!((300.0, 400.0), tuple);
    }

    #[test]
    fn test_is_within_is_strict() {
        let point = ControlPoint::new(300.0, 400.0);

        assert!(point.is_within(&ControlPoint::new(309.9, 390.1), 10.0));
        assert!(!point.is_within(&ControlPoint::new(310.0, 400.0), 10.0));
        assert!(!point.is_within(&ControlPoint::new(300.0, 389.0), 10.0));
    }

    #[test]
    fn test_is_within_uses_box_not_circle() {
        // corner of the box is further than 10 units away but still inside
        let point = ControlPoint::new(0.0, 0.0);
        assert!(point.is_within(&ControlPoint::new(9.0, 9.0), 10.0));
    }
}
