use crate::point::ControlPoint;

/// Smallest number of points the set may shrink to.
pub const MIN_POINTS: usize = 3;
/// Half size of the square around a point inside which a press picks it.
pub const HIT_TOLERANCE: f64 = 10.0;
/// Horizontal distance between the last point and a newly added one.
pub const ADD_OFFSET_X: f64 = 50.0;

/// Points the editor starts with.
pub const SEED_POINTS: [(f64, f64); 5] = [
    (100.0, 300.0),
    (200.0, 100.0),
    (300.0, 400.0),
    (400.0, 150.0),
    (500.0, 350.0),
];

/// Ordered control points together with the index of the point being dragged.
///
/// Sequence order is the curve order. None of the operations fail: when a precondition is not
/// met the call is a no-op and the returned `bool` tells whether anything changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<ControlPoint>,
    active_index: Option<usize>,
    hit_tolerance: f64,
    add_offset_x: f64,
    min_points: usize,
}

impl PointSet {
    /// Creates the set with the five seed points and no active point.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::PointSet;
    ///
    /// let points = PointSet::new();
    /// assert_eq!(5, points.len());
    /// assert_eq!(None, points.active_index());
    /// ```
    pub fn new() -> Self {
        PointSet::with_points(SEED_POINTS.iter().map(|p| ControlPoint::from(*p)).collect())
    }

    pub fn with_points(points: Vec<ControlPoint>) -> Self {
        PointSet {
            points,
            active_index: None,
            hit_tolerance: HIT_TOLERANCE,
            add_offset_x: ADD_OFFSET_X,
            min_points: MIN_POINTS,
        }
    }

    pub fn with_hit_tolerance(mut self, hit_tolerance: f64) -> Self {
        self.hit_tolerance = hit_tolerance;
        self
    }

    pub fn with_add_offset_x(mut self, add_offset_x: f64) -> Self {
        self.add_offset_x = add_offset_x;
        self
    }

    /// Floor for [PointSet::remove_last]. Values below [MIN_POINTS] are raised to it.
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points.max(MIN_POINTS);
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&ControlPoint> {
        self.points.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Smallest and largest x over all points, in any order.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.x;
        Some(self.points.iter().fold((first, first), |(min, max), p| {
            (min.min(p.x), max.max(p.x))
        }))
    }

    /// Index of the first point, in insertion order, whose x and y both lie strictly within the
    /// tolerance of `coord`. When several points qualify the earliest wins even if a later one
    /// is closer.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, PointSet};
    ///
    /// let points = PointSet::new();
    /// assert_eq!(Some(2), points.hit_test(ControlPoint::new(305.0, 395.0)));
    /// assert_eq!(None, points.hit_test(ControlPoint::new(700.0, 500.0)));
    /// ```
    pub fn hit_test(&self, coord: ControlPoint) -> Option<usize> {
        self.points
            .iter()
            .position(|p| p.is_within(&coord, self.hit_tolerance))
    }

    /// Picks the point under `coord` as the active one. A miss leaves no point active.
    pub fn begin_drag(&mut self, coord: ControlPoint) -> Option<usize> {
        self.active_index = self.hit_test(coord);
        if let Some(index) = self.active_index {
            log::debug!("drag started on point {}", index);
        }
        self.active_index
    }

    /// Moves the active point to `coord`, without clamping. Returns `false` when nothing is active.
    pub fn drag_to(&mut self, coord: ControlPoint) -> bool {
        let Some(index) = self.active_index else {
            return false;
        };
        match self.points.get_mut(index) {
            Some(point) => {
                *point = coord;
                true
            }
            None => false,
        }
    }

    pub fn end_drag(&mut self) {
        if let Some(index) = self.active_index.take() {
            log::debug!("drag ended on point {}", index);
        }
    }

    /// Appends a point to the right of the last one, at the same height.
    /// Needs at least two points, otherwise nothing happens.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, PointSet};
    ///
    /// let mut points = PointSet::new();
    /// assert!(points.add());
    /// assert_eq!(Some(&ControlPoint::new(550.0, 350.0)), points.get(5));
    /// ```
    pub fn add(&mut self) -> bool {
        if self.points.len() < 2 {
            log::debug!("add skipped: {} points, need at least 2", self.points.len());
            return false;
        }
        let Some(last) = self.points.last().copied() else {
            return false;
        };
        let point = last.offset(self.add_offset_x, 0.0);
        self.points.push(point);
        log::debug!("added point {} at ({}, {})", self.points.len() - 1, point.x, point.y);
        true
    }

    /// Removes the last point unless that would leave fewer than the minimum.
    pub fn remove_last(&mut self) -> bool {
        if self.points.len() <= self.min_points {
            log::debug!("remove skipped: already at {} points", self.points.len());
            return false;
        }
        self.points.pop();
        if self.active_index.is_some_and(|i| i >= self.points.len()) {
            self.active_index = None;
        }
        log::debug!("removed last point, {} left", self.points.len());
        true
    }
}

impl Default for PointSet {
    fn default() -> Self {
        PointSet::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn seed() -> Vec<ControlPoint> {
        SEED_POINTS.iter().map(|p| ControlPoint::from(*p)).collect()
    }

    #[test]
    fn test_new() {
        let points = PointSet::new();

        assert_eq!(seed(), points.points());
        assert_eq!(None, points.active_index());
        assert_eq!(3, points.min_points());
    }

    #[test]
    fn test_xs_ys() {
        let points = PointSet::new();

        assert_eq!(vec![100.0, 200.0, 300.0, 400.0, 500.0], points.xs());
        assert_eq!(vec![300.0, 100.0, 400.0, 150.0, 350.0], points.ys());
    }

    #[test]
    fn test_x_range_ignores_order() {
        let points = PointSet::with_points(vec![
            ControlPoint::new(300.0, 0.0),
            ControlPoint::new(100.0, 0.0),
            ControlPoint::new(200.0, 0.0),
        ]);
        assert_eq!(Some((100.0, 300.0)), points.x_range());
        assert_eq!(None, PointSet::with_points(Vec::new()).x_range());
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        // both points are within tolerance, the later one is closer
        let points = PointSet::with_points(vec![
            ControlPoint::new(100.0, 100.0),
            ControlPoint::new(108.0, 100.0),
            ControlPoint::new(300.0, 300.0),
        ]);

        assert_eq!(Some(0), points.hit_test(ControlPoint::new(107.0, 100.0)));
    }

    #[test]
    fn test_hit_test_tolerance_is_strict() {
        let points = PointSet::new();

        assert_eq!(Some(0), points.hit_test(ControlPoint::new(109.99, 309.99)));
        assert_eq!(None, points.hit_test(ControlPoint::new(110.0, 300.0)));
        assert_eq!(None, points.hit_test(ControlPoint::new(100.0, 290.0)));
    }

    #[test]
    fn test_custom_hit_tolerance() {
        let points = PointSet::new().with_hit_tolerance(30.0);
        assert_eq!(Some(1), points.hit_test(ControlPoint::new(225.0, 80.0)));
    }

    #[test]
    fn test_drag_scenario() {
        let mut points = PointSet::new();

        assert_eq!(Some(2), points.begin_drag(ControlPoint::new(305.0, 395.0)));
        assert_eq!(Some(2), points.active_index());

        assert!(points.drag_to(ControlPoint::new(310.0, 410.0)));
        let mut expected = seed();
        expected[2] = ControlPoint::new(310.0, 410.0);
        assert_eq!(expected, points.points());

        points.end_drag();
        assert_eq!(None, points.active_index());
        assert_eq!(Some(&ControlPoint::new(310.0, 410.0)), points.get(2));
    }

    #[test]
    fn test_drag_to_accepts_any_coordinate() {
        let mut points = PointSet::new();
        points.begin_drag(ControlPoint::new(100.0, 300.0));

        assert!(points.drag_to(ControlPoint::new(-250.0, 9000.0)));
        assert_eq!(Some(&ControlPoint::new(-250.0, 9000.0)), points.get(0));
    }

    #[test]
    fn test_drag_to_without_active_point() {
        let mut points = PointSet::new();

        assert!(!points.drag_to(ControlPoint::new(310.0, 410.0)));
        assert_eq!(seed(), points.points());
    }

    #[test]
    fn test_begin_drag_miss_clears_active() {
        let mut points = PointSet::new();
        points.begin_drag(ControlPoint::new(200.0, 100.0));
        assert_eq!(Some(1), points.active_index());

        assert_eq!(None, points.begin_drag(ControlPoint::new(700.0, 550.0)));
        assert_eq!(None, points.active_index());
    }

    #[test]
    fn test_end_drag_is_idempotent() {
        let mut points = PointSet::new();
        points.begin_drag(ControlPoint::new(300.0, 400.0));

        points.end_drag();
        assert_eq!(None, points.active_index());
        points.end_drag();
        assert_eq!(None, points.active_index());
    }

    #[test]
    fn test_add_placement() {
        let mut points = PointSet::new();

        assert!(points.add());
        assert_eq!(6, points.len());
        assert_eq!(Some(&ControlPoint::new(550.0, 350.0)), points.get(5));

        assert!(points.add());
        assert_eq!(Some(&ControlPoint::new(600.0, 350.0)), points.get(6));
    }

    #[test]
    fn test_add_needs_two_points() {
        let mut points = PointSet::with_points(vec![ControlPoint::new(1.0, 2.0)]);

        assert!(!points.add());
        assert_eq!(1, points.len());
    }

    #[test]
    fn test_remove_scenario() {
        let mut points = PointSet::new();

        assert!(points.remove_last());
        assert!(points.remove_last());
        assert_eq!(&seed()[..3], points.points());

        assert!(!points.remove_last());
        assert_eq!(&seed()[..3], points.points());
    }

    #[test]
    fn test_remove_floor() {
        let three = vec![
            ControlPoint::new(1.0, 1.0),
            ControlPoint::new(2.0, 5.0),
            ControlPoint::new(3.0, 2.0),
        ];
        let mut points = PointSet::with_points(three.clone());

        assert!(!points.remove_last());
        assert_eq!(three, points.points());
    }

    #[test]
    fn test_min_points_cannot_go_below_three() {
        let mut points = PointSet::new().with_min_points(1);
        assert_eq!(3, points.min_points());

        while points.remove_last() {}
        assert_eq!(3, points.len());
    }

    #[test]
    fn test_remove_clears_dangling_active_index() {
        let mut points = PointSet::new();
        points.begin_drag(ControlPoint::new(500.0, 350.0));
        assert_eq!(Some(4), points.active_index());

        points.remove_last();
        assert_eq!(None, points.active_index());
        assert!(!points.drag_to(ControlPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_length_invariant_random_sequence() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let mut points = PointSet::new();
            for _ in 0..200 {
                if rng.gen_bool(0.4) {
                    points.add();
                } else {
                    points.remove_last();
                }
                assert!(points.len() >= 3);
            }
        }
    }
}
