use crate::config::{ViewWindow, MAX_SAMPLE_COUNT, SAMPLE_COUNT};
use crate::point::ControlPoint;
use crate::point_set::{PointSet, MIN_POINTS};
use crate::spline::{QuadraticSpline, SplineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Drawable area provided by the host UI. Coordinates are in data space.
pub trait Surface {
    fn clear(&mut self);
    fn set_view(&mut self, view: &ViewWindow);
    fn grid(&mut self, vertical: &[f64], horizontal: &[f64]);
    /// Line across the whole view, through the origin.
    fn axis_line(&mut self, from: ControlPoint, to: ControlPoint);
    fn polyline(&mut self, points: &[ControlPoint], style: LineStyle);
    fn marker(&mut self, at: ControlPoint);
    fn label(&mut self, at: ControlPoint, text: &str);
    /// Called once the whole frame has been issued.
    fn present(&mut self);
}

/// Result of fitting the curve for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveState {
    /// Sampled curve points, ordered by x.
    Drawn(Vec<ControlPoint>),
    /// Fewer points than the curve needs.
    TooFewPoints,
    /// Spline could not be built this frame, only the control polygon is shown.
    Unavailable(SplineError),
}

impl CurveState {
    pub fn samples(&self) -> Option<&[ControlPoint]> {
        match self {
            CurveState::Drawn(samples) => Some(samples.as_slice()),
            _ => None,
        }
    }
}

/// Everything that is drawn for one state of the point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: ViewWindow,
    pub vertical_gridlines: Vec<f64>,
    pub horizontal_gridlines: Vec<f64>,
    /// Horizontal axis `y = 0` followed by vertical axis `x = 0`.
    pub axes: [(ControlPoint, ControlPoint); 2],
    pub curve: CurveState,
    /// Points in sequence order; consecutive points are joined with dashed segments.
    pub control_polygon: Vec<ControlPoint>,
    /// Zero-based index label at every point.
    pub labels: Vec<(ControlPoint, String)>,
}

impl Frame {
    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.set_view(&self.view);
        surface.grid(&self.vertical_gridlines, &self.horizontal_gridlines);
        for (from, to) in self.axes.iter() {
            surface.axis_line(*from, *to);
        }

        if let CurveState::Drawn(samples) = &self.curve {
            surface.polyline(samples, LineStyle::Solid);
        }

        surface.polyline(&self.control_polygon, LineStyle::Dashed);
        for point in self.control_polygon.iter() {
            surface.marker(*point);
        }
        for (at, text) in self.labels.iter() {
            surface.label(*at, text);
        }
        surface.present();
    }
}

/// Turns a point set into a [Frame]. Every call recomputes the spline from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRenderer {
    view: ViewWindow,
    sample_count: usize,
    min_curve_points: usize,
}

impl CurveRenderer {
    pub fn new(view: ViewWindow) -> Self {
        CurveRenderer {
            view,
            sample_count: SAMPLE_COUNT,
            min_curve_points: MIN_POINTS,
        }
    }

    /// Capped at [MAX_SAMPLE_COUNT].
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count.min(MAX_SAMPLE_COUNT);
        self
    }

    /// Fewest points for which the curve is drawn. Values below [MIN_POINTS] are raised to it.
    pub fn with_min_curve_points(mut self, min_curve_points: usize) -> Self {
        self.min_curve_points = min_curve_points.max(MIN_POINTS);
        self
    }

    pub fn view(&self) -> &ViewWindow {
        &self.view
    }

    /// Fits the curve through the points in their current order and samples it between the
    /// smallest and the largest x.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{CurveRenderer, PointSet, ViewWindow};
    ///
    /// let renderer = CurveRenderer::new(ViewWindow::default());
    /// let curve = renderer.fit_curve(&PointSet::new());
    ///
    /// assert_eq!(500, curve.samples().unwrap().len());
    /// ```
    pub fn fit_curve(&self, points: &PointSet) -> CurveState {
        if points.len() < self.min_curve_points {
            return CurveState::TooFewPoints;
        }

        match QuadraticSpline::new(points.points()) {
            Ok(spline) => CurveState::Drawn(spline.sample(self.sample_count)),
            Err(e) => {
                log::warn!("curve unavailable, drawing control polygon only: {}", e);
                CurveState::Unavailable(e)
            }
        }
    }

    pub fn build_frame(&self, points: &PointSet) -> Frame {
        let view = self.view;
        let axes = [
            (ControlPoint::new(view.x_min, 0.0), ControlPoint::new(view.x_max, 0.0)),
            (ControlPoint::new(0.0, view.y_min), ControlPoint::new(0.0, view.y_max)),
        ];

        let labels = points
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| (*p, i.to_string()))
            .collect();

        Frame {
            view,
            vertical_gridlines: view.vertical_gridlines(),
            horizontal_gridlines: view.horizontal_gridlines(),
            axes,
            curve: self.fit_curve(points),
            control_polygon: points.points().to_vec(),
            labels,
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, points: &PointSet, surface: &mut S) -> Frame {
        let frame = self.build_frame(points);
        frame.paint(surface);
        frame
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Surface that keeps a log of the calls it receives.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub calls: Vec<String>,
        pub presented: usize,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.clear();
            self.calls.push("clear".to_string());
        }

        fn set_view(&mut self, view: &ViewWindow) {
            self.calls.push(format!("view {} {} {} {}", view.x_min, view.x_max, view.y_min, view.y_max));
        }

        fn grid(&mut self, vertical: &[f64], horizontal: &[f64]) {
            self.calls.push(format!("grid {} {}", vertical.len(), horizontal.len()));
        }

        fn axis_line(&mut self, from: ControlPoint, to: ControlPoint) {
            self.calls.push(format!("axis ({}, {}) ({}, {})", from.x, from.y, to.x, to.y));
        }

        fn polyline(&mut self, points: &[ControlPoint], style: LineStyle) {
            self.calls.push(format!("polyline {:?} {}", style, points.len()));
        }

        fn marker(&mut self, at: ControlPoint) {
            self.calls.push(format!("marker ({}, {})", at.x, at.y));
        }

        fn label(&mut self, at: ControlPoint, text: &str) {
            self.calls.push(format!("label ({}, {}) {}", at.x, at.y, text));
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    #[test]
    fn frame_for_seed_points() {
        let renderer = CurveRenderer::new(ViewWindow::default());
        let frame = renderer.build_frame(&PointSet::new());

        let samples = frame.curve.samples().unwrap();
        assert_eq!(500, samples.len());
        assert_eq!(100.0, samples[0].x);
        assert_eq!(500.0, samples[499].x);

        assert_eq!(5, frame.control_polygon.len());
        assert_eq!("4", frame.labels[4].1);
        assert_eq!(ControlPoint::new(500.0, 350.0), frame.labels[4].0);
        assert_eq!(9, frame.vertical_gridlines.len());
        assert_eq!(7, frame.horizontal_gridlines.len());
        assert_eq!(
            (ControlPoint::new(0.0, 0.0), ControlPoint::new(800.0, 0.0)),
            frame.axes[0]
        );
        assert_eq!(
            (ControlPoint::new(0.0, 0.0), ControlPoint::new(0.0, 600.0)),
            frame.axes[1]
        );
    }

    #[test]
    fn curve_samples_use_custom_count() {
        let renderer = CurveRenderer::new(ViewWindow::default()).with_sample_count(20);
        let curve = renderer.fit_curve(&PointSet::new());

        assert_eq!(20, curve.samples().unwrap().len());
    }

    #[test]
    fn sample_count_is_capped() {
        let renderer = CurveRenderer::new(ViewWindow::default()).with_sample_count(usize::MAX);
        assert_eq!(MAX_SAMPLE_COUNT, renderer.sample_count);
    }

    #[test]
    fn curve_needs_configured_point_count() {
        let renderer = CurveRenderer::new(ViewWindow::default()).with_min_curve_points(6);
        assert_eq!(CurveState::TooFewPoints, renderer.fit_curve(&PointSet::new()));

        let mut points = PointSet::new();
        points.add();
        assert!(renderer.fit_curve(&points).samples().is_some());

        let floor = CurveRenderer::new(ViewWindow::default()).with_min_curve_points(1);
        assert_eq!(3, floor.min_curve_points);
    }

    #[test]
    fn too_few_points_draw_polygon_only() {
        let points = PointSet::with_points(vec![
            ControlPoint::new(100.0, 100.0),
            ControlPoint::new(200.0, 200.0),
        ]);
        let renderer = CurveRenderer::new(ViewWindow::default());
        let mut surface = RecordingSurface::default();

        let frame = renderer.render(&points, &mut surface);

        assert_eq!(CurveState::TooFewPoints, frame.curve);
        assert!(!surface.calls.contains(&"polyline Solid 500".to_string()));
        assert!(surface.calls.contains(&"polyline Dashed 2".to_string()));
    }

    #[test]
    fn non_monotonic_points_fall_back_to_polygon() {
        let mut points = PointSet::new();
        points.begin_drag(ControlPoint::new(200.0, 100.0));
        points.drag_to(ControlPoint::new(350.0, 100.0));

        let renderer = CurveRenderer::new(ViewWindow::default());
        let mut surface = RecordingSurface::default();
        let frame = renderer.render(&points, &mut surface);

        assert_eq!(
            CurveState::Unavailable(SplineError::NonIncreasingX { index: 2 }),
            frame.curve
        );
        assert_eq!(1, surface.presented);
        assert!(surface.calls.iter().all(|c| !c.starts_with("polyline Solid")));
        assert!(surface.calls.contains(&"polyline Dashed 5".to_string()));
        assert!(surface.calls.contains(&"label (350, 100) 1".to_string()));
    }

    #[test]
    fn paint_order() {
        let renderer = CurveRenderer::new(ViewWindow::default());
        let mut surface = RecordingSurface::default();
        renderer.render(&PointSet::new(), &mut surface);

        let expected_head = vec![
            "clear".to_string(),
            "view 0 800 0 600".to_string(),
            "grid 9 7".to_string(),
            "axis (0, 0) (800, 0)".to_string(),
            "axis (0, 0) (0, 600)".to_string(),
            "polyline Solid 500".to_string(),
            "polyline Dashed 5".to_string(),
            "marker (100, 300)".to_string(),
        ];
        assert_eq!(expected_head, surface.calls[..8].to_vec());
        assert_eq!(Some("label (500, 350) 4"), surface.calls.last().map(String::as_str));
        assert_eq!(1, surface.presented);
    }
}
