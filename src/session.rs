use crate::config::{EditorConfig, ViewWindow};
use crate::point::ControlPoint;
use crate::point_set::PointSet;
use crate::renderer::{CurveRenderer, Frame, LineStyle, Surface};

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { index: usize },
}

/// One editing session: the point set, the drag state and the surface it is drawn on.
///
/// Pointer handlers take `None` for events outside the plot region. Every change to the
/// points is followed by a full redraw; commands that change nothing do not redraw.
pub struct EditorSession<S: Surface> {
    config: EditorConfig,
    points: PointSet,
    renderer: CurveRenderer,
    surface: S,
    last_frame: Frame,
}

impl<S: Surface> EditorSession<S> {
    /// Starts a session and draws the initial frame. An invalid config is replaced by the
    /// defaults.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::{ControlPoint, DragState, EditorConfig, EditorSession, NullSurface};
    ///
    /// let mut session = EditorSession::new(EditorConfig::default(), NullSurface);
    ///
    /// session.on_press(Some(ControlPoint::new(305.0, 395.0)));
    /// assert_eq!(DragState::Dragging { index: 2 }, session.drag_state());
    ///
    /// session.on_motion(Some(ControlPoint::new(310.0, 410.0)));
    /// session.on_release(None);
    /// assert_eq!(DragState::Idle, session.drag_state());
    /// assert_eq!(ControlPoint::new(310.0, 410.0), session.points().points()[2]);
    /// ```
    pub fn new(config: EditorConfig, surface: S) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("invalid editor config, using defaults: {}", e);
                EditorConfig::default()
            }
        };

        let points = PointSet::with_points(config.seed_points.clone())
            .with_hit_tolerance(config.hit_tolerance)
            .with_add_offset_x(config.add_offset_x)
            .with_min_points(config.min_points);
        let renderer = CurveRenderer::new(config.view)
            .with_sample_count(config.sample_count)
            .with_min_curve_points(config.min_points);
        let mut surface = surface;
        let last_frame = renderer.render(&points, &mut surface);

        log::info!("editor session started with {} points", points.len());

        EditorSession {
            config,
            points,
            renderer,
            surface,
            last_frame,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn view(&self) -> &ViewWindow {
        self.renderer.view()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    pub fn drag_state(&self) -> DragState {
        match self.points.active_index() {
            Some(index) => DragState::Dragging { index },
            None => DragState::Idle,
        }
    }

    /// Redraws the current state.
    pub fn render(&mut self) -> &Frame {
        self.last_frame = self.renderer.render(&self.points, &mut self.surface);
        &self.last_frame
    }

    /// Press picks the point under the pointer. A press outside the plot changes nothing.
    pub fn on_press(&mut self, coord: Option<ControlPoint>) -> DragState {
        if let Some(coord) = coord {
            self.points.begin_drag(coord);
        }
        self.drag_state()
    }

    /// Moves the dragged point and redraws. Returns whether a redraw happened.
    pub fn on_motion(&mut self, coord: Option<ControlPoint>) -> bool {
        let Some(coord) = coord else {
            return false;
        };
        if self.points.drag_to(coord) {
            self.render();
            true
        } else {
            false
        }
    }

    /// Release always ends the drag, wherever the pointer is.
    pub fn on_release(&mut self, _coord: Option<ControlPoint>) -> DragState {
        self.points.end_drag();
        DragState::Idle
    }

    pub fn add_point(&mut self) -> bool {
        let changed = self.points.add();
        if changed {
            self.render();
        }
        changed
    }

    pub fn remove_point(&mut self) -> bool {
        let changed = self.points.remove_last();
        if changed {
            self.render();
        }
        changed
    }

    /// Ends the session and hands the surface back. Nothing is persisted.
    pub fn close(self) -> S {
        if let DragState::Dragging { index } = self.drag_state() {
            log::debug!("session closed while dragging point {}", index);
        }
        log::info!("editor session closed with {} points", self.points.len());
        self.surface
    }
}

/// Surface that draws nothing, for running a session without a display.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn set_view(&mut self, _view: &ViewWindow) {}
    fn grid(&mut self, _vertical: &[f64], _horizontal: &[f64]) {}
    fn axis_line(&mut self, _from: ControlPoint, _to: ControlPoint) {}
    fn polyline(&mut self, _points: &[ControlPoint], _style: LineStyle) {}
    fn marker(&mut self, _at: ControlPoint) {}
    fn label(&mut self, _at: ControlPoint, _text: &str) {}
    fn present(&mut self) {}
}
