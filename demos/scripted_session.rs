extern crate parabolic_spline_editor;

use std::path::Path;

use parabolic_spline_editor::{
    ControlPoint, CurveState, EditorConfig, EditorSession, LineStyle, Surface, ViewWindow,
};

/// Surface that reports each frame as text.
#[derive(Default)]
struct TextSurface {
    frames: usize,
    segments: usize,
}

impl Surface for TextSurface {
    fn clear(&mut self) {
        self.segments = 0;
    }

    fn set_view(&mut self, view: &ViewWindow) {
        log::debug!("view [{}, {}] x [{}, {}]", view.x_min, view.x_max, view.y_min, view.y_max);
    }

    fn grid(&mut self, _vertical: &[f64], _horizontal: &[f64]) {}

    fn axis_line(&mut self, _from: ControlPoint, _to: ControlPoint) {}

    fn polyline(&mut self, points: &[ControlPoint], style: LineStyle) {
        self.segments += points.len().saturating_sub(1);
        log::debug!("{:?} polyline through {} points", style, points.len());
    }

    fn marker(&mut self, _at: ControlPoint) {}

    fn label(&mut self, at: ControlPoint, text: &str) {
        log::debug!("point {} at ({:.1}, {:.1})", text, at.x, at.y);
    }

    fn present(&mut self) {
        self.frames += 1;
        log::info!("frame {} with {} segments", self.frames, self.segments);
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = EditorConfig::load_from_file(Path::new("spline_editor.toml"));
    let mut session = EditorSession::new(config, TextSurface::default());
    let view = *session.view();

    // pointer positions outside the plot reach the session as None
    let plot = |x: f64, y: f64| {
        let point = ControlPoint::new(x, y);
        if view.contains(&point) {
            Some(point)
        } else {
            None
        }
    };

    // drag point 2 up and to the right, then out of the plot
    session.on_press(plot(302.0, 398.0));
    for step in 1..=5 {
        let offset = 4.0 * step as f64;
        session.on_motion(plot(300.0 + offset, 400.0 + offset));
    }
    session.on_motion(plot(330.0, 650.0));
    session.on_release(plot(330.0, 650.0));

    session.add_point();
    session.add_point();
    session.remove_point();

    // dragging past a neighbour leaves only the control polygon
    session.on_press(plot(200.0, 100.0));
    session.on_motion(plot(360.0, 100.0));
    if let CurveState::Unavailable(reason) = &session.last_frame().curve {
        log::info!("curve hidden: {}", reason);
    }
    session.on_motion(plot(210.0, 120.0));
    session.on_release(None);

    println!("x;y");
    if let Some(samples) = session.last_frame().curve.samples() {
        for sample in samples.iter().step_by(25) {
            println!("{:.2};{:.2}", sample.x, sample.y);
        }
    }

    let surface = session.close();
    log::info!("{} frames drawn", surface.frames);
}
