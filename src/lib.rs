//! Core of an interactive editor for a parabolic (degree 2) interpolating spline.
//!
//! The user drags a handful of control points and the curve through them is refitted and
//! redrawn after every change. Window, buttons and the drawing backend belong to the host UI,
//! which implements [Surface] and forwards pointer events and button commands to an
//! [EditorSession].
//!
//! # Example
//! ```
//! use parabolic_spline_editor::{ControlPoint, EditorConfig, EditorSession, NullSurface};
//!
//! let mut session = EditorSession::new(EditorConfig::default(), NullSurface);
//!
//! session.add_point();
//! assert_eq!(ControlPoint::new(550.0, 350.0), session.points().points()[5]);
//!
//! session.remove_point();
//! session.remove_point();
//! session.remove_point();
//! session.remove_point();
//! assert_eq!(3, session.points().len());
//!
//! let curve = session.last_frame().curve.samples().unwrap();
//! assert_eq!(500, curve.len());
//! ```

mod config;
mod point;
mod point_set;
mod polynomial;
mod renderer;
mod session;
mod spline;

pub use config::{ConfigError, EditorConfig, ViewWindow, MAX_GRIDLINES, MAX_SAMPLE_COUNT, SAMPLE_COUNT};
pub use point::ControlPoint;
pub use point_set::{PointSet, ADD_OFFSET_X, HIT_TOLERANCE, MIN_POINTS, SEED_POINTS};
pub use renderer::{CurveRenderer, CurveState, Frame, LineStyle, Surface};
pub use session::{DragState, EditorSession, NullSurface};
pub use spline::{linspace, QuadraticSpline, SplineError, MIN_SPLINE_POINTS};
