//! Tunable editor settings.
//!
//! Every field has a default equal to the constants the editor ships with, so a config file
//! only needs to name the values it changes.

use std::{error::Error, fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use crate::point::ControlPoint;
use crate::point_set::{ADD_OFFSET_X, HIT_TOLERANCE, MIN_POINTS, SEED_POINTS};

/// Number of curve samples per frame.
pub const SAMPLE_COUNT: usize = 500;
/// Largest accepted number of curve samples per frame.
pub const MAX_SAMPLE_COUNT: usize = 100_000;
/// Largest number of gridlines drawn along one axis.
pub const MAX_GRIDLINES: usize = 1000;

/// Visible data window of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Distance between gridlines on both axes.
    pub grid_step: f64,
}

impl ViewWindow {
    pub fn contains(&self, point: &ControlPoint) -> bool {
        self.x_min <= point.x && point.x <= self.x_max && self.y_min <= point.y && point.y <= self.y_max
    }

    /// Gridline positions along x, from `x_min` to `x_max` inclusive.
    pub fn vertical_gridlines(&self) -> Vec<f64> {
        gridlines(self.x_min, self.x_max, self.grid_step)
    }

    /// Gridline positions along y, from `y_min` to `y_max` inclusive.
    pub fn horizontal_gridlines(&self) -> Vec<f64> {
        gridlines(self.y_min, self.y_max, self.grid_step)
    }
}

impl Default for ViewWindow {
    fn default() -> Self {
        ViewWindow {
            x_min: 0.0,
            x_max: 800.0,
            y_min: 0.0,
            y_max: 600.0,
            grid_step: 100.0,
        }
    }
}

/// Number of gridlines between `min` and `max`, or `None` when the step is unusable.
fn gridline_count(min: f64, max: f64, step: f64) -> Option<usize> {
    if !(step > 0.0) || !step.is_finite() || !(max >= min) || !(max - min).is_finite() {
        return None;
    }
    let lines = ((max - min) / step).floor() + 1.0;
    if lines.is_finite() && lines <= MAX_GRIDLINES as f64 {
        Some(lines as usize)
    } else {
        None
    }
}

/// No grid is drawn when the step would give more than [MAX_GRIDLINES] lines.
fn gridlines(min: f64, max: f64, step: f64) -> Vec<f64> {
    if gridline_count(min, max, step).is_none() {
        return Vec::new();
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub view: ViewWindow,
    pub hit_tolerance: f64,
    pub add_offset_x: f64,
    pub min_points: usize,
    pub sample_count: usize,
    pub seed_points: Vec<ControlPoint>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            view: ViewWindow::default(),
            hit_tolerance: HIT_TOLERANCE,
            add_offset_x: ADD_OFFSET_X,
            min_points: MIN_POINTS,
            sample_count: SAMPLE_COUNT,
            seed_points: SEED_POINTS.iter().map(|p| ControlPoint::from(*p)).collect(),
        }
    }
}

impl EditorConfig {
    /// Parses a TOML document. Missing fields take their default values.
    /// # Example
    /// ```
    /// use parabolic_spline_editor::EditorConfig;
    ///
    /// let config = EditorConfig::from_toml_str("hit_tolerance = 15.0").unwrap();
    /// assert_eq!(15.0, config.hit_tolerance);
    /// assert_eq!(500, config.sample_count);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn try_load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Loads the config, falling back to defaults when the file is missing or invalid.
    pub fn load_from_file(path: &Path) -> Self {
        match Self::try_load_from_file(path) {
            Ok(config) => {
                log::info!("config loaded from {}", path.display());
                config
            }
            Err(ConfigError::Io(_)) => {
                log::info!("no config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("config file {} ignored, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_points < MIN_POINTS {
            return Err(ConfigError::Invalid(format!(
                "min_points must be at least {}, got {}",
                MIN_POINTS, self.min_points
            )));
        }
        if self.sample_count < 2 || self.sample_count > MAX_SAMPLE_COUNT {
            return Err(ConfigError::Invalid(format!(
                "sample_count must be between 2 and {}, got {}",
                MAX_SAMPLE_COUNT, self.sample_count
            )));
        }
        if self.seed_points.len() < self.min_points {
            return Err(ConfigError::Invalid(format!(
                "seed_points must hold at least {} points, got {}",
                self.min_points,
                self.seed_points.len()
            )));
        }
        if !(self.hit_tolerance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit_tolerance must be positive, got {}",
                self.hit_tolerance
            )));
        }
        let view = &self.view;
        if ![view.x_min, view.x_max, view.y_min, view.y_max].iter().all(|v| v.is_finite()) {
            return Err(ConfigError::Invalid("view window bounds must be finite".to_string()));
        }
        if !(view.x_max > view.x_min && view.y_max > view.y_min) {
            return Err(ConfigError::Invalid("view window is empty".to_string()));
        }
        // zero turns the grid off
        if view.grid_step != 0.0
            && (gridline_count(view.x_min, view.x_max, view.grid_step).is_none()
                || gridline_count(view.y_min, view.y_max, view.grid_step).is_none())
        {
            return Err(ConfigError::Invalid(format!(
                "grid_step {} must be positive and give at most {} gridlines per axis",
                view.grid_step, MAX_GRIDLINES
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(message) => write!(f, "Error in Config: cannot read file: {}", message),
            ConfigError::Parse(message) => write!(f, "Error in Config: malformed toml: {}", message),
            ConfigError::Serialize(message) => write!(f, "Error in Config: cannot write toml: {}", message),
            ConfigError::Invalid(message) => write!(f, "Error in Config: {}", message),
        }
    }
}

impl Error for ConfigError {}
