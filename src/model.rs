//! Core data model for Pinch Mesh: the point collection and the canvas
//! boundary it is triangulated against.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
        }
    }
}

/// The four corners of the canvas, in the order they are fed to the
/// triangulator. They are always the first four vertices of every mesh.
pub fn boundary_corners(size: CanvasSize) -> [Point; 4] {
    [
        Point { x: 0.0, y: 0.0 },
        Point {
            x: size.width,
            y: 0.0,
        },
        Point {
            x: size.width,
            y: size.height,
        },
        Point {
            x: 0.0,
            y: size.height,
        },
    ]
}

/// Translate a pointer event's client coordinates to canvas-local pixels
/// using the canvas bounding rectangle.
pub fn click_to_canvas(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Point {
    Point {
        x: client_x - rect_left,
        y: client_y - rect_top,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    /// Canvas dimensions captured once at mount; the boundary rectangle is
    /// derived from these and stays constant for the session.
    pub canvas: CanvasSize,
    /// Append-only point collection, insertion-ordered. Reset only on reload.
    pub dots: Vec<Point>,
    /// Bumped on every state change; redraw effects key on it.
    pub version: u64,
}

impl SceneState {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            dots: Vec::new(),
            version: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum SceneAction {
    /// Record the canvas dimensions measured at mount.
    Configure { width: f64, height: f64 },
    /// Append a point (from a click or a pinch) and trigger a redraw.
    AddPoint(Point),
}

impl Reducible for SceneState {
    type Action = SceneAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SceneAction::*;
        let mut new = (*self).clone();
        match action {
            Configure { width, height } => {
                new.canvas = CanvasSize { width, height };
            }
            AddPoint(p) => {
                // No dedup, no clamping: off-canvas points triangulate
                // off-screen. Only non-finite coordinates are refused.
                if !(p.x.is_finite() && p.y.is_finite()) {
                    return self;
                }
                new.dots.push(p);
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

// ---------------- Persisted settings -----------------

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Show the mirrored camera preview element.
    pub show_preview: bool,
    /// Show the point/triangle count panel.
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_preview: true,
            show_stats: true,
        }
    }
}
