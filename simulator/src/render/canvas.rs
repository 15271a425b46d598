//! Drawing primitives shared by every renderer
//!
//! Renderers never touch pixels directly. They describe each frame as a
//! sequence of [`DrawOp`]s issued against a [`Canvas`], which may record them
//! (see [`super::display_list::DisplayList`]) or forward them elsewhere.

use serde::Serialize;
use shared::image_size::PixelShape;

use super::RenderError;
use crate::photometry::color::Tint;

/// Position in surface pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` along `angle` radians (clockwise, y down)
    pub fn polar_offset(&self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 8-bit color with floating opacity
///
/// Opacity is clamped to [0, 1] on construction, so a brightness-scaled alpha
/// above 1.0 renders as fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT_WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        alpha: 0.0,
    };

    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self { r, g, b, alpha }
    }

    /// Tint color at the given opacity
    pub fn from_tint(tint: Tint, alpha: f64) -> Self {
        Rgba::new(tint.r, tint.g, tint.b, alpha)
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Rgba::new(self.r, self.g, self.b, alpha)
    }

    /// `#rrggbb` form, opacity not included
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color at a fractional position along a gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position from 0.0 (center) to 1.0 (edge)
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f64, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// How a filled shape is colored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Solid(Rgba),
    /// Radial gradient centered on the shape, spanning its full radius
    Radial(Vec<GradientStop>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
    pub cap: LineCap,
}

impl Stroke {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Butt,
        }
    }

    pub fn round(color: Rgba, width: f64) -> Self {
        Self {
            color,
            width,
            cap: LineCap::Round,
        }
    }
}

/// Horizontal alignment of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size_px: f64,
    pub color: Rgba,
    pub anchor: TextAnchor,
}

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Rgba,
    },
    /// Text drawn with its baseline at `position.y`
    Text {
        position: Point,
        text: String,
        style: TextStyle,
    },
}

fn check_point(point: &Point, what: &str) -> Result<(), RenderError> {
    if point.is_finite() {
        Ok(())
    } else {
        Err(RenderError::InvalidGeometry(format!(
            "{what} is not finite: ({}, {})",
            point.x, point.y
        )))
    }
}

fn check_length(value: f64, what: &str) -> Result<(), RenderError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidGeometry(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}

fn check_stops(stops: &[GradientStop]) -> Result<(), RenderError> {
    if stops.is_empty() {
        return Err(RenderError::InvalidGeometry(
            "gradient needs at least one stop".to_string(),
        ));
    }
    let mut previous = 0.0;
    for stop in stops {
        if !(0.0..=1.0).contains(&stop.offset) || stop.offset < previous {
            return Err(RenderError::InvalidGeometry(format!(
                "gradient stop offset {} out of order or outside [0, 1]",
                stop.offset
            )));
        }
        previous = stop.offset;
    }
    Ok(())
}

impl DrawOp {
    /// Reject geometry that cannot be rasterized
    pub fn validate(&self) -> Result<(), RenderError> {
        match self {
            DrawOp::FillCircle {
                center,
                radius,
                paint,
            } => {
                check_point(center, "circle center")?;
                check_length(*radius, "circle radius")?;
                if let Paint::Radial(stops) = paint {
                    check_stops(stops)?;
                }
                Ok(())
            }
            DrawOp::StrokeCircle {
                center,
                radius,
                stroke,
            } => {
                check_point(center, "circle center")?;
                check_length(*radius, "circle radius")?;
                check_length(stroke.width, "stroke width")
            }
            DrawOp::Line { from, to, stroke } => {
                check_point(from, "line start")?;
                check_point(to, "line end")?;
                check_length(stroke.width, "stroke width")
            }
            DrawOp::Polyline { points, stroke } => {
                if points.len() < 2 {
                    return Err(RenderError::InvalidGeometry(
                        "polyline needs at least two points".to_string(),
                    ));
                }
                points
                    .iter()
                    .try_for_each(|p| check_point(p, "polyline vertex"))?;
                check_length(stroke.width, "stroke width")
            }
            DrawOp::FillPolygon { points, .. } => {
                if points.len() < 3 {
                    return Err(RenderError::InvalidGeometry(
                        "polygon needs at least three points".to_string(),
                    ));
                }
                points
                    .iter()
                    .try_for_each(|p| check_point(p, "polygon vertex"))
            }
            DrawOp::Text {
                position, style, ..
            } => {
                check_point(position, "text position")?;
                check_length(style.size_px, "font size")
            }
        }
    }
}

/// A drawing surface of fixed pixel size
///
/// Renderers start each frame with [`Canvas::clear`] and then issue draw
/// operations in painter's order.
pub trait Canvas {
    fn shape(&self) -> PixelShape;

    /// Discard everything drawn so far and fill with `background`
    fn clear(&mut self, background: Rgba) -> Result<(), RenderError>;

    fn draw(&mut self, op: DrawOp) -> Result<(), RenderError>;

    /// A new, empty surface of the given size
    fn blank(shape: PixelShape) -> Self
    where
        Self: Sized;
}
