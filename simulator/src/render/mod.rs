//! Rendering of the star view and transmittance chart
//!
//! Each renderer repaints its whole surface from scratch through the
//! [`Canvas`] trait. The default surface is a [`DisplayList`], which the
//! [`raster`] module turns into SVG or PNG output.

pub mod canvas;
pub mod chart;
pub mod display_list;
pub mod raster;
pub mod star;
pub mod status;

use thiserror::Error;

pub use canvas::{
    Canvas, DrawOp, GradientStop, LineCap, Paint, Point, Rgba, Stroke, TextAnchor, TextStyle,
};
pub use chart::{ChartLayout, CHART_SURFACE};
pub use display_list::DisplayList;
pub use star::{StarRenderer, StarVariant, STAR_SURFACE};

/// Errors raised while drawing or exporting a surface
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("SVG parse error: {0}")]
    SvgParse(#[from] usvg::Error),

    #[error("Cannot allocate a {width}x{height} pixmap")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
