//! SVG export and rasterization of recorded frames
//!
//! A [`DisplayList`] is serialized to an SVG document, parsed back with
//! `usvg` and rendered into a `tiny_skia` pixmap by `resvg`. Text uses a
//! system font database that is loaded once per process.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use image::{ImageFormat, Rgba as ImageRgba, RgbaImage};
use log::debug;
use once_cell::sync::Lazy;
use tiny_skia::{Pixmap, Transform};
use usvg::{fontdb, Options, Tree};

use super::canvas::{
    Canvas, DrawOp, GradientStop, LineCap, Paint, Point, Rgba, Stroke, TextAnchor,
};
use super::display_list::DisplayList;
use super::RenderError;

/// Font family requested for all text; widely available on Linux
pub const FONT_FAMILY: &str = "DejaVu Sans";

static FONT_DB: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    debug!("Loaded {} font faces", db.len());
    Arc::new(db)
});

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let cap = match stroke.cap {
        LineCap::Butt => "butt",
        LineCap::Round => "round",
    };
    format!(
        r#"stroke="{}" stroke-opacity="{}" stroke-width="{}" stroke-linecap="{}""#,
        stroke.color.hex(),
        stroke.color.alpha,
        stroke.width,
        cap
    )
}

fn fill_attrs(color: &Rgba) -> String {
    format!(r#"fill="{}" fill-opacity="{}""#, color.hex(), color.alpha)
}

fn gradient_def(id: &str, center: &Point, radius: f64, stops: &[GradientStop]) -> String {
    let mut def = format!(
        r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}" fx="{}" fy="{}">"#,
        center.x, center.y, radius, center.x, center.y
    );
    for stop in stops {
        let _ = write!(
            def,
            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
            stop.offset,
            stop.color.hex(),
            stop.color.alpha
        );
    }
    def.push_str("</radialGradient>");
    def
}

/// Serialize a frame as a standalone SVG document
pub fn to_svg(list: &DisplayList) -> String {
    let shape = list.shape();
    let mut defs = String::new();
    let mut body = String::new();

    if let Some(background) = list.background() {
        let _ = write!(
            body,
            r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
            shape.width,
            shape.height,
            fill_attrs(&background)
        );
    }

    let mut gradient_count = 0usize;
    for op in list.ops() {
        match op {
            DrawOp::FillCircle {
                center,
                radius,
                paint,
            } => {
                let fill = match paint {
                    Paint::Solid(color) => fill_attrs(color),
                    Paint::Radial(stops) => {
                        let id = format!("g{gradient_count}");
                        gradient_count += 1;
                        defs.push_str(&gradient_def(&id, center, *radius, stops));
                        format!(r#"fill="url(#{id})""#)
                    }
                };
                let _ = write!(
                    body,
                    r#"<circle cx="{}" cy="{}" r="{}" {fill}/>"#,
                    center.x, center.y, radius
                );
            }
            DrawOp::StrokeCircle {
                center,
                radius,
                stroke,
            } => {
                let _ = write!(
                    body,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" {}/>"#,
                    center.x,
                    center.y,
                    radius,
                    stroke_attrs(stroke)
                );
            }
            DrawOp::Line { from, to, stroke } => {
                let _ = write!(
                    body,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke_attrs(stroke)
                );
            }
            DrawOp::Polyline { points, stroke } => {
                let _ = write!(
                    body,
                    r#"<polyline points="{}" fill="none" stroke-linejoin="round" {}/>"#,
                    points_attr(points),
                    stroke_attrs(stroke)
                );
            }
            DrawOp::FillPolygon { points, color } => {
                let _ = write!(
                    body,
                    r#"<polygon points="{}" {}/>"#,
                    points_attr(points),
                    fill_attrs(color)
                );
            }
            DrawOp::Text {
                position,
                text,
                style,
            } => {
                let anchor = match style.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                    TextAnchor::End => "end",
                };
                let _ = write!(
                    body,
                    r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="{anchor}" {}>{}</text>"#,
                    position.x,
                    position.y,
                    style.size_px,
                    fill_attrs(&style.color),
                    escape_text(text)
                );
            }
        }
    }

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = shape.width,
        h = shape.height
    );
    if !defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&defs);
        svg.push_str("</defs>");
    }
    svg.push_str(&body);
    svg.push_str("</svg>");
    svg
}

/// Render a frame to a premultiplied RGBA pixmap
pub fn rasterize(list: &DisplayList) -> Result<Pixmap, RenderError> {
    let shape = list.shape();
    let svg = to_svg(list);

    let mut options = Options::default();
    options.fontdb = FONT_DB.clone();
    options.font_family = FONT_FAMILY.to_string();

    let tree = Tree::from_str(&svg, &options)?;

    let mut pixmap =
        Pixmap::new(shape.width, shape.height).ok_or(RenderError::PixmapAllocation {
            width: shape.width,
            height: shape.height,
        })?;

    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Convert a pixmap to a straight-alpha image
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        match pixmap.pixel(x, y) {
            Some(pixel) => {
                let color = pixel.demultiply();
                ImageRgba([color.red(), color.green(), color.blue(), color.alpha()])
            }
            None => ImageRgba([0, 0, 0, 0]),
        }
    })
}

/// Rasterize a frame and write it as PNG
pub fn save_png(list: &DisplayList, path: &Path) -> Result<(), RenderError> {
    let image = to_rgba_image(&rasterize(list)?);
    image.save_with_format(path, ImageFormat::Png)?;
    debug!("Wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}

/// Write a frame as an SVG document
pub fn save_svg(list: &DisplayList, path: &Path) -> Result<(), RenderError> {
    std::fs::write(path, to_svg(list))?;
    debug!("Wrote SVG to {}", path.display());
    Ok(())
}
