//! Loading and error screens for the star view

use super::canvas::{Canvas, DrawOp, Point, Rgba, TextAnchor, TextStyle};
use super::star::SKY_BACKGROUND;
use super::RenderError;

/// Background of the error screen, `#220000`
pub const ERROR_BACKGROUND: Rgba = Rgba::rgb(0x22, 0x00, 0x00);

/// Error text color, `#ff6666`
pub const ERROR_TEXT: Rgba = Rgba::rgb(0xff, 0x66, 0x66);

fn two_lines<C: Canvas>(
    surface: &mut C,
    first: &str,
    second: &str,
    style: TextStyle,
) -> Result<(), RenderError> {
    let (cx, cy) = surface.shape().center();
    for (text, y) in [(first, cy - 10.0), (second, cy + 10.0)] {
        surface.draw(DrawOp::Text {
            position: Point::new(cx, y),
            text: text.to_string(),
            style,
        })?;
    }
    Ok(())
}

/// Placeholder shown before the first frame is ready
pub fn show_loading<C: Canvas>(surface: &mut C) -> Result<(), RenderError> {
    surface.clear(SKY_BACKGROUND)?;
    two_lines(
        surface,
        "Loading...",
        "Star simulator",
        TextStyle {
            size_px: 16.0,
            color: Rgba::WHITE,
            anchor: TextAnchor::Middle,
        },
    )
}

/// Replace the view with an error message
pub fn show_error<C: Canvas>(surface: &mut C, message: &str) -> Result<(), RenderError> {
    surface.clear(ERROR_BACKGROUND)?;
    two_lines(
        surface,
        "Error:",
        message,
        TextStyle {
            size_px: 14.0,
            color: ERROR_TEXT,
            anchor: TextAnchor::Middle,
        },
    )
}
