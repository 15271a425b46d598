//! Retained-mode canvas that records a frame for later export

use serde::Serialize;
use shared::image_size::PixelShape;

use super::canvas::{Canvas, DrawOp, Rgba};
use super::RenderError;

/// Recorded frame: a background fill plus draw operations in painter's order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayList {
    shape: PixelShape,
    background: Option<Rgba>,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(shape: PixelShape) -> Self {
        Self {
            shape,
            background: None,
            ops: Vec::new(),
        }
    }

    /// Background set by the last clear, `None` for a never-cleared surface
    pub fn background(&self) -> Option<Rgba> {
        self.background
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// All text drawn on the surface, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for DisplayList {
    fn shape(&self) -> PixelShape {
        self.shape
    }

    fn clear(&mut self, background: Rgba) -> Result<(), RenderError> {
        if self.shape.is_empty() {
            return Err(RenderError::SurfaceUnavailable(format!(
                "cannot paint a {} surface",
                self.shape
            )));
        }
        self.ops.clear();
        self.background = Some(background);
        Ok(())
    }

    fn draw(&mut self, op: DrawOp) -> Result<(), RenderError> {
        op.validate()?;
        self.ops.push(op);
        Ok(())
    }

    fn blank(shape: PixelShape) -> Self {
        DisplayList::new(shape)
    }
}
