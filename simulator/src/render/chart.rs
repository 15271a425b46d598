//! Transmittance-vs-wavelength chart

use log::debug;
use shared::image_size::PixelShape;

use super::canvas::{Canvas, DrawOp, Point, Rgba, Stroke, TextAnchor, TextStyle};
use super::RenderError;
use crate::catalog::{FilterMaterial, LensMaterial, MirrorMaterial};
use crate::photometry::transmittance::{TransmittanceCurve, SAMPLE_END_NM, SAMPLE_START_NM};

/// Size of the chart view
pub const CHART_SURFACE: PixelShape = PixelShape::from_width_height(400, 300);

/// Margin between the surface edge and the plot area
pub const CHART_PADDING: f64 = 40.0;

const GRID_DIVISIONS: usize = 10;
const LABEL_DIVISIONS: usize = 5;

const GRID_COLOR: Rgba = Rgba::rgb(0xe0, 0xe0, 0xe0);
const AXIS_COLOR: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
const CURVE_COLOR: Rgba = Rgba::rgb(0x21, 0x96, 0xf3);
const AREA_ALPHA: f64 = 0.2;
const LABEL_SIZE_PX: f64 = 12.0;

/// Mapping from wavelength/transmittance to surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl ChartLayout {
    pub fn for_surface(shape: PixelShape) -> Self {
        Self {
            width: shape.width as f64,
            height: shape.height as f64,
            padding: CHART_PADDING,
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// y pixel of the wavelength axis
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    pub fn x_for_wavelength(&self, wavelength_nm: f64) -> f64 {
        let span = (SAMPLE_END_NM - SAMPLE_START_NM) as f64;
        self.padding + (wavelength_nm - SAMPLE_START_NM as f64) / span * self.plot_width()
    }

    /// y pixel for a transmittance fraction; 1.0 maps to the top of the plot
    pub fn y_for_transmittance(&self, transmittance: f64) -> f64 {
        self.baseline() - transmittance * self.plot_height()
    }
}

fn draw_grid<C: Canvas>(surface: &mut C, layout: &ChartLayout) -> Result<(), RenderError> {
    let grid = Stroke::new(GRID_COLOR, 1.0);
    let p = layout.padding;

    for i in 0..=GRID_DIVISIONS {
        let x = p + (i as f64 / GRID_DIVISIONS as f64) * layout.plot_width();
        surface.draw(DrawOp::Line {
            from: Point::new(x, p),
            to: Point::new(x, layout.baseline()),
            stroke: grid,
        })?;
    }

    for i in 0..=GRID_DIVISIONS {
        let y = p + (i as f64 / GRID_DIVISIONS as f64) * layout.plot_height();
        surface.draw(DrawOp::Line {
            from: Point::new(p, y),
            to: Point::new(layout.width - p, y),
            stroke: grid,
        })?;
    }

    let axis = Stroke::new(AXIS_COLOR, 2.0);
    surface.draw(DrawOp::Line {
        from: Point::new(p, layout.baseline()),
        to: Point::new(layout.width - p, layout.baseline()),
        stroke: axis,
    })?;
    surface.draw(DrawOp::Line {
        from: Point::new(p, p),
        to: Point::new(p, layout.baseline()),
        stroke: axis,
    })
}

fn draw_curve<C: Canvas>(
    surface: &mut C,
    layout: &ChartLayout,
    curve: &TransmittanceCurve,
) -> Result<(), RenderError> {
    let points: Vec<Point> = curve
        .samples()
        .iter()
        .map(|s| {
            Point::new(
                layout.x_for_wavelength(s.wavelength_nm as f64),
                layout.y_for_transmittance(s.transmittance),
            )
        })
        .collect();

    surface.draw(DrawOp::Polyline {
        points: points.clone(),
        stroke: Stroke::new(CURVE_COLOR, 3.0),
    })?;

    let mut area = points;
    area.push(Point::new(layout.width - layout.padding, layout.baseline()));
    area.push(Point::new(layout.padding, layout.baseline()));
    surface.draw(DrawOp::FillPolygon {
        points: area,
        color: CURVE_COLOR.with_alpha(AREA_ALPHA),
    })
}

fn draw_labels<C: Canvas>(surface: &mut C, layout: &ChartLayout) -> Result<(), RenderError> {
    let step_nm = (SAMPLE_END_NM - SAMPLE_START_NM) / LABEL_DIVISIONS as u32;

    for i in 0..=LABEL_DIVISIONS {
        let fraction = i as f64 / LABEL_DIVISIONS as f64;
        let wavelength = SAMPLE_START_NM + i as u32 * step_nm;
        surface.draw(DrawOp::Text {
            position: Point::new(
                layout.padding + fraction * layout.plot_width(),
                layout.height - 10.0,
            ),
            text: format!("{wavelength}nm"),
            style: TextStyle {
                size_px: LABEL_SIZE_PX,
                color: AXIS_COLOR,
                anchor: TextAnchor::Middle,
            },
        })?;
    }

    for i in 0..=LABEL_DIVISIONS {
        let fraction = i as f64 / LABEL_DIVISIONS as f64;
        surface.draw(DrawOp::Text {
            position: Point::new(
                layout.padding - 10.0,
                layout.baseline() - fraction * layout.plot_height() + 5.0,
            ),
            text: format!("{}%", i * 20),
            style: TextStyle {
                size_px: LABEL_SIZE_PX,
                color: AXIS_COLOR,
                anchor: TextAnchor::End,
            },
        })?;
    }
    Ok(())
}

/// Repaint `surface` with the chart for a configuration.
///
/// # Returns
/// The sampled curve that was plotted
pub fn render<C: Canvas>(
    surface: &mut C,
    mirror: &MirrorMaterial,
    lens: &LensMaterial,
    filter: &FilterMaterial,
) -> Result<TransmittanceCurve, RenderError> {
    let curve = TransmittanceCurve::sample(mirror, lens, filter);
    draw(surface, &curve)?;
    Ok(curve)
}

/// Repaint `surface` with an already sampled curve
pub fn draw<C: Canvas>(surface: &mut C, curve: &TransmittanceCurve) -> Result<(), RenderError> {
    let layout = ChartLayout::for_surface(surface.shape());

    surface.clear(Rgba::WHITE)?;
    draw_grid(surface, &layout)?;
    draw_curve(surface, &layout, curve)?;
    draw_labels(surface, &layout)?;

    debug!(
        "Chart rendered: {} samples, mean transmittance {:.1}%",
        curve.len(),
        curve.mean() * 100.0
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{filter, lens, mirror, FilterId, LensId, MirrorId};
    use crate::render::display_list::DisplayList;
    use approx::assert_relative_eq;

    fn chart(m: MirrorId, l: LensId, f: FilterId) -> (TransmittanceCurve, DisplayList) {
        let mut surface = DisplayList::new(CHART_SURFACE);
        let curve = render(&mut surface, mirror(m), lens(l), filter(f)).unwrap();
        (curve, surface)
    }

    #[test]
    fn test_layout_mapping() {
        let layout = ChartLayout::for_surface(CHART_SURFACE);
        assert_eq!(layout.x_for_wavelength(300.0), 40.0);
        assert_eq!(layout.x_for_wavelength(800.0), 360.0);
        assert_eq!(layout.x_for_wavelength(550.0), 200.0);
        assert_eq!(layout.y_for_transmittance(0.0), 260.0);
        assert_eq!(layout.y_for_transmittance(1.0), 40.0);
    }

    #[test]
    fn test_draw_order() {
        let (_, list) = chart(MirrorId::Silver, LensId::Fluorite, FilterId::Clear);
        assert_eq!(list.background(), Some(Rgba::WHITE));

        let ops = list.ops();
        // 22 grid lines, 2 axes, curve, area, 12 labels
        assert_eq!(ops.len(), 22 + 2 + 1 + 1 + 12);
        assert!(ops[..24].iter().all(|op| matches!(op, DrawOp::Line { .. })));
        assert!(matches!(ops[24], DrawOp::Polyline { .. }));
        assert!(matches!(ops[25], DrawOp::FillPolygon { .. }));
        assert!(ops[26..].iter().all(|op| matches!(op, DrawOp::Text { .. })));

        match &ops[0] {
            DrawOp::Line { stroke, .. } => {
                assert_eq!(stroke.color, GRID_COLOR);
                assert_eq!(stroke.width, 1.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
        match &ops[22] {
            DrawOp::Line { stroke, .. } => {
                assert_eq!(stroke.color, AXIS_COLOR);
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_curve_points_follow_samples() {
        let (curve, list) = chart(MirrorId::Gold, LensId::Quartz, FilterId::Red);
        let layout = ChartLayout::for_surface(CHART_SURFACE);

        let points = list
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Polyline { points, stroke } => {
                    assert_eq!(stroke.width, 3.0);
                    Some(points.clone())
                }
                _ => None,
            })
            .unwrap();

        assert_eq!(points.len(), 51);
        for (point, sample) in points.iter().zip(curve.samples()) {
            assert_relative_eq!(point.x, layout.x_for_wavelength(sample.wavelength_nm as f64));
            assert_relative_eq!(point.y, layout.y_for_transmittance(sample.transmittance));
        }
    }

    #[test]
    fn test_area_closes_on_baseline() {
        let (_, list) = chart(MirrorId::Aluminum, LensId::Plastic, FilterId::Clear);
        let (points, color) = list
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::FillPolygon { points, color } => Some((points.clone(), *color)),
                _ => None,
            })
            .unwrap();

        assert_eq!(points.len(), 53);
        assert_eq!(points[51], Point::new(360.0, 260.0));
        assert_eq!(points[52], Point::new(40.0, 260.0));
        assert_relative_eq!(color.alpha, 0.2);
    }

    #[test]
    fn test_labels() {
        let (_, list) = chart(MirrorId::Aluminum, LensId::Plastic, FilterId::Clear);
        assert_eq!(
            list.texts(),
            vec![
                "300nm", "400nm", "500nm", "600nm", "700nm", "800nm", "0%", "20%", "40%", "60%",
                "80%", "100%"
            ]
        );

        let percent_anchor = list.ops().iter().rev().find_map(|op| match op {
            DrawOp::Text {
                position, style, ..
            } => Some((*position, style.anchor)),
            _ => None,
        });
        let (position, anchor) = percent_anchor.unwrap();
        assert_eq!(anchor, TextAnchor::End);
        assert_eq!(position, Point::new(30.0, 45.0));
    }

    #[test]
    fn test_render_is_deterministic() {
        let (_, a) = chart(MirrorId::Dielectric, LensId::Astro, FilterId::Polarizing);
        let (_, b) = chart(MirrorId::Dielectric, LensId::Astro, FilterId::Polarizing);
        assert_eq!(a, b);
    }
}
