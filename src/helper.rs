//! Ready-made figure assembly.
//!
//! [`create_math_canvas`] builds the standard plot: background, padded
//! panel with a drop shadow, fine and coarse grids, axes and integer tick
//! labels, returning the math canvas positioned and scaled per the
//! options. [`StyledExt`] adds style-driven shorthands on [`Canvas`].

use glam::Vec2;

use crate::canvas::{Canvas, LabelOptions};
use crate::errors::CanvasError;
use crate::style::Style;
use crate::types::{Color, anchor};

/// Layout of a standard math figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathCanvasOptions {
    /// Device pixels between the surface edge and the plot panel.
    pub padding: f32,
    /// Math origin position inside the padded frame, in device pixels
    /// from its bottom-left corner.
    pub origin: Vec2,
    /// Device pixels per math unit, per axis.
    pub scale: Vec2,
    /// Coarse grid and label interval in math units.
    pub interval: Vec2,
}

impl Default for MathCanvasOptions {
    fn default() -> MathCanvasOptions {
        MathCanvasOptions {
            padding: 50.0,
            origin: Vec2::new(150.0, 100.0),
            scale: Vec2::new(50.0, 50.0),
            interval: Vec2::ONE,
        }
    }
}

/// Build the standard math figure and return its math canvas.
///
/// The returned canvas shares the surface with the whole figure, so
/// saving from it saves everything drawn so far.
pub fn create_math_canvas(
    width: u32,
    height: u32,
    opts: &MathCanvasOptions,
    style: &Style,
) -> Result<Canvas, CanvasError> {
    let root = Canvas::new(width, height)?;
    root.fill_background(style.background());
    let p = opts.padding;
    let inner = Vec2::new(width as f32 - 2.0 * p, height as f32 - 2.0 * p);
    let padded = root.sub_canvas(Vec2::splat(p), inner, Vec2::ZERO, Vec2::ONE)?;
    let math = padded.sub_canvas(Vec2::ZERO, inner, opts.origin, opts.scale)?;
    draw_math_coordinates(&root, &padded, &math, opts.interval, style);
    Ok(math)
}

/// Draw the coordinate backdrop: panel behind `padded`, unit and coarse
/// grids, axes and tick labels on `math`. Grid and axis strokes fade
/// toward the panel background near the frame edges.
pub fn draw_math_coordinates(
    root: &Canvas,
    padded: &Canvas,
    math: &Canvas,
    interval: Vec2,
    style: &Style,
) {
    root.draw_panel_for(padded, &style.panel);
    let fade = |stroke: Color| math.fade_paint(stroke, style.panel.background, style.panel.fade);
    math.draw_grid(Vec2::ONE, &style.math.grid, fade(style.math.grid.color).as_ref());
    math.draw_grid(
        interval,
        &style.math.grid_large,
        fade(style.math.grid_large.color).as_ref(),
    );
    math.draw_axis(&style.math.axis, fade(style.math.axis.color).as_ref());
    math.draw_axis_labels(
        interval,
        &LabelOptions {
            font: style.font.clone(),
            offset: Vec2::new(5.0, -5.0),
            anchor: anchor::TOP_LEFT,
            ..LabelOptions::default()
        },
    );
}

/// Style-driven drawing shorthands.
pub trait StyledExt {
    /// Plot a curve in the style's curve color, optionally faded toward
    /// the panel background near the frame edges.
    fn draw_styled_function(
        &self,
        style: &Style,
        f: impl Fn(f32) -> f32,
        left: f32,
        right: f32,
        fade: bool,
    );

    /// A segment with endpoint dots in the style's segment colors.
    fn draw_styled_segment(&self, style: &Style, p0: Vec2, p1: Vec2);

    /// A circle mark with a label beside it.
    fn draw_circle_mark_with_label(&self, style: &Style, at: Vec2, text: &str);
}

impl StyledExt for Canvas {
    fn draw_styled_function(
        &self,
        style: &Style,
        f: impl Fn(f32) -> f32,
        left: f32,
        right: f32,
        fade: bool,
    ) {
        let fade_paint = if fade {
            self.fade_paint(
                style.math.curve.color,
                style.panel.background,
                style.panel.fade,
            )
        } else {
            None
        };
        self.draw_function(f, left, right, &style.math.curve, fade_paint.as_ref());
    }

    fn draw_styled_segment(&self, style: &Style, p0: Vec2, p1: Vec2) {
        self.draw_line_segment(p0, p1, &style.math);
    }

    fn draw_circle_mark_with_label(&self, style: &Style, at: Vec2, text: &str) {
        self.draw_circle_mark(at, &style.math.mark);
        self.draw_label(
            at,
            text,
            &LabelOptions {
                font: style.font.clone(),
                offset: Vec2::new(10.0, 10.0),
                anchor: anchor::BOTTOM_LEFT,
                ..LabelOptions::default()
            },
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn math_canvas_origin_lands_where_configured() {
        let opts = MathCanvasOptions {
            padding: 50.0,
            origin: Vec2::new(150.0, 100.0),
            scale: Vec2::new(50.0, 50.0),
            interval: Vec2::ONE,
        };
        let math = create_math_canvas(400, 300, &opts, &Style::default()).unwrap();
        let origin = math.frame().math_to_device(Vec2::ZERO);
        assert_eq!(origin, Vec2::new(200.0, 150.0));
        // one math unit is fifty device pixels
        let unit = math.frame().math_to_device(Vec2::new(1.0, 0.0));
        assert_eq!(unit, Vec2::new(250.0, 150.0));
    }

    #[test]
    fn zero_scale_propagates() {
        let opts = MathCanvasOptions {
            scale: Vec2::new(0.0, 50.0),
            ..MathCanvasOptions::default()
        };
        let err = create_math_canvas(200, 200, &opts, &Style::default()).unwrap_err();
        assert!(matches!(err, CanvasError::Coord(_)));
    }

    #[test]
    fn styled_function_draws_in_curve_color() {
        let opts = MathCanvasOptions::default();
        let style = Style::default();
        let math = create_math_canvas(400, 300, &opts, &style).unwrap();
        math.draw_styled_function(&style, |x| x, -2.0, 2.0, false);
        // identity passes through the origin, device (200, 150), in
        // Klein blue: low red, strong blue
        let (r, _, b, _) = math.pixel(200, 150).unwrap();
        assert!(r < 128);
        assert!(b > 100);
    }

    #[test]
    fn figure_backdrop_covers_the_surface() {
        let opts = MathCanvasOptions::default();
        let style = Style::default();
        let math = create_math_canvas(300, 300, &opts, &style).unwrap();
        // surface corner carries the figure background
        assert_eq!(math.pixel(0, 0).unwrap(), (255, 255, 255, 255));
        let png = math.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn save_to_unwritable_path_reports_false() {
        let math =
            create_math_canvas(50, 50, &MathCanvasOptions::default(), &Style::default()).unwrap();
        assert!(!math.save_png("/nonexistent-dir/figure.png"));
    }
}
