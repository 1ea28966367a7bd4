//! The canvas facade.
//!
//! A [`Canvas`] pairs a coordinate [`Frame`] with a shared raster
//! [`Surface`]. Sub-canvases are cheap views into the same surface with
//! their own frame, so a figure is built by deriving frames and drawing
//! into each: grids, axes, labels, panels, curves, markers and measures.
//!
//! Drawing methods take math-space geometry unless their name says `raw`;
//! widths, radii and label offsets are device pixels.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;

use crate::coord::Frame;
use crate::errors::{CanvasError, CoordError, SurfaceError};
use crate::log::debug;
use crate::sampling::{bezier_end_angle, sample_function, tangent_line};
use crate::shapes::{Arrow, Shape};
use crate::style::{FontStyle, LineStyle, MarkStyle, MathStyle, PanelStyle};
use crate::surface::{FadePaint, Pen, Surface};
use crate::types::{Color, IRect, anchor};

/// Samples per curve when no explicit count is given.
const FUNCTION_SAMPLES: usize = 10_000;

/// Optional stroke modifiers for line drawing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineOptions<'a> {
    /// On/off dash intervals in device pixels.
    pub dash: Option<&'a [f32]>,
    pub round_cap: bool,
    pub fade: Option<&'a FadePaint>,
}

/// Placement and coloring of a label.
#[derive(Debug, Clone)]
pub struct LabelOptions {
    pub font: FontStyle,
    /// Defaults to the font color.
    pub color: Option<Color>,
    pub background: Option<Color>,
    /// Anchor fraction of the text box placed on the target point,
    /// see [`crate::types::anchor`].
    pub anchor: Vec2,
    /// Extra displacement in device pixels, y pointing up.
    pub offset: Vec2,
}

impl Default for LabelOptions {
    fn default() -> LabelOptions {
        LabelOptions {
            font: FontStyle::default(),
            color: None,
            background: None,
            anchor: anchor::BOTTOM_LEFT,
            offset: Vec2::ZERO,
        }
    }
}

/// A drawing view: one coordinate frame over a shared surface.
#[derive(Clone)]
pub struct Canvas {
    frame: Frame,
    surface: Rc<RefCell<Surface>>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("frame", &self.frame)
            .field("surface", &self.surface)
            .finish()
    }
}

impl Canvas {
    /// A root canvas over a fresh surface.
    pub fn new(width: u32, height: u32) -> Result<Canvas, CanvasError> {
        let surface = Surface::new(width, height)?;
        Ok(Canvas {
            frame: Frame::root(width as f32, height as f32),
            surface: Rc::new(RefCell::new(surface)),
        })
    }

    /// A sub-canvas drawing through a child frame onto the same surface.
    pub fn sub_canvas(
        &self,
        position: Vec2,
        size: Vec2,
        origin: Vec2,
        scale: Vec2,
    ) -> Result<Canvas, CoordError> {
        Ok(Canvas {
            frame: self.frame.child(position, size, origin, scale)?,
            surface: Rc::clone(&self.surface),
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Math-space corners currently visible in this frame, as
    /// `(bottom_left, top_right)`.
    pub fn math_bounds(&self) -> (Vec2, Vec2) {
        let lb = self.frame.device_lb();
        let size = self.frame.device_size();
        let a = self.frame.device_to_math(lb);
        let b = self.frame.device_to_math(Vec2::new(lb.x + size.x, lb.y - size.y));
        (a.min(b), a.max(b))
    }

    /// Edge-fade paint spanning this frame's device rectangle.
    pub fn fade_paint(&self, stroke: Color, background: Color, fade: f32) -> Option<FadePaint> {
        FadePaint::new(
            stroke,
            background,
            fade,
            self.frame.device_lt(),
            self.frame.device_size(),
        )
    }

    // ========================================================================
    // Background, lines, grids, axes
    // ========================================================================

    /// Fill this frame's rectangle.
    pub fn fill_background(&self, color: Color) {
        self.surface
            .borrow_mut()
            .fill_rect(self.frame.device_lt(), self.frame.device_size(), color);
    }

    pub fn draw_line(&self, p0: Vec2, p1: Vec2, style: &LineStyle) {
        self.draw_line_opts(p0, p1, style, LineOptions::default());
    }

    pub fn draw_line_opts(&self, p0: Vec2, p1: Vec2, style: &LineStyle, opts: LineOptions<'_>) {
        let pen = build_pen(style, &opts);
        self.surface.borrow_mut().stroke_line(
            self.frame.math_to_device(p0),
            self.frame.math_to_device(p1),
            &pen,
            opts.fade,
        );
    }

    /// Polyline through math points.
    pub fn draw_path_line(&self, points: &[Vec2], style: &LineStyle, fade: Option<&FadePaint>) {
        let device = self.frame.map_points(points);
        let pen = Pen::new(style.color, style.width).with_round_cap();
        self.surface.borrow_mut().stroke_polyline(&device, &pen, fade);
    }

    /// Grid lines every `interval` math units, walked outward from the
    /// frame origin. A degenerate interval draws nothing.
    pub fn draw_grid(&self, interval: Vec2, style: &LineStyle, fade: Option<&FadePaint>) {
        let segments = grid_segments(
            self.frame.device_lb(),
            self.frame.device_size(),
            self.frame.math_to_device(Vec2::ZERO),
            self.frame.to_device_size(interval).abs(),
        );
        debug!(lines = segments.len(), "grid walk");
        self.surface
            .borrow_mut()
            .stroke_segments(&segments, &Pen::new(style.color, style.width), fade);
    }

    /// Axis lines through the frame origin, spanning the frame.
    pub fn draw_axis(&self, style: &LineStyle, fade: Option<&FadePaint>) {
        let origin = self.frame.math_to_device(Vec2::ZERO);
        let lb = self.frame.device_lb();
        let size = self.frame.device_size();
        let pen = Pen::new(style.color, style.width);
        let mut surface = self.surface.borrow_mut();
        surface.stroke_line(
            Vec2::new(lb.x, origin.y),
            Vec2::new(lb.x + size.x, origin.y),
            &pen,
            fade,
        );
        surface.stroke_line(
            Vec2::new(origin.x, lb.y),
            Vec2::new(origin.x, lb.y - size.y),
            &pen,
            fade,
        );
    }

    /// Integer tick labels along both axes every `interval` math units.
    pub fn draw_axis_labels(&self, interval: Vec2, opts: &LabelOptions) {
        let stops = axis_label_stops(
            self.frame.device_lb(),
            self.frame.device_size(),
            self.frame.math_to_device(Vec2::ZERO),
            self.frame.to_device_size(interval).abs(),
            interval,
        );
        for (pos, value) in stops {
            self.draw_label_raw(pos, &format!("{}", value as i32), opts);
        }
    }

    // ========================================================================
    // Labels
    // ========================================================================

    /// A text label anchored at a math point.
    pub fn draw_label(&self, at: Vec2, text: &str, opts: &LabelOptions) {
        self.draw_label_raw(self.frame.math_to_device(at), text, opts);
    }

    /// A text label anchored at a device point.
    pub fn draw_label_raw(&self, at: Vec2, text: &str, opts: &LabelOptions) {
        let mut surface = self.surface.borrow_mut();
        let size = surface.measure_text(text, &opts.font);
        let lt = Vec2::new(
            at.x - opts.anchor.x * size.x + opts.offset.x,
            at.y - (1.0 - opts.anchor.y) * size.y - opts.offset.y,
        );
        surface.draw_text(
            lt,
            text,
            &opts.font,
            opts.color.unwrap_or(opts.font.color),
            opts.background.unwrap_or(Color::TRANSPARENT),
        );
    }

    // ========================================================================
    // Panels and borders
    // ========================================================================

    /// A rounded panel with a blurred drop shadow over a math rect.
    pub fn draw_panel(&self, position: Vec2, size: Vec2, style: &PanelStyle) {
        let lb = self.frame.math_to_device(position);
        let dev = self.frame.to_device_size(size).abs();
        self.draw_panel_raw(Vec2::new(lb.x, lb.y - dev.y), dev, style);
    }

    /// A panel behind another canvas's frame.
    pub fn draw_panel_for(&self, inner: &Canvas, style: &PanelStyle) {
        self.draw_panel_raw(inner.frame.device_lt(), inner.frame.device_size(), style);
    }

    pub fn draw_panel_raw(&self, lt: Vec2, size: Vec2, style: &PanelStyle) {
        let mut surface = self.surface.borrow_mut();
        if style.shadow.is_visible() {
            surface.shadow_round_rect(
                lt - style.shadow_offset,
                size + 2.0 * style.shadow_offset,
                style.corner_radius,
                style.shadow,
                style.shadow_blur,
            );
        }
        surface.fill_round_rect(lt, size, style.corner_radius, style.background, None);
    }

    /// Stroke a rounded border around this frame.
    pub fn draw_border(&self, style: &LineStyle, corner_radius: f32) {
        self.surface.borrow_mut().stroke_round_rect(
            self.frame.device_lt(),
            self.frame.device_size(),
            corner_radius,
            &Pen::new(style.color, style.width),
        );
    }

    // ========================================================================
    // Points, curves, tangents
    // ========================================================================

    /// Filled dots at math points; `radius` is device pixels.
    pub fn draw_points(&self, points: &[Vec2], color: Color, radius: f32) {
        let mut surface = self.surface.borrow_mut();
        for &p in points {
            surface.fill_circle(self.frame.math_to_device(p), radius, color);
        }
    }

    /// Plot `f` over `[left, right]` with the default sample count,
    /// clipped against this frame's visible y-band.
    pub fn draw_function(
        &self,
        f: impl Fn(f32) -> f32,
        left: f32,
        right: f32,
        style: &LineStyle,
        fade: Option<&FadePaint>,
    ) {
        let (min, max) = self.math_bounds();
        self.draw_function_sampled(f, left, right, min.y, max.y, FUNCTION_SAMPLES, style, fade);
    }

    /// Plot `f` across the whole visible range of this frame.
    pub fn draw_function_auto(
        &self,
        f: impl Fn(f32) -> f32,
        style: &LineStyle,
        fade: Option<&FadePaint>,
    ) {
        let (min, max) = self.math_bounds();
        self.draw_function_sampled(f, min.x, max.x, min.y, max.y, FUNCTION_SAMPLES, style, fade);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_function_sampled(
        &self,
        f: impl Fn(f32) -> f32,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        count: usize,
        style: &LineStyle,
        fade: Option<&FadePaint>,
    ) {
        for run in sample_function(f, left, right, bottom, top, count) {
            self.draw_path_line(&run, style, fade);
        }
    }

    /// Tangent segment of `f` at `x0`, spanning `half_width` math units to
    /// each side. Silently draws nothing where the tangent is undefined.
    pub fn draw_tangent(
        &self,
        f: impl Fn(f32) -> f32,
        x0: f32,
        half_width: f32,
        style: &LineStyle,
    ) {
        let Some(tangent) = tangent_line(f, x0) else {
            return;
        };
        let (xa, xb) = (x0 - half_width, x0 + half_width);
        self.draw_line(Vec2::new(xa, tangent(xa)), Vec2::new(xb, tangent(xb)), style);
    }

    // ========================================================================
    // Shapes and arrows
    // ========================================================================

    /// Fill a marker shape at a math anchor; the outline is in math units
    /// so it scales with the frame.
    pub fn draw_shape(&self, shape: &Shape, at: Vec2, color: Color) {
        let outline = self.frame.map_points(&shape.outline_at(at));
        self.surface.borrow_mut().fill_polygon(&outline, color);
    }

    pub fn draw_shapes(&self, shape: &Shape, points: &[Vec2], color: Color) {
        for &p in points {
            self.draw_shape(shape, p, color);
        }
    }

    /// A default-sized arrowhead; rotation zero points toward +y.
    pub fn draw_arrow(&self, at: Vec2, rotation: f32, color: Color) {
        self.draw_shape(&Shape::from(Arrow::default()).rotated(rotation), at, color);
    }

    /// An s-shaped cubic bezier between two math points, with control
    /// points at the midpoint x.
    pub fn draw_bezier(&self, p0: Vec2, p1: Vec2, style: &LineStyle) {
        let (c0, c1) = bezier_controls(p0, p1);
        let pen = Pen::new(style.color, style.width).with_round_cap();
        self.surface.borrow_mut().stroke_cubic(
            self.frame.math_to_device(p0),
            self.frame.math_to_device(c0),
            self.frame.math_to_device(c1),
            self.frame.math_to_device(p1),
            &pen,
        );
    }

    /// A bezier with an arrowhead at its destination, oriented along the
    /// curve's direction of arrival.
    pub fn draw_bezier_arrow(&self, p0: Vec2, p1: Vec2, style: &LineStyle) {
        self.draw_bezier(p0, p1, style);
        let (c0, c1) = bezier_controls(p0, p1);
        let angle = bezier_end_angle(p0, c0, c1, p1);
        self.draw_arrow(p1, angle - FRAC_PI_2, style.color);
    }

    // ========================================================================
    // Segments, marks, measures
    // ========================================================================

    /// A thick segment with filled endpoint dots.
    pub fn draw_line_segment(&self, p0: Vec2, p1: Vec2, style: &MathStyle) {
        self.draw_line_opts(
            p0,
            p1,
            &style.segment,
            LineOptions {
                round_cap: true,
                ..LineOptions::default()
            },
        );
        self.draw_points(&[p0, p1], style.endpoint, style.endpoint_radius);
    }

    /// A two-tier circle mark: filled dot inside a thin ring.
    pub fn draw_circle_mark(&self, at: Vec2, style: &MarkStyle) {
        let center = self.frame.math_to_device(at);
        let mut surface = self.surface.borrow_mut();
        surface.fill_circle(center, style.radius, style.fill);
        surface.stroke_circle(
            center,
            style.ring_radius,
            &Pen::new(style.ring, style.ring_width),
        );
    }

    /// A dimension measure beside the segment `p0..p1`: two ticks pushed
    /// out along the perpendicular by `padding` device pixels, a dimension
    /// line between their midpoints, and a centered label. `flip` picks
    /// the other side of the segment.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_measure(
        &self,
        p0: Vec2,
        p1: Vec2,
        padding: f32,
        tick: f32,
        flip: bool,
        text: &str,
        line: &LineStyle,
        font: &FontStyle,
    ) {
        let a = self.frame.math_to_device(p0);
        let b = self.frame.math_to_device(p1);
        let Some(dir) = (b - a).try_normalize() else {
            return;
        };
        let side = if flip { -1.0 } else { 1.0 };
        let normal = Vec2::new(-dir.y, dir.x) * side;
        let pen = Pen::new(line.color, line.width);
        {
            let mut surface = self.surface.borrow_mut();
            for p in [a, b] {
                surface.stroke_line(
                    p + normal * padding,
                    p + normal * (padding + tick),
                    &pen,
                    None,
                );
            }
            let mid = padding + tick / 2.0;
            surface.stroke_line(a + normal * mid, b + normal * mid, &pen, None);
        }
        let center = (a + b) / 2.0 + normal * (padding + tick / 2.0);
        self.draw_label_raw(
            center,
            text,
            &LabelOptions {
                font: font.clone(),
                anchor: anchor::CENTER,
                ..LabelOptions::default()
            },
        );
    }

    // ========================================================================
    // Field stamps
    // ========================================================================

    /// Dots at every integer lattice point of `region`.
    pub fn draw_field_points(&self, region: IRect, color: Color, radius: f32) {
        let points: Vec<Vec2> = region.points().map(|p| p.as_vec2()).collect();
        self.draw_points(&points, color, radius);
    }

    /// Unit squares centered on every lattice point of `region`.
    pub fn draw_field_boxes(&self, region: IRect, scale: f32, color: Color) {
        let shape = Shape::from(crate::shapes::Square::new(scale));
        for p in region.points() {
            self.draw_shape(&shape, p.as_vec2(), color);
        }
    }

    // ========================================================================
    // Output
    // ========================================================================

    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.borrow().encode_png()
    }

    /// Write the surface to a PNG file; failures are logged, not raised.
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> bool {
        self.surface.borrow().save_png(path)
    }

    /// Read one device pixel as straight RGBA, for inspection.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let surface = self.surface.borrow();
        if x >= surface.width() || y >= surface.height() {
            return None;
        }
        let px = surface.pixmap().pixels()[(y * surface.width() + x) as usize];
        Some((px.red(), px.green(), px.blue(), px.alpha()))
    }
}

fn build_pen(style: &LineStyle, opts: &LineOptions<'_>) -> Pen {
    let mut pen = Pen::new(style.color, style.width);
    if let Some(dash) = opts.dash {
        pen = pen.with_dash(dash.to_vec());
    }
    if opts.round_cap {
        pen = pen.with_round_cap();
    }
    pen
}

/// Control points for the s-shaped bezier between `p0` and `p1`: both sit
/// at the midpoint x, keeping departure and arrival horizontal.
fn bezier_controls(p0: Vec2, p1: Vec2) -> (Vec2, Vec2) {
    let mid_x = (p0.x + p1.x) / 2.0;
    (Vec2::new(mid_x, p0.y), Vec2::new(mid_x, p1.y))
}

// ============================================================================
// Grid and axis-label walkers
// ============================================================================

/// Grid segments over a device rect, walked outward from `origin` every
/// `interval` device pixels per axis. Degenerate or non-finite intervals
/// yield nothing.
fn grid_segments(lb: Vec2, size: Vec2, origin: Vec2, interval: Vec2) -> Vec<(Vec2, Vec2)> {
    if !interval.is_finite() || interval.x * interval.y == 0.0 {
        return Vec::new();
    }
    let (left, right) = (lb.x, lb.x + size.x);
    let (top, bottom) = (lb.y - size.y, lb.y);
    let mut segments = Vec::new();

    let mut x = origin.x;
    while x < right {
        if x > left {
            segments.push((Vec2::new(x, bottom), Vec2::new(x, top)));
        }
        x += interval.x;
    }
    let mut x = origin.x - interval.x;
    while x > left {
        if x < right {
            segments.push((Vec2::new(x, bottom), Vec2::new(x, top)));
        }
        x -= interval.x;
    }

    let mut y = origin.y;
    while y < bottom {
        if y > top {
            segments.push((Vec2::new(left, y), Vec2::new(right, y)));
        }
        y += interval.y;
    }
    let mut y = origin.y - interval.y;
    while y > top {
        if y < bottom {
            segments.push((Vec2::new(left, y), Vec2::new(right, y)));
        }
        y -= interval.y;
    }

    segments
}

/// Axis label stops: device position and math value of every tick along
/// both axes, origin emitted once with value zero.
fn axis_label_stops(
    lb: Vec2,
    size: Vec2,
    origin: Vec2,
    interval: Vec2,
    step: Vec2,
) -> Vec<(Vec2, f32)> {
    if !interval.is_finite() || interval.x * interval.y == 0.0 {
        return Vec::new();
    }
    let (left, right) = (lb.x, lb.x + size.x);
    let (top, bottom) = (lb.y - size.y, lb.y);
    let mut stops = Vec::new();

    let mut x = origin.x;
    let mut v = 0.0;
    while x < right {
        if x > left {
            stops.push((Vec2::new(x, origin.y), v));
        }
        x += interval.x;
        v += step.x;
    }
    let mut x = origin.x - interval.x;
    let mut v = -step.x;
    while x > left {
        if x < right {
            stops.push((Vec2::new(x, origin.y), v));
        }
        x -= interval.x;
        v -= step.x;
    }

    // device y grows downward, so walking down decreases the math value;
    // the origin already carries its label from the x walk
    let mut y = origin.y + interval.y;
    let mut v = -step.y;
    while y < bottom {
        if y > top {
            stops.push((Vec2::new(origin.x, y), v));
        }
        y += interval.y;
        v -= step.y;
    }
    let mut y = origin.y - interval.y;
    let mut v = step.y;
    while y > top {
        if y < bottom {
            stops.push((Vec2::new(origin.x, y), v));
        }
        y -= interval.y;
        v += step.y;
    }

    stops
}

// ============================================================================
// Tests
// ============================================================================
