//! Raster surface: tiny-skia drawing plus cosmic-text label rendering.
//!
//! Everything here works in device pixels with y pointing down. The
//! coordinate-frame mapping lives in [`crate::coord`]; the canvas facade
//! maps math geometry to device space and calls into this module.

use std::fmt;

use glam::Vec2;
use tiny_skia::{
    BlendMode, FillRule, GradientStop, LineCap, LinearGradient, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Point, Shader, SpreadMode, Stroke, StrokeDash, Transform,
};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight};

use crate::blur;
use crate::errors::SurfaceError;
use crate::log::warn;
use crate::style::FontStyle;
use crate::types::Color;

/// Stroke parameters for line work.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
    /// On/off dash intervals in device pixels.
    pub dash: Option<Vec<f32>>,
    pub round_cap: bool,
}

impl Pen {
    pub fn new(color: Color, width: f32) -> Pen {
        Pen {
            color,
            width,
            dash: None,
            round_cap: false,
        }
    }

    pub fn with_dash(mut self, intervals: Vec<f32>) -> Pen {
        self.dash = Some(intervals);
        self
    }

    pub fn with_round_cap(mut self) -> Pen {
        self.round_cap = true;
        self
    }

    fn to_stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            line_cap: if self.round_cap {
                LineCap::Round
            } else {
                LineCap::Butt
            },
            dash: self
                .dash
                .as_ref()
                .and_then(|d| StrokeDash::new(d.clone(), 0.0)),
            ..Stroke::default()
        }
    }
}

/// Edge-fade paint over a frame's device rectangle.
///
/// tiny-skia shaders do not compose, so the fade is painted in two passes:
/// a vertical gradient drawn normally, then a horizontal gradient blended
/// with Darken or Lighten depending on which of stroke and background is
/// brighter. For opaque strokes the passes meet in the stroke color across
/// the middle and fall off to the background near the edges.
#[derive(Debug, Clone)]
pub struct FadePaint {
    vertical: Shader<'static>,
    horizontal: Shader<'static>,
    blend: BlendMode,
}

impl FadePaint {
    /// Build the fade gradients over the device rect at `lt` with extent
    /// `size`. `fade` is the fraction of each edge that fades, typically
    /// around 0.1. Returns `None` for degenerate rects.
    pub fn new(
        stroke: Color,
        background: Color,
        fade: f32,
        lt: Vec2,
        size: Vec2,
    ) -> Option<FadePaint> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return None;
        }
        let stops = |a: Color, b: Color| {
            vec![
                GradientStop::new(0.0, a.to_skia()),
                GradientStop::new(fade, b.to_skia()),
                GradientStop::new(1.0 - fade, b.to_skia()),
                GradientStop::new(1.0, a.to_skia()),
            ]
        };
        let vertical = LinearGradient::new(
            Point::from_xy(lt.x, lt.y),
            Point::from_xy(lt.x, lt.y + size.y),
            stops(background, stroke),
            SpreadMode::Repeat,
            Transform::identity(),
        )?;
        let horizontal = LinearGradient::new(
            Point::from_xy(lt.x, lt.y),
            Point::from_xy(lt.x + size.x, lt.y),
            stops(background, stroke),
            SpreadMode::Pad,
            Transform::identity(),
        )?;
        let blend = if stroke.is_lighter_than(background) {
            BlendMode::Darken
        } else {
            BlendMode::Lighten
        };
        Some(FadePaint {
            vertical,
            horizontal,
            blend,
        })
    }
}

/// A pixel surface with text support.
pub struct Surface {
    pixmap: Pixmap,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

// the font fields have no Debug of their own
impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Result<Surface, SurfaceError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(SurfaceError::InvalidDimensions { width, height })?;
        Ok(Surface {
            pixmap,
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The backing pixmap, for inspection.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill the whole surface.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    // ========================================================================
    // Line work
    // ========================================================================

    pub fn stroke_line(&mut self, p0: Vec2, p1: Vec2, pen: &Pen, fade: Option<&FadePaint>) {
        let mut pb = PathBuilder::new();
        pb.move_to(p0.x, p0.y);
        pb.line_to(p1.x, p1.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, pen, fade);
        }
    }

    /// Stroke many independent segments as one path. Used for grids.
    pub fn stroke_segments(
        &mut self,
        segments: &[(Vec2, Vec2)],
        pen: &Pen,
        fade: Option<&FadePaint>,
    ) {
        if segments.is_empty() {
            return;
        }
        let mut pb = PathBuilder::new();
        for &(a, b) in segments {
            pb.move_to(a.x, a.y);
            pb.line_to(b.x, b.y);
        }
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, pen, fade);
        }
    }

    pub fn stroke_polyline(&mut self, points: &[Vec2], pen: &Pen, fade: Option<&FadePaint>) {
        if points.len() < 2 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, pen, fade);
        }
    }

    pub fn stroke_cubic(&mut self, p0: Vec2, c0: Vec2, c1: Vec2, p1: Vec2, pen: &Pen) {
        let mut pb = PathBuilder::new();
        pb.move_to(p0.x, p0.y);
        pb.cubic_to(c0.x, c0.y, c1.x, c1.y, p1.x, p1.y);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, pen, None);
        }
    }

    // ========================================================================
    // Filled geometry
    // ========================================================================

    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].x, points[0].y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill_path(&path, color);
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.push_circle(center.x, center.y, radius);
        if let Some(path) = pb.finish() {
            self.fill_path(&path, color);
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, pen: &Pen) {
        let mut pb = PathBuilder::new();
        pb.push_circle(center.x, center.y, radius);
        if let Some(path) = pb.finish() {
            self.stroke_path(&path, pen, None);
        }
    }

    pub fn fill_rect(&mut self, lt: Vec2, size: Vec2, color: Color) {
        if let Some(rect) = tiny_skia::Rect::from_xywh(lt.x, lt.y, size.x, size.y) {
            let mut paint = Paint::default();
            paint.set_color(color.to_skia());
            paint.anti_alias = true;
            self.pixmap
                .fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    pub fn fill_round_rect(
        &mut self,
        lt: Vec2,
        size: Vec2,
        radius: f32,
        color: Color,
        fade: Option<&FadePaint>,
    ) {
        if let Some(path) = round_rect_path(lt, size, radius) {
            match fade {
                None => self.fill_path(&path, color),
                Some(f) => self.fill_faded(&path, f),
            }
        }
    }

    pub fn stroke_round_rect(&mut self, lt: Vec2, size: Vec2, radius: f32, pen: &Pen) {
        if let Some(path) = round_rect_path(lt, size, radius) {
            self.stroke_path(&path, pen, None);
        }
    }

    /// Paint a blurred round-rect shadow beneath later drawing.
    pub fn shadow_round_rect(
        &mut self,
        lt: Vec2,
        size: Vec2,
        radius: f32,
        color: Color,
        blur_radius: u32,
    ) {
        let Some(mut scratch) = Pixmap::new(self.width(), self.height()) else {
            return;
        };
        if let Some(path) = round_rect_path(lt, size, radius) {
            let mut paint = Paint::default();
            paint.set_color(color.to_skia());
            paint.anti_alias = true;
            scratch.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        blur::blur(&mut scratch, blur_radius);
        self.pixmap.draw_pixmap(
            0,
            0,
            scratch.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Measure the laid-out extent of `text` in device pixels.
    pub fn measure_text(&mut self, text: &str, font: &FontStyle) -> Vec2 {
        let metrics = Metrics::new(font.size, font.size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_text(
            &mut self.font_system,
            text,
            &text_attrs(font),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0, f32::max);
        let lines = buffer.layout_runs().count().max(1);
        Vec2::new(width, lines as f32 * metrics.line_height)
    }

    /// Draw `text` with its box's top-left corner at `lt` in device pixels.
    /// A visible `background` fills the measured box first.
    pub fn draw_text(
        &mut self,
        lt: Vec2,
        text: &str,
        font: &FontStyle,
        color: Color,
        background: Color,
    ) {
        if background.is_visible() {
            let size = self.measure_text(text, font);
            self.fill_rect(lt, size, background);
        }
        let metrics = Metrics::new(font.size, font.size * 1.2);
        let Surface {
            pixmap,
            font_system,
            swash_cache,
        } = self;
        let mut buffer = Buffer::new(font_system, metrics);
        buffer.set_text(font_system, text, &text_attrs(font), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);
        buffer.draw(font_system, swash_cache, color.to_text(), |x, y, w, h, c| {
            let Some(rect) =
                tiny_skia::Rect::from_xywh(lt.x + x as f32, lt.y + y as f32, w as f32, h as f32)
            else {
                return;
            };
            let mut paint = Paint::default();
            paint.set_color_rgba8(c.r(), c.g(), c.b(), c.a());
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        });
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SurfaceError::PngEncode(e.to_string()))
    }

    /// Write the surface to a PNG file. Failures are logged and reported
    /// as `false` rather than propagated.
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> bool {
        match self.pixmap.save_png(path.as_ref()) {
            Ok(()) => true,
            Err(_e) => {
                warn!(path = %path.as_ref().display(), error = %_e, "failed to save PNG");
                false
            }
        }
    }

    // ========================================================================
    // Paint plumbing
    // ========================================================================

    fn stroke_path(&mut self, path: &Path, pen: &Pen, fade: Option<&FadePaint>) {
        let stroke = pen.to_stroke();
        match fade {
            None => {
                let mut paint = Paint::default();
                paint.set_color(pen.color.to_skia());
                paint.anti_alias = true;
                self.pixmap
                    .stroke_path(path, &paint, &stroke, Transform::identity(), None);
            }
            Some(f) => {
                let mut paint = Paint {
                    shader: f.vertical.clone(),
                    ..Paint::default()
                };
                paint.anti_alias = true;
                self.pixmap
                    .stroke_path(path, &paint, &stroke, Transform::identity(), None);
                paint.shader = f.horizontal.clone();
                paint.blend_mode = f.blend;
                self.pixmap
                    .stroke_path(path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color.to_skia());
        paint.anti_alias = true;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn fill_faded(&mut self, path: &Path, fade: &FadePaint) {
        let mut paint = Paint {
            shader: fade.vertical.clone(),
            ..Paint::default()
        };
        paint.anti_alias = true;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
        paint.shader = fade.horizontal.clone();
        paint.blend_mode = fade.blend;
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn text_attrs(font: &FontStyle) -> Attrs<'_> {
    Attrs::new()
        .family(Family::Name(&font.family))
        .weight(Weight(font.weight))
        .style(if font.italic {
            Style::Italic
        } else {
            Style::Normal
        })
}

/// A rounded rectangle path; corner radius is clamped to half the shorter
/// side. Degenerate sizes yield `None`.
fn round_rect_path(lt: Vec2, size: Vec2, radius: f32) -> Option<Path> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    let (x, y, w, h) = (lt.x, lt.y, size.x, size.y);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: &Surface, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let px = surface.pixmap().pixels()[(y * surface.width() + x) as usize];
        (px.red(), px.green(), px.blue(), px.alpha())
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.clear(Color::rgb(10, 20, 30));
        assert_eq!(pixel(&surface, 0, 0), (10, 20, 30, 255));
        assert_eq!(pixel(&surface, 3, 3), (10, 20, 30, 255));
    }

    #[test]
    fn stroke_line_touches_expected_pixels() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.clear(Color::WHITE);
        let pen = Pen::new(Color::BLACK, 2.0);
        surface.stroke_line(Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0), &pen, None);
        let (r, ..) = pixel(&surface, 5, 5);
        assert!(r < 128);
        let (r, ..) = pixel(&surface, 5, 0);
        assert_eq!(r, 255);
    }

    #[test]
    fn fill_polygon_covers_interior() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.clear(Color::WHITE);
        surface.fill_polygon(
            &[
                Vec2::new(2.0, 2.0),
                Vec2::new(18.0, 2.0),
                Vec2::new(18.0, 18.0),
                Vec2::new(2.0, 18.0),
            ],
            Color::BLACK,
        );
        assert_eq!(pixel(&surface, 10, 10).0, 0);
        assert_eq!(pixel(&surface, 0, 0).0, 255);
    }

    #[test]
    fn fade_paint_matches_solid_in_the_middle() {
        let size = Vec2::new(40.0, 40.0);
        let fade = FadePaint::new(Color::BLACK, Color::WHITE, 0.1, Vec2::ZERO, size).unwrap();

        let mut faded = Surface::new(40, 40).unwrap();
        faded.clear(Color::WHITE);
        let pen = Pen::new(Color::BLACK, 4.0);
        faded.stroke_line(Vec2::new(0.0, 20.0), Vec2::new(40.0, 20.0), &pen, Some(&fade));

        let mut solid = Surface::new(40, 40).unwrap();
        solid.clear(Color::WHITE);
        solid.stroke_line(Vec2::new(0.0, 20.0), Vec2::new(40.0, 20.0), &pen, None);

        // identical at the center of the rect
        assert_eq!(pixel(&faded, 20, 20), pixel(&solid, 20, 20));
        // faded toward the background near the horizontal edges
        assert!(pixel(&faded, 1, 20).0 > pixel(&solid, 1, 20).0);
    }

    #[test]
    fn degenerate_fade_rect_yields_none() {
        assert!(FadePaint::new(Color::BLACK, Color::WHITE, 0.1, Vec2::ZERO, Vec2::ZERO).is_none());
        assert!(
            FadePaint::new(
                Color::BLACK,
                Color::WHITE,
                0.1,
                Vec2::ZERO,
                Vec2::new(-10.0, 10.0)
            )
            .is_none()
        );
    }

    #[test]
    fn shadow_is_soft() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.shadow_round_rect(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0), 3.0, Color::BLACK, 4);
        // inside fully covered, just outside partially covered by the blur
        assert_eq!(pixel(&surface, 20, 20).3, 255);
        let edge = pixel(&surface, 8, 20).3;
        assert!(edge > 0 && edge < 255);
        assert_eq!(pixel(&surface, 0, 0).3, 0);
    }

    #[test]
    fn text_drawing_does_not_panic_without_matching_fonts() {
        let mut surface = Surface::new(64, 32).unwrap();
        surface.clear(Color::WHITE);
        let font = FontStyle::default();
        let size = surface.measure_text("42", &font);
        assert!(size.x >= 0.0 && size.y > 0.0);
        surface.draw_text(Vec2::new(2.0, 2.0), "42", &font, Color::BLACK, Color::TRANSPARENT);
    }

    #[test]
    fn png_encoding_round_trips_header() {
        let mut surface = Surface::new(8, 8).unwrap();
        surface.clear(Color::rgb(1, 2, 3));
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
