//! Marker shape outlines.
//!
//! Shapes are small closed polygons stamped at math-space anchor points,
//! like arrowheads at curve tips. The variant set is closed: a shape is
//! one of the [`ShapeKind`] variants plus an accumulated rotation, and
//! outline generation dispatches through [`ShapeOutline`].

use enum_dispatch::enum_dispatch;
use glam::Vec2;

/// Outline generation for a marker shape variant.
#[enum_dispatch]
pub trait ShapeOutline {
    /// Outline vertices relative to the anchor point, in math units and
    /// unrotated. The polygon closes implicitly from the last vertex back
    /// to the first.
    fn offsets(&self) -> Vec<Vec2>;
}

/// A triangular arrowhead pointing up (toward +y) before rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    scale: f32,
    head_angle: f32,
}

impl Arrow {
    /// `head_angle` is the half-opening of the head in radians, clamped to
    /// `[0, PI/4]`.
    pub fn new(scale: f32, head_angle: f32) -> Arrow {
        Arrow {
            scale,
            head_angle: head_angle.clamp(0.0, std::f32::consts::FRAC_PI_4),
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn head_angle(&self) -> f32 {
        self.head_angle
    }
}

impl Default for Arrow {
    fn default() -> Arrow {
        Arrow::new(0.12, 0.698)
    }
}

impl ShapeOutline for Arrow {
    fn offsets(&self) -> Vec<Vec2> {
        let (s, a) = (self.scale, self.head_angle);
        vec![
            Vec2::new(0.0, s),
            Vec2::new(-s * a.sin(), -s * a.cos()),
            Vec2::new(s * a.sin(), -s * a.cos()),
        ]
    }
}

/// An axis-aligned square centered on the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    scale: f32,
}

impl Square {
    /// `scale` is the full edge length.
    pub fn new(scale: f32) -> Square {
        Square { scale }
    }
}

impl ShapeOutline for Square {
    fn offsets(&self) -> Vec<Vec2> {
        let h = self.scale / 2.0;
        vec![
            Vec2::new(-h, -h),
            Vec2::new(-h, h),
            Vec2::new(h, h),
            Vec2::new(h, -h),
        ]
    }
}

/// The closed set of marker shape variants.
#[enum_dispatch(ShapeOutline)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Arrow,
    Square,
}

/// A marker shape: a variant plus its accumulated rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    rotation: f32,
}

impl Shape {
    pub fn new(kind: impl Into<ShapeKind>) -> Shape {
        Shape {
            kind: kind.into(),
            rotation: 0.0,
        }
    }

    /// Rotate by `radians` counter-clockwise in math space. Repeated
    /// calls compose.
    pub fn rotate(&mut self, radians: f32) {
        self.rotation += radians;
    }

    /// A copy rotated by `radians`.
    pub fn rotated(mut self, radians: f32) -> Shape {
        self.rotate(radians);
        self
    }

    pub fn rotate_deg(&mut self, degrees: f32) {
        self.rotate(degrees.to_radians());
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Outline vertices placed at `anchor`, carrying the shape's rotation.
    pub fn outline_at(&self, anchor: Vec2) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        self.kind
            .offsets()
            .iter()
            .map(|&o| anchor + rot.rotate(o))
            .collect()
    }
}

impl From<ShapeKind> for Shape {
    fn from(kind: ShapeKind) -> Shape {
        Shape::new(kind)
    }
}

impl From<Arrow> for Shape {
    fn from(arrow: Arrow) -> Shape {
        Shape::new(arrow)
    }
}

impl From<Square> for Shape {
    fn from(square: Square) -> Shape {
        Shape::new(square)
    }
}

// ============================================================================
// Tests
// ============================================================================
