//! Core value types shared across the crate.

use glam::IVec2;

/// An RGBA color with 8-bit channels.
///
/// Alpha defaults to opaque; [`Color::TRANSPARENT`] is the "draw nothing"
/// background value used by label and panel styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// An opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    /// Whether this color would paint anything at all.
    pub const fn is_visible(self) -> bool {
        self.a > 0
    }

    /// Channel-sum brightness comparison, used to pick the blend mode when
    /// compositing fade gradients over a background.
    pub fn is_lighter_than(self, other: Color) -> bool {
        let lhs = self.r as u32 + self.g as u32 + self.b as u32;
        let rhs = other.r as u32 + other.g as u32 + other.b as u32;
        lhs > rhs
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub(crate) fn to_text(self) -> cosmic_text::Color {
        cosmic_text::Color::rgba(self.r, self.g, self.b, self.a)
    }
}

/// Anchor fractions for label placement, expressed in math orientation:
/// x runs left (0) to right (1), y runs bottom (0) to top (1).
///
/// An anchor of `CENTER` places the text box centered on the target point;
/// `TOP_RIGHT` hangs the box down-left of it.
pub mod anchor {
    use glam::Vec2;

    pub const BOTTOM_LEFT: Vec2 = Vec2::new(0.0, 0.0);
    pub const BOTTOM: Vec2 = Vec2::new(0.5, 0.0);
    pub const BOTTOM_RIGHT: Vec2 = Vec2::new(1.0, 0.0);
    pub const LEFT: Vec2 = Vec2::new(0.0, 0.5);
    pub const CENTER: Vec2 = Vec2::new(0.5, 0.5);
    pub const RIGHT: Vec2 = Vec2::new(1.0, 0.5);
    pub const TOP_LEFT: Vec2 = Vec2::new(0.0, 1.0);
    pub const TOP: Vec2 = Vec2::new(0.5, 1.0);
    pub const TOP_RIGHT: Vec2 = Vec2::new(1.0, 1.0);
}

/// An axis-aligned integer lattice region, inclusive on both ends.
///
/// The field stamps walk every lattice point of a math-space region
/// described by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl IRect {
    pub const fn new(min: IVec2, max: IVec2) -> IRect {
        IRect { min, max }
    }

    pub const fn from_bounds(left: i32, bottom: i32, right: i32, top: i32) -> IRect {
        IRect {
            min: IVec2::new(left, bottom),
            max: IVec2::new(right, top),
        }
    }

    /// Every lattice point of the region, row by row from the bottom.
    pub fn points(&self) -> impl Iterator<Item = IVec2> + '_ {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| IVec2::new(x, y)))
    }
}

// ============================================================================
// Tests
// ============================================================================
