//! Style records and the default palette.
//!
//! Styles are plain data: the canvas reads them, nothing here draws.
//! Defaults reproduce the house look: Klein-blue curves on a soft gray
//! grid with a white panel background.

use glam::Vec2;

use crate::types::Color;

/// Named palette colors.
pub mod colors {
    use crate::types::Color;

    pub const DARK: Color = Color::rgb(22, 23, 28);
    pub const DARK_DEEP: Color = Color::rgb(31, 32, 45);
    pub const LIGHT: Color = Color::rgb(255, 253, 227);
    pub const LIGHT_GRAY: Color = Color::rgb(196, 196, 196);
    pub const KLEIN_BLUE: Color = Color::rgb(0x00, 0x2f, 0xa7);
    pub const PANEL_BACKGROUND_DARK: Color = Color::rgb(0x1d, 0x1f, 0x24);
    pub const PANEL_TITLE_BAR: Color = Color::rgb(0x2d, 0x30, 0x3d);
    pub const PANEL_SHADOW: Color = Color::rgb(0x10, 0x10, 0x10);
}

/// Color and width of a stroked line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
}

impl LineStyle {
    pub const fn new(color: Color, width: f32) -> LineStyle {
        LineStyle { color, width }
    }
}

/// Font selection for labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub family: String,
    pub size: f32,
    pub color: Color,
    pub weight: u16,
    pub italic: bool,
}

impl Default for FontStyle {
    fn default() -> FontStyle {
        FontStyle {
            family: "Fira Code".to_string(),
            size: 20.0,
            color: colors::DARK_DEEP,
            weight: 400,
            italic: false,
        }
    }
}

/// Rounded panel with an optional drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub background: Color,
    pub corner_radius: f32,
    /// Edge-fade fraction for faded fills and curves, around 0.1.
    pub fade: f32,
    pub shadow: Color,
    pub shadow_offset: Vec2,
    pub shadow_blur: u32,
}

impl Default for PanelStyle {
    fn default() -> PanelStyle {
        PanelStyle {
            background: Color::WHITE,
            corner_radius: 10.0,
            fade: 0.1,
            shadow: Color::rgb(0xd0, 0xd0, 0xd0),
            shadow_offset: Vec2::new(5.0, 5.0),
            shadow_blur: 5,
        }
    }
}

/// Two-tier circle mark: a filled dot inside a thin ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub fill: Color,
    pub radius: f32,
    pub ring: Color,
    pub ring_radius: f32,
    pub ring_width: f32,
}

impl Default for MarkStyle {
    fn default() -> MarkStyle {
        MarkStyle {
            fill: Color::rgb(0x3e, 0x3f, 0x4c),
            radius: 5.0,
            ring: colors::DARK_DEEP,
            ring_radius: 25.0,
            ring_width: 1.5,
        }
    }
}

/// Everything a math plot draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct MathStyle {
    pub grid: LineStyle,
    pub grid_large: LineStyle,
    pub axis: LineStyle,
    pub curve: LineStyle,
    pub segment: LineStyle,
    pub endpoint: Color,
    pub endpoint_radius: f32,
    pub mark: MarkStyle,
}

impl Default for MathStyle {
    fn default() -> MathStyle {
        MathStyle {
            grid: LineStyle::new(Color::rgb(0xe8, 0xe8, 0xe8), 1.0),
            grid_large: LineStyle::new(Color::rgb(0xd8, 0xd8, 0xe8), 1.0),
            axis: LineStyle::new(Color::rgb(0xa8, 0xa8, 0xa8), 2.0),
            curve: LineStyle::new(colors::KLEIN_BLUE, 2.5),
            segment: LineStyle::new(colors::DARK_DEEP, 3.0),
            endpoint: Color::rgb(0xb1, 0x3c, 0x45),
            endpoint_radius: 5.0,
            mark: MarkStyle::default(),
        }
    }
}

/// Top-level style bundle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub panel: PanelStyle,
    pub math: MathStyle,
    pub font: FontStyle,
}

impl Style {
    /// Surface background; panels layer their own background on top.
    pub fn background(&self) -> Color {
        self.panel.background
    }
}

// ============================================================================
// Tests
// ============================================================================
