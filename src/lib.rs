//! durer, a small 2D mathematical plotting library.
//!
//! Figures are drawn through nested coordinate frames: math space keeps y
//! pointing up while the raster surface runs y down, and every frame maps
//! points both ways through cached affine transforms. The [`Canvas`]
//! facade layers grids, axes, labels, panels, curves and markers onto a
//! shared surface; [`helper::create_math_canvas`] assembles the standard
//! figure in one call.
//!
//! ```no_run
//! use durer::helper::{create_math_canvas, MathCanvasOptions, StyledExt};
//! use durer::style::Style;
//!
//! # fn main() -> Result<(), durer::errors::CanvasError> {
//! let style = Style::default();
//! let math = create_math_canvas(800, 600, &MathCanvasOptions::default(), &style)?;
//! math.draw_styled_function(&style, |x| x * x, -3.0, 3.0, true);
//! math.save_png("parabola.png");
//! # Ok(())
//! # }
//! ```

pub mod blur;
pub mod canvas;
pub mod coord;
pub mod errors;
pub mod helper;
pub mod log;
pub mod sampling;
pub mod shapes;
pub mod style;
pub mod surface;
pub mod types;

pub use canvas::{Canvas, LabelOptions, LineOptions};
pub use coord::Frame;
pub use glam::Vec2;
pub use shapes::{Arrow, Shape, ShapeKind, ShapeOutline, Square};
pub use style::Style;
pub use surface::{FadePaint, Pen, Surface};
pub use types::{Color, IRect, anchor};
