//! Error types with diagnostics using miette

use thiserror::Error;

use miette::Diagnostic;

// ============================================================================
// Coordinate Errors
// ============================================================================

/// Errors from building coordinate frames
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CoordError {
    #[error("degenerate frame scale: ({x}, {y})")]
    #[diagnostic(
        code(durer::coord::zero_scale),
        help("both scale components must be non-zero for the frame transform to be invertible")
    )]
    ZeroScale { x: f32, y: f32 },
}

// ============================================================================
// Surface Errors
// ============================================================================

/// Errors from the raster surface
#[derive(Error, Diagnostic, Debug)]
pub enum SurfaceError {
    #[error("invalid surface dimensions: {width}x{height}")]
    #[diagnostic(code(durer::surface::invalid_dimensions))]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    #[diagnostic(code(durer::surface::png_encode))]
    PngEncode(String),
}

// ============================================================================
// Canvas Errors
// ============================================================================

/// Errors surfaced through the canvas facade
#[derive(Error, Diagnostic, Debug)]
pub enum CanvasError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Coord(#[from] CoordError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Surface(#[from] SurfaceError),
}
