//! Nested coordinate frames.
//!
//! A [`Frame`] maps a local math space (y pointing up) into the device
//! space of a raster surface (y pointing down, origin at the top-left).
//! Frames form a tree: the root frame spans the whole surface one unit
//! per pixel, and each child frame is placed inside its parent with its
//! own origin and per-axis scale.
//!
//! All transforms are affine and cached in both directions, so mapping a
//! point either way is a single matrix application.

use glam::{Affine2, Vec2};

use crate::errors::CoordError;

/// A coordinate frame in the frame tree.
///
/// Cheap to clone; all fields are plain matrices and vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Math-space extent of this frame.
    size: Vec2,
    math_to_root: Affine2,
    root_to_math: Affine2,
    /// Shared y-flip of the surface; identical for every frame of a tree.
    root_to_device: Affine2,
    device_to_root: Affine2,
    math_to_device: Affine2,
    device_to_math: Affine2,
    /// Device position of the frame's bottom-left corner.
    device_lb: Vec2,
    /// Device extent of the frame, both components positive.
    device_size: Vec2,
}

impl Frame {
    /// The root frame of a `width` x `height` surface.
    ///
    /// Root math space uses one unit per pixel with y up, so math `(0, 0)`
    /// is the bottom-left pixel of the surface.
    pub fn root(width: f32, height: f32) -> Frame {
        let root_to_device =
            Affine2::from_translation(Vec2::new(0.0, height)) * Affine2::from_scale(Vec2::new(1.0, -1.0));
        Frame {
            size: Vec2::new(width, height),
            math_to_root: Affine2::IDENTITY,
            root_to_math: Affine2::IDENTITY,
            root_to_device,
            device_to_root: root_to_device.inverse(),
            math_to_device: root_to_device,
            device_to_math: root_to_device.inverse(),
            device_lb: Vec2::new(0.0, height),
            device_size: Vec2::new(width, height),
        }
    }

    /// Derive a child frame.
    ///
    /// `position` is the parent-math point of the child's bottom-left
    /// corner, `size` its extent in parent-math units. `origin` offsets
    /// the child's math origin from `position`, and `scale` stretches one
    /// child unit to that many parent units per axis.
    ///
    /// Fails with [`CoordError::ZeroScale`] when either scale component is
    /// zero, since the frame transform would not be invertible.
    pub fn child(
        &self,
        position: Vec2,
        size: Vec2,
        origin: Vec2,
        scale: Vec2,
    ) -> Result<Frame, CoordError> {
        if scale.x * scale.y == 0.0 {
            return Err(CoordError::ZeroScale {
                x: scale.x,
                y: scale.y,
            });
        }
        let shift = position + origin;
        let math_to_root =
            self.math_to_root * Affine2::from_translation(shift) * Affine2::from_scale(scale);
        let root_to_math = Affine2::from_scale(scale.recip())
            * Affine2::from_translation(-shift)
            * self.root_to_math;
        Ok(Frame {
            size,
            math_to_root,
            root_to_math,
            root_to_device: self.root_to_device,
            device_to_root: self.device_to_root,
            math_to_device: self.root_to_device * math_to_root,
            device_to_math: root_to_math * self.device_to_root,
            device_lb: self.math_to_device(position),
            device_size: self.to_device_size(size).abs(),
        })
    }

    /// Map a math point of this frame to device pixels.
    pub fn math_to_device(&self, p: Vec2) -> Vec2 {
        self.math_to_device.transform_point2(p)
    }

    /// Map a device pixel position back into this frame's math space.
    pub fn device_to_math(&self, p: Vec2) -> Vec2 {
        self.device_to_math.transform_point2(p)
    }

    /// Map a math-space extent to device pixels.
    ///
    /// Extents go through the root mapping only, which keeps a positive
    /// math height positive in device terms.
    pub fn to_device_size(&self, v: Vec2) -> Vec2 {
        self.math_to_root.transform_vector2(v)
    }

    /// Map a device-space extent back to math units.
    pub fn to_math_size(&self, v: Vec2) -> Vec2 {
        self.root_to_math.transform_vector2(v)
    }

    /// Map a run of math points to device pixels.
    pub fn map_points(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|&p| self.math_to_device(p)).collect()
    }

    /// Math-space extent of this frame.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Device position of the frame's bottom-left corner.
    pub fn device_lb(&self) -> Vec2 {
        self.device_lb
    }

    /// Device position of the frame's top-left corner.
    pub fn device_lt(&self) -> Vec2 {
        Vec2::new(self.device_lb.x, self.device_lb.y - self.device_size.y)
    }

    /// Device extent of this frame.
    pub fn device_size(&self) -> Vec2 {
        self.device_size
    }
}

// ============================================================================
// Tests
// ============================================================================
