//! Box blur used for panel drop shadows.
//!
//! Three box passes approximate a gaussian closely enough for soft
//! shadows; the requested radius is split across the passes, so the
//! combined support stays at the nominal radius. Pixels are premultiplied
//! RGBA, so each channel can be blurred independently.

use tiny_skia::Pixmap;

/// Blur the pixmap in place with the given radius. A radius of zero is a
/// no-op.
pub fn blur(pixmap: &mut Pixmap, radius: u32) {
    let w = pixmap.width() as usize;
    let h = pixmap.height() as usize;
    if radius == 0 || w == 0 || h == 0 {
        return;
    }
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];
    for r in pass_radii(radius) {
        if r == 0 {
            continue;
        }
        pass_horizontal(data, &mut scratch, w, h, r);
        pass_vertical(&scratch, data, w, h, r);
    }
}

/// Per-pass radii summing to the requested radius.
fn pass_radii(radius: u32) -> [usize; 3] {
    let base = (radius / 3) as usize;
    let rem = (radius % 3) as usize;
    [base + usize::from(rem > 0), base + usize::from(rem > 1), base]
}

/// Sliding-window box average along rows, edges clamped.
fn pass_horizontal(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize) {
    let window = (2 * r + 1) as u32;
    for y in 0..h {
        let row = y * w * 4;
        let mut sum = [0u32; 4];
        for i in -(r as isize)..=(r as isize) {
            let x = i.clamp(0, w as isize - 1) as usize;
            for c in 0..4 {
                sum[c] += src[row + x * 4 + c] as u32;
            }
        }
        for x in 0..w {
            for c in 0..4 {
                dst[row + x * 4 + c] = (sum[c] / window) as u8;
            }
            let add = (x + r + 1).min(w - 1);
            let sub = x.saturating_sub(r);
            for c in 0..4 {
                sum[c] += src[row + add * 4 + c] as u32;
                sum[c] -= src[row + sub * 4 + c] as u32;
            }
        }
    }
}

/// Sliding-window box average along columns, edges clamped.
fn pass_vertical(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize) {
    let window = (2 * r + 1) as u32;
    let stride = w * 4;
    for x in 0..w {
        let col = x * 4;
        let mut sum = [0u32; 4];
        for i in -(r as isize)..=(r as isize) {
            let y = i.clamp(0, h as isize - 1) as usize;
            for c in 0..4 {
                sum[c] += src[y * stride + col + c] as u32;
            }
        }
        for y in 0..h {
            for c in 0..4 {
                dst[y * stride + col + c] = (sum[c] / window) as u8;
            }
            let add = (y + r + 1).min(h - 1);
            let sub = y.saturating_sub(r);
            for c in 0..4 {
                sum[c] += src[add * stride + col + c] as u32;
                sum[c] -= src[sub * stride + col + c] as u32;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
