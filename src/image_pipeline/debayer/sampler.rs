//! Neighbourhood fetches that stay inside the image.
//!
//! The two kernels use different border rules and both are part of the output contract:
//! bilinear clamps to the edge, MHC reflects about the edge pixel.

use crate::image_pipeline::debayer::types::MosaicView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePolicy {
    /// `-1 -> 0`, `size -> size - 1`.
    Clamp,
    /// `-1 -> 1`, `size -> size - 2`, then clamped for tiny images.
    Mirror,
}

impl EdgePolicy {
    /// Maps a possibly out-of-range coordinate on an axis of length `size` (> 0) into range.
    #[inline]
    pub fn resolve(self, p: isize, size: usize) -> usize {
        let size = size as isize;
        let p = match self {
            EdgePolicy::Clamp => p,
            EdgePolicy::Mirror => {
                if p < 0 {
                    -p
                } else if p >= size {
                    2 * size - p - 2
                } else {
                    p
                }
            }
        };
        p.clamp(0, size - 1) as usize
    }
}

/// Normalized sample at `(x, y)` after applying `policy` on each axis independently.
#[inline]
pub fn sample(view: &MosaicView<'_>, x: isize, y: isize, policy: EdgePolicy) -> f32 {
    let sx = policy.resolve(x, view.width());
    let sy = policy.resolve(y, view.height());
    view.normalized(sx, sy)
}
