use crate::image_pipeline::debayer::sampler::{EdgePolicy, sample};
use crate::image_pipeline::debayer::types::{BayerPhase, MosaicView, to_byte};

/// Bilinear reconstruction of a single pixel from its 3x3 neighbourhood.
///
/// The centre keeps its own sample; the two missing colours are averages of the
/// orthogonal, diagonal, horizontal or vertical neighbours depending on the phase.
pub fn demosaic_pixel(view: &MosaicView<'_>, x: usize, y: usize) -> [u8; 4] {
    let (xi, yi) = (x as isize, y as isize);
    let at = |dx: isize, dy: isize| sample(view, xi + dx, yi + dy, EdgePolicy::Clamp);

    let center = at(0, 0);
    let top = at(0, -1);
    let bottom = at(0, 1);
    let left = at(-1, 0);
    let right = at(1, 0);
    let top_left = at(-1, -1);
    let top_right = at(1, -1);
    let bottom_left = at(-1, 1);
    let bottom_right = at(1, 1);

    let cross = (top + bottom + left + right) * 0.25;
    let diagonal = (top_left + top_right + bottom_left + bottom_right) * 0.25;
    let horizontal = (left + right) * 0.5;
    let vertical = (top + bottom) * 0.5;

    let (r, g, b) = match BayerPhase::at(x, y) {
        BayerPhase::Red => (center, cross, diagonal),
        BayerPhase::GreenOnRedRow => (horizontal, center, vertical),
        BayerPhase::GreenOnBlueRow => (vertical, center, horizontal),
        BayerPhase::Blue => (diagonal, cross, center),
    };

    [to_byte(r), to_byte(g), to_byte(b), 255]
}
