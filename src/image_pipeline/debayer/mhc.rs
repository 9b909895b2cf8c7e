use crate::image_pipeline::debayer::sampler::{EdgePolicy, sample};
use crate::image_pipeline::debayer::types::{BayerPhase, MosaicView, to_byte};

/// Malvar-He-Cutler reconstruction of a single pixel from its 5x5 neighbourhood.
///
/// Each missing colour is a linear estimate corrected by the local Laplacian of the
/// centre colour, using the published 1/8-scaled coefficients:
///
/// * G at R/B sites: `4c + 2*sum(orthogonal) - sum(distance 2)`
/// * B at R sites and R at B sites: `6c + 2*sum(diagonal) - 1.5*sum(distance 2)`
/// * R and B at G sites: `4c + 2*(neighbour pair) - 0.5*sum(distance 2)`
///
/// Borders are mirrored about the edge pixel.
pub fn demosaic_pixel(view: &MosaicView<'_>, x: usize, y: usize) -> [u8; 4] {
    let (xi, yi) = (x as isize, y as isize);
    let at = |dx: isize, dy: isize| sample(view, xi + dx, yi + dy, EdgePolicy::Mirror);

    let c = at(0, 0);
    let n = at(0, -1);
    let s = at(0, 1);
    let w = at(-1, 0);
    let e = at(1, 0);
    let nw = at(-1, -1);
    let ne = at(1, -1);
    let sw = at(-1, 1);
    let se = at(1, 1);
    let n2 = at(0, -2);
    let s2 = at(0, 2);
    let w2 = at(-2, 0);
    let e2 = at(2, 0);

    let far = n2 + s2 + w2 + e2;
    let cross = (4.0 * c + 2.0 * (n + s + w + e) - far) / 8.0;
    let diagonal = (6.0 * c + 2.0 * (nw + ne + sw + se) - 1.5 * far) / 8.0;
    let pair = |a: f32, b: f32| (4.0 * c + 2.0 * (a + b) - 0.5 * far) / 8.0;

    let (r, g, b) = match BayerPhase::at(x, y) {
        BayerPhase::Red => (c, cross, diagonal),
        BayerPhase::GreenOnRedRow => (pair(w, e), c, pair(n, s)),
        BayerPhase::GreenOnBlueRow => (pair(n, s), c, pair(w, e)),
        BayerPhase::Blue => (diagonal, cross, c),
    };

    [to_byte(r), to_byte(g), to_byte(b), 255]
}
