use rayon::prelude::*;

use sky_model::{color::xyz_to_rgb, SkyModel};

use crate::projection::FisheyeProjection;

/// Renders the sky as a row-major, linear RGB image.
///
/// `projection.width` must be non-zero.  Pixels outside of the horizon
/// circle are black.  Colors outside of the RGB gamut are clipped to
/// non-negative values, since the hdr format can't store negative components.
///
/// Pixels stay in double precision so that quantization truncates the
/// exact model values.
pub fn render_skydome<M: SkyModel>(model: &M, projection: &FisheyeProjection) -> Vec<[f64; 3]> {
    let width = projection.width;
    let mut image = vec![[0.0f64; 3]; width * projection.height];

    image
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                if let Some(angles) = projection.angles(x, y) {
                    *pixel = to_pixel(xyz_to_rgb(model.tristimulus(angles.theta, angles.gamma)));
                }
            }
        });

    image
}

#[inline]
fn to_pixel(rgb: [f64; 3]) -> [f64; 3] {
    [rgb[0].max(0.0), rgb[1].max(0.0), rgb[2].max(0.0)]
}
