//! Conversion from CIE 1931 XYZ to linear RGB.

/// XYZ to linear RGB, with Rec.709/sRGB primaries and a D65 whitepoint.
///
/// Older versions of the skydome tool used `1.5070` instead of `1.0570` for
/// the Z coefficient of blue.  That tints D65 white about 49% blue, so images
/// from this version have less blue than the ones those versions made.
pub const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2410, -1.5374, -0.4986],
    [-0.9692, 1.8760, 0.0416],
    [0.0556, -0.2040, 1.0570],
];

#[inline]
pub fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    transform(&XYZ_TO_RGB, xyz)
}

#[inline]
fn transform(matrix: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        matrix[0][0] * v[0] + matrix[0][1] * v[1] + matrix[0][2] * v[2],
        matrix[1][0] * v[0] + matrix[1][1] * v[1] + matrix[1][2] * v[2],
        matrix[2][0] * v[0] + matrix[2][1] * v[1] + matrix[2][2] * v[2],
    ]
}
