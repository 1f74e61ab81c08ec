//! Encoding/decoding for unsigned 32-bit trifloat numbers, a.k.a. RGBE.
//!
//! The encoding uses 8 bits of mantissa per number, and 8 bits for the shared
//! exponent.  The bit layout is [mantissa 1, mantissa 2, mantissa 3, exponent].
//! The exponent is stored as an unsigned integer with a bias of 128, so that
//! each number decodes as `(mantissa / 256) * 2^(exponent - 128)`.
//!
//! This is the pixel encoding of the Radiance .hdr image file format.

/// Values at or below this are encoded as black.
pub const UNDERFLOW_FLOOR: f32 = 1.0e-32;

const EXP_BIAS: i32 = 128;

/// Largest frexp-style exponent that still fits in the exponent byte.
const MAX_EXP: i32 = 255 - EXP_BIAS;

/// Calculates 2.0^exp using IEEE bit fiddling.
///
/// Only works for integer exponents in the range [-126, 127]
/// due to IEEE 32-bit float limits.
#[inline(always)]
fn fiddle_exp2(exp: i32) -> f32 {
    f32::from_bits(((exp + 127) as u32) << 23)
}

/// Calculates the exponent `e` of `n = m * 2^e` with `m` in `[0.5, 1.0)`,
/// the same exponent C's `frexp()` produces.
///
/// Only correct for normal numbers.  Everything above the underflow floor
/// is normal in 32-bit floats, which is all this module needs.
#[inline(always)]
fn fiddle_frexp_exp(n: f32) -> i32 {
    ((f32::to_bits(n) >> 23) & 0b1111_1111) as i32 - 126
}

/// Encodes three floating point values into an unsigned 32-bit trifloat.
///
/// Mantissas are truncated, not rounded, to stay bit-compatible with other
/// Radiance writers.  Values of `2^127` and up don't fit the exponent byte,
/// and saturate to an exponent of 255 instead of wrapping.
///
/// Warning: negative values and NaN's are _not_ supported by the trifloat
/// format.  There are debug-only assertions in place to catch such
/// values in the input floats.
#[inline]
pub fn encode(floats: [f32; 3]) -> [u8; 4] {
    debug_assert!(
        floats[0] >= 0.0
            && floats[1] >= 0.0
            && floats[2] >= 0.0
            && !floats[0].is_nan()
            && !floats[1].is_nan()
            && !floats[2].is_nan(),
        "trifloat::encode(): encoding to unsigned tri-floats only \
         works correctly for positive, non-NaN numbers, but the numbers passed \
         were: ({}, {}, {})",
        floats[0],
        floats[1],
        floats[2]
    );

    let largest = floats[0].max(floats[1].max(floats[2]));

    if largest <= UNDERFLOW_FLOOR {
        [0, 0, 0, 0]
    } else {
        // `m * 256 / largest` is exactly `2^(8 - e)`.
        let e = fiddle_frexp_exp(largest).min(MAX_EXP);
        let multiplier = fiddle_exp2(8 - e);
        let x = (floats[0] * multiplier).min(255.0) as u8;
        let y = (floats[1] * multiplier).min(255.0) as u8;
        let z = (floats[2] * multiplier).min(255.0) as u8;

        [x, y, z, (e + EXP_BIAS) as u8]
    }
}

/// Encodes three double precision values into an unsigned 32-bit trifloat.
///
/// Only the largest value is narrowed to 32 bits to pick the exponent.  The
/// mantissas are truncated from the full double precision values, which is
/// what the classic C `float`/`double` RGBE writers do, so the bytes match
/// theirs exactly.  Same input restrictions as `encode()`.
#[inline]
pub fn encode_f64(floats: [f64; 3]) -> [u8; 4] {
    debug_assert!(
        floats[0] >= 0.0
            && floats[1] >= 0.0
            && floats[2] >= 0.0
            && !floats[0].is_nan()
            && !floats[1].is_nan()
            && !floats[2].is_nan(),
        "trifloat::encode_f64(): encoding to unsigned tri-floats only \
         works correctly for positive, non-NaN numbers, but the numbers passed \
         were: ({}, {}, {})",
        floats[0],
        floats[1],
        floats[2]
    );

    let largest = floats[0].max(floats[1].max(floats[2])) as f32;

    // The floor is compared in double precision, as in C.
    if largest as f64 <= 1.0e-32 {
        [0, 0, 0, 0]
    } else {
        let e = fiddle_frexp_exp(largest).min(MAX_EXP);
        let multiplier = fiddle_exp2(8 - e) as f64;
        let x = (floats[0] * multiplier).min(255.0) as u8;
        let y = (floats[1] * multiplier).min(255.0) as u8;
        let z = (floats[2] * multiplier).min(255.0) as u8;

        [x, y, z, (e + EXP_BIAS) as u8]
    }
}

/// Decodes an unsigned 32-bit trifloat into three full floating point numbers.
///
/// This operation is lossless and cannot fail.
#[inline]
pub fn decode(trifloat: [u8; 4]) -> [f32; 3] {
    if trifloat[3] == 0 {
        return [0.0, 0.0, 0.0];
    }

    // Split the scale in two so that every exponent byte stays within the
    // range `fiddle_exp2()` handles.
    let e = trifloat[3] as i32 - EXP_BIAS - 8;
    let (m1, m2) = (fiddle_exp2(e / 2), fiddle_exp2(e - e / 2));

    [
        trifloat[0] as f32 * m1 * m2,
        trifloat[1] as f32 * m1 * m2,
        trifloat[2] as f32 * m1 * m2,
    ]
}
