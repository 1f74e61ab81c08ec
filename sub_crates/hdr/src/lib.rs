//! Writes Radiance .hdr (RGBE) image files.

mod error;
pub mod rle;
pub mod trifloat;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub use error::WriteError;
pub use rle::RleMode;

const DEFAULT_COMMENT: &str = "Made with 100% pure HDR Shop";

#[derive(Debug, Clone, PartialEq)]
pub struct WriteOptions {
    /// Free-form text for the header's comment line, without the
    /// leading "#".
    pub comment: String,
    pub rle: RleMode,
}

impl Default for WriteOptions {
    fn default() -> WriteOptions {
        WriteOptions {
            comment: DEFAULT_COMMENT.into(),
            rle: RleMode::Literal,
        }
    }
}

/// A linear RGB pixel that can be quantized to RGBE.
pub trait RgbePixel: Copy {
    fn to_rgbe(self) -> [u8; 4];
}

impl RgbePixel for [f32; 3] {
    #[inline(always)]
    fn to_rgbe(self) -> [u8; 4] {
        trifloat::encode(self)
    }
}

impl RgbePixel for [f64; 3] {
    #[inline(always)]
    fn to_rgbe(self) -> [u8; 4] {
        trifloat::encode_f64(self)
    }
}

/// Writes `image` as a run-length encoded .hdr file to `out`.
///
/// `image` is row-major with `width * height` pixels.  Rows are written
/// from the last to the first, so row 0 is the bottom row of the image as
/// viewed.  Pixel components must be non-negative and non-NaN.
///
/// Stops at the first failed write.  Whatever was written up to that point
/// stays in `out`.
pub fn write_hdr<W: Write, P: RgbePixel>(
    out: &mut W,
    image: &[P],
    width: usize,
    height: usize,
    options: &WriteOptions,
) -> Result<(), WriteError> {
    validate_input(image, width, height)?;
    if width < rle::MIN_WIDTH {
        tracing::warn!(
            "Writing a {} pixel wide image: readers may reject run-length encoded scanlines narrower than {} pixels.",
            width,
            rle::MIN_WIDTH
        );
    }

    let comment = options.comment.replace(|c: char| c == '\n' || c == '\r', " ");
    out.write_all(b"#?RADIANCE\n")?;
    out.write_all(format!("# {}\n", comment).as_bytes())?;
    out.write_all(b"FORMAT=32-bit_rle_rgbe\n")?;
    out.write_all(b"EXPOSURE=          1.0000000000000\n\n")?;
    out.write_all(format!("-Y {} +X {}\n", height, width).as_bytes())?;

    let mut scanline = Vec::with_capacity(width);
    let mut bytes = Vec::with_capacity(rle::literal_scanline_len(width));
    for row in image.chunks_exact(width).rev() {
        scanline.clear();
        scanline.extend(row.iter().map(|pixel| pixel.to_rgbe()));

        bytes.clear();
        rle::encode_scanline(&scanline, options.rle, &mut bytes);
        out.write_all(&bytes)?;
    }
    out.flush()?;

    tracing::debug!("Wrote {}x{} hdr image.", width, height);

    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `image` to it.
///
/// The input is validated before the file is touched, so nothing is
/// created for degenerate input.
pub fn save_hdr<P: AsRef<Path>, T: RgbePixel>(
    path: P,
    image: &[T],
    width: usize,
    height: usize,
    options: &WriteOptions,
) -> Result<(), WriteError> {
    let path = path.as_ref();
    validate_input(image, width, height)?;

    let file = File::create(path).map_err(|e| WriteError::PathUnwritable {
        path: path.into(),
        source: e,
    })?;
    let mut out = BufWriter::new(file);
    write_hdr(&mut out, image, width, height, options)
}

fn validate_input<P>(image: &[P], width: usize, height: usize) -> Result<(), WriteError> {
    if width == 0 || height == 0 {
        return Err(WriteError::DegenerateInput(format!(
            "image dimensions must be at least 1x1, but got {}x{}.",
            width, height
        )));
    }
    if width > rle::MAX_WIDTH {
        return Err(WriteError::DegenerateInput(format!(
            "image width {} exceeds the maximum of {} for run-length encoded scanlines.",
            width,
            rle::MAX_WIDTH
        )));
    }
    if width.checked_mul(height) != Some(image.len()) {
        return Err(WriteError::DegenerateInput(format!(
            "a {}x{} image needs {} pixels, but {} were given.",
            width,
            height,
            width.saturating_mul(height),
            image.len()
        )));
    }

    Ok(())
}
