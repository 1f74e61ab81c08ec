//! Run-length encoding of RGBE scanlines, "new style" as Radiance calls it.
//!
//! Each scanline starts with the marker `[2, 2, width_hi, width_lo]` and is
//! followed by the R, G, B and E bytes of every pixel, each channel stored as
//! its own plane.  A plane is a sequence of chunks: a count byte `n <= 127`
//! followed by `n` literal bytes, or a count byte `128 + n` followed by a
//! single byte that is repeated `n` times.

/// Smallest width Radiance readers will decode as run-length encoded.
pub const MIN_WIDTH: usize = 8;

/// Largest width the scanline marker can express.
pub const MAX_WIDTH: usize = 0x7fff;

/// Max bytes in one chunk, for both literal and repeat chunks.
const MAX_CHUNK: usize = 127;

/// Shortest run that is worth a repeat chunk on its own.
const MIN_RUN: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RleMode {
    /// Literal chunks only.  Byte-for-byte what the classic skydome
    /// writer produced, but no actual compression.
    Literal,

    /// Repeat chunks wherever a run pays off, literal chunks elsewhere.
    Adaptive,
}

impl Default for RleMode {
    fn default() -> Self {
        RleMode::Literal
    }
}

/// Appends the encoded scanline to `out`.
///
/// Doesn't validate `row.len()`.  Widths outside of
/// `[MIN_WIDTH, MAX_WIDTH]` still produce bytes, just not ones every
/// reader will accept.
pub fn encode_scanline(row: &[[u8; 4]], mode: RleMode, out: &mut Vec<u8>) {
    let width = row.len();
    out.extend_from_slice(&[2, 2, ((width >> 8) & 0xff) as u8, (width & 0xff) as u8]);

    let mut plane = Vec::with_capacity(width);
    for channel in 0..4 {
        plane.clear();
        plane.extend(row.iter().map(|pixel| pixel[channel]));
        match mode {
            RleMode::Literal => encode_plane_literal(&plane, out),
            RleMode::Adaptive => encode_plane_adaptive(&plane, out),
        }
    }
}

/// Byte length of a scanline encoded with `RleMode::Literal`.
pub fn literal_scanline_len(width: usize) -> usize {
    let chunks = (width + MAX_CHUNK - 1) / MAX_CHUNK;
    4 + 4 * (chunks + width)
}

fn encode_plane_literal(plane: &[u8], out: &mut Vec<u8>) {
    for chunk in plane.chunks(MAX_CHUNK) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

fn encode_plane_adaptive(plane: &[u8], out: &mut Vec<u8>) {
    let len = plane.len();
    let mut i = 0;
    while i < len {
        // Find the next run that's long enough to encode on its own.
        let mut run_start = i;
        let mut run_len = 0;
        while run_start < len {
            run_len = run_length(&plane[run_start..]);
            if run_len >= MIN_RUN {
                break;
            }
            run_start += run_len;
        }

        // A short run that fills the whole gap is still cheaper as a repeat.
        let gap = run_start - i;
        if gap > 1 && gap < MIN_RUN && plane[i..run_start].iter().all(|&b| b == plane[i]) {
            out.push((128 + gap) as u8);
            out.push(plane[i]);
            i = run_start;
        }

        while i < run_start {
            let n = (run_start - i).min(MAX_CHUNK);
            out.push(n as u8);
            out.extend_from_slice(&plane[i..(i + n)]);
            i += n;
        }

        if run_len >= MIN_RUN {
            out.push((128 + run_len) as u8);
            out.push(plane[run_start]);
            i = run_start + run_len;
        }
    }
}

/// Length of the run of identical bytes at the start of `bytes`, capped at
/// what fits in one chunk.
fn run_length(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take(MAX_CHUNK)
        .take_while(|&&b| b == bytes[0])
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes one encoded scanline back into pixels, panicking on anything
    /// malformed.  Returns the pixels and the number of bytes consumed.
    fn decode_scanline(bytes: &[u8]) -> (Vec<[u8; 4]>, usize) {
        assert_eq!(&bytes[0..2], &[2, 2]);
        let width = ((bytes[2] as usize) << 8) | bytes[3] as usize;
        let mut pixels = vec![[0u8; 4]; width];
        let mut cursor = 4;
        for channel in 0..4 {
            let mut x = 0;
            while x < width {
                let count = bytes[cursor] as usize;
                cursor += 1;
                if count > 128 {
                    let n = count - 128;
                    assert!(x + n <= width);
                    for pixel in &mut pixels[x..(x + n)] {
                        pixel[channel] = bytes[cursor];
                    }
                    cursor += 1;
                    x += n;
                } else {
                    assert!(count > 0 && x + count <= width);
                    for pixel in &mut pixels[x..(x + count)] {
                        pixel[channel] = bytes[cursor];
                        cursor += 1;
                    }
                    x += count;
                }
            }
        }
        (pixels, cursor)
    }

    fn gradient_row(width: usize) -> Vec<[u8; 4]> {
        (0..width)
            .map(|i| [(i % 256) as u8, (i * 7 % 256) as u8, 3, 128])
            .collect()
    }

    #[test]
    fn marker() {
        let mut out = Vec::new();
        encode_scanline(&gradient_row(300), RleMode::Literal, &mut out);
        assert_eq!(&out[0..4], &[0x02, 0x02, 0x01, 0x2c]);
    }

    #[test]
    fn literal_single_pixel() {
        let mut out = Vec::new();
        encode_scanline(&[[128, 64, 0, 129]], RleMode::Literal, &mut out);
        assert_eq!(out, vec![2, 2, 0, 1, 1, 128, 1, 64, 1, 0, 1, 129]);
    }

    #[test]
    fn literal_layout() {
        let row = gradient_row(10);
        let mut out = Vec::new();
        encode_scanline(&row, RleMode::Literal, &mut out);

        assert_eq!(out[4], 10);
        let reds: Vec<u8> = row.iter().map(|p| p[0]).collect();
        assert_eq!(&out[5..15], &reds[..]);
        assert_eq!(out[15], 10);
        assert_eq!(out.len(), literal_scanline_len(10));
    }

    #[test]
    fn literal_chunks_cap_at_127() {
        let row = gradient_row(300);
        let mut out = Vec::new();
        encode_scanline(&row, RleMode::Literal, &mut out);

        // 300 = 127 + 127 + 46
        assert_eq!(out[4], 127);
        assert_eq!(out[4 + 128], 127);
        assert_eq!(out[4 + 256], 46);
        assert_eq!(out[4 + 256 + 47], 127);
    }

    #[test]
    fn literal_length_invariant() {
        for &width in &[1usize, 7, 8, 126, 127, 128, 254, 255, 1000, MAX_WIDTH] {
            let mut out = Vec::new();
            encode_scanline(&gradient_row(width), RleMode::Literal, &mut out);
            let chunks = (width + 126) / 127;
            assert_eq!(out.len(), 4 + 4 * (chunks + width));
            assert_eq!(out.len(), literal_scanline_len(width));
        }
    }

    #[test]
    fn literal_decodes() {
        let row = gradient_row(513);
        let mut out = Vec::new();
        encode_scanline(&row, RleMode::Literal, &mut out);
        let (decoded, consumed) = decode_scanline(&out);
        assert_eq!(decoded, row);
        assert_eq!(consumed, out.len());
    }

    #[test]
    fn adaptive_constant_row() {
        let row = vec![[10u8, 20, 30, 128]; 200];
        let mut out = Vec::new();
        encode_scanline(&row, RleMode::Adaptive, &mut out);

        // Each plane is one full run of 127 plus one run of 73.
        assert_eq!(out.len(), 4 + 4 * 4);
        assert_eq!(&out[4..8], &[255, 10, 128 + 73, 10]);
        let (decoded, _) = decode_scanline(&out);
        assert_eq!(decoded, row);
    }

    #[test]
    fn adaptive_short_run_before_long_run() {
        let plane = [5u8, 5, 9, 9, 9, 9, 9, 1, 2];
        let mut out = Vec::new();
        encode_plane_adaptive(&plane, &mut out);
        assert_eq!(out, vec![130, 5, 133, 9, 2, 1, 2]);
    }

    #[test]
    fn adaptive_no_runs_is_literal() {
        let plane: Vec<u8> = (0..20).collect();
        let mut out = Vec::new();
        encode_plane_adaptive(&plane, &mut out);
        let mut literal = Vec::new();
        encode_plane_literal(&plane, &mut literal);
        assert_eq!(out, literal);
    }

    #[test]
    fn adaptive_decodes() {
        let mut row = gradient_row(400);
        for pixel in &mut row[50..180] {
            *pixel = [0, 0, 0, 0];
        }
        for pixel in &mut row[300..303] {
            *pixel = [1, 1, 1, 1];
        }
        let mut out = Vec::new();
        encode_scanline(&row, RleMode::Adaptive, &mut out);
        let (decoded, consumed) = decode_scanline(&out);
        assert_eq!(decoded, row);
        assert_eq!(consumed, out.len());
        assert!(out.len() < literal_scanline_len(400));
    }

    #[test]
    fn deterministic() {
        let row = gradient_row(777);
        for &mode in &[RleMode::Literal, RleMode::Adaptive] {
            let mut a = Vec::new();
            let mut b = Vec::new();
            encode_scanline(&row, mode, &mut a);
            encode_scanline(&row, mode, &mut b);
            assert_eq!(a, b);
        }
    }
}
