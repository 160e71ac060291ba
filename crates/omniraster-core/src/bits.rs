//! Bit twiddling and integer scaling
//!
//! Everything the renderers need below the pixel level: an 8-bit reversal
//! table, bit unpacking helpers, and nearest-neighbor upscaling by integer
//! factors so that non-square hardware pixels come out with the right aspect.

use crate::types::BitmapData;

const fn build_bit_reverse_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).reverse_bits();
        i += 1;
    }
    table
}

/// `BIT_REVERSE_TABLE[b]` is `b` with its bit order reversed
pub static BIT_REVERSE_TABLE: [u8; 256] = build_bit_reverse_table();

/// Reverse the bit order of a byte through the lookup table
#[inline]
pub fn bit_reverse(b: u8) -> u8 {
    BIT_REVERSE_TABLE[b as usize]
}

/// Unpack a byte into eight 0/1 values, most significant bit first
#[inline]
pub fn unpack_bits(b: u8) -> [u8; 8] {
    [
        (b >> 7) & 1,
        (b >> 6) & 1,
        (b >> 5) & 1,
        (b >> 4) & 1,
        (b >> 3) & 1,
        (b >> 2) & 1,
        (b >> 1) & 1,
        b & 1,
    ]
}

/// Nearest-neighbor upscale by `sh` vertically and `sw` horizontally
///
/// Output pixel `(y, x)` is source pixel `(y / sh, x / sw)`. A 1×1 scale
/// hands the input back untouched.
///
/// # Panics
///
/// Panics if either factor is zero. Scale factors come from renderer
/// descriptors, so a zero here is a programming error rather than bad input.
pub fn intscale(src: BitmapData, sh: usize, sw: usize) -> BitmapData {
    assert!(
        sh >= 1 && sw >= 1,
        "intscale: scale factors must be at least 1, got {}x{}",
        sh,
        sw
    );
    if sh == 1 && sw == 1 {
        return src;
    }
    match (sh, sw) {
        (2, 2) => scale_square::<2>(&src),
        (3, 3) => scale_square::<3>(&src),
        (4, 4) => scale_square::<4>(&src),
        _ => scale_general(&src, sh, sw),
    }
}

/// Width-only variant of [`intscale`]
pub fn intwscale(src: BitmapData, sw: usize) -> BitmapData {
    intscale(src, 1, sw)
}

fn scale_general(src: &BitmapData, sh: usize, sw: usize) -> BitmapData {
    let bpp = src.format.bytes_per_pixel();
    let width = src.width as usize;
    let height = src.height as usize;
    let out_width = width * sw;
    let out_row = out_width * bpp;
    let mut data = Vec::with_capacity(out_row * height * sh);

    for y in 0..height {
        let row_start = data.len();
        let src_row = &src.data[y * width * bpp..(y + 1) * width * bpp];
        for pixel in src_row.chunks_exact(bpp) {
            for _ in 0..sw {
                data.extend_from_slice(pixel);
            }
        }
        for _ in 1..sh {
            data.extend_from_within(row_start..row_start + out_row);
        }
    }

    BitmapData {
        width: out_width as u32,
        height: (height * sh) as u32,
        format: src.format,
        data,
    }
}

// Square factors write each source pixel into an N×N block with direct
// strided stores instead of row duplication.
fn scale_square<const N: usize>(src: &BitmapData) -> BitmapData {
    let bpp = src.format.bytes_per_pixel();
    let width = src.width as usize;
    let height = src.height as usize;
    let out_width = width * N;
    let stride = out_width * bpp;
    let mut data = vec![0u8; stride * height * N];

    for y in 0..height {
        for x in 0..width {
            let s = (y * width + x) * bpp;
            let pixel = &src.data[s..s + bpp];
            let base = (y * N) * stride + x * N * bpp;
            for dy in 0..N {
                let row = base + dy * stride;
                for dx in 0..N {
                    let d = row + dx * bpp;
                    data[d..d + bpp].copy_from_slice(pixel);
                }
            }
        }
    }

    BitmapData {
        width: out_width as u32,
        height: (height * N) as u32,
        format: src.format,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BitmapFormat;

    fn gradient(width: u32, height: u32) -> BitmapData {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x * 16 + y) as u8]);
            }
        }
        BitmapData {
            width,
            height,
            format: BitmapFormat::Rgb8,
            data,
        }
    }

    #[test]
    fn test_bit_reverse_known_values() {
        assert_eq!(bit_reverse(0x01), 0x80);
        assert_eq!(bit_reverse(0x7f), 0xfe);
        assert_eq!(bit_reverse(0xf0), 0x0f);
        assert_eq!(bit_reverse(0xa5), 0xa5);
    }

    #[test]
    fn test_unpack_bits_msb_first() {
        assert_eq!(unpack_bits(0b1010_0001), [1, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_intscale_identity_returns_input() {
        let src = gradient(3, 2);
        let out = intscale(src.clone(), 1, 1);
        assert_eq!(out, src);
    }

    #[test]
    fn test_intscale_matches_nearest_neighbor() {
        let src = gradient(5, 3);
        for (sh, sw) in [(2, 2), (3, 3), (4, 4), (2, 1), (1, 4), (2, 3)] {
            let out = intscale(src.clone(), sh, sw);
            assert_eq!(out.width, 5 * sw as u32);
            assert_eq!(out.height, 3 * sh as u32);
            for y in 0..out.height {
                for x in 0..out.width {
                    assert_eq!(
                        out.pixel(x, y),
                        src.pixel(x / sw as u32, y / sh as u32),
                        "pixel ({x},{y}) at scale {sh}x{sw}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_intwscale_only_widens() {
        let src = gradient(2, 2);
        let out = intwscale(src, 2);
        assert_eq!((out.width, out.height), (4, 2));
        assert_eq!(out.pixel(1, 1), out.pixel(0, 1));
    }

    #[test]
    #[should_panic(expected = "scale factors must be at least 1")]
    fn test_intscale_rejects_zero() {
        let _ = intscale(gradient(1, 1), 0, 1);
    }
}
