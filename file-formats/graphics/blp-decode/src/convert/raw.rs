use super::bounds::{check_size, pixel_count};
use crate::error::Result;
use crate::types::{BgraPixel, DenseBuffer};

/// Decode interleaved B, G, R, A bytes
pub fn decode_raw_bgra(input: &[u8], width: u32, height: u32) -> Result<DenseBuffer> {
    let n = pixel_count(width, height);
    check_size(input, n.and_then(|n| n.checked_mul(4)))?;
    let n = n.unwrap_or_default();
    let pixels = input
        .chunks_exact(4)
        .take(n)
        .map(|chunk| BgraPixel::from_bgra_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_single_pixel() {
        let buffer = decode_raw_bgra(&[0x10, 0x20, 0x30, 0x40], 1, 1).unwrap();
        let pixel = buffer.pixels[0];
        assert_eq!((pixel.r, pixel.g, pixel.b, pixel.a), (0x30, 0x20, 0x10, 0x40));
    }

    #[test]
    fn test_extra_bytes_ignored() {
        let input: Vec<u8> = (0..12).collect();
        let buffer = decode_raw_bgra(&input, 2, 1).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.to_bgra_bytes(), (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn test_truncated() {
        assert!(decode_raw_bgra(&[0; 7], 2, 1).is_err());
    }

    #[test]
    fn test_huge_dimensions_are_rejected() {
        let result = decode_raw_bgra(&[0x10, 0x20, 0x30, 0x40], u32::MAX, u32::MAX);
        assert!(matches!(
            result,
            Err(Error::TruncatedMipmap { actual: 4, .. })
        ));
    }
}
