use super::bounds::{check_size, pixel_count};
use crate::error::{Error, Result};
use crate::types::{BgraPixel, DenseBuffer, PixelFormat};
use log::*;
use std::borrow::Cow;

/// Which compression algorithm the blocks are encoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockMode {
    /// DXT1 compression (BC1)
    Dxt1,
    /// DXT3 compression (BC2)
    Dxt3,
    /// DXT5 compression (BC3)
    Dxt5,
}

impl From<BlockMode> for texpresso::Format {
    fn from(v: BlockMode) -> texpresso::Format {
        match v {
            BlockMode::Dxt1 => texpresso::Format::Bc1,
            BlockMode::Dxt3 => texpresso::Format::Bc2,
            BlockMode::Dxt5 => texpresso::Format::Bc3,
        }
    }
}

impl BlockMode {
    /// Block mode for a DXT pixel format, `None` for other formats
    pub fn for_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Dxt1NoAlpha | PixelFormat::Dxt1Alpha1 => Some(BlockMode::Dxt1),
            PixelFormat::Dxt3Alpha4 | PixelFormat::Dxt3Alpha8 => Some(BlockMode::Dxt3),
            PixelFormat::Dxt5Alpha8 => Some(BlockMode::Dxt5),
            _ => None,
        }
    }

    /// Returns the block size in bytes
    pub fn block_size(&self) -> usize {
        match self {
            BlockMode::Dxt1 => 8,
            BlockMode::Dxt3 => 16,
            BlockMode::Dxt5 => 16,
        }
    }

    /// Bytes taken by one row of 4x4 blocks
    pub fn block_row_size(&self, width: u32) -> Option<usize> {
        (width as usize).div_ceil(4).checked_mul(self.block_size())
    }

    /// Bytes taken by all blocks of a `width` x `height` mipmap
    pub fn compressed_size(&self, width: u32, height: u32) -> Option<usize> {
        self.block_row_size(width)?
            .checked_mul((height as usize).div_ceil(4))
    }
}

/// Block decompression backend
pub trait BlockDecompressor: Send + Sync {
    /// Decompress `width * height` pixels into R, G, B, A bytes
    fn decompress(&self, data: &[u8], width: u32, height: u32, mode: BlockMode) -> Result<Vec<u8>>;
}

/// Decompressor backed by `texpresso`
#[derive(Debug, Clone, Copy, Default)]
pub struct TexpressoDecompressor;

impl BlockDecompressor for TexpressoDecompressor {
    fn decompress(&self, data: &[u8], width: u32, height: u32, mode: BlockMode) -> Result<Vec<u8>> {
        let sizes = mode
            .compressed_size(width, height)
            .zip(pixel_count(width, height).and_then(|n| n.checked_mul(4)));
        let Some((required_size, output_size)) = sizes else {
            return Err(Error::TruncatedMipmap {
                expected: usize::MAX,
                actual: data.len(),
            });
        };
        let decoder: texpresso::Format = mode.into();

        // Small mipmaps in shipped files often carry fewer bytes than a whole
        // block needs, missing bytes decode as zeros.
        let compressed: Cow<'_, [u8]> = if data.len() < required_size {
            trace!(
                "{mode:?} data is {} bytes, padding to {required_size}",
                data.len()
            );
            let mut padded = vec![0u8; required_size];
            padded[..data.len()].copy_from_slice(data);
            Cow::Owned(padded)
        } else {
            Cow::Borrowed(data)
        };

        let mut output = vec![0; output_size];
        if !output.is_empty() {
            decoder.decompress(&compressed, width as usize, height as usize, &mut output);
        }
        Ok(output)
    }
}

/// Decompress a DXT mipmap and repack it as BGRA pixels
pub fn decode_dxtn(
    input: &[u8],
    width: u32,
    height: u32,
    mode: BlockMode,
    decompressor: &dyn BlockDecompressor,
) -> Result<DenseBuffer> {
    // Missing bytes are zero padded, but never more than one row of blocks
    let minimum = mode
        .compressed_size(width, height)
        .zip(mode.block_row_size(width))
        .map(|(total, row)| total.saturating_sub(row));
    let output_size = pixel_count(width, height).and_then(|n| n.checked_mul(4));
    check_size(input, output_size.and(minimum))?;
    let expected = output_size.unwrap_or_default();

    let rgba = decompressor.decompress(input, width, height, mode)?;
    if rgba.len() != expected {
        error!("{mode:?} decompressor returned {} bytes, {expected} expected", rgba.len());
        return Err(Error::CodecOutput {
            expected,
            actual: rgba.len(),
        });
    }

    let pixels = rgba
        .chunks_exact(4)
        .map(|c| BgraPixel::new(c[0], c[1], c[2], c[3]))
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    // Both endpoints pure red in RGB565, every index selects color 0
    const SOLID_RED_DXT1: [u8; 8] = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0];

    #[test]
    fn test_block_modes() {
        assert_eq!(
            BlockMode::for_format(PixelFormat::Dxt1Alpha1),
            Some(BlockMode::Dxt1)
        );
        assert_eq!(
            BlockMode::for_format(PixelFormat::Dxt3Alpha4),
            Some(BlockMode::Dxt3)
        );
        assert_eq!(
            BlockMode::for_format(PixelFormat::Dxt5Alpha8),
            Some(BlockMode::Dxt5)
        );
        assert_eq!(BlockMode::for_format(PixelFormat::RawBgra), None);
        assert_eq!(BlockMode::Dxt1.block_size(), 8);
        assert_eq!(BlockMode::Dxt5.block_size(), 16);
        assert_eq!(BlockMode::Dxt1.compressed_size(4, 4), Some(8));
        assert_eq!(BlockMode::Dxt1.compressed_size(5, 1), Some(16));
        assert_eq!(BlockMode::Dxt5.compressed_size(8, 8), Some(64));
        assert_eq!(BlockMode::Dxt3.block_row_size(2), Some(16));
    }

    #[test]
    fn test_solid_red_block() {
        let buffer = decode_dxtn(&SOLID_RED_DXT1, 4, 4, BlockMode::Dxt1, &TexpressoDecompressor)
            .unwrap();
        assert_eq!(buffer.len(), 16);
        assert!(
            buffer
                .pixels
                .iter()
                .all(|&p| p == BgraPixel::new(255, 0, 0, 255))
        );
    }

    /// Undersized DXT3 data is zero padded instead of failing
    #[test]
    fn test_dxt3_undersized_buffer_succeeds_with_padding() {
        let buffer = decode_dxtn(&[0; 8], 4, 4, BlockMode::Dxt3, &TexpressoDecompressor).unwrap();
        assert_eq!((buffer.width, buffer.height), (4, 4));
    }

    #[test]
    fn test_empty_buffer_produces_blank_image() {
        let buffer = decode_dxtn(&[], 4, 4, BlockMode::Dxt5, &TexpressoDecompressor).unwrap();
        assert_eq!(buffer.len(), 16);
    }

    #[test]
    fn test_padding_is_limited_to_one_block_row() {
        // 8x8 DXT1 needs 32 bytes, one row of blocks is 16
        assert!(decode_dxtn(&[0; 16], 8, 8, BlockMode::Dxt1, &TexpressoDecompressor).is_ok());
        assert!(matches!(
            decode_dxtn(&[0; 15], 8, 8, BlockMode::Dxt1, &TexpressoDecompressor),
            Err(Error::TruncatedMipmap {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_huge_dimensions_are_rejected_before_decompression() {
        for (width, height) in [(65536, 65536), (u32::MAX, u32::MAX)] {
            for mode in [BlockMode::Dxt1, BlockMode::Dxt3, BlockMode::Dxt5] {
                let result = decode_dxtn(&[0; 4], width, height, mode, &ShortDecompressor);
                assert!(
                    matches!(result, Err(Error::TruncatedMipmap { actual: 4, .. })),
                    "{mode:?} {width}x{height}: {result:?}"
                );
            }
        }
    }

    #[test]
    fn test_texpresso_rejects_unaddressable_sizes() {
        let result = TexpressoDecompressor.decompress(&[0; 4], u32::MAX, u32::MAX, BlockMode::Dxt5);
        assert!(matches!(result, Err(Error::TruncatedMipmap { actual: 4, .. })));
    }

    #[test]
    fn test_degenerate_mipmap() {
        let buffer = decode_dxtn(&[], 2, 0, BlockMode::Dxt1, &TexpressoDecompressor).unwrap();
        assert!(buffer.is_empty());
    }

    struct ShortDecompressor;

    impl BlockDecompressor for ShortDecompressor {
        fn decompress(&self, _: &[u8], _: u32, _: u32, _: BlockMode) -> Result<Vec<u8>> {
            Ok(vec![0; 3])
        }
    }

    #[test]
    fn test_wrong_codec_output() {
        let result = decode_dxtn(&SOLID_RED_DXT1, 4, 4, BlockMode::Dxt1, &ShortDecompressor);
        assert!(matches!(
            result,
            Err(Error::CodecOutput {
                expected: 64,
                actual: 3
            })
        ));
    }
}
