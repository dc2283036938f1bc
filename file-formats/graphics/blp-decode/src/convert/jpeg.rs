use crate::debug::trimmed_collection_fmt;
use crate::error::{Error, Result};
use crate::types::{BgraPixel, DenseBuffer};
use ::image::{DynamicImage, ImageFormat, ImageReader};
use custom_debug::Debug;
use log::*;
use std::io::Cursor;

/// Position of the color channels inside one pixel of a bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelOrder {
    /// Red, green, blue
    Rgb,
    /// Blue, green, red
    Bgr,
    /// Red, green, blue, alpha
    Rgba,
    /// Blue, green, red, alpha
    Bgra,
}

impl ChannelOrder {
    /// Number of channels in a pixel
    pub fn channels(&self) -> usize {
        match self {
            ChannelOrder::Rgb | ChannelOrder::Bgr => 3,
            ChannelOrder::Rgba | ChannelOrder::Bgra => 4,
        }
    }

    /// Byte index of the red channel
    pub fn red(&self) -> usize {
        match self {
            ChannelOrder::Rgb | ChannelOrder::Rgba => 0,
            ChannelOrder::Bgr | ChannelOrder::Bgra => 2,
        }
    }

    /// Byte index of the green channel
    pub fn green(&self) -> usize {
        1
    }

    /// Byte index of the blue channel
    pub fn blue(&self) -> usize {
        match self {
            ChannelOrder::Rgb | ChannelOrder::Rgba => 2,
            ChannelOrder::Bgr | ChannelOrder::Bgra => 0,
        }
    }
}

/// Decoded bitmap addressed by scan lines, bottom scan line first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanlineBitmap {
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    channel_order: ChannelOrder,
    #[debug(with = trimmed_collection_fmt)]
    data: Vec<u8>,
}

impl ScanlineBitmap {
    /// Wrap tightly packed scan lines, `data` starts with the bottom line.
    pub fn new(
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        channel_order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * bytes_per_pixel;
        if data.len() != expected || bytes_per_pixel < channel_order.channels() {
            return Err(Error::CodecOutput {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes_per_pixel,
            channel_order,
            data,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in bytes between two pixels of a scan line
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Channel layout of every pixel
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Bytes of a scan line, line 0 is the bottom of the image
    pub fn scan_line(&self, line: u32) -> &[u8] {
        let pitch = self.width as usize * self.bytes_per_pixel;
        let start = line as usize * pitch;
        &self.data[start..start + pitch]
    }
}

/// JPEG decompression backend
pub trait PhotographicDecoder: Send + Sync {
    /// Decode a complete JPEG stream
    fn decode(&self, data: &[u8]) -> Result<ScanlineBitmap>;
}

/// Decoder backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageJpegDecoder;

impl PhotographicDecoder for ImageJpegDecoder {
    fn decode(&self, data: &[u8]) -> Result<ScanlineBitmap> {
        let jpeg = ImageReader::with_format(Cursor::new(data), ImageFormat::Jpeg)
            .decode()
            .map_err(|e| Error::Jpeg(e.to_string()))?;

        let (width, height, order, top_down) = match jpeg {
            DynamicImage::ImageRgba8(rgba) => {
                (rgba.width(), rgba.height(), ChannelOrder::Rgba, rgba.into_raw())
            }
            other => {
                let rgb = other.into_rgb8();
                (rgb.width(), rgb.height(), ChannelOrder::Rgb, rgb.into_raw())
            }
        };

        let pitch = width as usize * order.channels();
        let mut bottom_up = Vec::with_capacity(top_down.len());
        if pitch > 0 {
            for line in top_down.chunks_exact(pitch).rev() {
                bottom_up.extend_from_slice(line);
            }
        }
        ScanlineBitmap::new(width, height, order.channels(), order, bottom_up)
    }
}

/// Decode a JPEG mipmap whose stream is split into a shared header and the mipmap body.
///
/// Red and blue are swapped relative to what the codec reports and alpha is
/// always opaque. An alpha plane trailing the scan data is not applied.
pub fn decode_jpeg(
    header: &[u8],
    input: &[u8],
    decoder: &dyn PhotographicDecoder,
) -> Result<DenseBuffer> {
    let mut full_jpeg = Vec::with_capacity(header.len() + input.len());
    full_jpeg.extend_from_slice(header);
    full_jpeg.extend_from_slice(input);
    trace!(
        "JPEG stream of {} bytes ({} header + {} body)",
        full_jpeg.len(),
        header.len(),
        input.len()
    );

    let bitmap = decoder.decode(&full_jpeg)?;
    let (width, height) = (bitmap.width(), bitmap.height());
    let bpp = bitmap.bytes_per_pixel();
    let order = bitmap.channel_order();

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let line = bitmap.scan_line(height - 1 - y);
        for src in line.chunks_exact(bpp) {
            pixels.push(BgraPixel::new(
                src[order.blue()],
                src[order.green()],
                src[order.red()],
                0xFF,
            ));
        }
    }
    Ok(DenseBuffer::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;
    use test_log::test;

    /// Serves a fixed bitmap regardless of input and remembers what it was given
    struct FixedDecoder {
        bitmap: ScanlineBitmap,
        seen: std::sync::Mutex<Vec<u8>>,
    }

    impl PhotographicDecoder for FixedDecoder {
        fn decode(&self, data: &[u8]) -> Result<ScanlineBitmap> {
            if let Ok(mut seen) = self.seen.lock() {
                *seen = data.to_vec();
            }
            Ok(self.bitmap.clone())
        }
    }

    #[test]
    fn test_flip_swap_and_opaque_alpha() {
        // 1x2 BGRA bitmap, bottom line first, with a translucent alpha
        let bitmap = ScanlineBitmap::new(
            1,
            2,
            4,
            ChannelOrder::Bgra,
            vec![
                1, 2, 3, 0x10, // bottom: b=1 g=2 r=3
                4, 5, 6, 0x20, // top: b=4 g=5 r=6
            ],
        )
        .unwrap();
        let decoder = FixedDecoder {
            bitmap,
            seen: Default::default(),
        };

        let buffer = decode_jpeg(&[0xAA, 0xBB], &[0xCC], &decoder).unwrap();
        assert_eq!(
            buffer.pixels,
            vec![BgraPixel::new(4, 5, 6, 0xFF), BgraPixel::new(1, 2, 3, 0xFF)]
        );
        assert_eq!(*decoder.seen.lock().unwrap(), vec![0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_three_byte_stride() {
        let bitmap =
            ScanlineBitmap::new(2, 1, 3, ChannelOrder::Rgb, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let decoder = FixedDecoder {
            bitmap,
            seen: Default::default(),
        };
        let buffer = decode_jpeg(&[], &[], &decoder).unwrap();
        assert_eq!(
            buffer.pixels,
            vec![BgraPixel::new(30, 20, 10, 0xFF), BgraPixel::new(60, 50, 40, 0xFF)]
        );
    }

    #[test]
    fn test_bitmap_size_is_validated() {
        assert!(ScanlineBitmap::new(2, 2, 3, ChannelOrder::Rgb, vec![0; 11]).is_err());
        assert!(ScanlineBitmap::new(1, 1, 3, ChannelOrder::Rgba, vec![0; 3]).is_err());
    }

    #[test]
    fn test_image_decoder_round_trip() {
        let source = RgbImage::from_fn(8, 8, |_, y| {
            if y < 4 {
                Rgb([250, 10, 10])
            } else {
                Rgb([10, 10, 250])
            }
        });
        let mut jpeg = vec![];
        source
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        // Split like BLP files do: a shared header and a per-mipmap body
        let (header, body) = jpeg.split_at(20);
        let buffer = decode_jpeg(header, body, &ImageJpegDecoder).unwrap();
        assert_eq!((buffer.width, buffer.height), (8, 8));

        let top = buffer.pixel(0, 0).unwrap();
        let bottom = buffer.pixel(0, 7).unwrap();
        // Channels come out swapped, the top rows were red in the source
        assert!(top.b > 200 && top.r < 60, "{top:?}");
        assert!(bottom.r > 200 && bottom.b < 60, "{bottom:?}");
        assert!(buffer.pixels.iter().all(|p| p.a == 0xFF));
    }

    #[test]
    fn test_invalid_jpeg() {
        let result = decode_jpeg(&[0, 1, 2], &[3, 4], &ImageJpegDecoder);
        assert!(matches!(result, Err(Error::Jpeg(_))));
    }
}
