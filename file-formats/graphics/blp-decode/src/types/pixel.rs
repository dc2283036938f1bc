use crate::debug::trimmed_collection_fmt;
use custom_debug::Debug;
use image::RgbaImage;

/// Number of colors in a BLP palette
pub const PALETTE_SIZE: usize = 256;

/// One pixel stored in blue, green, red, alpha order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BgraPixel {
    /// Blue channel
    pub b: u8,
    /// Green channel
    pub g: u8,
    /// Red channel
    pub r: u8,
    /// Alpha channel
    pub a: u8,
}

impl BgraPixel {
    /// Make a pixel from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// Build from 4 bytes laid out as B, G, R, A
    pub const fn from_bgra_bytes(bytes: [u8; 4]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }

    /// Same color with the alpha channel replaced
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Color table of paletted images
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Palette {
    /// BGRA colors as stored in the file
    #[debug(with = trimmed_collection_fmt)]
    pub colors: [BgraPixel; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [BgraPixel::default(); PALETTE_SIZE],
        }
    }
}

impl Palette {
    /// Build palette from the 1024 bytes that follow the header
    pub fn from_bytes(bytes: &[u8; PALETTE_SIZE * 4]) -> Self {
        let mut colors = [BgraPixel::default(); PALETTE_SIZE];
        for (color, chunk) in colors.iter_mut().zip(bytes.chunks_exact(4)) {
            *color = BgraPixel::from_bgra_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self { colors }
    }

    /// Color for a palette index
    #[inline]
    pub fn get(&self, index: u8) -> BgraPixel {
        self.colors[index as usize]
    }
}

/// Decoded mipmap: `width * height` pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DenseBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixels of the image
    #[debug(with = trimmed_collection_fmt)]
    pub pixels: Vec<BgraPixel>,
}

impl DenseBuffer {
    /// Wrap decoded pixels
    pub fn new(width: u32, height: u32, pixels: Vec<BgraPixel>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Number of pixels in the buffer
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the buffer has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x` of row `y`
    pub fn pixel(&self, x: u32, y: u32) -> Option<BgraPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flatten into bytes in B, G, R, A order
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.b, p.g, p.r, p.a])
            .collect()
    }

    /// Flatten into bytes in R, G, B, A order
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    /// Convert into an `image` crate buffer for saving or further processing
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let p = self.pixels[y as usize * self.width as usize + x as usize];
            image::Rgba([p.r, p.g, p.b, p.a])
        })
    }
}
