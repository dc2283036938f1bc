use super::format::PixelFormat;
use super::locator::MipmapLocator;
use super::pixel::Palette;
use super::version::BlpVersion;
use crate::debug::trimmed_collection_fmt;
use crate::error::Result;
use custom_debug::Debug;

/// `flags` bit of BLP1 headers that marks the presence of an alpha channel
pub const BLP1_FLAG_ALPHA: u32 = 0x8;
/// BLP1 `alpha_encoding` value meaning alpha lives inside the palette entries
pub const BLP1_ALPHA_FROM_PALETTE: u32 = 5;

/// Version-specific part of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderFields {
    /// Fields of a `BLP1` header
    Blp1 {
        /// 0 is JPEG, 1 is paletted
        compression: u32,
        /// Bit 3 is set for images with alpha
        flags: u32,
        /// 3 or 4 for a separate alpha list, 5 for alpha taken from the palette
        alpha_encoding: u32,
        /// Reserved word, usually holds a has-mipmaps marker
        unused: u32,
    },
    /// Fields of a `BLP2` header
    Blp2 {
        /// 0 is JPEG, anything else uses `encoding`
        content: u32,
        /// 1 is paletted, 2 is DXT, 3 is raw BGRA
        encoding: u8,
        /// 0, 1, 4 or 8 bits of alpha per pixel
        alpha_depth: u8,
        /// 0 is DXT1, 1 is DXT3, 7 is DXT5
        alpha_encoding: u8,
        /// Non-zero when the file stores mipmaps
        has_mipmaps: u8,
    },
}

/// Data that follows the fixed header
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlpPayload {
    /// Header bytes shared by every JPEG mipmap
    Jpeg {
        /// Bytes prepended to each mipmap before JPEG decoding
        #[debug(with = trimmed_collection_fmt)]
        header: Vec<u8>,
    },
    /// Palette of a paletted, raw or DXT image
    Palette(Box<Palette>),
}

impl BlpPayload {
    /// Palette if the image has one
    pub fn palette(&self) -> Option<&Palette> {
        match self {
            BlpPayload::Palette(palette) => Some(palette.as_ref()),
            BlpPayload::Jpeg { .. } => None,
        }
    }

    /// Shared JPEG header if the image is JPEG compressed
    pub fn jpeg_header(&self) -> Option<&[u8]> {
        match self {
            BlpPayload::Jpeg { header } => Some(header.as_slice()),
            BlpPayload::Palette(_) => None,
        }
    }
}

/// Parsed BLP header together with the payload that follows it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlpHeader {
    /// Container version
    pub version: BlpVersion,
    /// Version-specific fields
    pub fields: HeaderFields,
    /// Width of level 0 in pixels
    pub width: u32,
    /// Height of level 0 in pixels
    pub height: u32,
    /// Where mipmaps are stored in the file
    pub mipmap_locator: MipmapLocator,
    /// Palette or JPEG header
    pub payload: BlpPayload,
}

impl BlpHeader {
    /// Container version of the file
    pub fn version(&self) -> BlpVersion {
        self.version
    }

    /// Pixel format the mipmaps are stored in
    pub fn pixel_format(&self) -> PixelFormat {
        PixelFormat::classify(&self.fields)
    }

    /// Number of mipmaps the file stores
    pub fn mipmap_count(&self) -> usize {
        self.mipmap_locator.mipmap_count()
    }

    /// Width of a mipmap level. Levels past the last mipmap resolve to the last one.
    pub fn width(&self, level: usize) -> Result<u32> {
        let level = self.mipmap_locator.clamp_level(level)?;
        Ok(self.width >> level)
    }

    /// Height of a mipmap level. Levels past the last mipmap resolve to the last one.
    pub fn height(&self, level: usize) -> Result<u32> {
        let level = self.mipmap_locator.clamp_level(level)?;
        Ok(self.height >> level)
    }

    /// Width and height of a mipmap level
    pub fn mipmap_size(&self, level: usize) -> Result<(u32, u32)> {
        Ok((self.width(level)?, self.height(level)?))
    }

    /// BLP1 palette images whose alpha is stored inverted in the palette itself
    pub(crate) fn alpha_from_palette(&self) -> bool {
        matches!(
            self.fields,
            HeaderFields::Blp1 {
                alpha_encoding: BLP1_ALPHA_FROM_PALETTE,
                ..
            }
        )
    }
}
