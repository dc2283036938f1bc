use super::header::{BLP1_FLAG_ALPHA, HeaderFields};
use std::fmt;

/// BLP2 `encoding` value for paletted images
pub const ENCODING_UNCOMPRESSED: u8 = 1;
/// BLP2 `encoding` value for DXT compressed images
pub const ENCODING_DXT: u8 = 2;
/// BLP2 `encoding` value for raw 32-bit BGRA images
pub const ENCODING_UNCOMPRESSED_RAW_BGRA: u8 = 3;

/// BLP2 `alpha_encoding` value selecting DXT1
pub const ALPHA_ENCODING_DXT1: u8 = 0;
/// BLP2 `alpha_encoding` value selecting DXT3
pub const ALPHA_ENCODING_DXT3: u8 = 1;
/// BLP2 `alpha_encoding` value selecting DXT5
pub const ALPHA_ENCODING_DXT5: u8 = 7;

const fn compose(encoding: u8, alpha_depth: u8, alpha_encoding: u8) -> u32 {
    ((encoding as u32) << 16) | ((alpha_depth as u32) << 8) | alpha_encoding as u32
}

/// Layout of the pixels inside every mipmap of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// JPEG compressed mipmaps sharing a common header
    Jpeg,
    /// Palette indices, opaque
    PalettedNoAlpha,
    /// Palette indices with a 1-bit alpha plane
    PalettedAlpha1,
    /// Palette indices with a 4-bit alpha plane
    PalettedAlpha4,
    /// Palette indices with an 8-bit alpha plane (or palette alpha for BLP1)
    PalettedAlpha8,
    /// Interleaved 32-bit BGRA
    RawBgra,
    /// DXT1 without alpha
    Dxt1NoAlpha,
    /// DXT1 with 1-bit alpha
    Dxt1Alpha1,
    /// DXT3 with 4-bit alpha
    Dxt3Alpha4,
    /// DXT3 with 8-bit alpha
    Dxt3Alpha8,
    /// DXT5 with 8-bit alpha
    Dxt5Alpha8,
    /// Combination of header fields this library doesn't know, with its composed code.
    ///
    /// A BLP2 header with encoding, alpha depth and alpha encoding all zero
    /// composes to `0`, which is also the code of [`PixelFormat::Jpeg`].
    Unknown(u32),
}

impl PixelFormat {
    /// Derive the pixel format from header fields
    pub fn classify(fields: &HeaderFields) -> Self {
        match *fields {
            HeaderFields::Blp2 { content: 0, .. } => PixelFormat::Jpeg,
            HeaderFields::Blp2 {
                encoding,
                alpha_depth,
                alpha_encoding,
                ..
            } => {
                let code = match encoding {
                    ENCODING_UNCOMPRESSED => compose(encoding, alpha_depth, 0),
                    ENCODING_UNCOMPRESSED_RAW_BGRA => compose(encoding, 0, 0),
                    ENCODING_DXT => compose(encoding, alpha_depth, alpha_encoding),
                    _ => return PixelFormat::Unknown(compose(encoding, alpha_depth, alpha_encoding)),
                };
                Self::from_code(code)
            }
            HeaderFields::Blp1 { compression: 0, .. } => PixelFormat::Jpeg,
            HeaderFields::Blp1 { flags, .. } if flags & BLP1_FLAG_ALPHA != 0 => {
                PixelFormat::PalettedAlpha8
            }
            HeaderFields::Blp1 { .. } => PixelFormat::PalettedNoAlpha,
        }
    }

    /// Map a composed `(encoding << 16) | (alpha_depth << 8) | alpha_encoding` code
    pub fn from_code(code: u32) -> Self {
        const PALETTED_NO_ALPHA: u32 = compose(ENCODING_UNCOMPRESSED, 0, 0);
        const PALETTED_ALPHA_1: u32 = compose(ENCODING_UNCOMPRESSED, 1, 0);
        const PALETTED_ALPHA_4: u32 = compose(ENCODING_UNCOMPRESSED, 4, 0);
        const PALETTED_ALPHA_8: u32 = compose(ENCODING_UNCOMPRESSED, 8, 0);
        const RAW_BGRA: u32 = compose(ENCODING_UNCOMPRESSED_RAW_BGRA, 0, 0);
        const DXT1_NO_ALPHA: u32 = compose(ENCODING_DXT, 0, ALPHA_ENCODING_DXT1);
        const DXT1_ALPHA_1: u32 = compose(ENCODING_DXT, 1, ALPHA_ENCODING_DXT1);
        const DXT3_ALPHA_4: u32 = compose(ENCODING_DXT, 4, ALPHA_ENCODING_DXT3);
        const DXT3_ALPHA_8: u32 = compose(ENCODING_DXT, 8, ALPHA_ENCODING_DXT3);
        const DXT5_ALPHA_8: u32 = compose(ENCODING_DXT, 8, ALPHA_ENCODING_DXT5);

        match code {
            0 => PixelFormat::Jpeg,
            PALETTED_NO_ALPHA => PixelFormat::PalettedNoAlpha,
            PALETTED_ALPHA_1 => PixelFormat::PalettedAlpha1,
            PALETTED_ALPHA_4 => PixelFormat::PalettedAlpha4,
            PALETTED_ALPHA_8 => PixelFormat::PalettedAlpha8,
            RAW_BGRA => PixelFormat::RawBgra,
            DXT1_NO_ALPHA => PixelFormat::Dxt1NoAlpha,
            DXT1_ALPHA_1 => PixelFormat::Dxt1Alpha1,
            DXT3_ALPHA_4 => PixelFormat::Dxt3Alpha4,
            DXT3_ALPHA_8 => PixelFormat::Dxt3Alpha8,
            DXT5_ALPHA_8 => PixelFormat::Dxt5Alpha8,
            other => PixelFormat::Unknown(other),
        }
    }

    /// Composed code of the format.
    ///
    /// [`PixelFormat::from_code`] maps it back for every known format. An
    /// `Unknown` code only reports the raw header fields and `Unknown(0)`
    /// reads back as `Jpeg`.
    pub fn code(&self) -> u32 {
        match self {
            PixelFormat::Jpeg => 0,
            PixelFormat::PalettedNoAlpha => compose(ENCODING_UNCOMPRESSED, 0, 0),
            PixelFormat::PalettedAlpha1 => compose(ENCODING_UNCOMPRESSED, 1, 0),
            PixelFormat::PalettedAlpha4 => compose(ENCODING_UNCOMPRESSED, 4, 0),
            PixelFormat::PalettedAlpha8 => compose(ENCODING_UNCOMPRESSED, 8, 0),
            PixelFormat::RawBgra => compose(ENCODING_UNCOMPRESSED_RAW_BGRA, 0, 0),
            PixelFormat::Dxt1NoAlpha => compose(ENCODING_DXT, 0, ALPHA_ENCODING_DXT1),
            PixelFormat::Dxt1Alpha1 => compose(ENCODING_DXT, 1, ALPHA_ENCODING_DXT1),
            PixelFormat::Dxt3Alpha4 => compose(ENCODING_DXT, 4, ALPHA_ENCODING_DXT3),
            PixelFormat::Dxt3Alpha8 => compose(ENCODING_DXT, 8, ALPHA_ENCODING_DXT3),
            PixelFormat::Dxt5Alpha8 => compose(ENCODING_DXT, 8, ALPHA_ENCODING_DXT5),
            PixelFormat::Unknown(code) => *code,
        }
    }

    /// Human readable name of the format
    pub fn describe(&self) -> &'static str {
        match self {
            PixelFormat::Jpeg => "JPEG",
            PixelFormat::PalettedNoAlpha => "Uncompressed paletted image, no alpha",
            PixelFormat::PalettedAlpha1 => "Uncompressed paletted image, 1-bit alpha",
            PixelFormat::PalettedAlpha4 => "Uncompressed paletted image, 4-bit alpha",
            PixelFormat::PalettedAlpha8 => "Uncompressed paletted image, 8-bit alpha",
            PixelFormat::RawBgra => "Uncompressed raw 32-bit BGRA",
            PixelFormat::Dxt1NoAlpha => "DXT1, no alpha",
            PixelFormat::Dxt1Alpha1 => "DXT1, 1-bit alpha",
            PixelFormat::Dxt3Alpha4 => "DXT3, 4-bit alpha",
            PixelFormat::Dxt3Alpha8 => "DXT3, 8-bit alpha",
            PixelFormat::Dxt5Alpha8 => "DXT5, 8-bit alpha",
            PixelFormat::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
