//! Decoder for BLP texture files.
//!
//! BLP is Blizzard's texture container. Version 1 (Warcraft III) stores
//! JPEG compressed or paletted images, version 2 (World of Warcraft) adds raw
//! BGRA and DXT1/3/5 compressed images. Every file keeps up to 16 mipmaps.
//!
//! The crate reads the header of a seekable stream once and then decodes any
//! mipmap level on request into a [`DenseBuffer`] of BGRA pixels, top row first.
//!
//! # Examples
//!
//! ```no_run
//! use blp_decode::parse_blp;
//! use std::fs::File;
//!
//! let mut file = File::open("Textures/Ability_Ambush.blp")?;
//! let header = parse_blp(&mut file)?;
//! println!("{} {}: {}x{}", header.version(), header.pixel_format(), header.width, header.height);
//!
//! let image = header.decode(&mut file, 0)?;
//! image.to_rgba_image().save("ability.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Decoding of mipmaps into pixel buffers
pub mod convert;
mod debug;
/// Error types
pub mod error;
/// Header parsing
pub mod parser;
/// Types describing BLP images
pub mod types;

pub use convert::dxtn::{BlockDecompressor, BlockMode, TexpressoDecompressor};
pub use convert::jpeg::{ChannelOrder, ImageJpegDecoder, PhotographicDecoder, ScanlineBitmap};
pub use convert::{Codecs, decode_mipmap};
pub use error::{Error, Result};
pub use parser::parse_blp;
pub use types::{BgraPixel, BlpHeader, BlpPayload, BlpVersion, DenseBuffer, Palette, PixelFormat};

impl BlpHeader {
    /// Parse the header of a BLP stream, see [`parse_blp`]
    pub fn parse<R>(reader: &mut R) -> Result<Self>
    where
        R: std::io::Read + std::io::Seek,
    {
        parse_blp(reader)
    }
}
