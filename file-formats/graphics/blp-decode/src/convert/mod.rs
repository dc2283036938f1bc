/// Size checks of mipmap bodies
pub mod bounds;
/// DXT block decompression
pub mod dxtn;
/// JPEG decompression
pub mod jpeg;
/// Palette indexed decoders
pub mod paletted;
/// Raw BGRA decoder
pub mod raw;

use crate::error::{Error, Result};
use crate::types::*;
use dxtn::{BlockDecompressor, BlockMode, TexpressoDecompressor};
use jpeg::{ImageJpegDecoder, PhotographicDecoder};
use log::*;
use std::io::{Read, Seek, SeekFrom};

/// External decompressors used for DXT and JPEG mipmaps
#[derive(Clone, Copy)]
pub struct Codecs<'a> {
    /// Decompressor of DXT blocks
    pub block: &'a dyn BlockDecompressor,
    /// Decoder of JPEG streams
    pub photographic: &'a dyn PhotographicDecoder,
}

impl Default for Codecs<'static> {
    fn default() -> Self {
        Codecs {
            block: &TexpressoDecompressor,
            photographic: &ImageJpegDecoder,
        }
    }
}

impl std::fmt::Debug for Codecs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codecs").finish_non_exhaustive()
    }
}

/// Read the bytes of a mipmap level from the stream.
///
/// Levels past the last mipmap resolve to the last one.
pub fn read_mipmap<R>(reader: &mut R, header: &BlpHeader, level: usize) -> Result<Vec<u8>>
where
    R: Read + Seek,
{
    let (offset, length) = header.mipmap_locator.byte_range(level)?;
    trace!("Reading mipmap {level}: {length} bytes at offset {offset}");
    reader.seek(SeekFrom::Start(offset as u64))?;

    let mut bytes = Vec::new();
    reader.by_ref().take(length as u64).read_to_end(&mut bytes)?;
    if bytes.len() < length as usize {
        error!(
            "Mipmap {level} is cut by end of file, read {} of {length} bytes",
            bytes.len()
        );
        return Err(Error::UnexpectedEof.with_context(&format!("mipmap {level} body")));
    }
    Ok(bytes)
}

/// Read and decode a mipmap level of the image.
pub fn decode_mipmap<R>(
    reader: &mut R,
    header: &BlpHeader,
    level: usize,
    codecs: &Codecs<'_>,
) -> Result<DenseBuffer>
where
    R: Read + Seek,
{
    let format = header.pixel_format();
    if let PixelFormat::Unknown(code) = format {
        error!("Pixel format {code:#08x} is not supported");
        return Err(Error::UnknownPixelFormat(code));
    }

    let level = header.mipmap_locator.clamp_level(level)?;
    let (width, height) = header.mipmap_size(level)?;
    let input = read_mipmap(reader, header, level)?;
    decode_bytes(header, format, &input, width, height, codecs)
        .map_err(|e| e.with_context(&format!("{format} mipmap {level}")))
}

/// Dispatch already read mipmap bytes to the decoder of the format
pub fn decode_bytes(
    header: &BlpHeader,
    format: PixelFormat,
    input: &[u8],
    width: u32,
    height: u32,
    codecs: &Codecs<'_>,
) -> Result<DenseBuffer> {
    trace!("Decoding {width}x{height} {format} from {} bytes", input.len());

    if format == PixelFormat::Jpeg {
        let shared = header.payload.jpeg_header().unwrap_or_default();
        return jpeg::decode_jpeg(shared, input, codecs.photographic);
    }
    if let Some(mode) = BlockMode::for_format(format) {
        return dxtn::decode_dxtn(input, width, height, mode, codecs.block);
    }
    if format == PixelFormat::RawBgra {
        return raw::decode_raw_bgra(input, width, height);
    }

    let Some(palette) = header.payload.palette() else {
        return Err(Error::UnknownPixelFormat(format.code()));
    };
    match format {
        PixelFormat::PalettedNoAlpha => paletted::decode_no_alpha(input, width, height, palette),
        PixelFormat::PalettedAlpha1 => paletted::decode_alpha1(input, width, height, palette),
        PixelFormat::PalettedAlpha4 => paletted::decode_alpha4(input, width, height, palette),
        PixelFormat::PalettedAlpha8 if header.alpha_from_palette() => {
            paletted::decode_palette_alpha(input, width, height, palette)
        }
        PixelFormat::PalettedAlpha8 => paletted::decode_alpha8(input, width, height, palette),
        other => Err(Error::UnknownPixelFormat(other.code())),
    }
}

impl BlpHeader {
    /// Read and decode a mipmap level with the default codecs.
    ///
    /// Levels past the last mipmap resolve to the last one.
    pub fn decode<R>(&self, reader: &mut R, level: usize) -> Result<DenseBuffer>
    where
        R: Read + Seek,
    {
        decode_mipmap(reader, self, level, &Codecs::default())
    }

    /// Read and decode a mipmap level with custom codecs
    pub fn decode_with<R>(&self, reader: &mut R, level: usize, codecs: &Codecs<'_>) -> Result<DenseBuffer>
    where
        R: Read + Seek,
    {
        decode_mipmap(reader, self, level, codecs)
    }
}
