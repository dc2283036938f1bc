mod header;
/// Native byte reading utilities
pub mod reader;

use crate::error::{Error, Result};
use crate::types::*;
use header::{parse_fixed_header, parse_magic};
use log::*;
use reader::ByteReader;
use std::io::{Read, Seek, SeekFrom};

/// Size of shared JPEG header above which some tools of the era crash
pub const MAX_JPEG_HEADER: usize = 624;

/// Read the header of a BLP stream together with its palette or JPEG header.
///
/// The stream is rewound to the start first. Mipmap bodies are not read, use
/// [`BlpHeader::decode`] for that.
pub fn parse_blp<R>(reader: &mut R) -> Result<BlpHeader>
where
    R: Read + Seek,
{
    reader.seek(SeekFrom::Start(0))?;

    let version = parse_magic(reader).map_err(|e| e.with_context("version"))?;
    let fixed = parse_fixed_header(version, reader).map_err(|e| e.with_context("header"))?;
    let header_end = reader.stream_position()?;
    debug_assert_eq!(header_end, version.header_size() as u64);
    trace!("{version} fixed header ends at offset {header_end}");

    let is_jpeg = match fixed.fields {
        HeaderFields::Blp1 { compression, .. } => compression == 0,
        HeaderFields::Blp2 { content, .. } => content == 0,
    };
    let payload = if is_jpeg {
        parse_jpeg_header(reader).map_err(|e| e.with_context("jpeg header"))?
    } else {
        parse_palette(reader).map_err(|e| e.with_context("color palette"))?
    };

    Ok(BlpHeader {
        version: fixed.version,
        fields: fixed.fields,
        width: fixed.width,
        height: fixed.height,
        mipmap_locator: fixed.mipmap_locator,
        payload,
    })
}

fn parse_jpeg_header<R: Read>(reader: &mut R) -> Result<BlpPayload> {
    let header_size = reader.read_u32_le()? as usize;
    if header_size > MAX_JPEG_HEADER {
        warn!(
            "JPEG header size {} is greater than {}, that might cause crashes of some tools.",
            header_size, MAX_JPEG_HEADER,
        );
    }
    let mut header = Vec::new();
    reader
        .by_ref()
        .take(header_size as u64)
        .read_to_end(&mut header)?;
    if header.len() < header_size {
        return Err(Error::UnexpectedEof);
    }
    trace!("Shared JPEG header of {header_size} bytes");
    Ok(BlpPayload::Jpeg { header })
}

fn parse_palette(reader: &mut impl ByteReader) -> Result<BlpPayload> {
    let mut bytes = [0u8; PALETTE_SIZE * 4];
    reader.read_into(&mut bytes)?;
    Ok(BlpPayload::Palette(Box::new(Palette::from_bytes(&bytes))))
}
