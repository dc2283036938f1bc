use super::reader::{ByteReader, read_u32_array};
use crate::error::{Error, Result};
use crate::types::*;
use log::*;
use std::str;

/// Fixed part of the header, before the palette or JPEG header
pub(crate) struct FixedHeader {
    pub version: BlpVersion,
    pub fields: HeaderFields,
    pub width: u32,
    pub height: u32,
    pub mipmap_locator: MipmapLocator,
}

pub(crate) fn parse_magic(reader: &mut impl ByteReader) -> Result<BlpVersion> {
    let mut magic_fixed: [u8; 4] = Default::default();
    reader.read_into(&mut magic_fixed)?;

    BlpVersion::from_magic(magic_fixed).ok_or_else(|| {
        Error::UnsupportedFormat(
            str::from_utf8(&magic_fixed)
                .map(|s| s.to_owned())
                .unwrap_or_else(|_| format!("{magic_fixed:?}")),
        )
    })
}

pub(crate) fn parse_fixed_header(
    version: BlpVersion,
    reader: &mut impl ByteReader,
) -> Result<FixedHeader> {
    let (fields, width, height) = match version {
        BlpVersion::Blp2 => parse_blp2_fields(reader)?,
        BlpVersion::Blp1 => parse_blp1_fields(reader)?,
    };

    let mipmap_locator = parse_mipmap_locator(reader).map_err(|e| e.with_context("mipmap locator"))?;
    trace!(
        "{version} header: {width}x{height}, {} mipmaps, {fields:?}",
        mipmap_locator.mipmap_count()
    );
    if mipmap_locator.mipmap_count() == 0 {
        warn!("{version} header doesn't reference any mipmap");
    }

    Ok(FixedHeader {
        version,
        fields,
        width,
        height,
        mipmap_locator,
    })
}

fn parse_blp2_fields(reader: &mut impl ByteReader) -> Result<(HeaderFields, u32, u32)> {
    let content = reader
        .read_u32_le()
        .map_err(|e| e.with_context("content field"))?;
    let encoding = reader
        .read_u8()
        .map_err(|e| e.with_context("encoding field"))?;
    let alpha_depth = reader
        .read_u8()
        .map_err(|e| e.with_context("alpha_depth field"))?;
    let alpha_encoding = reader
        .read_u8()
        .map_err(|e| e.with_context("alpha_encoding field"))?;
    let has_mipmaps = reader
        .read_u8()
        .map_err(|e| e.with_context("has_mipmaps field"))?;
    let width = reader
        .read_u32_le()
        .map_err(|e| e.with_context("width field"))?;
    let height = reader
        .read_u32_le()
        .map_err(|e| e.with_context("height field"))?;

    if content != 0 && !matches!(alpha_depth, 0 | 1 | 4 | 8) {
        warn!("Non standard alpha depth {alpha_depth}, expected 0, 1, 4 or 8");
    }

    let fields = HeaderFields::Blp2 {
        content,
        encoding,
        alpha_depth,
        alpha_encoding,
        has_mipmaps,
    };
    Ok((fields, width, height))
}

fn parse_blp1_fields(reader: &mut impl ByteReader) -> Result<(HeaderFields, u32, u32)> {
    let compression = reader
        .read_u32_le()
        .map_err(|e| e.with_context("compression field"))?;
    let flags = reader
        .read_u32_le()
        .map_err(|e| e.with_context("flags field"))?;
    let width = reader
        .read_u32_le()
        .map_err(|e| e.with_context("width field"))?;
    let height = reader
        .read_u32_le()
        .map_err(|e| e.with_context("height field"))?;
    let alpha_encoding = reader
        .read_u32_le()
        .map_err(|e| e.with_context("alpha_encoding field"))?;
    let unused = reader
        .read_u32_le()
        .map_err(|e| e.with_context("unused field"))?;

    if compression > 1 {
        warn!("Unexpected value for compression {compression}, treating image as paletted");
    }

    let fields = HeaderFields::Blp1 {
        compression,
        flags,
        alpha_encoding,
        unused,
    };
    Ok((fields, width, height))
}

fn parse_mipmap_locator(reader: &mut impl ByteReader) -> Result<MipmapLocator> {
    let offsets = read_u32_array(reader)?;
    let lengths = read_u32_array(reader)?;
    Ok(MipmapLocator { offsets, lengths })
}
