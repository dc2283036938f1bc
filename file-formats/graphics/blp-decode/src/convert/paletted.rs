//! Decoders for palette indexed mipmaps.
//!
//! Every mipmap starts with one palette index per pixel. Depending on the
//! format an alpha plane follows the indices with 1, 4 or 8 bits per pixel.
//! Alpha bits are packed starting from the least significant bit.

use super::bounds::{alpha_plane_size, check_size, pixel_count};
use crate::error::Result;
use crate::types::{BgraPixel, DenseBuffer, Palette};

/// Split the body into the index plane and the alpha plane after it
fn planes(input: &[u8], width: u32, height: u32, alpha_bits: usize) -> Result<(&[u8], &[u8])> {
    let sizes = pixel_count(width, height)
        .and_then(|n| Some((n, n.checked_add(alpha_plane_size(n, alpha_bits)?)?)));
    check_size(input, sizes.map(|(_, total)| total))?;
    let n = sizes.map_or(0, |(n, _)| n);
    Ok(input.split_at(n))
}

/// Opaque image: alpha of the palette is ignored
pub fn decode_no_alpha(
    input: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DenseBuffer> {
    let (indices, _) = planes(input, width, height, 0)?;
    let pixels = indices
        .iter()
        .map(|&index| palette.get(index).with_alpha(0xFF))
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

/// One alpha bit per pixel, eight pixels per byte
pub fn decode_alpha1(
    input: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DenseBuffer> {
    let (indices, alpha) = planes(input, width, height, 1)?;
    let pixels = indices
        .iter()
        .enumerate()
        .map(|(i, &index)| {
            let bit = (alpha[i / 8] >> (i % 8)) & 1;
            palette
                .get(index)
                .with_alpha(if bit != 0 { 0xFF } else { 0x00 })
        })
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

/// Four alpha bits per pixel, low nibble first
pub fn decode_alpha4(
    input: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DenseBuffer> {
    let (indices, alpha) = planes(input, width, height, 4)?;
    let pixels = indices
        .iter()
        .enumerate()
        .map(|(i, &index)| {
            let nibble = (alpha[i / 2] >> ((i % 2) * 4)) & 0x0F;
            palette.get(index).with_alpha((nibble << 4) | nibble)
        })
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

/// One alpha byte per pixel stored after the indices
pub fn decode_alpha8(
    input: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DenseBuffer> {
    let (indices, alpha) = planes(input, width, height, 8)?;
    let pixels = indices
        .iter()
        .zip(alpha)
        .map(|(&index, &a)| palette.get(index).with_alpha(a))
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}

/// BLP1 images that keep an inverted alpha in the palette entries
pub fn decode_palette_alpha(
    input: &[u8],
    width: u32,
    height: u32,
    palette: &Palette,
) -> Result<DenseBuffer> {
    let (indices, _) = planes(input, width, height, 0)?;
    let pixels = indices
        .iter()
        .map(|&index| {
            let color: BgraPixel = palette.get(index);
            color.with_alpha(0xFF - color.a)
        })
        .collect();
    Ok(DenseBuffer::new(width, height, pixels))
}
