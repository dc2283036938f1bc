//! Size checks for mipmap bodies before they are unpacked.
//!
//! Dimensions come straight from the file, so every size is computed with
//! checked arithmetic. `None` stands for a size that doesn't fit in `usize`.

use crate::error::{Error, Result};
use log::error;

/// Number of pixels of a `width` x `height` mipmap
pub fn pixel_count(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

/// Number of bytes an alpha plane of `pixels` entries at `bits` per entry occupies
pub fn alpha_plane_size(pixels: usize, bits: usize) -> Option<usize> {
    pixels.checked_mul(bits).map(|total| total.div_ceil(8))
}

/// Check that a mipmap body holds at least `expected` bytes
pub fn check_size(input: &[u8], expected: Option<usize>) -> Result<()> {
    let Some(expected) = expected else {
        error!(
            "Mipmap dimensions overflow the addressable size, body has {} bytes",
            input.len()
        );
        return Err(Error::TruncatedMipmap {
            expected: usize::MAX,
            actual: input.len(),
        });
    };
    if input.len() < expected {
        error!(
            "Mipmap body is too short! {} < {}",
            input.len(),
            expected
        );
        return Err(Error::TruncatedMipmap {
            expected,
            actual: input.len(),
        });
    }
    Ok(())
}
