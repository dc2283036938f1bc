use crate::error::{Error, Result};
use log::trace;

/// Maximum number of mipmap levels a BLP header can address
pub const MAX_MIPMAPS: usize = 16;

/// Offsets and sizes of every mipmap level stored in the file
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MipmapLocator {
    /// Byte offsets to each mipmap level
    pub offsets: [u32; MAX_MIPMAPS],
    /// Byte sizes of each mipmap level
    pub lengths: [u32; MAX_MIPMAPS],
}

impl Default for MipmapLocator {
    fn default() -> Self {
        MipmapLocator {
            offsets: [0; MAX_MIPMAPS],
            lengths: [0; MAX_MIPMAPS],
        }
    }
}

impl MipmapLocator {
    /// Number of leading non-zero offsets, which is the number of usable levels.
    pub fn mipmap_count(&self) -> usize {
        self.offsets.iter().take_while(|&&offset| offset != 0).count()
    }

    /// Resolve a requested level to a level that actually exists.
    ///
    /// Levels past the end resolve to the smallest stored mipmap. Fails with
    /// [`Error::NoMipmaps`] when there is nothing to resolve to.
    pub fn clamp_level(&self, level: usize) -> Result<usize> {
        let count = self.mipmap_count();
        if count == 0 {
            return Err(Error::NoMipmaps);
        }
        if level >= count {
            trace!("Mipmap level {level} doesn't exist, using level {}", count - 1);
            Ok(count - 1)
        } else {
            Ok(level)
        }
    }

    /// Offset and length in bytes of the (clamped) level
    pub fn byte_range(&self, level: usize) -> Result<(u32, u32)> {
        let level = self.clamp_level(level)?;
        Ok((self.offsets[level], self.lengths[level]))
    }
}
