/// Pixel format classification
pub mod format;
/// BLP file header structures
pub mod header;
/// Mipmap locator information
pub mod locator;
/// Pixels, palettes and decoded buffers
pub mod pixel;
/// BLP version definitions
pub mod version;

pub use format::*;
pub use header::*;
pub use locator::*;
pub use pixel::*;
pub use version::*;
