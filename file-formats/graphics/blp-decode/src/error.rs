use thiserror::Error;

/// Errors that BLP parsing and decoding can produce
#[derive(Debug, Error)]
pub enum Error {
    /// The stream does not start with `BLP1` or `BLP2`
    #[error("Unexpected magic value {0}. The file format is not BLP or not supported.")]
    UnsupportedFormat(String),
    /// Header fields combine into a pixel format the decoder doesn't know
    #[error("Unknown pixel format with code {0:#08x}")]
    UnknownPixelFormat(u32),
    /// The offset table has no mipmap at all, so no level can be addressed
    #[error("BLP file doesn't declare any mipmap level")]
    NoMipmaps,
    /// Mipmap bytes are shorter than the pixel format requires
    #[error("Mipmap data is truncated: expected at least {expected} bytes, got {actual}")]
    TruncatedMipmap {
        /// Number of bytes the decoder needs
        expected: usize,
        /// Number of bytes actually available
        actual: usize,
    },
    /// External JPEG codec failed to decode the image
    #[error("Failed to decode JPEG content: {0}")]
    Jpeg(String),
    /// External codec produced a buffer of unexpected size
    #[error("Codec produced {actual} bytes when {expected} were expected")]
    CodecOutput {
        /// Size the adapter expects
        expected: usize,
        /// Size the codec returned
        actual: usize,
    },
    /// Unexpected end of stream while parsing
    #[error("Unexpected end of file")]
    UnexpectedEof,
    /// Underlying stream error
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    /// Error with context information
    #[error("Context: {0}. Error: {1}")]
    Context(String, Box<Self>),
}

impl Error {
    /// Add context information to an error
    pub fn with_context(self, context: &str) -> Self {
        Error::Context(context.to_owned(), Box::new(self))
    }

    /// Strip all context layers and return the underlying error
    pub fn root(&self) -> &Self {
        match self {
            Error::Context(_, inner) => inner.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::UnexpectedEof
        } else {
            Error::Io(e)
        }
    }
}

/// Result type for BLP operations
pub type Result<T> = std::result::Result<T, Error>;
