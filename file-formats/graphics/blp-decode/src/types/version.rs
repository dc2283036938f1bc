use std::fmt;

/// Container version, distinguished by the 4-byte magic at the start of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlpVersion {
    /// `BLP1`, Warcraft III era textures
    Blp1 = 1,
    /// `BLP2`, World of Warcraft textures
    Blp2 = 2,
}

impl BlpVersion {
    /// Match the magic tag of the file to a known version
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match &magic {
            b"BLP1" => Some(BlpVersion::Blp1),
            b"BLP2" => Some(BlpVersion::Blp2),
            _ => None,
        }
    }

    /// Size of the fixed header in bytes, magic included
    pub fn header_size(self) -> usize {
        match self {
            BlpVersion::Blp1 => 4 + 6 * 4 + 16 * 4 * 2,
            BlpVersion::Blp2 => 4 + 4 + 4 + 2 * 4 + 16 * 4 * 2,
        }
    }
}

impl fmt::Display for BlpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlpVersion::Blp1 => write!(f, "BLP1"),
            BlpVersion::Blp2 => write!(f, "BLP2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic() {
        assert_eq!(BlpVersion::from_magic(*b"BLP1"), Some(BlpVersion::Blp1));
        assert_eq!(BlpVersion::from_magic(*b"BLP2"), Some(BlpVersion::Blp2));
        assert_eq!(BlpVersion::from_magic(*b"BLP0"), None);
        assert_eq!(BlpVersion::from_magic(*b"DDS "), None);
    }

    #[test]
    fn test_header_sizes() {
        assert_eq!(BlpVersion::Blp1.header_size(), 156);
        assert_eq!(BlpVersion::Blp2.header_size(), 148);
        assert_eq!(BlpVersion::Blp2 as u8, 2);
    }
}
