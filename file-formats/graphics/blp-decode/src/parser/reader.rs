//! Little-endian reading helpers over any [`std::io::Read`] stream.

use crate::error::Result;
use std::io::Read;

/// Trait for reading binary fields from a stream
pub trait ByteReader {
    /// Read a single unsigned 8-bit integer
    fn read_u8(&mut self) -> Result<u8>;

    /// Read a single unsigned 32-bit integer in little-endian format
    fn read_u32_le(&mut self) -> Result<u32>;

    /// Fill the whole buffer
    fn read_into(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<R: Read + ?Sized> ByteReader for R {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_u32_le(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        self.read_exact(buf)?;
        Ok(())
    }
}

/// Read a fixed number of little-endian u32 values
pub fn read_u32_array<const N: usize>(reader: &mut impl ByteReader) -> Result<[u32; N]> {
    let mut values = [0u32; N];
    for value in values.iter_mut() {
        *value = reader.read_u32_le()?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    #[test]
    fn test_read_fields() {
        let mut reader = Cursor::new(vec![0x2A, 0x01, 0x02, 0x03, 0x04, 0xAA, 0xBB]);
        assert_eq!(reader.read_u8().unwrap(), 0x2A);
        assert_eq!(reader.read_u32_le().unwrap(), 0x0403_0201);
        let mut rest = [0u8; 2];
        reader.read_into(&mut rest).unwrap();
        assert_eq!(rest, [0xAA, 0xBB]);
        assert!(matches!(reader.read_u8(), Err(Error::UnexpectedEof)));
    }

    #[test]
    fn test_read_u32_array() {
        let data: Vec<u8> = [1u32, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let mut reader = Cursor::new(data);
        let values: [u32; 3] = read_u32_array(&mut reader).unwrap();
        assert_eq!(values, [1, 2, 3]);

        let mut short = Cursor::new(vec![0u8; 7]);
        assert!(read_u32_array::<2>(&mut short).is_err());
    }
}
