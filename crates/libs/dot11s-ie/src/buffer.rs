use core::fmt;

use crate::error::IeError;

/// Sequential writer over a caller-provided byte slice.
pub struct OutputBuffer<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> OutputBuffer<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { offset: 0, buffer }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<usize, IeError> {
        let data_size = data.len();

        // Nothing to write
        if data_size == 0 {
            return Ok(0);
        }

        if (self.offset + data_size) > self.buffer.len() {
            return Err(IeError::BufferFull { needed: data_size, available: self.remaining() });
        }

        self.buffer[self.offset..(self.offset + data_size)].copy_from_slice(data);
        self.offset += data_size;

        Ok(data_size)
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<usize, IeError> {
        self.write(&[byte])
    }

    /// Writes `value` in network byte order.
    pub fn write_u16_be(&mut self, value: u16) -> Result<usize, IeError> {
        self.write(&value.to_be_bytes())
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn is_full(&self) -> bool {
        self.offset == self.buffer.len()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.offset]
    }
}

impl<'a> fmt::Display for OutputBuffer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ 0x")?;

        for byte in self.as_slice() {
            write!(f, "{:0>2x}", byte)?;
        }

        write!(f, " ]",)
    }
}

/// Sequential reader with position tracking.
#[derive(Clone)]
pub struct InputBuffer<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> InputBuffer<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { offset: 0, buffer }
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, IeError> {
        let size = buf.len();
        buf.copy_from_slice(self.read_slice(size)?);
        Ok(size)
    }

    pub fn read_byte(&mut self) -> Result<u8, IeError> {
        let mut buf = [0u8; 1];
        self.read(&mut buf)?;

        Ok(buf[0])
    }

    /// Reads a network byte order `u16`.
    pub fn read_u16_be(&mut self) -> Result<u16, IeError> {
        let mut buf = [0u8; 2];
        self.read(&mut buf)?;

        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8], IeError> {
        if size > self.bytes_left() {
            return Err(IeError::Truncated { needed: size, available: self.bytes_left() });
        }

        let buffer = self.buffer;
        let slice = &buffer[self.offset..self.offset + size];

        self.offset += size;

        Ok(slice)
    }

    pub fn bytes_left(&self) -> usize {
        self.buffer.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes consumed since `start`, which must be an earlier copy of this cursor.
    pub fn distance_from(&self, start: &InputBuffer<'_>) -> usize {
        self.offset.saturating_sub(start.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_buffer_writes_network_order() {
        let mut out = [0u8; 4];
        let mut buf = OutputBuffer::new(&mut out);
        buf.write_byte(0xAA).expect("byte");
        buf.write_u16_be(0x0102).expect("u16");
        assert_eq!(buf.as_slice(), &[0xAA, 0x01, 0x02]);
        assert_eq!(buf.remaining(), 1);
        assert!(!buf.is_full());
    }

    #[test]
    fn output_buffer_rejects_overflow() {
        let mut out = [0u8; 1];
        let mut buf = OutputBuffer::new(&mut out);
        let err = buf.write_u16_be(7).expect_err("must not fit");
        assert_eq!(err, IeError::BufferFull { needed: 2, available: 1 });
        assert_eq!(buf.offset(), 0);
    }

    #[test]
    fn input_buffer_tracks_distance() {
        let data = [0x10u8, 0x00, 0x07, 0x30];
        let start = InputBuffer::new(&data);
        let mut buf = start.clone();
        assert_eq!(buf.read_byte().expect("byte"), 0x10);
        assert_eq!(buf.read_u16_be().expect("u16"), 7);
        assert_eq!(buf.distance_from(&start), 3);
        assert_eq!(buf.bytes_left(), 1);
    }

    #[test]
    fn input_buffer_reports_truncation() {
        let data = [0x01u8];
        let mut buf = InputBuffer::new(&data);
        let err = buf.read_u16_be().expect_err("short read");
        assert_eq!(err, IeError::Truncated { needed: 2, available: 1 });
    }

    #[test]
    fn output_buffer_displays_hex() {
        let mut out = [0u8; 3];
        let mut buf = OutputBuffer::new(&mut out);
        buf.write(&[0x00, 0x0a, 0xff]).expect("write");
        assert_eq!(buf.to_string(), "[ 0x000aff ]");
    }
}
