//! Binary buffers for wire encoding.
//!
//! [`InputBuffer`] walks a borrowed byte slice and [`OutputBuffer`] grows an owned one;
//! both carry the [`Endian`] order they were created with, so a message is encoded and
//! decoded consistently without threading the byte order through every call. Strings go
//! over the wire as a `u16` byte length followed by UTF-8 bytes.

use std::io;

use strum::Display;

use crate::{Error, Result};

/// Byte order applied to every multi-byte read or write of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Endian {
    /// Most significant byte first; the network order.
    Big,
    /// Least significant byte first.
    Little,
}

impl Default for Endian {
    fn default() -> Self {
        Endian::Big
    }
}

/// A cursor over a borrowed byte slice.
///
/// Reads advance the cursor and fail with [`Error::Io`] (kind `UnexpectedEof`) when the
/// slice runs out, leaving the cursor where it was.
///
/// # Examples
///
/// ```rust
/// use syncommon::io::{Endian, InputBuffer};
///
/// let mut input = InputBuffer::new(&[0x12, 0x34], Endian::Big);
/// assert_eq!(input.read_u16()?, 0x1234);
/// assert_eq!(input.remaining(), 0);
/// # Ok::<(), syncommon::Error>(())
/// ```
pub struct InputBuffer<'a> {
    data: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> InputBuffer<'a> {
    /// Creates a cursor at the start of `data`.
    pub fn new(data: &'a [u8], endian: Endian) -> InputBuffer<'a> {
        InputBuffer {
            data,
            pos: 0,
            endian,
        }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The cursor offset from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a `u16` in the buffer's byte order.
    pub fn read_u16(&mut self) -> Result<u16> {
        let raw = self.read_array::<2>()?;
        Ok(match self.endian {
            Endian::Big => u16::from_be_bytes(raw),
            Endian::Little => u16::from_le_bytes(raw),
        })
    }

    /// Reads a `u32` in the buffer's byte order.
    pub fn read_u32(&mut self) -> Result<u32> {
        let raw = self.read_array::<4>()?;
        Ok(match self.endian {
            Endian::Big => u32::from_be_bytes(raw),
            Endian::Little => u32::from_le_bytes(raw),
        })
    }

    /// Reads a `u64` in the buffer's byte order.
    pub fn read_u64(&mut self) -> Result<u64> {
        let raw = self.read_array::<8>()?;
        Ok(match self.endian {
            Endian::Big => u64::from_be_bytes(raw),
            Endian::Little => u64::from_le_bytes(raw),
        })
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// Fails with kind `InvalidData` when the bytes behind the prefix are not valid UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "string bytes are not valid UTF-8",
            ))
        })
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        Ok(raw)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "need {len} bytes at offset {}, {} available",
                    self.pos,
                    self.remaining()
                ),
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }
}

/// A growable byte buffer with a fixed byte order.
///
/// # Examples
///
/// ```rust
/// use syncommon::io::{Endian, OutputBuffer};
///
/// let mut output = OutputBuffer::new(Endian::Big);
/// output.write_u16(0x1234);
/// assert_eq!(output.as_slice(), &[0x12, 0x34]);
/// ```
pub struct OutputBuffer {
    data: Vec<u8>,
    endian: Endian,
}

impl OutputBuffer {
    /// Creates an empty buffer.
    pub fn new(endian: Endian) -> OutputBuffer {
        OutputBuffer {
            data: Vec::new(),
            endian,
        }
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize, endian: Endian) -> OutputBuffer {
        OutputBuffer {
            data: Vec::with_capacity(capacity),
            endian,
        }
    }

    /// Appends one byte.
    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Appends a `u16` in the buffer's byte order.
    pub fn write_u16(&mut self, value: u16) {
        match self.endian {
            Endian::Big => self.data.extend_from_slice(&value.to_be_bytes()),
            Endian::Little => self.data.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Appends a `u32` in the buffer's byte order.
    pub fn write_u32(&mut self, value: u32) {
        match self.endian {
            Endian::Big => self.data.extend_from_slice(&value.to_be_bytes()),
            Endian::Little => self.data.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Appends a `u64` in the buffer's byte order.
    pub fn write_u64(&mut self, value: u64) {
        match self.endian {
            Endian::Big => self.data.extend_from_slice(&value.to_be_bytes()),
            Endian::Little => self.data.extend_from_slice(&value.to_le_bytes()),
        }
    }

    /// Appends raw bytes without a length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends a length-prefixed UTF-8 string.
    ///
    /// The prefix is a `u16`, so strings longer than 65535 bytes are refused with kind
    /// `InvalidInput`.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {} bytes exceeds the u16 length prefix", value.len()),
            ))
        })?;
        self.write_u16(len);
        self.data.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The encoded bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the encoded bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
