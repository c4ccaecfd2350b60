//! Cursor types for reading and writing wire format.
//!
//! Reading always happens against the whole message buffer so that
//! compression pointers can be resolved. Writing goes through
//! [`WireWrite`], implemented for a growable `Vec<u8>` and for a fixed
//! caller-provided slice ([`SliceWriter`]).

use super::error::{Result, WireError};

/// Bounds-checked read cursor over a complete DNS message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The whole underlying message.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let value = *self
            .data
            .get(self.pos)
            .ok_or(WireError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(value)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_slice(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_slice(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Borrows the next `len` bytes and advances past them.
    #[inline]
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(WireError::UnexpectedEof { offset: end });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

/// Sink for encoded wire bytes.
pub trait WireWrite {
    /// Appends raw bytes.
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()>;

    /// Number of bytes written so far.
    fn position(&self) -> usize;

    /// Overwrites two already-written bytes at `at`.
    fn patch_u16(&mut self, at: usize, value: u16) -> Result<()>;

    #[inline]
    fn put_u8(&mut self, value: u8) -> Result<()> {
        self.put_slice(&[value])
    }

    #[inline]
    fn put_u16(&mut self, value: u16) -> Result<()> {
        self.put_slice(&value.to_be_bytes())
    }

    #[inline]
    fn put_u32(&mut self, value: u32) -> Result<()> {
        self.put_slice(&value.to_be_bytes())
    }
}

impl WireWrite for Vec<u8> {
    #[inline]
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn position(&self) -> usize {
        self.len()
    }

    fn patch_u16(&mut self, at: usize, value: u16) -> Result<()> {
        match self.get_mut(at..at + 2) {
            Some(slot) => {
                slot.copy_from_slice(&value.to_be_bytes());
                Ok(())
            }
            None => Err(WireError::UnexpectedEof { offset: at + 2 }),
        }
    }
}

/// Writes into a fixed, caller-owned buffer without reallocating.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl WireWrite for SliceWriter<'_> {
    fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.pos + bytes.len();
        if end > self.buf.len() {
            return Err(WireError::BufferFull {
                needed: end,
                capacity: self.buf.len(),
            });
        }
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    fn patch_u16(&mut self, at: usize, value: u16) -> Result<()> {
        if at + 2 > self.pos {
            return Err(WireError::UnexpectedEof { offset: at + 2 });
        }
        self.buf[at..at + 2].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}
