//! Bounds-checked cursor over an immutable file buffer.
//!
//! All X3F fields are little-endian. Every read validates against the buffer
//! length before touching it and fails with [`X3fError::OutOfBoundsRead`]
//! instead of panicking.

use std::ops::{Deref, DerefMut};

use byteorder::{ByteOrder, LittleEndian};

use crate::x3f::common::error::{Result, X3fError};

#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Moves the cursor to an absolute offset. The end of the buffer itself is
    /// a valid position; anything past it is not.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(self.out_of_bounds(pos, 0));
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<()> {
        let target = self
            .pos
            .checked_add(len)
            .ok_or_else(|| self.out_of_bounds(self.pos, len))?;
        if target > self.data.len() {
            return Err(self.out_of_bounds(self.pos, len));
        }
        self.pos = target;
        Ok(())
    }

    /// Returns `len` bytes starting at the absolute `offset` without moving
    /// the cursor.
    pub fn sub_range(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| self.out_of_bounds(offset, len))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.sub_range(self.pos, len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(LittleEndian::read_f32)
    }

    /// Remembers the current position and hands out a guard that derefs to
    /// this reader. The position is put back when the guard drops, whichever
    /// way the caller leaves its scope.
    pub fn save(&mut self) -> SavedPosition<'_, 'a> {
        let saved = self.pos;
        SavedPosition {
            reader: self,
            saved,
        }
    }

    fn out_of_bounds(&self, offset: usize, len: usize) -> X3fError {
        X3fError::OutOfBoundsRead {
            offset,
            len,
            size: self.data.len(),
        }
    }
}

pub struct SavedPosition<'r, 'a> {
    reader: &'r mut ByteReader<'a>,
    saved: usize,
}

impl<'r, 'a> SavedPosition<'r, 'a> {
    pub fn saved(&self) -> usize {
        self.saved
    }
}

impl<'r, 'a> Deref for SavedPosition<'r, 'a> {
    type Target = ByteReader<'a>;

    fn deref(&self) -> &Self::Target {
        self.reader
    }
}

impl<'r, 'a> DerefMut for SavedPosition<'r, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.reader
    }
}

impl Drop for SavedPosition<'_, '_> {
    fn drop(&mut self) {
        // `saved` was a valid position when taken and the buffer never shrinks.
        self.reader.pos = self.saved;
    }
}
