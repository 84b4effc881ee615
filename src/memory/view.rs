// Fri Oct 16 2026 - Alex

use crate::memory::MemoryError;
use std::ops::Range;

/// A borrowed window into a larger buffer. Remembers where it starts so that
/// offsets found inside it can be reported relative to the whole buffer.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    data: &'a [u8],
    base_offset: usize,
}

impl<'a> BufferView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, base_offset: 0 }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Narrows the view to `range`, given relative to this view.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, MemoryError> {
        if range.start > range.end || range.end > self.data.len() {
            return Err(MemoryError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.data.len(),
            });
        }

        Ok(Self {
            data: &self.data[range.clone()],
            base_offset: self.base_offset + range.start,
        })
    }

    pub fn absolute(&self, offset: usize) -> usize {
        self.base_offset + offset
    }
}
