//! Bounds-checked reads over borrowed report buffers

use crate::{ReportError, ReportResult};

/// Sequential little-endian reader over a report.
///
/// Borrows the buffer; nothing is copied, so it is usable from completion
/// callbacks without allocation.
#[derive(Debug, Clone)]
pub struct ReportParser<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> ReportParser<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> ReportResult<u8> {
        let value = self.byte_at(self.position)?;
        self.position = self.position.saturating_add(1);
        Ok(value)
    }

    pub fn read_u16_le(&mut self) -> ReportResult<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Random access to a byte at a fixed offset.
    pub fn byte_at(&self, offset: usize) -> ReportResult<u8> {
        self.buffer
            .get(offset)
            .copied()
            .ok_or(ReportError::Truncated {
                needed: offset.saturating_add(1),
                actual: self.buffer.len(),
            })
    }

    /// Little-endian 16-bit value at a fixed offset.
    pub fn u16_le_at(&self, offset: usize) -> ReportResult<u16> {
        let lo = self.byte_at(offset)?;
        let hi = self.byte_at(offset.saturating_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
