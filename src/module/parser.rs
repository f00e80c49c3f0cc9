//! Low-level byte cursor for walking WASM module structures.
//!
//! This module provides the [`crate::Parser`] type, a bounds-checked cursor
//! over a byte slice. The section walk and the instruction stream both drive
//! one of these: every read validates availability first, so truncated or
//! corrupted modules surface as [`crate::Error::OutOfBounds`] instead of
//! panicking or reading garbage.
//!
//! # Usage Examples
//!
//! ```rust
//! use wasmscope::Parser;
//!
//! let data = [0x0A, 0x85, 0x02, 0xFF];
//! let mut parser = Parser::new(&data);
//!
//! let id = parser.read_u8()?;
//! assert_eq!(id, 0x0A);
//!
//! // 0x85 0x02 is ULEB128 for 261
//! let size = parser.read_uleb128()?;
//! assert_eq!(size, 261);
//! assert_eq!(parser.pos(), 3);
//! # Ok::<(), wasmscope::Error>(())
//! ```

use crate::{module::varint::decode_uleb128, Result};

/// A bounds-checked cursor over the bytes of a WASM module.
///
/// `Parser` maintains a position within a borrowed byte slice and exposes the
/// small set of reads the binary format needs: single bytes for section ids
/// and opcodes, ULEB128 varints for sizes and counts, and free navigation for
/// skipping payloads. All operations validate data availability before
/// touching the buffer.
///
/// # Examples
///
/// ```rust
/// use wasmscope::Parser;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut parser = Parser::new(&data);
///
/// parser.advance_by(2)?;
/// assert_eq!(parser.read_u8()?, 0x03);
/// assert!(parser.has_more_data());
/// # Ok::<(), wasmscope::Error>(())
/// ```
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of bytes between the current position and the end
    /// of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Move the current position to the specified index.
    ///
    /// # Arguments
    /// * `pos` - The position to move the cursor to
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// Advancing exactly to the end of the buffer is allowed; passing it is
    /// not.
    ///
    /// # Arguments
    /// * `step` - Amount of bytes to advance
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        let Some(end) = self.position.checked_add(step) else {
            return Err(out_of_bounds_error!());
        };
        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = end;
        Ok(())
    }

    /// Read a single byte and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if no byte is available.
    pub fn read_u8(&mut self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    /// Read a ULEB128-encoded integer and advance past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the buffer is exhausted.
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let (value, consumed) = decode_uleb128(&self.data[self.position..]);
        if consumed == 0 {
            return Err(out_of_bounds_error!());
        }

        self.position += consumed;
        Ok(value)
    }
}
