//! WASM module container: header validation and section walking.
//!
//! This module owns the container-level view of a WASM binary. It can tell
//! whether a buffer is a module at all (pure function of the first 8 bytes),
//! and it can walk the flat section list to find the payload ranges the
//! disassembler cares about. Nothing here decodes instructions; that is the
//! [`crate::disassembler`] layer, which consumes the code-section range this
//! layer produces.
//!
//! # Key Components
//!
//! - [`crate::Module`] - Container facade: validity check and section walk
//! - [`crate::SectionId`] / [`crate::Sections`] - Section ids and tracked ranges
//! - [`crate::Parser`] - Bounds-checked byte cursor the walk runs on
//! - [`crate::decode_uleb128`] / [`crate::decode_sleb128`] - Varint primitives
//!
//! # Usage Examples
//!
//! ```rust
//! use wasmscope::Module;
//!
//! // Smallest possible module: magic + version, no sections
//! let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//! let module = Module::new(&bytes);
//!
//! assert!(module.is_valid());
//! assert!(module.sections()?.code.is_none());
//! # Ok::<(), wasmscope::Error>(())
//! ```

pub mod parser;
pub mod varint;

mod sections;

pub use sections::{SectionId, Sections};

use crate::{module::parser::Parser, Error, Result};

/// The 4-byte magic every WASM module starts with (`\0asm`).
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// The binary-format version this crate understands.
pub const WASM_VERSION: u32 = 1;

/// Container-level view of a WASM module buffer.
///
/// A `Module` borrows its bytes for its entire life and never mutates them;
/// construction cannot fail. Validity is checked lazily through
/// [`Module::is_valid`], and the section walk reports structural problems as
/// errors rather than guessing.
///
/// # Examples
///
/// ```rust
/// use wasmscope::Module;
///
/// let module = Module::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// assert!(module.is_valid());
///
/// let module = Module::new(&[0xFF, 0xFF]);
/// assert!(!module.is_valid());
/// ```
pub struct Module<'data> {
    /// The raw module bytes
    data: &'data [u8],
}

impl<'data> Module<'data> {
    /// Create a new [`crate::Module`] over the given buffer.
    ///
    /// # Arguments
    /// * `data` - The raw module bytes
    #[must_use]
    pub fn new(data: &'data [u8]) -> Self {
        Module { data }
    }

    /// Get access to the underlying module bytes.
    #[must_use]
    pub fn data(&self) -> &'data [u8] {
        self.data
    }

    /// Check whether the buffer starts with a valid WASM header.
    ///
    /// True when the buffer holds at least 8 bytes, begins with the
    /// [`WASM_MAGIC`] and declares [`WASM_VERSION`] in little-endian.
    /// Section-level corruption is not caught here; it surfaces later as a
    /// decode failure.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.data.len() < 8 {
            return false;
        }

        if self.data[0..4] != WASM_MAGIC {
            return false;
        }

        let version = u32::from_le_bytes([self.data[4], self.data[5], self.data[6], self.data[7]]);
        version == WASM_VERSION
    }

    /// Walk the top-level section list and record the tracked payload ranges.
    ///
    /// Sections are read as id byte, ULEB128 size, then `size` payload bytes.
    /// Type, function and code section ranges are recorded; everything else
    /// is skipped by its declared size, unknown ids included.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidModule`] when the header check fails, and
    /// [`crate::Error::Malformed`] when a declared section size runs past the
    /// end of the buffer.
    pub fn sections(&self) -> Result<Sections> {
        if !self.is_valid() {
            return Err(Error::InvalidModule);
        }

        let mut sections = Sections::default();
        let mut parser = Parser::new(self.data);
        parser.advance_by(8)?;

        while parser.has_more_data() {
            let id = parser.read_u8()?;
            let declared = parser.read_uleb128()?;
            let Ok(size) = usize::try_from(declared) else {
                return Err(malformed_error!(
                    "Section {} declares an unaddressable size - {}",
                    id,
                    declared
                ));
            };

            let start = parser.pos();
            let Some(end) = start.checked_add(size) else {
                return Err(malformed_error!(
                    "Section {} payload overflows - start {} + size {}",
                    id,
                    start,
                    size
                ));
            };
            if end > parser.len() {
                return Err(malformed_error!(
                    "Section {} payload runs past the end of the module - {} > {}",
                    id,
                    end,
                    parser.len()
                ));
            }

            match SectionId::from_u8(id) {
                Some(SectionId::Type) => sections.types = Some(start..end),
                Some(SectionId::Function) => sections.functions = Some(start..end),
                Some(SectionId::Code) => {
                    log::debug!("code section payload at [{:#x}, {:#x})", start, end);
                    sections.code = Some(start..end);
                }
                _ => {}
            }

            parser.advance_by(size)?;
        }

        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use crate::test::{build_minimal_wasm, encode_uleb128};

    use super::*;

    #[test]
    fn is_valid_accepts_empty_module() {
        let module = Module::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
        assert!(module.is_valid());
    }

    #[test]
    fn is_valid_rejects_short_buffer() {
        assert!(!Module::new(&[0x00, 0x61]).is_valid());
        assert!(!Module::new(&[]).is_valid());
    }

    #[test]
    fn is_valid_rejects_wrong_magic() {
        let module = Module::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01, 0x00, 0x00, 0x00]);
        assert!(!module.is_valid());
    }

    #[test]
    fn is_valid_rejects_wrong_version() {
        let module = Module::new(&[0x00, 0x61, 0x73, 0x6D, 0x02, 0x00, 0x00, 0x00]);
        assert!(!module.is_valid());
    }

    #[test]
    fn sections_tracks_type_function_and_code() {
        let wasm = build_minimal_wasm(&[0x01]);
        let module = Module::new(&wasm);

        let sections = module.sections().unwrap();
        assert!(sections.types.is_some());
        assert!(sections.functions.is_some());

        let code = sections.code.unwrap();
        assert!(code.start > 8);
        assert_eq!(code.end, wasm.len());
    }

    #[test]
    fn sections_empty_module_has_none() {
        let module = Module::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
        let sections = module.sections().unwrap();
        assert_eq!(sections, Sections::default());
    }

    #[test]
    fn sections_skips_unknown_ids() {
        let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        // Section id 42 with a 3-byte payload, then an empty code section
        wasm.extend_from_slice(&[42, 0x03, 0xAA, 0xBB, 0xCC]);
        wasm.extend_from_slice(&[10, 0x00]);

        let sections = Module::new(&wasm).sections().unwrap();
        let code = sections.code.unwrap();
        assert_eq!(code.start, code.end);
    }

    #[test]
    fn sections_rejects_oversized_section() {
        let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        // Code section claiming 100 payload bytes with only 1 present
        wasm.extend_from_slice(&[10]);
        wasm.extend_from_slice(&encode_uleb128(100));
        wasm.push(0x00);

        assert!(Module::new(&wasm).sections().is_err());
    }

    #[test]
    fn sections_rejects_invalid_header() {
        let module = Module::new(&[0xFF, 0xFF]);
        assert!(matches!(module.sections(), Err(Error::InvalidModule)));
    }
}
