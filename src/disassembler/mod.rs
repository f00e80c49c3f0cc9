//! WASM bytecode disassembly and WAT snippet rendering.
//!
//! This module decodes raw WASM instruction bytes into WAT-style text. It
//! exists to show the exact instruction a trap or trace event points at when
//! no source mapping is available, so decoding is deliberately tolerant:
//! unknown opcodes become placeholders and decoding always moves forward.
//!
//! # Key Types
//! - [`Disassembler`] - Facade from raw module bytes to instructions and snippets
//! - [`Instruction`] - A decoded instruction with offset, mnemonic and operands
//! - [`Snippet`] - A bounded instruction window around a target offset
//!
//! # Main Functions
//! - [`decode_code_section`] - Decode every function body in a code section
//! - [`decode_opcode`] - Decode one opcode and its immediates
//! - [`format_fallback`] - Error-tolerant rendering for display paths
//!
//! # Example
//! ```rust
//! use wasmscope::Disassembler;
//!
//! let bytes = [
//!     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
//!     0x01, 0x04, 0x01, 0x60, 0x00, 0x00, // type section
//!     0x03, 0x02, 0x01, 0x00, // function section
//!     0x0A, 0x05, 0x01, 0x03, 0x00, 0x01, 0x0B, // code section, one nop body
//! ];
//!
//! let disassembler = Disassembler::new(&bytes);
//! let snippet = disassembler.disassemble_at(0x17, 2)?;
//!
//! assert_eq!(snippet.target_index, Some(0));
//! assert_eq!(snippet.instructions[0].mnemonic, "nop");
//! # Ok::<(), wasmscope::Error>(())
//! ```

mod decoder;
mod instruction;
mod snippet;
mod table;

pub use decoder::decode_code_section;
pub use instruction::Instruction;
pub use snippet::Snippet;
pub use table::{decode_block_type, decode_opcode, ImmediateKind, OpcodeEntry};

use crate::{module::Module, Error, Result};

/// Disassembler over one WASM module buffer.
///
/// Wraps the module for its entire life and never mutates it; every call
/// decodes fresh from the raw bytes, so repeated calls and shared references
/// across threads are safe. Construction cannot fail, invalid input
/// surfaces when decoding is attempted.
///
/// # Examples
///
/// ```rust
/// use wasmscope::Disassembler;
///
/// let bytes = [
///     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
///     0x0A, 0x05, 0x01, 0x03, 0x00, 0x01, 0x0B, // code section, one nop body
/// ];
///
/// let disassembler = Disassembler::new(&bytes);
/// assert!(disassembler.is_valid());
///
/// let instructions = disassembler.decode_all()?;
/// assert_eq!(instructions.len(), 2);
/// # Ok::<(), wasmscope::Error>(())
/// ```
pub struct Disassembler<'data> {
    /// Container view of the module bytes
    module: Module<'data>,
}

impl<'data> Disassembler<'data> {
    /// Create a disassembler for the given module bytes.
    ///
    /// # Arguments
    /// * `data` - The raw WASM module bytes
    #[must_use]
    pub fn new(data: &'data [u8]) -> Self {
        Disassembler {
            module: Module::new(data),
        }
    }

    /// Check whether the buffer starts with a valid WASM header.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.module.is_valid()
    }

    /// Decode every instruction in the module's code section.
    ///
    /// Returns the flat, offset-ordered instruction list spanning all
    /// function bodies.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidModule`] when the header check fails,
    /// [`crate::Error::CodeSectionMissing`] when the module has no code
    /// section, and [`crate::Error::Malformed`] when declared sizes run past
    /// the buffer.
    pub fn decode_all(&self) -> Result<Vec<Instruction>> {
        if !self.module.is_valid() {
            return Err(Error::InvalidModule);
        }

        let sections = self.module.sections()?;
        let Some(code) = sections.code else {
            return Err(Error::CodeSectionMissing);
        };

        decode_code_section(self.module.data(), code)
    }

    /// Decode the module and slice a window around the given byte offset.
    ///
    /// The window holds up to `context_lines` instructions on each side of
    /// the target. An offset that matches no instruction is not an error;
    /// the returned snippet simply carries no target index.
    ///
    /// # Arguments
    /// * `target_offset` - Absolute byte offset of the instruction of interest
    /// * `context_lines` - Instructions to keep on each side of the target
    ///
    /// # Errors
    /// Fails only when the module itself cannot be decoded, with the same
    /// errors as [`Disassembler::decode_all`].
    pub fn disassemble_at(&self, target_offset: u64, context_lines: usize) -> Result<Snippet> {
        let instructions = self.decode_all()?;
        Ok(Snippet::around(instructions, target_offset, context_lines))
    }
}

/// Render a best-effort WAT snippet for display, never failing.
///
/// This is the display-path entry point used when source mapping is
/// unavailable: whatever state the bytes are in, it returns something
/// printable. Invalid or undecodable modules produce a short explanation
/// carrying the failing offset instead of an error.
///
/// `context_lines` values of zero or less fall back to 5.
///
/// # Arguments
/// * `wasm_bytes` - The raw WASM module bytes
/// * `failing_offset` - Absolute byte offset of the faulting instruction
/// * `context_lines` - Instructions to show on each side of the target
///
/// # Examples
///
/// ```rust
/// use wasmscope::format_fallback;
///
/// let text = format_fallback(&[0xFF, 0xFF], 0x42, 5);
/// assert!(text.contains("could not parse"));
/// ```
#[must_use]
pub fn format_fallback(wasm_bytes: &[u8], failing_offset: u64, context_lines: i32) -> String {
    let context_lines = usize::try_from(context_lines)
        .ok()
        .filter(|&lines| lines > 0)
        .unwrap_or(5);

    let disassembler = Disassembler::new(wasm_bytes);
    if !disassembler.is_valid() {
        return format!(
            "  Source mapping unavailable. WASM offset: 0x{failing_offset:x}\n  (could not parse WASM module)"
        );
    }

    let snippet = match disassembler.disassemble_at(failing_offset, context_lines) {
        Ok(snippet) => snippet,
        Err(error) => {
            return format!(
                "  Source mapping unavailable. WASM offset: 0x{failing_offset:x}\n  Disassembly error: {error}"
            );
        }
    };

    let mut out = String::from("Source mapping unavailable. Showing WAT disassembly:\n\n");
    out.push_str(&snippet.format());
    out.push_str(&format!(
        "\nFailing instruction at offset 0x{failing_offset:x}\n"
    ));
    out
}

#[cfg(test)]
mod tests {
    use crate::test::{build_minimal_wasm, build_wasm_with_bodies};

    use super::*;

    #[test]
    fn facade_decodes_minimal_module() {
        let wasm = build_minimal_wasm(&[0x01]);
        let disassembler = Disassembler::new(&wasm);

        assert!(disassembler.is_valid());

        let instructions = disassembler.decode_all().unwrap();
        assert_eq!(instructions.len(), 2);
    }

    #[test]
    fn decode_all_rejects_invalid_header() {
        let disassembler = Disassembler::new(&[0xFF, 0xFF, 0xFF]);
        assert!(matches!(
            disassembler.decode_all(),
            Err(Error::InvalidModule)
        ));
    }

    #[test]
    fn decode_all_requires_a_code_section() {
        let disassembler = Disassembler::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
        assert!(matches!(
            disassembler.decode_all(),
            Err(Error::CodeSectionMissing)
        ));
    }

    #[test]
    fn disassemble_at_finds_exact_offset() {
        let wasm = build_minimal_wasm(&[0x01, 0x01]);
        let disassembler = Disassembler::new(&wasm);

        let all = disassembler.decode_all().unwrap();
        let target = all[1].offset;

        let snippet = disassembler.disassemble_at(target, 1).unwrap();
        let index = snippet.target_index.unwrap();
        assert_eq!(snippet.instructions[index].offset, target);
        assert_eq!(snippet.target_offset, target);
    }

    #[test]
    fn disassemble_at_unmatched_offset_is_not_an_error() {
        let wasm = build_minimal_wasm(&[0x01]);
        let snippet = Disassembler::new(&wasm).disassemble_at(0, 3).unwrap();

        assert_eq!(snippet.target_index, None);
        assert!(!snippet.instructions.is_empty());
    }

    #[test]
    fn disassemble_at_bounds_the_window() {
        let wasm = build_wasm_with_bodies(&[&[0x01; 20]]);
        let disassembler = Disassembler::new(&wasm);

        let all = disassembler.decode_all().unwrap();
        let target = all[10].offset;

        let snippet = disassembler.disassemble_at(target, 3).unwrap();
        assert_eq!(snippet.instructions.len(), 7);
    }

    #[test]
    fn fallback_reports_unparsable_modules() {
        let text = format_fallback(&[0x00, 0x01, 0x02], 0x42, 5);

        assert!(text.contains("could not parse"));
        assert!(text.contains("0x42"));
    }

    #[test]
    fn fallback_reports_decode_failures() {
        let text = format_fallback(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00], 0x10, 5);

        assert!(text.contains("Disassembly error"));
        assert!(text.contains("code section not found"));
    }

    #[test]
    fn fallback_renders_snippet_with_marker() {
        let wasm = build_minimal_wasm(&[0x01, 0x01]);
        let target = Disassembler::new(&wasm).decode_all().unwrap()[0].offset;

        let text = format_fallback(&wasm, target, 5);

        assert!(text.starts_with("Source mapping unavailable. Showing WAT disassembly:\n\n"));
        assert!(text.contains("> "));
        assert!(text.ends_with(&format!("\nFailing instruction at offset 0x{target:x}\n")));
    }

    #[test]
    fn fallback_defaults_context_to_five() {
        let wasm = build_wasm_with_bodies(&[&[0x01; 12]]);
        let target = Disassembler::new(&wasm).decode_all().unwrap()[0].offset;

        let text = format_fallback(&wasm, target, 0);

        let marked = text.lines().filter(|l| l.starts_with("> 0x")).count();
        let context = text.lines().filter(|l| l.starts_with("  0x")).count();
        assert_eq!(marked, 1);
        assert_eq!(context, 5);
    }

    #[test]
    fn fallback_negative_context_behaves_like_default() {
        let wasm = build_minimal_wasm(&[0x01]);
        let target = Disassembler::new(&wasm).decode_all().unwrap()[0].offset;

        assert_eq!(
            format_fallback(&wasm, target, -3),
            format_fallback(&wasm, target, 5)
        );
    }
}
