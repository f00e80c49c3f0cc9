//! Offset-centered instruction windows.

use crate::disassembler::Instruction;

/// A bounded window of decoded instructions around a target offset.
///
/// Produced by [`crate::Disassembler::disassemble_at`]. The window holds at
/// most `2 * context_lines + 1` instructions. When the target offset matches
/// an instruction exactly, [`Snippet::target_index`] points at it within the
/// window; otherwise the window is a best-effort view around the nearest
/// instruction at or before the offset and the index is `None`.
///
/// # Examples
///
/// ```rust
/// use wasmscope::{Instruction, Snippet};
///
/// let nop = |offset| Instruction {
///     offset,
///     opcode: 0x01,
///     mnemonic: "nop".to_string(),
///     operands: String::new(),
///     size: 1,
/// };
///
/// let snippet = Snippet::around(vec![nop(0), nop(1), nop(2)], 1, 1);
/// assert_eq!(snippet.target_index, Some(1));
/// assert_eq!(snippet.format(), "  0x0000: nop\n> 0x0001: nop\n  0x0002: nop\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Decoded instructions in ascending offset order
    pub instructions: Vec<Instruction>,
    /// The byte offset the window was requested for
    pub target_offset: u64,
    /// Index of the instruction whose offset equals the target, if any
    pub target_index: Option<usize>,
}

impl Snippet {
    /// Slice a window out of a flat instruction list.
    ///
    /// The window is centered on the instruction whose offset equals
    /// `target_offset`, or on the nearest instruction at or before it when
    /// there is no exact match. `context_lines` instructions are kept on
    /// each side, clamped to the list bounds. `target_index` is set only for
    /// an exact match.
    ///
    /// # Arguments
    /// * `instructions` - Flat list ordered by ascending offset
    /// * `target_offset` - Byte offset to center the window on
    /// * `context_lines` - Instructions to keep on each side of the center
    #[must_use]
    pub fn around(instructions: Vec<Instruction>, target_offset: u64, context_lines: usize) -> Self {
        if instructions.is_empty() {
            return Snippet {
                instructions: Vec::new(),
                target_offset,
                target_index: None,
            };
        }

        let (center, exact) =
            match instructions.binary_search_by_key(&target_offset, |inst| inst.offset) {
                Ok(index) => (index, true),
                Err(insertion) => (insertion.saturating_sub(1), false),
            };

        let start = center.saturating_sub(context_lines);
        let end = usize::min(
            center.saturating_add(context_lines).saturating_add(1),
            instructions.len(),
        );

        Snippet {
            instructions: instructions
                .into_iter()
                .skip(start)
                .take(end - start)
                .collect(),
            target_offset,
            target_index: exact.then_some(center - start),
        }
    }

    /// Render the window as a WAT text block.
    ///
    /// One line per instruction, each showing its offset and WAT form. The
    /// target line carries a `"> "` arrow, all others a two-space indent.
    /// An empty window renders a short placeholder message instead.
    #[must_use]
    pub fn format(&self) -> String {
        if self.instructions.is_empty() {
            return "  <no instructions decoded>".to_string();
        }

        let mut out = String::new();
        for (i, inst) in self.instructions.iter().enumerate() {
            let marker = if self.target_index == Some(i) {
                "> "
            } else {
                "  "
            };
            out.push_str(&format!("{}0x{:04x}: {}\n", marker, inst.offset, inst));
        }
        out
    }
}
