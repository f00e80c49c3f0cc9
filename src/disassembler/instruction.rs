//! Decoded instruction representation.

use std::fmt;

/// A single decoded WASM instruction.
///
/// Instances are produced by the stream walker in module order and carry
/// everything needed to render one WAT line: the absolute position of the
/// opcode byte, the mnemonic and a pre-formatted operand string.
///
/// # Examples
///
/// ```rust
/// use wasmscope::Instruction;
///
/// let inst = Instruction {
///     offset: 0x23,
///     opcode: 0x10,
///     mnemonic: "call".to_string(),
///     operands: "$func5".to_string(),
///     size: 2,
/// };
///
/// assert_eq!(inst.to_string(), "call $func5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Byte offset of the opcode within the module
    pub offset: u64,
    /// The raw opcode byte
    pub opcode: u8,
    /// WAT mnemonic, or an `unknown_0x..` placeholder
    pub mnemonic: String,
    /// Formatted operand string, empty when the instruction takes none
    pub operands: String,
    /// Total encoded size in bytes, opcode plus immediates
    pub size: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operands)
        }
    }
}
