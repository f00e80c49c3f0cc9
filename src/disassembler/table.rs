//! Data-driven opcode dispatch table.
//!
//! Each supported opcode has one [`OpcodeEntry`] row naming its WAT mnemonic
//! and the shape of its immediate bytes. The rows are folded into a 256-slot
//! lookup table at compile time, so decoding one opcode is a single array
//! index followed by an immediate read driven by [`ImmediateKind`].
//!
//! Opcodes without a row never fail to decode. They produce an
//! `unknown_0x..` placeholder and consume no immediate bytes, so the stream
//! walker always advances by at least the opcode byte itself.

use crate::module::varint::{decode_sleb128, decode_uleb128};

/// Shape of the immediate bytes that follow an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateKind {
    /// No immediate bytes
    None,
    /// Single block-type byte, or a signed LEB128 type index
    BlockType,
    /// ULEB128 label index, rendered as a bare decimal
    LabelIdx,
    /// ULEB128 target count followed by `count + 1` label indices
    BrTable,
    /// ULEB128 function index, rendered as `$funcN`
    FuncIdx,
    /// ULEB128 type index followed by a ULEB128 table index
    CallIndirect,
    /// ULEB128 local or global index, rendered as a bare decimal
    VarIdx,
    /// ULEB128 alignment exponent followed by a ULEB128 byte offset
    Memarg,
    /// ULEB128 memory index, consumed but not rendered
    MemIdx,
    /// SLEB128 value rendered as a signed 32-bit decimal
    ConstI32,
    /// SLEB128 value rendered as a signed 64-bit decimal
    ConstI64,
    /// 4 little-endian bytes of an IEEE 754 single
    ConstF32,
    /// 8 little-endian bytes of an IEEE 754 double
    ConstF64,
}

/// One row of the opcode table.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeEntry {
    /// The opcode byte this row describes
    pub code: u8,
    /// WAT mnemonic
    pub mnemonic: &'static str,
    /// Shape of the immediate bytes that follow the opcode
    pub immediate: ImmediateKind,
}

const fn op(code: u8, mnemonic: &'static str, immediate: ImmediateKind) -> OpcodeEntry {
    OpcodeEntry {
        code,
        mnemonic,
        immediate,
    }
}

const ENTRIES: &[OpcodeEntry] = &[
    // Control flow
    op(0x00, "unreachable", ImmediateKind::None),
    op(0x01, "nop", ImmediateKind::None),
    op(0x02, "block", ImmediateKind::BlockType),
    op(0x03, "loop", ImmediateKind::BlockType),
    op(0x04, "if", ImmediateKind::BlockType),
    op(0x05, "else", ImmediateKind::None),
    op(0x0b, "end", ImmediateKind::None),
    op(0x0c, "br", ImmediateKind::LabelIdx),
    op(0x0d, "br_if", ImmediateKind::LabelIdx),
    op(0x0e, "br_table", ImmediateKind::BrTable),
    op(0x0f, "return", ImmediateKind::None),
    op(0x10, "call", ImmediateKind::FuncIdx),
    op(0x11, "call_indirect", ImmediateKind::CallIndirect),
    // Parametric
    op(0x1a, "drop", ImmediateKind::None),
    op(0x1b, "select", ImmediateKind::None),
    // Variable access
    op(0x20, "local.get", ImmediateKind::VarIdx),
    op(0x21, "local.set", ImmediateKind::VarIdx),
    op(0x22, "local.tee", ImmediateKind::VarIdx),
    op(0x23, "global.get", ImmediateKind::VarIdx),
    op(0x24, "global.set", ImmediateKind::VarIdx),
    // Memory
    op(0x28, "i32.load", ImmediateKind::Memarg),
    op(0x29, "i64.load", ImmediateKind::Memarg),
    op(0x2a, "f32.load", ImmediateKind::Memarg),
    op(0x2b, "f64.load", ImmediateKind::Memarg),
    op(0x36, "i32.store", ImmediateKind::Memarg),
    op(0x37, "i64.store", ImmediateKind::Memarg),
    op(0x3f, "memory.size", ImmediateKind::MemIdx),
    op(0x40, "memory.grow", ImmediateKind::MemIdx),
    // Constants
    op(0x41, "i32.const", ImmediateKind::ConstI32),
    op(0x42, "i64.const", ImmediateKind::ConstI64),
    op(0x43, "f32.const", ImmediateKind::ConstF32),
    op(0x44, "f64.const", ImmediateKind::ConstF64),
    // i32 comparison
    op(0x45, "i32.eqz", ImmediateKind::None),
    op(0x46, "i32.eq", ImmediateKind::None),
    op(0x47, "i32.ne", ImmediateKind::None),
    op(0x48, "i32.lt_s", ImmediateKind::None),
    op(0x49, "i32.lt_u", ImmediateKind::None),
    op(0x4a, "i32.gt_s", ImmediateKind::None),
    op(0x4b, "i32.gt_u", ImmediateKind::None),
    op(0x4c, "i32.le_s", ImmediateKind::None),
    op(0x4d, "i32.le_u", ImmediateKind::None),
    op(0x4e, "i32.ge_s", ImmediateKind::None),
    op(0x4f, "i32.ge_u", ImmediateKind::None),
    // i64 comparison
    op(0x50, "i64.eqz", ImmediateKind::None),
    op(0x51, "i64.eq", ImmediateKind::None),
    op(0x52, "i64.ne", ImmediateKind::None),
    // i32 arithmetic
    op(0x67, "i32.clz", ImmediateKind::None),
    op(0x68, "i32.ctz", ImmediateKind::None),
    op(0x69, "i32.popcnt", ImmediateKind::None),
    op(0x6a, "i32.add", ImmediateKind::None),
    op(0x6b, "i32.sub", ImmediateKind::None),
    op(0x6c, "i32.mul", ImmediateKind::None),
    op(0x6d, "i32.div_s", ImmediateKind::None),
    op(0x6e, "i32.div_u", ImmediateKind::None),
    op(0x6f, "i32.rem_s", ImmediateKind::None),
    op(0x70, "i32.rem_u", ImmediateKind::None),
    op(0x71, "i32.and", ImmediateKind::None),
    op(0x72, "i32.or", ImmediateKind::None),
    op(0x73, "i32.xor", ImmediateKind::None),
    op(0x74, "i32.shl", ImmediateKind::None),
    op(0x75, "i32.shr_s", ImmediateKind::None),
    op(0x76, "i32.shr_u", ImmediateKind::None),
    op(0x77, "i32.rotl", ImmediateKind::None),
    op(0x78, "i32.rotr", ImmediateKind::None),
    // i64 arithmetic
    op(0x79, "i64.clz", ImmediateKind::None),
    op(0x7a, "i64.ctz", ImmediateKind::None),
    op(0x7c, "i64.add", ImmediateKind::None),
    op(0x7d, "i64.sub", ImmediateKind::None),
    op(0x7e, "i64.mul", ImmediateKind::None),
    // Conversions
    op(0xa7, "i32.wrap_i64", ImmediateKind::None),
    op(0xac, "i64.extend_i32_s", ImmediateKind::None),
    op(0xad, "i64.extend_i32_u", ImmediateKind::None),
];

static OPCODES: [Option<OpcodeEntry>; 256] = build_opcode_table();

const fn build_opcode_table() -> [Option<OpcodeEntry>; 256] {
    let mut table = [None; 256];

    let mut i = 0;
    while i < ENTRIES.len() {
        table[ENTRIES[i].code as usize] = Some(ENTRIES[i]);
        i += 1;
    }

    table
}

/// Decode a single opcode and its immediates.
///
/// `rest` holds the bytes following the opcode byte. Returns the WAT
/// mnemonic, the formatted operand string (empty when the instruction takes
/// none), and the number of immediate bytes consumed beyond the opcode
/// itself.
///
/// Opcodes outside the table are substituted with an `unknown_0x..`
/// placeholder and consume zero immediate bytes, so callers can keep walking
/// the stream one opcode at a time without special cases.
///
/// # Arguments
/// * `opcode` - The opcode byte to decode
/// * `rest` - The bytes following the opcode, used for immediate decoding
///
/// # Examples
///
/// ```rust
/// use wasmscope::decode_opcode;
///
/// let (mnemonic, operand, consumed) = decode_opcode(0x10, &[0x05]);
/// assert_eq!(mnemonic, "call");
/// assert_eq!(operand, "$func5");
/// assert_eq!(consumed, 1);
///
/// let (mnemonic, operand, consumed) = decode_opcode(0xFE, &[]);
/// assert_eq!(mnemonic, "unknown_0xfe");
/// assert!(operand.is_empty());
/// assert_eq!(consumed, 0);
/// ```
#[must_use]
pub fn decode_opcode(opcode: u8, rest: &[u8]) -> (String, String, usize) {
    let Some(entry) = OPCODES[opcode as usize] else {
        log::debug!("substituting placeholder for unknown opcode {:#04x}", opcode);
        return (format!("unknown_0x{opcode:02x}"), String::new(), 0);
    };

    let mnemonic = entry.mnemonic.to_string();
    match entry.immediate {
        ImmediateKind::None => (mnemonic, String::new(), 0),
        ImmediateKind::BlockType => {
            let (text, consumed) = decode_block_type(rest);
            (mnemonic, text.to_string(), consumed)
        }
        ImmediateKind::LabelIdx | ImmediateKind::VarIdx => {
            let (idx, consumed) = decode_uleb128(rest);
            (mnemonic, idx.to_string(), consumed)
        }
        ImmediateKind::BrTable => {
            let (count, mut consumed) = decode_uleb128(rest);

            // Targets plus the default label
            let mut remaining = count.saturating_add(1);
            while remaining > 0 {
                let (_, n) = decode_uleb128(&rest[consumed..]);
                if n == 0 {
                    break;
                }
                consumed += n;
                remaining -= 1;
            }

            (mnemonic, format!("(count={count})"), consumed)
        }
        ImmediateKind::FuncIdx => {
            let (idx, consumed) = decode_uleb128(rest);
            (mnemonic, format!("$func{idx}"), consumed)
        }
        ImmediateKind::CallIndirect => {
            let (type_idx, first) = decode_uleb128(rest);
            let (_, second) = decode_uleb128(&rest[first..]);
            (mnemonic, format!("(type {type_idx})"), first + second)
        }
        ImmediateKind::Memarg => {
            let (align, first) = decode_uleb128(rest);
            let (offset, second) = decode_uleb128(&rest[first..]);
            (mnemonic, format!("offset={offset} align={align}"), first + second)
        }
        ImmediateKind::MemIdx => {
            let (_, consumed) = decode_uleb128(rest);
            (mnemonic, String::new(), consumed)
        }
        ImmediateKind::ConstI32 => {
            let (value, consumed) = decode_sleb128(rest);
            #[allow(clippy::cast_possible_truncation)]
            let value = value as i32;
            (mnemonic, value.to_string(), consumed)
        }
        ImmediateKind::ConstI64 => {
            let (value, consumed) = decode_sleb128(rest);
            (mnemonic, value.to_string(), consumed)
        }
        ImmediateKind::ConstF32 => {
            if rest.len() < 4 {
                return (mnemonic, "?".to_string(), 0);
            }
            let bits = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            (mnemonic, f32::from_bits(bits).to_string(), 4)
        }
        ImmediateKind::ConstF64 => {
            if rest.len() < 8 {
                return (mnemonic, "?".to_string(), 0);
            }
            let bits = u64::from_le_bytes([
                rest[0], rest[1], rest[2], rest[3], rest[4], rest[5], rest[6], rest[7],
            ]);
            (mnemonic, f64::from_bits(bits).to_string(), 8)
        }
    }
}

/// Decode the block-type immediate of `block`, `loop` and `if`.
///
/// Single-byte encodings cover the void block (`0x40`) and the four value
/// types. Anything else is treated as a signed LEB128 type-section index:
/// the index is consumed so the following instruction bytes stay aligned,
/// and rendered as an opaque `(type)` marker.
///
/// # Arguments
/// * `data` - The bytes at the block-type position
///
/// # Examples
///
/// ```rust
/// use wasmscope::decode_block_type;
///
/// assert_eq!(decode_block_type(&[0x40]), ("", 1));
/// assert_eq!(decode_block_type(&[0x7f]), ("(result i32)", 1));
/// assert_eq!(decode_block_type(&[]), ("", 0));
/// ```
#[must_use]
pub fn decode_block_type(data: &[u8]) -> (&'static str, usize) {
    let Some(&first) = data.first() else {
        return ("", 0);
    };

    match first {
        0x40 => ("", 1),
        0x7f => ("(result i32)", 1),
        0x7e => ("(result i64)", 1),
        0x7d => ("(result f32)", 1),
        0x7c => ("(result f64)", 1),
        _ => {
            let (_, consumed) = decode_sleb128(data);
            ("(type)", consumed)
        }
    }
}
