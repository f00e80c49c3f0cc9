//! Code-section instruction decoding.
//!
//! This module walks the function bodies inside a code-section payload and
//! produces one flat, offset-ordered instruction list for the whole module.
//! It is intended for callers who already know where the code section lives;
//! the [`crate::Disassembler`] facade wires it up from raw module bytes.
//!
//! # Example: Decoding a Code Section
//!
//! ```rust
//! use wasmscope::{disassembler::decode_code_section, Module};
//!
//! let bytes = [
//!     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
//!     0x0A, 0x05, 0x01, 0x03, 0x00, 0x01, 0x0B, // code section, one nop body
//! ];
//!
//! let code = Module::new(&bytes).sections()?.code.unwrap();
//! let instructions = decode_code_section(&bytes, code)?;
//!
//! assert_eq!(instructions.len(), 2);
//! assert_eq!(instructions[0].mnemonic, "nop");
//! assert_eq!(instructions[1].mnemonic, "end");
//! # Ok::<(), wasmscope::Error>(())
//! ```

use std::ops::Range;

use crate::{
    disassembler::{decode_opcode, Instruction},
    module::{parser::Parser, varint::decode_uleb128},
    Result,
};

/// Decode every function body in a code-section payload.
///
/// `range` is the payload span within `data`, as produced by
/// [`crate::Module::sections`]. The payload starts with a ULEB128 function
/// count; each body carries a ULEB128 size, its local declarations and the
/// instruction bytes terminated by `end`. Local declarations are consumed
/// but not emitted. Instruction offsets are absolute module offsets, so the
/// returned list is strictly ascending across body boundaries.
///
/// Instruction immediates are bounded by their body, and a body that stops
/// mid-immediate still yields a final, truncated instruction rather than an
/// error. Unknown opcodes decode as placeholders and the walk continues.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] when the range is empty or out of
/// bounds, when a declared body size runs past the section, or when local
/// declarations are truncated.
pub fn decode_code_section(data: &[u8], range: Range<usize>) -> Result<Vec<Instruction>> {
    if range.start >= range.end || range.end > data.len() {
        return Err(malformed_error!(
            "Invalid code section range [{}, {}) for a module of {} bytes",
            range.start,
            range.end,
            data.len()
        ));
    }

    let mut parser = Parser::new(data);
    parser.seek(range.start)?;

    let declared = parser.read_uleb128()?;
    log::debug!("code section declares {} function bodies", declared);

    let mut instructions = Vec::new();
    let mut bodies: u64 = 0;

    while bodies < declared && parser.pos() < range.end {
        let size = parser.read_uleb128()?;
        let Ok(size) = usize::try_from(size) else {
            return Err(malformed_error!(
                "Function body {} declares an unaddressable size - {}",
                bodies,
                size
            ));
        };

        let start = parser.pos();
        let Some(end) = start.checked_add(size) else {
            return Err(malformed_error!(
                "Function body {} overflows - start {} + size {}",
                bodies,
                start,
                size
            ));
        };
        if end > range.end {
            return Err(malformed_error!(
                "Function body {} runs past the code section - {} > {}",
                bodies,
                end,
                range.end
            ));
        }

        skip_locals(&mut parser, end, bodies)?;

        while parser.pos() < end {
            let offset = parser.pos() as u64;
            let opcode = parser.read_u8()?;

            let rest = &data[parser.pos()..end];
            let (mnemonic, operands, consumed) = decode_opcode(opcode, rest);
            parser.advance_by(consumed)?;

            instructions.push(Instruction {
                offset,
                opcode,
                mnemonic,
                operands,
                size: 1 + consumed,
            });
        }

        bodies += 1;
    }

    if bodies < declared {
        log::warn!(
            "code section declares {} function bodies but only {} were present",
            declared,
            bodies
        );
    }

    Ok(instructions)
}

/// Consume the local-declaration block at the start of a function body.
///
/// Locals are a ULEB128 group count followed by `count` pairs of ULEB128
/// repeat count and value-type byte. They describe stack slots, not
/// instructions, so nothing is emitted for them.
fn skip_locals(parser: &mut Parser<'_>, body_end: usize, body: u64) -> Result<()> {
    let rest = &parser.data()[parser.pos()..body_end];
    let (groups, consumed) = decode_uleb128(rest);
    if consumed == 0 {
        return Err(malformed_error!(
            "Function body {} is too short for its local declarations",
            body
        ));
    }
    parser.advance_by(consumed)?;

    let mut decoded: u64 = 0;
    while decoded < groups {
        let rest = &parser.data()[parser.pos()..body_end];
        let (_, consumed) = decode_uleb128(rest);
        if consumed == 0 {
            return Err(malformed_error!(
                "Local group {} of function body {} is truncated",
                decoded,
                body
            ));
        }
        parser.advance_by(consumed)?;

        if parser.pos() >= body_end {
            return Err(malformed_error!(
                "Local group {} of function body {} is missing its value type",
                decoded,
                body
            ));
        }
        parser.read_u8()?;

        decoded += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        test::{build_minimal_wasm, build_wasm_with_bodies, build_wasm_with_raw_body},
        Module,
    };

    use super::*;

    fn decode(wasm: &[u8]) -> Result<Vec<Instruction>> {
        let code = Module::new(wasm).sections()?.code.unwrap();
        decode_code_section(wasm, code)
    }

    #[test]
    fn minimal_module_decodes_nop_and_end() {
        let wasm = build_minimal_wasm(&[0x01]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].mnemonic, "nop");
        assert_eq!(instructions[0].opcode, 0x01);
        assert_eq!(instructions[0].size, 1);
        assert_eq!(instructions[1].mnemonic, "end");
        assert_eq!(instructions[1].offset, instructions[0].offset + 1);
    }

    #[test]
    fn bodies_concatenate_in_module_order() {
        let wasm = build_wasm_with_bodies(&[&[0x01, 0x01], &[0x01]]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 5);
        let ends = instructions.iter().filter(|i| i.mnemonic == "end").count();
        assert_eq!(ends, 2);

        for pair in instructions.windows(2) {
            assert!(pair[0].offset < pair[1].offset);
        }
    }

    #[test]
    fn locals_are_consumed_but_not_emitted() {
        // Two local groups (3 x i32, 1 x i64), then nop and end
        let wasm = build_wasm_with_raw_body(&[0x02, 0x03, 0x7f, 0x01, 0x7e, 0x01, 0x0b]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].mnemonic, "nop");
        assert_eq!(instructions[1].mnemonic, "end");
    }

    #[test]
    fn immediates_advance_the_cursor() {
        let wasm = build_minimal_wasm(&[0x41, 0x2A]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].mnemonic, "i32.const");
        assert_eq!(instructions[0].operands, "42");
        assert_eq!(instructions[0].size, 2);
        assert_eq!(instructions[1].offset, instructions[0].offset + 2);
    }

    #[test]
    fn unknown_opcode_keeps_the_walk_going() {
        let wasm = build_minimal_wasm(&[0x7b, 0x01]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 3);
        assert_eq!(instructions[0].mnemonic, "unknown_0x7b");
        assert_eq!(instructions[1].mnemonic, "nop");
        assert_eq!(instructions[2].mnemonic, "end");
    }

    #[test]
    fn body_size_past_section_end_errors() {
        let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        // One body claiming 127 bytes with none present
        wasm.extend_from_slice(&[0x0A, 0x02, 0x01, 0x7F]);

        assert!(decode(&wasm).is_err());
    }

    #[test]
    fn truncated_local_group_errors() {
        // One group declared, no group data before the body ends
        let wasm = build_wasm_with_raw_body(&[0x01]);
        assert!(decode(&wasm).is_err());
    }

    #[test]
    fn empty_range_errors() {
        let wasm = build_minimal_wasm(&[0x01]);
        assert!(decode_code_section(&wasm, 10..10).is_err());
        assert!(decode_code_section(&wasm, 10..usize::MAX).is_err());
    }

    #[test]
    fn missing_bodies_are_tolerated() {
        let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        // Count of 2 but only one body present
        wasm.extend_from_slice(&[0x0A, 0x05, 0x02, 0x03, 0x00, 0x01, 0x0B]);

        let instructions = decode(&wasm).unwrap();
        assert_eq!(instructions.len(), 2);
    }

    #[test]
    fn truncated_immediate_stops_at_body_end() {
        // i32.load with its memarg cut off by the body boundary
        let wasm = build_wasm_with_raw_body(&[0x00, 0x28, 0x02]);
        let instructions = decode(&wasm).unwrap();

        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].mnemonic, "i32.load");
        assert_eq!(instructions[0].size, 2);
    }
}
