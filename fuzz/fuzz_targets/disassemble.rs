#![no_main]

use libfuzzer_sys::fuzz_target;
use wasmscope::{format_fallback, Disassembler};

fuzz_target!(|data: &[u8]| {
    let disassembler = Disassembler::new(data);
    let _ = disassembler.decode_all();
    let _ = disassembler.disassemble_at(data.len() as u64 / 2, 5);

    // The display path must return text for any input
    let _ = format_fallback(data, 0x42, 5);
});
