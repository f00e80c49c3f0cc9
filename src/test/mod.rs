// Helper function to encode a ULEB128 value
pub fn encode_uleb128(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            return out;
        }
    }
}

// Helper function to build a module with one function body holding `code`
// followed by the terminating end opcode
pub fn build_minimal_wasm(code: &[u8]) -> Vec<u8> {
    build_wasm_with_bodies(&[code])
}

// Helper function to build a module with one function body per `bodies`
// entry. Each entry is the body's instruction bytes without locals or the
// terminating end opcode; both are added here.
pub fn build_wasm_with_bodies(bodies: &[&[u8]]) -> Vec<u8> {
    let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    // Type section: one empty function type
    wasm.extend_from_slice(&[0x01, 0x04, 0x01, 0x60, 0x00, 0x00]);

    // Function section: every body uses type 0
    let mut functions = encode_uleb128(bodies.len() as u64);
    functions.extend(std::iter::repeat(0x00).take(bodies.len()));
    wasm.push(0x03);
    wasm.extend_from_slice(&encode_uleb128(functions.len() as u64));
    wasm.extend_from_slice(&functions);

    // Code section: each body gets empty locals and a terminating end
    let mut content = encode_uleb128(bodies.len() as u64);
    for code in bodies {
        let mut body = vec![0x00];
        body.extend_from_slice(code);
        body.push(0x0b);
        content.extend_from_slice(&encode_uleb128(body.len() as u64));
        content.extend_from_slice(&body);
    }
    wasm.push(0x0A);
    wasm.extend_from_slice(&encode_uleb128(content.len() as u64));
    wasm.extend_from_slice(&content);

    wasm
}

// Helper function to build a module whose single function body is taken
// verbatim, locals and all, for malformed-body cases
pub fn build_wasm_with_raw_body(body: &[u8]) -> Vec<u8> {
    let mut wasm = vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    let mut content = vec![0x01];
    content.extend_from_slice(&encode_uleb128(body.len() as u64));
    content.extend_from_slice(body);

    wasm.push(0x0A);
    wasm.extend_from_slice(&encode_uleb128(content.len() as u64));
    wasm.extend_from_slice(&content);

    wasm
}
