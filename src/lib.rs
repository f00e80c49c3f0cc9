// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # wasmscope
//!
//! [![Crates.io](https://img.shields.io/crates/v/wasmscope.svg)](https://crates.io/crates/wasmscope)
//! [![Documentation](https://docs.rs/wasmscope/badge.svg)](https://docs.rs/wasmscope)
//! [![License](https://img.shields.io/badge/license-Apache--2.0-blue.svg)](https://github.com/BinFlip/wasmscope/blob/main/LICENSE-APACHE)
//!
//! A lightweight WebAssembly bytecode disassembler for debugging tooling. Given raw module
//! bytes and a byte offset (typically a trap location or trace-event instruction pointer),
//! `wasmscope` decodes the binary instruction stream and renders a human-readable,
//! offset-centered WAT snippet. It exists for the moment source mapping is unavailable:
//! when a contract was compiled without debug info, the user still gets a readable view of
//! the instruction that trapped.
//!
//! ## Features
//!
//! - **🔍 Offset-centered snippets** - Bounded instruction windows around any byte offset
//! - **⚡ Guaranteed forward progress** - Unknown opcodes become placeholders, never errors
//! - **🛡️ Bounds-checked decoding** - Malformed sizes surface as errors, not panics; no unsafe
//! - **📦 Zero-copy input** - Borrows the module bytes for the disassembler's lifetime
//! - **🔧 Cross-platform** - Pure Rust, no runtime or toolchain dependencies
//!
//! ## Quick Start
//!
//! Add `wasmscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! wasmscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use wasmscope::prelude::*;
//!
//! let bytes = [
//!     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
//!     0x0A, 0x05, 0x01, 0x03, 0x00, 0x01, 0x0B, // code section, one nop body
//! ];
//!
//! let disassembler = Disassembler::new(&bytes);
//! let snippet = disassembler.disassemble_at(0x0D, 2)?;
//!
//! assert_eq!(snippet.target_index, Some(0));
//! print!("{}", snippet.format());
//! # Ok::<(), wasmscope::Error>(())
//! ```
//!
//! ### Display Paths
//!
//! Rendering for a user never fails, whatever state the bytes are in:
//!
//! ```rust
//! use wasmscope::format_fallback;
//!
//! // Truncated garbage instead of a module
//! let text = format_fallback(&[0x00, 0x61], 0x42, 5);
//! assert!(text.contains("could not parse"));
//! ```
//!
//! ## Architecture
//!
//! `wasmscope` is organized into a few key pieces:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and functions
//! - [`disassembler`] - Instruction decoding, snippet windowing and WAT rendering
//! - [`Module`] and [`Parser`] - Container validation, section walking and cursoring
//! - [`Error`] and [`Result`] - Error handling across the crate
//!
//! The data flow is linear: [`Module`] validates the header and finds the code
//! section, [`disassembler::decode_code_section`] turns its payload into a flat
//! instruction list, and [`Snippet`] slices a window out of that list for display.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use wasmscope::{Disassembler, Error};
//!
//! match Disassembler::new(&[0xFF, 0xFF]).decode_all() {
//!     Ok(instructions) => println!("{} instructions", instructions.len()),
//!     Err(Error::InvalidModule) => println!("not a WASM module"),
//!     Err(Error::Malformed { message, .. }) => println!("malformed: {}", message),
//!     Err(e) => println!("error: {}", e),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! # Install fuzzing tools
//! cargo install cargo-fuzz
//!
//! # Run fuzzer
//! cargo +nightly fuzz run disassemble --release
//!
//! # Multi-core fuzzing
//! cargo +nightly fuzz run disassemble --release -- -jobs=4 -fork=1
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo test --release  # For performance tests
//! ```
#[macro_use]
pub(crate) mod error;
pub(crate) mod module;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the wasmscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use wasmscope::prelude::*;
///
/// let disassembler = Disassembler::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// assert!(disassembler.is_valid());
/// ```
pub mod prelude;

/// WASM bytecode disassembly and WAT snippet rendering.
///
/// This module turns raw instruction bytes into offset-tagged [`Instruction`]
/// values and bounded [`Snippet`] windows, rendering them as WAT text.
///
/// # Key Types
///
/// - [`disassembler::Disassembler`] - Facade from raw module bytes to snippets
/// - [`disassembler::Instruction`] - A decoded instruction
/// - [`disassembler::Snippet`] - A bounded window around a target offset
///
/// # Main Functions
///
/// - [`disassembler::decode_code_section`] - Decode every function body in a code section
/// - [`disassembler::decode_opcode`] - Decode one opcode and its immediates
/// - [`disassembler::format_fallback`] - Error-tolerant rendering for display paths
///
/// # Examples
///
/// ```rust
/// use wasmscope::decode_opcode;
///
/// let (mnemonic, operand, consumed) = decode_opcode(0x41, &[0x2A]);
/// assert_eq!(mnemonic, "i32.const");
/// assert_eq!(operand, "42");
/// assert_eq!(consumed, 1);
/// ```
pub mod disassembler;

/// `wasmscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use wasmscope::{Instruction, Result, Disassembler};
///
/// fn decode(bytes: &[u8]) -> Result<Vec<Instruction>> {
///     Disassembler::new(bytes).decode_all()
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `wasmscope` Error type
///
/// The main error type for all operations in this crate. Provides detailed error
/// information for header validation, section walking and instruction decoding.
///
/// # Examples
///
/// ```rust
/// use wasmscope::{Disassembler, Error};
///
/// match Disassembler::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]).decode_all() {
///     Err(Error::CodeSectionMissing) => println!("nothing to disassemble"),
///     Err(e) => println!("error: {}", e),
///     Ok(_) => unreachable!(),
/// }
/// ```
pub use error::Error;

/// Main entry points for disassembling WASM modules.
///
/// [`Disassembler`] wraps one module buffer and produces [`Instruction`] lists and
/// [`Snippet`] windows; [`format_fallback`] is the never-failing display path.
///
/// # Example
///
/// ```rust
/// use wasmscope::Disassembler;
///
/// let bytes = [
///     0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00, // header
///     0x0A, 0x05, 0x01, 0x03, 0x00, 0x01, 0x0B, // code section, one nop body
/// ];
///
/// let instructions = Disassembler::new(&bytes).decode_all()?;
/// assert_eq!(instructions.len(), 2);
/// # Ok::<(), wasmscope::Error>(())
/// ```
pub use disassembler::{format_fallback, Disassembler, Instruction, Snippet};

/// Container-level access to WASM modules.
///
/// These types expose the layer below the disassembler:
/// - [`Module`] - Header validation and section walking
/// - [`SectionId`] - Known top-level section ids
/// - [`Sections`] - Payload ranges tracked by the section walk
/// - [`WASM_MAGIC`] / [`WASM_VERSION`] - Header constants
///
/// # Example
///
/// ```rust
/// use wasmscope::Module;
///
/// let module = Module::new(&[0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// assert!(module.is_valid());
/// assert!(module.sections()?.code.is_none());
/// # Ok::<(), wasmscope::Error>(())
/// ```
pub use module::{Module, SectionId, Sections, WASM_MAGIC, WASM_VERSION};

/// Provides access to low-level byte parsing utilities.
///
/// The [`Parser`] type is a bounds-checked cursor over a byte slice; the varint
/// functions decode the LEB128 integers the WASM format is built on. The opcode
/// functions decode a single instruction without any surrounding module.
///
/// # Example
///
/// ```rust
/// use wasmscope::{decode_uleb128, Parser};
///
/// let mut parser = Parser::new(&[0xE5, 0x8E, 0x26]);
/// assert_eq!(parser.read_uleb128()?, 624485);
///
/// assert_eq!(decode_uleb128(&[0x80, 0x01]), (128, 2));
/// # Ok::<(), wasmscope::Error>(())
/// ```
pub use module::{
    parser::Parser,
    varint::{decode_sleb128, decode_uleb128},
};

/// Opcode-level decoding without a surrounding module.
///
/// # Example
///
/// ```rust
/// use wasmscope::{decode_block_type, decode_opcode};
///
/// assert_eq!(decode_opcode(0x10, &[0x05]).0, "call");
/// assert_eq!(decode_block_type(&[0x7f]), ("(result i32)", 1));
/// ```
pub use disassembler::{decode_block_type, decode_opcode};
