//! # wasmscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and functions from the wasmscope library. Import this module to get quick
//! access to the essential types for WASM disassembly.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all wasmscope operations
pub use crate::Error;

/// The result type used throughout wasmscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Disassembly facade and its value types
pub use crate::{Disassembler, Instruction, Snippet};

/// Error-tolerant rendering for display paths
pub use crate::format_fallback;

// ================================================================================================
// Module Container
// ================================================================================================

/// Container-level module access and section ranges
pub use crate::{Module, SectionId, Sections};

/// WASM header constants
pub use crate::{WASM_MAGIC, WASM_VERSION};

// ================================================================================================
// Low-Level Decoding
// ================================================================================================

/// Bounds-checked byte cursor
pub use crate::Parser;

/// Variable-length integer primitives
pub use crate::{decode_sleb128, decode_uleb128};

/// Opcode-level decoding
pub use crate::{decode_block_type, decode_opcode};
