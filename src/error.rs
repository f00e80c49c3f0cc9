use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while validating a WASM
/// module header, walking its sections, and decoding its instruction stream. Each variant
/// provides specific context about the failure mode to enable appropriate error handling.
///
/// Every variant is a structural failure in the sense of the error model: the input bytes
/// contradict the module layout they declare. Unknown opcodes are deliberately *not* an
/// error. The decoder substitutes a placeholder and keeps going, so a single unsupported
/// instruction never hides the rest of the module from the user.
///
/// # Examples
///
/// ```rust
/// use wasmscope::{Disassembler, Error};
///
/// let dis = Disassembler::new(&[0xFF, 0xFF]);
/// match dis.decode_all() {
///     Ok(instructions) => {
///         println!("Decoded {} instructions", instructions.len());
///     }
///     Err(Error::InvalidModule) => {
///         eprintln!("Not a WASM module");
///     }
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed module: {} ({}:{})", message, file, line);
///     }
///     Err(e) => {
///         eprintln!("Other error: {}", e);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The buffer does not begin with a valid WASM header.
    ///
    /// Module validity is a pure function of the first 8 bytes: the magic
    /// `00 61 73 6D` followed by the little-endian version `1`. Anything
    /// shorter, or with different bytes, yields this error from the decoding
    /// entry points.
    #[error("not a valid WASM module")]
    InvalidModule,

    /// The module has no code section to disassemble.
    ///
    /// A header-valid module may still carry no functions at all. There is
    /// nothing to render in that case, so the decoding entry points report it
    /// rather than returning an empty stream for a section that does not exist.
    #[error("code section not found")]
    CodeSectionMissing,

    /// The module is damaged and could not be parsed.
    ///
    /// This error indicates that the section or body structure contradicts
    /// itself, typically a declared size that runs past the end of the buffer.
    /// The error includes the source location where the malformation was
    /// detected for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while decoding the module.
    ///
    /// This error occurs when trying to read data beyond the end of the
    /// buffer. It's a safety check to prevent buffer overruns during parsing.
    #[error("Out of bound read would have occurred!")]
    OutOfBounds,
}
