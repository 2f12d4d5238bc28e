//! Error types for the LS-8 program loader.

use ls8_common::DecodeError;
use thiserror::Error;

/// Errors produced while turning program text into a [`ls8_common::Program`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// A line's value is not a binary literal.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// The program has more values than memory has cells.
    #[error("line {line}: program does not fit in {} bytes of memory", ls8_common::MEMORY_SIZE)]
    ProgramTooLarge { line: usize },

    /// The assembled bytes were rejected as a program image.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
