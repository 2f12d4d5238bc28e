//! Decode errors for LS-8 opcodes and program images.

use thiserror::Error;

/// Errors that occur while decoding bytes into opcodes or program images.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Byte is not one of the thirteen LS-8 opcodes.
    #[error("unknown opcode: {0:#010b}")]
    UnknownOpcode(u8),

    /// Program does not fit into memory.
    #[error("program is {0} bytes (memory holds {})", crate::MEMORY_SIZE)]
    ProgramTooLarge(usize),
}
