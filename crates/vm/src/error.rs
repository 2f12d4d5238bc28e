//! Runtime errors for the LS-8 VM.
//!
//! Every runtime error is fatal: the machine stops running as soon as one
//! is raised. Every variant carries the address of the faulting
//! instruction (`at`).

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The byte at PC is not an LS-8 opcode.
    #[error("unknown instruction {byte:#010b} at address {at:#04x}")]
    UnknownInstruction { at: usize, byte: u8 },

    /// A memory access, operand fetch or PC value fell outside the
    /// address space.
    #[error("address {address:#04x} out of range at address {at:#04x}")]
    AddressOutOfRange { at: usize, address: usize },

    /// A register operand does not name one of R0-R7.
    #[error("invalid register {index} at address {at:#04x}")]
    InvalidRegister { at: usize, index: u8 },

    /// PUSH or CALL with the stack pointer already at address 0.
    #[error("stack overflow at address {at:#04x}")]
    StackOverflow { at: usize },

    /// POP or RET with the stack pointer at the last address.
    #[error("stack underflow at address {at:#04x}")]
    StackUnderflow { at: usize },

    /// CALL whose return address does not fit into one byte.
    #[error("return address {address:#04x} of CALL at {at:#04x} does not fit in a byte")]
    ReturnAddressOutOfRange { at: usize, address: usize },

    /// Writing PRN output failed.
    #[error("output failed at address {at:#04x}: {message}")]
    Output { at: usize, message: String },
}
