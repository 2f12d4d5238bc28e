//! LS-8 common types and constants.
//!
//! This crate provides the foundational data shared by the loader, the
//! VM and the CLI:
//!
//! - [`Opcode`]: the thirteen LS-8 opcodes and their encoding metadata
//! - [`Program`]: a byte image that fits into memory
//! - [`DecodeError`]: errors from decoding opcodes and images
//! - machine constants: memory size, register count, stack pointer
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod opcode;
pub mod program;

pub use error::DecodeError;
pub use opcode::Opcode;
pub use program::Program;

/// Number of addressable memory cells.
pub const MEMORY_SIZE: usize = 256;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Register reserved as the stack pointer.
pub const SP: usize = 7;

/// Initial stack pointer: the stack grows down from just below the
/// interrupt vector area at the top of memory.
pub const STACK_START: u8 = 0xF4;
