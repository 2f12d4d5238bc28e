//! LS-8 virtual machine: fetch, decode, execute.
//!
//! The machine has:
//! - 256 bytes of memory, zeroed at startup
//! - eight byte registers, R7 being the stack pointer (starts at `0xF4`)
//! - a program counter and an `L`/`G`/`E` flags register set by CMP
//!
//! # Usage
//!
//! ```
//! use ls8_common::{Opcode, Program};
//! use ls8_vm::run;
//!
//! let program = Program::new(vec![
//!     Opcode::Ldi as u8, 0, 42,
//!     Opcode::Prn as u8, 0,
//!     Opcode::Hlt as u8,
//! ])
//! .unwrap();
//!
//! let mut out = Vec::new();
//! let machine = run(&program, &mut out).unwrap();
//! assert_eq!(out, b"42\n");
//! assert!(!machine.is_running());
//! ```

pub mod alu;
pub mod error;
pub mod execute;
pub mod machine;

pub use alu::Flags;
pub use error::RuntimeError;
pub use machine::Machine;

use std::io::Write;

use ls8_common::Program;

/// Load `program` into a fresh machine and execute it until HLT.
///
/// PRN output goes to `out`. Returns the halted machine for inspection.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first fatal condition (unknown
/// instruction, out-of-range address, invalid register, stack
/// overflow/underflow, failed output). Output written before the error
/// stays written.
pub fn run<W: Write>(program: &Program, out: &mut W) -> Result<Machine, RuntimeError> {
    let mut machine = Machine::with_program(program);
    machine.run(out)?;
    Ok(machine)
}
