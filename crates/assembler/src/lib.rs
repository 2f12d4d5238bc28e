//! LS-8 program loader and disassembler.
//!
//! Program text holds one byte per line as a binary literal, optionally
//! followed by a `#` comment:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```
//!
//! # Usage
//!
//! ```
//! use ls8_assembler::{assemble, disassemble};
//!
//! let program = assemble("10000010\n00000000\n00001000\n00000001\n").unwrap();
//! assert_eq!(program.bytes(), &[0b1000_0010, 0, 8, 1]);
//!
//! let listing = disassemble(&program);
//! assert_eq!(assemble(&listing).unwrap(), program);
//! ```

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use lexer::value_text;
use ls8_common::{Program, MEMORY_SIZE};
use parser::parse_byte;

/// Turn program text into a program image.
///
/// Blank and comment-only lines are skipped; every other line contributes
/// one byte, placed at consecutive addresses from 0. Returns the first
/// error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut bytes = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let Some(value) = value_text(line) else {
            continue;
        };
        if bytes.len() == MEMORY_SIZE {
            return Err(AsmError::ProgramTooLarge { line: line_num });
        }
        bytes.push(parse_byte(value, line_num)?);
    }

    Ok(Program::new(bytes)?)
}

/// Disassemble a program into annotated program text.
///
/// See the `disassembler` module for the format.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
