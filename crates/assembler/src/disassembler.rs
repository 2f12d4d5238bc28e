//! Disassembler: program image → annotated program text.
//!
//! Output is one binary literal per line, the same format the loader
//! reads. Each opcode line carries a comment with its address and the
//! decoded instruction; operand lines are bare. Bytes that do not decode
//! as an opcode are emitted with a `.byte` comment.

use ls8_common::{Opcode, Program};

/// Disassemble a program into annotated program text.
///
/// The output reloads to an identical image
/// (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let bytes = program.bytes();
    let mut out = String::new();
    let mut addr = 0;

    while addr < bytes.len() {
        let byte = bytes[addr];
        match Opcode::try_from(byte) {
            Ok(opcode) => {
                let end = (addr + opcode.encoded_len()).min(bytes.len());
                let operands = &bytes[addr + 1..end];
                out.push_str(&format!(
                    "{byte:08b} # {addr:02X}: {}\n",
                    describe(opcode, operands)
                ));
                for operand in operands {
                    out.push_str(&format!("{operand:08b}\n"));
                }
                addr = end;
            }
            Err(_) => {
                out.push_str(&format!("{byte:08b} # {addr:02X}: .byte {byte:#04x}\n"));
                addr += 1;
            }
        }
    }

    out
}

/// `MNEMONIC R<a>, <b>`, with `?` for operands cut off by the end of
/// the program.
fn describe(opcode: Opcode, operands: &[u8]) -> String {
    let mut parts = Vec::with_capacity(opcode.operand_count());
    for i in 0..opcode.operand_count() {
        let part = match operands.get(i) {
            Some(value) if i == 1 && opcode.has_immediate() => value.to_string(),
            Some(reg) => format!("R{reg}"),
            None => "?".to_string(),
        };
        parts.push(part);
    }

    if parts.is_empty() {
        opcode.mnemonic().to_string()
    } else {
        format!("{} {}", opcode.mnemonic(), parts.join(", "))
    }
}
