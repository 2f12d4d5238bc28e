//! Opcode definitions for the LS-8 instruction set.
//!
//! Every opcode byte has the layout `AABCDDDD`:
//!
//! - `AA`: number of operand bytes that follow (0-2)
//! - `B`: 1 if the instruction is handled by the ALU
//! - `C`: 1 if the instruction assigns PC itself
//! - `DDDD`: instruction identifier

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The `#[repr(u8)]` attribute pins each variant to its encoded byte.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Machine control
    /// Halt the machine.
    Hlt = 0b0000_0001,

    // Registers and output
    /// Load an immediate value into a register.
    Ldi = 0b1000_0010,
    /// Print a register as a decimal number.
    Prn = 0b0100_0111,

    // ALU
    /// `reg_a := reg_a + reg_b`, wrapping.
    Add = 0b1010_0000,
    /// `reg_a := reg_a * reg_b`, wrapping.
    Mul = 0b1010_0010,
    /// Compare two registers and set the L/G/E flags.
    Cmp = 0b1010_0111,

    // Stack
    /// Push a register onto the stack.
    Push = 0b0100_0101,
    /// Pop the top of the stack into a register.
    Pop = 0b0100_0110,

    // Subroutines and jumps
    /// Push the return address and jump to the address in a register.
    Call = 0b0101_0000,
    /// Pop the return address into PC.
    Ret = 0b0001_0001,
    /// Jump to the address in a register.
    Jmp = 0b0101_0100,
    /// Jump if the equal flag is set.
    Jeq = 0b0101_0101,
    /// Jump if the equal flag is clear.
    Jne = 0b0101_0110,
}

/// All opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::Hlt,
    Opcode::Ldi,
    Opcode::Prn,
    Opcode::Add,
    Opcode::Mul,
    Opcode::Cmp,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Jmp,
    Opcode::Jeq,
    Opcode::Jne,
];

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b0000_0001 => Ok(Opcode::Hlt),
            0b1000_0010 => Ok(Opcode::Ldi),
            0b0100_0111 => Ok(Opcode::Prn),
            0b1010_0000 => Ok(Opcode::Add),
            0b1010_0010 => Ok(Opcode::Mul),
            0b1010_0111 => Ok(Opcode::Cmp),
            0b0100_0101 => Ok(Opcode::Push),
            0b0100_0110 => Ok(Opcode::Pop),
            0b0101_0000 => Ok(Opcode::Call),
            0b0001_0001 => Ok(Opcode::Ret),
            0b0101_0100 => Ok(Opcode::Jmp),
            0b0101_0101 => Ok(Opcode::Jeq),
            0b0101_0110 => Ok(Opcode::Jne),
            _ => Err(DecodeError::UnknownOpcode(value)),
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> u8 {
        opcode as u8
    }
}

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ldi => "LDI",
            Opcode::Prn => "PRN",
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Cmp => "CMP",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jne => "JNE",
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_count(&self) -> usize {
        (*self as u8 >> 6) as usize
    }

    /// Total encoded length in bytes, opcode included.
    ///
    /// This is the PC increment for instructions that do not assign PC.
    pub fn encoded_len(&self) -> usize {
        1 + self.operand_count()
    }

    /// True for operations routed through the ALU (ADD, MUL, CMP).
    pub fn is_alu(&self) -> bool {
        *self as u8 & 0b0010_0000 != 0
    }

    /// True for instructions that may assign PC directly.
    pub fn sets_pc(&self) -> bool {
        *self as u8 & 0b0001_0000 != 0
    }

    /// True if the second operand is an immediate rather than a register.
    pub fn has_immediate(&self) -> bool {
        matches!(self, Opcode::Ldi)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_roundtrip_through_byte() {
        for &opcode in &ALL_OPCODES {
            let byte = u8::from(opcode);
            assert_eq!(Opcode::try_from(byte), Ok(opcode));
        }
    }

    #[test]
    fn opcode_bytes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for &opcode in &ALL_OPCODES {
            assert!(seen.insert(opcode as u8), "duplicate byte for {opcode:?}");
        }
    }

    #[test]
    fn zero_is_not_an_opcode() {
        assert_eq!(Opcode::try_from(0), Err(DecodeError::UnknownOpcode(0)));
    }

    #[test]
    fn every_byte_value_resolves() {
        let mut known = 0;
        for byte in 0..=255u8 {
            match Opcode::try_from(byte) {
                Ok(_) => known += 1,
                Err(DecodeError::UnknownOpcode(b)) => assert_eq!(b, byte),
                Err(other) => panic!("unexpected error for byte {byte:#04x}: {other:?}"),
            }
        }
        assert_eq!(known, ALL_OPCODES.len());
    }

    #[test]
    fn lengths_match_instruction_table() {
        assert_eq!(Opcode::Hlt.encoded_len(), 1);
        assert_eq!(Opcode::Ret.encoded_len(), 1);
        assert_eq!(Opcode::Prn.encoded_len(), 2);
        assert_eq!(Opcode::Push.encoded_len(), 2);
        assert_eq!(Opcode::Pop.encoded_len(), 2);
        assert_eq!(Opcode::Call.encoded_len(), 2);
        assert_eq!(Opcode::Jmp.encoded_len(), 2);
        assert_eq!(Opcode::Jeq.encoded_len(), 2);
        assert_eq!(Opcode::Jne.encoded_len(), 2);
        assert_eq!(Opcode::Ldi.encoded_len(), 3);
        assert_eq!(Opcode::Add.encoded_len(), 3);
        assert_eq!(Opcode::Mul.encoded_len(), 3);
        assert_eq!(Opcode::Cmp.encoded_len(), 3);
    }

    #[test]
    fn alu_bit_marks_arithmetic_and_compare() {
        let alu: Vec<_> = ALL_OPCODES.iter().filter(|op| op.is_alu()).collect();
        assert_eq!(alu, vec![&Opcode::Add, &Opcode::Mul, &Opcode::Cmp]);
    }

    #[test]
    fn pc_bit_marks_control_flow() {
        let jumps: Vec<_> = ALL_OPCODES.iter().filter(|op| op.sets_pc()).collect();
        assert_eq!(
            jumps,
            vec![
                &Opcode::Call,
                &Opcode::Ret,
                &Opcode::Jmp,
                &Opcode::Jeq,
                &Opcode::Jne
            ]
        );
    }

    #[test]
    fn mnemonics_are_uppercase() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
            assert_eq!(opcode.to_string(), m);
        }
    }
}
