//! Arithmetic and comparison.
//!
//! ADD, MUL and CMP share one routine keyed by `AluOp`. Arithmetic wraps
//! modulo 256 so every result stays a byte.

use std::cmp::Ordering;

use crate::error::RuntimeError;
use crate::machine::Machine;

/// Operations handled by the ALU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AluOp {
    Add,
    Mul,
    Cmp,
}

/// The `FL` register: `0b00000LGE`.
///
/// CMP sets exactly one of the three bits. Before the first CMP no bit is
/// set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    pub const LESS: u8 = 0b100;
    pub const GREATER: u8 = 0b010;
    pub const EQUAL: u8 = 0b001;

    /// Flags for comparing `a` against `b`.
    pub fn compare(a: u8, b: u8) -> Self {
        match a.cmp(&b) {
            Ordering::Less => Flags(Self::LESS),
            Ordering::Greater => Flags(Self::GREATER),
            Ordering::Equal => Flags(Self::EQUAL),
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_equal(self) -> bool {
        self.0 & Self::EQUAL != 0
    }

    pub fn is_less(self) -> bool {
        self.0 & Self::LESS != 0
    }

    pub fn is_greater(self) -> bool {
        self.0 & Self::GREATER != 0
    }
}

impl Machine {
    /// Apply `op` to registers `reg_a` and `reg_b`.
    ///
    /// ADD and MUL store into `reg_a`; CMP only updates the flags.
    pub(crate) fn alu(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<(), RuntimeError> {
        let a = self.register(reg_a)?;
        let b = self.register(reg_b)?;

        match op {
            AluOp::Add => self.set_register(reg_a, a.wrapping_add(b)),
            AluOp::Mul => self.set_register(reg_a, a.wrapping_mul(b)),
            AluOp::Cmp => {
                self.flags = Flags::compare(a, b);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with(a: u8, b: u8) -> Machine {
        let mut m = Machine::new();
        m.set_register(0, a).unwrap();
        m.set_register(1, b).unwrap();
        m
    }

    #[test]
    fn add_stores_in_first_register() {
        let mut m = machine_with(2, 3);
        m.alu(AluOp::Add, 0, 1).unwrap();
        assert_eq!(m.register(0), Ok(5));
        assert_eq!(m.register(1), Ok(3));
    }

    #[test]
    fn add_wraps() {
        let mut m = machine_with(250, 10);
        m.alu(AluOp::Add, 0, 1).unwrap();
        assert_eq!(m.register(0), Ok(4));
    }

    #[test]
    fn mul_wraps() {
        let mut m = machine_with(16, 17);
        m.alu(AluOp::Mul, 0, 1).unwrap();
        assert_eq!(m.register(0), Ok((16 * 17 % 256) as u8));
    }

    #[test]
    fn mul_register_by_itself() {
        let mut m = machine_with(9, 0);
        m.alu(AluOp::Mul, 0, 0).unwrap();
        assert_eq!(m.register(0), Ok(81));
    }

    #[test]
    fn cmp_leaves_registers_alone() {
        let mut m = machine_with(1, 2);
        m.alu(AluOp::Cmp, 0, 1).unwrap();
        assert_eq!(m.register(0), Ok(1));
        assert_eq!(m.register(1), Ok(2));
        assert!(m.flags().is_less());
    }

    #[test]
    fn compare_sets_exactly_one_bit() {
        assert_eq!(Flags::compare(1, 1).bits(), Flags::EQUAL);
        assert_eq!(Flags::compare(1, 2).bits(), Flags::LESS);
        assert_eq!(Flags::compare(2, 1).bits(), Flags::GREATER);
    }

    #[test]
    fn default_flags_are_clear() {
        let flags = Flags::default();
        assert!(!flags.is_equal());
        assert!(!flags.is_less());
        assert!(!flags.is_greater());
    }

    #[test]
    fn invalid_register_is_rejected() {
        let mut m = Machine::new();
        assert_eq!(
            m.alu(AluOp::Add, 0, 8),
            Err(RuntimeError::InvalidRegister { at: 0, index: 8 })
        );
    }
}
