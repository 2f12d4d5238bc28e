//! Machine state: memory, registers, program counter, flags.

use crate::alu::Flags;
use crate::error::RuntimeError;
use ls8_common::{Program, MEMORY_SIZE, REGISTER_COUNT, SP, STACK_START};

/// The LS-8 machine.
///
/// All state lives here and is mutated only by the execution engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    /// 256 bytes of RAM, zeroed at startup.
    pub(crate) memory: [u8; MEMORY_SIZE],
    /// R0-R7. R7 is the stack pointer.
    pub(crate) registers: [u8; REGISTER_COUNT],
    /// Address of the next instruction byte.
    pub(crate) pc: usize,
    /// Result of the most recent CMP.
    pub(crate) flags: Flags,
    /// Cleared by HLT or by any runtime error.
    pub(crate) running: bool,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a machine with zeroed memory, SP at `0xF4` and PC at 0.
    pub fn new() -> Self {
        let mut registers = [0; REGISTER_COUNT];
        registers[SP] = STACK_START;
        Self {
            memory: [0; MEMORY_SIZE],
            registers,
            pc: 0,
            flags: Flags::default(),
            running: true,
        }
    }

    /// Create a machine with `program` loaded at address 0.
    pub fn with_program(program: &Program) -> Self {
        let mut machine = Self::new();
        machine.load(program);
        machine
    }

    /// Copy `program` into memory starting at address 0.
    ///
    /// [`Program`] guarantees the image fits, so loading cannot fail.
    pub fn load(&mut self, program: &Program) {
        let bytes = program.bytes();
        self.memory[..bytes.len()].copy_from_slice(bytes);
        tracing::debug!(bytes = bytes.len(), "program loaded");
    }

    /// Read the byte at `address`.
    pub fn read(&self, address: usize) -> Result<u8, RuntimeError> {
        self.memory
            .get(address)
            .copied()
            .ok_or(RuntimeError::AddressOutOfRange { at: self.pc, address })
    }

    /// Write `value` to `address`.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), RuntimeError> {
        let at = self.pc;
        let cell = self
            .memory
            .get_mut(address)
            .ok_or(RuntimeError::AddressOutOfRange { at, address })?;
        *cell = value;
        Ok(())
    }

    /// Read register `index` (0-7).
    pub fn register(&self, index: u8) -> Result<u8, RuntimeError> {
        self.registers
            .get(index as usize)
            .copied()
            .ok_or(RuntimeError::InvalidRegister { at: self.pc, index })
    }

    pub(crate) fn set_register(&mut self, index: u8, value: u8) -> Result<(), RuntimeError> {
        let at = self.pc;
        let slot = self
            .registers
            .get_mut(index as usize)
            .ok_or(RuntimeError::InvalidRegister { at, index })?;
        *slot = value;
        Ok(())
    }

    /// All eight registers.
    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    /// The whole address space.
    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    /// Current stack pointer (R7).
    pub fn sp(&self) -> u8 {
        self.registers[SP]
    }

    /// Current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Flags set by the last CMP.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// False once HLT has executed or a runtime error occurred.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Decrement SP and store `value` at the new top of stack.
    pub(crate) fn push_byte(&mut self, value: u8) -> Result<(), RuntimeError> {
        let sp = self.registers[SP]
            .checked_sub(1)
            .ok_or(RuntimeError::StackOverflow { at: self.pc })?;
        self.write(sp as usize, value)?;
        self.registers[SP] = sp;
        Ok(())
    }

    /// Load the top of stack and increment SP.
    pub(crate) fn pop_byte(&mut self) -> Result<u8, RuntimeError> {
        let sp = self.registers[SP];
        let value = self.read(sp as usize)?;
        self.registers[SP] = sp
            .checked_add(1)
            .ok_or(RuntimeError::StackUnderflow { at: self.pc })?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_machine_defaults() {
        let m = Machine::new();
        assert!(m.is_running());
        assert_eq!(m.pc(), 0);
        assert_eq!(m.sp(), 0xF4);
        assert_eq!(m.flags(), Flags::default());
        assert!(m.memory().iter().all(|&b| b == 0));
        assert_eq!(m.registers()[..7], [0; 7]);
    }

    #[test]
    fn load_copies_program_to_address_zero() {
        let program = Program::new(vec![1, 2, 3]).unwrap();
        let m = Machine::with_program(&program);
        assert_eq!(&m.memory()[..4], &[1, 2, 3, 0]);
    }

    #[test]
    fn read_write_roundtrip() {
        let mut m = Machine::new();
        m.write(0xFF, 42).unwrap();
        assert_eq!(m.read(0xFF), Ok(42));
    }

    #[test]
    fn read_out_of_range() {
        let m = Machine::new();
        assert_eq!(
            m.read(256),
            Err(RuntimeError::AddressOutOfRange { at: 0, address: 256 })
        );
    }

    #[test]
    fn write_out_of_range() {
        let mut m = Machine::new();
        assert_eq!(
            m.write(1000, 1),
            Err(RuntimeError::AddressOutOfRange {
                at: 0,
                address: 1000
            })
        );
    }

    #[test]
    fn register_out_of_range() {
        let mut m = Machine::new();
        assert_eq!(
            m.register(8),
            Err(RuntimeError::InvalidRegister { at: 0, index: 8 })
        );
        assert_eq!(
            m.set_register(200, 1),
            Err(RuntimeError::InvalidRegister { at: 0, index: 200 })
        );
    }

    #[test]
    fn push_pop_byte() {
        let mut m = Machine::new();
        m.push_byte(7).unwrap();
        assert_eq!(m.sp(), 0xF3);
        assert_eq!(m.read(0xF3), Ok(7));
        assert_eq!(m.pop_byte(), Ok(7));
        assert_eq!(m.sp(), 0xF4);
    }

    #[test]
    fn push_at_bottom_of_memory_overflows() {
        let mut m = Machine::new();
        m.registers[SP] = 0;
        assert_eq!(m.push_byte(1), Err(RuntimeError::StackOverflow { at: 0 }));
        assert_eq!(m.sp(), 0);
    }

    #[test]
    fn pop_at_top_of_memory_underflows() {
        let mut m = Machine::new();
        m.registers[SP] = 0xFF;
        assert_eq!(m.pop_byte(), Err(RuntimeError::StackUnderflow { at: 0 }));
        assert_eq!(m.sp(), 0xFF);
    }
}
