//! Main execution loop and opcode dispatch for the LS-8 VM.

use std::io::Write;

use crate::alu::AluOp;
use crate::error::RuntimeError;
use crate::machine::Machine;
use ls8_common::{Opcode, MEMORY_SIZE};

/// The two bytes after an opcode, fetched before dispatch.
///
/// A candidate past the end of memory is `None`; only a handler that
/// actually uses it turns that into an error.
#[derive(Debug, Clone, Copy)]
struct Operands {
    at: usize,
    a: Option<u8>,
    b: Option<u8>,
}

impl Operands {
    fn a(&self) -> Result<u8, RuntimeError> {
        self.a.ok_or(RuntimeError::AddressOutOfRange {
            at: self.at,
            address: self.at + 1,
        })
    }

    fn b(&self) -> Result<u8, RuntimeError> {
        self.b.ok_or(RuntimeError::AddressOutOfRange {
            at: self.at,
            address: self.at + 2,
        })
    }
}

impl Machine {
    /// Execute until HLT or error.
    ///
    /// PRN output is written to `out`, one decimal value per line.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<(), RuntimeError> {
        while self.running {
            self.step(out)?;
        }
        Ok(())
    }

    /// Execute a single instruction.
    ///
    /// A halted machine stays halted: stepping it does nothing. Any error
    /// halts the machine.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<(), RuntimeError> {
        if !self.running {
            return Ok(());
        }

        let result = self.cycle(out);
        if result.is_err() {
            self.running = false;
        }
        if !self.running {
            tracing::debug!(pc = self.pc, ok = result.is_ok(), "machine halted");
        }
        result
    }

    fn cycle<W: Write>(&mut self, out: &mut W) -> Result<(), RuntimeError> {
        let at = self.pc;
        let byte = self.read(at)?;
        let ops = Operands {
            at,
            a: self.peek(at + 1),
            b: self.peek(at + 2),
        };

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!("{}", self.trace_line(byte, &ops));
        }

        let opcode =
            Opcode::try_from(byte).map_err(|_| RuntimeError::UnknownInstruction { at, byte })?;

        match opcode {
            Opcode::Hlt => self.exec_hlt(),
            Opcode::Ldi => self.exec_ldi(&ops),
            Opcode::Prn => self.exec_prn(&ops, out),

            Opcode::Add => self.exec_alu(Opcode::Add, AluOp::Add, &ops),
            Opcode::Mul => self.exec_alu(Opcode::Mul, AluOp::Mul, &ops),
            Opcode::Cmp => self.exec_alu(Opcode::Cmp, AluOp::Cmp, &ops),

            Opcode::Push => self.exec_push(&ops),
            Opcode::Pop => self.exec_pop(&ops),

            Opcode::Call => self.exec_call(&ops),
            Opcode::Ret => self.exec_ret(),
            Opcode::Jmp => self.exec_jmp(&ops),
            Opcode::Jeq => self.exec_jump_if(Opcode::Jeq, true, &ops),
            Opcode::Jne => self.exec_jump_if(Opcode::Jne, false, &ops),
        }
    }

    /// Byte at `address`, or `None` past the end of memory.
    fn peek(&self, address: usize) -> Option<u8> {
        self.memory.get(address).copied()
    }

    fn advance(&mut self, opcode: Opcode) {
        self.pc += opcode.encoded_len();
    }

    /// `TRACE: PC | op a b | R0 .. R7`, all in hex.
    fn trace_line(&self, byte: u8, ops: &Operands) -> String {
        let hex = |b: Option<u8>| b.map_or_else(|| "--".to_string(), |b| format!("{b:02X}"));
        let registers: Vec<String> = self.registers.iter().map(|r| format!("{r:02X}")).collect();
        format!(
            "TRACE: {:02X} | {:02X} {} {} | {}",
            self.pc,
            byte,
            hex(ops.a),
            hex(ops.b),
            registers.join(" ")
        )
    }

    // ---- Machine control ----

    fn exec_hlt(&mut self) -> Result<(), RuntimeError> {
        self.running = false;
        self.advance(Opcode::Hlt);
        Ok(())
    }

    // ---- Registers and output ----

    fn exec_ldi(&mut self, ops: &Operands) -> Result<(), RuntimeError> {
        self.set_register(ops.a()?, ops.b()?)?;
        self.advance(Opcode::Ldi);
        Ok(())
    }

    fn exec_prn<W: Write>(&mut self, ops: &Operands, out: &mut W) -> Result<(), RuntimeError> {
        let value = self.register(ops.a()?)?;
        writeln!(out, "{value}").map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        })?;
        self.advance(Opcode::Prn);
        Ok(())
    }

    // ---- ALU ----

    fn exec_alu(&mut self, opcode: Opcode, op: AluOp, ops: &Operands) -> Result<(), RuntimeError> {
        self.alu(op, ops.a()?, ops.b()?)?;
        self.advance(opcode);
        Ok(())
    }

    // ---- Stack ----

    fn exec_push(&mut self, ops: &Operands) -> Result<(), RuntimeError> {
        let value = self.register(ops.a()?)?;
        self.push_byte(value)?;
        self.advance(Opcode::Push);
        Ok(())
    }

    fn exec_pop(&mut self, ops: &Operands) -> Result<(), RuntimeError> {
        let reg = ops.a()?;
        // Validate the destination before touching SP.
        self.register(reg)?;
        let value = self.pop_byte()?;
        self.set_register(reg, value)?;
        self.advance(Opcode::Pop);
        Ok(())
    }

    // ---- Subroutines and jumps ----

    fn exec_call(&mut self, ops: &Operands) -> Result<(), RuntimeError> {
        let target = self.register(ops.a()?)?;
        let return_address = self.pc + Opcode::Call.encoded_len();
        // Return addresses are stored as a single byte on the stack.
        if return_address >= MEMORY_SIZE {
            return Err(RuntimeError::ReturnAddressOutOfRange {
                at: self.pc,
                address: return_address,
            });
        }
        self.push_byte(return_address as u8)?;
        self.pc = target as usize;
        Ok(())
    }

    fn exec_ret(&mut self) -> Result<(), RuntimeError> {
        self.pc = self.pop_byte()? as usize;
        Ok(())
    }

    fn exec_jmp(&mut self, ops: &Operands) -> Result<(), RuntimeError> {
        self.pc = self.register(ops.a()?)? as usize;
        Ok(())
    }

    /// JEQ / JNE: jump when the equal flag matches `when_equal`.
    fn exec_jump_if(
        &mut self,
        opcode: Opcode,
        when_equal: bool,
        ops: &Operands,
    ) -> Result<(), RuntimeError> {
        let target = self.register(ops.a()?)?;
        if self.flags.is_equal() == when_equal {
            self.pc = target as usize;
        } else {
            self.advance(opcode);
        }
        Ok(())
    }
}
