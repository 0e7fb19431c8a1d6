use log::{debug, trace};
use thiserror::Error;

use crate::{
    bus::{Bus, LoadError, Memory, stack_address},
    cpu::{
        flags::{
            FLAG_CARRY, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE, FLAG_OVERFLOW, FLAG_UNUSED,
            FLAG_ZERO, NEGATIVE_BIT, get_bit,
        },
        opcodes::decode,
    },
};

/// Power-on stack pointer.
pub const RESET_SP: u8 = 0xFD;
/// Power-on status: IRQs disabled, unused bit set.
pub const RESET_STATUS: u8 = FLAG_INTERRUPT_DISABLE | FLAG_UNUSED;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Execution failures. Nothing inside an instruction can fail; only dispatch
/// can.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("unknown opcode ${opcode:02X} at ${pc:04X}")]
    UnknownOpcode { opcode: u8, pc: u16 },
}

/// What happened in one [`CPU::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    Halted,
}

/// Result of [`CPU::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub instructions: u64,
    pub cycles: u64,
    pub pc: u16,
    pub halted: bool,
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: u64,
    pub bus: B,
    pub halted: bool,
}

impl<B: Bus> CPU<B> {
    /// CPU in its power-on state, PC at zero.
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: RESET_SP,
            pc: 0,
            status: RESET_STATUS,
            cycles: 0,
            bus,
            halted: false,
        }
    }

    /// Registers back to power-on values and PC from the reset vector.
    /// The cycle counter keeps running.
    pub fn reset(&mut self) {
        self.pc = self.bus.read_word(RESET_VECTOR);
        self.sp = RESET_SP;
        self.status = RESET_STATUS;

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.halted = false;
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Result<StepOutcome, CpuError> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }

        let pc = self.pc;
        let opcode = self.bus.read(pc);
        self.trace(pc, opcode);

        let Some(instruction) = decode(opcode) else {
            return Err(CpuError::UnknownOpcode { opcode, pc });
        };

        self.execute(instruction);

        if self.halted {
            debug!(
                "{} at ${:04X} halted the CPU after {} cycles",
                instruction.mnemonic.name(),
                pc,
                self.cycles
            );
            Ok(StepOutcome::Halted)
        } else {
            Ok(StepOutcome::Running)
        }
    }

    /// Step until the CPU halts or `limit` instructions have run.
    pub fn run(&mut self, limit: Option<u64>) -> Result<RunSummary, CpuError> {
        let mut instructions = 0;

        while !self.halted && limit.is_none_or(|limit| instructions < limit) {
            self.step()?;
            instructions += 1;
        }

        Ok(RunSummary {
            instructions,
            cycles: self.cycles,
            pc: self.pc,
            halted: self.halted,
        })
    }

    fn trace(&self, pc: u16, opcode: u8) {
        trace!(
            "{:04X}  {:02X}        A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, opcode, self.a, self.x, self.y, self.status, self.sp, self.cycles
        );
    }

    pub(crate) fn halt(&mut self) {
        self.halted = true;
    }

    pub(crate) fn push(&mut self, value: u8) {
        let addr = stack_address(self.sp);
        self.bus.write(addr, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        let addr = stack_address(self.sp);
        self.bus.read(addr)
    }

    pub(crate) fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub(crate) fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    pub fn set_zero_flag(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
    }

    pub fn set_negative_flag(&mut self, value: u8) {
        self.set_flag(FLAG_NEGATIVE, get_bit(value, NEGATIVE_BIT));
    }

    pub fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_zero_flag(value);
        self.set_negative_flag(value);
    }

    /// Carry out of the unsigned 8-bit sum `a + b + carry_in`. Call with the
    /// operands before the wrapping add.
    pub fn set_carry_flag(&mut self, a: u8, b: u8, carry_in: bool) {
        let sum = a as u16 + b as u16 + carry_in as u16;
        self.set_flag(FLAG_CARRY, sum > 0xFF);
    }

    /// Signed overflow of `a + b` yielding `result`: both inputs share a sign
    /// the result does not have.
    pub fn set_overflow_flag(&mut self, a: u8, b: u8, result: u8) {
        self.set_flag(FLAG_OVERFLOW, (!(a ^ b) & (a ^ result)) & 0x80 != 0);
    }
}

impl CPU<Memory> {
    /// Copy `program` to `base` and point PC at it.
    pub fn load_program(&mut self, program: &[u8], base: u16) -> Result<(), LoadError> {
        self.bus.load(base, program)?;
        self.pc = base;
        Ok(())
    }
}
