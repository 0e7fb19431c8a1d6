//! Addressing modes and the operand resolver.
//!
//! The opcode byte sits at PC; operand bytes follow at PC+1 and PC+2.
//! Resolving a mode reads those bytes, computes the effective address (or the
//! immediate value), moves PC past the instruction and charges the base cycle
//! cost of the mode. Instruction handlers add any extra cycles on top.

use crate::bus::{Bus, zero_page_address};
use crate::cpu::cpu::CPU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// `(zp,X)`: the zero-page cell at `zp + X` is the operand itself.
    IndexedIndirect,
    /// `(zp),Y`: the zero-page cell at `zp + Y` is the operand itself.
    IndirectIndexed,
    /// JMP only.
    Indirect,
    /// Branches only.
    Relative,
}

impl AddressingMode {
    /// Instruction length in bytes, opcode included.
    pub const fn len(self) -> u16 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 1,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndexedIndirect
            | AddressingMode::IndirectIndexed
            | AddressingMode::Relative => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 3,
        }
    }

    /// Cycles charged by the resolver. Implied, accumulator, indirect and
    /// relative timing belongs to the instruction.
    pub const fn base_cycles(self) -> u64 {
        match self {
            AddressingMode::Immediate => 2,
            AddressingMode::ZeroPage => 3,
            AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY => 4,
            AddressingMode::IndirectIndexed => 5,
            AddressingMode::IndexedIndirect => 6,
            AddressingMode::Implied
            | AddressingMode::Accumulator
            | AddressingMode::Indirect
            | AddressingMode::Relative => 0,
        }
    }
}

/// What a resolved addressing mode points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Immediate(u8),
    Address(u16),
}

impl<B: Bus> CPU<B> {
    /// Byte following the opcode.
    pub(crate) fn operand_byte(&mut self) -> u8 {
        self.bus.read(self.pc.wrapping_add(1))
    }

    /// Little-endian word following the opcode.
    pub(crate) fn operand_word(&mut self) -> u16 {
        let lo = self.bus.read(self.pc.wrapping_add(1)) as u16;
        let hi = self.bus.read(self.pc.wrapping_add(2)) as u16;
        (hi << 8) | lo
    }

    /// Resolve a data-operand mode, advance PC and charge base cycles.
    ///
    /// Implied, accumulator, indirect and relative modes have no data operand;
    /// their handlers use [`CPU::indirect_target`] / [`CPU::relative_target`]
    /// or operate on registers directly.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let operand = match mode {
            AddressingMode::Immediate => Operand::Immediate(self.operand_byte()),
            AddressingMode::ZeroPage => Operand::Address(self.operand_byte() as u16),
            AddressingMode::ZeroPageX | AddressingMode::IndexedIndirect => {
                let base = self.operand_byte();
                Operand::Address(zero_page_address(base, self.x))
            }
            AddressingMode::ZeroPageY | AddressingMode::IndirectIndexed => {
                let base = self.operand_byte();
                Operand::Address(zero_page_address(base, self.y))
            }
            AddressingMode::Absolute => Operand::Address(self.operand_word()),
            AddressingMode::AbsoluteX => {
                let base = self.operand_word();
                Operand::Address(base.wrapping_add(self.x as u16))
            }
            AddressingMode::AbsoluteY => {
                let base = self.operand_word();
                Operand::Address(base.wrapping_add(self.y as u16))
            }
            AddressingMode::Implied
            | AddressingMode::Accumulator
            | AddressingMode::Indirect
            | AddressingMode::Relative => {
                unreachable!("{mode:?} has no data operand")
            }
        };

        self.pc = self.pc.wrapping_add(mode.len());
        self.cycles += mode.base_cycles();
        operand
    }

    /// Value an operand refers to.
    pub(crate) fn load(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Address(addr) => self.bus.read(addr),
        }
    }

    /// Resolve and read in one go.
    pub(crate) fn fetch_operand(&mut self, mode: AddressingMode) -> u8 {
        let operand = self.resolve(mode);
        self.load(operand)
    }

    /// Resolve a mode that must produce an address (stores, read-modify-write).
    pub(crate) fn resolve_address(&mut self, mode: AddressingMode) -> u16 {
        match self.resolve(mode) {
            Operand::Address(addr) => addr,
            Operand::Immediate(_) => unreachable!("{mode:?} does not address memory"),
        }
    }

    /// JMP (ind) target. Reproduces the NMOS page-wrap bug: a pointer at
    /// $xxFF takes its high byte from $xx00, not from the next page.
    pub(crate) fn indirect_target(&mut self) -> u16 {
        let ptr = self.operand_word();

        let lo = self.bus.read(ptr) as u16;
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = self.bus.read(hi_addr) as u16;

        self.pc = self.pc.wrapping_add(AddressingMode::Indirect.len());
        (hi << 8) | lo
    }

    /// Branch destination: PC + 2 + signed offset. Does not move PC.
    pub(crate) fn relative_target(&mut self) -> u16 {
        let offset = self.operand_byte() as i8;
        self.pc
            .wrapping_add(AddressingMode::Relative.len())
            .wrapping_add(offset as u16)
    }
}
