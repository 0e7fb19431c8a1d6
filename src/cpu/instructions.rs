//! Instruction semantics.
//!
//! Handlers own all PC and cycle accounting for their instruction: operand
//! modes go through the resolver (which advances PC and charges the mode's
//! base cycles), everything else adjusts PC and `cycles` directly.
//!
//! Reference: <https://www.nesdev.org/obelisk-6502-guide/reference.html>

use crate::{
    bus::Bus,
    cpu::{
        addressing::AddressingMode,
        cpu::{CPU, IRQ_VECTOR},
        flags::{
            FLAG_BREAK, FLAG_CARRY, FLAG_DECIMAL, FLAG_INTERRUPT_DISABLE, FLAG_NEGATIVE,
            FLAG_OVERFLOW, FLAG_ZERO, NEGATIVE_BIT, OVERFLOW_BIT, get_bit,
        },
        opcodes::{Instruction, Mnemonic},
    },
};

/// Extra cycles a read-modify-write instruction spends on top of the mode's
/// base cost: the dummy write plus the write-back.
const fn read_modify_write_cycles(mode: AddressingMode) -> u64 {
    match mode {
        AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::IndirectIndexed => 3,
        _ => 2,
    }
}

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, instruction: Instruction) {
        let mode = instruction.mode;

        match instruction.mnemonic {
            Mnemonic::Lda => {
                let value = self.fetch_operand(mode);
                self.a = value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Ldx => {
                let value = self.fetch_operand(mode);
                self.x = value;
                self.update_zero_and_negative_flags(self.x);
            }
            Mnemonic::Ldy => {
                let value = self.fetch_operand(mode);
                self.y = value;
                self.update_zero_and_negative_flags(self.y);
            }
            Mnemonic::Lax => {
                let value = self.fetch_operand(mode);
                self.a = value;
                self.x = value;
                self.update_zero_and_negative_flags(value);
            }

            Mnemonic::Sta => {
                self.store(mode, self.a);
                if matches!(
                    mode,
                    AddressingMode::AbsoluteX
                        | AddressingMode::AbsoluteY
                        | AddressingMode::IndirectIndexed
                ) {
                    self.cycles += 1;
                }
            }
            Mnemonic::Stx => self.store(mode, self.x),
            Mnemonic::Sty => self.store(mode, self.y),
            Mnemonic::Sax => self.store(mode, self.a & self.x),

            Mnemonic::Tax => {
                self.x = self.a;
                self.update_zero_and_negative_flags(self.x);
                self.implied();
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.update_zero_and_negative_flags(self.y);
                self.implied();
            }
            Mnemonic::Tsx => {
                self.x = self.sp;
                self.update_zero_and_negative_flags(self.x);
                self.implied();
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.update_zero_and_negative_flags(self.a);
                self.implied();
            }
            Mnemonic::Txs => {
                self.sp = self.x;
                self.implied();
            }
            Mnemonic::Tya => {
                self.a = self.y;
                self.update_zero_and_negative_flags(self.a);
                self.implied();
            }

            Mnemonic::Pha => {
                self.push(self.a);
                self.pc = self.pc.wrapping_add(1);
                self.cycles += 3;
            }
            Mnemonic::Php => {
                self.push(self.status);
                self.pc = self.pc.wrapping_add(1);
                self.cycles += 3;
            }
            Mnemonic::Pla => {
                self.a = self.pop();
                self.update_zero_and_negative_flags(self.a);
                self.pc = self.pc.wrapping_add(1);
                self.cycles += 4;
            }
            Mnemonic::Plp => {
                self.status = self.pop();
                self.pc = self.pc.wrapping_add(1);
                self.cycles += 4;
            }

            Mnemonic::And => {
                let value = self.fetch_operand(mode);
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Ora => {
                let value = self.fetch_operand(mode);
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Eor => {
                let value = self.fetch_operand(mode);
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Bit => {
                let value = self.fetch_operand(mode);
                self.set_flag(FLAG_ZERO, self.a & value == 0);
                self.set_flag(FLAG_OVERFLOW, get_bit(value, OVERFLOW_BIT));
                self.set_flag(FLAG_NEGATIVE, get_bit(value, NEGATIVE_BIT));
            }

            Mnemonic::Adc => {
                let value = self.fetch_operand(mode);
                self.add_with_carry(value);
            }
            Mnemonic::Sbc => {
                let value = self.fetch_operand(mode);
                self.add_with_carry(!value);
            }

            Mnemonic::Cmp => {
                let value = self.fetch_operand(mode);
                self.compare(self.a, value);
            }
            Mnemonic::Cpx => {
                let value = self.fetch_operand(mode);
                self.compare(self.x, value);
            }
            Mnemonic::Cpy => {
                let value = self.fetch_operand(mode);
                self.compare(self.y, value);
            }

            Mnemonic::Inc => {
                let value = self.modify(mode, |_, value| value.wrapping_add(1));
                self.update_zero_and_negative_flags(value);
            }
            Mnemonic::Dec => {
                let value = self.modify(mode, |_, value| value.wrapping_sub(1));
                self.update_zero_and_negative_flags(value);
            }
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zero_and_negative_flags(self.x);
                self.implied();
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zero_and_negative_flags(self.y);
                self.implied();
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.x);
                self.implied();
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zero_and_negative_flags(self.y);
                self.implied();
            }

            Mnemonic::Asl => self.shift(mode, Self::asl),
            Mnemonic::Lsr => self.shift(mode, Self::lsr),
            Mnemonic::Rol => self.shift(mode, Self::rol),
            Mnemonic::Ror => self.shift(mode, Self::ror),

            Mnemonic::Dcp => {
                let value = self.modify(mode, |_, value| value.wrapping_sub(1));
                self.compare(self.a, value);
            }
            Mnemonic::Isc => {
                let value = self.modify(mode, |_, value| value.wrapping_add(1));
                self.add_with_carry(!value);
            }
            Mnemonic::Slo => {
                let value = self.modify(mode, Self::asl);
                self.a |= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Rla => {
                let value = self.modify(mode, Self::rol);
                self.a &= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Sre => {
                let value = self.modify(mode, Self::lsr);
                self.a ^= value;
                self.update_zero_and_negative_flags(self.a);
            }
            Mnemonic::Rra => {
                let value = self.modify(mode, Self::ror);
                self.add_with_carry(value);
            }

            Mnemonic::Jmp => match mode {
                AddressingMode::Indirect => {
                    self.pc = self.indirect_target();
                    self.cycles += 5;
                }
                _ => {
                    self.pc = self.operand_word();
                    self.cycles += 3;
                }
            },
            Mnemonic::Jsr => self.jsr(),
            Mnemonic::Rts => self.rts(),
            Mnemonic::Rti => self.rti(),
            Mnemonic::Brk => self.brk(),

            Mnemonic::Bcc => self.branch(!self.flag(FLAG_CARRY)),
            Mnemonic::Bcs => self.branch(self.flag(FLAG_CARRY)),
            Mnemonic::Beq => self.branch(self.flag(FLAG_ZERO)),
            Mnemonic::Bmi => self.branch(self.flag(FLAG_NEGATIVE)),
            Mnemonic::Bne => self.branch(!self.flag(FLAG_ZERO)),
            Mnemonic::Bpl => self.branch(!self.flag(FLAG_NEGATIVE)),
            Mnemonic::Bvc => self.branch(!self.flag(FLAG_OVERFLOW)),
            Mnemonic::Bvs => self.branch(self.flag(FLAG_OVERFLOW)),

            Mnemonic::Clc => self.set_status_bit(FLAG_CARRY, false),
            Mnemonic::Cld => self.set_status_bit(FLAG_DECIMAL, false),
            Mnemonic::Cli => self.set_status_bit(FLAG_INTERRUPT_DISABLE, false),
            Mnemonic::Clv => self.set_status_bit(FLAG_OVERFLOW, false),
            Mnemonic::Sec => self.set_status_bit(FLAG_CARRY, true),
            Mnemonic::Sed => self.set_status_bit(FLAG_DECIMAL, true),
            Mnemonic::Sei => self.set_status_bit(FLAG_INTERRUPT_DISABLE, true),

            Mnemonic::Nop => match mode {
                AddressingMode::Implied => self.implied(),
                // Multi-byte NOPs still perform their read.
                _ => {
                    self.fetch_operand(mode);
                }
            },
            // PC stays on the JAM byte.
            Mnemonic::Jam => self.halt(),
        }
    }

    /// One-byte, two-cycle instruction.
    fn implied(&mut self) {
        self.pc = self.pc.wrapping_add(1);
        self.cycles += 2;
    }

    fn set_status_bit(&mut self, flag: u8, on: bool) {
        self.set_flag(flag, on);
        self.implied();
    }

    fn store(&mut self, mode: AddressingMode, value: u8) {
        let addr = self.resolve_address(mode);
        self.bus.write(addr, value);
    }

    /// Read-modify-write on memory. Returns the value written back.
    fn modify(&mut self, mode: AddressingMode, op: fn(&mut Self, u8) -> u8) -> u8 {
        let addr = self.resolve_address(mode);
        let value = self.bus.read(addr);
        let result = op(self, value);
        self.bus.write(addr, result);
        self.cycles += read_modify_write_cycles(mode);
        result
    }

    /// ASL/LSR/ROL/ROR on the accumulator or on memory.
    fn shift(&mut self, mode: AddressingMode, op: fn(&mut Self, u8) -> u8) {
        let result = match mode {
            AddressingMode::Accumulator => {
                let value = self.a;
                self.a = op(self, value);
                self.implied();
                self.a
            }
            _ => self.modify(mode, op),
        };
        self.update_zero_and_negative_flags(result);
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, get_bit(value, 7));
        value << 1
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.set_flag(FLAG_CARRY, get_bit(value, 0));
        value >> 1
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = self.flag(FLAG_CARRY) as u8;
        self.set_flag(FLAG_CARRY, get_bit(value, 7));
        (value << 1) | carry_in
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = if self.flag(FLAG_CARRY) { 0x80 } else { 0 };
        self.set_flag(FLAG_CARRY, get_bit(value, 0));
        (value >> 1) | carry_in
    }

    /// A := A + value + C. SBC passes the complement of its operand, so C
    /// ends up meaning "no borrow".
    fn add_with_carry(&mut self, value: u8) {
        let a = self.a;
        let carry_in = self.flag(FLAG_CARRY);
        let result = a.wrapping_add(value).wrapping_add(carry_in as u8);

        self.set_carry_flag(a, value, carry_in);
        self.set_overflow_flag(a, value, result);

        self.a = result;
        self.update_zero_and_negative_flags(self.a);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.set_flag(FLAG_CARRY, register >= value);
        self.update_zero_and_negative_flags(register.wrapping_sub(value));
    }

    fn branch(&mut self, condition: bool) {
        self.cycles += 2;
        if condition {
            self.pc = self.relative_target();
            self.cycles += 1;
        } else {
            self.pc = self.pc.wrapping_add(AddressingMode::Relative.len());
        }
    }

    /// Pushes `JSR + 1`, high byte first. RTS adds two to that to land on the
    /// instruction after the JSR.
    fn jsr(&mut self) {
        let target = self.operand_word();
        let ret = self.pc.wrapping_add(1);

        self.push((ret >> 8) as u8);
        self.push(ret as u8);

        self.pc = target;
        self.cycles += 6;
    }

    fn rts(&mut self) {
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;

        self.pc = ((hi << 8) | lo).wrapping_add(2);
        self.cycles += 6;
    }

    fn rti(&mut self) {
        self.status = self.pop();
        let lo = self.pop() as u16;
        let hi = self.pop() as u16;

        self.pc = (hi << 8) | lo;
        self.cycles += 6;
    }

    /// Software interrupt. Stops the run loop once the frame is pushed and
    /// PC points at the handler.
    fn brk(&mut self) {
        let ret = self.pc.wrapping_add(1);

        self.push((ret >> 8) as u8);
        self.push(ret as u8);
        self.push(self.status | FLAG_BREAK);

        self.status |= FLAG_BREAK;
        self.pc = self.bus.read_word(IRQ_VECTOR);
        self.cycles += 7;
        self.halt();
    }
}
