//! Opcode decoding.
//!
//! Every opcode byte maps to at most one [`Instruction`]: the operation and
//! the addressing mode it uses. The mapping is a `const fn` over a fixed
//! match, so it is read-only data shared by every CPU instance.
//!
//! Undocumented opcodes follow the NMOS behaviour exercised by
//! [nestest](https://www.nesdev.org/wiki/Emulator_tests): LAX, SAX, DCP, ISC,
//! SLO, RLA, SRE, RRA, the SBC alias at $EB, multi-byte NOPs and JAM.

use crate::cpu::addressing::AddressingMode::{self, *};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    // Load / store
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Transfer
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Logical
    And,
    Eor,
    Ora,
    Bit,
    // Arithmetic
    Adc,
    Sbc,
    // Compare
    Cmp,
    Cpx,
    Cpy,
    // Increment / decrement
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,
    // Shift / rotate
    Asl,
    Lsr,
    Rol,
    Ror,
    // Jump / subroutine / interrupt
    Jmp,
    Jsr,
    Rts,
    Rti,
    Brk,
    // Branch
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
    // Flag control
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,
    Nop,
    // Undocumented
    Lax,
    Sax,
    Dcp,
    Isc,
    Slo,
    Rla,
    Sre,
    Rra,
    Jam,
}

impl Mnemonic {
    /// Assembler spelling, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::And => "AND",
            Mnemonic::Eor => "EOR",
            Mnemonic::Ora => "ORA",
            Mnemonic::Bit => "BIT",
            Mnemonic::Adc => "ADC",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Asl => "ASL",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Rts => "RTS",
            Mnemonic::Rti => "RTI",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Nop => "NOP",
            Mnemonic::Lax => "LAX",
            Mnemonic::Sax => "SAX",
            Mnemonic::Dcp => "DCP",
            Mnemonic::Isc => "ISC",
            Mnemonic::Slo => "SLO",
            Mnemonic::Rla => "RLA",
            Mnemonic::Sre => "SRE",
            Mnemonic::Rra => "RRA",
            Mnemonic::Jam => "JAM",
        }
    }
}

/// A decoded opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
}

const fn ins(mnemonic: Mnemonic, mode: AddressingMode) -> Option<Instruction> {
    Some(Instruction { mnemonic, mode })
}

/// Decode an opcode byte. `None` means the byte is not an instruction this
/// CPU knows how to execute.
pub const fn decode(opcode: u8) -> Option<Instruction> {
    use Mnemonic::*;

    match opcode {
        0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2 | 0xF2 => {
            ins(Jam, Implied)
        }
        0xEA | 0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => ins(Nop, Implied),
        0x04 | 0x44 | 0x64 => ins(Nop, ZeroPage),
        0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 => ins(Nop, ZeroPageX),
        0x0C => ins(Nop, Absolute),
        0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => ins(Nop, AbsoluteX),
        0x80 | 0x82 | 0x89 | 0xC2 | 0xE2 => ins(Nop, Immediate),

        0xA9 => ins(Lda, Immediate),
        0xA5 => ins(Lda, ZeroPage),
        0xB5 => ins(Lda, ZeroPageX),
        0xAD => ins(Lda, Absolute),
        0xBD => ins(Lda, AbsoluteX),
        0xB9 => ins(Lda, AbsoluteY),
        0xA1 => ins(Lda, IndexedIndirect),
        0xB1 => ins(Lda, IndirectIndexed),
        0xA2 => ins(Ldx, Immediate),
        0xA6 => ins(Ldx, ZeroPage),
        0xB6 => ins(Ldx, ZeroPageY),
        0xAE => ins(Ldx, Absolute),
        0xBE => ins(Ldx, AbsoluteY),
        0xA0 => ins(Ldy, Immediate),
        0xA4 => ins(Ldy, ZeroPage),
        0xB4 => ins(Ldy, ZeroPageX),
        0xAC => ins(Ldy, Absolute),
        0xBC => ins(Ldy, AbsoluteX),
        0xA7 => ins(Lax, ZeroPage),
        0xB7 => ins(Lax, ZeroPageY),
        0xAF => ins(Lax, Absolute),
        0xBF => ins(Lax, AbsoluteY),
        0xA3 => ins(Lax, IndexedIndirect),
        0xB3 => ins(Lax, IndirectIndexed),

        0x85 => ins(Sta, ZeroPage),
        0x95 => ins(Sta, ZeroPageX),
        0x8D => ins(Sta, Absolute),
        0x9D => ins(Sta, AbsoluteX),
        0x99 => ins(Sta, AbsoluteY),
        0x81 => ins(Sta, IndexedIndirect),
        0x91 => ins(Sta, IndirectIndexed),
        0x86 => ins(Stx, ZeroPage),
        0x96 => ins(Stx, ZeroPageY),
        0x8E => ins(Stx, Absolute),
        0x84 => ins(Sty, ZeroPage),
        0x94 => ins(Sty, ZeroPageX),
        0x8C => ins(Sty, Absolute),
        0x87 => ins(Sax, ZeroPage),
        0x97 => ins(Sax, ZeroPageY),
        0x8F => ins(Sax, Absolute),
        0x83 => ins(Sax, IndexedIndirect),

        0xAA => ins(Tax, Implied),
        0xA8 => ins(Tay, Implied),
        0xBA => ins(Tsx, Implied),
        0x8A => ins(Txa, Implied),
        0x9A => ins(Txs, Implied),
        0x98 => ins(Tya, Implied),

        0x48 => ins(Pha, Implied),
        0x08 => ins(Php, Implied),
        0x68 => ins(Pla, Implied),
        0x28 => ins(Plp, Implied),

        0x29 => ins(And, Immediate),
        0x25 => ins(And, ZeroPage),
        0x35 => ins(And, ZeroPageX),
        0x2D => ins(And, Absolute),
        0x3D => ins(And, AbsoluteX),
        0x39 => ins(And, AbsoluteY),
        0x21 => ins(And, IndexedIndirect),
        0x31 => ins(And, IndirectIndexed),
        0x49 => ins(Eor, Immediate),
        0x45 => ins(Eor, ZeroPage),
        0x55 => ins(Eor, ZeroPageX),
        0x4D => ins(Eor, Absolute),
        0x5D => ins(Eor, AbsoluteX),
        0x59 => ins(Eor, AbsoluteY),
        0x41 => ins(Eor, IndexedIndirect),
        0x51 => ins(Eor, IndirectIndexed),
        0x09 => ins(Ora, Immediate),
        0x05 => ins(Ora, ZeroPage),
        0x15 => ins(Ora, ZeroPageX),
        0x0D => ins(Ora, Absolute),
        0x1D => ins(Ora, AbsoluteX),
        0x19 => ins(Ora, AbsoluteY),
        0x01 => ins(Ora, IndexedIndirect),
        0x11 => ins(Ora, IndirectIndexed),
        0x24 => ins(Bit, ZeroPage),
        0x2C => ins(Bit, Absolute),

        0x69 => ins(Adc, Immediate),
        0x65 => ins(Adc, ZeroPage),
        0x75 => ins(Adc, ZeroPageX),
        0x6D => ins(Adc, Absolute),
        0x7D => ins(Adc, AbsoluteX),
        0x79 => ins(Adc, AbsoluteY),
        0x61 => ins(Adc, IndexedIndirect),
        0x71 => ins(Adc, IndirectIndexed),
        0xE9 | 0xEB => ins(Sbc, Immediate),
        0xE5 => ins(Sbc, ZeroPage),
        0xF5 => ins(Sbc, ZeroPageX),
        0xED => ins(Sbc, Absolute),
        0xFD => ins(Sbc, AbsoluteX),
        0xF9 => ins(Sbc, AbsoluteY),
        0xE1 => ins(Sbc, IndexedIndirect),
        0xF1 => ins(Sbc, IndirectIndexed),

        0xC9 => ins(Cmp, Immediate),
        0xC5 => ins(Cmp, ZeroPage),
        0xD5 => ins(Cmp, ZeroPageX),
        0xCD => ins(Cmp, Absolute),
        0xDD => ins(Cmp, AbsoluteX),
        0xD9 => ins(Cmp, AbsoluteY),
        0xC1 => ins(Cmp, IndexedIndirect),
        0xD1 => ins(Cmp, IndirectIndexed),
        0xE0 => ins(Cpx, Immediate),
        0xE4 => ins(Cpx, ZeroPage),
        0xEC => ins(Cpx, Absolute),
        0xC0 => ins(Cpy, Immediate),
        0xC4 => ins(Cpy, ZeroPage),
        0xCC => ins(Cpy, Absolute),

        0xE6 => ins(Inc, ZeroPage),
        0xF6 => ins(Inc, ZeroPageX),
        0xEE => ins(Inc, Absolute),
        0xFE => ins(Inc, AbsoluteX),
        0xE8 => ins(Inx, Implied),
        0xC8 => ins(Iny, Implied),
        0xC6 => ins(Dec, ZeroPage),
        0xD6 => ins(Dec, ZeroPageX),
        0xCE => ins(Dec, Absolute),
        0xDE => ins(Dec, AbsoluteX),
        0xCA => ins(Dex, Implied),
        0x88 => ins(Dey, Implied),

        0x0A => ins(Asl, Accumulator),
        0x06 => ins(Asl, ZeroPage),
        0x16 => ins(Asl, ZeroPageX),
        0x0E => ins(Asl, Absolute),
        0x1E => ins(Asl, AbsoluteX),
        0x4A => ins(Lsr, Accumulator),
        0x46 => ins(Lsr, ZeroPage),
        0x56 => ins(Lsr, ZeroPageX),
        0x4E => ins(Lsr, Absolute),
        0x5E => ins(Lsr, AbsoluteX),
        0x2A => ins(Rol, Accumulator),
        0x26 => ins(Rol, ZeroPage),
        0x36 => ins(Rol, ZeroPageX),
        0x2E => ins(Rol, Absolute),
        0x3E => ins(Rol, AbsoluteX),
        0x6A => ins(Ror, Accumulator),
        0x66 => ins(Ror, ZeroPage),
        0x76 => ins(Ror, ZeroPageX),
        0x6E => ins(Ror, Absolute),
        0x7E => ins(Ror, AbsoluteX),

        0xC7 => ins(Dcp, ZeroPage),
        0xD7 => ins(Dcp, ZeroPageX),
        0xCF => ins(Dcp, Absolute),
        0xDF => ins(Dcp, AbsoluteX),
        0xDB => ins(Dcp, AbsoluteY),
        0xC3 => ins(Dcp, IndexedIndirect),
        0xD3 => ins(Dcp, IndirectIndexed),
        0xE7 => ins(Isc, ZeroPage),
        0xF7 => ins(Isc, ZeroPageX),
        0xEF => ins(Isc, Absolute),
        0xFF => ins(Isc, AbsoluteX),
        0xFB => ins(Isc, AbsoluteY),
        0xE3 => ins(Isc, IndexedIndirect),
        0xF3 => ins(Isc, IndirectIndexed),
        0x07 => ins(Slo, ZeroPage),
        0x17 => ins(Slo, ZeroPageX),
        0x0F => ins(Slo, Absolute),
        0x1F => ins(Slo, AbsoluteX),
        0x1B => ins(Slo, AbsoluteY),
        0x03 => ins(Slo, IndexedIndirect),
        0x13 => ins(Slo, IndirectIndexed),
        0x27 => ins(Rla, ZeroPage),
        0x37 => ins(Rla, ZeroPageX),
        0x2F => ins(Rla, Absolute),
        0x3F => ins(Rla, AbsoluteX),
        0x3B => ins(Rla, AbsoluteY),
        0x23 => ins(Rla, IndexedIndirect),
        0x33 => ins(Rla, IndirectIndexed),
        0x47 => ins(Sre, ZeroPage),
        0x57 => ins(Sre, ZeroPageX),
        0x4F => ins(Sre, Absolute),
        0x5F => ins(Sre, AbsoluteX),
        0x5B => ins(Sre, AbsoluteY),
        0x43 => ins(Sre, IndexedIndirect),
        0x53 => ins(Sre, IndirectIndexed),
        0x67 => ins(Rra, ZeroPage),
        0x77 => ins(Rra, ZeroPageX),
        0x6F => ins(Rra, Absolute),
        0x7F => ins(Rra, AbsoluteX),
        0x7B => ins(Rra, AbsoluteY),
        0x63 => ins(Rra, IndexedIndirect),
        0x73 => ins(Rra, IndirectIndexed),

        0x4C => ins(Jmp, Absolute),
        0x6C => ins(Jmp, Indirect),
        0x20 => ins(Jsr, Absolute),
        0x60 => ins(Rts, Implied),
        0x40 => ins(Rti, Implied),
        0x00 => ins(Brk, Implied),

        0x90 => ins(Bcc, Relative),
        0xB0 => ins(Bcs, Relative),
        0xF0 => ins(Beq, Relative),
        0x30 => ins(Bmi, Relative),
        0xD0 => ins(Bne, Relative),
        0x10 => ins(Bpl, Relative),
        0x50 => ins(Bvc, Relative),
        0x70 => ins(Bvs, Relative),

        0x18 => ins(Clc, Implied),
        0xD8 => ins(Cld, Implied),
        0x58 => ins(Cli, Implied),
        0xB8 => ins(Clv, Implied),
        0x38 => ins(Sec, Implied),
        0xF8 => ins(Sed, Implied),
        0x78 => ins(Sei, Implied),

        _ => None,
    }
}
