//! 6502 processor status register (P) flag bits and single-bit helpers.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3;  // Stored, but the 2A03 has no BCD unit
pub const FLAG_BREAK: u8 = 1 << 4;    // Set by BRK
pub const FLAG_UNUSED: u8 = 1 << 5;
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

/// Bit positions of the flags above, for use with [`get_bit`] and friends.
pub const CARRY_BIT: u8 = 0;
pub const ZERO_BIT: u8 = 1;
pub const OVERFLOW_BIT: u8 = 6;
pub const NEGATIVE_BIT: u8 = 7;

/// True when bit `pos` (0..=7) of `byte` is set.
pub const fn get_bit(byte: u8, pos: u8) -> bool {
    debug_assert!(pos < 8);
    byte & (1 << pos) != 0
}

/// `byte` with bit `pos` (0..=7) set.
pub const fn set_bit(byte: u8, pos: u8) -> u8 {
    debug_assert!(pos < 8);
    byte | (1 << pos)
}

/// `byte` with bit `pos` (0..=7) cleared.
pub const fn clear_bit(byte: u8, pos: u8) -> u8 {
    debug_assert!(pos < 8);
    byte & !(1 << pos)
}
