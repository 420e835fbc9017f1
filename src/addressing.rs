//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 family (NMOS and CMOS)
//! and the pure address arithmetic they rely on. Each mode determines how the
//! CPU interprets operand bytes and calculates effective addresses.
//!
//! The arithmetic helpers take register and operand values and return an
//! address; they never touch memory. Index wrap rules follow the hardware:
//!
//! - Absolute indexing wraps at 16 bits (`$FFFF,X` with X=1 is `$0000`)
//! - Zero-page indexing wraps at 8 bits and never leaves page zero
//! - Relative branches add a signed offset to the already advanced PC

/// 6502/65C02 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, ZeroPageIndirect,
///   IndexedIndirectX, IndirectIndexedY, Relative
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, AbsoluteIndirect,
///   AbsoluteXIndirect, ZeroPageRelative
///
/// `Null` marks undefined opcode slots; their size comes from the opcode
/// table, not from the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, INC A (65C02)
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer.
    ///
    /// Example: JMP ($FFFC). Subject to the NMOS page-wrap bug.
    AbsoluteIndirect,

    /// Indirect jump through a 16-bit pointer indexed by X (65C02).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteXIndirect,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Pointer in zero page, no index (65C02).
    ///
    /// Example: LDA ($40)
    ZeroPageIndirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndexedIndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectIndexedY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Zero page operand plus a relative branch offset (65C02 BBR/BBS).
    ///
    /// Example: BBR0 $12,label
    ZeroPageRelative,

    /// Undefined opcode.
    Null,
}

impl AddressingMode {
    /// Number of operand bytes the mode itself implies.
    ///
    /// Returns `None` for [`AddressingMode::Null`], whose size depends on the
    /// opcode slot.
    pub fn operand_bytes(self) -> Option<u8> {
        use AddressingMode::*;
        match self {
            Accumulator | Implied => Some(0),
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | ZeroPageIndirect | IndexedIndirectX
            | IndirectIndexedY | Relative => Some(1),
            Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect | AbsoluteXIndirect
            | ZeroPageRelative => Some(2),
            Null => None,
        }
    }
}

/// Combines little-endian operand bytes into an address.
///
/// ```
/// use sim6502::addressing::address;
/// assert_eq!(address(0x34, 0x12), 0x1234);
/// ```
pub fn address(lo: u8, hi: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// Absolute address indexed by X, wrapping at 16 bits.
pub fn x_address(lo: u8, hi: u8, x: u8) -> u16 {
    address(lo, hi).wrapping_add(x as u16)
}

/// Absolute address indexed by Y, wrapping at 16 bits.
pub fn y_address(lo: u8, hi: u8, y: u8) -> u16 {
    address(lo, hi).wrapping_add(y as u16)
}

/// Zero-page address indexed by X, wrapping within page zero.
///
/// ```
/// use sim6502::addressing::zpx_address;
/// assert_eq!(zpx_address(0xFF, 0x02), 0x0001);
/// ```
pub fn zpx_address(zp: u8, x: u8) -> u16 {
    zp.wrapping_add(x) as u16
}

/// Zero-page address indexed by Y, wrapping within page zero.
pub fn zpy_address(zp: u8, y: u8) -> u16 {
    zp.wrapping_add(y) as u16
}

/// Branch target: `pc` plus `offset` read as a signed byte, wrapping at 16
/// bits. `pc` is the address after the branch instruction.
///
/// ```
/// use sim6502::addressing::rel_address;
/// assert_eq!(rel_address(0x0210, 0xFE), 0x020E);
/// assert_eq!(rel_address(0xFFFF, 0x02), 0x0001);
/// ```
pub fn rel_address(pc: u16, offset: u8) -> u16 {
    pc.wrapping_add(offset as i8 as u16)
}
