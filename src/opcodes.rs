//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode metadata table that serves as the
//! single source of truth for decoding on every supported CPU behaviour.
//!
//! The table covers:
//! - **151 documented NMOS instructions**
//! - **59 65C02 additions** (marked `cmos_only`), including the Rockwell bit
//!   instructions RMB/SMB/BBR/BBS
//! - **46 undefined slots**, marked with the "???" mnemonic
//!
//! Undefined slots carry the operand size the 65C02 gives them as reserved
//! NOPs, so that stepping over one consumes the same bytes on every part.
//! Which entries are executable is decided by [`is_legal`].

use crate::addressing::AddressingMode;
use crate::cpu::CpuBehavior;

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.nmos_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// assert!(!lda_imm.cmos_only);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "LDA", "BBR3", "???" for undefined slots).
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands), 1-3.
    pub size_bytes: u8,

    /// Base cycle cost on NMOS parts (no page-crossing penalties).
    pub nmos_cycles: u8,

    /// Base cycle cost on CMOS parts.
    pub cmos_cycles: u8,

    /// Only decodes on CMOS parts.
    pub cmos_only: bool,
}

impl OpcodeMetadata {
    /// Returns true for slots no supported part defines.
    pub fn is_undefined(&self) -> bool {
        self.mnemonic == "???"
    }

    /// Base cycle cost for the given behaviour.
    pub fn cycles(&self, behavior: CpuBehavior) -> u8 {
        if behavior.is_cmos() {
            self.cmos_cycles
        } else {
            self.nmos_cycles
        }
    }
}

/// Returns true if `opcode` executes as a real instruction under `behavior`.
///
/// Undefined slots are never legal; 65C02 additions are legal only on CMOS
/// parts.
///
/// ```
/// use sim6502::{opcodes::is_legal, CpuBehavior};
///
/// assert!(is_legal(0xA9, CpuBehavior::Nmos6502));
/// assert!(!is_legal(0x80, CpuBehavior::Nmos6502)); // BRA
/// assert!(is_legal(0x80, CpuBehavior::Cmos6502));
/// assert!(!is_legal(0x03, CpuBehavior::Cmos6502));
/// ```
pub fn is_legal(opcode: u8, behavior: CpuBehavior) -> bool {
    let meta = &OPCODE_TABLE[opcode as usize];
    !meta.is_undefined() && (!meta.cmos_only || behavior.is_cmos())
}

const ACC: AddressingMode = AddressingMode::Accumulator;
const IMM: AddressingMode = AddressingMode::Immediate;
const IMP: AddressingMode = AddressingMode::Implied;
const ABS: AddressingMode = AddressingMode::Absolute;
const ABX: AddressingMode = AddressingMode::AbsoluteX;
const ABY: AddressingMode = AddressingMode::AbsoluteY;
const IND: AddressingMode = AddressingMode::AbsoluteIndirect;
const IAX: AddressingMode = AddressingMode::AbsoluteXIndirect;
const ZPG: AddressingMode = AddressingMode::ZeroPage;
const ZPX: AddressingMode = AddressingMode::ZeroPageX;
const ZPY: AddressingMode = AddressingMode::ZeroPageY;
const ZPI: AddressingMode = AddressingMode::ZeroPageIndirect;
const IZX: AddressingMode = AddressingMode::IndexedIndirectX;
const IZY: AddressingMode = AddressingMode::IndirectIndexedY;
const REL: AddressingMode = AddressingMode::Relative;
const ZPR: AddressingMode = AddressingMode::ZeroPageRelative;

/// Instruction present on every part.
const fn op(
    mnemonic: &'static str,
    mode: AddressingMode,
    size: u8,
    nmos: u8,
    cmos: u8,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode: mode,
        size_bytes: size,
        nmos_cycles: nmos,
        cmos_cycles: cmos,
        cmos_only: false,
    }
}

/// 65C02 addition. On NMOS parts it is trapped; the NMOS count is what the
/// trapped slot consumes.
const fn c02(mnemonic: &'static str, mode: AddressingMode, size: u8, cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode: mode,
        size_bytes: size,
        nmos_cycles: 2,
        cmos_cycles: cycles,
        cmos_only: true,
    }
}

/// Undefined slot, sized like the 65C02 reserved NOP in the same position.
const fn undef(size: u8, cmos: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic: "???",
        addressing_mode: AddressingMode::Null,
        size_bytes: size,
        nmos_cycles: 2,
        cmos_cycles: cmos,
        cmos_only: false,
    }
}

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use sim6502::{CpuBehavior, OPCODE_TABLE};
///
/// let jmp_ind = &OPCODE_TABLE[0x6C];
/// assert_eq!(jmp_ind.cycles(CpuBehavior::Nmos6502), 5);
/// assert_eq!(jmp_ind.cycles(CpuBehavior::Cmos6502), 6);
///
/// let reserved = &OPCODE_TABLE[0x5C];
/// assert!(reserved.is_undefined());
/// assert_eq!(reserved.size_bytes, 3);
/// ```
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    op("BRK", IMP, 1, 7, 7),   op("ORA", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    c02("TSB", ZPG, 2, 5),     op("ORA", ZPG, 2, 3, 3),   op("ASL", ZPG, 2, 5, 5),   c02("RMB0", ZPG, 2, 5),
    op("PHP", IMP, 1, 3, 3),   op("ORA", IMM, 2, 2, 2),   op("ASL", ACC, 1, 2, 2),   undef(1, 1),
    c02("TSB", ABS, 3, 6),     op("ORA", ABS, 3, 4, 4),   op("ASL", ABS, 3, 6, 6),   c02("BBR0", ZPR, 3, 5),
    // 0x10
    op("BPL", REL, 2, 2, 2),   op("ORA", IZY, 2, 5, 5),   c02("ORA", ZPI, 2, 5),     undef(1, 1),
    c02("TRB", ZPG, 2, 5),     op("ORA", ZPX, 2, 4, 4),   op("ASL", ZPX, 2, 6, 6),   c02("RMB1", ZPG, 2, 5),
    op("CLC", IMP, 1, 2, 2),   op("ORA", ABY, 3, 4, 4),   c02("INC", ACC, 1, 2),     undef(1, 1),
    c02("TRB", ABS, 3, 6),     op("ORA", ABX, 3, 4, 4),   op("ASL", ABX, 3, 7, 6),   c02("BBR1", ZPR, 3, 5),
    // 0x20
    op("JSR", ABS, 3, 6, 6),   op("AND", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    op("BIT", ZPG, 2, 3, 3),   op("AND", ZPG, 2, 3, 3),   op("ROL", ZPG, 2, 5, 5),   c02("RMB2", ZPG, 2, 5),
    op("PLP", IMP, 1, 4, 4),   op("AND", IMM, 2, 2, 2),   op("ROL", ACC, 1, 2, 2),   undef(1, 1),
    op("BIT", ABS, 3, 4, 4),   op("AND", ABS, 3, 4, 4),   op("ROL", ABS, 3, 6, 6),   c02("BBR2", ZPR, 3, 5),
    // 0x30
    op("BMI", REL, 2, 2, 2),   op("AND", IZY, 2, 5, 5),   c02("AND", ZPI, 2, 5),     undef(1, 1),
    c02("BIT", ZPX, 2, 4),     op("AND", ZPX, 2, 4, 4),   op("ROL", ZPX, 2, 6, 6),   c02("RMB3", ZPG, 2, 5),
    op("SEC", IMP, 1, 2, 2),   op("AND", ABY, 3, 4, 4),   c02("DEC", ACC, 1, 2),     undef(1, 1),
    c02("BIT", ABX, 3, 4),     op("AND", ABX, 3, 4, 4),   op("ROL", ABX, 3, 7, 6),   c02("BBR3", ZPR, 3, 5),
    // 0x40
    op("RTI", IMP, 1, 6, 6),   op("EOR", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    undef(2, 3),               op("EOR", ZPG, 2, 3, 3),   op("LSR", ZPG, 2, 5, 5),   c02("RMB4", ZPG, 2, 5),
    op("PHA", IMP, 1, 3, 3),   op("EOR", IMM, 2, 2, 2),   op("LSR", ACC, 1, 2, 2),   undef(1, 1),
    op("JMP", ABS, 3, 3, 3),   op("EOR", ABS, 3, 4, 4),   op("LSR", ABS, 3, 6, 6),   c02("BBR4", ZPR, 3, 5),
    // 0x50
    op("BVC", REL, 2, 2, 2),   op("EOR", IZY, 2, 5, 5),   c02("EOR", ZPI, 2, 5),     undef(1, 1),
    undef(2, 4),               op("EOR", ZPX, 2, 4, 4),   op("LSR", ZPX, 2, 6, 6),   c02("RMB5", ZPG, 2, 5),
    op("CLI", IMP, 1, 2, 2),   op("EOR", ABY, 3, 4, 4),   c02("PHY", IMP, 1, 3),     undef(1, 1),
    undef(3, 8),               op("EOR", ABX, 3, 4, 4),   op("LSR", ABX, 3, 7, 6),   c02("BBR5", ZPR, 3, 5),
    // 0x60
    op("RTS", IMP, 1, 6, 6),   op("ADC", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    c02("STZ", ZPG, 2, 3),     op("ADC", ZPG, 2, 3, 3),   op("ROR", ZPG, 2, 5, 5),   c02("RMB6", ZPG, 2, 5),
    op("PLA", IMP, 1, 4, 4),   op("ADC", IMM, 2, 2, 2),   op("ROR", ACC, 1, 2, 2),   undef(1, 1),
    op("JMP", IND, 3, 5, 6),   op("ADC", ABS, 3, 4, 4),   op("ROR", ABS, 3, 6, 6),   c02("BBR6", ZPR, 3, 5),
    // 0x70
    op("BVS", REL, 2, 2, 2),   op("ADC", IZY, 2, 5, 5),   c02("ADC", ZPI, 2, 5),     undef(1, 1),
    c02("STZ", ZPX, 2, 4),     op("ADC", ZPX, 2, 4, 4),   op("ROR", ZPX, 2, 6, 6),   c02("RMB7", ZPG, 2, 5),
    op("SEI", IMP, 1, 2, 2),   op("ADC", ABY, 3, 4, 4),   c02("PLY", IMP, 1, 4),     undef(1, 1),
    c02("JMP", IAX, 3, 6),     op("ADC", ABX, 3, 4, 4),   op("ROR", ABX, 3, 7, 6),   c02("BBR7", ZPR, 3, 5),
    // 0x80
    c02("BRA", REL, 2, 3),     op("STA", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    op("STY", ZPG, 2, 3, 3),   op("STA", ZPG, 2, 3, 3),   op("STX", ZPG, 2, 3, 3),   c02("SMB0", ZPG, 2, 5),
    op("DEY", IMP, 1, 2, 2),   c02("BIT", IMM, 2, 2),     op("TXA", IMP, 1, 2, 2),   undef(1, 1),
    op("STY", ABS, 3, 4, 4),   op("STA", ABS, 3, 4, 4),   op("STX", ABS, 3, 4, 4),   c02("BBS0", ZPR, 3, 5),
    // 0x90
    op("BCC", REL, 2, 2, 2),   op("STA", IZY, 2, 6, 6),   c02("STA", ZPI, 2, 5),     undef(1, 1),
    op("STY", ZPX, 2, 4, 4),   op("STA", ZPX, 2, 4, 4),   op("STX", ZPY, 2, 4, 4),   c02("SMB1", ZPG, 2, 5),
    op("TYA", IMP, 1, 2, 2),   op("STA", ABY, 3, 5, 5),   op("TXS", IMP, 1, 2, 2),   undef(1, 1),
    c02("STZ", ABS, 3, 4),     op("STA", ABX, 3, 5, 5),   c02("STZ", ABX, 3, 5),     c02("BBS1", ZPR, 3, 5),
    // 0xA0
    op("LDY", IMM, 2, 2, 2),   op("LDA", IZX, 2, 6, 6),   op("LDX", IMM, 2, 2, 2),   undef(1, 1),
    op("LDY", ZPG, 2, 3, 3),   op("LDA", ZPG, 2, 3, 3),   op("LDX", ZPG, 2, 3, 3),   c02("SMB2", ZPG, 2, 5),
    op("TAY", IMP, 1, 2, 2),   op("LDA", IMM, 2, 2, 2),   op("TAX", IMP, 1, 2, 2),   undef(1, 1),
    op("LDY", ABS, 3, 4, 4),   op("LDA", ABS, 3, 4, 4),   op("LDX", ABS, 3, 4, 4),   c02("BBS2", ZPR, 3, 5),
    // 0xB0
    op("BCS", REL, 2, 2, 2),   op("LDA", IZY, 2, 5, 5),   c02("LDA", ZPI, 2, 5),     undef(1, 1),
    op("LDY", ZPX, 2, 4, 4),   op("LDA", ZPX, 2, 4, 4),   op("LDX", ZPY, 2, 4, 4),   c02("SMB3", ZPG, 2, 5),
    op("CLV", IMP, 1, 2, 2),   op("LDA", ABY, 3, 4, 4),   op("TSX", IMP, 1, 2, 2),   undef(1, 1),
    op("LDY", ABX, 3, 4, 4),   op("LDA", ABX, 3, 4, 4),   op("LDX", ABY, 3, 4, 4),   c02("BBS3", ZPR, 3, 5),
    // 0xC0
    op("CPY", IMM, 2, 2, 2),   op("CMP", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    op("CPY", ZPG, 2, 3, 3),   op("CMP", ZPG, 2, 3, 3),   op("DEC", ZPG, 2, 5, 5),   c02("SMB4", ZPG, 2, 5),
    op("INY", IMP, 1, 2, 2),   op("CMP", IMM, 2, 2, 2),   op("DEX", IMP, 1, 2, 2),   undef(1, 1),
    op("CPY", ABS, 3, 4, 4),   op("CMP", ABS, 3, 4, 4),   op("DEC", ABS, 3, 6, 6),   c02("BBS4", ZPR, 3, 5),
    // 0xD0
    op("BNE", REL, 2, 2, 2),   op("CMP", IZY, 2, 5, 5),   c02("CMP", ZPI, 2, 5),     undef(1, 1),
    undef(2, 4),               op("CMP", ZPX, 2, 4, 4),   op("DEC", ZPX, 2, 6, 6),   c02("SMB5", ZPG, 2, 5),
    op("CLD", IMP, 1, 2, 2),   op("CMP", ABY, 3, 4, 4),   c02("PHX", IMP, 1, 3),     undef(1, 1),
    undef(3, 4),               op("CMP", ABX, 3, 4, 4),   op("DEC", ABX, 3, 7, 7),   c02("BBS5", ZPR, 3, 5),
    // 0xE0
    op("CPX", IMM, 2, 2, 2),   op("SBC", IZX, 2, 6, 6),   undef(2, 2),               undef(1, 1),
    op("CPX", ZPG, 2, 3, 3),   op("SBC", ZPG, 2, 3, 3),   op("INC", ZPG, 2, 5, 5),   c02("SMB6", ZPG, 2, 5),
    op("INX", IMP, 1, 2, 2),   op("SBC", IMM, 2, 2, 2),   op("NOP", IMP, 1, 2, 2),   undef(1, 1),
    op("CPX", ABS, 3, 4, 4),   op("SBC", ABS, 3, 4, 4),   op("INC", ABS, 3, 6, 6),   c02("BBS6", ZPR, 3, 5),
    // 0xF0
    op("BEQ", REL, 2, 2, 2),   op("SBC", IZY, 2, 5, 5),   c02("SBC", ZPI, 2, 5),     undef(1, 1),
    undef(2, 4),               op("SBC", ZPX, 2, 4, 4),   op("INC", ZPX, 2, 6, 6),   c02("SMB7", ZPG, 2, 5),
    op("SED", IMP, 1, 2, 2),   op("SBC", ABY, 3, 4, 4),   c02("PLX", IMP, 1, 4),     undef(1, 1),
    undef(3, 4),               op("SBC", ABX, 3, 4, 4),   op("INC", ABX, 3, 7, 7),   c02("BBS7", ZPR, 3, 5),
];
