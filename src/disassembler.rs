//! 6502 Disassembler Module
//!
//! Converts machine code into assembly text, using the same opcode table and
//! legality rules the CPU executes with. Opcodes that do not decode on the
//! selected [`CpuBehavior`] come out as `.byte` directives.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::cpu::CpuBehavior;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "BBS3", ".byte")
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost on the selected behaviour
    pub cycles: u8,
}

/// Disassemble a byte slice into a vector of instructions
///
/// `start_address` is the address of `bytes[0]`; it only affects the
/// addresses shown and the targets of relative branches.
///
/// # Examples
///
/// ```
/// use sim6502::disassembler::{disassemble, formatter::format_instruction};
/// use sim6502::CpuBehavior;
///
/// let code = [0xA9, 0x42, 0x80, 0xFC];
/// let listing: Vec<String> = disassemble(&code, 0x0200, CpuBehavior::Cmos6502)
///     .iter()
///     .map(format_instruction)
///     .collect();
/// assert_eq!(listing, vec!["LDA #$42", "BRA $0200"]);
/// ```
pub fn disassemble(bytes: &[u8], start_address: u16, behavior: CpuBehavior) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address, behavior)
            .unwrap_or_else(|| decoder::byte_directive(bytes[pc], address));
        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Formats one instruction given its opcode and operand bytes.
///
/// This is the form the CPU uses for trace output, where the operands have
/// already been fetched.
///
/// ```
/// use sim6502::disassembler::disassemble_op;
/// use sim6502::CpuBehavior;
///
/// assert_eq!(disassemble_op(0x8000, 0xBD, &[0x34, 0x12], CpuBehavior::Nmos6502), "LDA $1234,X");
/// assert_eq!(disassemble_op(0x8000, 0x64, &[0x10], CpuBehavior::Nmos6502), ".byte $64");
/// ```
pub fn disassemble_op(address: u16, opcode: u8, operands: &[u8], behavior: CpuBehavior) -> String {
    let mut bytes = Vec::with_capacity(3);
    bytes.push(opcode);
    bytes.extend_from_slice(operands);
    let instr = decoder::decode_instruction(&bytes, address, behavior)
        .unwrap_or_else(|| decoder::byte_directive(opcode, address));
    formatter::format_instruction(&instr)
}
