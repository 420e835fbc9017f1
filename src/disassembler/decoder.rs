//! Instruction decoder for the 6502 disassembler

use crate::addressing::AddressingMode;
use crate::cpu::CpuBehavior;
use crate::disassembler::Instruction;
use crate::opcodes::{is_legal, OPCODE_TABLE};

/// Decode a single instruction from a byte slice
///
/// # Returns
///
/// `Some(Instruction)` if the opcode is legal on `behavior` and enough bytes
/// follow it, `None` otherwise
pub fn decode_instruction(bytes: &[u8], address: u16, behavior: CpuBehavior) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    if !is_legal(opcode, behavior) {
        return None;
    }

    let metadata = &OPCODE_TABLE[opcode as usize];
    let size = metadata.size_bytes as usize;
    if bytes.len() < size {
        return None;
    }

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes: bytes[1..size].to_vec(),
        size_bytes: metadata.size_bytes,
        cycles: metadata.cycles(behavior),
    })
}

/// A one-byte `.byte` directive for data or undecodable opcodes.
pub(crate) fn byte_directive(opcode: u8, address: u16) -> Instruction {
    Instruction {
        address,
        opcode,
        mnemonic: ".byte",
        addressing_mode: AddressingMode::Null,
        operand_bytes: Vec::new(),
        size_bytes: 1,
        cycles: 0,
    }
}
