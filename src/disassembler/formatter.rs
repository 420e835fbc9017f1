//! Formatting functions for disassembled instructions

use crate::addressing::{address, rel_address, AddressingMode};
use crate::disassembler::Instruction;

/// Format a single instruction as assembly text
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr
        .operand_bytes
        .first()
        .map(|b| format!("${:02X}", b))
        .unwrap_or_else(|| "$??".to_string());
    let word = match instr.operand_bytes[..] {
        [lo, hi, ..] => format!("${:04X}", address(lo, hi)),
        _ => "$????".to_string(),
    };
    let next = instr.address.wrapping_add(instr.size_bytes as u16);

    match instr.addressing_mode {
        Implied | Null => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#{}", byte),
        ZeroPage => byte,
        ZeroPageX => format!("{},X", byte),
        ZeroPageY => format!("{},Y", byte),
        ZeroPageIndirect => format!("({})", byte),
        IndexedIndirectX => format!("({},X)", byte),
        IndirectIndexedY => format!("({}),Y", byte),
        Absolute => word,
        AbsoluteX => format!("{},X", word),
        AbsoluteY => format!("{},Y", word),
        AbsoluteIndirect => format!("({})", word),
        AbsoluteXIndirect => format!("({},X)", word),
        Relative => match instr.operand_bytes.first() {
            Some(&offset) => format!("${:04X}", rel_address(next, offset)),
            None => "$????".to_string(),
        },
        ZeroPageRelative => match instr.operand_bytes[..] {
            [zp, offset, ..] => format!("${:02X},${:04X}", zp, rel_address(next, offset)),
            _ => "$??,$????".to_string(),
        },
    }
}
