//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLV, CLD, SED. Each sets or clears one flag and
//! touches nothing else.

use crate::cpu::Cpu;

/// Executes the flag instruction selected by `opcode`.
pub(crate) fn execute_flag(cpu: &mut Cpu, opcode: u8) {
    match opcode {
        0x18 => cpu.flag_c = false, // CLC
        0x38 => cpu.flag_c = true,  // SEC
        0x58 => cpu.flag_i = false, // CLI
        0x78 => cpu.flag_i = true,  // SEI
        0xB8 => cpu.flag_v = false, // CLV
        0xD8 => cpu.flag_d = false, // CLD
        0xF8 => cpu.flag_d = true,  // SED
        _ => {}
    }
}
