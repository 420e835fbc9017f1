//! # Increment and Decrement Instructions
//!
//! - INC, DEC: memory, or the accumulator on the 65C02 (`INC A`, `DEC A`)
//! - INX, INY, DEX, DEY: index registers
//!
//! All wrap at 8 bits and update N and Z; carry is never touched.

use crate::addressing::AddressingMode;
use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the INC (Increment) instruction.
pub(crate) fn execute_inc<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        let result = value.wrapping_add(1);
        cpu.set_nz(result);
        result
    })
}

/// Executes the DEC (Decrement) instruction.
pub(crate) fn execute_dec<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        let result = value.wrapping_sub(1);
        cpu.set_nz(result);
        result
    })
}

pub(crate) fn execute_inx(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_nz(cpu.x);
    Ok(())
}

pub(crate) fn execute_iny(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_nz(cpu.y);
    Ok(())
}

pub(crate) fn execute_dex(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_nz(cpu.x);
    Ok(())
}

pub(crate) fn execute_dey(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_nz(cpu.y);
    Ok(())
}
