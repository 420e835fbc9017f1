//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register and update N and Z
//! - STA, STX, STY: store a register, no flags
//! - STZ: store zero (65C02), no flags

use crate::addressing::AddressingMode;
use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the LDA (Load Accumulator) instruction.
pub(crate) fn execute_lda<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.a = cpu.get_operand_value(bus, mode)?;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.get_operand_value(bus, mode)?;
    cpu.set_nz(cpu.x);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.y = cpu.get_operand_value(bus, mode)?;
    cpu.set_nz(cpu.y);
    Ok(())
}

fn store<B: MemoryBus>(
    cpu: &Cpu,
    bus: &mut B,
    mode: AddressingMode,
    value: u8,
) -> Result<(), MemoryAccessError> {
    let addr = cpu.get_effective_address(bus, mode)?;
    bus.write(addr, value)
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    store(cpu, bus, mode, cpu.a)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    store(cpu, bus, mode, cpu.x)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    store(cpu, bus, mode, cpu.y)
}

/// Executes the STZ (Store Zero) instruction.
pub(crate) fn execute_stz<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    store(cpu, bus, mode, 0x00)
}
