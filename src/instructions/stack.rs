//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA, PLA: Accumulator
//! - PHP, PLP: Processor status
//! - PHX, PLX, PHY, PLY: Index registers (65C02)
//!
//! The stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! A push writes to 0x0100 | SP then decrements SP; a pull increments SP then
//! reads. SP wraps in both directions.

use crate::bus::MemoryBus;
use crate::cpu::{Cpu, FLAG_B};
use crate::devices::MemoryAccessError;

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.push(bus, cpu.a)
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has B set.
pub(crate) fn execute_php<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.push(bus, cpu.status() | FLAG_B)
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.a = cpu.pop(bus)?;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    let status = cpu.pop(bus)?;
    cpu.set_status(status);
    Ok(())
}

pub(crate) fn execute_phx<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.push(bus, cpu.x)
}

pub(crate) fn execute_phy<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.push(bus, cpu.y)
}

pub(crate) fn execute_plx<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.pop(bus)?;
    cpu.set_nz(cpu.x);
    Ok(())
}

pub(crate) fn execute_ply<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.y = cpu.pop(bus)?;
    cpu.set_nz(cpu.y);
    Ok(())
}
