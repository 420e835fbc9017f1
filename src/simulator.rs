//! # Simulator
//!
//! A ready-made machine: one [`Cpu`] and one [`Bus`] populated from a
//! [`MachineConfig`] with RAM, an [`Acia`] and a ROM.
//!
//! The default map matches the classic single-board layout:
//!
//! | Range           | Device          |
//! |-----------------|-----------------|
//! | `$0000-$7FFF`   | RAM (32 KB)     |
//! | `$A000-$A003`   | ACIA 6551       |
//! | `$C000-$FFFF`   | ROM (16 KB)     |
//!
//! # Example
//!
//! ```
//! use sim6502::{MachineConfig, Simulator};
//! use std::sync::atomic::AtomicBool;
//!
//! let mut sim = Simulator::new(MachineConfig::default()).unwrap();
//!
//! // LDA #'A'; STA $A000; loop: JMP loop
//! sim.load_program(0x0200, &[0xA9, 0x41, 0x8D, 0x00, 0xA0, 0x4C, 0x05, 0x02])
//!     .unwrap();
//!
//! let stop = AtomicBool::new(false);
//! sim.run(10, &stop).unwrap();
//! assert_eq!(sim.drain_output().unwrap(), b"A");
//! ```

use crate::bus::Bus;
use crate::cpu::{Cpu, CpuBehavior};
use crate::devices::acia::DEFAULT_FIFO_CAPACITY;
use crate::devices::{Acia, AciaModel, Memory, MemoryAccessError};
use crate::memory_range::MemoryRangeError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Memory map and CPU variant of a [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    pub behavior: CpuBehavior,
    pub ram_base: u16,
    pub ram_size: usize,
    pub rom_base: u16,
    pub rom_size: usize,
    pub acia_base: u16,
    pub acia_model: AciaModel,
    /// Capacity of each ACIA FIFO in bytes
    pub fifo_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            behavior: CpuBehavior::default(),
            ram_base: 0x0000,
            ram_size: 0x8000,
            rom_base: 0xC000,
            rom_size: 0x4000,
            acia_base: 0xA000,
            acia_model: AciaModel::Mos6551,
            fifo_capacity: DEFAULT_FIFO_CAPACITY,
        }
    }
}

/// Errors raised by the [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatorError {
    /// The configured memory map is invalid.
    Range(MemoryRangeError),

    /// A bus access faulted.
    Access(MemoryAccessError),

    /// A configured device is no longer on the bus.
    MissingDevice {
        /// Device kind
        device: &'static str,
        /// Base address it was configured at
        base: u16,
    },
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulatorError::Range(e) => write!(f, "Invalid memory map: {}", e),
            SimulatorError::Access(e) => write!(f, "{}", e),
            SimulatorError::MissingDevice { device, base } => {
                write!(f, "No {} at ${:04X}", device, base)
            }
        }
    }
}

impl std::error::Error for SimulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulatorError::Range(e) => Some(e),
            SimulatorError::Access(e) => Some(e),
            SimulatorError::MissingDevice { .. } => None,
        }
    }
}

impl From<MemoryRangeError> for SimulatorError {
    fn from(e: MemoryRangeError) -> Self {
        SimulatorError::Range(e)
    }
}

impl From<MemoryAccessError> for SimulatorError {
    fn from(e: MemoryAccessError) -> Self {
        SimulatorError::Access(e)
    }
}

/// A CPU wired to a populated bus.
pub struct Simulator {
    cpu: Cpu,
    bus: Bus,
    config: MachineConfig,
}

impl Simulator {
    /// Builds the machine described by `config`.
    ///
    /// The CPU is left in its power-on state; call [`reset`](Simulator::reset)
    /// after installing a ROM with a reset vector, or
    /// [`load_program`](Simulator::load_program) to start at a fixed address.
    pub fn new(config: MachineConfig) -> Result<Self, SimulatorError> {
        let mut bus = Bus::new(0x0000, 0xFFFF)?;
        bus.add_device(Box::new(Memory::ram(config.ram_base, config.ram_size)?))?;
        bus.add_device(Box::new(Acia::with_capacity(
            config.acia_base,
            config.acia_model,
            config.fifo_capacity,
        )?))?;
        bus.add_device(Box::new(Memory::rom(config.rom_base, config.rom_size)?))?;

        log::info!(
            "Simulator ready: {:?}, RAM ${:04X}+{:#X}, {:?} at ${:04X}, ROM ${:04X}+{:#X}",
            config.behavior,
            config.ram_base,
            config.ram_size,
            config.acia_model,
            config.acia_base,
            config.rom_base,
            config.rom_size
        );

        Ok(Self {
            cpu: Cpu::new(config.behavior),
            bus,
            config,
        })
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Installs a ROM image so that it ends at the top of the ROM.
    ///
    /// A full-size image fills the ROM; a shorter one keeps its last bytes
    /// (the vectors, for a ROM at `$C000-$FFFF`) at the end.
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), SimulatorError> {
        let base = self.config.rom_base;
        let offset = self.config.rom_size.saturating_sub(image.len()) as u16;
        let rom = self
            .bus
            .device_mut::<Memory>(base)
            .ok_or(SimulatorError::MissingDevice { device: "ROM", base })?;
        rom.load(offset, image)?;
        log::info!("Loaded {} byte ROM image at ${:04X}", image.len(), base.wrapping_add(offset));
        Ok(())
    }

    /// Writes `program` at `addr` through the bus and points PC at it.
    pub fn load_program(&mut self, addr: u16, program: &[u8]) -> Result<(), SimulatorError> {
        self.bus.load(addr, program)?;
        self.cpu.set_pc(addr);
        log::info!("Loaded {} byte program at ${:04X}", program.len(), addr);
        Ok(())
    }

    /// Resets every device, then the CPU (PC from the reset vector).
    pub fn reset(&mut self) -> Result<(), SimulatorError> {
        self.bus.reset();
        self.cpu.reset(&mut self.bus)?;
        Ok(())
    }

    /// Executes one CPU step.
    pub fn step(&mut self) -> Result<(), SimulatorError> {
        self.cpu.step(&mut self.bus)?;
        if self.cpu.op_trap() {
            log::warn!(
                "Op-trap: opcode ${:02X} at ${:04X} does not decode on {:?}",
                self.cpu.ir(),
                self.cpu.instruction_address(),
                self.cpu.behavior()
            );
        }
        Ok(())
    }

    /// Steps until `max_steps` have run or `stop` is set.
    ///
    /// `stop` is checked before every step, so another thread (or a signal
    /// handler) can end the run between instructions. Returns the number of
    /// steps executed.
    pub fn run(&mut self, max_steps: usize, stop: &AtomicBool) -> Result<usize, SimulatorError> {
        let mut steps = 0;
        while steps < max_steps {
            if stop.load(Ordering::Relaxed) {
                log::info!("Run stopped after {} steps at ${:04X}", steps, self.cpu.pc());
                break;
            }
            self.step()?;
            steps += 1;
        }
        Ok(steps)
    }

    pub fn acia(&self) -> Result<&Acia, SimulatorError> {
        let base = self.config.acia_base;
        self.bus
            .device::<Acia>(base)
            .ok_or(SimulatorError::MissingDevice { device: "ACIA", base })
    }

    pub fn acia_mut(&mut self) -> Result<&mut Acia, SimulatorError> {
        let base = self.config.acia_base;
        self.bus
            .device_mut::<Acia>(base)
            .ok_or(SimulatorError::MissingDevice { device: "ACIA", base })
    }

    /// Delivers one byte from the host to the ACIA receiver.
    pub fn receive(&mut self, byte: u8) -> Result<(), SimulatorError> {
        self.acia_mut()?.rx_write(byte);
        Ok(())
    }

    /// Takes every byte the program has transmitted so far.
    pub fn drain_output(&mut self) -> Result<Vec<u8>, SimulatorError> {
        Ok(self.acia_mut()?.drain_tx())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MemoryBus;

    #[test]
    fn test_default_map_is_valid() {
        let sim = Simulator::new(MachineConfig::default()).unwrap();
        let starts: Vec<u16> = sim.bus().devices().map(|d| d.range().start()).collect();
        assert_eq!(starts, vec![0x0000, 0xA000, 0xC000]);
        assert_eq!(sim.cpu().behavior(), CpuBehavior::NmosWithIndirectJmpBug);
        assert!(!sim.bus().is_complete());
    }

    #[test]
    fn test_overlapping_map_rejected() {
        let config = MachineConfig {
            acia_base: 0x7FFE,
            ..MachineConfig::default()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(SimulatorError::Range(MemoryRangeError::Overlap { .. }))
        ));
    }

    #[test]
    fn test_rom_reset_vector() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        sim.load_rom(&[0x00, 0x00, 0x00, 0xC0, 0x00, 0x00]).unwrap();
        sim.reset().unwrap();
        assert_eq!(sim.cpu().pc(), 0xC000);
        assert_eq!(sim.bus().peek(0xFFFD).unwrap(), 0xC0);
    }

    #[test]
    fn test_oversized_rom_rejected() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        let image = vec![0xEA; 0x4001];
        assert!(matches!(
            sim.load_rom(&image),
            Err(SimulatorError::Access(_))
        ));
    }

    #[test]
    fn test_echo_program() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        // loop: LDA $A001; AND #$08; BEQ loop; LDA $A000; STA $A000; JMP loop
        sim.load_program(
            0x0200,
            &[
                0xAD, 0x01, 0xA0, 0x29, 0x08, 0xF0, 0xF9, 0xAD, 0x00, 0xA0, 0x8D, 0x00, 0xA0,
                0x4C, 0x00, 0x02,
            ],
        )
        .unwrap();

        sim.receive(b'h').unwrap();
        sim.receive(b'i').unwrap();
        let stop = AtomicBool::new(false);
        assert_eq!(sim.run(40, &stop).unwrap(), 40);
        assert_eq!(sim.drain_output().unwrap(), b"hi");
    }

    #[test]
    fn test_run_honours_stop_flag() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        sim.load_program(0x0200, &[0xEA, 0xEA]).unwrap();
        let stop = AtomicBool::new(true);
        assert_eq!(sim.run(100, &stop).unwrap(), 0);
        assert_eq!(sim.cpu().pc(), 0x0200);
    }

    #[test]
    fn test_fault_propagates() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        sim.load_program(0x0200, &[0xAD, 0x00, 0x90]).unwrap(); // LDA $9000
        assert_eq!(
            sim.step(),
            Err(SimulatorError::Access(MemoryAccessError::Unmapped { address: 0x9000 }))
        );
    }

    #[test]
    fn test_missing_acia() {
        let mut sim = Simulator::new(MachineConfig::default()).unwrap();
        sim.bus_mut().remove_device(0xA000);
        assert_eq!(
            sim.receive(0x41),
            Err(SimulatorError::MissingDevice {
                device: "ACIA",
                base: 0xA000
            })
        );
    }
}
