//! # 6502-Family CPU Simulator
//!
//! An instruction-level simulator of the MOS 6502, its early and late NMOS
//! variants and the CMOS 65C02, running against a memory-mapped device bus
//! with RAM, ROM and an ACIA serial adapter.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};
//!
//! let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
//! bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap())).unwrap();
//!
//! // Reset vector points at the program
//! bus.load(0xFFFC, &[0x00, 0x80]).unwrap();
//! bus.load(0x8000, &[0xA9, 0x49, 0xF8, 0x18, 0x69, 0x01]).unwrap(); // LDA #$49; SED; CLC; ADC #$01
//!
//! let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
//! cpu.reset(&mut bus).unwrap();
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! cpu.step_n(&mut bus, 4).unwrap();
//! assert_eq!(cpu.a(), 0x50);
//! ```
//!
//! ## Architecture
//!
//! - **Cpu and bus are independent**: the [`Cpu`] borrows any [`MemoryBus`]
//!   per call and never stores it
//! - **Devices** implement [`Device`] and are mapped on a [`Bus`] over
//!   non-overlapping [`MemoryRange`]s
//! - **Table-driven decoding**: one [`OPCODE_TABLE`] holds mnemonic, mode,
//!   size and NMOS/CMOS cycle counts for all 256 opcodes
//! - **Faults are values**: bus faults surface as [`MemoryAccessError`];
//!   an opcode that does not decode only raises [`Cpu::op_trap`]
//!
//! ## Modules
//!
//! - `cpu` - CPU state, reset, step and interrupt entry
//! - `bus` - `MemoryBus` trait and the device-mapping `Bus`
//! - `devices` - RAM/ROM and the ACIA
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing modes and address arithmetic
//! - `disassembler` - Instruction decoding and formatting
//! - `simulator` - A CPU and a configured bus in one value
//!
//! The library never installs a logger. Output goes through the `log` facade:
//! `trace` per instruction, `debug` for resets and bus changes, `warn` for
//! dropped bytes and rejected devices.

pub mod addressing;
pub mod bus;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory_range;
pub mod opcodes;
pub mod simulator;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use bus::{Bus, MemoryBus};
pub use cpu::{Cpu, CpuBehavior, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use devices::{Acia, AciaModel, Device, Fifo, FifoUnderrun, Memory, MemoryAccessError};
pub use disassembler::{disassemble, disassemble_op, Instruction};
pub use memory_range::{MemoryRange, MemoryRangeError};
pub use opcodes::{OpcodeMetadata, OPCODE_TABLE};
pub use simulator::{MachineConfig, Simulator, SimulatorError};
