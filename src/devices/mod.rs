//! Memory-mapped device support.
//!
//! Every piece of hardware attached to the [`Bus`](crate::Bus) implements the
//! [`Device`] trait. A device owns one fixed [`MemoryRange`] and is addressed
//! by offset (`address - range.start()`), so it never needs to know where it
//! is mapped.
//!
//! # Devices
//!
//! - [`Memory`]: RAM or ROM backed by a flat byte vector
//! - [`Acia`]: serial adapter in 6551 or 6850 register layout
//!
//! # Example
//!
//! ```rust
//! use sim6502::{Acia, AciaModel, Bus, Memory, MemoryBus};
//!
//! let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
//! bus.add_device(Box::new(Memory::ram(0x0000, 0x8000).unwrap())).unwrap();
//! bus.add_device(Box::new(Acia::new(0x8800, AciaModel::Mos6551).unwrap())).unwrap();
//! bus.add_device(Box::new(Memory::rom(0xC000, 0x4000).unwrap())).unwrap();
//!
//! bus.write(0x1234, 0x42).unwrap();
//! assert_eq!(bus.read(0x1234).unwrap(), 0x42);
//! assert!(bus.write(0xC000, 0x00).is_err()); // ROM
//! assert!(bus.read(0x9000).is_err()); // nothing mapped
//! ```

use crate::memory_range::MemoryRange;
use std::any::Any;
use std::fmt;

pub mod acia;
pub mod fifo;
pub mod memory;

pub use acia::{Acia, AciaModel};
pub use fifo::{Fifo, FifoUnderrun};
pub use memory::Memory;

/// Runtime fault raised by a bus or device access.
///
/// These propagate out of [`Bus::read`](crate::Bus::read),
/// [`Bus::write`](crate::Bus::write) and [`Cpu::step`](crate::Cpu::step)
/// unchanged; nothing in the core substitutes a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryAccessError {
    /// No device owns the address.
    Unmapped {
        /// Absolute bus address
        address: u16,
    },

    /// The owning device is read-only.
    ReadOnly {
        /// Name of the device
        device: String,
        /// Offset within the device
        offset: u16,
    },

    /// The offset does not name a register of the device.
    InvalidRegister {
        /// Name of the device
        device: String,
        /// Offset within the device
        offset: u16,
    },
}

impl fmt::Display for MemoryAccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryAccessError::Unmapped { address } => {
                write!(f, "Bus access to unmapped address 0x{:04X}", address)
            }
            MemoryAccessError::ReadOnly { device, offset } => write!(
                f,
                "Write to read-only device {} at offset 0x{:04X}",
                device, offset
            ),
            MemoryAccessError::InvalidRegister { device, offset } => {
                write!(f, "Device {} has no register at offset {}", device, offset)
            }
        }
    }
}

impl std::error::Error for MemoryAccessError {}

/// Interface for memory-mapped hardware.
///
/// The bus calls these methods with offsets relative to the device's range
/// start. Two read paths exist on purpose:
///
/// - [`read`](Device::read) is a CPU bus cycle and may have side effects
///   (popping a FIFO, acknowledging an interrupt);
/// - [`peek`](Device::peek) is a debugger/monitor window onto the same
///   register and must leave the device untouched.
///
/// # Examples
///
/// ```rust
/// use sim6502::{Device, MemoryAccessError, MemoryRange};
/// use std::any::Any;
///
/// struct Latch {
///     range: MemoryRange,
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn range(&self) -> MemoryRange {
///         self.range
///     }
///
///     fn name(&self) -> &str {
///         "Latch"
///     }
///
///     fn read(&mut self, offset: u16) -> Result<u8, MemoryAccessError> {
///         self.peek(offset)
///     }
///
///     fn peek(&self, _offset: u16) -> Result<u8, MemoryAccessError> {
///         Ok(self.value)
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) -> Result<(), MemoryAccessError> {
///         self.value = value;
///         Ok(())
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Device {
    /// Address range the device answers on. Fixed for the device's lifetime.
    fn range(&self) -> MemoryRange;

    /// Human-readable device name, used in errors and logs.
    fn name(&self) -> &str;

    /// CPU read of the byte at `offset`.
    fn read(&mut self, offset: u16) -> Result<u8, MemoryAccessError>;

    /// Side-effect-free read of the byte at `offset`.
    fn peek(&self, offset: u16) -> Result<u8, MemoryAccessError>;

    /// CPU write of `value` at `offset`.
    fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryAccessError>;

    /// Returns true while the device holds the shared IRQ line low.
    ///
    /// The line is level-sensitive: the bus ORs every device's answer and
    /// the CPU samples the result before each instruction.
    fn irq_pending(&self) -> bool {
        false
    }

    /// Returns the device to its power-on state. Memory contents survive.
    fn reset(&mut self) {}

    /// Upcast for typed access through [`Bus::device`](crate::Bus::device).
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access through
    /// [`Bus::device_mut`](crate::Bus::device_mut).
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
