//! # Memory Bus
//!
//! The [`MemoryBus`] trait decouples the CPU from whatever it is wired to. The
//! CPU never owns memory: every [`Cpu`](crate::Cpu) method that touches memory
//! borrows a `MemoryBus` for the duration of the call.
//!
//! [`Bus`] is the standard implementation. It owns a set of non-overlapping
//! [`Device`]s inside a `[start, end]` window and routes each access to the one
//! device whose range includes the address.
//!
//! ## Access semantics
//!
//! Unlike real silicon, a bus fault is reported instead of floating:
//!
//! - Reads or writes to an address no device owns fail with
//!   [`MemoryAccessError::Unmapped`]
//! - Writes to ROM fail with [`MemoryAccessError::ReadOnly`]
//! - Faults propagate out of [`Cpu::step`](crate::Cpu::step) unchanged
//!
//! ## Interrupt lines
//!
//! The bus carries the IRQ and NMI lines. IRQ is level-sensitive and shared:
//! it is active while the driver holds it ([`Bus::assert_irq`]) or any device
//! reports [`Device::irq_pending`]. NMI is edge-triggered: [`Bus::assert_nmi`]
//! latches one request that the CPU consumes with [`MemoryBus::take_nmi`].

use crate::cpu::Cpu;
use crate::devices::{Device, MemoryAccessError};
use crate::memory_range::{MemoryRange, MemoryRangeError};

/// Byte-level access the CPU needs from its environment.
///
/// # Examples
///
/// A 64 KiB flat memory for tests:
///
/// ```
/// use sim6502::{MemoryAccessError, MemoryBus};
///
/// struct Flat([u8; 0x10000]);
///
/// impl MemoryBus for Flat {
///     fn read(&mut self, addr: u16) -> Result<u8, MemoryAccessError> {
///         self.peek(addr)
///     }
///
///     fn peek(&self, addr: u16) -> Result<u8, MemoryAccessError> {
///         Ok(self.0[addr as usize])
///     }
///
///     fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessError> {
///         self.0[addr as usize] = value;
///         Ok(())
///     }
/// }
///
/// let mut mem = Flat([0; 0x10000]);
/// mem.write(0x1234, 0x42).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0x42);
/// assert!(!mem.irq_active());
/// ```
pub trait MemoryBus {
    /// CPU read cycle. May have device side effects.
    fn read(&mut self, addr: u16) -> Result<u8, MemoryAccessError>;

    /// Side-effect-free read for debuggers, disassemblers and monitors.
    fn peek(&self, addr: u16) -> Result<u8, MemoryAccessError>;

    /// CPU write cycle.
    fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessError>;

    /// Returns true while the IRQ line is held active.
    ///
    /// Sampled by the CPU before every instruction; the CPU only services it
    /// when the I flag is clear.
    fn irq_active(&self) -> bool {
        false
    }

    /// Consumes a latched NMI edge, returning true if one was pending.
    fn take_nmi(&mut self) -> bool {
        false
    }
}

/// Address decoder owning every device on the machine.
///
/// Devices are kept sorted by start address, so lookup is a binary search.
///
/// # Examples
///
/// ```
/// use sim6502::{Bus, Memory, MemoryBus, MemoryRangeError};
///
/// let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
/// bus.add_device(Box::new(Memory::ram(0x0000, 0x8000).unwrap())).unwrap();
///
/// // Overlapping registration is refused
/// let err = bus
///     .add_device(Box::new(Memory::ram(0x7000, 0x2000).unwrap()))
///     .unwrap_err();
/// assert!(matches!(err, MemoryRangeError::Overlap { .. }));
///
/// bus.write(0x0200, 0xA9).unwrap();
/// assert_eq!(bus.read(0x0200).unwrap(), 0xA9);
/// assert!(!bus.is_complete());
/// ```
pub struct Bus {
    range: MemoryRange,
    devices: Vec<Box<dyn Device>>,
    irq_asserted: bool,
    nmi_pending: bool,
}

impl Bus {
    /// Creates an empty bus spanning `[start, end]`.
    pub fn new(start: u16, end: u16) -> Result<Self, MemoryRangeError> {
        Ok(Self {
            range: MemoryRange::new(start, end)?,
            devices: Vec::new(),
            irq_asserted: false,
            nmi_pending: false,
        })
    }

    /// The bus window.
    pub fn range(&self) -> MemoryRange {
        self.range
    }

    /// Registers a device.
    ///
    /// # Errors
    ///
    /// * [`MemoryRangeError::OutsideBus`] if the device does not fit the window
    /// * [`MemoryRangeError::Overlap`] if it intersects a registered device
    pub fn add_device(&mut self, device: Box<dyn Device>) -> Result<(), MemoryRangeError> {
        let range = device.range();
        if !self.range.contains(&range) {
            log::warn!("{} at {} rejected: outside bus {}", device.name(), range, self.range);
            return Err(MemoryRangeError::OutsideBus {
                range,
                bus: self.range,
            });
        }

        // Sorted and disjoint: only the neighbours of the insertion point can
        // intersect the new range.
        let pos = self
            .devices
            .partition_point(|d| d.range().start() < range.start());
        let before = pos.checked_sub(1).map(|i| &self.devices[i]);
        let after = self.devices.get(pos);
        for existing in before.into_iter().chain(after) {
            if existing.range().overlaps(&range) {
                log::warn!(
                    "{} at {} rejected: overlaps {} at {}",
                    device.name(),
                    range,
                    existing.name(),
                    existing.range()
                );
                return Err(MemoryRangeError::Overlap {
                    new: range,
                    existing: existing.range(),
                });
            }
        }

        log::debug!("Registered {} at {}", device.name(), range);
        self.devices.insert(pos, device);
        Ok(())
    }

    /// Detaches and returns the device whose range starts at `start`.
    pub fn remove_device(&mut self, start: u16) -> Option<Box<dyn Device>> {
        let index = self.index_of_start(start)?;
        let device = self.devices.remove(index);
        log::debug!("Removed {} at {}", device.name(), device.range());
        Some(device)
    }

    /// Typed access to the device starting at `start`.
    ///
    /// Returns `None` if nothing starts there or the device is not a `T`.
    pub fn device<T: Device + 'static>(&self, start: u16) -> Option<&T> {
        let index = self.index_of_start(start)?;
        self.devices[index].as_any().downcast_ref::<T>()
    }

    /// Mutable typed access to the device starting at `start`.
    pub fn device_mut<T: Device + 'static>(&mut self, start: u16) -> Option<&mut T> {
        let index = self.index_of_start(start)?;
        self.devices[index].as_any_mut().downcast_mut::<T>()
    }

    /// Registered devices in address order.
    pub fn devices(&self) -> impl Iterator<Item = &dyn Device> {
        self.devices.iter().map(|d| d.as_ref())
    }

    /// Returns true if the devices tile the window exactly: the first starts at
    /// the window start, each next one starts right after the previous one
    /// ends, and the last ends at the window end.
    pub fn is_complete(&self) -> bool {
        let (first, last) = match (self.devices.first(), self.devices.last()) {
            (Some(first), Some(last)) => (first.range(), last.range()),
            _ => return false,
        };
        if first.start() != self.range.start() || last.end() != self.range.end() {
            return false;
        }
        self.devices.windows(2).all(|pair| {
            let prev = pair[0].range();
            let next = pair[1].range();
            prev.end().checked_add(1) == Some(next.start())
        })
    }

    /// Writes `bytes` through the bus starting at `addr`, wrapping at `0xFFFF`.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) -> Result<(), MemoryAccessError> {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write(addr.wrapping_add(i as u16), byte)?;
        }
        Ok(())
    }

    /// Writes `bytes` starting at the CPU's program counter.
    pub fn load_program(&mut self, cpu: &Cpu, bytes: &[u8]) -> Result<(), MemoryAccessError> {
        self.load(cpu.pc(), bytes)
    }

    /// Resets every device and drops both interrupt lines.
    pub fn reset(&mut self) {
        for device in &mut self.devices {
            device.reset();
        }
        self.irq_asserted = false;
        self.nmi_pending = false;
        log::debug!("Bus {} reset", self.range);
    }

    /// Holds the IRQ line active until [`clear_irq`](Bus::clear_irq).
    pub fn assert_irq(&mut self) {
        self.irq_asserted = true;
    }

    pub fn clear_irq(&mut self) {
        self.irq_asserted = false;
    }

    /// Latches one NMI edge.
    pub fn assert_nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn index_of_start(&self, start: u16) -> Option<usize> {
        self.devices
            .binary_search_by_key(&start, |d| d.range().start())
            .ok()
    }

    fn find(&self, addr: u16) -> Result<usize, MemoryAccessError> {
        let pos = self.devices.partition_point(|d| d.range().start() <= addr);
        match pos.checked_sub(1) {
            Some(index) if self.devices[index].range().includes(addr) => Ok(index),
            _ => Err(MemoryAccessError::Unmapped { address: addr }),
        }
    }
}

impl MemoryBus for Bus {
    fn read(&mut self, addr: u16) -> Result<u8, MemoryAccessError> {
        let index = self.find(addr)?;
        let device = &mut self.devices[index];
        let offset = addr - device.range().start();
        device.read(offset)
    }

    fn peek(&self, addr: u16) -> Result<u8, MemoryAccessError> {
        let index = self.find(addr)?;
        let device = &self.devices[index];
        device.peek(addr - device.range().start())
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), MemoryAccessError> {
        let index = self.find(addr)?;
        let device = &mut self.devices[index];
        let offset = addr - device.range().start();
        device.write(offset, value)
    }

    fn irq_active(&self) -> bool {
        self.irq_asserted || self.devices.iter().any(|d| d.irq_pending())
    }

    fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }
}
