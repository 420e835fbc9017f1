//! RAM and ROM device implementation.

use super::{Device, MemoryAccessError};
use crate::memory_range::{MemoryRange, MemoryRangeError};
use std::any::Any;

/// Default fill byte for fresh memory. `0x00` is the BRK opcode, so running
/// into uninitialized memory traps predictably.
pub const DEFAULT_FILL: u8 = 0x00;

/// Flat byte-array memory device, either writable (RAM) or read-only (ROM).
///
/// CPU writes to a read-only device fail with
/// [`MemoryAccessError::ReadOnly`]. ROM images are installed with
/// [`load`](Memory::load), which bypasses the protection.
///
/// # Examples
///
/// ```rust
/// use sim6502::{Device, Memory};
///
/// let mut ram = Memory::ram(0x0200, 1024).unwrap();
/// ram.write(0x42, 0xAA).unwrap();
/// assert_eq!(ram.read(0x42).unwrap(), 0xAA);
///
/// let mut rom = Memory::rom(0xC000, 0x4000).unwrap();
/// rom.load(0x3FFC, &[0x00, 0xC0]).unwrap(); // reset vector
/// assert_eq!(rom.read(0x3FFD).unwrap(), 0xC0);
/// assert!(rom.write(0x0000, 0xFF).is_err());
/// ```
pub struct Memory {
    range: MemoryRange,
    name: String,
    read_only: bool,
    data: Vec<u8>,
}

impl Memory {
    /// Creates a memory device covering `size` bytes from `base`, every byte
    /// set to `fill`.
    ///
    /// Fails if `size` is zero or the device would run past `0xFFFF`.
    pub fn new(base: u16, size: usize, read_only: bool, fill: u8) -> Result<Self, MemoryRangeError> {
        let range = MemoryRange::with_size(base, size)?;
        let name = if read_only { "ROM" } else { "RAM" };
        Ok(Self {
            range,
            name: name.to_string(),
            read_only,
            data: vec![fill; size],
        })
    }

    /// Writable memory filled with [`DEFAULT_FILL`].
    pub fn ram(base: u16, size: usize) -> Result<Self, MemoryRangeError> {
        Self::new(base, size, false, DEFAULT_FILL)
    }

    /// Read-only memory filled with [`DEFAULT_FILL`].
    pub fn rom(base: u16, size: usize) -> Result<Self, MemoryRangeError> {
        Self::new(base, size, true, DEFAULT_FILL)
    }

    /// Replaces the device name shown in logs and errors.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Returns true if CPU writes are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Copies `bytes` into the device starting at `offset`, ignoring the
    /// read-only flag.
    ///
    /// Fails with [`MemoryAccessError::InvalidRegister`] naming the first
    /// offset that falls outside the device.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) -> Result<(), MemoryAccessError> {
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(MemoryAccessError::InvalidRegister {
                device: self.name.clone(),
                offset: self.data.len().max(start) as u16,
            });
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Sets every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Raw contents, for snapshots and debugger views.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    fn check_offset(&self, offset: u16) -> Result<usize, MemoryAccessError> {
        let index = offset as usize;
        if index < self.data.len() {
            Ok(index)
        } else {
            Err(MemoryAccessError::InvalidRegister {
                device: self.name.clone(),
                offset,
            })
        }
    }
}

impl Device for Memory {
    fn range(&self) -> MemoryRange {
        self.range
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self, offset: u16) -> Result<u8, MemoryAccessError> {
        self.peek(offset)
    }

    fn peek(&self, offset: u16) -> Result<u8, MemoryAccessError> {
        let index = self.check_offset(offset)?;
        Ok(self.data[index])
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryAccessError> {
        let index = self.check_offset(offset)?;
        if self.read_only {
            return Err(MemoryAccessError::ReadOnly {
                device: self.name.clone(),
                offset,
            });
        }
        self.data[index] = value;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
