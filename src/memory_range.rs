//! # Address Ranges
//!
//! Every device on the bus owns exactly one [`MemoryRange`], an inclusive
//! `[start, end]` interval of the 16-bit address space. Ranges are created once
//! when a device is built and never change afterwards.

use std::fmt;

/// Errors raised while building a range or registering a device on a bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryRangeError {
    /// `start` is greater than `end`.
    InvalidRange {
        /// Requested first address
        start: u16,
        /// Requested last address
        end: u16,
    },

    /// A `(base, size)` pair is empty or runs past `0xFFFF`.
    InvalidSize {
        /// Requested base address
        base: u16,
        /// Requested size in bytes
        size: usize,
    },

    /// The new device's range intersects a device already on the bus.
    Overlap {
        /// Range of the device being added
        new: MemoryRange,
        /// Range of the device already registered
        existing: MemoryRange,
    },

    /// The new device's range is not contained in the bus window.
    OutsideBus {
        /// Range of the device being added
        range: MemoryRange,
        /// The bus window
        bus: MemoryRange,
    },
}

impl fmt::Display for MemoryRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryRangeError::InvalidRange { start, end } => write!(
                f,
                "Invalid address range: start 0x{:04X} is after end 0x{:04X}",
                start, end
            ),
            MemoryRangeError::InvalidSize { base, size } => write!(
                f,
                "Invalid device size: {} bytes at 0x{:04X} does not fit the 16-bit address space",
                size, base
            ),
            MemoryRangeError::Overlap { new, existing } => write!(
                f,
                "Device address range overlap: new device at {} overlaps with existing device at {}",
                new, existing
            ),
            MemoryRangeError::OutsideBus { range, bus } => {
                write!(f, "Device at {} lies outside bus window {}", range, bus)
            }
        }
    }
}

impl std::error::Error for MemoryRangeError {}

/// Inclusive address interval `[start, end]`.
///
/// Ranges are ordered by start address first (then end address), which is the
/// order the [`Bus`](crate::Bus) keeps its devices in.
///
/// # Examples
///
/// ```
/// use sim6502::MemoryRange;
///
/// let ram = MemoryRange::new(0x0000, 0x7FFF).unwrap();
/// let io = MemoryRange::with_size(0x8000, 4).unwrap();
///
/// assert!(ram.includes(0x1234));
/// assert!(!ram.overlaps(&io));
/// assert_eq!(io.end(), 0x8003);
/// assert!(ram < io);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryRange {
    start: u16,
    end: u16,
}

impl MemoryRange {
    /// The whole 64 KiB address space.
    pub const FULL: MemoryRange = MemoryRange {
        start: 0x0000,
        end: 0xFFFF,
    };

    /// Creates the inclusive range `[start, end]`.
    ///
    /// Fails with [`MemoryRangeError::InvalidRange`] if `start > end`.
    pub fn new(start: u16, end: u16) -> Result<Self, MemoryRangeError> {
        if start > end {
            return Err(MemoryRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the range covering `size` bytes starting at `base`.
    ///
    /// Fails with [`MemoryRangeError::InvalidSize`] if `size` is zero or the
    /// last byte would land past `0xFFFF`.
    pub fn with_size(base: u16, size: usize) -> Result<Self, MemoryRangeError> {
        let last = (base as usize).checked_add(size).and_then(|n| n.checked_sub(1));
        match last {
            Some(end) if size > 0 && end <= 0xFFFF => Ok(Self {
                start: base,
                end: end as u16,
            }),
            _ => Err(MemoryRangeError::InvalidSize { base, size }),
        }
    }

    /// First address in the range.
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Last address in the range (inclusive).
    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of addresses covered.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always false: a range covers at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `address` lies inside the range.
    pub fn includes(&self, address: u16) -> bool {
        address >= self.start && address <= self.end
    }

    /// Returns true if the two ranges share at least one address.
    pub fn overlaps(&self, other: &MemoryRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns true if `other` lies completely inside `self`.
    pub fn contains(&self, other: &MemoryRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${:04X}-${:04X}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_reversed_bounds() {
        assert_eq!(
            MemoryRange::new(0x2000, 0x1000),
            Err(MemoryRangeError::InvalidRange {
                start: 0x2000,
                end: 0x1000
            })
        );
        assert!(MemoryRange::new(0x1000, 0x1000).is_ok());
    }

    #[test]
    fn test_with_size_bounds() {
        let range = MemoryRange::with_size(0xC000, 0x4000).unwrap();
        assert_eq!(range.start(), 0xC000);
        assert_eq!(range.end(), 0xFFFF);
        assert_eq!(range.len(), 0x4000);

        assert!(MemoryRange::with_size(0xC000, 0x4001).is_err());
        assert!(MemoryRange::with_size(0x1000, 0).is_err());
        assert_eq!(MemoryRange::with_size(0x0000, 0x10000).unwrap(), MemoryRange::FULL);
    }

    #[test]
    fn test_overlap_and_containment() {
        let a = MemoryRange::new(0x1000, 0x10FF).unwrap();
        let b = MemoryRange::new(0x10FF, 0x11FF).unwrap();
        let c = MemoryRange::new(0x1100, 0x11FF).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(MemoryRange::FULL.contains(&a));
        assert!(!a.contains(&b));
        assert!(a.includes(0x1000) && a.includes(0x10FF));
        assert!(!a.includes(0x1100));
    }

    #[test]
    fn test_ordering_by_start() {
        let mut ranges = vec![
            MemoryRange::new(0x8000, 0x8003).unwrap(),
            MemoryRange::new(0x0000, 0x7FFF).unwrap(),
            MemoryRange::new(0xC000, 0xFFFF).unwrap(),
        ];
        ranges.sort();
        let starts: Vec<u16> = ranges.iter().map(|r| r.start()).collect();
        assert_eq!(starts, vec![0x0000, 0x8000, 0xC000]);
    }
}
