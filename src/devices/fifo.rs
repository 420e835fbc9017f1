//! Bounded FIFO used for serial receive and transmit buffers.

use std::collections::VecDeque;
use std::fmt;

/// Raised when dequeuing from an empty [`Fifo`].
///
/// This is a local, recoverable condition. Callers are expected to check
/// [`Fifo::is_empty`] (or the owning device's "has data" predicate) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoUnderrun;

impl fmt::Display for FifoUnderrun {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FIFO underrun: buffer is empty")
    }
}

impl std::error::Error for FifoUnderrun {}

/// Fixed-capacity first-in first-out byte queue.
///
/// A push onto a full queue is refused and the byte is dropped; the owning
/// device decides what that means (the ACIA reports it as an overrun).
#[derive(Debug, Clone)]
pub struct Fifo {
    buffer: VecDeque<u8>,
    capacity: usize,
}

impl Fifo {
    /// Creates an empty queue holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `value`. Returns false (and drops the byte) if the queue is full.
    pub fn push(&mut self, value: u8) -> bool {
        if self.buffer.len() >= self.capacity {
            return false;
        }
        self.buffer.push_back(value);
        true
    }

    /// Removes and returns the oldest byte.
    pub fn pop(&mut self) -> Result<u8, FifoUnderrun> {
        self.buffer.pop_front().ok_or(FifoUnderrun)
    }

    /// Returns the oldest byte without removing it.
    pub fn peek(&self) -> Result<u8, FifoUnderrun> {
        self.buffer.front().copied().ok_or(FifoUnderrun)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Removes every queued byte, oldest first.
    pub fn drain(&mut self) -> Vec<u8> {
        self.buffer.drain(..).collect()
    }
}
