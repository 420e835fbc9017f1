//! WebAssembly bindings for the simulator.
//!
//! This module exposes a JavaScript-callable [`Emulator`] wrapping a
//! [`Simulator`](crate::Simulator) with the default memory map, for running
//! 6502 programs against a browser terminal.

pub mod api;

pub use api::Emulator;
