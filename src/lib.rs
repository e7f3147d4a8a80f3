// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture:
//! a fetch/decode/execute core, a 64x32 framebuffer, and a small host adapter
//! that paces the machine at a fixed instruction rate.
//!
//! The core never touches a terminal or a window. Frontends implement
//! [io::Frontend], and [io::Runner] drives them.
//!
//! # Examples
//! ```rust
//! use ch8::*;
//! let mut ch8 = Chip8::new();
//! ch8.load_program_bytes(&[
//!     0xa2, 0x2a, // MVI 0x022A
//!     0x60, 0x00, // MOV V0, 0
//! ])?;
//! while !ch8.is_halted() {
//!     ch8.tick();
//! }
//! assert_eq!(0x22a, ch8.cpu.i());
//! # Ok::<(), ch8::error::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cpu;
pub mod error;
pub mod io;
pub mod rom;
pub mod screen;

// Common imports for ch8
pub use cpu::{
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    CPU,
};
pub use error::Result;
pub use screen::Screen;

/// Holds the state of a Chip-8: the [CPU], and the [Screen] it draws to
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chip8 {
    /// Contains the registers, timers, keypad and memory
    pub cpu: CPU,
    /// Contains the framebuffer
    pub screen: Screen,
}

impl Chip8 {
    /// Constructs a fresh machine with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a program from a file. See [CPU::load_program]
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.cpu.load_program(rom)?;
        Ok(self)
    }

    /// Loads a program from bytes. See [CPU::load_program_bytes]
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.cpu.load_program_bytes(rom)?;
        Ok(self)
    }

    /// Runs a single cycle. See [CPU::tick]
    pub fn tick(&mut self) -> &mut Self {
        self.cpu.tick(&mut self.screen);
        self
    }

    /// Returns true once the machine has stopped
    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }
}

/// Common imports for ch8
pub mod prelude {
    pub use super::{Chip8, Dis, Disassembler, Insn, Screen, CPU};
    pub use crate::error::{Error, Fault, Result};
    pub use crate::io::{Frontend, KeyLatch, Runner, CYCLES_PER_SECOND};
}
