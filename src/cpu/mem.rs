// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Total addressable memory, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Address at which programs are loaded, and where execution begins
pub const PROGRAM_START: u16 = 0x200;
/// Largest program accepted by [Mem::load_program]
pub const MAX_ROM_SIZE: usize = 0xfff - PROGRAM_START as usize;
/// Address of the built-in hexadecimal font
pub const FONT_ADDR: u16 = 0x000;
/// Height of a single font glyph, in bytes
pub const GLYPH_SIZE: u16 = 5;

/// The built-in 4x5 hexadecimal font, one glyph per digit `0`..=`F`
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The address range covered by this region
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_ADDR as usize..FONT_ADDR as usize + FONT.len(),
            Region::Program => PROGRAM_START as usize..PROGRAM_START as usize + MAX_ROM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// Flat, zero-initialized 4 KiB memory with the font preloaded
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mem {
    memory: Vec<u8>,
}

impl Default for Mem {
    /// Constructs a zeroed memory with the font loaded into [Region::Charset]
    fn default() -> Self {
        let mut mem = Mem {
            memory: vec![0; MEM_SIZE],
        };
        mem.memory[Region::Charset.range()].copy_from_slice(&FONT);
        mem
    }
}

impl Mem {
    /// Constructs a new mem
    /// # Examples
    /// ```rust
    /// # use ch8::cpu::mem::*;
    /// let mem = Mem::new();
    /// assert_eq!(MEM_SIZE, mem.len());
    /// assert_eq!(0xF0, mem.read(0));
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the length of the memory, in bytes
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the memory has no bytes in it
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Copies a program into [Region::Program], leaving every other byte untouched.
    ///
    /// Returns [Error::RomTooLarge] if the program exceeds [MAX_ROM_SIZE].
    /// # Examples
    /// ```rust
    /// # use ch8::cpu::mem::*;
    /// let mut mem = Mem::new();
    /// mem.load_program(&[0xa2, 0x2a]).unwrap();
    /// assert_eq!(0xa22a, mem.read_word(PROGRAM_START));
    /// assert!(mem.load_program(&[0; MAX_ROM_SIZE + 1]).is_err());
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(self)
    }

    /// Reads a byte. Addresses past the end of memory read as 0.
    #[inline(always)]
    pub fn read(&self, addr: usize) -> u8 {
        self.memory.get(addr).copied().unwrap_or_default()
    }

    /// Reads a big-endian word, high byte at `addr`
    #[inline(always)]
    pub fn read_word(&self, addr: u16) -> u16 {
        let addr = addr as usize;
        u16::from_be_bytes([self.read(addr), self.read(addr + 1)])
    }

    /// Writes a byte. Writes past the end of memory are dropped.
    #[inline(always)]
    pub fn write(&mut self, addr: usize, data: u8) {
        if let Some(byte) = self.memory.get_mut(addr) {
            *byte = data;
        }
    }

    /// Gets a slice of a named [Region] of memory
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets the whole memory as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }
}
