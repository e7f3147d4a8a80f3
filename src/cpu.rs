// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod timers;

use self::{
    flags::Flags,
    instruction::Insn,
    mem::{Mem, PROGRAM_START},
    timers::Timers,
};
use crate::{
    error::{Error, Fault, Result},
    screen::Screen,
};
use log::{debug, info, trace};
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Depth of the call stack
pub const STACK_DEPTH: usize = 16;

/// Represents the internal state of the CPU interpreter
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CPU {
    /// Flags describing the run state of the CPU: halted, key-wait, tone, fault
    pub flags: Flags,
    // memory
    mem: Mem,
    stack: [Adr; STACK_DEPTH],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // I/O
    keys: [bool; 16],
    // Execution data
    opcode: u16,
    cycle: usize,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the font loaded and the program counter at 0x200
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let cpu = CPU::new();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a program from a file into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        let rom = rom.as_ref();
        let bytes = std::fs::read(rom)?;
        info!("loading {} ({} bytes)", rom.display(), bytes.len());
        self.load_program_bytes(&bytes)
    }

    /// Loads bytes into the CPU's program space, at 0x200
    ///
    /// Returns [Error::RomTooLarge] if the program doesn't fit, in which case
    /// memory is left untouched.
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(0x00e0, cpu.mem().read_word(0x200));
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        Ok(self)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if !*keyref {
                *keyref = true;
                return Ok(true);
            } // else do nothing
        } else {
            return Err(Error::InvalidKey { key });
        }
        Ok(false)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        if let Some(keyref) = self.keys.get_mut(key) {
            if *keyref {
                *keyref = false;
                return Ok(true);
            }
        } else {
            return Err(Error::InvalidKey { key });
        }
        Ok(false)
    }

    /// Releases every key
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// cpu.press(0x1).unwrap();
    /// cpu.press(0xf).unwrap();
    /// cpu.clear_keys();
    /// assert_eq!([false; 16], cpu.keys());
    /// ```
    pub fn clear_keys(&mut self) {
        self.keys = [false; 16];
    }

    /// Gets the state of every key, indexed by key number
    pub fn keys(&self) -> [bool; 16] {
        self.keys
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// // Create a new CPU, and set v0 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x0, 0x41).unwrap();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.i());
    /// ```
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer, the number of return addresses on the stack
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        &self.stack[..self.sp]
    }

    /// Gets the value in the Sound Timer register
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.sound());
    /// ```
    pub fn sound(&self) -> u8 {
        self.timers.sound
    }

    /// Gets the value in the Delay Timer register
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0, cpu.delay());
    /// ```
    pub fn delay(&self) -> u8 {
        self.timers.delay
    }

    /// Gets the most recently fetched opcode
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// Gets the number of cycles the CPU has executed
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x0, cpu.cycle());
    /// ```
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Returns true once the CPU has stopped accepting cycles
    pub fn is_halted(&self) -> bool {
        self.flags.halted
    }

    /// Returns true if the host should sound its tone for the last cycle
    pub fn tone(&self) -> bool {
        self.flags.tone
    }

    /// Gets the [Fault] that halted the CPU, if any
    pub fn fault(&self) -> Option<Fault> {
        self.flags.fault
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Executes a single instruction, then advances the timers.
    ///
    /// A `0000` word halts the CPU. Unknown opcodes are skipped.
    /// Nothing in here fails: faults are recorded in [CPU::fault]
    /// and halt the CPU. Ticking a halted CPU does nothing.
    /// # Examples
    /// ```rust
    /// # use ch8::*;
    /// let mut cpu = CPU::default();
    /// let mut screen = Screen::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.tick(&mut screen);
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    pub fn tick(&mut self, screen: &mut Screen) -> &mut Self {
        if self.flags.halted {
            return self;
        }
        self.flags.tone = false;
        self.cycle += 1;
        // fetch opcode
        self.opcode = self.mem.read_word(self.pc);
        if self.opcode == 0 {
            info!("halted on 0000 at {:03x} after {} cycles", self.pc, self.cycle);
            self.flags.halt(None);
            return self;
        }

        // decode opcode
        if let Some(insn) = Insn::from_word(self.opcode) {
            trace!("{:6} {:03x}: {insn}", self.cycle, self.pc);
            self.execute(screen, insn);
        } else {
            debug!("{:03x}: skipping unknown opcode {:04x}", self.pc, self.opcode);
            self.pc = self.pc.wrapping_add(2);
        }
        if self.flags.halted {
            return self;
        }

        self.flags.tone = self.timers.step();
        self
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack())
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keys", &self.keys)
            .field("opcode", &self.opcode)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use ch8::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::default(),
            stack: [0; STACK_DEPTH],
            sp: 0,
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            timers: Timers::default(),
            keys: [false; 16],
            opcode: 0,
            cycle: 0,
        }
    }
}
