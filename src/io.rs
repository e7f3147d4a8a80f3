// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The host adapter: what a frontend must provide, and the loop that paces it
//!
//! Each cycle of the [Runner] polls the frontend for keys, runs one instruction,
//! sounds the tone if the sound timer asked for it, and presents the screen if
//! anything was drawn. It then sleeps to hold [CYCLES_PER_SECOND].

use crate::{error::Result, Chip8, CPU};
use log::{debug, info};
use std::time::{Duration, Instant};

/// Number of instructions executed per second of wall time
pub const CYCLES_PER_SECOND: u64 = 500;

/// Number of consecutive empty polls before a [KeyLatch] lets go
pub const RELEASE_AFTER: u8 = 10;

/// Everything the machine needs from its host
pub trait Frontend {
    /// Updates the keypad. Returns false if the user asked to quit.
    fn keys(&mut self, ch8: &mut Chip8) -> Result<bool>;
    /// Presents the screen. Only called after something was drawn.
    /// Returns false if the user asked to quit.
    fn frame(&mut self, ch8: &mut Chip8) -> Result<bool>;
    /// Sounds the tone for one cycle
    fn beep(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drives a [Chip8] through a [Frontend], one cycle per iteration
///
/// The runner ends when the machine halts, or when the frontend asks to quit.
/// A machine that halts on a [crate::error::Fault] yields it as an error.
#[derive(Debug)]
pub struct Runner<F: Frontend> {
    /// The machine being run
    pub ch8: Chip8,
    /// The host it's being run on
    pub frontend: F,
    rate: Option<Duration>,
    ft: Instant,
    done: bool,
}

impl<F: Frontend> Runner<F> {
    /// Constructs a runner paced at [CYCLES_PER_SECOND]
    pub fn new(ch8: Chip8, frontend: F) -> Self {
        Runner {
            ch8,
            frontend,
            rate: Some(Duration::from_nanos(1_000_000_000 / CYCLES_PER_SECOND)),
            ft: Instant::now(),
            done: false,
        }
    }

    /// Runs as fast as the host allows, without sleeping between cycles
    pub fn unpaced(mut self) -> Self {
        self.rate = None;
        self
    }

    /// Runs the machine until it halts or the frontend quits
    pub fn run(&mut self) -> Result<()> {
        for result in self.by_ref() {
            result?;
        }
        Ok(())
    }

    /// Runs one cycle of the host loop. Returns false when the loop is over.
    pub fn step(&mut self) -> Result<bool> {
        if !self.frontend.keys(&mut self.ch8)? {
            info!("quit at {:03x}", self.ch8.cpu.pc());
            return Ok(false);
        }
        self.ch8.tick();
        if self.ch8.cpu.tone() {
            self.frontend.beep()?;
        }
        if self.ch8.screen.is_dirty() && !self.frontend.frame(&mut self.ch8)? {
            info!("quit at {:03x}", self.ch8.cpu.pc());
            return Ok(false);
        }
        if self.ch8.is_halted() {
            return match self.ch8.cpu.fault() {
                Some(fault) => Err(fault.into()),
                None => Ok(false),
            };
        }
        Ok(true)
    }

    fn wait_for_next_cycle(&mut self) {
        if let Some(rate) = self.rate {
            std::thread::sleep(rate.saturating_sub(self.ft.elapsed()));
            self.ft += rate;
        }
    }
}

impl<F: Frontend> Iterator for Runner<F> {
    type Item = Result<()>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.wait_for_next_cycle();
        match self.step() {
            Ok(true) => Some(Ok(())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Holds a key down for hosts that only report presses
///
/// A reported key is held until [RELEASE_AFTER] polls in a row report nothing.
/// A new key replaces the held one immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyLatch {
    held: Option<usize>,
    idle: u8,
}

impl KeyLatch {
    /// Constructs a latch with no key held
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one poll's worth of input to the latch, and returns the held key
    /// # Examples
    /// ```rust
    /// # use ch8::io::*;
    /// let mut latch = KeyLatch::new();
    /// assert_eq!(Some(0x5), latch.poll(Some(0x5)));
    /// for _ in 1..RELEASE_AFTER {
    ///     assert_eq!(Some(0x5), latch.poll(None));
    /// }
    /// assert_eq!(None, latch.poll(None));
    /// ```
    pub fn poll(&mut self, pressed: Option<usize>) -> Option<usize> {
        match pressed {
            Some(key) => {
                self.idle = 0;
                self.held = Some(key);
            }
            None => {
                self.idle = self.idle.saturating_add(1);
                if self.idle == RELEASE_AFTER {
                    if let Some(key) = self.held.take() {
                        debug!("released key {key:x}");
                    }
                }
            }
        }
        self.held
    }

    /// Gets the key being held, if any
    pub fn held(&self) -> Option<usize> {
        self.held
    }

    /// Clears the keypad, then presses the held key
    pub fn apply(&self, cpu: &mut CPU) -> Result<()> {
        cpu.clear_keys();
        if let Some(key) = self.held {
            cpu.press(key)?;
        }
        Ok(())
    }
}
