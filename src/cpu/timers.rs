// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drives the delay and sound timers from the instruction stream
//!
//! The timers aren't tied to a clock. They tick once every [TIMER_DIVISOR]
//! executed instructions, which at [crate::io::CYCLES_PER_SECOND]
//! works out to 50 ticks a second.

/// Number of executed instructions per timer tick
pub const TIMER_DIVISOR: u8 = 10;

/// The delay and sound countdowns, and the divider that paces them
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    /// Delay timer, read and written by `Fx07`/`Fx15`
    pub delay: u8,
    /// Sound timer, written by `Fx18`
    pub sound: u8,
    divider: u8,
}

impl Timers {
    /// Advances the divider by one instruction, ticking both timers when it
    /// rolls over. Returns true if the sound timer was running on this tick,
    /// meaning the host should sound its tone.
    /// # Examples
    /// ```rust
    /// # use ch8::cpu::timers::*;
    /// let mut timers = Timers::default();
    /// timers.sound = 1;
    /// // the first instruction lands on a tick
    /// assert!(timers.step());
    /// assert_eq!(0, timers.sound);
    /// // and the timer never drops below zero
    /// for _ in 0..TIMER_DIVISOR {
    ///     assert!(!timers.step());
    /// }
    /// assert_eq!(0, timers.sound);
    /// ```
    pub fn step(&mut self) -> bool {
        let mut tone = false;
        if self.divider == 0 {
            self.delay = self.delay.saturating_sub(1);
            tone = self.sound > 0;
            self.sound = self.sound.saturating_sub(1);
        }
        self.divider = (self.divider + 1) % TIMER_DIVISOR;
        tone
    }
}
