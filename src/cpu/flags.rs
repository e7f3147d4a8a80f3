// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Represents flags that aid in implementation but aren't a part of the Chip-8 machine

use crate::error::Fault;

/// Represents flags that describe the run state of the CPU
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Set when the CPU has stopped, either on a `0000` word or a [Fault].
    /// A halted CPU ignores further ticks.
    pub halted: bool,
    /// Set while `Fx0a` is stalled waiting for a keypress
    pub keypause: bool,
    /// Set for the cycle in which a timer tick found the sound timer running
    pub tone: bool,
    /// The fault that halted the CPU, if any
    pub fault: Option<Fault>,
}

impl Flags {
    /// Halts the CPU, recording the cause
    ///
    /// # Examples
    /// ```rust
    /// # use ch8::cpu::flags::Flags;
    /// # use ch8::error::Fault;
    /// let mut flags = Flags::default();
    /// flags.halt(Some(Fault::StackUnderflow { pc: 0x200 }));
    /// assert!(flags.halted);
    /// assert!(flags.fault.is_some());
    /// ```
    pub fn halt(&mut self, fault: Option<Fault>) {
        self.halted = true;
        self.fault = fault;
    }
}
