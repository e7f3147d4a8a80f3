// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for ch8

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ch8.
#[derive(Debug, Error)]
pub enum Error {
    /// The program does not fit between the load address and the end of memory
    #[error("program is {size} bytes, which exceeds the maximum ROM size of {max} bytes")]
    RomTooLarge {
        /// The size of the offending program
        size: usize,
        /// The largest program that can be loaded
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// The machine stopped on a fatal [Fault]
    #[error(transparent)]
    Fault(#[from] Fault),
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "minifb")]
    /// Error originated in [minifb]
    #[error(transparent)]
    MinifbError(#[from] minifb::Error),
}

/// A fatal condition detected while executing an instruction.
///
/// Faults never escape [crate::cpu::CPU::tick]. They are recorded on the CPU,
/// which halts, and the host picks them up afterwards.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum Fault {
    /// `2aaa` issued with every stack frame in use
    #[error("stack overflow: call at {pc:03x} exceeds 16 frames")]
    StackOverflow {
        /// Address of the offending call
        pc: u16,
    },
    /// `00ee` issued with an empty stack
    #[error("stack underflow: return at {pc:03x} with an empty stack")]
    StackUnderflow {
        /// Address of the offending return
        pc: u16,
    },
}
