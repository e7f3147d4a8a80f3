// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
//!
//! The disassembler shares the CPU's decode table ([Insn]), so anything the
//! CPU treats as a no-op is skipped here, and vice versa.
use super::Insn;
use crate::{
    cpu::mem::MEM_SIZE,
    error::{Error, Result},
};
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction, or [None] if it isn't one
    fn once(&self, insn: u16) -> Option<String>;
}

/// One line of a linear disassembly
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    /// Offset of the instruction from the start of the ROM
    pub offset: usize,
    /// The raw opcode word
    pub word: u16,
    /// The decoded instruction
    pub insn: Insn,
}

/// Scans `rom` two bytes at a time, stopping at the first `0000` word.
///
/// Unknown opcodes are skipped. Branches are not followed.
/// # Examples
/// ```rust
/// # use ch8::cpu::instruction::disassembler::scan;
/// let lines: Vec<String> = scan(&[0x00, 0xe0, 0xff, 0xff, 0x12, 0x00, 0x00, 0x00, 0x00, 0xe0])
///     .map(|line| line.insn.to_string())
///     .collect();
/// assert_eq!(lines, ["CLS", "JMP 0x0200"]);
/// ```
pub fn scan(rom: &[u8]) -> impl Iterator<Item = Line> + '_ {
    rom.chunks(2)
        .enumerate()
        .map(|(idx, chunk)| {
            // a trailing odd byte is padded out, as if memory were zeroed past it
            let word = u16::from_be_bytes([chunk[0], chunk.get(1).copied().unwrap_or_default()]);
            (idx * 2, word)
        })
        .take_while(|&(_, word)| word != 0)
        .filter_map(|(offset, word)| {
            Insn::from_word(word).map(|insn| Line { offset, word, insn })
        })
}

/// Disassembles a whole ROM, one mnemonic per line.
///
/// ROMs larger than memory are rejected with [Error::RomTooLarge].
/// # Examples
/// ```rust
/// # use ch8::cpu::instruction::disassembler::listing;
/// assert_eq!("MVI 0x022A\nMOV V0, 0\n", listing(&[0xa2, 0x2a, 0x60, 0x00]).unwrap());
/// ```
pub fn listing(rom: &[u8]) -> Result<String> {
    if rom.len() > MEM_SIZE {
        return Err(Error::RomTooLarge {
            size: rom.len(),
            max: MEM_SIZE,
        });
    }
    Ok(scan(rom).map(|line| format!("{}\n", line.insn)).collect())
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Debug, PartialEq)]
pub struct Dis {
    /// Styles the address column
    pub addr: Style,
    /// Styles valid instruction
    pub normal: Style,
    /// Styles the raw opcode column
    pub word: Style,
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            addr: Style::new().bold().green(),
            normal: Style::new().green(),
            word: Style::new().bright_black(),
        }
    }
}

impl Dis {
    /// Formats a [Line] as `addr: MNEMONIC  word`, with styles applied.
    /// `base` is the address the ROM is loaded at.
    pub fn annotated(&self, line: &Line, base: usize) -> String {
        format!(
            "{}: {:<20} {}",
            format_args!("{:03x}", base + line.offset).style(self.addr),
            line.insn.to_string().style(self.normal),
            format_args!("{:04x}", line.word).style(self.word),
        )
    }
}

impl Disassembler for Dis {
    fn once(&self, insn: u16) -> Option<String> {
        Insn::from_word(insn).map(|insn| insn.to_string())
    }
}
