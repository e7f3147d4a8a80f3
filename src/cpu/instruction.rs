// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
/// The Chip-8 instruction set, decoded using imperative_rs
///
/// `0000` is deliberately absent: the CPU treats it as a halt before decoding,
/// and the disassembler treats it as the end of the program.
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    rts,
    /// | 1aaa | Jumps to an absolute address
    #[opcode = "0x1AAA"]
    jmp { A: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    #[opcode = "0x2AAA"]
    jsr { A: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    #[opcode = "0x3xBB"]
    skeqb { B: u8, x: usize },
    /// | 4xbb | Skips next instruction if register X != b
    #[opcode = "0x4xBB"]
    skneb { B: u8, x: usize },
    /// | 5xyn | Skip next instruction if vX == vY (n is ignored)
    #[opcode = "0x5xyn"]
    skeq { y: usize, x: usize, n: u8 },
    /// | 6xbb | Loads immediate byte b into register vX
    #[opcode = "0x6xBB"]
    movb { B: u8, x: usize },
    /// | 7xbb | Adds immediate byte b to register vX
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | Loads the value of y into x
    #[opcode = "0x8xy0"]
    mov { y: usize, x: usize },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | Performs addition of vX and vY, and stores the result in vX
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 8xy5 | Performs subtraction of vX and vY, and stores the result in vX
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// | 8xy6 | Performs bitwise right shift of vX
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// | 8xy7 | Performs subtraction of vY and vX, and stores the result in vX
    #[opcode = "0x8xy7"]
    rsb { y: usize, x: usize },
    /// | 8xyE | Performs bitwise left shift of vX
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// | 9xyn | Skip next instruction if vX != vY (n is ignored)
    #[opcode = "0x9xyn"]
    skne { y: usize, x: usize, n: u8 },
    /// | Aaaa | Load address #a into register I
    #[opcode = "0xaAAA"]
    mvi { A: u16 },
    /// | Baaa | Jump to &adr + v0
    #[opcode = "0xbAAA"]
    jmi { A: u16 },
    /// | Cxbb | Stores a random number & the provided byte into vX
    #[opcode = "0xcxBB"]
    rand { B: u8, x: usize },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    #[opcode = "0xdxyn"]
    sprite { y: usize, x: usize, n: u8 },
    /// | eX9e | Skip next instruction if key vX is down
    #[opcode = "0xex9e"]
    skpr { x: usize },
    /// | eXa1 | Skip next instruction if key vX is up
    #[opcode = "0xexa1"]
    skup { x: usize },
    /// | fX07 | Set vX to value in delay timer
    #[opcode = "0xfx07"]
    gdelay { x: usize },
    /// | fX0a | Wait for input, store key in vX
    #[opcode = "0xfx0a"]
    key { x: usize },
    /// | fX15 | Set delay timer to the value in vX
    #[opcode = "0xfx15"]
    sdelay { x: usize },
    /// | fX18 | Set sound timer to the value in vX
    #[opcode = "0xfx18"]
    ssound { x: usize },
    /// | fX1e | Add vX to I
    #[opcode = "0xfx1e"]
    adi { x: usize },
    /// | fX29 | Load sprite for character x into I
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | fX33 | BCD convert X into I[0..3]
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | fX55 | Store registers 0..=X into memory at I
    #[opcode = "0xfx55"]
    str { x: usize },
    /// | fX65 | Load registers 0..=X from memory at I
    #[opcode = "0xfx65"]
    ldr { x: usize },
}

impl Insn {
    /// Decodes a single big-endian opcode word
    /// # Examples
    /// ```rust
    /// # use ch8::cpu::instruction::Insn;
    /// assert_eq!(Some(Insn::mvi { A: 0x22a }), Insn::from_word(0xa22a));
    /// assert_eq!(None, Insn::from_word(0x8008));
    /// ```
    pub fn from_word(word: u16) -> Option<Insn> {
        Insn::decode(&word.to_be_bytes()).ok().map(|(_, insn)| insn)
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls                 => write!(f, "CLS"),
            Insn::rts                 => write!(f, "RTS"),
            Insn::jmp    { A }        => write!(f, "JMP 0x{A:04X}"),
            Insn::jsr    { A }        => write!(f, "JSR 0x{A:04X}"),
            Insn::skeqb  { B, x }     => write!(f, "SKEQ V{x:X}, {B}"),
            Insn::skneb  { B, x }     => write!(f, "SKNE V{x:X}, {B}"),
            Insn::skeq   { y, x, .. } => write!(f, "SKEQ V{x:X}, V{y:X}"),
            Insn::movb   { B, x }     => write!(f, "MOV V{x:X}, {B}"),
            Insn::addb   { B, x }     => write!(f, "ADD V{x:X}, {B}"),
            Insn::mov    { y, x }     => write!(f, "MOV V{x:X}, V{y:X}"),
            Insn::or     { y, x }     => write!(f, "OR V{x:X}, V{y:X}"),
            Insn::and    { y, x }     => write!(f, "AND V{x:X}, V{y:X}"),
            Insn::xor    { y, x }     => write!(f, "XOR V{x:X}, V{y:X}"),
            Insn::add    { y, x }     => write!(f, "ADD V{x:X}, V{y:X}"),
            Insn::sub    { y, x }     => write!(f, "SUB V{x:X}, V{y:X}"),
            Insn::shr    { x, .. }    => write!(f, "SHR V{x:X}"),
            Insn::rsb    { y, x }     => write!(f, "RSB V{x:X}, V{y:X}"),
            Insn::shl    { x, .. }    => write!(f, "SHL V{x:X}"),
            Insn::skne   { y, x, .. } => write!(f, "SKNE V{x:X}, V{y:X}"),
            Insn::mvi    { A }        => write!(f, "MVI 0x{A:04X}"),
            Insn::jmi    { A }        => write!(f, "JMI 0x{A:04X}"),
            Insn::rand   { B, x }     => write!(f, "RAND V{x:X}, {B}"),
            Insn::sprite { y, x, n }  => write!(f, "SPRITE V{x:X}, V{y:X}, {n}"),
            Insn::skpr   { x }        => write!(f, "SKPR V{x:X}"),
            Insn::skup   { x }        => write!(f, "SKUP V{x:X}"),
            Insn::gdelay { x }        => write!(f, "GDELAY V{x:X}"),
            Insn::key    { x }        => write!(f, "KEY V{x:X}"),
            Insn::sdelay { x }        => write!(f, "SDELAY V{x:X}"),
            Insn::ssound { x }        => write!(f, "SSOUND V{x:X}"),
            Insn::adi    { x }        => write!(f, "ADI V{x:X}"),
            Insn::font   { x }        => write!(f, "FONT V{x:X}"),
            Insn::bcd    { x }        => write!(f, "BCD V{x:X}"),
            Insn::str    { x }        => write!(f, "STR V{x:X}"),
            Insn::ldr    { x }        => write!(f, "LDR V{x:X}"),
        }
    }
}
