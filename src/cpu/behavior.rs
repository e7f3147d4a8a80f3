// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! Every handler leaves the program counter where the next cycle should fetch.

use super::{
    mem::{FONT_ADDR, GLYPH_SIZE},
    *,
};
use crate::screen::WIDTH;
use log::error;
use rand::random;

impl CPU {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[inline(always)]
    pub(super) fn execute(&mut self, screen: &mut Screen, instruction: Insn) {
        match instruction {
            Insn::cls                => self.clear_screen(screen),
            Insn::rts                => self.ret(),
            Insn::jmp    {       A } => self.jump(A),
            Insn::jsr    {       A } => self.call(A),
            Insn::skeqb  {    x, B } => self.skip_equals_immediate(x, B),
            Insn::skneb  {    x, B } => self.skip_not_equals_immediate(x, B),
            Insn::skeq   { y, x, ..} => self.skip_equals(x, y),
            Insn::movb   {    x, B } => self.load_immediate(x, B),
            Insn::addb   {    x, B } => self.add_immediate(x, B),
            Insn::mov    { y, x    } => self.load(x, y),
            Insn::or     { y, x    } => self.or(x, y),
            Insn::and    { y, x    } => self.and(x, y),
            Insn::xor    { y, x    } => self.xor(x, y),
            Insn::add    { y, x    } => self.add(x, y),
            Insn::sub    { y, x    } => self.sub(x, y),
            Insn::shr    {    x, ..} => self.shift_right(x),
            Insn::rsb    { y, x    } => self.backwards_sub(x, y),
            Insn::shl    {    x, ..} => self.shift_left(x),
            Insn::skne   { y, x, ..} => self.skip_not_equals(x, y),
            Insn::mvi    {       A } => self.load_i_immediate(A),
            Insn::jmi    {       A } => self.jump_indexed(A),
            Insn::rand   {    x, B } => self.rand(x, B),
            Insn::sprite { y, x, n } => self.draw(x, y, n, screen),
            Insn::skpr   {    x    } => self.skip_key_down(x),
            Insn::skup   {    x    } => self.skip_key_up(x),
            Insn::gdelay {    x    } => self.load_delay_timer(x),
            Insn::key    {    x    } => self.wait_for_key(x),
            Insn::sdelay {    x    } => self.store_delay_timer(x),
            Insn::ssound {    x    } => self.store_sound_timer(x),
            Insn::adi    {    x    } => self.add_i(x),
            Insn::font   {    x    } => self.load_sprite(x),
            Insn::bcd    {    x    } => self.bcd_convert(x),
            Insn::str    {    x    } => self.store_dma(x),
            Insn::ldr    {    x    } => self.load_dma(x),
        }
    }

    /// Moves on to the next instruction
    #[inline(always)]
    fn next(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Skips the next instruction if `cond` holds, otherwise moves on to it
    #[inline(always)]
    fn skip_if(&mut self, cond: bool) {
        self.pc = self.pc.wrapping_add(if cond { 4 } else { 2 });
    }

    /// Records a [Fault] and halts. The faulting instruction has no other effect.
    fn raise(&mut self, fault: Fault) {
        error!("{fault}");
        self.flags.halt(Some(fault));
    }
}

/// |`0aaa`| Screen and subroutine control
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0, and marks it for redraw
    #[inline(always)]
    pub(super) fn clear_screen(&mut self, screen: &mut Screen) {
        screen.clear();
        self.next();
    }
    /// |`00ee`| Returns from subroutine, to the instruction after the call
    ///
    /// Returning with an empty stack faults with [Fault::StackUnderflow].
    #[inline(always)]
    pub(super) fn ret(&mut self) {
        match self.sp.checked_sub(1) {
            Some(sp) => {
                self.sp = sp;
                self.pc = self.stack[sp].wrapping_add(2);
            }
            None => self.raise(Fault::StackUnderflow { pc: self.pc }),
        }
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl CPU {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl CPU {
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a
    ///
    /// Calling with a full stack faults with [Fault::StackOverflow].
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) {
        if self.sp >= STACK_DEPTH {
            return self.raise(Fault::StackOverflow { pc: self.pc });
        }
        self.stack[self.sp] = self.pc;
        self.sp += 1;
        self.pc = a;
    }
}

/// |`3xbb`| Skips the next instruction if register X == b
impl CPU {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] == b);
    }
}

/// |`4xbb`| Skips the next instruction if register X != b
impl CPU {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] != b);
    }
}

/// |`5xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`5XY0`| Skip next instruction if vX == vY  |
impl CPU {
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] == self.v[y]);
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl CPU {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
        self.next();
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`7xbb`| Adds immediate byte b to register vX, without touching vF
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
        self.next();
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X | Y                          |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=X>Y              |
/// |`8xy6`| X = X >> 1; Set vF=lsb             |
/// |`8xy7`| X = Y - X; Set vF=X<Y              |
/// |`8xyE`| X = X << 1; Set vF=msb             |
///
/// Operands are read before vF is written, and vX is written last,
/// so the result wins when X is vF.
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
        self.next();
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
        self.next();
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
        self.next();
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
        self.next();
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let (vx, vy) = (self.v[x], self.v[y]);
        let (sum, carry) = vx.overflowing_add(vy);
        self.v[0xf] = carry.into();
        self.v[x] = sum;
        self.next();
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    ///
    /// vF is set when vX is strictly greater than vY
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[0xf] = (vx > vy).into();
        self.v[x] = vx.wrapping_sub(vy);
        self.next();
    }
    /// |`8xy6`| Performs bitwise right shift of vX, in place
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg) {
        self.v[0xf] = self.v[x] & 1;
        self.v[x] >>= 1;
        self.next();
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    ///
    /// vF is set when vX is strictly less than vY
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[0xf] = (vx < vy).into();
        self.v[x] = vy.wrapping_sub(vx);
        self.next();
    }
    /// |`8xyE`| Performs bitwise left shift of vX, in place
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg) {
        self.v[0xf] = self.v[x] >> 7;
        self.v[x] <<= 1;
        self.next();
    }
}

/// |`9xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`9XY0`| Skip next instruction if vX != vY  |
impl CPU {
    /// |`9xy0`| Skip next instruction if X != y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] != self.v[y]);
    }
}

/// |`Aaaa`| Load address #a into register I
impl CPU {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
        self.next();
    }
}

/// |`Baaa`| Jump to &adr + v0
impl CPU {
    /// |`Badr`| Jump to &adr + v0
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        self.pc = a.wrapping_add(self.v[0].into());
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = random::<u8>() & b;
        self.next();
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// Sprite rows are read from memory at I. Each set bit is XORed onto the
    /// screen, wrapping around the flattened framebuffer. vF is set if any
    /// lit pixel was turned off.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib, screen: &mut Screen) {
        let (x, y) = (self.v[x] as usize, self.v[y] as usize);
        self.v[0xf] = 0;
        for row in 0..n as usize {
            let sprite = self.mem.read(self.i as usize + row);
            for col in (0..8).filter(|col| sprite & (0x80 >> col) != 0) {
                if screen.flip(x + col + (y + row) * WIDTH) {
                    self.v[0xf] = 1;
                }
            }
        }
        screen.touch();
        self.next();
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip next instruction if key vX is down |
/// |`eXa1`| Skip next instruction if key vX is up   |
///
/// Key numbers above `F` are never down.
impl CPU {
    /// |`Ex9E`| Skip next instruction if key vX is down
    #[inline(always)]
    pub(super) fn skip_key_down(&mut self, x: Reg) {
        self.skip_if(self.key_down(self.v[x]));
    }
    /// |`ExA1`| Skip next instruction if key vX is up
    #[inline(always)]
    pub(super) fn skip_key_up(&mut self, x: Reg) {
        self.skip_if(!self.key_down(self.v[x]));
    }
    #[inline(always)]
    fn key_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or_default()
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.timers.delay;
        self.next();
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Stalls on this instruction until a key is held.
    /// If more than one key is held, the lowest wins.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        match self.keys.iter().position(|&down| down) {
            Some(key) => {
                self.flags.keypause = false;
                self.v[x] = key as u8;
                self.next();
            }
            None => {
                if !self.flags.keypause {
                    debug!("{:03x}: waiting for a key", self.pc);
                }
                self.flags.keypause = true;
            }
        }
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.timers.delay = self.v[x];
        self.next();
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.timers.sound = self.v[x];
        self.next();
    }
    /// |`Fx1e`| Add vX to I,
    /// ```py
    /// VF = I + vX > 0xfff
    /// I += vX;
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        let vx = self.v[x] as u16;
        self.v[0xf] = (self.i as u32 + vx as u32 > 0xfff).into();
        self.i = self.i.wrapping_add(vx);
        self.next();
    }
    /// |`Fx29`| Load sprite for character x into I
    /// ```py
    /// I = sprite(X);
    /// ```
    /// Only digits `0`..=`F` land on a glyph.
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = FONT_ADDR + self.v[x] as u16 * GLYPH_SIZE;
        self.next();
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) {
        let (i, vx) = (self.i as usize, self.v[x]);
        self.mem.write(i, vx / 100);
        self.mem.write(i + 1, vx / 10 % 10);
        self.mem.write(i + 2, vx % 10);
        self.next();
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// I is left unchanged.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) {
        let i = self.i as usize;
        for reg in 0..=x {
            self.mem.write(i + reg, self.v[reg]);
        }
        self.next();
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// I is left unchanged.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) {
        let i = self.i as usize;
        for reg in 0..=x {
            self.v[reg] = self.mem.read(i + reg);
        }
        self.next();
    }
}
