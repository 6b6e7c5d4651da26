// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! Every handler moves the program counter itself; nothing advances it on their behalf.

use super::{mem::GLYPH_SIZE, *};
use rand::random;

impl CPU {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[inline(always)]
    pub(super) fn execute(&mut self, instruction: Insn) {
        match instruction {
            Insn::cls               => self.clear_screen(),
            Insn::ret               => self.ret(),
            Insn::jp    {       A } => self.jump(A),
            Insn::call  {       A } => self.call(A),
            Insn::seb   {    x, B } => self.skip_equals_immediate(x, B),
            Insn::sneb  {    x, B } => self.skip_not_equals_immediate(x, B),
            Insn::se    { y, x    } => self.skip_equals(x, y),
            Insn::ldb   {    x, B } => self.load_immediate(x, B),
            Insn::addb  {    x, B } => self.add_immediate(x, B),
            Insn::ld    { y, x    } => self.load(x, y),
            Insn::or    { y, x    } => self.or(x, y),
            Insn::and   { y, x    } => self.and(x, y),
            Insn::xor   { y, x    } => self.xor(x, y),
            Insn::add   { y, x    } => self.add(x, y),
            Insn::sub   { y, x    } => self.sub(x, y),
            Insn::shr   { y, x    } => self.shift_right(x, y),
            Insn::subn  { y, x    } => self.backwards_sub(x, y),
            Insn::shl   { y, x    } => self.shift_left(x, y),
            Insn::sne   { y, x    } => self.skip_not_equals(x, y),
            Insn::ldi   {       A } => self.load_i_immediate(A),
            Insn::jpr   {       A } => self.jump_indexed(A),
            Insn::rnd   {    x, B } => self.rand(x, B),
            Insn::drw   { y, x, n } => self.draw(x, y, n),
            Insn::skp   {    x    } => self.skip_key_equals(x),
            Insn::sknp  {    x    } => self.skip_key_not_equals(x),
            Insn::getdt {    x    } => self.load_delay_timer(x),
            Insn::waitk {    x    } => self.wait_for_key(x),
            Insn::setdt {    x    } => self.store_delay_timer(x),
            Insn::setst {    x    } => self.store_sound_timer(x),
            Insn::addi  {    x    } => self.add_i(x),
            Insn::font  {    x    } => self.load_sprite(x),
            Insn::bcd   {    x    } => self.bcd_convert(x),
            Insn::stor  {    x    } => self.store_dma(x),
            Insn::load  {    x    } => self.load_dma(x),
        }
    }
}

/// |`0aaa`| Screen and subroutine control
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.clear();
        self.advance();
    }
    /// |`00ee`| Returns from subroutine
    ///
    /// The stack holds the address of the call itself, so the popped address is stepped past.
    #[inline(always)]
    pub(super) fn ret(&mut self) {
        if self.sp == 0 {
            self.fault(Fault::StackUnderflow { addr: self.pc });
        } else {
            self.sp -= 1;
            self.pc = self.stack[self.sp];
        }
        self.advance();
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
    /// If the stack is full, the call is not taken.
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) {
        if self.sp == STACK_SIZE {
            self.fault(Fault::StackOverflow { addr: self.pc });
            self.advance();
            return;
        }
        self.stack[self.sp] = self.pc;
        self.sp += 1;
        self.pc = a;
    }
}

/// |`3xbb`| Skips next instruction if register X == b
impl CPU {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] == b);
    }
}

/// |`4xbb`| Skips next instruction if register X != b
impl CPU {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] != b);
    }
}

/// |`5xy0`| Skip next instruction if vX == vY
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
        self.advance();
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`7xbb`| Adds immediate byte b to register vX. vF is untouched.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
        self.advance();
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=!borrow          |
/// |`8xy6`| X = X >> 1; Set vF=shifted bit     |
/// |`8xy7`| X = Y - X; Set vF=!borrow          |
/// |`8xyE`| X = X << 1; Set vF=shifted bit     |
///
/// The flag is written before the result, so an operation targeting vF keeps its result.
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
        self.advance();
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// The original chip-8 interpreter will clobber vF for any 8-series instruction
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
        self.clobber_flag();
        self.advance();
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// The original chip-8 interpreter will clobber vF for any 8-series instruction
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
        self.clobber_flag();
        self.advance();
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// The original chip-8 interpreter will clobber vF for any 8-series instruction
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
        self.clobber_flag();
        self.advance();
    }
    #[inline(always)]
    fn clobber_flag(&mut self) {
        if self.flags.quirks.bin_ops {
            self.v[0xf] = 0;
        }
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let sum = self.v[x] as u16 + self.v[y] as u16;
        self.v[0xf] = (sum > 0xff).into();
        self.v[x] = sum as u8;
        self.advance();
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        self.v[0xf] = (self.v[x] > self.v[y]).into();
        self.v[x] = self.v[x].wrapping_sub(self.v[y]);
        self.advance();
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    ///
    /// # Quirk
    /// On the original chip-8 interpreter, this shifts vY and stores the result in vX
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, y: Reg) {
        let src: Reg = if self.flags.quirks.shift { y } else { x };
        self.v[0xf] = self.v[src] & 1;
        self.v[x] = self.v[src] >> 1;
        self.advance();
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        self.v[0xf] = (self.v[y] > self.v[x]).into();
        self.v[x] = self.v[y].wrapping_sub(self.v[x]);
        self.advance();
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    ///
    /// # Quirk
    /// On the original chip-8 interpreter, this shifts vY and stores the result in vX
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, y: Reg) {
        let src: Reg = if self.flags.quirks.shift { y } else { x };
        self.v[0xf] = self.v[src] >> 7;
        self.v[x] = self.v[src] << 1;
        self.advance();
    }
}

/// |`9xy0`| Skip next instruction if vX != vY
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
        self.advance();
    }
}

/// |`Baaa`| Jump to &adr + v0
impl CPU {
    /// |`Badr`| Jump to &adr + v0
    ///
    /// # Quirk
    /// On the Super-Chip, this jumps to &adr + vX, where X is the high nibble of adr
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        let reg = if self.flags.quirks.jump_vx {
            (a >> 8) as Reg & 0xf
        } else {
            0
        };
        self.pc = a.wrapping_add(self.v[reg] as Adr);
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = random::<u8>() & b;
        self.advance();
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// vF is cleared before the origin is read, and set if any lit pixel was turned off.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib) {
        self.v[0xf] = 0;
        let sprite: Vec<u8> = (0..n as Adr)
            .map(|row| self.mem.read(self.i.wrapping_add(row)))
            .collect();
        let collision = self
            .screen
            .draw(self.v[x], self.v[y], &sprite, self.flags.quirks.clip);
        self.v[0xf] = collision.into();
        self.advance();
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                                   |
/// |------|------------------------------------------|
/// |`eX9e`| Skip next instruction if key vX held     |
/// |`eXa1`| Skip next instruction if key vX not held |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key vX is held
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        self.skip_if(self.keys.is_pressed(self.v[x]));
    }
    /// |`ExA1`| Skip next instruction if key vX is not held
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        self.skip_if(!self.keys.is_pressed(self.v[x]));
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
        self.advance();
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// While no key is held, pc stays put, so this instruction runs again next step.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        if let Some(key) = self.keys.first_pressed() {
            self.v[x] = key;
            self.flags.keypause = false;
            self.advance();
        } else {
            self.flags.keypause = true;
        }
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.timers.delay = self.v[x];
        self.advance();
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.timers.sound = self.v[x];
        self.advance();
    }
    /// |`Fx1e`| Add vX to I,
    /// ```py
    /// I += vX;
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        self.i = self.i.wrapping_add(self.v[x] as Adr);
        self.advance();
    }
    /// |`Fx29`| Load sprite for character x into I
    /// ```py
    /// I = sprite(X);
    /// ```
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = GLYPH_SIZE * self.v[x] as Adr;
        self.advance();
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) {
        let x = self.v[x];
        self.store(0, x / 100);
        self.store(1, x / 10 % 10);
        self.store(2, x % 10);
        self.advance();
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// # Quirk
    /// The original chip-8 interpreter uses I to directly index memory,
    /// with the side effect of leaving I as I+X+1 after the transfer is done.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.store(reg as Adr, self.v[reg]);
        }
        self.bump_i(x);
        self.advance();
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// # Quirk
    /// The original chip-8 interpreter uses I to directly index memory,
    /// with the side effect of leaving I as I+X+1 after the transfer is done.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.v[reg] = self.mem.read(self.i.wrapping_add(reg as Adr));
        }
        self.bump_i(x);
        self.advance();
    }
    #[inline(always)]
    fn bump_i(&mut self, x: Reg) {
        if self.flags.quirks.dma_inc {
            self.i = self.i.wrapping_add(x as Adr + 1);
        }
    }
}
