// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]
//!
//! The decode table is generated by imperative_rs from the `#[opcode]` patterns:
//! lowercase hex digits are literal, and each named field captures the nibbles
//! spelled with its name.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Every operation the interpreter understands, with its decoded operands
pub enum Insn {
    /// | 00e0 | Clear the screen
    #[opcode = "0x00e0"]
    cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    ret,
    /// | 1aaa | Jump to an absolute address
    #[opcode = "0x1AAA"]
    jp { A: u16 },
    /// | 2aaa | Push pc onto the stack, then jump to a
    #[opcode = "0x2AAA"]
    call { A: u16 },
    /// | 3xbb | Skip next instruction if vX == b
    #[opcode = "0x3xBB"]
    seb { B: u8, x: usize },
    /// | 4xbb | Skip next instruction if vX != b
    #[opcode = "0x4xBB"]
    sneb { B: u8, x: usize },
    /// | 5xy0 | Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    se { y: usize, x: usize },
    /// | 6xbb | Load immediate byte b into vX
    #[opcode = "0x6xBB"]
    ldb { B: u8, x: usize },
    /// | 7xbb | Add immediate byte b to vX, without carry
    #[opcode = "0x7xBB"]
    addb { B: u8, x: usize },
    /// | 8xy0 | Copy vY into vX
    #[opcode = "0x8xy0"]
    ld { y: usize, x: usize },
    /// | 8xy1 | vX |= vY
    #[opcode = "0x8xy1"]
    or { y: usize, x: usize },
    /// | 8xy2 | vX &= vY
    #[opcode = "0x8xy2"]
    and { y: usize, x: usize },
    /// | 8xy3 | vX ^= vY
    #[opcode = "0x8xy3"]
    xor { y: usize, x: usize },
    /// | 8xy4 | vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    add { y: usize, x: usize },
    /// | 8xy5 | vX -= vY, vF = not borrow
    #[opcode = "0x8xy5"]
    sub { y: usize, x: usize },
    /// | 8xy6 | vX >>= 1, vF = bit shifted out
    #[opcode = "0x8xy6"]
    shr { y: usize, x: usize },
    /// | 8xy7 | vX = vY - vX, vF = not borrow
    #[opcode = "0x8xy7"]
    subn { y: usize, x: usize },
    /// | 8xyE | vX <<= 1, vF = bit shifted out
    #[opcode = "0x8xye"]
    shl { y: usize, x: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    sne { y: usize, x: usize },
    /// | Aaaa | Load address a into I
    #[opcode = "0xaAAA"]
    ldi { A: u16 },
    /// | Baaa | Jump to a + v0
    #[opcode = "0xbAAA"]
    jpr { A: u16 },
    /// | Cxbb | Load a random byte & b into vX
    #[opcode = "0xcxBB"]
    rnd { B: u8, x: usize },
    /// | Dxyn | Draw an n-byte sprite from &I at (vX, vY)
    #[opcode = "0xdxyn"]
    drw { y: usize, x: usize, n: u8 },
    /// | Ex9E | Skip next instruction if key vX is held
    #[opcode = "0xex9e"]
    skp { x: usize },
    /// | ExA1 | Skip next instruction if key vX is not held
    #[opcode = "0xexa1"]
    sknp { x: usize },
    /// | Fx07 | Load the delay timer into vX
    #[opcode = "0xfx07"]
    getdt { x: usize },
    /// | Fx0A | Wait for a key, then load it into vX
    #[opcode = "0xfx0a"]
    waitk { x: usize },
    /// | Fx15 | Load vX into the delay timer
    #[opcode = "0xfx15"]
    setdt { x: usize },
    /// | Fx18 | Load vX into the sound timer
    #[opcode = "0xfx18"]
    setst { x: usize },
    /// | Fx1E | I += vX
    #[opcode = "0xfx1e"]
    addi { x: usize },
    /// | Fx29 | Point I at the font glyph for the digit in vX
    #[opcode = "0xfx29"]
    font { x: usize },
    /// | Fx33 | Store the decimal digits of vX at &I[0..3]
    #[opcode = "0xfx33"]
    bcd { x: usize },
    /// | Fx55 | Store v0..=vX at &I
    #[opcode = "0xfx55"]
    stor { x: usize },
    /// | Fx65 | Load v0..=vX from &I
    #[opcode = "0xfx65"]
    load { x: usize },
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jp    { A }       => write!(f, "jp     ${A:03x}"),
            Insn::call  { A }       => write!(f, "call   ${A:03x}"),
            Insn::seb   { B, x }    => write!(f, "se     v{x:X}, #{B:02x}"),
            Insn::sneb  { B, x }    => write!(f, "sne    v{x:X}, #{B:02x}"),
            Insn::se    { y, x }    => write!(f, "se     v{x:X}, v{y:X}"),
            Insn::ldb   { B, x }    => write!(f, "ld     v{x:X}, #{B:02x}"),
            Insn::addb  { B, x }    => write!(f, "add    v{x:X}, #{B:02x}"),
            Insn::ld    { y, x }    => write!(f, "ld     v{x:X}, v{y:X}"),
            Insn::or    { y, x }    => write!(f, "or     v{x:X}, v{y:X}"),
            Insn::and   { y, x }    => write!(f, "and    v{x:X}, v{y:X}"),
            Insn::xor   { y, x }    => write!(f, "xor    v{x:X}, v{y:X}"),
            Insn::add   { y, x }    => write!(f, "add    v{x:X}, v{y:X}"),
            Insn::sub   { y, x }    => write!(f, "sub    v{x:X}, v{y:X}"),
            Insn::shr   { y, x }    => write!(f, "shr    v{x:X}, v{y:X}"),
            Insn::subn  { y, x }    => write!(f, "subn   v{x:X}, v{y:X}"),
            Insn::shl   { y, x }    => write!(f, "shl    v{x:X}, v{y:X}"),
            Insn::sne   { y, x }    => write!(f, "sne    v{x:X}, v{y:X}"),
            Insn::ldi   { A }       => write!(f, "ld     I, ${A:03x}"),
            Insn::jpr   { A }       => write!(f, "jp     v0, ${A:03x}"),
            Insn::rnd   { B, x }    => write!(f, "rnd    v{x:X}, #{B:02x}"),
            Insn::drw   { y, x, n } => write!(f, "drw    v{x:X}, v{y:X}, #{n:x}"),
            Insn::skp   { x }       => write!(f, "skp    v{x:X}"),
            Insn::sknp  { x }       => write!(f, "sknp   v{x:X}"),
            Insn::getdt { x }       => write!(f, "ld     v{x:X}, DT"),
            Insn::waitk { x }       => write!(f, "ld     v{x:X}, K"),
            Insn::setdt { x }       => write!(f, "ld     DT, v{x:X}"),
            Insn::setst { x }       => write!(f, "ld     ST, v{x:X}"),
            Insn::addi  { x }       => write!(f, "add    I, v{x:X}"),
            Insn::font  { x }       => write!(f, "ld     F, v{x:X}"),
            Insn::bcd   { x }       => write!(f, "ld     B, v{x:X}"),
            Insn::stor  { x }       => write!(f, "ld     [I], v{x:X}"),
            Insn::load  { x }       => write!(f, "ld     v{x:X}, [I]"),
        }
    }
}
