// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Every address handed to [Mem] is truncated to 12 bits, so reads and writes
//! wrap around the 4 KiB address space instead of running off the end.

use super::Adr;
use crate::error::{Error, Result};
use std::ops::Range;

/// Size of the address space, in bytes
pub const MEMORY_SIZE: usize = 0x1000;
/// Address at which programs are loaded, and execution begins
pub const PROGRAM_START: Adr = 0x200;
/// Mask applied to every address on its way into memory
const ADDRESS_MASK: Adr = 0x0fff;

/// The built-in hexadecimal font: 16 glyphs, 5 bytes each
pub const FONT: [u8; 0x50] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Size of one font glyph, in bytes
pub const GLYPH_SIZE: Adr = 5;

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM, at the bottom of memory
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The range of addresses covered by this region
    pub fn range(&self) -> Range<usize> {
        match self {
            Region::Charset => 0..FONT.len(),
            Region::Program => PROGRAM_START as usize..MEMORY_SIZE,
        }
    }
}

/// 4 KiB of byte-addressed memory, with the font preloaded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
    memory: Vec<u8>,
}

impl Default for Mem {
    fn default() -> Self {
        let mut memory = vec![0; MEMORY_SIZE];
        memory[Region::Charset.range()].copy_from_slice(&FONT);
        Mem { memory }
    }
}

impl Mem {
    /// Constructs a new Mem, with the font loaded at address 0
    /// # Examples
    /// ```rust
    ///# use chirp_core::*;
    /// let mem = Mem::new();
    /// assert_eq!(0xf0, mem.read(0x000));
    /// assert_eq!(0x00, mem.read(0x200));
    /// ```
    pub fn new() -> Self {
        Mem::default()
    }

    /// The largest program that fits in program space
    pub const fn max_program_len() -> usize {
        MEMORY_SIZE - PROGRAM_START as usize
    }

    /// Copies a program into program space.
    ///
    /// Bytes past the end of the program are left alone.
    /// If the program doesn't fit, returns [Error::OversizeRom] and changes nothing.
    /// # Examples
    /// ```rust
    ///# use chirp_core::*;
    ///# fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_program(b"\x12\x00")?;
    /// assert_eq!(0x1200, mem.read_word(0x200));
    ///
    /// assert!(mem.load_program(&[0; 0xe01]).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let max = Self::max_program_len();
        if rom.len() > max {
            return Err(Error::OversizeRom {
                len: rom.len(),
                max,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(self)
    }

    /// Reads the byte at `addr`, wrapping past the end of memory
    #[inline(always)]
    pub fn read(&self, addr: Adr) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Reads a big-endian word at `addr`. Each byte wraps independently.
    #[inline(always)]
    pub fn read_word(&self, addr: Adr) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Writes the byte at `addr`, wrapping past the end of memory.
    ///
    /// Writes into the interpreter area below [PROGRAM_START] are discarded,
    /// and the (wrapped) target address is returned as the error.
    #[inline(always)]
    pub fn write(&mut self, addr: Adr, data: u8) -> std::result::Result<(), Adr> {
        let addr = addr & ADDRESS_MASK;
        if addr < PROGRAM_START {
            return Err(addr);
        }
        self.memory[addr as usize] = data;
        Ok(())
    }

    /// Gets the entire address space
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }
}
