// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements the core of a Chip-8 interpreter: the machine state,
//! the instruction decoder and dispatcher, the sprite engine, and the timers.
//!
//! Everything outside the core is left to the host. The host supplies ROM bytes,
//! calls [CPU::step] at whatever rate it likes, forwards key events with
//! [CPU::set_key], and renders [CPU::framebuffer] when [CPU::take_redraw] says so.
//!
//! ```rust
//! # use chirp_core::*;
//! # fn main() -> Result<()> {
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0x60, 0x05, // mov #05, v0
//!     0xf0, 0x29, // font v0, I
//!     0xd1, 0x15, // draw #5, v1, v1
//! ])?;
//! cpu.multistep(3);
//! assert!(cpu.take_redraw());
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;

pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::Mem,
    mode::Mode,
    quirks::Quirks,
    screen::Screen,
    timers::Timers,
    CPU,
};
pub use error::{Error, Fault, Result};

/// The interpreter instance. An alias for [CPU].
pub type Machine = CPU;

/// Common imports for chirp-core
pub mod prelude {
    pub use super::*;
    pub use cpu::{
        mem::{FONT, MEMORY_SIZE, PROGRAM_START},
        screen::{HEIGHT, WIDTH},
    };
}
