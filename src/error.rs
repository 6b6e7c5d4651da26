// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error types for chirp-core
//!
//! [enum@Error] is returned from the host-facing operations that can fail.
//! [Fault] is never returned: it is recorded by [crate::CPU::step] and
//! execution carries on past it.

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chirp-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The ROM does not fit in program memory
    #[error("rom is {len} bytes, but program space only holds {max}")]
    OversizeRom {
        /// Length of the offending ROM
        len: usize,
        /// Largest ROM that fits
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A non-fatal event raised while stepping the interpreter.
///
/// Each variant carries the address of the instruction that raised it.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fault {
    /// The instruction word matched no entry in the instruction table
    #[error("{addr:03x}: opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// Address of the offending word
        addr: u16,
        /// The offending word
        word: u16,
    },
    /// A call was made with every stack slot in use
    #[error("{addr:03x}: call with a full stack")]
    StackOverflow {
        /// Address of the call
        addr: u16,
    },
    /// A return was made with nothing on the stack
    #[error("{addr:03x}: return with an empty stack")]
    StackUnderflow {
        /// Address of the return
        addr: u16,
    },
    /// An instruction tried to store into the interpreter area below 0x200
    #[error("{addr:03x}: write to protected address {target:03x} discarded")]
    ProtectedWrite {
        /// Address of the storing instruction
        addr: u16,
        /// Where the write was aimed
        target: u16,
    },
}
