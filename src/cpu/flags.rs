//! Represents flags that aid in implementation but aren't a part of the Chip-8 machine

use super::Quirks;

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// Set while the emulator is re-executing a key wait
    pub keypause: bool,
    /// Represents the set of emulator [Quirks] to enable
    pub quirks: Quirks,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.debug);
    /// // Toggle debug mode
    /// cpu.flags.debug();
    /// assert_eq!(true, cpu.flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }
}
