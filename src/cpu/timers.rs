// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The delay and sound timers

/// Two independent countdown counters.
///
/// The CPU ticks both once per executed instruction. Neither ever counts below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    /// Delay timer, readable by programs
    pub delay: u8,
    /// Sound timer. The host plays a tone while this is nonzero.
    pub sound: u8,
}

impl Timers {
    /// Decrements each nonzero timer by one
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut timers = Timers { delay: 1, sound: 0 };
    /// timers.tick();
    /// assert_eq!(Timers { delay: 0, sound: 0 }, timers);
    /// ```
    #[inline(always)]
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// True while the sound timer is running
    pub fn beeping(&self) -> bool {
        self.sound != 0
    }
}
