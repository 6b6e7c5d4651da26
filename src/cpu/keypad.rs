// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal keypad

/// Pressed/released state of keys `0x0..=0xF`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypad {
    keys: [bool; 16],
}

impl Keypad {
    /// Sets the state of a key, and reports whether it changed.
    ///
    /// Keys outside `0x0..=0xF` are ignored.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut keypad = Keypad::default();
    /// assert!(keypad.set(0x7, true));
    /// // already pressed, so nothing's changed
    /// assert!(!keypad.set(0x7, true));
    /// // no such key
    /// assert!(!keypad.set(0x10, true));
    /// ```
    pub fn set(&mut self, key: usize, pressed: bool) -> bool {
        match self.keys.get_mut(key) {
            Some(state) if *state != pressed => {
                *state = pressed;
                true
            }
            _ => false,
        }
    }

    /// Reports whether a key is held. Only the low nibble of `key` is considered.
    #[inline(always)]
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xf) as usize]
    }

    /// The lowest-numbered key currently held
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }

    /// Gets the state of every key
    pub fn as_slice(&self) -> &[bool] {
        &self.keys
    }
}
