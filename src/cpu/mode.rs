//! Selects the compatibility preset of the [super::CPU]

use crate::error::Error;
use std::str::FromStr;

/// Selects which interpreter's [Quirks](super::Quirks) to imitate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Plain Chip-8, no quirks
    #[default]
    Chip8,
    /// Cosmac VIP emulation mode
    Vip,
    /// Chip-48 / Super Chip emulation mode
    SChip,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Mode::Chip8),
            "vip" | "cosmac" => Ok(Mode::Vip),
            "schip" | "superchip" => Ok(Mode::SChip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
