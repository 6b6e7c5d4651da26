//! Controls the [Quirks] behavior of the CPU on a granular level.

use super::Mode;

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` everywhere is the plain Chip-8 behavior this crate documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// Cosmac VIP: Binary ops in `8xy`(`1`, `2`, `3`) set vF to 0
    pub bin_ops: bool,
    /// Cosmac VIP: Shift ops in `8xy`(`6`, `E`) source from vY instead of vX
    pub shift: bool,
    /// Cosmac VIP: DMA instructions `Fx55`/`Fx65` change I to I + x + 1
    pub dma_inc: bool,
    /// Super Chip: Indexed jump instructions go to `adr` + v`x`, where `x` is the high nibble of `adr`
    pub jump_vx: bool,
    /// Sprites are clipped at the right and bottom edges instead of wrapping
    pub clip: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            bin_ops: value,
            shift: value,
            dma_inc: value,
            jump_vx: value,
            clip: value,
        }
    }
}

impl From<Mode> for Quirks {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Chip8 => Quirks::default(),
            Mode::Vip => Quirks {
                bin_ops: true,
                shift: true,
                dma_inc: true,
                clip: true,
                ..Default::default()
            },
            Mode::SChip => Quirks {
                jump_vx: true,
                clip: true,
                ..Default::default()
            },
        }
    }
}
