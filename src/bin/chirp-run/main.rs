// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs a Chip-8 ROM headless for a fixed number of cycles,
//! then prints the screen and machine state.

use chirp_core::{Error, Flags, Mode, Quirks, Result, CPU};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
    Ok(())
}

/// Parses a hexadecimal digit into a key index
fn parse_key(value: &str) -> std::result::Result<usize, std::num::ParseIntError> {
    usize::from_str_radix(value, 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chirp.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Trace every instruction as it runs.")]
    pub debug: bool,

    #[options(help = "Run for this many cycles.", default = "1000", meta = "N")]
    pub cycles: usize,

    #[options(
        help = "Hold a key (0-f) down for the whole run.",
        parse(try_from_str = "parse_key"),
        meta = "K"
    )]
    pub key: Vec<usize>,

    #[options(help = "Run in (Chip8, Vip, SChip) mode.")]
    pub mode: Option<Mode>,

    #[options(short = "z", help = "Clear vF after a bitwise operation.")]
    pub vfreset: bool,
    #[options(short = "v", help = "Use Cosmac VIP style bit-shifts, which read vY.")]
    pub shift: bool,
    #[options(short = "c", help = "Advance I past the registers on bulk store and load.")]
    pub memory: bool,
    #[options(
        short = "b",
        help = "Use SUPER-CHIP style indexed jump, which is indexed relative to v[adr]."
    )]
    pub jumping: bool,
    #[options(short = "w", help = "Clip sprites at the screen edges instead of wrapping.")]
    pub clip: bool,
}

impl Arguments {
    fn quirks(&self) -> Quirks {
        let base = Quirks::from(self.mode.unwrap_or_default());
        Quirks {
            bin_ops: base.bin_ops || self.vfreset,
            shift: base.shift || self.shift,
            dma_inc: base.dma_inc || self.memory,
            jump_vx: base.jump_vx || self.jumping,
            clip: base.clip || self.clip,
        }
    }
}

fn run(options: Arguments) -> Result<()> {
    let mut cpu = CPU::new(Flags {
        debug: options.debug,
        quirks: options.quirks(),
        ..Default::default()
    });
    cpu.load_program(&options.file)?;

    for &key in &options.key {
        if key > 0xf {
            return Err(Error::InvalidKey { key });
        }
        cpu.set_key(key, true);
    }

    cpu.multistep(options.cycles);

    cpu.screen().print();
    cpu.dump();
    if cpu.beeping() {
        println!("{}", "BEEP".bright_yellow());
    }
    if cpu.flags.keypause {
        println!("{}", "Waiting for a key press".bright_black());
    }
    for fault in cpu.take_faults() {
        println!("{}", fault.red());
    }
    Ok(())
}
