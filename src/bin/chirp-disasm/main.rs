use chirp_core::{Dis, Disassembler, Result};
use gumdrop::*;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(
        help = "Load address (usually 200)",
        parse(try_from_str = "parse_hex"),
        default = "200"
    )]
    pub loadaddr: u16,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let start = options.offset.min(contents.len());
    let base = options.loadaddr.wrapping_add(start as u16);
    for line in Dis::default().listing(&contents[start..], base) {
        println!("{line}");
    }
    Ok(())
}
