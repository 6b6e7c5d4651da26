// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use imperative_rs::InstructionSet;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;

    /// Disassemble a run of bytes loaded at `base`, one line per 2-byte word.
    ///
    /// A trailing odd byte is ignored.
    fn listing(&self, bytes: &[u8], base: u16) -> Vec<String> {
        bytes
            .chunks_exact(2)
            .enumerate()
            .map(|(idx, word)| {
                let word = u16::from_be_bytes([word[0], word[1]]);
                let addr = base.wrapping_add(2 * idx as u16);
                format!("{addr:03x}: {} {:04x}", self.once(word), word.bright_black())
            })
            .collect()
    }
}

/// Decodes an instruction word, if it names an [Insn]
pub fn decode(word: u16) -> Option<Insn> {
    Insn::decode(&word.to_be_bytes()).ok().map(|(_, insn)| insn)
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
        }
    }
}

impl Dis {
    /// A disassembler that emits no color codes
    pub fn plain() -> Self {
        Self {
            invalid: Style::new(),
            normal: Style::new(),
        }
    }
}

impl Disassembler for Dis {
    fn once(&self, insn: u16) -> String {
        if let Some(insn) = decode(insn) {
            format!("{}", insn.style(self.normal))
        } else {
            format!("{}", format_args!("inval  {insn:04x}").style(self.invalid))
        }
    }
}
