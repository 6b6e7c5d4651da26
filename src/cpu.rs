// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions

#[cfg(test)]
mod tests;

pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod mode;
pub mod quirks;
pub mod screen;
pub mod timers;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::{Mem, PROGRAM_START},
    mode::Mode,
    quirks::Quirks,
    screen::Screen,
    timers::Timers,
};
use crate::error::{Fault, Result};
use imperative_rs::InstructionSet;
use owo_colors::OwoColorize;
use std::{collections::VecDeque, fmt::Debug};

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Number of return addresses the stack can hold
pub const STACK_SIZE: usize = 16;
/// Number of unread [Fault]s kept before the oldest is dropped
pub const FAULT_CAPACITY: usize = 64;

/// Represents the entire state of the interpreter
#[derive(Clone, PartialEq)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks] and debug mode.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: [Adr; STACK_SIZE],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // I/O
    keys: Keypad,
    // Execution data
    cycle: usize,
    faults: VecDeque<Fault>,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the provided [Flags]
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let cpu = CPU::new(Flags {
    ///     quirks: Mode::Vip.into(),
    ///     ..Default::default()
    /// });
    /// assert!(cpu.flags.quirks.shift);
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            ..Default::default()
        }
    }

    /// Constructs a new CPU imitating the quirks of the given [Mode]
    pub fn with_mode(mode: Mode) -> Self {
        Self::new(Flags {
            quirks: Quirks::from(mode),
            ..Default::default()
        })
    }

    /// Loads a program into the CPU's program space from a file
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space, starting at `0x200`.
    ///
    /// If `rom` is longer than `0xe00` bytes, returns
    /// [Error::OversizeRom](crate::Error::OversizeRom) and leaves the CPU untouched.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// assert!(cpu.load_program_bytes(&[0; 0xe00]).is_ok());
    /// assert!(cpu.load_program_bytes(&[0; 0xe01]).is_err());
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        log::debug!("loaded {} byte program at {PROGRAM_START:03x}", rom.len());
        Ok(self)
    }

    /// Sets the state of key `0x0..=0xF`, and reports whether the key's state changed.
    ///
    /// Keys outside that range are ignored.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// assert!(cpu.set_key(0x7, true));
    /// // it was already pressed, so nothing's changed.
    /// assert!(!cpu.set_key(0x7, true));
    /// // there is no key 0x21
    /// assert!(!cpu.set_key(0x21, true));
    /// ```
    pub fn set_key(&mut self, key: usize, pressed: bool) -> bool {
        self.keys.set(key, pressed)
    }

    /// Gets the framebuffer, one byte per pixel, indexed by `y * 64 + x`
    pub fn framebuffer(&self) -> &[u8] {
        self.screen.pixels()
    }

    /// Gets the [Screen]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Reports whether the screen changed since the last call, and clears the report
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(b"\x00\xe0").unwrap();
    /// assert!(!cpu.take_redraw());
    /// cpu.step();
    /// assert!(cpu.take_redraw());
    /// assert!(!cpu.take_redraw());
    /// ```
    pub fn take_redraw(&mut self) -> bool {
        self.screen.take_redraw()
    }

    /// Drains every [Fault] raised since the last call, oldest first
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(b"\xff\xff").unwrap();
    /// cpu.step();
    /// assert_eq!(
    ///     vec![Fault::UnimplementedInstruction { addr: 0x200, word: 0xffff }],
    ///     cpu.take_faults()
    /// );
    /// assert_eq!(0x202, cpu.pc());
    /// assert!(cpu.take_faults().is_empty());
    /// ```
    pub fn take_faults(&mut self) -> Vec<Fault> {
        self.faults.drain(..).collect()
    }

    /// Gets a slice of the entire general purpose registers
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(b"\x60\x41").unwrap();
    /// cpu.step();
    /// assert_eq!(
    ///     cpu.v(),
    ///     [0x41, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
    /// )
    /// ```
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the number of return addresses on the stack
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the return addresses on the stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        &self.stack[..self.sp]
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.timers.delay
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.timers.sound
    }

    /// True while the host should be playing a tone
    pub fn beeping(&self) -> bool {
        self.timers.beeping()
    }

    /// Gets the state of the keypad
    pub fn keys(&self) -> &Keypad {
        &self.keys
    }

    /// Gets the entire address space
    pub fn memory(&self) -> &[u8] {
        self.mem.as_slice()
    }

    /// Gets the number of steps the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Resets the emulator.
    ///
    /// Touches the registers, stack, timers, screen, keys, faults, cycle count,
    /// and [Flags::keypause].
    ///
    /// Does not touch memory, [Quirks], or [Flags::debug].
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(b"\x12\x34").unwrap();
    /// cpu.step();
    /// assert_eq!(0x234, cpu.pc());
    /// cpu.reset();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(0x12, cpu.memory()[0x200]);
    /// ```
    pub fn reset(&mut self) {
        *self = CPU {
            flags: Flags {
                keypause: false,
                ..self.flags
            },
            mem: std::mem::take(&mut self.mem),
            disassembler: self.disassembler,
            ..Default::default()
        }
    }

    /// Runs `steps` instructions, ticking the timers after each
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jp $202 (pc)
    /// ]).unwrap();
    /// cpu.multistep(0x20);
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// ```
    pub fn multistep(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.step();
        }
        self
    }

    /// Executes a single instruction, then ticks the timers.
    ///
    /// Never fails. An instruction word that matches nothing is skipped over,
    /// and recorded as a [Fault::UnimplementedInstruction].
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jp $202 (pc)
    /// ]).unwrap();
    /// cpu.step();
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    pub fn step(&mut self) -> &mut Self {
        self.cycle += 1;
        // fetch opcode
        let word = self.mem.read_word(self.pc);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                self.pc,
                self.disassembler.once(word)
            );
        }

        // decode opcode
        match Insn::decode(&word.to_be_bytes()) {
            Ok((_, insn)) => self.execute(insn),
            Err(_) => {
                self.fault(Fault::UnimplementedInstruction {
                    addr: self.pc,
                    word,
                });
                self.advance();
            }
        }

        self.timers.tick();
        self
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.sp,
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay,
            self.timers.sound,
            self.cycle,
        );
    }
}

// internal helpers shared by the instruction handlers
impl CPU {
    /// Records a [Fault], dropping the oldest if the queue is full
    fn fault(&mut self, fault: Fault) {
        log::warn!("{fault}");
        if self.flags.debug {
            std::eprintln!("{}", fault.bold().red());
        }
        if self.faults.len() == FAULT_CAPACITY {
            self.faults.pop_front();
        }
        self.faults.push_back(fault);
    }

    /// Moves on to the next instruction
    #[inline(always)]
    fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves past the next instruction if `condition` holds, otherwise onto it
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        self.pc = self.pc.wrapping_add(if condition { 4 } else { 2 });
    }

    /// Writes `data` to `I + offset`, recording a fault if the write was refused
    #[inline(always)]
    fn store(&mut self, offset: Adr, data: u8) {
        if let Err(target) = self.mem.write(self.i.wrapping_add(offset), data) {
            self.fault(Fault::ProtectedWrite {
                addr: self.pc,
                target,
            });
        }
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack())
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    /// | flags  | all off | No debug output, no quirks.
    ///
    /// # Examples
    /// ```rust
    /// use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: [0; STACK_SIZE],
            sp: 0,
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            timers: Timers::default(),
            keys: Keypad::default(),
            cycle: 0,
            faults: VecDeque::with_capacity(FAULT_CAPACITY),
            disassembler: Dis::default(),
        }
    }
}
