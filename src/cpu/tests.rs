// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Unit tests for [super::CPU]
//!
//! These call the instruction handlers directly, and check the state they leave behind
//!
//! General test format:
//! 1. Prepare to do the thing
//! 2. Do the thing
//! 3. Compare the result to the expected result

use super::*;
use rand::random;

mod display;

fn setup_environment() -> CPU {
    CPU {
        flags: Flags {
            debug: true,
            ..Default::default()
        },
        ..CPU::default()
    }
}

/// Instruction words that match nothing in the table
mod unimplemented {
    use super::*;

    fn run(word: u16) -> CPU {
        let mut cpu = setup_environment();
        cpu.load_program_bytes(&word.to_be_bytes()).unwrap();
        cpu.step();
        cpu
    }

    #[test]
    fn advances_and_records() {
        for word in [0x0123, 0x500f, 0x800f, 0x900f, 0xe00f, 0xf00f, 0xffff] {
            let mut cpu = run(word);
            assert_eq!(0x202, cpu.pc, "{word:04x} should be stepped over");
            assert_eq!(
                vec![Fault::UnimplementedInstruction { addr: 0x200, word }],
                cpu.take_faults()
            );
        }
    }

    #[test]
    fn still_ticks_timers() {
        let mut cpu = setup_environment();
        cpu.timers.delay = 3;
        cpu.load_program_bytes(b"\xff\xff").unwrap();
        cpu.step();
        assert_eq!(2, cpu.delay());
    }

    #[test]
    fn fault_queue_is_bounded() {
        let mut cpu = CPU::default();
        // a whole program of invalid words
        cpu.load_program_bytes(&[0xff; 0xe00]).unwrap();
        cpu.multistep(FAULT_CAPACITY + 10);
        let faults = cpu.take_faults();
        assert_eq!(FAULT_CAPACITY, faults.len());
        // the oldest were dropped
        assert_eq!(
            Fault::UnimplementedInstruction {
                addr: 0x200 + 2 * 10,
                word: 0xffff
            },
            faults[0]
        );
    }
}

mod sys {
    use super::*;
    /// 00e0: Clears the screen memory to 0
    #[test]
    fn clear_screen() {
        let mut cpu = setup_environment();
        cpu.screen.draw(0, 0, &[0xff; 8], false);
        cpu.screen.take_redraw();
        cpu.clear_screen();
        assert!(cpu.framebuffer().iter().all(|&p| p == 0));
        assert!(cpu.take_redraw());
        assert_eq!(0x202, cpu.pc);
    }

    /// 00ee: Returns from subroutine
    #[test]
    fn ret() {
        let test_addr = random::<u16>() & 0x7fe;
        let mut cpu = setup_environment();
        // Place the address on the stack
        cpu.stack[0] = test_addr;
        cpu.sp = 1;

        cpu.ret();

        // Verify the current address is just past the address from the stack
        assert_eq!(test_addr + 2, cpu.pc);
        assert_eq!(0, cpu.sp);
    }

    /// 00ee: Returning with nothing on the stack steps over the return
    #[test]
    fn ret_underflow() {
        let mut cpu = setup_environment();
        cpu.pc = 0x340;
        cpu.ret();
        assert_eq!(0x342, cpu.pc);
        assert_eq!(0, cpu.sp);
        assert_eq!(
            vec![Fault::StackUnderflow { addr: 0x340 }],
            cpu.take_faults()
        );
    }
}

/// Tests control-flow instructions
///
/// Basically anything that touches the program counter
mod cf {
    use super::*;
    /// 1aaa: Sets the program counter to an absolute address
    #[test]
    fn jump() {
        let mut cpu = setup_environment();
        // Test all valid addresses
        for addr in 0x000..0x1000 {
            // Jump to an address
            cpu.jump(addr);
            // Verify the current address is the jump target address
            assert_eq!(addr, cpu.pc);
        }
    }

    /// 2aaa: Pushes pc onto the stack, then jumps to a
    #[test]
    fn call() {
        let test_addr = random::<u16>() & 0xfff;
        let mut cpu = setup_environment();
        // Save the current address
        let curr_addr = cpu.pc;
        // Call an address
        cpu.call(test_addr);
        // Verify the current address is the called address
        assert_eq!(test_addr, cpu.pc);
        // Verify the address of the call itself was stored on the stack
        assert_eq!(&[curr_addr], cpu.stack());
    }

    /// 2aaa: A seventeenth nested call is not taken
    #[test]
    fn call_overflow() {
        let mut cpu = setup_environment();
        for depth in 0..STACK_SIZE as u16 {
            cpu.pc = 0x300 + 2 * depth;
            cpu.call(0x400);
        }
        assert_eq!(STACK_SIZE, cpu.sp);
        cpu.pc = 0x500;
        cpu.call(0x600);
        assert_eq!(0x502, cpu.pc);
        assert_eq!(STACK_SIZE, cpu.sp);
        assert_eq!(vec![Fault::StackOverflow { addr: 0x500 }], cpu.take_faults());
        // the stack is intact
        assert_eq!(0x300 + 2 * 15, cpu.stack()[15]);
    }

    /// 3xbb: Skips the next instruction if register X == b
    #[test]
    fn skip_equals_immediate() {
        let mut cpu = setup_environment();
        for word in 0..=0xfff {
            let (a, b, addr) = (word as u8, (word >> 4) as u8, random::<u16>() & 0x7fe);
            let x = word as Reg >> 8;
            cpu.pc = addr;
            cpu.v[x] = a;

            cpu.skip_equals_immediate(x, b);

            assert_eq!(cpu.pc, addr + if a == b { 4 } else { 2 });
        }
    }

    /// 4xbb: Skips the next instruction if register X != b
    #[test]
    fn skip_not_equals_immediate() {
        let mut cpu = setup_environment();
        for word in 0..=0xfff {
            let (a, b, addr) = (word as u8, (word >> 4) as u8, random::<u16>() & 0x7fe);
            let x = word as Reg >> 8;
            cpu.pc = addr;
            cpu.v[x] = a;

            cpu.skip_not_equals_immediate(x, b);

            assert_eq!(cpu.pc, addr + if a != b { 4 } else { 2 });
        }
    }

    /// 5xy0: Skips the next instruction if register X == register Y
    /// 9xy0: Skips the next instruction if register X != register Y
    #[test]
    fn skip_register_compare() {
        let mut cpu = setup_environment();
        for (a, b) in [(0u8, 0u8), (5, 5), (5, 6), (0xff, 0)] {
            cpu.v[0x3] = a;
            cpu.v[0xc] = b;
            cpu.pc = 0x200;
            cpu.skip_equals(0x3, 0xc);
            assert_eq!(cpu.pc, if a == b { 0x204 } else { 0x202 });
            cpu.pc = 0x200;
            cpu.skip_not_equals(0x3, 0xc);
            assert_eq!(cpu.pc, if a != b { 0x204 } else { 0x202 });
        }
    }

    /// Baaa: Jumps to the address plus v0
    #[test]
    fn jump_indexed() {
        let mut cpu = setup_environment();
        cpu.v[0] = 0x20;
        cpu.v[3] = 0x40;
        cpu.jump_indexed(0x300);
        assert_eq!(0x320, cpu.pc);
        // Super Chip: uses the register named by the high nibble
        cpu.flags.quirks.jump_vx = true;
        cpu.jump_indexed(0x300);
        assert_eq!(0x340, cpu.pc);
    }
}

mod math {
    use super::*;
    /// 6xbb: Loads immediate byte b into register vX
    #[test]
    fn load_immediate() {
        let mut cpu = setup_environment();
        for test_register in 0x0..=0xf {
            for test_byte in 0x0..=0xff {
                cpu.load_immediate(test_register, test_byte);
                assert_eq!(cpu.v[test_register], test_byte)
            }
        }
    }

    /// 7xbb: Adds immediate byte b to register vX, wrapping, without touching vF
    #[test]
    fn add_immediate() {
        let mut cpu = setup_environment();
        for x in 0x0..0xf {
            for (start, byte) in [(0u8, 1u8), (0xff, 0x01), (0xf0, 0x20)] {
                cpu.v[0xf] = 0xaa;
                cpu.v[x] = start;
                cpu.add_immediate(x, byte);
                assert_eq!(start.wrapping_add(byte), cpu.v[x]);
                assert_eq!(0xaa, cpu.v[0xf]);
            }
        }
    }

    /// 8xy0: Loads the value of y into x
    #[test]
    fn load() {
        let mut cpu = setup_environment();
        cpu.v[0x2] = 0x99;
        cpu.load(0x1, 0x2);
        assert_eq!(0x99, cpu.v[0x1]);
        assert_eq!(0x202, cpu.pc);
    }

    /// 8xy1, 8xy2, 8xy3: bitwise ops leave vF alone
    #[test]
    fn bitwise() {
        let mut cpu = setup_environment();
        for (a, b) in [(0x0fu8, 0xf0u8), (0xaa, 0x55), (0xff, 0x0f)] {
            type Op = fn(&mut CPU, Reg, Reg);
            let ops: [(Op, u8); 3] = [
                (CPU::or, a | b),
                (CPU::and, a & b),
                (CPU::xor, a ^ b),
            ];
            for (op, expected) in ops {
                cpu.v[0x1] = a;
                cpu.v[0x2] = b;
                cpu.v[0xf] = 0xcc;
                op(&mut cpu, 0x1, 0x2);
                assert_eq!(expected, cpu.v[0x1]);
                assert_eq!(0xcc, cpu.v[0xf]);
            }
        }
    }

    /// 8xy1: Cosmac VIP resets vF
    #[test]
    fn bitwise_quirk() {
        let mut cpu = setup_environment();
        cpu.flags.quirks.bin_ops = true;
        cpu.v[0xf] = 0xcc;
        cpu.or(0x1, 0x2);
        assert_eq!(0, cpu.v[0xf]);
    }

    /// 8xy4: Performs addition of vX and vY, and stores the result in vX
    #[test]
    fn add() {
        let mut cpu = setup_environment();
        for word in 0..=0xffff {
            let (a, b) = (word as u8, (word >> 8) as u8);
            let (x, y) = (0x1, 0x2);
            cpu.v[x] = a;
            cpu.v[y] = b;

            cpu.add(x, y);

            let sum = a as u16 + b as u16;
            assert_eq!(cpu.v[x], sum as u8);
            assert_eq!(cpu.v[0xf], (sum > 0xff) as u8);
        }
    }

    /// 8xy4: 250 + 10 carries
    #[test]
    fn add_carry() {
        let mut cpu = setup_environment();
        cpu.v[0x1] = 250;
        cpu.v[0x2] = 10;
        cpu.add(0x1, 0x2);
        assert_eq!((4, 1, 0x202), (cpu.v[0x1], cpu.v[0xf], cpu.pc));
    }

    /// 8xy4: with vF as the destination, the sum wins over the carry
    #[test]
    fn add_into_flag() {
        let mut cpu = setup_environment();
        cpu.v[0xf] = 0xff;
        cpu.v[0x1] = 0x02;
        cpu.add(0xf, 0x1);
        assert_eq!(0x01, cpu.v[0xf]);
    }

    /// 8xy5: Performs subtraction of vX and vY, and stores the result in vX
    #[test]
    fn sub() {
        let mut cpu = setup_environment();
        for word in 0..=0xffff {
            let (a, b) = (word as u8, (word >> 8) as u8);
            let (x, y) = (0xa, 0xb);
            cpu.v[x] = a;
            cpu.v[y] = b;

            cpu.sub(x, y);

            assert_eq!(cpu.v[x], a.wrapping_sub(b));
            assert_eq!(cpu.v[0xf], (a > b) as u8);
        }
    }

    /// 8xy5: 5 - 10 borrows; equal operands also report a borrow
    #[test]
    fn sub_borrow() {
        let mut cpu = setup_environment();
        cpu.v[0x1] = 5;
        cpu.v[0x2] = 10;
        cpu.sub(0x1, 0x2);
        assert_eq!((251, 0), (cpu.v[0x1], cpu.v[0xf]));
        cpu.v[0x1] = 7;
        cpu.v[0x2] = 7;
        cpu.sub(0x1, 0x2);
        assert_eq!((0, 0), (cpu.v[0x1], cpu.v[0xf]));
    }

    /// 8xy6: Performs bitwise right shift of vX
    #[test]
    fn shift_right() {
        let mut cpu = setup_environment();
        for word in 0..=0xff {
            let x = 0x5;
            cpu.v[x] = word;
            cpu.shift_right(x, 0x6);
            assert_eq!(cpu.v[x], word >> 1);
            assert_eq!(cpu.v[0xf], word & 1);
        }
        cpu.v[0x1] = 0b0000_0011;
        cpu.shift_right(0x1, 0x2);
        assert_eq!((1, 1), (cpu.v[0x1], cpu.v[0xf]));
    }

    /// 8xy6: Cosmac VIP shifts vY into vX
    #[test]
    fn shift_right_quirk() {
        let mut cpu = setup_environment();
        cpu.flags.quirks.shift = true;
        cpu.v[0x1] = 0;
        cpu.v[0x2] = 0b101;
        cpu.shift_right(0x1, 0x2);
        assert_eq!((0b10, 1, 0b101), (cpu.v[0x1], cpu.v[0xf], cpu.v[0x2]));
    }

    /// 8xy7: Performs subtraction of vY and vX, and stores the result in vX
    #[test]
    fn backwards_sub() {
        let mut cpu = setup_environment();
        for word in 0..=0xffff {
            let (a, b) = (word as u8, (word >> 8) as u8);
            let (x, y) = (0x3, 0x4);
            cpu.v[x] = a;
            cpu.v[y] = b;

            cpu.backwards_sub(x, y);

            assert_eq!(cpu.v[x], b.wrapping_sub(a));
            assert_eq!(cpu.v[0xf], (b > a) as u8);
        }
    }

    /// 8xyE: Performs bitwise left shift of vX
    #[test]
    fn shift_left() {
        let mut cpu = setup_environment();
        for word in 0..=0xff {
            let x = 0x7;
            cpu.v[x] = word;
            cpu.shift_left(x, 0x8);
            assert_eq!(cpu.v[x], word << 1);
            assert_eq!(cpu.v[0xf], word >> 7);
        }
    }
}

mod i {
    use super::*;
    /// Aaaa: Load address #a into register I
    #[test]
    fn load_i_immediate() {
        let mut cpu = setup_environment();
        for addr in 0..0x1000 {
            cpu.load_i_immediate(addr);
            assert_eq!(cpu.i, addr);
        }
    }

    /// Fx1e: Add vX to I
    #[test]
    fn add_i() {
        let mut cpu = setup_environment();
        cpu.i = 0x2fe;
        cpu.v[0x9] = 0x04;
        cpu.add_i(0x9);
        assert_eq!(0x302, cpu.i);
    }

    /// Fx29: Points I at the glyph for vX
    #[test]
    fn load_sprite() {
        let mut cpu = setup_environment();
        for digit in 0..=0xf {
            cpu.v[0x0] = digit;
            cpu.load_sprite(0x0);
            assert_eq!(5 * digit as Adr, cpu.i);
            assert_eq!(
                &mem::FONT[5 * digit as usize..5 * digit as usize + 5],
                &cpu.memory()[cpu.i as usize..cpu.i as usize + 5]
            );
        }
        // digits past 0xf are not masked
        cpu.v[0x0] = 0x1a;
        cpu.load_sprite(0x0);
        assert_eq!(5 * 0x1a, cpu.i);
    }
}

mod random_byte {
    use super::*;
    /// Cxbb: Stores a random number & the provided byte into vX
    #[test]
    fn rand() {
        let mut cpu = setup_environment();
        for mask in [0x00, 0x0f, 0xf0, 0x81] {
            for _ in 0..64 {
                cpu.rand(0x4, mask);
                assert_eq!(0, cpu.v[0x4] & !mask);
            }
        }
    }
}

mod io {
    use super::*;

    /// Dxyn: Draws a sprite from &I, clearing then setting vF
    #[test]
    fn draw_collision() {
        let mut cpu = setup_environment();
        cpu.i = 0x300;
        cpu.mem.write(0x300, 0x80).unwrap();
        cpu.v[0xf] = 1;
        cpu.draw(0x0, 0x1, 1);
        assert_eq!(0, cpu.v[0xf]);
        assert_eq!(1, cpu.screen.pixel(0, 0));
        cpu.draw(0x0, 0x1, 1);
        assert_eq!(1, cpu.v[0xf]);
        assert_eq!(0, cpu.screen.pixel(0, 0));
        assert_eq!(0x204, cpu.pc);
    }

    /// Dxyn: A zero-row draw still asks for a redraw
    #[test]
    fn draw_empty() {
        let mut cpu = setup_environment();
        cpu.draw(0x0, 0x0, 0);
        assert!(cpu.take_redraw());
        assert!(cpu.framebuffer().iter().all(|&p| p == 0));
    }

    /// Dxyn: vF is cleared before the origin is read
    #[test]
    fn draw_origin_in_flag() {
        let mut cpu = setup_environment();
        cpu.i = 0x300;
        cpu.mem.write(0x300, 0x80).unwrap();
        cpu.v[0xf] = 10;
        cpu.draw(0xf, 0xf, 1);
        assert_eq!(1, cpu.screen.pixel(0, 0));
    }

    /// Dxyn: rows past the end of memory wrap to the font
    #[test]
    fn draw_reads_wrap() {
        let mut cpu = setup_environment();
        cpu.i = 0xfff;
        cpu.draw(0x0, 0x0, 2);
        // row 1 comes from 0x000, the top of the '0' glyph
        assert_eq!(
            [1u8, 1, 1, 1, 0, 0, 0, 0],
            cpu.framebuffer()[64..72]
        );
    }

    /// Ex9E, ExA1: skip on the key named by vX
    #[test]
    fn skip_key() {
        let mut cpu = setup_environment();
        cpu.v[0x2] = 0xb;
        for pressed in [false, true] {
            cpu.set_key(0xb, pressed);
            cpu.pc = 0x200;
            cpu.skip_key_equals(0x2);
            assert_eq!(if pressed { 0x204 } else { 0x202 }, cpu.pc);
            cpu.pc = 0x200;
            cpu.skip_key_not_equals(0x2);
            assert_eq!(if pressed { 0x202 } else { 0x204 }, cpu.pc);
        }
    }

    /// Fx07, Fx15, Fx18: timer transfers
    #[test]
    fn timers() {
        let mut cpu = setup_environment();
        cpu.v[0x1] = 0x30;
        cpu.v[0x2] = 0x40;
        cpu.store_delay_timer(0x1);
        cpu.store_sound_timer(0x2);
        assert_eq!((0x30, 0x40), (cpu.delay(), cpu.sound()));
        cpu.timers.tick();
        cpu.load_delay_timer(0x3);
        assert_eq!(0x2f, cpu.v[0x3]);
        assert_eq!(0x206, cpu.pc);
    }

    /// Fx0A: waits in place until a key is held
    #[test]
    fn wait_for_key() {
        let mut cpu = setup_environment();
        cpu.wait_for_key(0x4);
        assert_eq!(0x200, cpu.pc);
        assert!(cpu.flags.keypause);
        cpu.set_key(0xe, true);
        cpu.set_key(0x9, true);
        cpu.wait_for_key(0x4);
        assert_eq!(0x202, cpu.pc);
        assert_eq!(0x9, cpu.v[0x4]);
        assert!(!cpu.flags.keypause);
    }

    /// Fx33: BCD convert X into I`[0..3]`
    #[test]
    fn bcd_convert() {
        for test in 0..=0xffu8 {
            let mut cpu = setup_environment();
            cpu.i = 0x400;
            cpu.v[0x5] = test;
            cpu.bcd_convert(0x5);
            assert_eq!(
                [test / 100, test / 10 % 10, test % 10],
                cpu.memory()[0x400..0x403]
            );
        }
    }

    /// Fx33: writes below 0x200 are refused
    #[test]
    fn bcd_convert_protected() {
        let mut cpu = setup_environment();
        cpu.i = 0x1ff;
        cpu.v[0x0] = 123;
        cpu.bcd_convert(0x0);
        assert_eq!(&[2, 3], &cpu.memory()[0x200..0x202]);
        assert_eq!(
            vec![Fault::ProtectedWrite {
                addr: 0x200,
                target: 0x1ff
            }],
            cpu.take_faults()
        );
        assert_eq!(mem::FONT.as_slice(), &cpu.memory()[..0x50]);
    }

    /// Fx55, Fx65: DMA Stor/Load from I to registers 0..=X
    #[test]
    fn dma_round_trip() {
        let mut cpu = setup_environment();
        let data: [u8; 16] = random();
        cpu.v = data;
        cpu.i = 0x800;
        cpu.store_dma(0x3);
        assert_eq!(&data[..4], &cpu.memory()[0x800..0x804]);
        assert_eq!(0, cpu.memory()[0x804]);
        cpu.v = [0; 16];
        cpu.load_dma(0x3);
        assert_eq!(&data[..4], &cpu.v[..4]);
        assert_eq!([0u8; 12], cpu.v[4..]);
        assert_eq!(0x800, cpu.i);
    }

    /// Fx55: Cosmac VIP leaves I past the transfer
    #[test]
    fn dma_quirk() {
        let mut cpu = setup_environment();
        cpu.flags.quirks.dma_inc = true;
        cpu.i = 0x800;
        cpu.store_dma(0xf);
        assert_eq!(0x810, cpu.i);
        cpu.load_dma(0x0);
        assert_eq!(0x811, cpu.i);
    }
}

mod state {
    use super::*;

    #[test]
    fn reset_keeps_memory_and_quirks() {
        let mut cpu = CPU::with_mode(Mode::Vip);
        cpu.load_program_bytes(b"\x60\xff\xf0\x15\x22\x00").unwrap();
        cpu.multistep(3);
        cpu.set_key(0x1, true);
        cpu.reset();
        assert_eq!(CPU::with_mode(Mode::Vip).v, cpu.v);
        assert_eq!(0x200, cpu.pc());
        assert_eq!(0, cpu.sp());
        assert_eq!(0, cpu.delay());
        assert_eq!(0, cpu.cycle());
        assert!(!cpu.keys().is_pressed(0x1));
        assert!(cpu.flags.quirks.shift);
        assert_eq!(0x60, cpu.memory()[0x200]);
    }

    #[test]
    fn debug_format() {
        let cpu = setup_environment();
        let text = format!("{cpu:?}");
        assert!(text.starts_with("CPU"));
        cpu.dump();
    }
}
