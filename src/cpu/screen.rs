// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 monochrome framebuffer, one byte per pixel, row-major.
///
/// Every pixel is exactly 0 or 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pixels: Vec<u8>,
    redraw: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            pixels: vec![0; WIDTH * HEIGHT],
            redraw: false,
        }
    }
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen::default()
    }

    /// Gets the pixel at (x, y), wrapping both coordinates
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut screen = Screen::new();
    /// screen.draw(63, 0, &[0b1100_0000], false);
    /// assert_eq!(1, screen.pixel(63, 0));
    /// assert_eq!(1, screen.pixel(0, 0));
    /// assert_eq!(1, screen.pixel(64, 32));
    /// ```
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }

    /// Gets the whole framebuffer, indexed by `y * WIDTH + x`
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reports whether the screen has changed since the last call, and resets the latch
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Sets every pixel to 0
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.redraw = true;
    }

    /// XORs an 8-pixel-wide sprite onto the screen, one byte per row,
    /// most significant bit leftmost. Returns true if any lit pixel was turned off.
    ///
    /// The origin always wraps. When `clip` is set, pixels that would land past the
    /// right or bottom edge are dropped instead of wrapping to the opposite edge.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8], clip: bool) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut collision = false;
        for (row, &line) in sprite.iter().enumerate() {
            let py = y + row;
            if clip && py >= HEIGHT {
                break;
            }
            for col in (0..8).filter(|col| line & (0x80 >> col) != 0) {
                let px = x + col;
                if clip && px >= WIDTH {
                    break;
                }
                let pixel = &mut self.pixels[(py % HEIGHT) * WIDTH + px % WIDTH];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }
        self.redraw = true;
        collision
    }

    /// Prints the screen to stdout
    pub fn print(&self) {
        // draw with the drawille library, if available
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            self.pixels
                .iter()
                .enumerate()
                .filter(|(_, &pixel)| pixel != 0)
                .for_each(|(index, _)| {
                    canvas.set((index % WIDTH) as u32, (index / WIDTH) as u32)
                });
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, row) in self.pixels.chunks_exact(WIDTH).enumerate() {
            write!(f, "{index:02}|")?;
            for &pixel in row {
                write!(f, "{}", if pixel != 0 { '█' } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
