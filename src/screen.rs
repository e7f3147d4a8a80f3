// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome framebuffer, one byte (0 or 1) per pixel,
/// plus a flag raised whenever the picture changes
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: Vec<u8>,
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Screen {
            pixels: vec![0; WIDTH * HEIGHT],
            dirty: false,
        }
    }
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the raw pixels, row-major, one byte per pixel
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Gets the pixel at (x, y). Coordinates outside the screen are unset.
    /// # Examples
    /// ```rust
    /// # use ch8::screen::Screen;
    /// let screen = Screen::new();
    /// assert!(!screen.get(0, 0));
    /// assert!(!screen.get(64, 32));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.pixels[y * WIDTH + x] != 0
    }

    /// Returns true if the screen changed since the host last took the flag
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Reads and clears the redraw flag
    /// # Examples
    /// ```rust
    /// # use ch8::screen::Screen;
    /// let mut screen = Screen::new();
    /// screen.clear();
    /// assert!(screen.take_dirty());
    /// assert!(!screen.take_dirty());
    /// ```
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Sets every pixel to 0, and marks the screen for redraw
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.dirty = true;
    }

    /// XORs one lit sprite pixel into the flattened pixel `index`, which wraps
    /// around the whole framebuffer. Returns true if a set pixel was erased.
    #[inline(always)]
    pub(crate) fn flip(&mut self, index: usize) -> bool {
        let pixel = &mut self.pixels[index % (WIDTH * HEIGHT)];
        let collided = *pixel == 1;
        *pixel ^= 1;
        collided
    }

    /// Marks the screen for redraw
    pub(crate) fn touch(&mut self) {
        self.dirty = true;
    }

    /// Prints the screen to stdout
    ///
    /// Uses braille characters when the `drawille` feature is enabled,
    /// and block characters otherwise.
    pub fn print_screen(&self) {
        println!("{}", self.render());
    }

    /// Renders the screen with braille characters
    #[cfg(feature = "drawille")]
    pub fn render(&self) -> String {
        use drawille::Canvas;
        let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, pixel)| **pixel != 0)
            .for_each(|(index, _)| canvas.set((index % WIDTH) as u32, (index / WIDTH) as u32));
        canvas.frame()
    }

    /// Renders the screen with block characters
    #[cfg(not(feature = "drawille"))]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Screen {
    /// Draws the screen with one block character per pixel
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for row in self.pixels.chunks(WIDTH) {
            for &pixel in row {
                write!(f, "{}", if pixel != 0 { '█' } else { ' ' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Screen")
            .field("lit", &self.pixels.iter().filter(|&&p| p != 0).count())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank_and_clean() {
        let screen = Screen::new();
        assert_eq!(WIDTH * HEIGHT, screen.pixels().len());
        assert!(screen.pixels().iter().all(|&p| p == 0));
        assert!(!screen.is_dirty());
    }

    #[test]
    fn flip_reports_collision() {
        let mut screen = Screen::new();
        assert!(!screen.flip(65));
        assert!(screen.get(1, 1));
        assert!(screen.flip(65));
        assert!(!screen.get(1, 1));
    }

    #[test]
    fn flip_wraps_flattened_index() {
        let mut screen = Screen::new();
        screen.flip(WIDTH * HEIGHT + 3);
        assert!(screen.get(3, 0));
    }

    #[test]
    fn clear_marks_dirty() {
        let mut screen = Screen::new();
        screen.flip(0);
        screen.clear();
        assert!(!screen.get(0, 0));
        assert!(screen.is_dirty());
    }

    #[test]
    fn display_has_one_line_per_row() {
        let mut screen = Screen::new();
        screen.flip(0);
        let text = screen.to_string();
        assert_eq!(HEIGHT, text.lines().count());
        assert!(text.starts_with('█'));
    }

    #[test]
    fn print_screen() {
        let mut screen = Screen::new();
        screen.flip(WIDTH + 1);
        screen.print_screen();
    }
}
