// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Window IO, using minifb

use ch8::{
    error::Result,
    io::Frontend,
    screen::{Screen, HEIGHT, WIDTH},
    Chip8,
};
use minifb::*;
use std::{
    path::Path,
    time::{Duration, Instant},
};

/// Windows are pumped for input at least this often, even with nothing drawn
const UPDATE_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub name: String,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(rom: impl AsRef<Path>) -> Self {
        let rom = rom.as_ref().file_name().unwrap_or(rom.as_ref().as_os_str());
        UIBuilder {
            name: format!("ch8: {}", rom.to_string_lossy()),
            ..Default::default()
        }
    }
    pub fn build(&self) -> Result<UI> {
        let mut window = Window::new(&self.name, WIDTH, HEIGHT, self.window_options)?;
        // the runner does the pacing
        window.limit_update_rate(None);
        Ok(UI {
            window,
            fb: Default::default(),
            time: Instant::now(),
        })
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            name: "ch8".into(),
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBufferFormat {
    pub fg: u32,
    pub bg: u32,
}

impl Default for FrameBufferFormat {
    fn default() -> Self {
        FrameBufferFormat {
            fg: 0x0011a434,
            bg: 0x001E2431,
        }
    }
}

/// One `0RGB` word per Chip-8 pixel
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    format: FrameBufferFormat,
}

impl FrameBuffer {
    pub fn render(&mut self, screen: &Screen) -> &[u32] {
        for (word, &pixel) in self.buffer.iter_mut().zip(screen.pixels()) {
            *word = if pixel != 0 {
                self.format.fg
            } else {
                self.format.bg
            };
        }
        &self.buffer
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        let format = FrameBufferFormat::default();
        FrameBuffer {
            buffer: vec![format.bg; WIDTH * HEIGHT],
            format,
        }
    }
}

#[derive(Debug)]
pub struct UI {
    window: Window,
    fb: FrameBuffer,
    time: Instant,
}

impl Frontend for UI {
    fn keys(&mut self, ch8: &mut Chip8) -> Result<bool> {
        if self.time.elapsed() >= UPDATE_INTERVAL {
            self.window.update();
            self.time = Instant::now();
        }
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return Ok(false);
        }
        ch8.cpu.clear_keys();
        for key in self.window.get_keys() {
            if let Some(key) = identify_key(key) {
                ch8.cpu.press(key)?;
            }
        }
        Ok(true)
    }

    fn frame(&mut self, ch8: &mut Chip8) -> Result<bool> {
        ch8.screen.take_dirty();
        let buffer = self.fb.render(&ch8.screen);
        self.window.update_with_buffer(buffer, WIDTH, HEIGHT)?;
        self.time = Instant::now();
        Ok(self.window.is_open())
    }
}

/// COSMAC VIP keypad layout on `1234/qwer/asdf/zxcv`, not the linear 0x0..=0xF order
pub fn identify_key(key: Key) -> Option<usize> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xc),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_follows_screen() {
        let mut ch8 = Chip8::new();
        ch8.load_program_bytes(&[0xd0, 0x01]).unwrap();
        ch8.tick();
        let mut fb = FrameBuffer::default();
        let buffer = fb.render(&ch8.screen);
        let format = FrameBufferFormat::default();
        // the top row of the `0` glyph is 0xF0
        assert_eq!([format.fg; 4], buffer[..4]);
        assert_eq!([format.bg; 4], buffer[4..8]);
    }

    #[test]
    fn identify_keys() {
        assert_eq!(Some(0x0), identify_key(Key::X));
        assert_eq!(Some(0xf), identify_key(Key::V));
        assert_eq!(None, identify_key(Key::Escape));
    }
}
