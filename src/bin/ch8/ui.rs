// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Terminal IO: crossterm for input, braille characters for output

use ch8::{
    error::Result,
    io::{Frontend, KeyLatch},
    Chip8,
};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal,
};
use std::{
    io::{self, stdout, Stdout, Write},
    time::Duration,
};

/// Draws to an alternate screen in raw mode, and restores the terminal on drop
#[derive(Debug)]
pub struct Terminal {
    out: Stdout,
    latch: KeyLatch,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Terminal {
            out,
            latch: KeyLatch::new(),
        })
    }
}

impl Frontend for Terminal {
    fn keys(&mut self, ch8: &mut Chip8) -> Result<bool> {
        let mut pressed = None;
        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            match code {
                KeyCode::Esc => return Ok(false),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(false)
                }
                KeyCode::Char(c) => pressed = identify_key(c).or(pressed),
                _ => (),
            }
        }
        self.latch.poll(pressed);
        self.latch.apply(&mut ch8.cpu)?;
        Ok(true)
    }

    fn frame(&mut self, ch8: &mut Chip8) -> Result<bool> {
        queue!(self.out, cursor::MoveTo(0, 0))?;
        for line in ch8.screen.render().lines() {
            queue!(self.out, Print(line), cursor::MoveToNextLine(1))?;
        }
        self.out.flush()?;
        ch8.screen.take_dirty();
        Ok(true)
    }

    fn beep(&mut self) -> Result<()> {
        Ok(ring(&mut self.out)?)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // nothing to be done if the terminal is already gone
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Sends BEL, flushing so it isn't held until the next frame
fn ring(out: &mut impl Write) -> io::Result<()> {
    queue!(out, Print('\x07'))?;
    out.flush()
}

/// Maps the left side of a QWERTY keyboard onto the COSMAC VIP keypad
///
/// This is a deliberate departure from the linear mapping, where
/// `1234qwerasdfzxcv` is read as keys 0x0 through 0xF in order.
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r  ->  4 5 6 D
/// a s d f      7 8 9 E
/// z x c v      A 0 B F
/// ```
pub fn identify_key(key: char) -> Option<usize> {
    match key.to_ascii_lowercase() {
        '1' => Some(0x1),
        '2' => Some(0x2),
        '3' => Some(0x3),
        '4' => Some(0xc),
        'q' => Some(0x4),
        'w' => Some(0x5),
        'e' => Some(0x6),
        'r' => Some(0xd),
        'a' => Some(0x7),
        's' => Some(0x8),
        'd' => Some(0x9),
        'f' => Some(0xe),
        'z' => Some(0xa),
        'x' => Some(0x0),
        'c' => Some(0xb),
        'v' => Some(0xf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_mapped_once() {
        let mut seen = [false; 16];
        for c in "1234qwerasdfzxcv".chars() {
            let key = identify_key(c).unwrap();
            assert!(!seen[key], "{c} maps to {key:x} twice");
            seen[key] = true;
        }
        assert_eq!([true; 16], seen);
    }

    #[test]
    fn follows_keypad_not_row_order() {
        assert_eq!(Some(0xc), identify_key('4'));
        assert_eq!(Some(0x0), identify_key('x'));
        assert_eq!(Some(0xf), identify_key('v'));
    }

    #[derive(Default)]
    struct Speaker {
        sent: Vec<u8>,
        flushed: Vec<u8>,
    }

    impl Write for Speaker {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            self.flushed.append(&mut self.sent);
            Ok(())
        }
    }

    #[test]
    fn ring_is_flushed() {
        let mut speaker = Speaker::default();
        ring(&mut speaker).unwrap();
        assert_eq!(b"\x07", speaker.flushed.as_slice());
        assert!(speaker.sent.is_empty());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(identify_key('Q'), identify_key('q'));
    }

    #[test]
    fn unmapped_keys() {
        assert_eq!(None, identify_key('p'));
        assert_eq!(None, identify_key(' '));
    }
}
