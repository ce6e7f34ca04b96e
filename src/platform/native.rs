//! Desktop host: the terminal as the keyboard, process exit as the launcher

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::{Peripherals, ProcessControl};
use crate::input::{InputDevice, RawEvent};

/// Puts the terminal in raw mode so keys arrive one at a time, and restores it
/// when the session releases its peripherals
pub struct RawTerminal {
    enabled: bool,
}

impl RawTerminal {
    pub fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        log::debug!("Terminal switched to raw mode");
        Ok(Self { enabled: true })
    }
}

impl Peripherals for RawTerminal {
    fn release(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Terminal keys, re-encoded as the byte stream a serial keyboard would send
#[derive(Debug)]
pub struct TerminalKeyboard {
    connected: bool,
}

impl TerminalKeyboard {
    pub fn new() -> Self {
        Self { connected: true }
    }
}

impl Default for TerminalKeyboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes a key press stands for, `None` for keys the game ignores
pub fn key_bytes(key: &KeyEvent) -> Option<&'static [u8]> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows the interrupt signal
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(&b"\x1b"[..]);
    }
    let bytes: &'static [u8] = match key.code {
        KeyCode::Up => b"\x1b[A",
        KeyCode::Down => b"\x1b[B",
        KeyCode::Right => b"\x1b[C",
        KeyCode::Left => b"\x1b[D",
        KeyCode::Enter => b"\r",
        KeyCode::Char(' ') => b" ",
        KeyCode::Esc | KeyCode::Char('q') => b"\x1b",
        _ => return None,
    };
    Some(bytes)
}

impl InputDevice for TerminalKeyboard {
    fn poll(&mut self) -> Option<RawEvent> {
        if !self.connected {
            return None;
        }
        let mut bytes = Vec::new();
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::warn!("Terminal input failed: {}", e);
                    self.connected = false;
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(encoded) = key_bytes(&key) {
                        bytes.extend_from_slice(encoded);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Terminal input failed: {}", e);
                    self.connected = false;
                    break;
                }
            }
        }
        (!bytes.is_empty()).then_some(RawEvent::Bytes(bytes))
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// There is no launcher on the desktop: the game loop stops and `main` returns
#[derive(Debug, Default)]
pub struct NativeProcess;

impl ProcessControl for NativeProcess {
    fn exit_and_restart(&mut self) {
        log::info!("Exit requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;
    use crate::input::InputEvent;
    use crate::input::keyboard::decode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn events_for(keys: &[KeyEvent]) -> Vec<InputEvent> {
        let bytes: Vec<u8> = keys
            .iter()
            .filter_map(key_bytes)
            .flatten()
            .copied()
            .collect();
        let mut events = Vec::new();
        decode(&bytes, &mut events);
        events
    }

    #[test]
    fn test_arrow_alone_moves_without_confirm() {
        assert_eq!(
            events_for(&[press(KeyCode::Up)]),
            vec![InputEvent::MoveUp(Player::Left)]
        );
        assert_eq!(
            events_for(&[press(KeyCode::Down)]),
            vec![InputEvent::MoveDown(Player::Left)]
        );
    }

    #[test]
    fn test_enter_and_space_confirm() {
        assert_eq!(
            events_for(&[press(KeyCode::Enter), press(KeyCode::Char(' '))]),
            vec![InputEvent::Confirm, InputEvent::Confirm]
        );
    }

    #[test]
    fn test_escape_keys_encode_as_lone_escape() {
        assert_eq!(key_bytes(&press(KeyCode::Esc)), Some(&b"\x1b"[..]));
        assert_eq!(key_bytes(&press(KeyCode::Char('q'))), Some(&b"\x1b"[..]));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_bytes(&ctrl_c), Some(&b"\x1b"[..]));
        // An escape followed by another key decodes as exit
        assert_eq!(
            events_for(&[press(KeyCode::Esc), press(KeyCode::Enter)]),
            vec![InputEvent::Exit, InputEvent::Confirm]
        );
    }

    #[test]
    fn test_releases_and_unmapped_keys_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_bytes(&release), None);
        assert_eq!(key_bytes(&press(KeyCode::Char('x'))), None);
        assert_eq!(key_bytes(&press(KeyCode::Tab)), None);
    }
}
