//! Serial/terminal keyboard: ANSI arrow sequences drive player 1

use super::{InputDevice, InputEvent, RawEvent};
use crate::Player;

const ESC: u8 = 0x1b;

/// Upper bound on reads per flush or poll, so a chatty device cannot stall a task
const MAX_READS: usize = 256;

pub struct KeyboardChannel {
    device: Box<dyn InputDevice>,
    /// Incomplete escape sequence carried over from the previous read
    pending: Vec<u8>,
    /// A lone ESC has already waited one poll for the rest of a sequence
    escape_held: bool,
}

impl KeyboardChannel {
    /// Wrap a device, discarding anything buffered before startup
    pub fn new(mut device: Box<dyn InputDevice>) -> Self {
        let mut flushed = 0;
        for _ in 0..MAX_READS {
            match device.poll() {
                Some(RawEvent::Bytes(bytes)) => flushed += bytes.len(),
                Some(_) => {}
                None => break,
            }
        }
        if flushed > 0 {
            log::debug!("Discarded {} buffered keyboard bytes", flushed);
        }
        Self {
            device,
            pending: Vec::new(),
            escape_held: false,
        }
    }

    /// Read everything available and decode it
    pub fn poll(&mut self, events: &mut Vec<InputEvent>) {
        for _ in 0..MAX_READS {
            match self.device.poll() {
                Some(RawEvent::Bytes(bytes)) => self.pending.extend_from_slice(&bytes),
                Some(_) => {}
                None => break,
            }
        }
        let consumed = decode(&self.pending, events);
        self.pending.drain(..consumed);

        // Nothing followed the ESC for a whole poll: it was the Esc key
        if self.pending == [ESC] {
            if self.escape_held {
                self.pending.clear();
                self.escape_held = false;
                events.push(InputEvent::Exit);
            } else {
                self.escape_held = true;
            }
        } else {
            self.escape_held = false;
        }
    }
}

/// Decode keyboard bytes into events. Returns how many bytes were consumed;
/// the rest is a partial escape sequence to retry with more input.
pub fn decode(bytes: &[u8], events: &mut Vec<InputEvent>) -> usize {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            ESC => match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(b'['), Some(&code)) => {
                    match code {
                        b'A' | b'D' => events.push(InputEvent::MoveUp(Player::Left)),
                        b'B' | b'C' => events.push(InputEvent::MoveDown(Player::Left)),
                        _ => {}
                    }
                    i += 3;
                }
                (Some(b'['), None) | (None, _) => return i,
                // Bare escape
                _ => {
                    events.push(InputEvent::Exit);
                    i += 1;
                }
            },
            b'\n' | b'\r' | b' ' => {
                events.push(InputEvent::Confirm);
                i += 1;
            }
            _ => i += 1,
        }
    }
    i
}
