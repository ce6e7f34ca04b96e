//! Boot-protocol mouse driving player 1 by absolute position
//!
//! The pointer is hot-pluggable: while unbound the channel retries discovery
//! at the idle cadence, and a bound pointer is dropped after too many
//! consecutive empty polls.

use std::time::Duration;

use super::{InputDevice, InputEvent, RawEvent};
use crate::Player;
use crate::settings::Settings;

/// Finds a pointer device when one is plugged in
pub trait PointerDiscovery {
    fn discover(&mut self) -> Option<Box<dyn InputDevice>>;
}

struct BoundPointer {
    device: Box<dyn InputDevice>,
    failed_polls: u32,
    last_y: f32,
    was_pressed: bool,
}

pub struct PointerChannel {
    discovery: Box<dyn PointerDiscovery>,
    bound: Option<BoundPointer>,
    /// Cursor position assumed right after binding
    start_y: f32,
    disconnect_after: u32,
    poll_interval: Duration,
    rediscover_interval: Duration,
}

impl PointerChannel {
    pub fn new(settings: &Settings, discovery: Box<dyn PointerDiscovery>) -> Self {
        Self {
            discovery,
            bound: None,
            start_y: (settings.field_height / 2) as f32,
            disconnect_after: settings.pointer_disconnect_polls,
            poll_interval: settings.tick_interval(),
            rediscover_interval: settings.idle_poll_interval(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Poll the pointer (discovering it first if needed). Returns the delay
    /// until the next poll.
    pub fn poll(&mut self, events: &mut Vec<InputEvent>) -> Duration {
        if self.bound.is_none() {
            match self.discovery.discover() {
                Some(device) => {
                    log::info!("Pointer bound to player 1");
                    self.bound = Some(BoundPointer {
                        device,
                        failed_polls: 0,
                        last_y: self.start_y,
                        was_pressed: false,
                    });
                }
                None => return self.rediscover_interval,
            }
        }

        let Some(pointer) = &mut self.bound else {
            return self.rediscover_interval;
        };

        match pointer.device.poll() {
            Some(RawEvent::Pointer { y, left_pressed }) => {
                pointer.failed_polls = 0;
                pointer.last_y = y;
                if left_pressed && !pointer.was_pressed {
                    events.push(InputEvent::Confirm);
                }
                pointer.was_pressed = left_pressed;
            }
            Some(_) => pointer.failed_polls = 0,
            None => {
                pointer.failed_polls += 1;
                // An empty poll forgets the button, so a held button confirms again
                pointer.was_pressed = false;
            }
        }

        // The pointer pins the paddle every poll while bound
        events.push(InputEvent::AbsoluteY(Player::Left, pointer.last_y));

        if pointer.failed_polls >= self.disconnect_after || !pointer.device.is_connected() {
            log::info!("Pointer disconnected after {} empty polls", pointer.failed_polls);
            self.bound = None;
            return self.rediscover_interval;
        }

        self.poll_interval
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::input::testing::ScriptedDevice;

    /// Hands out queued devices, one per discovery attempt
    #[derive(Clone, Default)]
    struct QueueDiscovery {
        devices: Rc<RefCell<VecDeque<ScriptedDevice>>>,
        attempts: Rc<RefCell<u32>>,
    }

    impl PointerDiscovery for QueueDiscovery {
        fn discover(&mut self) -> Option<Box<dyn InputDevice>> {
            *self.attempts.borrow_mut() += 1;
            self.devices
                .borrow_mut()
                .pop_front()
                .map(|d| Box::new(d) as Box<dyn InputDevice>)
        }
    }

    fn pointer_report(y: f32, left_pressed: bool) -> Option<RawEvent> {
        Some(RawEvent::Pointer { y, left_pressed })
    }

    fn channel(disconnect_after: u32) -> (PointerChannel, QueueDiscovery, Settings) {
        let settings = Settings {
            pointer_disconnect_polls: disconnect_after,
            ..Default::default()
        };
        let discovery = QueueDiscovery::default();
        let channel = PointerChannel::new(&settings, Box::new(discovery.clone()));
        (channel, discovery, settings)
    }

    #[test]
    fn test_unbound_retries_slowly() {
        let (mut channel, discovery, settings) = channel(10);
        let mut events = Vec::new();
        assert_eq!(channel.poll(&mut events), settings.idle_poll_interval());
        assert_eq!(channel.poll(&mut events), settings.idle_poll_interval());
        assert!(events.is_empty());
        assert_eq!(*discovery.attempts.borrow(), 2);
    }

    #[test]
    fn test_bound_pointer_pins_paddle() {
        let (mut channel, discovery, settings) = channel(10);
        let mouse = ScriptedDevice::new();
        discovery.devices.borrow_mut().push_back(mouse.clone());

        mouse.push(pointer_report(50.0, false));
        let mut events = Vec::new();
        assert_eq!(channel.poll(&mut events), settings.tick_interval());
        assert_eq!(events, vec![InputEvent::AbsoluteY(Player::Left, 50.0)]);

        // No new report: the last position is re-applied
        events.clear();
        channel.poll(&mut events);
        assert_eq!(events, vec![InputEvent::AbsoluteY(Player::Left, 50.0)]);
    }

    #[test]
    fn test_press_confirms_on_edge() {
        let (mut channel, discovery, _) = channel(10);
        let mouse = ScriptedDevice::new();
        discovery.devices.borrow_mut().push_back(mouse.clone());

        mouse.push(pointer_report(10.0, true));
        mouse.push(pointer_report(10.0, true));
        mouse.push(pointer_report(10.0, false));
        mouse.push(pointer_report(10.0, true));

        let mut confirms = Vec::new();
        for _ in 0..4 {
            let mut events = Vec::new();
            channel.poll(&mut events);
            confirms.push(events.contains(&InputEvent::Confirm));
        }
        assert_eq!(confirms, vec![true, false, false, true]);
    }

    #[test]
    fn test_disconnects_after_threshold_and_rediscovers() {
        let (mut channel, discovery, settings) = channel(3);
        let first = ScriptedDevice::new();
        let second = ScriptedDevice::new();
        discovery.devices.borrow_mut().push_back(first.clone());
        discovery.devices.borrow_mut().push_back(second.clone());

        let mut events = Vec::new();
        assert_eq!(channel.poll(&mut events), settings.tick_interval());
        assert_eq!(channel.poll(&mut events), settings.tick_interval());
        assert!(channel.is_bound());
        assert_eq!(channel.poll(&mut events), settings.idle_poll_interval());
        assert!(!channel.is_bound());

        second.push(pointer_report(80.0, false));
        events.clear();
        assert_eq!(channel.poll(&mut events), settings.tick_interval());
        assert!(channel.is_bound());
        assert_eq!(events, vec![InputEvent::AbsoluteY(Player::Left, 80.0)]);
    }

    #[test]
    fn test_successful_poll_resets_failure_count() {
        let (mut channel, discovery, _) = channel(2);
        let mouse = ScriptedDevice::new();
        discovery.devices.borrow_mut().push_back(mouse.clone());

        let mut events = Vec::new();
        mouse.push(None);
        mouse.push(pointer_report(1.0, false));
        mouse.push(None);
        for _ in 0..3 {
            channel.poll(&mut events);
        }
        assert!(channel.is_bound());
    }

    #[test]
    fn test_starts_at_field_center() {
        let (mut channel, discovery, _) = channel(10);
        discovery.devices.borrow_mut().push_back(ScriptedDevice::new());
        let mut events = Vec::new();
        channel.poll(&mut events);
        assert_eq!(events, vec![InputEvent::AbsoluteY(Player::Left, 120.0)]);
    }
}
