//! Three onboard push buttons: 3 is up, 1 is down, 2 confirms, all three exit

use super::{InputDevice, InputEvent, RawEvent};
use crate::Player;

/// Pressed state of the three buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub button1: bool,
    pub button2: bool,
    pub button3: bool,
}

impl ButtonLevels {
    /// Translate levels into events for player 1
    pub fn to_events(&self, waiting: bool, events: &mut Vec<InputEvent>) {
        if self.button1 && self.button2 && self.button3 {
            events.push(InputEvent::Exit);
            return;
        }
        if self.button3 {
            events.push(InputEvent::MoveUp(Player::Left));
        } else if self.button1 {
            events.push(InputEvent::MoveDown(Player::Left));
        }
        if waiting && self.button2 {
            events.push(InputEvent::Confirm);
        }
    }
}

pub struct ButtonsChannel {
    device: Box<dyn InputDevice>,
}

impl ButtonsChannel {
    pub fn new(device: Box<dyn InputDevice>) -> Self {
        Self { device }
    }

    pub fn poll(&mut self, waiting: bool, events: &mut Vec<InputEvent>) {
        if let Some(RawEvent::Buttons(levels)) = self.device.poll() {
            levels.to_events(waiting, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(button1: bool, button2: bool, button3: bool) -> ButtonLevels {
        ButtonLevels {
            button1,
            button2,
            button3,
        }
    }

    fn events_for(levels: ButtonLevels, waiting: bool) -> Vec<InputEvent> {
        let mut events = Vec::new();
        levels.to_events(waiting, &mut events);
        events
    }

    #[test]
    fn test_up_and_down() {
        assert_eq!(
            events_for(levels(false, false, true), false),
            vec![InputEvent::MoveUp(Player::Left)]
        );
        assert_eq!(
            events_for(levels(true, false, false), false),
            vec![InputEvent::MoveDown(Player::Left)]
        );
        assert_eq!(
            events_for(levels(true, false, true), false),
            vec![InputEvent::MoveUp(Player::Left)]
        );
    }

    #[test]
    fn test_confirm_only_while_waiting() {
        assert!(events_for(levels(false, true, false), false).is_empty());
        assert_eq!(
            events_for(levels(false, true, false), true),
            vec![InputEvent::Confirm]
        );
    }

    #[test]
    fn test_all_three_exit() {
        assert_eq!(
            events_for(levels(true, true, true), true),
            vec![InputEvent::Exit]
        );
    }
}
