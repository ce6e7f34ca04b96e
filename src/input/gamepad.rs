//! USB gamepads, one per player port

use std::time::Duration;

use super::{InputDevice, InputEvent, RawEvent};
use crate::Player;
use crate::settings::Settings;

/// Stick deflection (after the deadzone) that counts as a direction press
const STICK_THRESHOLD: f32 = 0.5;

/// Snapshot of a gamepad's controls
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadReport {
    pub up: bool,
    pub down: bool,
    /// Left stick vertical axis in `[-1, 1]`, positive is up
    pub stick_y: f32,
    pub a: bool,
    pub start: bool,
    pub home: bool,
}

impl GamepadReport {
    /// Translate one report into events for `player`
    pub fn to_events(&self, player: Player, deadzone: f32, events: &mut Vec<InputEvent>) {
        let stick = apply_deadzone(self.stick_y, deadzone);
        if self.up || stick >= STICK_THRESHOLD {
            events.push(InputEvent::MoveUp(player));
        } else if self.down || stick <= -STICK_THRESHOLD {
            events.push(InputEvent::MoveDown(player));
        }
        if self.a || self.start {
            events.push(InputEvent::Confirm);
        }
        if self.home {
            events.push(InputEvent::Exit);
        }
    }
}

/// Zero small deflections and rescale the rest back to the full range
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    if value.abs() < deadzone {
        0.0
    } else {
        let sign = if value < 0.0 { -1.0 } else { 1.0 };
        sign * (value.abs() - deadzone) / (1.0 - deadzone)
    }
}

struct Port {
    device: Box<dyn InputDevice>,
    was_connected: bool,
}

pub struct GamepadChannel {
    ports: [Option<Port>; 2],
    deadzone: f32,
    active_interval: Duration,
    idle_interval: Duration,
}

impl GamepadChannel {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ports: [None, None],
            deadzone: settings.joystick_deadzone,
            active_interval: settings.tick_interval(),
            idle_interval: settings.idle_poll_interval(),
        }
    }

    pub fn attach(&mut self, player: Player, device: Box<dyn InputDevice>) {
        self.ports[player.index()] = Some(Port {
            device,
            was_connected: false,
        });
    }

    pub fn has_ports(&self) -> bool {
        self.ports.iter().any(Option::is_some)
    }

    pub fn bound(&self, player: Player) -> bool {
        self.ports[player.index()]
            .as_ref()
            .is_some_and(|port| port.device.is_connected())
    }

    /// Poll both ports. Fast cadence while any pad is connected, slow otherwise.
    pub fn poll(&mut self, events: &mut Vec<InputEvent>) -> Duration {
        let mut any_connected = false;
        for player in Player::ALL {
            let Some(port) = &mut self.ports[player.index()] else {
                continue;
            };

            let connected = port.device.is_connected();
            if connected != port.was_connected {
                if connected {
                    log::info!("Gamepad connected on port {}", player.index() + 1);
                } else {
                    log::info!("Gamepad disconnected from port {}", player.index() + 1);
                }
                port.was_connected = connected;
            }
            if !connected {
                continue;
            }
            any_connected = true;

            if let Some(RawEvent::Gamepad(report)) = port.device.poll() {
                report.to_events(player, self.deadzone, events);
            }
        }

        if any_connected {
            self.active_interval
        } else {
            self.idle_interval
        }
    }
}
