//! Input devices and event normalization
//!
//! Each device class is polled by its own game-loop task and translated into
//! [`InputEvent`]s. Devices are trait objects so the game loop never depends
//! on a particular USB stack or terminal.

use std::time::Duration;

use crate::Player;
use crate::settings::Settings;

pub mod buttons;
pub mod gamepad;
pub mod keyboard;
pub mod pointer;

pub use buttons::{ButtonLevels, ButtonsChannel};
pub use gamepad::{GamepadChannel, GamepadReport};
pub use keyboard::KeyboardChannel;
pub use pointer::{PointerChannel, PointerDiscovery};

/// Normalized input, independent of the device it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MoveUp(Player),
    MoveDown(Player),
    /// Center a paddle on an absolute y (pointer devices)
    AbsoluteY(Player, f32),
    Confirm,
    Exit,
}

/// One report read from a device
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    Pointer { y: f32, left_pressed: bool },
    Bytes(Vec<u8>),
    Gamepad(GamepadReport),
    Buttons(ButtonLevels),
}

/// A pollable device. `poll` returns `None` when no fresh report is available.
pub trait InputDevice {
    fn poll(&mut self) -> Option<RawEvent>;
    fn is_connected(&self) -> bool;
}

/// Device classes, each polled by its own task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Keyboard,
    Gamepads,
    Buttons,
    Pointer,
}

/// Owns every device channel and routes polls by class
pub struct InputAggregator {
    keyboard: Option<KeyboardChannel>,
    gamepads: GamepadChannel,
    buttons: Option<ButtonsChannel>,
    pointer: Option<PointerChannel>,
}

impl InputAggregator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            keyboard: None,
            gamepads: GamepadChannel::new(settings),
            buttons: None,
            pointer: None,
        }
    }

    pub fn with_keyboard(mut self, device: Box<dyn InputDevice>) -> Self {
        self.keyboard = Some(KeyboardChannel::new(device));
        self
    }

    pub fn with_gamepad(mut self, player: Player, device: Box<dyn InputDevice>) -> Self {
        self.gamepads.attach(player, device);
        self
    }

    pub fn with_buttons(mut self, device: Box<dyn InputDevice>) -> Self {
        self.buttons = Some(ButtonsChannel::new(device));
        self
    }

    pub fn with_pointer(
        mut self,
        settings: &Settings,
        discovery: Box<dyn PointerDiscovery>,
    ) -> Self {
        self.pointer = Some(PointerChannel::new(settings, discovery));
        self
    }

    /// Whether a class has a channel worth scheduling
    pub fn has(&self, class: DeviceClass) -> bool {
        match class {
            DeviceClass::Keyboard => self.keyboard.is_some(),
            DeviceClass::Gamepads => self.gamepads.has_ports(),
            DeviceClass::Buttons => self.buttons.is_some(),
            DeviceClass::Pointer => self.pointer.is_some(),
        }
    }

    /// Poll one device class. Returns the delay until it should be polled again.
    pub fn poll(
        &mut self,
        class: DeviceClass,
        waiting: bool,
        tick: Duration,
        events: &mut Vec<InputEvent>,
    ) -> Duration {
        match class {
            DeviceClass::Keyboard => {
                if let Some(keyboard) = &mut self.keyboard {
                    keyboard.poll(events);
                }
                tick
            }
            DeviceClass::Gamepads => self.gamepads.poll(events),
            DeviceClass::Buttons => {
                if let Some(buttons) = &mut self.buttons {
                    buttons.poll(waiting, events);
                }
                tick
            }
            DeviceClass::Pointer => match &mut self.pointer {
                Some(pointer) => pointer.poll(events),
                None => tick,
            },
        }
    }

    /// A live gamepad is plugged into the player's port
    pub fn gamepad_bound(&self, player: Player) -> bool {
        self.gamepads.bound(player)
    }

    pub fn pointer_bound(&self) -> bool {
        self.pointer.as_ref().is_some_and(PointerChannel::is_bound)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted devices shared by the input tests

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{InputDevice, RawEvent};

    /// Replays queued reports; `None` entries simulate empty polls
    #[derive(Clone, Default)]
    pub struct ScriptedDevice {
        pub reports: Rc<RefCell<VecDeque<Option<RawEvent>>>>,
        pub connected: Rc<Cell<bool>>,
    }

    impl ScriptedDevice {
        pub fn new() -> Self {
            let device = Self::default();
            device.connected.set(true);
            device
        }

        pub fn push(&self, report: Option<RawEvent>) {
            self.reports.borrow_mut().push_back(report);
        }
    }

    impl InputDevice for ScriptedDevice {
        fn poll(&mut self) -> Option<RawEvent> {
            self.reports.borrow_mut().pop_front().flatten()
        }

        fn is_connected(&self) -> bool {
            self.connected.get()
        }
    }
}
