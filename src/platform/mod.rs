//! Platform abstraction layer
//!
//! Handles what the game needs from the host beyond display, audio and input:
//! - Releasing claimed USB peripherals
//! - Exiting back to the launcher

pub mod native;

pub use native::{NativeProcess, RawTerminal, TerminalKeyboard};

/// Claimed hardware that must be handed back before exit
pub trait Peripherals {
    fn release(&mut self);
}

/// Leaves the game, restarting into the launcher where the host has one
pub trait ProcessControl {
    fn exit_and_restart(&mut self);
}

/// Owns the host hooks and guarantees peripherals are released exactly once
pub struct Session {
    peripherals: Option<Box<dyn Peripherals>>,
    process: Box<dyn ProcessControl>,
}

impl Session {
    pub fn new(
        peripherals: Option<Box<dyn Peripherals>>,
        process: Box<dyn ProcessControl>,
    ) -> Self {
        Self {
            peripherals,
            process,
        }
    }

    fn release(&mut self) {
        if let Some(mut peripherals) = self.peripherals.take() {
            log::info!("Releasing peripherals");
            peripherals.release();
        }
    }

    /// Release peripherals, then leave
    pub fn shutdown(&mut self) {
        self.release();
        self.process.exit_and_restart();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct Journal(Rc<RefCell<Vec<&'static str>>>);

    struct Usb(Journal);
    impl Peripherals for Usb {
        fn release(&mut self) {
            self.0.0.borrow_mut().push("release");
        }
    }

    struct Launcher(Journal);
    impl ProcessControl for Launcher {
        fn exit_and_restart(&mut self) {
            self.0.0.borrow_mut().push("restart");
        }
    }

    #[test]
    fn test_shutdown_releases_before_restart() {
        let journal = Journal::default();
        let mut session = Session::new(
            Some(Box::new(Usb(journal.clone()))),
            Box::new(Launcher(journal.clone())),
        );
        session.shutdown();
        drop(session);
        assert_eq!(*journal.0.borrow(), vec!["release", "restart"]);
    }

    #[test]
    fn test_drop_releases() {
        let journal = Journal::default();
        let session = Session::new(
            Some(Box::new(Usb(journal.clone()))),
            Box::new(Launcher(journal.clone())),
        );
        drop(session);
        assert_eq!(*journal.0.borrow(), vec!["release"]);
    }
}
