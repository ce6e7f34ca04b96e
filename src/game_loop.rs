//! Cooperative game loop
//!
//! Every device class, the computer opponent and the gameplay step are tasks
//! with their own cadence. The loop runs on a virtual clock: [`GameLoop::step`]
//! runs whichever task is due first and reschedules it, so tests can drive
//! whole matches without sleeping. A real-time host sleeps until
//! [`GameLoop::next_due`] between steps.
//!
//! Tasks due at the same instant run in a fixed order (keyboard, gamepads,
//! buttons, pointer, computer, gameplay), so a bound pointer always gets the
//! last word on player 1's paddle before the gameplay step.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{AudioCue, AudioManager};
use crate::input::{DeviceClass, InputAggregator, InputEvent};
use crate::platform::Session;
use crate::renderer::{AmbientLight, Frame, Renderer};
use crate::sim::{ComputerOpponent, GameEvent, GameState, TickInput, tick};
use crate::{Direction, Player};

/// Output collaborators driven by the loop
pub struct Outputs {
    pub renderer: Box<dyn Renderer>,
    pub audio: AudioManager,
    pub ambient: Option<Box<dyn AmbientLight>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    /// An exit was requested; peripherals have been released
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Input(DeviceClass),
    Computer,
    Gameplay,
}

/// Tie-break order for tasks due at the same instant
const TASKS: [Task; 6] = [
    Task::Input(DeviceClass::Keyboard),
    Task::Input(DeviceClass::Gamepads),
    Task::Input(DeviceClass::Buttons),
    Task::Input(DeviceClass::Pointer),
    Task::Computer,
    Task::Gameplay,
];

/// Offset between the match seed and the computer's timing RNG
const COMPUTER_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct GameLoop {
    state: GameState,
    input: InputAggregator,
    computer: Option<ComputerOpponent>,
    outputs: Outputs,
    session: Session,
    /// Reaction-delay RNG, separate so AI timing never perturbs serves
    rng: Pcg32,
    /// Next due time per entry of [`TASKS`]; `None` for tasks with nothing to do
    due: [Option<Duration>; 6],
    now: Duration,
    status: LoopStatus,
    scratch: Vec<InputEvent>,
}

impl GameLoop {
    pub fn new(
        state: GameState,
        input: InputAggregator,
        mut outputs: Outputs,
        session: Session,
    ) -> Self {
        outputs.audio.set_volume(state.settings.volume);
        outputs.audio.set_muted(state.settings.muted);

        let computer = state
            .settings
            .computer_enabled
            .then(|| ComputerOpponent::new(&state.settings));

        let mut due = [None; 6];
        for (slot, task) in TASKS.iter().enumerate() {
            let active = match task {
                Task::Input(class) => input.has(*class),
                Task::Computer => computer.is_some(),
                Task::Gameplay => true,
            };
            if active {
                due[slot] = Some(Duration::ZERO);
            }
        }

        log::info!(
            "Game loop ready (seed {}, computer {})",
            state.seed,
            if computer.is_some() { "on" } else { "off" }
        );

        Self {
            rng: Pcg32::seed_from_u64(state.seed.wrapping_add(COMPUTER_STREAM)),
            state,
            input,
            computer,
            outputs,
            session,
            due,
            now: Duration::ZERO,
            status: LoopStatus::Running,
            scratch: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Virtual time of the last task run
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn status(&self) -> LoopStatus {
        self.status
    }

    /// When the next task is due, `None` once exited
    pub fn next_due(&self) -> Option<Duration> {
        if self.status == LoopStatus::Exited {
            return None;
        }
        self.next_slot().map(|(_, due)| due)
    }

    fn next_slot(&self) -> Option<(usize, Duration)> {
        let mut next: Option<(usize, Duration)> = None;
        for (slot, due) in self.due.iter().enumerate() {
            if let Some(due) = *due {
                // Strict comparison keeps the earlier slot on ties
                if next.is_none_or(|(_, best)| due < best) {
                    next = Some((slot, due));
                }
            }
        }
        next
    }

    /// Run the next due task
    pub fn step(&mut self) -> LoopStatus {
        if self.status == LoopStatus::Exited {
            return self.status;
        }
        let Some((slot, due)) = self.next_slot() else {
            return self.status;
        };

        self.now = self.now.max(due);
        let interval = self.run(TASKS[slot]);
        self.due[slot] = Some(self.now + interval);
        self.status
    }

    /// Run every task due up to `deadline`
    pub fn run_until(&mut self, deadline: Duration) -> LoopStatus {
        while let Some(due) = self.next_due() {
            if due > deadline {
                break;
            }
            if self.step() == LoopStatus::Exited {
                return LoopStatus::Exited;
            }
        }
        self.now = self.now.max(deadline);
        self.status
    }

    pub fn run_for(&mut self, duration: Duration) -> LoopStatus {
        self.run_until(self.now + duration)
    }

    /// Run one task, returning the delay until it runs again
    fn run(&mut self, task: Task) -> Duration {
        let tick_interval = self.state.settings.tick_interval();
        match task {
            Task::Input(class) => {
                let mut events = std::mem::take(&mut self.scratch);
                events.clear();
                let interval = self
                    .input
                    .poll(class, self.state.is_waiting(), tick_interval, &mut events);

                let changed = !events.is_empty();
                for event in events.drain(..) {
                    self.apply(event);
                    if self.status == LoopStatus::Exited {
                        break;
                    }
                }
                self.scratch = events;

                if changed && self.status == LoopStatus::Running {
                    self.render();
                }
                interval
            }
            Task::Computer => match &self.computer {
                Some(computer) => {
                    computer.evaluate(&mut self.state);
                    computer.next_delay(&mut self.rng)
                }
                None => tick_interval,
            },
            Task::Gameplay => {
                let input = TickInput {
                    gamepad_bound: [
                        self.input.gamepad_bound(Player::Left),
                        self.input.gamepad_bound(Player::Right),
                    ],
                };
                for event in tick(&mut self.state, &input) {
                    self.notify(event);
                }
                self.update_lights();
                self.render();

                if self.state.is_waiting() {
                    self.state.settings.wait_poll_interval()
                } else {
                    tick_interval
                }
            }
        }
    }

    /// Route a normalized input event into the state
    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveUp(player) => self.state.paddle_mut(player).apply_move(Direction::Up),
            InputEvent::MoveDown(player) => {
                self.state.paddle_mut(player).apply_move(Direction::Down)
            }
            InputEvent::AbsoluteY(player, y) => self.state.paddle_mut(player).apply_absolute(y),
            InputEvent::Confirm => {
                if self.state.is_waiting() {
                    self.state.request_confirm();
                }
            }
            InputEvent::Exit => self.exit(),
        }
    }

    fn exit(&mut self) {
        log::info!("Exit requested, shutting down");
        if let Some(ambient) = &mut self.outputs.ambient {
            ambient.clear();
        }
        self.session.shutdown();
        self.status = LoopStatus::Exited;
    }

    fn notify(&mut self, event: GameEvent) {
        let cue = match event {
            GameEvent::WallBounce => Some(AudioCue::WallBounce),
            GameEvent::PaddleBounce(_) => Some(AudioCue::PaddleBounce),
            GameEvent::PointScored(_) => Some(AudioCue::Score),
            _ => None,
        };
        if let Some(cue) = cue {
            self.outputs.audio.play(cue);
        }

        match event {
            GameEvent::PointScored(player) => {
                let score = self.state.rules.score();
                log::info!("Point {:?}: {} - {}", player, score.left, score.right);
            }
            GameEvent::MatchReset => log::info!("New match"),
            GameEvent::Served => log::debug!("Serve"),
            _ => {}
        }
    }

    fn update_lights(&mut self) {
        let Some(ambient) = &mut self.outputs.ambient else {
            return;
        };
        if self.state.ball.visible {
            ambient.show(self.state.ball.position().x, self.state.settings.field_width);
        } else {
            ambient.clear();
        }
    }

    fn render(&mut self) {
        let frame = Frame::capture(&self.state);
        self.outputs.renderer.draw(&frame);
    }
}
