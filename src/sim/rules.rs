//! Match rules: phases, scoring and the win condition

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::Player;
use crate::settings::Settings;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for a confirm before the first serve
    Idle,
    /// Ball about to be centered and launched
    Serving,
    /// Ball in play
    Rallying,
    /// Short pause after a point, ball hidden
    PointScored,
    /// Match decided, waiting for a confirm to reset
    MatchWon,
}

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Left => self.left,
            Player::Right => self.right,
        }
    }

    /// Add a point, returning the new total
    pub fn increment(&mut self, player: Player) -> u32 {
        let points = match player {
            Player::Left => &mut self.left,
            Player::Right => &mut self.right,
        };
        *points += 1;
        *points
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn as_array(&self) -> [u32; 2] {
        [self.left, self.right]
    }
}

/// Match state machine
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    phase: MatchPhase,
    score: Score,
    winner: Option<Player>,
    /// Gameplay ticks left in the post-point pause
    delay_ticks: u32,
    win_score: u32,
    win_margin: u32,
    point_delay_ticks: u32,
}

impl MatchState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: MatchPhase::Idle,
            score: Score::default(),
            winner: None,
            delay_ticks: 0,
            win_score: settings.win_score,
            win_margin: settings.win_margin,
            point_delay_ticks: settings.point_delay_ticks(),
        }
    }

    #[inline]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Phases gated on a confirm
    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, MatchPhase::Idle | MatchPhase::MatchWon)
    }

    /// Apply a confirm. Ignored outside the gated phases.
    pub fn confirm(&mut self, events: &mut Vec<GameEvent>) {
        match self.phase {
            MatchPhase::Idle => self.phase = MatchPhase::Serving,
            MatchPhase::MatchWon => {
                self.score.reset();
                self.winner = None;
                self.phase = MatchPhase::Idle;
                events.push(GameEvent::MatchReset);
            }
            _ => {}
        }
    }

    /// Ball launched
    pub fn start_rally(&mut self) {
        if self.phase == MatchPhase::Serving {
            self.phase = MatchPhase::Rallying;
        }
    }

    /// Credit a point for `scorer`. Only counts while rallying.
    pub fn record_point(&mut self, scorer: Player, events: &mut Vec<GameEvent>) {
        if self.phase != MatchPhase::Rallying {
            return;
        }

        let points = self.score.increment(scorer);
        events.push(GameEvent::PointScored(scorer));

        let lead = points.saturating_sub(self.score.get(scorer.opponent()));
        if points >= self.win_score && lead >= self.win_margin {
            log::info!(
                "{:?} wins {}-{}",
                scorer,
                self.score.left,
                self.score.right
            );
            self.winner = Some(scorer);
            self.phase = MatchPhase::MatchWon;
            events.push(GameEvent::MatchWon(scorer));
        } else {
            self.delay_ticks = self.point_delay_ticks;
            self.phase = MatchPhase::PointScored;
        }
    }

    /// Count down the post-point pause. Returns true when it is time to serve.
    pub fn advance_delay(&mut self) -> bool {
        if self.phase != MatchPhase::PointScored {
            return false;
        }
        self.delay_ticks = self.delay_ticks.saturating_sub(1);
        if self.delay_ticks == 0 {
            self.phase = MatchPhase::Serving;
            true
        } else {
            false
        }
    }
}
