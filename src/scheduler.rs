/// Frame scheduler: input gating, tick pacing, pause bookkeeping and
/// wall-clock scoring.
///
/// Time is passed in explicitly (`now`) rather than read from a clock, so
/// the whole loop can be driven deterministically from tests.

use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::compute::tick;
use crate::entities::Command;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal.  `dead` is false when the player quit.
    GameOver { dead: bool },
}

/// What the caller should do after a scheduling step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The world advanced; render it.
    Ticked,
    /// Nothing due; sleep briefly and poll again.
    Idle,
    /// Show the pause screen, then call `resume`.
    Paused,
    Over { dead: bool },
}

#[derive(Clone, Debug)]
pub struct Scheduler {
    state: RunState,
    frame_interval: Duration,
    /// Shifted forward by every pause so elapsed time excludes it.
    started_at: Instant,
    last_score_at: Instant,
    last_frame_at: Instant,
    /// Set while paused and once the game is over; the clock stops here.
    frozen_at: Option<Instant>,
}

impl Scheduler {
    pub fn new(now: Instant, frame_interval: Duration) -> Self {
        Scheduler {
            state: RunState::Running,
            frame_interval,
            started_at: now,
            last_score_at: now,
            last_frame_at: now,
            frozen_at: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Survival time so far, paused time excluded.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let until = self.frozen_at.unwrap_or(now);
        until.saturating_duration_since(self.started_at)
    }

    /// One scheduling step with at most one input symbol.
    pub fn step(
        &mut self,
        world: &mut World,
        input: Option<Command>,
        now: Instant,
        rng: &mut impl Rng,
    ) -> Step {
        match self.state {
            RunState::GameOver { dead } => return Step::Over { dead },
            RunState::Paused => {
                if input == Some(Command::Quit) {
                    return self.finish(false, now);
                }
                return Step::Paused;
            }
            RunState::Running => {}
        }

        match input {
            Some(Command::Quit) => return self.finish(false, now),
            Some(Command::Pause) => {
                self.pause(now);
                return Step::Paused;
            }
            _ => {}
        }

        let due = now.saturating_duration_since(self.last_frame_at) >= self.frame_interval;
        if input.is_none() && !due {
            return Step::Idle;
        }

        tick(world, input, rng);
        self.accrue_score(world, now);
        self.last_frame_at = now;

        if world.player.is_dead() {
            return self.finish(true, now);
        }
        Step::Ticked
    }

    pub fn pause(&mut self, now: Instant) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            self.frozen_at = Some(now);
            info!("paused");
        }
    }

    /// Leave the pause, shifting every wall-clock baseline by the time spent
    /// paused.  The caller discards input latched during the pause.
    pub fn resume(&mut self, now: Instant) {
        if self.state != RunState::Paused {
            return;
        }
        let Some(paused_at) = self.frozen_at.take() else {
            return;
        };
        let offset = now.saturating_duration_since(paused_at);
        self.started_at += offset;
        self.last_score_at += offset;
        self.last_frame_at = now;
        self.state = RunState::Running;
        info!("resumed after {:.1}s", offset.as_secs_f32());
    }

    /// One point per whole elapsed second; the remainder carries over.
    fn accrue_score(&mut self, world: &mut World, now: Instant) {
        let whole = now.saturating_duration_since(self.last_score_at).as_secs();
        if whole >= 1 {
            world.stats.score += whole as u32;
            self.last_score_at += Duration::from_secs(whole);
        }
    }

    fn finish(&mut self, dead: bool, now: Instant) -> Step {
        self.state = RunState::GameOver { dead };
        self.frozen_at.get_or_insert(now);
        info!("game over (dead: {})", dead);
        Step::Over { dead }
    }
}
