//! Timed challenge controller for the Cartesian game
//!
//! Owns the round state machine: every 5 seconds the ball relocates to a
//! fresh A×B position, a 1-second countdown ticks toward the next move, and
//! the player races to submit the matching (A, B) pair. A correct answer
//! scores 10 points and restarts both timers on the spot, so a fresh
//! 5-second window begins at the moment of the answer rather than at the
//! next scheduled tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::animator::BallAnimator;
use super::sampler::{CartesianPosition, all_positions, sample_next};
use super::sets::generate_sets;
use crate::consts::{COUNTDOWN_START, COUNTDOWN_TICK_MS, PAIR_POINTS, RELOCATE_INTERVAL_MS};
use crate::sched::{Scheduler, TimerHandle};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// No round in progress; waiting for `start`
    Idle,
    /// Round active: timers running, answers accepted
    Running,
    /// Round torn down; terminal until a new `start`
    Ended,
}

/// Timer purposes owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Countdown,
    Relocate,
}

/// State changes surfaced to the presentation layer by `frame`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// Ball marker moved (interpolated or landed)
    BallMoved { position: CartesianPosition },
    /// Countdown display changed
    CountdownChanged { seconds: u32 },
}

/// Result of a selection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// Advisory no-op: selections only count while running
    NotRunning,
}

impl SelectOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SelectOutcome::Selected => "",
            SelectOutcome::NotRunning => "Start the game before picking elements",
        }
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Pair matched; score already includes the award
    Correct { score: u32 },
    /// Pair did not match; the ball's actual pair is reported
    Incorrect { expected: (i64, char) },
    /// Advisory no-ops
    NoPendingPair,
    NotRunning,
}

impl SubmitOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Correct { score } => format!("Correct! Score: {}", score),
            SubmitOutcome::Incorrect { expected } => {
                format!("Not quite - the ball was at ({}, {})", expected.0, expected.1)
            }
            SubmitOutcome::NoPendingPair => "Pick one element from A and one from B first".into(),
            SubmitOutcome::NotRunning => "Start the game before answering".into(),
        }
    }
}

/// Read-only view of the game for the presentation layer / JS host
#[derive(Debug, Clone, Serialize)]
pub struct CartesianSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub countdown: u32,
    pub set_a: Vec<i64>,
    pub set_b: Vec<char>,
    pub ball: Option<CartesianPosition>,
    pub pending_a: Option<i64>,
    pub pending_b: Option<char>,
}

/// The Cartesian-product timed challenge
#[derive(Debug, Clone)]
pub struct CartesianGame {
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    set_a: Vec<i64>,
    set_b: Vec<char>,
    positions: Vec<CartesianPosition>,
    ball: Option<CartesianPosition>,
    animator: BallAnimator,
    sched: Scheduler<TimerEvent>,
    countdown_timer: Option<TimerHandle>,
    relocate_timer: Option<TimerHandle>,
    countdown: u32,
    score: u32,
    pending_a: Option<i64>,
    pending_b: Option<char>,
    /// Events raised outside `frame` (the submit fast path), drained by the
    /// next `frame` so the presentation layer sees every state change
    pending_events: Vec<GameEvent>,
}

impl CartesianGame {
    /// Create an idle game with a reproducible run seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            set_a: Vec::new(),
            set_b: Vec::new(),
            positions: Vec::new(),
            ball: None,
            animator: BallAnimator::new(),
            sched: Scheduler::new(0.0),
            countdown_timer: None,
            relocate_timer: None,
            countdown: COUNTDOWN_START,
            score: 0,
            pending_a: None,
            pending_b: None,
            pending_events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn set_a(&self) -> &[i64] {
        &self.set_a
    }

    pub fn set_b(&self) -> &[char] {
        &self.set_b
    }

    /// Current ball position (interpolated while a relocation is in flight)
    pub fn ball(&self) -> Option<&CartesianPosition> {
        self.ball.as_ref()
    }

    /// All plottable A×B positions for the current round
    pub fn positions(&self) -> &[CartesianPosition] {
        &self.positions
    }

    pub fn pending_pair(&self) -> (Option<i64>, Option<char>) {
        (self.pending_a, self.pending_b)
    }

    pub fn snapshot(&self) -> CartesianSnapshot {
        CartesianSnapshot {
            phase: self.phase,
            score: self.score,
            countdown: self.countdown,
            set_a: self.set_a.clone(),
            set_b: self.set_b.clone(),
            ball: self.ball,
            pending_a: self.pending_a,
            pending_b: self.pending_b,
        }
    }

    /// Start a round. Valid from Idle or Ended; a running game ignores it.
    /// Generates fresh sets, places the ball directly (no animation) and
    /// starts the relocation and countdown timers.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase == GamePhase::Running {
            log::warn!("start ignored: round already running");
            return false;
        }

        let (set_a, set_b) = generate_sets(&mut self.rng);
        self.positions = all_positions(&set_a, &set_b);
        self.set_a = set_a;
        self.set_b = set_b;

        self.score = 0;
        self.countdown = COUNTDOWN_START;
        self.pending_a = None;
        self.pending_b = None;
        self.pending_events.clear();
        self.animator.cancel();

        self.sched = Scheduler::new(now_ms);
        self.start_timers();

        self.ball = sample_next(&mut self.rng, &self.positions, None);
        self.phase = GamePhase::Running;
        log::info!(
            "cartesian round started (seed {}, |A|={}, |B|={})",
            self.seed,
            self.set_a.len(),
            self.set_b.len()
        );
        true
    }

    /// Host drive point: advance timers to `now_ms`, relocating the ball and
    /// ticking the countdown as deadlines pass, then step the animation.
    /// Returns the state changes for the presentation layer, in order,
    /// starting with any changes a submit raised since the previous frame.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.phase != GamePhase::Running {
            return Vec::new();
        }

        let mut events = std::mem::take(&mut self.pending_events);
        for timer in self.sched.advance_to(now_ms) {
            match timer {
                TimerEvent::Countdown => {
                    self.countdown = self.countdown.saturating_sub(1);
                    events.push(GameEvent::CountdownChanged {
                        seconds: self.countdown,
                    });
                }
                TimerEvent::Relocate => self.relocate(&mut events),
            }
        }

        if let Some(step) = self.animator.step(now_ms) {
            self.ball = Some(step.position);
            events.push(GameEvent::BallMoved {
                position: step.position,
            });
        }

        events
    }

    /// Select the A-component of the candidate pair. Reselecting before
    /// submission overwrites the previous choice.
    pub fn select_a(&mut self, value: i64) -> SelectOutcome {
        if self.phase != GamePhase::Running {
            log::warn!("select_a({}) ignored: not running", value);
            return SelectOutcome::NotRunning;
        }
        self.pending_a = Some(value);
        SelectOutcome::Selected
    }

    /// Select the B-component of the candidate pair
    pub fn select_b(&mut self, value: char) -> SelectOutcome {
        if self.phase != GamePhase::Running {
            log::warn!("select_b({}) ignored: not running", value);
            return SelectOutcome::NotRunning;
        }
        self.pending_b = Some(value);
        SelectOutcome::Selected
    }

    /// Drop the pending pair without submitting
    pub fn clear_selection(&mut self) {
        self.pending_a = None;
        self.pending_b = None;
    }

    /// Compare the pending pair to the ball's semantic pair. A match awards
    /// points and restarts both timers immediately (instant relocation, fresh
    /// 5-second window). A mismatch clears the pair and leaves the timers
    /// running.
    pub fn submit(&mut self, now_ms: f64) -> SubmitOutcome {
        if self.phase != GamePhase::Running {
            log::warn!("submit ignored: not running");
            return SubmitOutcome::NotRunning;
        }
        let (Some(a), Some(b), Some(ball)) = (self.pending_a, self.pending_b, self.ball) else {
            return SubmitOutcome::NoPendingPair;
        };

        self.pending_a = None;
        self.pending_b = None;

        if (a, b) == ball.original {
            self.score += PAIR_POINTS;
            log::info!("correct pair ({}, {}): score {}", a, b, self.score);

            // Fast path: invalidate and replace both timers so the next
            // relocation window starts exactly now, then move the ball.
            self.cancel_timers();
            let _ = self.sched.advance_to(now_ms);
            self.start_timers();
            let mut events = std::mem::take(&mut self.pending_events);
            self.relocate(&mut events);
            self.pending_events = events;

            SubmitOutcome::Correct { score: self.score }
        } else {
            log::info!("wrong pair ({}, {}), ball at {:?}", a, b, ball.original);
            SubmitOutcome::Incorrect {
                expected: ball.original,
            }
        }
    }

    /// Tear the round down: cancel both timers and the in-flight animation
    /// atomically, reset the score. Terminal until a new `start`.
    pub fn end(&mut self) -> bool {
        if self.phase == GamePhase::Ended {
            log::warn!("end ignored: already ended");
            return false;
        }
        self.cancel_timers();
        self.sched.clear();
        self.animator.cancel();
        self.score = 0;
        self.pending_a = None;
        self.pending_b = None;
        self.pending_events.clear();
        self.ball = None;
        self.phase = GamePhase::Ended;
        log::info!("cartesian round ended");
        true
    }

    /// Schedule both repeating timers. Countdown first: when a countdown
    /// deadline coincides with a relocation, the decrement lands before the
    /// relocation resets the display to its start value.
    fn start_timers(&mut self) {
        self.countdown_timer = Some(
            self.sched
                .schedule_repeating(COUNTDOWN_TICK_MS, TimerEvent::Countdown),
        );
        self.relocate_timer = Some(
            self.sched
                .schedule_repeating(RELOCATE_INTERVAL_MS, TimerEvent::Relocate),
        );
    }

    fn cancel_timers(&mut self) {
        if let Some(h) = self.countdown_timer.take() {
            let _ = self.sched.cancel(h);
        }
        if let Some(h) = self.relocate_timer.take() {
            let _ = self.sched.cancel(h);
        }
    }

    /// Pick a fresh position and animate toward it; reset the countdown
    fn relocate(&mut self, events: &mut Vec<GameEvent>) {
        let current = self.ball.map(|p| p.plot);
        if let Some(next) = sample_next(&mut self.rng, &self.positions, current) {
            let from = current.unwrap_or(next.plot);
            self.animator.begin(from, next, self.sched.now_ms());
        }
        self.countdown = COUNTDOWN_START;
        events.push(GameEvent::CountdownChanged {
            seconds: self.countdown,
        });
    }
}
