//! Cartesian-product "moving ball" timed challenge
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` per game instance)
//! - Host-supplied timestamps only (no ambient timers)
//! - No rendering or platform dependencies

pub mod animator;
pub mod game;
pub mod sampler;
pub mod sets;

pub use animator::{BallAnimator, BallStep};
pub use game::{CartesianGame, CartesianSnapshot, GameEvent, GamePhase, SelectOutcome, SubmitOutcome};
pub use sampler::{CartesianPosition, all_positions, sample_next};
pub use sets::generate_sets;
