//! Vector decomposition checker
//!
//! The player reads a target vector off the plot and dials in its x/y
//! components. Components within 0.2 of the target count as correct; within
//! 0.5 the answer is "close" (non-terminal feedback); anything else is
//! wrong. Targets scale with difficulty and go fractional above level 3.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::{VECTOR_CLOSE_TOLERANCE, VECTOR_POINTS, VECTOR_TOLERANCE};

/// A 2-D target (or user answer) vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetVector {
    pub x: f64,
    pub y: f64,
}

impl TargetVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Feedback for a decomposition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorVerdict {
    /// Both components within the strict tolerance
    Correct,
    /// Both within the loose tolerance but not both within the strict one
    Close,
    Incorrect,
}

impl VectorVerdict {
    pub fn message(&self) -> &'static str {
        match self {
            VectorVerdict::Correct => "Correct decomposition!",
            VectorVerdict::Close => "Close - fine-tune your components",
            VectorVerdict::Incorrect => "Not correct, try again",
        }
    }
}

/// Compare user components against the target
pub fn check(user: TargetVector, target: TargetVector) -> VectorVerdict {
    let dx = (user.x - target.x).abs();
    let dy = (user.y - target.y).abs();
    if dx < VECTOR_TOLERANCE && dy < VECTOR_TOLERANCE {
        VectorVerdict::Correct
    } else if dx < VECTOR_CLOSE_TOLERANCE && dy < VECTOR_CLOSE_TOLERANCE {
        VectorVerdict::Close
    } else {
        VectorVerdict::Incorrect
    }
}

/// Generate a target for the given difficulty level. Components come from a
/// difficulty-scaled integer range, snapped away from zero (|v| < 2 becomes
/// ±2); above difficulty 3 a fractional offset in [0, 0.8) is added toward
/// the component's sign.
pub fn generate_target<R: Rng>(rng: &mut R, difficulty: u32) -> TargetVector {
    let multiplier = difficulty.clamp(1, 5) as i64;
    let span = 2 * multiplier + 2;

    let mut component = |rng: &mut R| {
        let raw = rng.random_range(-span..=span);
        let mut v = if raw == 0 {
            // Sign is a coin flip when the draw lands exactly on zero
            if rng.random_bool(0.5) { 2.0 } else { -2.0 }
        } else if raw.abs() < 2 {
            2.0 * raw.signum() as f64
        } else {
            raw as f64
        };
        if difficulty > 3 {
            v += rng.random_range(0.0..0.8) * v.signum();
        }
        v
    };

    TargetVector {
        x: component(rng),
        y: component(rng),
    }
}

/// One vector decomposition game: a current target, difficulty and score
#[derive(Debug, Clone)]
pub struct VectorGame {
    rng: Pcg32,
    difficulty: u32,
    target: TargetVector,
    score: u32,
}

impl VectorGame {
    pub fn new(seed: u64, difficulty: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let target = generate_target(&mut rng, difficulty);
        Self {
            rng,
            difficulty,
            target,
            score: 0,
        }
    }

    pub fn target(&self) -> TargetVector {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Raise/lower difficulty; takes effect from the next target
    pub fn set_difficulty(&mut self, difficulty: u32) {
        self.difficulty = difficulty;
    }

    /// Check an attempt. A correct answer awards points and rolls a fresh
    /// target; close/incorrect leave the target in place for another try.
    pub fn submit(&mut self, user: TargetVector) -> VectorVerdict {
        let verdict = check(user, self.target);
        if verdict == VectorVerdict::Correct {
            self.score += VECTOR_POINTS;
            log::info!("vector solved, score {}", self.score);
            self.target = generate_target(&mut self.rng, self.difficulty);
        }
        verdict
    }

    /// Restart: zero the score and roll a fresh target
    pub fn reset(&mut self) {
        self.score = 0;
        self.target = generate_target(&mut self.rng, self.difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_check_tolerances() {
        let target = TargetVector::new(4.0, 3.0);
        assert_eq!(check(TargetVector::new(4.0, 3.0), target), VectorVerdict::Correct);
        assert_eq!(
            check(TargetVector::new(4.1, 2.9), target),
            VectorVerdict::Correct
        );
        assert_eq!(
            check(TargetVector::new(4.4, 2.6), target),
            VectorVerdict::Close
        );
        assert_eq!(
            check(TargetVector::new(6.0, 1.0), target),
            VectorVerdict::Incorrect
        );
    }

    #[test]
    fn test_close_requires_both_components() {
        let target = TargetVector::new(4.0, 3.0);
        // One component close, the other way off
        assert_eq!(
            check(TargetVector::new(4.1, 5.0), target),
            VectorVerdict::Incorrect
        );
    }

    proptest! {
        #[test]
        fn targets_avoid_zero_and_respect_range(seed: u64, difficulty in 1u32..=5) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let t = generate_target(&mut rng, difficulty);
            let span = 2.0 * difficulty.min(5) as f64 + 2.0;

            for v in [t.x, t.y] {
                prop_assert!(v.abs() >= 2.0);
                prop_assert!(v.abs() < span + 0.8);
                if difficulty <= 3 {
                    // Integer components below the fractional threshold
                    prop_assert_eq!(v.fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_submit_awards_and_rolls_new_target() {
        let mut game = VectorGame::new(99, 2);
        let target = game.target();
        assert_eq!(game.submit(target), VectorVerdict::Correct);
        assert_eq!(game.score(), VECTOR_POINTS);
        // Close and incorrect leave everything alone
        let next = game.target();
        let off = TargetVector::new(next.x + 3.0, next.y);
        assert_eq!(game.submit(off), VectorVerdict::Incorrect);
        assert_eq!(game.score(), VECTOR_POINTS);
        assert_eq!(game.target(), next);
    }

    #[test]
    fn test_reset_zeroes_score() {
        let mut game = VectorGame::new(5, 4);
        let target = game.target();
        let _ = game.submit(target);
        game.reset();
        assert_eq!(game.score(), 0);
    }
}
