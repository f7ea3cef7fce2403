//! Time-sliced ball relocation animation
//!
//! Interpolates the ball marker between two plot coordinates over a fixed
//! duration with a cubic ease-in-out curve. The host steps the animation
//! with its frame timestamps; cancellation drops the in-flight state so no
//! stale positions are emitted afterwards.

use glam::Vec2;

use super::sampler::CartesianPosition;
use crate::consts::{BALL_ANIM_DURATION_MS, TRAIL_LENGTH};
use crate::{ease_in_out_cubic, lerp};

/// In-flight interpolation state, owned by the animator for one transition
#[derive(Debug, Clone)]
struct AnimationState {
    from: Vec2,
    to: CartesianPosition,
    start_ms: f64,
    duration_ms: f64,
}

/// One emitted animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallStep {
    /// Interpolated position, carrying the destination's semantic pair
    pub position: CartesianPosition,
    /// True on the final emission (exact destination)
    pub done: bool,
}

/// Drives a single ball transition at a time
#[derive(Debug, Clone, Default)]
pub struct BallAnimator {
    anim: Option<AnimationState>,
    /// Most recent emitted points, newest first (rendering only)
    trail: Vec<Vec2>,
}

impl BallAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transition from `from` to `to.plot`, starting at `start_ms`
    /// and lasting the standard duration. Replaces any in-flight transition.
    pub fn begin(&mut self, from: Vec2, to: CartesianPosition, start_ms: f64) {
        self.begin_with_duration(from, to, start_ms, BALL_ANIM_DURATION_MS);
    }

    pub fn begin_with_duration(
        &mut self,
        from: Vec2,
        to: CartesianPosition,
        start_ms: f64,
        duration_ms: f64,
    ) {
        self.anim = Some(AnimationState {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1.0),
        });
    }

    /// Stop the in-flight transition. No emissions after this returns.
    pub fn cancel(&mut self) {
        self.anim = None;
        self.trail.clear();
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    /// Recent emitted points, newest first
    pub fn trail(&self) -> &[Vec2] {
        &self.trail
    }

    /// Advance to the host timestamp. Emits the interpolated position, or
    /// the exact destination once progress reaches 1 (the transition ends
    /// and further calls return `None`).
    pub fn step(&mut self, now_ms: f64) -> Option<BallStep> {
        let anim = self.anim.as_ref()?;

        let elapsed = now_ms - anim.start_ms;
        let progress = (elapsed / anim.duration_ms).clamp(0.0, 1.0) as f32;
        let eased = ease_in_out_cubic(progress);

        let step = if progress >= 1.0 {
            // Land exactly on the destination
            let to = anim.to;
            self.anim = None;
            BallStep {
                position: to,
                done: true,
            }
        } else {
            let plot = Vec2::new(
                lerp(anim.from.x, anim.to.plot.x, eased),
                lerp(anim.from.y, anim.to.plot.y, eased),
            );
            BallStep {
                position: CartesianPosition {
                    original: anim.to.original,
                    plot,
                },
                done: false,
            }
        };

        self.trail.insert(0, step.position.plot);
        self.trail.truncate(TRAIL_LENGTH);

        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(x: f32, y: f32) -> CartesianPosition {
        CartesianPosition {
            original: (x as i64, 'a'),
            plot: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_endpoints() {
        let mut anim = BallAnimator::new();
        anim.begin(Vec2::new(1.0, 1.0), dest(5.0, 3.0), 1_000.0);

        let start = anim.step(1_000.0).unwrap();
        assert!(!start.done);
        assert!((start.position.plot - Vec2::new(1.0, 1.0)).length() < 1e-5);

        let end = anim.step(1_000.0 + BALL_ANIM_DURATION_MS).unwrap();
        assert!(end.done);
        assert_eq!(end.position.plot, Vec2::new(5.0, 3.0));
        assert!(!anim.is_animating());
        assert!(anim.step(2_000.0).is_none());
    }

    #[test]
    fn test_intermediate_points_on_segment() {
        let from = Vec2::new(2.0, 1.0);
        let to = dest(6.0, 4.0);
        let mut anim = BallAnimator::new();
        anim.begin(from, to, 0.0);

        for ms in [20.0, 60.0, 100.0, 140.0, 180.0] {
            let p = anim.step(ms).unwrap().position.plot;
            // Collinear with the segment endpoints
            let d = to.plot - from;
            let cross = (p.x - from.x) * d.y - (p.y - from.y) * d.x;
            assert!(cross.abs() < 1e-4);
        }
    }

    #[test]
    fn test_progress_monotonic() {
        let from = Vec2::new(0.0, 0.0);
        let mut anim = BallAnimator::new();
        anim.begin(from, dest(10.0, 0.0), 0.0);

        let mut prev = -1.0_f32;
        for i in 0..=20 {
            let now = i as f64 * 10.0;
            let x = anim.step(now).unwrap().position.plot.x;
            assert!(x >= prev);
            prev = x;
            if !anim.is_animating() {
                break;
            }
        }
    }

    #[test]
    fn test_emitted_pair_is_destination() {
        let mut anim = BallAnimator::new();
        let to = CartesianPosition {
            original: (7, 'c'),
            plot: Vec2::new(7.0, 3.0),
        };
        anim.begin(Vec2::new(1.0, 1.0), to, 0.0);
        assert_eq!(anim.step(50.0).unwrap().position.original, (7, 'c'));
    }

    #[test]
    fn test_cancel_stops_emissions() {
        let mut anim = BallAnimator::new();
        anim.begin(Vec2::new(0.0, 0.0), dest(4.0, 2.0), 0.0);
        assert!(anim.step(50.0).is_some());
        anim.cancel();
        assert!(anim.step(100.0).is_none());
        assert!(anim.trail().is_empty());
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut anim = BallAnimator::new();
        anim.begin(Vec2::new(0.0, 0.0), dest(4.0, 2.0), 0.0);
        for i in 1..10 {
            let _ = anim.step(i as f64 * 10.0);
        }
        assert!(anim.trail().len() <= TRAIL_LENGTH);
    }
}
