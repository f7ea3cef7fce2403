//! Math Arcade - interactive math-game state machines
//!
//! Core modules:
//! - `cartesian`: Cartesian-product "moving ball" timed challenge
//! - `functions`: function identification quiz / construction checker
//! - `venn`: Venn-diagram set classification engine
//! - `vector`: vector decomposition checker
//! - `sched`: deterministic timer scheduler with cancellable handles
//! - `plot`: series handed to the external plotting surface
//! - `config`: application-level configuration (theme)
//!
//! All game logic is deterministic and host-driven: each game owns a seeded
//! RNG and is advanced by timestamps supplied from outside (animation frames
//! in the browser, synthetic clocks in tests). No rendering or platform
//! dependencies live in these modules.

pub mod cartesian;
pub mod config;
pub mod element;
pub mod functions;
pub mod plot;
pub mod sched;
pub mod vector;
pub mod venn;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{AppConfig, Theme};
pub use element::Element;

/// Game tuning constants
pub mod consts {
    /// Interval between ball relocations in the Cartesian game (ms)
    pub const RELOCATE_INTERVAL_MS: f64 = 5_000.0;
    /// Countdown tick interval (ms)
    pub const COUNTDOWN_TICK_MS: f64 = 1_000.0;
    /// Countdown start value (seconds shown to the player)
    pub const COUNTDOWN_START: u32 = 5;
    /// Ball relocation animation duration (ms)
    pub const BALL_ANIM_DURATION_MS: f64 = 200.0;
    /// Points for a correct Cartesian pair
    pub const PAIR_POINTS: u32 = 10;
    /// Points for a correct vector decomposition
    pub const VECTOR_POINTS: u32 = 10;
    /// Maximum points per Venn problem
    pub const VENN_MAX_POINTS: u32 = 10;

    /// Set sizes for the Cartesian game
    pub const SET_MIN_LEN: usize = 3;
    pub const SET_MAX_LEN: usize = 4;
    /// Set A values are drawn from [1, SET_A_MAX]
    pub const SET_A_MAX: i64 = 10;
    /// Fixed symbol alphabet for Set B
    pub const SET_B_ALPHABET: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

    /// Trail history length for the moving ball (current behavior: no trail)
    pub const TRAIL_LENGTH: usize = 1;

    /// Construct-mode coefficient tolerance (absolute)
    pub const COEFF_TOLERANCE: f64 = 0.5;
    /// Vector component tolerance for "correct"
    pub const VECTOR_TOLERANCE: f64 = 0.2;
    /// Vector component tolerance for "close"
    pub const VECTOR_CLOSE_TOLERANCE: f64 = 0.5;

    /// Plot sampling domain and resolution
    pub const PLOT_X_MIN: f64 = -10.0;
    pub const PLOT_X_MAX: f64 = 10.0;
    pub const PLOT_SAMPLES: usize = 100;
}

/// Cubic ease-in-out curve on clamped progress `t ∈ [0, 1]`
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        // Clamped outside [0, 1]
        assert_eq!(ease_in_out_cubic(-0.3), 0.0);
        assert_eq!(ease_in_out_cubic(1.7), 1.0);
    }

    #[test]
    fn test_ease_midpoint_and_symmetry() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // Symmetric around the midpoint
        let (lo, hi) = (ease_in_out_cubic(0.25), ease_in_out_cubic(0.75));
        assert!((lo + hi - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let e = ease_in_out_cubic(i as f32 / 100.0);
            assert!(e >= prev);
            prev = e;
        }
    }
}
