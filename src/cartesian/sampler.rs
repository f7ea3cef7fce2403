//! Cross-product positions and random relocation sampling

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point the ball can occupy: the semantic pair from A×B plus the 2-D
/// coordinate used for on-screen placement. `plot.x` is the numeric value
/// from Set A; `plot.y` is the 1-based index of the symbol within Set B.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianPosition {
    /// Semantic pair (a, b) from A×B
    pub original: (i64, char),
    /// Plot coordinate; `plot.y ∈ [1, |B|]`
    pub plot: Vec2,
}

/// Full cross product A×B as plottable positions, A-major order.
/// Recompute whenever either set changes.
pub fn all_positions(set_a: &[i64], set_b: &[char]) -> Vec<CartesianPosition> {
    let mut positions = Vec::with_capacity(set_a.len() * set_b.len());
    for &a in set_a {
        for (i, &b) in set_b.iter().enumerate() {
            positions.push(CartesianPosition {
                original: (a, b),
                plot: Vec2::new(a as f32, (i + 1) as f32),
            });
        }
    }
    positions
}

/// Attempts of pure rejection before falling back to a scan
const MAX_RESAMPLES: usize = 32;

/// Sample a uniformly random position whose plot coordinate differs from
/// `current`. With no current position the first raw draw is returned.
///
/// Rejection is bounded: a board with fewer than 2 positions returns the
/// sole position (relocation is meaningless there), and after
/// `MAX_RESAMPLES` rejected draws a scan from a random offset picks the
/// first non-colliding entry.
pub fn sample_next<R: Rng>(
    rng: &mut R,
    positions: &[CartesianPosition],
    current: Option<Vec2>,
) -> Option<CartesianPosition> {
    if positions.is_empty() {
        return None;
    }
    let Some(current) = current else {
        return Some(positions[rng.random_range(0..positions.len())]);
    };
    if positions.len() < 2 {
        return Some(positions[0]);
    }

    for _ in 0..MAX_RESAMPLES {
        let candidate = positions[rng.random_range(0..positions.len())];
        if candidate.plot != current {
            return Some(candidate);
        }
    }

    // Pathologically unlucky draws: scan from a random offset
    let offset = rng.random_range(0..positions.len());
    positions
        .iter()
        .cycle()
        .skip(offset)
        .take(positions.len())
        .copied()
        .find(|p| p.plot != current)
        .or(Some(positions[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use crate::cartesian::sets::generate_sets;

    #[test]
    fn test_cross_product_layout() {
        let positions = all_positions(&[2, 7], &['a', 'c', 'e']);
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[0].original, (2, 'a'));
        assert_eq!(positions[0].plot, Vec2::new(2.0, 1.0));
        assert_eq!(positions[5].original, (7, 'e'));
        assert_eq!(positions[5].plot, Vec2::new(7.0, 3.0));
    }

    proptest! {
        #[test]
        fn cross_product_size_and_y_range(seed: u64) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (a, b) = generate_sets(&mut rng);
            let positions = all_positions(&a, &b);

            prop_assert_eq!(positions.len(), a.len() * b.len());
            for p in &positions {
                prop_assert!(p.plot.y >= 1.0 && p.plot.y <= b.len() as f32);
            }
        }
    }

    #[test]
    fn test_sample_never_repeats_plot() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = all_positions(&[1, 2, 3], &['a', 'b', 'c']);
        let mut current = sample_next(&mut rng, &positions, None).unwrap();
        for _ in 0..200 {
            let next = sample_next(&mut rng, &positions, Some(current.plot)).unwrap();
            assert_ne!(next.plot, current.plot);
            current = next;
        }
    }

    #[test]
    fn test_single_position_board_returns_it() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = all_positions(&[4], &['b']);
        let only = positions[0];
        // Even when the "current" position is the sole entry
        let next = sample_next(&mut rng, &positions, Some(only.plot)).unwrap();
        assert_eq!(next.original, only.original);
    }

    #[test]
    fn test_empty_board() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert!(sample_next(&mut rng, &[], None).is_none());
    }

    #[test]
    fn test_first_call_without_current() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = all_positions(&[1], &['a']);
        assert!(sample_next(&mut rng, &positions, None).is_some());
    }
}
