//! Depth-limited lookahead planner for 2048.
//!
//! Two policy implementations share the same decision logic:
//! - [`Planner`]: single-threaded recursive search, the reference behavior.
//! - [`PlannerParallel`]: rayon-based variant that fans the four root
//!   directions out across threads and memoizes sub-searches.
//!
//! Both score candidate moves by simulating a few turns ahead with
//! hypothetical value-2 spawns and pick the direction that least degrades the
//! position. The search is deterministic; randomness only enters live play
//! through `Board::make_move` / `Board::with_random_tile`.
//!
//! Quick start
//! ```
//! use smart_2048::engine::Board;
//! use smart_2048::planner::Planner;
//!
//! let b = Board::from_grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]]);
//! let mut planner = Planner::new();
//! let dir = planner.best_move(b);
//! let (_, moved) = b.apply(dir);
//! assert!(moved);
//! ```

use crate::engine::Move;

mod quality;
mod search_par;
mod search_seq;

pub use search_par::PlannerParallel;
pub use search_seq::Planner;

/// Configurable knobs for the planner. Defaults preserve reference behavior.
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    /// Lookahead depth in player moves.
    pub depth: u8,
    /// Enable sub-search memoization (parallel implementation only).
    pub cache_enabled: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            cache_enabled: true,
        }
    }
}

/// Per-direction outcome of a (sub-)search.
///
/// `quality` is the worst achievable position score found under this
/// direction, or -1 while unset. `probability` is the likelihood mass assigned
/// to hitting that worst score across spawn positions. `quality_loss` is the
/// expected degradation relative to the score before moving, averaged over
/// spawn positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub quality: i64,
    pub probability: f64,
    pub quality_loss: f64,
    pub direction: Move,
}

impl Verdict {
    fn unset(direction: Move) -> Self {
        Verdict {
            quality: -1,
            probability: 1.0,
            quality_loss: 0.0,
            direction,
        }
    }
}

/// Basic search stats for a single evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub peak_nodes: u64,
}

/// Reduce a per-direction verdict array to the single best verdict.
///
/// Priority: strictly lower `quality_loss`, then strictly higher `quality`,
/// then strictly lower `probability`. When no direction produced any movement
/// the fallback verdict reports `quality_loss = original_quality` and Up,
/// signalling that no improving move exists.
pub(crate) fn choose_best(results: &[Option<Verdict>; 4], original_quality: i64) -> Verdict {
    let mut best: Option<Verdict> = None;
    for verdict in results.iter().flatten() {
        let better = match best {
            None => true,
            Some(b) => {
                verdict.quality_loss < b.quality_loss
                    || (verdict.quality_loss == b.quality_loss && verdict.quality > b.quality)
                    || (verdict.quality_loss == b.quality_loss
                        && verdict.quality == b.quality
                        && verdict.probability < b.probability)
            }
        };
        if better {
            best = Some(*verdict);
        }
    }
    best.unwrap_or(Verdict {
        quality: -1,
        probability: 1.0,
        quality_loss: original_quality as f64,
        direction: Move::Up,
    })
}

/// Advise a move for `board` using the default depth-3 sequential planner.
///
/// Returns Up on a terminal board (no legal move remains).
pub fn next_move(board: crate::engine::Board) -> Move {
    Planner::new().best_move(board)
}

/// Bench-only: expose the raw quality value for a board.
///
/// Enabled only with the `bench-internal` feature to keep the public API small.
#[cfg(feature = "bench-internal")]
#[inline]
pub fn quality_value(board: crate::engine::Board) -> i64 {
    quality::quality(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_best_prefers_lower_loss_then_quality_then_probability() {
        let v = |quality, probability, quality_loss, direction| Verdict {
            quality,
            probability,
            quality_loss,
            direction,
        };
        let results = [
            Some(v(50, 0.5, 10.0, Move::Up)),
            Some(v(80, 0.5, 4.0, Move::Right)),
            Some(v(90, 0.5, 4.0, Move::Down)),
            Some(v(90, 0.25, 4.0, Move::Left)),
        ];
        assert_eq!(choose_best(&results, 100).direction, Move::Left);

        let results = [
            Some(v(50, 0.5, 10.0, Move::Up)),
            Some(v(80, 0.5, 4.0, Move::Right)),
            None,
            None,
        ];
        assert_eq!(choose_best(&results, 100).direction, Move::Right);
    }

    #[test]
    fn choose_best_defaults_to_up_with_full_loss() {
        let best = choose_best(&[None, None, None, None], 84);
        assert_eq!(best.direction, Move::Up);
        assert_eq!(best.quality, -1);
        assert_eq!(best.probability, 1.0);
        assert_eq!(best.quality_loss, 84.0);
    }
}
