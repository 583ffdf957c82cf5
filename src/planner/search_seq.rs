use crate::engine::{Board, Move};

use super::quality::quality;
use super::{choose_best, PlannerConfig, SearchStats, Verdict};

/// Single-threaded lookahead planner.
///
/// For each legal direction the search simulates the move, hypothesizes a
/// value-2 spawn in every empty cell that touches an occupied cell, and either
/// recurses or scores the leaf with [`quality`]. Spawn outcomes fold into a
/// per-direction [`Verdict`] tracking the worst reachable quality, the
/// probability mass of that worst case, and the average quality loss relative
/// to the pre-move position.
pub struct Planner {
    cfg: PlannerConfig,
    stats: SearchStats,
}

impl Planner {
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_config(cfg: PlannerConfig) -> Self {
        Self {
            cfg,
            stats: SearchStats::default(),
        }
    }

    /// Pick the direction that best avoids degrading the position.
    ///
    /// Always returns a direction; on a terminal board the fallback verdict
    /// yields Up. Callers should check `apply(..).1` or `is_terminal` before
    /// acting on the advice.
    ///
    /// ```
    /// use smart_2048::engine::{Board, Move};
    /// use smart_2048::planner::Planner;
    /// let terminal = Board::from_grid([
    ///     [2, 4, 8, 16],
    ///     [4, 2, 16, 8],
    ///     [8, 16, 2, 4],
    ///     [16, 8, 4, 2],
    /// ]);
    /// assert_eq!(Planner::new().best_move(terminal), Move::Up);
    /// ```
    #[inline]
    pub fn best_move(&mut self, board: Board) -> Move {
        self.best_verdict(board).direction
    }

    /// The chosen verdict, with its quality/probability/loss bookkeeping.
    pub fn best_verdict(&mut self, board: Board) -> Verdict {
        let original_quality = quality(board);
        let results = self.run(board, original_quality);
        choose_best(&results, original_quality)
    }

    /// Per-direction verdicts in index order Up, Right, Down, Left.
    ///
    /// `None` marks a direction that moves nothing; the planner never
    /// recommends such a direction.
    pub fn verdicts(&mut self, board: Board) -> [Option<Verdict>; 4] {
        let original_quality = quality(board);
        self.run(board, original_quality)
    }

    /// Statistics from the last `best_move` / `best_verdict` / `verdicts` call.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    fn run(&mut self, board: Board, original_quality: i64) -> [Option<Verdict>; 4] {
        let mut nodes = 0u64;
        let results = self.plan(board, self.cfg.depth, original_quality, &mut nodes);
        self.stats.nodes = nodes;
        self.stats.peak_nodes = self.stats.peak_nodes.max(nodes);
        results
    }

    fn plan(
        &self,
        board: Board,
        depth: u8,
        original_quality: i64,
        nodes: &mut u64,
    ) -> [Option<Verdict>; 4] {
        let mut results = [None; 4];
        for dir in Move::ALL {
            let (next, moved) = board.apply(dir);
            if !moved {
                continue;
            }
            let mut verdict = Verdict::unset(dir);
            let candidates = spawn_candidates(&next);
            for &cell in &candidates {
                *nodes += 1;
                // The planner only ever hypothesizes a spawned 2; the live
                // 10% chance of a 4 is not modeled.
                let spawned = next.with_tile(cell, 2);
                let sub = if depth > 1 {
                    let sub_results = self.plan(spawned, depth - 1, original_quality, nodes);
                    choose_best(&sub_results, original_quality)
                } else {
                    leaf_verdict(spawned, original_quality, dir)
                };
                fold(&mut verdict, sub, candidates.len());
            }
            results[dir.index()] = Some(verdict);
        }
        results
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

/// Empty cells worth modelling a spawn in: those adjacent (4-neighborhood) to
/// at least one occupied cell. Isolated empties are pruned from the search.
pub(super) fn spawn_candidates(board: &Board) -> Vec<(usize, usize)> {
    board
        .empty_cells()
        .into_iter()
        .filter(|&(r, c)| {
            Move::ALL.iter().any(|m| {
                let (dr, dc) = m.offset();
                board.occupied(r as i32 + dr, c as i32 + dc)
            })
        })
        .collect()
}

/// Score a leaf: the spawned board's quality and its loss versus the score at
/// the top of the whole search (never negative).
pub(super) fn leaf_verdict(board: Board, original_quality: i64, direction: Move) -> Verdict {
    let tile_quality = quality(board);
    Verdict {
        quality: tile_quality,
        probability: 1.0,
        quality_loss: (original_quality - tile_quality).max(0) as f64,
        direction,
    }
}

/// Fold one spawn outcome into the direction's running verdict.
///
/// The verdict adopts a strictly worse sub-quality outright, accumulates
/// probability mass when a spawn position ties the current worst, and always
/// averages the sub-result's loss over the candidate count.
pub(super) fn fold(verdict: &mut Verdict, sub: Verdict, candidate_count: usize) {
    let share = candidate_count as f64;
    if verdict.quality == -1 || sub.quality < verdict.quality {
        verdict.quality = sub.quality;
        verdict.probability = sub.probability / share;
    } else if sub.quality == verdict.quality {
        verdict.probability += sub.probability / share;
    }
    verdict.quality_loss += sub.quality_loss / share;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::quality::quality;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn lone_tile(cell: (usize, usize)) -> Board {
        Board::EMPTY.with_tile(cell, 2)
    }

    #[test]
    fn candidates_require_an_occupied_neighbor() {
        let b = lone_tile((0, 0));
        let mut cells = spawn_candidates(&b);
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 1), (1, 0)]);

        assert!(spawn_candidates(&Board::EMPTY).is_empty());
    }

    #[test]
    fn depth_one_bookkeeping() {
        // A lone 2 at (0,3): Left compacts it to (0,0), leaving two spawn
        // candidates whose resulting boards score identically (112), so the
        // worst-case probability mass accumulates to 1.0 and the average loss
        // is 118 - 112 = 6.
        let board = lone_tile((0, 3));
        let original_quality = quality(board);
        assert_eq!(original_quality, 118);

        let mut planner = Planner::with_config(PlannerConfig {
            depth: 1,
            ..PlannerConfig::default()
        });
        let results = planner.verdicts(board);
        let left = results[Move::Left.index()].expect("Left must be legal");
        assert_eq!(left.quality, 112);
        assert_eq!(left.probability, 1.0);
        assert_eq!(left.quality_loss, 6.0);
        // The tile is already flush against the top and right walls.
        assert!(results[Move::Up.index()].is_none());
        assert!(results[Move::Right.index()].is_none());
        assert!(results[Move::Down.index()].is_some());
    }

    #[test]
    fn verdict_adopts_the_worst_spawn_outcome() {
        let mut verdict = Verdict::unset(Move::Left);
        let sub = |quality, probability, quality_loss| Verdict {
            quality,
            probability,
            quality_loss,
            direction: Move::Left,
        };
        fold(&mut verdict, sub(100, 1.0, 0.0), 4);
        assert_eq!(verdict.quality, 100);
        assert_eq!(verdict.probability, 0.25);
        fold(&mut verdict, sub(90, 1.0, 10.0), 4);
        assert_eq!(verdict.quality, 90);
        assert_eq!(verdict.probability, 0.25);
        fold(&mut verdict, sub(90, 1.0, 10.0), 4);
        assert_eq!(verdict.quality, 90);
        assert_eq!(verdict.probability, 0.5);
        assert_eq!(verdict.quality_loss, 5.0);
    }

    #[test]
    fn terminal_board_reports_full_loss() {
        let terminal = Board::from_grid([
            [2, 4, 8, 16],
            [4, 2, 16, 8],
            [8, 16, 2, 4],
            [16, 8, 4, 2],
        ]);
        let mut planner = Planner::new();
        let verdict = planner.best_verdict(terminal);
        assert_eq!(verdict.direction, Move::Up);
        assert_eq!(verdict.quality, -1);
        assert_eq!(verdict.quality_loss, quality(terminal) as f64);
    }

    #[test]
    fn never_recommends_a_noop() {
        let mut rng = StdRng::seed_from_u64(2048);
        let mut planner = Planner::new();
        for _ in 0..30 {
            let mut board = Board::EMPTY
                .with_random_tile(&mut rng)
                .with_random_tile(&mut rng);
            for _ in 0..rng.gen_range(0..20) {
                board = board.make_move(Move::ALL[rng.gen_range(0..4)], &mut rng);
            }
            if board.is_terminal() {
                continue;
            }
            let dir = planner.best_move(board);
            let (_, moved) = board.apply(dir);
            assert!(moved, "planner recommended a no-op on\n{}", board);
        }
    }

    #[test]
    fn stats_track_nodes() {
        let mut planner = Planner::new();
        let board = lone_tile((1, 1)).with_tile((2, 2), 4);
        let _ = planner.best_move(board);
        let stats = planner.last_stats();
        assert!(stats.nodes > 0);
        assert!(stats.peak_nodes >= stats.nodes);
        planner.reset_stats();
        assert_eq!(planner.last_stats().nodes, 0);
    }
}
