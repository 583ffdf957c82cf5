use ahash::RandomState as AHasher;
use dashmap::DashMap;
use rayon::prelude::*;

use crate::engine::{Board, Move};

use super::quality::quality;
use super::search_seq::{fold, leaf_verdict, spawn_candidates};
use super::{choose_best, PlannerConfig, SearchStats, Verdict};

type MemoTable = DashMap<(Board, u8), Verdict, AHasher>;

/// Parallel lookahead planner.
///
/// The four root directions are independent (every branch works on its own
/// board copy), so they fan out across rayon workers. A shared `DashMap`
/// memoizes reduced sub-search results per (board, depth); the search is
/// deterministic, so memoization cannot change any verdict, only skip
/// recomputation when sibling branches reach the same position.
pub struct PlannerParallel {
    cfg: PlannerConfig,
    stats: SearchStats,
}

impl PlannerParallel {
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::default())
    }

    pub fn with_config(cfg: PlannerConfig) -> Self {
        Self {
            cfg,
            stats: SearchStats::default(),
        }
    }

    /// Pick the best direction; Up on a terminal board.
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
    pub fn verdicts(&mut self, board: Board) -> [Option<Verdict>; 4] {
        let original_quality = quality(board);
        self.run(board, original_quality)
    }

    /// Stats are not tracked across worker threads; always zero nodes.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    fn run(&self, board: Board, original_quality: i64) -> [Option<Verdict>; 4] {
        let memo: MemoTable = DashMap::with_hasher(AHasher::new());
        let evaluated: Vec<(usize, Option<Verdict>)> = Move::ALL
            .par_iter()
            .map(|&dir| {
                (
                    dir.index(),
                    self.plan_direction(board, dir, self.cfg.depth, original_quality, &memo),
                )
            })
            .collect();
        let mut results = [None; 4];
        for (index, verdict) in evaluated {
            results[index] = verdict;
        }
        results
    }

    fn plan_direction(
        &self,
        board: Board,
        dir: Move,
        depth: u8,
        original_quality: i64,
        memo: &MemoTable,
    ) -> Option<Verdict> {
        let (next, moved) = board.apply(dir);
        if !moved {
            return None;
        }
        let mut verdict = Verdict::unset(dir);
        let candidates = spawn_candidates(&next);
        for &cell in &candidates {
            let spawned = next.with_tile(cell, 2);
            let sub = if depth > 1 {
                self.reduce(spawned, depth - 1, original_quality, memo)
            } else {
                leaf_verdict(spawned, original_quality, dir)
            };
            fold(&mut verdict, sub, candidates.len());
        }
        Some(verdict)
    }

    /// Recurse one level and reduce the sub-verdicts with [`choose_best`],
    /// consulting the memo table keyed on (board, remaining depth).
    fn reduce(&self, board: Board, depth: u8, original_quality: i64, memo: &MemoTable) -> Verdict {
        if self.cfg.cache_enabled {
            if let Some(hit) = memo.get(&(board, depth)) {
                return *hit;
            }
        }
        let mut results = [None; 4];
        for dir in Move::ALL {
            results[dir.index()] =
                self.plan_direction(board, dir, depth, original_quality, memo);
        }
        let reduced = choose_best(&results, original_quality);
        if self.cfg.cache_enabled {
            memo.insert((board, depth), reduced);
        }
        reduced
    }
}

impl Default for PlannerParallel {
    fn default() -> Self {
        Self::new()
    }
}
