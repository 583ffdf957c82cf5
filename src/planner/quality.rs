use crate::engine::{Board, SIZE};

/// Position-quality heuristic: single-axis monotonicity plus empty space.
///
/// The traversal enumerates one axis only (each scored line is a column read
/// top to bottom), mirroring the reference scorer. Per line, two accumulators
/// seeded at -1 run over the tile values with a -1 sentinel for "no previous
/// value": the decreasing accumulator collects values along non-increasing
/// runs, and each strict descent additionally charges the previous value
/// against the increasing accumulator. The line contributes the larger of the
/// two. Empty cells are worth 8 points each on top.
pub(crate) fn quality(board: Board) -> i64 {
    let mut mono_score = 0i64;
    for line in 0..SIZE {
        let mut inc_score = -1i64;
        let mut dec_score = -1i64;
        let mut prev_value = -1i64;
        for step in 0..SIZE {
            let value = board.get(step, line) as i64;
            if value <= prev_value || prev_value == -1 {
                dec_score += value;
                if value < prev_value {
                    inc_score -= prev_value;
                }
            }
            inc_score += value;
            prev_value = value;
        }
        mono_score += inc_score.max(dec_score);
    }
    mono_score + 8 * board.count_empty() as i64
}
