use rand::Rng;
use std::fmt;

/// Grid side length. Scoring formulas and corner logic assume 4x4.
pub const SIZE: usize = 4;

type Grid = [[u32; SIZE]; SIZE];

/// A direction to shift/merge tiles.
///
/// Discriminants follow the reference ordering: Up=0, Right=1, Down=2, Left=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// All four directions in index order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// (row, col) offset used for 4-neighborhood adjacency tests.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Move::Up => (0, -1),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "Up",
            Move::Right => "Right",
            Move::Down => "Down",
            Move::Left => "Left",
        };
        write!(f, "{}", name)
    }
}

/// A 4x4 2048 board holding actual tile values (0 = empty, otherwise powers of two).
///
/// `Copy` value semantics give the planner independent snapshots per search
/// branch; sibling branches never observe each other's writes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board(Grid);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Construct a `Board` from a raw 4x4 grid of tile values.
    ///
    /// The caller is responsible for supplying only valid tile values; see
    /// the `snapshot` module for validated construction from external input.
    #[inline]
    pub fn from_grid(grid: [[u32; SIZE]; SIZE]) -> Self {
        Board(grid)
    }

    /// Borrow the underlying grid.
    #[inline]
    pub fn grid(&self) -> &[[u32; SIZE]; SIZE] {
        &self.0
    }

    /// Tile value at (row, col); 0 means empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.0[row][col]
    }

    /// Return a copy with `value` written at `cell`.
    #[inline]
    pub fn with_tile(self, cell: (usize, usize), value: u32) -> Self {
        let mut grid = self.0;
        grid[cell.0][cell.1] = value;
        Board(grid)
    }

    /// Shift and merge tiles in `dir`, reporting whether anything changed.
    ///
    /// Up/Down are implemented as rotate, merge-left, rotate back; Right as
    /// mirror, merge-left, mirror back. A move that changes nothing returns
    /// `moved = false` and the caller must not spawn a tile in that case.
    ///
    /// ```
    /// use smart_2048::engine::{Board, Move};
    /// let b = Board::from_grid([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
    /// let (b, moved) = b.apply(Move::Left);
    /// assert!(moved);
    /// assert_eq!(b.grid()[0], [4, 8, 0, 0]);
    /// ```
    pub fn apply(self, dir: Move) -> (Board, bool) {
        let (grid, moved) = match dir {
            Move::Left => merge_grid_left(self.0),
            Move::Right => {
                let (g, moved) = merge_grid_left(mirror(self.0));
                (mirror(g), moved)
            }
            Move::Up => {
                let (g, moved) = merge_grid_left(rotate_ccw(self.0));
                (rotate_cw(g), moved)
            }
            Move::Down => {
                let (g, moved) = merge_grid_left(rotate_cw(self.0));
                (rotate_ccw(g), moved)
            }
        };
        (Board(grid), moved)
    }

    /// Insert a 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
    ///
    /// Returns the board unchanged when no cell is empty. Used by the live
    /// game loop; the planner's internal simulation never calls this.
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let empties = self.empty_cells();
        if empties.is_empty() {
            return self;
        }
        let cell = empties[rng.gen_range(0..empties.len())];
        let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        self.with_tile(cell, value)
    }

    /// Convenience: like `with_random_tile` but uses thread-local RNG.
    pub fn with_random_tile_thread(self) -> Self {
        let mut rng = rand::thread_rng();
        self.with_random_tile(&mut rng)
    }

    /// Apply a move then spawn a random tile iff the move changed the board.
    ///
    /// ```
    /// use smart_2048::engine::{Board, Move};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// let _ = b.make_move(Move::Left, &mut rng);
    /// ```
    pub fn make_move<R: Rng + ?Sized>(self, dir: Move, rng: &mut R) -> Self {
        let (moved_board, moved) = self.apply(dir);
        if moved {
            moved_board.with_random_tile(rng)
        } else {
            self
        }
    }

    /// True iff no cell is empty and no two 4-adjacent cells are equal.
    pub fn is_terminal(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.0[r][c] == 0 {
                    return false;
                }
                if r + 1 < SIZE && self.0[r][c] == self.0[r + 1][c] {
                    return false;
                }
                if c + 1 < SIZE && self.0[r][c] == self.0[r][c + 1] {
                    return false;
                }
            }
        }
        true
    }

    /// All zero-valued cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.0[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Count the number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.0.iter().flatten().filter(|&&value| value == 0).count()
    }

    /// False when (row, col) is out of bounds or the cell is empty.
    #[inline]
    pub fn occupied(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row >= SIZE as i32 || col >= SIZE as i32 {
            return false;
        }
        self.0[row as usize][col as usize] != 0
    }

    /// Sum of all tile values; the score shown by the reference display layer.
    pub fn score(&self) -> u64 {
        self.0.iter().flatten().map(|&value| value as u64).sum()
    }

    /// The highest tile value present (0 on an empty board).
    pub fn highest_tile(&self) -> u32 {
        self.0.iter().flatten().copied().max().unwrap_or(0)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for &value in row {
                if value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Free-function form of [`Board::apply`] for callers that prefer it.
#[inline]
pub fn apply(board: Board, dir: Move) -> (Board, bool) {
    board.apply(dir)
}

/// Free-function form of [`Board::with_random_tile_thread`].
#[inline]
pub fn spawn_random_tile(board: Board) -> Board {
    board.with_random_tile_thread()
}

/// Merge one row toward the left in a single pass.
///
/// Compact non-zeros left, merge each equal adjacent pair once (left tile
/// doubles, right zeroes), compact again, pad with zeros. The single pass is
/// what keeps `[2,2,2,2]` at `[4,4,0,0]` instead of cascading to `[8,...]`.
fn merge_row_left(row: [u32; SIZE]) -> [u32; SIZE] {
    let mut compact: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    for i in 1..compact.len() {
        if compact[i] == compact[i - 1] {
            compact[i - 1] *= 2;
            compact[i] = 0;
        }
    }
    let mut out = [0u32; SIZE];
    let mut write = 0;
    for value in compact {
        if value != 0 {
            out[write] = value;
            write += 1;
        }
    }
    out
}

fn merge_grid_left(grid: Grid) -> (Grid, bool) {
    let mut out = grid;
    let mut moved = false;
    for r in 0..SIZE {
        let new_row = merge_row_left(grid[r]);
        if new_row != grid[r] {
            out[r] = new_row;
            moved = true;
        }
    }
    (out, moved)
}

fn mirror(grid: Grid) -> Grid {
    let mut out = grid;
    for row in &mut out {
        row.reverse();
    }
    out
}

fn rotate_cw(grid: Grid) -> Grid {
    let mut out = [[0; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE {
            out[r][c] = grid[SIZE - 1 - c][r];
        }
    }
    out
}

fn rotate_ccw(grid: Grid) -> Grid {
    let mut out = [[0; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE {
            out[r][c] = grid[c][SIZE - 1 - r];
        }
    }
    out
}
