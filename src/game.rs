//! Core game state and logic
//!
//! The engine has no notion of time: a driver calls exactly one operation per
//! input event or gravity tick, and every operation either commits a new,
//! valid placement or leaves the state untouched.

use crate::bag::BlockQueue;
use crate::board::Grid;
use crate::piece::PlacedBlock;
use crate::tetromino::{BlockKind, RotationDirection};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Active,
    /// Terminal: a freshly dealt block collided at its spawn offset
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    /// Ends the session; handled by the driver, ignored by the engine
    Quit,
}

/// One game session
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: Grid,
    queue: BlockQueue,
    current: PlacedBlock,
    state: GameState,
    lines_cleared: usize,
    blocks_locked: usize,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Create a new game on the standard 22x10 grid
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a new game whose block sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_grid(Grid::default(), seed)
    }

    /// Start a session over an existing grid. If the first block cannot
    /// spawn, the session starts out in GameOver.
    pub fn with_grid(grid: Grid, seed: u64) -> Self {
        let mut queue = BlockQueue::with_seed(seed);
        let current = queue.deal();
        let mut engine = Self {
            grid,
            queue,
            current,
            state: GameState::Active,
            lines_cleared: 0,
            blocks_locked: 0,
        };
        if !engine.is_valid(&engine.current) {
            tracing::info!("first block cannot spawn, game over");
            engine.state = GameState::GameOver;
        }
        tracing::debug!(seed, kind = ?engine.current.kind(), "game started");
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> &PlacedBlock {
        &self.current
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Total rows cleared this session
    pub fn lines_cleared(&self) -> usize {
        self.lines_cleared
    }

    /// Total blocks locked into the grid this session
    pub fn blocks_locked(&self) -> usize {
        self.blocks_locked
    }

    /// Kind of the block that will be dealt after the current one locks
    pub fn next_kind(&self) -> BlockKind {
        self.queue.peek()
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        if self.is_game_over() {
            return;
        }
        match action {
            Action::MoveLeft => {
                self.move_left();
            }
            Action::MoveRight => {
                self.move_right();
            }
            Action::SoftDrop => {
                self.move_down();
            }
            Action::HardDrop => {
                self.hard_drop();
            }
            Action::RotateCW => {
                self.rotate_clockwise();
            }
            Action::RotateCCW => {
                self.rotate_counter_clockwise();
            }
            Action::Quit => {}
        }
    }

    /// A placement is valid iff all 4 tiles are on the grid and empty
    fn is_valid(&self, candidate: &PlacedBlock) -> bool {
        self.grid.are_positions_empty(&candidate.tile_positions())
    }

    /// Commit `candidate` if it fits, returns whether it did
    fn try_commit(&mut self, candidate: PlacedBlock) -> bool {
        if self.is_game_over() || !self.is_valid(&candidate) {
            return false;
        }
        self.current = candidate;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_commit(self.current.shifted(0, -1))
    }

    pub fn move_right(&mut self) -> bool {
        self.try_commit(self.current.shifted(0, 1))
    }

    /// Plain rotation, no wall kicks: rejected if the rotated block doesn't fit
    pub fn rotate_clockwise(&mut self) -> bool {
        self.try_commit(self.current.rotated(RotationDirection::Clockwise))
    }

    pub fn rotate_counter_clockwise(&mut self) -> bool {
        self.try_commit(self.current.rotated(RotationDirection::CounterClockwise))
    }

    /// Move down one row. If the block can't move it locks instead;
    /// returns whether the block moved.
    pub fn move_down(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        if self.try_commit(self.current.shifted(1, 0)) {
            return true;
        }
        self.lock_current();
        false
    }

    /// Drop straight to the landing row and lock; returns rows dropped
    pub fn hard_drop(&mut self) -> usize {
        if self.is_game_over() {
            return 0;
        }
        let distance = self.drop_distance();
        self.current = self.current.shifted(distance as i32, 0);
        self.lock_current();
        distance
    }

    /// Where the current block would land if dropped straight down
    pub fn landing_projection(&self) -> PlacedBlock {
        self.current.shifted(self.drop_distance() as i32, 0)
    }

    /// Rows the current block can fall before the next step would collide
    fn drop_distance(&self) -> usize {
        let mut distance = 0;
        while self.is_valid(&self.current.shifted(distance as i32 + 1, 0)) {
            distance += 1;
        }
        distance
    }

    /// Lock the current block, clear rows and deal the next block
    fn lock_current(&mut self) {
        let kind = self.current.kind();
        self.grid.lock_tiles(&self.current.tile_positions(), kind);
        self.blocks_locked += 1;

        let cleared = self.grid.clear_full_rows();
        self.lines_cleared += cleared;
        tracing::debug!(?kind, offset = ?self.current.offset(), cleared, "block locked");

        if self.is_game_over() {
            return;
        }

        let next = self.queue.deal();
        tracing::trace!(next = ?next.kind(), left_in_bag = self.queue.remaining(), "dealt");
        if !self.is_valid(&next) {
            tracing::info!(
                next = ?next.kind(),
                lines = self.lines_cleared,
                blocks = self.blocks_locked,
                "spawn blocked, game over"
            );
            self.state = GameState::GameOver;
            return;
        }
        self.current = next;
    }
}
