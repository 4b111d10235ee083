//! A block placed on the grid

use crate::tetromino::{Block, BlockKind, Position, RotationDirection};

/// A block plus its grid offset. Moves never mutate a placement in place;
/// each one yields a new candidate that the engine validates before keeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    block: Block,
    /// Top-left of the block's bounding box on the grid
    offset: Position,
}

impl PlacedBlock {
    pub fn new(block: Block, offset: Position) -> Self {
        Self { block, offset }
    }

    /// A fresh block of `kind` at its spawn offset: row 0, centred
    pub fn spawn(kind: BlockKind) -> Self {
        Self::new(Block::new(kind), Position::new(0, kind.spawn_col()))
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn kind(&self) -> BlockKind {
        self.block.kind()
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Get the absolute positions of all 4 tiles
    pub fn tile_positions(&self) -> [Position; 4] {
        self.block
            .tile_positions()
            .map(|tile| tile.offset_by(self.offset))
    }

    /// Candidate shifted by (d_row, d_col)
    pub fn shifted(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            offset: self.offset.offset_by(Position::new(d_row, d_col)),
            ..*self
        }
    }

    /// Candidate rotated in place around the same offset
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let mut block = self.block;
        block.rotate(direction);
        Self { block, ..*self }
    }
}
