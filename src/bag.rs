//! 7-bag randomizer for block generation
//!
//! All 7 kinds are shuffled, then dealt out before reshuffling. Every kind
//! shows up exactly once per bag, so the gap between two blocks of the same
//! kind is never more than 12.

use crate::piece::PlacedBlock;
use crate::tetromino::{Block, BlockKind};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// The block queue: pending blocks plus the RNG that shuffles each bag
#[derive(Debug, Clone)]
pub struct BlockQueue {
    pending: VecDeque<Block>,
    rng: ChaCha8Rng,
}

impl Default for BlockQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockQueue {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Same seed, same sequence of blocks
    pub fn with_seed(seed: u64) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(7),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        queue.refill();
        queue
    }

    /// Deal the next block at its spawn offset. The queue is refilled as soon
    /// as it runs dry, so it is never empty between calls.
    pub fn deal(&mut self) -> PlacedBlock {
        let kind = self.peek();
        self.pending.pop_front();
        if self.pending.is_empty() {
            self.refill();
        }
        PlacedBlock::spawn(kind)
    }

    /// Kind of the block the next call to [`BlockQueue::deal`] will deal
    pub fn peek(&self) -> BlockKind {
        self.pending[0].kind()
    }

    /// Number of blocks left before the next reshuffle
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Append a freshly shuffled bag
    fn refill(&mut self) {
        // SliceRandom::shuffle is Fisher-Yates: i from last down to 1,
        // swap with a uniform j in 0..=i.
        let mut bag = BlockKind::all();
        bag.shuffle(&mut self.rng);
        self.pending.extend(bag.into_iter().map(Block::new));
    }
}

/// An endless stream of spawned blocks
impl Iterator for BlockQueue {
    type Item = PlacedBlock;

    fn next(&mut self) -> Option<PlacedBlock> {
        Some(self.deal())
    }
}
