// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Block storage
// - Fixed-size blocks of 65536 slots, concatenated in index order they form
//   one logical array sorted ascending (empty slots ignored)
// - i64::MAX marks an empty slot; it compares greater than every live value
// - Blocks past the nominal region are overflow blocks, appended only when a
//   displacement chain runs off the end of the array

/// log2 of the number of slots per block
pub const BLOCK_SIZE_SHIFT: u32 = 16;

/// Number of fingerprint slots per block
pub const BLOCK_SIZE: usize = 1 << BLOCK_SIZE_SHIFT;

/// Mask extracting the in-block offset from a global slot index
pub const BLOCK_MASK: usize = BLOCK_SIZE - 1;

/// Empty slot sentinel. Fingerprints equal to it are stored as 0.
pub const EMPTY: i64 = i64::MAX;

pub(crate) type Block = Box<[i64]>;

/// Maps the reserved sentinel onto 0; every other fingerprint is unchanged.
#[inline(always)]
pub fn canonical(fingerprint: i64) -> i64 {
    if fingerprint == EMPTY {
        0
    } else {
        fingerprint
    }
}

/// Splits a global slot index into (block index, offset in block)
#[inline(always)]
pub fn split_slot(slot: usize) -> (usize, usize) {
    (slot >> BLOCK_SIZE_SHIFT, slot & BLOCK_MASK)
}

/// Inverse of [`split_slot`]
#[inline(always)]
pub fn join_slot(block_id: usize, offset: usize) -> usize {
    (block_id << BLOCK_SIZE_SHIFT) | offset
}

/// Allocates a block with every slot empty
pub(crate) fn new_block() -> Block {
    vec![EMPTY; BLOCK_SIZE].into_boxed_slice()
}

/// Ordered sequence of blocks owned by one set
pub(crate) struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// Allocates `count` empty blocks, with room reserved for one overflow block
    pub(crate) fn with_blocks(count: usize) -> Self {
        let mut blocks = Vec::with_capacity(count + 1);
        blocks.extend((0..count).map(|_| new_block()));
        Self { blocks }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Total number of slots across all blocks, overflow included
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.blocks.len() * BLOCK_SIZE
    }

    #[inline(always)]
    pub(crate) fn get(&self, slot: usize) -> i64 {
        let (block_id, offset) = split_slot(slot);
        self.blocks[block_id][offset]
    }

    /// Blocks from `first` to the end, in index order
    #[inline(always)]
    pub(crate) fn blocks_from(&self, first: usize) -> &[Block] {
        &self.blocks[first..]
    }

    /// Mutable blocks from `first` to the end, paired with their index
    #[inline(always)]
    pub(crate) fn blocks_from_mut(
        &mut self,
        first: usize,
    ) -> impl Iterator<Item = (usize, &mut Block)> + '_ {
        self.blocks[first..]
            .iter_mut()
            .enumerate()
            .map(move |(i, block)| (first + i, block))
    }

    /// Appends an overflow block holding `fingerprint` in its first slot.
    /// Returns the global slot index it was written to.
    pub(crate) fn push_overflow(&mut self, fingerprint: i64) -> usize {
        let mut block = new_block();
        block[0] = fingerprint;
        self.blocks.push(block);
        join_slot(self.blocks.len() - 1, 0)
    }

    /// Doubles the nominal region: block `i` moves to `2i` and a fresh empty
    /// block lands at `2i + 1`. Blocks past `nominal` are detached and
    /// returned so their contents can be reinserted.
    pub(crate) fn interleave(&mut self, nominal: usize) -> Vec<Block> {
        let mut old = std::mem::take(&mut self.blocks);
        let overflow = old.split_off(nominal.min(old.len()));

        let mut blocks = Vec::with_capacity(nominal * 2 + 1);
        for block in old {
            blocks.push(block);
            blocks.push(new_block());
        }
        self.blocks = blocks;
        overflow
    }

    /// Puts `replacement` at `block_id` and hands back the block it displaced
    #[inline]
    pub(crate) fn replace(&mut self, block_id: usize, replacement: Block) -> Block {
        std::mem::replace(&mut self.blocks[block_id], replacement)
    }

    /// Every live fingerprint in slot order
    #[inline]
    pub(crate) fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.iter().copied())
            .filter(|&fp| fp != EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(BLOCK_SIZE, 65536);
        assert_eq!(BLOCK_MASK, 0xFFFF);
        assert_eq!(EMPTY, i64::MAX);
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(EMPTY), 0);
        assert_eq!(canonical(0), 0);
        assert_eq!(canonical(-7), -7);
        assert_eq!(canonical(i64::MAX - 1), i64::MAX - 1);
        assert_eq!(canonical(i64::MIN), i64::MIN);
    }

    #[test]
    fn test_split_join_slot() {
        assert_eq!(split_slot(0), (0, 0));
        assert_eq!(split_slot(BLOCK_SIZE - 1), (0, BLOCK_MASK));
        assert_eq!(split_slot(BLOCK_SIZE), (1, 0));
        assert_eq!(split_slot(3 * BLOCK_SIZE + 17), (3, 17));
        assert_eq!(join_slot(3, 17), 3 * BLOCK_SIZE + 17);
    }

    #[test]
    fn test_new_block_is_empty() {
        let block = new_block();
        assert_eq!(block.len(), BLOCK_SIZE);
        assert!(block.iter().all(|&fp| fp == EMPTY));
    }

    #[test]
    fn test_push_overflow() {
        let mut list = BlockList::with_blocks(2);
        assert_eq!(list.len(), 2);
        assert_eq!(list.slot_count(), 2 * BLOCK_SIZE);

        let slot = list.push_overflow(42);
        assert_eq!(slot, 2 * BLOCK_SIZE);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(slot), 42);
        assert_eq!(list.get(slot + 1), EMPTY);
        assert_eq!(list.values().collect::<Vec<_>>(), vec![42]);
    }

    #[test]
    fn test_interleave_places_old_blocks_on_even_indices() {
        let mut list = BlockList::with_blocks(2);
        list.replace(0, {
            let mut b = new_block();
            b[5] = 10;
            b
        });
        list.replace(1, {
            let mut b = new_block();
            b[7] = 20;
            b
        });
        list.push_overflow(30);

        let overflow = list.interleave(2);

        assert_eq!(overflow.len(), 1);
        assert_eq!(overflow[0][0], 30);
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(5), 10);
        assert_eq!(list.get(2 * BLOCK_SIZE + 7), 20);
        assert_eq!(list.blocks_from(1)[0].iter().filter(|&&v| v != EMPTY).count(), 0);
        assert_eq!(list.blocks_from(3)[0].iter().filter(|&&v| v != EMPTY).count(), 0);
    }

    #[test]
    fn test_blocks_from_mut_reports_indices() {
        let mut list = BlockList::with_blocks(3);
        let ids: Vec<usize> = list.blocks_from_mut(1).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
