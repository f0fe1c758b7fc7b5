//! Explicit random streams for generation and actor placement.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub const NPC_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Debug)]
pub struct GenRng {
    inner: ChaCha8Rng,
}

impl GenRng {
    pub fn from_seed(seed: i64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed as u64) }
    }

    pub fn npc_stream(seed: i64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(derive_npc_seed(seed)) }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max);
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.next_u64() % span) as i32
    }

    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }

    pub fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for index in (1..items.len()).rev() {
            let other = self.below(index + 1);
            items.swap(index, other);
        }
    }
}

pub fn derive_npc_seed(seed: i64) -> u64 {
    (seed as u64) ^ NPC_SEED_SALT
}
