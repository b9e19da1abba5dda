use cozy_chess::Move;

use crate::eval::MATE_SCORE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: i32,
    pub best: Option<Move>,
    pub bound: Bound,
    pub gen: u32,
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_CAPACITY: usize = 1 << 16;

// Scores this close to MATE_SCORE encode a mate distance.
const MATE_BOUND: i32 = MATE_SCORE - 1_000;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Position cache owned by a single searcher. Same-key stores always
/// overwrite; a full bucket evicts its shallowest, then oldest, entry.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Tt {
    /// An empty table with no storage; stores are dropped until a capacity is set.
    pub fn new() -> Self { Self { buckets: Vec::new(), gen: 0 } }

    pub fn with_capacity(entries: usize) -> Self {
        let mut tt = Self::new();
        tt.set_capacity_entries(entries);
        tt
    }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { *b = Bucket::default(); }
        self.gen = 0;
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    /// Entry for `key` at any depth; used for move-ordering hints.
    pub fn get(&self, key: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let b = &self.buckets[self.bucket_index(key)];
        b.slots.iter().flatten().find(|e| e.key == key).copied()
    }

    /// Entry for `key` only if it was searched at least `min_depth` deep.
    pub fn probe(&self, key: u64, min_depth: u32) -> Option<Entry> {
        self.get(key).filter(|e| e.depth >= min_depth)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        if cap == 0 {
            self.buckets.clear();
            return;
        }
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = entries.div_ceil(DEFAULT_WAYS);
        self.buckets.clear();
        self.buckets.resize_with(buckets, Bucket::default);
    }

    pub fn store(&mut self, key: u64, depth: u32, score: i32, best: Option<Move>, bound: Bound) {
        if self.buckets.is_empty() { return; }
        let e = Entry { key, depth, score, best, bound, gen: self.gen };
        let idx = self.bucket_index(key);
        let b = &mut self.buckets[idx];
        if let Some(slot) = b.slots.iter_mut().find(|s| s.is_some_and(|cur| cur.key == key)) {
            *slot = Some(e);
            return;
        }
        if let Some(slot) = b.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        let mut victim = 0usize;
        let mut worst = (u32::MAX, u32::MAX);
        for (i, slot) in b.slots.iter().enumerate() {
            if let Some(cur) = slot {
                let rank = (cur.depth, cur.gen);
                if rank < worst { worst = rank; victim = i; }
            }
        }
        b.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}

/// Converts a root-relative mate score to a node-relative one for storage.
pub fn score_to_tt(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if score > MATE_BOUND { score + ply } else if score < -MATE_BOUND { score - ply } else { score }
}

pub fn score_from_tt(score: i32, ply: u32) -> i32 {
    let ply = ply as i32;
    if score > MATE_BOUND { score - ply } else if score < -MATE_BOUND { score + ply } else { score }
}
