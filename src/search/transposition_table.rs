//! Transposition table keyed by Zobrist hash.
//!
//! One `{depth, score}` entry per position, replaced only by a search at
//! least as deep. Entries carry no bound type, so a score produced inside a
//! pruned window is later reused as if it were exact. The map is unbounded:
//! it grows for the lifetime of a game and is emptied by `clear`.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub replacements: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(&key).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Store unless the existing entry was searched deeper. Returns whether
    /// the table changed.
    pub fn store(&mut self, key: u64, depth: u8, score: i32) -> bool {
        let entry = TTEntry { depth, score };
        match self.entries.get_mut(&key) {
            Some(existing) if depth < existing.depth => false,
            Some(existing) => {
                *existing = entry;
                self.stats.stores += 1;
                self.stats.replacements += 1;
                true
            }
            None => {
                self.entries.insert(key, entry);
                self.stats.stores += 1;
                true
            }
        }
    }
}
