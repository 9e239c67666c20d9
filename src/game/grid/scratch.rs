use crate::game::fixed_math::FixedNum;

/// Per-cell planner bookkeeping for a single search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScratchEntry {
    pub g_cost: FixedNum,
    pub h_cost: FixedNum,
    pub f_cost: FixedNum,
    /// Row-major index of the cell this one was reached from.
    pub parent: Option<u32>,
    pub closed: bool,
}

impl Default for ScratchEntry {
    fn default() -> Self {
        Self {
            g_cost: FixedNum::MAX,
            h_cost: FixedNum::MAX,
            f_cost: FixedNum::MAX,
            parent: None,
            closed: false,
        }
    }
}

/// Side table of [`ScratchEntry`] keyed by cell index and stamped with a search
/// generation.
///
/// Entries written under an older generation read back as the default
/// (infinite cost, no parent), so starting a search is O(1) and a previous
/// search's costs can never leak into the next one.
#[derive(Clone, Debug)]
pub struct SearchScratch {
    entries: Vec<(u32, ScratchEntry)>,
    generation: u32,
}

impl Default for SearchScratch {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generation: 1,
        }
    }
}

impl SearchScratch {
    /// Start a new search over `cell_count` cells.
    pub fn begin_search(&mut self, cell_count: usize) {
        if self.entries.len() < cell_count {
            self.entries.resize(cell_count, (0, ScratchEntry::default()));
        }
        self.reset();
    }

    /// Invalidate every entry.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for (stamp, _) in self.entries.iter_mut() {
                *stamp = 0;
            }
            self.generation = 1;
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn get(&self, index: usize) -> ScratchEntry {
        match self.entries.get(index) {
            Some((stamp, entry)) if *stamp == self.generation => *entry,
            _ => ScratchEntry::default(),
        }
    }

    /// Mutable entry for the current search, reinitialised if stale.
    ///
    /// # Panics
    /// If `index` is beyond the `cell_count` passed to [`begin_search`](Self::begin_search).
    pub fn entry_mut(&mut self, index: usize) -> &mut ScratchEntry {
        let generation = self.generation;
        let (stamp, entry) = &mut self.entries[index];
        if *stamp != generation {
            *stamp = generation;
            *entry = ScratchEntry::default();
        }
        entry
    }

    /// True when no entry belongs to the current generation.
    pub fn is_pristine(&self) -> bool {
        self.entries.iter().all(|(stamp, _)| *stamp != self.generation)
    }
}
