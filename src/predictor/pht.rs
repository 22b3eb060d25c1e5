//! Implementation of a set of pattern history tables (PHTs).

use crate::predictor::*;
use crate::predictor::counter::*;

/// A set of pattern history tables, each holding one [SaturatingCounter] per
/// possible global history value.
///
/// All tables live in a single contiguous allocation. Table `t` occupies
/// entries `[t * table_size, (t + 1) * table_size)`.
pub struct PatternHistoryTable {
    /// Saturating counter configuration
    cfg: SaturatingCounterConfig,

    /// Counters for all tables
    data: Vec<SaturatingCounter>,

    /// Number of tables
    num_tables: usize,

    /// Number of entries per table
    table_size: usize,
}
impl PatternHistoryTable {
    pub fn new(num_tables: usize, table_size: usize,
        cfg: SaturatingCounterConfig
    ) -> Self
    {
        assert!(num_tables.is_power_of_two());
        assert!(table_size.is_power_of_two());
        let data = vec![cfg.build(); num_tables * table_size];
        Self {
            cfg,
            data,
            num_tables,
            table_size,
        }
    }

    pub fn num_tables(&self) -> usize { self.num_tables }
    pub fn table_size(&self) -> usize { self.table_size }
    pub fn counter_cfg(&self) -> SaturatingCounterConfig { self.cfg }

    /// Return all counters belonging to a single table.
    pub fn table(&self, table: usize) -> &[SaturatingCounter] {
        assert!(table < self.num_tables, "PHT {} out of range", table);
        let base = table * self.table_size;
        &self.data[base..base + self.table_size]
    }

    /// Return every counter in every table.
    pub fn counters(&self) -> &[SaturatingCounter] { &self.data }

    /// Reset all counters.
    pub fn reset(&mut self) {
        for ctr in self.data.iter_mut() {
            ctr.reset();
        }
    }
}

impl PredictorTable for PatternHistoryTable {
    /// A (table, history) pair
    type Input<'a> = (usize, usize);
    type Index = usize;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    // Out-of-range inputs are a bug in the caller: never wrap them.
    fn get_index(&self, (table, history): (usize, usize)) -> usize {
        assert!(table < self.num_tables, "PHT {} out of range", table);
        assert!(history < self.table_size, "GHR {} out of range", history);
        table * self.table_size + history
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        &mut self.data[idx]
    }
}
