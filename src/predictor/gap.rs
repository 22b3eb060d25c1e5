//! A two-level adaptive predictor with global history and per-address
//! pattern history tables ("GAp").
//!
//! Low bits of the program counter select one of 2^p pattern history tables.
//! The global history register selects a saturating counter within that
//! table, and the counter's most-significant bit is the prediction.

use log::{debug, trace};

use crate::branch::Outcome;
use crate::error::ConfigError;
use crate::history::HistoryRegister;
use crate::predictor::*;

/// Select `bits` bits from a program counter, skipping the low 2 bits.
///
/// Instructions are 4-byte aligned, so the low 2 bits carry no information.
pub fn extract_pc_bits(bits: u32, pc: u32) -> usize {
    let mask = (1u64 << bits) - 1;
    ((pc as u64 >> 2) & mask) as usize
}

pub struct GApPredictor {
    cfg: GApConfig,

    /// Global history register (m bits)
    ghr: HistoryRegister,

    /// 2^p tables of 2^m counters
    pht: PatternHistoryTable,
}
impl GApPredictor {
    /// Build a predictor with all counters initialized to zero (strongly
    /// not-taken) and an empty history.
    pub fn new(cfg: GApConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let pht = PatternHistoryTable::new(
            cfg.num_tables(),
            cfg.table_size(),
            cfg.counter_cfg(),
        );
        debug!("GAp: {} PHTs x {} entries, {}-bit counters ({} bits)",
            cfg.num_tables(), cfg.table_size(), cfg.counter_bits,
            cfg.storage_bits()
        );
        Ok(Self {
            cfg,
            ghr: HistoryRegister::new(cfg.history_bits as usize),
            pht,
        })
    }

    pub fn config(&self) -> &GApConfig { &self.cfg }
    pub fn ghr(&self) -> &HistoryRegister { &self.ghr }
    pub fn pht(&self) -> &PatternHistoryTable { &self.pht }

    /// Returns the index of the PHT used for a branch at `pc`.
    pub fn pht_index(&self, pc: u32) -> usize {
        extract_pc_bits(self.cfg.pc_bits, pc)
    }

    /// Returns the counter selected by `pht_idx` and the current history.
    pub fn counter(&self, pht_idx: usize) -> &SaturatingCounter {
        let idx = self.pht.get_index((pht_idx, self.ghr.value()));
        self.pht.get_entry(idx)
    }

    /// Predict the outcome of a branch using the PHT at `pht_idx`.
    pub fn predict(&self, pht_idx: usize) -> Outcome {
        self.counter(pht_idx).predict()
    }

    /// Train the selected counter with the resolved outcome, then shift the
    /// outcome into global history.
    ///
    /// The counter is selected with the history value used for the
    /// prediction, so the register must only change afterwards.
    pub fn update(&mut self, pht_idx: usize, outcome: Outcome) {
        let idx = self.pht.get_index((pht_idx, self.ghr.value()));
        let ctr = self.pht.get_entry_mut(idx);
        ctr.update(outcome);
        let value = ctr.value();

        self.ghr.push(outcome);
        trace!("pht={} ctr={} ghr={}", pht_idx, value, self.ghr);
    }

    /// Clear global history and all counters.
    pub fn reset(&mut self) {
        self.ghr.reset();
        self.pht.reset();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    fn build(m: u32, p: u32, n: u32) -> GApPredictor {
        GApPredictor::new(GApConfig::new(m, p, n)).unwrap()
    }

    #[test]
    fn pc_bit_extraction() {
        assert_eq!(extract_pc_bits(4, 0b0101100), 0b1011);
        assert_eq!(extract_pc_bits(3, 0x2c), (0x2c >> 2) & 0x7);
        assert_eq!(extract_pc_bits(0, 0xdead_beef), 0);
        assert_eq!(extract_pc_bits(30, u32::MAX), (1 << 30) - 1);
        assert_eq!(extract_pc_bits(2, 0x1003), 0);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(GApPredictor::new(GApConfig::new(2, 2, 0)).is_err());
        assert!(GApPredictor::new(GApConfig::new(24, 24, 2)).is_err());

        // Widths that would truncate to a valid u8 are still rejected
        assert_eq!(GApPredictor::new(GApConfig::new(2, 2, 256)).err(),
            Some(ConfigError::CounterTooWide { bits: 256 }));
        assert_eq!(GApPredictor::new(GApConfig::new(2, 2, 258)).err(),
            Some(ConfigError::CounterTooWide { bits: 258 }));
    }

    #[test]
    fn initial_prediction_is_not_taken() {
        let gap = build(4, 3, 2);
        for pht_idx in 0..8 {
            assert_eq!(gap.predict(pht_idx), Outcome::N);
        }
        assert_eq!(gap.ghr().value(), 0);
    }

    #[test]
    fn predict_has_no_side_effects() {
        let mut gap = build(2, 1, 2);
        gap.update(1, Outcome::T);
        gap.update(1, Outcome::T);
        let a = gap.predict(1);
        let b = gap.predict(1);
        assert_eq!(a, b);
        assert_eq!(gap.ghr().value(), 0b11);
    }

    #[test]
    fn update_uses_pre_shift_history() {
        let mut gap = build(2, 0, 2);

        // ghr=00 row is trained, then history becomes 01
        gap.update(0, Outcome::T);
        assert_eq!(gap.pht().table(0)[0b00].value(), 1);
        assert_eq!(gap.pht().table(0)[0b01].value(), 0);
        assert_eq!(gap.ghr().value(), 0b01);

        // ghr=01 row is trained, then history becomes 11
        gap.update(0, Outcome::T);
        assert_eq!(gap.pht().table(0)[0b01].value(), 1);
        assert_eq!(gap.ghr().value(), 0b11);

        gap.update(0, Outcome::N);
        assert_eq!(gap.pht().table(0)[0b11].value(), 0);
        assert_eq!(gap.ghr().value(), 0b10);
    }

    #[test]
    fn tables_selected_by_pc() {
        let mut gap = build(0, 2, 2);
        let idx = gap.pht_index(0x0000_0008);
        assert_eq!(idx, 2);
        gap.update(idx, Outcome::T);
        gap.update(idx, Outcome::T);
        assert_eq!(gap.predict(idx), Outcome::T);
        assert_eq!(gap.predict(gap.pht_index(0x0000_0004)), Outcome::N);
        // Aliases onto the same table
        assert_eq!(gap.predict(gap.pht_index(0x0000_0018)), Outcome::T);
    }

    #[test]
    fn learns_alternating_pattern() {
        let mut gap = build(2, 0, 2);
        let mut hits = 0;
        for i in 0..100 {
            let outcome = Outcome::from(i % 2 == 0);
            if gap.predict(0) == outcome { hits += 1; }
            gap.update(0, outcome);
        }
        // After warmup, every prediction should be correct
        assert!(hits >= 95, "hits={}", hits);
    }

    #[test]
    fn random_updates_preserve_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut gap = build(5, 3, 3);
        let max = gap.pht().counter_cfg().max_value();
        for _ in 0..5000 {
            let pc: u32 = rng.gen();
            let outcome = Outcome::from(rng.gen::<bool>());
            let idx = gap.pht_index(pc);
            assert!(idx < 8);
            gap.update(idx, outcome);
            assert!(gap.ghr().value() < (1 << 5));
        }
        assert!(gap.pht().counters().iter().all(|c| c.value() <= max));

        gap.reset();
        assert_eq!(gap.ghr().value(), 0);
        assert!(gap.pht().counters().iter().all(|c| c.value() == 0));
    }
}
