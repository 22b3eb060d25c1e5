//! Helpers for collecting statistics.

use std::collections::*;
use itertools::*;

use crate::branch::*;

/// Container for recording statistics while evaluating a predictor.
#[derive(Clone, Debug, Default)]
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value).
    data: BTreeMap<u32, BranchData>,

    /// Number of evaluated conditional branches
    reads: usize,

    /// Number of incorrect predictions
    mispredictions: usize,

    /// Misprediction rate as a percentage, kept current on every update
    misprediction_rate: f64,
}
impl BranchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of evaluated conditional branches.
    pub fn reads(&self) -> usize { self.reads }

    /// Return the number of mispredictions.
    pub fn mispredictions(&self) -> usize { self.mispredictions }

    /// Return the number of correct predictions.
    pub fn hits(&self) -> usize { self.reads - self.mispredictions }

    /// Return the misprediction rate as a percentage (0 when nothing has
    /// been evaluated).
    pub fn misprediction_rate(&self) -> f64 { self.misprediction_rate }

    /// Return the hit rate as a fraction.
    pub fn hit_rate(&self) -> f64 {
        if self.reads == 0 { 0.0 } else { self.hits() as f64 / self.reads as f64 }
    }

    /// Record the result of a single prediction.
    pub fn update(&mut self, correct: bool) {
        if !correct {
            self.mispredictions += 1;
        }
        self.reads += 1;
        self.misprediction_rate =
            (self.mispredictions as f64 / self.reads as f64) * 100.0;
    }

    /// Update per-branch statistics.
    pub fn update_per_branch(&mut self, pc: u32, outcome: Outcome,
        correct: bool)
    {
        let data = self.get_mut(pc);
        data.occ += 1;
        if outcome == Outcome::T { data.taken += 1; }
        if correct { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u32) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: u32) -> &mut BranchData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns up to 'n' of the most frequently executed branches with
    /// frequent mispredictions.
    pub fn get_low_rate_branches(&self, n: usize) -> Vec<(u32, &BranchData)> {
        self.data.iter()
            .filter(|(_, s)| s.occ > 100 && s.hit_rate() <= 0.55)
            .sorted_by(|x, y| y.1.occ.cmp(&x.1.occ).then(x.0.cmp(y.0)))
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-branch statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Number of times this branch was taken.
    pub taken: usize,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        if self.occ == 0 { 0.0 } else { self.hits as f64 / self.occ as f64 }
    }

    pub fn is_always_taken(&self) -> bool { self.taken == self.occ }
    pub fn is_never_taken(&self) -> bool { self.taken == 0 }

    /// A short description of the branch's direction.
    pub fn bias(&self) -> &'static str {
        if self.is_always_taken() {
            "always-taken"
        } else if self.is_never_taken() {
            "never-taken"
        } else {
            "mixed"
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_rate_is_zero() {
        let s = BranchStats::new();
        assert_eq!(s.reads(), 0);
        assert_eq!(s.misprediction_rate(), 0.0);
        assert_eq!(s.hit_rate(), 0.0);
    }

    #[test]
    fn rate_tracks_every_update() {
        let mut s = BranchStats::new();
        s.update(false);
        assert_eq!(s.misprediction_rate(), 100.0);
        s.update(true);
        assert_eq!(s.misprediction_rate(), 50.0);
        s.update(true);
        s.update(true);
        assert_eq!(s.reads(), 4);
        assert_eq!(s.mispredictions(), 1);
        assert_eq!(s.hits(), 3);
        assert!((s.misprediction_rate() - 25.0).abs() < 1e-9);
        assert!((s.hit_rate() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn low_rate_branches() {
        let mut s = BranchStats::new();
        // Well-predicted and frequent
        for _ in 0..200 { s.update_per_branch(0x10, Outcome::T, true); }
        // Poorly predicted, varying frequency
        for i in 0..150 { s.update_per_branch(0x20, Outcome::N, i % 2 == 0); }
        for i in 0..300 { s.update_per_branch(0x30, Outcome::T, i % 3 == 0); }
        // Poorly predicted but rare
        for _ in 0..50 { s.update_per_branch(0x40, Outcome::N, false); }

        assert_eq!(s.num_unique_branches(), 4);
        let low: Vec<u32> = s.get_low_rate_branches(8).iter()
            .map(|(pc, _)| *pc).collect();
        assert_eq!(low, vec![0x30, 0x20]);
        assert_eq!(s.get_low_rate_branches(1).len(), 1);

        let d = s.get(0x10).unwrap();
        assert!(d.is_always_taken());
        assert!(s.get(0x20).unwrap().is_never_taken());
        assert_eq!(d.hit_rate(), 1.0);
        assert_eq!(d.bias(), "always-taken");
        assert_eq!(s.get(0x20).unwrap().bias(), "never-taken");

        s.update_per_branch(0x10, Outcome::N, false);
        assert_eq!(s.get(0x10).unwrap().bias(), "mixed");
    }
}
