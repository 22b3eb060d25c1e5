//! Implementation of a saturating counter.

use crate::branch::Outcome;
use crate::predictor::StatefulPredictor;

/// The widest supported counter. Counters are stored in a single byte.
pub const MAX_COUNTER_BITS: u32 = 8;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// Width of the counter in bits
    pub bits: u8,
}
impl SaturatingCounterConfig {
    pub fn new(bits: u8) -> Self {
        assert!(bits >= 1 && bits as u32 <= MAX_COUNTER_BITS);
        Self { bits }
    }

    /// The largest value the counter can hold.
    pub fn max_value(&self) -> u8 {
        ((1u16 << self.bits) - 1) as u8
    }

    /// Build a counter in the strongest not-taken state.
    pub fn build(self) -> SaturatingCounter {
        SaturatingCounter { cfg: self, ctr: 0 }
    }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
///
/// The most-significant bit of the counter is the predicted direction.
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounter {
    cfg: SaturatingCounterConfig,
    ctr: u8,
}
impl SaturatingCounter {
    /// Return the raw counter value.
    pub fn value(&self) -> u8 { self.ctr }

    pub fn config(&self) -> SaturatingCounterConfig { self.cfg }

    /// Move towards 'taken', clamping at the maximum value.
    pub fn inc(&mut self) {
        if self.ctr < self.cfg.max_value() {
            self.ctr += 1;
        }
    }

    /// Move towards 'not-taken', clamping at zero.
    pub fn dec(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }
    fn predict(&self) -> Outcome {
        Outcome::from((self.ctr >> (self.cfg.bits - 1)) & 1 == 1)
    }
    fn reset(&mut self) {
        self.ctr = 0;
    }
    fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.inc(),
            Outcome::N => self.dec(),
        }
    }
}
