//! Replaying a trace through a [GApPredictor].

use std::collections::*;
use log::{debug, trace, warn};

use crate::branch::*;
use crate::error::*;
use crate::predictor::*;
use crate::stats::*;

/// What to do when a trace line cannot be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the line and carry on with the next one.
    #[default]
    Skip,

    /// Stop the run and return the error.
    Abort,
}

/// Bookkeeping about the trace itself, separate from predictor accuracy.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    /// Number of events seen, by operation
    pub events: BTreeMap<BranchOp, usize>,

    /// Number of malformed lines that were skipped
    pub skipped: usize,
}
impl RunSummary {
    /// Return the number of events seen for some operation.
    pub fn count(&self, op: BranchOp) -> usize {
        self.events.get(&op).copied().unwrap_or(0)
    }

    /// Return the total number of decoded events.
    pub fn total_events(&self) -> usize {
        self.events.values().sum()
    }
}

/// Owns a predictor and the statistics gathered while replaying a trace.
pub struct Simulator {
    predictor: GApPredictor,
    stats: BranchStats,
    summary: RunSummary,
}
impl Simulator {
    pub fn new(cfg: GApConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            predictor: GApPredictor::new(cfg)?,
            stats: BranchStats::new(),
            summary: RunSummary::default(),
        })
    }

    pub fn predictor(&self) -> &GApPredictor { &self.predictor }
    pub fn stats(&self) -> &BranchStats { &self.stats }
    pub fn summary(&self) -> &RunSummary { &self.summary }

    /// Evaluate a single event.
    ///
    /// Only conditional branches are predicted. Returns whether the
    /// prediction was correct, or `None` if the event was ignored.
    pub fn step(&mut self, event: &BranchEvent) -> Option<bool> {
        *self.summary.events.entry(event.op).or_insert(0) += 1;
        if !event.is_conditional() {
            return None;
        }

        let pht_idx = self.predictor.pht_index(event.pc);
        let outcome = event.outcome();

        // Make a prediction before the predictor sees the outcome
        let prediction = self.predictor.predict(pht_idx);
        let correct = prediction == outcome;
        trace!("{:08x} pred={:?} actual={:?}", event.pc, prediction, outcome);

        self.predictor.update(pht_idx, outcome);
        self.stats.update(correct);
        self.stats.update_per_branch(event.pc, outcome, correct);

        Some(correct)
    }

    /// Evaluate every event in a trace.
    ///
    /// Decoding errors are handled according to `policy`. I/O errors always
    /// end the run.
    pub fn run<I>(&mut self, events: I, policy: ErrorPolicy)
        -> Result<(), TraceError>
        where I: IntoIterator<Item = Result<BranchEvent, TraceError>>
    {
        for event in events {
            match event {
                Ok(event) => { self.step(&event); },
                Err(TraceError::Parse(e)) if policy == ErrorPolicy::Skip => {
                    warn!("skipping malformed trace line: {}", e);
                    self.summary.skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }
        debug!("replayed {} events ({} conditional, {} skipped)",
            self.summary.total_events(),
            self.summary.count(BranchOp::Conditional),
            self.summary.skipped,
        );
        Ok(())
    }
}
