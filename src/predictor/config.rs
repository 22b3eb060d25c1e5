
use crate::error::ConfigError;
use crate::predictor::counter::*;

/// The number of usable index bits in a 32-bit PC (the low 2 are dropped).
pub const MAX_PC_BITS: u32 = 30;

/// Upper bound on `history_bits + pc_bits`, the log2 of the total number of
/// counters allocated.
pub const MAX_TABLE_BITS: u32 = 26;

/// Bit-width parameters for a [`GApPredictor`](crate::predictor::GApPredictor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GApConfig {
    /// Width of the global history register (m). Each PHT has 2^m entries.
    pub history_bits: u32,

    /// Number of PC bits used to select a PHT (p). There are 2^p PHTs.
    pub pc_bits: u32,

    /// Width of each saturating counter (n).
    pub counter_bits: u32,
}
impl GApConfig {
    pub fn new(history_bits: u32, pc_bits: u32, counter_bits: u32) -> Self {
        Self { history_bits, pc_bits, counter_bits }
    }

    /// Check that the parameters describe a predictor we can build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter_bits == 0 {
            return Err(ConfigError::ZeroCounterWidth);
        }
        if self.counter_bits > MAX_COUNTER_BITS {
            return Err(ConfigError::CounterTooWide { bits: self.counter_bits });
        }
        if self.pc_bits > MAX_PC_BITS {
            return Err(ConfigError::PcBitsTooWide { bits: self.pc_bits });
        }
        let table_bits = self.history_bits.saturating_add(self.pc_bits);
        if table_bits > MAX_TABLE_BITS {
            return Err(ConfigError::TableTooLarge { bits: table_bits });
        }
        Ok(())
    }

    /// Number of pattern history tables.
    pub fn num_tables(&self) -> usize { 1 << self.pc_bits }

    /// Number of counters in each pattern history table.
    pub fn table_size(&self) -> usize { 1 << self.history_bits }

    /// Counter configuration for this predictor. Only meaningful once
    /// [`GApConfig::validate`] has succeeded.
    pub(crate) fn counter_cfg(&self) -> SaturatingCounterConfig {
        SaturatingCounterConfig::new(self.counter_bits as u8)
    }

    /// Total storage in bits, ignoring the history register.
    pub fn storage_bits(&self) -> usize {
        self.num_tables() * self.table_size() * self.counter_bits as usize
    }
}
