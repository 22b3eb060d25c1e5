
use bitvec::prelude::*;

use crate::branch::Outcome;

/// A global history register.
///
/// Bit 0 holds the most recent outcome. Shifting in a new outcome discards
/// the oldest bit, so the register never holds more than `len` bits.
#[derive(Clone, Debug)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the most-significant (index n) and the rightmost
// bit is the least-significant (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len <= usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns a mask covering every bit in the register.
    pub fn mask(&self) -> usize {
        if self.len == usize::BITS as usize {
            usize::MAX
        } else {
            (1 << self.len) - 1
        }
    }

    /// Return the register as an integer.
    pub fn value(&self) -> usize {
        // Loading from an empty slice panics
        if self.is_empty() { 0 } else { self.data.load_le::<usize>() }
    }

    /// Shift the register left by one bit and insert an outcome as the
    /// least-significant bit. The most-significant bit is discarded.
    pub fn push(&mut self, outcome: Outcome) {
        if self.is_empty() { return; }
        self.data.shift_right(1);
        self.data.set(0, outcome.into());
    }

    /// Clear all bits in the register.
    pub fn reset(&mut self) {
        self.data.fill(false);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    #[test]
    fn push_shifts_in_lsb() {
        let mut ghr = HistoryRegister::new(4);
        ghr.push(Outcome::T);
        assert_eq!(ghr.value(), 0b0001);
        ghr.push(Outcome::N);
        assert_eq!(ghr.value(), 0b0010);
        ghr.push(Outcome::T);
        ghr.push(Outcome::T);
        assert_eq!(ghr.value(), 0b1011);
        assert_eq!(ghr.to_string(), "1011");

        // The oldest bit falls off the top
        ghr.push(Outcome::N);
        assert_eq!(ghr.value(), 0b0110);
    }

    #[test]
    fn zero_width() {
        let mut ghr = HistoryRegister::new(0);
        ghr.push(Outcome::T);
        assert_eq!(ghr.value(), 0);
        assert_eq!(ghr.mask(), 0);
    }

    #[test]
    fn value_stays_within_width() {
        let mut rng = StdRng::seed_from_u64(0x6a70);
        for len in 1..=12 {
            let mut ghr = HistoryRegister::new(len);
            let mut model: usize = 0;
            for _ in 0..500 {
                let outcome = Outcome::from(rng.gen::<bool>());
                ghr.push(outcome);
                model = ((model << 1) | outcome as usize) & ghr.mask();
                assert!(ghr.value() < (1 << len));
                assert_eq!(ghr.value(), model);
            }
            ghr.reset();
            assert_eq!(ghr.value(), 0);
        }
    }
}
