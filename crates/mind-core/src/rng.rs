/// Deterministic random source injected into schedulers that break ties randomly.
///
/// Not cryptographic. Tests can implement this with a scripted sequence to pin outcomes.
pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    ///
    /// Draws at or above the largest multiple of `len` are rejected so every index is equally likely.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with an empty range");
        let len = len.max(1) as u64;
        let zone = u64::MAX - u64::MAX % len;
        loop {
            let draw = self.next_u64();
            if draw < zone {
                return (draw % len) as usize;
            }
        }
    }
}

/// SplitMix64: small, fast, well-distributed generator with a single `u64` of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl Default for SplitMix64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}
