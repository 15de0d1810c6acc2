//! RNG module - uniform piece selection
//!
//! A 32-bit LCG seeded once by the host. Each session owns its generator, so
//! a seed always replays the same piece sequence.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform value in `0..max`.
    ///
    /// Takes the high bits; the low bits of a power-of-two LCG repeat with
    /// short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_replays_sequence() {
        let mut a = SimpleRng::new(12345);
        let mut b = SimpleRng::new(12345);
        let first: Vec<u32> = (0..50).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..50).map(|_| b.next_u32()).collect();
        assert_eq!(first, second);
        assert_ne!(SimpleRng::new(54321).next_u32(), first[0]);
    }

    #[test]
    fn test_zero_seed_still_advances() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.next_u32(), INCREMENT);
        assert_ne!(rng.next_u32(), INCREMENT);
    }

    #[test]
    fn test_next_range_is_roughly_uniform() {
        let mut rng = SimpleRng::new(99);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let v = rng.next_range(7);
            assert!(v < 7);
            counts[v as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c > 700), "{:?}", counts);
    }
}
