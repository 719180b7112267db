//! A xorshift* pseudo-random generator. Fast and deterministic, which is all
//! sketches usually need; it is not suitable for anything cryptographic.

const MULTIPLIER: u64 = 0x2545_F491_4F6C_DD1D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift {
    state: u64,
}

impl Default for Xorshift {
    fn default() -> Self {
        Xorshift::new(1)
    }
}

impl Xorshift {
    /// Creates a generator. A zero seed would lock the generator at zero
    /// forever, so it is replaced by one.
    pub fn new(seed: u64) -> Self {
        let mut rng = Xorshift { state: 1 };
        rng.seed(seed);
        rng
    }

    #[inline]
    pub fn seed(&mut self, seed: u64) {
        self.state = if seed != 0 { seed } else { 1 };
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(MULTIPLIER)
    }

    /// Returns a value in `0..=1`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() as f64 / u64::max_value() as f64) as f32
    }
}

impl Iterator for Xorshift {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }
}
