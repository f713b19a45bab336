//! 64-bit two-word generator used for every raid roll.

/// Bit-shuffle recurrence used to advance [`StreamGen64`].
///
/// Two incompatible recurrences circulate for this generator and no build
/// metadata tells them apart, so callers must pick one explicitly. There is
/// intentionally no `Default` impl.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GeneratorFormula {
    /// Output `s0 + s1` taken before the update; rotates by 24 and 37.
    #[cfg_attr(feature = "serde", serde(rename = "rotate24_37"))]
    #[strum(serialize = "rotate24_37")]
    Rotate24_37,

    /// Output `s0 + s1` taken after the update; rotates by 27 and 40.
    #[cfg_attr(feature = "serde", serde(rename = "rotate27_40"))]
    #[strum(serialize = "rotate27_40")]
    Rotate27_40,
}

/// Source of uniformly distributed draws.
///
/// Implementations must be deterministic: the same seed yields the same
/// sequence of `next_u64` values, and therefore the same `rand` results.
pub trait RandomSource {
    /// Advance the state and return the next raw 64-bit output.
    fn next_u64(&mut self) -> u64;

    /// Draw uniformly from `[0, max)`.
    ///
    /// Uses rejection sampling against the smallest all-ones mask covering
    /// `max - 1`, which is how the game does it. The number of raw outputs
    /// consumed therefore varies per call.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero. Callers pass fixed non-zero bounds or, for
    /// weighted draws, a total already checked to be non-zero.
    fn rand(&mut self, max: u64) -> u64 {
        assert!(max != 0, "rand(0) has no valid outcome");
        let mask = bitmask(max);
        loop {
            let value = self.next_u64() & mask;
            if value < max {
                return value;
            }
        }
    }

    /// [`RandomSource::rand`] narrowed to `u32`.
    fn rand_u32(&mut self, max: u32) -> u32 {
        self.rand(u64::from(max)) as u32
    }
}

/// Smallest `2^k - 1` that is `>= max - 1`.
#[inline]
fn bitmask(max: u64) -> u64 {
    let mut mask = max - 1;
    for shift in [1, 2, 4, 8, 16, 32] {
        mask |= mask >> shift;
    }
    mask
}

/// Two-word xoroshiro-style generator seeded from a raid slot seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamGen64 {
    s0: u64,
    s1: u64,
    formula: GeneratorFormula,
}

impl StreamGen64 {
    /// Fixed second state word used whenever only the first word is seeded.
    pub const SECOND_WORD: u64 = 0x82A2_B175_229D_6A5B;

    /// Seed a generator from a 32-bit slot seed.
    pub fn new(formula: GeneratorFormula, seed: u32) -> Self {
        Self::from_state(formula, u64::from(seed), Self::SECOND_WORD)
    }

    /// Seed both state words explicitly.
    pub fn from_state(formula: GeneratorFormula, s0: u64, s1: u64) -> Self {
        Self { s0, s1, formula }
    }

    pub fn formula(&self) -> GeneratorFormula {
        self.formula
    }

    pub fn state(&self) -> (u64, u64) {
        (self.s0, self.s1)
    }
}

impl RandomSource for StreamGen64 {
    fn next_u64(&mut self) -> u64 {
        match self.formula {
            GeneratorFormula::Rotate24_37 => {
                let (s0, mut s1) = (self.s0, self.s1);
                let result = s0.wrapping_add(s1);
                s1 ^= s0;
                self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
                self.s1 = s1.rotate_left(37);
                result
            }
            GeneratorFormula::Rotate27_40 => {
                self.s1 = self.s1.rotate_left(27);
                self.s0 = (self.s0 ^ self.s1 ^ (self.s1 << 16)).rotate_left(40);
                self.s1 ^= self.s0;
                self.s0.wrapping_add(self.s1)
            }
        }
    }
}
