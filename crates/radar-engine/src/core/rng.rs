//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no-std compatible.

/// Seedable pseudo-random number generator (xorshift64).
///
/// Every randomized part of the radar (orbit radii, lens damping, velocity
/// nudges) draws from one of these, so tests can pin a seed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit the f32 mantissa exactly, so the result never rounds up to 1.0.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max). Returns `min` when the range is empty.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        scale_half_open(min, max, self.next_f32())
    }

    /// Returns true with probability `chance`. Values outside [0, 1] saturate.
    pub fn chance(&mut self, chance: f32) -> bool {
        self.next_f32() < chance
    }

    /// Derive an independent generator from this one.
    pub fn fork(&mut self) -> Rng {
        Rng::new(self.next_u64() ^ 0x9E37_79B9_7F4A_7C15)
    }
}

/// Map `t` in [0, 1) onto [min, max). f32 rounding can land the top draws
/// exactly on `max`; those are pulled back one ulp.
fn scale_half_open(min: f32, max: f32, t: f32) -> f32 {
    if max <= min || max.is_nan() || min.is_nan() {
        return min;
    }
    let v = (min as f64 + t as f64 * (max as f64 - min as f64)) as f32;
    if v < max {
        v
    } else {
        ulp_below(max).max(min)
    }
}

fn ulp_below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f32::from_bits(1)
    } else {
        f32::from_bits(x.to_bits() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_f32(), rng2.next_f32());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        // Should not panic or loop forever
        let draws: Vec<f32> = (0..4).map(|_| rng.next_f32()).collect();
        assert!(draws.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn range_stays_half_open() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.range(0.9, 1.1);
            assert!(v >= 0.9 && v < 1.1, "v = {v}");
        }

        // Largest value next_f32 can produce.
        let top = ((1u32 << 24) - 1) as f32 / (1u32 << 24) as f32;
        for (min, max) in [(0.9, 1.1), (80.0, 200.0), (-1.0, 0.0), (-3.0, -2.0)] {
            let v = scale_half_open(min, max, top);
            assert!(v >= min && v < max, "top draw {v} outside [{min}, {max})");
        }
        assert_eq!(scale_half_open(80.0, 200.0, 0.0), 80.0);
        assert_eq!(scale_half_open(5.0, 5.0, 0.5), 5.0);
    }

    #[test]
    fn fork_diverges_from_parent() {
        let mut parent = Rng::new(42);
        let mut child = parent.fork();
        let a: Vec<f32> = (0..8).map(|_| parent.next_f32()).collect();
        let b: Vec<f32> = (0..8).map(|_| child.next_f32()).collect();
        assert_ne!(a, b);
    }
}
