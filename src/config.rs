//! Construction parameters for `RobinHoodMap`.

use crate::error::{MapError, Result};

/// Multiplier applied to the capacity on every growth.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Load factor at which the next insert grows the map first.
pub const DEFAULT_CRITICAL_LOAD_FACTOR: f64 = 0.8;

/// Capacity used by `MapConfig::default`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapConfig {
    pub initial_capacity: usize,
    pub growth_factor: usize,
    pub critical_load_factor: f64,
    /// Seed handed to `murmur3_32` when computing buckets.
    pub seed: u32,
}

impl MapConfig {
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            critical_load_factor: DEFAULT_CRITICAL_LOAD_FACTOR,
            seed: 0,
        }
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    pub fn with_critical_load_factor(mut self, factor: f64) -> Self {
        self.critical_load_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Check every parameter. A load factor of 1.0 would let the table
    /// fill completely before growing, so it is rejected along with
    /// anything outside (0, 1) and NaN.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        if self.growth_factor < 2 {
            return Err(MapError::InvalidGrowthFactor {
                factor: self.growth_factor,
            });
        }
        let f = self.critical_load_factor;
        if !(f > 0.0 && f < 1.0) {
            return Err(MapError::InvalidLoadFactor {
                factor: f.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: Defaults carry the reference growth factor and load factor.
    #[test]
    fn defaults() {
        let c = MapConfig::default();
        assert_eq!(c.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(c.growth_factor, 2);
        assert_eq!(c.critical_load_factor, 0.8);
        assert_eq!(c.seed, 0);
        assert!(c.validate().is_ok());
    }

    /// Invariant: Zero capacity is rejected.
    #[test]
    fn zero_capacity_rejected() {
        assert_eq!(MapConfig::new(0).validate(), Err(MapError::ZeroCapacity));
    }

    /// Invariant: Load factors of 1.0 and above, zero, negatives and NaN are rejected.
    #[test]
    fn bad_load_factors_rejected() {
        for f in [1.0, 1.5, 0.0, -0.2, f64::NAN] {
            let r = MapConfig::new(8).with_critical_load_factor(f).validate();
            assert!(
                matches!(r, Err(MapError::InvalidLoadFactor { .. })),
                "factor {f} should be rejected, got {r:?}"
            );
        }
        assert!(MapConfig::new(8)
            .with_critical_load_factor(0.5)
            .validate()
            .is_ok());
    }

    /// Invariant: Growth factors below 2 are rejected.
    #[test]
    fn bad_growth_factor_rejected() {
        assert_eq!(
            MapConfig::new(8).with_growth_factor(1).validate(),
            Err(MapError::InvalidGrowthFactor { factor: 1 })
        );
        assert!(MapConfig::new(8).with_growth_factor(3).validate().is_ok());
    }
}
