/// Tuning knobs for the genetic optimizer.
///
/// Defaults match the operational values used for multi-week search
/// campaigns; small test runs usually shrink `population_size` and
/// `generations` and pin `seed`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Individuals per generation.
    pub population_size: usize,
    /// Fixed number of generations before termination.
    pub generations: usize,
    /// Upper bound (in days) on any block's day offset. The live search
    /// limit starts one below this and is re-tightened at extinctions.
    pub search_limit_days: u32,
    /// Generations between extinction events; 0 disables them.
    pub extinction_interval: usize,
    /// Fraction of the population kept unchanged as elites.
    pub elite_fraction: f64,
    /// Fraction of the population produced by crossover each generation.
    pub crossover_fraction: f64,
    /// RNG seed for reproducible runs; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: 160,
            search_limit_days: 14,
            extinction_interval: 50,
            elite_fraction: 0.10,
            crossover_fraction: 0.10,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_operational_values() {
        let cfg = GaConfig::default();
        assert_eq!(cfg.population_size, 1000);
        assert_eq!(cfg.generations, 160);
        assert_eq!(cfg.search_limit_days, 14);
        assert_eq!(cfg.extinction_interval, 50);
        assert!((cfg.elite_fraction - 0.10).abs() < 1e-12);
        assert!((cfg.crossover_fraction - 0.10).abs() < 1e-12);
        assert!(cfg.seed.is_none());
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn serialize_deserialize_roundtrip() {
            let cfg = GaConfig {
                population_size: 60,
                seed: Some(42),
                ..GaConfig::default()
            };
            let json = serde_json::to_string(&cfg).unwrap();
            let restored: GaConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(restored.population_size, 60);
            assert_eq!(restored.generations, cfg.generations);
            assert_eq!(restored.seed, Some(42));
        }
    }
}
