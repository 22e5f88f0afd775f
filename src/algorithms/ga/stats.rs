//! Per-generation fitness statistics for external reporting.

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    pub generation: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl GenerationStats {
    /// Summarizes one generation's fitness scores.
    ///
    /// An empty score slice yields all-zero statistics; the optimizer never
    /// produces one, but cancelled runs may report a partial history.
    pub fn from_scores(generation: usize, scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                generation,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &s in scores {
            min = min.min(s);
            max = max.max(s);
            sum += s;
        }
        let mean = sum / scores.len() as f64;
        let variance = scores
            .iter()
            .map(|s| (s - mean) * (s - mean))
            .sum::<f64>()
            / scores.len() as f64;

        Self {
            generation,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
