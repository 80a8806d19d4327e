use crate::error::{ConfigError, Result};

/// Overlap ratio above which a pair is resolved, unless configured otherwise.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Pass budget for the convergence loop, unless configured otherwise.
pub const DEFAULT_MAX_PASSES: usize = 50;

/// How a pair of overlapping footprints is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Keep the larger footprint (the earlier one on ties), drop the other.
    RemoveSmaller,
    /// Replace both by the envelope of their union.
    #[default]
    MergeEnvelope,
}

/// How the overlap of two footprints is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMode {
    /// `max(inter / area(a), inter / area(b))`: high when either shape is
    /// mostly covered by the other, whatever their relative sizes.
    #[default]
    Containment,
    /// `inter / union`: high only when both shapes are of comparable extent.
    IntersectionOverUnion,
}

/// Parameters of a consolidation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsolidationParams {
    /// A pair overlaps when its score is strictly greater than this.
    pub threshold: f64,
    /// Overlap metric.
    pub scoring: ScoringMode,
    /// Resolution applied to each overlapping pair.
    pub policy: OverlapPolicy,
    /// Maximum number of reduction passes.
    pub max_passes: usize,
}

impl Default for ConsolidationParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scoring: ScoringMode::default(),
            policy: OverlapPolicy::default(),
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

impl ConsolidationParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Checks that the parameters describe a runnable consolidation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if the threshold is not a
    /// finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ConsolidationParams::new();
        assert!((params.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(params.scoring, ScoringMode::Containment);
        assert_eq!(params.policy, OverlapPolicy::MergeEnvelope);
        assert_eq!(params.max_passes, 50);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let params = ConsolidationParams::new()
            .with_threshold(0.5)
            .with_scoring(ScoringMode::IntersectionOverUnion)
            .with_policy(OverlapPolicy::RemoveSmaller)
            .with_max_passes(5);
        assert_eq!(params.policy, OverlapPolicy::RemoveSmaller);
        assert_eq!(params.scoring, ScoringMode::IntersectionOverUnion);
        assert_eq!(params.max_passes, 5);
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        for threshold in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let params = ConsolidationParams::new().with_threshold(threshold);
            assert!(params.validate().is_err(), "accepted {threshold}");
        }
        assert!(ConsolidationParams::new().with_threshold(0.0).validate().is_ok());
        assert!(ConsolidationParams::new().with_threshold(1.0).validate().is_ok());
    }
}
