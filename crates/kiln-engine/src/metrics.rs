//! Per-step performance metrics for the simulation engine.
//!
//! [`StepMetrics`] captures timing and a heat-balance reading for a single
//! step, for profiling and conservation checks.

/// Timing and diagnostic data collected during a single step.
///
/// All durations are in microseconds. The engine populates these fields
/// after each successful `step()` call.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Per-propagator execution times: `(name, microseconds)`.
    pub propagator_us: Vec<(String, u64)>,
    /// Sum of all cell temperatures after the step.
    pub total_heat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert!(m.propagator_us.is_empty());
        assert_eq!(m.total_heat, 0.0);
    }
}
