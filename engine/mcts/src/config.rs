//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub iterations: u32,

    /// Exploration constant C in `wins/games + C * sqrt(ln(N_parent) / games)`.
    /// Higher values spread visits more evenly across siblings.
    pub uct_const: f64,

    /// Probability that expansion takes the best-ranked untried cell
    /// (forced squares, then most occupied neighbours) rather than a
    /// uniformly random one.
    pub expand_policy_prob: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 500,
            uct_const: 1.1,
            expand_policy_prob: 0.9,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_uct_const(mut self, c: f64) -> Self {
        self.uct_const = c;
        self
    }

    /// Builder pattern: set the expansion policy probability.
    pub fn with_expand_policy_prob(mut self, p: f64) -> Self {
        self.expand_policy_prob = p;
        self
    }

    /// Reject settings the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::Configuration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if !(self.uct_const.is_finite() && self.uct_const >= 0.0) {
            return Err(SearchError::Configuration(format!(
                "uct_const must be a non-negative number, got {}",
                self.uct_const
            )));
        }
        if !(0.0..=1.0).contains(&self.expand_policy_prob) {
            return Err(SearchError::Configuration(format!(
                "expand_policy_prob must be within [0, 1], got {}",
                self.expand_policy_prob
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 500);
        assert!((config.uct_const - 1.1).abs() < 1e-6);
        assert!((config.expand_policy_prob - 0.9).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_uct_const(2.0)
            .with_expand_policy_prob(0.5);

        assert_eq!(config.iterations, 100);
        assert!((config.uct_const - 2.0).abs() < 1e-6);
        assert!((config.expand_policy_prob - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            MctsConfig::default().with_iterations(0),
            MctsConfig::default().with_uct_const(-0.1),
            MctsConfig::default().with_uct_const(f64::NAN),
            MctsConfig::default().with_expand_policy_prob(1.5),
            MctsConfig::default().with_expand_policy_prob(-0.5),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(SearchError::Configuration(_))),
                "{:?} should be rejected",
                config
            );
        }
        // the edges are fine
        assert!(MctsConfig::default()
            .with_uct_const(0.0)
            .with_expand_policy_prob(1.0)
            .validate()
            .is_ok());
    }
}
