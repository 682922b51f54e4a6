//! Alpha-beta configuration parameters.

use crate::search::SearchError;

/// Configuration for alpha-beta search.
#[derive(Debug, Clone)]
pub struct AlphaBetaConfig {
    /// Plies searched below the root. Positions still open at this depth
    /// score as a tie.
    pub depth: u32,

    /// Search forced squares first, then cells with the most occupied
    /// neighbours. When off, candidates are taken in row-major order.
    pub move_ordering: bool,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            move_ordering: true,
        }
    }
}

impl AlphaBetaConfig {
    /// Builder pattern: set search depth.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Builder pattern: toggle move ordering.
    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.move_ordering = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth == 0 {
            return Err(SearchError::Configuration(
                "depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AlphaBetaConfig::default();
        assert_eq!(config.depth, 6);
        assert!(config.move_ordering);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = AlphaBetaConfig::default()
            .with_depth(9)
            .with_move_ordering(false);
        assert_eq!(config.depth, 9);
        assert!(!config.move_ordering);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(
            AlphaBetaConfig::default().with_depth(0).validate(),
            Err(SearchError::Configuration(_))
        ));
    }
}
