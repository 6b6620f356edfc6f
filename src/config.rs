//! Run configuration.

/// Configuration for a property check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of trials to run before declaring success
    pub trials: usize,
    /// Seed for the random source; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Safety cap on shrink descent steps, on top of the search's natural
    /// termination through the well-founded shrink measure
    pub max_shrink_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: None,
            max_shrink_steps: 1000,
        }
    }
}

impl Config {
    /// Override the trial count
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Fix the seed for a reproducible run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the shrink step cap
    pub fn with_max_shrink_steps(mut self, max_shrink_steps: usize) -> Self {
        self.max_shrink_steps = max_shrink_steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.trials, 100);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_shrink_steps, 1000);
    }

    #[test]
    fn test_builders() {
        let config = Config::default().with_trials(20).with_seed(9).with_max_shrink_steps(5);
        assert_eq!(config.trials, 20);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_shrink_steps, 5);
    }
}
