//! Tabu Search configuration.

/// Configuration parameters for single-objective Tabu Search.
///
/// Tabu tenure is not set here: each neighborhood class carries its own
/// memory capacity.
///
/// # Examples
///
/// ```
/// use u_tabu::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_shuffle_after(25)
///     .with_pool_size(4)
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.shuffle_after, 25);
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Iterations without improvement before the current solution is
    /// shuffled.
    pub shuffle_after: usize,
    /// Worker threads per parallel round (0 = one per CPU).
    pub pool_size: usize,
    /// Whether to use aspiration criterion (override tabu if the move
    /// produces a new global best).
    pub aspiration: bool,
    /// Random seed (None for the default seed).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            shuffle_after: 50,
            pool_size: 0,
            aspiration: true,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of non-improving iterations before shuffling.
    pub fn with_shuffle_after(mut self, n: usize) -> Self {
        self.shuffle_after = n;
        self
    }

    /// Sets the number of worker threads.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.shuffle_after == 0 {
            return Err("shuffle_after must be at least 1".into());
        }
        Ok(())
    }
}
