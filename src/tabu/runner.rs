//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate initial solution (`current = best = initial`)
//! 2. At each iteration:
//!    a. Take the next neighborhood, round-robin over the current
//!    solution's neighborhood list
//!    b. Find its best admissible candidate in parallel (non-tabu, or tabu
//!    satisfying aspiration); stop if there is none
//!    c. Move to the candidate only if it improves on `current`
//!    d. Update the global best
//!    e. Shuffle `current` once `shuffle_after` iterations pass without
//!    improvement; the global best is kept
//! 3. Return the post-optimized global best
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::TabuConfig;
use super::evaluation::{find_best_candidate, Aspiration};
use super::memory::TabuRegistry;
use super::pool::WorkerPool;
use super::types::{Neighborhood, Solution, TabuProblem};
use crate::error::{Result, SearchError};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone> {
    /// Best solution found, after post-optimization.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found.
    pub best_iteration: usize,
    /// Last iteration at which the current solution improved.
    pub last_improved: usize,
    /// Number of times the current solution was shuffled.
    pub shuffles: usize,
    /// Cost history (best cost at each iteration).
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given problem.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, when the worker pool cannot be
    /// built, or when the problem or a worker reports an error. A search
    /// that runs out of moves is not an error; it returns early.
    pub fn run<P>(problem: &P, config: &TabuConfig) -> Result<TabuResult<P::Solution>>
    where
        P: TabuProblem,
        P::Solution: Solution<Cost = f64>,
    {
        config.validate().map_err(SearchError::Config)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(42));

        // Initialize
        let mut current = problem.initial_solution(&mut rng)?;
        let mut current_cost = current.cost();
        let mut best = current.clone();
        let mut best_cost = current_cost;
        let mut best_iteration = 0;

        let pool = WorkerPool::new(config.pool_size)?;
        info!(
            "tabu search: {} iterations on {} worker(s), initial cost {}",
            config.max_iterations,
            pool.size(),
            current_cost
        );

        let mut registry = TabuRegistry::new();
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut last_improved = 0;
        let mut shuffles = 0;

        for iteration in 0..config.max_iterations {
            let neighborhoods = current.neighborhoods();
            if neighborhoods.is_empty() {
                warn!("current solution offers no neighborhood; stopping");
                cost_history.push(best_cost);
                break;
            }
            let neighborhood = &neighborhoods[iteration % neighborhoods.len()];

            let candidate = {
                let aspire = |cost: &f64| *cost < best_cost;
                let aspiration: Option<Aspiration<'_, f64>> =
                    if config.aspiration { Some(&aspire) } else { None };
                find_best_candidate(&pool, &current, neighborhood, &mut registry, aspiration)?
            };

            let Some(candidate) = candidate else {
                debug!(
                    "iteration {iteration}: {} has no admissible move",
                    neighborhood.class()
                );
                cost_history.push(best_cost);
                break;
            };

            if candidate.cost < current_cost {
                current = candidate.solution;
                current_cost = candidate.cost;
                last_improved = iteration;
            }

            // Update global best
            if current_cost < best_cost {
                best = current.clone();
                best_cost = current_cost;
                best_iteration = iteration;
                debug!("iteration {iteration}: new best {best_cost}");
            }

            cost_history.push(best_cost);

            // Diversify from the walk's position, not from the global best
            if iteration - last_improved >= config.shuffle_after {
                current = current.shuffle(&mut rng);
                current_cost = current.cost();
                shuffles += 1;
            }
        }

        let best = best.post_optimization();
        let best_cost = best.cost();
        info!(
            "tabu search finished: best cost {} after {} iteration(s), {} shuffle(s)",
            best_cost,
            cost_history.len(),
            shuffles
        );

        Ok(TabuResult {
            best,
            best_cost,
            iterations: cost_history.len(),
            best_iteration,
            last_improved,
            shuffles,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    // ---- Quadratic minimization: f(x) = (x - 5)^2, minimum at x = 5 ----

    #[derive(Debug, Clone)]
    struct Int(i32);

    struct Unit;

    impl Neighborhood<Int> for Unit {
        type Move = i32;

        fn class(&self) -> &'static str {
            "unit"
        }

        fn tabu_capacity(&self) -> usize {
            1
        }

        // Step direction as the move key
        fn moves(&self, _solution: &Int) -> Vec<i32> {
            vec![-1, 1]
        }

        fn apply(&self, solution: &Int, mv: &i32) -> Result<Int> {
            Ok(Int(solution.0 + mv))
        }
    }

    impl Solution for Int {
        type Cost = f64;
        type Neighborhood = Unit;

        fn cost(&self) -> f64 {
            let d = self.0 as f64 - 5.0;
            d * d
        }

        fn neighborhoods(&self) -> Vec<Unit> {
            vec![Unit]
        }

        fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
            Int(self.0 + rng.random_range(-10..=10))
        }
    }

    struct DiscretizedQuadratic;

    impl TabuProblem for DiscretizedQuadratic {
        type Solution = Int;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Int> {
            Ok(Int(rng.random_range(-50..50)))
        }
    }

    #[test]
    fn test_tabu_quadratic_finds_optimum() {
        let config = TabuConfig::default()
            .with_max_iterations(200)
            .with_pool_size(2)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        assert_eq!(result.best.0, 5, "expected optimum at x=5, got {}", result.best.0);
        assert!(result.best_cost < 1e-10, "expected zero cost, got {}", result.best_cost);
    }

    #[test]
    fn test_tabu_cost_history_non_increasing() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_shuffle_after(5)
            .with_pool_size(1)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_tabu_shuffles_after_stagnation() {
        let config = TabuConfig::default()
            .with_max_iterations(300)
            .with_shuffle_after(10)
            .with_pool_size(1)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        // Once at x = 5 nothing improves on it, so the walk keeps being shuffled.
        assert!(result.shuffles > 0);
        assert_eq!(result.best.0, 5);
        assert_eq!(result.iterations, 300);
    }

    #[test]
    fn test_tabu_best_iteration_recorded() {
        let config = TabuConfig::default()
            .with_max_iterations(100)
            .with_pool_size(1)
            .with_seed(42);

        let result = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();

        assert!(
            result.best_iteration < result.iterations,
            "best_iteration {} should be < total iterations {}",
            result.best_iteration,
            result.iterations
        );
        assert!(result.best_iteration <= result.last_improved);
    }

    #[test]
    fn test_tabu_seeded_runs_are_reproducible() {
        let config = TabuConfig::default()
            .with_max_iterations(80)
            .with_shuffle_after(4)
            .with_pool_size(3)
            .with_seed(9);

        let a = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();
        let b = TabuRunner::run(&DiscretizedQuadratic, &config).unwrap();
        assert_eq!(a.best.0, b.best.0);
        assert_eq!(a.cost_history, b.cost_history);
        assert_eq!(a.shuffles, b.shuffles);
    }

    #[test]
    fn test_tabu_empty_neighborhood() {
        #[derive(Debug, Clone)]
        struct Stuck;

        struct Nothing;

        impl Neighborhood<Stuck> for Nothing {
            type Move = ();

            fn class(&self) -> &'static str {
                "nothing"
            }

            fn tabu_capacity(&self) -> usize {
                1
            }

            fn moves(&self, _solution: &Stuck) -> Vec<()> {
                vec![]
            }

            fn apply(&self, _solution: &Stuck, _mv: &()) -> Result<Stuck> {
                Ok(Stuck)
            }
        }

        impl Solution for Stuck {
            type Cost = f64;
            type Neighborhood = Nothing;

            fn cost(&self) -> f64 {
                0.0
            }

            fn neighborhoods(&self) -> Vec<Nothing> {
                vec![Nothing]
            }
        }

        struct EmptyNeighborhood;

        impl TabuProblem for EmptyNeighborhood {
            type Solution = Stuck;

            fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<Stuck> {
                Ok(Stuck)
            }
        }

        let config = TabuConfig::default().with_pool_size(1).with_seed(42);
        let result = TabuRunner::run(&EmptyNeighborhood, &config).unwrap();

        // Should terminate immediately with initial solution
        assert_eq!(result.best_cost, 0.0);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_tabu_initial_error_propagates() {
        struct Broken;

        impl TabuProblem for Broken {
            type Solution = Int;

            fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<Int> {
                Err(SearchError::Import {
                    problem: "broken".into(),
                    reason: "no data".into(),
                })
            }
        }

        let result = TabuRunner::run(&Broken, &TabuConfig::default().with_pool_size(1));
        assert!(matches!(result, Err(SearchError::Import { .. })));
    }

    #[test]
    fn test_tabu_config_defaults() {
        let config = TabuConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.shuffle_after, 50);
        assert_eq!(config.pool_size, 0);
        assert!(config.aspiration);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_tabu_config_builder() {
        let config = TabuConfig::default()
            .with_max_iterations(1000)
            .with_shuffle_after(10)
            .with_pool_size(3)
            .with_aspiration(false)
            .with_seed(123);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.shuffle_after, 10);
        assert_eq!(config.pool_size, 3);
        assert!(!config.aspiration);
        assert_eq!(config.seed, Some(123));
        assert!(config.validate().is_ok());
        assert!(config.with_shuffle_after(0).validate().is_err());
    }
}
