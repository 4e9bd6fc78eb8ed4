//! Multi-objective tabu search execution engine.
//!
//! # Algorithm
//!
//! 1. Seed the Pareto archive and the working set with the initial solution
//! 2. At each iteration:
//!    a. For every working-set member, pick one of its neighborhoods at
//!    random and evaluate all its candidates in parallel
//!    b. Admit each candidate into the archive; stage it for the working set
//!    if admitted or accepted by the propagation predicate
//!    c. Add staged candidates to the working set
//!    d. Trim the working set to its bound by random removal
//!    e. Shuffle every member after `shuffle_after` iterations without growth
//! 3. Return the archive, each member post-optimized once
//!
//! The archive only ever holds non-dominated solutions; the working set may
//! hold dominated ones when the predicate lets them through, which is how
//! the search explores beyond the current front.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::config::ParetoConfig;
use super::front::ParetoFront;
use super::set::SolutionSet;
use crate::error::{Result, SearchError};
use crate::tabu::{
    find_best_candidates, Aspiration, Objectives, Solution, TabuProblem, TabuRegistry, WorkerPool,
};

/// Propagation predicate that lets every candidate into the working set.
pub fn accept_all<S>(_candidate: &S, _front: &ParetoFront<S>) -> bool {
    true
}

/// Propagation predicate that only propagates archive admissions.
pub fn accept_none<S>(_candidate: &S, _front: &ParetoFront<S>) -> bool {
    false
}

/// Result of a multi-objective tabu search run.
#[derive(Debug, Clone)]
pub struct ParetoResult<S> {
    /// Final Pareto archive, each member passed through post-optimization.
    pub front: Vec<S>,
    /// Total iterations executed.
    pub iterations: usize,
    /// Number of times the working set was shuffled.
    pub shuffles: usize,
    /// Working-set size when the run ended.
    pub working_set: usize,
    /// Cost of the initial solution and every candidate seen, when
    /// recording was enabled.
    pub candidate_costs: Option<Vec<Objectives>>,
}

impl<S: Solution<Cost = Objectives>> ParetoResult<S> {
    /// Costs of the final front, in archive order.
    pub fn costs(&self) -> Vec<Objectives> {
        self.front.iter().map(|s| s.cost()).collect()
    }
}

/// Multi-objective tabu search runner.
pub struct ParetoRunner;

impl ParetoRunner {
    /// Runs the search, propagating every candidate ([`accept_all`]).
    pub fn run<P>(problem: &P, config: &ParetoConfig) -> Result<ParetoResult<P::Solution>>
    where
        P: TabuProblem,
        P::Solution: Solution<Cost = Objectives>,
    {
        Self::run_with_predicate(problem, config, accept_all)
    }

    /// Runs the search with a caller-supplied propagation predicate.
    ///
    /// `predicate(candidate, front)` decides whether a candidate that did
    /// not enter the archive still joins the working set. It only gets a
    /// shared reference to the archive.
    pub fn run_with_predicate<P, F>(
        problem: &P,
        config: &ParetoConfig,
        predicate: F,
    ) -> Result<ParetoResult<P::Solution>>
    where
        P: TabuProblem,
        P::Solution: Solution<Cost = Objectives>,
        F: Fn(&P::Solution, &ParetoFront<P::Solution>) -> bool,
    {
        config.validate().map_err(SearchError::Config)?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(42));
        let initial = problem.initial_solution(&mut rng)?;
        let initial_cost = initial.cost();

        if config.record_candidates && initial_cost.len() != 2 {
            return Err(SearchError::Config(format!(
                "candidate recording needs exactly 2 objectives, got {}",
                initial_cost.len()
            )));
        }

        let pool = WorkerPool::new(config.pool_size)?;
        info!(
            "pareto tabu search: {} iterations on {} worker(s), initial cost {:?}",
            config.max_iterations,
            pool.size(),
            initial_cost.as_slice()
        );

        let mut candidate_costs = config.record_candidates.then(|| vec![initial_cost]);
        let mut results = ParetoFront::new();
        results.admit(initial.clone());
        let mut current: SolutionSet<P::Solution> = std::iter::once(initial).collect();

        let mut registry = TabuRegistry::new();
        let mut last_improved = 0;
        let mut shuffles = 0;
        let mut iterations = 0;

        for iteration in 0..config.max_iterations {
            let mut propagate: Vec<P::Solution> = Vec::new();

            for solution in current.iter() {
                let neighborhoods = solution.neighborhoods();
                let Some(neighborhood) = neighborhoods.choose(&mut rng) else {
                    warn!("solution {:?} offers no neighborhood", solution.cost().as_slice());
                    continue;
                };

                let candidates = {
                    let aspire = |cost: &Objectives| !results.covers(cost);
                    let aspiration: Option<Aspiration<'_, Objectives>> =
                        if config.aspiration { Some(&aspire) } else { None };
                    find_best_candidates(&pool, solution, neighborhood, &mut registry, aspiration)?
                };

                for candidate in candidates {
                    if let Some(costs) = candidate_costs.as_mut() {
                        costs.push(candidate.cost.clone());
                    }

                    let admitted = results.admit_with(candidate.cost, candidate.solution.clone());
                    if admitted || predicate(&candidate.solution, &results) {
                        propagate.push(candidate.solution);
                    }
                }
            }

            let mut grew = false;
            for candidate in propagate {
                grew |= current.insert(candidate);
            }
            if grew {
                last_improved = iteration;
            }

            if let Some(max) = &config.max_propagation {
                let limit = max.limit(results.costs());
                if current.len() > limit {
                    current.remove_random(current.len() - limit, &mut rng);
                }
            }

            if iteration - last_improved >= config.shuffle_after {
                current = current
                    .into_vec()
                    .iter()
                    .map(|s| s.shuffle(&mut rng))
                    .collect();
                shuffles += 1;
            }

            iterations = iteration + 1;
            debug!(
                "iteration {}: {}/{} solution(s)",
                iteration,
                current.len(),
                results.len()
            );
        }

        let working_set = current.len();
        let front: Vec<P::Solution> = results
            .into_items()
            .iter()
            .map(|s| s.post_optimization())
            .collect();

        info!(
            "pareto tabu search finished: {} solution(s) after {} iteration(s), {} shuffle(s)",
            front.len(),
            iterations,
            shuffles
        );

        Ok(ParetoResult {
            front,
            iterations,
            shuffles,
            working_set,
            candidate_costs,
        })
    }
}
