//! Parallel move evaluation for one neighborhood pass.
//!
//! # Protocol
//!
//! 1. Enumerate every move of the neighborhood for the bound solution
//! 2. Shard the moves round-robin over the worker pool
//! 3. Each worker materializes its moves and reduces them locally
//! 4. The driver reduces the shard results in shard order and records the
//!    adopted move(s) in the neighborhood's tabu memory
//!
//! # Tabu policy
//!
//! Tabu moves are still evaluated. A tabu move's candidate is admissible
//! only if the driver's aspiration test accepts its cost; without an
//! aspiration test, tabu moves are skipped before materialization.

use log::trace;

use super::memory::{TabuMemory, TabuRegistry};
use super::pool::WorkerPool;
use super::types::{Neighborhood, Objectives, Solution};
use crate::error::Result;
use crate::pareto::ParetoFront;

/// Aspiration test: whether a tabu move with this cost may be adopted.
pub type Aspiration<'a, C> = &'a (dyn Fn(&C) -> bool + Sync);

/// A materialized neighbor produced by one move.
#[derive(Debug, Clone)]
pub struct Candidate<S: Solution, M> {
    /// The neighbor solution.
    pub solution: S,
    /// Cost of `solution`.
    pub cost: S::Cost,
    /// Move that produced it.
    pub mv: M,
    /// Position of the move in the neighborhood's enumeration order.
    pub order: usize,
    /// Whether the move was tabu (and admitted by aspiration).
    pub tabu: bool,
}

struct Round<'a, S: Solution, N: Neighborhood<S>> {
    solution: &'a S,
    neighborhood: &'a N,
    tabu: Option<&'a TabuMemory<N::Move>>,
    aspiration: Option<Aspiration<'a, S::Cost>>,
}

impl<S: Solution, N: Neighborhood<S>> Clone for Round<'_, S, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Solution, N: Neighborhood<S>> Copy for Round<'_, S, N> {}

impl<S: Solution, N: Neighborhood<S>> Round<'_, S, N> {
    fn evaluate(&self, order: usize, mv: &N::Move) -> Result<Option<Candidate<S, N::Move>>> {
        let tabu = self.tabu.is_some_and(|memory| memory.contains(mv));
        if tabu && self.aspiration.is_none() {
            return Ok(None);
        }

        let solution = self.neighborhood.apply(self.solution, mv)?;
        let cost = solution.cost();
        if tabu && !self.aspiration.is_some_and(|aspire| aspire(&cost)) {
            return Ok(None);
        }

        Ok(Some(Candidate {
            solution,
            cost,
            mv: mv.clone(),
            order,
            tabu,
        }))
    }
}

fn improves<S, M>(candidate: &Candidate<S, M>, incumbent: &Option<Candidate<S, M>>) -> bool
where
    S: Solution<Cost = f64>,
{
    match incumbent {
        None => true,
        Some(best) => {
            candidate.cost < best.cost || (candidate.cost == best.cost && candidate.order < best.order)
        }
    }
}

/// Finds the minimal-cost admissible neighbor of `solution`.
///
/// Returns `Ok(None)` when the neighborhood has no admissible move. Ties
/// are broken by enumeration order, independent of which worker finished
/// first. The adopted move is recorded as tabu.
pub fn find_best_candidate<S, N>(
    pool: &WorkerPool,
    solution: &S,
    neighborhood: &N,
    registry: &mut TabuRegistry<N::Move>,
    aspiration: Option<Aspiration<'_, f64>>,
) -> Result<Option<Candidate<S, N::Move>>>
where
    S: Solution<Cost = f64>,
    N: Neighborhood<S>,
{
    let moves: Vec<(usize, N::Move)> = neighborhood.moves(solution).into_iter().enumerate().collect();
    if moves.is_empty() {
        return Ok(None);
    }

    let round = Round {
        solution,
        neighborhood,
        tabu: registry.memory(neighborhood.class()),
        aspiration,
    };
    let bundles = pool.shard(round, moves);
    trace!(
        "{}: evaluating {} shard(s) on {} worker(s)",
        neighborhood.class(),
        bundles.len(),
        pool.size()
    );

    let partials = pool.run(&bundles, |bundle| {
        let mut best: Option<Candidate<S, N::Move>> = None;
        for (order, mv) in &bundle.items {
            if let Some(candidate) = bundle.context.evaluate(*order, mv)? {
                if improves(&candidate, &best) {
                    best = Some(candidate);
                }
            }
        }
        Ok(best)
    })?;

    let mut best: Option<Candidate<S, N::Move>> = None;
    for candidate in partials.into_iter().flatten() {
        if improves(&candidate, &best) {
            best = Some(candidate);
        }
    }

    if let Some(candidate) = &best {
        registry.record(
            neighborhood.class(),
            neighborhood.tabu_capacity(),
            candidate.mv.clone(),
        );
    }

    Ok(best)
}

/// Finds every non-dominated admissible neighbor of `solution`.
///
/// Each worker keeps the non-dominated subset of its shard; the shard sets
/// are merged in enumeration order, so among equal-cost candidates the
/// earliest-enumerated one survives. Candidates are returned in
/// enumeration order and every returned move is recorded as tabu.
pub fn find_best_candidates<S, N>(
    pool: &WorkerPool,
    solution: &S,
    neighborhood: &N,
    registry: &mut TabuRegistry<N::Move>,
    aspiration: Option<Aspiration<'_, Objectives>>,
) -> Result<Vec<Candidate<S, N::Move>>>
where
    S: Solution<Cost = Objectives>,
    N: Neighborhood<S>,
{
    let moves: Vec<(usize, N::Move)> = neighborhood.moves(solution).into_iter().enumerate().collect();
    if moves.is_empty() {
        return Ok(Vec::new());
    }

    let round = Round {
        solution,
        neighborhood,
        tabu: registry.memory(neighborhood.class()),
        aspiration,
    };
    let bundles = pool.shard(round, moves);
    trace!(
        "{}: evaluating {} shard(s) on {} worker(s)",
        neighborhood.class(),
        bundles.len(),
        pool.size()
    );

    let partials = pool.run(&bundles, |bundle| {
        let mut local = ParetoFront::new();
        for (order, mv) in &bundle.items {
            if let Some(candidate) = bundle.context.evaluate(*order, mv)? {
                local.admit_with(candidate.cost.clone(), candidate);
            }
        }
        Ok(local.into_items())
    })?;

    let mut survivors: Vec<Candidate<S, N::Move>> = partials.into_iter().flatten().collect();
    survivors.sort_by_key(|c| c.order);

    let mut merged = ParetoFront::new();
    for candidate in survivors {
        merged.admit_with(candidate.cost.clone(), candidate);
    }

    let mut candidates = merged.into_items();
    candidates.sort_by_key(|c| c.order);

    for candidate in &candidates {
        registry.record(
            neighborhood.class(),
            neighborhood.tabu_capacity(),
            candidate.mv.clone(),
        );
    }

    Ok(candidates)
}
