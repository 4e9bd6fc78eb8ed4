//! Fixed-size worker pool for parallel move evaluation.
//!
//! A pool is built once per search run and joined when dropped, so it is
//! released on every exit path including early termination and errors.
//! Work is handed out as [`Bundle`]s: an immutable context shared by
//! reference plus the shard of items one worker evaluates. Workers return
//! values only; nothing they touch is mutable.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Result, SearchError};

/// One unit of work for one worker.
#[derive(Debug, Clone)]
pub struct Bundle<C, T> {
    /// Index of the shard (`0..pool.size()`).
    pub shard: usize,
    /// Read-only context shared by every bundle of the round.
    pub context: C,
    /// Items this worker evaluates, in enumeration order.
    pub items: Vec<T>,
}

/// A dedicated pool of worker threads.
pub struct WorkerPool {
    pool: ThreadPool,
    size: usize,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool").field("size", &self.size).finish()
    }
}

impl WorkerPool {
    /// Builds a pool of `size` workers. `0` means one per available CPU.
    pub fn new(size: usize) -> Result<Self> {
        let size = if size == 0 {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        } else {
            size
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("u-tabu-worker-{i}"))
            .build()
            .map_err(|e| SearchError::Pool(e.to_string()))?;

        Ok(Self { pool, size })
    }

    /// Number of worker slots.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Splits `items` round-robin into one bundle per worker slot.
    ///
    /// Item `i` lands in shard `i % size`, keeping enumeration order within
    /// each shard. Shards that would be empty are not created.
    pub fn shard<C: Clone, T>(&self, context: C, items: Vec<T>) -> Vec<Bundle<C, T>> {
        let mut bundles: Vec<Bundle<C, T>> = (0..self.size)
            .map(|shard| Bundle {
                shard,
                context: context.clone(),
                items: Vec::with_capacity(items.len() / self.size + 1),
            })
            .collect();

        for (i, item) in items.into_iter().enumerate() {
            bundles[i % self.size].items.push(item);
        }

        bundles.retain(|b| !b.items.is_empty());
        bundles
    }

    /// Evaluates every bundle in parallel and waits for all of them.
    ///
    /// Results come back in shard order regardless of completion order.
    /// The first failing shard (by shard order) aborts the round; a panic
    /// inside `work` is reported as [`SearchError::Worker`].
    pub fn run<C, T, R, F>(&self, bundles: &[Bundle<C, T>], work: F) -> Result<Vec<R>>
    where
        C: Sync,
        T: Sync,
        R: Send,
        F: Fn(&Bundle<C, T>) -> Result<R> + Sync,
    {
        let outcomes: Vec<Result<R>> = self.pool.install(|| {
            bundles
                .par_iter()
                .map(|bundle| {
                    panic::catch_unwind(AssertUnwindSafe(|| work(bundle))).unwrap_or_else(
                        |payload| {
                            Err(SearchError::Worker {
                                shard: bundle.shard,
                                message: panic_message(payload.as_ref()),
                            })
                        },
                    )
                })
                .collect()
        });

        outcomes.into_iter().collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shard_round_robin() {
        let pool = WorkerPool::new(3).unwrap();
        let bundles = pool.shard("ctx", (0..7).collect::<Vec<_>>());

        assert_eq!(bundles.len(), 3);
        assert_eq!(bundles[0].items, vec![0, 3, 6]);
        assert_eq!(bundles[1].items, vec![1, 4]);
        assert_eq!(bundles[2].items, vec![2, 5]);
        assert!(bundles.iter().all(|b| b.context == "ctx"));
    }

    #[test]
    fn test_shard_skips_empty() {
        let pool = WorkerPool::new(4).unwrap();
        let bundles = pool.shard((), vec![10, 11]);
        assert_eq!(bundles.len(), 2);
        assert_eq!(bundles[1].shard, 1);
        assert!(pool.shard((), Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn test_run_preserves_shard_order() {
        let pool = WorkerPool::new(4).unwrap();
        let bundles = pool.shard(10usize, (0..100usize).collect::<Vec<_>>());
        let sums = pool
            .run(&bundles, |b| Ok(b.items.iter().sum::<usize>() + b.context))
            .unwrap();

        let expected: Vec<usize> = bundles
            .iter()
            .map(|b| b.items.iter().sum::<usize>() + 10)
            .collect();
        assert_eq!(sums, expected);
    }

    #[test]
    fn test_run_reports_panic_as_worker_error() {
        let pool = WorkerPool::new(2).unwrap();
        let bundles = pool.shard((), vec![1, 2, 3, 4]);
        let result: Result<Vec<()>> = pool.run(&bundles, |b| {
            if b.shard == 1 {
                panic!("shard exploded");
            }
            Ok(())
        });

        match result {
            Err(SearchError::Worker { shard, message }) => {
                assert_eq!(shard, 1);
                assert!(message.contains("shard exploded"));
            }
            other => panic!("expected worker error, got {other:?}"),
        }
    }

    #[test]
    fn test_run_propagates_first_error() {
        let pool = WorkerPool::new(3).unwrap();
        let bundles = pool.shard((), (0..9).collect::<Vec<_>>());
        let result: Result<Vec<()>> = pool.run(&bundles, |b| {
            Err(SearchError::Neighborhood(format!("shard {}", b.shard)))
        });

        match result {
            Err(SearchError::Neighborhood(msg)) => assert_eq!(msg, "shard 0"),
            other => panic!("expected neighborhood error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_size_uses_available_cpus() {
        let pool = WorkerPool::new(0).unwrap();
        assert!(pool.size() >= 1);
    }
}
