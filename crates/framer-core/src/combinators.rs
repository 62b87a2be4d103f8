//! Ordered async combinators used by the pipeline.
//!
//! - `reduce_sequential` / `try_collect_sequential`: one future at a time, in order.
//! - `filter_concurrent`: fan-out predicates, keep survivors in input order.
//! - `settle_all`: spawn one task per item, collect every outcome in input order.

use futures_util::future::join_all;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};

/// Shared cancellation signal checked at per-image boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Work already started runs to completion.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self, file_name: &str) -> PipelineResult<()> {
        if self.is_cancelled() {
            return Err(PipelineError::Cancelled {
                file_name: file_name.to_string(),
            });
        }
        Ok(())
    }
}

/// Fold `items` through `f`, awaiting each step before starting the next.
pub async fn reduce_sequential<T, A, F, Fut>(
    items: impl IntoIterator<Item = T>,
    init: A,
    mut f: F,
) -> A
where
    F: FnMut(A, T) -> Fut,
    Fut: Future<Output = A>,
{
    let mut acc = init;
    for item in items {
        acc = f(acc, item).await;
    }
    acc
}

/// Map `items` through `f` one at a time, stopping at the first error.
///
/// The closure receives the item index. Later items are never started once
/// one fails.
pub async fn try_collect_sequential<T, P, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    mut f: F,
) -> Result<Vec<P>, E>
where
    F: FnMut(usize, T) -> Fut,
    Fut: Future<Output = Result<P, E>>,
{
    let mut out = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        out.push(f(index, item).await?);
    }
    Ok(out)
}

/// Run `predicate` for every item concurrently and keep the ones it accepts.
///
/// The predicate takes ownership and hands the item back with its verdict, so
/// no item is borrowed across the fan-out. Relative order is preserved.
pub async fn filter_concurrent<T, F, Fut>(items: Vec<T>, predicate: F) -> Vec<T>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = (T, bool)>,
{
    join_all(items.into_iter().map(predicate))
        .await
        .into_iter()
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Spawn `f(item)` for every item without a concurrency cap and wait for all
/// of them.
///
/// Never short-circuits: the returned vector has one outcome per input, in
/// input order. A panicking task becomes `PipelineError::Task`.
pub async fn settle_all<T, R, F, Fut>(items: Vec<T>, f: F) -> Vec<PipelineResult<R>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = PipelineResult<R>> + Send + 'static,
    R: Send + 'static,
{
    let handles: Vec<_> = items.into_iter().map(|item| tokio::spawn(f(item))).collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Per-image task panicked: {e}");
                Err(PipelineError::Task(e.to_string()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reduce_sequential_runs_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let result = reduce_sequential(vec![3u64, 1, 2], 0u64, |acc, x| {
            let seen = seen.clone();
            async move {
                // Longer sleeps first: order must still follow the input.
                tokio::time::sleep(Duration::from_millis(x * 5)).await;
                seen.lock().unwrap().push(x);
                acc * 10 + x
            }
        })
        .await;

        assert_eq!(result, 312);
        assert_eq!(*seen.lock().unwrap(), vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_reduce_sequential_empty_returns_init() {
        let result = reduce_sequential(Vec::<u32>::new(), 7, |acc, x| async move { acc + x }).await;
        assert_eq!(result, 7);
    }

    #[tokio::test]
    async fn test_try_collect_sequential_stops_at_first_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let result: Result<Vec<u32>, String> =
            try_collect_sequential(vec![1u32, 2, 3], |index, x| {
                let calls = calls.clone();
                async move {
                    calls.lock().unwrap().push(index);
                    if x == 2 {
                        Err("boom".to_string())
                    } else {
                        Ok(x)
                    }
                }
            })
            .await;

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(*calls.lock().unwrap(), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_filter_concurrent_preserves_order() {
        let items: Vec<u64> = (1..=10).collect();
        let kept = filter_concurrent(items, |x| async move {
            tokio::time::sleep(Duration::from_millis(20 - x)).await;
            (x, x % 2 == 0)
        })
        .await;
        assert_eq!(kept, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn test_settle_all_collects_every_outcome() {
        let outcomes = settle_all(vec![1u32, 2, 3, 4], |x| async move {
            if x == 3 {
                Err(PipelineError::Task("three".to_string()))
            } else {
                Ok(x * 2)
            }
        })
        .await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].as_ref().unwrap(), &2);
        assert_eq!(outcomes[1].as_ref().unwrap(), &4);
        assert!(outcomes[2].is_err());
        assert_eq!(outcomes[3].as_ref().unwrap(), &8);
    }

    #[tokio::test]
    async fn test_settle_all_slow_item_does_not_drop_others() {
        let outcomes = settle_all(vec![50u64, 1, 1], |ms| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(ms)
        })
        .await;
        let values: Vec<u64> = outcomes.into_iter().map(|o| o.unwrap()).collect();
        assert_eq!(values, vec![50, 1, 1]);
    }

    #[tokio::test]
    async fn test_settle_all_maps_panics_to_task_errors() {
        let outcomes = settle_all(vec![true, false], |explode| async move {
            if explode {
                panic!("kaboom");
            }
            Ok(())
        })
        .await;

        assert!(matches!(outcomes[0], Err(PipelineError::Task(_))));
        assert!(outcomes[1].is_ok());
    }

    #[test]
    fn test_cancel_flag_shared_between_clones() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(flag.check("a.png").is_ok());

        other.cancel();
        assert!(flag.is_cancelled());
        assert!(matches!(
            flag.check("a.png"),
            Err(PipelineError::Cancelled { .. })
        ));
    }
}
