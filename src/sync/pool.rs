//! Bounded worker pool
//!
//! A fixed number of tasks pull items from a shared cursor until it runs off
//! the end. The cursor is the only shared mutable state; fetch-and-increment
//! claims guarantee every item is handled exactly once. Used by both the
//! upload and the purge path.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

/// Process `items` with at most `concurrency` concurrent invocations of
/// `handler`, returning one outcome per item.
///
/// An empty input returns immediately without spawning anything. Outcome
/// order is unspecified. `handler` must not panic; a panicking worker aborts
/// the run with an error.
pub async fn run_pool<T, O, F, Fut>(items: Vec<T>, concurrency: usize, handler: F) -> Result<Vec<O>>
where
    T: Clone + Send + Sync + 'static,
    O: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let workers = concurrency.clamp(1, items.len());
    let items = Arc::new(items);
    let cursor = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(handler);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let items = Arc::clone(&items);
        let cursor = Arc::clone(&cursor);
        let handler = Arc::clone(&handler);

        handles.push(tokio::spawn(async move {
            let mut outcomes = Vec::new();
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= items.len() {
                    break;
                }
                outcomes.push(handler(items[index].clone()).await);
            }
            outcomes
        }));
    }

    let mut outcomes = Vec::with_capacity(items.len());
    for handle in handles {
        let batch = handle.await.context("worker task panicked")?;
        outcomes.extend(batch);
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_input_no_work() {
        let outcomes = run_pool(Vec::<u32>::new(), 8, |n| async move { n }).await.unwrap();
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_every_item_handled_exactly_once() {
        let items: Vec<u32> = (0..100).collect();
        let outcomes = run_pool(items, 8, |n| async move { n }).await.unwrap();

        assert_eq!(outcomes.len(), 100);
        let unique: HashSet<u32> = outcomes.iter().copied().collect();
        assert_eq!(unique.len(), 100);
    }

    #[tokio::test]
    async fn test_single_worker_preserves_order() {
        let items: Vec<u32> = (0..20).collect();
        let outcomes = run_pool(items.clone(), 1, |n| async move { n }).await.unwrap();
        assert_eq!(outcomes, items);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_bound_respected() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<u32> = (0..50).collect();
        let bound = 4;

        let gauge = Arc::clone(&in_flight);
        let high = Arc::clone(&peak);
        let outcomes = run_pool(items, bound, move |n| {
            let gauge = Arc::clone(&gauge);
            let high = Arc::clone(&high);
            async move {
                let now = gauge.fetch_add(1, Ordering::SeqCst) + 1;
                high.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                gauge.fetch_sub(1, Ordering::SeqCst);
                n
            }
        })
        .await
        .unwrap();

        assert_eq!(outcomes.len(), 50);
        assert!(peak.load(Ordering::SeqCst) <= bound);
        // The pool should actually run workers concurrently, not serially.
        assert!(peak.load(Ordering::SeqCst) > 1);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_siblings() {
        let items: Vec<u32> = (0..10).collect();
        let outcomes = run_pool(items, 3, |n| async move {
            if n == 7 {
                Err(format!("item {} failed", n))
            } else {
                Ok(n)
            }
        })
        .await
        .unwrap();

        assert_eq!(outcomes.len(), 10);
        assert_eq!(outcomes.iter().filter(|o| o.is_ok()).count(), 9);
        assert_eq!(outcomes.iter().filter(|o| o.is_err()).count(), 1);
    }

    #[tokio::test]
    async fn test_concurrency_larger_than_input() {
        let outcomes = run_pool(vec![1u32, 2, 3], 64, |n| async move { n * 2 }).await.unwrap();
        let mut doubled = outcomes.clone();
        doubled.sort_unstable();
        assert_eq!(doubled, vec![2, 4, 6]);
    }
}
