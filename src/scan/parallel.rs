//! Bounded parallel map used to run one matcher per reference resource.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;

/// Run `work` over `items` with at most `max_concurrent` items in flight.
///
/// Each item runs on the blocking pool since matching reads files synchronously.
/// Results come back in input order. A panicking item fails the whole map.
pub async fn map_bounded<T, R, F>(items: Vec<T>, max_concurrent: usize, work: F) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let max_concurrent = max_concurrent.max(1);
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let work = Arc::new(work);

    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .context("Worker pool semaphore closed")?;
        let work = work.clone();

        let handle = tokio::task::spawn_blocking(move || {
            let result = work(item);
            drop(permit);
            result
        });

        handles.push(handle);
    }

    // Collect all results, preserving input order
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("Scan worker panicked")?);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Runtime::new().unwrap()
    }

    #[test]
    fn test_results_keep_input_order() {
        let items: Vec<u64> = (0..20).collect();

        let results = runtime()
            .block_on(map_bounded(items, 4, |n| {
                // Later items finish first
                std::thread::sleep(Duration::from_millis(20 - n));
                n * 10
            }))
            .unwrap();

        assert_eq!(results, (0..20).map(|n| n * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrency_is_bounded() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let (in_flight_c, peak_c) = (in_flight.clone(), peak.clone());
        runtime()
            .block_on(map_bounded((0..16).collect::<Vec<u32>>(), 3, move |_| {
                let now = in_flight_c.fetch_add(1, Ordering::SeqCst) + 1;
                peak_c.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(10));
                in_flight_c.fetch_sub(1, Ordering::SeqCst);
            }))
            .unwrap();

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_zero_width_still_runs() {
        let results = runtime()
            .block_on(map_bounded(vec!["a", "b"], 0, |s| s.to_uppercase()))
            .unwrap();

        assert_eq!(results, vec!["A", "B"]);
    }

    #[test]
    fn test_panicking_item_fails_map() {
        let result = runtime().block_on(map_bounded(vec![1, 2, 3], 2, |n| {
            if n == 2 {
                panic!("boom");
            }
            n
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_empty_input() {
        let results: Vec<u8> = runtime()
            .block_on(map_bounded(Vec::<u8>::new(), 8, |n| n))
            .unwrap();

        assert!(results.is_empty());
    }
}
