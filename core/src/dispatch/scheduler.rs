use std::future::Future;

use futures::future::join_all;

/// Admit task futures in batched groups.
///
/// Futures accumulate in admission order; once a full group of
/// `concurrency` is queued, the whole group is launched together and every
/// member must finish before the next group is admitted. The tail shorter
/// than a group is launched and awaited the same way.
///
/// This is deliberately a barrier, not a sliding window: effective
/// parallelism never exceeds `concurrency`, and one slow task holds back
/// the following group.
pub async fn run_in_groups<I, F>(futures: I, concurrency: usize)
where
    I: IntoIterator<Item = F>,
    F: Future<Output = ()>,
{
    let concurrency = concurrency.max(1);
    let mut pending = Vec::with_capacity(concurrency);

    for fut in futures {
        pending.push(fut);
        if pending.len() >= concurrency {
            join_all(pending.drain(..)).await;
        }
    }

    if !pending.is_empty() {
        join_all(pending.drain(..)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct Probe {
        in_flight: AtomicUsize,
        high_water: AtomicUsize,
        completed: AtomicUsize,
        completed_at_start: Mutex<Vec<(usize, usize)>>,
    }

    impl Probe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                in_flight: AtomicUsize::new(0),
                high_water: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                completed_at_start: Mutex::new(Vec::new()),
            })
        }

        fn enter(&self, index: usize) {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.high_water.fetch_max(now, Ordering::SeqCst);
            self.completed_at_start
                .lock()
                .unwrap()
                .push((index, self.completed.load(Ordering::SeqCst)));
        }

        fn exit(&self) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn probe_task(probe: Arc<Probe>, index: usize, hold: Duration) {
        probe.enter(index);
        tokio::time::sleep(hold).await;
        probe.exit();
    }

    #[tokio::test]
    async fn test_parallelism_never_exceeds_limit() {
        let probe = Probe::new();
        let futures: Vec<_> = (0..7)
            .map(|i| probe_task(Arc::clone(&probe), i, Duration::from_millis(10)))
            .collect();

        run_in_groups(futures, 3).await;

        assert_eq!(probe.completed.load(Ordering::SeqCst), 7);
        assert!(probe.high_water.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_group_barrier_holds_next_group() {
        let probe = Probe::new();
        // Task 0 is slow; with a barrier, tasks 2 and 3 still cannot start
        // until both members of the first group are done.
        let futures: Vec<_> = (0..4)
            .map(|i| {
                let hold = if i == 0 {
                    Duration::from_millis(80)
                } else {
                    Duration::from_millis(5)
                };
                probe_task(Arc::clone(&probe), i, hold)
            })
            .collect();

        run_in_groups(futures, 2).await;

        let starts = probe.completed_at_start.lock().unwrap().clone();
        for (index, completed_before) in starts {
            // Every member of group k starts only after all k*2 earlier
            // tasks have completed.
            let group = index / 2;
            assert!(
                completed_before >= group * 2,
                "task {index} started after only {completed_before} completions"
            );
        }
    }

    #[tokio::test]
    async fn test_remainder_group_runs() {
        let probe = Probe::new();
        let futures: Vec<_> = (0..5)
            .map(|i| probe_task(Arc::clone(&probe), i, Duration::from_millis(1)))
            .collect();

        run_in_groups(futures, 2).await;

        assert_eq!(probe.completed.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_zero_concurrency_clamped_to_one() {
        let probe = Probe::new();
        let futures: Vec<_> = (0..3)
            .map(|i| probe_task(Arc::clone(&probe), i, Duration::from_millis(1)))
            .collect();

        run_in_groups(futures, 0).await;

        assert_eq!(probe.completed.load(Ordering::SeqCst), 3);
        assert_eq!(probe.high_water.load(Ordering::SeqCst), 1);
    }
}
