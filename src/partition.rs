//! Row-count partitioning across workers.

/// Per-worker share plus the remainder the orchestrator inserts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub per_worker: u64,
    pub remainder: u64,
}

/// Split `total_rows` evenly across `worker_count` workers.
///
/// Guarantees `per_worker * worker_count + remainder == total_rows` exactly.
/// A zero `worker_count` is a caller bug and panics.
pub fn partition(total_rows: u64, worker_count: u64) -> Partition {
    assert!(worker_count >= 1, "worker_count must be >= 1");
    Partition {
        per_worker: total_rows / worker_count,
        remainder: total_rows % worker_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_accounting_holds_for_all_inputs() {
        for total in 0..200u64 {
            for workers in 1..16u64 {
                let p = partition(total, workers);
                assert_eq!(p.per_worker * workers + p.remainder, total);
                assert!(p.remainder < workers);
            }
        }
    }

    #[test]
    fn test_seven_rows_three_workers() {
        let p = partition(7, 3);
        assert_eq!(p.per_worker, 2);
        assert_eq!(p.remainder, 1);
    }

    #[test]
    fn test_even_split_has_no_remainder() {
        let p = partition(20000, 10);
        assert_eq!(p.per_worker, 2000);
        assert_eq!(p.remainder, 0);
    }

    #[test]
    #[should_panic(expected = "worker_count must be >= 1")]
    fn test_zero_workers_panics() {
        partition(10, 0);
    }
}
