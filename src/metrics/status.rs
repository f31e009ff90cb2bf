//! @ai:module:intent Live counters shared by concurrently running evaluations
//! @ai:module:layer application
//! @ai:module:public_api RunStatus, StatusSnapshot
//! @ai:module:stateless false

use crate::metrics::types::Outcome;
use std::sync::atomic::{AtomicUsize, Ordering};

/// @ai:intent Counters for one model run, updated lock-free by workers
#[derive(Debug, Default)]
pub struct RunStatus {
    new: AtomicUsize,
    cached: AtomicUsize,
    correct: AtomicUsize,
    failed: AtomicUsize,
}

/// @ai:intent Point-in-time copy of the run counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub new: usize,
    pub cached: usize,
    pub correct: usize,
    pub failed: usize,
}

impl RunStatus {
    /// @ai:intent Fresh counters with cache hits already known
    /// @ai:effects pure
    pub fn with_cached(cached: usize) -> Self {
        let status = Self::default();
        status.cached.store(cached, Ordering::Relaxed);
        status
    }

    /// @ai:intent Count a newly produced outcome
    /// @ai:post a snapshot never shows more correct answers than new ones
    /// @ai:effects state:write
    pub fn record_outcome(&self, outcome: &Outcome) {
        self.new.fetch_add(1, Ordering::Release);
        if outcome.is_correct {
            self.correct.fetch_add(1, Ordering::Release);
        }
    }

    /// @ai:effects state:write
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// @ai:intent Read all counters without blocking writers
    /// @ai:effects state:read
    pub fn snapshot(&self) -> StatusSnapshot {
        // correct before new: every counted correct answer is already in new
        let correct = self.correct.load(Ordering::Acquire);
        let new = self.new.load(Ordering::Acquire);

        StatusSnapshot {
            new,
            cached: self.cached.load(Ordering::Relaxed),
            correct,
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl StatusSnapshot {
    /// @ai:intent Questions accounted for so far, new plus cached
    /// @ai:effects pure
    pub fn processed(&self) -> usize {
        self.new + self.cached
    }

    /// @ai:intent Accuracy over new answers only
    /// @ai:effects pure
    pub fn new_accuracy(&self) -> f64 {
        if self.new == 0 {
            0.0
        } else {
            self.correct as f64 / self.new as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Answer;
    use std::sync::Arc;

    #[test]
    fn test_snapshot_counts() {
        let status = RunStatus::with_cached(3);
        status.record_outcome(&Outcome::new(Answer::A, Answer::A));
        status.record_outcome(&Outcome::new(Answer::B, Answer::A));
        status.record_failure();

        let snapshot = status.snapshot();
        assert_eq!(
            snapshot,
            StatusSnapshot {
                new: 2,
                cached: 3,
                correct: 1,
                failed: 1,
            }
        );
        assert_eq!(snapshot.processed(), 5);
        assert!((snapshot.new_accuracy() - 50.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let status = Arc::new(RunStatus::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let status = status.clone();
                tokio::spawn(async move {
                    for _ in 0..100 {
                        status.record_outcome(&Outcome::new(Answer::C, Answer::C));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = status.snapshot();
        assert_eq!(snapshot.new, 800);
        assert_eq!(snapshot.correct, 800);
    }

    #[test]
    fn test_snapshot_never_shows_more_correct_than_new() {
        let status = Arc::new(RunStatus::default());

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let status = status.clone();
                std::thread::spawn(move || {
                    for _ in 0..10_000 {
                        status.record_outcome(&Outcome::new(Answer::D, Answer::D));
                    }
                })
            })
            .collect();

        while writers.iter().any(|w| !w.is_finished()) {
            let snapshot = status.snapshot();
            assert!(
                snapshot.correct <= snapshot.new,
                "correct {} > new {}",
                snapshot.correct,
                snapshot.new
            );
            assert!(snapshot.new_accuracy() <= 100.0);
        }

        for writer in writers {
            writer.join().unwrap();
        }
        assert_eq!(status.snapshot().correct, 40_000);
    }
}
