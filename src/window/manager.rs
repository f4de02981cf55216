use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::buffer::NumberWindow;

/// Per-request result of an ingestion: the window state bracketing the
/// mutation, the raw batch as received, and the post-mutation average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    pub window_prev_state: Vec<i64>,
    pub window_curr_state: Vec<i64>,
    pub numbers: Vec<i64>,
    pub avg: f64,
}

/// Exclusive owner of the shared number window.
///
/// All mutation goes through [`ingest`](WindowManager::ingest), which runs as
/// a single atomic unit under the internal lock: concurrent ingests never
/// interleave their read-modify-write sequences, so each outcome's prev/curr
/// pair brackets exactly one ingestion. The lock is only ever held across
/// the in-memory update, never across I/O.
#[derive(Debug)]
pub struct WindowManager {
    window: Mutex<NumberWindow>,
}

impl WindowManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: Mutex::new(NumberWindow::new(capacity)),
        }
    }

    /// Merge a batch of numbers into the window and report the transition.
    ///
    /// Batch order is preserved: duplicates (against the window or earlier
    /// batch entries) are skipped, and each genuinely new value evicts the
    /// oldest element if the window is full. Never fails, including on an
    /// empty batch.
    pub fn ingest(&self, batch: &[i64]) -> IngestOutcome {
        let mut window = self.window.lock().unwrap();
        let window_prev_state = window.snapshot();
        let mut inserted = 0usize;
        for &value in batch {
            if window.insert(value) {
                inserted += 1;
            }
        }
        let window_curr_state = window.snapshot();
        let avg = window.average();
        drop(window);

        debug!(
            batch_len = batch.len(),
            inserted,
            window_len = window_curr_state.len(),
            avg,
            "ingested batch"
        );

        IngestOutcome {
            window_prev_state,
            window_curr_state,
            numbers: batch.to_vec(),
            avg,
        }
    }

    /// Read-only outcome used when the upstream fetch failed: both states
    /// equal the current window, the batch is empty, and the average is
    /// computed from the unmutated window.
    pub fn fallback_outcome(&self) -> IngestOutcome {
        let window = self.window.lock().unwrap();
        let state = window.snapshot();
        let avg = window.average();
        IngestOutcome {
            window_prev_state: state.clone(),
            window_curr_state: state,
            numbers: Vec::new(),
            avg,
        }
    }

    /// Current average without mutating anything.
    pub fn average(&self) -> f64 {
        self.window.lock().unwrap().average()
    }

    pub fn len(&self) -> usize {
        self.window.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_deduplicates_within_batch() {
        let manager = WindowManager::new(10);
        let outcome = manager.ingest(&[2, 3, 3, 5]);
        assert_eq!(outcome.window_prev_state, Vec::<i64>::new());
        assert_eq!(outcome.window_curr_state, vec![2, 3, 5]);
        assert_eq!(outcome.numbers, vec![2, 3, 3, 5]);
        assert_eq!(outcome.avg, 3.33);
    }

    #[test]
    fn ingest_reports_previous_state() {
        let manager = WindowManager::new(10);
        manager.ingest(&[2, 3, 3, 5]);
        let outcome = manager.ingest(&[5, 7]);
        assert_eq!(outcome.window_prev_state, vec![2, 3, 5]);
        assert_eq!(outcome.window_curr_state, vec![2, 3, 5, 7]);
        assert_eq!(outcome.numbers, vec![5, 7]);
        assert_eq!(outcome.avg, 4.25);
    }

    #[test]
    fn ingest_of_known_values_is_noop() {
        let manager = WindowManager::new(10);
        manager.ingest(&[1, 2, 3]);
        let before = manager.average();
        let outcome = manager.ingest(&[3, 2, 1]);
        assert_eq!(outcome.window_prev_state, outcome.window_curr_state);
        assert_eq!(outcome.avg, before);
    }

    #[test]
    fn ingest_empty_batch_is_noop() {
        let manager = WindowManager::new(10);
        manager.ingest(&[4, 8]);
        let outcome = manager.ingest(&[]);
        assert_eq!(outcome.window_prev_state, vec![4, 8]);
        assert_eq!(outcome.window_curr_state, vec![4, 8]);
        assert!(outcome.numbers.is_empty());
        assert_eq!(outcome.avg, 6.0);
    }

    #[test]
    fn full_window_evicts_fifo() {
        let manager = WindowManager::new(10);
        let initial: Vec<i64> = (0..10).collect();
        manager.ingest(&initial);
        let outcome = manager.ingest(&[42]);
        let expected: Vec<i64> = (1..10).chain([42]).collect();
        assert_eq!(outcome.window_curr_state, expected);
    }

    #[test]
    fn fallback_outcome_reflects_current_window() {
        let manager = WindowManager::new(10);
        manager.ingest(&[10, 20]);
        let outcome = manager.fallback_outcome();
        assert_eq!(outcome.window_prev_state, vec![10, 20]);
        assert_eq!(outcome.window_curr_state, vec![10, 20]);
        assert!(outcome.numbers.is_empty());
        assert_eq!(outcome.avg, 15.0);
    }

    #[test]
    fn fallback_outcome_on_empty_window() {
        let manager = WindowManager::new(10);
        let outcome = manager.fallback_outcome();
        assert!(outcome.window_curr_state.is_empty());
        assert_eq!(outcome.avg, 0.0);
    }

    #[test]
    fn outcome_serializes_with_js_field_names() {
        let manager = WindowManager::new(10);
        let outcome = manager.ingest(&[2, 4]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["windowPrevState"], serde_json::json!([]));
        assert_eq!(json["windowCurrState"], serde_json::json!([2, 4]));
        assert_eq!(json["numbers"], serde_json::json!([2, 4]));
        assert_eq!(json["avg"], serde_json::json!(3.0));
    }
}
