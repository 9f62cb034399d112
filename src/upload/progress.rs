//! Synthetic upload progress
//!
//! The transport gives no byte-level progress for a single multipart POST,
//! so the percentage shown during an upload is a timed animation: +10
//! points every 300 ms, stalling at 90 until the request settles. The
//! ticker is an owned task; dropping it settles and aborts the task, so
//! no callback outlives the request on any exit path.

use crate::upload::types::ProgressFn;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Cadence of the synthetic animation
pub const PROGRESS_TICK: Duration = Duration::from_millis(300);

/// Percentage points added per tick
pub const PROGRESS_STEP: u8 = 10;

/// The animation never passes this on its own; only settlement does
pub const PROGRESS_STALL_AT: u8 = 90;

struct TickerState {
    percent: u8,
    settled: bool,
}

/// State shared between the ticker task and its owner
///
/// Every emission happens under the lock with the settled flag checked,
/// so a tick that has already fired cannot deliver a stale percentage
/// once settlement has claimed the lock. Abort alone is not enough for
/// that: it only lands at the task's next await point.
struct TickerShared {
    state: Mutex<TickerState>,
    callback: Option<ProgressFn>,
}

impl TickerShared {
    fn advance(&self) {
        let mut state = self.state.lock().unwrap();
        if state.settled || state.percent >= PROGRESS_STALL_AT {
            return;
        }
        state.percent = (state.percent + PROGRESS_STEP).min(PROGRESS_STALL_AT);
        if let Some(cb) = &self.callback {
            cb(state.percent);
        }
    }
}

/// An owned, cancellable progress animation for one in-flight upload
pub struct ProgressTicker {
    handle: JoinHandle<()>,
    shared: Arc<TickerShared>,
}

impl ProgressTicker {
    /// Start the animation at 0 with the standard cadence
    pub fn start(callback: Option<ProgressFn>) -> Self {
        Self::with_cadence(callback, PROGRESS_TICK)
    }

    /// Start the animation at 0, ticking at the given cadence
    pub fn with_cadence(callback: Option<ProgressFn>, tick: Duration) -> Self {
        let shared = Arc::new(TickerShared {
            state: Mutex::new(TickerState {
                percent: 0,
                settled: false,
            }),
            callback,
        });

        if let Some(cb) = &shared.callback {
            cb(0);
        }

        let task_shared = Arc::clone(&shared);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            // The first interval tick completes immediately; skip it so the
            // animation advances only after a full cadence has elapsed.
            interval.tick().await;
            loop {
                interval.tick().await;
                task_shared.advance();
            }
        });

        Self { handle, shared }
    }

    /// Last percentage the animation reached
    pub fn percent(&self) -> u8 {
        self.shared.state.lock().unwrap().percent
    }

    /// Stop the animation and emit the final 100
    ///
    /// Settles under the lock before aborting, so no tick already in
    /// flight can emit after the 100.
    pub fn finish(self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.settled = true;
            state.percent = 100;
            if let Some(cb) = &self.shared.callback {
                cb(100);
            }
        }
        self.handle.abort();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.settled = true;
        }
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_callback() -> (ProgressFn, Arc<Mutex<Vec<u8>>>) {
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressFn = Arc::new(move |pct| sink.lock().unwrap().push(pct));
        (callback, seen)
    }

    #[tokio::test]
    async fn test_ticker_starts_at_zero_and_is_monotonic() {
        let (callback, seen) = recording_callback();
        let ticker = ProgressTicker::with_cadence(Some(callback), Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(40)).await;
        drop(ticker);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], 0);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(*seen.last().unwrap() <= PROGRESS_STALL_AT);
    }

    #[tokio::test]
    async fn test_ticker_stalls_at_ninety() {
        let (callback, _seen) = recording_callback();
        let ticker = ProgressTicker::with_cadence(Some(callback), Duration::from_millis(1));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(ticker.percent(), PROGRESS_STALL_AT);
    }

    #[tokio::test]
    async fn test_finish_emits_exactly_one_hundred() {
        let (callback, seen) = recording_callback();
        let ticker = ProgressTicker::with_cadence(Some(callback), Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(20)).await;
        ticker.finish();

        // Give an orphaned task time to fire if cancellation were broken
        tokio::time::sleep(Duration::from_millis(30)).await;

        let seen = seen.lock().unwrap();
        assert_eq!(*seen.last().unwrap(), 100);
        assert_eq!(seen.iter().filter(|&&p| p == 100).count(), 1);
    }

    #[tokio::test]
    async fn test_drop_cancels_the_animation() {
        let (callback, seen) = recording_callback();
        let ticker = ProgressTicker::with_cadence(Some(callback), Duration::from_millis(5));

        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(ticker);
        let settled_len = seen.lock().unwrap().len();

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(seen.lock().unwrap().len(), settled_len);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_slow_callback_cannot_emit_after_finish() {
        // A tick that has already passed its await point runs its callback
        // to completion; settlement must still order after it, never
        // between its store and its emit.
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressFn = Arc::new(move |pct| {
            if pct != 0 && pct != 100 {
                std::thread::sleep(Duration::from_millis(80));
            }
            sink.lock().unwrap().push(pct);
        });

        let ticker = ProgressTicker::with_cadence(Some(callback), Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(20)).await;
        ticker.finish();

        // Room for any straggler to fire if settlement were not the gate
        tokio::time::sleep(Duration::from_millis(200)).await;

        let seen = seen.lock().unwrap();
        assert!(
            seen.windows(2).all(|w| w[0] <= w[1]),
            "emissions went backwards: {:?}",
            *seen
        );
        assert_eq!(*seen.last().unwrap(), 100);
    }
}
