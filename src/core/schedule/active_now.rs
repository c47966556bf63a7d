// Periodic recomputation of the classes in progress for a mounted grid view.
//
// Responsibilities
// - Recompute `active_cells` from an injected clock on a fixed period.
// - Publish changes through a watch channel the view can subscribe to.
// - Stop explicitly with `stop`, or when dropped, so no timer outlives its view.
//
// Notes
// - Must be started from within a tokio runtime.

use crate::core::schedule::grid::GridMatrix;
use crate::core::schedule::grid_view::{CellRef, active_cells};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct ActiveNowTicker {
    handle: Option<JoinHandle<()>>,
    active: watch::Receiver<BTreeSet<CellRef>>,
}

impl ActiveNowTicker {
    pub fn start<TClock>(matrix: Arc<GridMatrix>, period: Duration, clock: TClock) -> Self
    where
        TClock: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        let (sender, active) = watch::channel(active_cells(&matrix, clock()));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick completes immediately and the initial value is already published
            interval.tick().await;
            loop {
                interval.tick().await;
                let now_active = active_cells(&matrix, clock());
                sender.send_if_modified(|current| {
                    if *current == now_active {
                        return false;
                    }
                    *current = now_active;
                    true
                });
            }
        });
        Self {
            handle: Some(handle),
            active,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BTreeSet<CellRef>> {
        self.active.clone()
    }

    pub fn current(&self) -> BTreeSet<CellRef> {
        self.active.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for ActiveNowTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod active_now_ticker_tests {
    use super::*;
    use crate::core::schedule::assignment::DayOfWeek;
    use crate::core::schedule::config::ShiftWindow;
    use crate::core::schedule::grid::build_grid;
    use crate::core::schedule::quantizer::TimeBucket;
    use crate::test_support::fixtures::assignments::{AssignmentBuilder, clock};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[fixture]
    fn matrix() -> Arc<GridMatrix> {
        let class = AssignmentBuilder::new().id("a-1").build();
        let shift = ShiftWindow::new(clock(7, 0), clock(9, 0)).unwrap();
        Arc::new(build_grid(&[class], &shift, 45, &DayOfWeek::ALL))
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_publish_the_initial_active_set(matrix: Arc<GridMatrix>) {
        let ticker = ActiveNowTicker::start(matrix, Duration::from_secs(60), || monday_at(7, 10));
        let expected = CellRef::new(DayOfWeek::Monday, TimeBucket::from_minutes(7 * 60));
        assert_eq!(ticker.current(), BTreeSet::from([expected]));
        assert!(ticker.is_running());
        ticker.stop().await;
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_publish_when_the_class_ends(matrix: Arc<GridMatrix>) {
        let now = Arc::new(Mutex::new(monday_at(8, 0)));
        let clock_now = now.clone();
        let ticker = ActiveNowTicker::start(matrix, Duration::from_millis(5), move || {
            *clock_now.lock().unwrap()
        });
        let mut receiver = ticker.subscribe();
        assert_eq!(receiver.borrow().len(), 1);

        *now.lock().unwrap() = monday_at(8, 45);
        tokio::time::timeout(Duration::from_secs(5), receiver.changed())
            .await
            .expect("ticker did not publish in time")
            .expect("ticker stopped unexpectedly");
        assert!(receiver.borrow().is_empty());
        ticker.stop().await;
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_close_the_channel_once_stopped(matrix: Arc<GridMatrix>) {
        let ticker = ActiveNowTicker::start(matrix, Duration::from_millis(5), || monday_at(10, 0));
        let mut receiver = ticker.subscribe();
        ticker.stop().await;
        assert!(receiver.changed().await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_abort_the_timer_when_dropped(matrix: Arc<GridMatrix>) {
        let ticker = ActiveNowTicker::start(matrix, Duration::from_millis(5), || monday_at(10, 0));
        let mut receiver = ticker.subscribe();
        drop(ticker);
        let closed = tokio::time::timeout(Duration::from_secs(5), receiver.changed()).await;
        assert!(matches!(closed, Ok(Err(_))));
    }
}
