// End to end flows through the tracker with the in memory timesheet store.
//
// Time runs on tokio's paused clock; RuntimeClock follows it so that ticks and
// elapsed time advance together.

use crate::modules::time_tracking::adapters::outbound::timesheet_store_in_memory::InMemoryTimesheetStore;
use crate::modules::time_tracking::core::events::TimesheetSaved;
use crate::modules::time_tracking::core::session::{TimedSubject, TimerStatus};
use crate::modules::time_tracking::use_cases::list_timesheet_entries::queries_port::TimesheetQueries;
use crate::modules::time_tracking::use_cases::submit_timesheet_entry::decision::DecideError;
use crate::modules::time_tracking::use_cases::track_time::handler::{
    StopOutcome, TimeTracker, TrackerSettings,
};
use crate::shared::core::clock::{Clock, EntryDateConvention};
use crate::shared::infrastructure::tick_scheduler::DEFAULT_TICK_INTERVAL;
use crate::tests::fixtures::clock::{ManualClock, RuntimeClock};
use crate::tests::fixtures::observer::RecordingObserver;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const T0: i64 = 1_700_000_000_000;

fn tracker_with<TClock: Clock + 'static>(
    clock: Arc<TClock>,
    store: Arc<InMemoryTimesheetStore>,
    observer: Arc<RecordingObserver>,
) -> TimeTracker<TClock, InMemoryTimesheetStore> {
    TimeTracker::new(
        "user-fixed-0001",
        TimedSubject::new("project-0001", None),
        clock,
        store,
        observer,
        TrackerSettings {
            tick_interval: DEFAULT_TICK_INTERVAL,
            date_convention: EntryDateConvention::Utc,
        },
    )
}

#[tokio::test(start_paused = true)]
async fn it_should_never_accrue_time_while_paused() {
    let store = Arc::new(InMemoryTimesheetStore::new());
    let observer = Arc::new(RecordingObserver::default());
    let tracker = tracker_with(
        Arc::new(RuntimeClock::starting_at(T0)),
        store.clone(),
        observer.clone(),
    );

    tracker.start();
    sleep(Duration::from_secs(1_800)).await;
    tracker.pause();
    sleep(Duration::from_secs(900)).await;
    assert_eq!(tracker.elapsed(), 1_800);
    tracker.resume();
    sleep(Duration::from_secs(1_800)).await;

    let outcome = tracker.stop().await.expect("stop failed");
    match outcome {
        StopOutcome::Saved(saved) => {
            assert!(saved.elapsed_seconds.abs_diff(3_600) <= 1);
            assert_eq!(saved.hours, 1.0);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(
        store
            .list_by_user_id("user-fixed-0001", 0, 10, true)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn it_should_keep_one_interval_and_the_elapsed_time_on_a_double_start() {
    let observer = Arc::new(RecordingObserver::default());
    let tracker = tracker_with(
        Arc::new(RuntimeClock::starting_at(T0)),
        Arc::new(InMemoryTimesheetStore::new()),
        observer.clone(),
    );

    tracker.start();
    sleep(Duration::from_millis(1_500)).await;
    tracker.start();
    sleep(Duration::from_millis(2_200)).await;

    assert_eq!(observer.ticks(), vec![1, 2, 3]);
    assert_eq!(tracker.elapsed(), 3);
}

#[tokio::test(start_paused = true)]
async fn it_should_publish_ticks_and_freeze_them_while_paused() {
    let observer = Arc::new(RecordingObserver::default());
    let tracker = tracker_with(
        Arc::new(RuntimeClock::starting_at(T0)),
        Arc::new(InMemoryTimesheetStore::new()),
        observer.clone(),
    );

    tracker.start();
    sleep(Duration::from_millis(2_500)).await;
    tracker.pause();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(observer.ticks(), vec![1, 2]);

    tracker.resume();
    sleep(Duration::from_millis(1_200)).await;
    assert_eq!(observer.ticks(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn it_should_stop_ticking_once_the_tracker_is_dropped() {
    let observer = Arc::new(RecordingObserver::default());
    {
        let tracker = tracker_with(
            Arc::new(RuntimeClock::starting_at(T0)),
            Arc::new(InMemoryTimesheetStore::new()),
            observer.clone(),
        );
        tracker.start();
        sleep(Duration::from_millis(1_500)).await;
    }
    sleep(Duration::from_secs(10)).await;
    assert_eq!(observer.ticks(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn it_should_never_report_negative_time_when_the_clock_goes_back() {
    let clock = Arc::new(ManualClock::at(T0));
    let tracker = tracker_with(
        clock.clone(),
        Arc::new(InMemoryTimesheetStore::new()),
        Arc::new(RecordingObserver::default()),
    );

    tracker.start();
    clock.advance_secs(10);
    assert_eq!(tracker.elapsed(), 10);
    clock.rewind_secs(3_600);
    assert_eq!(tracker.elapsed(), 0);
    assert_eq!(tracker.status(), TimerStatus::Running);
}

#[tokio::test(start_paused = true)]
async fn it_should_submit_nothing_on_an_immediate_stop() {
    let store = Arc::new(InMemoryTimesheetStore::new());
    let tracker = tracker_with(
        Arc::new(ManualClock::at(T0)),
        store.clone(),
        Arc::new(RecordingObserver::default()),
    );

    tracker.start();
    assert_eq!(
        tracker.stop().await,
        Ok(StopOutcome::Skipped {
            elapsed_seconds: 0,
            reason: DecideError::NothingTracked,
        })
    );
    assert_eq!(store.create_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn it_should_round_submitted_hours_to_two_decimals() {
    let clock = Arc::new(ManualClock::at(T0));
    let observer = Arc::new(RecordingObserver::default());
    let tracker = tracker_with(
        clock.clone(),
        Arc::new(InMemoryTimesheetStore::new()),
        observer.clone(),
    );

    tracker.start();
    clock.advance_secs(125);
    tracker.stop().await.expect("stop failed");

    tracker.start();
    clock.advance_secs(3_600);
    tracker.stop().await.expect("stop failed");

    assert_eq!(
        observer.saved(),
        vec![
            TimesheetSaved {
                project_id: "project-0001".into(),
                task_id: None,
                hours: 0.03,
                elapsed_seconds: 125,
            },
            TimesheetSaved {
                project_id: "project-0001".into(),
                task_id: None,
                hours: 1.0,
                elapsed_seconds: 3_600,
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn it_should_track_only_running_intervals_across_pause_and_resume() {
    let clock = Arc::new(ManualClock::at(T0));
    let observer = Arc::new(RecordingObserver::default());
    let tracker = tracker_with(
        clock.clone(),
        Arc::new(InMemoryTimesheetStore::new()),
        observer.clone(),
    );

    tracker.start();
    clock.advance_secs(10);
    tracker.pause();
    clock.advance_secs(10);
    tracker.resume();
    clock.advance_secs(10);
    let outcome = tracker.stop().await.expect("stop failed");

    assert_eq!(observer.stopped()[0].elapsed_seconds, 20);
    assert_eq!(
        outcome,
        StopOutcome::Saved(TimesheetSaved {
            project_id: "project-0001".into(),
            task_id: None,
            hours: 0.01,
            elapsed_seconds: 20,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn it_should_skip_a_session_too_short_for_hour_resolution() {
    let clock = Arc::new(ManualClock::at(T0));
    let store = Arc::new(InMemoryTimesheetStore::new());
    let tracker = tracker_with(clock.clone(), store.clone(), Arc::default());

    tracker.start();
    clock.advance_secs(17);
    let outcome = tracker.stop().await.expect("stop failed");

    assert_eq!(
        outcome,
        StopOutcome::Skipped {
            elapsed_seconds: 17,
            reason: DecideError::BelowHourResolution {
                elapsed_seconds: 17
            },
        }
    );
    assert_eq!(store.create_calls(), 0);
}
