use std::time::Duration;

use quill_primitives::{MetaValue, Transaction};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, timeout};

use super::*;
use crate::{IDLE_INPUT_SEQ, IDLE_TRIGGER};

fn options() -> PlaceholderOptions {
	PlaceholderOptions::default()
}

fn snapshot(last_input: Instant) -> IdleSnapshot {
	IdleSnapshot {
		last_input,
		input_seq: 0,
		is_idle: false,
	}
}

#[test]
fn detector_threshold_is_strict() {
	let start = Instant::from_std(std::time::Instant::now());
	let mut detector = IdleDetector::new(Duration::from_millis(1500));

	assert!(!detector.poll(snapshot(start), start + Duration::from_millis(1500)));
	assert!(detector.poll(snapshot(start), start + Duration::from_millis(1501)));
}

#[test]
fn detector_fires_once_per_pause() {
	let start = Instant::from_std(std::time::Instant::now());
	let mut detector = IdleDetector::new(Duration::from_millis(1500));

	assert!(detector.poll(snapshot(start), start + Duration::from_secs(2)));
	assert!(!detector.poll(snapshot(start), start + Duration::from_secs(3)));
	assert!(!detector.poll(snapshot(start), start + Duration::from_secs(60)));

	let typed = start + Duration::from_secs(61);
	assert!(!detector.poll(snapshot(typed), typed + Duration::from_secs(1)));
	assert!(detector.poll(snapshot(typed), typed + Duration::from_secs(2)));
}

#[test]
fn detector_skips_idle_views() {
	let start = Instant::from_std(std::time::Instant::now());
	let mut detector = IdleDetector::new(Duration::from_millis(1500));
	let idle = IdleSnapshot {
		last_input: start,
		input_seq: 0,
		is_idle: true,
	};
	assert!(!detector.poll(idle, start + Duration::from_secs(5)));
	assert!(detector.poll(snapshot(start), start + Duration::from_secs(5)));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_submits_one_trigger_per_pause() {
	let start = Instant::now();
	let (_snapshot_tx, snapshot_rx) = watch::channel(snapshot(start));
	let (tx, mut rx) = mpsc::unbounded_channel::<Transaction>();
	let _scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();

	let trigger = rx.recv().await.unwrap();
	assert!(trigger.meta().flag(IDLE_TRIGGER));
	assert_eq!(trigger.meta().get(IDLE_INPUT_SEQ), Some(&MetaValue::Int(0)));
	assert!(!trigger.doc_changed());
	// Ticks at 1s (not yet past 1.5s) and 2s.
	assert_eq!(Instant::now() - start, Duration::from_secs(2));

	assert!(timeout(Duration::from_secs(10), rx.recv()).await.is_err());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_fires_again_after_new_input() {
	let start = Instant::now();
	let (snapshot_tx, snapshot_rx) = watch::channel(snapshot(start));
	let (tx, mut rx) = mpsc::unbounded_channel::<Transaction>();
	let _scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();

	rx.recv().await.unwrap();
	let typed = Instant::now();
	snapshot_tx
		.send(IdleSnapshot {
			last_input: typed,
			input_seq: 1,
			is_idle: false,
		})
		.unwrap();

	let trigger = rx.recv().await.unwrap();
	assert_eq!(Instant::now() - typed, Duration::from_secs(2));
	assert_eq!(trigger.meta().get(IDLE_INPUT_SEQ), Some(&MetaValue::Int(1)));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn scheduler_stays_quiet_while_view_is_idle() {
	let start = Instant::now();
	let idle = IdleSnapshot {
		last_input: start,
		input_seq: 0,
		is_idle: true,
	};
	let (_snapshot_tx, snapshot_rx) = watch::channel(idle);
	let (tx, mut rx) = mpsc::unbounded_channel::<Transaction>();
	let _scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();

	assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn stop_ends_the_task() {
	let (_snapshot_tx, snapshot_rx) = watch::channel(snapshot(Instant::now()));
	let (tx, mut rx) = mpsc::unbounded_channel::<Transaction>();
	let scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();
	assert!(scheduler.is_running());

	assert_eq!(scheduler.stop().await, TaskExit::Finished);
	assert!(rx.recv().await.is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn dropping_the_handle_releases_the_sink() {
	let (_snapshot_tx, snapshot_rx) = watch::channel(snapshot(Instant::now()));
	let (tx, mut rx) = mpsc::unbounded_channel::<Transaction>();
	let scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();
	drop(scheduler);

	assert!(rx.recv().await.is_none());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn closed_sink_stops_the_scheduler() {
	let (_snapshot_tx, snapshot_rx) = watch::channel(snapshot(Instant::now()));
	let (tx, rx) = mpsc::unbounded_channel::<Transaction>();
	let scheduler = IdleScheduler::start(&options(), snapshot_rx, tx).unwrap();
	drop(rx);

	tokio::time::sleep(Duration::from_secs(3)).await;
	tokio::task::yield_now().await;
	assert!(!scheduler.is_running());
}

#[test]
fn start_outside_runtime_fails() {
	let now = Instant::from_std(std::time::Instant::now());
	let (_snapshot_tx, snapshot_rx) = watch::channel(snapshot(now));
	let (tx, _rx) = mpsc::unbounded_channel::<Transaction>();
	assert!(IdleScheduler::start(&options(), snapshot_rx, tx).is_err());
}
