//! End-to-end tests for a countdown session on a real runtime
//!
//! Ticks are shortened so a full countdown takes a few tens of milliseconds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use super::{CountdownSession, EngineConfig, SessionSignals};
use crate::alert::AlertPlayer;
use crate::alert::testing::ScriptedPlayer;
use crate::exit::{ExitReason, PollBackoff};
use crate::render::{Clock, Readout};

fn fast_config() -> EngineConfig {
    EngineConfig {
        tick: Duration::from_millis(10),
        frame: Duration::from_millis(1),
        poll: PollBackoff {
            first: Duration::from_millis(1),
            max: Duration::from_millis(5),
            factor: 2.0,
        },
        show_alert_text: true,
    }
}

#[derive(Clone, Default)]
struct SharedReadout {
    frames: Arc<Mutex<Vec<String>>>,
    finished: Arc<AtomicBool>,
}

impl SharedReadout {
    fn frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }
}

impl Readout for SharedReadout {
    fn draw_time(&mut self, clock: Clock) {
        self.frames.lock().unwrap().push(clock.to_string());
    }

    fn draw_alert(&mut self) {
        self.frames.lock().unwrap().push("ALERT".to_string());
    }

    fn finish(&mut self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}

async fn wait_fired(signal: &crate::signal::Signal) {
    tokio::time::timeout(Duration::from_secs(5), signal.wait())
        .await
        .unwrap_or_else(|_| panic!("{} never fired", signal.name()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn countdown_plays_alert_then_exits() {
    let player = Arc::new(ScriptedPlayer::new());
    let session = CountdownSession::new(3, player.clone(), fast_config());
    let signals = session.signals().clone();
    let readout = SharedReadout::default();

    let run = tokio::spawn(session.run(readout.clone()));

    wait_fired(&signals.alert_started).await;
    assert!(signals.completion.is_fired());
    assert!(!run.is_finished());

    tokio::time::sleep(Duration::from_millis(20)).await;
    player.finish();

    let reason = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("session should end")
        .unwrap()
        .unwrap();
    assert_eq!(reason, ExitReason::AlertFinished);
    assert_eq!(player.calls(), vec!["rewind", "play"]);
    assert!(signals.shutdown.is_fired());
    assert!(readout.finished.load(Ordering::SeqCst));

    let frames = readout.frames();
    assert_eq!(frames.first().map(String::as_str), Some("00:00:03"));
    assert!(frames.iter().any(|f| f == "ALERT"));

    // Displayed time never goes back up
    let times: Vec<&String> = frames.iter().filter(|f| *f != "ALERT").collect();
    assert!(times.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_duration_alerts_immediately() {
    let player = Arc::new(ScriptedPlayer::new());
    let session = CountdownSession::new(0, player.clone(), fast_config());
    let signals = session.signals().clone();

    let run = tokio::spawn(session.run(SharedReadout::default()));
    wait_fired(&signals.alert_started).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    player.finish();

    let reason = run.await.unwrap().unwrap();
    assert_eq!(reason, ExitReason::AlertFinished);
    assert_eq!(player.plays(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_skips_alert() {
    let player = Arc::new(ScriptedPlayer::new());
    let session = CountdownSession::new(600, player.clone(), fast_config());
    let signals = session.signals().clone();
    let readout = SharedReadout::default();

    let run = tokio::spawn(session.run(readout.clone()));
    tokio::time::sleep(Duration::from_millis(30)).await;
    signals.abort.fire();

    let reason = tokio::time::timeout(Duration::from_secs(5), run)
        .await
        .expect("aborted session should end")
        .unwrap()
        .unwrap();
    assert_eq!(reason, ExitReason::Aborted);
    assert!(!signals.completion.is_fired());
    assert!(!signals.alert_started.is_fired());
    assert_eq!(player.plays(), 0);
    assert!(readout.finished.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_at_zero_never_completes() {
    for duration in [0u64, 1] {
        for _ in 0..10 {
            let player = Arc::new(ScriptedPlayer::new());
            let session = CountdownSession::new(duration, player.clone(), fast_config());
            let signals = session.signals().clone();
            signals.abort.fire();

            let reason = tokio::time::timeout(
                Duration::from_secs(5),
                session.run(SharedReadout::default()),
            )
            .await
            .expect("aborted session should end")
            .unwrap();

            assert_eq!(reason, ExitReason::Aborted);
            assert!(!signals.completion.is_fired(), "duration {duration}");
            assert!(!signals.alert_started.is_fired(), "duration {duration}");
            assert_eq!(player.plays(), 0);
        }
    }
}

/// Records the signal state at the moment the alert is started
#[derive(Default)]
struct OrderProbe {
    signals: OnceLock<SessionSignals>,
    playing: AtomicBool,
    completion_before_play: AtomicBool,
    alert_started_before_play: AtomicBool,
}

impl AlertPlayer for OrderProbe {
    fn rewind(&self) {}

    fn play(&self) {
        if let Some(signals) = self.signals.get() {
            self.completion_before_play
                .store(signals.completion.is_fired(), Ordering::SeqCst);
            self.alert_started_before_play
                .store(signals.alert_started.is_fired(), Ordering::SeqCst);
        }
        self.playing.store(true, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completion_precedes_alert_start() {
    for duration in [0u64, 1, 4] {
        let probe = Arc::new(OrderProbe::default());
        let session = CountdownSession::new(duration, probe.clone(), fast_config());
        let signals = session.signals().clone();
        assert!(probe.signals.set(signals.clone()).is_ok());

        let run = tokio::spawn(session.run(SharedReadout::default()));
        wait_fired(&signals.alert_started).await;
        // Let the exit watcher observe playback before it ends
        tokio::time::sleep(Duration::from_millis(20)).await;
        probe.playing.store(false, Ordering::SeqCst);

        assert_eq!(run.await.unwrap().unwrap(), ExitReason::AlertFinished);
        assert!(probe.completion_before_play.load(Ordering::SeqCst));
        assert!(!probe.alert_started_before_play.load(Ordering::SeqCst));
    }
}

#[test]
fn engine_config_from_display_settings() {
    let display = ding_types::DisplaySettings {
        frame_interval_ms: 0,
        show_alert_text: false,
    };
    let config = EngineConfig::from_display(&display);
    assert_eq!(config.frame, Duration::from_millis(1));
    assert_eq!(config.tick, Duration::from_secs(1));
    assert!(!config.show_alert_text);
}
