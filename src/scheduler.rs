//! Recurring timer driving Autowar passes
//!
//! The engine and the host state sit behind async mutexes, so a timer fire
//! and a manual `run_pass` can never overlap. The news feed is posted from a
//! spawned task once the pass has finished and its turn history is saved.

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::activity::store::{ConnectionStore, PlayerHistoryStore};
use crate::core::config::{validate_interval, AutowarConfig};
use crate::core::error::Result;
use crate::engine::{Autowar, PassSummary, RngDice, TurnContext};
use crate::galaxy::control::{ControlListener, LoggingListener};
use crate::galaxy::map::StarMap;
use crate::news::NewsFeed;
use crate::notify::WebhookNotifier;

/// Host-owned state lent to the engine once per pass
pub struct HostState {
    pub map: StarMap,
    pub connections: ConnectionStore,
    pub histories: PlayerHistoryStore,
    pub news: NewsFeed,
    pub listener: Box<dyn ControlListener + Send>,
}

impl HostState {
    /// Fresh stores around `map`, logging control changes
    pub fn new(map: StarMap) -> Self {
        Self {
            map,
            connections: ConnectionStore::new(),
            histories: PlayerHistoryStore::new(),
            news: NewsFeed::new(),
            listener: Box::new(LoggingListener),
        }
    }

    pub fn with_listener(mut self, listener: impl ControlListener + Send + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimerSettings {
    interval_seconds: u64,
    enabled: bool,
    shutdown: bool,
}

/// Timestamps of the most recent and the upcoming fire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickTimes {
    pub last_tick: Option<DateTime<Utc>>,
    pub next_tick: Option<DateTime<Utc>>,
}

/// Result of one pass as seen by the scheduler
pub struct PassReport {
    pub summary: PassSummary,
    /// Webhook delivery, still running when the pass returns
    pub delivery: Option<JoinHandle<()>>,
}

pub struct Scheduler {
    engine: Arc<Mutex<Autowar>>,
    host: Arc<Mutex<HostState>>,
    notifier: Option<Arc<WebhookNotifier>>,
    turns_path: PathBuf,
    upper_fortify_border: i32,
    seed: Option<u64>,
    settings: watch::Sender<TimerSettings>,
    ticks: std::sync::Mutex<TickTimes>,
}

impl Scheduler {
    /// An invalid `tick_seconds` is logged and replaced by the default interval
    pub fn new(engine: Autowar, host: HostState, config: &AutowarConfig) -> Self {
        let interval_seconds = match validate_interval(config.tick_seconds) {
            Ok(()) => config.tick_seconds,
            Err(e) => {
                let fallback = AutowarConfig::default().tick_seconds;
                tracing::error!("Invalid autowar tick: {}; using {} seconds", e, fallback);
                fallback
            }
        };

        let (settings, _) = watch::channel(TimerSettings {
            interval_seconds,
            enabled: config.enabled,
            shutdown: false,
        });

        Self {
            engine: Arc::new(Mutex::new(engine)),
            host: Arc::new(Mutex::new(host)),
            notifier: WebhookNotifier::from_config(config).map(Arc::new),
            turns_path: config.turns_path(),
            upper_fortify_border: config.upper_fortify_border,
            seed: config.seed,
            settings,
            ticks: std::sync::Mutex::new(TickTimes::default()),
        }
    }

    pub fn engine(&self) -> Arc<Mutex<Autowar>> {
        Arc::clone(&self.engine)
    }

    pub fn host(&self) -> Arc<Mutex<HostState>> {
        Arc::clone(&self.host)
    }

    pub fn interval_seconds(&self) -> u64 {
        self.settings.borrow().interval_seconds
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.borrow().enabled
    }

    pub fn tick_times(&self) -> TickTimes {
        *self.ticks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change the tick interval. An invalid value is logged and rejected,
    /// leaving the previous interval in place.
    pub fn set_interval(&self, seconds: u64) -> Result<()> {
        if let Err(e) = validate_interval(seconds) {
            tracing::error!("Rejected autowar tick: {}", e);
            return Err(e);
        }

        self.settings.send_modify(|s| s.interval_seconds = seconds);
        tracing::info!("Autowar tick set to every {} seconds", seconds);
        Ok(())
    }

    /// Stop or resume future fires; a pass already running is not affected
    pub fn set_enabled(&self, enabled: bool) {
        self.settings.send_modify(|s| s.enabled = enabled);
        tracing::info!("Autowar timer {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Make `run` return after any in-flight pass
    pub fn shutdown(&self) {
        self.settings.send_modify(|s| s.shutdown = true);
    }

    /// Timer loop. Returns after `shutdown`.
    pub async fn run(&self) {
        let mut rx = self.settings.subscribe();

        loop {
            let settings = *rx.borrow_and_update();
            if settings.shutdown {
                tracing::info!("Autowar timer stopped");
                break;
            }

            if !settings.enabled {
                self.set_next_tick(None);
                if rx.changed().await.is_err() {
                    break;
                }
                continue;
            }

            let period = Duration::from_secs(settings.interval_seconds);
            self.set_next_tick(Some(Utc::now() + chrono::Duration::seconds(settings.interval_seconds as i64)));

            tokio::select! {
                _ = tokio::time::sleep(period) => {
                    self.fire(settings.interval_seconds).await;
                }
                changed = rx.changed() => {
                    // New settings restart the countdown
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    }

    async fn fire(&self, interval_seconds: u64) -> PassReport {
        let now = Utc::now();
        {
            let mut ticks = self.ticks.lock().unwrap_or_else(PoisonError::into_inner);
            ticks.last_tick = Some(now);
            ticks.next_tick = Some(now + chrono::Duration::seconds(interval_seconds as i64));
        }
        self.run_pass().await
    }

    fn set_next_tick(&self, next: Option<DateTime<Utc>>) {
        self.ticks.lock().unwrap_or_else(PoisonError::into_inner).next_tick = next;
    }

    /// Run one full pass now, then save turns and post the news feed.
    ///
    /// Waits for any pass already in flight.
    pub async fn run_pass(&self) -> PassReport {
        let mut engine = self.engine.lock().await;
        let mut host = self.host.lock().await;

        let mut dice = match self.seed {
            Some(seed) => RngDice::seeded(seed),
            None => RngDice::from_clock(),
        };

        let summary = {
            let HostState {
                map,
                connections,
                histories,
                news,
                listener,
            } = &mut *host;
            let mut ctx = TurnContext {
                map,
                connections,
                histories,
                news,
                listener: &mut **listener,
                upper_fortify_border: self.upper_fortify_border,
            };
            engine.take_turn(&mut ctx, &mut dice)
        };

        if let Err(e) = engine.save_turns(&self.turns_path) {
            tracing::error!("Failed to save autowar turns to {:?}: {}", self.turns_path, e);
        }

        let message = host.news.to_message();
        drop(host);
        drop(engine);

        PassReport {
            summary,
            delivery: self.publish(message),
        }
    }

    fn publish(&self, message: String) -> Option<JoinHandle<()>> {
        let notifier = Arc::clone(self.notifier.as_ref()?);
        if message.is_empty() {
            tracing::debug!("Nothing to post for this pass");
            return None;
        }

        Some(tokio::spawn(async move {
            let outcomes = notifier.send(&message).await;
            let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
            if failed > 0 {
                tracing::error!("Autowar news failed on {} of {} webhooks", failed, outcomes.len());
            } else {
                tracing::info!("Autowar news posted to {} webhooks", outcomes.len());
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TurnRules;
    use crate::faction::store::ProfileStore;
    use crate::turns::history::TurnHistory;
    use tempfile::TempDir;

    fn scheduler(dir: &TempDir) -> Scheduler {
        let config = AutowarConfig {
            base_folder: dir.path().to_path_buf(),
            ..Default::default()
        };
        scheduler_with(&config)
    }

    fn scheduler_with(config: &AutowarConfig) -> Scheduler {
        let engine = Autowar::new(TurnRules::from(config), ProfileStore::new(), TurnHistory::new());
        Scheduler::new(engine, HostState::new(StarMap::default()), config)
    }

    #[test]
    fn test_invalid_interval_keeps_previous() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir);

        assert!(scheduler.set_interval(0).is_err());
        assert!(scheduler.set_interval(crate::core::config::MAX_TICK_SECONDS + 1).is_err());
        assert_eq!(scheduler.interval_seconds(), 3600);

        scheduler.set_interval(60).unwrap();
        assert_eq!(scheduler.interval_seconds(), 60);
    }

    #[test]
    fn test_invalid_configured_interval_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        for tick_seconds in [0, crate::core::config::MAX_TICK_SECONDS + 1] {
            let config = AutowarConfig {
                base_folder: dir.path().to_path_buf(),
                tick_seconds,
                ..Default::default()
            };
            assert_eq!(scheduler_with(&config).interval_seconds(), 3600);
        }
    }

    #[test]
    fn test_enable_toggle() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir);
        assert!(scheduler.is_enabled());
        scheduler.set_enabled(false);
        assert!(!scheduler.is_enabled());
    }

    #[tokio::test]
    async fn test_shutdown_ends_run() {
        let dir = TempDir::new().unwrap();
        let scheduler = scheduler(&dir);
        scheduler.shutdown();
        scheduler.run().await;
        assert_eq!(scheduler.tick_times(), TickTimes::default());
    }
}
