//! Simulation Clock
//!
//! A fixed-period driver that advances the registry once per tick.
//!
//! The clock is a two-state machine (Stopped, Running) owned by one value.
//! While running, a single tokio task holds the interval and is the only
//! writer to the registry. A tick takes the registry lock for its whole pass,
//! so readers never see a half-updated population. `stop` signals the task
//! and awaits it, so once `stop` returns no further tick can fire.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::registry::VehicleRegistry;

/// Registry shared between the clock task and readers.
pub type SharedRegistry = Arc<Mutex<VehicleRegistry>>;

/// Wraps a registry for sharing with a clock.
pub fn share(registry: VehicleRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Stopped,
    Running,
}

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("clock is already running")]
    AlreadyRunning,
    #[error("tick period must be positive")]
    ZeroPeriod,
}

/// Handle for the running tick task.
struct RunningClock {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<watch::Sender<u64>>,
}

/// Fixed-interval driver for [`VehicleRegistry::advance_all`].
pub struct SimulationClock {
    period: Duration,
    registry: SharedRegistry,
    running: Option<RunningClock>,
    /// Held here while stopped, moved into the task while running.
    ticks_tx: Option<watch::Sender<u64>>,
    ticks_rx: watch::Receiver<u64>,
}

impl SimulationClock {
    pub fn new(registry: SharedRegistry, period: Duration) -> Result<Self, ClockError> {
        if period.is_zero() {
            return Err(ClockError::ZeroPeriod);
        }
        let applied = registry.try_lock().map(|r| r.ticks_applied()).unwrap_or(0);
        let (ticks_tx, ticks_rx) = watch::channel(applied);
        Ok(Self {
            period,
            registry,
            running: None,
            ticks_tx: Some(ticks_tx),
            ticks_rx,
        })
    }

    pub fn state(&self) -> ClockState {
        if self.running.is_some() {
            ClockState::Running
        } else {
            ClockState::Stopped
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }

    /// Receiver that observes the registry's tick count after every
    /// completed tick. The count restarts from 1 on the first tick after a
    /// reseed.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ticks_rx.clone()
    }

    /// The registry's tick count as of the last completed tick.
    pub fn ticks(&self) -> u64 {
        *self.ticks_rx.borrow()
    }

    /// Starts ticking. The first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), ClockError> {
        if self.running.is_some() {
            return Err(ClockError::AlreadyRunning);
        }
        let ticks_tx = self.ticks_tx.take().ok_or(ClockError::AlreadyRunning)?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(run_ticks(
            Arc::clone(&self.registry),
            self.period,
            ticks_tx,
            shutdown_rx,
        ));
        self.running = Some(RunningClock {
            shutdown: shutdown_tx,
            handle,
        });

        info!(period_ms = self.period.as_millis() as u64, "Clock started");
        Ok(())
    }

    /// Stops ticking. An in-flight tick finishes its pass first; after this
    /// returns no further tick fires. Stopping a stopped clock does nothing.
    pub async fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        let _ = running.shutdown.send(());

        match running.handle.await {
            Ok(ticks_tx) => self.ticks_tx = Some(ticks_tx),
            Err(e) => {
                warn!("Clock task ended abnormally: {}", e);
                let (ticks_tx, ticks_rx) = watch::channel(self.ticks());
                self.ticks_tx = Some(ticks_tx);
                self.ticks_rx = ticks_rx;
            }
        }
        info!(ticks = self.ticks(), "Clock stopped");
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            running.handle.abort();
        }
    }
}

async fn run_ticks(
    registry: SharedRegistry,
    period: Duration,
    ticks_tx: watch::Sender<u64>,
    mut shutdown: oneshot::Receiver<()>,
) -> watch::Sender<u64> {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let (moved, tick) = {
                    let mut guard = registry.lock().await;
                    let moved = guard.advance_all();
                    (moved, guard.ticks_applied())
                };
                ticks_tx.send_replace(tick);
                debug!(tick, moved, "Clock tick");
            }
        }
    }
    ticks_tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::vehicle;
    use crate::registry::EndBehavior;
    use fleet_events::{VehicleId, VehicleStatus};

    fn shared_fleet() -> SharedRegistry {
        share(VehicleRegistry::from_vehicles(
            vec![
                vehicle(1, 1, VehicleStatus::Active, 10),
                vehicle(2, 1, VehicleStatus::Inactive, 10),
            ],
            EndBehavior::Clamp,
        ))
    }

    #[test]
    fn test_zero_period_rejected() {
        let result = SimulationClock::new(shared_fleet(), Duration::ZERO);
        assert!(matches!(result, Err(ClockError::ZeroPeriod)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_stop_state_machine() {
        let mut clock = SimulationClock::new(shared_fleet(), Duration::from_millis(500)).unwrap();
        assert_eq!(clock.state(), ClockState::Stopped);

        clock.start().unwrap();
        assert_eq!(clock.state(), ClockState::Running);
        assert!(matches!(clock.start(), Err(ClockError::AlreadyRunning)));

        clock.stop().await;
        assert_eq!(clock.state(), ClockState::Stopped);

        // Stopping twice is harmless
        clock.stop().await;
        assert_eq!(clock.state(), ClockState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_before_first_period() {
        let mut clock = SimulationClock::new(shared_fleet(), Duration::from_millis(1000)).unwrap();
        clock.start().unwrap();

        time::sleep(Duration::from_millis(999)).await;
        assert_eq!(clock.ticks(), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(clock.ticks(), 1);
        clock.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_from_current_cursor() {
        let registry = shared_fleet();
        let mut clock = SimulationClock::new(Arc::clone(&registry), Duration::from_millis(100)).unwrap();
        let mut ticks = clock.subscribe();

        clock.start().unwrap();
        ticks.wait_for(|&t| t >= 3).await.unwrap();
        clock.stop().await;

        let cursor = registry.lock().await.get(VehicleId(1)).unwrap().cursor();
        assert_eq!(cursor, 3);

        clock.start().unwrap();
        ticks.wait_for(|&t| t >= 5).await.unwrap();
        clock.stop().await;

        let guard = registry.lock().await;
        assert_eq!(guard.get(VehicleId(1)).unwrap().cursor(), 5);
        assert_eq!(guard.get(VehicleId(2)).unwrap().cursor(), 0);
        assert_eq!(clock.ticks(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_waits_for_readers() {
        let registry = shared_fleet();
        let mut clock = SimulationClock::new(Arc::clone(&registry), Duration::from_millis(100)).unwrap();

        let guard = registry.lock().await;
        clock.start().unwrap();
        time::sleep(Duration::from_millis(350)).await;

        // The tick task is parked on the lock; nothing has moved yet
        assert_eq!(guard.get(VehicleId(1)).unwrap().cursor(), 0);
        assert_eq!(clock.ticks(), 0);
        drop(guard);

        let mut ticks = clock.subscribe();
        ticks.wait_for(|&t| t >= 1).await.unwrap();
        clock.stop().await;

        let cursor = registry.lock().await.get(VehicleId(1)).unwrap().cursor();
        assert_eq!(cursor as u64, clock.ticks());
    }
}
