//! Periodic refresh of every registered device on a tokio runtime.

use crate::adb::{AdbError, AdbResult, AdbServerApi};
use crate::registry::DeviceRegistry;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Upper bound for one full pass over all devices.
const TICK_TIMEOUT: Duration = Duration::from_secs(60);

pub struct Poller<S: AdbServerApi> {
    registry: Arc<Mutex<DeviceRegistry<S>>>,
    interval: Duration,
}

impl<S> Poller<S>
where
    S: AdbServerApi + Send + 'static,
    S::Shell: Send,
{
    pub fn new(registry: Arc<Mutex<DeviceRegistry<S>>>, interval: Duration) -> Self {
        Self { registry, interval }
    }

    pub fn registry(&self) -> Arc<Mutex<DeviceRegistry<S>>> {
        Arc::clone(&self.registry)
    }

    /// One pass of `update_all` on the blocking pool. Returns the number of
    /// available devices, or `None` when the registry is still held by an
    /// earlier pass that has not returned.
    pub async fn tick(&self) -> AdbResult<Option<usize>> {
        let Ok(mut registry) = Arc::clone(&self.registry).try_lock_owned() else {
            return Ok(None);
        };
        let update = tokio::task::spawn_blocking(move || registry.update_all());

        match tokio::time::timeout(TICK_TIMEOUT, update).await {
            Ok(result) => Ok(Some(result?)),
            Err(_) => Err(AdbError::Timeout {
                operation: "Device update".to_string(),
                seconds: TICK_TIMEOUT.as_secs(),
            }),
        }
    }

    /// Ticks every `interval` until `shutdown` resolves, handing the registry
    /// to `observe` after each successful tick. The first tick runs
    /// immediately.
    pub async fn run_until<F, O>(&self, shutdown: F, mut observe: O) -> AdbResult<()>
    where
        F: Future<Output = ()>,
        O: FnMut(&DeviceRegistry<S>),
    {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {}
            }
            let outcome = tokio::select! {
                _ = &mut shutdown => break,
                outcome = self.tick() => outcome,
            };
            match outcome {
                Ok(Some(available)) => {
                    log::debug!("{available} device(s) available");
                    observe(&*self.registry.lock().await);
                }
                Ok(None) => log::warn!("Previous device update still running, skipping tick"),
                Err(e) => log::error!("Polling failed: {e}"),
            }
        }
        log::info!("Stopping device polling");
        Ok(())
    }
}
