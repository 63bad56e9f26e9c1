//! Report cache with TTL expiry and per-key in-flight coalescing

use crate::score::error::{CacheError, ScoreError};
use crate::score::report::{FreshnessReport, Scorer};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, watch};
use tracing::debug;
use url::Url;

/// Trait for computing a fresh report; the cache is generic over it
#[async_trait::async_trait]
pub trait ComputeReport: Send + Sync + 'static {
    async fn compute(&self, root: &Url) -> Result<FreshnessReport, ScoreError>;
}

#[async_trait::async_trait]
impl ComputeReport for Scorer {
    async fn compute(&self, root: &Url) -> Result<FreshnessReport, ScoreError> {
        self.report(root).await
    }
}

type SlotResult = Result<FreshnessReport, Arc<ScoreError>>;

enum Slot {
    /// A computed report and the instant it stops being served
    Ready {
        report: FreshnessReport,
        expires_at: Instant,
    },
    /// A computation some caller already started
    InFlight(watch::Receiver<Option<SlotResult>>),
}

/// Report cache keyed by root specifier.
///
/// Entries stay fresh for the configured aging period and are overwritten
/// in place when recomputed; nothing is ever evicted, so the map grows with
/// the number of distinct roots.
pub struct ReportCache<C: ComputeReport> {
    computer: Arc<C>,
    aging: Duration,
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl<C: ComputeReport> ReportCache<C> {
    pub fn new(computer: Arc<C>, aging: Duration) -> Self {
        Self {
            computer,
            aging,
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the report for `root`, computing it when needed.
    ///
    /// Within the aging window every caller gets a clone of the same report
    /// and no upstream calls happen. Concurrent callers for the same root
    /// share a single computation. A failed computation reaches everyone
    /// waiting on it and is not cached, so the next caller retries.
    pub async fn report_for(&self, root: &Url) -> Result<FreshnessReport, CacheError> {
        let key = root.as_str().to_string();

        let mut rx = {
            let mut slots = self.slots.lock().await;
            match slots.get(&key) {
                Some(Slot::Ready { report, expires_at }) if Instant::now() < *expires_at => {
                    debug!("cache hit for {}", key);
                    return Ok(report.clone());
                }
                Some(Slot::InFlight(rx)) => {
                    debug!("joining in-flight computation for {}", key);
                    rx.clone()
                }
                _ => {
                    debug!("cache miss for {}", key);
                    let (tx, rx) = watch::channel(None);
                    slots.insert(key.clone(), Slot::InFlight(rx.clone()));
                    self.spawn_compute(key, root.clone(), tx);
                    rx
                }
            }
        };

        let guard = rx
            .wait_for(|slot| slot.is_some())
            .await
            .map_err(|_| CacheError::Interrupted)?;
        let result = (*guard).clone();
        drop(guard);

        match result {
            Some(Ok(report)) => Ok(report),
            Some(Err(e)) => Err(CacheError::Compute(e)),
            None => Err(CacheError::Interrupted),
        }
    }

    /// Runs the computation on a detached task so the result reaches the
    /// cache and every waiter even when the requesting caller goes away.
    fn spawn_compute(&self, key: String, root: Url, tx: watch::Sender<Option<SlotResult>>) {
        let computer = Arc::clone(&self.computer);
        let slots = Arc::clone(&self.slots);
        let aging = self.aging;

        tokio::spawn(async move {
            let result: SlotResult = computer.compute(&root).await.map_err(Arc::new);

            {
                let mut slots = slots.lock().await;
                match &result {
                    Ok(report) => {
                        slots.insert(
                            key,
                            Slot::Ready {
                                report: report.clone(),
                                expires_at: Instant::now() + aging,
                            },
                        );
                    }
                    // Failures are not cached
                    Err(_) => {
                        slots.remove(&key);
                    }
                }
            }

            let _ = tx.send(Some(result));
        });
    }
}
