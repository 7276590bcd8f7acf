//! Periodic board refresh scheduler.
//!
//! Provides a cron-based scheduler that recomputes the rota board at fixed
//! intervals and publishes the result on a `tokio::sync::watch` channel.
//! Join handles are tracked, cancellation is explicit, and every
//! asynchronous operation is wrapped in a timeout.
//!
//! Subscribers always observe the latest snapshot; a failed tick is logged
//! and leaves the previous snapshot in place, so the display keeps showing
//! stale-but-valid data until the store recovers.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rotaboard_core::BoardService;
//! use rotaboard_infra::scheduling::{BoardScheduler, BoardSchedulerConfig, SchedulerResult};
//!
//! # async fn example(service: Arc<BoardService>) -> SchedulerResult<()> {
//! let mut scheduler = BoardScheduler::with_config(
//!     BoardSchedulerConfig::for_interval_seconds(60), // once per minute
//!     service,
//! )?;
//! let board = scheduler.subscribe();
//!
//! scheduler.start().await?;
//! // ... widgets read `board.borrow()` on their own cadence ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use rotaboard_core::{BoardService, BoardSnapshot};
use rotaboard_domain::Result as DomainResult;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Configuration for the board scheduler.
#[derive(Debug, Clone)]
pub struct BoardSchedulerConfig {
    /// Cron expression describing the execution schedule.
    pub cron_expression: String,
    /// Timeout applied to a single refresh execution.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for BoardSchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: "0 * * * * *".into(), // every minute
            job_timeout: Duration::from_secs(30),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

impl BoardSchedulerConfig {
    /// Configuration refreshing every `seconds`, for the supported range of
    /// sub-hour intervals.
    pub fn for_interval_seconds(seconds: u64) -> Self {
        Self { cron_expression: cron_for_interval(seconds), ..Default::default() }
    }
}

/// Map a refresh interval to a six-field cron expression.
///
/// Sub-minute intervals tick on second boundaries, whole-minute intervals
/// on minute boundaries; anything above an hour falls back to hourly.
fn cron_for_interval(seconds: u64) -> String {
    match seconds {
        0 => "0 * * * * *".to_string(),
        s if s < 60 => format!("*/{s} * * * * *"),
        s if s % 60 == 0 && s < 3600 => format!("0 */{} * * * *", s / 60),
        _ => "0 0 * * * *".to_string(),
    }
}

/// Board refresh scheduler with explicit lifecycle management.
pub struct BoardScheduler {
    scheduler: Option<JobScheduler>,
    config: BoardSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    service: Arc<BoardService>,
    snapshot_tx: watch::Sender<Option<BoardSnapshot>>,
}

impl BoardScheduler {
    /// Create a scheduler with the default configuration.
    pub fn new(service: Arc<BoardService>) -> SchedulerResult<Self> {
        Self::with_config(BoardSchedulerConfig::default(), service)
    }

    /// Create a scheduler with a custom configuration.
    pub fn with_config(
        config: BoardSchedulerConfig,
        service: Arc<BoardService>,
    ) -> SchedulerResult<Self> {
        let (snapshot_tx, _) = watch::channel(None);
        Ok(Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            service,
            snapshot_tx,
        })
    }

    /// Subscribe to published board snapshots.
    ///
    /// The receiver holds `None` until the first successful refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<BoardSnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            Self::monitor_task(cancel).await;
        });

        self.monitor_handle = Some(handle);
        info!(cron = %self.config.cron_expression, "Board scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let mut scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => return Err(SchedulerError::NotRunning),
        };

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??
        }

        info!("Board scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let cron_expr = self.config.cron_expression.clone();
        let service = self.service.clone();
        let snapshot_tx = self.snapshot_tx.clone();
        let job_timeout = self.config.job_timeout;

        let job_definition = Job::new_async(cron_expr.as_str(), move |_id, _lock| {
            let service = service.clone();
            let snapshot_tx = snapshot_tx.clone();

            Box::pin(async move {
                let started = Instant::now();

                match tokio::time::timeout(
                    job_timeout,
                    Self::refresh_board(service, snapshot_tx),
                )
                .await
                {
                    Ok(Ok(())) => {
                        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Board refresh finished");
                    }
                    Ok(Err(err)) => {
                        error!(error = ?err, "Board refresh failed; keeping previous snapshot");
                    }
                    Err(elapsed) => {
                        warn!(timeout_secs = job_timeout.as_secs(), "Board refresh timed out");
                        debug!(elapsed = ?elapsed, "Timeout details");
                    }
                }
            })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered board refresh job");
        Ok(scheduler)
    }

    async fn refresh_board(
        service: Arc<BoardService>,
        snapshot_tx: watch::Sender<Option<BoardSnapshot>>,
    ) -> DomainResult<()> {
        let snapshot = service.snapshot().await?;
        debug!(
            occurrences = snapshot.occurrences.len(),
            today_technical = snapshot.today_technical.len(),
            week_political = snapshot.week_political.len(),
            "Publishing board snapshot"
        );
        snapshot_tx.send_replace(Some(snapshot));
        Ok(())
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Board scheduler monitor cancelled");
    }
}

impl Drop for BoardScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("BoardScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
