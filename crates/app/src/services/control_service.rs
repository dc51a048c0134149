//! Control service — reads, replaces and reconciles the control record.

use tokio::sync::Mutex;

use growbox_domain::control::{ControlRequest, ControlState};
use growbox_domain::error::GrowboxError;
use growbox_domain::reconciler::{EffectiveCommand, reconcile};

use crate::ports::{Clock, ControlRepository};
use crate::retry::{RetryPolicy, retry_on_contention};

/// Application service owning every access to the control record.
///
/// Writes go through a single path: validation, then an in-process write lock,
/// then the repository upsert wrapped in [`retry_on_contention`]. Reads are
/// never retried.
pub struct ControlService<R, C> {
    repo: R,
    clock: C,
    retry: RetryPolicy,
    write_lock: Mutex<()>,
}

impl<R: ControlRepository, C: Clock> ControlService<R, C> {
    /// Create a new service with the default retry policy.
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            repo,
            clock,
            retry: RetryPolicy::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the retry policy applied to writes.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Current control record, created with defaults on first access.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_control(&self) -> Result<ControlState, GrowboxError> {
        self.repo.get_or_create().await
    }

    /// Parse a client request and replace the control record with it.
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::Validation`] for malformed requests and
    /// [`GrowboxError::StoreUnavailable`] when the store stayed locked.
    pub async fn set_control(&self, request: &ControlRequest) -> Result<ControlState, GrowboxError> {
        tracing::debug!(
            state = %request.state,
            mode = %request.mode,
            start_time = ?request.start_time,
            end_time = ?request.end_time,
            "received control update"
        );
        let control = request.parse()?;
        self.replace_control(control).await
    }

    /// Replace the control record wholesale.
    ///
    /// # Errors
    ///
    /// See [`ControlService::set_control`].
    pub async fn replace_control(&self, control: ControlState) -> Result<ControlState, GrowboxError> {
        control.validate()?;
        let _guard = self.write_lock.lock().await;
        let saved = retry_on_contention(&self.retry, || self.repo.upsert(control)).await?;
        match saved.window() {
            Some(window) => tracing::info!(
                state = %saved.state,
                mode = %saved.mode,
                %window,
                "control record replaced"
            ),
            None => tracing::info!(state = %saved.state, mode = %saved.mode, "control record replaced"),
        }
        Ok(saved)
    }

    /// Reconcile the stored record against the clock's current time of day.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn effective_command(&self) -> Result<EffectiveCommand, GrowboxError> {
        let control = self.get_control().await?;
        Ok(reconcile(&control, self.clock.time_of_day()))
    }
}
