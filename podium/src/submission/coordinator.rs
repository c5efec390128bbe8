//! Single-flight finalize submission.

use super::{
    errors::{SubmissionError, SubmissionResult, TransportError},
    transport::SubmissionTransport,
};
use crate::{
    access::Access,
    arrangement::AssignmentStore,
    finalize::{self, FinalizePayload},
};
use log::{debug, error, info};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// Submission phase
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionPhase {
    Ready,
    Submitting,
}

type FinalizedListener = Arc<dyn Fn(&FinalizePayload) + Send + Sync>;

struct Status {
    phase: SubmissionPhase,
    /// Incremented per submission and per cancellation; a response whose
    /// generation is stale is ignored.
    generation: u64,
    last_error: Option<SubmissionError>,
}

struct Shared {
    tournament_id: String,
    game_category: String,
    transport: Arc<dyn SubmissionTransport>,
    status: Mutex<Status>,
    listeners: Mutex<Vec<FinalizedListener>>,
    cancelled: Notify,
}

/// Guards the finalize call so at most one is in flight per session and
/// notifies listeners once per successful submission.
///
/// Cloning yields another handle to the same coordinator.
#[derive(Clone)]
pub struct SubmissionCoordinator {
    shared: Arc<Shared>,
}

impl SubmissionCoordinator {
    pub fn new(
        transport: Arc<dyn SubmissionTransport>,
        tournament_id: &str,
        game_category: &str,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                tournament_id: tournament_id.to_string(),
                game_category: game_category.to_string(),
                transport,
                status: Mutex::new(Status {
                    phase: SubmissionPhase::Ready,
                    generation: 0,
                    last_error: None,
                }),
                listeners: Mutex::new(Vec::new()),
                cancelled: Notify::new(),
            }),
        }
    }

    fn status(&self) -> MutexGuard<'_, Status> {
        self.shared
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.status().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == SubmissionPhase::Submitting
    }

    /// Error from the most recent submission, cleared when a new one starts
    pub fn last_error(&self) -> Option<SubmissionError> {
        self.status().last_error.clone()
    }

    /// Register a callback fired after each successful submission.
    pub fn on_finalized<F>(&self, listener: F)
    where
        F: Fn(&FinalizePayload) + Send + Sync + 'static,
    {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Start a submission: check access, claim the in-flight slot and
    /// serialize the store. The network call happens in [`InFlight::send`].
    ///
    /// # Errors
    ///
    /// `ReadOnly` when `access` is not editable, `AlreadySubmitting` while
    /// another submission is in flight. Neither changes any state.
    pub fn begin(&self, store: &AssignmentStore, access: Access) -> SubmissionResult<InFlight> {
        if !access.editable() {
            return Err(SubmissionError::ReadOnly);
        }

        let mut status = self.status();
        if status.phase == SubmissionPhase::Submitting {
            debug!("rejecting submission: another one is in flight");
            return Err(SubmissionError::AlreadySubmitting);
        }

        let payload = finalize::serialize(
            store,
            &self.shared.tournament_id,
            &self.shared.game_category,
        );
        status.phase = SubmissionPhase::Submitting;
        status.generation += 1;
        status.last_error = None;

        info!(
            "submitting standings for tournament {} ({} ranked)",
            payload.tournament_id,
            payload.ranked_count()
        );

        Ok(InFlight {
            coordinator: self.clone(),
            payload,
            generation: status.generation,
            settled: false,
        })
    }

    /// Serialize and submit the store, waiting for the result.
    ///
    /// # Errors
    ///
    /// See [`SubmissionCoordinator::begin`] and [`InFlight::send`].
    pub async fn submit(
        &self,
        store: &AssignmentStore,
        access: Access,
    ) -> SubmissionResult<FinalizePayload> {
        let in_flight = self.begin(store, access)?;
        in_flight.send().await
    }

    /// Abandon the in-flight submission, if any. Returns whether there was one.
    ///
    /// The coordinator is `Ready` again immediately; a response that still
    /// arrives for the abandoned submission is ignored.
    pub fn cancel(&self) -> bool {
        let mut status = self.status();
        if status.phase != SubmissionPhase::Submitting {
            return false;
        }
        status.phase = SubmissionPhase::Ready;
        status.generation += 1;
        status.last_error = Some(SubmissionError::Cancelled);
        drop(status);

        self.shared.cancelled.notify_waiters();
        info!("submission cancelled");
        true
    }

    fn notify_finalized(&self, payload: &FinalizePayload) {
        let listeners = self
            .shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(payload);
        }
    }
}

/// A claimed submission waiting to be sent.
///
/// Dropping it unsent (or dropping the `send` future) releases the claim
/// and records the submission as cancelled.
pub struct InFlight {
    coordinator: SubmissionCoordinator,
    payload: FinalizePayload,
    generation: u64,
    settled: bool,
}

impl InFlight {
    pub fn payload(&self) -> &FinalizePayload {
        &self.payload
    }

    /// Perform the transport call.
    ///
    /// # Errors
    ///
    /// `Transport` when delivery fails and `Cancelled` when
    /// [`SubmissionCoordinator::cancel`] ran first. The coordinator is back
    /// in `Ready` in every case.
    pub async fn send(mut self) -> SubmissionResult<FinalizePayload> {
        let shared = Arc::clone(&self.coordinator.shared);
        let cancelled = shared.cancelled.notified();
        tokio::pin!(cancelled);
        cancelled.as_mut().enable();

        if !self.is_current() {
            self.settled = true;
            return Err(SubmissionError::Cancelled);
        }

        let response = tokio::select! {
            response = shared.transport.submit(&self.payload) => Some(response),
            () = &mut cancelled => None,
        };
        self.settled = true;
        self.settle(response)
    }

    fn is_current(&self) -> bool {
        let status = self.coordinator.status();
        status.phase == SubmissionPhase::Submitting && status.generation == self.generation
    }

    fn settle(
        &self,
        response: Option<Result<(), TransportError>>,
    ) -> SubmissionResult<FinalizePayload> {
        let mut status = self.coordinator.status();
        if status.phase != SubmissionPhase::Submitting || status.generation != self.generation {
            debug!("ignoring response for abandoned submission");
            return Err(SubmissionError::Cancelled);
        }
        status.phase = SubmissionPhase::Ready;

        match response {
            Some(Ok(())) => {
                status.last_error = None;
                drop(status);
                info!(
                    "standings finalized for tournament {}",
                    self.payload.tournament_id
                );
                self.coordinator.notify_finalized(&self.payload);
                Ok(self.payload.clone())
            }
            Some(Err(err)) => {
                error!("finalize submission failed: {err}");
                let err = SubmissionError::Transport(err);
                status.last_error = Some(err.clone());
                Err(err)
            }
            None => {
                status.last_error = Some(SubmissionError::Cancelled);
                Err(SubmissionError::Cancelled)
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut status = self.coordinator.status();
        if status.phase == SubmissionPhase::Submitting && status.generation == self.generation {
            debug!("in-flight submission dropped before completion");
            status.phase = SubmissionPhase::Ready;
            status.generation += 1;
            status.last_error = Some(SubmissionError::Cancelled);
        }
    }
}
