//! Remote operation dispatch.
//!
//! Intents run as tasks on a tokio runtime. Each task sends exactly one
//! [`Completion`] back over a channel; the owner of the roster drains the
//! channel from its own loop, so completions are applied one at a time in
//! the order they arrive.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use tokio::runtime::Handle;

use crate::api::{ApiError, PatronApi};
use crate::models::{NewPatron, Patron, PatronDefaults, PatronId, SaturationReading};

/// A user-initiated remote operation
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Load the whole roster (startup only)
    FetchAll,
    /// Create a patron from raw form text
    Create { name: String, body_mass_text: String },
    /// Delete a patron
    Remove(PatronId),
    /// Record a drink; a successful completion is followed by `RefreshSaturation`
    RecordDrink { patron_id: PatronId, drink_id: String },
    /// Re-read one patron's saturation level
    RefreshSaturation(PatronId),
    /// Fetch suggested values for the new-patron form
    LoadDefaults,
}

/// Outcome of one remote call
#[derive(Debug)]
pub enum Completion {
    Fetched(Result<Vec<Patron>, ApiError>),
    Created(Result<Patron, ApiError>),
    Removed {
        id: PatronId,
        result: Result<(), ApiError>,
    },
    DrinkRecorded {
        patron_id: PatronId,
        result: Result<(), ApiError>,
    },
    SaturationRefreshed {
        patron_id: PatronId,
        result: Result<SaturationReading, ApiError>,
    },
    DefaultsLoaded(Result<PatronDefaults, ApiError>),
}

/// Issue the remote call for an intent and wrap its outcome
pub async fn perform(api: &dyn PatronApi, intent: Intent) -> Completion {
    match intent {
        Intent::FetchAll => Completion::Fetched(api.list_patrons().await),
        Intent::Create {
            name,
            body_mass_text,
        } => {
            let new = NewPatron::from_form(&name, &body_mass_text);
            Completion::Created(api.create_patron(&new).await)
        }
        Intent::Remove(id) => Completion::Removed {
            id,
            result: api.delete_patron(id).await,
        },
        Intent::RecordDrink {
            patron_id,
            drink_id,
        } => Completion::DrinkRecorded {
            patron_id,
            result: api.add_drink(patron_id, &drink_id).await,
        },
        Intent::RefreshSaturation(patron_id) => Completion::SaturationRefreshed {
            patron_id,
            result: api.saturation_level(patron_id).await,
        },
        Intent::LoadDefaults => Completion::DefaultsLoaded(api.default_values().await),
    }
}

/// Spawns remote calls and hands their completions back to the caller's thread
pub struct Dispatcher {
    api: Arc<dyn PatronApi>,
    runtime: Handle,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    in_flight: usize,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn PatronApi>, runtime: Handle) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Dispatcher {
            api,
            runtime,
            completion_tx,
            completion_rx,
            in_flight: 0,
        }
    }

    /// Start the remote call for `intent` without waiting for it.
    /// No retries and no cancellation; overlapping calls all run.
    pub fn dispatch(&mut self, intent: Intent) {
        log::debug!("Dispatching {:?} via {} backend", intent, self.api.name());

        let api = Arc::clone(&self.api);
        let tx = self.completion_tx.clone();
        self.in_flight += 1;

        self.runtime.spawn(async move {
            let completion = perform(api.as_ref(), intent).await;
            if tx.send(completion).is_err() {
                log::debug!("Dispatcher dropped before completion was delivered");
            }
        });
    }

    /// Drain every completion that has arrived so far (non-blocking)
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            completions.push(completion);
        }
        self.in_flight = self.in_flight.saturating_sub(completions.len());
        completions
    }

    /// Block until the next completion arrives.
    /// Returns None when nothing is in flight.
    pub fn wait(&mut self) -> Option<Completion> {
        if self.in_flight == 0 {
            return None;
        }
        let completion = self.completion_rx.recv().ok()?;
        self.in_flight -= 1;
        Some(completion)
    }

    /// Number of calls issued whose completion has not been collected yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
