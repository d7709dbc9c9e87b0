//! Applying remote outcomes to the roster and notifications.

use crate::dispatch::{Completion, Intent};
use crate::models::{Notifications, PatronDefaults, PatronId, PatronPatch, Roster};

pub const FETCH_FAILED: &str = "Failed to fetch patrons";
pub const PATRON_ADDED: &str = "Patron added successfully";
pub const ADD_FAILED: &str = "Failed to add patron";
pub const DEFAULTS_LOADED: &str = "Default patron values loaded";
pub const DEFAULTS_FAILED: &str = "Failed to load default patron values";

pub fn patron_deleted(id: PatronId) -> String {
    format!("Patron {} deleted successfully", id)
}

pub fn delete_failed(id: PatronId) -> String {
    format!("Failed to delete patron {}", id)
}

pub fn drink_failed(id: PatronId) -> String {
    format!("Failed to add drink to patron tally for patron {}", id)
}

pub fn saturation_fetched(id: PatronId) -> String {
    format!("Saturation level fetched successfully for patron {}", id)
}

pub fn saturation_failed(id: PatronId) -> String {
    format!("Failed to fetch saturation level for patron {}", id)
}

/// What the presentation layer must do after a completion is applied
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// A patron was created: reset the name and body mass inputs
    ClearPatronForm,
    /// Defaults arrived: put them into the name and body mass inputs
    FillPatronForm(PatronDefaults),
    /// Issue a follow-up intent (second stage of record-drink)
    Dispatch(Intent),
}

/// Roster and notifications, owned by the top-level view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    pub roster: Roster,
    pub notifications: Notifications,
}

impl Tally {
    pub fn new() -> Self {
        Tally::default()
    }

    /// Apply one completion.
    ///
    /// Success mutates the roster and sets the success slot; failure only sets
    /// the error slot. Every failure cause maps to the same fixed message.
    pub fn apply(&mut self, completion: Completion) -> Effect {
        match completion {
            Completion::Fetched(Ok(patrons)) => {
                log::info!("Fetched {} patrons", patrons.len());
                self.roster.load_all(patrons);
                Effect::None
            }
            Completion::Fetched(Err(e)) => {
                log::error!("{}: {}", FETCH_FAILED, e);
                self.notifications.set_error(FETCH_FAILED);
                Effect::None
            }

            Completion::Created(Ok(patron)) => {
                log::info!("Added patron {} ({})", patron.id, patron.name);
                self.roster.append(patron);
                self.notifications.set_success(PATRON_ADDED);
                Effect::ClearPatronForm
            }
            Completion::Created(Err(e)) => {
                log::error!("{}: {}", ADD_FAILED, e);
                self.notifications.set_error(ADD_FAILED);
                Effect::None
            }

            Completion::Removed { id, result: Ok(()) } => {
                log::info!("Deleted patron {}", id);
                self.roster.remove_by_id(id);
                self.notifications.set_success(patron_deleted(id));
                Effect::None
            }
            Completion::Removed { id, result: Err(e) } => {
                let message = delete_failed(id);
                log::error!("{}: {}", message, e);
                self.notifications.set_error(message);
                Effect::None
            }

            Completion::DrinkRecorded {
                patron_id,
                result: Ok(()),
            } => {
                log::info!("Drink recorded for patron {}, refreshing saturation", patron_id);
                Effect::Dispatch(Intent::RefreshSaturation(patron_id))
            }
            Completion::DrinkRecorded {
                patron_id,
                result: Err(e),
            } => {
                let message = drink_failed(patron_id);
                log::error!("{}: {}", message, e);
                self.notifications.set_error(message);
                Effect::None
            }

            Completion::SaturationRefreshed {
                patron_id,
                result: Ok(reading),
            } => {
                let level = reading.alcohol_saturation_level;
                if !self
                    .roster
                    .patch_by_id(patron_id, &PatronPatch::saturation(level))
                {
                    log::debug!("Patron {} no longer in roster, saturation dropped", patron_id);
                }
                self.notifications.set_success(saturation_fetched(patron_id));
                Effect::None
            }
            Completion::SaturationRefreshed {
                patron_id,
                result: Err(e),
            } => {
                let message = saturation_failed(patron_id);
                log::warn!("{}: {}", message, e);
                self.notifications.set_error(message);
                Effect::None
            }

            Completion::DefaultsLoaded(Ok(defaults)) => {
                self.notifications.set_success(DEFAULTS_LOADED);
                Effect::FillPatronForm(defaults)
            }
            Completion::DefaultsLoaded(Err(e)) => {
                log::warn!("{}: {}", DEFAULTS_FAILED, e);
                self.notifications.set_error(DEFAULTS_FAILED);
                Effect::None
            }
        }
    }
}
