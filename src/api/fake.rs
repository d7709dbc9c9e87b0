//! In-memory tally service for tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Mutex;

use super::client::{ApiError, PatronApi};
use crate::models::{NewPatron, Patron, PatronDefaults, PatronId, SaturationReading};

/// Remote operations, as recorded by the fake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    List,
    Create,
    Delete,
    AddDrink,
    Saturation,
    Defaults,
}

/// A recorded call with its identifying arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(NewPatron),
    Delete(PatronId),
    AddDrink(PatronId, String),
    Saturation(PatronId),
    Defaults,
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Call::List => CallKind::List,
            Call::Create(_) => CallKind::Create,
            Call::Delete(_) => CallKind::Delete,
            Call::AddDrink(..) => CallKind::AddDrink,
            Call::Saturation(_) => CallKind::Saturation,
            Call::Defaults => CallKind::Defaults,
        }
    }
}

struct State {
    patrons: Vec<Patron>,
    next_id: PatronId,
    failing: HashSet<CallKind>,
    calls: Vec<Call>,
}

/// Fake service holding patrons in memory.
/// Each recorded drink raises the patron's saturation by `DRINK_STEP`.
pub struct FakePatronApi {
    state: Mutex<State>,
}

impl FakePatronApi {
    pub const DRINK_STEP: f64 = 0.25;

    pub fn new() -> Self {
        Self::with_patrons(Vec::new())
    }

    pub fn with_patrons(patrons: Vec<Patron>) -> Self {
        let next_id = patrons.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        FakePatronApi {
            state: Mutex::new(State {
                patrons,
                next_id,
                failing: HashSet::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Make every call of this kind fail with a 500
    pub fn fail_on(&self, kind: CallKind) {
        self.state.lock().unwrap().failing.insert(kind);
    }

    /// Let calls of this kind succeed again
    pub fn recover(&self, kind: CallKind) {
        self.state.lock().unwrap().failing.remove(&kind);
    }

    /// Set a patron's server-side saturation level
    pub fn set_saturation(&self, id: PatronId, level: f64) {
        let mut state = self.state.lock().unwrap();
        if let Some(p) = state.patrons.iter_mut().find(|p| p.id == id) {
            p.alcohol_saturation_level = level;
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_kinds(&self) -> Vec<CallKind> {
        self.calls().iter().map(Call::kind).collect()
    }

    pub fn server_patrons(&self) -> Vec<Patron> {
        self.state.lock().unwrap().patrons.clone()
    }

    fn record(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>, ApiError> {
        let mut state = self.state.lock().unwrap();
        let kind = call.kind();
        state.calls.push(call);
        if state.failing.contains(&kind) {
            return Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(state)
    }
}

impl Default for FakePatronApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatronApi for FakePatronApi {
    async fn list_patrons(&self) -> Result<Vec<Patron>, ApiError> {
        let state = self.record(Call::List)?;
        Ok(state.patrons.clone())
    }

    async fn create_patron(&self, patron: &NewPatron) -> Result<Patron, ApiError> {
        let mut state = self.record(Call::Create(patron.clone()))?;
        let created = Patron {
            id: state.next_id,
            name: patron.name.clone(),
            body_mass: patron.body_mass,
            alcohol_saturation_level: patron.alcohol_saturation_level,
        };
        state.next_id += 1;
        state.patrons.push(created.clone());
        Ok(created)
    }

    async fn delete_patron(&self, id: PatronId) -> Result<(), ApiError> {
        let mut state = self.record(Call::Delete(id))?;
        match state.patrons.iter().position(|p| p.id == id) {
            Some(pos) => {
                state.patrons.remove(pos);
                Ok(())
            }
            None => Err(ApiError::Status(StatusCode::NOT_FOUND)),
        }
    }

    async fn add_drink(&self, patron_id: PatronId, drink_id: &str) -> Result<(), ApiError> {
        let mut state = self.record(Call::AddDrink(patron_id, drink_id.to_string()))?;
        match state.patrons.iter_mut().find(|p| p.id == patron_id) {
            Some(p) => {
                p.alcohol_saturation_level += Self::DRINK_STEP;
                Ok(())
            }
            None => Err(ApiError::Status(StatusCode::NOT_FOUND)),
        }
    }

    async fn saturation_level(&self, patron_id: PatronId) -> Result<SaturationReading, ApiError> {
        let state = self.record(Call::Saturation(patron_id))?;
        state
            .patrons
            .iter()
            .find(|p| p.id == patron_id)
            .map(|p| SaturationReading {
                alcohol_saturation_level: p.alcohol_saturation_level,
            })
            .ok_or(ApiError::Status(StatusCode::NOT_FOUND))
    }

    async fn default_values(&self) -> Result<PatronDefaults, ApiError> {
        self.record(Call::Defaults)?;
        Ok(PatronDefaults {
            name: "Default Patron".to_string(),
            body_mass: 70.0,
            alcohol_saturation_level: 0.0,
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
