//! Observable view state.
//!
//! A single snapshot replaced through `watch::Sender::send_modify`, so
//! readers never observe a partial update.

use chrono::{DateTime, Utc};

use crate::aircraft::AircraftState;
use crate::region::{BoundingBox, FetchError};

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Aircraft from the last successful fetch, in upstream order.
    pub aircraft: Vec<AircraftState>,

    /// Copy of the selected element of `aircraft`, if any.
    pub selected: Option<AircraftState>,

    /// True strictly between fetch dispatch and resolution.
    pub is_loading: bool,

    /// User-facing message from the most recent failed fetch.
    pub last_error: Option<String>,

    /// Region of the most recently dispatched fetch.
    pub bounds: Option<BoundingBox>,

    /// Wall-clock time of the last successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
}

impl ViewState {
    /// First aircraft with the given transponder id.
    pub fn find(&self, transponder_id: &str) -> Option<&AircraftState> {
        self.aircraft
            .iter()
            .find(|a| a.transponder_id == transponder_id)
    }

    /// Aircraft that can be placed on the map.
    pub fn positioned(&self) -> impl Iterator<Item = &AircraftState> {
        self.aircraft.iter().filter(|a| a.has_position())
    }

    /// Mark a fetch as dispatched.
    pub(crate) fn begin_fetch(&mut self, bounds: BoundingBox) {
        self.is_loading = true;
        self.last_error = None;
        self.bounds = Some(bounds);
    }

    /// Replace the aircraft set and re-resolve the selection against it.
    pub(crate) fn apply_success(&mut self, aircraft: Vec<AircraftState>, now: DateTime<Utc>) {
        self.aircraft = aircraft;
        self.is_loading = false;
        self.last_error = None;
        self.last_updated = Some(now);

        if let Some(selected) = self.selected.take() {
            self.selected = self.find(&selected.transponder_id).cloned();
        }
    }

    /// Keep the last-known-good aircraft and surface the error.
    pub(crate) fn apply_failure(&mut self, error: &FetchError) {
        self.is_loading = false;
        self.last_error = Some(error.user_message());
    }

    /// Select an aircraft by transponder id. Returns whether the selection changed.
    pub(crate) fn select(&mut self, transponder_id: Option<&str>) -> bool {
        let selected = transponder_id.and_then(|id| self.find(id).cloned());
        if selected == self.selected {
            return false;
        }
        self.selected = selected;
        true
    }
}
