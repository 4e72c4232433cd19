//! Aircraft state record.

use std::fmt;

/// A WGS-84 position in decimal degrees.
///
/// Always carries both coordinates; a record without a usable position
/// has no `Position` at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// State of a single aircraft as observed in the most recent fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    /// ICAO 24-bit transponder address (hex string). Identity of the record.
    pub transponder_id: String,

    /// Callsign as reported; the upstream pads it with trailing spaces.
    pub callsign: Option<String>,

    /// Country inferred from the transponder address allocation.
    pub origin_country: String,

    /// Last known position, if a valid position report exists.
    pub position: Option<Position>,

    /// Barometric altitude in meters.
    pub altitude_m: Option<f64>,

    /// Ground speed in meters per second.
    pub velocity_mps: Option<f64>,

    /// True track in degrees clockwise from north.
    pub heading_deg: Option<f64>,

    /// Whether the last position came from a surface position report.
    pub on_ground: bool,
}

impl AircraftState {
    /// Create a record with only the required fields set.
    pub fn new(transponder_id: impl Into<String>, origin_country: impl Into<String>) -> Self {
        Self {
            transponder_id: transponder_id.into(),
            callsign: None,
            origin_country: origin_country.into(),
            position: None,
            altitude_m: None,
            velocity_mps: None,
            heading_deg: None,
            on_ground: false,
        }
    }

    /// Set the callsign.
    pub fn with_callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = Some(callsign.into());
        self
    }

    /// Set the position.
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Some(Position::new(latitude, longitude));
        self
    }

    /// Label for display: the trimmed callsign, or the transponder id when
    /// the callsign is missing or blank.
    pub fn display_name(&self) -> &str {
        self.callsign
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.transponder_id)
    }

    /// Whether this record can be placed on a map.
    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_trimmed_callsign() {
        let state = AircraftState::new("4b1805", "Switzerland").with_callsign("SWR123  ");
        assert_eq!(state.display_name(), "SWR123");
    }

    #[test]
    fn test_display_name_falls_back_to_transponder_id() {
        let state = AircraftState::new("4b1805", "Switzerland");
        assert_eq!(state.display_name(), "4b1805");

        let blank = AircraftState::new("4b1805", "Switzerland").with_callsign("        ");
        assert_eq!(blank.display_name(), "4b1805");
    }

    #[test]
    fn test_new_defaults() {
        let state = AircraftState::new("abc123", "Turkey");
        assert!(!state.on_ground);
        assert!(!state.has_position());
        assert!(state.altitude_m.is_none());
    }

    #[test]
    fn test_position_display() {
        let pos = Position::new(41.0082, 28.9784);
        assert_eq!(pos.to_string(), "41.0082, 28.9784");
    }
}
