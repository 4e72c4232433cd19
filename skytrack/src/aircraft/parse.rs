//! Transformation of raw `states/all` rows into [`AircraftState`] records.

use serde::Deserialize;
use serde_json::Value;

use super::state::{AircraftState, Position};

/// Minimum number of columns a row must carry to be considered at all.
pub const MIN_COLUMNS: usize = 8;

const COL_ICAO24: usize = 0;
const COL_CALLSIGN: usize = 1;
const COL_ORIGIN_COUNTRY: usize = 2;
const COL_LONGITUDE: usize = 5;
const COL_LATITUDE: usize = 6;
const COL_BARO_ALTITUDE: usize = 7;
const COL_ON_GROUND: usize = 8;
const COL_VELOCITY: usize = 9;
const COL_TRUE_TRACK: usize = 10;

/// Body of a `states/all` response.
///
/// Rows are kept as raw JSON values so that a single malformed row cannot
/// fail the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatesResponse {
    /// Upstream timestamp (unix seconds) the states are associated with.
    #[serde(default)]
    pub time: i64,

    /// Positional state rows. The upstream sends `null` when the box is empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub states: Vec<Value>,
}

impl StatesResponse {
    /// Validated aircraft in upstream order.
    pub fn aircraft(&self) -> Vec<AircraftState> {
        parse_states(&self.states)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Transform raw rows into aircraft states.
///
/// Output order matches input order. Duplicate transponder ids are kept.
/// Invalid rows are skipped; this never fails.
pub fn parse_states(rows: &[Value]) -> Vec<AircraftState> {
    let aircraft: Vec<AircraftState> = rows.iter().filter_map(parse_row).collect();

    if aircraft.len() != rows.len() {
        tracing::trace!(
            rows = rows.len(),
            accepted = aircraft.len(),
            "Discarded invalid state rows"
        );
    }

    aircraft
}

fn parse_row(row: &Value) -> Option<AircraftState> {
    let columns = row.as_array()?;
    if columns.len() < MIN_COLUMNS {
        return None;
    }

    let transponder_id = string_at(columns, COL_ICAO24).filter(|id| !id.is_empty())?;
    let origin_country = string_at(columns, COL_ORIGIN_COUNTRY)?;

    let position = match (
        number_at(columns, COL_LATITUDE),
        number_at(columns, COL_LONGITUDE),
    ) {
        (Some(latitude), Some(longitude)) => Some(Position::new(latitude, longitude)),
        _ => None,
    };

    Some(AircraftState {
        transponder_id: transponder_id.to_string(),
        callsign: string_at(columns, COL_CALLSIGN).map(str::to_string),
        origin_country: origin_country.to_string(),
        position,
        altitude_m: number_at(columns, COL_BARO_ALTITUDE),
        velocity_mps: number_at(columns, COL_VELOCITY),
        heading_deg: number_at(columns, COL_TRUE_TRACK),
        on_ground: columns
            .get(COL_ON_GROUND)
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn string_at(columns: &[Value], index: usize) -> Option<&str> {
    columns.get(index).and_then(Value::as_str)
}

fn number_at(columns: &[Value], index: usize) -> Option<f64> {
    columns.get(index).and_then(Value::as_f64)
}
