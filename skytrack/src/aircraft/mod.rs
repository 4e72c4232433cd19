//! Aircraft state model.
//!
//! The upstream `states/all` endpoint returns aircraft as positional rows of
//! loosely-typed JSON values. This module turns those rows into validated
//! [`AircraftState`] records.
//!
//! # Row Layout
//!
//! ```text
//! index:  0      1         2        3  4  5          6         7         8          9         10
//! field:  icao24 callsign  country  -  -  longitude  latitude  altitude  on_ground  velocity  true_track
//! ```
//!
//! Rows missing the transponder id or origin country are dropped. Any other
//! mistyped field is treated as absent and the row is kept.

mod parse;
mod state;

pub use parse::{parse_states, StatesResponse, MIN_COLUMNS};
pub use state::{AircraftState, Position};
