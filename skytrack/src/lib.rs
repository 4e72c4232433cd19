//! SkyTrack - live aircraft positions for a map viewport
//!
//! This library keeps an in-memory set of aircraft states in sync with the
//! OpenSky Network for a geographic bounding box. It is split into:
//!
//! - [`aircraft`] - validated aircraft records and payload transformation
//! - [`region`] - bounding boxes and the region query client
//! - [`coordinator`] - polling cadence, single-flight fetches and the observable view state
//! - [`config`] - the `config.ini` file
//! - [`logging`] - tracing subscriber setup for binaries

pub mod aircraft;
pub mod config;
pub mod coordinator;
pub mod logging;
pub mod region;
