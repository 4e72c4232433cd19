//! Region query client.
//!
//! Issues a single request for the aircraft inside a geographic bounding box
//! and returns either the validated aircraft or a classified [`FetchError`].
//!
//! # Architecture
//!
//! ```text
//! PollingCoordinator
//!     │
//!     └── RegionClient trait → OpenSkyClient (reqwest)
//!             │
//!             └── GET {base_url}/states/all?lamin&lomin&lamax&lomax&extended=1
//!                     │
//!                     └── StatesResponse → parse_states → Vec<AircraftState>
//! ```

mod bounds;
mod client;
mod config;
mod error;

pub use bounds::{BoundingBox, ParseBoundsError};
pub use client::{OpenSkyClient, RegionClient};
pub use config::{Credentials, OpenSkyConfig, DEFAULT_OPENSKY_URL, DEFAULT_TIMEOUT_SECS};
pub use error::FetchError;

#[cfg(test)]
pub use client::tests::MockRegionClient;
