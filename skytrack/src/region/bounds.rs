//! Geographic bounding box used as the query region.

use std::fmt;
use std::str::FromStr;

use crate::aircraft::Position;

/// Rectangular region defined by min/max latitude and longitude.
///
/// No normalization is performed. Callers (the viewport) are expected to
/// supply `min <= max` on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Istanbul metropolitan area, the region shown before any viewport is known.
    pub const ISTANBUL: BoundingBox = BoundingBox {
        min_latitude: 40.226013967,
        min_longitude: 27.3445316488,
        max_latitude: 41.6004635693,
        max_longitude: 30.7411966586,
    };

    /// Create a new bounding box.
    pub fn new(
        min_latitude: f64,
        min_longitude: f64,
        max_latitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            min_longitude,
            max_latitude,
            max_longitude,
        }
    }

    /// Whether the position lies inside the box (edges inclusive).
    pub fn contains(&self, position: Position) -> bool {
        position.latitude >= self.min_latitude
            && position.latitude <= self.max_latitude
            && position.longitude >= self.min_longitude
            && position.longitude <= self.max_longitude
    }

    /// Center of the box.
    pub fn center(&self) -> Position {
        Position::new(
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    /// Query parameters understood by the `states/all` endpoint.
    pub(crate) fn query_params(&self) -> [(&'static str, f64); 4] {
        [
            ("lamin", self.min_latitude),
            ("lomin", self.min_longitude),
            ("lamax", self.max_latitude),
            ("lomax", self.max_longitude),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::ISTANBUL
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_latitude, self.min_longitude, self.max_latitude, self.max_longitude
        )
    }
}

/// Error parsing a bounding box from `min_lat,min_lon,max_lat,max_lon`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bounding box '{0}': expected 'min_lat,min_lon,max_lat,max_lon'")]
pub struct ParseBoundsError(String);

impl FromStr for BoundingBox {
    type Err = ParseBoundsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseBoundsError(s.to_string()))?;

        match values.as_slice() {
            [min_lat, min_lon, max_lat, max_lon] => {
                Ok(BoundingBox::new(*min_lat, *min_lon, *max_lat, *max_lon))
            }
            _ => Err(ParseBoundsError(s.to_string())),
        }
    }
}
