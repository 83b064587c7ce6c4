use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ScoutError;

/// A latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geographic filter sent with the markers request: one closed ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    ring: Vec<LatLng>,
}

/// Preset search areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Region {
    #[default]
    #[value(name = "cz")]
    Czechia,
    #[value(name = "sk")]
    Slovakia,
}

impl Region {
    pub fn boundary(self) -> Boundary {
        match self {
            Region::Czechia => Boundary::czechia(),
            Region::Slovakia => Boundary::slovakia(),
        }
    }
}

impl Boundary {
    /// Build a ring from `points`, closing it if the last point is not the first.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::InvalidBoundary`] if fewer than three distinct
    /// corners are given.
    pub fn new(mut points: Vec<LatLng>) -> Result<Self, ScoutError> {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if first != last {
                points.push(first);
            }
        }

        // closing point excluded
        let corners = points.len().saturating_sub(1);
        if corners < 3 {
            return Err(ScoutError::InvalidBoundary {
                reason: format!("a ring needs at least 3 corners, got {corners}"),
            });
        }

        Ok(Self { ring: points })
    }

    /// Rough outline of the Czech Republic
    pub fn czechia() -> Self {
        Self {
            ring: vec![
                LatLng::new(50.0, 11.0),
                LatLng::new(51.0, 15.0),
                LatLng::new(49.0, 19.0),
                LatLng::new(47.0, 14.0),
                LatLng::new(50.0, 11.0),
            ],
        }
    }

    /// Rough outline of Slovakia
    pub fn slovakia() -> Self {
        Self {
            ring: vec![
                LatLng::new(49.0, 19.0),
                LatLng::new(48.0, 23.0),
                LatLng::new(47.0, 19.0),
                LatLng::new(48.0, 16.0),
                LatLng::new(49.0, 19.0),
            ],
        }
    }

    pub fn ring(&self) -> &[LatLng] {
        &self.ring
    }

    /// Encode as the `boundary` query value: `[[[{"lat":50,"lng":11},...]]]`.
    pub fn to_query_value(&self) -> String {
        let ring: Vec<Value> = self
            .ring
            .iter()
            .map(|p| json!({ "lat": coordinate(p.lat), "lng": coordinate(p.lng) }))
            .collect();
        json!([[ring]]).to_string()
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::czechia()
    }
}

/// Whole-degree coordinates are sent without a fractional part.
fn coordinate(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= i32::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
