use crate::graph::StopIx;

use geo::Point;
use serde::{Deserialize, Serialize};

use std::fmt::{Display, Formatter};

/// Identifier of a [`Region`], as given by the upstream boundary dataset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        RegionId(value.to_string())
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        RegionId(value)
    }
}

/// A geographic area, represented in every graph query by one stop.
///
/// The nearest-stop assignment is made once, upstream, and carried here as
/// [`stop`](#field.stop). A region without a resolvable stop cannot take part
/// in the travel-time matrix and is reported as excluded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub borough: Option<String>,

    /// Representative point, `x` is longitude and `y` is latitude.
    pub centroid: Option<Point<f64>>,

    /// The stop nearest the centroid.
    pub stop: Option<StopIx>,

    /// Walking time from the centroid to [`stop`](#field.stop).
    pub walk_minutes: Option<f64>,
}

impl Region {
    pub fn new(id: impl Into<RegionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            borough: None,
            centroid: None,
            stop: None,
            walk_minutes: None,
        }
    }

    pub fn with_borough(self, borough: impl Into<String>) -> Self {
        Self {
            borough: Some(borough.into()),
            ..self
        }
    }

    /// Sets the centroid from a latitude/longitude pair, in that order.
    pub fn with_centroid(self, lat: f64, lon: f64) -> Self {
        Self {
            centroid: Some(Point::new(lon, lat)),
            ..self
        }
    }

    pub fn with_stop(self, stop: StopIx) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }

    pub fn with_walk_minutes(self, minutes: f64) -> Self {
        Self {
            walk_minutes: Some(minutes),
            ..self
        }
    }
}
