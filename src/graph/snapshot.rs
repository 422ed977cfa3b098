//! Deserialisation of the stop-level graph payload written by the upstream
//! feed builder.
//!
//! ```json
//! {
//!   "stops": [{ "id": "A", "name": "Stop A", "lat": 40.70, "lon": -73.99, "parent_station": null }],
//!   "routes": [{ "id": "R", "short_name": "Q", "color": "FCCC0A", "text_color": "000000" }],
//!   "edges": [[0, 1, 4, 0], [1, 0, 2, null]],
//!   "neighborhoods": [{ "id": "bk01", "name": "Greenpoint", "borough": "Brooklyn",
//!                       "centroid": [40.73, -73.95], "stop_index": 0 }]
//! }
//! ```
//!
//! Edges are `[from, to, minutes, route | null]`; a null route is a transfer.

use crate::graph::{GraphBuilder, Minutes, Route, RouteIx, Stop, StopIx, TransitGraph};
use crate::matrix::Region;

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub stops: Vec<SnapshotStop>,
    #[serde(default)]
    pub routes: Vec<SnapshotRoute>,
    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
    #[serde(default, alias = "regions")]
    pub neighborhoods: Vec<SnapshotRegion>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotStop {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub parent_station: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotRoute {
    pub id: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

/// `[from, to, minutes, route]`
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotEdge(pub u32, pub u32, pub Minutes, pub Option<u32>);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotRegion {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub borough: Option<String>,
    /// `[lat, lon]`
    #[serde(default)]
    pub centroid: Option<[f64; 2]>,
    #[serde(default)]
    pub stop_index: Option<u32>,
    #[serde(default)]
    pub walk_minutes: Option<f64>,
}

impl GraphSnapshot {
    pub fn from_json(payload: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Builds the immutable graph and region list described by the payload.
    ///
    /// Edges referencing unknown stops or routes are rejected. Regions are
    /// passed through as-is; one whose `stop_index` does not resolve is
    /// reported later by the matrix build rather than dropped here.
    pub fn into_parts(self) -> crate::Result<(TransitGraph, Vec<Region>)> {
        let mut builder = GraphBuilder::with_capacity(self.stops.len(), self.edges.len());

        for stop in self.stops {
            let mut entry = Stop::at(stop.id, stop.lat, stop.lon);
            entry.name = stop.name;
            entry.parent_station = stop.parent_station;
            builder.add_stop(entry);
        }

        for route in self.routes {
            builder.add_route(Route {
                code: route.id,
                short_name: route.short_name,
                color: route.color,
                text_color: route.text_color,
            });
        }

        for SnapshotEdge(from, to, minutes, route) in self.edges {
            builder.add_leg(StopIx(from), StopIx(to), minutes, route.map(RouteIx))?;
        }

        let graph = builder.build();

        let regions = self
            .neighborhoods
            .into_iter()
            .map(|region| {
                let mut entry = Region::new(region.id, region.name);
                entry.borough = region.borough.filter(|b| !b.trim().is_empty());
                entry.centroid = region.centroid.map(|[lat, lon]| geo::Point::new(lon, lat));
                entry.stop = region.stop_index.map(StopIx);
                entry.walk_minutes = region.walk_minutes;
                entry
            })
            .collect::<Vec<_>>();

        info!("Loaded snapshot: {graph:?}, Regions: {}", regions.len());
        Ok((graph, regions))
    }
}
