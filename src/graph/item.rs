use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use std::fmt::{Debug, Display, Formatter};

/// Travel time, in whole minutes. Non-negative by construction.
pub type Minutes = u32;

/// Underlying directed multigraph. Parallel legs between the same pair of
/// stops are permitted, e.g. two lines serving the same segment.
pub type GraphStructure = DiGraph<Stop, Leg, u32>;

/// Dense index of a [`Stop`] within one graph snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopIx(pub u32);

/// Dense index of a [`Route`] within one graph snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteIx(pub u32);

impl StopIx {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn node(&self) -> NodeIndex<u32> {
        NodeIndex::new(self.index())
    }
}

impl From<NodeIndex<u32>> for StopIx {
    fn from(value: NodeIndex<u32>) -> Self {
        StopIx(value.index() as u32)
    }
}

impl RouteIx {
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for StopIx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "stop#{}", self.0)
    }
}

impl Display for RouteIx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// A physical transit node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stop {
    /// The identifier given by the upstream feed.
    pub code: String,
    pub name: Option<String>,
    /// Position of the stop, `x` is longitude and `y` is latitude.
    pub position: Point<f64>,
    /// Station complex the stop belongs to, if any. Stops sharing a parent
    /// are typically linked by transfer legs.
    pub parent_station: Option<String>,
}

impl Stop {
    pub fn new(code: impl Into<String>, position: Point<f64>) -> Self {
        Self {
            code: code.into(),
            name: None,
            position,
            parent_station: None,
        }
    }

    /// Creates a stop from a latitude/longitude pair, in that order.
    pub fn at(code: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::new(code, Point::new(lon, lat))
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_parent(self, parent: impl Into<String>) -> Self {
        Self {
            parent_station: Some(parent.into()),
            ..self
        }
    }
}

/// A transit line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub code: String,
    pub short_name: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
}

impl Route {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            short_name: None,
            color: None,
            text_color: None,
        }
    }

    pub fn with_short_name(self, short_name: impl Into<String>) -> Self {
        Self {
            short_name: Some(short_name.into()),
            ..self
        }
    }

    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..self
        }
    }

    /// The name riders know the line by, falling back to the feed code.
    pub fn label(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.code)
    }
}

/// The weight of a directed edge between two stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Leg {
    pub minutes: Minutes,

    /// The route ridden along this leg. `None` marks a transfer
    /// (a walk between platforms of the same station complex).
    pub route: Option<RouteIx>,
}

impl Leg {
    #[inline]
    pub const fn ride(minutes: Minutes, route: RouteIx) -> Self {
        Self {
            minutes,
            route: Some(route),
        }
    }

    #[inline]
    pub const fn transfer(minutes: Minutes) -> Self {
        Self {
            minutes,
            route: None,
        }
    }

    #[inline]
    pub const fn is_transfer(&self) -> bool {
        self.route.is_none()
    }
}

/// Immutable transit network snapshot.
///
/// Built once through a [`GraphBuilder`](crate::graph::GraphBuilder) or a
/// [`GraphSnapshot`](crate::graph::GraphSnapshot), then shared read-only by
/// every query. All query entry points take `&TransitGraph`, so a single
/// graph may be used from many threads at once.
#[derive(Clone)]
pub struct TransitGraph {
    pub(crate) graph: GraphStructure,
    pub(crate) routes: Vec<Route>,
}

impl Debug for TransitGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TransitGraph with Stops: {}, Routes: {}, Legs: {}",
            self.stop_count(),
            self.route_count(),
            self.leg_count()
        )
    }
}

impl TransitGraph {
    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn leg_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn contains_stop(&self, stop: StopIx) -> bool {
        stop.index() < self.stop_count()
    }

    #[inline]
    pub fn stop(&self, stop: StopIx) -> Option<&Stop> {
        self.graph.node_weight(stop.node())
    }

    #[inline]
    pub fn route(&self, route: RouteIx) -> Option<&Route> {
        self.routes.get(route.index())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// All stops, in index order.
    pub fn stops(&self) -> impl Iterator<Item = (StopIx, &Stop)> {
        self.graph
            .node_indices()
            .map(|node| (StopIx::from(node), &self.graph[node]))
    }

    /// Outgoing legs of a stop, as `(target, leg)` pairs.
    ///
    /// Yields nothing for a stop outside the graph.
    #[inline]
    pub fn legs_from(&self, stop: StopIx) -> impl Iterator<Item = (StopIx, &Leg)> {
        let node = self.contains_stop(stop).then(|| stop.node());

        node.into_iter().flat_map(move |node| {
            self.graph
                .edges_directed(node, Direction::Outgoing)
                .map(|edge| (StopIx::from(edge.target()), edge.weight()))
        })
    }

    /// The distinct routes serving a stop, in either direction.
    ///
    /// This is the line-diversity measure used when judging regions.
    pub fn lines_at(&self, stop: StopIx) -> FxHashSet<RouteIx> {
        if !self.contains_stop(stop) {
            return FxHashSet::default();
        }

        let node = stop.node();
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .filter_map(|edge| edge.weight().route)
            .collect()
    }

    /// Returns a copy of the network where every transfer leg costs an
    /// additional `extra` minutes. Ridden legs are unchanged.
    ///
    /// Used to measure how strongly a region's accessibility depends on
    /// changing lines.
    pub fn with_transfer_penalty(&self, extra: Minutes) -> TransitGraph {
        let graph = self.graph.map(
            |_, stop| stop.clone(),
            |_, leg| match leg.route {
                Some(_) => *leg,
                None => Leg::transfer(leg.minutes.saturating_add(extra)),
            },
        );

        TransitGraph {
            graph,
            routes: self.routes.clone(),
        }
    }
}
