use crate::graph::{GraphError, GraphStructure, Leg, Minutes, Route, RouteIx, Stop, StopIx, TransitGraph};

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

/// Incrementally assembles a [`TransitGraph`].
///
/// Stops and routes receive dense indices in insertion order. Legs are
/// validated against the stops and routes added so far, so malformed input
/// is rejected at the boundary rather than surfacing during a query.
///
/// ```rust
/// use commute::graph::{GraphBuilder, Route, Stop};
///
/// let mut builder = GraphBuilder::default();
/// let a = builder.add_stop(Stop::at("A", 0.0, 0.0));
/// let b = builder.add_stop(Stop::at("B", 0.0, 1.0));
/// let r1 = builder.add_route(Route::new("R1"));
///
/// builder.add_leg(a, b, 10, Some(r1)).unwrap();
/// let graph = builder.build();
///
/// assert_eq!(graph.leg_count(), 1);
/// ```
#[derive(Default)]
pub struct GraphBuilder {
    graph: GraphStructure,
    routes: Vec<Route>,
}

impl GraphBuilder {
    pub fn with_capacity(stops: usize, legs: usize) -> Self {
        Self {
            graph: GraphStructure::with_capacity(stops, legs),
            routes: Vec::new(),
        }
    }

    pub fn add_stop(&mut self, stop: Stop) -> StopIx {
        StopIx::from(self.graph.add_node(stop))
    }

    pub fn add_route(&mut self, route: Route) -> RouteIx {
        let index = RouteIx(self.routes.len() as u32);
        self.routes.push(route);
        index
    }

    /// Adds a directed leg. A `route` of `None` makes it a transfer.
    pub fn add_leg(
        &mut self,
        from: StopIx,
        to: StopIx,
        minutes: Minutes,
        route: Option<RouteIx>,
    ) -> Result<&mut Self, GraphError> {
        self.check_stop(from)?;
        self.check_stop(to)?;

        if let Some(route) = route {
            if route.index() >= self.routes.len() {
                return Err(GraphError::UnknownRoute(route));
            }
        }

        self.graph
            .add_edge(from.node(), to.node(), Leg { minutes, route });

        Ok(self)
    }

    #[inline]
    pub fn add_transfer(
        &mut self,
        from: StopIx,
        to: StopIx,
        minutes: Minutes,
    ) -> Result<&mut Self, GraphError> {
        self.add_leg(from, to, minutes, None)
    }

    /// Links every ordered pair of distinct stops within one station complex
    /// with a transfer leg of `minutes`.
    pub fn add_station_complex(
        &mut self,
        stops: &[StopIx],
        minutes: Minutes,
    ) -> Result<&mut Self, GraphError> {
        for stop in stops {
            self.check_stop(*stop)?;
        }

        for (i, from) in stops.iter().enumerate() {
            for (j, to) in stops.iter().enumerate() {
                if i != j {
                    self.add_transfer(*from, *to, minutes)?;
                }
            }
        }

        Ok(self)
    }

    /// Groups stops by their `parent_station` and links each group through
    /// [`add_station_complex`](Self::add_station_complex). Groups of fewer
    /// than two stops are skipped.
    ///
    /// Complexes are linked in ascending `parent_station` order, members in
    /// stop index order, so the resulting legs do not depend on hashing.
    pub fn link_station_complexes(&mut self, minutes: Minutes) -> Result<&mut Self, GraphError> {
        let mut complexes: FxHashMap<String, Vec<StopIx>> = FxHashMap::default();

        for node in self.graph.node_indices() {
            if let Some(parent) = &self.graph[node].parent_station {
                complexes
                    .entry(parent.clone())
                    .or_default()
                    .push(StopIx::from(node));
            }
        }

        let linked = complexes
            .into_iter()
            .filter(|(_, members)| members.len() >= 2)
            .sorted_unstable_by(|(a, _), (b, _)| a.cmp(b));

        for (parent, members) in linked {
            debug!("Linking {} stops in complex {parent}", members.len());
            self.add_station_complex(&members, minutes)?;
        }

        Ok(self)
    }

    pub fn build(self) -> TransitGraph {
        debug!(
            "Built graph with {} stops, {} routes, {} legs",
            self.graph.node_count(),
            self.routes.len(),
            self.graph.edge_count()
        );

        TransitGraph {
            graph: self.graph,
            routes: self.routes,
        }
    }

    #[inline]
    fn check_stop(&self, stop: StopIx) -> Result<(), GraphError> {
        if stop.index() < self.graph.node_count() {
            Ok(())
        } else {
            Err(GraphError::UnknownStop(stop))
        }
    }
}
