use crate::graph::{Minutes, RouteIx, StopIx};

use itertools::Itertools;
use serde::Serialize;

/// Output of [`shortest_paths`](crate::path::shortest_paths), keyed by
/// stop index.
///
/// The four vectors are parallel and always have one slot per stop in the
/// graph the query ran against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShortestPathResult {
    pub origin: StopIx,

    /// Minutes from the origin, `None` when unreachable.
    pub dist: Vec<Option<Minutes>>,

    /// The stop each stop was reached from on its shortest path.
    pub prev: Vec<Option<StopIx>>,

    /// The route of the leg into each stop, `None` if that leg was a transfer
    /// (or the stop is the origin, or unreachable).
    pub prev_route: Vec<Option<RouteIx>>,

    /// The first route boarded on the way to each stop.
    pub first_route: Vec<Option<RouteIx>>,
}

impl ShortestPathResult {
    pub(crate) fn unreached(origin: StopIx, stops: usize) -> Self {
        Self {
            origin,
            dist: vec![None; stops],
            prev: vec![None; stops],
            prev_route: vec![None; stops],
            first_route: vec![None; stops],
        }
    }

    #[inline]
    pub fn distance(&self, stop: StopIx) -> Option<Minutes> {
        self.dist.get(stop.index()).copied().flatten()
    }

    #[inline]
    pub fn first_route_to(&self, stop: StopIx) -> Option<RouteIx> {
        self.first_route.get(stop.index()).copied().flatten()
    }

    #[inline]
    pub fn is_reachable(&self, stop: StopIx) -> bool {
        self.distance(stop).is_some()
    }

    /// Number of stops with a finite distance, the origin included.
    pub fn reachable(&self) -> usize {
        self.dist.iter().flatten().count()
    }

    /// The stops on the shortest path from the origin to `stop`, both ends
    /// included. `None` when `stop` is unreachable.
    pub fn path_to(&self, stop: StopIx) -> Option<Vec<StopIx>> {
        self.distance(stop)?;

        let mut path = vec![stop];
        let mut cursor = stop;

        // A predecessor chain never revisits a stop, so it is bounded by the
        // stop count.
        for _ in 0..self.dist.len() {
            if cursor == self.origin {
                path.reverse();
                return Some(path);
            }

            cursor = self.prev.get(cursor.index()).copied().flatten()?;
            path.push(cursor);
        }

        None
    }

    /// The routes ridden on the way to `stop`, in boarding order. Transfer
    /// legs are skipped and consecutive legs on one route count once.
    pub fn boardings(&self, stop: StopIx) -> Option<Vec<RouteIx>> {
        let path = self.path_to(stop)?;

        let routes = path
            .iter()
            .skip(1)
            .filter_map(|stop| self.prev_route[stop.index()])
            .dedup()
            .collect();

        Some(routes)
    }

    /// Number of line changes on the way to `stop`.
    pub fn transfers(&self, stop: StopIx) -> Option<usize> {
        self.boardings(stop)
            .map(|routes| routes.len().saturating_sub(1))
    }
}
