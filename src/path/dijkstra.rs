use crate::graph::{Minutes, StopIx, TransitGraph};
use crate::path::{PathError, ShortestPathResult};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Heap entry. Ordered so that [`BinaryHeap`] pops the smallest running
/// distance first, and among equal distances the lowest stop index.
#[derive(Debug)]
struct SmallestHolder {
    cost: Minutes,
    stop: StopIx,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.stop == other.stop
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.stop.cmp(&self.stop))
    }
}

/// Single-source shortest travel times from `origin` to every stop.
///
/// Besides distance and predecessor, each relaxation records the route of
/// the leg used (`prev_route`) and the first route boarded since leaving the
/// origin (`first_route`). A path that starts with transfers keeps
/// `first_route` unset until a ridden leg is taken.
///
/// Stops that cannot be reached keep a distance of `None`. Disconnected and
/// empty graphs are not errors; only an origin outside the graph is.
///
/// Equal-distance entries are settled lowest stop index first, and a stop's
/// predecessor only changes on a strict improvement, so the result is fully
/// determined by the graph and origin.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(graph), level = Level::DEBUG))]
pub fn shortest_paths(
    graph: &TransitGraph,
    origin: StopIx,
) -> Result<ShortestPathResult, PathError> {
    if !graph.contains_stop(origin) {
        return Err(PathError::InvalidOrigin(origin));
    }

    let mut result = ShortestPathResult::unreached(origin, graph.stop_count());
    result.dist[origin.index()] = Some(0);

    let mut to_see: BinaryHeap<SmallestHolder> = BinaryHeap::with_capacity(256);
    to_see.push(SmallestHolder {
        cost: 0,
        stop: origin,
    });

    while let Some(SmallestHolder { cost, stop }) = to_see.pop() {
        // Stale entry, a shorter distance was recorded after this push.
        if result.dist[stop.index()].is_some_and(|settled| cost > settled) {
            continue;
        }

        let inherited = result.first_route[stop.index()];

        for (next, leg) in graph.legs_from(stop) {
            let candidate = cost.saturating_add(leg.minutes);
            let slot = next.index();

            if result.dist[slot].is_some_and(|known| known <= candidate) {
                continue;
            }

            result.dist[slot] = Some(candidate);
            result.prev[slot] = Some(stop);
            result.prev_route[slot] = leg.route;
            result.first_route[slot] = inherited.or(leg.route);

            to_see.push(SmallestHolder {
                cost: candidate,
                stop: next,
            });
        }
    }

    Ok(result)
}
