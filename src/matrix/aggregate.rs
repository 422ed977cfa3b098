use crate::graph::{Minutes, RouteIx, StopIx, TransitGraph};
use crate::matrix::{MatrixError, Region, RegionId, RegionMatrix, SquareMatrix};
use crate::path::shortest_paths;

use log::{info, warn};
use measure_time::debug_time;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
#[cfg(feature = "tracing")]
use tracing::Level;

type MatrixRow = (Vec<Option<Minutes>>, Vec<Option<RouteIx>>);

/// Builds the all-regions minutes and first-route tables.
///
/// Runs one [`shortest_paths`] query per region, from its nearest stop, and
/// reads every other region's stop from the result. Regions without a
/// resolvable stop are left out of both tables and reported in
/// [`RegionMatrix::excluded`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
pub fn build_matrix(graph: &TransitGraph, regions: &[Region]) -> RegionMatrix {
    debug_time!("build_matrix ({} regions)", regions.len());

    let (included, excluded) = partition(graph, regions);
    let rows = included
        .iter()
        .map(|(_, origin)| row(graph, *origin, &included))
        .collect::<Vec<_>>();

    assemble(included, excluded, rows)
}

/// Parallel form of [`build_matrix`], with one rayon task per origin region.
///
/// Each task reads the shared graph and writes only its own row, so the
/// output is identical to the sequential build.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
pub fn par_build_matrix(graph: &TransitGraph, regions: &[Region]) -> RegionMatrix {
    debug_time!("par_build_matrix ({} regions)", regions.len());

    let (included, excluded) = partition(graph, regions);
    let rows = included
        .par_iter()
        .map(|(_, origin)| row(graph, *origin, &included))
        .collect::<Vec<_>>();

    assemble(included, excluded, rows)
}

/// Splits regions into those that resolve to a stop in `graph`, in their
/// given order, and those that do not.
fn partition(
    graph: &TransitGraph,
    regions: &[Region],
) -> (Vec<(RegionId, StopIx)>, Vec<MatrixError>) {
    let mut included = Vec::with_capacity(regions.len());
    let mut excluded = Vec::new();

    for region in regions {
        match region.stop.filter(|stop| graph.contains_stop(*stop)) {
            Some(stop) => included.push((region.id.clone(), stop)),
            None => {
                warn!(
                    "Excluding region {} from matrix, stop {:?} does not resolve",
                    region.id, region.stop
                );

                excluded.push(MatrixError::MissingStopReference {
                    region: region.id.clone(),
                    stop: region.stop,
                });
            }
        }
    }

    (included, excluded)
}

fn row(graph: &TransitGraph, origin: StopIx, targets: &[(RegionId, StopIx)]) -> MatrixRow {
    // Origins come out of `partition`, which only admits stops in the graph.
    let Ok(result) = shortest_paths(graph, origin) else {
        return (vec![None; targets.len()], vec![None; targets.len()]);
    };

    targets
        .iter()
        .map(|(_, stop)| (result.distance(*stop), result.first_route_to(*stop)))
        .unzip()
}

fn assemble(
    included: Vec<(RegionId, StopIx)>,
    excluded: Vec<MatrixError>,
    rows: Vec<MatrixRow>,
) -> RegionMatrix {
    let (minutes, first_route): (Vec<_>, Vec<_>) = rows.into_iter().unzip();

    info!(
        "Built {n}x{n} matrix, {} regions excluded",
        excluded.len(),
        n = included.len()
    );

    RegionMatrix {
        regions: included.into_iter().map(|(id, _)| id).collect(),
        minutes: SquareMatrix::from_rows(minutes).unwrap_or_default(),
        first_route: SquareMatrix::from_rows(first_route).unwrap_or_default(),
        excluded,
    }
}
