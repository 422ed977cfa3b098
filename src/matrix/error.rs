use crate::graph::StopIx;
use crate::matrix::RegionId;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatrixError {
    /// The region has no nearest stop, or names one outside the graph.
    #[error("region {region} has no resolvable stop (given {stop:?})")]
    MissingStopReference {
        region: RegionId,
        stop: Option<StopIx>,
    },
}
