//! Single-source shortest travel times over a [`TransitGraph`](crate::graph::TransitGraph),
//! with boarded-line attribution.

pub mod dijkstra;
pub mod result;


#[doc(inline)]
pub use dijkstra::shortest_paths;
#[doc(inline)]
pub use result::ShortestPathResult;

use crate::graph::StopIx;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("origin {0} is not in the graph")]
    InvalidOrigin(StopIx),
}
