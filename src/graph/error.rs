use crate::graph::{RouteIx, StopIx};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("leg references {0}, which is not in the graph")]
    UnknownStop(StopIx),

    #[error("leg references {0}, which is not in the route table")]
    UnknownRoute(RouteIx),
}
