//! Region-level aggregation of shortest-path queries into all-pairs
//! travel-time tables.

pub mod aggregate;
pub mod corridor;
#[doc(hidden)]
pub mod error;
pub mod item;
pub mod region;


#[doc(inline)]
pub use aggregate::{build_matrix, par_build_matrix};
#[doc(inline)]
pub use corridor::{hub_corridors, Corridor, CorridorConfig, HubCorridors};
#[doc(inline)]
pub use error::MatrixError;
#[doc(inline)]
pub use item::{FirstRouteMatrix, MinutesMatrix, RegionMatrix, SquareMatrix};
#[doc(inline)]
pub use region::{Region, RegionId};
