//! The immutable transit network: stops, routes, and directed
//! minute-weighted legs between stops.

pub mod builder;
#[doc(hidden)]
pub mod error;
pub mod item;
pub mod snapshot;


#[doc(inline)]
pub use builder::GraphBuilder;
#[doc(inline)]
pub use error::GraphError;
#[doc(inline)]
pub use item::*;
#[doc(inline)]
pub use snapshot::GraphSnapshot;
