#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod centrality;
pub mod decision;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod path;
pub mod util;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use graph::{GraphBuilder, GraphSnapshot, Leg, Minutes, Route, RouteIx, Stop, StopIx, TransitGraph};
#[doc(inline)]
pub use matrix::{build_matrix, par_build_matrix, Region, RegionId, RegionMatrix};
#[doc(inline)]
pub use path::{shortest_paths, ShortestPathResult};
#[doc(inline)]
pub use decision::{judge, DecisionConfig, JudgeEntry, Verdict};
#[doc(inline)]
pub use centrality::CentralityScore;
