//! Per-region accessibility scores derived from a [`RegionMatrix`](crate::RegionMatrix).

pub mod hub;
pub mod score;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use hub::{best_hub_in_bounds, nearest_region, resolve_hubs, HubAnchor, ResolvedHub};
#[doc(inline)]
pub use score::{
    raw_values, score_by_hub, score_harmonic, score_median_minutes, score_transfer_penalized,
    CentralityMetric, CentralityScore, DEFAULT_TRANSFER_PENALTY,
};
