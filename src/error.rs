//! Crate-level error type.
//!
//! Each module raises its own narrow error enum; they are lifted into
//! [`Error`] through [`impl_err!`](crate::impl_err) so callers composing
//! several stages can use a single `?`-friendly type.
//!
//! Expected missing data (unreachable stops, degenerate normalisation
//! ranges, empty candidate pools) is never an error; those cases are
//! encoded as `None` or as disqualification reasons.

use crate::graph::GraphError;
use crate::impl_err;
use crate::matrix::MatrixError;
use crate::path::PathError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("graph construction failed: {0}")]
    Graph(GraphError),

    #[error("shortest path query failed: {0}")]
    Path(PathError),

    #[error("matrix aggregation failed: {0}")]
    Matrix(MatrixError),

    #[error("malformed json input: {0}")]
    Json(serde_json::Error),
}

impl_err!(GraphError, Graph);
impl_err!(PathError, Path);
impl_err!(MatrixError, Matrix);
impl_err!(serde_json::Error, Json);
