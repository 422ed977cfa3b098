use crate::graph::{Minutes, RouteIx};
use crate::matrix::{MatrixError, RegionId};

use serde::Serialize;

/// A square table of optional values, indexed `[origin][destination]` in
/// region order. `None` marks an unreachable pair.
///
/// Travel on a directed network is not symmetric in general, so neither is
/// this table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SquareMatrix<T> {
    rows: Vec<Vec<Option<T>>>,
}

impl<T> Default for SquareMatrix<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

/// Minutes between every ordered pair of regions.
pub type MinutesMatrix = SquareMatrix<Minutes>;

/// First line boarded between every ordered pair of regions.
pub type FirstRouteMatrix = SquareMatrix<RouteIx>;

impl<T: Copy> SquareMatrix<T> {
    /// Wraps the given rows, returning `None` unless every row has exactly
    /// as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<Option<T>>>) -> Option<Self> {
        let size = rows.len();
        rows.iter()
            .all(|row| row.len() == size)
            .then_some(Self { rows })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn get(&self, origin: usize, destination: usize) -> Option<T> {
        self.rows.get(origin)?.get(destination).copied().flatten()
    }

    #[inline]
    pub fn row(&self, origin: usize) -> Option<&[Option<T>]> {
        self.rows.get(origin).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<T>]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// The values of one destination column, top to bottom.
    pub fn column(&self, destination: usize) -> impl Iterator<Item = Option<T>> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(destination).copied().flatten())
    }
}

impl<T: Copy + PartialEq> SquareMatrix<T> {
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|i| (i + 1..self.len()).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

/// The all-regions travel-time tables.
///
/// Row and column `i` of both matrices belong to `regions[i]`. Regions that
/// could not be placed on the graph are absent from the tables and listed in
/// [`excluded`](#field.excluded) instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegionMatrix {
    pub regions: Vec<RegionId>,
    pub minutes: MinutesMatrix,
    pub first_route: FirstRouteMatrix,
    pub excluded: Vec<MatrixError>,
}

impl RegionMatrix {
    /// Position of a region within the tables, if it was included.
    pub fn index_of(&self, region: &RegionId) -> Option<usize> {
        self.regions.iter().position(|id| id == region)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
