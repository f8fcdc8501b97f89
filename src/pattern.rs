use glam::IVec2;
use smallvec::SmallVec;

use crate::error::{PathResult, PathfindError};
use crate::N_SMALLVEC_SIZE;

/// Ordered relative offsets an agent may move by in a single step. The order is significant: it
/// decides which of several equally cheap nodes is discovered, and therefore expanded, first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<IVec2>", into = "Vec<IVec2>"))]
pub struct NeighborPattern {
    offsets: SmallVec<[IVec2; N_SMALLVEC_SIZE]>,
}

impl NeighborPattern {
    /// Builds a pattern from arbitrary offsets. The zero offset is the agent itself and is dropped.
    pub fn new<I>(offsets: I) -> NeighborPattern
    where
        I: IntoIterator<Item = IVec2>,
    {
        NeighborPattern {
            offsets: offsets.into_iter().filter(|o| *o != IVec2::ZERO).collect(),
        }
    }

    fn from_pairs(pairs: &[(i32, i32)]) -> NeighborPattern {
        NeighborPattern::new(pairs.iter().map(|&(x, y)| IVec2::new(x, y)))
    }

    pub fn rook() -> NeighborPattern {
        NeighborPattern::from_pairs(&[(1, 0), (0, 1), (-1, 0), (0, -1)])
    }

    pub fn bishop() -> NeighborPattern {
        NeighborPattern::from_pairs(&[(1, 1), (1, -1), (-1, 1), (-1, -1)])
    }

    pub fn knight() -> NeighborPattern {
        NeighborPattern::from_pairs(&[
            (2, 1),
            (-2, 1),
            (2, -1),
            (-2, -1),
            (1, 2),
            (-1, 2),
            (1, -2),
            (-1, -2),
        ])
    }

    pub fn king() -> NeighborPattern {
        NeighborPattern::from_pairs(&[
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
        ])
    }

    /// Reads a square movement window centred on the agent. `mask` holds `side * side` entries in
    /// row-major order with row 0 at the top, so the entry in row `i`, column `j` stands for the
    /// offset `(j - side / 2, side / 2 - i)`. The centre entry is ignored.
    pub fn from_window(side: usize, mask: &[bool]) -> PathResult<NeighborPattern> {
        let expected = side * side;
        if side < 3 || side % 2 == 0 || mask.len() != expected {
            return Err(PathfindError::InvalidPatternWindow {
                side,
                expected,
                len: mask.len(),
            });
        }
        let half = (side / 2) as i32;
        let offsets = mask
            .chunks(side)
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, checked)| **checked)
                    .map(move |(j, _)| IVec2::new(j as i32 - half, half - i as i32))
            })
            .collect::<Vec<_>>();
        Ok(NeighborPattern::new(offsets))
    }

    pub fn iter(&self) -> impl Iterator<Item = &IVec2> {
        self.offsets.iter()
    }

    pub fn offsets(&self) -> &[IVec2] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn contains(&self, offset: IVec2) -> bool {
        self.offsets.contains(&offset)
    }
}

/// Moves `cell` by `offset`, or [None] if the result does not fit in an [IVec2].
pub(crate) fn step(cell: IVec2, offset: IVec2) -> Option<IVec2> {
    Some(IVec2::new(
        cell.x.checked_add(offset.x)?,
        cell.y.checked_add(offset.y)?,
    ))
}

impl From<Vec<IVec2>> for NeighborPattern {
    fn from(offsets: Vec<IVec2>) -> Self {
        NeighborPattern::new(offsets)
    }
}

impl From<NeighborPattern> for Vec<IVec2> {
    fn from(pattern: NeighborPattern) -> Self {
        pattern.offsets.into_vec()
    }
}

impl FromIterator<IVec2> for NeighborPattern {
    fn from_iter<T: IntoIterator<Item = IVec2>>(iter: T) -> Self {
        NeighborPattern::new(iter)
    }
}
