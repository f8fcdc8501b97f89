use core::fmt;
use std::str::FromStr;

use glam::IVec2;
use log::{debug, warn};
use petgraph::unionfind::UnionFind;

use crate::error::{PathResult, PathfindError};
use crate::pattern::{step, NeighborPattern};

/// Walkability mask over a rectangle of cells, [true] meaning walkable. The pathfinder keeps one of
/// these sized to its grid; level and character providers hand in masks of any size up to that.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Default for ConstraintGrid {
    fn default() -> ConstraintGrid {
        ConstraintGrid::new(0, 0, true)
    }
}

impl ConstraintGrid {
    pub fn new(width: usize, height: usize, walkable: bool) -> ConstraintGrid {
        ConstraintGrid {
            width,
            height,
            cells: vec![walkable; width * height],
        }
    }

    /// A `size` x `size` grid with every cell walkable.
    pub fn reset(size: usize) -> ConstraintGrid {
        ConstraintGrid::new(size, size, true)
    }

    pub fn from_fn<F>(width: usize, height: usize, mut walkable: F) -> ConstraintGrid
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut grid = ConstraintGrid::new(width, height, true);
        for y in 0..height {
            for x in 0..width {
                grid.cells[y * width + x] = walkable(x, y);
            }
        }
        grid
    }

    /// Combines `sources` into a fresh `size` x `size` grid: a cell stays walkable only if no source
    /// covering it marks it blocked. Fails without building anything if any source is wider or
    /// taller than the grid.
    pub fn merged(size: usize, sources: &[ConstraintGrid]) -> PathResult<ConstraintGrid> {
        if let Some((index, source)) = sources
            .iter()
            .enumerate()
            .find(|(_, s)| s.width > size || s.height > size)
        {
            warn!(
                "Constraint source {} ({}x{}) is larger than the {}x{} grid, keeping previous constraints",
                index, source.width, source.height, size, size
            );
            return Err(PathfindError::ConstraintOverflow {
                index,
                width: source.width,
                height: source.height,
                size,
            });
        }
        let mut grid = ConstraintGrid::reset(size);
        for source in sources {
            for y in 0..source.height {
                for x in 0..source.width {
                    if !source.cells[y * source.width + x] {
                        grid.cells[y * size + x] = false;
                    }
                }
            }
        }
        debug!("Merged {} constraint sources into a {}x{} grid", sources.len(), size, size);
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self, size: usize) -> bool {
        self.width == size && self.height == size
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    fn ix(&self, cell: IVec2) -> usize {
        cell.y as usize * self.width + cell.x as usize
    }

    /// Out-of-bounds cells are never walkable.
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        self.in_bounds(cell) && self.cells[self.ix(cell)]
    }

    /// [None] outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Cells outside the grid are left alone.
    pub fn set(&mut self, x: usize, y: usize, walkable: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = walkable;
        }
    }

    /// Groups walkable cells into connected components, treating every offset of `pattern` as a
    /// move that can be made in both directions.
    pub fn components(&self, pattern: &NeighborPattern) -> Components {
        let mut sets = UnionFind::new(self.width * self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = IVec2::new(x, y);
                if !self.is_walkable(cell) {
                    continue;
                }
                let ix = self.ix(cell);
                for offset in pattern.iter() {
                    match step(cell, *offset) {
                        Some(neighbour) if self.is_walkable(neighbour) => {
                            sets.union(ix, self.ix(neighbour));
                        }
                        _ => {}
                    }
                }
            }
        }
        Components {
            width: self.width,
            height: self.height,
            sets,
        }
    }
}

/// Connected components of a [ConstraintGrid] under a [NeighborPattern].
#[derive(Clone, Debug)]
pub struct Components {
    width: usize,
    height: usize,
    sets: UnionFind<usize>,
}

impl Components {
    fn ix(&self, cell: IVec2) -> Option<usize> {
        let inside = cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height;
        inside.then(|| cell.y as usize * self.width + cell.x as usize)
    }

    pub fn connected(&self, a: IVec2, b: IVec2) -> bool {
        match (self.ix(a), self.ix(b)) {
            (Some(a), Some(b)) => self.sets.equiv(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ConstraintGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = (0..self.width)
                .map(|x| if self.get(x, y) == Some(true) { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// One line per row, first line is y = 0. `#` is blocked; `.`, `S` and `G` are walkable.
impl FromStr for ConstraintGrid {
    type Err = PathfindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (line, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(PathfindError::MalformedGrid {
                    line,
                    reason: format!("expected {} cells, found {}", width, row.chars().count()),
                });
            }
            for c in row.chars() {
                let walkable = match c {
                    '.' | 'S' | 'G' => true,
                    '#' => false,
                    other => {
                        return Err(PathfindError::MalformedGrid {
                            line,
                            reason: format!("unexpected character {:?}", other),
                        })
                    }
                };
                cells.push(walkable);
            }
        }
        Ok(ConstraintGrid {
            width,
            height: rows.len(),
            cells,
        })
    }
}
