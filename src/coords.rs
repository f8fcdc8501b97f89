use glam::{IVec2, Vec3};
use itertools::iproduct;

use crate::error::{PathResult, PathfindError};

/// Placement of an `size` x `size` grid of square cells on the world X-Z plane. `origin` is the
/// world-space centre of the whole grid; grid x runs along world x and grid y along world z.
///
/// The half-extent used to find cell (0, 0) is scaled by `cell_size`. Layouts that offset by half
/// the cell count in world units only line up with this one when `cell_size` is 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub size: usize,
    pub cell_size: f32,
    pub origin: Vec3,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            size: 10,
            cell_size: 1.0,
            origin: Vec3::ZERO,
        }
    }
}

impl GridConfig {
    pub fn new(size: usize, cell_size: f32, origin: Vec3) -> GridConfig {
        GridConfig {
            size,
            cell_size,
            origin,
        }
    }

    pub fn validate(&self) -> PathResult<()> {
        if self.size == 0 || !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(PathfindError::InvalidGrid {
                size: self.size,
                cell_size: self.cell_size,
            });
        }
        Ok(())
    }

    /// World-space centre of cell (0, 0).
    pub fn first_cell_center(&self) -> Vec3 {
        let half_extent = self.size as f32 * self.cell_size / 2.0;
        let half_cell = self.cell_size / 2.0;
        self.origin - Vec3::new(half_extent, 0.0, half_extent) + Vec3::new(half_cell, 0.0, half_cell)
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        let n = self.size as i32;
        cell.x >= 0 && cell.y >= 0 && cell.x < n && cell.y < n
    }

    /// The cell whose centre is nearest to `position`. Every cell is scanned in row-major order and
    /// ties go to the first cell scanned.
    pub fn world_to_grid(&self, position: Vec3) -> IVec2 {
        let n = self.size as i32;
        iproduct!(0..n, 0..n)
            .map(|(y, x)| IVec2::new(x, y))
            .min_by(|a, b| {
                let da = self.grid_to_world(*a).distance(position);
                let db = self.grid_to_world(*b).distance(position);
                da.total_cmp(&db)
            })
            .unwrap_or(IVec2::ZERO)
    }

    /// Centre of a cell in world space. Out-of-range cells are extrapolated.
    pub fn grid_to_world(&self, cell: IVec2) -> Vec3 {
        self.first_cell_center()
            + Vec3::new(
                cell.x as f32 * self.cell_size,
                0.0,
                cell.y as f32 * self.cell_size,
            )
    }
}
