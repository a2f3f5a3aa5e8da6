//! Setup-time material painting from rectangular regions.

use crate::error::GridError;
use crate::grid::Grid;
use kiln_core::Region;

/// Stamp each region's material into the grid, in list order.
///
/// Later regions overwrite earlier ones where they overlap. The parts of
/// a region outside the grid are clipped; a region with non-positive
/// width or height paints nothing. Cells no region covers keep their
/// current id.
///
/// Every region's material must index into a list of `material_count`
/// materials. This is checked for all regions before any cell is
/// written, so a failed call leaves the grid untouched.
///
/// Returns the number of cell writes (overlaps count once per region).
///
/// # Examples
///
/// ```
/// use kiln_core::{MaterialId, Region};
/// use kiln_grid::{paint_regions, Grid};
///
/// let mut grid = Grid::new(4, 4, 0.0).unwrap();
/// let regions = [
///     Region::new(MaterialId(0), 0, 0, 4, 4),
///     Region::new(MaterialId(1), 2, 2, 10, 10),
/// ];
/// paint_regions(&mut grid, &regions, 2).unwrap();
/// assert_eq!(grid.material_at(0, 0), MaterialId(0));
/// assert_eq!(grid.material_at(3, 3), MaterialId(1));
/// ```
pub fn paint_regions(
    grid: &mut Grid,
    regions: &[Region],
    material_count: usize,
) -> Result<usize, GridError> {
    for (i, region) in regions.iter().enumerate() {
        let known = region.material.index().is_some_and(|m| m < material_count);
        if !known {
            return Err(GridError::UnknownMaterial {
                region: i,
                material: region.material,
                material_count,
            });
        }
    }

    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let ids = grid.material_ids_mut();
    let mut painted = 0usize;

    for region in regions {
        let x0 = (region.x as i64).max(0);
        let y0 = (region.y as i64).max(0);
        let x1 = (region.x as i64 + region.width as i64).min(width);
        let y1 = (region.y as i64 + region.height as i64).min(height);
        if x0 >= x1 || y0 >= y1 {
            continue;
        }
        for y in y0..y1 {
            let row = (y * width) as usize;
            ids[row + x0 as usize..row + x1 as usize].fill(region.material);
        }
        painted += ((x1 - x0) * (y1 - y0)) as usize;
    }

    tracing::debug!(regions = regions.len(), cells = painted, "painted material regions");
    Ok(painted)
}
