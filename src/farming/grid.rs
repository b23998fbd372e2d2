//! Tile grid: per-cell soil tags over the farmable region.
//!
//! Dimensions are fixed at construction. Cells are never added or removed;
//! only their tags change, and every tag change goes through a guarded
//! transition so that Watered and Planted can only exist on Plowed soil.

use bitflags::bitflags;

use crate::shared::{grid_cell_count, FarmError, TilePos};

bitflags! {
    /// Soil markers carried by one cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellTags: u8 {
        const FARMABLE = 0b0001;
        const PLOWED   = 0b0010;
        const WATERED  = 0b0100;
        const PLANTED  = 0b1000;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    cols: i32,
    rows: i32,
    /// Row-major cell storage (row * cols + col).
    cells: Vec<CellTags>,
    farmable_marked: bool,
}

impl TileGrid {
    /// An untagged grid. Empty or oversized dimensions are a configuration
    /// error.
    pub fn new(cols: u32, rows: u32) -> Result<Self, FarmError> {
        let cells = grid_cell_count(cols, rows)?;
        Ok(Self {
            cols: cols as i32,
            rows: rows as i32,
            cells: vec![CellTags::empty(); cells],
            farmable_marked: false,
        })
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.col >= 0 && pos.col < self.cols && pos.row >= 0 && pos.row < self.rows
    }

    #[inline]
    fn index(&self, pos: TilePos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.row * self.cols + pos.col) as usize)
    }

    fn cell(&self, pos: TilePos) -> Result<CellTags, FarmError> {
        self.index(pos)
            .map(|idx| self.cells[idx])
            .ok_or_else(|| FarmError::out_of_bounds(pos))
    }

    fn cell_mut(&mut self, pos: TilePos) -> Result<&mut CellTags, FarmError> {
        let idx = self.index(pos).ok_or_else(|| FarmError::out_of_bounds(pos))?;
        Ok(&mut self.cells[idx])
    }

    /// Tags of a cell, or `None` outside the grid.
    pub fn tags(&self, pos: TilePos) -> Option<CellTags> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    // ─────────────────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────────────────

    /// Mark the farmable region. May only run once; every coordinate is
    /// checked before any cell is touched.
    pub fn mark_farmable<I>(&mut self, cells: I) -> Result<(), FarmError>
    where
        I: IntoIterator<Item = TilePos>,
    {
        if self.farmable_marked {
            return Err(FarmError::Configuration(
                "farmable region was already marked".into(),
            ));
        }

        let mut indices = Vec::new();
        for pos in cells {
            let idx = self.index(pos).ok_or_else(|| {
                FarmError::Configuration(format!(
                    "farmable tile ({}, {}) lies outside the {}x{} grid",
                    pos.col, pos.row, self.cols, self.rows
                ))
            })?;
            indices.push(idx);
        }

        for idx in indices {
            self.cells[idx].insert(CellTags::FARMABLE);
        }
        self.farmable_marked = true;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Guarded transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Plow a farmable cell. Returns whether the cell changed.
    pub fn till(&mut self, pos: TilePos) -> Result<bool, FarmError> {
        let cell = self.cell_mut(pos)?;
        if !cell.contains(CellTags::FARMABLE) || cell.contains(CellTags::PLOWED) {
            return Ok(false);
        }
        cell.insert(CellTags::PLOWED);
        Ok(true)
    }

    /// Wet a plowed cell. Returns whether the cell changed.
    pub fn water(&mut self, pos: TilePos) -> Result<bool, FarmError> {
        let cell = self.cell_mut(pos)?;
        if !cell.contains(CellTags::PLOWED) || cell.contains(CellTags::WATERED) {
            return Ok(false);
        }
        cell.insert(CellTags::WATERED);
        Ok(true)
    }

    /// Mark a plowed cell as holding a crop. Returns whether the cell changed.
    pub fn plant(&mut self, pos: TilePos) -> Result<bool, FarmError> {
        let cell = self.cell_mut(pos)?;
        if !cell.contains(CellTags::PLOWED) || cell.contains(CellTags::PLANTED) {
            return Ok(false);
        }
        cell.insert(CellTags::PLANTED);
        Ok(true)
    }

    /// Dry every cell.
    pub fn clear_water(&mut self) {
        for cell in &mut self.cells {
            cell.remove(CellTags::WATERED);
        }
    }

    /// Remove the crop marker. Returns whether the cell changed.
    pub fn clear_planted(&mut self, pos: TilePos) -> Result<bool, FarmError> {
        let cell = self.cell_mut(pos)?;
        let was_planted = cell.contains(CellTags::PLANTED);
        cell.remove(CellTags::PLANTED);
        Ok(was_planted)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn is_farmable(&self, pos: TilePos) -> Result<bool, FarmError> {
        Ok(self.cell(pos)?.contains(CellTags::FARMABLE))
    }

    pub fn is_plowed(&self, pos: TilePos) -> Result<bool, FarmError> {
        Ok(self.cell(pos)?.contains(CellTags::PLOWED))
    }

    pub fn is_watered(&self, pos: TilePos) -> Result<bool, FarmError> {
        Ok(self.cell(pos)?.contains(CellTags::WATERED))
    }

    pub fn is_planted(&self, pos: TilePos) -> Result<bool, FarmError> {
        Ok(self.cell(pos)?.contains(CellTags::PLANTED))
    }

    /// Neighbour lookup for auto-tiling: anything outside the grid counts as
    /// unplowed.
    pub fn plowed_or_false(&self, pos: TilePos) -> bool {
        self.tags(pos)
            .is_some_and(|tags| tags.contains(CellTags::PLOWED))
    }

    /// Every cell carrying all of `tags`, in row-major order.
    pub fn cells_with(&self, tags: CellTags) -> impl Iterator<Item = TilePos> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| cell.contains(tags))
            .map(move |(idx, _)| TilePos::new(idx as i32 % cols, idx as i32 / cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_farmable(cols: u32, rows: u32, farmable: &[(i32, i32)]) -> TileGrid {
        let mut grid = TileGrid::new(cols, rows).unwrap();
        grid.mark_farmable(farmable.iter().map(|&(c, r)| TilePos::new(c, r)))
            .unwrap();
        grid
    }

    #[test]
    fn till_ignores_non_farmable_cells_forever() {
        let mut grid = grid_with_farmable(3, 3, &[(1, 1)]);
        let barren = TilePos::new(0, 0);
        for _ in 0..5 {
            assert_eq!(grid.till(barren), Ok(false));
        }
        assert_eq!(grid.is_plowed(barren), Ok(false));
    }

    #[test]
    fn till_reports_change_only_once() {
        let mut grid = grid_with_farmable(3, 3, &[(1, 1)]);
        let pos = TilePos::new(1, 1);
        assert_eq!(grid.till(pos), Ok(true));
        assert_eq!(grid.till(pos), Ok(false));
        assert_eq!(grid.is_plowed(pos), Ok(true));
    }

    #[test]
    fn water_requires_plowed_soil() {
        let mut grid = grid_with_farmable(3, 3, &[(1, 1)]);
        let pos = TilePos::new(1, 1);
        assert_eq!(grid.water(pos), Ok(false), "dry dirt cannot hold water");
        assert_eq!(grid.is_watered(pos), Ok(false));

        grid.till(pos).unwrap();
        assert_eq!(grid.is_watered(pos), Ok(false), "earlier water must not stick");
        assert_eq!(grid.water(pos), Ok(true));
        assert_eq!(grid.is_watered(pos), Ok(true));
        assert_eq!(grid.water(pos), Ok(false));
    }

    #[test]
    fn plant_requires_plowed_and_empty_cell() {
        let mut grid = grid_with_farmable(2, 2, &[(0, 0)]);
        let pos = TilePos::new(0, 0);
        assert_eq!(grid.plant(pos), Ok(false));
        grid.till(pos).unwrap();
        assert_eq!(grid.plant(pos), Ok(true));
        assert_eq!(grid.plant(pos), Ok(false));
        assert_eq!(grid.clear_planted(pos), Ok(true));
        assert_eq!(grid.is_planted(pos), Ok(false));
    }

    #[test]
    fn clear_water_dries_every_cell() {
        let mut grid = grid_with_farmable(2, 1, &[(0, 0), (1, 0)]);
        for col in 0..2 {
            let pos = TilePos::new(col, 0);
            grid.till(pos).unwrap();
            grid.water(pos).unwrap();
        }
        grid.clear_water();
        assert_eq!(grid.cells_with(CellTags::WATERED).count(), 0);
        assert_eq!(grid.cells_with(CellTags::PLOWED).count(), 2);
    }

    #[test]
    fn empty_or_oversized_grids_are_rejected() {
        for (cols, rows) in [(0, 3), (3, 0), (70_000, 70_000), (u32::MAX, 1)] {
            let err = TileGrid::new(cols, rows).unwrap_err();
            assert!(matches!(err, FarmError::Configuration(_)), "{}x{}", cols, rows);
        }
        let grid = TileGrid::new(1024, 1024).unwrap();
        assert!(grid.in_bounds(TilePos::new(1023, 1023)));
    }

    #[test]
    fn mark_farmable_only_once() {
        let mut grid = grid_with_farmable(2, 2, &[(0, 0)]);
        let err = grid.mark_farmable([TilePos::new(1, 1)]).unwrap_err();
        assert!(matches!(err, FarmError::Configuration(_)));
        assert_eq!(grid.is_farmable(TilePos::new(1, 1)), Ok(false));
    }

    #[test]
    fn mark_farmable_rejects_out_of_bounds_without_partial_writes() {
        let mut grid = TileGrid::new(2, 2).unwrap();
        let err = grid
            .mark_farmable([TilePos::new(0, 0), TilePos::new(2, 0)])
            .unwrap_err();
        assert!(matches!(err, FarmError::Configuration(_)));
        assert_eq!(grid.is_farmable(TilePos::new(0, 0)), Ok(false));
        // A failed attempt does not consume the one-time initialisation.
        assert!(grid.mark_farmable([TilePos::new(0, 0)]).is_ok());
    }

    #[test]
    fn queries_fail_outside_the_grid() {
        let grid = TileGrid::new(2, 2).unwrap();
        for pos in [TilePos::new(-1, 0), TilePos::new(0, -1), TilePos::new(2, 0), TilePos::new(0, 2)] {
            assert_eq!(grid.is_plowed(pos), Err(FarmError::out_of_bounds(pos)));
            assert_eq!(grid.is_watered(pos), Err(FarmError::out_of_bounds(pos)));
            assert_eq!(grid.is_planted(pos), Err(FarmError::out_of_bounds(pos)));
            assert!(!grid.plowed_or_false(pos));
        }
    }

    #[test]
    fn cells_with_is_row_major() {
        let mut grid = grid_with_farmable(3, 2, &[(2, 0), (0, 1), (1, 0)]);
        for pos in [TilePos::new(2, 0), TilePos::new(0, 1), TilePos::new(1, 0)] {
            grid.till(pos).unwrap();
        }
        let plowed: Vec<_> = grid.cells_with(CellTags::PLOWED).collect();
        assert_eq!(
            plowed,
            vec![TilePos::new(1, 0), TilePos::new(2, 0), TilePos::new(0, 1)]
        );
    }
}
