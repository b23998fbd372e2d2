//! Auto-tiling for plowed soil.
//!
//! Every plowed cell picks a sprite from which of its four orthogonal
//! neighbours are also plowed. The rules are an override chain: they are
//! evaluated in table order and the last matching rule wins.

use crate::shared::TilePos;

use super::grid::{CellTags, TileGrid};

/// Visual variant of a plowed soil tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilVariant {
    Isolated,
    Full,
    RightEnd,
    LeftEnd,
    Horizontal,
    BottomEnd,
    TopEnd,
    Vertical,
    TopRightCorner,
    TopLeftCorner,
    BottomRightCorner,
    BottomLeftCorner,
    TMissingLeft,
    TMissingRight,
    TMissingBottom,
    TMissingTop,
}

impl SoilVariant {
    /// File stem of the sprite under `graphics/soil/`.
    pub fn asset_key(self) -> &'static str {
        match self {
            SoilVariant::Isolated => "o",
            SoilVariant::Full => "x",
            SoilVariant::RightEnd => "r",
            SoilVariant::LeftEnd => "l",
            SoilVariant::Horizontal => "lr",
            SoilVariant::BottomEnd => "b",
            SoilVariant::TopEnd => "t",
            SoilVariant::Vertical => "tb",
            SoilVariant::TopRightCorner => "tr",
            SoilVariant::TopLeftCorner => "tl",
            SoilVariant::BottomRightCorner => "br",
            SoilVariant::BottomLeftCorner => "bl",
            SoilVariant::TMissingLeft => "tbr",
            SoilVariant::TMissingRight => "tbl",
            SoilVariant::TMissingBottom => "lrb",
            SoilVariant::TMissingTop => "lrt",
        }
    }
}

/// Which orthogonal neighbours are plowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Neighbors {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Neighbors {
    const fn new(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        Self { top, bottom, left, right }
    }

    /// Sample the grid around `pos`; cells past the edge read as unplowed.
    pub fn around(grid: &TileGrid, pos: TilePos) -> Self {
        let [top, bottom, left, right] = pos.orthogonal();
        Self {
            top: grid.plowed_or_false(top),
            bottom: grid.plowed_or_false(bottom),
            left: grid.plowed_or_false(left),
            right: grid.plowed_or_false(right),
        }
    }
}

const T: bool = true;
const F: bool = false;

/// Override chain, in precedence order. Patterns are (top, bottom, left, right).
const RULES: [(Neighbors, SoilVariant); 15] = [
    (Neighbors::new(T, T, T, T), SoilVariant::Full),
    // horizontal only
    (Neighbors::new(F, F, T, F), SoilVariant::RightEnd),
    (Neighbors::new(F, F, F, T), SoilVariant::LeftEnd),
    (Neighbors::new(F, F, T, T), SoilVariant::Horizontal),
    // vertical only
    (Neighbors::new(T, F, F, F), SoilVariant::BottomEnd),
    (Neighbors::new(F, T, F, F), SoilVariant::TopEnd),
    (Neighbors::new(T, T, F, F), SoilVariant::Vertical),
    // corners
    (Neighbors::new(F, T, T, F), SoilVariant::TopRightCorner),
    (Neighbors::new(F, T, F, T), SoilVariant::TopLeftCorner),
    (Neighbors::new(T, F, T, F), SoilVariant::BottomRightCorner),
    (Neighbors::new(T, F, F, T), SoilVariant::BottomLeftCorner),
    // T shapes
    (Neighbors::new(T, T, F, T), SoilVariant::TMissingLeft),
    (Neighbors::new(T, T, T, F), SoilVariant::TMissingRight),
    (Neighbors::new(T, F, T, T), SoilVariant::TMissingBottom),
    (Neighbors::new(F, T, T, T), SoilVariant::TMissingTop),
];

/// Pick the variant for a plowed cell with the given neighbours.
pub fn resolve_variant(neighbors: Neighbors) -> SoilVariant {
    RULES
        .iter()
        .rev()
        .find(|(pattern, _)| *pattern == neighbors)
        .map(|&(_, variant)| variant)
        .unwrap_or(SoilVariant::Isolated)
}

/// Resolve every plowed cell of the grid, in row-major order.
///
/// Pure: reads the grid only, so it can run after any structural change.
pub fn resolve_grid(grid: &TileGrid) -> Vec<(TilePos, SoilVariant)> {
    grid.cells_with(CellTags::PLOWED)
        .map(|pos| (pos, resolve_variant(Neighbors::around(grid, pos))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn plowed_grid(cols: u32, rows: u32, plowed: &[(i32, i32)]) -> TileGrid {
        let mut grid = TileGrid::new(cols, rows).unwrap();
        let cells: Vec<_> = plowed.iter().map(|&(c, r)| TilePos::new(c, r)).collect();
        grid.mark_farmable(cells.iter().copied()).unwrap();
        for pos in cells {
            grid.till(pos).unwrap();
        }
        grid
    }

    fn variants(grid: &TileGrid) -> HashMap<TilePos, SoilVariant> {
        resolve_grid(grid).into_iter().collect()
    }

    #[test]
    fn every_neighbour_combination_has_a_variant() {
        let mut seen = std::collections::HashSet::new();
        for bits in 0u8..16 {
            let n = Neighbors::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0);
            seen.insert(resolve_variant(n));
        }
        assert_eq!(seen.len(), 16, "each of the 16 patterns maps to a distinct sprite");
    }

    #[test]
    fn strips_and_corners() {
        assert_eq!(resolve_variant(Neighbors::default()), SoilVariant::Isolated);
        assert_eq!(resolve_variant(Neighbors::new(F, F, T, F)), SoilVariant::RightEnd);
        assert_eq!(resolve_variant(Neighbors::new(F, F, T, T)), SoilVariant::Horizontal);
        assert_eq!(resolve_variant(Neighbors::new(T, T, F, F)), SoilVariant::Vertical);
        assert_eq!(resolve_variant(Neighbors::new(F, T, T, F)), SoilVariant::TopRightCorner);
        assert_eq!(resolve_variant(Neighbors::new(T, F, F, T)), SoilVariant::BottomLeftCorner);
        assert_eq!(resolve_variant(Neighbors::new(F, T, T, T)), SoilVariant::TMissingTop);
        assert_eq!(resolve_variant(Neighbors::new(T, T, T, T)), SoilVariant::Full);
    }

    #[test]
    fn plus_shape_on_three_by_three() {
        let mut grid = plowed_grid(3, 3, &[(1, 1)]);
        assert_eq!(variants(&grid)[&TilePos::new(1, 1)], SoilVariant::Isolated);

        grid = plowed_grid(3, 3, &[(1, 1), (1, 0), (0, 1), (2, 1), (1, 2)]);
        let v = variants(&grid);
        assert_eq!(v[&TilePos::new(1, 1)], SoilVariant::Full);
        // Each arm touches only the centre.
        assert_eq!(v[&TilePos::new(1, 0)], SoilVariant::TopEnd);
        assert_eq!(v[&TilePos::new(1, 2)], SoilVariant::BottomEnd);
        assert_eq!(v[&TilePos::new(0, 1)], SoilVariant::LeftEnd);
        assert_eq!(v[&TilePos::new(2, 1)], SoilVariant::RightEnd);
        assert_eq!(v.len(), 5);
    }

    #[test]
    fn edge_cells_treat_outside_as_unplowed() {
        // Fill the whole 3x3 grid; corners see two neighbours, edges three.
        let all: Vec<(i32, i32)> = (0..3).flat_map(|r| (0..3).map(move |c| (c, r))).collect();
        let grid = plowed_grid(3, 3, &all);
        let v = variants(&grid);
        assert_eq!(v[&TilePos::new(0, 0)], SoilVariant::TopLeftCorner);
        assert_eq!(v[&TilePos::new(2, 0)], SoilVariant::TopRightCorner);
        assert_eq!(v[&TilePos::new(0, 2)], SoilVariant::BottomLeftCorner);
        assert_eq!(v[&TilePos::new(2, 2)], SoilVariant::BottomRightCorner);
        assert_eq!(v[&TilePos::new(1, 0)], SoilVariant::TMissingTop);
        assert_eq!(v[&TilePos::new(1, 2)], SoilVariant::TMissingBottom);
        assert_eq!(v[&TilePos::new(0, 1)], SoilVariant::TMissingLeft);
        assert_eq!(v[&TilePos::new(2, 1)], SoilVariant::TMissingRight);
        assert_eq!(v[&TilePos::new(1, 1)], SoilVariant::Full);
    }

    #[test]
    fn single_row_grid_does_not_wrap() {
        let grid = plowed_grid(4, 1, &[(0, 0), (3, 0)]);
        let v = variants(&grid);
        assert_eq!(v[&TilePos::new(0, 0)], SoilVariant::Isolated);
        assert_eq!(v[&TilePos::new(3, 0)], SoilVariant::Isolated);
    }

    #[test]
    fn resolution_is_deterministic() {
        let grid = plowed_grid(4, 4, &[(0, 0), (1, 0), (1, 1), (3, 3), (2, 3)]);
        assert_eq!(resolve_grid(&grid), resolve_grid(&grid));
    }

    #[test]
    fn unplowed_cells_are_not_resolved() {
        let mut grid = TileGrid::new(2, 2).unwrap();
        grid.mark_farmable([TilePos::new(0, 0), TilePos::new(1, 0)]).unwrap();
        grid.till(TilePos::new(0, 0)).unwrap();
        let resolved = resolve_grid(&grid);
        assert_eq!(resolved, vec![(TilePos::new(0, 0), SoilVariant::Isolated)]);
    }
}
