use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::shared::*;

/// The farm map shipped with the game.
pub const DEFAULT_FARM_MAP: &str = include_str!("../../assets/maps/farm.ron");

/// On-disk description of a farm map. Farmable ground is listed as
/// rectangles and expanded into single cells on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmMapDef {
    pub cols: u32,
    pub rows: u32,
    pub farmable: Vec<TileRect>,
    pub player_start: TilePos,
    #[serde(default)]
    pub bed: Option<TileRect>,
    #[serde(default)]
    pub trader: Option<TileRect>,
}

impl FarmMapDef {
    pub fn from_ron(source: &str) -> Result<Self, FarmError> {
        ron::from_str(source)
            .map_err(|e| FarmError::Configuration(format!("invalid farm map: {}", e)))
    }

    /// The farm layout shipped with the game.
    pub fn default_farm() -> Result<Self, FarmError> {
        Self::from_ron(DEFAULT_FARM_MAP)
    }

    /// Expand into the runtime map. Overlapping patches are merged.
    pub fn into_map(self) -> Result<FarmMap, FarmError> {
        grid_cell_count(self.cols, self.rows)?;

        let farmable: BTreeSet<TilePos> = self
            .farmable
            .iter()
            .flat_map(|rect| rect.tiles())
            .collect();

        let map = FarmMap {
            cols: self.cols,
            rows: self.rows,
            farmable: farmable.into_iter().collect(),
            player_start: self.player_start,
            bed: self.bed,
            trader: self.trader,
        };

        if !map.contains(map.player_start) {
            return Err(FarmError::Configuration(format!(
                "player start ({}, {}) lies outside the map",
                map.player_start.col, map.player_start.row
            )));
        }
        Ok(map)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_loads() {
        let map = FarmMapDef::default_farm()
            .and_then(FarmMapDef::into_map)
            .expect("shipped map parses");
        assert_eq!((map.cols, map.rows), (32, 24));
        assert_eq!(map.farmable.len(), 12 * 6 + 6 * 3);
        assert!(map.farmable.iter().all(|&pos| map.contains(pos)));
        assert!(map.bed.is_some());
        assert!(map.trader.is_some());
    }

    #[test]
    fn overlapping_patches_merge() {
        let def = FarmMapDef::from_ron(
            "(cols: 4, rows: 4, farmable: [(col: 0, row: 0, cols: 2, rows: 2), (col: 1, row: 1, cols: 2, rows: 2)], player_start: (col: 3, row: 3))",
        )
        .unwrap();
        let map = def.into_map().unwrap();
        assert_eq!(map.farmable.len(), 7);
        assert_eq!(map.bed, None);
    }

    #[test]
    fn malformed_maps_are_configuration_errors() {
        let err = FarmMapDef::from_ron("(cols: 4)").unwrap_err();
        assert!(matches!(err, FarmError::Configuration(_)));

        let err = FarmMapDef::from_ron(
            "(cols: 2, rows: 2, farmable: [], player_start: (col: 5, row: 0))",
        )
        .unwrap()
        .into_map()
        .unwrap_err();
        assert!(matches!(err, FarmError::Configuration(_)));

        for dims in ["cols: 0, rows: 4", "cols: 70000, rows: 70000", "cols: 4294967295, rows: 1"] {
            let source = format!("({}, farmable: [], player_start: (col: 0, row: 0))", dims);
            let err = FarmMapDef::from_ron(&source).unwrap().into_map().unwrap_err();
            assert!(matches!(err, FarmError::Configuration(_)), "{}: {:?}", dims, err);
        }
    }
}
