//! The soil layer: the one owner of the tile grid and every planted crop.
//!
//! Systems reach farm state only through this resource. Each operation keeps
//! the grid tags and the crop collection in step, so a Planted cell always
//! has exactly one crop and every crop sits on a Planted cell.

use std::collections::BTreeMap;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::autotile::{resolve_grid, SoilVariant};
use super::crops::CropInstance;
use super::grid::{CellTags, TileGrid};

#[derive(Resource, Debug, Clone)]
pub struct SoilLayer {
    grid: TileGrid,
    crops: BTreeMap<TilePos, CropInstance>,
    /// Wet-soil sprite index per watered cell.
    water_variants: BTreeMap<TilePos, u8>,
    /// Cached auto-tile output, rebuilt whenever plowing changes.
    soil_variants: Vec<(TilePos, SoilVariant)>,
}

/// What happened to one crop during the overnight update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayReport {
    pub grew: Vec<TilePos>,
    pub ripened: Vec<TilePos>,
}

impl SoilLayer {
    /// Build a layer over a `cols` × `rows` grid with the given farmable cells.
    pub fn new<I>(cols: u32, rows: u32, farmable: I) -> Result<Self, FarmError>
    where
        I: IntoIterator<Item = TilePos>,
    {
        let mut grid = TileGrid::new(cols, rows)?;
        grid.mark_farmable(farmable)?;
        Ok(Self {
            grid,
            crops: BTreeMap::new(),
            water_variants: BTreeMap::new(),
            soil_variants: Vec::new(),
        })
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn crop_at(&self, pos: TilePos) -> Option<&CropInstance> {
        self.crops.get(&pos)
    }

    pub fn crops(&self) -> impl Iterator<Item = &CropInstance> {
        self.crops.values()
    }

    pub fn harvestable_crops(&self) -> impl Iterator<Item = &CropInstance> {
        self.crops.values().filter(|crop| crop.is_harvestable())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Player actions
    // ─────────────────────────────────────────────────────────────────────

    /// Plow a tile. Any change re-tiles the whole grid, since a new furrow
    /// alters the sprites of the furrows next to it.
    pub fn till(&mut self, pos: TilePos) -> Result<bool, FarmError> {
        let changed = self.grid.till(pos)?;
        if changed {
            self.soil_variants = resolve_grid(&self.grid);
        }
        Ok(changed)
    }

    /// Water a plowed tile, picking its wet-soil sprite from `rng`.
    pub fn water(&mut self, pos: TilePos, rng: &mut impl Rng) -> Result<bool, FarmError> {
        let changed = self.grid.water(pos)?;
        if changed {
            self.water_variants.insert(pos, rng.gen_range(0..WATER_VARIANTS));
        }
        Ok(changed)
    }

    /// Water every plowed tile (rain).
    pub fn water_all(&mut self, rng: &mut impl Rng) -> usize {
        let plowed: Vec<TilePos> = self.grid.cells_with(CellTags::PLOWED).collect();
        let mut watered = 0;
        for pos in plowed {
            if let Ok(true) = self.water(pos, rng) {
                watered += 1;
            }
        }
        watered
    }

    /// Sow `species` on a plowed, empty tile.
    ///
    /// Returns `Ok(false)` when the tile cannot take a seed; an unknown
    /// species is an error and leaves the tile untouched.
    pub fn plant(
        &mut self,
        pos: TilePos,
        species: &str,
        registry: &CropRegistry,
    ) -> Result<bool, FarmError> {
        if !self.can_plant(pos)? {
            return Ok(false);
        }
        let crop = CropInstance::plant(registry, species, pos)?;
        self.grid.plant(pos)?;
        self.crops.insert(pos, crop);
        Ok(true)
    }

    /// Whether a seed would take at `pos`.
    pub fn can_plant(&self, pos: TilePos) -> Result<bool, FarmError> {
        Ok(self.grid.is_plowed(pos)? && !self.grid.is_planted(pos)?)
    }

    /// Pick a ripe crop, clearing the tile in the same step.
    pub fn harvest(&mut self, pos: TilePos) -> Result<CropId, FarmError> {
        if !self.grid.in_bounds(pos) {
            return Err(FarmError::out_of_bounds(pos));
        }
        let crop = self.crops.remove(&pos).ok_or_else(|| FarmError::not_ready(pos))?;
        match crop.harvest() {
            Ok(species) => {
                self.grid.clear_planted(pos)?;
                Ok(species)
            }
            Err((crop, err)) => {
                self.crops.insert(pos, crop);
                Err(err)
            }
        }
    }

    /// Destroy whatever grows at `pos`, ripe or not.
    pub fn kill(&mut self, pos: TilePos) -> Result<Option<CropInstance>, FarmError> {
        self.grid.clear_planted(pos)?;
        Ok(self.crops.remove(&pos))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Overnight
    // ─────────────────────────────────────────────────────────────────────

    /// Grow every crop on its own cell's water, then dry the whole field.
    pub fn advance_day(&mut self) -> DayReport {
        let mut report = DayReport::default();
        for (&pos, crop) in self.crops.iter_mut() {
            let watered = self.grid.is_watered(pos).unwrap_or(false);
            if crop.advance_day(watered) {
                report.ripened.push(pos);
            }
            if watered {
                report.grew.push(pos);
            }
        }
        self.grid.clear_water();
        self.water_variants.clear();
        report
    }

    // ─────────────────────────────────────────────────────────────────────
    // Render feed
    // ─────────────────────────────────────────────────────────────────────

    /// Plowed tiles and their auto-tile sprite, row-major.
    pub fn soil_visuals(&self) -> &[(TilePos, SoilVariant)] {
        &self.soil_variants
    }

    /// Watered tiles and their wet-soil sprite index.
    pub fn water_visuals(&self) -> impl Iterator<Item = (TilePos, u8)> + '_ {
        self.water_variants.iter().map(|(&pos, &variant)| (pos, variant))
    }

    /// Planted tiles and the growth frame to draw.
    pub fn crop_visuals(&self) -> impl Iterator<Item = (TilePos, usize)> + '_ {
        self.crops.values().map(|crop| (crop.pos(), crop.growth_frame()))
    }

    /// True when the grid's Planted tags and the crop collection agree.
    pub fn is_consistent(&self) -> bool {
        let planted: Vec<TilePos> = self.grid.cells_with(CellTags::PLANTED).collect();
        planted.len() == self.crops.len()
            && planted
                .iter()
                .all(|pos| self.crops.get(pos).is_some_and(|crop| crop.pos() == *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registry() -> CropRegistry {
        let mut registry = CropRegistry::default();
        registry.crops.insert(
            "corn".into(),
            CropDef {
                id: "corn".into(),
                name: "Corn".into(),
                growth_frames: 5,
                growth_rate: 1.0,
                y_offset: 16.0,
            },
        );
        registry
    }

    fn layer() -> SoilLayer {
        let farmable = (0..3).flat_map(|r| (0..3).map(move |c| TilePos::new(c, r)));
        SoilLayer::new(3, 3, farmable).unwrap()
    }

    #[test]
    fn tilling_retiles_neighbours() {
        let mut layer = layer();
        layer.till(TilePos::new(1, 1)).unwrap();
        assert_eq!(layer.soil_visuals(), &[(TilePos::new(1, 1), SoilVariant::Isolated)]);

        for pos in TilePos::new(1, 1).orthogonal() {
            layer.till(pos).unwrap();
        }
        let visuals: BTreeMap<_, _> = layer.soil_visuals().iter().copied().collect();
        assert_eq!(visuals[&TilePos::new(1, 1)], SoilVariant::Full);
        assert_eq!(visuals.len(), 5);
    }

    #[test]
    fn plant_and_harvest_keep_grid_and_crops_in_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let registry = registry();
        let mut layer = layer();
        let pos = TilePos::new(0, 2);

        assert_eq!(layer.plant(pos, "corn", &registry), Ok(false), "unplowed");
        layer.till(pos).unwrap();
        assert_eq!(layer.plant(pos, "corn", &registry), Ok(true));
        assert_eq!(layer.plant(pos, "corn", &registry), Ok(false), "occupied");
        assert!(layer.is_consistent());

        assert_eq!(layer.harvest(pos), Err(FarmError::not_ready(pos)));
        assert!(layer.crop_at(pos).is_some(), "failed harvest keeps the crop");

        for _ in 0..4 {
            layer.water(pos, &mut rng).unwrap();
            layer.advance_day();
        }
        assert_eq!(layer.harvest(pos), Ok("corn".to_string()));
        assert!(layer.crop_at(pos).is_none());
        assert_eq!(layer.grid().is_planted(pos), Ok(false));
        assert!(layer.is_consistent());
    }

    #[test]
    fn unknown_species_leaves_tile_empty() {
        let mut layer = layer();
        let pos = TilePos::new(1, 1);
        layer.till(pos).unwrap();
        let err = layer.plant(pos, "mandrake", &registry()).unwrap_err();
        assert_eq!(err, FarmError::InvalidSpecies("mandrake".into()));
        assert_eq!(layer.grid().is_planted(pos), Ok(false));
        assert!(layer.is_consistent());
    }

    #[test]
    fn kill_discards_unripe_crops() {
        let mut layer = layer();
        let pos = TilePos::new(2, 2);
        layer.till(pos).unwrap();
        layer.plant(pos, "corn", &registry()).unwrap();
        let killed = layer.kill(pos).unwrap();
        assert!(killed.is_some_and(|crop| !crop.is_harvestable()));
        assert_eq!(layer.grid().is_planted(pos), Ok(false));
        assert!(layer.is_consistent());
        assert_eq!(layer.kill(pos), Ok(None));
    }

    #[test]
    fn advance_day_uses_each_cells_water_then_dries() {
        let mut rng = StdRng::seed_from_u64(7);
        let registry = registry();
        let mut layer = layer();
        let wet = TilePos::new(0, 0);
        let dry = TilePos::new(2, 0);
        for pos in [wet, dry] {
            layer.till(pos).unwrap();
            layer.plant(pos, "corn", &registry).unwrap();
        }
        layer.water(wet, &mut rng).unwrap();
        assert_eq!(layer.water_visuals().count(), 1);

        let report = layer.advance_day();
        assert_eq!(report.grew, vec![wet]);
        assert_eq!(layer.crop_at(wet).unwrap().age(), 1.0);
        assert_eq!(layer.crop_at(dry).unwrap().age(), 0.0);
        assert_eq!(layer.grid().is_watered(wet), Ok(false));
        assert_eq!(layer.water_visuals().count(), 0);
    }

    #[test]
    fn rain_waters_only_plowed_tiles() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layer = layer();
        layer.till(TilePos::new(0, 0)).unwrap();
        layer.till(TilePos::new(1, 0)).unwrap();
        assert_eq!(layer.water_all(&mut rng), 2);
        assert_eq!(layer.grid().is_watered(TilePos::new(2, 2)), Ok(false));
        assert!(layer.water_visuals().all(|(_, v)| v < WATER_VARIANTS));
        assert_eq!(layer.water_all(&mut rng), 0, "already wet");
    }

    #[test]
    fn water_variants_are_reproducible_with_a_seeded_rng() {
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut layer = layer();
            for col in 0..3 {
                layer.till(TilePos::new(col, 0)).unwrap();
            }
            layer.water_all(&mut rng);
            layer.water_visuals().collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn out_of_bounds_is_reported() {
        let mut layer = layer();
        let outside = TilePos::new(3, 0);
        assert_eq!(layer.till(outside), Err(FarmError::out_of_bounds(outside)));
        assert_eq!(layer.harvest(outside), Err(FarmError::out_of_bounds(outside)));
    }
}
