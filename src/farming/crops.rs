//! Crop instances and daily growth.

use bevy::prelude::*;
use crate::shared::*;

/// Growth phase of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPhase {
    Growing,
    Harvestable,
}

/// One planted crop. Lives exactly as long as its cell carries the Planted tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CropInstance {
    species: CropId,
    pos: TilePos,
    age: f32,
    max_age: f32,
    growth_rate: f32,
    y_offset: f32,
    harvestable: bool,
}

impl CropInstance {
    /// A fresh seedling of `species` at `pos`.
    pub fn plant(registry: &CropRegistry, species: &str, pos: TilePos) -> Result<Self, FarmError> {
        let def = registry
            .get(species)
            .ok_or_else(|| FarmError::InvalidSpecies(species.to_string()))?;
        Ok(Self {
            species: def.id.clone(),
            pos,
            age: 0.0,
            max_age: def.max_age(),
            growth_rate: def.growth_rate,
            y_offset: def.y_offset,
            harvestable: false,
        })
    }

    pub fn species(&self) -> &CropId {
        &self.species
    }

    pub fn pos(&self) -> TilePos {
        self.pos
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn max_age(&self) -> f32 {
        self.max_age
    }

    pub fn is_harvestable(&self) -> bool {
        self.harvestable
    }

    pub fn phase(&self) -> CropPhase {
        if self.harvestable {
            CropPhase::Harvestable
        } else {
            CropPhase::Growing
        }
    }

    /// Grow by one day. Dry soil means no growth.
    ///
    /// Returns true on the day the crop becomes harvestable.
    pub fn advance_day(&mut self, watered: bool) -> bool {
        if !watered {
            return false;
        }
        self.age += self.growth_rate;
        if self.age >= self.max_age {
            self.age = self.max_age;
            let ripened = !self.harvestable;
            self.harvestable = true;
            return ripened;
        }
        false
    }

    /// Consume a ripe crop, yielding its species.
    pub fn harvest(self) -> Result<CropId, (Self, FarmError)> {
        if !self.harvestable {
            let err = FarmError::not_ready(self.pos);
            return Err((self, err));
        }
        Ok(self.species)
    }

    /// Sprite frame for the current age.
    pub fn growth_frame(&self) -> usize {
        self.age.floor() as usize
    }

    /// Past the seedling frame the crop stands tall enough to block the player.
    pub fn is_solid(&self) -> bool {
        self.growth_frame() > 0
    }

    /// World-space sprite bounds, anchored on the soil tile's bottom edge.
    pub fn sprite_rect(&self) -> Rect {
        let size = crop_sprite_size(self.growth_frame(), self.max_age);
        let base = tile_midbottom(self.pos) + Vec2::new(0.0, self.y_offset);
        Rect::from_corners(base - Vec2::new(size.x * 0.5, 0.0), base + Vec2::new(size.x * 0.5, size.y))
    }

    /// Collision box of a grown crop: the sprite shrunk by 26 px across and
    /// 40 % of its height.
    pub fn hitbox(&self) -> Option<Rect> {
        if !self.is_solid() {
            return None;
        }
        let sprite = self.sprite_rect();
        let size = sprite.size() - Vec2::new(26.0, sprite.height() * 0.4);
        Some(Rect::from_center_size(sprite.center(), size.max(Vec2::ZERO)))
    }
}

/// Placeholder sprite size: a seedling is a third of a tile tall, a ripe crop
/// a full tile.
pub fn crop_sprite_size(frame: usize, max_age: f32) -> Vec2 {
    let progress = if max_age > 0.0 {
        (frame as f32 / max_age).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Vec2::new(CROP_SPRITE_WIDTH, TILE_SIZE * (1.0 / 3.0 + progress * 2.0 / 3.0))
}

/// Placeholder colour for a growth frame when no sprite sheet is loaded.
pub fn crop_stage_color(frame: usize, max_age: f32) -> Color {
    let progress = if max_age > 0.0 {
        (frame as f32 / max_age).clamp(0.0, 1.0)
    } else {
        1.0
    };
    // Pale seedling green to a ripe orange-green.
    let r = 0.45 * (1.0 - progress) + 0.85 * progress;
    let g = 0.75 - 0.15 * progress;
    let b = 0.25 * (1.0 - progress);
    Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CropRegistry {
        let mut registry = CropRegistry::default();
        for def in [
            CropDef {
                id: "corn".into(),
                name: "Corn".into(),
                growth_frames: 5,
                growth_rate: 1.0,
                y_offset: 16.0,
            },
            CropDef {
                id: "tomato".into(),
                name: "Tomato".into(),
                growth_frames: 4,
                growth_rate: 0.7,
                y_offset: 8.0,
            },
        ] {
            registry.crops.insert(def.id.clone(), def);
        }
        registry
    }

    #[test]
    fn unknown_species_is_rejected() {
        let err = CropInstance::plant(&registry(), "mandrake", TilePos::new(0, 0)).unwrap_err();
        assert_eq!(err, FarmError::InvalidSpecies("mandrake".into()));
    }

    #[test]
    fn dry_days_do_not_grow() {
        let registry = registry();
        for species in ["corn", "tomato"] {
            let mut crop = CropInstance::plant(&registry, species, TilePos::new(0, 0)).unwrap();
            crop.advance_day(true);
            let before = crop.age();
            for _ in 0..10 {
                assert!(!crop.advance_day(false));
            }
            assert_eq!(crop.age(), before, "{species} grew without water");
        }
    }

    #[test]
    fn watered_day_adds_exactly_the_growth_rate() {
        let mut crop = CropInstance::plant(&registry(), "tomato", TilePos::new(0, 0)).unwrap();
        crop.advance_day(true);
        assert!((crop.age() - 0.7).abs() < 1e-6);
        crop.advance_day(true);
        assert!((crop.age() - 1.4).abs() < 1e-6);
    }

    #[test]
    fn corn_ripens_after_four_watered_days_and_stays_clamped() {
        let mut crop = CropInstance::plant(&registry(), "corn", TilePos::new(2, 3)).unwrap();
        assert_eq!(crop.max_age(), 4.0);
        let mut ripened_on = Vec::new();
        for day in 1..=4 {
            if crop.advance_day(true) {
                ripened_on.push(day);
            }
        }
        assert_eq!(ripened_on, vec![4]);
        assert!(crop.is_harvestable());
        assert_eq!(crop.age(), 4.0);

        assert!(!crop.advance_day(true), "ripening is reported exactly once");
        assert_eq!(crop.age(), 4.0);
        assert!(crop.is_harvestable());
        assert!(!crop.advance_day(false));
        assert_eq!(crop.phase(), CropPhase::Harvestable);
    }

    #[test]
    fn tomato_watered_every_other_day_stalls() {
        let mut crop = CropInstance::plant(&registry(), "tomato", TilePos::new(0, 0)).unwrap();
        let mut days = 0;
        while !crop.is_harvestable() {
            days += 1;
            crop.advance_day(days % 2 == 1);
            assert!(days < 100, "tomato never ripened");
        }
        let continuous_days = (crop.max_age() / 0.7).ceil() as u32;
        assert!(days > continuous_days, "{days} days vs {continuous_days}");
    }

    #[test]
    fn harvest_requires_ripeness() {
        let crop = CropInstance::plant(&registry(), "corn", TilePos::new(1, 1)).unwrap();
        let (crop, err) = crop.harvest().unwrap_err();
        assert_eq!(err, FarmError::not_ready(TilePos::new(1, 1)));

        let mut crop = crop;
        for _ in 0..4 {
            crop.advance_day(true);
        }
        assert_eq!(crop.harvest().unwrap(), "corn");
    }

    #[test]
    fn seedlings_have_no_hitbox() {
        let mut crop = CropInstance::plant(&registry(), "corn", TilePos::new(0, 0)).unwrap();
        assert!(crop.hitbox().is_none());
        crop.advance_day(true);
        let hitbox = crop.hitbox().expect("grown corn is solid");
        assert!(crop.sprite_rect().contains(hitbox.center()));
        assert!(hitbox.width() < crop.sprite_rect().width());
    }

    #[test]
    fn sprite_sits_on_the_tile_bottom_plus_offset() {
        let crop = CropInstance::plant(&registry(), "corn", TilePos::new(0, 0)).unwrap();
        let rect = crop.sprite_rect();
        assert_eq!(rect.min.y, -TILE_SIZE + 16.0);
        assert_eq!(rect.center().x, TILE_SIZE * 0.5);
    }
}
