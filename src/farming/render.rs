//! Visual synchronisation systems. Keep soil, water and crop sprites in step
//! with the `SoilLayer`. Read-only with respect to farm state.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::shared::*;
use super::autotile::SoilVariant;
use super::crops::{crop_sprite_size, crop_stage_color};
use super::{FarmEntities, SoilLayer};

/// Marker for a plowed-soil sprite; `variant` selects the auto-tile frame.
#[derive(Component, Debug, Clone)]
pub struct SoilSprite {
    pub pos: TilePos,
    pub variant: SoilVariant,
}

#[derive(Component, Debug, Clone)]
pub struct WaterSprite {
    pub pos: TilePos,
    pub variant: u8,
}

#[derive(Component, Debug, Clone)]
pub struct CropSprite {
    pub pos: TilePos,
    pub frame: usize,
}

// Draw order, back to front.
const SOIL_Z: f32 = 2.0;
const WATER_Z: f32 = 3.0;
const CROP_Z: f32 = 5.0;

// ─────────────────────────────────────────────────────────────────────────────
// Placeholder colours
// ─────────────────────────────────────────────────────────────────────────────

/// Plowed soil is brown; joined furrows read a shade darker than loose ends.
fn soil_color(variant: SoilVariant) -> Color {
    match variant {
        SoilVariant::Isolated => Color::srgb(0.50, 0.36, 0.22),
        SoilVariant::Full => Color::srgb(0.40, 0.28, 0.17),
        _ => Color::srgb(0.45, 0.32, 0.20),
    }
}

fn water_color(variant: u8) -> Color {
    let shade = 0.04 * variant as f32;
    Color::srgba(0.18 + shade, 0.22 + shade, 0.35, 0.55)
}

/// Despawn every entity in `entities` whose tile is no longer in `live`.
fn despawn_stale(
    commands: &mut Commands,
    entities: &mut HashMap<TilePos, Entity>,
    live: &HashSet<TilePos>,
) {
    let stale: Vec<TilePos> = entities
        .keys()
        .filter(|pos| !live.contains(pos))
        .copied()
        .collect();
    for pos in stale {
        if let Some(entity) = entities.remove(&pos) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Soil
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_soil_sprites(
    mut commands: Commands,
    soil: Res<SoilLayer>,
    mut farm_entities: ResMut<FarmEntities>,
    mut query: Query<(&mut SoilSprite, &mut Sprite)>,
) {
    if !soil.is_changed() {
        return;
    }

    let visuals: HashMap<TilePos, SoilVariant> = soil.soil_visuals().iter().copied().collect();

    for (mut tile, mut sprite) in query.iter_mut() {
        if let Some(&variant) = visuals.get(&tile.pos) {
            tile.variant = variant;
            sprite.color = soil_color(variant);
        }
    }

    for (&pos, &variant) in &visuals {
        if farm_entities.soil_entities.contains_key(&pos) {
            continue;
        }
        let entity = commands
            .spawn((
                Sprite {
                    color: soil_color(variant),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(tile_center(pos).extend(SOIL_Z)),
                SoilSprite { pos, variant },
            ))
            .id();
        farm_entities.soil_entities.insert(pos, entity);
    }

    let live: HashSet<TilePos> = visuals.keys().copied().collect();
    despawn_stale(&mut commands, &mut farm_entities.soil_entities, &live);
}

// ─────────────────────────────────────────────────────────────────────────────
// Water
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_water_sprites(
    mut commands: Commands,
    soil: Res<SoilLayer>,
    mut farm_entities: ResMut<FarmEntities>,
) {
    if !soil.is_changed() {
        return;
    }

    let mut live = HashSet::new();
    for (pos, variant) in soil.water_visuals() {
        live.insert(pos);
        if farm_entities.water_entities.contains_key(&pos) {
            continue;
        }
        let entity = commands
            .spawn((
                Sprite {
                    color: water_color(variant),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(tile_center(pos).extend(WATER_Z)),
                WaterSprite { pos, variant },
            ))
            .id();
        farm_entities.water_entities.insert(pos, entity);
    }

    despawn_stale(&mut commands, &mut farm_entities.water_entities, &live);
}

// ─────────────────────────────────────────────────────────────────────────────
// Crops
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_crop_sprites(
    mut commands: Commands,
    soil: Res<SoilLayer>,
    mut farm_entities: ResMut<FarmEntities>,
    mut query: Query<(&mut CropSprite, &mut Sprite, &mut Transform)>,
) {
    if !soil.is_changed() {
        return;
    }

    for (mut tile, mut sprite, mut transform) in query.iter_mut() {
        let Some(crop) = soil.crop_at(tile.pos) else {
            continue;
        };
        if tile.frame == crop.growth_frame() {
            continue;
        }
        tile.frame = crop.growth_frame();
        let rect = crop.sprite_rect();
        sprite.color = crop_stage_color(tile.frame, crop.max_age());
        sprite.custom_size = Some(crop_sprite_size(tile.frame, crop.max_age()));
        transform.translation = rect.center().extend(CROP_Z);
    }

    let mut live = HashSet::new();
    for crop in soil.crops() {
        let pos = crop.pos();
        live.insert(pos);
        if farm_entities.crop_entities.contains_key(&pos) {
            continue;
        }
        let frame = crop.growth_frame();
        let entity = commands
            .spawn((
                Sprite {
                    color: crop_stage_color(frame, crop.max_age()),
                    custom_size: Some(crop_sprite_size(frame, crop.max_age())),
                    ..default()
                },
                Transform::from_translation(crop.sprite_rect().center().extend(CROP_Z)),
                CropSprite { pos, frame },
            ))
            .id();
        farm_entities.crop_entities.insert(pos, entity);
    }

    despawn_stale(&mut commands, &mut farm_entities.crop_entities, &live);
}
