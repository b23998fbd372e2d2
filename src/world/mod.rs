//! World domain plugin for Sproutland.
//!
//! Responsible for:
//! - Spawning the farm ground and the bed and trader interaction zones
//! - The sky tint that darkens through the day
//! - The full-screen overlays for the sky and the sleep fade

use bevy::prelude::*;

use crate::shared::*;

pub mod lighting;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Playing),
            (spawn_farm, lighting::spawn_overlays),
        )
        .add_systems(
            Update,
            (lighting::darken_sky, lighting::reset_sky_on_day_end)
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        // Overlays keep drawing while the shop is open.
        .add_systems(PostUpdate, lighting::update_overlays);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for entities that belong to the farm scene.
#[derive(Component, Debug)]
pub struct FarmScenery;

const GROUND_Z: f32 = 0.0;
const ZONE_Z: f32 = 1.0;

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// World-space box of an interaction zone: its centre and size.
pub fn zone_bounds(rect: TileRect) -> (Vec2, Vec2) {
    let world = rect.world_rect();
    (world.center(), world.size())
}

fn zone_color(kind: InteractionKind) -> Color {
    match kind {
        InteractionKind::Bed => Color::srgb(0.75, 0.30, 0.30),
        InteractionKind::Trader => Color::srgb(0.85, 0.70, 0.25),
    }
}

/// Spawn the ground and the interaction zones once per session.
pub fn spawn_farm(
    mut commands: Commands,
    farm_map: Res<FarmMap>,
    existing: Query<Entity, With<FarmScenery>>,
) {
    // Guard: the shop returns to Playing without a new farm.
    if !existing.is_empty() {
        return;
    }

    let ground = TileRect {
        col: 0,
        row: 0,
        cols: farm_map.cols as i32,
        rows: farm_map.rows as i32,
    }
    .world_rect();
    commands.spawn((
        FarmScenery,
        Sprite {
            color: Color::srgb(0.36, 0.60, 0.32),
            custom_size: Some(ground.size()),
            ..default()
        },
        Transform::from_translation(ground.center().extend(GROUND_Z)),
    ));

    let zones = [
        (InteractionKind::Bed, farm_map.bed),
        (InteractionKind::Trader, farm_map.trader),
    ];
    for (kind, rect) in zones {
        let Some(rect) = rect else {
            warn!("[World] Farm map has no {:?}", kind);
            continue;
        };
        let (centre, size) = zone_bounds(rect);
        commands.spawn((
            FarmScenery,
            InteractionZone { kind, size },
            Sprite {
                color: zone_color(kind),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(centre.extend(ZONE_Z)),
        ));
    }

    info!(
        "[World] Farm spawned: {}x{} tiles",
        farm_map.cols, farm_map.rows
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_bounds_cover_their_tiles() {
        let (centre, size) = zone_bounds(TileRect { col: 3, row: 4, cols: 2, rows: 1 });
        assert_eq!(size, Vec2::new(2.0 * TILE_SIZE, TILE_SIZE));
        assert_eq!(centre, Vec2::new(4.0 * TILE_SIZE, -4.5 * TILE_SIZE));
    }
}
