use bevy::prelude::*;
use crate::shared::*;
use super::PlayerActions;

/// Spawn the player entity with all necessary components.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    farm_map: Res<FarmMap>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn when the shop closes.
    if !existing.is_empty() {
        return;
    }

    let start = tile_center(farm_map.player_start);

    commands.spawn((
        Player,
        PlayerMovement::default(),
        PlayerActions::default(),
        Hitbox { size: PLAYER_HITBOX },
        // Placeholder sprite, a blue rectangle the size of the hitbox
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(PLAYER_HITBOX),
            ..default()
        },
        // Z = 10 so the player draws above soil and crops.
        Transform::from_translation(start.extend(10.0)),
        Visibility::default(),
    ));
}
