//! Player domain: movement, delayed tool and seed actions, and the
//! interact key for the bed and the trader.

mod camera;
mod interaction;
mod movement;
mod spawn;
mod tools;

use bevy::prelude::*;
use crate::shared::*;

pub use movement::facing_for;
pub use tools::tool_target;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                // tool_use starts the movement lock; must run before movement reads it
                tools::tool_use.before(movement::player_movement),
                tools::tool_cycle,
                movement::player_movement,
                interaction::interact.after(movement::player_movement),
                camera::camera_follow_player.after(movement::player_movement),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Local components (player-domain only)
// ═══════════════════════════════════════════════════════════════════════════

/// Rate limits for the player's actions.
///
/// Using a tool or a seed takes effect when its lock releases, aimed at the
/// tile in front of the player at that moment. The tool lock also freezes
/// movement.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerActions {
    pub tool_use: ActionLock,
    pub tool_switch: ActionLock,
    pub seed_use: ActionLock,
    pub seed_switch: ActionLock,
}
