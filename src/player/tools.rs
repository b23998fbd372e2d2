use bevy::prelude::*;
use crate::shared::*;
use super::PlayerActions;

/// The tile a tool or seed lands on for a player standing at `centre`.
pub fn tool_target(centre: Vec2, facing: Facing) -> TilePos {
    world_to_tile(centre + facing.tool_offset())
}

/// Run the tool and seed locks, send a farm intent when one releases, and
/// start new uses from input.
///
/// Intents are only sent for tiles on the farm map; the farming domain
/// treats anything else as a broken contract.
pub fn tool_use(
    time: Res<Time>,
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    farm_map: Res<FarmMap>,
    mut query: Query<(&Transform, &PlayerMovement, &mut PlayerActions), With<Player>>,
    mut intent_events: EventWriter<FarmIntentEvent>,
) {
    let Ok((transform, movement, mut actions)) = query.get_single_mut() else {
        return;
    };
    let target = tool_target(transform.translation.truncate(), movement.facing);
    let on_map = farm_map.contains(target);

    if actions.tool_use.tick(time.delta()) && on_map {
        let intent = match player_state.equipped_tool {
            ToolKind::Hoe => FarmIntent::Till(target),
            ToolKind::WateringCan => FarmIntent::Water(target),
        };
        intent_events.send(FarmIntentEvent(intent));
    }

    if actions.seed_use.tick(time.delta()) && on_map {
        if let Some(species) = player_state.selected_seed() {
            intent_events.send(FarmIntentEvent(FarmIntent::Plant {
                pos: target,
                species: species.clone(),
            }));
        }
    }

    if player_state.sleeping || actions.tool_use.is_active() {
        return;
    }

    if input.tool_use {
        actions.tool_use.start(TOOL_USE_SECS);
    }
    if input.seed_use && !actions.seed_use.is_active() {
        actions.seed_use.start(SEED_USE_SECS);
    }
}

/// Cycle the equipped tool (Q) and the selected seed (E).
pub fn tool_cycle(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut player_state: ResMut<PlayerState>,
    mut query: Query<&mut PlayerActions, With<Player>>,
) {
    let Ok(mut actions) = query.get_single_mut() else {
        return;
    };
    actions.tool_switch.tick(time.delta());
    actions.seed_switch.tick(time.delta());

    if player_state.sleeping || actions.tool_use.is_active() {
        return;
    }

    if input.tool_switch && !actions.tool_switch.is_active() {
        actions.tool_switch.start(TOOL_SWITCH_SECS);
        player_state.equipped_tool = player_state.equipped_tool.next();
        debug!("[Player] Equipped {}", player_state.equipped_tool.label());
    }

    if input.seed_switch && !actions.seed_switch.is_active() {
        actions.seed_switch.start(SEED_SWITCH_SECS);
        player_state.cycle_seed();
    }
}
