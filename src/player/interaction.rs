use bevy::prelude::*;
use crate::shared::*;

/// Interact key: lie down when standing at the bed, open the shop when
/// standing at the trader.
pub fn interact(
    input: Res<PlayerInput>,
    mut player_state: ResMut<PlayerState>,
    mut player_query: Query<(&Transform, &Hitbox, &mut PlayerMovement), With<Player>>,
    zones: Query<(&Transform, &InteractionZone), Without<Player>>,
    mut sleep_events: EventWriter<SleepRequestEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.interact || player_state.sleeping {
        return;
    }
    let Ok((transform, hitbox, mut movement)) = player_query.get_single_mut() else {
        return;
    };
    let player_rect = hitbox.rect_at(transform.translation.truncate());

    let Some(kind) = zones
        .iter()
        .find(|(zone_tf, zone)| {
            rects_overlap(
                Rect::from_center_size(zone_tf.translation.truncate(), zone.size),
                player_rect,
            )
        })
        .map(|(_, zone)| zone.kind)
    else {
        return;
    };

    match kind {
        InteractionKind::Bed => {
            info!("[Player] Going to bed");
            player_state.sleeping = true;
            movement.facing = Facing::Left;
            movement.is_moving = false;
            sleep_events.send(SleepRequestEvent);
        }
        InteractionKind::Trader => {
            info!("[Player] Opening the shop");
            next_state.set(GameState::Shop);
        }
    }
}
