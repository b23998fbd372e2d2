use bevy::prelude::*;
use crate::shared::*;
use super::PlayerActions;

/// Core movement system. Reads the arrow-key axis, applies velocity, updates
/// facing and keeps the player inside the farm map.
///
/// The player stands still while sleeping and while a tool swing is running.
/// Collision is axis-separated so the player can slide along grown crops.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    farm_map: Res<FarmMap>,
    collision_map: Res<CollisionMap>,
    mut query: Query<(&mut Transform, &mut PlayerMovement, &PlayerActions, &Hitbox), With<Player>>,
) {
    let Ok((mut transform, mut movement, actions, hitbox)) = query.get_single_mut() else {
        return;
    };

    if player_state.sleeping || actions.tool_use.is_active() || input.move_axis == Vec2::ZERO {
        movement.is_moving = false;
        return;
    }

    movement.is_moving = true;
    movement.facing = facing_for(input.move_axis, movement.facing);

    // Normalise so diagonal speed equals cardinal speed.
    let delta = input.move_axis.normalize() * movement.speed * time.delta_secs();
    let current = transform.translation.truncate();

    let candidate_x = clamp_to_map(current + Vec2::new(delta.x, 0.0), &farm_map);
    if !is_blocked(hitbox, current, candidate_x, &collision_map) {
        transform.translation.x = candidate_x.x;
    }
    let current = transform.translation.truncate();
    let candidate_y = clamp_to_map(current + Vec2::new(0.0, delta.y), &farm_map);
    if !is_blocked(hitbox, current, candidate_y, &collision_map) {
        transform.translation.y = candidate_y.y;
    }
}

/// Whether stepping from `from` to `to` walks into a solid. Solids the
/// player already overlaps do not block, so a crop that grew underfoot
/// cannot trap them.
fn is_blocked(hitbox: &Hitbox, from: Vec2, to: Vec2, collision_map: &CollisionMap) -> bool {
    let before = hitbox.rect_at(from);
    let after = hitbox.rect_at(to);
    collision_map
        .solids
        .iter()
        .any(|&solid| rects_overlap(solid, after) && !rects_overlap(solid, before))
}

/// Facing for a movement axis. Horizontal input wins on diagonals; no input
/// keeps the current facing.
pub fn facing_for(axis: Vec2, current: Facing) -> Facing {
    if axis.x > 0.0 {
        Facing::Right
    } else if axis.x < 0.0 {
        Facing::Left
    } else if axis.y > 0.0 {
        Facing::Up
    } else if axis.y < 0.0 {
        Facing::Down
    } else {
        current
    }
}

/// Keep a world point on the map. Maps grow toward negative y.
fn clamp_to_map(point: Vec2, farm_map: &FarmMap) -> Vec2 {
    let width = farm_map.cols as f32 * TILE_SIZE;
    let height = farm_map.rows as f32 * TILE_SIZE;
    Vec2::new(point.x.clamp(0.0, width), point.y.clamp(-height, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_wins_on_diagonals() {
        assert_eq!(facing_for(Vec2::new(1.0, 1.0), Facing::Down), Facing::Right);
        assert_eq!(facing_for(Vec2::new(-1.0, -1.0), Facing::Up), Facing::Left);
        assert_eq!(facing_for(Vec2::new(0.0, 1.0), Facing::Left), Facing::Up);
        assert_eq!(facing_for(Vec2::ZERO, Facing::Left), Facing::Left);
    }

    #[test]
    fn solids_block_entry_but_not_exit() {
        let hitbox = Hitbox { size: Vec2::splat(10.0) };
        let map = CollisionMap { solids: vec![Rect::new(20.0, 0.0, 30.0, 10.0)] };

        assert!(is_blocked(&hitbox, Vec2::new(5.0, 5.0), Vec2::new(18.0, 5.0), &map));
        assert!(!is_blocked(&hitbox, Vec2::new(5.0, 5.0), Vec2::new(10.0, 5.0), &map));
        // Already inside: free to walk out.
        assert!(!is_blocked(&hitbox, Vec2::new(25.0, 5.0), Vec2::new(20.0, 5.0), &map));
    }

    #[test]
    fn clamp_keeps_player_on_the_map() {
        let map = FarmMap { cols: 4, rows: 2, ..default() };
        assert_eq!(clamp_to_map(Vec2::new(-10.0, 10.0), &map), Vec2::new(0.0, 0.0));
        assert_eq!(
            clamp_to_map(Vec2::new(1000.0, -1000.0), &map),
            Vec2::new(4.0 * TILE_SIZE, -2.0 * TILE_SIZE)
        );
    }
}
