use bevy::prelude::*;
use crate::shared::*;

/// Smoothly follow the player with the camera, clamped to map bounds.
pub fn camera_follow_player(
    time: Res<Time>,
    farm_map: Res<FarmMap>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &OrthographicProjection), (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_tf.translation.truncate();
    let current = cam_tf.translation.truncate();

    // Snap on teleports (first frame, new day), lerp otherwise.
    let smooth = if current.distance(target) > TILE_SIZE * 4.0 {
        target
    } else {
        let lerp_speed = 5.0;
        let t = (lerp_speed * time.delta_secs()).min(1.0);
        current + (target - current) * t
    };

    // Clamp so the viewport never shows past the map edge. The map spans
    // x in [0, width] and y in [-height, 0].
    let map_w = farm_map.cols as f32 * TILE_SIZE;
    let map_h = farm_map.rows as f32 * TILE_SIZE;

    let half_vw = projection.area.width() / 2.0 * cam_tf.scale.x;
    let half_vh = projection.area.height() / 2.0 * cam_tf.scale.y;

    let min_x = half_vw;
    let max_x = (map_w - half_vw).max(min_x);
    let max_y = -half_vh;
    let min_y = (-map_h + half_vh).min(max_y);

    cam_tf.translation.x = smooth.x.round().clamp(min_x, max_x);
    cam_tf.translation.y = smooth.y.round().clamp(min_y, max_y);
}
