use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MUSIC STATE: tracks the currently playing music entity
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
}

const FARM_MUSIC: &str = "audio/music/farm.ogg";

// ═══════════════════════════════════════════════════════════════════════
// SFX PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps SFX IDs (sent by other domains) to actual audio file paths.
pub fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "hoe" => Some("audio/sfx/hoe.ogg"),
        "water" => Some("audio/sfx/water.ogg"),
        "plant" => Some("audio/sfx/plant.ogg"),
        "success" => Some("audio/sfx/success.ogg"),
        "menu_move" => Some("audio/sfx/menu_move.ogg"),
        "purchase" => Some("audio/sfx/purchase.ogg"),
        "sell" => Some("audio/sfx/sell.ogg"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Listen for PlaySfxEvent and spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        match sfx_path(&event.sfx_id) {
            Some(path) => {
                commands.spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::DESPAWN,
                ));
            }
            None => debug!("[Audio] No sound for '{}'", event.sfx_id),
        }
    }
}

/// Start the looping farm music the first time we enter Playing.
pub fn start_game_music(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut music_state: ResMut<MusicState>,
) {
    // Skip if music is already playing (avoids restart on Shop→Playing).
    if music_state.current_track.is_some() {
        return;
    }
    let entity = commands
        .spawn((
            AudioPlayer::new(asset_server.load(FARM_MUSIC)),
            PlaybackSettings::LOOP,
        ))
        .id();
    music_state.current_track = Some(entity);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_game_sound_has_a_file() {
        for id in ["hoe", "water", "plant", "success", "menu_move", "purchase", "sell"] {
            assert!(sfx_path(id).is_some(), "missing sound for {}", id);
        }
        assert_eq!(sfx_path("thunder"), None);
    }
}
