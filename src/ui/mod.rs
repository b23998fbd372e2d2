//! UI domain: HUD, trader menu and sound playback.

pub mod audio;
pub mod hud;
pub mod shop_screen;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<audio::MusicState>();

        // ─── HUD: visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_day_display,
                hud::update_gold_display,
                hud::update_tool_display,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── SHOP ───
        app.add_systems(OnEnter(GameState::Shop), shop_screen::spawn_shop_screen);
        app.add_systems(OnExit(GameState::Shop), shop_screen::despawn_shop_screen);
        app.add_systems(
            Update,
            shop_screen::update_shop_screen.run_if(in_state(GameState::Shop)),
        );

        // ─── AUDIO: sfx can arrive in any state ───
        app.add_systems(OnEnter(GameState::Playing), audio::start_game_music);
        app.add_systems(Update, audio::handle_play_sfx);
    }
}
