use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (manage_input_context, reset_and_read_input).chain(),
        );
    }
}

/// The single point where hardware input becomes game actions.
pub fn reset_and_read_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    // Headless apps run without a keyboard.
    let Some(keys) = keys else {
        return;
    };

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis;

            input.tool_use = keys.pressed(KeyCode::Space);
            input.tool_switch = keys.pressed(KeyCode::KeyQ);
            input.seed_use = keys.pressed(KeyCode::ControlLeft);
            input.seed_switch = keys.pressed(KeyCode::KeyE);
            input.interact = keys.just_pressed(KeyCode::Enter);
        }

        InputContext::Menu => {
            input.ui_up = keys.pressed(KeyCode::ArrowUp);
            input.ui_down = keys.pressed(KeyCode::ArrowDown);
            input.ui_confirm = keys.pressed(KeyCode::Space);
            input.ui_cancel = keys.just_pressed(KeyCode::Escape);
        }
    }
}

/// Derives InputContext from GameState. ONE system, replaces all per-domain guards.
pub fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Shop => InputContext::Menu,
    };
}
