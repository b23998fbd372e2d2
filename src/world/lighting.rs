//! Sky tint and sleep-fade overlays.
//!
//! The sky starts each day white and drifts toward evening blue. A full
//! screen UI node tints the scene with it; a second node on top of it draws
//! the black of the sleep transition.

use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker component for the full-screen sky overlay entity.
#[derive(Component, Debug)]
pub struct SkyOverlay;

/// Marker component for the full-screen sleep fade overlay entity.
#[derive(Component, Debug)]
pub struct FadeOverlay;

// ═══════════════════════════════════════════════════════════════════════
// TINT MATH
// ═══════════════════════════════════════════════════════════════════════

/// Move each channel toward the night colour. Channels already at or below
/// their night value stay put.
pub fn decay_tint(tint: &mut SkyTint, dt: f32) {
    for (channel, night) in tint.color.iter_mut().zip(SKY_NIGHT_COLOR) {
        if *channel > night {
            *channel = (*channel - SKY_DARKEN_RATE * dt).max(night);
        }
    }
}

/// Overlay colour for a tint. White is fully transparent; darker tints show
/// through more strongly.
pub fn sky_overlay_color(tint: &SkyTint) -> Color {
    let [r, g, b] = tint.color;
    let darkness = (1.0 - (r + g + b) / (3.0 * 255.0)).clamp(0.0, 1.0);
    Color::srgba(r / 255.0, g / 255.0, b / 255.0, darkness)
}

pub fn fade_overlay_color(fade: &ScreenFade) -> Color {
    let alpha = (1.0 - fade.brightness / 255.0).clamp(0.0, 1.0);
    Color::srgba(0.0, 0.0, 0.0, alpha)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn overlay_node() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(0.0),
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    }
}

/// Spawn both overlays the first time we enter Playing.
pub fn spawn_overlays(mut commands: Commands, existing: Query<Entity, With<SkyOverlay>>) {
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        SkyOverlay,
        overlay_node(),
        // Start fully transparent
        BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
        ZIndex(900),
        // Don't block mouse/touch input
        PickingBehavior::IGNORE,
    ));
    commands.spawn((
        FadeOverlay,
        overlay_node(),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        ZIndex(950),
        PickingBehavior::IGNORE,
    ));
}

pub fn darken_sky(time: Res<Time>, mut tint: ResMut<SkyTint>) {
    decay_tint(&mut tint, time.delta_secs());
}

/// A new day starts under a white sky.
pub fn reset_sky_on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut tint: ResMut<SkyTint>,
) {
    if day_end_events.read().last().is_some() {
        *tint = SkyTint::default();
    }
}

pub fn update_overlays(
    tint: Res<SkyTint>,
    fade: Res<ScreenFade>,
    mut sky_query: Query<&mut BackgroundColor, (With<SkyOverlay>, Without<FadeOverlay>)>,
    mut fade_query: Query<&mut BackgroundColor, (With<FadeOverlay>, Without<SkyOverlay>)>,
) {
    for mut bg in &mut sky_query {
        *bg = BackgroundColor(sky_overlay_color(&tint));
    }
    for mut bg in &mut fade_query {
        *bg = BackgroundColor(fade_overlay_color(&fade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_settles_on_night_colour() {
        let mut tint = SkyTint::default();
        decay_tint(&mut tint, 1.0);
        assert_eq!(tint.color, [253.0, 253.0, 253.0]);

        // A long afternoon: every channel bottoms out at its own night value.
        decay_tint(&mut tint, 10_000.0);
        assert_eq!(tint.color, SKY_NIGHT_COLOR);
    }

    #[test]
    fn white_sky_is_invisible() {
        let color = sky_overlay_color(&SkyTint::default()).to_srgba();
        assert_eq!(color.alpha, 0.0);

        let dusk = sky_overlay_color(&SkyTint { color: SKY_NIGHT_COLOR }).to_srgba();
        assert!(dusk.alpha > 0.5);
    }

    #[test]
    fn fade_overlay_tracks_brightness() {
        assert_eq!(fade_overlay_color(&ScreenFade::default()).to_srgba().alpha, 0.0);
        assert_eq!(
            fade_overlay_color(&ScreenFade { brightness: 0.0 }).to_srgba().alpha,
            1.0
        );
    }
}
