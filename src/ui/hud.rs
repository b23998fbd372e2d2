use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS: used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudDayText;

#[derive(Component)]
pub struct HudGoldText;

#[derive(Component)]
pub struct HudToolText;

#[derive(Component)]
pub struct HudSeedText;

// ═══════════════════════════════════════════════════════════════════════
// LABELS
// ═══════════════════════════════════════════════════════════════════════

pub fn day_label(calendar: &Calendar) -> String {
    if calendar.raining {
        format!("Day {} - Rain", calendar.day)
    } else {
        format!("Day {}", calendar.day)
    }
}

/// Selected seed and how many are left, e.g. "Corn seeds x5".
pub fn seed_label(player: &PlayerState, inventory: &Inventory) -> String {
    match player.selected_seed() {
        Some(seed) => {
            let mut name = seed.clone();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            format!("{} seeds x{}", name, inventory.seed_count(seed))
        }
        None => "No seeds".to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

fn hud_text(label: &str, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

pub fn spawn_hud(
    mut commands: Commands,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
    calendar: Res<Calendar>,
) {
    // Root container: full screen overlay, no interaction blocking
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR: day and gold ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(44.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    top_bar.spawn((HudDayText, hud_text(&day_label(&calendar), 18.0)));
                    top_bar.spawn((
                        HudGoldText,
                        hud_text(&format!("{} G", player.gold), 18.0),
                    ));
                });

            // ─── BOTTOM BAR: tool and seed ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(40.0),
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(24.0),
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bottom_bar| {
                    bottom_bar.spawn((
                        HudToolText,
                        hud_text(player.equipped_tool.label(), 16.0),
                    ));
                    bottom_bar.spawn((
                        HudSeedText,
                        hud_text(&seed_label(&player, &inventory), 16.0),
                    ));
                });
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_day_display(
    calendar: Res<Calendar>,
    mut query: Query<&mut Text, With<HudDayText>>,
) {
    if !calendar.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = day_label(&calendar);
    }
}

pub fn update_gold_display(
    player: Res<PlayerState>,
    mut query: Query<&mut Text, With<HudGoldText>>,
) {
    if !player.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = format!("{} G", player.gold);
    }
}

pub fn update_tool_display(
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
    mut tool_query: Query<&mut Text, (With<HudToolText>, Without<HudSeedText>)>,
    mut seed_query: Query<&mut Text, (With<HudSeedText>, Without<HudToolText>)>,
) {
    if !player.is_changed() && !inventory.is_changed() {
        return;
    }
    for mut text in &mut tool_query {
        **text = player.equipped_tool.label().to_string();
    }
    for mut text in &mut seed_query {
        **text = seed_label(&player, &inventory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let mut player = PlayerState::default();
        let inventory = Inventory::default();
        assert_eq!(seed_label(&player, &inventory), "Corn seeds x5");
        player.cycle_seed();
        assert_eq!(seed_label(&player, &inventory), "Tomato seeds x5");
        player.seed_cycle.clear();
        assert_eq!(seed_label(&player, &inventory), "No seeds");

        assert_eq!(day_label(&Calendar { day: 3, raining: true }), "Day 3 - Rain");
    }
}
