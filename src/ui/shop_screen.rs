use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ShopScreenRoot;

#[derive(Component)]
pub struct ShopGoldDisplay;

#[derive(Component)]
pub struct ShopListItem {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopItemAmount {
    pub index: usize,
}

#[derive(Component)]
pub struct ShopItemMode {
    pub index: usize,
}

const ROW_BG: Color = Color::srgb(0.95, 0.93, 0.88);
const ROW_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.0);
const ROW_BORDER_SELECTED: Color = Color::srgb(0.1, 0.1, 0.1);
const INK: Color = Color::srgb(0.1, 0.1, 0.1);

/// How many of a listing's goods the player holds: items for sale rows,
/// seeds for purchase rows.
pub fn listing_amount(listing: &ShopListing, inventory: &Inventory) -> u32 {
    match listing.action {
        ShopAction::Sell { .. } => inventory.item_count(&listing.item_id),
        ShopAction::BuySeed { .. } => inventory.seed_count(&listing.item_id),
    }
}

fn mode_label(listing: &ShopListing) -> String {
    match listing.action {
        ShopAction::Sell { price } => format!("sell {}g", price),
        ShopAction::BuySeed { price } => format!("buy {}g", price),
    }
}

fn ink_text(label: String, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(INK),
    )
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_shop_screen(
    mut commands: Commands,
    shop_data: Res<ShopData>,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
) {
    commands
        .spawn((
            ShopScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            ZIndex(1000),
        ))
        .with_children(|parent| {
            for (index, listing) in shop_data.listings.iter().enumerate() {
                parent
                    .spawn((
                        ShopListItem { index },
                        Node {
                            width: Val::Px(400.0),
                            flex_direction: FlexDirection::Row,
                            justify_content: JustifyContent::SpaceBetween,
                            align_items: AlignItems::Center,
                            padding: UiRect::axes(Val::Px(20.0), Val::Px(8.0)),
                            border: UiRect::all(Val::Px(4.0)),
                            ..default()
                        },
                        BackgroundColor(ROW_BG),
                        BorderColor(ROW_BORDER),
                        BorderRadius::all(Val::Px(4.0)),
                    ))
                    .with_children(|row| {
                        row.spawn(ink_text(listing.item_id.clone(), 24.0));
                        row.spawn((ShopItemMode { index }, ink_text(String::new(), 20.0)));
                        row.spawn((
                            ShopItemAmount { index },
                            ink_text(listing_amount(listing, &inventory).to_string(), 24.0),
                        ));
                    });
            }

            parent.spawn((
                ShopGoldDisplay,
                ink_text(format!("${}", player.gold), 24.0),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    padding: UiRect::all(Val::Px(5.0)),
                    ..default()
                },
                BackgroundColor(Color::WHITE),
            ));
        });
}

pub fn despawn_shop_screen(
    mut commands: Commands,
    query: Query<Entity, With<ShopScreenRoot>>,
) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_shop_screen(
    menu: Res<ShopMenu>,
    shop_data: Res<ShopData>,
    player: Res<PlayerState>,
    inventory: Res<Inventory>,
    mut rows: Query<(&ShopListItem, &mut BorderColor)>,
    mut modes: Query<(&ShopItemMode, &mut Text), (Without<ShopItemAmount>, Without<ShopGoldDisplay>)>,
    mut amounts: Query<(&ShopItemAmount, &mut Text), (Without<ShopItemMode>, Without<ShopGoldDisplay>)>,
    mut gold: Query<&mut Text, (With<ShopGoldDisplay>, Without<ShopItemMode>, Without<ShopItemAmount>)>,
) {
    for (row, mut border) in &mut rows {
        *border = if row.index == menu.cursor {
            BorderColor(ROW_BORDER_SELECTED)
        } else {
            BorderColor(ROW_BORDER)
        };
    }

    for (mode, mut text) in &mut modes {
        **text = match shop_data.listings.get(mode.index) {
            Some(listing) if mode.index == menu.cursor => mode_label(listing),
            _ => String::new(),
        };
    }

    if !inventory.is_changed() && !player.is_changed() {
        return;
    }
    for (amount, mut text) in &mut amounts {
        if let Some(listing) = shop_data.listings.get(amount.index) {
            **text = listing_amount(listing, &inventory).to_string();
        }
    }
    for mut text in &mut gold {
        **text = format!("${}", player.gold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_come_from_the_matching_stock() {
        let mut inventory = Inventory::default();
        inventory.add_seed("corn", 2);
        let sell = ShopListing { item_id: "corn".into(), action: ShopAction::Sell { price: 10 } };
        let buy = ShopListing { item_id: "corn".into(), action: ShopAction::BuySeed { price: 4 } };
        assert_eq!(listing_amount(&sell, &inventory), 20);
        assert_eq!(listing_amount(&buy, &inventory), 7);
        assert_eq!(mode_label(&buy), "buy 4g");
    }
}
