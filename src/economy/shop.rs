use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Events (internal, used to drive transactions from menu input)
// ─────────────────────────────────────────────────────────────────────────────

/// Fired by the menu when the player confirms the highlighted listing.
#[derive(Event, Debug, Clone)]
pub struct TradeRequestEvent {
    pub listing: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Trade one unit of `listing`. Returns false, changing nothing, when the
/// player has none of the item to sell or cannot afford the seed.
pub fn apply_transaction(
    inventory: &mut Inventory,
    player_state: &mut PlayerState,
    listing: &ShopListing,
) -> bool {
    match listing.action {
        ShopAction::Sell { price } => {
            if !inventory.try_remove_item(&listing.item_id, 1) {
                return false;
            }
            player_state.gold = player_state.gold.saturating_add(price);
            true
        }
        ShopAction::BuySeed { price } => {
            if player_state.gold < price {
                return false;
            }
            player_state.gold -= price;
            inventory.add_seed(&listing.item_id, 1);
            true
        }
    }
}

/// Step the cursor by `delta`, wrapping around both ends of the list.
pub fn move_cursor(cursor: usize, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    (cursor as i64 + delta as i64).rem_euclid(len as i64) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Up/Down move the cursor, Space trades, Escape closes the shop.
/// Movement and trading share one repeat lock.
pub fn shop_navigation(
    time: Res<Time>,
    input: Res<PlayerInput>,
    shop_data: Res<ShopData>,
    mut menu: ResMut<ShopMenu>,
    mut trade_events: EventWriter<TradeRequestEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    menu.lock.tick(time.delta());

    if input.ui_cancel {
        info!("[Economy] Leaving the shop");
        next_state.set(GameState::Playing);
        return;
    }

    let len = shop_data.listings.len();
    menu.cursor = menu.cursor.min(len.saturating_sub(1));
    if menu.lock.is_active() || len == 0 {
        return;
    }

    if input.ui_up {
        menu.cursor = move_cursor(menu.cursor, len, -1);
        menu.lock.start(MENU_REPEAT_SECS);
        sfx_events.send(PlaySfxEvent::new("menu_move"));
    } else if input.ui_down {
        menu.cursor = move_cursor(menu.cursor, len, 1);
        menu.lock.start(MENU_REPEAT_SECS);
        sfx_events.send(PlaySfxEvent::new("menu_move"));
    }

    if input.ui_confirm {
        menu.lock.start(MENU_REPEAT_SECS);
        trade_events.send(TradeRequestEvent { listing: menu.cursor });
    }
}

/// Processes TradeRequestEvents: the core buy and sell flow.
pub fn handle_trade(
    mut trade_events: EventReader<TradeRequestEvent>,
    shop_data: Res<ShopData>,
    mut inventory: ResMut<Inventory>,
    mut player_state: ResMut<PlayerState>,
    mut transaction_writer: EventWriter<ShopTransactionEvent>,
    mut removed_writer: EventWriter<ItemRemovedEvent>,
    mut sfx_writer: EventWriter<PlaySfxEvent>,
) {
    for ev in trade_events.read() {
        let Some(listing) = shop_data.listings.get(ev.listing) else {
            warn!("[Economy] Trade failed: no listing at index {}", ev.listing);
            continue;
        };

        if !apply_transaction(&mut inventory, &mut player_state, listing) {
            debug!(
                "[Economy] Trade refused for '{}' ({}g held)",
                listing.item_id, player_state.gold
            );
            continue;
        }

        let price = listing.action.price();
        let is_purchase = listing.action.is_purchase();
        if is_purchase {
            sfx_writer.send(PlaySfxEvent::new("purchase"));
            info!(
                "[Economy] Bought a {} seed for {}g. Remaining gold: {}g",
                listing.item_id, price, player_state.gold
            );
        } else {
            removed_writer.send(ItemRemovedEvent {
                item_id: listing.item_id.clone(),
                quantity: 1,
            });
            sfx_writer.send(PlaySfxEvent::new("sell"));
            info!(
                "[Economy] Sold a {} for {}g. New balance: {}g",
                listing.item_id, price, player_state.gold
            );
        }

        transaction_writer.send(ShopTransactionEvent {
            item_id: listing.item_id.clone(),
            price,
            is_purchase,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sell(item: &str, price: u32) -> ShopListing {
        ShopListing { item_id: item.into(), action: ShopAction::Sell { price } }
    }

    fn buy(item: &str, price: u32) -> ShopListing {
        ShopListing { item_id: item.into(), action: ShopAction::BuySeed { price } }
    }

    #[test]
    fn selling_needs_stock() {
        let mut inventory = Inventory::default();
        let mut player = PlayerState::default();
        inventory.items.insert("apple".into(), 1);

        assert!(apply_transaction(&mut inventory, &mut player, &sell("apple", 2)));
        assert_eq!(player.gold, STARTING_GOLD + 2);
        assert_eq!(inventory.item_count("apple"), 0);

        assert!(!apply_transaction(&mut inventory, &mut player, &sell("apple", 2)));
        assert_eq!(player.gold, STARTING_GOLD + 2);
    }

    #[test]
    fn buying_needs_gold() {
        let mut inventory = Inventory::default();
        let mut player = PlayerState { gold: 5, ..default() };

        assert!(apply_transaction(&mut inventory, &mut player, &buy("tomato", 5)));
        assert_eq!(player.gold, 0);
        assert_eq!(inventory.seed_count("tomato"), 6);

        assert!(!apply_transaction(&mut inventory, &mut player, &buy("tomato", 5)));
        assert_eq!(inventory.seed_count("tomato"), 6);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        assert_eq!(move_cursor(0, 6, -1), 5);
        assert_eq!(move_cursor(5, 6, 1), 0);
        assert_eq!(move_cursor(2, 6, 1), 3);
        assert_eq!(move_cursor(0, 0, 1), 0);
    }
}
