//! Economy domain: the trader, the inventory ledger and trade stats.
//!
//! All cross-domain communication goes through `crate::shared::*` events and resources.
//! No other domain module is imported here.

use bevy::prelude::*;
use crate::shared::*;

pub mod shop;
pub mod stats;

use shop::{handle_trade, shop_navigation, TradeRequestEvent};
use stats::{track_crop_harvests, track_transactions, EconomyStats, HarvestStats};

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        // ── Resources ──────────────────────────────────────────────────────
        app.init_resource::<EconomyStats>()
            .init_resource::<HarvestStats>()
            .init_resource::<ShopMenu>();

        // ── Internal Events ────────────────────────────────────────────────
        app.add_event::<TradeRequestEvent>();

        // ── Systems: Shop state ────────────────────────────────────────────
        app.add_systems(
            Update,
            (shop_navigation, handle_trade)
                .chain()
                .run_if(in_state(GameState::Shop)),
        );

        // ── Systems: any state ─────────────────────────────────────────────
        // Pickups and stats can arrive on the frame a state changes.
        app.add_systems(
            Update,
            (apply_item_pickups, track_crop_harvests, track_transactions),
        );
    }
}

/// Credit picked-up items to the inventory.
pub fn apply_item_pickups(
    mut pickup_events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
) {
    for ev in pickup_events.read() {
        inventory.add_item(&ev.item_id, ev.quantity);
        debug!(
            "[Economy] +{} {} ({} held)",
            ev.quantity,
            ev.item_id,
            inventory.item_count(&ev.item_id)
        );
    }
}
