use crate::shared::*;

/// Populate the trader's listings.
///
/// The menu shows everything the trader buys from the player first, then the
/// seeds the trader sells.
pub fn populate_shops(shop_data: &mut ShopData) {
    // ── Sold by the player ────────────────────────────────────────
    let sell = [("wood", 4), ("apple", 2), ("corn", 10), ("tomato", 20)];
    // ── Bought by the player ──────────────────────────────────────
    let buy = [("corn", 4), ("tomato", 5)];

    shop_data.listings = sell
        .into_iter()
        .map(|(item_id, price)| ShopListing {
            item_id: item_id.into(),
            action: ShopAction::Sell { price },
        })
        .chain(buy.into_iter().map(|(item_id, price)| ShopListing {
            item_id: item_id.into(),
            action: ShopAction::BuySeed { price },
        }))
        .collect();
}
