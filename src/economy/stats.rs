use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// HARVEST STATS: tracks crop harvest counts
// ═══════════════════════════════════════════════════════════════════════

/// Crops picked so far, by species.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestStats {
    pub crops: BTreeMap<CropId, u32>,
}

// ═══════════════════════════════════════════════════════════════════════
// TRADE STATS: gold flowing through the trader
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyStats {
    pub total_gold_earned: u64,
    pub total_gold_spent: u64,
    pub total_transactions: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn track_crop_harvests(
    mut events: EventReader<CropHarvestedEvent>,
    mut stats: ResMut<HarvestStats>,
) {
    for ev in events.read() {
        let count = stats.crops.entry(ev.crop_id.clone()).or_insert(0);
        *count = count.saturating_add(1);
        debug!(
            "[Economy/Stats] {} harvested so far: {}",
            ev.crop_id, count
        );
    }
}

pub fn track_transactions(
    mut events: EventReader<ShopTransactionEvent>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in events.read() {
        if ev.is_purchase {
            stats.total_gold_spent = stats.total_gold_spent.saturating_add(ev.price as u64);
        } else {
            stats.total_gold_earned = stats.total_gold_earned.saturating_add(ev.price as u64);
        }
        stats.total_transactions += 1;
    }
}
