//! Handlers for cross-domain events: DayEndEvent, CropKillEvent.

use bevy::prelude::*;
use crate::shared::*;
use super::{report_farm_error, SoilLayer};

// ─────────────────────────────────────────────────────────────────────────────
// Day End
// ─────────────────────────────────────────────────────────────────────────────

/// Overnight farming logic:
/// 1. Grow every crop whose tile was watered today.
/// 2. Dry every tile.
/// 3. If the new day dawns rainy, water every plowed tile.
pub fn on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut soil: ResMut<SoilLayer>,
    mut rng: ResMut<GameRng>,
) {
    for event in day_end_events.read() {
        let report = soil.advance_day();
        info!(
            "[Farming] Day {} begins: {} crops grew, {} ripened",
            event.day,
            report.grew.len(),
            report.ripened.len()
        );

        if event.raining {
            let watered = soil.water_all(&mut rng.0);
            info!("[Farming] Rain watered {} tiles", watered);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop kill
// ─────────────────────────────────────────────────────────────────────────────

/// Destroy crops on request, ripe or not.
pub fn handle_crop_kill(
    mut kill_events: EventReader<CropKillEvent>,
    mut soil: ResMut<SoilLayer>,
) {
    for event in kill_events.read() {
        match soil.kill(event.pos) {
            Ok(Some(crop)) => info!(
                "[Farming] {} at ({}, {}) was destroyed",
                crop.species(),
                event.pos.col,
                event.pos.row
            ),
            Ok(None) => {}
            Err(err) => report_farm_error("kill", &err),
        }
    }
}
