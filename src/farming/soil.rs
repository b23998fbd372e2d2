//! Player intents against the soil: hoe, watering can, seeds.

use bevy::prelude::*;
use crate::shared::*;
use super::{report_farm_error, SoilLayer};

/// Apply every `FarmIntentEvent` sent this frame.
///
/// Invalid targets (dirt that is not farmable, dry ground that was never
/// plowed, an occupied bed) are silent no-ops.
pub fn handle_farm_intents(
    mut intents: EventReader<FarmIntentEvent>,
    mut soil: ResMut<SoilLayer>,
    mut inventory: ResMut<Inventory>,
    mut rng: ResMut<GameRng>,
    crop_registry: Res<CropRegistry>,
    mut item_removed_events: EventWriter<ItemRemovedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for FarmIntentEvent(intent) in intents.read() {
        match intent {
            FarmIntent::Till(pos) => {
                till(&mut soil, *pos, &mut sfx_events);
            }
            FarmIntent::Water(pos) => {
                // The can splashes whether or not the ground takes the water.
                sfx_events.send(PlaySfxEvent::new("water"));
                match soil.water(*pos, &mut rng.0) {
                    Ok(true) => debug!("[Farming] Watered ({}, {})", pos.col, pos.row),
                    Ok(false) => {}
                    Err(err) => report_farm_error("water", &err),
                }
            }
            FarmIntent::Plant { pos, species } => {
                plant(
                    &mut soil,
                    *pos,
                    species,
                    &mut inventory,
                    &crop_registry,
                    &mut item_removed_events,
                    &mut sfx_events,
                );
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hoe
// ─────────────────────────────────────────────────────────────────────────────

fn till(soil: &mut SoilLayer, pos: TilePos, sfx_events: &mut EventWriter<PlaySfxEvent>) {
    // The hoe only bites into farmable ground.
    match soil.grid().is_farmable(pos) {
        Ok(true) => {}
        Ok(false) => return,
        Err(err) => {
            report_farm_error("till", &err);
            return;
        }
    }
    sfx_events.send(PlaySfxEvent::new("hoe"));

    match soil.till(pos) {
        Ok(true) => debug!(
            "[Farming] Tilled ({}, {}); {} plowed tiles re-tiled",
            pos.col,
            pos.row,
            soil.soil_visuals().len()
        ),
        Ok(false) => {}
        Err(err) => report_farm_error("till", &err),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeds
// ─────────────────────────────────────────────────────────────────────────────

fn plant(
    soil: &mut SoilLayer,
    pos: TilePos,
    species: &CropId,
    inventory: &mut Inventory,
    crop_registry: &CropRegistry,
    item_removed_events: &mut EventWriter<ItemRemovedEvent>,
    sfx_events: &mut EventWriter<PlaySfxEvent>,
) {
    match soil.can_plant(pos) {
        Ok(true) => {}
        Ok(false) => return,
        Err(err) => {
            report_farm_error("plant", &err);
            return;
        }
    }

    // The seed leaves the pouch up front and goes back if the soil refuses it.
    if !inventory.try_take_seed(species) {
        return;
    }

    match soil.plant(pos, species, crop_registry) {
        Ok(true) => {
            item_removed_events.send(ItemRemovedEvent {
                item_id: format!("{}_seed", species),
                quantity: 1,
            });
            sfx_events.send(PlaySfxEvent::new("plant"));
            info!(
                "[Farming] Planted {} at ({}, {}); {} seeds left",
                species,
                pos.col,
                pos.row,
                inventory.seed_count(species)
            );
        }
        Ok(false) => inventory.add_seed(species, 1),
        Err(err) => {
            inventory.add_seed(species, 1);
            report_farm_error("plant", &err);
        }
    }
}
