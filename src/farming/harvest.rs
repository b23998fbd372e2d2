//! Harvest system: walking into a ripe crop picks it.

use bevy::prelude::*;
use crate::shared::*;
use super::{report_farm_error, SoilLayer};

/// Every frame, harvest each ripe crop whose sprite overlaps the player's
/// hitbox and credit one unit of it to the player.
pub fn harvest_on_contact(
    player_query: Query<(&Transform, &Hitbox), With<Player>>,
    mut soil: ResMut<SoilLayer>,
    mut item_pickup_events: EventWriter<ItemPickupEvent>,
    mut crop_harvested_events: EventWriter<CropHarvestedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let Ok((transform, hitbox)) = player_query.get_single() else {
        return;
    };
    let player_rect = hitbox.rect_at(transform.translation.truncate());

    let touched: Vec<TilePos> = soil
        .harvestable_crops()
        .filter(|crop| rects_overlap(crop.sprite_rect(), player_rect))
        .map(|crop| crop.pos())
        .collect();

    for pos in touched {
        match soil.harvest(pos) {
            Ok(crop_id) => {
                info!("[Farming] Harvested {} at ({}, {})", crop_id, pos.col, pos.row);
                item_pickup_events.send(ItemPickupEvent {
                    item_id: crop_id.clone(),
                    quantity: 1,
                });
                crop_harvested_events.send(CropHarvestedEvent { crop_id, pos });
                sfx_events.send(PlaySfxEvent::new("success"));
            }
            Err(err) => report_farm_error("harvest", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_needs_shared_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(a, Rect::new(5.0, 5.0, 15.0, 15.0)));
        assert!(!rects_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)), "edge contact");
        assert!(!rects_overlap(a, Rect::new(20.0, 20.0, 30.0, 30.0)));
    }
}
