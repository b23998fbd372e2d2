//! Farming domain: soil tilling, watering, planting, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

use bevy::prelude::*;
use crate::shared::*;

pub mod autotile;
pub mod crops;
pub mod events_handler;
pub mod grid;
pub mod harvest;
pub mod layer;
pub mod pests;
mod render;
pub mod soil;

pub use layer::SoilLayer;

/// Tracks which sprite entities exist keyed by grid position.
/// This lets render systems find ECS entities for a given tile quickly.
#[derive(Resource, Default, Debug)]
pub struct FarmEntities {
    pub soil_entities: std::collections::HashMap<TilePos, Entity>,
    pub water_entities: std::collections::HashMap<TilePos, Entity>,
    pub crop_entities: std::collections::HashMap<TilePos, Entity>,
}

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<FarmEntities>()
            .init_resource::<pests::PestMinigame>()
            .init_resource::<CollisionMap>()
            // ------------------------------------------------------------------
            // Build the soil layer once the map has been loaded
            // ------------------------------------------------------------------
            .add_systems(OnExit(GameState::Loading), init_soil_layer)
            // ------------------------------------------------------------------
            // Gameplay: intents, contact harvest, overnight, pests
            // ------------------------------------------------------------------
            .add_systems(
                Update,
                (
                    soil::handle_farm_intents,
                    harvest::harvest_on_contact,
                    events_handler::on_day_end,
                    pests::start_pest_attack,
                    pests::tick_pest_attack,
                    events_handler::handle_crop_kill,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_exists::<SoilLayer>),
            )
            // ------------------------------------------------------------------
            // Visual sync: runs after all state mutations
            // ------------------------------------------------------------------
            .add_systems(
                PostUpdate,
                (
                    sync_crop_colliders,
                    render::sync_soil_sprites,
                    render::sync_water_sprites,
                    render::sync_crop_sprites,
                )
                    .run_if(resource_exists::<SoilLayer>),
            );
    }
}

/// Create the `SoilLayer` from the loaded farm map. A bad map is fatal.
pub fn init_soil_layer(
    mut commands: Commands,
    farm_map: Res<FarmMap>,
    existing: Option<Res<SoilLayer>>,
    mut exit: EventWriter<AppExit>,
) {
    if existing.is_some() {
        return;
    }

    match SoilLayer::new(farm_map.cols, farm_map.rows, farm_map.farmable.iter().copied()) {
        Ok(layer) => {
            info!(
                "[Farming] Soil layer ready: {}x{} grid, {} farmable tiles",
                farm_map.cols,
                farm_map.rows,
                farm_map.farmable.len()
            );
            commands.insert_resource(layer);
        }
        Err(err) => {
            error!("[Farming] Cannot build soil layer: {}", err);
            exit.send(AppExit::error());
        }
    }
}

/// Publish the hitboxes of grown crops whenever the field changes.
pub fn sync_crop_colliders(soil: Res<SoilLayer>, mut collision_map: ResMut<CollisionMap>) {
    if !soil.is_changed() {
        return;
    }
    collision_map.solids = soil.crops().filter_map(|crop| crop.hitbox()).collect();
}

/// Log a failed soil operation at the severity its kind deserves.
///
/// Out-of-bounds targets mean the input side let a bad coordinate through,
/// which is a bug: debug builds stop here.
pub(crate) fn report_farm_error(action: &str, err: &FarmError) {
    match err {
        FarmError::OutOfBounds { .. } => {
            error!("[Farming] {} rejected: {}", action, err);
            if cfg!(debug_assertions) {
                panic!("[Farming] {} received an off-grid target: {}", action, err);
            }
        }
        FarmError::InvalidSpecies(_) | FarmError::Configuration(_) => {
            warn!("[Farming] {} rejected: {}", action, err);
        }
        FarmError::NotReady { .. } => {
            debug!("[Farming] {} ignored: {}", action, err);
        }
    }
}
