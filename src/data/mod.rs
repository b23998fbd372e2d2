//! Data layer. Populates all registries at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the CropRegistry
//! and ShopData from the game-design tables in submodules, loads the farm map
//! from RON, then transitions the game into GameState::Playing.
//!
//! A broken table is fatal: the error is logged and the app exits instead of
//! starting a farm that cannot be played.

pub mod crops;
pub mod maps;
pub mod shops;

use bevy::prelude::*;
use crate::shared::*;

pub use maps::FarmMapDef;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every registry and then transitions to Playing.
pub fn load_all_data(
    mut crop_registry: ResMut<CropRegistry>,
    mut shop_data: ResMut<ShopData>,
    mut farm_map: ResMut<FarmMap>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    info!("[Data] Populating registries…");

    crops::populate_crops(&mut crop_registry);
    if let Err(err) = crop_registry.validate() {
        error!("[Data] {}", err);
        exit.send(AppExit::error());
        return;
    }
    info!("[Data]   Crops loaded: {}", crop_registry.crops.len());

    shops::populate_shops(&mut shop_data);
    info!("[Data]   Shop listings loaded: {}", shop_data.listings.len());

    match FarmMapDef::default_farm().and_then(FarmMapDef::into_map) {
        Ok(map) => {
            info!(
                "[Data]   Farm map loaded: {}x{} tiles, {} farmable",
                map.cols,
                map.rows,
                map.farmable.len()
            );
            *farm_map = map;
        }
        Err(err) => {
            error!("[Data] {}", err);
            exit.send(AppExit::error());
            return;
        }
    }

    info!("[Data] All registries populated. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
