//! Pest mini-game: some mornings a pest settles on a crop; shoo it away by
//! walking into the crop before time runs out, or lose the crop.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;
use super::SoilLayer;

/// Chance each morning that a pest shows up.
pub const PEST_CHANCE: f64 = 0.1;
/// Seconds the player has to reach the targeted crop.
pub const PEST_TIME_LIMIT_SECS: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct PestAttack {
    pub target: TilePos,
    pub timer: Timer,
}

/// How a running attack stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PestOutcome {
    Pending,
    Shooed,
    CropLost,
}

impl PestAttack {
    pub fn new(target: TilePos) -> Self {
        Self {
            target,
            timer: Timer::from_seconds(PEST_TIME_LIMIT_SECS, TimerMode::Once),
        }
    }

    /// Advance the countdown. Touching the crop wins even on the last frame.
    pub fn tick(&mut self, delta: std::time::Duration, player_touching: bool) -> PestOutcome {
        if player_touching {
            return PestOutcome::Shooed;
        }
        self.timer.tick(delta);
        if self.timer.finished() {
            PestOutcome::CropLost
        } else {
            PestOutcome::Pending
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct PestMinigame {
    pub active: Option<PestAttack>,
}

/// Pick a living crop for the pest, uniformly at random.
pub fn pick_pest_target(soil: &SoilLayer, rng: &mut impl Rng) -> Option<TilePos> {
    let targets: Vec<TilePos> = soil.crops().map(|crop| crop.pos()).collect();
    targets.choose(rng).copied()
}

/// Roll for a pest at the start of each day.
pub fn start_pest_attack(
    mut day_end_events: EventReader<DayEndEvent>,
    soil: Res<SoilLayer>,
    mut rng: ResMut<GameRng>,
    mut minigame: ResMut<PestMinigame>,
) {
    for _ in day_end_events.read() {
        // Yesterday's pest leaves with the night.
        minigame.active = None;

        if !rng.0.gen_bool(PEST_CHANCE) {
            continue;
        }
        if let Some(target) = pick_pest_target(&soil, &mut rng.0) {
            info!("[Farming] A pest is after the crop at ({}, {})", target.col, target.row);
            minigame.active = Some(PestAttack::new(target));
        }
    }
}

/// Run the countdown; on failure the crop goes through the kill path.
pub fn tick_pest_attack(
    time: Res<Time>,
    soil: Res<SoilLayer>,
    player_query: Query<(&Transform, &Hitbox), With<Player>>,
    mut minigame: ResMut<PestMinigame>,
    mut kill_events: EventWriter<CropKillEvent>,
) {
    let Some(attack) = minigame.active.as_mut() else {
        return;
    };

    // Harvested or otherwise gone: nothing left to defend.
    let Some(crop) = soil.crop_at(attack.target) else {
        minigame.active = None;
        return;
    };

    let touching = player_query
        .get_single()
        .map(|(transform, hitbox)| {
            rects_overlap(crop.sprite_rect(), hitbox.rect_at(transform.translation.truncate()))
        })
        .unwrap_or(false);

    match attack.tick(time.delta(), touching) {
        PestOutcome::Pending => {}
        PestOutcome::Shooed => {
            info!("[Farming] Pest shooed away");
            minigame.active = None;
        }
        PestOutcome::CropLost => {
            let target = attack.target;
            kill_events.send(CropKillEvent { pos: target });
            minigame.active = None;
        }
    }
}
