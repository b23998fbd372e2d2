//! Calendar domain. Owns the night between two days.
//!
//! Responsible for:
//! - Fading the screen to black when the player goes to bed
//! - Advancing the day and rolling the weather while the screen is dark
//! - Sending DayEndEvent so every domain runs its daily reset
//! - Fading back in and waking the player

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NightTransition>().add_systems(
            Update,
            (begin_night, advance_night)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─── Night transition ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    Idle,
    Dimming,
    Brightening,
}

/// What a frame of the transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    Continue,
    /// The screen just went fully dark. The day rolls over now.
    ReachedBlack,
    /// The screen is fully lit again.
    Finished,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct NightTransition {
    pub phase: FadePhase,
}

impl NightTransition {
    pub fn is_running(&self) -> bool {
        self.phase != FadePhase::Idle
    }

    /// Move the brightness one frame along the fade.
    pub fn step(&mut self, fade: &mut ScreenFade, dt: f32) -> FadeStep {
        match self.phase {
            FadePhase::Idle => FadeStep::Continue,
            FadePhase::Dimming => {
                fade.brightness -= SLEEP_FADE_SPEED * dt;
                if fade.brightness <= 0.0 {
                    fade.brightness = 0.0;
                    self.phase = FadePhase::Brightening;
                    FadeStep::ReachedBlack
                } else {
                    FadeStep::Continue
                }
            }
            FadePhase::Brightening => {
                fade.brightness += SLEEP_FADE_SPEED * dt;
                if fade.brightness >= 255.0 {
                    fade.brightness = 255.0;
                    self.phase = FadePhase::Idle;
                    FadeStep::Finished
                } else {
                    FadeStep::Continue
                }
            }
        }
    }
}

/// Roll tomorrow's weather: rain on 8, 9 or 10 of an 11-sided roll.
pub fn roll_rain(rng: &mut impl Rng) -> bool {
    rng.gen_range(0..=RAIN_ROLL_MAX) > RAIN_THRESHOLD
}

/// Start the fade when the player lies down.
pub fn begin_night(
    mut sleep_events: EventReader<SleepRequestEvent>,
    mut transition: ResMut<NightTransition>,
) {
    for _ in sleep_events.read() {
        if transition.is_running() {
            continue;
        }
        transition.phase = FadePhase::Dimming;
        info!("[Calendar] Lights out");
    }
}

/// Drive the fade. At full dark the day advances and DayEndEvent goes out;
/// once the screen is lit again the player wakes.
pub fn advance_night(
    time: Res<Time>,
    mut transition: ResMut<NightTransition>,
    mut fade: ResMut<ScreenFade>,
    mut calendar: ResMut<Calendar>,
    mut rng: ResMut<GameRng>,
    mut player_state: ResMut<PlayerState>,
    mut day_end_events: EventWriter<DayEndEvent>,
) {
    if !transition.is_running() {
        return;
    }

    match transition.step(&mut fade, time.delta_secs()) {
        FadeStep::Continue => {}
        FadeStep::ReachedBlack => {
            calendar.day += 1;
            calendar.raining = roll_rain(&mut rng.0);
            info!(
                "[Calendar] Day {} begins{}",
                calendar.day,
                if calendar.raining { ", raining" } else { "" }
            );
            day_end_events.send(DayEndEvent {
                day: calendar.day,
                raining: calendar.raining,
            });
        }
        FadeStep::Finished => {
            player_state.sleeping = false;
            info!("[Calendar] Good morning");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fade_goes_dark_then_light() {
        let mut transition = NightTransition { phase: FadePhase::Dimming };
        let mut fade = ScreenFade::default();

        let mut steps = Vec::new();
        for _ in 0..200 {
            let step = transition.step(&mut fade, 0.05);
            if step != FadeStep::Continue {
                steps.push((step, fade.brightness));
            }
            if !transition.is_running() {
                break;
            }
        }

        assert_eq!(steps, vec![(FadeStep::ReachedBlack, 0.0), (FadeStep::Finished, 255.0)]);
        assert_eq!(transition.phase, FadePhase::Idle);
    }

    #[test]
    fn idle_transition_leaves_screen_alone() {
        let mut transition = NightTransition::default();
        let mut fade = ScreenFade::default();
        assert_eq!(transition.step(&mut fade, 1.0), FadeStep::Continue);
        assert_eq!(fade.brightness, 255.0);
    }

    #[test]
    fn rain_is_the_minority_outcome() {
        let mut rng = StdRng::seed_from_u64(42);
        let rainy = (0..11_000).filter(|_| roll_rain(&mut rng)).count();
        // Expected 3 in 11.
        assert!((2_500..3_500).contains(&rainy), "rainy days: {}", rainy);
    }
}
