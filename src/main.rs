mod shared;
mod input;
mod calendar;
mod player;
mod farming;
mod world;
mod economy;
mod ui;
mod data;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Sproutland".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<InputContext>()
        .init_resource::<PlayerInput>()
        .init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<CropRegistry>()
        .init_resource::<ShopData>()
        .init_resource::<FarmMap>()
        .init_resource::<GameRng>()
        .init_resource::<SkyTint>()
        .init_resource::<ScreenFade>()
        .init_resource::<CollisionMap>()
        // Events
        .add_event::<FarmIntentEvent>()
        .add_event::<SleepRequestEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<ItemRemovedEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<CropKillEvent>()
        .add_event::<ShopTransactionEvent>()
        .add_event::<PlaySfxEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
