//! Shared components, resources, events, and states for Sproutland.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Shop,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT: hardware input mapped to game actions once per frame
// ═══════════════════════════════════════════════════════════════════════

/// Which set of bindings is live. Derived from `GameState` every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

/// Per-frame action flags. Domains read this instead of raw keys.
///
/// Held actions (`tool_use`, `seed_use`, the switches and menu movement)
/// repeat while the key is down; each consumer rate-limits with an
/// [`ActionLock`].
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub tool_use: bool,
    pub tool_switch: bool,
    pub seed_use: bool,
    pub seed_switch: bool,
    pub interact: bool,
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

/// A one-shot lock that is either idle or counting down.
#[derive(Debug, Clone, Default)]
pub struct ActionLock {
    timer: Option<Timer>,
}

impl ActionLock {
    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn start(&mut self, secs: f32) {
        self.timer = Some(Timer::from_seconds(secs, TimerMode::Once));
    }

    /// Advance the countdown. Returns true on the tick the lock releases.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.finished() {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TILE COORDINATES
// ═══════════════════════════════════════════════════════════════════════

/// A cell of the farm grid, in tile units. Row 0 is the top of the map.
///
/// Ordering is row-major, so sorted collections of positions iterate the
/// grid top-to-bottom, left-to-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub row: i32,
    pub col: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { row, col }
    }

    /// The four orthogonal neighbours as (top, bottom, left, right).
    pub fn orthogonal(self) -> [TilePos; 4] {
        [
            TilePos::new(self.col, self.row - 1),
            TilePos::new(self.col, self.row + 1),
            TilePos::new(self.col - 1, self.row),
            TilePos::new(self.col + 1, self.row),
        ]
    }
}

/// Convert a world-space point to the tile that contains it.
///
/// The map grows downward from the origin: tile rows map to negative world y.
pub fn world_to_tile(point: Vec2) -> TilePos {
    TilePos::new(
        (point.x / TILE_SIZE).floor() as i32,
        (-point.y / TILE_SIZE).floor() as i32,
    )
}

/// World-space centre of a tile.
pub fn tile_center(pos: TilePos) -> Vec2 {
    Vec2::new(
        pos.col as f32 * TILE_SIZE + TILE_SIZE * 0.5,
        -(pos.row as f32 * TILE_SIZE + TILE_SIZE * 0.5),
    )
}

/// World-space midpoint of a tile's bottom edge. Crop sprites stand on it.
pub fn tile_midbottom(pos: TilePos) -> Vec2 {
    tile_center(pos) - Vec2::new(0.0, TILE_SIZE * 0.5)
}

/// A rectangle of whole tiles, anchored at its top-left tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub col: i32,
    pub row: i32,
    pub cols: i32,
    pub rows: i32,
}

impl TileRect {
    pub fn tiles(self) -> impl Iterator<Item = TilePos> {
        (self.row..self.row + self.rows)
            .flat_map(move |row| (self.col..self.col + self.cols).map(move |col| TilePos::new(col, row)))
    }

    pub fn world_rect(self) -> Rect {
        let top_left = Vec2::new(self.col as f32 * TILE_SIZE, -(self.row as f32) * TILE_SIZE);
        let bottom_right = Vec2::new(
            (self.col + self.cols) as f32 * TILE_SIZE,
            -((self.row + self.rows) as f32) * TILE_SIZE,
        );
        Rect::from_corners(top_left, bottom_right)
    }
}

/// The loaded farm map: grid size, farmable cells and points of interest.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmMap {
    pub cols: u32,
    pub rows: u32,
    pub farmable: Vec<TilePos>,
    pub player_start: TilePos,
    pub bed: Option<TileRect>,
    pub trader: Option<TileRect>,
}

impl FarmMap {
    pub fn contains(&self, pos: TilePos) -> bool {
        pos.col >= 0 && pos.row >= 0 && (pos.col as u32) < self.cols && (pos.row as u32) < self.rows
    }
}

/// Cell count of a `cols` × `rows` grid.
///
/// Fails for an empty grid and for one larger than `MAX_GRID_CELLS`, which
/// keeps every cell index inside `i32`.
pub fn grid_cell_count(cols: u32, rows: u32) -> Result<usize, FarmError> {
    if cols == 0 || rows == 0 {
        return Err(FarmError::Configuration(format!(
            "farm grid must not be empty, got {}x{}",
            cols, rows
        )));
    }
    match cols.checked_mul(rows) {
        Some(cells) if cells <= MAX_GRID_CELLS => Ok(cells as usize),
        _ => Err(FarmError::Configuration(format!(
            "farm grid {}x{} exceeds {} cells",
            cols, rows, MAX_GRID_CELLS
        ))),
    }
}

impl Default for TilePos {
    fn default() -> Self {
        TilePos::new(0, 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FarmError {
    #[error("tile ({col}, {row}) is outside the farm grid")]
    OutOfBounds { col: i32, row: i32 },
    #[error("unknown crop species `{0}`")]
    InvalidSpecies(CropId),
    #[error("crop at ({col}, {row}) is not ready to harvest")]
    NotReady { col: i32, row: i32 },
    #[error("farm configuration error: {0}")]
    Configuration(String),
}

impl FarmError {
    pub fn out_of_bounds(pos: TilePos) -> Self {
        FarmError::OutOfBounds { col: pos.col, row: pos.row }
    }

    pub fn not_ready(pos: TilePos) -> Self {
        FarmError::NotReady { col: pos.col, row: pos.row }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Offset from the player's centre to the point a tool lands on.
    pub fn tool_offset(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::new(-50.0, -40.0),
            Facing::Right => Vec2::new(50.0, -40.0),
            Facing::Up => Vec2::new(0.0, 10.0),
            Facing::Down => Vec2::new(0.0, -50.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Hoe,
    WateringCan,
}

impl ToolKind {
    pub fn next(self) -> Self {
        match self {
            ToolKind::Hoe => ToolKind::WateringCan,
            ToolKind::WateringCan => ToolKind::Hoe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Hoe => "Hoe",
            ToolKind::WateringCan => "Watering Can",
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: PLAYER_SPEED,
        }
    }
}

/// Axis-aligned collision box centred on the entity's translation.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn rect_at(&self, centre: Vec2) -> Rect {
        Rect::from_center_size(centre, self.size)
    }
}

/// Solid world rectangles the player cannot walk into. Grown crops publish
/// theirs here.
#[derive(Resource, Debug, Clone, Default)]
pub struct CollisionMap {
    pub solids: Vec<Rect>,
}

/// True when two world rectangles share any area. Touching edges do not count.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub gold: u32,
    pub equipped_tool: ToolKind,
    /// Seeds the player can cycle through, in display order.
    pub seed_cycle: Vec<CropId>,
    pub selected_seed: usize,
    pub sleeping: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            gold: STARTING_GOLD,
            equipped_tool: ToolKind::Hoe,
            seed_cycle: vec!["corn".into(), "tomato".into()],
            selected_seed: 0,
            sleeping: false,
        }
    }
}

impl PlayerState {
    pub fn selected_seed(&self) -> Option<&CropId> {
        self.seed_cycle.get(self.selected_seed)
    }

    pub fn cycle_seed(&mut self) {
        if self.seed_cycle.is_empty() {
            return;
        }
        self.selected_seed = (self.selected_seed + 1) % self.seed_cycle.len();
    }
}

/// Interactable map regions the player can use with the interact key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    Bed,
    Trader,
}

#[derive(Component, Debug, Clone)]
pub struct InteractionZone {
    pub kind: InteractionKind,
    pub size: Vec2,
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Identifier for every item type in the game.
pub type ItemId = String;

/// Identifier for a crop species. Harvested crops use the same id as items.
pub type CropId = String;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub items: BTreeMap<ItemId, u32>,
    pub seeds: BTreeMap<CropId, u32>,
}

impl Default for Inventory {
    fn default() -> Self {
        let items = ["wood", "apple", "corn", "tomato"]
            .into_iter()
            .map(|id| (id.to_string(), 20))
            .collect();
        let seeds = ["corn", "tomato"]
            .into_iter()
            .map(|id| (id.to_string(), 5))
            .collect();
        Self { items, seeds }
    }
}

impl Inventory {
    pub fn item_count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn seed_count(&self, crop_id: &str) -> u32 {
        self.seeds.get(crop_id).copied().unwrap_or(0)
    }

    pub fn add_item(&mut self, item_id: &str, quantity: u32) {
        *self.items.entry(item_id.to_string()).or_insert(0) += quantity;
    }

    pub fn add_seed(&mut self, crop_id: &str, quantity: u32) {
        *self.seeds.entry(crop_id.to_string()).or_insert(0) += quantity;
    }

    /// Remove `quantity` items if the full amount is held. Returns success.
    pub fn try_remove_item(&mut self, item_id: &str, quantity: u32) -> bool {
        match self.items.get_mut(item_id) {
            Some(count) if *count >= quantity => {
                *count -= quantity;
                true
            }
            _ => false,
        }
    }

    /// Take one seed of `crop_id`. Returns false if none are held.
    pub fn try_take_seed(&mut self, crop_id: &str) -> bool {
        match self.seeds.get_mut(crop_id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CROPS
// ═══════════════════════════════════════════════════════════════════════

/// Static description of a crop species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub id: CropId,
    pub name: String,
    /// Number of sprite frames from seedling to ripe.
    pub growth_frames: u8,
    /// Age gained per watered day.
    pub growth_rate: f32,
    /// Vertical sprite offset from the soil tile's bottom edge (pixels, up is positive).
    pub y_offset: f32,
}

impl CropDef {
    /// Age at which the crop becomes harvestable.
    pub fn max_age(&self) -> f32 {
        self.growth_frames.saturating_sub(1) as f32
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<CropId, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, id: &str) -> Option<&CropDef> {
        self.crops.get(id)
    }

    /// Reject species that could never be planted or never ripen.
    pub fn validate(&self) -> Result<(), FarmError> {
        for (id, def) in &self.crops {
            if *id != def.id {
                return Err(FarmError::Configuration(format!(
                    "crop registered as `{}` declares id `{}`",
                    id, def.id
                )));
            }
            if def.growth_frames < 2 {
                return Err(FarmError::Configuration(format!(
                    "crop `{}` needs at least two growth frames",
                    id
                )));
            }
            if !(def.growth_rate > 0.0) {
                return Err(FarmError::Configuration(format!(
                    "crop `{}` has non-positive growth rate {}",
                    id, def.growth_rate
                )));
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SHOP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopAction {
    /// The player sells one item from their item inventory.
    Sell { price: u32 },
    /// The player buys one seed.
    BuySeed { price: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopListing {
    pub item_id: ItemId,
    pub action: ShopAction,
}

impl ShopAction {
    pub fn price(self) -> u32 {
        match self {
            ShopAction::Sell { price } | ShopAction::BuySeed { price } => price,
        }
    }

    pub fn is_purchase(self) -> bool {
        matches!(self, ShopAction::BuySeed { .. })
    }
}

/// Trader listings in menu order: everything sellable first, then seeds.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopData {
    pub listings: Vec<ShopListing>,
}

/// Cursor state of the trader menu. The cursor survives closing the shop.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShopMenu {
    pub cursor: usize,
    /// Rate limit shared by cursor movement and trading.
    pub lock: ActionLock,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR & RANDOMNESS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub day: u32,
    pub raining: bool,
}

impl Default for Calendar {
    fn default() -> Self {
        Self { day: 1, raining: false }
    }
}

/// The one random source for gameplay decisions. Seed it in tests.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Multiplicative screen tint for the time of day (RGB, 0–255 per channel).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SkyTint {
    pub color: [f32; 3],
}

impl Default for SkyTint {
    fn default() -> Self {
        Self { color: SKY_DAY_COLOR }
    }
}

/// Whole-screen brightness used by the sleep transition, 0 (black) to 255.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenFade {
    pub brightness: f32,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self { brightness: 255.0 }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// A player action aimed at one farm tile.
#[derive(Debug, Clone, PartialEq)]
pub enum FarmIntent {
    Till(TilePos),
    Water(TilePos),
    Plant { pos: TilePos, species: CropId },
}

#[derive(Event, Debug, Clone)]
pub struct FarmIntentEvent(pub FarmIntent);

/// Sent by the player domain when the player lies down in bed.
#[derive(Event, Debug, Clone)]
pub struct SleepRequestEvent;

/// Sent once per night, while the screen is dark, after the weather for the
/// new day has been rolled.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
    pub raining: bool,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct ItemRemovedEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub crop_id: CropId,
    pub pos: TilePos,
}

/// Destroy the crop at `pos` regardless of its growth state.
#[derive(Event, Debug, Clone)]
pub struct CropKillEvent {
    pub pos: TilePos,
}

#[derive(Event, Debug, Clone)]
pub struct ShopTransactionEvent {
    pub item_id: ItemId,
    pub price: u32,
    pub is_purchase: bool,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

impl PlaySfxEvent {
    pub fn new(sfx_id: &str) -> Self {
        Self { sfx_id: sfx_id.to_string() }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 64.0;
/// Upper bound on farm grid cells.
pub const MAX_GRID_CELLS: u32 = 1 << 20;
pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_HITBOX: Vec2 = Vec2::new(66.0, 122.0);
pub const STARTING_GOLD: u32 = 200;

pub const TOOL_USE_SECS: f32 = 0.35;
pub const TOOL_SWITCH_SECS: f32 = 0.2;
pub const SEED_USE_SECS: f32 = 0.35;
pub const SEED_SWITCH_SECS: f32 = 0.2;
pub const MENU_REPEAT_SECS: f32 = 0.2;

/// Number of interchangeable wet-soil sprites.
pub const WATER_VARIANTS: u8 = 3;

/// Rain falls when a roll in `0..=RAIN_ROLL_MAX` exceeds `RAIN_THRESHOLD`.
pub const RAIN_ROLL_MAX: u32 = 10;
pub const RAIN_THRESHOLD: u32 = 7;

pub const SKY_DAY_COLOR: [f32; 3] = [255.0, 255.0, 255.0];
pub const SKY_NIGHT_COLOR: [f32; 3] = [38.0, 101.0, 189.0];
/// Tint channels fall by this much per second toward night.
pub const SKY_DARKEN_RATE: f32 = 2.0;

/// Screen brightness change per second during the sleep fade.
pub const SLEEP_FADE_SPEED: f32 = 120.0;

/// Width of a crop sprite; height grows with the growth frame.
pub const CROP_SPRITE_WIDTH: f32 = 40.0;
