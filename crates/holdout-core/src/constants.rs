//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Playable width in world units.
pub const ARENA_WIDTH: f32 = 9.0;

/// Playable height in world units.
pub const ARENA_HEIGHT: f32 = 16.0;

/// Height at which enemies enter the arena.
pub const ENEMY_SPAWN_Y: f32 = ARENA_HEIGHT;

/// Horizontal inset keeping spawned enemies fully inside the arena.
pub const ENEMY_SPAWN_MARGIN: f32 = 0.5;

// --- Player ---

pub const PLAYER_START_X: f32 = ARENA_WIDTH * 0.5;
pub const PLAYER_START_Y: f32 = 1.5;
pub const PLAYER_MOVE_SPEED: f32 = 5.0;

/// Seconds between autonomous shots at upgrade level 0.
pub const PLAYER_FIRE_COOLDOWN: f32 = 0.5;

/// Floor for the fire cooldown after FireRate upgrades.
pub const MIN_FIRE_COOLDOWN: f32 = 0.1;

pub const PLAYER_BULLET_DAMAGE: f32 = 1.0;
pub const PLAYER_SIZE: f32 = 0.8;

/// Muzzle offset above the player centre.
pub const FIRE_POINT_OFFSET: f32 = 0.5;

// --- Bullet ---

pub const BULLET_SPEED: f32 = 10.0;
pub const BULLET_SIZE: f32 = 0.2;

// --- Enemy ---

pub const ENEMY_MAX_HEALTH: f32 = 10.0;
pub const ENEMY_MOVE_SPEED: f32 = 1.0;
pub const ENEMY_ATTACK_DAMAGE: f32 = 1.0;

/// Attacks per second while besieging the barricade.
pub const ENEMY_ATTACK_SPEED: f32 = 1.0;
pub const ENEMY_DROP_COIN_AMOUNT: u32 = 1;
pub const ENEMY_SIZE: f32 = 0.8;

// --- Coin ---

pub const COIN_VALUE: u32 = 1;

/// Total seconds a coin stays on the field.
pub const COIN_LIFETIME: f32 = 5.0;

/// Seconds before a coin starts blinking.
pub const COIN_FADE_START: f32 = 2.0;
pub const COIN_SIZE: f32 = 0.4;

// --- Barricade ---

pub const BARRICADE_MAX_HEALTH: f32 = 100.0;
pub const BARRICADE_Y: f32 = 3.0;
pub const BARRICADE_HEIGHT: f32 = 0.5;

// --- Upgrades ---

pub const UPGRADE_MAX_LEVEL: u32 = 5;
pub const UPGRADE_BASE_PRICE: u32 = 10;

/// Cost multiplier in `round(base_price * (level + 1) * COST_FACTOR)`.
pub const UPGRADE_COST_FACTOR: f32 = 1.5;

// --- Waves ---

/// Default number of waves in a session.
pub const DEFAULT_WAVE_COUNT: usize = 10;
