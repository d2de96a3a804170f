/// Built-in tuning constants.
///
/// There is no runtime difficulty configuration: `Tuning::default()` is the
/// game.  Tests build smaller or obstacle-free worlds from custom values.

use std::time::Duration;

use thiserror::Error;

// ── Grid ─────────────────────────────────────────────────────────────────────

pub const WIDTH: i32 = 40;
pub const HEIGHT: i32 = 20;
pub const OBSTACLE_DENSITY: f64 = 0.02;

// ── Pacing ───────────────────────────────────────────────────────────────────

/// Minimum real time between two accepted ticks when no key is pressed.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(12);
/// Sleep used by the front-end when no tick is due.
pub const IDLE_SLEEP: Duration = Duration::from_millis(5);

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_MAX_HP: u32 = 100;
pub const PLAYER_ATTACK: i32 = 10;
pub const PLAYER_WEAPON_LENGTH: i32 = 3;

pub const MAGIC_SHOOT_INTERVAL: u32 = 50;
/// Cooldown re-armed when auto-magic finds nothing to shoot at.
pub const MAGIC_RETRY_INTERVAL: u32 = 3;

// ── Items ────────────────────────────────────────────────────────────────────

pub const HEAL_AMOUNT: u32 = 25;
pub const STRENGTH_WEAPON_LENGTH: i32 = 10;
pub const STRENGTH_DURATION: u32 = 600;
pub const MAGIC_DURATION: u32 = 800;
pub const SHIELD_DURATION: u32 = 500;

// ── Projectiles & visuals ────────────────────────────────────────────────────

/// Bullets advance one trajectory step every this many ticks.
pub const BULLET_STEP_FRAMES: u32 = 8;
pub const DEATH_MARK_DURATION: u32 = 25;

// ── Spawning ─────────────────────────────────────────────────────────────────

pub const MONSTER_CAP: usize = 25;
pub const ITEM_CAP: usize = 4;
pub const ITEM_SPAWN_INTERVAL: u32 = 600;
pub const MONSTER_BASE_INTERVAL: u32 = 60;
pub const MONSTER_MIN_INTERVAL: u32 = 12;
pub const MONSTER_LIFESPAN: u32 = 2000;
pub const WARNING_PHASES: u32 = 6;
pub const WARNING_PHASE_FRAMES: u32 = 20;
pub const PLACEMENT_ATTEMPTS: u32 = 100;
pub const WAYPOINT_ATTEMPTS: u32 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 3x3, got {width}x{height}")]
    GridTooSmall { width: i32, height: i32 },
    #[error("obstacle density must be in [0, 1), got {0}")]
    BadDensity(f64),
    #[error("{obstacles} obstacles leave no free cell in an interior of {area}")]
    Overcrowded { obstacles: usize, area: usize },
    #[error("{0} must be non-zero")]
    ZeroInterval(&'static str),
}

/// Every knob of the simulation in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub width: i32,
    pub height: i32,
    pub obstacle_density: f64,
    pub frame_interval: Duration,
    pub idle_sleep: Duration,
    pub player_max_hp: u32,
    pub player_attack: i32,
    pub weapon_length: i32,
    pub magic_shoot_interval: u32,
    pub magic_retry_interval: u32,
    pub heal_amount: u32,
    pub strength_weapon_length: i32,
    pub strength_duration: u32,
    pub magic_duration: u32,
    pub shield_duration: u32,
    pub bullet_step_frames: u32,
    pub death_mark_duration: u32,
    pub monster_cap: usize,
    pub item_cap: usize,
    pub item_spawn_interval: u32,
    pub monster_base_interval: u32,
    pub monster_min_interval: u32,
    pub monster_lifespan: u32,
    pub warning_phases: u32,
    pub warning_phase_frames: u32,
    pub placement_attempts: u32,
    pub waypoint_attempts: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            width: WIDTH,
            height: HEIGHT,
            obstacle_density: OBSTACLE_DENSITY,
            frame_interval: FRAME_INTERVAL,
            idle_sleep: IDLE_SLEEP,
            player_max_hp: PLAYER_MAX_HP,
            player_attack: PLAYER_ATTACK,
            weapon_length: PLAYER_WEAPON_LENGTH,
            magic_shoot_interval: MAGIC_SHOOT_INTERVAL,
            magic_retry_interval: MAGIC_RETRY_INTERVAL,
            heal_amount: HEAL_AMOUNT,
            strength_weapon_length: STRENGTH_WEAPON_LENGTH,
            strength_duration: STRENGTH_DURATION,
            magic_duration: MAGIC_DURATION,
            shield_duration: SHIELD_DURATION,
            bullet_step_frames: BULLET_STEP_FRAMES,
            death_mark_duration: DEATH_MARK_DURATION,
            monster_cap: MONSTER_CAP,
            item_cap: ITEM_CAP,
            item_spawn_interval: ITEM_SPAWN_INTERVAL,
            monster_base_interval: MONSTER_BASE_INTERVAL,
            monster_min_interval: MONSTER_MIN_INTERVAL,
            monster_lifespan: MONSTER_LIFESPAN,
            warning_phases: WARNING_PHASES,
            warning_phase_frames: WARNING_PHASE_FRAMES,
            placement_attempts: PLACEMENT_ATTEMPTS,
            waypoint_attempts: WAYPOINT_ATTEMPTS,
        }
    }
}

impl Tuning {
    /// Number of playable cells (everything inside the border wall).
    pub fn interior_area(&self) -> usize {
        ((self.width - 2).max(0) * (self.height - 2).max(0)) as usize
    }

    /// `floor(interior_area × density)`.
    pub fn obstacle_target(&self) -> usize {
        (self.interior_area() as f64 * self.obstacle_density).floor() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..1.0).contains(&self.obstacle_density) {
            return Err(ConfigError::BadDensity(self.obstacle_density));
        }
        // The player's cell plus at least one spawnable cell must stay open.
        let (obstacles, area) = (self.obstacle_target(), self.interior_area());
        if obstacles + 1 >= area {
            return Err(ConfigError::Overcrowded { obstacles, area });
        }
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroInterval("frame_interval"));
        }
        if self.bullet_step_frames == 0 {
            return Err(ConfigError::ZeroInterval("bullet_step_frames"));
        }
        if self.warning_phase_frames == 0 || self.warning_phases == 0 {
            return Err(ConfigError::ZeroInterval("warning phase"));
        }
        Ok(())
    }
}
