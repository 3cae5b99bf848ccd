// Message log
pub const MESSAGE_LOG_CAPACITY: usize = 6;

// Encounters
pub const MAX_ENEMY_GROUP_SIZE: usize = 3;
pub const ESCAPE_CHANCE: f64 = 0.5;

// Basic spell (the "Magic" command casts Fire)
pub const MAGIC_MP_COST: u32 = 5;
pub const BASIC_SPELL_NAME: &str = "Fire";

// Physical damage: attack + roll in [-2, 2]
pub const PHYSICAL_ROLL_MIN: i32 = -2;
pub const PHYSICAL_ROLL_MAX: i32 = 2;
pub const PHYSICAL_DAMAGE_FLOOR: u32 = 1;
pub const WEAKEN_PHYSICAL_FACTOR: f64 = 0.6;

// Magic damage: magic + roll in [-3, 3]
pub const MAGIC_ROLL_MIN: i32 = -3;
pub const MAGIC_ROLL_MAX: i32 = 3;
pub const MAGIC_DAMAGE_FLOOR: u32 = 3;
pub const WEAKEN_MAGIC_FACTOR: f64 = 0.7;
pub const CURSE_MAGIC_FACTOR: f64 = 0.7;

// XP and leveling
pub const STARTING_XP_TO_NEXT: u32 = 10;
pub const XP_TO_NEXT_INCREMENT: u32 = 10;

// Hero-only growth per level: (max_hp, max_mp, attack, magic, defense)
pub const HERO_LEVEL_GROWTH: (u32, u32, u32, u32, u32) = (10, 3, 4, 3, 2);

// Enemy level scaling per reference level above 1
pub const ENEMY_HP_PER_LEVEL: u32 = 5;
pub const ENEMY_ATTACK_PER_LEVEL: u32 = 1;

// Reward distribution
pub const BASELINE_XP_PERCENT: u32 = 80;
pub const SCORE_PER_KILL: u64 = 15;
pub const SCORE_PER_STATUS: u64 = 8;

// Autopilot: drink a potion below this HP fraction
pub const AUTOPILOT_HEAL_THRESHOLD: f64 = 0.30;
