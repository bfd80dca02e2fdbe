//! Pyoro - a bean catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, tongue, beans, angel, scoring)
//! - `platform`: Fixed-step driver and button mapping
//! - `persistence`: Opaque key-value storage for the high-score table
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::{MovementModel, ScoreHeight, Tuning};

/// Game configuration constants
///
/// Everything here is fixed geometry. Balance values live in [`Tuning`].
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f32 = 0.016;
    /// Nominal tick interval handed to timers
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Maximum ticks per driver update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical grid dimensions (one block per column)
    pub const GRID_WIDTH: usize = 20;
    pub const GRID_HEIGHT: usize = 20;
    pub const GRID_W: f32 = GRID_WIDTH as f32;
    pub const GRID_H: f32 = GRID_HEIGHT as f32;
    /// Height at which beans and the angel touch the ledge
    pub const GROUND_Y: f32 = GRID_H - 1.0;

    /// Pyoro collision footprint (square)
    pub const PYORO_SIZE: f32 = 2.0;
    /// Pyoro sprite size, used to place the mouth
    pub const PYORO_VISUAL_SIZE: f32 = 5.0;
    /// Vertical resting position of Pyoro
    pub const PYORO_Y: f32 = GRID_H - 2.0;
    /// Offset from the sprite edge to where the tongue leaves the beak
    pub const MOUTH_OFFSET: f32 = 0.6;

    pub const BEAN_SIZE: f32 = 2.0;
    pub const TONGUE_WIDTH: f32 = 2.0;
    /// Bean pool capacity
    pub const MAX_BEANS: usize = 5;

    /// Number of background images the renderer cycles through
    pub const NUM_BACKGROUNDS: u32 = 21;
    /// Score points per background step
    pub const SCORE_PER_BACKGROUND: u32 = 40;

    /// High-score table capacity
    pub const NUM_HIGH_SCORES: usize = 10;
    /// Marker for an unused high-score slot
    pub const HIGH_SCORE_EMPTY: i32 = -1;
    /// Storage key for the high-score blob
    pub const PERSIST_KEY_HIGH_SCORES: u32 = 1;
}

/// Cheap length estimate: `max(|dx|, |dy|) + 0.4 * min(|dx|, |dy|)`
///
/// This is a deliberate approximation for laying out tongue body segments,
/// it overestimates the true length by up to ~8%.
#[inline]
pub fn approx_length(delta: glam::Vec2) -> f32 {
    let a = delta.abs();
    a.max_element() + 0.4 * a.min_element()
}
