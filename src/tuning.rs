//! Data-driven game balance
//!
//! Defaults reproduce the reference game. Everything here can be overridden
//! from the settings file without touching simulation code.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How horizontal input moves Pyoro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MovementModel {
    /// Each press queues tiny fixed steps, drained one per tick
    #[default]
    StepQueue,
    /// Legacy: constant velocity while a button keeps repeating
    Continuous,
}

impl MovementModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementModel::StepQueue => "step-queue",
            MovementModel::Continuous => "continuous",
        }
    }
}

impl FromStr for MovementModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "step-queue" | "steps" | "step" => Ok(MovementModel::StepQueue),
            "continuous" | "legacy" => Ok(MovementModel::Continuous),
            other => Err(format!("unknown movement model '{}'", other)),
        }
    }
}

/// Which tongue height feeds the score bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScoreHeight {
    /// Tip height when the tongue is back at the beak
    #[default]
    RetractionEnd,
    /// Tip height at the moment the bean was caught
    CatchPoint,
}

/// One score band: catches strictly above `max_fraction` of the grid height
/// (measured from the top) award `points`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub max_fraction: f32,
    pub points: u32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub movement: MovementModel,

    // === Tongue ===
    /// Extension speed (units/s along each axis)
    pub tongue_speed: f32,
    /// Retraction speed as a multiple of extension speed
    pub retract_multiplier: f32,

    // === Beans ===
    /// Base fall speed (units/s), scaled by each bean's speed factor
    pub bean_speed: f32,
    /// Bean speed factor range `[min, max)`
    pub bean_speed_min: f32,
    pub bean_speed_max: f32,
    /// Seconds between spawns at game speed 1.0
    pub spawn_frequency: f32,
    /// Chance of a special bean while a block is missing, as `numerator / denominator`
    pub special_odds: (u32, u32),

    // === Pace ===
    /// Game speed gained per scaled second
    pub acceleration: f32,
    /// Seconds between the fatal hit and game over
    pub death_delay: f32,

    // === Movement ===
    /// Distance of one queued step
    pub step_size: f32,
    /// Cap on pending steps
    pub max_pending_steps: u32,
    /// Steps queued by one repeat event
    pub repeat_steps: u32,
    /// Legacy walking speed (units/s)
    pub walk_speed: f32,
    /// Legacy: frames without a press before Pyoro stops
    pub release_timeout_frames: u32,

    // === Angel ===
    pub angel_speed: f32,

    // === Scoring ===
    /// Bands from the top of the grid down
    pub score_bands: Vec<ScoreBand>,
    /// Points when no band matches
    pub base_award: u32,
    pub score_height: ScoreHeight,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            movement: MovementModel::StepQueue,

            tongue_speed: 15.0,
            retract_multiplier: 2.0,

            bean_speed: 1.8,
            bean_speed_min: 0.5,
            bean_speed_max: 1.5,
            spawn_frequency: 2.0,
            special_odds: (2, 5),

            acceleration: 0.01,
            death_delay: 1.0,

            step_size: 0.25,
            max_pending_steps: 60,
            repeat_steps: 4,
            walk_speed: 25.0,
            release_timeout_frames: 9,

            angel_speed: 35.0,

            score_bands: vec![
                ScoreBand { max_fraction: 0.2, points: 1000 },
                ScoreBand { max_fraction: 0.4, points: 300 },
                ScoreBand { max_fraction: 0.6, points: 100 },
                ScoreBand { max_fraction: 0.8, points: 50 },
            ],
            base_award: 10,
            score_height: ScoreHeight::RetractionEnd,
        }
    }
}

impl Tuning {
    /// Legacy ruleset: continuous movement, everything else unchanged
    pub fn legacy() -> Self {
        Self {
            movement: MovementModel::Continuous,
            ..Self::default()
        }
    }

    /// Points for a catch completed at height `y` in a grid of `grid_height`
    pub fn award_for_height(&self, y: f32, grid_height: f32) -> u32 {
        self.score_bands
            .iter()
            .find(|band| y < grid_height * band.max_fraction)
            .map(|band| band.points)
            .unwrap_or(self.base_award)
    }

    /// Spawn interval at the given game speed (shrinks as the game speeds up)
    pub fn spawn_interval(&self, game_speed: f32) -> f32 {
        self.spawn_frequency / game_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GRID_H;

    #[test]
    fn test_award_bands() {
        let tuning = Tuning::default();
        assert_eq!(tuning.award_for_height(0.1 * GRID_H, GRID_H), 1000);
        assert_eq!(tuning.award_for_height(0.3 * GRID_H, GRID_H), 300);
        assert_eq!(tuning.award_for_height(0.5 * GRID_H, GRID_H), 100);
        assert_eq!(tuning.award_for_height(0.7 * GRID_H, GRID_H), 50);
        assert_eq!(tuning.award_for_height(0.9 * GRID_H, GRID_H), 10);
    }

    #[test]
    fn test_award_band_edges_fall_to_lower_tier() {
        let tuning = Tuning::default();
        // Exactly on a boundary is not "above" it
        assert_eq!(tuning.award_for_height(4.0, GRID_H), 300);
        assert_eq!(tuning.award_for_height(16.0, GRID_H), 10);
    }

    #[test]
    fn test_spawn_interval_shrinks() {
        let tuning = Tuning::default();
        assert!(tuning.spawn_interval(2.0) < tuning.spawn_interval(1.0));
        assert!((tuning.spawn_interval(1.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_movement_model_from_str() {
        assert_eq!("Legacy".parse::<MovementModel>(), Ok(MovementModel::Continuous));
        assert_eq!("steps".parse::<MovementModel>(), Ok(MovementModel::StepQueue));
        assert!("teleport".parse::<MovementModel>().is_err());
        for model in [MovementModel::StepQueue, MovementModel::Continuous] {
            assert_eq!(model.as_str().parse::<MovementModel>(), Ok(model));
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{"movement":"Continuous"}"#).unwrap();
        assert_eq!(tuning.movement, MovementModel::Continuous);
        assert_eq!(tuning.max_pending_steps, 60);
    }
}
