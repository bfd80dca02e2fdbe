//! Discrete input handlers
//!
//! Each handler runs synchronously between ticks. Anything not valid for the
//! current phase is silently ignored.

use super::state::{Facing, GameEvent, GamePhase, GameState};
use crate::tuning::MovementModel;

/// One logical input, as produced by the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Up button, single click (walk left)
    Up,
    /// Up button held
    UpRepeat,
    /// Down button, single click (walk right)
    Down,
    /// Down button held
    DownRepeat,
    Select,
    TogglePause,
}

impl GameState {
    /// Route a command to its handler
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Up => self.press_up(),
            Command::UpRepeat => self.press_up_repeat(),
            Command::Down => self.press_down(),
            Command::DownRepeat => self.press_down_repeat(),
            Command::Select => self.press_select(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Start a game, leave the game-over screen, or stick the tongue out
    pub fn press_select(&mut self) {
        match self.phase {
            GamePhase::Menu => {
                self.reset();
                log::info!("New game started");
            }
            GamePhase::GameOver => {
                self.phase = GamePhase::Menu;
                self.emit(GameEvent::ReturnedToMenu);
            }
            GamePhase::Playing => {
                if self.can_act() {
                    self.steps.clear();
                    self.pyoro.moving = false;
                    self.pyoro.extend_tongue();
                }
            }
        }
    }

    pub fn press_up(&mut self) {
        self.press_direction(Facing::Left, 1);
    }

    pub fn press_up_repeat(&mut self) {
        let steps = self.tuning.repeat_steps;
        self.press_direction(Facing::Left, steps);
    }

    pub fn press_down(&mut self) {
        self.press_direction(Facing::Right, 1);
    }

    pub fn press_down_repeat(&mut self) {
        let steps = self.tuning.repeat_steps;
        self.press_direction(Facing::Right, steps);
    }

    /// Pause or resume a running game
    pub fn toggle_pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.paused = !self.paused;
            log::debug!("Paused: {}", self.paused);
        }
    }

    /// Alive, playing and not busy with the tongue
    fn can_act(&self) -> bool {
        self.phase == GamePhase::Playing
            && !self.paused
            && !self.pyoro.dead
            && !self.pyoro.tongue.active
    }

    fn press_direction(&mut self, facing: Facing, steps: u32) {
        if !self.can_act() {
            return;
        }

        match self.tuning.movement {
            MovementModel::StepQueue => {
                let was = self.pyoro.facing;
                self.pyoro.facing = facing;
                if was != facing {
                    // Turn in place
                    self.steps.clear();
                } else {
                    self.steps.push(facing, steps, self.tuning.max_pending_steps);
                }
            }
            MovementModel::Continuous => {
                self.pyoro.facing = facing;
                self.pyoro.moving = true;
                self.pyoro.last_press_frame = self.frame_count;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{StepDir, TonguePhase};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(1);
        state.press_select();
        state
    }

    #[test]
    fn test_select_cycles_phases() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        state.press_select();
        assert_eq!(state.phase, GamePhase::Playing);

        state.phase = GamePhase::GameOver;
        state.press_select();
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_turn_in_place() {
        let mut state = playing();
        assert_eq!(state.pyoro.facing, Facing::Right);
        state.press_down_repeat();
        assert_eq!(state.steps.count(), 4);

        let x = state.pyoro.pos.x;
        state.press_up();
        assert_eq!(state.pyoro.facing, Facing::Left);
        assert!(state.steps.is_empty());
        assert_eq!(state.steps.dir(), StepDir::None);
        assert_eq!(state.pyoro.pos.x, x);
    }

    #[test]
    fn test_same_direction_queues_steps() {
        let mut state = playing();
        state.press_down();
        state.press_down();
        state.press_down_repeat();
        assert_eq!(state.steps.dir(), StepDir::Right);
        assert_eq!(state.steps.count(), 6);
    }

    #[test]
    fn test_queue_capped() {
        let mut state = playing();
        for _ in 0..30 {
            state.press_down_repeat();
        }
        assert_eq!(state.steps.count(), 60);
    }

    #[test]
    fn test_select_extends_tongue_and_clears_queue() {
        let mut state = playing();
        state.press_down_repeat();
        state.press_select();
        assert!(state.pyoro.tongue.active);
        assert_eq!(state.pyoro.tongue.phase, TonguePhase::Extending);
        assert_eq!(state.pyoro.tongue.direction, Facing::Right);
        assert!(state.steps.is_empty());
    }

    #[test]
    fn test_movement_ignored_while_tongue_out() {
        let mut state = playing();
        state.press_select();
        state.press_up();
        assert_eq!(state.pyoro.facing, Facing::Right);
        assert!(state.steps.is_empty());
    }

    #[test]
    fn test_movement_ignored_when_dead_or_on_menu() {
        let mut state = GameState::new(1);
        state.press_down();
        assert!(state.steps.is_empty());

        let mut state = playing();
        state.pyoro.dead = true;
        state.press_down();
        state.press_select();
        assert!(state.steps.is_empty());
        assert!(!state.pyoro.tongue.active);
    }

    #[test]
    fn test_continuous_model_sets_moving() {
        let mut state = GameState::with_tuning(1, Tuning::legacy());
        state.press_select();
        state.press_up_repeat();
        assert!(state.pyoro.moving);
        assert_eq!(state.pyoro.facing, Facing::Left);
        assert!(state.steps.is_empty());
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut state = GameState::new(1);
        state.toggle_pause();
        assert!(!state.paused);

        state.press_select();
        state.apply(Command::TogglePause);
        assert!(state.paused);
        state.apply(Command::TogglePause);
        assert!(!state.paused);
    }
}
