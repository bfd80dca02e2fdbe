//! Platform abstraction layer
//!
//! Drives the simulation from whatever clock and buttons the host has:
//! - Fixed-step accumulator over wall-clock deltas
//! - Input queue applied atomically before the next tick
//! - High-score persistence on game over

pub mod input;

use std::collections::VecDeque;

pub use input::{Button, Press, map_button};

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScores;
use crate::persistence::ScoreStore;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, Snapshot, advance};

/// One running game plus its storage
pub struct Session {
    state: GameState,
    store: Box<dyn ScoreStore>,
    pending: VecDeque<Command>,
    accumulator: f32,
    tick_dt: f32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Build a session, loading the high-score table from `store`
    pub fn new(settings: &Settings, store: Box<dyn ScoreStore>) -> Self {
        let seed = settings.effective_seed();
        let mut state = GameState::with_tuning(seed, settings.tuning.clone());
        state.high_scores = HighScores::load(store.as_ref());
        log::info!(
            "Session ready (seed {}, movement {})",
            seed,
            settings.tuning.movement.as_str()
        );

        Self {
            state,
            store,
            pending: VecDeque::new(),
            accumulator: 0.0,
            tick_dt: settings.tick_dt(),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Queue a raw button event
    pub fn button(&mut self, button: Button, press: Press) {
        if let Some(command) = map_button(button, press) {
            self.pending.push_back(command);
        }
    }

    /// Queue a command for the next tick
    pub fn queue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Run as many fixed ticks as `elapsed` seconds of wall time cover
    ///
    /// Returns the number of ticks run. Leftover time carries over.
    pub fn update(&mut self, elapsed: f32) -> u32 {
        let elapsed = if elapsed.is_finite() { elapsed.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= self.tick_dt;
            substeps += 1;
        }
        substeps
    }

    /// Apply pending input and run exactly one tick
    pub fn step(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            self.state.apply(command);
        }
        advance(&mut self.state, self.tick_dt);
        self.handle_events();
    }

    /// Events seen since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn handle_events(&mut self) {
        for event in self.state.take_events() {
            if let GameEvent::GameOver { rank: Some(_), .. } = event {
                if let Err(e) = self.state.high_scores.save(self.store.as_mut()) {
                    log::warn!("Failed to save high scores: {}", e);
                }
            }
            self.events.push(event);
        }
    }
}
