//! Fixed timestep simulation tick
//!
//! `advance` runs the per-tick stages in a fixed order. Later stages read
//! what earlier ones wrote (movement before tongue, tongue before beans), so
//! the order in `advance` is part of the game rules.

use super::collision::{
    bean_hits_pyoro, clamp_to_stage, column_at, footprint_supported, tip_out_of_bounds,
    tongue_hits_bean,
};
use super::state::{
    AngelPhase, BeanKind, Facing, GameEvent, GamePhase, GameState, TonguePhase,
};
use crate::consts::*;
use crate::tuning::{MovementModel, ScoreHeight};

/// Advance the game state by `dt` seconds of wall time
pub fn advance(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing || state.paused {
        return;
    }

    if state.pyoro.dead {
        tick_death_timer(state, dt);
        return;
    }

    let dt = ramp_speed(state, dt);
    state.frame_count += 1;

    move_pyoro(state, dt);
    update_tongue(state, dt);
    update_beans(state, dt);
    update_angel(state, dt);
    update_spawner(state, dt);
    update_background(state);
}

/// Count down the death animation, then close out the run
fn tick_death_timer(state: &mut GameState, dt: f32) {
    state.death_timer -= dt;
    if state.death_timer > 0.0 {
        return;
    }

    let score = state.score;
    let rank = state.high_scores.insert(score);
    state.last_game_score = Some(score);
    state.phase = GamePhase::GameOver;

    match rank {
        Some(rank) => log::info!("Game over: score {} ranked #{}", score, rank),
        None => log::info!("Game over: score {}", score),
    }
    state.emit(GameEvent::GameOver { score, rank });
}

/// Scale `dt` by the current game speed and push the speed up
fn ramp_speed(state: &mut GameState, dt: f32) -> f32 {
    let scaled = dt * state.game_speed;
    state.game_speed += scaled * state.tuning.acceleration;
    scaled
}

fn move_pyoro(state: &mut GameState, dt: f32) {
    match state.tuning.movement {
        MovementModel::StepQueue => drain_step_queue(state),
        MovementModel::Continuous => walk(state, dt),
    }
}

/// Apply at most one queued step
fn drain_step_queue(state: &mut GameState) {
    if state.pyoro.tongue.active {
        state.steps.clear();
        return;
    }
    if let Some(facing) = state.steps.pop() {
        let distance = state.tuning.step_size;
        try_move(state, facing, distance);
    }
}

/// Legacy movement: walk while the button keeps repeating
fn walk(state: &mut GameState, dt: f32) {
    if state.pyoro.tongue.active {
        state.pyoro.moving = false;
    }
    let since_press = state.frame_count.saturating_sub(state.pyoro.last_press_frame);
    if state.pyoro.moving && since_press > u64::from(state.tuning.release_timeout_frames) {
        state.pyoro.moving = false;
    }
    if state.pyoro.moving {
        let facing = state.pyoro.facing;
        let distance = state.tuning.walk_speed * dt;
        try_move(state, facing, distance);
    }
}

/// Move Pyoro horizontally unless the landing spot has a gap under it
fn try_move(state: &mut GameState, facing: Facing, distance: f32) -> bool {
    let x = clamp_to_stage(state.pyoro.pos.x + facing.sign() * distance);
    if !footprint_supported(&state.blocks, x) {
        return false;
    }
    state.pyoro.pos.x = x;
    true
}

fn update_tongue(state: &mut GameState, dt: f32) {
    if !state.pyoro.tongue.active {
        return;
    }
    match state.pyoro.tongue.phase {
        TonguePhase::Extending => extend_tongue(state, dt),
        TonguePhase::Retracting => retract_tongue(state, dt),
    }
}

fn extend_tongue(state: &mut GameState, dt: f32) {
    let step = state.tuning.tongue_speed * dt;
    let tongue = &mut state.pyoro.tongue;
    tongue.tip.x += tongue.direction.sign() * step;
    tongue.tip.y -= step;

    let tip = tongue.tip;
    if let Some(bean) = state
        .beans
        .iter_mut()
        .find(|b| b.active && !b.caught && tongue_hits_bean(tip, b.pos))
    {
        bean.caught = true;
        tongue.caught_bean = true;
        tongue.catch_y = tip.y;
        tongue.phase = TonguePhase::Retracting;
    }

    if tip_out_of_bounds(tip) {
        tongue.phase = TonguePhase::Retracting;
    }
}

fn retract_tongue(state: &mut GameState, dt: f32) {
    let step = state.tuning.tongue_speed * state.tuning.retract_multiplier * dt;
    let tongue = &mut state.pyoro.tongue;
    tongue.tip.x -= tongue.direction.sign() * step;
    tongue.tip.y += step;

    let tip = tongue.tip;
    let caught = state.beans.iter().position(|b| b.active && b.caught);
    if let Some(slot) = caught {
        state.beans[slot].pos = tip;
    }

    if tip.y < state.pyoro.pos.y {
        return;
    }

    if let (true, Some(slot)) = (state.pyoro.tongue.caught_bean, caught) {
        let height = match state.tuning.score_height {
            ScoreHeight::RetractionEnd => tip.y,
            ScoreHeight::CatchPoint => state.pyoro.tongue.catch_y,
        };
        let points = state.tuning.award_for_height(height, GRID_H);
        let kind = state.beans[slot].kind;
        state.score += points;

        if kind == BeanKind::Special {
            if let Some(column) = state.find_destroyed_block() {
                state.spawn_angel(column);
            }
        }

        state.beans[slot].active = false;
        state.beans[slot].caught = false;
        log::debug!("Caught {:?} bean for {} points", kind, points);
        state.emit(GameEvent::BeanCaught { kind, points });
    }

    state.pyoro.tongue.active = false;
    state.pyoro.tongue.caught_bean = false;
}

/// Let beans fall; a bean can kill Pyoro or knock out a block
fn update_beans(state: &mut GameState, dt: f32) {
    let fall = state.tuning.bean_speed * dt;

    for slot in 0..state.beans.len() {
        let bean = &mut state.beans[slot];
        if !bean.active || bean.caught {
            continue;
        }
        bean.pos.y += bean.speed * fall;
        let pos = bean.pos;

        if !state.pyoro.dead && !state.pyoro.tongue.active && bean_hits_pyoro(state.pyoro.pos, pos) {
            state.pyoro.dead = true;
            state.death_timer = state.tuning.death_delay;
            log::info!("Pyoro was hit at x={:.2} (score {})", state.pyoro.pos.x, state.score);
            state.emit(GameEvent::PyoroDied);
            break;
        }

        if pos.y >= GROUND_Y {
            let hit = column_at(pos.x).filter(|&c| state.blocks[c].exists);
            if let Some(column) = hit {
                state.blocks[column].exists = false;
                log::debug!("Block {} destroyed", column);
                state.emit(GameEvent::BlockDestroyed { column });
            }
            state.beans[slot].active = false;
        }
    }
}

fn update_angel(state: &mut GameState, dt: f32) {
    if !state.angel.active {
        return;
    }
    let step = state.tuning.angel_speed * dt;

    match state.angel.phase {
        AngelPhase::Descending => {
            state.angel.pos.y += step;
            if state.angel.pos.y >= GROUND_Y {
                let column = state.angel.target;
                if let Some(block) = state.blocks.get_mut(column) {
                    block.exists = true;
                    block.is_repairing = false;
                    log::debug!("Block {} repaired", column);
                    state.emit(GameEvent::BlockRepaired { column });
                }
                state.angel.phase = AngelPhase::Ascending;
            }
        }
        AngelPhase::Ascending => {
            state.angel.pos.y -= step;
            if state.angel.pos.y < 0.0 {
                state.angel.active = false;
            }
        }
    }
}

fn update_spawner(state: &mut GameState, dt: f32) {
    state.bean_spawn_timer += dt;
    if state.bean_spawn_timer >= state.tuning.spawn_interval(state.game_speed) {
        state.spawn_bean();
        state.bean_spawn_timer = 0.0;
    }
}

fn update_background(state: &mut GameState) {
    state.background_index = (state.score / SCORE_PER_BACKGROUND).min(NUM_BACKGROUNDS - 1);
}
