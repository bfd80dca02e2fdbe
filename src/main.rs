//! Pyoro headless runner
//!
//! Plays one game with a simple autopilot at fixed ticks and prints the
//! result. Useful for soak-testing the simulation and the score store.
//!
//! Usage: `pyoro [--movement step-queue|continuous] [seconds] [settings.json]`
//!
//! A settings path that does not exist yet is written with the settings used.

use std::path::PathBuf;

use pyoro::consts::{GRID_W, MOUTH_OFFSET, PYORO_VISUAL_SIZE};
use pyoro::persistence::FileStore;
use pyoro::platform::{Button, Press, Session};
use pyoro::sim::{BeanKind, Facing, GamePhase, Snapshot};
use pyoro::{MovementModel, Settings};

fn main() {
    env_logger::init();

    let mut movement: Option<MovementModel> = None;
    let mut positional = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--movement" {
            match args.next().map(|m| m.parse::<MovementModel>()) {
                Some(Ok(model)) => movement = Some(model),
                Some(Err(e)) => log::warn!("{}, keeping configured movement", e),
                None => log::warn!("--movement needs a value"),
            }
        } else {
            positional.push(arg);
        }
    }

    let seconds: f32 = positional
        .first()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120.0);
    let settings_path = positional.get(1).map(PathBuf::from);
    let mut settings = settings_path
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(model) = movement {
        settings.tuning.movement = model;
    }
    if let Some(path) = settings_path.as_deref().filter(|p| !p.exists()) {
        if let Err(e) = settings.save(path) {
            log::warn!("Could not write settings to {}: {}", path.display(), e);
        }
    }

    log::info!(
        "Pyoro (headless) starting, {} s of play, {} movement",
        seconds,
        settings.tuning.movement.as_str()
    );

    let store = FileStore::new(&settings.high_score_path);
    log::info!("High scores at {}", store.path().display());
    let mut session = Session::new(&settings, Box::new(store));
    let dt = settings.tick_dt();

    session.button(Button::Select, Press::Single);
    let total_ticks = (seconds / dt) as u64;
    for _ in 0..total_ticks {
        let snap = session.snapshot();
        if snap.phase == GamePhase::GameOver {
            break;
        }
        if let Some((button, press)) = autopilot(&snap) {
            session.button(button, press);
        }
        session.step();
    }

    for event in session.take_events() {
        log::debug!("{:?}", event);
    }

    let snap = session.snapshot();
    println!("Phase: {:?}", snap.phase);
    println!("Score: {}", snap.score);
    println!(
        "Blocks standing: {}/{}",
        snap.blocks.iter().filter(|&&b| b).count(),
        snap.blocks.len()
    );
    println!("TOP 10");
    for (i, row) in snap.high_scores.iter().enumerate() {
        let marker = if snap.is_last_game_row(i) { " <" } else { "" };
        match row {
            Some(score) => println!("{:2}. {}{}", i + 1, score, marker),
            None => println!("{:2}. ---", i + 1),
        }
    }
}

/// Pick a button press for this tick, or none
///
/// Dodges beans about to land on Pyoro, otherwise lines the tongue's
/// diagonal up with the lowest bean (pink ones first) and fires.
fn autopilot(snap: &Snapshot) -> Option<(Button, Press)> {
    if snap.phase != GamePhase::Playing || snap.pyoro.dead || snap.tongue.is_some() {
        return None;
    }
    let pyoro = snap.pyoro.pos;

    let threat = snap
        .beans
        .iter()
        .filter(|b| !b.caught && (b.pos.x - pyoro.x).abs() < 2.5 && b.pos.y > pyoro.y - 6.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    if let Some(bean) = threat {
        let away = if bean.pos.x > pyoro.x { Facing::Left } else { Facing::Right };
        return Some(walk(away));
    }

    let target = snap
        .beans
        .iter()
        .filter(|b| !b.caught)
        .max_by(|a, b| {
            let rank = |k: BeanKind| (k == BeanKind::Special) as u8;
            rank(a.kind)
                .cmp(&rank(b.kind))
                .then(a.pos.y.total_cmp(&b.pos.y))
        })?;

    // Tongue leaves the beak and climbs one unit per unit of horizontal travel
    let mouth_dx = PYORO_VISUAL_SIZE / 2.0 + MOUTH_OFFSET;
    let rise = (pyoro.y - PYORO_VISUAL_SIZE / 2.0 + MOUTH_OFFSET) - target.pos.y;
    if rise <= 0.0 {
        return None;
    }
    let side = if target.pos.x >= pyoro.x { Facing::Right } else { Facing::Left };
    let wanted = (target.pos.x - side.sign() * (mouth_dx + rise)).clamp(1.0, GRID_W - 1.0);

    if (wanted - pyoro.x).abs() < 0.5 {
        if snap.pyoro.facing == side {
            return Some((Button::Select, Press::Single));
        }
        return Some(walk(side));
    }
    let toward = if wanted > pyoro.x { Facing::Right } else { Facing::Left };
    Some(walk(toward))
}

/// One single click toward `toward`; the first click after facing away only turns
fn walk(toward: Facing) -> (Button, Press) {
    let button = match toward {
        Facing::Left => Button::Up,
        Facing::Right => Button::Down,
    };
    (button, Press::Single)
}
