//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Fixed stage order within a tick
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{boxes_overlap, footprint_supported};
pub use input::Command;
pub use snapshot::Snapshot;
pub use state::{
    Angel, AngelPhase, Bean, BeanKind, Block, Facing, GameEvent, GamePhase, GameState, Pyoro,
    StepDir, StepQueue, Tongue, TonguePhase,
};
pub use tick::advance;
