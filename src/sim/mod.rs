//! Deterministic simulation module
//!
//! All match logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (owned by [`MatchState`], drawn in a fixed order)
//! - Fixed roster iteration order `[Blue1, Blue2, Red1, Red2]`
//! - No rendering or platform dependencies
//!
//! Given the same seed and the same per-tick intent sequence, two runs
//! produce bit-identical trajectories.

pub mod ball;
pub mod field;
pub mod player;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use field::{FieldGeometry, GeometryError};
pub use player::{Player, Team};
pub use state::{
    BallSnapshot, ConfigError, MatchConfig, MatchOutcome, MatchSnapshot, MatchState,
    PlayerSnapshot, SeparationMode,
};
pub use tick::{GoalSide, MoveIntent, TickInput, TickResult, frozen_after_goal, tick};
