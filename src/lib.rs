//! Air Soccer - a deterministic 2v2 top-down disc-soccer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (field geometry, ball/player physics,
//!   the per-tick match pipeline and the kickoff state machine)
//!
//! Rendering, audio, input mapping and reward/training logic are external
//! collaborators: they drive the core through [`sim::MatchState::step`] and
//! read back through the public state fields or [`sim::MatchState::snapshot`].
//!
//! Coordinates are screen-style: x grows rightward, y grows downward. Blue
//! defends the left goal, Red the right one.

pub mod sim;

pub use sim::{
    Ball, FieldGeometry, MatchConfig, MatchOutcome, MatchState, MoveIntent, Player, SeparationMode,
    Team, TickInput, TickResult, tick,
};

/// Simulation constants
pub mod consts {
    /// Field dimensions (units)
    pub const FIELD_WIDTH: f64 = 600.0;
    pub const FIELD_HEIGHT: f64 = 400.0;

    /// Goal mouth height, vertically centered on each goal line
    pub const GOAL_HEIGHT: f64 = 100.0;
    /// Distance of each goal line from its vertical field edge
    pub const GOAL_LINE_OFFSET: f64 = 20.0;
    /// Keep-out margin for players along the left/right edges, so the ball
    /// can never rest against a wall out of a player's reach
    pub const SIDE_MARGIN: f64 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 10.0;
    /// Per-tick multiplicative velocity decay
    pub const BALL_FRICTION: f64 = 0.98;
    /// Velocity components below this clamp to exactly zero after friction
    pub const BALL_MIN_VELOCITY: f64 = 0.1;
    /// Speed imparted to the ball by player contact (overwrites, never adds)
    pub const BALL_KICK_SPEED: f64 = 5.0;
    /// Per-axis jitter for a ball crawling below the stop threshold
    pub const ANTI_STALL_JITTER: f64 = 0.5;
    /// Per-axis jitter added when the ball is pushed out of a player
    pub const UNSTICK_JITTER: f64 = 1.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f64 = 20.0;
    pub const PLAYER_SPEED: f64 = 7.0;

    /// Nominal tick rate the external driver paces at; the core itself never
    /// sleeps or measures wall-clock time
    pub const TICK_RATE: u64 = 60;
    /// Default match length (30 seconds at the nominal rate)
    pub const DEFAULT_MATCH_TICKS: u64 = 30 * TICK_RATE;
}
