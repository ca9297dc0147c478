//! Match state and configuration
//!
//! Everything that must be persisted for replay/determinism lives in
//! [`MatchState`], including the RNG. There are no process-wide singletons:
//! concurrent matches are independent `MatchState` values.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ball::Ball;
use super::field::{FieldGeometry, GeometryError};
use super::player::{Player, Team};
use super::tick::{MoveIntent, TickInput, TickResult, tick};
use crate::consts::*;

/// Invalid match configuration, detected at construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("ball radius must be positive, got {0}")]
    BadBallRadius(f64),
    #[error("player radius must be positive, got {0}")]
    BadPlayerRadius(f64),
    #[error("player speed must be positive, got {0}")]
    BadPlayerSpeed(f64),
    #[error("players of radius {radius} cannot fit a field {width}x{height}")]
    PlayerTooLarge {
        radius: f64,
        width: f64,
        height: f64,
    },
    #[error("match duration must be at least one tick")]
    ZeroDuration,
}

/// How the player-player overlap pass iterates pairs.
///
/// The faithful default walks every *ordered* pair, so each unordered pair
/// is separated twice per tick - a redundant damping pass preserved for
/// dynamical equivalence with the original simulation. `SinglePass` is the
/// corrected variant (each unordered pair once); it is a deliberately
/// different simulation, not the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeparationMode {
    #[default]
    DoublePass,
    SinglePass,
}

/// Match configuration, validated once when the match is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub field: FieldGeometry,
    pub ball_radius: f64,
    pub player_radius: f64,
    pub player_speed: f64,
    /// Match length in ticks
    pub match_ticks: u64,
    pub separation: SeparationMode,
    /// Whether a reset clears the ball's last-touch tag. Off by default:
    /// the tag survives resets, as in the observed behavior.
    pub clear_touch_on_reset: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field: FieldGeometry::default(),
            ball_radius: BALL_RADIUS,
            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            match_ticks: DEFAULT_MATCH_TICKS,
            separation: SeparationMode::default(),
            clear_touch_on_reset: false,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::BadBallRadius(self.ball_radius));
        }
        if self.player_radius <= 0.0 {
            return Err(ConfigError::BadPlayerRadius(self.player_radius));
        }
        if self.player_speed <= 0.0 {
            return Err(ConfigError::BadPlayerSpeed(self.player_speed));
        }
        let playable_width = self.field.width - 2.0 * self.field.side_margin;
        if 2.0 * self.player_radius >= playable_width
            || 2.0 * self.player_radius >= self.field.height
        {
            return Err(ConfigError::PlayerTooLarge {
                radius: self.player_radius,
                width: self.field.width,
                height: self.field.height,
            });
        }
        if self.match_ticks == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Terminal result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win(Team),
    Draw,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    /// Seed this match was built from, kept for reproducibility
    pub seed: u64,
    /// Single RNG behind all jitter; draw order is part of the contract
    pub rng: Pcg32,
    /// Fixed roster order `[Blue1, Blue2, Red1, Red2]`; iteration order over
    /// this array is significant for every pipeline stage
    pub players: [Player; 4],
    pub ball: Ball,
    pub blue_score: u32,
    pub red_score: u32,
    /// False only in the window right after a reset, before any non-frozen
    /// player has supplied a nonzero intent
    pub kickoff_started: bool,
    /// The team standing still until the other team opens the kickoff.
    /// At most one team is ever frozen.
    pub frozen_team: Option<Team>,
    pub elapsed_ticks: u64,
}

impl MatchState {
    /// New match with the default field and roster, seeded for replay.
    pub fn new(seed: u64) -> Self {
        Self::with_config(MatchConfig::default(), seed)
            .expect("default match configuration is valid")
    }

    /// New match from a custom configuration. Refuses to build on malformed
    /// geometry or radii; there is no partial construction.
    pub fn with_config(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let slots = default_slots(&config.field);
        let teams = [Team::Blue, Team::Blue, Team::Red, Team::Red];
        let players = std::array::from_fn(|i| {
            let mut player = Player::new(slots[i], teams[i]);
            player.radius = config.player_radius;
            player.speed = config.player_speed;
            player
        });

        let mut ball = Ball::new(config.field.center());
        ball.radius = config.ball_radius;

        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            players,
            ball,
            blue_score: 0,
            red_score: 0,
            kickoff_started: false,
            frozen_team: None,
            elapsed_ticks: 0,
        })
    }

    /// Advance one tick. The sole mutation entry point besides the resets.
    pub fn step(&mut self, intents: [MoveIntent; 4]) -> TickResult {
        tick(self, &TickInput { intents })
    }

    /// Full match/episode restart: scores, clock and kickoff state cleared,
    /// everyone back on their slot, nobody frozen.
    pub fn reset(&mut self) {
        self.blue_score = 0;
        self.red_score = 0;
        self.elapsed_ticks = 0;
        self.reset_for_kickoff(None);
    }

    /// Episode restart with custom starting placement layered on top of
    /// [`MatchState::reset`]. Kickoff slots (`initial_pos`) are untouched:
    /// post-goal resets still return players to their original slots.
    pub fn reset_with_positions(&mut self, positions: [DVec2; 4]) {
        self.reset();
        for (player, pos) in self.players.iter_mut().zip(positions) {
            player.pos = pos;
        }
    }

    /// Episode restart with each player placed uniformly at random inside
    /// their own team's half, drawn from the match RNG (roster order, x then
    /// y), as an automated-training episode reset does. The nominal 50-unit
    /// insets shrink on small fields so the sample ranges never go empty;
    /// on a degenerate field they collapse to the half's midpoint.
    pub fn randomize_positions(&mut self) {
        self.reset();
        let field = self.config.field;
        let inset_x = 50.0_f64.min(field.width / 4.0);
        let inset_y = 50.0_f64.min(field.height / 2.0);
        for player in &mut self.players {
            let (x_min, x_max) = match player.team {
                Team::Blue => (inset_x, field.width / 2.0 - inset_x),
                Team::Red => (field.width / 2.0 + inset_x, field.width - inset_x),
            };
            player.pos.x = self.rng.random_range(x_min..=x_max);
            player.pos.y = self.rng.random_range(inset_y..=field.height - inset_y);
        }
    }

    /// Shared reset primitive behind goals and restarts: ball to the center
    /// with zero velocity, players to their slots, kickoff window reopened,
    /// exactly `frozen` (or nobody) held still.
    pub(crate) fn reset_for_kickoff(&mut self, frozen: Option<Team>) {
        self.ball.reset(self.config.field.center());
        if self.config.clear_touch_on_reset {
            self.ball.last_touched_by = None;
        }
        for player in &mut self.players {
            player.pos = player.initial_pos;
            player.frozen = frozen == Some(player.team);
        }
        self.kickoff_started = false;
        self.frozen_team = frozen;
    }

    pub(crate) fn unfreeze_team(&mut self, team: Team) {
        for player in &mut self.players {
            if player.team == team {
                player.frozen = false;
            }
        }
    }

    /// Whether the match clock has run out
    pub fn is_finished(&self) -> bool {
        self.elapsed_ticks > self.config.match_ticks
    }

    /// Ticks left on the clock
    pub fn remaining_ticks(&self) -> u64 {
        self.config.match_ticks.saturating_sub(self.elapsed_ticks)
    }

    /// Terminal outcome by score comparison; `None` while still playing
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.is_finished() {
            return None;
        }
        Some(match self.blue_score.cmp(&self.red_score) {
            std::cmp::Ordering::Greater => MatchOutcome::Win(Team::Blue),
            std::cmp::Ordering::Less => MatchOutcome::Win(Team::Red),
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        })
    }

    /// Flat read-only view for render/telemetry/reward layers
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            players: self.players.map(|p| PlayerSnapshot {
                pos: p.pos,
                team: p.team,
                frozen: p.frozen,
                disabled: p.disabled,
            }),
            ball: BallSnapshot {
                pos: self.ball.pos,
                vel: self.ball.vel,
                last_touched_by: self.ball.last_touched_by,
            },
            blue_score: self.blue_score,
            red_score: self.red_score,
            kickoff_started: self.kickoff_started,
            frozen_team: self.frozen_team,
            elapsed_ticks: self.elapsed_ticks,
        }
    }
}

/// Default kickoff slots in roster order: a staggered 2-2, mirrored enough
/// to be fair but not perfectly symmetric (observed layout)
fn default_slots(field: &FieldGeometry) -> [DVec2; 4] {
    let w = field.width;
    let h = field.height;
    [
        DVec2::new(w * 0.25, h * 0.5),
        DVec2::new(w * 0.5 - 50.0, h * 0.375),
        DVec2::new(w * 0.75, h * 0.625),
        DVec2::new(w - 50.0, h * 0.5),
    ]
}

/// Per-player slice of a [`MatchSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub pos: DVec2,
    pub team: Team,
    pub frozen: bool,
    pub disabled: bool,
}

/// Ball slice of a [`MatchSnapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: DVec2,
    pub vel: DVec2,
    pub last_touched_by: Option<Team>,
}

/// Read-only state view handed to the outside world every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub players: [PlayerSnapshot; 4],
    pub ball: BallSnapshot,
    pub blue_score: u32,
    pub red_score: u32,
    pub kickoff_started: bool,
    pub frozen_team: Option<Team>,
    pub elapsed_ticks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_construction_succeeds() {
        let state = MatchState::new(1);
        assert_eq!(state.players[0].team, Team::Blue);
        assert_eq!(state.players[3].team, Team::Red);
        assert_eq!(state.ball.pos, DVec2::new(300.0, 200.0));
        assert_eq!(state.frozen_team, None);
        assert!(!state.kickoff_started);
    }

    #[test]
    fn roster_slots_match_observed_layout() {
        let state = MatchState::new(1);
        let positions: Vec<DVec2> = state.players.iter().map(|p| p.pos).collect();
        assert_eq!(
            positions,
            vec![
                DVec2::new(150.0, 200.0),
                DVec2::new(250.0, 150.0),
                DVec2::new(450.0, 250.0),
                DVec2::new(550.0, 200.0),
            ]
        );
    }

    #[test]
    fn invalid_config_refuses_to_build() {
        let config = MatchConfig {
            ball_radius: -1.0,
            ..Default::default()
        };
        assert_eq!(
            MatchState::with_config(config, 1).unwrap_err(),
            ConfigError::BadBallRadius(-1.0)
        );

        let config = MatchConfig {
            match_ticks: 0,
            ..Default::default()
        };
        assert_eq!(
            MatchState::with_config(config, 1).unwrap_err(),
            ConfigError::ZeroDuration
        );
    }

    #[test]
    fn custom_positions_do_not_move_kickoff_slots() {
        let mut state = MatchState::new(3);
        let custom = [
            DVec2::new(100.0, 100.0),
            DVec2::new(100.0, 300.0),
            DVec2::new(500.0, 100.0),
            DVec2::new(500.0, 300.0),
        ];
        state.reset_with_positions(custom);
        for (player, pos) in state.players.iter().zip(custom) {
            assert_eq!(player.pos, pos);
        }
        // A kickoff reset still returns everyone to the original slots
        state.reset_for_kickoff(Some(Team::Blue));
        assert_eq!(state.players[0].pos, DVec2::new(150.0, 200.0));
    }

    #[test]
    fn randomized_positions_stay_in_own_half() {
        let mut state = MatchState::new(99);
        for _ in 0..20 {
            state.randomize_positions();
            for player in &state.players {
                match player.team {
                    Team::Blue => assert!(player.pos.x <= 250.0 && player.pos.x >= 50.0),
                    Team::Red => assert!(player.pos.x >= 350.0 && player.pos.x <= 550.0),
                }
                assert!(player.pos.y >= 50.0 && player.pos.y <= 350.0);
            }
        }
    }

    #[test]
    fn randomized_positions_shrink_insets_on_narrow_fields() {
        // A 150-wide field passes validation but leaves less than 50 units
        // of inset per quarter; the sample ranges must tighten instead of
        // going empty.
        let config = MatchConfig {
            field: FieldGeometry {
                width: 150.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut state = MatchState::with_config(config, 13).unwrap();
        for _ in 0..20 {
            state.randomize_positions();
            for player in &state.players {
                match player.team {
                    Team::Blue => assert!(player.pos.x <= 75.0),
                    Team::Red => assert!(player.pos.x >= 75.0),
                }
                assert!(player.pos.x >= 0.0 && player.pos.x <= 150.0);
                assert!(player.pos.y >= 50.0 && player.pos.y <= 350.0);
            }
        }
    }

    #[test]
    fn reset_policy_controls_touch_tag() {
        let mut state = MatchState::new(5);
        state.ball.last_touched_by = Some(Team::Red);
        state.reset();
        assert_eq!(state.ball.last_touched_by, Some(Team::Red));

        let config = MatchConfig {
            clear_touch_on_reset: true,
            ..Default::default()
        };
        let mut state = MatchState::with_config(config, 5).unwrap();
        state.ball.last_touched_by = Some(Team::Red);
        state.reset();
        assert_eq!(state.ball.last_touched_by, None);
    }

    #[test]
    fn outcome_only_reported_after_the_clock() {
        let mut state = MatchState::new(8);
        assert_eq!(state.outcome(), None);
        state.blue_score = 2;
        state.red_score = 1;
        state.elapsed_ticks = state.config.match_ticks + 1;
        assert!(state.is_finished());
        assert_eq!(state.outcome(), Some(MatchOutcome::Win(Team::Blue)));

        state.red_score = 2;
        assert_eq!(state.outcome(), Some(MatchOutcome::Draw));
    }

    #[test]
    fn state_serde_round_trip_is_lossless() {
        let mut state = MatchState::new(77);
        state.step([MoveIntent::Up, MoveIntent::None, MoveIntent::Left, MoveIntent::Down]);
        let json = serde_json::to_string(&state).unwrap();
        let restored: MatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
