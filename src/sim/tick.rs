//! Fixed-timestep match tick
//!
//! The canonical per-tick pipeline. The stage order is load-bearing: each
//! stage consumes the state the previous one mutated, so reordering changes
//! the dynamics.
//!
//! 1. Intent application in roster order (opens the kickoff window)
//! 2. Player-player overlap separation
//! 3. Ball advance (friction + clamp)
//! 4. Wall/goal-frame bounce
//! 5. Anti-stall jitter
//! 6. Ball-player kicks in roster order (last overlap wins)
//! 7. Stuck-ball resolution
//! 8. Goal check; a goal ends the tick early with the kickoff reset applied

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::player::{Player, Team};
use super::state::{MatchState, SeparationMode};

/// A single player's movement intent for one tick. No diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl MoveIntent {
    /// Unit compass vector, `None` for a stand-still tick. Screen
    /// coordinates: up is negative y.
    pub fn direction(self) -> Option<DVec2> {
        match self {
            MoveIntent::None => None,
            MoveIntent::Up => Some(DVec2::new(0.0, -1.0)),
            MoveIntent::Down => Some(DVec2::new(0.0, 1.0)),
            MoveIntent::Left => Some(DVec2::new(-1.0, 0.0)),
            MoveIntent::Right => Some(DVec2::new(1.0, 0.0)),
        }
    }
}

/// Per-tick input: one intent per roster slot `[Blue1, Blue2, Red1, Red2]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub intents: [MoveIntent; 4],
}

/// What one tick reported back to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickResult {
    pub goal_scored: bool,
    /// Team credited with the point (also on own goals)
    pub scoring_team: Option<Team>,
    pub own_goal: bool,
}

/// Which goal mouth the ball entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalSide {
    Left,
    Right,
}

impl GoalSide {
    /// Team credited with a ball in this mouth (Blue defends the left goal)
    #[inline]
    pub fn scoring_team(self) -> Team {
        match self {
            GoalSide::Left => Team::Red,
            GoalSide::Right => Team::Blue,
        }
    }

    #[inline]
    pub fn defending_team(self) -> Team {
        self.scoring_team().opponent()
    }
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput) -> TickResult {
    state.elapsed_ticks += 1;

    apply_intents(state, input);

    // Ordered-pair iteration separates each unordered pair twice per tick,
    // an intentional damping carry-over; SinglePass is the corrected,
    // explicitly different variant.
    match state.config.separation {
        SeparationMode::DoublePass => {
            for i in 0..state.players.len() {
                for j in 0..state.players.len() {
                    if i != j {
                        separate_pair(&mut state.players, i, j);
                    }
                }
            }
        }
        SeparationMode::SinglePass => {
            for i in 0..state.players.len() {
                for j in (i + 1)..state.players.len() {
                    separate_pair(&mut state.players, i, j);
                }
            }
        }
    }

    state.ball.advance();
    state.ball.resolve_walls(&state.config.field);
    state.ball.apply_anti_stall(&mut state.rng);

    // Roster order: when the ball overlaps several players at once, the
    // last one wins the touch and the velocity.
    for player in &state.players {
        state.ball.bounce_off(player);
    }

    let players = state.players;
    state.ball.resolve_stuck(&players, &mut state.rng);

    match detect_goal(state) {
        Some(side) => score_goal(state, side),
        None => TickResult::default(),
    }
}

/// Stage 1: roster-order intent application plus the kickoff transition.
///
/// The first nonzero intent from a player who is neither frozen nor
/// disabled closes the kickoff window: the waiting team (if any) unfreezes
/// immediately, so its players later in the same roster pass already move.
fn apply_intents(state: &mut MatchState, input: &TickInput) {
    for i in 0..state.players.len() {
        let Some(dir) = input.intents[i].direction() else {
            continue;
        };
        if state.players[i].frozen || state.players[i].disabled {
            continue;
        }

        if !state.kickoff_started {
            state.kickoff_started = true;
            if let Some(waiting) = state.frozen_team.take() {
                log::info!(
                    "kickoff opened by {}, {} unfrozen",
                    state.players[i].team.as_str(),
                    waiting.as_str()
                );
                state.unfreeze_team(waiting);
            }
        }

        let others = other_positions(&state.players, i);
        state.players[i].attempt_move(dir, &state.config.field, &others);
    }
}

/// Current positions of everyone except `idx`, in roster order
fn other_positions(players: &[Player; 4], idx: usize) -> [DVec2; 3] {
    let mut out = [DVec2::ZERO; 3];
    let mut n = 0;
    for (j, player) in players.iter().enumerate() {
        if j != idx {
            out[n] = player.pos;
            n += 1;
        }
    }
    out
}

/// Separate players `i` and `j` (mutates both) through a split borrow
fn separate_pair(players: &mut [Player; 4], i: usize, j: usize) {
    debug_assert_ne!(i, j);
    let (a, b) = if i < j {
        let (head, tail) = players.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = players.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    };
    a.separate_from(b);
}

/// Goal detection: the ball's leading edge crossed a goal line while its
/// center sits inside the mouth.
fn detect_goal(state: &MatchState) -> Option<GoalSide> {
    let ball = &state.ball;
    let field = &state.config.field;
    if !field.in_goal_mouth(ball.pos.y) {
        return None;
    }
    if ball.pos.x - ball.radius <= field.goal_line_offset {
        Some(GoalSide::Left)
    } else if ball.pos.x + ball.radius >= field.width - field.goal_line_offset {
        Some(GoalSide::Right)
    } else {
        None
    }
}

/// Post-goal kickoff freeze assignment (four-player rule), kept as one pure
/// function so alternate policies can swap in without touching the
/// pipeline: the team whose touch ended the play stands still - the scorer
/// after a normal goal, the own-goaling defenders after an own goal - and
/// the other team opens the next kickoff by moving first.
pub fn frozen_after_goal(side: GoalSide, last_touch: Option<Team>) -> Team {
    match last_touch {
        Some(team) if team == side.defending_team() => team,
        _ => side.scoring_team(),
    }
}

/// Stage 8: credit the point, decide the freeze, apply the kickoff reset
/// and report the event. The tick ends here.
fn score_goal(state: &mut MatchState, side: GoalSide) -> TickResult {
    let scoring = side.scoring_team();
    let own_goal = state.ball.last_touched_by == Some(side.defending_team());

    match scoring {
        Team::Blue => state.blue_score += 1,
        Team::Red => state.red_score += 1,
    }
    if own_goal {
        log::info!(
            "own goal: point for {} ({} - {})",
            scoring.as_str(),
            state.blue_score,
            state.red_score
        );
    } else {
        log::info!(
            "goal for {} ({} - {})",
            scoring.as_str(),
            state.blue_score,
            state.red_score
        );
    }

    let frozen = frozen_after_goal(side, state.ball.last_touched_by);
    state.reset_for_kickoff(Some(frozen));

    TickResult {
        goal_scored: true,
        scoring_team: Some(scoring),
        own_goal,
    }
}
