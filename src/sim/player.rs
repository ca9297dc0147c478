//! Players: disc-shaped, compass-direction movement, mutual overlap
//! separation, and the kickoff/curriculum flags.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::field::FieldGeometry;
use crate::consts::*;

/// The two sides of the match. Blue defends the left goal, Red the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Blue => "Blue",
            Team::Red => "Red",
        }
    }
}

/// One of the four field players
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub team: Team,
    /// Identical for all players; the symmetric collision math relies on it
    pub radius: f64,
    /// Distance covered by one accepted move
    pub speed: f64,
    /// Kickoff slot this player returns to after every goal
    pub initial_pos: DVec2,
    /// Standing still until the opposing team opens the kickoff
    pub frozen: bool,
    /// Ignores intents but stays on the field as a solid obstacle
    /// (training-curriculum flag)
    pub disabled: bool,
}

impl Player {
    pub fn new(pos: DVec2, team: Team) -> Self {
        Self {
            pos,
            team,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            initial_pos: pos,
            frozen: false,
            disabled: false,
        }
    }

    /// Try to step one tick in `dir` (a unit compass vector). The move is
    /// atomic: it is rejected wholesale - no axis-separated sliding - if the
    /// candidate position leaves the field (side margin on the left/right
    /// edges, none on top/bottom) or comes within two radii of any other
    /// player's current position. Returns whether the move was applied.
    pub fn attempt_move(
        &mut self,
        dir: DVec2,
        field: &FieldGeometry,
        others: &[DVec2],
    ) -> bool {
        if self.frozen || self.disabled {
            return false;
        }

        let candidate = self.pos + dir * self.speed;

        if candidate.x - self.radius < field.side_margin
            || candidate.x + self.radius > field.width - field.side_margin
            || candidate.y - self.radius < 0.0
            || candidate.y + self.radius > field.height
        {
            return false;
        }

        for &other in others {
            if candidate.distance(other) < self.radius * 2.0 {
                return false;
            }
        }

        self.pos = candidate;
        true
    }

    /// Split an overlap evenly: push both players apart by half the overlap
    /// each along the center-to-center line.
    pub fn separate_from(&mut self, other: &mut Player) {
        let delta = self.pos - other.pos;
        let dist = delta.length();
        let min_dist = self.radius + other.radius;
        if dist >= min_dist || dist == 0.0 {
            // Coincident centers have no separation axis
            return;
        }
        let push = delta / dist * ((min_dist - dist) / 2.0);
        self.pos += push;
        other.pos -= push;
    }
}
