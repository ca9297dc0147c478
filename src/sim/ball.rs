//! Ball physics: friction advance, wall/goal-frame bounces, player kicks
//! and the two jitter passes that keep the ball from stalling or resting
//! inside a player.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::FieldGeometry;
use super::player::{Player, Team};
use crate::consts::*;

/// The match ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Per-tick multiplicative velocity decay
    pub friction: f64,
    /// Components below this clamp to exactly zero after the friction step
    pub min_velocity: f64,
    /// Team whose player last kicked the ball; drives own-goal attribution
    /// and the post-goal kickoff freeze
    pub last_touched_by: Option<Team>,
}

impl Ball {
    pub fn new(pos: DVec2) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            radius: BALL_RADIUS,
            friction: BALL_FRICTION,
            min_velocity: BALL_MIN_VELOCITY,
            last_touched_by: None,
        }
    }

    /// Integrate one tick: position by current velocity, then friction with
    /// a per-axis zero clamp. No bounds checks here.
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel *= self.friction;
        if self.vel.x.abs() < self.min_velocity {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < self.min_velocity {
            self.vel.y = 0.0;
        }
    }

    /// Elastic reflection off the four field edges: clamp to the boundary
    /// and negate the crossed component. The left/right edges do not reflect
    /// while the ball's y sits inside the goal mouth - the ball is allowed
    /// through toward the goal line.
    pub fn resolve_walls(&mut self, field: &FieldGeometry) {
        let in_mouth = field.in_goal_mouth(self.pos.y);

        if self.pos.x - self.radius < 0.0 && !in_mouth {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x + self.radius > field.width && !in_mouth {
            self.pos.x = field.width - self.radius;
            self.vel.x = -self.vel.x;
        }

        // Top and bottom always reflect
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y + self.radius > field.height {
            self.pos.y = field.height - self.radius;
            self.vel.y = -self.vel.y;
        }
    }

    /// Perturb a ball crawling just below the stop threshold on both axes so
    /// it does not loiter indefinitely near a wall. Runs right after
    /// [`Ball::resolve_walls`] each tick.
    pub fn apply_anti_stall<R: Rng>(&mut self, rng: &mut R) {
        let crawling =
            self.vel.x.abs() < self.min_velocity && self.vel.y.abs() < self.min_velocity;
        if crawling && self.vel != DVec2::ZERO {
            self.vel.x += rng.random_range(-ANTI_STALL_JITTER..=ANTI_STALL_JITTER);
            self.vel.y += rng.random_range(-ANTI_STALL_JITTER..=ANTI_STALL_JITTER);
        }
    }

    /// Kick response on player contact: overwrite velocity with the
    /// player-to-ball unit vector at the fixed kick speed and record the
    /// touch. Exactly coincident centers have no contact normal and are
    /// treated as no contact at all. Returns whether a kick happened.
    pub fn bounce_off(&mut self, player: &Player) -> bool {
        let delta = self.pos - player.pos;
        let dist = delta.length();
        if dist >= self.radius + player.radius || dist == 0.0 {
            return false;
        }
        self.vel = delta / dist * BALL_KICK_SPEED;
        self.last_touched_by = Some(player.team);
        true
    }

    /// A ball can end a tick still overlapping a player (e.g. the player
    /// walked into it). Push it out along the center line by the full
    /// overlap and add jitter on top of the existing velocity so the pair
    /// cannot re-collide identically forever.
    pub fn resolve_stuck<R: Rng>(&mut self, players: &[Player], rng: &mut R) {
        for player in players {
            let delta = self.pos - player.pos;
            let dist = delta.length();
            let min_dist = self.radius + player.radius;
            if dist >= min_dist {
                continue;
            }
            if dist > 0.0 {
                self.pos += delta / dist * (min_dist - dist);
            }
            // Coincident centers leave the push direction undefined; the
            // jitter alone has to separate the pair over the next ticks.
            self.vel.x += rng.random_range(-UNSTICK_JITTER..=UNSTICK_JITTER);
            self.vel.y += rng.random_range(-UNSTICK_JITTER..=UNSTICK_JITTER);
        }
    }

    /// Reposition with zero velocity (kickoff, match reset). The touch tag
    /// is left alone; clearing it is the controller's reset-policy decision.
    pub fn reset(&mut self, pos: DVec2) {
        self.pos = pos;
        self.vel = DVec2::ZERO;
    }
}
