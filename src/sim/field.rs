//! Static field layout
//!
//! Pure data: outer walls, the two goal mouths and the player keep-out
//! margins. Validated once at match construction; nothing here mutates
//! during play.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Malformed field layout, detected at construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("field dimensions must be positive, got {width}x{height}")]
    NonPositiveField { width: f64, height: f64 },
    #[error("goal height {goal_height} must be positive and shorter than the field ({height})")]
    BadGoalHeight { goal_height: f64, height: f64 },
    #[error("goal lines at offset {offset} overlap on a field {width} wide")]
    GoalLinesOverlap { offset: f64, width: f64 },
    #[error("side margin {margin} leaves no playable strip on a field {width} wide")]
    BadSideMargin { margin: f64, width: f64 },
}

/// Field layout: outer bounds, goal mouths, player margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    pub width: f64,
    pub height: f64,
    /// Goal mouth height, vertically centered on each goal line
    pub goal_height: f64,
    /// Distance of each goal line from its vertical field edge
    pub goal_line_offset: f64,
    /// Player keep-out margin along the left/right edges
    pub side_margin: f64,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            goal_height: GOAL_HEIGHT,
            goal_line_offset: GOAL_LINE_OFFSET,
            side_margin: SIDE_MARGIN,
        }
    }
}

impl FieldGeometry {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GeometryError::NonPositiveField {
                width: self.width,
                height: self.height,
            });
        }
        if self.goal_height <= 0.0 || self.goal_height >= self.height {
            return Err(GeometryError::BadGoalHeight {
                goal_height: self.goal_height,
                height: self.height,
            });
        }
        if self.goal_line_offset < 0.0 || self.goal_line_offset * 2.0 >= self.width {
            return Err(GeometryError::GoalLinesOverlap {
                offset: self.goal_line_offset,
                width: self.width,
            });
        }
        if self.side_margin < 0.0 || self.side_margin * 2.0 >= self.width {
            return Err(GeometryError::BadSideMargin {
                margin: self.side_margin,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Top edge of both goal mouths
    #[inline]
    pub fn goal_top(&self) -> f64 {
        (self.height - self.goal_height) / 2.0
    }

    /// Bottom edge of both goal mouths
    #[inline]
    pub fn goal_bottom(&self) -> f64 {
        self.goal_top() + self.goal_height
    }

    /// Whether a y coordinate lies within the goal mouths (inclusive)
    #[inline]
    pub fn in_goal_mouth(&self, y: f64) -> bool {
        (self.goal_top()..=self.goal_bottom()).contains(&y)
    }

    /// Kickoff spot
    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}
