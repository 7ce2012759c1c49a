//! Collision detection for balls against pegs and side walls
//!
//! Detection only: these functions report what was hit and how deep, the
//! physics step decides how velocity responds.

use glam::Vec2;

use super::layout::Peg;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal from peg center toward ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
    /// Signed vertical offset of the ball from the peg center (negative = ball above)
    pub dy: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
            dy: 0.0,
        }
    }
}

/// Check a ball against a single peg
///
/// Overlap is strict: touching (distance == sum of radii) is not a hit.
pub fn ball_peg_collision(ball_pos: Vec2, ball_radius: f32, peg: &Peg) -> CollisionResult {
    let delta = ball_pos - peg.pos;
    let distance = delta.length();
    let combined = ball_radius + peg.radius;

    if distance >= combined {
        return CollisionResult::miss();
    }

    // Coincident centers have no direction; push straight up
    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::NEG_Y
    };

    CollisionResult {
        hit: true,
        normal,
        penetration: combined - distance,
        dy: delta.y,
    }
}

/// Find the first peg (in layout order) the ball overlaps
///
/// Later overlapping pegs are ignored for this tick.
pub fn first_peg_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    pegs: &[Peg],
) -> Option<(usize, CollisionResult)> {
    pegs.iter().enumerate().find_map(|(index, peg)| {
        let result = ball_peg_collision(ball_pos, ball_radius, peg);
        result.hit.then_some((index, result))
    })
}

/// Which side wall a ball crossed, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    Left,
    Right,
}

/// Check a ball against the side walls at `x = 0` and `x = board_width`
///
/// Left is checked first; a ball wider than the board only ever reports Left.
pub fn ball_wall_collision(ball_x: f32, ball_radius: f32, board_width: f32) -> Option<WallHit> {
    if ball_x - ball_radius < 0.0 {
        Some(WallHit::Left)
    } else if ball_x + ball_radius > board_width {
        Some(WallHit::Right)
    } else {
        None
    }
}

/// Check if a ball has fallen fully below the board
#[inline]
pub fn ball_exited(ball_y: f32, ball_radius: f32, board_height: f32) -> bool {
    ball_y - ball_radius > board_height
}
