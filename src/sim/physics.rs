//! Single-ball physics step
//!
//! One call advances one ball by one display frame. Order matters:
//! gravity feeds velocity before position, friction decays vx every tick
//! whether or not anything is hit, and at most one peg is resolved.

use rand::Rng;

use super::collision::{WallHit, ball_exited, ball_wall_collision, first_peg_collision};
use super::layout::Layout;
use super::state::Ball;
use crate::centered_jitter;
use crate::settings::PhysicsParams;

/// What happened to a ball during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Index (layout order) of the peg resolved this tick
    pub collided_peg: Option<usize>,
    /// Side wall bounced off this tick
    pub wall: Option<WallHit>,
    /// Ball has dropped fully below the board
    pub exited: bool,
}

/// Advance a ball by one tick against a layout
pub fn advance<R: Rng>(
    ball: &mut Ball,
    layout: &Layout,
    params: &PhysicsParams,
    rng: &mut R,
) -> StepOutcome {
    let board = layout.board();
    let radius = ball.radius;

    // --- INTEGRATION ---
    ball.vel.y += params.gravity;
    ball.pos.y += ball.vel.y;
    ball.vel.x *= params.horizontal_friction;
    ball.pos.x += ball.vel.x;

    // --- SIDE WALLS ---
    let wall = ball_wall_collision(ball.pos.x, radius, board.width);
    match wall {
        Some(WallHit::Left) => {
            ball.pos.x = radius;
            ball.vel.x *= -params.wall_restitution;
        }
        Some(WallHit::Right) => {
            ball.pos.x = board.width - radius;
            ball.vel.x *= -params.wall_restitution;
        }
        None => {}
    }

    // --- PEGS ---
    let collided_peg = first_peg_collision(ball.pos, radius, layout.pegs()).map(|(index, hit)| {
        // Soft correction: only part of the overlap is removed per tick
        ball.pos += hit.normal * hit.penetration * params.peg_correction_factor;
        ball.vel.y *= -params.peg_bounce_vertical_damping;
        ball.vel.x = hit.normal.x * params.peg_bounce_horizontal_speed
            + centered_jitter(rng, params.peg_bounce_jitter);

        // Resting on top of a peg: kick it loose
        if ball.vel.y.abs() < params.stall_speed_threshold && hit.dy < 0.0 {
            ball.vel.y = params.stall_kick_vy;
        }

        ball.peg_hits += 1;
        index
    });

    StepOutcome {
        collided_peg,
        wall,
        exited: ball_exited(ball.pos.y, radius, board.height),
    }
}
