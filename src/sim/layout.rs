//! Triangular peg grid and board geometry
//!
//! Row `r` holds `2 + r` pegs, centered horizontally. Rows start two
//! vertical spacings down so the ball has clearance to enter above the apex.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::LayoutParams;

/// A fixed peg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub pos: Vec2,
    pub radius: f32,
}

/// Board dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Whether a host-reported size can hold a board at all
    pub fn is_playable(width: f32, height: f32) -> bool {
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }
}

/// Compute peg centers for a board of the given width
///
/// Pegs are returned row-major (top row first, left to right), which is also
/// the order collision checks scan them in.
pub fn generate_layout(board_width: f32, params: &LayoutParams) -> Vec<Peg> {
    let mut pegs = Vec::with_capacity(peg_count(params.rows));

    for row in 0..params.rows {
        let pegs_in_row = 2 + row;
        let row_width = (pegs_in_row - 1) as f32 * params.spacing_horizontal;
        let start_x = (board_width - row_width) / 2.0;
        let y = (row + 2) as f32 * params.spacing_vertical;

        for col in 0..pegs_in_row {
            pegs.push(Peg {
                pos: Vec2::new(start_x + col as f32 * params.spacing_horizontal, y),
                radius: params.peg_radius,
            });
        }
    }

    pegs
}

/// Total pegs in a grid of `rows` rows: 2 + 3 + ... + (rows + 1)
#[inline]
pub fn peg_count(rows: usize) -> usize {
    rows * (rows + 3) / 2
}

/// Board plus the pegs derived from it
///
/// Only ever rebuilt whole, so a tick can never see pegs computed for a
/// different width than the walls it checks against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    board: Board,
    pegs: Vec<Peg>,
}

impl Layout {
    pub fn new(board: Board, params: &LayoutParams) -> Self {
        let pegs = generate_layout(board.width, params);
        log::info!(
            "Layout {}x{}: {} rows, {} pegs",
            board.width,
            board.height,
            params.rows,
            pegs.len()
        );
        Self { board, pegs }
    }

    /// Build a layout from hand-placed pegs (custom boards, fixtures)
    pub fn from_pegs(board: Board, pegs: Vec<Peg>) -> Self {
        Self { board, pegs }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rows_are_centered() {
        let params = LayoutParams::default();
        let pegs = generate_layout(720.0, &params);

        // Top row: 2 pegs, 48 apart, centered on 360
        assert_eq!(pegs[0].pos, Vec2::new(336.0, 76.0));
        assert_eq!(pegs[1].pos, Vec2::new(384.0, 76.0));

        // Every row is symmetric about the board center
        let mut start = 0;
        for row in 0..params.rows {
            let n = 2 + row;
            let first = pegs[start].pos.x;
            let last = pegs[start + n - 1].pos.x;
            assert!(((first + last) / 2.0 - 360.0).abs() < 1e-3);
            assert!((pegs[start].pos.y - (row + 2) as f32 * 38.0).abs() < 1e-3);
            start += n;
        }
        assert_eq!(start, pegs.len());
    }

    #[test]
    fn test_playable_board_sizes() {
        assert!(Board::is_playable(720.0, 640.0));
        assert!(!Board::is_playable(f32::NAN, 640.0));
        assert!(!Board::is_playable(720.0, f32::INFINITY));
        assert!(!Board::is_playable(-50.0, 640.0));
        assert!(!Board::is_playable(720.0, 0.0));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let params = LayoutParams::default();
        assert_eq!(generate_layout(500.0, &params), generate_layout(500.0, &params));
    }

    #[test]
    fn test_degenerate_width_does_not_panic() {
        let params = LayoutParams::default();
        let pegs = generate_layout(0.0, &params);
        assert_eq!(pegs.len(), peg_count(params.rows));
        assert!(pegs[0].pos.x < 0.0);
    }

    proptest! {
        #[test]
        fn prop_peg_count_is_arithmetic_series(rows in 0usize..40, width in 1.0f32..4000.0) {
            let params = LayoutParams { rows, ..LayoutParams::default() };
            let pegs = generate_layout(width, &params);
            prop_assert_eq!(pegs.len(), rows * (rows + 3) / 2);
            prop_assert_eq!(pegs.len(), (0..rows).map(|r| 2 + r).sum::<usize>());
        }
    }
}
