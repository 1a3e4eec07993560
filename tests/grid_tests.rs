//! Tests for board occupancy, square geometry and row clearing
//!
//! Test categories:
//! - Cell reads and writes
//! - Square movement against walls and occupied cells
//! - Square rotation and path blocking
//! - Full-row clearing and collapse

use blockfall::cell::{BlockColor, Cell};
use blockfall::error::GeometryError;
use blockfall::grid::{test_helpers::*, Grid, GRID_HEIGHT, GRID_WIDTH};
use blockfall::square::{Direction, Square};

fn square(row: isize, col: isize) -> Square {
    Square::new(row, col, BlockColor::Magenta, true).unwrap()
}

// ============================================================================
// Cell Tests
// ============================================================================

mod cells {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new();

        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.rows().count(), GRID_HEIGHT);
        assert!(grid.rows().flatten().all(|cell| *cell == Cell::Empty));
    }

    #[test]
    fn set_color_fills_cell() {
        let mut grid = Grid::new();

        grid.set_color(4, 5, BlockColor::Blue).unwrap();

        assert!(grid.is_occupied(4, 5));
        assert_eq!(grid.cell(4, 5), Some(Cell::Filled(BlockColor::Blue)));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn clear_cell_empties_it() {
        let mut grid = Grid::new();
        grid.set_color(4, 5, BlockColor::Blue).unwrap();

        grid.clear_cell(4, 5).unwrap();

        assert!(!grid.is_occupied(4, 5));
    }

    #[test]
    fn writes_outside_the_board_are_rejected() {
        let mut grid = Grid::new();

        assert_eq!(
            grid.set_color(GRID_HEIGHT, 0, BlockColor::Red),
            Err(GeometryError::InvalidRow(GRID_HEIGHT as isize))
        );
        assert_eq!(
            grid.set_cell(0, GRID_WIDTH, Cell::Empty),
            Err(GeometryError::InvalidColumn(GRID_WIDTH as isize))
        );
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn cell_outside_the_board_is_none() {
        let grid = Grid::new();

        assert_eq!(grid.cell(GRID_HEIGHT, 0), None);
        assert_eq!(grid.cell(0, GRID_WIDTH), None);
    }

    #[test]
    #[should_panic]
    fn is_occupied_outside_the_board_panics() {
        let grid = Grid::new();
        grid.is_occupied(GRID_HEIGHT, 0);
    }
}

// ============================================================================
// Square Movement Tests
// ============================================================================

mod square_movement {
    use super::*;

    #[test]
    fn square_blocked_on_the_right() {
        let mut grid = empty_grid();
        let mut s = square(4, 4);
        grid.set_color(4, 5, BlockColor::Blue).unwrap();

        assert!(!s.can_move(&grid, Direction::Right));
        assert!(s.can_move(&grid, Direction::Left));
        assert!(s.can_move(&grid, Direction::Down));

        s.shift(&grid, Direction::Down);
        assert_eq!((s.row(), s.col()), (5, 4));
    }

    #[test]
    fn square_stops_at_every_wall() {
        let grid = empty_grid();
        let top_left = square(0, 0);
        let bottom_right = square(GRID_HEIGHT as isize - 1, GRID_WIDTH as isize - 1);

        assert!(!top_left.can_move(&grid, Direction::Up));
        assert!(!top_left.can_move(&grid, Direction::Left));
        assert!(!bottom_right.can_move(&grid, Direction::Down));
        assert!(!bottom_right.can_move(&grid, Direction::Right));
    }

    #[test]
    fn blocked_shift_is_a_noop() {
        let grid = empty_grid();
        let mut s = square(0, 0);

        s.shift(&grid, Direction::Left);

        assert_eq!((s.row(), s.col()), (0, 0));
    }

    #[test]
    fn up_is_a_valid_step() {
        let grid = empty_grid();
        let mut s = square(5, 5);

        s.shift(&grid, Direction::Up);

        assert_eq!((s.row(), s.col()), (4, 5));
    }

    #[test]
    fn frozen_square_never_moves() {
        let grid = empty_grid();
        let s = Square::new(5, 5, BlockColor::Gray, false).unwrap();

        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!s.can_move(&grid, direction));
        }
    }

    #[test]
    fn pseudo_directions_are_not_steps() {
        let grid = empty_grid();
        let s = square(5, 5);

        assert!(!s.can_move(&grid, Direction::Drop));
        assert!(!s.can_move(&grid, Direction::Rotate));
    }

    #[test]
    fn construction_off_the_board_is_rejected() {
        assert_eq!(
            Square::new(-1, 0, BlockColor::Red, true),
            Err(GeometryError::InvalidRow(-1))
        );
        assert_eq!(
            Square::new(GRID_HEIGHT as isize, 0, BlockColor::Red, true),
            Err(GeometryError::InvalidRow(GRID_HEIGHT as isize))
        );
        assert_eq!(
            Square::new(0, GRID_WIDTH as isize, BlockColor::Red, true),
            Err(GeometryError::InvalidColumn(GRID_WIDTH as isize))
        );
    }

    #[test]
    fn set_color_changes_only_the_color() {
        let mut s = square(3, 3);

        s.set_color(BlockColor::Orange);

        assert_eq!(s.color(), BlockColor::Orange);
        assert_eq!((s.row(), s.col()), (3, 3));
    }
}

// ============================================================================
// Square Rotation Tests
// ============================================================================

mod square_rotation {
    use super::*;

    /// Where `(row, col)` lands after a quarter turn about `pivot`.
    fn turned(pivot: &Square, row: usize, col: usize) -> (usize, usize) {
        let (pr, pc) = (pivot.row() as isize, pivot.col() as isize);
        let (dr, dc) = (pr - row as isize, pc - col as isize);
        ((pr - dc) as usize, (pc + dr) as usize)
    }

    #[test]
    fn four_turns_return_to_start() {
        let grid = empty_grid();
        let pivot = square(5, 5);

        for distance in 1..=4 {
            let mut s = square(5 + distance - 1, 5 - distance);
            let start = (s.row(), s.col());
            let mut expected = start;

            for _ in 0..4 {
                assert!(s.can_rotate(&grid, &pivot));
                s.rotate(&grid, &pivot);
                expected = turned(&pivot, expected.0, expected.1);
                assert_eq!((s.row(), s.col()), expected);
            }

            assert_eq!((s.row(), s.col()), start);
        }
    }

    #[test]
    fn any_cell_on_the_path_blocks_rotation() {
        let mut grid = empty_grid();
        let pivot = square(5, 5);

        for distance in 1..=4usize {
            let mut s = square(5 + distance as isize - 1, 5 - distance as isize);
            let (mut row, mut col) = (s.row(), s.col());

            for k in 1..=distance {
                let (mut corner_row, mut corner_col) = if k < distance {
                    (row + 1, col + distance - k - 1)
                } else {
                    (row, col)
                };

                for _ in 0..4 {
                    (corner_row, corner_col) = turned(&pivot, corner_row, corner_col);

                    grid.set_color(corner_row, corner_col, BlockColor::Blue).unwrap();
                    assert!(!s.can_rotate(&grid, &pivot));
                    grid.clear_cell(corner_row, corner_col).unwrap();
                    assert!(s.can_rotate(&grid, &pivot));

                    s.rotate(&grid, &pivot);
                    (row, col) = turned(&pivot, row, col);
                    assert_eq!((s.row(), s.col()), (row, col));
                }
            }
        }
    }

    #[test]
    fn destination_off_the_board_refuses_rotation() {
        let grid = empty_grid();
        let pivot = square(9, 9);
        let mut s = square(8, 9);

        assert_eq!(s.rotation_target(&pivot), None);
        assert!(!s.can_rotate(&grid, &pivot));

        s.rotate(&grid, &pivot);
        assert_eq!((s.row(), s.col()), (8, 9));
    }

    #[test]
    fn blocked_destination_refuses_rotation() {
        let mut grid = empty_grid();
        let pivot = square(5, 5);
        let s = square(5, 6);
        grid.set_color(6, 5, BlockColor::Red).unwrap();

        assert_eq!(s.rotation_target(&pivot), Some((6, 5)));
        assert!(!s.can_rotate(&grid, &pivot));
    }

    #[test]
    fn pivot_rotates_onto_itself() {
        let grid = empty_grid();
        let pivot = square(5, 5);
        let mut same = pivot;

        same.rotate(&grid, &pivot);

        assert_eq!(same, pivot);
    }
}

// ============================================================================
// Row Clearing Tests
// ============================================================================

mod row_clearing {
    use super::*;

    #[test]
    fn full_rows_removed_and_partials_compact() {
        let mut grid = empty_grid();
        let before = [0, 10, 4, 2, 2, 10, 2, 2, 10, 2];
        for (row, &count) in before.iter().enumerate() {
            fill_centered(&mut grid, row, count);
        }

        let cleared = grid.clear_full_rows();

        assert_eq!(cleared, 3);
        let after = [0, 0, 0, 0, 4, 2, 2, 2, 2, 2];
        for row in 0..GRID_HEIGHT {
            let expected = after.get(row).copied().unwrap_or(0);
            assert!(is_centered(&grid, row, expected), "row {} should hold {} centered cells", row, expected);
        }
    }

    #[test]
    fn all_but_one_row_full() {
        let mut grid = empty_grid();
        for row in 0..GRID_HEIGHT {
            if row == 10 {
                grid.set_color(row, 6, BlockColor::Red).unwrap();
                grid.set_color(row, 7, BlockColor::Red).unwrap();
            } else {
                fill_row(&mut grid, row);
            }
        }

        let cleared = grid.clear_full_rows();

        assert_eq!(cleared, GRID_HEIGHT - 1);
        assert_eq!(grid.filled_count(), 2);
        assert!(grid.is_occupied(GRID_HEIGHT - 1, 6));
        assert!(grid.is_occupied(GRID_HEIGHT - 1, 7));
    }

    #[test]
    fn adjacent_full_rows_cleared_in_one_call() {
        let mut grid = empty_grid();
        fill_row(&mut grid, GRID_HEIGHT - 3);
        fill_row(&mut grid, GRID_HEIGHT - 2);
        grid.set_color(GRID_HEIGHT - 4, 0, BlockColor::Green).unwrap();
        grid.set_color(GRID_HEIGHT - 1, 3, BlockColor::Blue).unwrap();

        let cleared = grid.clear_full_rows();

        assert_eq!(cleared, 2);
        assert_eq!(grid.filled_count(), 2);
        assert_eq!(grid.cell(GRID_HEIGHT - 2, 0), Some(Cell::Filled(BlockColor::Green)));
        assert_eq!(grid.cell(GRID_HEIGHT - 1, 3), Some(Cell::Filled(BlockColor::Blue)));
    }

    #[test]
    fn colors_shift_down_with_their_rows() {
        let mut grid = empty_grid();
        fill_row(&mut grid, GRID_HEIGHT - 1);
        grid.set_color(GRID_HEIGHT - 2, 0, BlockColor::Red).unwrap();
        grid.set_color(GRID_HEIGHT - 3, 9, BlockColor::Cyan).unwrap();

        grid.clear_full_rows();

        assert_eq!(grid.cell(GRID_HEIGHT - 1, 0), Some(Cell::Filled(BlockColor::Red)));
        assert_eq!(grid.cell(GRID_HEIGHT - 2, 9), Some(Cell::Filled(BlockColor::Cyan)));
        assert_eq!(grid.filled_in_row(GRID_HEIGHT - 1), 1);
    }

    #[test]
    fn row_with_gap_is_kept() {
        let mut grid = empty_grid();
        fill_row_with_gap(&mut grid, GRID_HEIGHT - 1, 5);

        assert!(!grid.is_row_full(GRID_HEIGHT - 1));
        assert_eq!(grid.clear_full_rows(), 0);
        assert_eq!(grid.filled_in_row(GRID_HEIGHT - 1), GRID_WIDTH - 1);
    }

    #[test]
    fn top_row_is_cleared() {
        let mut grid = empty_grid();
        fill_row(&mut grid, 0);

        assert_eq!(grid.clear_full_rows(), 1);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn whole_board_cleared() {
        let mut grid = empty_grid();
        for row in 0..GRID_HEIGHT {
            fill_row(&mut grid, row);
        }

        assert_eq!(grid.clear_full_rows(), GRID_HEIGHT);
        assert_eq!(grid.filled_count(), 0);
    }
}
