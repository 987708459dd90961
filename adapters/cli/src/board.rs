//! Plain-text rendering of the puzzle board.

use std::fmt::Write as _;

use car_parking_core::{CellCoord, ExitSide, Orientation};
use car_parking_world::{query, PuzzleEngine};

const EMPTY_CELL: char = '.';

/// Renders the board with one character per cell and the exit marked on its edge.
pub(crate) fn render(engine: &PuzzleEngine) -> String {
    let grid_size = query::grid_size(engine);
    let exit = query::exit(engine);
    let side = query::exit_side(engine);
    let mut out = String::new();

    if side == ExitSide::Top {
        out.push_str(&edge_marker(grid_size, exit.column(), '^'));
    }

    for row in 0..grid_size {
        let on_exit_row = exit.row() == row;
        out.push(if on_exit_row && side == ExitSide::Left { '<' } else { '|' });
        for column in 0..grid_size {
            let glyph = query::occupant(engine, CellCoord::new(column, row))
                .map_or(EMPTY_CELL, |vehicle| vehicle_glyph(vehicle.get()));
            out.push(' ');
            out.push(glyph);
        }
        out.push(' ');
        out.push(if on_exit_row && side == ExitSide::Right { '>' } else { '|' });
        out.push('\n');
    }

    if side == ExitSide::Bottom {
        out.push_str(&edge_marker(grid_size, exit.column(), 'v'));
    }

    out
}

/// One legend line per vehicle, in identifier order.
pub(crate) fn legend(engine: &PuzzleEngine) -> String {
    let mut out = String::new();
    for vehicle in query::vehicle_view(engine).iter() {
        let orientation = match vehicle.orientation {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        };
        let role = if vehicle.is_target { " (target)" } else { "" };
        let _ = writeln!(
            out,
            "{} = vehicle {}{role}: {orientation}, length {}, at ({}, {})",
            vehicle_glyph(vehicle.id.get()),
            vehicle.id.get(),
            vehicle.length,
            vehicle.origin.column(),
            vehicle.origin.row(),
        );
    }
    out
}

fn edge_marker(grid_size: u32, column: u32, marker: char) -> String {
    let mut line = String::from(" ");
    for index in 0..grid_size {
        line.push(' ');
        line.push(if index == column { marker } else { ' ' });
    }
    line.push('\n');
    line
}

fn vehicle_glyph(id: u32) -> char {
    char::from_digit(id, 36).unwrap_or('#')
}

#[cfg(test)]
mod tests {
    use super::*;
    use car_parking_world::levels;

    #[test]
    fn easy_board_marks_vehicles_and_exit() {
        let engine = PuzzleEngine::create(levels::easy()).expect("valid level");
        let rendered = render(&engine);

        assert_eq!(
            rendered,
            concat!(
                "| . . 1 . . . |\n",
                "| . . 1 . 2 . |\n",
                "| . . 0 0 2 . >\n",
                "| 3 3 . . . . |\n",
                "| . . . . . . |\n",
                "| . . . . . . |\n",
            )
        );
    }

    #[test]
    fn legend_lists_vehicles_in_order() {
        let engine = PuzzleEngine::create(levels::easy()).expect("valid level");
        let legend = legend(&engine);
        let first = legend.lines().next().expect("at least one vehicle");
        assert_eq!(first, "0 = vehicle 0 (target): horizontal, length 2, at (2, 2)");
        assert_eq!(legend.lines().count(), 4);
    }

    #[test]
    fn glyphs_fall_back_after_base36() {
        assert_eq!(vehicle_glyph(11), 'b');
        assert_eq!(vehicle_glyph(40), '#');
    }
}
