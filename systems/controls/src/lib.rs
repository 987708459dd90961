#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system translating pointer and keyboard input into puzzle commands.

use car_parking_core::{
    CellCoord, Command, Direction, Event, Orientation, VehicleId, VehicleSnapshot, VehicleView,
};

/// Keys the puzzle screen reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Slide the selected vehicle up.
    Up,
    /// Slide the selected vehicle down.
    Down,
    /// Slide the selected vehicle left.
    Left,
    /// Slide the selected vehicle right.
    Right,
    /// Revert the most recent move.
    Undo,
    /// Restore the initial layout.
    Reset,
}

/// Input distilled from adapter-provided frame data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlInput {
    /// Primary pointer button pressed.
    Click {
        /// Board cell under the pointer, or `None` when the pointer is off the board.
        cell: Option<CellCoord>,
    },
    /// Key pressed.
    Key(Key),
}

/// Controls system that tracks the selected vehicle and emits commands.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    selected: Option<VehicleId>,
    puzzle_complete: bool,
}

impl Controls {
    /// Creates a controls system with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            puzzle_complete: false,
        }
    }

    /// Vehicle currently selected by the player.
    #[must_use]
    pub const fn selected(&self) -> Option<VehicleId> {
        self.selected
    }

    /// Reports whether a solve has been observed since the last reset.
    #[must_use]
    pub const fn puzzle_complete(&self) -> bool {
        self.puzzle_complete
    }

    /// Consumes engine events and the frame's input to emit puzzle commands.
    ///
    /// Board clicks are ignored once a solve has been observed; keys keep
    /// working so that undo and reset stay available on the completion
    /// overlay.
    pub fn handle(
        &mut self,
        events: &[Event],
        vehicles: &VehicleView,
        input: Option<ControlInput>,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            match event {
                Event::PuzzleSolved { .. } => self.puzzle_complete = true,
                Event::PuzzleReset => {
                    self.puzzle_complete = false;
                    self.selected = None;
                }
                _ => {}
            }
        }

        match input {
            Some(ControlInput::Key(key)) => self.handle_key(key, out),
            Some(ControlInput::Click { cell: Some(cell) }) if !self.puzzle_complete => {
                self.handle_click(cell, vehicles, out);
            }
            Some(ControlInput::Click { .. }) | None => {}
        }
    }

    fn handle_key(&mut self, key: Key, out: &mut Vec<Command>) {
        let direction = match key {
            Key::Undo => {
                out.push(Command::Undo);
                return;
            }
            Key::Reset => {
                self.selected = None;
                out.push(Command::Reset);
                return;
            }
            Key::Up => Direction::Up,
            Key::Down => Direction::Down,
            Key::Left => Direction::Left,
            Key::Right => Direction::Right,
        };

        if let Some(vehicle) = self.selected {
            out.push(Command::AttemptMove { vehicle, direction });
        }
    }

    fn handle_click(&mut self, cell: CellCoord, vehicles: &VehicleView, out: &mut Vec<Command>) {
        let Some(clicked) = vehicles.at(cell) else {
            self.selected = None;
            return;
        };

        if self.selected != Some(clicked.id) {
            self.selected = Some(clicked.id);
            return;
        }

        if let Some(direction) = direction_toward(clicked, cell) {
            out.push(Command::AttemptMove {
                vehicle: clicked.id,
                direction,
            });
        }
    }
}

/// Direction from the vehicle's centre toward the centre of `cell`.
///
/// Coordinates are doubled so both centres land on integers. Returns `None`
/// when the offset along the vehicle's axis does not dominate.
fn direction_toward(vehicle: &VehicleSnapshot, cell: CellCoord) -> Option<Direction> {
    let footprint = vehicle.footprint();
    let centre_column =
        2 * i64::from(footprint.origin().column()) + i64::from(footprint.size().width());
    let centre_row = 2 * i64::from(footprint.origin().row()) + i64::from(footprint.size().height());
    let delta_column = 2 * i64::from(cell.column()) + 1 - centre_column;
    let delta_row = 2 * i64::from(cell.row()) + 1 - centre_row;

    match vehicle.orientation {
        Orientation::Horizontal if delta_column.abs() > delta_row.abs() => {
            Some(if delta_column > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        }
        Orientation::Vertical if delta_row.abs() > delta_column.abs() => Some(if delta_row > 0 {
            Direction::Down
        } else {
            Direction::Up
        }),
        Orientation::Horizontal | Orientation::Vertical => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(origin: CellCoord, length: u32, orientation: Orientation) -> VehicleSnapshot {
        VehicleSnapshot {
            id: VehicleId::new(0),
            origin,
            length,
            orientation,
            is_target: false,
        }
    }

    #[test]
    fn halves_of_a_short_car_point_outward() {
        let car = snapshot(CellCoord::new(2, 2), 2, Orientation::Horizontal);
        assert_eq!(direction_toward(&car, CellCoord::new(2, 2)), Some(Direction::Left));
        assert_eq!(direction_toward(&car, CellCoord::new(3, 2)), Some(Direction::Right));
    }

    #[test]
    fn middle_of_an_odd_vehicle_is_ambiguous() {
        let truck = snapshot(CellCoord::new(1, 0), 3, Orientation::Vertical);
        assert_eq!(direction_toward(&truck, CellCoord::new(1, 0)), Some(Direction::Up));
        assert_eq!(direction_toward(&truck, CellCoord::new(1, 1)), None);
        assert_eq!(direction_toward(&truck, CellCoord::new(1, 2)), Some(Direction::Down));
    }
}
