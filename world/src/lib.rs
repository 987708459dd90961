#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative puzzle state management for the car parking puzzle.
//!
//! [`PuzzleEngine`] owns the board, the vehicles and the move history. It can
//! be driven directly through its methods or through [`apply`], which accepts
//! [`Command`] values and reports what happened as [`Event`] values.

pub mod levels;
mod vehicles;

use car_parking_core::{
    CellCoord, Command, Direction, Event, ExitSide, LevelDefinition, MoveRecord, MoveRejection,
    PuzzleReport, StarRating, VehicleId, MIN_VEHICLE_LENGTH,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::vehicles::{Vehicle, VehicleRegistry};

/// Errors surfaced by the puzzle engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The level definition violates a board invariant.
    #[error("invalid level: {0}")]
    InvalidLevel(#[from] LevelError),
    /// The request named a vehicle this engine does not contain.
    #[error("unknown vehicle {}", .0.get())]
    UnknownVehicle(VehicleId),
}

/// Reasons a level definition is refused at construction time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The board has no cells.
    #[error("grid size must be at least one cell")]
    EmptyGrid,
    /// A vehicle is shorter than two cells.
    #[error("vehicle #{index} has length {length}, expected at least {}", MIN_VEHICLE_LENGTH)]
    VehicleTooShort {
        /// Position of the vehicle in the definition.
        index: usize,
        /// Declared length.
        length: u32,
    },
    /// A vehicle covers cells outside the board.
    #[error("vehicle #{index} extends beyond the {grid_size}x{grid_size} grid")]
    VehicleOutOfBounds {
        /// Position of the vehicle in the definition.
        index: usize,
        /// Side length of the board.
        grid_size: u32,
    },
    /// Two vehicles share at least one cell.
    #[error("vehicles #{first} and #{second} overlap")]
    VehiclesOverlap {
        /// Position of the earlier vehicle in the definition.
        first: usize,
        /// Position of the later vehicle in the definition.
        second: usize,
    },
    /// No vehicle is marked as the target.
    #[error("level has no target vehicle")]
    MissingTarget,
    /// More than one vehicle is marked as the target.
    #[error("level has {count} target vehicles, expected exactly one")]
    MultipleTargets {
        /// Number of vehicles marked as the target.
        count: usize,
    },
    /// The exit coordinate is not on a board boundary.
    #[error("exit ({}, {}) does not lie on the grid boundary", .exit.column(), .exit.row())]
    ExitOffBoundary {
        /// Offending exit coordinate.
        exit: CellCoord,
    },
}

/// Result of a move attempt that named an existing vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The vehicle moved.
    Applied(AppliedMove),
    /// The move was refused; nothing changed.
    Rejected(MoveRejection),
}

impl MoveOutcome {
    /// Reports whether the vehicle actually moved.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Displacement that was applied to a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppliedMove {
    /// History record describing the displacement.
    pub record: MoveRecord,
    /// Origin before the displacement.
    pub from: CellCoord,
    /// Origin after the displacement.
    pub to: CellCoord,
}

/// Authoritative state of one puzzle attempt.
#[derive(Clone, Debug)]
pub struct PuzzleEngine {
    name: String,
    grid_size: u32,
    exit: CellCoord,
    exit_side: ExitSide,
    perfect_moves: u32,
    vehicles: VehicleRegistry,
    initial: VehicleRegistry,
    history: Vec<MoveRecord>,
    move_count: u32,
    forward_moves: u32,
    solved: bool,
}

impl PuzzleEngine {
    /// Validates a level definition and prepares a fresh puzzle.
    pub fn create(level: LevelDefinition) -> Result<Self, EngineError> {
        let exit_side = validate(&level)?;
        let vehicles = VehicleRegistry::from_specs(&level.vehicles);

        let engine = Self {
            name: level.name,
            grid_size: level.grid_size,
            exit: level.exit,
            exit_side,
            perfect_moves: level.perfect_moves,
            initial: vehicles.clone(),
            vehicles,
            history: Vec::new(),
            move_count: 0,
            forward_moves: 0,
            solved: false,
        };

        debug!(
            level = %engine.name,
            vehicles = engine.vehicles.iter().count(),
            "puzzle created"
        );
        Ok(engine)
    }

    /// Slides a vehicle by one cell.
    ///
    /// Geometrically impossible requests come back as
    /// [`MoveOutcome::Rejected`]; only an identifier the engine does not know
    /// produces an error.
    pub fn attempt_move(
        &mut self,
        vehicle: VehicleId,
        direction: Direction,
    ) -> Result<MoveOutcome, EngineError> {
        let current = *self
            .vehicles
            .get(vehicle)
            .ok_or(EngineError::UnknownVehicle(vehicle))?;

        if let Err(reason) = self.check_step(&current, direction) {
            debug!(vehicle = vehicle.get(), direction = direction.name(), ?reason, "move rejected");
            return Ok(MoveOutcome::Rejected(reason));
        }

        let record = MoveRecord::step(vehicle, direction);
        let Some(applied) = self.displace(record) else {
            return Ok(MoveOutcome::Rejected(MoveRejection::OutOfBounds));
        };

        self.history.push(record);
        self.move_count = self.move_count.saturating_add(1);
        self.forward_moves = self.forward_moves.saturating_add(1);
        debug!(
            vehicle = vehicle.get(),
            direction = direction.name(),
            move_count = self.move_count,
            "move applied"
        );

        if !self.solved && self.target_at_exit() {
            self.solved = true;
            info!(level = %self.name, move_count = self.move_count, "puzzle solved");
        }

        Ok(MoveOutcome::Applied(applied))
    }

    /// Reverts the most recent move, if any.
    ///
    /// The solved latch is left untouched.
    pub fn undo(&mut self) -> Option<AppliedMove> {
        let record = self.history.pop()?;
        let Some(applied) = self.displace(record.inverse()) else {
            self.history.push(record);
            return None;
        };

        self.move_count = self.move_count.saturating_sub(1);
        debug!(
            vehicle = record.vehicle.get(),
            move_count = self.move_count,
            "move undone"
        );
        Some(applied)
    }

    /// Restores the layout captured at construction and clears all progress.
    pub fn reset(&mut self) {
        self.vehicles.clone_from(&self.initial);
        self.history.clear();
        self.move_count = 0;
        self.forward_moves = 0;
        self.solved = false;
        debug!(level = %self.name, "puzzle reset");
    }

    /// Reports whether the target vehicle has reached the exit.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Move counter used for the star rating; undo decrements it.
    #[must_use]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Star rating of the solve, available only once solved.
    #[must_use]
    pub fn star_rating(&self) -> Option<StarRating> {
        self.report().map(|report| report.stars)
    }

    /// Values handed to the surrounding application once solved.
    #[must_use]
    pub fn report(&self) -> Option<PuzzleReport> {
        self.solved
            .then(|| PuzzleReport::new(self.move_count, self.perfect_moves))
    }

    fn check_step(&self, vehicle: &Vehicle, direction: Direction) -> Result<(), MoveRejection> {
        if !vehicle.orientation.accepts(direction) {
            return Err(MoveRejection::WrongAxis);
        }

        let origin = vehicle
            .origin
            .step(direction)
            .ok_or(MoveRejection::OutOfBounds)?;
        let footprint = vehicle.footprint_at(origin);
        if !footprint.fits_within(self.grid_size) {
            return Err(MoveRejection::OutOfBounds);
        }

        match self.vehicles.first_overlap(vehicle.id, &footprint) {
            Some(by) => Err(MoveRejection::Blocked { by }),
            None => Ok(()),
        }
    }

    fn displace(&mut self, record: MoveRecord) -> Option<AppliedMove> {
        let from = self.vehicles.get(record.vehicle)?.origin;
        let to = from.offset(record.delta())?;
        let _ = self.vehicles.relocate(record.vehicle, to)?;
        Some(AppliedMove { record, from, to })
    }

    fn target_at_exit(&self) -> bool {
        let Some(target) = self.vehicles.target() else {
            return false;
        };
        if target.orientation != self.exit_side.axis() {
            return false;
        }
        let origin = target.origin;
        let exit = self.exit;
        match self.exit_side {
            ExitSide::Right => {
                origin.row() == exit.row()
                    && u64::from(origin.column()) + u64::from(target.length)
                        >= u64::from(exit.column())
            }
            ExitSide::Bottom => {
                origin.column() == exit.column()
                    && u64::from(origin.row()) + u64::from(target.length) >= u64::from(exit.row())
            }
            ExitSide::Left => origin.row() == exit.row() && origin.column() == 0,
            ExitSide::Top => origin.column() == exit.column() && origin.row() == 0,
        }
    }
}

fn validate(level: &LevelDefinition) -> Result<ExitSide, LevelError> {
    let grid_size = level.grid_size;
    if grid_size == 0 {
        return Err(LevelError::EmptyGrid);
    }

    for (index, spec) in level.vehicles.iter().enumerate() {
        if spec.length < MIN_VEHICLE_LENGTH {
            return Err(LevelError::VehicleTooShort {
                index,
                length: spec.length,
            });
        }
        if !spec.footprint().fits_within(grid_size) {
            return Err(LevelError::VehicleOutOfBounds { index, grid_size });
        }
    }

    for (first, spec) in level.vehicles.iter().enumerate() {
        let footprint = spec.footprint();
        for (offset, other) in level.vehicles[first + 1..].iter().enumerate() {
            if footprint.intersects(&other.footprint()) {
                return Err(LevelError::VehiclesOverlap {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }

    match level.vehicles.iter().filter(|spec| spec.is_target).count() {
        0 => return Err(LevelError::MissingTarget),
        1 => {}
        count => return Err(LevelError::MultipleTargets { count }),
    }

    ExitSide::locate(level.exit, grid_size)
        .ok_or(LevelError::ExitOffBoundary { exit: level.exit })
}

/// Applies the provided command to the engine, reporting outcomes as events.
pub fn apply(engine: &mut PuzzleEngine, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::AttemptMove { vehicle, direction } => {
            let was_solved = engine.is_solved();
            match engine.attempt_move(vehicle, direction) {
                Ok(MoveOutcome::Applied(applied)) => {
                    out_events.push(Event::VehicleMoved {
                        vehicle,
                        from: applied.from,
                        to: applied.to,
                    });
                    if !was_solved && engine.is_solved() {
                        out_events.push(Event::PuzzleSolved {
                            move_count: engine.move_count(),
                        });
                    }
                }
                Ok(MoveOutcome::Rejected(reason)) => out_events.push(Event::MoveRejected {
                    vehicle,
                    direction,
                    reason,
                }),
                Err(_) => out_events.push(Event::MoveRejected {
                    vehicle,
                    direction,
                    reason: MoveRejection::UnknownVehicle,
                }),
            }
        }
        Command::Undo => match engine.undo() {
            Some(applied) => out_events.push(Event::MoveUndone {
                vehicle: applied.record.vehicle,
                from: applied.from,
                to: applied.to,
            }),
            None => out_events.push(Event::UndoRejected),
        },
        Command::Reset => {
            engine.reset();
            out_events.push(Event::PuzzleReset);
        }
    }
}

/// Query functions that provide read-only access to the puzzle state.
pub mod query {
    use car_parking_core::{CellCoord, ExitSide, MoveRecord, VehicleId, VehicleView};

    use super::PuzzleEngine;

    /// Display name of the loaded level.
    #[must_use]
    pub fn level_name(engine: &PuzzleEngine) -> &str {
        &engine.name
    }

    /// Number of cells along each edge of the board.
    #[must_use]
    pub fn grid_size(engine: &PuzzleEngine) -> u32 {
        engine.grid_size
    }

    /// Boundary coordinate the target must reach.
    #[must_use]
    pub fn exit(engine: &PuzzleEngine) -> CellCoord {
        engine.exit
    }

    /// Board edge the exit lies on.
    #[must_use]
    pub fn exit_side(engine: &PuzzleEngine) -> ExitSide {
        engine.exit_side
    }

    /// Perfect move count defined by the level.
    #[must_use]
    pub fn perfect_moves(engine: &PuzzleEngine) -> u32 {
        engine.perfect_moves
    }

    /// Move counter shown by HUDs and used for rating.
    #[must_use]
    pub fn move_count(engine: &PuzzleEngine) -> u32 {
        engine.move_count
    }

    /// Successful forward moves since construction or reset, ignoring undos.
    #[must_use]
    pub fn forward_moves(engine: &PuzzleEngine) -> u32 {
        engine.forward_moves
    }

    /// Moves that an undo would revert, oldest first.
    #[must_use]
    pub fn history(engine: &PuzzleEngine) -> &[MoveRecord] {
        &engine.history
    }

    /// Identifier of the target vehicle.
    #[must_use]
    pub fn target(engine: &PuzzleEngine) -> Option<VehicleId> {
        engine.vehicles.target().map(|vehicle| vehicle.id)
    }

    /// Vehicle covering the provided cell, if any.
    #[must_use]
    pub fn occupant(engine: &PuzzleEngine, cell: CellCoord) -> Option<VehicleId> {
        engine.vehicles.occupant(cell)
    }

    /// Captures a read-only view of every vehicle on the board.
    #[must_use]
    pub fn vehicle_view(engine: &PuzzleEngine) -> VehicleView {
        VehicleView::from_snapshots(
            engine
                .vehicles
                .iter()
                .map(|vehicle| vehicle.snapshot())
                .collect(),
        )
    }
}
