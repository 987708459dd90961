#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the car parking puzzle.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative puzzle engine, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the engine executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Level data, move records and the
//! completion report live here as well so that every crate agrees on their
//! shape and serialized form.

use serde::{Deserialize, Serialize};

/// Side length of the board used by the shipped levels.
pub const DEFAULT_GRID_SIZE: u32 = 6;

/// Shortest permissible vehicle length measured in cells.
pub const MIN_VEHICLE_LENGTH: u32 = 2;

/// Commands that express all permissible puzzle mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that a vehicle slide a single cell in the provided direction.
    AttemptMove {
        /// Identifier of the vehicle attempting to move.
        vehicle: VehicleId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the most recent successful move be reverted.
    Undo,
    /// Requests that the puzzle return to its initial layout.
    Reset,
}

/// Events broadcast by the engine after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a vehicle slid between two origins.
    VehicleMoved {
        /// Identifier of the vehicle that moved.
        vehicle: VehicleId,
        /// Origin occupied before the move.
        from: CellCoord,
        /// Origin occupied after the move.
        to: CellCoord,
    },
    /// Reports that a move request was refused.
    MoveRejected {
        /// Identifier named by the request.
        vehicle: VehicleId,
        /// Direction named by the request.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Confirms that the most recent move was reverted.
    MoveUndone {
        /// Identifier of the vehicle that moved back.
        vehicle: VehicleId,
        /// Origin occupied before the undo.
        from: CellCoord,
        /// Origin occupied after the undo.
        to: CellCoord,
    },
    /// Reports that an undo request found no history to revert.
    UndoRejected,
    /// Announces that every vehicle returned to its initial origin.
    PuzzleReset,
    /// Announces that the target vehicle reached the exit for the first time.
    PuzzleSolved {
        /// Move counter value at the moment the puzzle was solved.
        move_count: u32,
    },
}

/// Reasons a single-step move may be refused by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The requested direction does not run along the vehicle's axis.
    WrongAxis,
    /// The vehicle would leave the board.
    OutOfBounds,
    /// The vehicle would overlap another vehicle.
    Blocked {
        /// Vehicle occupying the contested cell.
        by: VehicleId,
    },
    /// No vehicle with the requested identifier exists.
    UnknownVehicle,
}

/// Unique identifier assigned to a vehicle when a level is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(u32);

impl VehicleId {
    /// Creates a new vehicle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring cell in the provided direction.
    ///
    /// Yields `None` when the step would cross column or row zero.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        self.offset(direction.delta())
    }

    /// Applies a signed displacement, returning `None` on underflow or overflow.
    #[must_use]
    pub fn offset(self, (delta_column, delta_row): (i32, i32)) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(delta_column)?;
        let row = self.row.checked_add_signed(delta_row)?;
        Some(CellCoord::new(column, row))
    }
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: CellCoord,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: CellCoord, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the rectangle covers the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        let (end_column, end_row) = self.exclusive_end();
        cell.column() >= self.origin.column()
            && u64::from(cell.column()) < end_column
            && cell.row() >= self.origin.row()
            && u64::from(cell.row()) < end_row
    }

    /// Reports whether two rectangles share at least one cell.
    #[must_use]
    pub fn intersects(&self, other: &CellRect) -> bool {
        if self.size.is_empty() || other.size.is_empty() {
            return false;
        }

        let (self_end_column, self_end_row) = self.exclusive_end();
        let (other_end_column, other_end_row) = other.exclusive_end();

        u64::from(self.origin.column()) < other_end_column
            && u64::from(other.origin.column()) < self_end_column
            && u64::from(self.origin.row()) < other_end_row
            && u64::from(other.origin.row()) < self_end_row
    }

    /// Reports whether every covered cell lies inside a square board.
    #[must_use]
    pub fn fits_within(&self, grid_size: u32) -> bool {
        let (end_column, end_row) = self.exclusive_end();
        end_column <= u64::from(grid_size) && end_row <= u64::from(grid_size)
    }

    fn exclusive_end(&self) -> (u64, u64) {
        (
            u64::from(self.origin.column()) + u64::from(self.size.width()),
            u64::from(self.origin.row()) + u64::from(self.size.height()),
        )
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis along which a vehicle is allowed to slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// The vehicle spans columns and slides left or right.
    Horizontal,
    /// The vehicle spans rows and slides up or down.
    Vertical,
}

impl Orientation {
    /// Reports whether a step in `direction` runs along this axis.
    #[must_use]
    pub const fn accepts(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Self::Horizontal, Direction::Left | Direction::Right)
                | (Self::Vertical, Direction::Up | Direction::Down)
        )
    }

    /// Footprint of a vehicle of this orientation anchored at `origin`.
    #[must_use]
    pub const fn footprint(self, origin: CellCoord, length: u32) -> CellRect {
        let size = match self {
            Self::Horizontal => CellRectSize::new(length, 1),
            Self::Vertical => CellRectSize::new(1, length),
        };
        CellRect::from_origin_and_size(origin, size)
    }
}

/// Unit directions a vehicle may be asked to slide in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Signed `(column, row)` displacement of a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Lower-case name used by scripts and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Parses the lower-case name produced by [`Direction::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Declarative description of one vehicle inside a level definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Top-left or left-most cell occupied by the vehicle.
    pub origin: CellCoord,
    /// Number of cells the vehicle spans along its axis.
    pub length: u32,
    /// Axis along which the vehicle slides.
    pub orientation: Orientation,
    /// Marks the vehicle the player must bring to the exit.
    #[serde(default)]
    pub is_target: bool,
}

impl VehicleSpec {
    /// Describes a regular blocking vehicle.
    #[must_use]
    pub const fn blocker(origin: CellCoord, length: u32, orientation: Orientation) -> Self {
        Self {
            origin,
            length,
            orientation,
            is_target: false,
        }
    }

    /// Describes the target vehicle.
    #[must_use]
    pub const fn target(origin: CellCoord, length: u32, orientation: Orientation) -> Self {
        Self {
            origin,
            length,
            orientation,
            is_target: true,
        }
    }

    /// Cells covered by the vehicle at its declared origin.
    #[must_use]
    pub const fn footprint(&self) -> CellRect {
        self.orientation.footprint(self.origin, self.length)
    }
}

/// Board edge through which the target vehicle leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitSide {
    /// Exit beyond the last column.
    Right,
    /// Exit beyond the last row.
    Bottom,
    /// Exit on column zero.
    Left,
    /// Exit on row zero.
    Top,
}

impl ExitSide {
    /// Derives the exit side from the boundary the exit coordinate lies on.
    ///
    /// Boundaries are checked right, bottom, left, top; the first match wins.
    /// Coordinates that lie on no boundary, or beyond it, yield `None`.
    #[must_use]
    pub fn locate(exit: CellCoord, grid_size: u32) -> Option<Self> {
        let (column, row) = (exit.column(), exit.row());
        if column == grid_size && row < grid_size {
            Some(Self::Right)
        } else if row == grid_size && column < grid_size {
            Some(Self::Bottom)
        } else if column == 0 && row < grid_size {
            Some(Self::Left)
        } else if row == 0 && column < grid_size {
            Some(Self::Top)
        } else {
            None
        }
    }

    /// Orientation a vehicle needs to drive through this side.
    #[must_use]
    pub const fn axis(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Top | Self::Bottom => Orientation::Vertical,
        }
    }
}

/// Complete definition of a puzzle as loaded from a catalog or file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Display name of the level.
    pub name: String,
    /// Number of cells along each edge of the square board.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
    /// Vehicles in identifier order.
    pub vehicles: Vec<VehicleSpec>,
    /// Boundary coordinate the target vehicle must reach.
    pub exit: CellCoord,
    /// Move count regarded as a perfect solve.
    pub perfect_moves: u32,
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

/// Signed single-axis displacement applied by one successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Vehicle that moved.
    pub vehicle: VehicleId,
    /// Column displacement.
    pub delta_column: i32,
    /// Row displacement.
    pub delta_row: i32,
}

impl MoveRecord {
    /// Records a single step of `vehicle` in `direction`.
    #[must_use]
    pub const fn step(vehicle: VehicleId, direction: Direction) -> Self {
        let (delta_column, delta_row) = direction.delta();
        Self {
            vehicle,
            delta_column,
            delta_row,
        }
    }

    /// Displacement that reverts this record.
    #[must_use]
    pub const fn inverse(&self) -> Self {
        Self {
            vehicle: self.vehicle,
            delta_column: -self.delta_column,
            delta_row: -self.delta_row,
        }
    }

    /// Displacement as a `(column, row)` pair.
    #[must_use]
    pub const fn delta(&self) -> (i32, i32) {
        (self.delta_column, self.delta_row)
    }
}

/// Move-efficiency rating awarded once the puzzle is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StarRating {
    /// More than twice the perfect move count.
    Zero,
    /// Within twice the perfect move count.
    One,
    /// Within one and a half times the perfect move count.
    Two,
    /// At or below the perfect move count.
    Three,
}

impl StarRating {
    /// Rates `move_count` against the level's `perfect_moves`.
    ///
    /// Thresholds sit at exactly `1.5 × perfect` and `2 × perfect`; the
    /// comparisons are carried out on doubled integers so fractional
    /// thresholds are never truncated.
    #[must_use]
    pub fn from_move_count(move_count: u32, perfect_moves: u32) -> Self {
        let doubled_moves = u64::from(move_count) * 2;
        let perfect = u64::from(perfect_moves);
        if doubled_moves <= perfect * 2 {
            Self::Three
        } else if doubled_moves <= perfect * 3 {
            Self::Two
        } else if doubled_moves <= perfect * 4 {
            Self::One
        } else {
            Self::Zero
        }
    }

    /// Number of stars as an integer in `0..=3`.
    #[must_use]
    pub const fn stars(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Summary headline shown alongside the rating.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Three => "Perfect Solution!",
            Self::Two => "Great job!",
            Self::One => "Good effort!",
            Self::Zero => "Puzzle solved!",
        }
    }
}

/// Values handed to the surrounding application once a puzzle is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleReport {
    /// Move counter at the moment of the solve.
    pub move_count: u32,
    /// Rating derived from the move counter.
    pub stars: StarRating,
    /// Perfect move count defined by the level.
    pub perfect_moves: u32,
}

impl PuzzleReport {
    /// Builds the report for a solve that took `move_count` moves.
    #[must_use]
    pub fn new(move_count: u32, perfect_moves: u32) -> Self {
        Self {
            move_count,
            stars: StarRating::from_move_count(move_count, perfect_moves),
            perfect_moves,
        }
    }
}

/// Immutable representation of a single vehicle's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VehicleSnapshot {
    /// Identifier allocated to the vehicle when the level was loaded.
    pub id: VehicleId,
    /// Current top-left or left-most cell.
    pub origin: CellCoord,
    /// Number of cells spanned along the vehicle's axis.
    pub length: u32,
    /// Axis along which the vehicle slides.
    pub orientation: Orientation,
    /// Marks the target vehicle.
    pub is_target: bool,
}

impl VehicleSnapshot {
    /// Cells currently covered by the vehicle.
    #[must_use]
    pub const fn footprint(&self) -> CellRect {
        self.orientation.footprint(self.origin, self.length)
    }
}

/// Read-only snapshot describing every vehicle on the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VehicleView {
    snapshots: Vec<VehicleSnapshot>,
}

impl VehicleView {
    /// Creates a new vehicle view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<VehicleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleSnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot of the vehicle covering `cell`, if any.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&VehicleSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.footprint().contains(cell))
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<VehicleSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_thresholds_use_exact_fractions() {
        assert_eq!(StarRating::from_move_count(4, 4), StarRating::Three);
        assert_eq!(StarRating::from_move_count(5, 4), StarRating::Two);
        assert_eq!(StarRating::from_move_count(6, 4), StarRating::Two);
        assert_eq!(StarRating::from_move_count(7, 4), StarRating::One);
        assert_eq!(StarRating::from_move_count(8, 4), StarRating::One);
        assert_eq!(StarRating::from_move_count(9, 4), StarRating::Zero);
    }

    #[test]
    fn odd_perfect_counts_are_not_truncated() {
        // 1.5 × 3 = 4.5, so 4 moves still earn two stars and 5 only one.
        assert_eq!(StarRating::from_move_count(4, 3), StarRating::Two);
        assert_eq!(StarRating::from_move_count(5, 3), StarRating::One);
        assert_eq!(StarRating::from_move_count(6, 3), StarRating::One);
        assert_eq!(StarRating::from_move_count(7, 3), StarRating::Zero);
    }

    #[test]
    fn headlines_follow_star_count() {
        assert_eq!(StarRating::Three.headline(), "Perfect Solution!");
        assert_eq!(StarRating::Zero.headline(), "Puzzle solved!");
        assert_eq!(StarRating::Two.stars(), 2);
    }

    #[test]
    fn orientation_restricts_directions() {
        assert!(Orientation::Horizontal.accepts(Direction::Left));
        assert!(Orientation::Horizontal.accepts(Direction::Right));
        assert!(!Orientation::Horizontal.accepts(Direction::Up));
        assert!(Orientation::Vertical.accepts(Direction::Down));
        assert!(!Orientation::Vertical.accepts(Direction::Right));
    }

    #[test]
    fn step_refuses_to_cross_zero() {
        assert_eq!(CellCoord::new(0, 3).step(Direction::Left), None);
        assert_eq!(
            CellCoord::new(0, 3).step(Direction::Right),
            Some(CellCoord::new(1, 3))
        );
        assert_eq!(CellCoord::new(2, 0).step(Direction::Up), None);
    }

    #[test]
    fn footprints_intersect_only_when_sharing_cells() {
        let horizontal = Orientation::Horizontal.footprint(CellCoord::new(2, 2), 2);
        let touching = Orientation::Vertical.footprint(CellCoord::new(4, 1), 2);
        let crossing = Orientation::Vertical.footprint(CellCoord::new(3, 1), 2);

        assert!(!horizontal.intersects(&touching));
        assert!(horizontal.intersects(&crossing));
        assert!(horizontal.contains(CellCoord::new(3, 2)));
        assert!(!horizontal.contains(CellCoord::new(4, 2)));
    }

    #[test]
    fn fits_within_checks_the_far_edge() {
        let footprint = Orientation::Horizontal.footprint(CellCoord::new(4, 0), 2);
        assert!(footprint.fits_within(6));
        assert!(!footprint.fits_within(5));
    }

    #[test]
    fn exit_side_follows_boundary_order() {
        assert_eq!(ExitSide::locate(CellCoord::new(6, 2), 6), Some(ExitSide::Right));
        assert_eq!(ExitSide::locate(CellCoord::new(3, 6), 6), Some(ExitSide::Bottom));
        assert_eq!(ExitSide::locate(CellCoord::new(0, 4), 6), Some(ExitSide::Left));
        assert_eq!(ExitSide::locate(CellCoord::new(5, 0), 6), Some(ExitSide::Top));
        assert_eq!(ExitSide::locate(CellCoord::new(3, 3), 6), None);
        assert_eq!(ExitSide::locate(CellCoord::new(6, 6), 6), None);
    }

    #[test]
    fn move_record_inverse_negates_delta() {
        let record = MoveRecord::step(VehicleId::new(3), Direction::Down);
        assert_eq!(record.delta(), (0, 1));
        assert_eq!(record.inverse().delta(), (0, -1));
        assert_eq!(record.inverse().vehicle, VehicleId::new(3));
    }

    #[test]
    fn level_definition_round_trips_through_bincode() {
        let level = LevelDefinition {
            name: String::from("Round trip"),
            grid_size: DEFAULT_GRID_SIZE,
            vehicles: vec![
                VehicleSpec::target(CellCoord::new(0, 2), 2, Orientation::Horizontal),
                VehicleSpec::blocker(CellCoord::new(3, 1), 3, Orientation::Vertical),
            ],
            exit: CellCoord::new(6, 2),
            perfect_moves: 3,
        };

        let bytes = bincode::serialize(&level).expect("serialize");
        let restored: LevelDefinition = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, level);
    }
}
