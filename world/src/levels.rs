//! Built-in level catalog.

use car_parking_core::{CellCoord, LevelDefinition, Orientation, VehicleSpec, DEFAULT_GRID_SIZE};

/// The introductory level: one vertical car guards the target's row.
#[must_use]
pub fn easy() -> LevelDefinition {
    LevelDefinition {
        name: String::from("Easy"),
        grid_size: DEFAULT_GRID_SIZE,
        vehicles: vec![
            VehicleSpec::target(CellCoord::new(2, 2), 2, Orientation::Horizontal),
            VehicleSpec::blocker(CellCoord::new(2, 0), 2, Orientation::Vertical),
            VehicleSpec::blocker(CellCoord::new(4, 1), 2, Orientation::Vertical),
            VehicleSpec::blocker(CellCoord::new(0, 3), 2, Orientation::Horizontal),
        ],
        exit: CellCoord::new(DEFAULT_GRID_SIZE, 2),
        perfect_moves: 4,
    }
}

/// Every built-in level in presentation order.
#[must_use]
pub fn catalog() -> Vec<LevelDefinition> {
    vec![easy()]
}

/// Looks up a built-in level by name, ignoring ASCII case.
#[must_use]
pub fn by_name(name: &str) -> Option<LevelDefinition> {
    catalog()
        .into_iter()
        .find(|level| level.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PuzzleEngine;

    #[test]
    fn every_catalog_level_loads() {
        for level in catalog() {
            let name = level.name.clone();
            assert!(
                PuzzleEngine::create(level).is_ok(),
                "built-in level {name} must be valid"
            );
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(by_name("EASY"), Some(easy()));
        assert_eq!(by_name("expert"), None);
    }
}
