//! Authoritative vehicle state management utilities.

use std::collections::BTreeMap;

use car_parking_core::{CellCoord, CellRect, Orientation, VehicleId, VehicleSnapshot, VehicleSpec};

/// State of a vehicle stored inside the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Vehicle {
    /// Identifier allocated when the level was loaded.
    pub(crate) id: VehicleId,
    /// Current anchor cell.
    pub(crate) origin: CellCoord,
    pub(crate) length: u32,
    pub(crate) orientation: Orientation,
    pub(crate) is_target: bool,
}

impl Vehicle {
    pub(crate) const fn footprint(&self) -> CellRect {
        self.footprint_at(self.origin)
    }

    /// Footprint the vehicle would cover if anchored at `origin`.
    pub(crate) const fn footprint_at(&self, origin: CellCoord) -> CellRect {
        self.orientation.footprint(origin, self.length)
    }

    pub(crate) const fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            origin: self.origin,
            length: self.length,
            orientation: self.orientation,
            is_target: self.is_target,
        }
    }
}

/// Registry that stores vehicles keyed by identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VehicleRegistry {
    entries: BTreeMap<VehicleId, Vehicle>,
}

impl VehicleRegistry {
    /// Allocates identifiers in definition order, starting at zero.
    pub(crate) fn from_specs(specs: &[VehicleSpec]) -> Self {
        let entries = specs
            .iter()
            .zip(0_u32..)
            .map(|(spec, index)| {
                let id = VehicleId::new(index);
                let vehicle = Vehicle {
                    id,
                    origin: spec.origin,
                    length: spec.length,
                    orientation: spec.orientation,
                    is_target: spec.is_target,
                };
                (id, vehicle)
            })
            .collect();
        Self { entries }
    }

    pub(crate) fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.entries.get(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.entries.values()
    }

    /// Moves a vehicle to a new anchor, returning the previous anchor.
    pub(crate) fn relocate(&mut self, id: VehicleId, origin: CellCoord) -> Option<CellCoord> {
        self.entries
            .get_mut(&id)
            .map(|vehicle| std::mem::replace(&mut vehicle.origin, origin))
    }

    /// First vehicle other than `mover` whose footprint overlaps `footprint`.
    pub(crate) fn first_overlap(
        &self,
        mover: VehicleId,
        footprint: &CellRect,
    ) -> Option<VehicleId> {
        self.entries
            .values()
            .filter(|vehicle| vehicle.id != mover)
            .find(|vehicle| vehicle.footprint().intersects(footprint))
            .map(|vehicle| vehicle.id)
    }

    /// Vehicle covering the provided cell, if any.
    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<VehicleId> {
        self.entries
            .values()
            .find(|vehicle| vehicle.footprint().contains(cell))
            .map(|vehicle| vehicle.id)
    }

    pub(crate) fn target(&self) -> Option<&Vehicle> {
        self.entries.values().find(|vehicle| vehicle.is_target)
    }
}
