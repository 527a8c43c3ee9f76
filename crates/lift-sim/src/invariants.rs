//! Full membership check over a building.
//!
//! O(residents + cars × floors).  Run after every tick when
//! `SimConfig::verify_invariants` is set, and from tests.

use lift_core::{Direction, PersonId};
use lift_model::Location;

use crate::{Building, ViolationKind};

/// Check that every resident is held by exactly one collection, that the
/// collection agrees with its `Location` tag, and that every car owes a
/// stop for each rider slot it carries.
pub fn verify(building: &Building) -> Result<(), ViolationKind> {
    let mut seen = vec![0u32; building.persons.len()];

    let mut hold = |id: PersonId, held: Location| -> Result<(), ViolationKind> {
        let person = building
            .persons
            .get(id.index())
            .ok_or(ViolationKind::PersonMissing { person: id })?;
        seen[id.index()] += 1;
        if person.location != held {
            return Err(ViolationKind::LocationMismatch { person: id, location: person.location, held });
        }
        Ok(())
    };

    for floor in &building.floors {
        for &id in &floor.at_rest {
            hold(id, Location::AtRest(floor.id))?;
        }
        for direction in Direction::BOTH {
            for &id in floor.waiting(direction) {
                hold(id, Location::Waiting { floor: floor.id, direction })?;
            }
        }
    }

    for car in &building.elevators {
        for (slot, riders) in car.rider_slots() {
            if !car.owes_stop(slot) {
                return Err(ViolationKind::RiderWithoutStop { car: car.id, floor: slot });
            }
            for &id in riders {
                hold(id, Location::Riding(car.id))?;
                let destination = building.persons[id.index()].destination;
                if destination != slot {
                    return Err(ViolationKind::RiderMisrouted { car: car.id, person: id, slot, destination });
                }
            }
        }
    }

    for (i, &count) in seen.iter().enumerate() {
        let person = building.persons[i].id;
        match count {
            0 => return Err(ViolationKind::PersonMissing { person }),
            1 => {}
            count => return Err(ViolationKind::PersonDuplicated { person, count }),
        }
    }
    Ok(())
}
