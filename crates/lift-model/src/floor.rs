//! A floor: who is there and which hall-call buttons are lit.

use lift_core::{Direction, FloorId, PersonId};

/// One floor of the building.
///
/// A resident on this floor is in exactly one of `at_rest`, `waiting_up`
/// or `waiting_down`.  Waiting queues are FIFO.
#[derive(Clone, Debug, Default)]
pub struct Floor {
    pub id:               FloorId,
    pub at_rest:          Vec<PersonId>,
    pub waiting_up:       Vec<PersonId>,
    pub waiting_down:     Vec<PersonId>,
    /// Lit from the button press until a car onboards the up queue.
    pub up_call_active:   bool,
    pub down_call_active: bool,
}

impl Floor {
    pub fn new(id: FloorId) -> Self {
        Self { id, ..Self::default() }
    }

    #[inline]
    pub fn waiting(&self, direction: Direction) -> &[PersonId] {
        match direction {
            Direction::Up => &self.waiting_up,
            Direction::Down => &self.waiting_down,
        }
    }

    #[inline]
    pub fn waiting_mut(&mut self, direction: Direction) -> &mut Vec<PersonId> {
        match direction {
            Direction::Up => &mut self.waiting_up,
            Direction::Down => &mut self.waiting_down,
        }
    }

    #[inline]
    pub fn call_active(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up_call_active,
            Direction::Down => self.down_call_active,
        }
    }

    /// Light the button for `direction`.  Returns `true` if it was dark,
    /// i.e. a new call must be registered with the building.
    pub fn press(&mut self, direction: Direction) -> bool {
        let flag = match direction {
            Direction::Up => &mut self.up_call_active,
            Direction::Down => &mut self.down_call_active,
        };
        !std::mem::replace(flag, true)
    }

    pub fn reset_call(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up_call_active = false,
            Direction::Down => self.down_call_active = false,
        }
    }

    /// Empty the waiting queue for `direction`, in arrival order.
    pub fn take_waiting(&mut self, direction: Direction) -> Vec<PersonId> {
        std::mem::take(self.waiting_mut(direction))
    }

    /// Remove `person` from `at_rest`.  Returns `false` if absent.
    pub fn leave_rest(&mut self, person: PersonId) -> bool {
        match self.at_rest.iter().position(|&p| p == person) {
            Some(i) => {
                self.at_rest.remove(i);
                true
            }
            None => false,
        }
    }

    /// Residents on this floor in any collection.
    pub fn population(&self) -> usize {
        self.at_rest.len() + self.waiting_up.len() + self.waiting_down.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting_up.len() + self.waiting_down.len()
    }
}
