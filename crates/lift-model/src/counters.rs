//! Step counters kept separately for each accounting period.

use lift_core::Period;

use crate::StateKind;

/// One `T` per [`Period`], indexed by `Period::slot()`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByPeriod<T>([T; 2]);

impl<T: Default> ByPeriod<T> {
    #[inline]
    pub fn get(&self, period: Period) -> &T {
        &self.0[period.slot()]
    }

    #[inline]
    pub fn get_mut(&mut self, period: Period) -> &mut T {
        &mut self.0[period.slot()]
    }

    /// Apply `f` to the counters of every period.
    #[inline]
    pub fn each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        self.0.iter_mut().for_each(&mut f);
    }

    /// Zero the counters of `period`, leaving the others untouched.
    pub fn reset(&mut self, period: Period) {
        self.0[period.slot()] = T::default();
    }
}

// ── Elevator ──────────────────────────────────────────────────────────────────

/// Steps a car spent in each state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatorCounters {
    pub idle:      u64,
    pub active:    u64,
    pub loading:   u64,
    pub returning: u64,
}

impl ElevatorCounters {
    #[inline]
    pub fn record(&mut self, kind: StateKind) {
        match kind {
            StateKind::Idle => self.idle += 1,
            StateKind::Active => self.active += 1,
            StateKind::Loading => self.loading += 1,
            StateKind::Returning => self.returning += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.idle + self.active + self.loading + self.returning
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

/// Steps a resident spent waiting for a car and riding one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonCounters {
    pub waiting: u64,
    pub riding:  u64,
}
