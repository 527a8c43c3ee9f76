//! Activity catalog and per-resident destination tables.
//!
//! An activity is a named state a resident can be in (sleep, class, meal…).
//! Each activity carries the floors where it may take place.  Some
//! activities can also happen on the resident's own floor; those set
//! `includes_home`, and the home floor is appended when a resident's
//! [`DestinationTable`] is built.
//!
//! Activity ids are assigned in insertion order, so the first activity
//! added is `ActivityId(0)`.

use rustc_hash::FxHashMap;

use lift_core::{ActivityId, FloorId};

use crate::{ScheduleError, ScheduleResult};

// ── ActivitySpec ──────────────────────────────────────────────────────────────

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivitySpec {
    pub name:          String,
    /// Building-wide floors where the activity takes place.  May be empty
    /// when the activity only ever happens at home.
    pub floors:        Vec<FloorId>,
    /// Whether the resident's home floor is also admissible.
    pub includes_home: bool,
}

impl ActivitySpec {
    pub fn new(name: impl Into<String>, floors: Vec<FloorId>, includes_home: bool) -> Self {
        Self { name: name.into(), floors, includes_home }
    }
}

// ── ActivityCatalog ───────────────────────────────────────────────────────────

/// The set of activities known to a simulation, indexed by [`ActivityId`].
#[derive(Clone, Debug, Default)]
pub struct ActivityCatalog {
    specs:   Vec<ActivitySpec>,
    by_name: FxHashMap<String, ActivityId>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from specs in id order.
    pub fn from_specs(specs: impl IntoIterator<Item = ActivitySpec>) -> ScheduleResult<Self> {
        let mut catalog = Self::new();
        for spec in specs {
            catalog.push(spec)?;
        }
        Ok(catalog)
    }

    /// Append an activity and return its id.
    pub fn push(&mut self, spec: ActivitySpec) -> ScheduleResult<ActivityId> {
        if self.by_name.contains_key(&spec.name) {
            return Err(ScheduleError::DuplicateActivity(spec.name));
        }
        let id = ActivityId::try_from(self.specs.len())
            .map_err(|_| ScheduleError::Parse("too many activities".into()))?;
        self.by_name.insert(spec.name.clone(), id);
        self.specs.push(spec);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, id: ActivityId) -> Option<&ActivitySpec> {
        self.specs.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<ActivityId> {
        self.by_name.get(name).copied()
    }

    /// Resolve `name`, failing with [`ScheduleError::UnknownActivity`].
    pub fn resolve(&self, name: &str) -> ScheduleResult<ActivityId> {
        self.id_of(name)
            .ok_or_else(|| ScheduleError::UnknownActivity(name.to_owned()))
    }

    pub fn name(&self, id: ActivityId) -> &str {
        self.get(id).map_or("?", |s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, &ActivitySpec)> {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, s)| (ActivityId(i as u16), s))
    }

    /// Highest floor named by any activity, if any.
    pub fn highest_floor(&self) -> Option<FloorId> {
        self.specs.iter().flat_map(|s| s.floors.iter().copied()).max()
    }
}

// ── DestinationTable ──────────────────────────────────────────────────────────

/// Admissible destination floors per activity for one resident.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DestinationTable {
    floors: Vec<Vec<FloorId>>,
}

impl DestinationTable {
    /// Copy the catalog's floors and add `home` to every activity that
    /// includes the home floor and does not already list it.
    pub fn for_resident(catalog: &ActivityCatalog, home: FloorId) -> Self {
        let floors = catalog
            .specs
            .iter()
            .map(|spec| {
                let mut f = spec.floors.clone();
                if spec.includes_home && !f.contains(&home) {
                    f.push(home);
                }
                f
            })
            .collect();
        Self { floors }
    }

    /// Floors admissible for `activity`.  Empty for unknown activities.
    #[inline]
    pub fn floors(&self, activity: ActivityId) -> &[FloorId] {
        self.floors
            .get(activity.index())
            .map_or(&[], Vec::as_slice)
    }
}
