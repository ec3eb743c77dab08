//! Activity-on-arrow network: an adjacency-list DAG with attribute state.
//!
//! Events are integer-identified nodes carrying earliest/latest event times;
//! activities are edges carrying the normal/crash duration and cost figures
//! plus the derived cost slope and total float.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Event identifier (u32 for compact storage and fast hashing).
pub type EventId = u32;

/// An activity is identified by its ordered `(from, to)` event pair.
pub type ActivityKey = (EventId, EventId);

/// Errors that can occur while building a network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// An activity points from a later-introduced event back to an earlier
    /// one, so the input order is not a topological order.
    #[error("activity ({0}, {1}) is inconsistent with the topological order of the input")]
    NotTopological(EventId, EventId),
    /// Two activities share the same `(from, to)` event pair.
    #[error("duplicate activity between events {0} and {1}")]
    DuplicateActivity(EventId, EventId),
    /// The activity list is empty.
    #[error("the project has no activities")]
    EmptyProject,
}

/// Per-activity attribute state.
///
/// `normal_duration` and `normal_cost` are mutated by the crashing loop;
/// `cost_slope` and `total_float` are derived and refreshed by the
/// calculator and solver respectively.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityState {
    pub normal_duration: i64,
    pub normal_cost: f64,
    pub crash_duration: i64,
    pub crash_cost: f64,
    /// Marginal cost per unit of duration saved; `None` marks a
    /// non-crashable activity (zero duration span, e.g. a dummy edge).
    pub cost_slope: Option<f64>,
    /// Slack computed by the most recent solve. Zero means critical.
    pub total_float: i64,
}

impl ActivityState {
    pub fn new(
        normal_duration: i64,
        normal_cost: f64,
        crash_duration: i64,
        crash_cost: f64,
    ) -> Self {
        Self {
            normal_duration,
            normal_cost,
            crash_duration,
            crash_cost,
            cost_slope: None,
            total_float: 0,
        }
    }

    /// An activity is fully crashed once its normal duration has been
    /// reduced down to its crash duration.
    pub fn is_fully_crashed(&self) -> bool {
        self.normal_duration <= self.crash_duration
    }
}

/// Earliest and latest event times for one event, set by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventTimes {
    pub earliest: i64,
    pub latest: i64,
}

const NO_NEIGHBORS: &[EventId] = &[];

/// The activity network: events, activities, and the indirect cost rate.
///
/// Events are stored in first-seen order, which construction verifies to be
/// a valid topological order; the solver walks that order directly. The
/// source is the first event introduced by the activity list, the sink the
/// last.
#[derive(Clone, Debug)]
pub struct ActivityNetwork {
    /// Events in first-seen (== topological) order.
    events: Vec<EventId>,
    /// Event id -> position in `events`.
    positions: FxHashMap<EventId, usize>,
    /// Event times indexed by position.
    times: Vec<EventTimes>,
    /// Successor lists indexed by position.
    successors: Vec<Vec<EventId>>,
    /// Predecessor lists indexed by position.
    predecessors: Vec<Vec<EventId>>,
    /// Activity keys in input order, for deterministic iteration.
    activities: Vec<ActivityKey>,
    states: FxHashMap<ActivityKey, ActivityState>,
    indirect_cost: f64,
}

impl ActivityNetwork {
    /// Build a network from an ordered activity list and an indirect cost
    /// rate (cost per unit of project duration).
    ///
    /// The only structural check performed is the one the redesign calls
    /// for: every activity must run from an earlier-introduced event to a
    /// later-introduced one (which also rules out cycles and self-loops),
    /// and no `(from, to)` pair may repeat. Everything else is the upstream
    /// validator's contract.
    pub fn build(
        indirect_cost: f64,
        activities: Vec<(EventId, EventId, ActivityState)>,
    ) -> Result<Self, NetworkError> {
        if activities.is_empty() {
            return Err(NetworkError::EmptyProject);
        }

        let mut events: Vec<EventId> = Vec::new();
        let mut positions: FxHashMap<EventId, usize> = FxHashMap::default();
        let mut keys: Vec<ActivityKey> = Vec::with_capacity(activities.len());
        let mut states: FxHashMap<ActivityKey, ActivityState> =
            FxHashMap::with_capacity_and_hasher(activities.len(), Default::default());

        fn intern(
            ev: EventId,
            events: &mut Vec<EventId>,
            positions: &mut FxHashMap<EventId, usize>,
        ) -> usize {
            if let Some(&pos) = positions.get(&ev) {
                return pos;
            }
            let pos = events.len();
            events.push(ev);
            positions.insert(ev, pos);
            pos
        }

        for (from, to, state) in activities {
            let from_pos = intern(from, &mut events, &mut positions);
            let to_pos = intern(to, &mut events, &mut positions);
            if to_pos <= from_pos {
                return Err(NetworkError::NotTopological(from, to));
            }
            if states.insert((from, to), state).is_some() {
                return Err(NetworkError::DuplicateActivity(from, to));
            }
            keys.push((from, to));
        }

        let n = events.len();
        let mut successors: Vec<Vec<EventId>> = vec![Vec::new(); n];
        let mut predecessors: Vec<Vec<EventId>> = vec![Vec::new(); n];
        for &(from, to) in &keys {
            successors[positions[&from]].push(to);
            predecessors[positions[&to]].push(from);
        }

        Ok(Self {
            events,
            positions,
            times: vec![EventTimes::default(); n],
            successors,
            predecessors,
            activities: keys,
            states,
            indirect_cost,
        })
    }

    /// Events in topological order.
    pub fn events(&self) -> &[EventId] {
        &self.events
    }

    /// The source event (first introduced by the activity list).
    pub fn source(&self) -> EventId {
        self.events[0]
    }

    /// The sink event (last introduced by the activity list).
    pub fn sink(&self) -> EventId {
        self.events[self.events.len() - 1]
    }

    /// Activity keys in input order.
    pub fn activities(&self) -> &[ActivityKey] {
        &self.activities
    }

    /// Iterate activities with their state, in input order.
    pub fn iter_activities(&self) -> impl Iterator<Item = (ActivityKey, &ActivityState)> {
        self.activities
            .iter()
            .filter_map(move |key| self.states.get(key).map(|state| (*key, state)))
    }

    pub fn state(&self, key: ActivityKey) -> Option<&ActivityState> {
        self.states.get(&key)
    }

    pub fn state_mut(&mut self, key: ActivityKey) -> Option<&mut ActivityState> {
        self.states.get_mut(&key)
    }

    pub fn predecessors(&self, event: EventId) -> &[EventId] {
        self.positions
            .get(&event)
            .map_or(NO_NEIGHBORS, |&pos| &self.predecessors[pos])
    }

    pub fn successors(&self, event: EventId) -> &[EventId] {
        self.positions
            .get(&event)
            .map_or(NO_NEIGHBORS, |&pos| &self.successors[pos])
    }

    /// Event times from the most recent solve (zero before any solve).
    pub fn times(&self, event: EventId) -> EventTimes {
        self.positions
            .get(&event)
            .map_or(EventTimes::default(), |&pos| self.times[pos])
    }

    pub(crate) fn set_earliest(&mut self, event: EventId, value: i64) {
        if let Some(&pos) = self.positions.get(&event) {
            self.times[pos].earliest = value;
        }
    }

    pub(crate) fn set_latest(&mut self, event: EventId, value: i64) {
        if let Some(&pos) = self.positions.get(&event) {
            self.times[pos].latest = value;
        }
    }

    /// Indirect cost rate per unit of project duration.
    pub fn indirect_cost(&self) -> f64 {
        self.indirect_cost
    }
}
