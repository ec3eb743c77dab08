//! Forward/backward time-propagation passes and total-float computation.

use super::graph::{ActivityNetwork, ActivityState, EventId};

/// Which duration attribute drives a solve.
///
/// `Normal` solves the current schedule; `Crash` is used once to establish
/// the fully-crashed floor duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationField {
    Normal,
    Crash,
}

impl DurationField {
    pub fn of(self, state: &ActivityState) -> i64 {
        match self {
            DurationField::Normal => state.normal_duration,
            DurationField::Crash => state.crash_duration,
        }
    }
}

/// Solve the network: earliest event times, latest event times, and the
/// total float of every activity.
pub fn solve(network: &mut ActivityNetwork, field: DurationField) {
    compute_earliest_times(network, field);
    compute_latest_times(network, field);
    compute_total_floats(network, field);
}

/// Forward pass in topological order. An event with no predecessors gets
/// `eet = 0`; otherwise `eet(n) = max over predecessors p of
/// (eet(p) + duration(p, n))`.
fn compute_earliest_times(network: &mut ActivityNetwork, field: DurationField) {
    let order: Vec<EventId> = network.events().to_vec();
    for event in order {
        let mut earliest = 0;
        for &pred in network.predecessors(event) {
            if let Some(state) = network.state((pred, event)) {
                earliest = earliest.max(network.times(pred).earliest + field.of(state));
            }
        }
        network.set_earliest(event, earliest);
    }
}

/// Backward pass in reverse topological order. An event with no successors
/// gets `let = eet(sink)`; otherwise `let(n) = min over successors s of
/// (let(s) - duration(n, s))`.
fn compute_latest_times(network: &mut ActivityNetwork, field: DurationField) {
    let order: Vec<EventId> = network.events().to_vec();
    let sink_earliest = network.times(network.sink()).earliest;
    for event in order.into_iter().rev() {
        let successors = network.successors(event);
        if successors.is_empty() {
            network.set_latest(event, sink_earliest);
            continue;
        }
        let mut latest = i64::MAX;
        for &succ in network.successors(event) {
            if let Some(state) = network.state((event, succ)) {
                latest = latest.min(network.times(succ).latest - field.of(state));
            }
        }
        network.set_latest(event, latest);
    }
}

/// Total float per activity `(a, b)`: `let(b) - eet(a) - duration(a, b)`.
fn compute_total_floats(network: &mut ActivityNetwork, field: DurationField) {
    for key in network.activities().to_vec() {
        let (from, to) = key;
        let slack = network.times(to).latest - network.times(from).earliest;
        if let Some(state) = network.state_mut(key) {
            state.total_float = slack - field.of(state);
        }
    }
}
