//! Value-semantic network snapshots and the per-iteration history.
//!
//! Each snapshot is a deep copy taken immediately after a solve, before the
//! next reduction mutates the live network, so stored state never aliases
//! the network it was captured from.

use rustc_hash::FxHashSet;

use super::graph::{ActivityKey, ActivityNetwork, ActivityState, EventId, EventTimes};

/// Deep copy of the network's node and edge attribute state at one point in
/// the crashing loop.
#[derive(Clone, Debug)]
pub struct NetworkSnapshot {
    /// Event times in topological order (the sink is last).
    pub events: Vec<(EventId, EventTimes)>,
    /// Activity states in input order.
    pub activities: Vec<(ActivityKey, ActivityState)>,
    /// Indirect cost rate at capture time.
    pub indirect_cost_rate: f64,
}

impl NetworkSnapshot {
    pub fn capture(network: &ActivityNetwork) -> Self {
        Self {
            events: network
                .events()
                .iter()
                .map(|&event| (event, network.times(event)))
                .collect(),
            activities: network
                .iter_activities()
                .map(|(key, state)| (key, state.clone()))
                .collect(),
            indirect_cost_rate: network.indirect_cost(),
        }
    }

    /// Project duration: the latest event time of the sink.
    pub fn project_duration(&self) -> i64 {
        self.events.last().map_or(0, |&(_, times)| times.latest)
    }

    /// Sum of `normal_cost` over all activities.
    pub fn direct_cost(&self) -> f64 {
        self.activities
            .iter()
            .map(|(_, state)| state.normal_cost)
            .sum()
    }

    /// Project duration times the indirect cost rate.
    pub fn indirect_cost(&self) -> f64 {
        self.project_duration() as f64 * self.indirect_cost_rate
    }

    pub fn total_cost(&self) -> f64 {
        self.direct_cost() + self.indirect_cost()
    }

    /// Activities with zero total float in this snapshot.
    pub fn critical_activities(&self) -> FxHashSet<ActivityKey> {
        self.activities
            .iter()
            .filter(|(_, state)| state.total_float == 0)
            .map(|&(key, _)| key)
            .collect()
    }
}

/// Append-only sequence of snapshots, one per optimizer iteration.
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    snapshots: Vec<NetworkSnapshot>,
}

impl SnapshotHistory {
    pub fn push(&mut self, snapshot: NetworkSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkSnapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn as_slice(&self) -> &[NetworkSnapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crashing::cost::calculate_cost_slopes;
    use crate::crashing::solver::{solve, DurationField};

    fn solved_network() -> ActivityNetwork {
        let mut network = ActivityNetwork::build(
            20.0,
            vec![
                (1, 2, ActivityState::new(4, 100.0, 2, 200.0)),
                (2, 3, ActivityState::new(3, 50.0, 3, 50.0)),
            ],
        )
        .unwrap();
        calculate_cost_slopes(&mut network);
        solve(&mut network, DurationField::Normal);
        network
    }

    #[test]
    fn test_snapshot_costs() {
        let network = solved_network();
        let snapshot = NetworkSnapshot::capture(&network);

        assert_eq!(snapshot.project_duration(), 7);
        assert!((snapshot.direct_cost() - 150.0).abs() < 1e-9);
        assert!((snapshot.indirect_cost() - 140.0).abs() < 1e-9);
        assert!((snapshot.total_cost() - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_critical_activities() {
        let network = solved_network();
        let snapshot = NetworkSnapshot::capture(&network);

        let critical = snapshot.critical_activities();
        assert!(critical.contains(&(1, 2)));
        assert!(critical.contains(&(2, 3)));
    }

    #[test]
    fn test_snapshot_is_independent_of_later_mutation() {
        let mut network = solved_network();
        let snapshot = NetworkSnapshot::capture(&network);

        let state = network.state_mut((1, 2)).unwrap();
        state.normal_duration = 1;
        state.normal_cost = 999.0;
        solve(&mut network, DurationField::Normal);

        assert_eq!(snapshot.project_duration(), 7);
        assert!((snapshot.direct_cost() - 150.0).abs() < 1e-9);
        let (_, captured) = &snapshot.activities[0];
        assert_eq!(captured.normal_duration, 4);
    }

    #[test]
    fn test_history_preserves_order() {
        let network = solved_network();
        let mut history = SnapshotHistory::default();
        assert!(history.is_empty());

        history.push(NetworkSnapshot::capture(&network));
        history.push(NetworkSnapshot::capture(&network));

        assert_eq!(history.len(), 2);
        assert_eq!(history.as_slice()[0].project_duration(), 7);
    }
}
