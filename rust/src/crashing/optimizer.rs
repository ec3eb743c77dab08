//! The crashing loop: repeatedly shorten the cheapest reducible critical
//! activity until the fully-crashed floor duration is reached.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::config::CrashingConfig;
use crate::{log_changes, log_checks, log_debug};

use super::cost::calculate_cost_slopes;
use super::graph::{ActivityKey, ActivityNetwork};
use super::paths::{find_all_simple_paths, Path};
use super::snapshot::{NetworkSnapshot, SnapshotHistory};
use super::solver::{solve, DurationField};

/// Errors that can occur during the crashing loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrashingError {
    /// The project duration still exceeds the crash floor but no critical
    /// activity can be reduced. The upstream input contract was violated;
    /// failing beats spinning forever.
    #[error(
        "no reducible critical activity while project duration {duration} exceeds the crash floor {floor}"
    )]
    FloorUnreachable { duration: i64, floor: i64 },
}

/// Completed run state handed to the result aggregator.
#[derive(Debug)]
pub struct CrashingRun {
    pub history: SnapshotHistory,
    pub paths: Vec<Path>,
    pub floor_duration: i64,
}

/// Drives the network through `Init -> (Solved -> Snapshotted -> Reduced)*`
/// until the floor duration is reached.
///
/// The optimizer exclusively owns its network; each iteration's state
/// survives only through the snapshot taken before that iteration's
/// reduction.
pub struct CrashingOptimizer {
    network: ActivityNetwork,
    paths: Vec<Path>,
    history: SnapshotHistory,
    verbosity: u8,
}

impl CrashingOptimizer {
    /// Create an optimizer for a freshly built network. Path enumeration
    /// happens here, once: the topology never changes afterwards.
    pub fn new(network: ActivityNetwork, config: &CrashingConfig) -> Self {
        let paths = find_all_simple_paths(&network);
        Self {
            network,
            paths,
            history: SnapshotHistory::default(),
            verbosity: config.verbosity,
        }
    }

    /// Run the loop to completion.
    ///
    /// One boundary detail is deliberate and matches the long-standing
    /// behavior of this algorithm: the snapshot is captured before the
    /// reduction, and the reduction still runs on the iteration whose
    /// pre-reduction duration already reached the floor. The final
    /// snapshot's duration equals the floor duration.
    pub fn run(mut self) -> Result<CrashingRun, CrashingError> {
        calculate_cost_slopes(&mut self.network);

        solve(&mut self.network, DurationField::Crash);
        let floor_duration = self.network.times(self.network.sink()).latest;
        log_changes!(self.verbosity, "crash floor duration: {}", floor_duration);

        loop {
            solve(&mut self.network, DurationField::Normal);
            let current_duration = self.network.times(self.network.sink()).latest;
            log_changes!(
                self.verbosity,
                "iteration {}: project duration {}",
                self.history.len(),
                current_duration
            );
            for &event in self.network.events() {
                let times = self.network.times(event);
                log_debug!(
                    self.verbosity,
                    "  event {}: eet={} let={}",
                    event,
                    times.earliest,
                    times.latest
                );
            }

            self.history.push(NetworkSnapshot::capture(&self.network));

            self.reduce(current_duration, floor_duration)?;

            if current_duration <= floor_duration {
                break;
            }
        }

        Ok(CrashingRun {
            history: self.history,
            paths: self.paths,
            floor_duration,
        })
    }

    /// One reduction step: pick the reducible critical activity with the
    /// globally lowest cost slope (ties broken by the lexicographically
    /// smallest `(from, to)` pair) and shorten it by one time unit, paying
    /// its cost slope.
    fn reduce(&mut self, current_duration: i64, floor_duration: i64) -> Result<(), CrashingError> {
        match self.cheapest_reducible_activity() {
            Some((key, slope)) => {
                log_changes!(
                    self.verbosity,
                    "crashing activity {:?} by one unit at slope {}",
                    key,
                    slope
                );
                if let Some(state) = self.network.state_mut(key) {
                    state.normal_duration -= 1;
                    state.normal_cost += slope;
                }
                Ok(())
            }
            None if current_duration > floor_duration => Err(CrashingError::FloorUnreachable {
                duration: current_duration,
                floor: floor_duration,
            }),
            // Nothing left to crash once the floor is reached: the normal
            // terminal state.
            None => Ok(()),
        }
    }

    /// The reducible critical activity with the minimal `(cost_slope,
    /// (from, to))`, or `None` when every critical-path activity is already
    /// fully crashed or non-crashable.
    fn cheapest_reducible_activity(&self) -> Option<(ActivityKey, f64)> {
        let critical: FxHashSet<ActivityKey> = self
            .network
            .iter_activities()
            .filter(|(_, state)| state.total_float == 0)
            .map(|(key, _)| key)
            .collect();

        let mut candidates: FxHashSet<ActivityKey> = FxHashSet::default();
        for path in &self.paths {
            if !path.iter().all(|key| critical.contains(key)) {
                continue;
            }
            for &key in path {
                candidates.insert(key);
            }
        }

        let mut best: Option<(ActivityKey, f64)> = None;
        for (key, state) in self.network.iter_activities() {
            if !candidates.contains(&key) || state.is_fully_crashed() {
                continue;
            }
            // Reducible activities always have a slope: non-crashable means
            // a zero duration span, which is_fully_crashed already covers.
            let Some(slope) = state.cost_slope else {
                continue;
            };
            log_checks!(
                self.verbosity,
                "  candidate {:?}: slope {} float {}",
                key,
                slope,
                state.total_float
            );
            let better = match best {
                None => true,
                Some((best_key, best_slope)) => slope
                    .total_cmp(&best_slope)
                    .then_with(|| key.cmp(&best_key))
                    .is_lt(),
            };
            if better {
                best = Some((key, slope));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crashing::graph::ActivityState;
    use crate::crashing::results::{aggregate, select_optimum};

    fn config() -> CrashingConfig {
        CrashingConfig::default()
    }

    fn two_activity_network() -> ActivityNetwork {
        ActivityNetwork::build(
            20.0,
            vec![
                (1, 2, ActivityState::new(4, 100.0, 2, 200.0)),
                (2, 3, ActivityState::new(3, 50.0, 3, 50.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let optimizer = CrashingOptimizer::new(two_activity_network(), &config());
        let run = optimizer.run().unwrap();

        assert_eq!(run.floor_duration, 5);
        assert_eq!(run.history.len(), 3);

        let records = aggregate(&run.history, &run.paths);
        let durations: Vec<i64> = records.iter().map(|r| r.project_duration).collect();
        assert_eq!(durations, vec![7, 6, 5]);

        assert!((records[0].direct_cost - 150.0).abs() < 1e-9);
        assert!((records[0].indirect_cost - 140.0).abs() < 1e-9);
        assert!((records[0].total_cost - 290.0).abs() < 1e-9);

        assert!((records[1].direct_cost - 200.0).abs() < 1e-9);
        assert!((records[1].indirect_cost - 120.0).abs() < 1e-9);
        assert!((records[1].total_cost - 320.0).abs() < 1e-9);

        assert!((records[2].direct_cost - 250.0).abs() < 1e-9);
        assert!((records[2].indirect_cost - 100.0).abs() < 1e-9);
        assert!((records[2].total_cost - 350.0).abs() < 1e-9);

        let optimum = select_optimum(&records).unwrap();
        assert!((optimum.total_cost - 290.0).abs() < 1e-9);
        assert_eq!(optimum.project_duration, 7);
    }

    #[test]
    fn test_last_snapshot_reaches_floor() {
        let optimizer = CrashingOptimizer::new(two_activity_network(), &config());
        let run = optimizer.run().unwrap();

        let last = run.history.as_slice().last().unwrap();
        assert_eq!(last.project_duration(), run.floor_duration);
    }

    #[test]
    fn test_tradeoff_curve_shape() {
        // Diamond where both routes are crashable.
        let network = ActivityNetwork::build(
            15.0,
            vec![
                (1, 2, ActivityState::new(6, 120.0, 3, 240.0)),
                (1, 3, ActivityState::new(4, 80.0, 2, 140.0)),
                (2, 4, ActivityState::new(5, 100.0, 3, 180.0)),
                (3, 4, ActivityState::new(4, 60.0, 3, 90.0)),
            ],
        )
        .unwrap();
        let run = CrashingOptimizer::new(network, &config()).run().unwrap();
        let records = aggregate(&run.history, &run.paths);

        for pair in records.windows(2) {
            assert!(pair[1].project_duration <= pair[0].project_duration);
            // Crashing always buys duration with money: the direct cost
            // never drops, and here every slope exceeds the indirect rate,
            // so the total cost rises as the duration falls.
            assert!(pair[1].direct_cost >= pair[0].direct_cost);
            assert!(pair[1].total_cost >= pair[0].total_cost);
        }
        for record in &records {
            assert!(
                !record.critical_paths.is_empty(),
                "every solved iteration has a critical path"
            );
        }
        assert_eq!(
            records.last().unwrap().project_duration,
            run.floor_duration
        );
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // Two parallel critical routes with identical slopes everywhere;
        // the first reduction must always pick (1, 2).
        let build = || {
            ActivityNetwork::build(
                5.0,
                vec![
                    (1, 2, ActivityState::new(5, 50.0, 3, 70.0)),
                    (1, 3, ActivityState::new(5, 50.0, 3, 70.0)),
                    (2, 4, ActivityState::new(5, 50.0, 3, 70.0)),
                    (3, 4, ActivityState::new(5, 50.0, 3, 70.0)),
                ],
            )
            .unwrap()
        };

        for _ in 0..5 {
            let mut optimizer = CrashingOptimizer::new(build(), &config());
            calculate_cost_slopes(&mut optimizer.network);
            solve(&mut optimizer.network, DurationField::Normal);

            let (key, slope) = optimizer.cheapest_reducible_activity().unwrap();
            assert_eq!(key, (1, 2));
            assert!((slope - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unreachable_floor_is_fatal() {
        // Event 3 is a second source, so no enumerated 1->4 path covers the
        // critical (3, 4) activity: the floor cannot be reached by crashing
        // along detected critical paths.
        let network = ActivityNetwork::build(
            0.0,
            vec![
                (1, 2, ActivityState::new(2, 10.0, 1, 20.0)),
                (3, 4, ActivityState::new(9, 10.0, 5, 50.0)),
                (2, 4, ActivityState::new(2, 10.0, 1, 20.0)),
            ],
        )
        .unwrap();

        let err = CrashingOptimizer::new(network, &config()).run().unwrap_err();
        assert_eq!(
            err,
            CrashingError::FloorUnreachable {
                duration: 9,
                floor: 5
            }
        );
    }

    #[test]
    fn test_single_non_crashable_activity_terminates_immediately() {
        let network = ActivityNetwork::build(
            10.0,
            vec![(1, 2, ActivityState::new(4, 100.0, 4, 100.0))],
        )
        .unwrap();
        let run = CrashingOptimizer::new(network, &config()).run().unwrap();

        assert_eq!(run.history.len(), 1);
        assert_eq!(run.history.as_slice()[0].project_duration(), 4);
        assert_eq!(run.floor_duration, 4);
    }
}
