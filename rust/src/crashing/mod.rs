//! Time-cost tradeoff ("crashing") engine for activity-on-arrow networks.
//!
//! The network is built once from a validated project description, solved
//! repeatedly while the optimizer crashes one time unit per iteration, and
//! reported on through the snapshot history.

mod cost;
mod graph;
mod optimizer;
mod paths;
mod results;
mod snapshot;
mod solver;

pub use cost::calculate_cost_slopes;
pub use graph::{ActivityKey, ActivityNetwork, ActivityState, EventId, EventTimes, NetworkError};
pub use optimizer::{CrashingError, CrashingOptimizer, CrashingRun};
pub use paths::{find_all_simple_paths, Path};
pub use results::{aggregate, critical_paths, select_optimum, IterationRecord, OptimumSolution};
pub use snapshot::{NetworkSnapshot, SnapshotHistory};
pub use solver::{solve, DurationField};
