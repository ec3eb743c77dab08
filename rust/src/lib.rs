//! Rust implementation of the CPM time-cost tradeoff ("crashing") engine.
//!
//! This module provides the network-solving and iterative-optimization core;
//! input validation, front ends, and report/plot rendering stay on the
//! Python side.

use pyo3::prelude::*;

mod config;
pub mod crashing;
pub mod logging;
mod models;

pub use config::CrashingConfig;
pub use crashing::{
    aggregate, calculate_cost_slopes, critical_paths, find_all_simple_paths, select_optimum,
    solve, ActivityKey, ActivityNetwork, ActivityState, CrashingError, CrashingOptimizer,
    CrashingRun, DurationField, EventId, EventTimes, IterationRecord, NetworkError,
    NetworkSnapshot, OptimumSolution, Path, SnapshotHistory,
};
pub use models::{Activity, CrashingOutcome, IterationResult, SnapshotView};

fn to_iteration_result(record: &IterationRecord) -> IterationResult {
    IterationResult {
        project_duration: record.project_duration,
        critical_paths: record.critical_paths.clone(),
        direct_cost: record.direct_cost,
        indirect_cost: record.indirect_cost,
        total_cost: record.total_cost,
    }
}

fn to_snapshot_view(snapshot: &NetworkSnapshot) -> SnapshotView {
    SnapshotView {
        event_times: snapshot
            .events
            .iter()
            .map(|&(event, times)| (event, times.earliest, times.latest))
            .collect(),
        activity_durations: snapshot
            .activities
            .iter()
            .map(|((from, to), state)| (*from, *to, state.normal_duration))
            .collect(),
    }
}

/// Run the crashing variant of the Critical Path Method on a validated
/// project description.
///
/// For each feasible project duration between the normal and the fully
/// crashed schedule, this yields the cheapest achievable direct, indirect,
/// and total cost, plus the optimum point of the resulting tradeoff curve.
///
/// # Arguments
/// * `indirect_cost` - Indirect cost rate per unit of project duration
/// * `activities` - Ordered, validated activity list (see the JSON schema
///   on the Python side)
/// * `config` - Optional run configuration (verbosity)
///
/// # Returns
/// * CrashingOutcome with per-iteration rows, raw snapshots for rendering,
///   and the optimum (total_cost, project_duration) pair
///
/// # Raises
/// * ValueError if the activity list violates the input contract (empty,
///   duplicated pair, not topologically ordered, or unreachable crash floor)
#[pyfunction]
#[pyo3(signature = (indirect_cost, activities, config=None))]
fn run_crashing(
    indirect_cost: f64,
    activities: Vec<Activity>,
    config: Option<CrashingConfig>,
) -> PyResult<CrashingOutcome> {
    let config = config.unwrap_or_default();

    let triples: Vec<(EventId, EventId, ActivityState)> = activities
        .iter()
        .map(|a| {
            (
                a.from_event,
                a.to_event,
                ActivityState::new(a.normal_duration, a.normal_cost, a.crash_duration, a.crash_cost),
            )
        })
        .collect();

    let network = ActivityNetwork::build(indirect_cost, triples)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    let run = CrashingOptimizer::new(network, &config)
        .run()
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    let records = aggregate(&run.history, &run.paths);
    let optimum = select_optimum(&records).ok_or_else(|| {
        pyo3::exceptions::PyValueError::new_err("the run produced no iterations")
    })?;

    Ok(CrashingOutcome {
        iterations: records.iter().map(to_iteration_result).collect(),
        snapshots: run.history.iter().map(to_snapshot_view).collect(),
        optimum_total_cost: optimum.total_cost,
        optimum_duration: optimum.project_duration,
        floor_duration: run.floor_duration,
    })
}

/// The cpm.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Boundary data types
    m.add_class::<Activity>()?;
    m.add_class::<IterationResult>()?;
    m.add_class::<SnapshotView>()?;
    m.add_class::<CrashingOutcome>()?;

    // Config types
    m.add_class::<CrashingConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(run_crashing, m)?)?;

    Ok(())
}
