//! Boundary data types for the crashing engine.
//!
//! These cross the Python boundary: the validated project description comes
//! in as `Activity` values, and the run's result rows, raw snapshots, and
//! optimum go back out for reporting and rendering.

use pyo3::prelude::*;

/// One project activity as supplied by the upstream validator.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Activity {
    #[pyo3(get, set)]
    pub from_event: u32,
    #[pyo3(get, set)]
    pub to_event: u32,
    #[pyo3(get, set)]
    pub normal_duration: i64,
    #[pyo3(get, set)]
    pub normal_cost: f64,
    #[pyo3(get, set)]
    pub crash_duration: i64,
    #[pyo3(get, set)]
    pub crash_cost: f64,
}

#[pymethods]
impl Activity {
    #[new]
    fn new(
        from_event: u32,
        to_event: u32,
        normal_duration: i64,
        normal_cost: f64,
        crash_duration: i64,
        crash_cost: f64,
    ) -> Self {
        Self {
            from_event,
            to_event,
            normal_duration,
            normal_cost,
            crash_duration,
            crash_cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(({}, {}), normal={}@{}, crash={}@{})",
            self.from_event,
            self.to_event,
            self.normal_duration,
            self.normal_cost,
            self.crash_duration,
            self.crash_cost
        )
    }
}

/// Duration/cost metrics for one crashing iteration (one report-table row).
#[pyclass]
#[derive(Clone, Debug)]
pub struct IterationResult {
    #[pyo3(get, set)]
    pub project_duration: i64,
    /// Critical paths as ordered lists of `(from_event, to_event)` pairs.
    #[pyo3(get, set)]
    pub critical_paths: Vec<Vec<(u32, u32)>>,
    #[pyo3(get, set)]
    pub direct_cost: f64,
    #[pyo3(get, set)]
    pub indirect_cost: f64,
    #[pyo3(get, set)]
    pub total_cost: f64,
}

#[pymethods]
impl IterationResult {
    #[new]
    fn new(
        project_duration: i64,
        critical_paths: Vec<Vec<(u32, u32)>>,
        direct_cost: f64,
        indirect_cost: f64,
        total_cost: f64,
    ) -> Self {
        Self {
            project_duration,
            critical_paths,
            direct_cost,
            indirect_cost,
            total_cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "IterationResult(duration={}, direct={}, indirect={}, total={})",
            self.project_duration, self.direct_cost, self.indirect_cost, self.total_cost
        )
    }
}

/// Raw network state of one iteration, for external layout/rendering.
///
/// Carries exactly what the drawing side labels with: `(eet, let)` per
/// event and the current normal duration per activity.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SnapshotView {
    /// `(event, eet, let)` triples in topological order.
    #[pyo3(get, set)]
    pub event_times: Vec<(u32, i64, i64)>,
    /// `(from_event, to_event, normal_duration)` triples in input order.
    #[pyo3(get, set)]
    pub activity_durations: Vec<(u32, u32, i64)>,
}

#[pymethods]
impl SnapshotView {
    #[new]
    fn new(event_times: Vec<(u32, i64, i64)>, activity_durations: Vec<(u32, u32, i64)>) -> Self {
        Self {
            event_times,
            activity_durations,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SnapshotView(events={}, activities={})",
            self.event_times.len(),
            self.activity_durations.len()
        )
    }
}

/// Everything a crashing run produces: the tradeoff curve rows, the raw
/// snapshots, and the selected optimum.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CrashingOutcome {
    #[pyo3(get, set)]
    pub iterations: Vec<IterationResult>,
    #[pyo3(get, set)]
    pub snapshots: Vec<SnapshotView>,
    #[pyo3(get, set)]
    pub optimum_total_cost: f64,
    #[pyo3(get, set)]
    pub optimum_duration: i64,
    /// Minimum achievable project duration with every activity fully crashed.
    #[pyo3(get, set)]
    pub floor_duration: i64,
}

#[pymethods]
impl CrashingOutcome {
    #[new]
    fn new(
        iterations: Vec<IterationResult>,
        snapshots: Vec<SnapshotView>,
        optimum_total_cost: f64,
        optimum_duration: i64,
        floor_duration: i64,
    ) -> Self {
        Self {
            iterations,
            snapshots,
            optimum_total_cost,
            optimum_duration,
            floor_duration,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CrashingOutcome(iterations={}, optimum=({}, {}))",
            self.iterations.len(),
            self.optimum_total_cost,
            self.optimum_duration
        )
    }
}
