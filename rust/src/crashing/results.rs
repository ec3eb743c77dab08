//! Result rows derived from the snapshot history, and optimum selection.

use super::paths::Path;
use super::snapshot::{NetworkSnapshot, SnapshotHistory};

/// Duration/cost metrics for one optimizer iteration.
#[derive(Clone, Debug)]
pub struct IterationRecord {
    pub project_duration: i64,
    /// Enumerated paths that are fully critical in this iteration.
    pub critical_paths: Vec<Path>,
    pub direct_cost: f64,
    pub indirect_cost: f64,
    pub total_cost: f64,
}

/// The selected optimum: the cheapest total cost and its project duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptimumSolution {
    pub total_cost: f64,
    pub project_duration: i64,
}

/// Paths whose full activity set is critical in the given snapshot.
pub fn critical_paths(snapshot: &NetworkSnapshot, paths: &[Path]) -> Vec<Path> {
    let critical = snapshot.critical_activities();
    paths
        .iter()
        .filter(|path| path.iter().all(|key| critical.contains(key)))
        .cloned()
        .collect()
}

/// Reduce each snapshot to a result record, in iteration order.
pub fn aggregate(history: &SnapshotHistory, paths: &[Path]) -> Vec<IterationRecord> {
    history
        .iter()
        .map(|snapshot| IterationRecord {
            project_duration: snapshot.project_duration(),
            critical_paths: critical_paths(snapshot, paths),
            direct_cost: snapshot.direct_cost(),
            indirect_cost: snapshot.indirect_cost(),
            total_cost: snapshot.total_cost(),
        })
        .collect()
}

/// Select the record minimizing `(total_cost, project_duration)`
/// lexicographically; a cost tie goes to the shorter duration.
pub fn select_optimum(records: &[IterationRecord]) -> Option<OptimumSolution> {
    records
        .iter()
        .min_by(|a, b| {
            a.total_cost
                .total_cmp(&b.total_cost)
                .then_with(|| a.project_duration.cmp(&b.project_duration))
        })
        .map(|record| OptimumSolution {
            total_cost: record.total_cost,
            project_duration: record.project_duration,
        })
}
