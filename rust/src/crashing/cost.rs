//! Cost slope derivation.

use super::graph::ActivityNetwork;

/// Compute the cost slope of every activity, once, before the crashing loop.
///
/// `slope = (crash_cost - normal_cost) / (normal_duration - crash_duration)`.
/// A zero duration span marks the activity non-crashable (`None`) rather
/// than raising an error; dummy dependency edges land here.
pub fn calculate_cost_slopes(network: &mut ActivityNetwork) {
    for key in network.activities().to_vec() {
        if let Some(state) = network.state_mut(key) {
            let span = state.normal_duration - state.crash_duration;
            state.cost_slope = if span == 0 {
                None
            } else {
                Some((state.crash_cost - state.normal_cost) / span as f64)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crashing::graph::ActivityState;

    #[test]
    fn test_slope_and_non_crashable() {
        let mut network = ActivityNetwork::build(
            0.0,
            vec![
                (1, 2, ActivityState::new(4, 100.0, 2, 200.0)),
                (2, 3, ActivityState::new(3, 50.0, 3, 50.0)),
            ],
        )
        .unwrap();

        calculate_cost_slopes(&mut network);

        assert_eq!(network.state((1, 2)).unwrap().cost_slope, Some(50.0));
        assert_eq!(network.state((2, 3)).unwrap().cost_slope, None);
    }

    #[test]
    fn test_fractional_slope() {
        let mut network = ActivityNetwork::build(
            0.0,
            vec![(1, 2, ActivityState::new(5, 100.0, 2, 250.0))],
        )
        .unwrap();

        calculate_cost_slopes(&mut network);

        let slope = network.state((1, 2)).unwrap().cost_slope.unwrap();
        assert!((slope - 50.0).abs() < 1e-9);
    }
}
