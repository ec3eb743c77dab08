//! Configuration types for the crashing engine.

use pyo3::prelude::*;

/// Configuration for a crashing run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CrashingConfig {
    /// Verbosity level: 0=silent, 1=iterations, 2=candidate checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CrashingConfig {
    fn default() -> Self {
        Self { verbosity: 0 }
    }
}

#[pymethods]
impl CrashingConfig {
    #[new]
    #[pyo3(signature = (verbosity=None))]
    fn new(verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!("CrashingConfig(verbosity={})", self.verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_silent() {
        assert_eq!(CrashingConfig::default().verbosity, 0);
    }
}
