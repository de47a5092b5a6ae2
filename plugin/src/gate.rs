//!
//! Availability gate: a cheap synchronous check deciding whether
//! the bootstrap pipeline can be skipped.
//!

use crate::environment::Environment;
use crate::state::{Readiness, State};

pub struct Gate<'a> {
    readiness: &'a Readiness,
    environment: &'a dyn Environment,
    symbol: &'a str,
}

impl<'a> Gate<'a> {
    pub fn new(readiness: &'a Readiness, environment: &'a dyn Environment, symbol: &'a str) -> Self {
        Gate {
            readiness,
            environment,
            symbol,
        }
    }

    /// The widget is usable if a bootstrap run completed, or if its global
    /// symbol was defined by the host page before any run was started.
    /// The main script defines the symbol on its own, so once a run has
    /// started only [`State::Ready`] counts.
    pub fn is_available(&self) -> bool {
        match self.readiness.get() {
            State::Ready => true,
            State::Uninitialized => self.environment.is_defined(self.symbol),
            State::Loading | State::Failed(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imports::*;

    struct Symbols(Vec<&'static str>);

    impl Environment for Symbols {
        fn is_defined(&self, symbol: &str) -> bool {
            self.0.iter().any(|s| *s == symbol)
        }
    }

    #[test]
    fn gate_checks_state_and_environment() {
        let readiness = Readiness::new();
        let empty = Symbols(vec![]);
        let loaded = Symbols(vec!["ChemDoodle"]);

        assert!(!Gate::new(&readiness, &empty, "ChemDoodle").is_available());
        assert!(Gate::new(&readiness, &loaded, "ChemDoodle").is_available());

        readiness.begin();
        readiness.finish(&Ok(()));
        assert!(Gate::new(&readiness, &empty, "ChemDoodle").is_available());
    }

    #[test]
    fn gate_ignores_global_once_a_run_started() {
        let readiness = Readiness::new();
        let loaded = Symbols(vec!["ChemDoodle"]);

        readiness.begin();
        assert!(!Gate::new(&readiness, &loaded, "ChemDoodle").is_available());

        readiness.finish(&Err(Error::custom("stylesheet missing")));
        assert!(!Gate::new(&readiness, &loaded, "ChemDoodle").is_available());

        readiness.begin();
        readiness.finish(&Ok(()));
        assert!(Gate::new(&readiness, &loaded, "ChemDoodle").is_available());
    }
}
