//!
//! Process-wide readiness state of the drawing widget.
//!

use crate::imports::*;
use std::fmt;

#[derive(Debug, Clone, Default)]
pub enum State {
    /// Nothing has been attempted yet
    #[default]
    Uninitialized,
    /// A bootstrap run is in flight
    Loading,
    /// The widget is loaded; this state is never left
    Ready,
    /// The last bootstrap run failed; a later invocation may retry
    Failed(Error),
}

impl State {
    pub fn is_ready(&self) -> bool {
        matches!(self, State::Ready)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Uninitialized => write!(f, "uninitialized"),
            State::Loading => write!(f, "loading"),
            State::Ready => write!(f, "ready"),
            State::Failed(err) => write!(f, "failed ({err})"),
        }
    }
}

/// Holder of the widget [`State`]
#[derive(Debug, Default)]
pub struct Readiness {
    state: Mutex<State>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> State {
        self.state.lock().unwrap().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.lock().unwrap().is_ready()
    }

    /// Enter [`State::Loading`]. Returns `false` (and leaves the state
    /// untouched) if the widget is already ready.
    pub fn begin(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.is_ready() {
            false
        } else {
            *state = State::Loading;
            true
        }
    }

    /// Record the outcome of a bootstrap run
    pub fn finish(&self, result: &Result<()>) {
        let mut state = self.state.lock().unwrap();
        if state.is_ready() {
            return;
        }
        *state = match result {
            Ok(()) => State::Ready,
            Err(err) => State::Failed(err.clone()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions() {
        let readiness = Readiness::new();
        assert!(matches!(readiness.get(), State::Uninitialized));

        assert!(readiness.begin());
        assert!(matches!(readiness.get(), State::Loading));

        readiness.finish(&Err(Error::custom("offline")));
        assert!(matches!(readiness.get(), State::Failed(_)));
        assert_eq!(readiness.get().to_string(), "failed (offline)");

        assert!(readiness.begin());
        readiness.finish(&Ok(()));
        assert!(readiness.is_ready());

        assert!(!readiness.begin());
        readiness.finish(&Err(Error::custom("late")));
        assert!(readiness.is_ready());
    }
}
