//!
//! Queries against the shared JavaScript execution environment.
//!

use tiny_draw_dom::utils::is_global_defined;

/// Answers whether a symbol is defined in the global scope.
pub trait Environment {
    fn is_defined(&self, symbol: &str) -> bool;
}

/// [`Environment`] backed by the browser global object
#[derive(Debug, Default, Clone)]
pub struct GlobalScope;

impl Environment for GlobalScope {
    fn is_defined(&self, symbol: &str) -> bool {
        is_global_defined(symbol)
    }
}

impl<E> Environment for std::sync::Arc<E>
where
    E: Environment + ?Sized,
{
    fn is_defined(&self, symbol: &str) -> bool {
        self.as_ref().is_defined(symbol)
    }
}
