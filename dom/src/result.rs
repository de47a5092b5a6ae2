//! Result type used by the [`tiny_draw_dom`](super) module
pub type Result<T> = std::result::Result<T, crate::error::Error>;
