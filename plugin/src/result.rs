//! Result type used by the [`tiny_draw`](super) crate
pub type Result<T> = std::result::Result<T, crate::error::Error>;
