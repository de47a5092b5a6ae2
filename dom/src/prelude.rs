//! Common imports for consumers of this crate
pub use crate::error::Error;
pub use crate::loader::{DocumentLoader, Loader, Registry};
pub use crate::resource::{LoadStatus, Resource, ResourceKind};
pub use crate::result::Result;
