pub use crate::config::{Config, Settle, Step};
pub use crate::editor::Editor;
pub use crate::environment::Environment;
pub use crate::error::Error;
pub use crate::result::Result;
pub use async_trait::async_trait;
pub use std::rc::Rc;
pub use std::sync::atomic::{AtomicUsize, Ordering};
pub use std::sync::{Arc, Mutex};
pub use tiny_draw_dom::prelude::{LoadStatus, Loader, Registry, Resource, ResourceKind};
pub use workflow_log::{log_error, log_info, log_trace};
