//!
//! DOM resource loading utilities.
//!
//! Provides run-time loading of external JavaScript and CSS resources
//! by injecting `<script>` and `<link rel="stylesheet">` elements into
//! the live document and resolving a future once the browser reports
//! the resource as loaded (or failed).
//!
//! Example:
//!
//! ```rust ignore
//! use tiny_draw_dom::prelude::*;
//!
//! let registry = Registry::new(DocumentLoader::default());
//! registry.load(&Resource::script("https://example.com/widget.js")).await?;
//! ```

pub mod error;
pub mod loader;
pub mod prelude;
pub mod resource;
pub mod result;
pub mod utils;
