//!
//! Chemical structure drawing plugin for the TinyMCE rich-text editor.
//!
//! The plugin registers a toolbar button and a menu item that open a
//! modal dialog hosting the [ChemDoodle](https://web.chemdoodle.com)
//! sketcher. The sketcher library is not bundled with the editor; its
//! scripts and stylesheets are loaded lazily on first use by the
//! [`bootstrap`] pipeline and the drawing is inserted into the editor
//! as an `<img>` element carrying a PNG data URL.
//!
//! Data flow:
//!
//! ```text
//! user action -> ActionHandler -> Gate -> (Bootstrap) -> Surface -> ModalSession -> Editor
//! ```
//!

pub mod bindings;
pub mod bootstrap;
pub mod config;
pub mod editor;
pub mod environment;
pub mod error;
pub mod gate;
pub mod handler;
pub mod imports;
pub mod result;
pub mod session;
pub mod setup;
pub mod state;
