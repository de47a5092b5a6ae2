//!
//! Plugin configuration supplied by the host application.
//!
//! The host passes a plain JavaScript object (camelCase keys); every
//! field is optional and falls back to the [`Default`] value. The only
//! value the host normally has to provide is `wwwroot`, the base URL
//! under which the drawing library is installed.
//!

use crate::imports::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use workflow_core::time::Duration;

pub const DEFAULT_PLUGIN_PATH: &str = "/lib/editor/tiny/plugins/draw/lib/ChemDoodle/install";
pub const MAIN_SCRIPT: &str = "ChemDoodleWeb.js";
pub const MAIN_STYLESHEET: &str = "ChemDoodleWeb.css";
pub const UIS_STYLESHEET: &str = "is/jquery-ui-1.11.4.css";
pub const UIS_SCRIPT: &str = "is/ChemDoodleWeb-uis.js";

/// How the pipeline waits for the widget to register itself after
/// its main script has executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Settle {
    /// Wait a fixed amount of time and proceed unconditionally
    Fixed { millis: u64 },
    /// Check for the widget global every `interval_millis` and abort
    /// the pipeline if it is not defined within `timeout_millis`
    #[serde(rename_all = "camelCase")]
    Poll {
        interval_millis: u64,
        timeout_millis: u64,
    },
}

impl Default for Settle {
    fn default() -> Self {
        Settle::Poll {
            interval_millis: 50,
            timeout_millis: 5000,
        }
    }
}

impl Settle {
    /// Legacy behavior: a single 1 second delay
    pub fn legacy() -> Self {
        Settle::Fixed { millis: 1000 }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            Settle::Fixed { millis } => Duration::from_millis(*millis),
            Settle::Poll { timeout_millis, .. } => Duration::from_millis(*timeout_millis),
        }
    }
}

/// One step of the bootstrap plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Load(Resource),
    Settle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Host base URL
    pub wwwroot: String,
    /// Path of the drawing library installation relative to `wwwroot`
    pub plugin_path: String,
    /// Global symbol defined by the widget's main script
    pub widget_global: String,
    pub settle: Settle,

    pub canvas_id: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub use_services: bool,

    pub dialog_title: String,
    pub insert_text: String,
    pub close_text: String,

    pub button_name: String,
    pub icon: String,
    pub menu_context: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wwwroot: String::new(),
            plugin_path: DEFAULT_PLUGIN_PATH.to_string(),
            widget_global: "ChemDoodle".to_string(),
            settle: Settle::default(),
            canvas_id: "chemdoodle-draw".to_string(),
            canvas_width: 800,
            canvas_height: 300,
            use_services: true,
            dialog_title: "Draw Chemical Structure".to_string(),
            insert_text: "Insert".to_string(),
            close_text: "Close".to_string(),
            button_name: "tiny_draw".to_string(),
            icon: "tiny_draw".to_string(),
            menu_context: "tools".to_string(),
        }
    }
}

impl Config {
    pub fn new<S: Into<String>>(wwwroot: S) -> Self {
        Config {
            wwwroot: wwwroot.into(),
            ..Default::default()
        }
    }

    pub fn with_settle(mut self, settle: Settle) -> Self {
        self.settle = settle;
        self
    }

    /// Build a configuration from a JavaScript object
    pub fn try_from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Config::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    /// URL of a file inside the library installation. Without a `wwwroot`
    /// the URL stays absolute to the current host.
    pub fn url(&self, file: &str) -> String {
        let path = [
            self.plugin_path.trim_matches('/'),
            file.trim_start_matches('/'),
        ]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
        format!("{}/{path}", self.wwwroot.trim_end_matches('/'))
    }

    pub fn main_script(&self) -> Resource {
        Resource::script(self.url(MAIN_SCRIPT))
    }

    /// Ordered bootstrap plan. The advanced interaction script depends on
    /// the main script and on the UI framework stylesheet, so it comes last,
    /// after the widget has had a chance to register itself.
    pub fn plan(&self) -> Vec<Step> {
        vec![
            Step::Load(self.main_script()),
            Step::Load(Resource::stylesheet(self.url(MAIN_STYLESHEET))),
            Step::Load(Resource::stylesheet(self.url(UIS_STYLESHEET))),
            Step::Settle,
            Step::Load(Resource::script(self.url(UIS_SCRIPT))),
        ]
    }

    /// Resources of the bootstrap plan in load order
    pub fn resources(&self) -> Vec<Resource> {
        self.plan()
            .into_iter()
            .filter_map(|step| match step {
                Step::Load(resource) => Some(resource),
                Step::Settle => None,
            })
            .collect()
    }
}
