use thiserror::Error;
use tiny_draw_dom::resource::Resource;
use wasm_bindgen::JsValue;
use workflow_core::channel::RecvError;
use workflow_wasm::callback::CallbackError;
use workflow_wasm::printable::Printable;

/// Errors produced by the [`tiny_draw`](super) crate
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    /// A single script or stylesheet failed to load
    #[error(transparent)]
    ResourceLoad(#[from] tiny_draw_dom::error::Error),

    /// The bootstrap pipeline did not complete; no further steps were attempted
    #[error("Bootstrap aborted at {resource}: {reason}")]
    BootstrapAborted { resource: Resource, reason: String },

    #[error("{0}")]
    JsValue(Printable),

    #[error("Callback error: {0}")]
    Callback(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    RecvError(#[from] RecvError),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }

    /// Resource that caused the bootstrap pipeline to abort, if any
    pub fn resource(&self) -> Option<&Resource> {
        match self {
            Error::BootstrapAborted { resource, .. } => Some(resource),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::Custom(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Self::Custom(err.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(js_value: JsValue) -> Error {
        Error::JsValue(Printable::new(js_value))
    }
}

impl From<CallbackError> for Error {
    fn from(err: CallbackError) -> Self {
        Error::Callback(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> JsValue {
        let s: String = err.to_string();
        JsValue::from_str(&s)
    }
}
