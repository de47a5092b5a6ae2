//!
//! Errors return by the [`tiny_draw_dom`](super) module
//!
use thiserror::Error;
use wasm_bindgen::JsValue;
use workflow_core::channel::RecvError;
use workflow_wasm::callback::CallbackError;
use workflow_wasm::printable::Printable;

/// Errors return by the [`tiny_draw_dom`](super) module
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Custom string error
    #[error("{0}")]
    Custom(String),

    /// Error containing [`wasm_bindgen::JsValue`] value
    #[error("{0}")]
    JsValue(Printable),

    /// A script or stylesheet failed to fetch or execute
    #[error("Failed to load `{url}`: {reason}")]
    Load { url: String, reason: String },

    #[error(transparent)]
    RecvError(#[from] RecvError),
}

impl Error {
    /// Wrap any failure that happened while loading `url` into [`Error::Load`],
    /// leaving existing load errors untouched.
    pub fn into_load_error(self, url: &str) -> Self {
        match self {
            Error::Load { .. } => self,
            other => Error::Load {
                url: url.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<String> for Error {
    fn from(v: String) -> Self {
        Self::Custom(v)
    }
}

impl From<&str> for Error {
    fn from(v: &str) -> Self {
        Self::Custom(v.to_string())
    }
}

impl From<JsValue> for Error {
    fn from(v: JsValue) -> Self {
        Self::JsValue(Printable::new(v))
    }
}

impl From<CallbackError> for Error {
    fn from(err: CallbackError) -> Self {
        Self::Custom(err.to_string())
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
