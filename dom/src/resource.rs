//!
//! [`Resource`] descriptors identifying external scripts and stylesheets.
//!

use std::fmt;

/// Kind of an external resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Script,
    Stylesheet,
}

impl ResourceKind {
    pub fn is_js(&self) -> bool {
        self == &ResourceKind::Script
    }

    /// Tag name of the element injected for this kind of resource
    pub fn tag(&self) -> &'static str {
        match self {
            ResourceKind::Script => "script",
            ResourceKind::Stylesheet => "link",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Script => write!(f, "script"),
            ResourceKind::Stylesheet => write!(f, "stylesheet"),
        }
    }
}

/// Immutable descriptor of one external asset. Resource identity
/// is its URL: two descriptors with the same URL refer to the same
/// resource regardless of how they were constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    url: String,
    kind: ResourceKind,
}

impl Resource {
    pub fn new<S: Into<String>>(kind: ResourceKind, url: S) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    pub fn script<S: Into<String>>(url: S) -> Self {
        Self::new(ResourceKind::Script, url)
    }

    pub fn stylesheet<S: Into<String>>(url: S) -> Self {
        Self::new(ResourceKind::Stylesheet, url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Identity key used to deduplicate loads and to mark injected elements.
    pub fn id(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.url)
    }
}

/// Successful result of loading a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The resource was injected by this call and reported as loaded
    Loaded,
    /// The resource was already present, nothing was injected
    Exists,
}
