//!
//! Run-time loading of external scripts and stylesheets.
//!
//! [`DocumentLoader`] injects `<script>` and `<link>` elements into the
//! live document and resolves once the browser fires `load` (or `error`)
//! on the injected element. [`Registry`] wraps any [`Loader`] making
//! loads idempotent: concurrent requests for the same resource are
//! coalesced into a single load and resources that have been loaded
//! once are reported as [`LoadStatus::Exists`] afterwards.
//!

use crate::error::Error;
use crate::resource::*;
use crate::result::Result;
use crate::utils::*;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use web_sys::{Document, Element};
use workflow_core::channel::oneshot;
use workflow_core::lookup::*;
use workflow_log::*;
use workflow_wasm::callback::*;

/// Attribute carrying the resource identity on injected elements.
pub const RESOURCE_ATTRIBUTE: &str = "data-resource";
/// Attribute set to [`RESOURCE_LOADED`] once an injected element fired `load`.
pub const RESOURCE_STATE_ATTRIBUTE: &str = "data-resource-state";
pub const RESOURCE_LOADED: &str = "loaded";

/// Previously injected element found for a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The element finished loading and can be reused
    Loaded,
    /// The element never completed (abandoned or failed) and must be replaced
    Stale,
}

impl Presence {
    pub fn from_state(state: Option<&str>) -> Self {
        match state {
            Some(RESOURCE_LOADED) => Presence::Loaded,
            _ => Presence::Stale,
        }
    }
}

/// Loads a single [`Resource`]. Implementations must not panic;
/// every failure is reported through the returned [`Result`].
#[async_trait(?Send)]
pub trait Loader {
    async fn load(&self, resource: &Resource) -> Result<LoadStatus>;
}

#[async_trait(?Send)]
impl<L> Loader for Arc<L>
where
    L: Loader + ?Sized,
{
    async fn load(&self, resource: &Resource) -> Result<LoadStatus> {
        self.as_ref().load(resource).await
    }
}

/// [`Loader`] injecting resources into the browser document.
#[derive(Debug, Default, Clone)]
pub struct DocumentLoader;

impl DocumentLoader {
    /// Locate a previously injected element for the given resource.
    fn find(&self, doc: &Document, resource: &Resource) -> Option<Element> {
        let collection = doc.get_elements_by_tag_name(resource.kind().tag());
        (0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .find(|el| el.get_attribute(RESOURCE_ATTRIBUTE).as_deref() == Some(resource.id()))
    }

    fn create_element(&self, doc: &Document, resource: &Resource) -> Result<Element> {
        let el = doc.create_element(resource.kind().tag())?;
        match resource.kind() {
            ResourceKind::Script => {
                el.set_attribute("type", "text/javascript")?;
                el.set_attribute("src", resource.url())?;
            }
            ResourceKind::Stylesheet => {
                el.set_attribute("type", "text/css")?;
                el.set_attribute("rel", "stylesheet")?;
                el.set_attribute("href", resource.url())?;
            }
        }
        el.set_attribute(RESOURCE_ATTRIBUTE, resource.id())?;
        Ok(el)
    }

    /// Scripts go to `<body>`, stylesheets to `<head>`; each falls back to the other.
    fn root(&self, kind: ResourceKind) -> Result<Element> {
        match kind {
            ResourceKind::Script => body().or_else(|_| head()),
            ResourceKind::Stylesheet => head().or_else(|_| body()),
        }
    }

    async fn load_impl(&self, resource: &Resource) -> Result<LoadStatus> {
        let doc = document()?;
        if let Some(el) = self.find(&doc, resource) {
            let state = el.get_attribute(RESOURCE_STATE_ATTRIBUTE);
            match Presence::from_state(state.as_deref()) {
                Presence::Loaded => {
                    log_trace!("{resource} is already present");
                    return Ok(LoadStatus::Exists);
                }
                Presence::Stale => {
                    log_trace!("replacing stale element for {resource}");
                    el.remove();
                }
            }
        }

        let (sender, receiver) = oneshot::<std::result::Result<(), String>>();
        let load_sender = sender.clone();
        let on_load = callback!(move |_event: web_sys::Event| {
            load_sender.try_send(Ok(())).ok();
        });
        let on_error = callback!(move |_event: web_sys::Event| {
            sender
                .try_send(Err("network or parse failure".to_string()))
                .ok();
        });

        let el = self.create_element(&doc, resource)?;
        el.add_event_listener_with_callback("load", on_load.get_fn())?;
        el.add_event_listener_with_callback("error", on_error.get_fn())?;
        self.root(resource.kind())?.append_child(&el)?;

        let outcome = receiver.recv().await?;
        el.remove_event_listener_with_callback("load", on_load.get_fn())
            .ok();
        el.remove_event_listener_with_callback("error", on_error.get_fn())
            .ok();

        match outcome {
            Ok(()) => {
                el.set_attribute(RESOURCE_STATE_ATTRIBUTE, RESOURCE_LOADED)?;
                log_info!("Successfully loaded: {}", resource.url());
                Ok(LoadStatus::Loaded)
            }
            Err(reason) => {
                // failed nodes do not stay in the document
                el.remove();
                Err(Error::Load {
                    url: resource.url().to_string(),
                    reason,
                })
            }
        }
    }
}

#[async_trait(?Send)]
impl Loader for DocumentLoader {
    async fn load(&self, resource: &Resource) -> Result<LoadStatus> {
        self.load_impl(resource).await.map_err(|err| {
            let err = err.into_load_error(resource.url());
            log_error!("{err}");
            err
        })
    }
}

/// Idempotent [`Loader`] wrapper. At most one load per resource id is
/// outstanding at any time; loaded ids are remembered for the lifetime
/// of the registry. Failed loads are not remembered and may be retried.
pub struct Registry<L> {
    loader: L,
    lookup_handler: LookupHandler<String, LoadStatus, Error>,
    loaded: Mutex<HashSet<String>>,
    attempts: AtomicUsize,
}

impl<L> Registry<L>
where
    L: Loader,
{
    pub fn new(loader: L) -> Self {
        Registry {
            loader,
            lookup_handler: LookupHandler::new(),
            loaded: Mutex::new(HashSet::new()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn is_loaded(&self, resource: &Resource) -> bool {
        self.loaded.lock().unwrap().contains(resource.id())
    }

    /// Number of loads actually delegated to the inner loader
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl<L> Loader for Registry<L>
where
    L: Loader,
{
    async fn load(&self, resource: &Resource) -> Result<LoadStatus> {
        if self.is_loaded(resource) {
            return Ok(LoadStatus::Exists);
        }

        let id = resource.id().to_string();
        match self.lookup_handler.queue(&id).await {
            RequestType::New(receiver) => {
                self.attempts.fetch_add(1, Ordering::SeqCst);
                let result = self.loader.load(resource).await;
                if result.is_ok() {
                    self.loaded.lock().unwrap().insert(id.clone());
                }
                self.lookup_handler.complete(&id, result).await;
                receiver.recv().await?
            }
            RequestType::Pending(receiver) => receiver.recv().await?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::join;
    use std::time::Duration;
    use workflow_core::task::sleep;

    #[derive(Default)]
    struct TestLoader {
        log: Mutex<Vec<String>>,
        failing: Mutex<HashSet<String>>,
    }

    impl TestLoader {
        fn fail(&self, url: &str) {
            self.failing.lock().unwrap().insert(url.to_string());
        }

        fn heal(&self, url: &str) {
            self.failing.lock().unwrap().remove(url);
        }

        fn calls(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait(?Send)]
    impl Loader for TestLoader {
        async fn load(&self, resource: &Resource) -> Result<LoadStatus> {
            self.log.lock().unwrap().push(resource.url().to_string());
            sleep(Duration::from_millis(20)).await;
            if self.failing.lock().unwrap().contains(resource.url()) {
                Err(Error::Load {
                    url: resource.url().to_string(),
                    reason: "404".to_string(),
                })
            } else {
                Ok(LoadStatus::Loaded)
            }
        }
    }

    #[tokio::test]
    async fn registry_coalesces_concurrent_loads() -> Result<()> {
        let registry = Registry::new(TestLoader::default());
        let script = Resource::script("https://host/widget.js");

        let (a, b, c) = join!(
            registry.load(&script),
            registry.load(&script),
            registry.load(&script)
        );
        assert_eq!(a?, LoadStatus::Loaded);
        assert_eq!(b?, LoadStatus::Loaded);
        assert_eq!(c?, LoadStatus::Loaded);
        assert_eq!(registry.attempts(), 1);
        assert_eq!(registry.loader().calls().len(), 1);

        assert_eq!(registry.load(&script).await?, LoadStatus::Exists);
        assert_eq!(registry.attempts(), 1);
        assert!(registry.is_loaded(&script));
        Ok(())
    }

    #[tokio::test]
    async fn registry_keys_by_url() -> Result<()> {
        let registry = Registry::new(TestLoader::default());
        registry.load(&Resource::script("https://host/a.js")).await?;
        registry
            .load(&Resource::stylesheet("https://host/a.css"))
            .await?;
        registry.load(&Resource::script("https://host/a.js")).await?;
        assert_eq!(
            registry.loader().calls(),
            vec!["https://host/a.js", "https://host/a.css"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn registry_does_not_remember_failures() {
        let registry = Registry::new(TestLoader::default());
        let css = Resource::stylesheet("https://host/broken.css");
        registry.loader().fail(css.url());

        let err = registry.load(&css).await.unwrap_err();
        assert!(matches!(err, Error::Load { ref url, .. } if url == css.url()));
        assert!(!registry.is_loaded(&css));

        registry.loader().heal(css.url());
        assert_eq!(registry.load(&css).await.unwrap(), LoadStatus::Loaded);
        assert_eq!(registry.attempts(), 2);
    }

    #[test]
    fn only_loaded_elements_are_reused() {
        assert_eq!(Presence::from_state(Some(RESOURCE_LOADED)), Presence::Loaded);
        assert_eq!(Presence::from_state(None), Presence::Stale);
        assert_eq!(Presence::from_state(Some("")), Presence::Stale);
    }

    #[test]
    fn load_error_wrapping() {
        let err = Error::from("boom").into_load_error("https://host/x.js");
        assert_eq!(err.to_string(), "Failed to load `https://host/x.js`: boom");

        let err = Error::Load {
            url: "a".into(),
            reason: "b".into(),
        }
        .into_load_error("c");
        assert!(matches!(err, Error::Load { ref url, .. } if url == "a"));
    }
}
