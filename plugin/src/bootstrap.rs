//!
//! Bootstrap pipeline loading the drawing widget resources.
//!
//! [`Bootstrap`] runs the ordered plan produced by [`Config::plan()`]:
//! every step is awaited before the next one starts and the first
//! failure aborts the remaining steps with [`Error::BootstrapAborted`].
//! [`Pipeline`] is the process-wide owner of the readiness state; it
//! short-circuits when the widget is already available and makes sure
//! that at most one bootstrap run is outstanding at any time.
//!

use crate::environment::Environment;
use crate::gate::Gate;
use crate::imports::*;
use crate::state::{Readiness, State};
use workflow_core::lookup::*;
use workflow_core::task::sleep;
use workflow_core::time::{Duration, Instant};

/// Ordered, non-retrying loader for all widget resources.
pub struct Bootstrap<'a> {
    config: &'a Config,
    loader: &'a dyn Loader,
    environment: &'a dyn Environment,
}

impl<'a> Bootstrap<'a> {
    pub fn new(config: &'a Config, loader: &'a dyn Loader, environment: &'a dyn Environment) -> Self {
        Bootstrap {
            config,
            loader,
            environment,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let start = Instant::now();
        for step in self.config.plan() {
            match step {
                Step::Load(resource) => {
                    if let Err(err) = self.loader.load(&resource).await {
                        return Err(Error::BootstrapAborted {
                            reason: err.to_string(),
                            resource,
                        });
                    }
                }
                Step::Settle => self.settle().await?,
            }
        }

        log_info!(
            "All {} components loaded successfully in {} msec",
            self.config.widget_global,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Wait until the widget registered by the main script is observable.
    async fn settle(&self) -> Result<()> {
        match &self.config.settle {
            Settle::Fixed { millis } => {
                sleep(Duration::from_millis(*millis)).await;
            }
            Settle::Poll {
                interval_millis,
                timeout_millis,
            } => {
                let interval = Duration::from_millis(*interval_millis);
                let timeout = Duration::from_millis(*timeout_millis);
                let start = Instant::now();
                while !self.environment.is_defined(&self.config.widget_global) {
                    if start.elapsed() >= timeout {
                        return Err(Error::BootstrapAborted {
                            resource: self.config.main_script(),
                            reason: format!(
                                "`{}` was not registered within {} msec",
                                self.config.widget_global, timeout_millis
                            ),
                        });
                    }
                    sleep(interval).await;
                }
            }
        }
        Ok(())
    }
}

/// Process-wide bootstrap coordinator.
pub struct Pipeline {
    config: Arc<Config>,
    registry: Registry<Arc<dyn Loader>>,
    environment: Arc<dyn Environment>,
    readiness: Readiness,
    lookup_handler: LookupHandler<(), (), Error>,
    runs: AtomicUsize,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        loader: Arc<dyn Loader>,
        environment: Arc<dyn Environment>,
    ) -> Self {
        Pipeline {
            config,
            registry: Registry::new(loader),
            environment,
            readiness: Readiness::new(),
            lookup_handler: LookupHandler::new(),
            runs: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn state(&self) -> State {
        self.readiness.get()
    }

    pub fn gate(&self) -> Gate<'_> {
        Gate::new(
            &self.readiness,
            self.environment.as_ref(),
            &self.config.widget_global,
        )
    }

    pub fn is_available(&self) -> bool {
        self.gate().is_available()
    }

    /// Number of bootstrap runs started so far
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn sequencer(&self) -> Bootstrap<'_> {
        Bootstrap::new(&self.config, &self.registry, self.environment.as_ref())
    }

    /// Make the widget available. Resolves immediately if the gate is open;
    /// otherwise starts a bootstrap run or joins the one already in flight.
    pub async fn ensure(&self) -> Result<()> {
        if self.is_available() {
            return Ok(());
        }

        match self.lookup_handler.queue(&()).await {
            RequestType::New(receiver) => {
                let result = if self.readiness.begin() {
                    let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
                    log_trace!("bootstrap run #{run} started");
                    self.sequencer().run().await
                } else {
                    Ok(())
                };
                if let Err(err) = &result {
                    log_error!("Failed to load {} components: {err}", self.config.widget_global);
                }
                self.readiness.finish(&result);
                self.lookup_handler.complete(&(), result).await;
                receiver.recv().await?
            }
            RequestType::Pending(receiver) => receiver.recv().await?,
        }
    }
}
