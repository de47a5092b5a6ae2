//!
//! Action handler: the entry point invoked when the user activates
//! the plugin button or menu item.
//!

use crate::bootstrap::Pipeline;
use crate::imports::*;
use crate::session::Surface;
use std::fmt;

/// Phases a single invocation goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Bootstrapping,
    OpeningSurface,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Idle => "idle",
            Phase::Bootstrapping => "bootstrapping",
            Phase::OpeningSurface => "opening surface",
            Phase::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

pub struct ActionHandler<S> {
    pipeline: Arc<Pipeline>,
    surface: S,
}

impl<S> ActionHandler<S> {
    pub fn new(pipeline: Arc<Pipeline>, surface: S) -> Self {
        ActionHandler { pipeline, surface }
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn enter(&self, phase: Phase) {
        log_trace!("action: {phase}");
    }

    /// Make the widget available and open the drawing surface. The surface
    /// is opened in the same invocation once the bootstrap completes; on
    /// failure it is not opened and the user is notified.
    pub async fn handle<E>(&self, editor: &E) -> Result<()>
    where
        E: Editor,
        S: Surface<E>,
    {
        self.enter(Phase::Idle);

        if !self.pipeline.is_available() {
            self.enter(Phase::Bootstrapping);
            if let Err(err) = self.pipeline.ensure().await {
                return Err(self.fail(editor, err));
            }
        }

        self.enter(Phase::OpeningSurface);
        if let Err(err) = self.surface.open(editor) {
            return Err(self.fail(editor, err));
        }

        self.enter(Phase::Idle);
        Ok(())
    }

    fn fail<E: Editor>(&self, editor: &E, err: Error) -> Error {
        self.enter(Phase::Failed);
        let message = format!("Unable to open the drawing tool: {err}");
        log_error!("{message}");
        editor.notify_error(&message);
        err
    }

    /// Fire-and-forget variant of [`handle()`](Self::handle) used by UI callbacks.
    pub fn dispatch<E>(self: &Rc<Self>, editor: E)
    where
        E: Editor + 'static,
        S: Surface<E> + 'static,
    {
        let this = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // failures are logged and reported to the user by handle()
            this.handle(&editor).await.ok();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use futures::join;

    #[tokio::test]
    async fn scenario_a_bootstrap_then_open() -> Result<()> {
        let host = TestHost::new();
        let handler = host.handler(test_config());
        let editor = TestEditor::default();

        handler.handle(&editor).await?;

        assert_eq!(handler.pipeline().runs(), 1);
        assert_eq!(host.loader.started().len(), 4);
        assert_eq!(handler.surface().opened(), 1);
        assert!(editor.errors().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn scenario_b_stylesheet_failure() {
        let host = TestHost::new();
        let handler = host.handler(test_config());
        let stylesheet = handler.pipeline().config().resources()[1].clone();
        host.loader.fail(&stylesheet);
        let editor = TestEditor::default();

        let err = handler.handle(&editor).await.unwrap_err();

        assert!(matches!(err, Error::BootstrapAborted { .. }));
        assert_eq!(err.resource(), Some(&stylesheet));
        assert_eq!(host.loader.started().len(), 2);
        assert_eq!(handler.surface().opened(), 0);
        let errors = editor.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains(stylesheet.url()));
    }

    #[tokio::test]
    async fn scenario_b_retry_loads_remaining_resources() -> Result<()> {
        let host = TestHost::never_registers();
        let handler = host.handler(test_config());
        let resources = handler.pipeline().config().resources();
        host.loader.fail(&resources[1]);
        let editor = TestEditor::default();

        assert!(handler.handle(&editor).await.is_err());
        // the main script loaded and registered the widget before the failure
        host.environment.define(WIDGET);
        host.loader.heal(&resources[1]);

        handler.handle(&editor).await?;
        assert_eq!(handler.pipeline().runs(), 2);
        assert_eq!(handler.surface().opened(), 1);
        let started = host.loader.started();
        assert!(resources.iter().all(|resource| started.contains(resource)));
        Ok(())
    }

    #[tokio::test]
    async fn scenario_c_widget_already_available() -> Result<()> {
        let host = TestHost::new();
        host.environment.define("ChemDoodle");
        let handler = host.handler(test_config());
        let editor = TestEditor::default();

        handler.handle(&editor).await?;
        handler.handle(&editor).await?;

        assert_eq!(handler.pipeline().runs(), 0);
        assert!(host.loader.started().is_empty());
        assert_eq!(handler.surface().opened(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_invocations_share_one_bootstrap() -> Result<()> {
        let host = TestHost::new();
        let handler = host.handler(test_config());
        let editor = TestEditor::default();

        let (a, b) = join!(handler.handle(&editor), handler.handle(&editor));
        a?;
        b?;

        assert_eq!(handler.pipeline().runs(), 1);
        assert_eq!(host.loader.started().len(), 4);
        assert_eq!(handler.surface().opened(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn retry_after_failure() -> Result<()> {
        let host = TestHost::new();
        let handler = host.handler(test_config());
        let script = handler.pipeline().config().resources()[3].clone();
        host.loader.fail(&script);
        let editor = TestEditor::default();

        assert!(handler.handle(&editor).await.is_err());
        assert_eq!(handler.surface().opened(), 0);
        // the settle step waited for the widget, so the global is defined
        assert!(host.environment.is_defined(WIDGET));
        assert!(!handler.pipeline().is_available());

        host.loader.heal(&script);
        handler.handle(&editor).await?;
        assert_eq!(handler.surface().opened(), 1);
        assert_eq!(handler.pipeline().runs(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn surface_failure_is_reported() {
        let host = TestHost::new();
        host.environment.define("ChemDoodle");
        let handler = host.handler(test_config());
        handler.surface().break_next();
        let editor = TestEditor::default();

        assert!(handler.handle(&editor).await.is_err());
        assert_eq!(editor.errors().len(), 1);
    }
}
