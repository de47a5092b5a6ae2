//!
//! Browser host bindings: TinyMCE editor APIs, the ChemDoodle sketcher
//! and the exported plugin registration entry point.
//!

use crate::bootstrap::Pipeline;
use crate::editor::Dialog;
use crate::environment::GlobalScope;
use crate::handler::ActionHandler;
use crate::imports::*;
use crate::session::{ModalSession, Sketcher, Surface};
use crate::setup::{register, Action, ButtonSpec, MenuItemSpec, UiRegistry};
use js_sys::{Object, Reflect};
use std::cell::RefCell;
use tiny_draw_dom::loader::DocumentLoader;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use workflow_wasm::callback::{callback, AsCallback, CallbackMap};

#[wasm_bindgen]
extern "C" {
    /// TinyMCE editor instance
    #[wasm_bindgen(extends = Object)]
    #[derive(Debug, Clone)]
    pub type TinyEditor;

    #[wasm_bindgen(method, catch, js_name = insertContent)]
    pub fn insert_html(this: &TinyEditor, html: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, getter, js_name = windowManager)]
    pub fn window_manager(this: &TinyEditor) -> WindowManager;

    #[wasm_bindgen(method, getter, js_name = notificationManager)]
    pub fn notification_manager(this: &TinyEditor) -> NotificationManager;

    #[wasm_bindgen(method, getter)]
    pub fn ui(this: &TinyEditor) -> EditorUi;

    pub type WindowManager;

    #[wasm_bindgen(method, catch)]
    pub fn open(this: &WindowManager, spec: &Object) -> std::result::Result<JsValue, JsValue>;

    pub type NotificationManager;

    #[wasm_bindgen(method, catch)]
    pub fn open(
        this: &NotificationManager,
        spec: &Object,
    ) -> std::result::Result<JsValue, JsValue>;

    pub type EditorUi;

    #[wasm_bindgen(method, getter)]
    pub fn registry(this: &EditorUi) -> TinyRegistry;

    pub type TinyRegistry;

    #[wasm_bindgen(method, catch, js_name = addIcon)]
    pub fn add_icon(this: &TinyRegistry, name: &str, svg: &str)
        -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addButton)]
    pub fn add_button(
        this: &TinyRegistry,
        name: &str,
        spec: &Object,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addMenuItem)]
    pub fn add_menu_item(
        this: &TinyRegistry,
        name: &str,
        spec: &Object,
    ) -> std::result::Result<(), JsValue>;

    /// Dialog instance API passed to dialog callbacks
    pub type DialogApi;

    #[wasm_bindgen(method)]
    pub fn close(this: &DialogApi);
}

#[wasm_bindgen(js_namespace = ChemDoodle)]
extern "C" {
    #[derive(Debug, Clone)]
    pub type SketcherCanvas;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(
        id: &str,
        width: u32,
        height: u32,
        options: &Object,
    ) -> std::result::Result<SketcherCanvas, JsValue>;

    #[wasm_bindgen(method)]
    pub fn repaint(this: &SketcherCanvas);

    #[wasm_bindgen(method, getter)]
    pub fn canvas(this: &SketcherCanvas) -> JsValue;
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value)?;
    Ok(())
}

impl Editor for TinyEditor {
    fn insert_content(&self, html: &str) -> Result<()> {
        self.insert_html(html)?;
        Ok(())
    }

    fn notify_error(&self, message: &str) {
        let spec = Object::new();
        let result = set(&spec, "text", &JsValue::from_str(message))
            .and_then(|_| set(&spec, "type", &JsValue::from_str("error")))
            .and_then(|_| Ok(self.notification_manager().open(&spec)?));
        if let Err(err) = result {
            log_error!("Unable to show notification `{message}`: {err}");
        }
    }
}

/// [`Sketcher`] backed by `ChemDoodle.SketcherCanvas`
pub struct ChemSketcher(SketcherCanvas);

impl ChemSketcher {
    pub fn try_new(config: &Config) -> Result<Self> {
        let options = Object::new();
        set(
            &options,
            "useServices",
            &JsValue::from_bool(config.use_services),
        )?;
        let canvas = SketcherCanvas::new(
            &config.canvas_id,
            config.canvas_width,
            config.canvas_height,
            &options,
        )?;
        canvas.repaint();
        Ok(ChemSketcher(canvas))
    }
}

impl Sketcher for ChemSketcher {
    fn to_data_url(&self) -> Result<String> {
        let canvas = self
            .0
            .canvas()
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::custom("sketcher canvas element is not available"))?;
        Ok(canvas.to_data_url_with_type("image/png")?)
    }
}

type Session = ModalSession<TinyEditor, ChemSketcher>;

struct DialogContext {
    session: RefCell<Option<Session>>,
    callbacks: CallbackMap,
}

/// [`Surface`] presenting the sketcher in a TinyMCE modal dialog
pub struct ModalSurface {
    config: Arc<Config>,
    current: RefCell<Option<Rc<DialogContext>>>,
}

impl ModalSurface {
    pub fn new(config: Arc<Config>) -> Self {
        ModalSurface {
            config,
            current: RefCell::new(None),
        }
    }
}

impl Surface<TinyEditor> for ModalSurface {
    fn open(&self, editor: &TinyEditor) -> Result<()> {
        let spec: Object = serde_wasm_bindgen::to_value(&Dialog::new(&self.config))?.unchecked_into();
        let ctx = Rc::new(DialogContext {
            session: RefCell::new(Some(ModalSession::new(editor.clone()))),
            callbacks: CallbackMap::new(),
        });

        let weak = Rc::downgrade(&ctx);
        let on_submit = callback!(move |api: DialogApi| {
            let session = weak.upgrade().and_then(|ctx| ctx.session.take());
            if let Some(session) = session {
                if let Err(err) = session.submit() {
                    log_error!("Unable to insert the drawing: {err}");
                }
            }
            api.close();
        });

        let weak = Rc::downgrade(&ctx);
        let on_close = callback!(move |_api: JsValue| {
            let session = weak.upgrade().and_then(|ctx| ctx.session.take());
            if let Some(session) = session {
                session.cancel();
            }
        });

        set(&spec, "onSubmit", on_submit.get_fn())?;
        set(&spec, "onCancel", on_close.get_fn())?;
        set(&spec, "onClose", on_close.get_fn())?;
        ctx.callbacks.retain(on_submit)?;
        ctx.callbacks.retain(on_close)?;

        editor.window_manager().open(&spec)?;

        // the dialog body is in the document once open() returns
        let sketcher = ChemSketcher::try_new(&self.config)?;
        if let Some(session) = ctx.session.borrow_mut().as_mut() {
            session.attach(sketcher);
        }

        self.current.replace(Some(ctx));
        Ok(())
    }
}

/// [`UiRegistry`] over the TinyMCE `editor.ui.registry`
pub struct BrowserRegistry {
    registry: TinyRegistry,
    callbacks: CallbackMap,
}

impl BrowserRegistry {
    fn action(&self, action: Action) -> Result<JsValue> {
        let on_action = callback!(move || {
            action();
        });
        let function: JsValue = on_action.get_fn().clone().into();
        self.callbacks.retain(on_action)?;
        Ok(function)
    }
}

impl UiRegistry for BrowserRegistry {
    fn add_icon(&self, name: &str, html: &str) -> Result<()> {
        self.registry.add_icon(name, html)?;
        Ok(())
    }

    fn add_button(&self, spec: ButtonSpec) -> Result<()> {
        let options = Object::new();
        set(&options, "tooltip", &JsValue::from_str(&spec.tooltip))?;
        set(&options, "icon", &JsValue::from_str(&spec.icon))?;
        set(&options, "onAction", &self.action(spec.action)?)?;
        self.registry.add_button(&spec.name, &options)?;
        Ok(())
    }

    fn add_menu_item(&self, spec: MenuItemSpec) -> Result<()> {
        let options = Object::new();
        set(&options, "icon", &JsValue::from_str(&spec.icon))?;
        set(&options, "text", &JsValue::from_str(&spec.text))?;
        set(&options, "context", &JsValue::from_str(&spec.context))?;
        set(&options, "onAction", &self.action(spec.action)?)?;
        self.registry.add_menu_item(&spec.name, &options)?;
        Ok(())
    }
}

/// Page-wide plugin instance shared by all editors on the page
struct Plugin {
    handler: Rc<ActionHandler<ModalSurface>>,
    callbacks: CallbackMap,
}

thread_local! {
    static PLUGIN: RefCell<Option<Rc<Plugin>>> = const { RefCell::new(None) };
}

/// The first registration creates the pipeline; later registrations
/// (other editors on the same page) reuse it and ignore `config`.
fn plugin(config: Config) -> Rc<Plugin> {
    PLUGIN.with(|cell| {
        cell.borrow_mut()
            .get_or_insert_with(|| {
                let config = Arc::new(config);
                let pipeline = Arc::new(Pipeline::new(
                    config.clone(),
                    Arc::new(DocumentLoader),
                    Arc::new(GlobalScope),
                ));
                let surface = ModalSurface::new(config);
                Rc::new(Plugin {
                    handler: Rc::new(ActionHandler::new(pipeline, surface)),
                    callbacks: CallbackMap::new(),
                })
            })
            .clone()
    })
}

/// Register the drawing button and menu item with a TinyMCE editor.
/// `config` is a plain object (see [`Config`]); `icon_html` is the markup
/// of the toolbar icon.
#[wasm_bindgen(js_name = register)]
pub fn register_editor(
    editor: TinyEditor,
    config: JsValue,
    icon_html: String,
) -> std::result::Result<(), JsValue> {
    let plugin = plugin(Config::try_from_js(config)?);
    let registry = BrowserRegistry {
        registry: editor.ui().registry(),
        callbacks: plugin.callbacks.clone(),
    };

    let handler = plugin.handler.clone();
    let action: Action = Rc::new(move || handler.dispatch(editor.clone()));
    register(
        &registry,
        plugin.handler.pipeline().config(),
        &icon_html,
        action,
    )?;
    Ok(())
}
