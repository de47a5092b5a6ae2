//!
//! Registration of the plugin icon, toolbar button and menu item
//! with the editor UI registry.
//!

use crate::imports::*;

/// Callback invoked when the user activates the button or menu item
pub type Action = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct ButtonSpec {
    pub name: String,
    pub icon: String,
    pub tooltip: String,
    pub action: Action,
}

#[derive(Clone)]
pub struct MenuItemSpec {
    pub name: String,
    pub icon: String,
    pub text: String,
    pub context: String,
    pub action: Action,
}

/// Editor UI registry
pub trait UiRegistry {
    fn add_icon(&self, name: &str, html: &str) -> Result<()>;
    fn add_button(&self, spec: ButtonSpec) -> Result<()>;
    fn add_menu_item(&self, spec: MenuItemSpec) -> Result<()>;
}

/// Register the icon, the toolbar button and the menu item.
/// Button and menu item share the same `action`.
pub fn register<R>(registry: &R, config: &Config, icon_html: &str, action: Action) -> Result<()>
where
    R: UiRegistry + ?Sized,
{
    registry.add_icon(&config.icon, icon_html)?;

    registry.add_button(ButtonSpec {
        name: config.button_name.clone(),
        icon: config.icon.clone(),
        tooltip: config.button_name.clone(),
        action: action.clone(),
    })?;

    registry.add_menu_item(MenuItemSpec {
        name: config.button_name.clone(),
        icon: config.icon.clone(),
        text: config.button_name.clone(),
        context: config.menu_context.clone(),
        action,
    })?;

    log_trace!("`{}` registered", config.button_name);
    Ok(())
}
