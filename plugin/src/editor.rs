//!
//! Host editor abstractions: content insertion, user notifications and
//! the description of the drawing dialog.
//!

use crate::imports::*;
use serde::Serialize;

/// Editor instance the plugin inserts content into
pub trait Editor {
    /// Insert an HTML fragment at the current cursor/selection
    fn insert_content(&self, html: &str) -> Result<()>;

    /// Show an error message to the user
    fn notify_error(&self, message: &str);
}

impl<E> Editor for Rc<E>
where
    E: Editor + ?Sized,
{
    fn insert_content(&self, html: &str) -> Result<()> {
        self.as_ref().insert_content(html)
    }

    fn notify_error(&self, message: &str) {
        self.as_ref().notify_error(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    Cancel,
    Submit,
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogButton {
    #[serde(rename = "type")]
    pub kind: ButtonType,
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub primary: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DialogBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub items: Vec<PanelItem>,
}

/// Modal dialog hosting the drawing canvas, serialized into the
/// dialog specification expected by the editor window manager.
#[derive(Debug, Clone, Serialize)]
pub struct Dialog {
    pub title: String,
    pub body: DialogBody,
    pub buttons: Vec<DialogButton>,
}

impl Dialog {
    pub fn new(config: &Config) -> Self {
        let html = format!(
            r#"<div id="{}" style="width: {}px; height: {}px;"></div>"#,
            config.canvas_id, config.canvas_width, config.canvas_height
        );

        Dialog {
            title: config.dialog_title.clone(),
            body: DialogBody {
                kind: "panel",
                items: vec![PanelItem {
                    kind: "htmlpanel",
                    html,
                }],
            },
            buttons: vec![
                DialogButton {
                    kind: ButtonType::Cancel,
                    text: config.close_text.clone(),
                    primary: false,
                },
                DialogButton {
                    kind: ButtonType::Submit,
                    text: config.insert_text.clone(),
                    primary: true,
                },
            ],
        }
    }

    pub fn canvas_html(&self) -> &str {
        self.body
            .items
            .first()
            .map(|item| item.html.as_str())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_layout() {
        let dialog = Dialog::new(&Config::default());
        assert_eq!(dialog.title, "Draw Chemical Structure");
        assert_eq!(
            dialog.canvas_html(),
            r#"<div id="chemdoodle-draw" style="width: 800px; height: 300px;"></div>"#
        );
        assert_eq!(dialog.buttons.len(), 2);
        assert_eq!(dialog.buttons[0].kind, ButtonType::Cancel);
        assert_eq!(dialog.buttons[0].text, "Close");
        assert_eq!(dialog.buttons[1].kind, ButtonType::Submit);
        assert!(dialog.buttons[1].primary);
    }
}
