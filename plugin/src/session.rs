//!
//! Modal drawing session: one open instance of the drawing dialog.
//!

use crate::imports::*;
use workflow_html::escape_attr;

/// Drawing canvas able to produce a raster snapshot of its content.
pub trait Sketcher {
    /// PNG snapshot encoded as a `data:` URL
    fn to_data_url(&self) -> Result<String>;
}

/// Something that can present the drawing surface for an editor.
/// Opening hands the surface off; its lifecycle is independent afterwards.
pub trait Surface<E> {
    fn open(&self, editor: &E) -> Result<()>;
}

/// How a [`ModalSession`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closed {
    Submitted,
    Cancelled,
}

/// Markup inserted into the editor for a drawing
pub fn image_fragment(data_url: &str) -> String {
    format!(r#"<img src="{}" />"#, escape_attr(data_url))
}

/// Session bound to one editor. The sketcher is attached once the dialog
/// has been rendered. Both exits consume the session, so content is
/// inserted at most once.
pub struct ModalSession<E, K> {
    editor: E,
    sketcher: Option<K>,
}

impl<E, K> ModalSession<E, K>
where
    E: Editor,
    K: Sketcher,
{
    pub fn new(editor: E) -> Self {
        ModalSession {
            editor,
            sketcher: None,
        }
    }

    pub fn attach(&mut self, sketcher: K) {
        self.sketcher = Some(sketcher);
    }

    pub fn sketcher(&self) -> Option<&K> {
        self.sketcher.as_ref()
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Insert the current drawing into the editor. No content validation
    /// is performed: an empty canvas still yields an (empty) image.
    pub fn submit(self) -> Result<Closed> {
        let sketcher = self
            .sketcher
            .as_ref()
            .ok_or_else(|| Error::custom("drawing canvas is not initialized"))?;
        let data_url = sketcher.to_data_url()?;
        self.editor.insert_content(&image_fragment(&data_url))?;
        log_trace!("drawing inserted ({} bytes)", data_url.len());
        Ok(Closed::Submitted)
    }

    pub fn cancel(self) -> Closed {
        Closed::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn submit_inserts_exactly_one_image() -> Result<()> {
        let editor = Rc::new(TestEditor::default());
        let mut session = ModalSession::new(editor.clone());
        session.attach(TestSketcher::new("data:image/png;base64,AAAA"));

        assert_eq!(session.submit()?, Closed::Submitted);
        assert_eq!(
            editor.inserted(),
            vec![r#"<img src="data:image/png;base64,AAAA" />"#.to_string()]
        );
        Ok(())
    }

    #[test]
    fn cancel_inserts_nothing() {
        let editor = Rc::new(TestEditor::default());
        let mut session = ModalSession::new(editor.clone());
        session.attach(TestSketcher::new("data:image/png;base64,AAAA"));

        assert_eq!(session.cancel(), Closed::Cancelled);
        assert!(editor.inserted().is_empty());
    }

    #[test]
    fn blank_drawing_is_still_inserted() -> Result<()> {
        let editor = Rc::new(TestEditor::default());
        let mut session = ModalSession::new(editor.clone());
        session.attach(TestSketcher::new("data:,"));

        session.submit()?;
        assert_eq!(editor.inserted(), vec![r#"<img src="data:," />"#.to_string()]);
        Ok(())
    }

    #[test]
    fn submit_without_canvas_fails() {
        let editor = Rc::new(TestEditor::default());
        let session = ModalSession::<_, TestSketcher>::new(editor.clone());
        assert!(session.submit().is_err());
        assert!(editor.inserted().is_empty());
    }

    #[test]
    fn attribute_escaping() {
        assert_eq!(image_fragment("data:,abc"), r#"<img src="data:,abc" />"#);
        assert_eq!(
            image_fragment(r#"x" onerror="alert(1)"#),
            r#"<img src="x&quot; onerror=&quot;alert(1)" />"#
        );
    }
}
