use std::fmt::Display;
use std::io::Write;

use tracing::debug;

use crate::document::Document;
use crate::element::OpenTag;
use crate::encoder::{Encoder, MarkupEncoder};
use crate::error::Error;
use crate::output::{with_tags, ContentModel, Tag};

/// Where content is being written: the enclosing element and the model its
/// children are checked against.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context {
    parent: Option<Tag>,
    model: ContentModel,
}

impl Context {
    pub(crate) fn document() -> Self {
        Context {
            parent: None,
            model: ContentModel::any(),
        }
    }

    pub(crate) fn element(parent: Tag, model: ContentModel) -> Self {
        Context {
            parent: Some(parent),
            model,
        }
    }

    pub(crate) fn model(&self) -> &ContentModel {
        &self.model
    }

    pub(crate) fn parent_name(&self) -> &'static str {
        self.parent.map_or("#document", Tag::name)
    }
}

/// A place to write content: the top level of a document, or the body of an
/// element.
///
/// Every element has a factory method here named after it. Whether the
/// element may appear in this place is checked when the factory is called.
///
/// ```rust
/// use fluent_html::{Document, Error};
/// use fluent_html::output::Parameters;
///
/// let mut doc = Document::new(Vec::new(), Parameters::default());
/// let mut content = doc.content();
/// content.ul()?.body(|ul| {
///     ul.li()?.text("one")?;
///     ul.li()?.text("two")?;
///     Ok(())
/// })?;
/// assert!(content.p()?.body(|p| p.div()?.close()).is_err());
/// # Ok::<(), Error>(())
/// ```
pub struct Content<'d, W: Write, E: Encoder = MarkupEncoder> {
    pub(crate) doc: &'d mut Document<W, E>,
    context: Context,
}

impl<'d, W: Write, E: Encoder> Content<'d, W, E> {
    pub(crate) fn new(doc: &'d mut Document<W, E>, context: Context) -> Self {
        Content { doc, context }
    }

    /// The enclosing element, or `None` at the top level.
    pub fn parent(&self) -> Option<Tag> {
        self.context.parent
    }

    /// The model children are checked against here. For transparent
    /// elements this is already resolved against their ancestors.
    pub fn model(&self) -> &ContentModel {
        self.context.model()
    }

    /// The document being written, for direct access to formatting state.
    pub fn document(&mut self) -> &mut Document<W, E> {
        self.doc
    }

    pub fn depth(&self) -> usize {
        self.doc.depth()
    }

    /// Start an element given its [`Tag`].
    pub fn element(&mut self, tag: Tag) -> Result<OpenTag<'_, W, E>, Error> {
        self.doc.start_element(tag, self.context)
    }

    /// Write escaped text.
    ///
    /// Inside `<script>` and `<style>` in SGML serialization, text is written
    /// unescaped instead, and must not contain the element's own end tag.
    pub fn text(&mut self, text: impl Display) -> Result<&mut Self, Error> {
        self.doc.check_idle("text")?;
        if !self.context.model.allows_text() {
            debug!(parent = self.context.parent_name(), "text not allowed");
            return Err(Error::IllegalNesting {
                parent: self.context.parent_name(),
                child: "#text",
            });
        }
        let text = text.to_string();
        if text.is_empty() {
            return Ok(self);
        }
        self.doc.auto_indent(0)?;
        let parent = self.context.parent.map(Tag::definition);
        self.doc.write_text(parent.as_ref(), &text)?;
        Ok(self)
    }

    /// Write markup without escaping or checks.
    pub fn raw(&mut self, markup: &str) -> Result<&mut Self, Error> {
        self.doc.raw(markup)?;
        Ok(self)
    }

    pub fn comment(&mut self, comment: &str) -> Result<&mut Self, Error> {
        self.doc.comment(comment)?;
        Ok(self)
    }

    pub fn nl(&mut self) -> Result<&mut Self, Error> {
        self.doc.nl()?;
        Ok(self)
    }

    pub fn sp(&mut self) -> Result<&mut Self, Error> {
        self.doc.sp()?;
        Ok(self)
    }
}

macro_rules! define_factories {
    ($($variant:ident $method:ident $name:literal,)*) => {
        impl<'d, W: Write, E: Encoder> Content<'d, W, E> {
            $(
                #[doc = concat!("Start a `<", $name, ">` element.")]
                pub fn $method(&mut self) -> Result<OpenTag<'_, W, E>, Error> {
                    self.element(Tag::$variant)
                }
            )*
        }
    };
}

with_tags!(define_factories);
