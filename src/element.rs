//! Writing a single element.
//!
//! An element factory on [`Content`] writes `<name` and hands back an
//! [`OpenTag`]. Attributes are appended through its methods, and exactly one
//! terminal method finishes the element:
//!
//! - [`OpenTag::close`] for an empty element,
//! - [`OpenTag::text`] for an element containing only text,
//! - [`OpenTag::body`] to write children through a callback,
//! - [`OpenTag::open`] to get a [`Scope`] that is closed later.
//!
//! While an `OpenTag` is alive, nothing else can be written to the document;
//! an `OpenTag` that is dropped without a terminal method leaves the start tag
//! unfinished and every later write fails with [`Error::TagInProgress`].
use std::fmt::Display;
use std::io::Write;
use std::ops::{Deref, DerefMut};

use ahash::{HashSet, HashSetExt};
use tracing::{debug, trace};

use crate::attribute::{
    self, validate_data_name, validate_event, validate_id, validate_name, AttributeDef,
    Autocomplete, Dir, InputType, Method,
};
use crate::content::{Content, Context};
use crate::document::{Document, Frame};
use crate::encoder::{Encoder, MarkupEncoder};
use crate::error::Error;
use crate::output::{ContentModel, ElementDef, Layout, Serialization, Support, Tag};

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A start tag that is still accepting attributes.
#[must_use = "an unfinished start tag blocks all further output"]
pub struct OpenTag<'d, W: Write, E: Encoder = MarkupEncoder> {
    doc: &'d mut Document<W, E>,
    def: ElementDef,
    model: ContentModel,
    // lowercased names of the attributes written so far
    seen: HashSet<String>,
}

impl<'d, W: Write, E: Encoder> OpenTag<'d, W, E> {
    pub(crate) fn start(
        doc: &'d mut Document<W, E>,
        def: ElementDef,
        model: ContentModel,
    ) -> Result<Self, Error> {
        match def.layout {
            Layout::Inline | Layout::LineBreak => doc.auto_indent(0)?,
            Layout::Block | Layout::Root | Layout::Verbatim => doc.auto_newline_indent(0)?,
        };
        doc.write("<")?;
        doc.write(def.name())?;
        let mut seen = HashSet::new();
        if def.tag == Tag::Html && doc.serialization() == Serialization::Xml {
            doc.write(" xmlns=\"")?;
            doc.write(XHTML_NAMESPACE)?;
            doc.write("\"")?;
            seen.insert("xmlns".to_string());
        }
        doc.set_open_tag(Some(def.name()));
        trace!(element = def.name(), depth = doc.depth(), "start tag");
        Ok(OpenTag {
            doc,
            def,
            model,
            seen,
        })
    }

    /// The element being written.
    pub fn tag(&self) -> Tag {
        self.def.tag
    }

    fn remember(&mut self, name: &str) -> Result<(), Error> {
        if self.seen.insert(name.to_ascii_lowercase()) {
            Ok(())
        } else {
            Err(Error::DuplicateAttribute {
                attribute: name.to_string(),
                element: self.def.name(),
            })
        }
    }

    fn write_attribute(&mut self, name: &str, value: &str) -> Result<(), Error> {
        self.remember(name)?;
        let value = self.doc.encoder().attribute(value, self.doc.serialization());
        self.doc.write(" ")?;
        self.doc.write(name)?;
        self.doc.write("=\"")?;
        self.doc.write(&value)?;
        self.doc.write("\"")
    }

    fn write_flag(&mut self, name: &str) -> Result<(), Error> {
        self.remember(name)?;
        self.doc.write(" ")?;
        self.doc.write(name)?;
        if self.doc.serialization() == Serialization::Xml {
            // XML has no minimized attributes
            self.doc.write("=\"")?;
            self.doc.write(name)?;
            self.doc.write("\"")?;
        }
        Ok(())
    }

    fn unsupported(&self, attribute: String) -> Error {
        debug!(%attribute, element = self.def.name(), "unsupported attribute");
        Error::UnsupportedAttribute {
            attribute,
            element: self.def.name(),
            doctype: self.doc.doctype(),
        }
    }

    fn check(&self, def: &AttributeDef) -> Result<(), Error> {
        if !def.applies_to(self.def.tag) {
            debug!(attribute = def.name, element = self.def.name(), "attribute not allowed");
            return Err(Error::AttributeNotAllowed {
                attribute: def.name,
                element: self.def.name(),
            });
        }
        if !def.support.allows(self.doc.doctype()) {
            return Err(self.unsupported(def.name.to_string()));
        }
        Ok(())
    }

    fn check_value(&self, attribute: &str, value: &str, support: Support) -> Result<(), Error> {
        if support.allows(self.doc.doctype()) {
            Ok(())
        } else {
            Err(self.unsupported(format!("{}=\"{}\"", attribute, value)))
        }
    }

    fn guarded(mut self, def: &AttributeDef, value: impl Display) -> Result<Self, Error> {
        self.check(def)?;
        self.write_attribute(def.name, &value.to_string())?;
        Ok(self)
    }

    fn guarded_flag(mut self, def: &AttributeDef, on: bool) -> Result<Self, Error> {
        self.check(def)?;
        if on {
            self.write_flag(def.name)?;
        }
        Ok(self)
    }

    fn positive(attribute: &'static str, value: u32) -> Result<(), Error> {
        if value >= 1 {
            Ok(())
        } else {
            Err(Error::InvalidAttributeValue {
                attribute: attribute.to_string(),
                value: value.to_string(),
                reason: "must be at least 1",
            })
        }
    }

    /// Write any attribute. Only the name is checked, so that it can be
    /// serialized.
    pub fn attr(mut self, name: &str, value: impl Display) -> Result<Self, Error> {
        validate_name(name, self.doc.serialization())?;
        self.write_attribute(name, &value.to_string())?;
        Ok(self)
    }

    /// Write an attribute if there is a value.
    pub fn attr_opt(self, name: &str, value: Option<impl Display>) -> Result<Self, Error> {
        match value {
            Some(value) => self.attr(name, value),
            None => {
                validate_name(name, self.doc.serialization())?;
                Ok(self)
            }
        }
    }

    /// Write a boolean attribute if `on` is true: `checked` in SGML,
    /// `checked="checked"` in XML.
    pub fn bool_attr(mut self, name: &str, on: bool) -> Result<Self, Error> {
        validate_name(name, self.doc.serialization())?;
        if on {
            self.write_flag(name)?;
        }
        Ok(self)
    }

    pub fn id(mut self, id: &str) -> Result<Self, Error> {
        validate_id(id)?;
        self.write_attribute("id", id)?;
        Ok(self)
    }

    pub fn class(mut self, class: impl Display) -> Result<Self, Error> {
        self.write_attribute("class", &class.to_string())?;
        Ok(self)
    }

    pub fn style(mut self, style: impl Display) -> Result<Self, Error> {
        self.write_attribute("style", &style.to_string())?;
        Ok(self)
    }

    pub fn title(mut self, title: impl Display) -> Result<Self, Error> {
        self.write_attribute("title", &title.to_string())?;
        Ok(self)
    }

    pub fn lang(mut self, lang: &str) -> Result<Self, Error> {
        self.write_attribute("lang", lang)?;
        Ok(self)
    }

    pub fn dir(mut self, dir: Dir) -> Result<Self, Error> {
        self.check_value("dir", dir.as_str(), dir.support())?;
        self.write_attribute("dir", dir.as_str())?;
        Ok(self)
    }

    pub fn tabindex(mut self, tabindex: i32) -> Result<Self, Error> {
        self.write_attribute("tabindex", &tabindex.to_string())?;
        Ok(self)
    }

    /// `hidden`, HTML 5 only.
    pub fn hidden(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::HIDDEN, on)
    }

    /// A custom `data-<name>` attribute, HTML 5 only.
    pub fn data(mut self, name: &str, value: impl Display) -> Result<Self, Error> {
        self.check(&attribute::DATA)?;
        validate_data_name(name)?;
        self.write_attribute(&format!("data-{}", name), &value.to_string())?;
        Ok(self)
    }

    /// An `on<event>` handler attribute, for instance `on("click", ...)`.
    pub fn on(mut self, event: &str, script: impl Display) -> Result<Self, Error> {
        validate_event(event)?;
        self.write_attribute(&format!("on{}", event), &script.to_string())?;
        Ok(self)
    }

    pub fn href(self, href: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::HREF, href)
    }

    pub fn src(self, src: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::SRC, src)
    }

    pub fn alt(self, alt: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::ALT, alt)
    }

    pub fn name(self, name: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::NAME, name)
    }

    pub fn value(self, value: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::VALUE, value)
    }

    /// `type`. On `input` the value must be a known [`InputType`].
    pub fn type_(self, value: &str) -> Result<Self, Error> {
        if self.def.tag == Tag::Input {
            let input_type: InputType = value.parse()?;
            return self.input_type(input_type);
        }
        self.guarded(&attribute::TYPE, value)
    }

    /// `type` on `input`.
    pub fn input_type(self, input_type: InputType) -> Result<Self, Error> {
        if self.def.tag != Tag::Input {
            return Err(Error::AttributeNotAllowed {
                attribute: "type",
                element: self.def.name(),
            });
        }
        self.check_value("type", input_type.as_str(), input_type.support())?;
        self.guarded(&attribute::TYPE, input_type)
    }

    pub fn rel(self, rel: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::REL, rel)
    }

    /// `target`, which the strict doctypes lack.
    pub fn target(self, target: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::TARGET, target)
    }

    /// `charset` on `script`, or on `meta` in HTML 5.
    pub fn charset(self, charset: impl Display) -> Result<Self, Error> {
        if self.def.tag == Tag::Meta && !Support::Html5Only.allows(self.doc.doctype()) {
            return Err(self.unsupported("charset".to_string()));
        }
        self.guarded(&attribute::CHARSET, charset)
    }

    pub fn content(self, content: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::CONTENT, content)
    }

    pub fn http_equiv(self, http_equiv: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::HTTP_EQUIV, http_equiv)
    }

    pub fn action(self, action: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::ACTION, action)
    }

    pub fn method(self, method: Method) -> Result<Self, Error> {
        self.check_value("method", method.as_str(), method.support())?;
        self.guarded(&attribute::METHOD, method)
    }

    /// `autocomplete`. A `form` only accepts [`Autocomplete::On`] and
    /// [`Autocomplete::Off`].
    pub fn autocomplete(self, autocomplete: Autocomplete) -> Result<Self, Error> {
        if self.def.tag == Tag::Form && !autocomplete.is_toggle() {
            return Err(Error::InvalidAttributeValue {
                attribute: "autocomplete".to_string(),
                value: autocomplete.to_string(),
                reason: "a form only accepts \"on\" or \"off\"",
            });
        }
        self.guarded(&attribute::AUTOCOMPLETE, autocomplete)
    }

    pub fn checked(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::CHECKED, on)
    }

    pub fn selected(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::SELECTED, on)
    }

    pub fn disabled(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::DISABLED, on)
    }

    pub fn required(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::REQUIRED, on)
    }

    pub fn readonly(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::READONLY, on)
    }

    pub fn multiple(self, on: bool) -> Result<Self, Error> {
        self.guarded_flag(&attribute::MULTIPLE, on)
    }

    pub fn placeholder(self, placeholder: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::PLACEHOLDER, placeholder)
    }

    pub fn width(self, width: u32) -> Result<Self, Error> {
        self.guarded(&attribute::WIDTH, width)
    }

    pub fn height(self, height: u32) -> Result<Self, Error> {
        self.guarded(&attribute::HEIGHT, height)
    }

    /// `colspan`, at least 1.
    pub fn colspan(self, colspan: u32) -> Result<Self, Error> {
        Self::positive("colspan", colspan)?;
        self.guarded(&attribute::COLSPAN, colspan)
    }

    /// `rowspan`. Zero means the cell spans to the end of its section.
    pub fn rowspan(self, rowspan: u32) -> Result<Self, Error> {
        self.guarded(&attribute::ROWSPAN, rowspan)
    }

    /// `for`, the id of the labeled control.
    pub fn for_(self, id: &str) -> Result<Self, Error> {
        validate_id(id)?;
        self.guarded(&attribute::FOR, id)
    }

    /// `download`, HTML 5 only. An empty file name keeps the name from the
    /// URL.
    pub fn download(self, filename: impl Display) -> Result<Self, Error> {
        self.guarded(&attribute::DOWNLOAD, filename)
    }

    pub fn rows(self, rows: u32) -> Result<Self, Error> {
        Self::positive("rows", rows)?;
        self.guarded(&attribute::ROWS, rows)
    }

    pub fn cols(self, cols: u32) -> Result<Self, Error> {
        Self::positive("cols", cols)?;
        self.guarded(&attribute::COLS, cols)
    }

    fn end_start_tag(&mut self) -> Result<(), Error> {
        self.doc.write(">")?;
        self.doc.set_open_tag(None);
        Ok(())
    }

    /// Finish an element without content: `<p></p>`, or `<br>` (`<br/>` in
    /// XML) for a void element.
    pub fn close(mut self) -> Result<(), Error> {
        if !self.def.void {
            self.end_start_tag()?;
            return self.finish();
        }
        let self_close = self.doc.serialization().self_close();
        self.doc.write(self_close)?;
        self.doc.set_open_tag(None);
        trace!(element = self.def.name(), "void element");
        self.doc.after_element(&self.def)
    }

    fn finish(self) -> Result<(), Error> {
        self.doc.write_end_tag(&self.def)?;
        self.doc.after_element(&self.def)
    }

    /// Finish an element with text as its only content.
    pub fn text(mut self, text: impl Display) -> Result<(), Error> {
        if self.def.void {
            return Err(Error::VoidElement(self.def.name()));
        }
        if !self.model.allows_text() {
            debug!(parent = self.def.name(), "text not allowed");
            return Err(Error::IllegalNesting {
                parent: self.def.name(),
                child: "#text",
            });
        }
        let text = text.to_string();
        self.end_start_tag()?;
        self.doc.write_text(Some(&self.def), &text)?;
        self.finish()
    }

    /// [`text`](Self::text) if there is any, [`close`](Self::close)
    /// otherwise.
    pub fn text_opt(self, text: Option<impl Display>) -> Result<(), Error> {
        match text {
            Some(text) => self.text(text),
            None => self.close(),
        }
    }

    /// Finish the start tag and write the children with `f`. The element is
    /// closed afterwards, also when `f` fails; its error is returned as is.
    pub fn body<F>(self, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Content<'d, W, E>) -> Result<(), Error>,
    {
        self.try_body(f)
    }

    /// Like [`body`](Self::body), for callbacks with their own error type.
    pub fn try_body<F, X>(self, f: F) -> Result<(), X>
    where
        F: FnOnce(&mut Content<'d, W, E>) -> Result<(), X>,
        X: From<Error>,
    {
        let mut scope = self.open()?;
        match f(scope.content()) {
            Ok(()) => Ok(scope.end()?),
            Err(err) => {
                scope.abandon();
                Err(err)
            }
        }
    }

    /// Finish the start tag and return a [`Scope`] for the children. The
    /// element is closed by [`Scope::end`], or when the scope is dropped.
    pub fn open(mut self) -> Result<Scope<'d, W, E>, Error> {
        if self.def.void {
            return Err(Error::VoidElement(self.def.name()));
        }
        self.end_start_tag()?;
        // nothing may fail between enter and handing the frame to the scope
        if matches!(self.def.layout, Layout::Block | Layout::Root) {
            self.doc.auto_newline()?;
        }
        let frame = self.doc.enter(&self.def);
        let context = Context::element(self.def.tag, self.model);
        Ok(Scope {
            content: Content::new(self.doc, context),
            def: self.def,
            frame: Some(frame),
        })
    }
}

/// The open body of an element.
///
/// Derefs to [`Content`], so children are written through it directly. The
/// end tag is written by [`end`](Scope::end) or on drop, and the formatting
/// state from before the body is restored either way. Errors can only be
/// observed through `end`.
///
/// ```rust
/// use fluent_html::{Document, Error};
/// use fluent_html::output::Parameters;
///
/// let mut doc = Document::new(Vec::new(), Parameters::default());
/// {
///     let mut content = doc.content();
///     let mut ol = content.ol()?.open()?;
///     for item in ["a", "b"] {
///         ol.li()?.text(item)?;
///     }
///     ol.end()?;
/// }
/// assert_eq!(doc.finish()?, b"<ol><li>a</li><li>b</li></ol>");
/// # Ok::<(), Error>(())
/// ```
pub struct Scope<'d, W: Write, E: Encoder = MarkupEncoder> {
    content: Content<'d, W, E>,
    def: ElementDef,
    // `None` once ended
    frame: Option<Frame>,
}

impl<'d, W: Write, E: Encoder> Scope<'d, W, E> {
    pub fn content(&mut self) -> &mut Content<'d, W, E> {
        &mut self.content
    }

    pub fn is_ended(&self) -> bool {
        self.frame.is_none()
    }

    /// Write the end tag and restore the formatting state. Calling this
    /// again does nothing.
    pub fn end(&mut self) -> Result<(), Error> {
        let Some(frame) = self.frame.take() else {
            return Ok(());
        };
        let doc = &mut *self.content.doc;
        if let Err(err) = doc.check_idle("an end tag") {
            doc.leave(frame);
            return Err(err);
        }
        if self.def.layout == Layout::Verbatim {
            // the end tag belongs to the verbatim region
            let result = doc.write_end_tag(&self.def);
            doc.leave(frame);
            result?;
        } else {
            doc.leave(frame);
            match self.def.layout {
                Layout::Block | Layout::Root => doc.auto_newline_indent(0)?,
                // a block child may have left us at the start of a line
                _ => doc.auto_indent(0)?,
            };
            doc.write_end_tag(&self.def)?;
        }
        doc.after_element(&self.def)
    }

    // Restore the formatting state without writing anything.
    pub(crate) fn abandon(&mut self) {
        if let Some(frame) = self.frame.take() {
            trace!(element = self.def.name(), "scope abandoned");
            self.content.doc.leave(frame);
        }
    }
}

impl<'d, W: Write, E: Encoder> Deref for Scope<'d, W, E> {
    type Target = Content<'d, W, E>;

    fn deref(&self) -> &Self::Target {
        &self.content
    }
}

impl<'d, W: Write, E: Encoder> DerefMut for Scope<'d, W, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.content
    }
}

impl<W: Write, E: Encoder> Drop for Scope<'_, W, E> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.abandon();
        } else if let Err(err) = self.end() {
            debug!(element = self.def.name(), %err, "failed to end scope on drop");
        }
    }
}
