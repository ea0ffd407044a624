use std::fmt;
use std::io::Write;

use tracing::{debug, trace};

use crate::content::{Content, Context};
use crate::element::OpenTag;
use crate::encoder::{Encoder, MarkupEncoder};
use crate::error::Error;
use crate::output::pretty::{FormatState, Saved, INDENT};
use crate::output::{Doctype, ElementDef, Exclusion, Layout, Parameters, Serialization, Tag};

/// Formatting and exclusion state to put back when an element body ends.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    format: Saved,
    exclusions: usize,
}

/// One rendering session.
///
/// A document owns its output sink and all mutable formatting state: the
/// current depth, whether the last character written was a newline, and
/// whether automatic newlines and indentation are on. Markup is streamed to
/// the sink as it is produced; no tree is built.
///
/// Each concurrent render needs its own `Document`.
///
/// ```rust
/// use fluent_html::{Document, Error};
/// use fluent_html::output::Parameters;
///
/// let mut doc = Document::new(Vec::new(), Parameters::default());
/// doc.content().p()?.class("greeting")?.text("Hello & welcome")?;
/// let html = String::from_utf8(doc.finish()?).unwrap();
/// assert_eq!(html, r#"<p class="greeting">Hello &amp; welcome</p>"#);
/// # Ok::<(), Error>(())
/// ```
pub struct Document<W: Write, E: Encoder = MarkupEncoder> {
    sink: Option<W>,
    encoder: E,
    serialization: Serialization,
    doctype: Doctype,
    state: FormatState,
    // the element whose attributes are being written, if any
    open_tag: Option<&'static str>,
    // ancestors that forbid certain descendants, innermost last
    exclusions: Vec<(Tag, Exclusion)>,
    // lowercased end of the raw text written so far in the current element,
    // short of a full end tag
    raw_tail: String,
}

impl<W: Write> Document<W> {
    /// Start a document writing to `sink`, escaping with [`MarkupEncoder`].
    pub fn new(sink: W, parameters: Parameters) -> Self {
        Self::with_encoder(sink, parameters, MarkupEncoder)
    }
}

impl<W: Write, E: Encoder> Document<W, E> {
    /// Start a document writing to `sink`, escaping with `encoder`.
    pub fn with_encoder(sink: W, parameters: Parameters, encoder: E) -> Self {
        Document {
            sink: Some(sink),
            encoder,
            serialization: parameters.serialization,
            doctype: parameters.doctype,
            state: FormatState::new(parameters.auto_newline, parameters.indent),
            open_tag: None,
            exclusions: Vec::new(),
            raw_tail: String::new(),
        }
    }

    pub fn serialization(&self) -> Serialization {
        self.serialization
    }

    pub fn doctype(&self) -> Doctype {
        self.doctype
    }

    /// The current nesting depth used for indentation.
    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    /// Whether the last character written was a newline.
    ///
    /// This is also true before anything has been written.
    pub fn at_newline(&self) -> bool {
        self.state.at_newline()
    }

    pub fn auto_newline_enabled(&self) -> bool {
        self.state.auto_newline()
    }

    pub fn indent_enabled(&self) -> bool {
        self.state.indent()
    }

    pub fn set_auto_newline(&mut self, auto_newline: bool) -> &mut Self {
        self.state.set_auto_newline(auto_newline);
        self
    }

    pub fn set_indent(&mut self, indent: bool) -> &mut Self {
        self.state.set_indent(indent);
        self
    }

    pub fn set_depth(&mut self, depth: usize) -> &mut Self {
        self.state.set_depth(depth);
        self
    }

    pub fn inc_depth(&mut self) -> &mut Self {
        self.state.set_depth(self.state.depth() + 1);
        self
    }

    /// Decrease the depth, stopping at zero.
    pub fn dec_depth(&mut self) -> &mut Self {
        self.state.set_depth(self.state.depth().saturating_sub(1));
        self
    }

    /// The sink, unless it has been detached.
    pub fn sink(&self) -> Option<&W> {
        self.sink.as_ref()
    }

    /// Swap in a new sink, returning the previous one.
    ///
    /// Formatting state carries over, so rendering continues seamlessly.
    pub fn replace_sink(&mut self, sink: W) -> Option<W> {
        self.sink.replace(sink)
    }

    /// Take the sink away. Any further write fails with
    /// [`Error::SinkDetached`].
    pub fn detach(&mut self) -> Option<W> {
        self.sink.take()
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W, Error> {
        self.check_idle("the end of the document")?;
        let mut sink = self.sink.take().ok_or(Error::SinkDetached)?;
        sink.flush()?;
        Ok(sink)
    }

    // All output goes through here.
    pub(crate) fn write(&mut self, s: &str) -> Result<(), Error> {
        let sink = self.sink.as_mut().ok_or(Error::SinkDetached)?;
        sink.write_all(s.as_bytes())?;
        self.state.observe(s);
        Ok(())
    }

    fn write_indentation(&mut self, width: usize) -> Result<(), Error> {
        if width > 0 {
            self.write(&INDENT.repeat(width))?;
        }
        Ok(())
    }

    pub(crate) fn check_idle(&self, attempted: &'static str) -> Result<(), Error> {
        match self.open_tag {
            Some(open) => Err(Error::TagInProgress { open, attempted }),
            None => Ok(()),
        }
    }

    pub(crate) fn set_open_tag(&mut self, open_tag: Option<&'static str>) {
        self.open_tag = open_tag;
    }

    pub(crate) fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Write a newline, unless automatic newlines are off or the output is
    /// already at the start of a line.
    pub fn auto_newline(&mut self) -> Result<&mut Self, Error> {
        self.check_idle("a newline")?;
        if self.state.newline_due() {
            self.write("\n")?;
        }
        Ok(self)
    }

    /// [`auto_newline`](Self::auto_newline), then indent to `depth + offset`
    /// levels if indentation is on.
    pub fn auto_newline_indent(&mut self, offset: isize) -> Result<&mut Self, Error> {
        self.auto_newline()?;
        if self.state.indenting() {
            self.write_indentation(self.state.width(offset))?;
        }
        Ok(self)
    }

    /// Indent to `depth + offset` levels, but only at the start of a line
    /// and only if automatic indentation is on.
    pub fn auto_indent(&mut self, offset: isize) -> Result<&mut Self, Error> {
        self.check_idle("indentation")?;
        if self.state.indenting() && self.state.at_newline() {
            self.write_indentation(self.state.width(offset))?;
        }
        Ok(self)
    }

    /// Write a newline.
    pub fn nl(&mut self) -> Result<&mut Self, Error> {
        self.check_idle("a newline")?;
        self.write("\n")?;
        Ok(self)
    }

    /// Write a newline, then indent if indentation is on.
    pub fn nli(&mut self, offset: isize) -> Result<&mut Self, Error> {
        self.nl()?;
        self.indent(offset)
    }

    /// Indent to `depth + offset` levels if indentation is on.
    pub fn indent(&mut self, offset: isize) -> Result<&mut Self, Error> {
        self.check_idle("indentation")?;
        if self.state.indent() {
            self.write_indentation(self.state.width(offset))?;
        }
        Ok(self)
    }

    /// Write a single space.
    pub fn sp(&mut self) -> Result<&mut Self, Error> {
        self.check_idle("a space")?;
        self.write(" ")?;
        Ok(self)
    }

    /// Write `markup` as-is, without any escaping.
    pub fn raw(&mut self, markup: &str) -> Result<&mut Self, Error> {
        self.check_idle("raw markup")?;
        self.write(markup)?;
        Ok(self)
    }

    /// Write a comment. Text that would end the comment early, or make
    /// parsers end it early, is rejected.
    pub fn comment(&mut self, comment: &str) -> Result<&mut Self, Error> {
        self.check_idle("a comment")?;
        let invalid = comment.contains("--")
            || comment.contains("<!--")
            || comment.ends_with('-')
            || comment.starts_with('>')
            || comment.starts_with("->");
        if invalid {
            return Err(Error::InvalidComment(comment.to_string()));
        }
        self.auto_indent(0)?;
        self.write(&format!("<!--{}-->", comment))?;
        Ok(self)
    }

    /// Write the XML declaration. Only written for XML serialization.
    pub fn xml_declaration(&mut self) -> Result<&mut Self, Error> {
        self.check_idle("the XML declaration")?;
        if self.serialization == Serialization::Xml {
            self.write("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n")?;
        }
        Ok(self)
    }

    /// Write the `<!DOCTYPE ...>` declaration for the document's doctype.
    pub fn doctype_declaration(&mut self) -> Result<&mut Self, Error> {
        self.check_idle("the doctype")?;
        if let Some(declaration) = self.doctype.declaration(self.serialization) {
            self.write(declaration)?;
            self.write("\n")?;
        }
        Ok(self)
    }

    /// The top-level content context. It accepts any element and text, so
    /// fragments can be rendered as well as whole documents.
    pub fn content(&mut self) -> Content<'_, W, E> {
        Content::new(self, Context::document())
    }

    /// Start the `<html>` element.
    pub fn html(&mut self) -> Result<OpenTag<'_, W, E>, Error> {
        self.start_element(Tag::Html, Context::document())
    }

    /// Check `tag` against doctype, parent and ancestors, then write its
    /// start tag.
    pub(crate) fn start_element(
        &mut self,
        tag: Tag,
        context: Context,
    ) -> Result<OpenTag<'_, W, E>, Error> {
        self.check_idle(tag.name())?;
        let def = tag.definition();
        if !def.support.allows(self.doctype) {
            debug!(element = tag.name(), doctype = %self.doctype, "unsupported element");
            return Err(Error::UnsupportedElement {
                element: tag.name(),
                doctype: self.doctype,
            });
        }
        if !context.model().allows(tag, def.categories) {
            debug!(parent = context.parent_name(), child = tag.name(), "illegal nesting");
            return Err(Error::IllegalNesting {
                parent: context.parent_name(),
                child: tag.name(),
            });
        }
        if let Some((ancestor, _)) = self
            .exclusions
            .iter()
            .rev()
            .find(|(_, exclusion)| exclusion.forbids(tag, def.categories))
        {
            debug!(ancestor = ancestor.name(), child = tag.name(), "forbidden descendant");
            return Err(Error::ForbiddenDescendant {
                ancestor: ancestor.name(),
                child: tag.name(),
            });
        }
        let model = def.content.resolve(context.model());
        OpenTag::start(self, def, model)
    }

    /// Write text as content of `parent` (`None` at the top level).
    pub(crate) fn write_text(&mut self, parent: Option<&ElementDef>, text: &str) -> Result<(), Error> {
        match parent {
            Some(def) if def.raw_text && self.serialization == Serialization::Sgml => {
                let end_tag = format!("</{}", def.name());
                // the end tag may be split across several runs of text
                let pending = format!("{}{}", self.raw_tail, text.to_ascii_lowercase());
                if pending.contains(&end_tag) {
                    return Err(Error::InvalidRawText {
                        element: def.name(),
                    });
                }
                self.write(text)?;
                let mut start = pending.len().saturating_sub(end_tag.len() - 1);
                while !pending.is_char_boundary(start) {
                    start += 1;
                }
                self.raw_tail = pending[start..].to_string();
                Ok(())
            }
            _ => {
                let encoded = self.encoder.text(text, self.serialization);
                self.write(&encoded)
            }
        }
    }

    pub(crate) fn write_end_tag(&mut self, def: &ElementDef) -> Result<(), Error> {
        self.check_idle("an end tag")?;
        self.write("</")?;
        self.write(def.name())?;
        self.write(">")?;
        self.raw_tail.clear();
        trace!(element = def.name(), depth = self.depth(), "end tag");
        Ok(())
    }

    /// Enter the body of `def`: adjust formatting for its layout and
    /// activate its exclusions.
    pub(crate) fn enter(&mut self, def: &ElementDef) -> Frame {
        let format = match def.layout {
            Layout::Block => self.state.push_depth(),
            Layout::Verbatim => self.state.suppress(),
            Layout::Root | Layout::Inline | Layout::LineBreak => self.state.keep(),
        };
        self.raw_tail.clear();
        let exclusions = self.exclusions.len();
        if !def.exclusion.is_empty() {
            self.exclusions.push((def.tag, def.exclusion));
        }
        Frame { format, exclusions }
    }

    /// Undo [`enter`](Self::enter), whatever happened in between.
    pub(crate) fn leave(&mut self, frame: Frame) {
        self.state.restore(frame.format);
        self.exclusions.truncate(frame.exclusions);
        self.raw_tail.clear();
    }

    /// Runs once an element is completely written.
    pub(crate) fn after_element(&mut self, def: &ElementDef) -> Result<(), Error> {
        match def.layout {
            Layout::Block | Layout::Root | Layout::Verbatim | Layout::LineBreak => {
                self.auto_newline()?;
            }
            Layout::Inline => {}
        }
        Ok(())
    }
}

impl<W: Write, E: Encoder> fmt::Debug for Document<W, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("serialization", &self.serialization)
            .field("doctype", &self.doctype)
            .field("state", &self.state)
            .field("open_tag", &self.open_tag)
            .field("detached", &self.sink.is_none())
            .finish()
    }
}
