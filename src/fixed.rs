//! A fixed representation of a markup fragment.
//!
//! Sometimes the structure to render is prepared up front, or comes from
//! elsewhere. The types in this module hold such a fragment as plain owned
//! data. Rendering it goes through the same checks as writing it by hand.
//!
//! Example:
//!
//! ```rust
//! use fluent_html::fixed;
//! use fluent_html::output::{Parameters, Tag};
//!
//! let list = fixed::Element {
//!     tag: Tag::Ul,
//!     attributes: vec![("class".to_string(), "menu".to_string())],
//!     children: vec![fixed::Content::Element(fixed::Element {
//!         tag: Tag::Li,
//!         attributes: vec![],
//!         children: vec![fixed::Content::Text("Home".to_string())],
//!     })],
//! };
//!
//! assert_eq!(
//!     list.to_string(Parameters::default()).unwrap(),
//!     r#"<ul class="menu"><li>Home</li></ul>"#
//! );
//! ```
use std::io::Write;

use crate::document::Document;
use crate::encoder::Encoder;
use crate::error::Error;
use crate::output::{Parameters, Tag};

/// A fixed representation of an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// The element type.
    pub tag: Tag,
    /// Attribute names and values, written in order without further checks
    /// than the name.
    pub attributes: Vec<(String, String)>,
    /// Children
    pub children: Vec<Content>,
}

/// A fixed representation of element content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    /// Text, escaped when rendered.
    Text(String),
    /// A comment.
    Comment(String),
    /// An element.
    Element(Element),
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag: Tag) -> Self {
        Element {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Render this element into `content`.
    pub fn render<W: Write, E: Encoder>(
        &self,
        content: &mut crate::Content<'_, W, E>,
    ) -> Result<(), Error> {
        let mut open = content.element(self.tag)?;
        for (name, value) in &self.attributes {
            open = open.attr(name, value)?;
        }
        match self.children.as_slice() {
            [] => open.close(),
            [Content::Text(text)] => open.text(text),
            children => open.body(|content| {
                for child in children {
                    child.render(content)?;
                }
                Ok(())
            }),
        }
    }

    /// Render this element as a standalone fragment.
    pub fn to_string(&self, parameters: Parameters) -> Result<String, Error> {
        let mut doc = Document::new(Vec::new(), parameters);
        self.render(&mut doc.content())?;
        let bytes = doc.finish()?;
        // everything written came from &str
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Content {
    /// Render this node into `content`.
    pub fn render<W: Write, E: Encoder>(
        &self,
        content: &mut crate::Content<'_, W, E>,
    ) -> Result<(), Error> {
        match self {
            Content::Text(text) => content.text(text).map(|_| ()),
            Content::Comment(comment) => content.comment(comment).map(|_| ()),
            Content::Element(element) => element.render(content),
        }
    }
}
