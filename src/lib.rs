//! Fluent HTML is a streaming builder for HTML and XHTML markup.
//!
//! Markup is written straight to an [`std::io::Write`] sink as you describe
//! it; no tree is built in memory. Along the way, every element is checked
//! against the content model of its parent, against rules its ancestors
//! impose (no links inside links, no nested forms), and against the doctype
//! of the document. Violations are reported as [`Error`] values naming the
//! offending elements.
//!
//! A [`Document`] holds the sink and the formatting state. Its
//! [`content`](Document::content) is a [`Content`] context with one factory
//! method per element. A factory returns an [`OpenTag`] to add attributes to,
//! which is then finished in one of four ways: empty with
//! [`close`](OpenTag::close), with text using [`text`](OpenTag::text), with
//! children written by a callback through [`body`](OpenTag::body), or with
//! an explicit [`Scope`] from [`open`](OpenTag::open).
//!
//! ```rust
//! use fluent_html::{Document, Error};
//! use fluent_html::output::Parameters;
//!
//! let mut doc = Document::new(Vec::new(), Parameters::pretty());
//! doc.doctype_declaration()?;
//! doc.html()?.attr("lang", "en")?.body(|html| {
//!     html.head()?.body(|head| head.title()?.text("Hello"))?;
//!     html.body()?.body(|body| {
//!         body.h1()?.text("Hello")?;
//!         body.p()?.body(|p| {
//!             p.text("Read the ")?;
//!             p.a()?.href("/docs")?.text("docs")?;
//!             p.text(".")?;
//!             Ok(())
//!         })
//!     })
//! })?;
//!
//! let html = String::from_utf8(doc.finish()?).unwrap();
//! assert_eq!(
//!     html,
//!     concat!(
//!         "<!DOCTYPE html>\n",
//!         "<html lang=\"en\">\n",
//!         "<head>\n",
//!         "<title>Hello</title>\n",
//!         "</head>\n",
//!         "<body>\n",
//!         "<h1>Hello</h1>\n",
//!         "<p>\n",
//!         "\tRead the <a href=\"/docs\">docs</a>.\n",
//!         "</p>\n",
//!         "</body>\n",
//!         "</html>\n",
//!     )
//! );
//! # Ok::<(), Error>(())
//! ```
//!
//! Output is HTML 5 in SGML serialization by default. See
//! [`output::Parameters`] for XHTML, the HTML 4.01 doctypes and formatting.
#![forbid(unsafe_code)]

mod attribute;
mod content;
mod document;
mod element;
mod encoder;
mod entity;
mod error;
pub mod fixed;
pub mod output;
#[cfg(feature = "proptest")]
pub mod proptest;

pub use attribute::{Autocomplete, Dir, InputType, Method};
pub use content::Content;
pub use document::Document;
pub use element::{OpenTag, Scope};
pub use encoder::{Encoder, MarkupEncoder};
pub use error::Error;
