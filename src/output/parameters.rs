//! Rendering parameters.
//!
//! The main entry point is [`Parameters`], which you pass into
//! [`Document::new`](crate::Document::new) to control the output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Doctype, Serialization};

/// Parameters for a rendering session.
///
/// ```rust
/// use fluent_html::output::{Doctype, Parameters, Serialization};
///
/// let parameters = Parameters {
///     serialization: Serialization::Xml,
///     doctype: Doctype::Strict,
///     ..Parameters::pretty()
/// };
/// assert!(parameters.auto_newline);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Parameters {
    /// SGML-style HTML or XML-style XHTML.
    pub serialization: Serialization,
    /// The doctype elements and attributes are checked against.
    pub doctype: Doctype,
    /// Insert newlines around block-level elements.
    pub auto_newline: bool,
    /// Indent with tabs after automatically inserted newlines.
    pub indent: bool,
}

impl Parameters {
    /// Default parameters with automatic newlines and indentation enabled.
    pub fn pretty() -> Self {
        Self {
            auto_newline: true,
            indent: true,
            ..Default::default()
        }
    }

    /// XHTML output for the given doctype.
    pub fn xhtml(doctype: Doctype) -> Self {
        Self {
            serialization: Serialization::Xml,
            doctype,
            ..Default::default()
        }
    }
}
